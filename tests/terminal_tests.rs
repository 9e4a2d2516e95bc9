use visual_terminal::host::{MemoryBlock, MemorySurface, MemoryWorld, SurfaceCall};
use visual_terminal::{
    create_block_terminal, create_block_terminal_with, create_display_terminal, Facing,
    NamedColor, Pose, Terminal, TerminalColor, TerminalConfig, TerminalError, TextAlignment,
    Vec3,
};

fn stone() -> MemoryBlock {
    MemoryBlock::solid(Pose::new("overworld", Vec3::new(10.0, 64.0, 10.0)))
}

fn small_terminal(world: &mut MemoryWorld) -> Terminal<MemorySurface> {
    create_block_terminal_with(world, &stone(), Facing::North, TerminalConfig::with_limits(5, 2))
        .unwrap()
}

#[test]
fn test_scroll_scenario_end_to_end() {
    let mut world = MemoryWorld::new();
    let mut terminal = small_terminal(&mut world);

    terminal.write_line("hello").unwrap();
    terminal.write_line("world").unwrap();
    terminal.write_line("foo12").unwrap();

    assert_eq!(terminal.buffer().texts(), vec!["world", "foo12"]);
    let surface = world.surface(0).unwrap();
    assert_eq!(surface.text().as_deref(), Some("world\nfoo12"));
}

#[test]
fn test_default_block_terminal_wraps_at_eighteen() {
    let mut world = MemoryWorld::new();
    let mut terminal = create_block_terminal(&mut world, &stone(), Facing::South).unwrap();

    assert_eq!(terminal.write_line(&"A".repeat(25)).unwrap(), 2);
    let widths: Vec<usize> = terminal.buffer().lines().iter().map(|l| l.width()).collect();
    assert_eq!(widths, vec![18, 7]);
}

#[test]
fn test_surface_setup_for_each_facing() {
    let expected = [
        (Facing::North, Vec3::new(10.5, 64.0, 11.005), 0.0),
        (Facing::East, Vec3::new(9.995, 64.0, 10.5), 90.0),
        (Facing::South, Vec3::new(10.5, 64.0, 9.995), 180.0),
        (Facing::West, Vec3::new(11.005, 64.0, 10.5), -90.0),
    ];

    for (facing, position, yaw) in expected {
        let mut world = MemoryWorld::new();
        let terminal = create_block_terminal(&mut world, &stone(), facing).unwrap();
        let surface = terminal.surface().unwrap();

        let pose = surface.pose();
        assert!(pose.position.approx_eq(&position, 1e-9), "{facing}: {}", pose.position);
        assert_eq!(pose.yaw, yaw, "{facing}");
        assert_eq!(surface.alignment(), TextAlignment::Left);
        assert_eq!(surface.persistent(), Some(false));
        assert!(surface.calls().contains(&SurfaceCall::SetTransform));
    }
}

#[test]
fn test_configured_colors_reach_surface() {
    let mut world = MemoryWorld::new();
    let config = TerminalConfig::default().with_colors(
        TerminalColor::Named(NamedColor::DarkBlue),
        TerminalColor::Named(NamedColor::Yellow),
    );
    let mut terminal =
        create_block_terminal_with(&mut world, &stone(), Facing::West, config).unwrap();
    terminal.write_line("status ok").unwrap();

    let surface = terminal.surface().unwrap();
    assert_eq!(surface.background(), Some(NamedColor::DarkBlue.to_rgb()));
    let frame = surface.frame().unwrap();
    assert_eq!(frame.styles[0].color, NamedColor::Yellow.to_rgb());
}

#[test]
fn test_rejections() {
    let mut world = MemoryWorld::new();
    let air = MemoryBlock::air(Pose::new("overworld", Vec3::ZERO));

    assert!(matches!(
        create_block_terminal(&mut world, &stone(), Facing::Up),
        Err(TerminalError::UnsupportedFacing(Facing::Up))
    ));
    assert!(matches!(
        create_block_terminal(&mut world, &air, Facing::East),
        Err(TerminalError::NonSolidAnchor { .. })
    ));
    assert_eq!(world.spawned(), 0);

    let mut terminal = small_terminal(&mut world);
    terminal.destroy().unwrap();
    assert!(matches!(
        terminal.write_line("after"),
        Err(TerminalError::OperationOnDestroyedTerminal(_))
    ));
    assert_eq!(world.live_surfaces(), 0);
}

#[test]
fn test_floating_terminal_lifecycle() {
    let mut world = MemoryWorld::new();
    let location = Pose::new("overworld", Vec3::new(0.0, 80.0, 0.0));
    let mut terminal = create_display_terminal(&mut world, location).unwrap();

    terminal.write_line("floating").unwrap();
    terminal.clear().unwrap();
    terminal.clear().unwrap();
    assert!(terminal.buffer().is_empty());
    assert_eq!(world.surface(0).unwrap().text().as_deref(), Some(""));

    terminal.destroy().unwrap();
    assert!(world.surface(0).unwrap().is_destroyed());
}
