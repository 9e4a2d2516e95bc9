use anyhow::Context;
use clap::Parser;
use tracing::info;

use visual_terminal::host::{MemoryBlock, MemoryWorld};
use visual_terminal::{
    create_block_terminal_with, create_display_terminal_with, Facing, LineFormat, NamedColor, Pose,
    Terminal, TerminalColor, TerminalConfig, Vec3,
};

/// Drive a terminal on the in-memory host and print what the surface shows.
#[derive(Parser, Debug)]
#[command(name = "terminal_demo")]
struct Args {
    /// Block face to mount on (north, east, south, west)
    #[arg(long, default_value = "north")]
    facing: String,

    /// Float at the block position instead of mounting on it
    #[arg(long)]
    floating: bool,

    #[arg(long, default_value_t = 18)]
    line_limit: usize,

    #[arg(long, default_value_t = 6)]
    max_lines: usize,

    /// JSON config file; overrides the limit flags
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            TerminalConfig::from_json(&json)?
        }
        None => TerminalConfig::with_limits(args.line_limit, args.max_lines),
    };

    let mut world = MemoryWorld::new();
    let origin = Pose::new("overworld", Vec3::new(100.0, 64.0, -20.0));

    let mut terminal = if args.floating {
        create_display_terminal_with(&mut world, origin, config)?
    } else {
        let facing: Facing = args.facing.parse()?;
        let block = MemoryBlock::solid(origin);
        create_block_terminal_with(&mut world, &block, facing, config)?
    };
    info!("Created terminal {} ({:?})", terminal.id(), terminal.kind());

    terminal.write_styled("BOOT SEQUENCE", None, LineFormat::bold())?;
    terminal.write_line("checking reactor coolant levels")?;
    terminal.write_colored("coolant low", TerminalColor::Named(NamedColor::Gold))?;
    terminal.write_line("pumping 0%")?;
    for pct in [10, 55, 100] {
        terminal.overwrite_last(&format!("pumping {pct}%"), None)?;
        show(&terminal);
    }
    terminal.write_blank()?;
    terminal.write_colored("ALL SYSTEMS NOMINAL", TerminalColor::Named(NamedColor::Green))?;
    show(&terminal);

    terminal.destroy()?;
    info!("Live surfaces after destroy: {}", world.live_surfaces());
    Ok(())
}

fn show(terminal: &Terminal<visual_terminal::host::MemorySurface>) {
    let Some(surface) = terminal.surface() else {
        return;
    };
    let Some(frame) = surface.frame() else {
        return;
    };

    println!("+{}+", "-".repeat(terminal.config().line_limit));
    for (text, style) in frame.lines() {
        println!(
            "|{:<width$}| {}",
            text,
            style.color,
            width = terminal.config().line_limit
        );
    }
    println!("+{}+", "-".repeat(terminal.config().line_limit));
}
