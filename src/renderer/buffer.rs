use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerminalError};
use crate::renderer::colors::{Rgb, TerminalColor};

/// Formatting flags carried alongside a line's color. The buffer never
/// interprets them; surfaces decide how (or whether) to draw them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct LineFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl LineFormat {
    pub fn bold() -> Self {
        Self { bold: true, ..Self::default() }
    }

}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub color: TerminalColor,
    pub format: LineFormat,
}

impl Line {
    pub fn new(text: impl Into<String>, color: TerminalColor) -> Self {
        Self {
            text: text.into(),
            color,
            format: LineFormat::default(),
        }
    }

    /// Length in printable units (chars).
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Style of one visible line as sent to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: Rgb,
    pub format: LineFormat,
}

/// Everything a surface needs to redraw: the joined text, one style per
/// visible line and the backdrop color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub text: String,
    pub styles: Vec<LineStyle>,
    pub background: Rgb,
}

impl Frame {
    pub fn line_count(&self) -> usize {
        self.styles.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = (&str, &LineStyle)> {
        self.text.split('\n').zip(self.styles.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Bounded scroll log. Newest lines are appended at the back; once the
/// buffer holds more than `max_lines` the oldest lines fall off the front.
#[derive(Debug, Clone)]
pub struct TerminalBuffer {
    lines: VecDeque<Line>,
    line_limit: usize,
    max_lines: usize,
    background_color: TerminalColor,
    default_text_color: TerminalColor,
    dirty: bool,
}

impl TerminalBuffer {
    pub fn new(
        line_limit: usize,
        max_lines: usize,
        background_color: TerminalColor,
        default_text_color: TerminalColor,
    ) -> Result<Self> {
        if line_limit == 0 {
            return Err(TerminalError::InvalidConfiguration(
                "line limit must be greater than zero".to_string(),
            ));
        }
        if max_lines == 0 {
            return Err(TerminalError::InvalidConfiguration(
                "max lines must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            lines: VecDeque::with_capacity(max_lines),
            line_limit,
            max_lines,
            background_color,
            default_text_color,
            dirty: false,
        })
    }

    /// Append text in the default color. Returns the number of lines produced.
    pub fn append(&mut self, text: &str) -> usize {
        self.append_styled(text, None, LineFormat::default())
    }

    pub fn append_colored(&mut self, text: &str, color: TerminalColor) -> usize {
        self.append_styled(text, Some(color), LineFormat::default())
    }

    pub fn append_styled(
        &mut self,
        text: &str,
        color: Option<TerminalColor>,
        format: LineFormat,
    ) -> usize {
        let color = color.unwrap_or(self.default_text_color);
        let wrapped = self.wrap(text);
        let produced = wrapped.len();

        for text in wrapped {
            self.lines.push_back(Line { text, color, format });
        }
        if produced > 0 {
            self.evict_overflow();
            self.dirty = true;
        }
        produced
    }

    /// Append an explicit empty line.
    pub fn append_blank(&mut self) {
        self.lines
            .push_back(Line::new(String::new(), self.default_text_color));
        self.evict_overflow();
        self.dirty = true;
    }

    /// Replace the newest line with `text`, keeping its color unless `color`
    /// is given and always keeping its format. Text that wraps spills into
    /// additional lines as with `append`. On an empty buffer this is an append.
    pub fn overwrite_last(&mut self, text: &str, color: Option<TerminalColor>) -> usize {
        let previous = self.lines.pop_back();
        let format = previous.as_ref().map(|line| line.format).unwrap_or_default();
        let color = color.or_else(|| previous.as_ref().map(|line| line.color));
        let produced = self.append_styled(text, color, format);
        // Overwriting with "" erases the line, which still needs a redraw.
        if previous.is_some() {
            self.dirty = true;
        }
        produced
    }

    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.dirty = true;
        }
    }

    /// The retained lines joined for display, oldest first.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.lines.len() * (self.line_limit + 1));
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&line.text);
        }
        out
    }

    pub fn frame(&self) -> Frame {
        Frame {
            text: self.render(),
            styles: self
                .lines
                .iter()
                .map(|line| LineStyle {
                    color: line.color.to_rgb(),
                    format: line.format,
                })
                .collect(),
            background: self.background_color.to_rgb(),
        }
    }

    // Hard break every `line_limit` chars; embedded newlines start a new line.
    fn wrap(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let body = text.strip_suffix('\n').unwrap_or(text);
        let mut out = Vec::new();
        for segment in body.split('\n') {
            let mut current = String::new();
            let mut width = 0;
            for ch in segment.chars().filter(|c| *c != '\r') {
                if width == self.line_limit {
                    out.push(std::mem::take(&mut current));
                    width = 0;
                }
                current.push(ch);
                width += 1;
            }
            out.push(current);
        }
        out
    }

    // Scroll: drop the oldest lines until the viewport fits again.
    fn evict_overflow(&mut self) {
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
        }
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // Access methods
    pub fn lines(&self) -> &VecDeque<Line> {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_limit(&self) -> usize {
        self.line_limit
    }

    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    pub fn background_color(&self) -> TerminalColor {
        self.background_color
    }

    pub fn default_text_color(&self) -> TerminalColor {
        self.default_text_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::colors::NamedColor;
    use proptest::prelude::*;

    fn buffer(line_limit: usize, max_lines: usize) -> TerminalBuffer {
        TerminalBuffer::new(
            line_limit,
            max_lines,
            TerminalColor::BLACK,
            TerminalColor::DARK_GREEN,
        )
        .unwrap()
    }

    #[test]
    fn test_buffer_creation() {
        let buf = buffer(18, 12);
        assert_eq!(buf.line_limit(), 18);
        assert_eq!(buf.max_lines(), 12);
        assert!(buf.is_empty());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let zero_width =
            TerminalBuffer::new(0, 12, TerminalColor::BLACK, TerminalColor::DARK_GREEN);
        assert!(matches!(zero_width, Err(TerminalError::InvalidConfiguration(_))));

        let zero_height =
            TerminalBuffer::new(18, 0, TerminalColor::BLACK, TerminalColor::DARK_GREEN);
        assert!(matches!(zero_height, Err(TerminalError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_wrap_at_limit() {
        let mut buf = buffer(18, 12);
        let produced = buf.append(&"A".repeat(25));

        assert_eq!(produced, 2);
        assert_eq!(buf.line(0).unwrap().width(), 18);
        assert_eq!(buf.line(1).unwrap().width(), 7);
    }

    #[test]
    fn test_wrap_ignores_whitespace() {
        let mut buf = buffer(5, 12);
        buf.append("ab cd ef");
        assert_eq!(buf.texts(), vec!["ab cd", " ef"]);
    }

    #[test]
    fn test_wrap_counts_chars_not_bytes() {
        let mut buf = buffer(3, 12);
        buf.append("ääää");
        assert_eq!(buf.texts(), vec!["äää", "ä"]);
    }

    #[test]
    fn test_empty_append_is_noop() {
        let mut buf = buffer(18, 12);
        assert_eq!(buf.append(""), 0);
        assert!(buf.is_empty());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_blank_line_is_explicit() {
        let mut buf = buffer(18, 12);
        buf.append_blank();
        assert_eq!(buf.len(), 1);
        assert!(buf.line(0).unwrap().is_blank());
    }

    #[test]
    fn test_embedded_newlines() {
        let mut buf = buffer(18, 12);
        assert_eq!(buf.append("one\r\n\ntwo\n"), 3);
        assert_eq!(buf.texts(), vec!["one", "", "two"]);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut buf = buffer(5, 2);
        buf.append("hello");
        buf.append("world");
        buf.append("foo12");
        assert_eq!(buf.texts(), vec!["world", "foo12"]);
    }

    #[test]
    fn test_single_append_larger_than_viewport() {
        let mut buf = buffer(2, 2);
        buf.append("abcdefg");
        assert_eq!(buf.texts(), vec!["ef", "g"]);
    }

    #[test]
    fn test_colors() {
        let mut buf = buffer(18, 12);
        buf.append("default");
        buf.append_colored("red", TerminalColor::Named(NamedColor::Red));

        assert_eq!(buf.line(0).unwrap().color, TerminalColor::DARK_GREEN);
        assert_eq!(buf.line(1).unwrap().color, TerminalColor::Named(NamedColor::Red));
    }

    #[test]
    fn test_clear_idempotent() {
        let mut buf = buffer(18, 12);
        buf.append("something");
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.take_dirty());

        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.take_dirty());
    }

    #[test]
    fn test_overwrite_last() {
        let mut buf = buffer(10, 12);
        buf.append_styled("loading 1%", None, LineFormat::bold());
        buf.overwrite_last("loading 99%", None);

        assert_eq!(buf.texts(), vec!["loading 99", "%"]);
        assert!(buf.line(0).unwrap().format.bold);

        let mut empty = buffer(10, 12);
        empty.overwrite_last("first", None);
        assert_eq!(empty.texts(), vec!["first"]);
        assert_eq!(empty.line(0).unwrap().color, TerminalColor::DARK_GREEN);
    }

    #[test]
    fn test_overwrite_last_keeps_color() {
        let gold = TerminalColor::Named(NamedColor::Gold);
        let mut buf = buffer(18, 12);
        buf.append_colored("step 1/3", gold);
        buf.overwrite_last("step 2/3", None);

        assert_eq!(buf.texts(), vec!["step 2/3"]);
        assert_eq!(buf.line(0).unwrap().color, gold);

        let red = TerminalColor::Named(NamedColor::Red);
        buf.overwrite_last("failed", Some(red));
        assert_eq!(buf.line(0).unwrap().color, red);
    }

    #[test]
    fn test_dirty_survives_until_taken() {
        let mut buf = buffer(18, 12);
        buf.append("pending");
        assert!(buf.is_dirty());
        assert_eq!(buf.append(""), 0);
        assert!(buf.is_dirty());
        assert!(buf.take_dirty());
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_render_and_frame() {
        let mut buf = buffer(18, 12);
        buf.append("first");
        buf.append_colored("second", TerminalColor::Named(NamedColor::Gold));

        assert_eq!(buf.render(), "first\nsecond");

        let frame = buf.frame();
        assert_eq!(frame.line_count(), 2);
        assert_eq!(frame.background, Rgb::BLACK);
        let lines: Vec<_> = frame.lines().map(|(text, style)| (text, style.color)).collect();
        assert_eq!(
            lines,
            vec![
                ("first", NamedColor::DarkGreen.to_rgb()),
                ("second", NamedColor::Gold.to_rgb()),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_capacity_and_width_hold(
            line_limit in 1usize..24,
            max_lines in 1usize..16,
            inputs in proptest::collection::vec(".{0,60}", 0..20),
        ) {
            let mut buf = buffer(line_limit, max_lines);
            for input in &inputs {
                buf.append(input);
                prop_assert!(buf.len() <= max_lines);
                prop_assert!(buf.lines().iter().all(|line| line.width() <= line_limit));
            }
        }

        #[test]
        fn prop_newest_content_retained(
            max_lines in 1usize..8,
            count in 1usize..32,
        ) {
            let mut buf = buffer(8, max_lines);
            for i in 0..count {
                buf.append(&i.to_string());
            }
            let kept = count.min(max_lines);
            let expected: Vec<String> = (count - kept..count).map(|i| i.to_string()).collect();
            prop_assert_eq!(buf.texts(), expected.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
