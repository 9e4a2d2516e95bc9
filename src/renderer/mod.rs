pub mod buffer;
pub mod colors;

pub use buffer::{Frame, Line, LineFormat, LineStyle, TerminalBuffer};
pub use colors::{NamedColor, Rgb, TerminalColor};
