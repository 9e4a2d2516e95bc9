use serde::{Deserialize, Serialize};

use crate::error::{Result, TerminalError};
use crate::renderer::colors::{NamedColor, TerminalColor};

/// Characters per line when none is configured.
pub const DEFAULT_LINE_LIMIT: usize = 18;
/// Visible lines when none is configured.
pub const DEFAULT_MAX_LINES: usize = 12;
pub const DEFAULT_TRANSLATION_X: f32 = -0.05;
pub const DEFAULT_TRANSLATION_Y: f32 = 0.0;
pub const DEFAULT_SCALE: f32 = 0.325;

/// Construction-time terminal settings. Immutable once a terminal exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub line_limit: usize,
    pub max_lines: usize,
    pub background_color: TerminalColor,
    pub default_text_color: TerminalColor,
    pub translation_x: f32,
    pub translation_y: f32,
    pub scale: f32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_LINE_LIMIT,
            max_lines: DEFAULT_MAX_LINES,
            background_color: TerminalColor::BLACK,
            default_text_color: TerminalColor::Rgb(NamedColor::DarkGreen.to_rgb()),
            translation_x: DEFAULT_TRANSLATION_X,
            translation_y: DEFAULT_TRANSLATION_Y,
            scale: DEFAULT_SCALE,
        }
    }
}

impl TerminalConfig {
    pub fn with_limits(line_limit: usize, max_lines: usize) -> Self {
        Self {
            line_limit,
            max_lines,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, background: TerminalColor, text: TerminalColor) -> Self {
        self.background_color = background;
        self.default_text_color = text;
        self
    }

    pub fn with_presentation(mut self, translation_x: f32, translation_y: f32, scale: f32) -> Self {
        self.translation_x = translation_x;
        self.translation_y = translation_y;
        self.scale = scale;
        self
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TerminalConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.line_limit == 0 {
            return Err(TerminalError::InvalidConfiguration(
                "line_limit must be greater than zero".to_string(),
            ));
        }
        if self.max_lines == 0 {
            return Err(TerminalError::InvalidConfiguration(
                "max_lines must be greater than zero".to_string(),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(TerminalError::InvalidConfiguration(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !self.translation_x.is_finite() || !self.translation_y.is_finite() {
            return Err(TerminalError::InvalidConfiguration(
                "translation must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
