//! House defaults for new snackbars, read from a TOML file and the
//! environment.
//!
//! ```toml
//! [snackbar]
//! duration = "middle"
//! animation = "fade"
//! animation_duration = "250ms"
//!
//! [geometry]
//! height = 48
//! corner_radius = 6
//!
//! [style]
//! background = "#202020"
//! ```
//!
//! Every key can also be set through `SNACKBAR__<SECTION>__<KEY>`, and the
//! common ones through the shorter `SNACKBAR_*` overrides applied last.

use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error;
use crate::snackbar::style::{Color, Font, LabelStyle};
use crate::snackbar::{DEFAULT_ANIMATION_DURATION, SnackbarConfig};
use crate::types::{ActionSlot, AnimationStyle, SnackbarDuration, TextAlignment};

mod defaults;
mod env;
mod raw;
mod serde;

use serde::HumantimeDuration;

const ENV_PREFIX: &str = "SNACKBAR";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub duration: SnackbarDuration,
    pub animation: AnimationStyle,
    pub animation_duration: Duration,
    pub alignment: TextAlignment,
    pub height: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    pub corner_radius: f64,
    pub background: Color,
    pub text_color: Color,
    pub action_color: Color,
    pub font_size: f32,
}

impl Settings {
    /// Load settings from a file and the environment.
    ///
    /// A missing file is not an error; every field has a default.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be parsed, when environment
    /// overrides are malformed, or when the resulting values fail validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(Error::from)?;
        raw.apply_env_overrides().map_err(Error::from)?;
        raw.validate_and_build()
    }

    /// Parse settings from TOML text alone, ignoring the environment.
    ///
    /// # Errors
    ///
    /// Same as [`Settings::from_env_and_file`], minus environment failures.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        raw::parse_toml(text)
            .map_err(Error::from)?
            .validate_and_build()
    }

    /// Seed `config` with these settings. Message, labels and callbacks are
    /// left untouched.
    #[must_use]
    pub fn apply_to(&self, config: SnackbarConfig) -> SnackbarConfig {
        let font = Font::bold_system(self.font_size);
        let action_style = LabelStyle {
            color: self.action_color,
            font: font.clone(),
        };
        config
            .duration(self.duration)
            .animation(self.animation)
            .animation_duration(self.animation_duration)
            .alignment(self.alignment)
            .height(self.height)
            .corner_radius(self.corner_radius)
            .margins(self.left_margin, self.right_margin, self.bottom_margin)
            .background(self.background)
            .message_style(LabelStyle {
                color: self.text_color,
                font,
            })
            .action_style(ActionSlot::First, action_style.clone())
            .action_style(ActionSlot::Second, action_style)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: SnackbarDuration::default(),
            animation: AnimationStyle::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            alignment: TextAlignment::default(),
            height: defaults::default_height(),
            left_margin: defaults::default_margin(),
            right_margin: defaults::default_margin(),
            bottom_margin: defaults::default_margin(),
            corner_radius: defaults::default_corner_radius(),
            background: defaults::default_background(),
            text_color: defaults::default_text_color(),
            action_color: defaults::default_text_color(),
            font_size: defaults::default_font_size(),
        }
    }
}
