use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use ::config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;
use crate::snackbar::style::Color;
use crate::types::{AnimationStyle, SnackbarDuration, TextAlignment};

use super::defaults::{
    default_animation, default_animation_duration, default_background, default_corner_radius,
    default_duration, default_font_size, default_height, default_margin, default_text_color,
};
use super::env::{env_duration, env_parse, env_string};
use super::{ENV_PREFIX, HumantimeDuration, Settings};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawSettings, ConfigError> {
    let builder = ::config::Config::builder()
        .add_source(::config::File::from(path.as_ref()).required(false))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
    deserialize(builder)
}

pub(super) fn parse_toml(text: &str) -> std::result::Result<RawSettings, ConfigError> {
    deserialize(
        ::config::Config::builder()
            .add_source(::config::File::from_str(text, ::config::FileFormat::Toml)),
    )
}

fn deserialize(
    builder: ConfigBuilder<DefaultState>,
) -> std::result::Result<RawSettings, ConfigError> {
    builder
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawSettings {
    #[serde(default)]
    pub(super) snackbar: RawSnackbar,
    #[serde(default)]
    pub(super) geometry: RawGeometry,
    #[serde(default)]
    pub(super) style: RawStyle,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawSnackbar {
    #[serde(default = "default_duration")]
    pub(super) duration: String,
    #[serde(default = "default_animation")]
    pub(super) animation: String,
    #[serde(default = "default_animation_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) animation_duration: Duration,
    #[serde(default)]
    pub(super) alignment: TextAlignment,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawGeometry {
    #[serde(default = "default_height")]
    pub(super) height: f64,
    #[serde(default = "default_margin")]
    pub(super) left_margin: f64,
    #[serde(default = "default_margin")]
    pub(super) right_margin: f64,
    #[serde(default = "default_margin")]
    pub(super) bottom_margin: f64,
    #[serde(default = "default_corner_radius")]
    pub(super) corner_radius: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStyle {
    #[serde(default = "default_background")]
    pub(super) background: Color,
    #[serde(default = "default_text_color")]
    pub(super) text_color: Color,
    #[serde(default = "default_text_color")]
    pub(super) action_color: Color,
    #[serde(default = "default_font_size")]
    pub(super) font_size: f32,
}

impl RawSettings {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_string("SNACKBAR_DURATION")? {
            self.snackbar.duration = duration;
        }
        if let Some(animation) = env_string("SNACKBAR_ANIMATION")? {
            self.snackbar.animation = animation;
        }
        if let Some(animation_duration) = env_duration("SNACKBAR_ANIMATION_DURATION")? {
            self.snackbar.animation_duration = animation_duration;
        }
        if let Some(height) = env_parse::<f64>("SNACKBAR_HEIGHT")? {
            self.geometry.height = height;
        }
        if let Some(margin) = env_parse::<f64>("SNACKBAR_MARGIN")? {
            self.geometry.left_margin = margin;
            self.geometry.right_margin = margin;
            self.geometry.bottom_margin = margin;
        }
        if let Some(radius) = env_parse::<f64>("SNACKBAR_CORNER_RADIUS")? {
            self.geometry.corner_radius = radius;
        }
        if let Some(background) = env_parse::<Color>("SNACKBAR_BACKGROUND")? {
            self.style.background = background;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Settings> {
        let duration = SnackbarDuration::from_str(&self.snackbar.duration).map_err(|err| {
            ConfigError::InvalidField {
                field: "snackbar.duration",
                message: err.to_string(),
            }
        })?;
        if duration.timeout().is_some_and(|after| after.is_zero()) {
            return Err(ConfigError::InvalidField {
                field: "snackbar.duration",
                message: "duration must be greater than zero, use \"forever\" to disable the timer"
                    .to_string(),
            }
            .into());
        }
        let animation = AnimationStyle::from_str(&self.snackbar.animation).map_err(|err| {
            ConfigError::InvalidField {
                field: "snackbar.animation",
                message: err.to_string(),
            }
        })?;
        if self.snackbar.animation_duration.is_zero() {
            return Err(ConfigError::InvalidField {
                field: "snackbar.animation_duration",
                message: "animation duration must be greater than zero".to_string(),
            }
            .into());
        }

        let geometry = &self.geometry;
        if !geometry.height.is_finite() || geometry.height < 0.0 {
            return Err(ConfigError::InvalidField {
                field: "geometry.height",
                message: format!("expected a non-negative number, got {}", geometry.height),
            }
            .into());
        }
        for (field, margin) in [
            ("geometry.left_margin", geometry.left_margin),
            ("geometry.right_margin", geometry.right_margin),
            ("geometry.bottom_margin", geometry.bottom_margin),
        ] {
            if !margin.is_finite() {
                return Err(ConfigError::InvalidField {
                    field,
                    message: format!("expected a finite number, got {margin}"),
                }
                .into());
            }
        }
        if !geometry.corner_radius.is_finite() {
            return Err(ConfigError::InvalidField {
                field: "geometry.corner_radius",
                message: format!("expected a finite number, got {}", geometry.corner_radius),
            }
            .into());
        }
        if !self.style.font_size.is_finite() || self.style.font_size <= 0.0 {
            return Err(ConfigError::InvalidField {
                field: "style.font_size",
                message: format!("expected a positive size, got {}", self.style.font_size),
            }
            .into());
        }

        Ok(Settings {
            duration,
            animation,
            animation_duration: self.snackbar.animation_duration,
            alignment: self.snackbar.alignment,
            height: self.geometry.height,
            left_margin: self.geometry.left_margin,
            right_margin: self.geometry.right_margin,
            bottom_margin: self.geometry.bottom_margin,
            corner_radius: self.geometry.corner_radius,
            background: self.style.background,
            text_color: self.style.text_color,
            action_color: self.style.action_color,
            font_size: self.style.font_size,
        })
    }
}

impl Default for RawSnackbar {
    fn default() -> Self {
        Self {
            duration: default_duration(),
            animation: default_animation(),
            animation_duration: default_animation_duration(),
            alignment: TextAlignment::default(),
        }
    }
}

impl Default for RawGeometry {
    fn default() -> Self {
        Self {
            height: default_height(),
            left_margin: default_margin(),
            right_margin: default_margin(),
            bottom_margin: default_margin(),
            corner_radius: default_corner_radius(),
        }
    }
}

impl Default for RawStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            text_color: default_text_color(),
            action_color: default_text_color(),
            font_size: default_font_size(),
        }
    }
}
