use std::time::Duration;

use crate::snackbar::style::Color;

pub(super) fn default_duration() -> String {
    "short".to_string()
}

pub(super) fn default_animation() -> String {
    "slide-from-left-to-right".to_string()
}

pub(super) const fn default_animation_duration() -> Duration {
    Duration::from_millis(300)
}

pub(super) const fn default_height() -> f64 {
    44.0
}

pub(super) const fn default_margin() -> f64 {
    4.0
}

pub(super) const fn default_corner_radius() -> f64 {
    4.0
}

pub(super) const fn default_background() -> Color {
    Color::DARK_GRAY
}

pub(super) const fn default_text_color() -> Color {
    Color::WHITE
}

pub(super) const fn default_font_size() -> f32 {
    14.0
}
