use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::Duration;

use humantime::{format_duration, parse_duration};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SnackbarError;

/// How long a presented snackbar stays before dismissing itself.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SnackbarDuration {
    /// One second.
    #[default]
    Short,
    /// Three seconds.
    Middle,
    /// Five seconds.
    Long,
    /// No auto-dismiss timer; the snackbar must be dismissed explicitly.
    Forever,
    Custom(Duration),
}

impl SnackbarDuration {
    /// Delay before the auto-dismiss timer fires, `None` for `Forever`.
    #[must_use]
    pub const fn timeout(self) -> Option<Duration> {
        match self {
            Self::Short => Some(Duration::from_secs(1)),
            Self::Middle => Some(Duration::from_secs(3)),
            Self::Long => Some(Duration::from_secs(5)),
            Self::Forever => None,
            Self::Custom(after) => Some(after),
        }
    }

    #[must_use]
    pub const fn is_forever(self) -> bool {
        matches!(self, Self::Forever)
    }
}

impl Display for SnackbarDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => f.write_str("short"),
            Self::Middle => f.write_str("middle"),
            Self::Long => f.write_str("long"),
            Self::Forever => f.write_str("forever"),
            Self::Custom(after) => write!(f, "{}", format_duration(*after)),
        }
    }
}

impl FromStr for SnackbarDuration {
    type Err = SnackbarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "middle" | "medium" => Ok(Self::Middle),
            "long" => Ok(Self::Long),
            "forever" | "never" => Ok(Self::Forever),
            other => parse_duration(other)
                .map(Self::Custom)
                .map_err(|_| SnackbarError::InvalidDuration(s.to_string())),
        }
    }
}

impl Serialize for SnackbarDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SnackbarDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Entrance/exit animation pairs.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationStyle {
    /// Fade in to show, fade out to dismiss.
    FadeInFadeOut,
    /// Rise from below the bottom edge, keep rising while fading out.
    SlideFromBottomToTop,
    /// Rise from below the bottom edge, sink back below it.
    SlideFromBottomBackToBottom,
    /// Enter from the left edge, leave through the right edge.
    #[default]
    SlideFromLeftToRight,
    /// Enter from the right edge, leave through the left edge.
    SlideFromRightToLeft,
    /// Placeholder: no geometric change.
    Flip,
}

impl AnimationStyle {
    pub const ALL: [Self; 6] = [
        Self::FadeInFadeOut,
        Self::SlideFromBottomToTop,
        Self::SlideFromBottomBackToBottom,
        Self::SlideFromLeftToRight,
        Self::SlideFromRightToLeft,
        Self::Flip,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FadeInFadeOut => "fade-in-fade-out",
            Self::SlideFromBottomToTop => "slide-from-bottom-to-top",
            Self::SlideFromBottomBackToBottom => "slide-from-bottom-back-to-bottom",
            Self::SlideFromLeftToRight => "slide-from-left-to-right",
            Self::SlideFromRightToLeft => "slide-from-right-to-left",
            Self::Flip => "flip",
        }
    }

    /// Whether the style moves the view horizontally and therefore needs the
    /// container width.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::SlideFromLeftToRight | Self::SlideFromRightToLeft)
    }
}

impl Display for AnimationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationStyle {
    type Err = SnackbarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        match wanted.as_str() {
            "fade" => Ok(Self::FadeInFadeOut),
            "bottom-to-top" => Ok(Self::SlideFromBottomToTop),
            "bottom" | "bottom-back-to-bottom" => Ok(Self::SlideFromBottomBackToBottom),
            "left-to-right" => Ok(Self::SlideFromLeftToRight),
            "right-to-left" => Ok(Self::SlideFromRightToLeft),
            other => Self::ALL
                .into_iter()
                .find(|style| style.as_str() == other)
                .ok_or_else(|| SnackbarError::UnknownAnimation(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justified,
    Natural,
}

/// One of the two action buttons.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSlot {
    First,
    Second,
}

impl Display for ActionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::First => "first",
            Self::Second => "second",
        })
    }
}

impl FromStr for ActionSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "1" => Ok(Self::First),
            "second" | "2" => Ok(Self::Second),
            other => Err(format!("unknown action slot: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionSlot, AnimationStyle, SnackbarDuration};
    use std::str::FromStr;
    use std::time::Duration;

    #[test]
    fn duration_presets_map_to_seconds() {
        assert_eq!(SnackbarDuration::Short.timeout(), Some(Duration::from_secs(1)));
        assert_eq!(SnackbarDuration::Middle.timeout(), Some(Duration::from_secs(3)));
        assert_eq!(SnackbarDuration::Long.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(SnackbarDuration::Forever.timeout(), None);
    }

    #[test]
    fn duration_from_str_accepts_presets_and_humantime() {
        assert_eq!(SnackbarDuration::from_str("Forever"), Ok(SnackbarDuration::Forever));
        assert_eq!(
            SnackbarDuration::from_str("2500ms"),
            Ok(SnackbarDuration::Custom(Duration::from_millis(2500)))
        );
        assert!(SnackbarDuration::from_str("eventually").is_err());
    }

    #[test]
    fn animation_style_parses_long_and_short_names() {
        assert_eq!(
            AnimationStyle::from_str("slide_from_right_to_left"),
            Ok(AnimationStyle::SlideFromRightToLeft)
        );
        assert_eq!(AnimationStyle::from_str("fade"), Ok(AnimationStyle::FadeInFadeOut));
        assert!(AnimationStyle::from_str("spin").is_err());
    }

    #[test]
    fn default_animation_is_left_to_right() {
        assert_eq!(AnimationStyle::default(), AnimationStyle::SlideFromLeftToRight);
    }

    #[test]
    fn only_side_slides_are_horizontal() {
        let horizontal: Vec<_> = AnimationStyle::ALL
            .into_iter()
            .filter(|style| style.is_horizontal())
            .collect();
        assert_eq!(
            horizontal,
            [AnimationStyle::SlideFromLeftToRight, AnimationStyle::SlideFromRightToLeft]
        );
    }

    #[test]
    fn action_slot_from_str() {
        assert_eq!(ActionSlot::from_str("2"), Ok(ActionSlot::Second));
        assert!(ActionSlot::from_str("third").is_err());
    }
}
