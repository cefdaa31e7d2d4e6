//! Entrance and exit plans for each animation style.
//!
//! A plan is a pair of [`Frame`]s: the entrance starts at
//! [`entrance_start`] and settles at the resting frame, the exit leaves the
//! resting frame for [`exit_end`]. Only the fields that differ are handed to
//! the host.

use super::geometry::Geometry;
use super::host::{ConstraintSet, Mutation};
use crate::types::AnimationStyle;

/// Timing curve of an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    Linear,
    /// Accelerating, used for exits.
    EaseIn,
    EaseInOut,
    /// Damped oscillation towards the target.
    Spring { damping: f64, initial_velocity: f64 },
}

impl Curve {
    pub const ENTRANCE: Self = Self::Spring {
        damping: 0.7,
        initial_velocity: 5.0,
    };
    pub const EXIT: Self = Self::EaseIn;

    /// Natural frequency of the spring, in radians per unit of progress.
    const SPRING_FREQUENCY: f64 = 10.0;

    /// Map linear progress `t` in `[0, 1]` to eased progress.
    ///
    /// The endpoints are exact; a spring may overshoot in between.
    #[must_use]
    pub fn sample(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 || t >= 1.0 {
            return t;
        }
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = (-2.0f64).mul_add(t, 2.0);
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Spring {
                damping,
                initial_velocity,
            } => {
                let damping = damping.clamp(0.05, 0.999);
                let omega = Self::SPRING_FREQUENCY;
                let damped = omega * damping.mul_add(-damping, 1.0).sqrt();
                let decay = (-damping * omega * t).exp();
                let phase = damped * t;
                let sine_weight = damping.mul_add(omega, -initial_velocity) / damped;
                1.0 - decay * sine_weight.mul_add(phase.sin(), phase.cos())
            }
        }
    }
}

/// Position and opacity of the view expressed as constraint constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub opacity: f64,
}

impl Frame {
    #[must_use]
    pub fn resting(geometry: &Geometry) -> Self {
        let pins = geometry.resting_pins();
        Self {
            left: pins.left,
            right: pins.right,
            bottom: pins.bottom,
            opacity: 1.0,
        }
    }

    /// Mutations turning `base` into `self`.
    #[must_use]
    pub fn changes_from(&self, base: &Self, constraints: &ConstraintSet) -> Vec<Mutation> {
        let differs = |a: f64, b: f64| (a - b).abs() > f64::EPSILON;
        let mut mutations = Vec::with_capacity(4);
        for (handle, target, current) in [
            (constraints.left, self.left, base.left),
            (constraints.right, self.right, base.right),
            (constraints.bottom, self.bottom, base.bottom),
        ] {
            if differs(target, current) {
                mutations.push(Mutation::Constraint {
                    handle,
                    value: target,
                });
            }
        }
        if differs(self.opacity, base.opacity) {
            mutations.push(Mutation::Opacity(self.opacity));
        }
        mutations
    }
}

/// Where the entrance animation starts from.
#[must_use]
pub fn entrance_start(style: AnimationStyle, geometry: &Geometry, host_width: f64) -> Frame {
    let rest = Frame::resting(geometry);
    match style {
        AnimationStyle::FadeInFadeOut => Frame {
            opacity: 0.0,
            ..rest
        },
        AnimationStyle::SlideFromBottomToTop => Frame {
            bottom: geometry.height(),
            opacity: 0.0,
            ..rest
        },
        AnimationStyle::SlideFromBottomBackToBottom => Frame {
            bottom: geometry.height(),
            ..rest
        },
        AnimationStyle::SlideFromLeftToRight => Frame {
            left: rest.left - host_width,
            right: rest.right - host_width,
            ..rest
        },
        AnimationStyle::SlideFromRightToLeft => Frame {
            left: rest.left + host_width,
            right: rest.right + host_width,
            ..rest
        },
        AnimationStyle::Flip => rest,
    }
}

/// Where the exit animation leaves the view.
#[must_use]
pub fn exit_end(style: AnimationStyle, geometry: &Geometry, host_width: f64) -> Frame {
    let rest = Frame::resting(geometry);
    match style {
        AnimationStyle::FadeInFadeOut => Frame {
            opacity: 0.0,
            ..rest
        },
        AnimationStyle::SlideFromBottomToTop => Frame {
            bottom: -geometry.height() - geometry.bottom_margin(),
            opacity: 0.0,
            ..rest
        },
        AnimationStyle::SlideFromBottomBackToBottom => Frame {
            bottom: geometry.height(),
            ..rest
        },
        AnimationStyle::SlideFromLeftToRight => Frame {
            left: rest.left + host_width,
            right: rest.right + host_width,
            ..rest
        },
        AnimationStyle::SlideFromRightToLeft => Frame {
            left: rest.left - host_width,
            right: rest.right - host_width,
            ..rest
        },
        AnimationStyle::Flip => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::{Curve, Frame, entrance_start, exit_end};
    use crate::snackbar::geometry::Geometry;
    use crate::snackbar::host::{ConstraintHandle, ConstraintSet, Mutation};
    use crate::types::AnimationStyle;

    const WIDTH: f64 = 320.0;

    fn constraints() -> ConstraintSet {
        ConstraintSet {
            height: ConstraintHandle(1),
            left: ConstraintHandle(2),
            right: ConstraintHandle(3),
            bottom: ConstraintHandle(4),
        }
    }

    #[test]
    fn curves_hit_their_endpoints() {
        for curve in [Curve::Linear, Curve::EaseIn, Curve::EaseInOut, Curve::ENTRANCE] {
            assert!(curve.sample(0.0).abs() < f64::EPSILON, "{curve:?}");
            assert!((curve.sample(1.0) - 1.0).abs() < f64::EPSILON, "{curve:?}");
        }
    }

    #[test]
    fn ease_in_starts_slow() {
        assert!(Curve::EaseIn.sample(0.5) < 0.5);
    }

    #[test]
    fn spring_overshoots_and_settles() {
        let peak = (1..100)
            .map(|step| Curve::ENTRANCE.sample(f64::from(step) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
        assert!((Curve::ENTRANCE.sample(0.95) - 1.0).abs() < 0.01);
    }

    #[test]
    fn left_to_right_enters_from_left_and_exits_right() {
        let geometry = Geometry::default();
        let start = entrance_start(AnimationStyle::SlideFromLeftToRight, &geometry, WIDTH);
        assert!((start.left - (4.0 - WIDTH)).abs() < f64::EPSILON);
        assert!((start.right - (-4.0 - WIDTH)).abs() < f64::EPSILON);

        let end = exit_end(AnimationStyle::SlideFromLeftToRight, &geometry, WIDTH);
        assert!((end.left - (4.0 + WIDTH)).abs() < f64::EPSILON);
        assert!((end.right - (-4.0 + WIDTH)).abs() < f64::EPSILON);
        assert!((end.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn right_to_left_mirrors_left_to_right() {
        let geometry = Geometry::default();
        let start = entrance_start(AnimationStyle::SlideFromRightToLeft, &geometry, WIDTH);
        let end = exit_end(AnimationStyle::SlideFromRightToLeft, &geometry, WIDTH);
        assert!((start.left - (4.0 + WIDTH)).abs() < f64::EPSILON);
        assert!((end.left - (4.0 - WIDTH)).abs() < f64::EPSILON);
    }

    #[test]
    fn bottom_to_top_fades_while_rising_past_rest() {
        let geometry = Geometry::default();
        let start = entrance_start(AnimationStyle::SlideFromBottomToTop, &geometry, WIDTH);
        assert!((start.bottom - 44.0).abs() < f64::EPSILON);
        assert!(start.opacity.abs() < f64::EPSILON);

        let end = exit_end(AnimationStyle::SlideFromBottomToTop, &geometry, WIDTH);
        assert!((end.bottom + 48.0).abs() < f64::EPSILON);
        assert!(end.opacity.abs() < f64::EPSILON);
    }

    #[test]
    fn flip_changes_nothing() {
        let geometry = Geometry::default();
        let rest = Frame::resting(&geometry);
        let start = entrance_start(AnimationStyle::Flip, &geometry, WIDTH);
        let end = exit_end(AnimationStyle::Flip, &geometry, WIDTH);
        assert!(start.changes_from(&rest, &constraints()).is_empty());
        assert!(end.changes_from(&rest, &constraints()).is_empty());
    }

    #[test]
    fn fade_only_touches_opacity() {
        let geometry = Geometry::default();
        let rest = Frame::resting(&geometry);
        let end = exit_end(AnimationStyle::FadeInFadeOut, &geometry, WIDTH);
        assert_eq!(
            end.changes_from(&rest, &constraints()),
            vec![Mutation::Opacity(0.0)]
        );
    }

    #[test]
    fn back_to_bottom_moves_only_bottom_pin() {
        let geometry = Geometry::default();
        let rest = Frame::resting(&geometry);
        let end = exit_end(AnimationStyle::SlideFromBottomBackToBottom, &geometry, WIDTH);
        assert_eq!(
            end.changes_from(&rest, &constraints()),
            vec![Mutation::Constraint {
                handle: ConstraintHandle(4),
                value: 44.0
            }]
        );
    }
}
