//! Boundary between the snackbar lifecycle and the view system hosting it.
//!
//! The host owns windows, the constraint solver, the animation runner and the
//! timer scheduler. It reports back by calling
//! [`Snackbar::timer_fired`](super::Snackbar::timer_fired) and
//! [`Snackbar::animation_finished`](super::Snackbar::animation_finished) with
//! the ids it handed out.

use std::fmt;
use std::time::Duration;

use super::geometry::{ButtonLayout, PinTargets};
use super::motion::Curve;
use super::style::{Color, LabelStyle};
use crate::types::TextAlignment;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

opaque_id!(
    /// Identity of one snackbar view.
    ViewId,
    "view"
);
opaque_id!(
    /// A top-level container a view can be attached to.
    ContainerId,
    "container"
);
opaque_id!(ConstraintHandle, "constraint");
opaque_id!(TimerId, "timer");
opaque_id!(AnimationId, "animation");

/// Handles of the constraints pinning a view to its container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstraintSet {
    pub height: ConstraintHandle,
    pub left: ConstraintHandle,
    pub right: ConstraintHandle,
    pub bottom: ConstraintHandle,
}

impl ConstraintSet {
    #[must_use]
    pub const fn handles(&self) -> [ConstraintHandle; 4] {
        [self.height, self.left, self.right, self.bottom]
    }
}

/// A single property change applied directly or under an animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mutation {
    Constraint { handle: ConstraintHandle, value: f64 },
    Opacity(f64),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub duration: Duration,
    pub delay: Duration,
    pub curve: Curve,
    pub mutations: Vec<Mutation>,
}

/// One action button as the host should draw it.
#[derive(Clone, Copy, Debug)]
pub struct ButtonChrome<'a> {
    pub label: &'a str,
    pub style: &'a LabelStyle,
    pub visible: bool,
    pub width: f64,
}

/// Everything about the view's content that does not affect the lifecycle.
#[derive(Clone, Copy, Debug)]
pub struct ViewChrome<'a> {
    pub message: &'a str,
    pub message_style: &'a LabelStyle,
    pub alignment: TextAlignment,
    pub message_lines: u8,
    pub background: Color,
    pub separator_color: Color,
    pub separator_width: f64,
    pub corner_radius: f64,
    pub buttons: ButtonLayout,
    pub first: ButtonChrome<'a>,
    pub second: ButtonChrome<'a>,
    pub busy: bool,
}

/// View hierarchy, constraint solver, animation runner and timer scheduler.
///
/// All calls happen on the UI thread; the host must not call back into the
/// snackbar from inside these methods.
pub trait HostViewSystem {
    /// The top-most container, if one is available.
    fn key_container(&self) -> Option<ContainerId>;

    fn container_width(&self, container: ContainerId) -> f64;

    fn attach(&mut self, view: ViewId, container: ContainerId);

    fn detach(&mut self, view: ViewId);

    /// Pin `view` inside `container`; the returned handles can later be
    /// retargeted with [`update_constraint`](Self::update_constraint).
    fn apply_constraints(
        &mut self,
        view: ViewId,
        container: ContainerId,
        targets: PinTargets,
    ) -> ConstraintSet;

    fn update_constraint(&mut self, handle: ConstraintHandle, value: f64);

    fn remove_constraints(&mut self, view: ViewId, constraints: &ConstraintSet);

    fn set_opacity(&mut self, view: ViewId, opacity: f64);

    /// Start animating towards the mutations; completion is reported with
    /// the returned id.
    fn run_animation(&mut self, view: ViewId, animation: Animation) -> AnimationId;

    fn schedule_timer(&mut self, after: Duration) -> TimerId;

    /// Cancelling an unknown or already fired timer is a no-op.
    fn cancel_timer(&mut self, timer: TimerId);

    fn render(&mut self, view: ViewId, chrome: &ViewChrome<'_>);

    /// Apply mutations without animation.
    fn apply(&mut self, view: ViewId, mutations: &[Mutation]) {
        for mutation in mutations {
            match *mutation {
                Mutation::Constraint { handle, value } => self.update_constraint(handle, value),
                Mutation::Opacity(opacity) => self.set_opacity(view, opacity),
            }
        }
    }
}
