//! Snackbar lifecycle: `Idle -> Presented -> Dismissing -> Dismissed`.
//!
//! A [`Snackbar`] is single-use. [`Snackbar::show`] attaches it to the host,
//! arms the auto-dismiss timer and runs the entrance animation. The timer, an
//! action tap or [`Snackbar::dismiss`] start the exit animation; its
//! completion fires the dismiss callback and detaches the view. Whichever
//! trigger arrives first wins, later ones are ignored.
//!
//! ```ignore
//! let mut bar = Snackbar::new(
//!     SnackbarConfig::new("Message deleted")
//!         .duration(SnackbarDuration::Middle)
//!         .action("Undo", |bar| restore(bar.id()))
//!         .on_dismiss(|_| purge()),
//! );
//! bar.show(&mut host);
//! ```

pub mod geometry;
pub mod host;
pub mod motion;
pub mod style;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::SnackbarError;
use crate::types::{ActionSlot, AnimationStyle, SnackbarDuration, TextAlignment};

use geometry::{ButtonLayout, Geometry, SEPARATOR_WIDTH};
use host::{
    Animation, AnimationId, ButtonChrome, ConstraintSet, ContainerId, HostViewSystem, TimerId,
    ViewChrome, ViewId,
};
use motion::{Curve, Frame};
use style::{Color, Font, LabelStyle};

pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);
const MESSAGE_LINES: u8 = 2;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Callback invoked with the snackbar that triggered it.
pub type Callback = Box<dyn FnMut(&Snackbar)>;

/// Where a snackbar is in its single pass from creation to teardown.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    Idle,
    Presented,
    Dismissing,
    Dismissed,
}

/// What started the dismissal: the auto-dismiss timer, an explicit call or
/// an action tap.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DismissTrigger {
    Timeout,
    Manual,
    Action(ActionSlot),
}

/// Label of an action button and the callback that makes it visible.
#[derive(Default)]
pub struct ActionConfig {
    pub label: String,
    pub style: LabelStyle,
    callback: Option<Callback>,
}

impl ActionConfig {
    /// A slot is shown only when it has a callback.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.callback.is_some()
    }

    pub fn set_callback(&mut self, callback: impl FnMut(&Snackbar) + 'static) {
        self.callback = Some(Box::new(callback));
    }
}

impl fmt::Debug for ActionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionConfig")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Everything a snackbar needs before it is shown.
pub struct SnackbarConfig {
    pub message: String,
    pub message_style: LabelStyle,
    pub alignment: TextAlignment,
    pub duration: SnackbarDuration,
    pub animation: AnimationStyle,
    pub animation_duration: Duration,
    pub geometry: Geometry,
    pub background: Color,
    pub separator_color: Color,
    pub first_action: ActionConfig,
    pub second_action: ActionConfig,
    on_dismiss: Option<Callback>,
}

impl SnackbarConfig {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            message_style: LabelStyle::default(),
            alignment: TextAlignment::default(),
            duration: SnackbarDuration::default(),
            animation: AnimationStyle::default(),
            animation_duration: DEFAULT_ANIMATION_DURATION,
            geometry: Geometry::default(),
            background: Color::DARK_GRAY,
            separator_color: Color::GRAY,
            first_action: ActionConfig::default(),
            second_action: ActionConfig::default(),
            on_dismiss: None,
        }
    }

    /// A message with a single action button.
    pub fn with_action(
        message: impl Into<String>,
        duration: SnackbarDuration,
        label: impl Into<String>,
        callback: impl FnMut(&Snackbar) + 'static,
    ) -> Self {
        Self::new(message).duration(duration).action(label, callback)
    }

    /// A message with a single action button and custom fonts.
    pub fn with_action_fonts(
        message: impl Into<String>,
        duration: SnackbarDuration,
        label: impl Into<String>,
        message_font: Font,
        action_font: Font,
        callback: impl FnMut(&Snackbar) + 'static,
    ) -> Self {
        let mut config = Self::with_action(message, duration, label, callback);
        config.message_style.font = message_font;
        config.first_action.style.font = action_font;
        config
    }

    #[must_use]
    pub fn duration(mut self, duration: SnackbarDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn animation(mut self, animation: AnimationStyle) -> Self {
        self.animation = animation;
        self
    }

    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    #[must_use]
    pub fn height(mut self, height: f64) -> Self {
        self.geometry.set_height(height);
        self
    }

    #[must_use]
    pub fn corner_radius(mut self, radius: f64) -> Self {
        self.geometry.set_corner_radius(radius);
        self
    }

    #[must_use]
    pub fn margins(mut self, left: f64, right: f64, bottom: f64) -> Self {
        self.geometry.set_left_margin(left);
        self.geometry.set_right_margin(right);
        self.geometry.set_bottom_margin(bottom);
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn message_style(mut self, style: LabelStyle) -> Self {
        self.message_style = style;
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    #[must_use]
    pub fn action(
        mut self,
        label: impl Into<String>,
        callback: impl FnMut(&Snackbar) + 'static,
    ) -> Self {
        self.first_action.label = label.into();
        self.first_action.set_callback(callback);
        self
    }

    #[must_use]
    pub fn second_action(
        mut self,
        label: impl Into<String>,
        callback: impl FnMut(&Snackbar) + 'static,
    ) -> Self {
        self.second_action.label = label.into();
        self.second_action.set_callback(callback);
        self
    }

    #[must_use]
    pub fn action_style(mut self, slot: ActionSlot, style: LabelStyle) -> Self {
        self.action_mut(slot).style = style;
        self
    }

    #[must_use]
    pub fn on_dismiss(mut self, callback: impl FnMut(&Snackbar) + 'static) -> Self {
        self.set_on_dismiss(callback);
        self
    }

    pub fn set_on_dismiss(&mut self, callback: impl FnMut(&Snackbar) + 'static) {
        self.on_dismiss = Some(Box::new(callback));
    }

    #[must_use]
    pub const fn action_config(&self, slot: ActionSlot) -> &ActionConfig {
        match slot {
            ActionSlot::First => &self.first_action,
            ActionSlot::Second => &self.second_action,
        }
    }

    pub const fn action_mut(&mut self, slot: ActionSlot) -> &mut ActionConfig {
        match slot {
            ActionSlot::First => &mut self.first_action,
            ActionSlot::Second => &mut self.second_action,
        }
    }
}

impl fmt::Debug for SnackbarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnackbarConfig")
            .field("message", &self.message)
            .field("duration", &self.duration)
            .field("animation", &self.animation)
            .field("animation_duration", &self.animation_duration)
            .field("geometry", &self.geometry)
            .field("first_action", &self.first_action)
            .field("second_action", &self.second_action)
            .field("on_dismiss", &self.on_dismiss.is_some())
            .finish_non_exhaustive()
    }
}

/// Host resources held while the view is on screen.
#[derive(Debug)]
struct Presentation {
    container: ContainerId,
    constraints: ConstraintSet,
    timer: Option<TimerId>,
    entrance: Option<AnimationId>,
    exit: Option<AnimationId>,
    visible: [bool; 2],
    buttons: ButtonLayout,
    actions_hidden: bool,
    busy: bool,
}

#[derive(Clone, Copy)]
enum CallbackRef {
    Dismiss,
    Action(ActionSlot),
}

pub struct Snackbar {
    id: ViewId,
    config: SnackbarConfig,
    state: LifecycleState,
    presentation: Option<Presentation>,
    trigger: Option<DismissTrigger>,
}

impl Snackbar {
    #[must_use]
    pub fn new(config: SnackbarConfig) -> Self {
        Self {
            id: ViewId(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed)),
            config,
            state: LifecycleState::Idle,
            presentation: None,
            trigger: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ViewId {
        self.id
    }

    #[must_use]
    pub const fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &SnackbarConfig {
        &self.config
    }

    /// What started the dismissal, once one has started.
    #[must_use]
    pub const fn dismiss_trigger(&self) -> Option<DismissTrigger> {
        self.trigger
    }

    /// Whether the busy indicator replaced the action buttons.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.presentation.as_ref().is_some_and(|p| p.busy)
    }

    /// Button widths resolved at show time.
    #[must_use]
    pub fn button_layout(&self) -> Option<ButtonLayout> {
        self.presentation.as_ref().map(|p| p.buttons)
    }

    /// Mutate the configuration before the snackbar is shown.
    ///
    /// # Errors
    ///
    /// Returns [`SnackbarError::NotIdle`] once [`show`](Self::show) succeeded.
    pub fn configure(
        &mut self,
        update: impl FnOnce(&mut SnackbarConfig),
    ) -> Result<(), SnackbarError> {
        if self.state != LifecycleState::Idle {
            return Err(SnackbarError::NotIdle { state: self.state });
        }
        update(&mut self.config);
        Ok(())
    }

    /// Present the snackbar in the host's top-most container.
    ///
    /// Does nothing unless the snackbar is idle. Without a container the
    /// snackbar stays idle and nothing is scheduled.
    pub fn show<H: HostViewSystem + ?Sized>(&mut self, host: &mut H) {
        if self.state != LifecycleState::Idle {
            trace!(snackbar = %self.id, state = ?self.state, "show ignored");
            return;
        }
        let Some(container) = host.key_container() else {
            warn!(snackbar = %self.id, "snackbar needs a host container to display");
            return;
        };

        self.state = LifecycleState::Presented;

        let timer = self
            .config
            .duration
            .timeout()
            .map(|after| host.schedule_timer(after));

        let visible = [
            self.config.first_action.is_active(),
            self.config.second_action.is_active(),
        ];
        let buttons = ButtonLayout::allocate(visible[0], visible[1]);

        host.attach(self.id, container);
        let geometry = self.config.geometry;
        let constraints = host.apply_constraints(self.id, container, geometry.resting_pins());

        self.presentation = Some(Presentation {
            container,
            constraints,
            timer,
            entrance: None,
            exit: None,
            visible,
            buttons,
            actions_hidden: false,
            busy: false,
        });
        self.render(host);

        let host_width = self.slide_width(host, container);
        let rest = Frame::resting(&geometry);
        let start = motion::entrance_start(self.config.animation, &geometry, host_width);
        host.apply(self.id, &start.changes_from(&rest, &constraints));
        let entrance = host.run_animation(
            self.id,
            Animation {
                duration: self.config.animation_duration,
                delay: Duration::ZERO,
                curve: Curve::ENTRANCE,
                mutations: rest.changes_from(&start, &constraints),
            },
        );
        if let Some(presentation) = self.presentation.as_mut() {
            presentation.entrance = Some(entrance);
        }

        debug!(
            snackbar = %self.id,
            %container,
            duration = %self.config.duration,
            animation = %self.config.animation,
            "snackbar presented"
        );
    }

    /// Dismiss with the exit animation.
    pub fn dismiss<H: HostViewSystem + ?Sized>(&mut self, host: &mut H) {
        self.request_dismiss(host, DismissTrigger::Manual, true);
    }

    /// Dismiss without animating; callbacks and teardown run before this
    /// returns.
    pub fn dismiss_immediately<H: HostViewSystem + ?Sized>(&mut self, host: &mut H) {
        self.request_dismiss(host, DismissTrigger::Manual, false);
    }

    /// Deliver a fired timer.
    pub fn timer_fired<H: HostViewSystem + ?Sized>(&mut self, host: &mut H, timer: TimerId) {
        let armed = self
            .presentation
            .as_ref()
            .and_then(|p| p.timer)
            .is_some_and(|armed| armed == timer);
        if !armed {
            trace!(snackbar = %self.id, %timer, "stale timer ignored");
            return;
        }
        self.request_dismiss(host, DismissTrigger::Timeout, true);
    }

    /// Deliver a finished animation.
    pub fn animation_finished<H: HostViewSystem + ?Sized>(
        &mut self,
        host: &mut H,
        animation: AnimationId,
    ) {
        let Some(presentation) = self.presentation.as_mut() else {
            trace!(snackbar = %self.id, %animation, "animation finished after teardown");
            return;
        };
        if presentation.entrance == Some(animation) {
            presentation.entrance = None;
            trace!(snackbar = %self.id, %animation, "entrance finished");
        } else if presentation.exit == Some(animation) && self.state == LifecycleState::Dismissing
        {
            self.finish(host);
        }
    }

    /// Deliver a tap on an action button.
    ///
    /// Under [`SnackbarDuration::Forever`] the buttons give way to the busy
    /// indicator and the snackbar stays until dismissed explicitly; otherwise
    /// the tap dismisses it.
    pub fn tap<H: HostViewSystem + ?Sized>(&mut self, host: &mut H, slot: ActionSlot) {
        if self.state != LifecycleState::Presented {
            trace!(snackbar = %self.id, %slot, state = ?self.state, "tap ignored");
            return;
        }
        let Some(presentation) = self.presentation.as_ref() else {
            return;
        };
        let index = slot_index(slot);
        if presentation.actions_hidden || !presentation.visible[index] {
            trace!(snackbar = %self.id, %slot, "tap on hidden action ignored");
            return;
        }

        self.invoke(CallbackRef::Action(slot));

        if self.config.duration.is_forever() {
            if let Some(presentation) = self.presentation.as_mut() {
                presentation.actions_hidden = true;
                presentation.busy = true;
            }
            self.render(host);
            debug!(snackbar = %self.id, %slot, "action taken, waiting for dismissal");
        } else {
            self.request_dismiss(host, DismissTrigger::Action(slot), true);
        }
    }

    fn request_dismiss<H: HostViewSystem + ?Sized>(
        &mut self,
        host: &mut H,
        trigger: DismissTrigger,
        animated: bool,
    ) {
        if self.state != LifecycleState::Presented {
            trace!(snackbar = %self.id, ?trigger, state = ?self.state, "dismiss ignored");
            return;
        }
        let Some(presentation) = self.presentation.as_mut() else {
            return;
        };

        self.state = LifecycleState::Dismissing;
        self.trigger = Some(trigger);
        if let Some(timer) = presentation.timer.take() {
            host.cancel_timer(timer);
        }
        let was_busy = std::mem::replace(&mut presentation.busy, false);
        let container = presentation.container;
        let constraints = presentation.constraints;
        if was_busy {
            self.render(host);
        }
        debug!(snackbar = %self.id, ?trigger, animated, "snackbar dismissing");

        if !animated {
            self.finish(host);
            return;
        }

        let geometry = self.config.geometry;
        let host_width = self.slide_width(host, container);
        let rest = Frame::resting(&geometry);
        let end = motion::exit_end(self.config.animation, &geometry, host_width);
        let exit = host.run_animation(
            self.id,
            Animation {
                duration: self.config.animation_duration,
                delay: Duration::ZERO,
                curve: Curve::EXIT,
                mutations: end.changes_from(&rest, &constraints),
            },
        );
        if let Some(presentation) = self.presentation.as_mut() {
            presentation.exit = Some(exit);
        }
    }

    /// Dismissed entry: callbacks, then teardown.
    fn finish<H: HostViewSystem + ?Sized>(&mut self, host: &mut H) {
        self.state = LifecycleState::Dismissed;

        // Without a dismiss callback the first action stands in for it.
        if self.config.on_dismiss.is_some() {
            self.invoke(CallbackRef::Dismiss);
        } else {
            self.invoke(CallbackRef::Action(ActionSlot::First));
        }

        if let Some(presentation) = self.presentation.take() {
            host.remove_constraints(self.id, &presentation.constraints);
            host.detach(self.id);
        }
        debug!(snackbar = %self.id, trigger = ?self.trigger, "snackbar dismissed");
    }

    /// Container width, queried only by styles that slide sideways.
    fn slide_width<H: HostViewSystem + ?Sized>(&self, host: &H, container: ContainerId) -> f64 {
        if self.config.animation.is_horizontal() {
            host.container_width(container)
        } else {
            0.0
        }
    }

    fn invoke(&mut self, target: CallbackRef) {
        let slot = match target {
            CallbackRef::Dismiss => &mut self.config.on_dismiss,
            CallbackRef::Action(slot) => &mut self.config.action_mut(slot).callback,
        };
        let Some(mut callback) = slot.take() else {
            return;
        };
        callback(self);
        let slot = match target {
            CallbackRef::Dismiss => &mut self.config.on_dismiss,
            CallbackRef::Action(slot) => &mut self.config.action_mut(slot).callback,
        };
        *slot = Some(callback);
    }

    fn render<H: HostViewSystem + ?Sized>(&self, host: &mut H) {
        let Some(presentation) = self.presentation.as_ref() else {
            return;
        };
        let buttons = if presentation.actions_hidden {
            ButtonLayout::collapsed()
        } else {
            presentation.buttons
        };
        let chrome = ViewChrome {
            message: &self.config.message,
            message_style: &self.config.message_style,
            alignment: self.config.alignment,
            message_lines: MESSAGE_LINES,
            background: self.config.background,
            separator_color: self.config.separator_color,
            separator_width: SEPARATOR_WIDTH,
            corner_radius: self.config.geometry.corner_radius(),
            buttons,
            first: self.button_chrome(presentation, ActionSlot::First, buttons.first_width),
            second: self.button_chrome(presentation, ActionSlot::Second, buttons.second_width),
            busy: presentation.busy,
        };
        host.render(self.id, &chrome);
    }

    fn button_chrome(
        &self,
        presentation: &Presentation,
        slot: ActionSlot,
        width: f64,
    ) -> ButtonChrome<'_> {
        let action = self.config.action_config(slot);
        ButtonChrome {
            label: &action.label,
            style: &action.style,
            visible: !presentation.actions_hidden && presentation.visible[slot_index(slot)],
            width,
        }
    }
}

impl fmt::Debug for Snackbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snackbar")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("config", &self.config)
            .field("presentation", &self.presentation)
            .field("trigger", &self.trigger)
            .finish()
    }
}

const fn slot_index(slot: ActionSlot) -> usize {
    match slot {
        ActionSlot::First => 0,
        ActionSlot::Second => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{Font, LifecycleState, Snackbar, SnackbarConfig};
    use crate::error::SnackbarError;
    use crate::types::{ActionSlot, SnackbarDuration};

    #[test]
    fn new_snackbar_is_idle_with_defaults() {
        let bar = Snackbar::new(SnackbarConfig::new("hello"));
        assert_eq!(bar.state(), LifecycleState::Idle);
        assert_eq!(bar.config().duration, SnackbarDuration::Short);
        assert!(!bar.config().first_action.is_active());
        assert!(bar.button_layout().is_none());
        assert!(bar.dismiss_trigger().is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = Snackbar::new(SnackbarConfig::new("a"));
        let b = Snackbar::new(SnackbarConfig::new("b"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn configure_while_idle_applies_changes() {
        let mut bar = Snackbar::new(SnackbarConfig::new("hello"));
        let outcome = bar.configure(|cfg| {
            cfg.message = "bye".to_string();
            cfg.geometry.set_height(40.0);
            cfg.geometry.set_corner_radius(30.0);
        });
        assert_eq!(outcome, Ok(()));
        assert_eq!(bar.config().message, "bye");
        assert!((bar.config().geometry.corner_radius() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn builder_wires_actions() {
        let config = SnackbarConfig::with_action("hi", SnackbarDuration::Long, "Undo", |_| {})
            .second_action("Redo", |_| {});
        assert!(config.action_config(ActionSlot::First).is_active());
        assert!(config.action_config(ActionSlot::Second).is_active());
        assert_eq!(config.first_action.label, "Undo");
        assert_eq!(config.duration, SnackbarDuration::Long);
    }

    #[test]
    fn with_action_fonts_styles_message_and_first_action() {
        let config = SnackbarConfig::with_action_fonts(
            "Sent",
            SnackbarDuration::Middle,
            "View",
            Font::bold_system(18.0),
            Font {
                family: Some("Menlo".to_string()),
                size: 12.0,
                bold: false,
            },
            |_| {},
        );
        assert!((config.message_style.font.size - 18.0).abs() < f32::EPSILON);
        assert_eq!(config.first_action.style.font.family.as_deref(), Some("Menlo"));
        assert!(!config.first_action.style.font.bold);
        assert!(config.action_config(ActionSlot::First).is_active());
        assert!(!config.action_config(ActionSlot::Second).is_active());
        assert_eq!(config.first_action.label, "View");
        assert_eq!(config.duration, SnackbarDuration::Middle);
    }

    #[test]
    fn not_idle_error_names_state() {
        let err = SnackbarError::NotIdle {
            state: LifecycleState::Presented,
        };
        assert!(err.to_string().contains("Presented"));
    }
}
