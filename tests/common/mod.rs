#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use snackbar::snackbar::host::{
    Animation, AnimationId, ConstraintHandle, ConstraintSet, ContainerId, HostViewSystem,
    Mutation, TimerId, ViewChrome, ViewId,
};
use snackbar::snackbar::geometry::PinTargets;
use snackbar::snackbar::motion::Curve;

/// Shared transcript written by the host and by test callbacks.
pub type Transcript = Rc<RefCell<Vec<String>>>;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedChrome {
    pub message: String,
    pub first_visible: bool,
    pub second_visible: bool,
    pub first_width: f64,
    pub second_width: f64,
    pub separator_visible: bool,
    pub busy: bool,
    pub corner_radius: f64,
}

/// Host that records every call and lets the test drive time by hand.
pub struct RecordingHost {
    pub container: Option<ContainerId>,
    pub width: f64,
    pub width_queries: Cell<usize>,
    pub transcript: Transcript,
    pub attached: Vec<ViewId>,
    pub armed_timers: Vec<TimerId>,
    pub animations: Vec<(AnimationId, Animation)>,
    pub constraints: HashMap<ConstraintHandle, f64>,
    pub opacity: f64,
    pub chrome: Option<RenderedChrome>,
    next_id: u64,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            container: Some(ContainerId(1)),
            width: 320.0,
            width_queries: Cell::new(0),
            transcript: Rc::new(RefCell::new(Vec::new())),
            attached: Vec::new(),
            armed_timers: Vec::new(),
            animations: Vec::new(),
            constraints: HashMap::new(),
            opacity: 1.0,
            chrome: None,
            next_id: 1,
        }
    }

    pub fn without_container() -> Self {
        Self {
            container: None,
            ..Self::new()
        }
    }

    pub fn record(&self, line: impl Into<String>) {
        self.transcript.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.transcript.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.transcript
            .borrow()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    pub fn transcript_text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn last_animation(&self) -> (AnimationId, Animation) {
        self.animations.last().cloned().expect("an animation ran")
    }

    pub fn timer(&self) -> TimerId {
        *self.armed_timers.first().expect("a timer is armed")
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn curve_name(curve: Curve) -> &'static str {
    match curve {
        Curve::Linear => "linear",
        Curve::EaseIn => "ease-in",
        Curve::EaseInOut => "ease-in-out",
        Curve::Spring { .. } => "spring",
    }
}

fn describe(mutation: &Mutation) -> String {
    match mutation {
        Mutation::Constraint { handle, value } => format!("{handle}={value}"),
        Mutation::Opacity(opacity) => format!("opacity={opacity}"),
    }
}

impl HostViewSystem for RecordingHost {
    fn key_container(&self) -> Option<ContainerId> {
        self.container
    }

    fn container_width(&self, _container: ContainerId) -> f64 {
        self.width_queries.set(self.width_queries.get() + 1);
        self.width
    }

    fn attach(&mut self, view: ViewId, container: ContainerId) {
        self.attached.push(view);
        self.record(format!("attach {container}"));
    }

    fn detach(&mut self, view: ViewId) {
        self.attached.retain(|attached| *attached != view);
        self.record("detach");
    }

    fn apply_constraints(
        &mut self,
        _view: ViewId,
        _container: ContainerId,
        targets: PinTargets,
    ) -> ConstraintSet {
        let set = ConstraintSet {
            height: ConstraintHandle(self.next()),
            left: ConstraintHandle(self.next()),
            right: ConstraintHandle(self.next()),
            bottom: ConstraintHandle(self.next()),
        };
        self.constraints.insert(set.height, targets.height);
        self.constraints.insert(set.left, targets.left);
        self.constraints.insert(set.right, targets.right);
        self.constraints.insert(set.bottom, targets.bottom);
        self.record(format!(
            "pin height={} left={} right={} bottom={}",
            targets.height, targets.left, targets.right, targets.bottom
        ));
        set
    }

    fn update_constraint(&mut self, handle: ConstraintHandle, value: f64) {
        self.constraints.insert(handle, value);
        self.record(format!("update {handle}={value}"));
    }

    fn remove_constraints(&mut self, _view: ViewId, constraints: &ConstraintSet) {
        for handle in constraints.handles() {
            self.constraints.remove(&handle);
        }
        self.record("remove constraints");
    }

    fn set_opacity(&mut self, _view: ViewId, opacity: f64) {
        self.opacity = opacity;
        self.record(format!("opacity={opacity}"));
    }

    fn run_animation(&mut self, _view: ViewId, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next());
        let targets: Vec<String> = animation.mutations.iter().map(describe).collect();
        self.record(format!(
            "animate {id} {:?} {} [{}]",
            animation.duration,
            curve_name(animation.curve),
            targets.join(", ")
        ));
        self.animations.push((id, animation));
        id
    }

    fn schedule_timer(&mut self, after: Duration) -> TimerId {
        let id = TimerId(self.next());
        self.armed_timers.push(id);
        self.record(format!("schedule {id} after {after:?}"));
        id
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        self.armed_timers.retain(|armed| *armed != timer);
        self.record(format!("cancel {timer}"));
    }

    fn render(&mut self, _view: ViewId, chrome: &ViewChrome<'_>) {
        let rendered = RenderedChrome {
            message: chrome.message.to_string(),
            first_visible: chrome.first.visible,
            second_visible: chrome.second.visible,
            first_width: chrome.first.width,
            second_width: chrome.second.width,
            separator_visible: chrome.buttons.separator_visible,
            busy: chrome.busy,
            corner_radius: chrome.corner_radius,
        };
        self.record(format!(
            "render {:?} first={} second={} separator={} busy={} radius={}",
            rendered.message,
            rendered.first_width,
            rendered.second_width,
            rendered.separator_visible,
            rendered.busy,
            rendered.corner_radius
        ));
        self.chrome = Some(rendered);
    }
}

/// Callback that appends `label` to the transcript.
pub fn note(transcript: &Transcript, label: &'static str) -> impl FnMut(&snackbar::Snackbar) + 'static {
    let transcript = Rc::clone(transcript);
    move |_: &snackbar::Snackbar| transcript.borrow_mut().push(format!("callback {label}"))
}
