//! Headless host: timers and animations are tokio tasks that report back
//! over a channel, rendering goes to stdout.

use std::collections::HashMap;
use std::time::Duration;

use async_channel::Sender;
use snackbar::snackbar::geometry::PinTargets;
use snackbar::snackbar::host::{
    Animation, AnimationId, ConstraintHandle, ConstraintSet, ContainerId, HostViewSystem,
    Mutation, TimerId, ViewChrome, ViewId,
};
use snackbar::types::ActionSlot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

const WINDOW: ContainerId = ContainerId(1);
const FRAME: Duration = Duration::from_millis(50);
/// Columns used to draw the container.
const COLUMNS: usize = 48;

/// Something the controller has to be told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Timer(TimerId),
    Animation(AnimationId),
    Tap(ActionSlot),
    Dismiss,
}

pub struct TerminalHost {
    width: f64,
    events: Sender<HostEvent>,
    next_id: u64,
    timers: HashMap<TimerId, JoinHandle<()>>,
    tasks: Vec<JoinHandle<()>>,
    constraints: HashMap<ConstraintHandle, (&'static str, f64)>,
    opacity: f64,
    attached: Option<ViewId>,
}

impl TerminalHost {
    pub fn new(width: f64, events: Sender<HostEvent>) -> Self {
        Self {
            width,
            events,
            next_id: 1,
            timers: HashMap::new(),
            tasks: Vec::new(),
            constraints: HashMap::new(),
            opacity: 1.0,
            attached: None,
        }
    }

    /// Post `event` after `after`, used for scripted taps and dismissals.
    pub fn post_after(&mut self, after: Duration, event: HostEvent) {
        let events = self.events.clone();
        self.tasks.push(tokio::spawn(async move {
            sleep(after).await;
            let _ = events.send(event).await;
        }));
    }

    /// Forget a timer once its event has been delivered.
    pub fn timer_delivered(&mut self, timer: TimerId) {
        self.timers.remove(&timer);
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.timers.drain() {
            handle.abort();
        }
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        self.events.close();
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn value(&self, handle: ConstraintHandle) -> f64 {
        self.constraints.get(&handle).map_or(0.0, |(_, value)| *value)
    }

    fn name(&self, handle: ConstraintHandle) -> &'static str {
        self.constraints.get(&handle).map_or("?", |(name, _)| name)
    }
}

/// Draw the container as a row of columns with the view inside it.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn draw_row(width: f64, left: f64, right: f64, body: &str) -> String {
    let scale = COLUMNS as f64 / width.max(1.0);
    let from = (left * scale).round().clamp(0.0, COLUMNS as f64) as usize;
    let to = ((width + right) * scale).round().clamp(0.0, COLUMNS as f64) as usize;
    let mut row = vec![' '; COLUMNS];
    if to > from {
        let inner: Vec<char> = body.chars().collect();
        for (offset, cell) in row[from..to].iter_mut().enumerate() {
            *cell = inner.get(offset).copied().unwrap_or(' ');
        }
        row[from] = '[';
        row[to - 1] = ']';
    }
    format!("|{}|", row.into_iter().collect::<String>())
}

impl HostViewSystem for TerminalHost {
    fn key_container(&self) -> Option<ContainerId> {
        Some(WINDOW)
    }

    fn container_width(&self, _container: ContainerId) -> f64 {
        self.width
    }

    fn attach(&mut self, view: ViewId, container: ContainerId) {
        debug!(%view, %container, "view attached");
        self.attached = Some(view);
    }

    fn detach(&mut self, view: ViewId) {
        debug!(%view, "view detached");
        if self.attached == Some(view) {
            self.attached = None;
        }
    }

    fn apply_constraints(
        &mut self,
        view: ViewId,
        container: ContainerId,
        targets: PinTargets,
    ) -> ConstraintSet {
        let set = ConstraintSet {
            height: ConstraintHandle(self.next()),
            left: ConstraintHandle(self.next()),
            right: ConstraintHandle(self.next()),
            bottom: ConstraintHandle(self.next()),
        };
        for (handle, name, value) in [
            (set.height, "height", targets.height),
            (set.left, "left", targets.left),
            (set.right, "right", targets.right),
            (set.bottom, "bottom", targets.bottom),
        ] {
            self.constraints.insert(handle, (name, value));
        }
        debug!(%view, %container, ?targets, "constraints installed");
        set
    }

    fn update_constraint(&mut self, handle: ConstraintHandle, value: f64) {
        match self.constraints.get_mut(&handle) {
            Some(entry) => {
                trace!(constraint = entry.0, value, "constraint updated");
                entry.1 = value;
            }
            None => warn!(%handle, "update for unknown constraint"),
        }
    }

    fn remove_constraints(&mut self, view: ViewId, constraints: &ConstraintSet) {
        for handle in constraints.handles() {
            self.constraints.remove(&handle);
        }
        debug!(%view, "constraints removed");
    }

    fn set_opacity(&mut self, _view: ViewId, opacity: f64) {
        self.opacity = opacity;
    }

    fn run_animation(&mut self, view: ViewId, animation: Animation) -> AnimationId {
        let id = AnimationId(self.next());
        // The model layer jumps to the targets, the task only narrates the
        // presentation in between.
        let tracks: Vec<(&'static str, f64, f64)> = animation
            .mutations
            .iter()
            .map(|mutation| match *mutation {
                Mutation::Constraint { handle, value } => {
                    (self.name(handle), self.value(handle), value)
                }
                Mutation::Opacity(value) => ("opacity", self.opacity, value),
            })
            .collect();
        self.apply(view, &animation.mutations);

        debug!(
            %view,
            animation = %id,
            duration = ?animation.duration,
            curve = ?animation.curve,
            tracks = tracks.len(),
            "animation started"
        );
        let events = self.events.clone();
        self.tasks.push(tokio::spawn(async move {
            sleep(animation.delay).await;
            let total = animation.duration.as_secs_f64();
            let mut elapsed = Duration::ZERO;
            while elapsed < animation.duration {
                sleep(FRAME).await;
                elapsed += FRAME;
                let progress = if total > 0.0 {
                    animation.curve.sample(elapsed.as_secs_f64() / total)
                } else {
                    1.0
                };
                for (name, from, to) in &tracks {
                    trace!(
                        animation = %id,
                        track = *name,
                        value = (to - from).mul_add(progress, *from),
                        "frame"
                    );
                }
            }
            let _ = events.send(HostEvent::Animation(id)).await;
        }));
        id
    }

    fn schedule_timer(&mut self, after: Duration) -> TimerId {
        let id = TimerId(self.next());
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            sleep(after).await;
            let _ = events.send(HostEvent::Timer(id)).await;
        });
        self.timers.insert(id, handle);
        id
    }

    fn cancel_timer(&mut self, timer: TimerId) {
        if let Some(handle) = self.timers.remove(&timer) {
            handle.abort();
        }
    }

    fn render(&mut self, view: ViewId, chrome: &ViewChrome<'_>) {
        let mut body = format!(" {}", chrome.message);
        if chrome.busy {
            body.push_str("  (working...)");
        }
        for button in [chrome.first, chrome.second] {
            if button.visible {
                body.push_str(" | ");
                body.push_str(button.label);
            }
        }
        debug!(
            %view,
            first = chrome.buttons.first_width,
            second = chrome.buttons.second_width,
            separator = chrome.buttons.separator_visible,
            busy = chrome.busy,
            "render"
        );
        let left = self.constraints.values().find(|(name, _)| *name == "left");
        let right = self.constraints.values().find(|(name, _)| *name == "right");
        let (left, right) = match (left, right) {
            (Some((_, left)), Some((_, right))) => (*left, *right),
            _ => (0.0, 0.0),
        };
        println!("{}", draw_row(self.width, left, right, &body));
    }
}
