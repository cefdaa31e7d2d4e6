use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use async_channel::bounded;
use serde::Serialize;
use snackbar::Result;
use snackbar::config::Settings;
use snackbar::error::ConfigError;
use snackbar::snackbar::DismissTrigger;
use snackbar::telemetry::{LogFormat, init_tracing};
use snackbar::types::{ActionSlot, AnimationStyle, SnackbarDuration};
use snackbar::{LifecycleState, Snackbar, SnackbarConfig};
use tokio::signal;
use tracing::{info, warn};

use super::cli::Cli;
use super::host::{HostEvent, TerminalHost};

const DEFAULT_CONFIG: &str = "snackbar.toml";
const EVENT_QUEUE: usize = 32;

#[derive(Debug, Serialize)]
struct Report<'a> {
    message: &'a str,
    duration: SnackbarDuration,
    animation: AnimationStyle,
    state: LifecycleState,
    trigger: Option<DismissTrigger>,
    taps: u32,
    elapsed_ms: u128,
}

pub async fn run(cli: Cli) -> Result<()> {
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(cli.log_filter.as_deref(), format)?;

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let settings = Settings::from_env_and_file(&config_path)?;
    if !cli.width.is_finite() || cli.width <= 0.0 {
        return Err(ConfigError::InvalidField {
            field: "cli.width",
            message: format!("expected a positive width, got {}", cli.width),
        }
        .into());
    }

    let taps = Rc::new(Cell::new(0_u32));
    let mut bar = Snackbar::new(build_config(&cli, &settings, &taps));
    let (tx, rx) = bounded(EVENT_QUEUE);
    let mut host = TerminalHost::new(cli.width, tx);

    let started = Instant::now();
    bar.show(&mut host);
    if let Some(slot) = cli.tap {
        host.post_after(cli.tap_after, HostEvent::Tap(slot));
    }
    if let Some(after) = cli.dismiss_after {
        host.post_after(after, HostEvent::Dismiss);
    }
    if bar.config().duration.is_forever() && cli.dismiss_after.is_none() {
        info!("duration is forever, press Ctrl-C to dismiss");
    }

    while bar.state() != LifecycleState::Dismissed {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("interrupt received, dismissing");
                bar.dismiss_immediately(&mut host);
            }
            event = rx.recv() => {
                let Ok(event) = event else {
                    warn!("host event channel closed");
                    break;
                };
                dispatch(&mut bar, &mut host, event);
            }
        }
    }
    host.shutdown();

    if cli.report {
        let report = Report {
            message: &bar.config().message,
            duration: bar.config().duration,
            animation: bar.config().animation,
            state: bar.state(),
            trigger: bar.dismiss_trigger(),
            taps: taps.get(),
            elapsed_ms: started.elapsed().as_millis(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => warn!(error = %err, "failed to serialize run report"),
        }
    }
    Ok(())
}

fn build_config(cli: &Cli, settings: &Settings, taps: &Rc<Cell<u32>>) -> SnackbarConfig {
    let mut config = settings.apply_to(SnackbarConfig::new(cli.message.clone()));
    if let Some(duration) = cli.duration {
        config = config.duration(duration);
    }
    if let Some(animation) = cli.animation {
        config = config.animation(animation);
    }
    if let Some(animation_duration) = cli.animation_duration {
        config = config.animation_duration(animation_duration);
    }
    for (slot, label) in [
        (ActionSlot::First, cli.action.as_ref()),
        (ActionSlot::Second, cli.second_action.as_ref()),
    ] {
        let Some(label) = label else { continue };
        let taps = Rc::clone(taps);
        let action = config.action_mut(slot);
        action.label.clone_from(label);
        let label = label.clone();
        action.set_callback(move |bar: &Snackbar| {
            taps.set(taps.get() + 1);
            info!(snackbar = %bar.id(), %slot, label = %label, "action invoked");
        });
    }
    config.on_dismiss(|bar: &Snackbar| {
        info!(snackbar = %bar.id(), trigger = ?bar.dismiss_trigger(), "dismissed");
    })
}

fn dispatch(bar: &mut Snackbar, host: &mut TerminalHost, event: HostEvent) {
    match event {
        HostEvent::Timer(timer) => {
            host.timer_delivered(timer);
            bar.timer_fired(host, timer);
        }
        HostEvent::Animation(animation) => bar.animation_finished(host, animation),
        HostEvent::Tap(slot) => {
            info!(%slot, "simulated tap");
            bar.tap(host, slot);
        }
        HostEvent::Dismiss => bar.dismiss(host),
    }
}
