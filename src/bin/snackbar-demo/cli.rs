use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;
use snackbar::types::{ActionSlot, AnimationStyle, SnackbarDuration};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play a snackbar lifecycle in the terminal", long_about = None)]
pub struct Cli {
    /// Message shown in the snackbar.
    #[arg(default_value = "Message archived")]
    pub message: String,

    /// Auto-dismiss policy: short, middle, long, forever or a delay ("2s").
    #[arg(long, value_parser = SnackbarDuration::from_str)]
    pub duration: Option<SnackbarDuration>,

    /// Entrance/exit style (ex. "fade", "slide-from-right-to-left").
    #[arg(long, value_parser = AnimationStyle::from_str)]
    pub animation: Option<AnimationStyle>,

    /// Length of the entrance and exit animations (ex. "300ms").
    #[arg(long, value_parser = parse_duration)]
    pub animation_duration: Option<Duration>,

    /// Label of the first action button.
    #[arg(long, value_name = "LABEL")]
    pub action: Option<String>,

    /// Label of the second action button.
    #[arg(long, value_name = "LABEL")]
    pub second_action: Option<String>,

    /// Simulate a tap on this slot ("1" or "2").
    #[arg(long, value_parser = ActionSlot::from_str)]
    pub tap: Option<ActionSlot>,

    /// Delay before the simulated tap.
    #[arg(long, value_parser = parse_duration, default_value = "500ms")]
    pub tap_after: Duration,

    /// Dismiss manually after this delay.
    #[arg(long, value_parser = parse_duration)]
    pub dismiss_after: Option<Duration>,

    /// Width of the simulated container, in points.
    #[arg(long, default_value_t = 375.0)]
    pub width: f64,

    /// Path of the TOML settings file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (ex. "snackbar=trace").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Print a JSON summary of the run on exit.
    #[arg(long, action = ArgAction::SetTrue)]
    pub report: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use snackbar::types::{ActionSlot, AnimationStyle, SnackbarDuration};
    use std::time::Duration;

    #[test]
    fn parses_scripted_run() {
        let cli = match Cli::try_parse_from([
            "snackbar-demo",
            "Draft saved",
            "--duration",
            "forever",
            "--animation",
            "fade",
            "--action",
            "Undo",
            "--tap",
            "1",
            "--tap-after",
            "1s",
            "--dismiss-after",
            "3s",
        ]) {
            Ok(cli) => cli,
            Err(err) => panic!("failed to parse arguments: {err}"),
        };
        assert_eq!(cli.message, "Draft saved");
        assert_eq!(cli.duration, Some(SnackbarDuration::Forever));
        assert_eq!(cli.animation, Some(AnimationStyle::FadeInFadeOut));
        assert_eq!(cli.tap, Some(ActionSlot::First));
        assert_eq!(cli.tap_after, Duration::from_secs(1));
        assert_eq!(cli.dismiss_after, Some(Duration::from_secs(3)));
    }

    #[test]
    fn rejects_unknown_animation() {
        assert!(Cli::try_parse_from(["snackbar-demo", "--animation", "spin"]).is_err());
    }
}
