#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

#[path = "snackbar-demo/app.rs"]
mod app;
#[path = "snackbar-demo/cli.rs"]
mod cli;
#[path = "snackbar-demo/host.rs"]
mod host;

use std::error::Error as StdError;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse_args();
    match app::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            if err.is_configuration() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

fn report_error(err: &snackbar::error::Error) {
    eprintln!("Error: {err}");
    let mut source: Option<&dyn StdError> = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
