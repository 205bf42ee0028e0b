// Logger initialization
//
// The TUI owns the terminal, so in that mode logs go to a daily rolling file
// instead of stderr.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines are written
#[derive(Debug, Clone, Copy)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

const LOG_FILE_PREFIX: &str = "medinsight.log";

/// Filter directive for the given number of `-v` flags, if any
pub fn verbosity_filter(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("medinsight=debug"),
        _ => Some("medinsight=trace,reqwest=debug"),
    }
}

/// Build the env filter. `RUST_LOG` wins, then `-v`, then the configured filter.
fn build_filter(default_filter: &str, verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(verbosity_filter(verbosity).unwrap_or(default_filter))
    })
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// so buffered file output is flushed.
pub fn init_logger(
    default_filter: &str,
    verbosity: u8,
    target: LogTarget<'_>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(default_filter, verbosity);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
            Ok(None)
        }
        LogTarget::File(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()?;
            Ok(Some(guard))
        }
    }
}
