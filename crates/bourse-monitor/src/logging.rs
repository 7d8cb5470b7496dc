//! Logging setup.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name prefix of the daily log files.
pub const LOG_FILE_PREFIX: &str = "bourse.log";

/// Setup logging with the given level.
///
/// `RUST_LOG` takes precedence over `level`. When `log_dir` is set, events are
/// also written as JSON to a daily rolling file there; keep the returned guard
/// alive until exit or buffered lines are lost.
pub fn setup_logging(
    level: &str,
    json: bool,
    log_dir: Option<&Path>,
) -> Result<Option<WorkerGuard>, TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let json_layer = json.then(|| fmt::layer().json());
    let pretty_layer = (!json).then(|| fmt::layer().pretty());

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(pretty_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logging_and_single_init() {
        let dir = tempfile::tempdir().unwrap();

        let guard = setup_logging("info", false, Some(dir.path())).unwrap();
        assert!(guard.is_some());
        tracing::info!(symbol = "ALK", "written to file");
        drop(guard);

        let files: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
            .collect();
        assert_eq!(files.len(), 1);

        assert!(setup_logging("debug", true, None).is_err());
    }
}
