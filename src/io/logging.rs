use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::io::paths;

/// Filter directives, e.g. `LANEBOARD_LOG=laneboard=debug`
pub const LOG_ENV: &str = "LANEBOARD_LOG";
pub const DEFAULT_FILTER: &str = "laneboard=info";

/// Where logs should go, if anywhere.
///
/// The terminal belongs to the board, so logging is file-only and off unless
/// `--log-file` is given or `LANEBOARD_LOG` is set.
pub fn log_destination(cli_log_file: Option<&Path>, env_filter: Option<&str>) -> Option<PathBuf> {
    match (cli_log_file, env_filter) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(_)) => Some(paths::default_log_path()),
        (None, None) => None,
    }
}

/// Install the global subscriber. Returns the log file in use, if any.
pub fn init_logging(cli_log_file: Option<&Path>) -> std::io::Result<Option<PathBuf>> {
    let env_filter = std::env::var(LOG_ENV).ok();
    let Some(path) = log_destination(cli_log_file, env_filter.as_deref()) else {
        return Ok(None);
    };

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let filter = env_filter
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(Some(path))
}
