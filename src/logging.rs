//! Console and file logging setup.
//!
//! The console layer writes compact output to stderr; an optional file
//! layer persists events to a caller-given path. Each layer carries its own
//! severity filter, so a quiet console can coexist with a verbose file.

use std::{error::Error, fs::File, path::Path, sync::Arc};

use tracing_subscriber::{
    filter::LevelFilter,
    fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

/// Install the global logging subscriber.
///
/// `console_level` filters the stderr layer. When `file_log` is given, a
/// second non-ANSI layer writes to the path at its own level; the file is
/// created (or truncated) up front so a bad path fails here rather than on
/// the first event.
///
/// Call once at startup. The global subscriber can only be set once, so a
/// second call panics.
pub fn init_logging(
    console_level: LevelFilter,
    file_log: Option<(LevelFilter, &Path)>,
) -> Result<(), Box<dyn Error>> {
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(console_level);

    let file_layer = match file_log {
        Some((level, path)) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(level),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    tracing::info!("logging configured");
    Ok(())
}
