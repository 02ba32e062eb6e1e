//! Logging setup.
//!
//! The terminal belongs to the renderer while the app runs, so log lines go to
//! a file. With no file configured nothing is installed and `tracing` macros
//! are no-ops.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::Result;

/// Install a file-backed subscriber.
///
/// `filter` wins over `RUST_LOG`; otherwise `RUST_LOG` wins over the
/// verbosity default.
pub fn init_file_logger(path: &Path, verbose: bool, filter: Option<&str>) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let default_filter = if verbose {
        "folio_tui=debug,info"
    } else {
        "folio_tui=info"
    };
    let filter = match filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .compact(),
        )
        .init();

    Ok(())
}
