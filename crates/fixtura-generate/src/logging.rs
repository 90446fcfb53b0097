use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

use crate::errors::{GenerationError, Result};
use crate::options::LoggingOptions;

/// Installs the global subscriber described by `options`.
///
/// `RUST_LOG` takes priority over `options.level`. Fails with
/// [`GenerationError::Logging`] when a subscriber is already installed.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.level))
        .map_err(|err| GenerationError::Logging(err.to_string()))?;

    let make_writer = match &options.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let file = Arc::new(Mutex::new(file));
            BoxMakeWriter::new(move || SharedWriter {
                file: Arc::clone(&file),
            })
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let result = if options.json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_timer(UtcTime::rfc_3339())
            .with_writer(make_writer);
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(options.file.is_none())
            .with_writer(make_writer);
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
    };

    result.map_err(|err| GenerationError::Logging(err.to_string()))
}

struct SharedWriter {
    file: Arc<Mutex<File>>,
}

impl Write for SharedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("failed to lock log file"))?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("failed to lock log file"))?;
        file.flush()
    }
}
