//! `log` facade backend writing severity-tagged lines into any byte sink
//!
//! The terminal is taken by the screen, so the host logs into a file.
//!
//! # Examples
//!
//! ```no_run
//! # use std::fs::File;
//! # use log::{info, LevelFilter};
//! use plum8_host::logger;
//!
//! let file = File::create("plum8.log").unwrap();
//! logger::init(LevelFilter::Debug, file).unwrap();
//!
//! info!("logger initialized");
//! ```

use std::io::Write;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Severity-tagged logger writing one line per record into a sink
///
/// Lines look like `[INFO ][plum8::plum] waiting for key to store in V3`.
pub struct Logger<W: Write + Send> {
    level: LevelFilter,
    sink: Mutex<W>,
}

impl<W: Write + Send> Logger<W> {
    pub fn new(level: LevelFilter, sink: W) -> Self {
        Self {
            level,
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> Log for Logger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let modpath = record.module_path().unwrap_or_else(|| record.target());
        if let Ok(mut sink) = self.sink.lock() {
            // nowhere to report a failing log sink
            let _ = writeln!(sink, "[{:5}][{}] {}", record.level(), modpath, record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Install a `Logger` over `sink` as the global logger
pub fn init<W>(level: LevelFilter, sink: W) -> Result<(), SetLoggerError>
where
    W: Write + Send + 'static,
{
    log::set_boxed_logger(Box::new(Logger::new(level, sink)))
        .map(|()| log::set_max_level(level))
}
