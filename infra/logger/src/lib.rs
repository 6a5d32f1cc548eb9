//! # Logger
//!
//! Global `tracing` subscriber for the `hkconf` tool.
//!
//! * Console output goes to **stderr**, so stdout stays free for machine-readable results.
//! * An optional rolling log file (plain or JSON) is written through a non-blocking worker.
//! * `RUST_LOG` directives are honoured on top of the configured level; use
//!   [`LoggerBuilder::env_filter`] for a programmatic default (e.g. `"hkc_haiku=trace"`).
//!
//! ## Example
//!
//! ```rust
//! use hkc_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("hkconf")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 5;
const LOG_FILE_SUFFIX: &str = "log";

/// Rolling file output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    pub dir: PathBuf,
    pub rotation: Rotation,
    pub max_files: usize,
    pub json: bool,
}

impl FileOutput {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false }
    }
}

/// Configures and installs the global subscriber.
#[derive(Debug)]
#[must_use = "The builder does nothing until `init` is called."]
pub struct LoggerBuilder {
    name: String,
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder {
    /// Minimum level emitted when no `RUST_LOG` directive says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Maps a `-v` count to a level: warnings by default, then info, debug and trace.
    pub const fn verbosity(self, count: u8) -> Self {
        let level = match count {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        };
        self.level(level)
    }

    /// Programmatic filter directives, e.g. `hkc_kernel=debug`.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables or disables the stderr layer.
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    /// Adds a rolling file layer writing into `dir`.
    pub fn log_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.file(FileOutput::new(dir))
    }

    /// Adds a rolling file layer with explicit settings.
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown: it owns the file writer's worker.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty name, no enabled layer, a zero
    /// `max_files` or bad filter directives; [`LoggerError::Io`] / [`LoggerError::Appender`]
    /// when the log directory is unusable; [`LoggerError::Subscriber`] when a global
    /// subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.validate()?;
        let filter = self.build_filter()?;

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if self.console {
            layers.push(layer().compact().with_writer(std::io::stderr).with_target(false).boxed());
        }

        let guard = match &self.file {
            Some(output) => {
                let (file_layer, guard) = file_layer(&self.name, output)?;
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(layers)
            .with(filter)
            .try_init()
            .context("Installing the global subscriber")?;

        Ok(Logger { guard })
    }

    fn validate(&self) -> Result<(), LoggerError> {
        let invalid = |message: &'static str| LoggerError::InvalidConfiguration {
            message: message.into(),
            context: None,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("Logger name cannot be empty"));
        }
        if !self.console && self.file.is_none() {
            return Err(invalid("No logging layers enabled. Enable console or file output."));
        }
        if self.file.as_ref().is_some_and(|f| f.max_files == 0) {
            return Err(invalid("max_files must be greater than zero"));
        }
        Ok(())
    }

    fn build_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        match &self.env_filter {
            None => Ok(builder.from_env_lossy()),
            Some(directives) => {
                builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                    message: format!("Invalid env filter '{directives}': {e}").into(),
                    context: None,
                })
            }
        }
    }
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

fn file_layer(name: &str, output: &FileOutput) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(&output.dir)
        .context(format!("Failed to create log directory: {}", output.dir.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(output.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(output.max_files)
        .build(&output.dir)
        .context(format!("Opening log files in {}", output.dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let fmt = layer().with_writer(writer).with_ansi(false);
    let boxed = if output.json { fmt.json().boxed() } else { fmt.boxed() };

    Ok((boxed, guard))
}

/// Handle to the installed subscriber.
///
/// Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder; `name` prefixes rolling log files (`hkconf.2026-10-19.log`).
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder {
            name: name.into(),
            console: true,
            level: LevelFilter::WARN,
            env_filter: None,
            file: None,
        }
    }

    /// Whether a rolling file layer is active.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

/// Lists the log files currently present in `dir`.
///
/// # Errors
/// Propagates directory read failures.
pub fn log_files(dir: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let entries = fs::read_dir(dir).context(format!("Reading {}", dir.display()))?;
    let mut files: Vec<_> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == LOG_FILE_SUFFIX))
        .collect();
    files.sort();
    Ok(files)
}
