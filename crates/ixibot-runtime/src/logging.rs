//! Logging setup on top of `tracing-subscriber`.
//!
//! # From configuration
//!
//! ```rust,ignore
//! use ixibot_runtime::config::load_config;
//! use ixibot_runtime::logging;
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//! ```
//!
//! # By hand
//!
//! ```rust,ignore
//! use ixibot_runtime::logging::{LoggingBuilder, SpanEvents};
//!
//! LoggingBuilder::new()
//!     .directive("ixibot_command=trace")
//!     .span_events(SpanEvents::LIFECYCLE)
//!     .init();
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

const DEFAULT_LOG_FILE: &str = "ixibot.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Which span transitions produce a log line.
///
/// The console listener opens one span per input line, so `LIFECYCLE`
/// brackets everything logged while that line is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

impl SpanEvents {
    /// Nothing.
    pub const NONE: Self = Self {
        new: false,
        enter: false,
        exit: false,
        close: false,
    };

    /// Creation and close only.
    pub const LIFECYCLE: Self = Self {
        new: true,
        close: true,
        ..Self::NONE
    };

    /// Every transition.
    pub const FULL: Self = Self {
        new: true,
        enter: true,
        exit: true,
        close: true,
    };
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

impl From<SpanEvents> for FmtSpan {
    fn from(events: SpanEvents) -> Self {
        [
            (events.new, FmtSpan::NEW),
            (events.enter, FmtSpan::ENTER),
            (events.exit, FmtSpan::EXIT),
            (events.close, FmtSpan::CLOSE),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
    }
}

/// Installs the global subscriber described by `config`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    LoggingBuilder::from_config(config).init();
}

// =============================================================================
// LoggingBuilder
// =============================================================================

/// Collects subscriber settings, then installs them with [`try_init`](Self::try_init).
#[derive(Debug, Clone)]
pub struct LoggingBuilder {
    level: tracing::Level,
    directives: Vec<String>,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    target: bool,
    thread_ids: bool,
    source_location: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Compact lines on stdout at `INFO`.
    pub fn new() -> Self {
        Self {
            level: tracing::Level::INFO,
            directives: Vec::new(),
            span_events: SpanEvents::NONE,
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
            target: true,
            thread_ids: false,
            source_location: false,
        }
    }

    /// Mirrors every field of `config`; per-module filters become directives.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let directives = config
            .filters
            .iter()
            .map(|(module, level)| format!("{module}={level}"))
            .collect();

        Self {
            level: config.level.to_tracing_level(),
            directives,
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            file_path: config.file_path.clone(),
            target: true,
            thread_ids: config.thread_ids,
            source_location: config.file_location,
        }
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Adds an `EnvFilter` directive such as `ixibot_command=trace`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Log file used with [`LogOutput::File`].
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_target(mut self, enabled: bool) -> Self {
        self.target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.thread_ids = enabled;
        self
    }

    /// Adds source file and line number to every line.
    pub fn with_source_location(mut self, enabled: bool) -> Self {
        self.source_location = enabled;
        self
    }

    /// Like [`try_init`](Self::try_init), ignoring an already installed subscriber.
    pub fn init(self) {
        let _ = self.try_init();
    }

    /// Installs the subscriber globally.
    ///
    /// # Errors
    ///
    /// Fails if a global subscriber is already set.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let missing_file = self.output == LogOutput::File && self.file_path.is_none();

        tracing_subscriber::registry()
            .with(self.layer())
            .with(self.filter())
            .try_init()?;

        if missing_file {
            warn!("File output requested but no file path configured, using stdout");
        }
        Ok(())
    }

    /// `RUST_LOG` when set, otherwise the configured level, plus directives.
    fn filter(&self) -> EnvFilter {
        let base = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()));

        self.directives
            .iter()
            .fold(base, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(err) => {
                    eprintln!("ignoring invalid log directive {directive:?}: {err}");
                    filter
                }
            })
    }

    fn writer(&self) -> BoxMakeWriter {
        match (self.output, &self.file_path) {
            (LogOutput::Stderr, _) => BoxMakeWriter::new(std::io::stderr),
            (LogOutput::File, Some(path)) => {
                let directory = path.parent().unwrap_or_else(|| Path::new("."));
                let file = path
                    .file_name()
                    .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
                BoxMakeWriter::new(tracing_appender::rolling::never(directory, file))
            }
            (LogOutput::Stdout | LogOutput::File, _) => BoxMakeWriter::new(std::io::stdout),
        }
    }

    fn layer(&self) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(self.writer())
            .with_span_events(self.span_events.into())
            .with_target(self.target)
            .with_thread_ids(self.thread_ids)
            .with_file(self.source_location)
            .with_line_number(self.source_location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_span_events_conversions() {
        let config = SpanEventConfig {
            new: true,
            close: true,
            ..Default::default()
        };
        assert_eq!(SpanEvents::from(&config), SpanEvents::LIFECYCLE);
        assert_eq!(SpanEvents::default(), SpanEvents::NONE);

        assert_eq!(FmtSpan::from(SpanEvents::NONE), FmtSpan::NONE);
        assert_eq!(
            FmtSpan::from(SpanEvents::LIFECYCLE),
            FmtSpan::NEW | FmtSpan::CLOSE
        );
        assert_eq!(FmtSpan::from(SpanEvents::FULL), FmtSpan::FULL);
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            output: LogOutput::Stderr,
            thread_ids: true,
            file_location: true,
            ..Default::default()
        };
        config
            .filters
            .insert("ixibot_command".to_string(), LogLevel::Trace);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, tracing::Level::DEBUG);
        assert_eq!(builder.output, LogOutput::Stderr);
        assert!(builder.thread_ids);
        assert!(builder.source_location);
        assert_eq!(builder.directives, vec!["ixibot_command=trace"]);
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let config = LoggingConfig {
            level: LogLevel::Warn,
            output: LogOutput::Stderr,
            ..Default::default()
        };
        init_from_config(&config);
        init_from_config(&config);
        assert!(LoggingBuilder::from_config(&config).try_init().is_err());
    }
}
