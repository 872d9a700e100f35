//! Structured logging with a rotating file sink.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber once at startup
//! - Write to `<directory>/<file_name>.YYYY-MM-DD`, rotated daily, via a
//!   non-blocking appender
//! - Format every record as `YYYY-MM-DD HH:mm:ss | LEVEL | target:line | message`
//! - Hand the caller a [`LogHandle`] that flushes the sink on shutdown
//!
//! # Design Decisions
//! - Minimum severity comes from config; RUST_LOG overrides it
//! - An unwritable log destination is a fatal startup error
//! - The stdout mirror uses the same line format, so operators see exactly
//!   what lands in the file

use std::fs;
use std::io;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error type for log sink initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log sink: {0}")]
    OpenSink(#[from] InitError),

    #[error("invalid log level {0:?}")]
    InvalidLevel(String),

    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Handle to the active log sink.
///
/// Owns the non-blocking writer's guard. Dropping it flushes buffered
/// records and closes the file, so the bootstrapper holds it for the
/// process lifetime and calls [`LogHandle::shutdown`] last.
pub struct LogHandle {
    guard: WorkerGuard,
}

impl LogHandle {
    /// Flush buffered records and close the sink.
    pub fn shutdown(self) {
        drop(self.guard);
    }
}

/// Register the global log sink from config.
///
/// Must be called once, before any log record is emitted. Returns the
/// [`LogHandle`] keeping the background writer alive.
pub fn init(config: &LoggingConfig) -> Result<LogHandle, LoggingError> {
    let level: tracing::Level = config
        .level
        .parse()
        .map_err(|_| LoggingError::InvalidLevel(config.level.clone()))?;

    fs::create_dir_all(&config.directory).map_err(|source| LoggingError::CreateDir {
        path: config.directory.clone(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_name)
        .build(&config.directory)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(SinkFormat)
        .with_writer(file_writer)
        .with_ansi(false);

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    if config.stdout {
        let stdout_layer = tracing_subscriber::fmt::layer()
            .event_format(SinkFormat)
            .with_writer(io::stdout)
            .with_ansi(false);
        registry.with(stdout_layer).try_init()?;
    } else {
        registry.try_init()?;
    }

    Ok(LogHandle { guard })
}

/// Event formatter producing the sink line format:
/// `YYYY-MM-DD HH:mm:ss | LEVEL | target:line | message`.
pub struct SinkFormat;

impl<S, N> FormatEvent<S, N> for SinkFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} | {} | {}:{} | ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            meta.level(),
            meta.target(),
            meta.line().unwrap_or(0),
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = Capture;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn sink_format_matches_declared_line_format() {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .event_format(SinkFormat)
            .with_writer(capture.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("sink format probe");
        });

        let bytes = capture.0.lock().unwrap().clone();
        let line = String::from_utf8(bytes).unwrap();
        let parts: Vec<&str> = line.trim_end().splitn(4, " | ").collect();
        assert_eq!(parts.len(), 4, "line was: {line:?}");

        chrono::NaiveDateTime::parse_from_str(parts[0], "%Y-%m-%d %H:%M:%S").unwrap();
        // No padding around the level token.
        assert_eq!(parts[1], "INFO");

        let (target, line_no) = parts[2].rsplit_once(':').unwrap();
        assert!(target.ends_with("logging::tests"));
        line_no.parse::<u32>().unwrap();

        assert_eq!(parts[3], "sink format probe");
    }

    #[test]
    fn unknown_level_is_rejected_before_touching_disk() {
        let config = LoggingConfig {
            level: "verbose".into(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::InvalidLevel(_))));
    }

    #[test]
    fn unwritable_directory_is_fatal() {
        let config = LoggingConfig {
            directory: "/dev/null/logs".into(),
            ..LoggingConfig::default()
        };
        assert!(matches!(init(&config), Err(LoggingError::CreateDir { .. })));
    }
}
