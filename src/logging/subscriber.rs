//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Target for stage header events.
pub(super) const STAGE_TARGET: &str = "repoplan::stage";

/// Target for dry-run events.
pub(super) const DRY_RUN_TARGET: &str = "repoplan::dry_run";

/// Collects the `message` and any extra fields of a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
    fields: Vec<String>,
}

impl MessageExtractor {
    /// Message followed by `key=value` pairs, if any.
    fn line(&self) -> String {
        if self.fields.is_empty() {
            self.message.clone()
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

/// How an event is presented, decided by its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Stage,
    DryRun,
    Info,
    Warn,
    Error,
    Debug,
}

impl EventKind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (tracing::Level::ERROR, _) => Self::Error,
            (tracing::Level::WARN, _) => Self::Warn,
            (tracing::Level::INFO, STAGE_TARGET) => Self::Stage,
            (tracing::Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (tracing::Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }
}

/// Classify `event` and flatten it to a single line.
fn read_event(event: &tracing::Event<'_>) -> (EventKind, String) {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    (EventKind::of(event.metadata()), extractor.line())
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={value:?}", field.name()));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={value}", field.name()));
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` level and above regardless of the
/// console verbosity setting, including debug events from the compiler
/// stages.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log file for `command`, write a run header, and return a
    /// layer appending to it.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("REPOPLAN_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             repoplan {version} {command} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let (kind, msg) = read_event(event);
        let msg = strip_ansi(&msg);
        let ts = format_utc_time();

        let line = match kind {
            EventKind::Stage => format!("[{ts}] ==> {msg}"),
            EventKind::DryRun => format!("[{ts}]     [dry run] {msg}"),
            EventKind::Error => format!("[{ts}]     [error] {msg}"),
            EventKind::Warn => format!("[{ts}]     [warn] {msg}"),
            EventKind::Debug => {
                format!("[{ts}]     [debug] {}: {msg}", event.metadata().target())
            }
            EventKind::Info => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits repoplan-style
/// console output.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let (kind, msg) = read_event(event);
        match kind {
            EventKind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            EventKind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            EventKind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            EventKind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            EventKind::Info => writeln!(writer, "  {msg}"),
            EventKind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stderr so stdout carries only command data. The
/// file layer writes every event (including `debug`) to
/// `$XDG_CACHE_HOME/repoplan/<command>.log`. Must be called once at program
/// startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(std::io::stderr)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
