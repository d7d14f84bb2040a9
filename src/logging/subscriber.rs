//! Tracing subscriber: terminal output plus the persistent run log.
//!
//! Both sinks classify an event the same way ([`LineKind`]) and differ only
//! in decoration: the terminal gets colour, the log file gets a timestamp and
//! plain text.
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;

use super::types::{DRY_RUN_TARGET, STAGE_TARGET};
use super::utils::{format_datetime, format_time, log_file_path, strip_ansi};

/// How an event is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl LineKind {
    fn of(metadata: &tracing::Metadata<'_>) -> Self {
        match (*metadata.level(), metadata.target()) {
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            _ => Self::Debug,
        }
    }

    fn terminal(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[33m[dry run]\x1b[0m {msg}"),
            Self::Error => format!("\x1b[31merror:\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }

    fn plain(self, msg: &str) -> String {
        let msg = strip_ansi(msg);
        let tag = match self {
            Self::Stage => return format!("==> {msg}"),
            Self::DryRun => "[dry run] ",
            Self::Error => "[error] ",
            Self::Warn => "[warn] ",
            Self::Info => "",
            Self::Debug => "[debug] ",
        };
        format!("    {tag}{msg}")
    }
}

/// Pulls the formatted `message` field out of an event.
#[derive(Default)]
struct Message(String);

impl tracing::field::Visit for Message {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut message = Message::default();
    event.record(&mut message);
    message.0
}

/// Appends every event, debug included, to the run log.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate `path`, write the run header, and keep it open for appending.
    pub(super) fn create(path: &Path) -> std::io::Result<Self> {
        let header = format!(
            "# devsetup {} started {}\n",
            crate::commands::version_string(),
            format_datetime(),
        );
        fs::write(path, header)?;
        let file = fs::OpenOptions::new().append(true).open(path)?;
        Ok(Self {
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
        let line = LineKind::of(event.metadata()).plain(&message_of(event));
        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{}] {line}", format_time()).ok();
        }
    }
}

struct TerminalFormat;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for TerminalFormat
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
        let line = LineKind::of(event.metadata()).terminal(&message_of(event));
        writeln!(writer, "{line}")
    }
}

/// Install the global subscriber for `command`.
///
/// Warnings and errors go to stderr, everything else to stdout; debug output
/// reaches the terminal only when `verbose`. Every event is also appended to
/// `$XDG_CACHE_HOME/devsetup/<command>.log`.
///
/// Returns the log file path, or `None` when the file could not be opened
/// (the run continues with terminal output only). Call once, before any
/// logging.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let terminal_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let terminal = fmt::layer()
        .event_format(TerminalFormat)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        )
        .with_filter(terminal_level);

    let log_file = log_file_path(command)
        .and_then(|path| FileLayer::create(&path).ok().map(|layer| (path, layer)));
    let (path, file_layer) = log_file.unzip();

    tracing_subscriber::registry()
        .with(terminal)
        .with(file_layer.map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
    path
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_carry_tags() {
        assert_eq!(LineKind::Stage.plain("Install packages"), "==> Install packages");
        assert_eq!(LineKind::Warn.plain("careful"), "    [warn] careful");
        assert_eq!(LineKind::Info.plain("\x1b[32mok\x1b[0m"), "    ok");
    }

    #[test]
    fn terminal_lines_are_coloured() {
        assert_eq!(
            strip_ansi(&LineKind::Error.terminal("boom")),
            "error: boom"
        );
        assert_eq!(
            strip_ansi(&LineKind::DryRun.terminal("would create ~/.vimrc")),
            "  [dry run] would create ~/.vimrc"
        );
    }

    #[test]
    fn file_layer_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("install.log");
        FileLayer::create(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("# devsetup "), "{contents}");
    }
}
