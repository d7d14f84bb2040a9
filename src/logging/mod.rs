//! Console and log-file output, and the task ledger behind the run summary.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{Log, Summary, TaskEntry, TaskStatus};

/// Log file of an [`isolated_logger`], kept alive with its subscriber.
#[cfg(test)]
pub(crate) struct LogCapture {
    path: std::path::PathBuf,
    _dir: tempfile::TempDir,
    _guard: tracing::dispatcher::DefaultGuard,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl LogCapture {
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub(crate) fn contents(&self) -> String {
        std::fs::read_to_string(&self.path).expect("read captured log")
    }
}

/// A [`Logger`] whose events go to a private log file through a
/// thread-local subscriber, for as long as the capture lives.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, LogCapture) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("test.log");
    let file_layer = subscriber::FileLayer::create(&path).expect("file layer");
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    let log = Logger::new(Some(path.clone()));
    (
        log,
        LogCapture {
            path,
            _dir: dir,
            _guard: guard,
        },
    )
}
