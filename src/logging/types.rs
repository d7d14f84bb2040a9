//! Task records, the run summary, and the [`Log`] trait.
use std::fmt;

/// `tracing` target of stage headers.
pub(super) const STAGE_TARGET: &str = "devsetup::stage";
/// `tracing` target of dry-run previews.
pub(super) const DRY_RUN_TARGET: &str = "devsetup::dry_run";

/// Outcome of one task, kept for the summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name as shown in the stage header.
    pub name: String,
    /// Final status of the task.
    pub status: TaskStatus,
    /// Skip reason or error text.
    pub message: Option<String>,
}

/// Status of a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task completed successfully.
    Ok,
    /// Task does not apply to this run (e.g., fonts disabled).
    NotApplicable,
    /// Task was skipped (e.g., prompt declined).
    Skipped,
    /// Task ran in dry-run mode; no changes were applied.
    DryRun,
    /// Task encountered an error and aborted the run.
    Failed,
}

impl TaskStatus {
    /// Summary marker and its ANSI colour.
    pub(super) const fn marker(self) -> (&'static str, &'static str) {
        match self {
            Self::Ok => ("✓", "\x1b[32m"),
            Self::NotApplicable => ("·", "\x1b[2m"),
            Self::Skipped => ("○", "\x1b[33m"),
            Self::DryRun => ("~", "\x1b[37m"),
            Self::Failed => ("✗", "\x1b[31m"),
        }
    }
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Tasks that completed.
    pub ok: usize,
    /// Tasks that did not apply.
    pub not_applicable: usize,
    /// Tasks skipped at run time.
    pub skipped: usize,
    /// Tasks previewed only.
    pub dry_run: usize,
    /// Tasks that failed (at most one, since the first failure ends the run).
    pub failed: usize,
}

impl Summary {
    /// Count `entries` by status.
    #[must_use]
    pub fn of(entries: &[TaskEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut s, entry| {
            match entry.status {
                TaskStatus::Ok => s.ok += 1,
                TaskStatus::NotApplicable => s.not_applicable += 1,
                TaskStatus::Skipped => s.skipped += 1,
                TaskStatus::DryRun => s.dry_run += 1,
                TaskStatus::Failed => s.failed += 1,
            }
            s
        })
    }

    /// Number of tasks counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.ok + self.not_applicable + self.skipped + self.dry_run + self.failed
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tasks: {} ok, {} n/a, {} skipped, {} dry-run, {} failed",
            self.total(),
            self.ok,
            self.not_applicable,
            self.skipped,
            self.dry_run,
            self.failed
        )
    }
}

/// Sink for task output.
///
/// Task code logs through this trait so tests can substitute an isolated
/// [`Logger`](super::Logger).
pub trait Log: Send + Sync {
    /// Log a stage header (one per task).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (console only when verbose).
    fn debug(&self, msg: &str);
    /// Log something the user should look at but that does not stop the run.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log what a dry run would have done.
    fn dry_run(&self, msg: &str);
    /// Record a task result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(status: TaskStatus) -> TaskEntry {
        TaskEntry {
            name: "t".to_string(),
            status,
            message: None,
        }
    }

    #[test]
    fn summary_counts_each_status() {
        let summary = Summary::of(&[
            entry(TaskStatus::Ok),
            entry(TaskStatus::Ok),
            entry(TaskStatus::NotApplicable),
            entry(TaskStatus::Failed),
        ]);
        assert_eq!(
            summary,
            Summary {
                ok: 2,
                not_applicable: 1,
                failed: 1,
                ..Summary::default()
            }
        );
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn summary_display() {
        let summary = Summary {
            ok: 5,
            skipped: 1,
            ..Summary::default()
        };
        assert_eq!(
            summary.to_string(),
            "6 tasks: 5 ok, 0 n/a, 1 skipped, 0 dry-run, 0 failed"
        );
    }
}
