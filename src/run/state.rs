use std::fmt;

/// Lifecycle of a [`super::RunController`].
///
/// Transitions only move forward: `Idle -> Running -> Draining -> Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Pool not started.
    Idle,
    /// Tasks are being submitted and executed.
    Running,
    /// Submission finished; waiting for outstanding tasks.
    Draining,
    /// Terminal. Metrics are frozen and the summary is available.
    Completed,
}

impl RunState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Draining => "draining",
            RunState::Completed => "completed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
