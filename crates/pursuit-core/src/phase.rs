//! Episode lifecycle phase of a single agent.

use std::fmt;

/// Lifecycle phase of an agent controller.
///
/// `Running → PendingReset` on capture or a coordinator-driven end;
/// `PendingReset → Running` only through `reset()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EpisodePhase {
    /// Episode in progress: the agent may observe and act.
    Running,
    /// Episode over (or not yet started); waiting for the next reset.
    PendingReset,
}

impl fmt::Display for EpisodePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::PendingReset => write!(f, "pending reset"),
        }
    }
}
