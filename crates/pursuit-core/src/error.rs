//! Error types for the Pursuit arena, organized by subsystem:
//! geometry, spawn sampling, agent lifecycle, episode coordination,
//! and the lockstep tick driver.

use std::error::Error;
use std::fmt;

use crate::geometry::Vec2;
use crate::id::AgentId;
use crate::phase::EpisodePhase;

/// Errors from [`Bounds::new`](crate::Bounds::new).
#[derive(Clone, Debug, PartialEq)]
pub enum BoundsError {
    /// A corner component is NaN or infinite.
    NonFinite,
    /// `bottom_left` is not strictly below and left of `top_right`.
    Inverted {
        /// The offending lower-left corner.
        bottom_left: Vec2,
        /// The offending upper-right corner.
        top_right: Vec2,
    },
    /// The corners are finite but the width or height overflows `f32`.
    Unbounded,
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "bounds corners must be finite"),
            Self::Unbounded => write!(f, "bounds width and height must be finite"),
            Self::Inverted {
                bottom_left,
                top_right,
            } => write!(
                f,
                "bottom_left {bottom_left} must be strictly below and left of top_right {top_right}"
            ),
        }
    }
}

impl Error for BoundsError {}

/// Errors from rejection-sampled spawn placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleError {
    /// No candidate satisfied the distance and clearance constraints
    /// within the attempt budget.
    Exhausted {
        /// Number of candidates drawn before giving up.
        attempts: u32,
    },
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { attempts } => {
                write!(f, "no feasible spawn point after {attempts} attempts")
            }
        }
    }
}

impl Error for SampleError {}

/// Agent operation named in an [`AgentError::InvalidTransition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentOp {
    /// `reset()`.
    Reset,
    /// `observe()`.
    Observe,
    /// `act()`.
    Act,
}

impl fmt::Display for AgentOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reset => write!(f, "reset"),
            Self::Observe => write!(f, "observe"),
            Self::Act => write!(f, "act"),
        }
    }
}

/// Errors from agent controller operations.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentError {
    /// The operation is not allowed in the agent's current phase.
    InvalidTransition {
        /// The agent that rejected the call.
        agent: AgentId,
        /// The rejected operation.
        operation: AgentOp,
        /// The phase the agent was in.
        phase: EpisodePhase,
    },
    /// An action component was NaN or infinite.
    NonFiniteAction {
        /// The agent that rejected the action.
        agent: AgentId,
    },
    /// Spawn or goal placement failed during reset.
    Spawn {
        /// The agent being placed.
        agent: AgentId,
        /// The underlying sampler failure.
        source: SampleError,
    },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition {
                agent,
                operation,
                phase,
            } => write!(f, "agent {agent}: cannot {operation} while {phase}"),
            Self::NonFiniteAction { agent } => {
                write!(f, "agent {agent}: action components must be finite")
            }
            Self::Spawn { agent, source } => {
                write!(f, "agent {agent}: spawn placement failed: {source}")
            }
        }
    }
}

impl Error for AgentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors from the episode coordinator.
#[derive(Clone, Debug, PartialEq)]
pub enum EpisodeError {
    /// The agent id is already registered.
    DuplicateAgent(AgentId),
    /// A registered agent is missing from the roster handed to `flush()`.
    UnknownAgent(AgentId),
    /// An agent failed to reset during the flush.
    Agent(AgentError),
}

impl fmt::Display for EpisodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAgent(id) => write!(f, "agent {id} is already registered"),
            Self::UnknownAgent(id) => write!(f, "registered agent {id} missing from roster"),
            Self::Agent(e) => write!(f, "reset failed: {e}"),
        }
    }
}

impl Error for EpisodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Agent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AgentError> for EpisodeError {
    fn from(e: AgentError) -> Self {
        Self::Agent(e)
    }
}

/// Errors from a lockstep arena `step()`.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// The number of actions does not match the number of runners.
    ActionCountMismatch {
        /// Runners in the arena.
        expected: usize,
        /// Actions supplied.
        got: usize,
    },
    /// An agent rejected its action or event.
    Agent(AgentError),
    /// The end-of-tick episode flush failed.
    Episode(EpisodeError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActionCountMismatch { expected, got } => {
                write!(f, "expected {expected} actions, got {got}")
            }
            Self::Agent(e) => write!(f, "agent step failed: {e}"),
            Self::Episode(e) => write!(f, "episode flush failed: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Agent(e) => Some(e),
            Self::Episode(e) => Some(e),
            Self::ActionCountMismatch { .. } => None,
        }
    }
}

impl From<AgentError> for StepError {
    fn from(e: AgentError) -> Self {
        Self::Agent(e)
    }
}

impl From<EpisodeError> for StepError {
    fn from(e: EpisodeError) -> Self {
        Self::Episode(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_display_names_operation_and_phase() {
        let err = AgentError::InvalidTransition {
            agent: AgentId(3),
            operation: AgentOp::Act,
            phase: EpisodePhase::PendingReset,
        };
        assert_eq!(format!("{err}"), "agent 3: cannot act while pending reset");
    }

    #[test]
    fn spawn_error_exposes_source() {
        let err = AgentError::Spawn {
            agent: AgentId(0),
            source: SampleError::Exhausted { attempts: 10 },
        };
        let source = err.source().expect("spawn errors carry a source");
        assert!(format!("{source}").contains("10 attempts"));
    }

    #[test]
    fn step_error_wraps_episode_error() {
        let err: StepError = EpisodeError::UnknownAgent(AgentId(2)).into();
        assert!(matches!(
            err,
            StepError::Episode(EpisodeError::UnknownAgent(AgentId(2)))
        ));
        assert!(format!("{err}").contains("missing from roster"));
    }
}
