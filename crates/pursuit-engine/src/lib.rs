//! Simulation engine for the Pursuit arena.
//!
//! Provides the runner [`AgentController`], the [`RewardPolicy`] that
//! shapes its rewards, the [`EpisodeCoordinator`] that batches episode
//! ends across agents, and the [`LockstepArena`] tick driver that ties
//! them to an [`ArenaWorld`](pursuit_core::ArenaWorld).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod config;
pub mod coordinator;
pub mod lockstep;
pub mod metrics;
pub mod reward;

pub use agent::{AgentController, AgentState, Observation, PresentationSignal};
pub use config::{ArenaConfig, ConfigError};
pub use coordinator::{EndSignal, EpisodeCoordinator, EpisodeParticipant};
pub use lockstep::{LockstepArena, StepResult};
pub use metrics::StepMetrics;
pub use reward::RewardPolicy;
