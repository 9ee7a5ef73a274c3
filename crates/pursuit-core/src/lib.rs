//! Core types and traits for the Pursuit arena simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the rest of the workspace:
//! 2D geometry, agent and tick identifiers, collider classification,
//! the [`ArenaWorld`] collaborator trait, and the error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod contact;
pub mod error;
pub mod geometry;
pub mod id;
pub mod phase;
pub mod traits;

pub use contact::{ColliderClass, Contact, ContactBuf, ContactPhase};
pub use error::{AgentError, AgentOp, BoundsError, EpisodeError, SampleError, StepError};
pub use geometry::{Bounds, Vec2};
pub use id::{AgentId, EpisodeId, TickId};
pub use phase::EpisodePhase;
pub use traits::ArenaWorld;
