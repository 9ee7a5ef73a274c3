//! Pursuit: the simulation core of a pursuit/evasion training arena.
//!
//! A runner collects goal tokens while evading a pursuer inside a bounded
//! 2D arena. This facade crate re-exports the public API from all Pursuit
//! sub-crates. For most users, adding `pursuit` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pursuit::prelude::*;
//!
//! // An open field: no walls, nothing for rays to hit, pursuer parked
//! // in a corner, no contacts.
//! struct OpenField;
//! impl ArenaWorld for OpenField {
//!     fn overlaps_wall(&self, _center: Vec2, _radius: f32) -> bool { false }
//!     fn cast_ray(&self, _o: Vec2, _d: Vec2, _range: f32) -> Option<f32> { None }
//!     fn pursuer_position(&self, _agent: AgentId) -> Vec2 { Vec2::new(-9.0, -9.0) }
//!     fn contacts(&self, _a: AgentId, _p: Vec2, _g: Vec2, _out: &mut ContactBuf) {}
//! }
//!
//! let config = ArenaConfig { seed: 42, ..ArenaConfig::default() };
//! let mut arena = LockstepArena::new(config, OpenField, 2).unwrap();
//!
//! let obs = arena.observe_all().unwrap();
//! assert_eq!(obs[0].1.len(), 6 + 8);
//!
//! let result = arena.step(&[(1.0, 0.0), (0.0, -1.0)]).unwrap();
//! assert_eq!(result.tick, TickId(1));
//! assert!(!result.episode_ended);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pursuit-core` | Geometry, IDs, contacts, the `ArenaWorld` trait, errors |
//! | [`space`] | `pursuit-space` | Spawn sampling and radial ray sensing |
//! | [`engine`] | `pursuit-engine` | Agents, rewards, episode coordination, lockstep driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`pursuit-core`).
///
/// Contains [`types::Vec2`], [`types::Bounds`], the collider
/// classification, the [`types::ArenaWorld`] collaborator trait, and the
/// error enums.
pub use pursuit_core as types;

/// Spawn sampling and ray sensing (`pursuit-space`).
///
/// Provides [`space::SpatialSampler`] and [`space::RadialSensor`].
pub use pursuit_space as space;

/// Agents, rewards, and episode control (`pursuit-engine`).
///
/// [`engine::AgentController`] for a single runner,
/// [`engine::EpisodeCoordinator`] for batched episode ends, and
/// [`engine::LockstepArena`] for synchronous stepping (RL training loops).
pub use pursuit_engine as engine;

/// Common imports for typical Pursuit usage.
///
/// ```rust
/// use pursuit::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use pursuit_core::{
        AgentId, ArenaWorld, Bounds, ColliderClass, Contact, ContactBuf, ContactPhase, EpisodeId,
        EpisodePhase, TickId, Vec2,
    };

    // Errors
    pub use pursuit_core::{AgentError, EpisodeError, SampleError, StepError};

    // Space
    pub use pursuit_space::{RadialSensor, SpatialSampler};

    // Engine
    pub use pursuit_engine::{
        AgentController, ArenaConfig, ConfigError, EndSignal, EpisodeCoordinator,
        EpisodeParticipant, LockstepArena, Observation, PresentationSignal, RewardPolicy,
        StepMetrics, StepResult,
    };
}
