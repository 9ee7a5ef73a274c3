//! Spatial sensing and placement for the Pursuit arena.
//!
//! Two leaf components used by every runner:
//!
//! - [`SpatialSampler`]: rejection-sampled placement of a point inside
//!   [`Bounds`](pursuit_core::Bounds), away from a given point and clear
//!   of obstacles.
//! - [`RadialSensor`]: a fixed-count fan of rays cast from the agent,
//!   returning one hit distance per ray.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod sampler;
pub mod sensor;

pub use sampler::SpatialSampler;
pub use sensor::RadialSensor;
