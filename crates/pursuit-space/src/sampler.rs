//! Rejection-sampled spawn placement.
//!
//! Draws uniform points inside a [`Bounds`] until one is at least
//! `min_distance` from an avoid point and not blocked by an obstacle.
//! The loop is capped at [`SpatialSampler::max_attempts`] candidates; an
//! infeasible configuration surfaces as [`SampleError::Exhausted`]
//! instead of spinning forever.

use pursuit_core::{Bounds, SampleError, Vec2};
use rand::Rng;

/// Default candidate budget per [`sample`](SpatialSampler::sample) call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Rejection sampler for spawn and goal placement.
///
/// Stateless apart from its attempt budget; randomness comes from the
/// caller's RNG so placement is reproducible per seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialSampler {
    max_attempts: u32,
}

impl Default for SpatialSampler {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SpatialSampler {
    /// Create a sampler with the given candidate budget (clamped to at
    /// least one attempt).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Maximum number of candidates drawn per call.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sample a point inside `bounds` with
    /// `distance(point, avoid) >= min_distance` and `!is_blocked(point)`.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::Exhausted`] if no candidate was accepted
    /// within the attempt budget.
    pub fn sample<R, F>(
        &self,
        rng: &mut R,
        bounds: &Bounds,
        avoid: Vec2,
        min_distance: f32,
        mut is_blocked: F,
    ) -> Result<Vec2, SampleError>
    where
        R: Rng,
        F: FnMut(Vec2) -> bool,
    {
        let lo = bounds.bottom_left();
        let hi = bounds.top_right();
        for _ in 0..self.max_attempts {
            let candidate = Vec2::new(
                rng.random_range(lo.x..hi.x),
                rng.random_range(lo.y..hi.y),
            );
            if candidate.distance(avoid) >= min_distance && !is_blocked(candidate) {
                return Ok(candidate);
            }
        }
        tracing::warn!(
            attempts = self.max_attempts,
            min_distance,
            %avoid,
            "spawn sampler exhausted its attempt budget"
        );
        Err(SampleError::Exhausted {
            attempts: self.max_attempts,
        })
    }
}
