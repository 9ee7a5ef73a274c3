//! Arena configuration, validation, and error types.
//!
//! [`ArenaConfig`] is the input to [`LockstepArena::new`](crate::LockstepArena::new)
//! and [`AgentController::new`](crate::AgentController::new).
//! [`validate()`](ArenaConfig::validate) rejects every knob that would
//! make the simulation ill-defined before any agent spawns.

use std::error::Error;
use std::fmt;

use pursuit_core::{Bounds, EpisodeError};
use pursuit_space::sampler::DEFAULT_MAX_ATTEMPTS;
use pursuit_space::RadialSensor;

use crate::reward::RewardPolicy;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`ArenaConfig::validate()`] and arena
/// construction.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f32,
    },
    /// `move_speed` is NaN, infinite, zero, or negative.
    InvalidMoveSpeed {
        /// The invalid value.
        value: f32,
    },
    /// The radial sensor failed validation.
    InvalidSensor {
        /// Description of the validation failure.
        reason: String,
    },
    /// Reward magnitudes failed validation.
    InvalidReward {
        /// Description of the validation failure.
        reason: String,
    },
    /// `goals_needed` is zero.
    ZeroGoalsNeeded,
    /// `spawn_max_attempts` is zero.
    ZeroSpawnAttempts,
    /// `spawn_clearance` is NaN, infinite, or negative.
    InvalidClearance {
        /// The invalid value.
        value: f32,
    },
    /// `min_spawn_dist` is NaN, infinite, or negative.
    InvalidMinSpawnDist {
        /// The invalid value.
        value: f32,
    },
    /// `min_spawn_dist` is at least half the bounds diagonal, so some
    /// avoid points admit no spawn at all.
    InfeasibleSpawnDistance {
        /// The configured minimum distance.
        min_spawn_dist: f32,
        /// Half the bounds diagonal; `min_spawn_dist` must be below it.
        limit: f32,
    },
    /// `max_episode_steps` is `Some(0)`.
    ZeroEpisodeSteps,
    /// The arena was asked to host zero runners.
    NoRunners,
    /// The initial episode flush failed to seed every runner.
    InitialReset(EpisodeError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::InvalidMoveSpeed { value } => {
                write!(f, "move_speed must be finite and positive, got {value}")
            }
            Self::InvalidSensor { reason } => write!(f, "invalid sensor: {reason}"),
            Self::InvalidReward { reason } => write!(f, "invalid rewards: {reason}"),
            Self::ZeroGoalsNeeded => write!(f, "goals_needed must be at least 1"),
            Self::ZeroSpawnAttempts => write!(f, "spawn_max_attempts must be at least 1"),
            Self::InvalidClearance { value } => {
                write!(f, "spawn_clearance must be finite and >= 0, got {value}")
            }
            Self::InvalidMinSpawnDist { value } => {
                write!(f, "min_spawn_dist must be finite and >= 0, got {value}")
            }
            Self::InfeasibleSpawnDistance {
                min_spawn_dist,
                limit,
            } => write!(
                f,
                "min_spawn_dist {min_spawn_dist} must be below half the bounds diagonal ({limit})"
            ),
            Self::ZeroEpisodeSteps => write!(f, "max_episode_steps must be at least 1"),
            Self::NoRunners => write!(f, "arena needs at least one runner"),
            Self::InitialReset(e) => write!(f, "initial reset failed: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InitialReset(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EpisodeError> for ConfigError {
    fn from(e: EpisodeError) -> Self {
        Self::InitialReset(e)
    }
}

// ── ArenaConfig ────────────────────────────────────────────────────

/// Complete configuration for a pursuit arena.
#[derive(Clone, Debug, PartialEq)]
pub struct ArenaConfig {
    /// Spawn region for runners and goals.
    pub bounds: Bounds,
    /// Minimum distance between a spawn and the point it avoids (the
    /// pursuer for runners, the runner for goals). Default: 5.
    pub min_spawn_dist: f32,
    /// Radius of the wall-clearance check at spawn points. Default: 0.8.
    pub spawn_clearance: f32,
    /// Candidate budget per spawn. Default: 10 000.
    pub spawn_max_attempts: u32,
    /// Raycast fan used in observations.
    pub sensor: RadialSensor,
    /// Velocity scale applied to actions. Default: 5.
    pub move_speed: f32,
    /// Goals collected before the win signal fires. Default: 2.
    pub goals_needed: u32,
    /// Reward magnitudes.
    pub rewards: RewardPolicy,
    /// Simulation timestep in seconds. Default: 0.02 (50 Hz).
    pub dt: f32,
    /// RNG seed for deterministic spawns.
    pub seed: u64,
    /// Optional truncation horizon in ticks. `None` = episodes end only
    /// on capture.
    pub max_episode_steps: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            min_spawn_dist: 5.0,
            spawn_clearance: 0.8,
            spawn_max_attempts: DEFAULT_MAX_ATTEMPTS,
            sensor: RadialSensor::default(),
            move_speed: 5.0,
            goals_needed: 2,
            rewards: RewardPolicy::default(),
            dt: 0.02,
            seed: 0,
            max_episode_steps: None,
        }
    }
}

impl ArenaConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. dt and move_speed finite and positive.
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if !self.move_speed.is_finite() || self.move_speed <= 0.0 {
            return Err(ConfigError::InvalidMoveSpeed {
                value: self.move_speed,
            });
        }
        // 2. Sensor and reward sub-configs.
        self.sensor
            .validate()
            .map_err(|reason| ConfigError::InvalidSensor { reason })?;
        self.rewards
            .validate()
            .map_err(|reason| ConfigError::InvalidReward { reason })?;
        // 3. Counters.
        if self.goals_needed == 0 {
            return Err(ConfigError::ZeroGoalsNeeded);
        }
        if self.spawn_max_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        if self.max_episode_steps == Some(0) {
            return Err(ConfigError::ZeroEpisodeSteps);
        }
        // 4. Spawn geometry. Any point in the rectangle is within half
        //    the diagonal of the centre, so a min distance at or beyond
        //    that can never be met from a centred avoid point.
        if !self.spawn_clearance.is_finite() || self.spawn_clearance < 0.0 {
            return Err(ConfigError::InvalidClearance {
                value: self.spawn_clearance,
            });
        }
        if !self.min_spawn_dist.is_finite() || self.min_spawn_dist < 0.0 {
            return Err(ConfigError::InvalidMinSpawnDist {
                value: self.min_spawn_dist,
            });
        }
        let limit = 0.5 * self.bounds.diagonal();
        if self.min_spawn_dist >= limit {
            return Err(ConfigError::InfeasibleSpawnDistance {
                min_spawn_dist: self.min_spawn_dist,
                limit,
            });
        }
        Ok(())
    }

    /// Observation length: agent, pursuer and goal positions plus one
    /// distance per ray.
    pub fn observation_len(&self) -> usize {
        6 + self.sensor.ray_count
    }
}
