//! Reward shaping for runner events.
//!
//! Captures are punished and goals rewarded. Both carry a time bonus of
//! `max_base_reward / elapsed`, so fast goals pay more and early
//! captures cost more. The elapsed time is clamped below by
//! `min_elapsed` so a same-tick event never divides by zero.

/// Default base magnitude of the capture penalty.
pub const DEFAULT_CAPTURE_BASE: f32 = 100.0;
/// Default flat bonus for reaching a goal.
pub const DEFAULT_GOAL_BONUS: f32 = 50.0;
/// Default numerator of the time bonus.
pub const DEFAULT_MAX_BASE_REWARD: f32 = 100.0;
/// Default per-tick penalty while touching a wall.
pub const DEFAULT_WALL_PENALTY: f32 = -0.1;
/// Default lower clamp on elapsed time: one 50 Hz physics step.
pub const DEFAULT_MIN_ELAPSED: f32 = 0.02;

/// Clamp `elapsed` to at least `min_elapsed`. NaN and negative inputs
/// also clamp.
pub fn clamp_elapsed(elapsed: f32, min_elapsed: f32) -> f32 {
    if elapsed.is_finite() && elapsed > min_elapsed {
        elapsed
    } else {
        min_elapsed
    }
}

fn time_bonus(max_base_reward: f32, elapsed: f32, min_elapsed: f32) -> f32 {
    max_base_reward / clamp_elapsed(elapsed, min_elapsed)
}

/// Reward for being captured: `-base_magnitude - max_base_reward / elapsed`.
///
/// Uses [`DEFAULT_MIN_ELAPSED`] as the clamp.
pub fn capture_reward(base_magnitude: f32, max_base_reward: f32, elapsed_since_reset: f32) -> f32 {
    -base_magnitude - time_bonus(max_base_reward, elapsed_since_reset, DEFAULT_MIN_ELAPSED)
}

/// Reward for reaching a goal: `base_bonus + max_base_reward / elapsed`.
///
/// Uses [`DEFAULT_MIN_ELAPSED`] as the clamp.
pub fn goal_reward(base_bonus: f32, max_base_reward: f32, elapsed_since_goal: f32) -> f32 {
    base_bonus + time_bonus(max_base_reward, elapsed_since_goal, DEFAULT_MIN_ELAPSED)
}

/// Per-tick penalty while in contact with a wall.
pub fn wall_contact_penalty() -> f32 {
    DEFAULT_WALL_PENALTY
}

/// Reward magnitudes for one arena. Immutable once the arena is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardPolicy {
    /// Base magnitude of the capture penalty (positive; negated on use).
    pub capture_base: f32,
    /// Flat bonus for reaching a goal.
    pub goal_bonus: f32,
    /// Numerator of the time bonus shared by captures and goals.
    pub max_base_reward: f32,
    /// Signed reward applied per tick of wall contact. Usually negative.
    pub wall_penalty: f32,
    /// Lower clamp on elapsed time in the time bonus.
    pub min_elapsed: f32,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            capture_base: DEFAULT_CAPTURE_BASE,
            goal_bonus: DEFAULT_GOAL_BONUS,
            max_base_reward: DEFAULT_MAX_BASE_REWARD,
            wall_penalty: DEFAULT_WALL_PENALTY,
            min_elapsed: DEFAULT_MIN_ELAPSED,
        }
    }
}

impl RewardPolicy {
    /// Check that every magnitude is finite, the capture base, goal bonus
    /// and max base reward are non-negative, and `min_elapsed > 0`.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("capture_base", self.capture_base),
            ("goal_bonus", self.goal_bonus),
            ("max_base_reward", self.max_base_reward),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        if !self.wall_penalty.is_finite() {
            return Err(format!("wall_penalty must be finite, got {}", self.wall_penalty));
        }
        if !self.min_elapsed.is_finite() || self.min_elapsed <= 0.0 {
            return Err(format!(
                "min_elapsed must be finite and positive, got {}",
                self.min_elapsed
            ));
        }
        Ok(())
    }

    /// Reward for a capture `elapsed_since_reset` seconds into the episode.
    pub fn capture(&self, elapsed_since_reset: f32) -> f32 {
        -self.capture_base - time_bonus(self.max_base_reward, elapsed_since_reset, self.min_elapsed)
    }

    /// Reward for a goal reached `elapsed_since_goal` seconds after the
    /// previous one (or the episode start).
    pub fn goal(&self, elapsed_since_goal: f32) -> f32 {
        self.goal_bonus + time_bonus(self.max_base_reward, elapsed_since_goal, self.min_elapsed)
    }

    /// Reward for one tick of wall contact.
    pub fn wall_contact(&self) -> f32 {
        self.wall_penalty
    }
}
