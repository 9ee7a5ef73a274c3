//! Lockstep (synchronous) arena driver.
//!
//! [`LockstepArena`] runs the tick order every trainer relies on: all
//! agents observe, all agents act and receive their contacts, then one
//! episode flush. It owns the runners, the coordinator, and the world.

use std::time::Instant;

use indexmap::IndexMap;
use pursuit_core::{
    AgentError, AgentId, ArenaWorld, ColliderClass, ContactBuf, EpisodePhase, StepError, TickId,
    Vec2,
};

use crate::agent::{AgentController, Observation, PresentationSignal};
use crate::config::{ArenaConfig, ConfigError};
use crate::coordinator::EpisodeCoordinator;
use crate::metrics::StepMetrics;

/// Result of a successful [`LockstepArena::step()`] call.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Tick that just completed (1 after the first step).
    pub tick: TickId,
    /// Reward accumulated by each runner this tick, in roster order.
    pub rewards: Vec<(AgentId, f32)>,
    /// True if the flush at the end of this tick started a new episode.
    pub episode_ended: bool,
    /// True if the episode ended because `max_episode_steps` was reached
    /// rather than by a capture.
    pub truncated: bool,
    /// Total reward of the episode that just ended, per runner. Empty
    /// unless `episode_ended`.
    pub episode_returns: Vec<(AgentId, f32)>,
    /// Presentation signals emitted this tick, in emission order.
    pub signals: Vec<(AgentId, PresentationSignal)>,
    /// Counters for this tick.
    pub metrics: StepMetrics,
}

impl StepResult {
    /// Reward for `agent` this tick, if it is in the arena.
    pub fn reward(&self, agent: AgentId) -> Option<f32> {
        self.rewards
            .iter()
            .find(|(id, _)| *id == agent)
            .map(|&(_, r)| r)
    }
}

// ── LockstepArena ───────────────────────────────────────────────

/// Single-threaded pursuit arena.
///
/// Created via [`new()`](LockstepArena::new), which validates the config
/// and seeds every runner's first episode. Each
/// [`step()`](LockstepArena::step) runs one complete tick.
///
/// # Example
///
/// ```ignore
/// let mut arena = LockstepArena::new(ArenaConfig::default(), world, 4)?;
/// loop {
///     let obs = arena.observe_all()?;
///     let actions = policy(&obs);
///     let result = arena.step(&actions)?;
///     if result.episode_ended { /* log returns */ }
/// }
/// ```
pub struct LockstepArena<W: ArenaWorld> {
    config: ArenaConfig,
    world: W,
    runners: IndexMap<AgentId, AgentController>,
    coordinator: EpisodeCoordinator,
    tick: TickId,
    episode_steps: u64,
    contacts: ContactBuf,
    last_metrics: StepMetrics,
}

impl<W: ArenaWorld> LockstepArena<W> {
    /// Build an arena with `runner_count` runners (ids `0..runner_count`)
    /// and run the initial flush.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from validation, [`ConfigError::NoRunners`]
    /// for an empty arena, and [`ConfigError::InitialReset`] if a runner
    /// cannot be placed.
    pub fn new(config: ArenaConfig, world: W, runner_count: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        if runner_count == 0 {
            return Err(ConfigError::NoRunners);
        }
        let mut coordinator = EpisodeCoordinator::new();
        let mut runners = IndexMap::with_capacity(runner_count as usize);
        for i in 0..runner_count {
            let id = AgentId(i);
            let mut runner = AgentController::new(id, &config);
            coordinator.register(&mut runner)?;
            runners.insert(id, runner);
        }
        coordinator.flush(&mut runners, &world)?;
        tracing::info!(
            runners = runner_count,
            seed = config.seed,
            "lockstep arena ready"
        );
        Ok(Self {
            config,
            world,
            runners,
            coordinator,
            tick: TickId(0),
            episode_steps: 0,
            contacts: ContactBuf::new(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Current observation for every runner, in roster order.
    pub fn observe_all(&self) -> Result<Vec<(AgentId, Observation)>, StepError> {
        self.runners
            .iter()
            .map(|(&id, runner)| {
                let pursuer = self.world.pursuer_position(id);
                Ok((id, runner.observe(&self.world, pursuer)?))
            })
            .collect()
    }

    /// Run one tick: apply `actions` (one `(move_x, move_y)` per runner,
    /// in roster order), dispatch contacts, then flush.
    ///
    /// If the previous tick's flush failed, it is retried before anyone
    /// moves; a successful retry is reported through `episode_ended`.
    ///
    /// # Errors
    ///
    /// [`StepError::ActionCountMismatch`] and
    /// [`StepError::Agent`] for a non-finite action, both before anything
    /// moves. [`StepError::Agent`] for a failed goal placement, and
    /// [`StepError::Episode`] if a flush fails.
    pub fn step(&mut self, actions: &[(f32, f32)]) -> Result<StepResult, StepError> {
        let tick_start = Instant::now();
        if actions.len() != self.runners.len() {
            return Err(StepError::ActionCountMismatch {
                expected: self.runners.len(),
                got: actions.len(),
            });
        }
        if let Some(((&agent, _), _)) = self
            .runners
            .iter()
            .zip(actions)
            .find(|(_, action)| !Vec2::from(**action).is_finite())
        {
            return Err(AgentError::NonFiniteAction { agent }.into());
        }
        let mut metrics = StepMetrics::default();
        let dt = self.config.dt;

        // 0. Retry a flush that failed on an earlier tick.
        let mut recovered = false;
        if self.coordinator.is_pending()
            && self
                .runners
                .values()
                .any(|r| r.phase() == EpisodePhase::PendingReset)
        {
            recovered = self.coordinator.flush(&mut self.runners, &self.world)?;
            self.episode_steps = 0;
            metrics.resets = self.coordinator.len() as u32;
        }

        // 1. Movement.
        for (runner, &action) in self.runners.values_mut().zip(actions) {
            runner.act(Vec2::from(action), dt)?;
        }

        // 2. Contacts, in roster order.
        for (&id, runner) in self.runners.iter_mut() {
            self.contacts.clear();
            self.world
                .contacts(id, runner.position(), runner.goal(), &mut self.contacts);
            for &contact in &self.contacts {
                match (runner.on_contact(contact, &self.world)?, contact.class) {
                    (None, _) => metrics.ignored_contacts += 1,
                    (Some(_), ColliderClass::Pursuer) => metrics.captures += 1,
                    (Some(_), ColliderClass::Goal) => metrics.goals += 1,
                    (Some(_), _) => metrics.wall_contacts += 1,
                }
            }
        }

        // 3. Truncation.
        self.episode_steps += 1;
        let mut truncated = false;
        if let Some(limit) = self.config.max_episode_steps {
            if self.episode_steps >= limit && !self.coordinator.is_pending() {
                truncated = true;
                self.coordinator.request_end();
            }
        }

        let mut rewards = Vec::with_capacity(self.runners.len());
        let mut signals = Vec::new();
        for (&id, runner) in self.runners.iter_mut() {
            rewards.push((id, runner.take_step_reward()));
            signals.extend(runner.drain_signals().into_iter().map(|s| (id, s)));
        }
        let episode_returns: Vec<(AgentId, f32)> = if self.coordinator.is_pending() {
            self.runners
                .iter()
                .map(|(&id, runner)| (id, runner.episode_reward()))
                .collect()
        } else {
            Vec::new()
        };

        // 4. One flush.
        let flush_start = Instant::now();
        let flushed = self.coordinator.flush(&mut self.runners, &self.world)?;
        metrics.flush_us = flush_start.elapsed().as_micros() as u64;
        if flushed {
            metrics.resets += self.coordinator.len() as u32;
            self.episode_steps = 0;
        }
        let episode_ended = flushed || recovered;

        self.tick = TickId(self.tick.0 + 1);
        metrics.total_us = tick_start.elapsed().as_micros() as u64;
        self.last_metrics = metrics.clone();
        Ok(StepResult {
            tick: self.tick,
            rewards,
            episode_ended,
            truncated,
            episode_returns,
            signals,
            metrics,
        })
    }

    /// Force a new episode for every runner and rewind the tick counter.
    ///
    /// Rewards emitted since the last step are discarded.
    pub fn reset(&mut self) -> Result<Vec<(AgentId, Observation)>, StepError> {
        self.coordinator.request_end();
        self.coordinator.flush(&mut self.runners, &self.world)?;
        for runner in self.runners.values_mut() {
            runner.take_step_reward();
            runner.drain_signals();
        }
        self.tick = TickId(0);
        self.episode_steps = 0;
        self.last_metrics = StepMetrics::default();
        self.observe_all()
    }

    /// The runner with `id`, if present.
    pub fn runner(&self, id: AgentId) -> Option<&AgentController> {
        self.runners.get(&id)
    }

    /// All runners in roster order.
    pub fn runners(&self) -> impl Iterator<Item = &AgentController> + '_ {
        self.runners.values()
    }

    /// Number of runners.
    pub fn runner_count(&self) -> usize {
        self.runners.len()
    }

    /// The episode coordinator.
    pub fn coordinator(&self) -> &EpisodeCoordinator {
        &self.coordinator
    }

    /// The world collaborator.
    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable access to the world, e.g. to move pursuers between ticks.
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// The validated configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Number of completed ticks since construction or reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Ticks elapsed in the current episode.
    pub fn episode_steps(&self) -> u64 {
        self.episode_steps
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl<W: ArenaWorld> std::fmt::Debug for LockstepArena<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockstepArena")
            .field("current_tick", &self.tick)
            .field("runners", &self.runners.len())
            .field("episode_steps", &self.episode_steps)
            .field("seed", &self.config.seed)
            .finish()
    }
}
