//! The runner agent: per-step state, observations, actions, and the
//! reward-emitting event handlers.
//!
//! An [`AgentController`] moves between two phases. It starts in
//! [`EpisodePhase::PendingReset`] with no spawn; the coordinator's flush
//! calls [`reset`](AgentController::reset) to place it and enter
//! [`EpisodePhase::Running`]. A capture (or a coordinator-forced end)
//! returns it to `PendingReset` until the next flush.
//!
//! Rewards are never returned to a trainer directly. Each handler adds
//! its reward to a per-step accumulator drained by
//! [`take_step_reward`](AgentController::take_step_reward) and to the
//! running episode total.

use pursuit_core::{
    AgentError, AgentId, AgentOp, ArenaWorld, Bounds, ColliderClass, Contact, ContactPhase,
    EpisodeId, EpisodePhase, Vec2,
};
use pursuit_space::{RadialSensor, SpatialSampler};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ArenaConfig;
use crate::coordinator::{EndSignal, EpisodeParticipant};
use crate::reward::RewardPolicy;

/// Flat observation vector: `[agent.x, agent.y, pursuer.x, pursuer.y,
/// goal.x, goal.y, ray_0 … ray_{n-1}]`.
pub type Observation = Vec<f32>;

/// Visual feedback requested by the agent, for an external renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentationSignal {
    /// Horizontal movement reversed the sprite's facing.
    FacingFlipped {
        /// The new facing.
        facing_right: bool,
    },
    /// `goals_reached` just reached `goals_needed`.
    Won,
}

/// Mutable per-episode state of one runner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentState {
    /// Current position.
    pub position: Vec2,
    /// Sprite facing. Carried across episodes.
    pub facing_right: bool,
    /// Goals collected this episode.
    pub goals_reached: u32,
    /// Seconds since the last reset.
    pub time_since_reset: f32,
    /// Seconds since the last goal, or since the reset if none.
    pub time_since_goal: f32,
}

impl Default for AgentState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            facing_right: true,
            goals_reached: 0,
            time_since_reset: 0.0,
            time_since_goal: 0.0,
        }
    }
}

/// One runner agent.
///
/// Owns its state, its goal token, and a seeded RNG for spawn
/// placement. Collision-derived events arrive through
/// [`on_contact`](Self::on_contact) or the individual handlers.
#[derive(Debug)]
pub struct AgentController {
    id: AgentId,
    phase: EpisodePhase,
    state: AgentState,
    goal: Vec2,
    episode: Option<EpisodeId>,
    episodes_started: u64,

    bounds: Bounds,
    min_spawn_dist: f32,
    spawn_clearance: f32,
    sampler: SpatialSampler,
    sensor: RadialSensor,
    move_speed: f32,
    goals_needed: u32,
    rewards: RewardPolicy,
    rng: ChaCha8Rng,

    end_signal: EndSignal,
    step_reward: f32,
    episode_reward: f32,
    signals: Vec<PresentationSignal>,
}

impl AgentController {
    /// Create a controller in `PendingReset`.
    ///
    /// The configuration is not validated here; arenas call
    /// [`ArenaConfig::validate`] once before building their runners.
    /// Until the controller is registered with an
    /// [`EpisodeCoordinator`](crate::EpisodeCoordinator), its end requests
    /// reach nobody.
    pub fn new(id: AgentId, config: &ArenaConfig) -> Self {
        let seed = config.seed ^ u64::from(id.0).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self {
            id,
            phase: EpisodePhase::PendingReset,
            state: AgentState::default(),
            goal: Vec2::ZERO,
            episode: None,
            episodes_started: 0,
            bounds: config.bounds,
            min_spawn_dist: config.min_spawn_dist,
            spawn_clearance: config.spawn_clearance,
            sampler: SpatialSampler::new(config.spawn_max_attempts),
            sensor: config.sensor.clone(),
            move_speed: config.move_speed,
            goals_needed: config.goals_needed,
            rewards: config.rewards,
            rng: ChaCha8Rng::seed_from_u64(seed),
            end_signal: EndSignal::default(),
            step_reward: 0.0,
            episode_reward: 0.0,
            signals: Vec::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────

    /// This agent's id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Current position.
    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    /// Position of this agent's goal token.
    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    /// Current episode, or `None` before the first reset.
    pub fn episode(&self) -> Option<EpisodeId> {
        self.episode
    }

    /// Sum of rewards emitted since the last reset.
    pub fn episode_reward(&self) -> f32 {
        self.episode_reward
    }

    /// The handle this agent uses to request an episode end.
    pub fn end_signal(&self) -> &EndSignal {
        &self.end_signal
    }

    /// Length of every observation this agent produces.
    pub fn observation_len(&self) -> usize {
        6 + self.sensor.ray_count
    }

    /// Drain the reward accumulated since the previous call.
    pub fn take_step_reward(&mut self) -> f32 {
        std::mem::take(&mut self.step_reward)
    }

    /// Drain queued presentation signals in emission order.
    pub fn drain_signals(&mut self) -> Vec<PresentationSignal> {
        std::mem::take(&mut self.signals)
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Start a new episode: spawn away from `pursuer`, place a goal away
    /// from the spawn, zero timers and the goal count.
    ///
    /// Nothing is mutated if placement fails.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidTransition`] unless pending reset, and
    /// [`AgentError::Spawn`] if the sampler exhausts its budget.
    pub fn reset<W: ArenaWorld + ?Sized>(
        &mut self,
        world: &W,
        pursuer: Vec2,
    ) -> Result<(), AgentError> {
        self.require(EpisodePhase::PendingReset, AgentOp::Reset)?;
        let position = self.sample_clear(world, pursuer)?;
        let goal = self.sample_clear(world, position)?;

        let episode = EpisodeId(self.episodes_started);
        self.episodes_started += 1;
        self.episode = Some(episode);
        self.state = AgentState {
            position,
            facing_right: self.state.facing_right,
            ..AgentState::default()
        };
        self.goal = goal;
        self.episode_reward = 0.0;
        self.phase = EpisodePhase::Running;
        tracing::debug!(agent = %self.id, %episode, %position, %goal, "episode reset");
        Ok(())
    }

    /// Force the current episode to end. No-op if already pending reset.
    pub fn end_episode(&mut self) {
        if self.phase == EpisodePhase::Running {
            self.phase = EpisodePhase::PendingReset;
            tracing::debug!(
                agent = %self.id,
                episode_reward = self.episode_reward,
                "episode ended"
            );
        }
    }

    // ── Observe / act ──────────────────────────────────────────

    /// Build a fresh observation.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidTransition`] unless running.
    pub fn observe<W: ArenaWorld + ?Sized>(
        &self,
        world: &W,
        pursuer: Vec2,
    ) -> Result<Observation, AgentError> {
        let mut out = Vec::with_capacity(self.observation_len());
        self.observe_into(world, pursuer, &mut out)?;
        Ok(out)
    }

    /// Like [`observe`](Self::observe), overwriting a caller-owned buffer.
    pub fn observe_into<W: ArenaWorld + ?Sized>(
        &self,
        world: &W,
        pursuer: Vec2,
        out: &mut Vec<f32>,
    ) -> Result<(), AgentError> {
        self.require(EpisodePhase::Running, AgentOp::Observe)?;
        let position = self.state.position;
        out.clear();
        out.extend_from_slice(&[
            position.x,
            position.y,
            pursuer.x,
            pursuer.y,
            self.goal.x,
            self.goal.y,
        ]);
        self.sensor.scan_into(
            position,
            |origin, dir, range| world.cast_ray(origin, dir, range),
            out,
        );
        Ok(())
    }

    /// Apply one tick of movement: `position += action * move_speed * dt`.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidTransition`] unless running (state is left
    /// untouched), and [`AgentError::NonFiniteAction`] for NaN or
    /// infinite components.
    pub fn act(&mut self, action: Vec2, dt: f32) -> Result<(), AgentError> {
        self.require(EpisodePhase::Running, AgentOp::Act)?;
        if !action.is_finite() {
            return Err(AgentError::NonFiniteAction { agent: self.id });
        }
        self.state.position += action * (self.move_speed * dt);

        let flip = (action.x > 0.0 && !self.state.facing_right)
            || (action.x < 0.0 && self.state.facing_right);
        if flip {
            self.state.facing_right = !self.state.facing_right;
            self.signals.push(PresentationSignal::FacingFlipped {
                facing_right: self.state.facing_right,
            });
        }

        self.state.time_since_reset += dt;
        self.state.time_since_goal += dt;
        Ok(())
    }

    // ── Event handlers ─────────────────────────────────────────

    /// The pursuer caught this agent: punish, request an episode end,
    /// and enter `PendingReset`.
    ///
    /// Returns the emitted reward, or `None` if already pending reset.
    pub fn on_captured_by_pursuer(&mut self) -> Option<f32> {
        if !self.accepts_events("capture") {
            return None;
        }
        let reward = self.rewards.capture(self.state.time_since_reset);
        self.emit(reward);
        self.end_signal.request_end();
        if !self.end_signal.is_shared() {
            tracing::trace!(agent = %self.id, "end request from unregistered agent");
        }
        self.phase = EpisodePhase::PendingReset;
        tracing::debug!(
            agent = %self.id,
            survived = self.state.time_since_reset,
            "captured by pursuer"
        );
        Some(reward)
    }

    /// One tick of wall contact.
    pub fn on_wall_contact(&mut self) -> Option<f32> {
        if !self.accepts_events("wall contact") {
            return None;
        }
        let reward = self.rewards.wall_contact();
        self.emit(reward);
        Some(reward)
    }

    /// The agent touched its goal: count it, reward it, and move the goal
    /// away from the agent. Fires [`PresentationSignal::Won`] when the
    /// count reaches `goals_needed`.
    ///
    /// # Errors
    ///
    /// [`AgentError::Spawn`] if the new goal cannot be placed. Nothing is
    /// counted or rewarded in that case.
    pub fn on_goal_reached<W: ArenaWorld + ?Sized>(
        &mut self,
        world: &W,
    ) -> Result<Option<f32>, AgentError> {
        if !self.accepts_events("goal") {
            return Ok(None);
        }
        let goal = self.sample_clear(world, self.state.position)?;
        self.state.goals_reached += 1;
        if self.state.goals_reached == self.goals_needed {
            self.signals.push(PresentationSignal::Won);
            tracing::debug!(agent = %self.id, goals = self.state.goals_reached, "won");
        }
        let reward = self.rewards.goal(self.state.time_since_goal);
        self.emit(reward);
        self.goal = goal;
        self.state.time_since_goal = 0.0;
        Ok(Some(reward))
    }

    /// Dispatch a contact to the matching handler.
    ///
    /// Pursuer enter → capture, wall stay → wall penalty, goal enter →
    /// goal. Other combinations are ignored.
    pub fn on_contact<W: ArenaWorld + ?Sized>(
        &mut self,
        contact: Contact,
        world: &W,
    ) -> Result<Option<f32>, AgentError> {
        match (contact.class, contact.phase) {
            (ColliderClass::Pursuer, ContactPhase::Enter) => Ok(self.on_captured_by_pursuer()),
            (ColliderClass::Wall, ContactPhase::Stay) => Ok(self.on_wall_contact()),
            (ColliderClass::Goal, ContactPhase::Enter) => self.on_goal_reached(world),
            _ => Ok(None),
        }
    }

    // ── Internals ──────────────────────────────────────────────

    fn require(&self, expected: EpisodePhase, operation: AgentOp) -> Result<(), AgentError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(AgentError::InvalidTransition {
                agent: self.id,
                operation,
                phase: self.phase,
            })
        }
    }

    fn accepts_events(&self, event: &'static str) -> bool {
        if self.phase == EpisodePhase::Running {
            return true;
        }
        tracing::trace!(agent = %self.id, event, "ignoring event while pending reset");
        false
    }

    fn emit(&mut self, reward: f32) {
        self.step_reward += reward;
        self.episode_reward += reward;
        tracing::debug!(agent = %self.id, reward, total = self.episode_reward, "reward");
    }

    fn sample_clear<W: ArenaWorld + ?Sized>(
        &mut self,
        world: &W,
        avoid: Vec2,
    ) -> Result<Vec2, AgentError> {
        let clearance = self.spawn_clearance;
        self.sampler
            .sample(
                &mut self.rng,
                &self.bounds,
                avoid,
                self.min_spawn_dist,
                |p| world.overlaps_wall(p, clearance),
            )
            .map_err(|source| AgentError::Spawn {
                agent: self.id,
                source,
            })
    }
}

impl EpisodeParticipant for AgentController {
    fn agent_id(&self) -> AgentId {
        self.id
    }

    fn attach_end_signal(&mut self, signal: EndSignal) {
        self.end_signal = signal;
    }

    fn end_episode(&mut self) {
        AgentController::end_episode(self);
    }

    fn begin_episode<W: ArenaWorld + ?Sized>(&mut self, world: &W) -> Result<(), AgentError> {
        let pursuer = world.pursuer_position(self.id);
        self.reset(world, pursuer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_test_utils::{BoxWorld, ScriptedWorld};

    fn config() -> ArenaConfig {
        ArenaConfig {
            seed: 9,
            ..ArenaConfig::default()
        }
    }

    fn running_agent(world: &ScriptedWorld) -> AgentController {
        let mut agent = AgentController::new(AgentId(0), &config());
        agent.reset(world, world.pursuer).unwrap();
        agent
    }

    #[test]
    fn new_agent_is_pending_reset() {
        let agent = AgentController::new(AgentId(4), &config());
        assert_eq!(agent.phase(), EpisodePhase::PendingReset);
        assert_eq!(agent.episode(), None);
        assert!(agent.state().facing_right);
    }

    #[test]
    fn reset_spawns_away_from_pursuer_and_goal_away_from_agent() {
        let world = ScriptedWorld::new(Vec2::new(1.0, 1.0));
        let cfg = config();
        for id in 0..50 {
            let mut agent = AgentController::new(AgentId(id), &cfg);
            agent.reset(&world, world.pursuer).unwrap();
            assert_eq!(agent.phase(), EpisodePhase::Running);
            assert!(cfg.bounds.contains(agent.position()));
            assert!(agent.position().distance(world.pursuer) >= cfg.min_spawn_dist);
            assert!(agent.goal().distance(agent.position()) >= cfg.min_spawn_dist);
        }
    }

    #[test]
    fn reset_while_running_is_rejected() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        match agent.reset(&world, world.pursuer) {
            Err(AgentError::InvalidTransition {
                operation: AgentOp::Reset,
                phase: EpisodePhase::Running,
                ..
            }) => {}
            other => panic!("expected InvalidTransition(Reset), got {other:?}"),
        }
    }

    #[test]
    fn reset_respects_wall_clearance() {
        let mut world = ScriptedWorld::new(Vec2::new(8.0, 0.0));
        world.blocked_below_x = Some(0.0);
        let mut agent = AgentController::new(AgentId(1), &config());
        for _ in 0..20 {
            agent.reset(&world, world.pursuer).unwrap();
            assert!(agent.position().x - 0.8 >= 0.0, "{}", agent.position());
            agent.end_episode();
        }
    }

    #[test]
    fn failed_spawn_leaves_agent_pending() {
        let mut world = ScriptedWorld::new(Vec2::ZERO);
        world.blocked_below_x = Some(f32::INFINITY);
        let cfg = ArenaConfig {
            spawn_max_attempts: 32,
            ..config()
        };
        let mut agent = AgentController::new(AgentId(0), &cfg);
        match agent.reset(&world, world.pursuer) {
            Err(AgentError::Spawn { source, .. }) => {
                assert_eq!(source, pursuit_core::SampleError::Exhausted { attempts: 32 });
            }
            other => panic!("expected Spawn, got {other:?}"),
        }
        assert_eq!(agent.phase(), EpisodePhase::PendingReset);
        assert_eq!(agent.episode(), None);
    }

    #[test]
    fn same_seed_same_spawns() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut a = AgentController::new(AgentId(2), &config());
        let mut b = AgentController::new(AgentId(2), &config());
        for _ in 0..10 {
            a.reset(&world, world.pursuer).unwrap();
            b.reset(&world, world.pursuer).unwrap();
            assert_eq!(a.position(), b.position());
            assert_eq!(a.goal(), b.goal());
            a.end_episode();
            b.end_episode();
        }
    }

    #[test]
    fn different_agents_spawn_differently() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut a = AgentController::new(AgentId(0), &config());
        let mut b = AgentController::new(AgentId(1), &config());
        a.reset(&world, world.pursuer).unwrap();
        b.reset(&world, world.pursuer).unwrap();
        assert_ne!(a.position(), b.position());
    }

    #[test]
    fn observation_layout_and_length() {
        let mut world = ScriptedWorld::new(Vec2::new(-3.0, 2.0));
        world.ray_hit = Some(4.5);
        let agent = running_agent(&world);
        let obs = agent.observe(&world, world.pursuer).unwrap();
        assert_eq!(obs.len(), 6 + 8);
        assert_eq!(obs.len(), agent.observation_len());
        assert_eq!(&obs[0..2], &[agent.position().x, agent.position().y]);
        assert_eq!(&obs[2..4], &[-3.0, 2.0]);
        assert_eq!(&obs[4..6], &[agent.goal().x, agent.goal().y]);
        assert!(obs[6..].iter().all(|&d| d == 4.5));
        assert!(obs.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn observation_misses_report_max_range() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let agent = running_agent(&world);
        let obs = agent.observe(&world, world.pursuer).unwrap();
        assert!(obs[6..].iter().all(|&d| d == 20.0));
    }

    #[test]
    fn observe_pending_reset_is_rejected() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let agent = AgentController::new(AgentId(0), &config());
        assert!(matches!(
            agent.observe(&world, world.pursuer),
            Err(AgentError::InvalidTransition {
                operation: AgentOp::Observe,
                ..
            })
        ));
    }

    #[test]
    fn act_moves_by_speed_times_dt() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        let start = agent.position();
        agent.act(Vec2::new(1.0, -0.5), 0.1).unwrap();
        let moved = agent.position() - start;
        assert!((moved.x - 0.5).abs() < 1e-5);
        assert!((moved.y + 0.25).abs() < 1e-5);
        assert!((agent.state().time_since_reset - 0.1).abs() < 1e-6);
        assert!((agent.state().time_since_goal - 0.1).abs() < 1e-6);
    }

    #[test]
    fn act_pending_reset_is_rejected_without_moving() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        agent.on_captured_by_pursuer();
        let before = *agent.state();
        match agent.act(Vec2::new(1.0, 1.0), 0.02) {
            Err(AgentError::InvalidTransition {
                operation: AgentOp::Act,
                phase: EpisodePhase::PendingReset,
                ..
            }) => {}
            other => panic!("expected InvalidTransition(Act), got {other:?}"),
        }
        assert_eq!(*agent.state(), before);
    }

    #[test]
    fn act_rejects_non_finite_action() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        let before = *agent.state();
        assert_eq!(
            agent.act(Vec2::new(f32::NAN, 0.0), 0.02),
            Err(AgentError::NonFiniteAction { agent: AgentId(0) })
        );
        assert_eq!(*agent.state(), before);
    }

    #[test]
    fn facing_flips_only_on_sign_change() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        assert!(agent.state().facing_right);

        agent.act(Vec2::new(1.0, 0.0), 0.02).unwrap();
        agent.act(Vec2::new(0.0, 1.0), 0.02).unwrap();
        assert!(agent.drain_signals().is_empty());

        agent.act(Vec2::new(-0.3, 0.0), 0.02).unwrap();
        agent.act(Vec2::new(-1.0, 0.0), 0.02).unwrap();
        agent.act(Vec2::new(0.0, 0.0), 0.02).unwrap();
        agent.act(Vec2::new(2.0, 0.0), 0.02).unwrap();
        assert_eq!(
            agent.drain_signals(),
            vec![
                PresentationSignal::FacingFlipped {
                    facing_right: false
                },
                PresentationSignal::FacingFlipped { facing_right: true },
            ]
        );
    }

    #[test]
    fn facing_survives_reset() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        agent.act(Vec2::new(-1.0, 0.0), 0.02).unwrap();
        agent.end_episode();
        agent.reset(&world, world.pursuer).unwrap();
        assert!(!agent.state().facing_right);
    }

    #[test]
    fn capture_rewards_requests_end_and_pends() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        for _ in 0..500 {
            agent.act(Vec2::ZERO, 0.02).unwrap();
        }
        let reward = agent.on_captured_by_pursuer().unwrap();
        assert!((reward + 110.0).abs() < 1e-2, "reward {reward}");
        assert!(agent.end_signal().is_pending());
        assert_eq!(agent.phase(), EpisodePhase::PendingReset);
        assert_eq!(agent.take_step_reward(), reward);
        assert_eq!(agent.take_step_reward(), 0.0);
    }

    #[test]
    fn events_after_capture_are_ignored() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        agent.on_captured_by_pursuer();
        let total = agent.episode_reward();
        assert_eq!(agent.on_wall_contact(), None);
        assert_eq!(agent.on_captured_by_pursuer(), None);
        assert_eq!(agent.on_goal_reached(&world), Ok(None));
        assert_eq!(agent.episode_reward(), total);
    }

    #[test]
    fn wall_contact_accumulates_per_tick() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        for _ in 0..3 {
            assert_eq!(agent.on_wall_contact(), Some(-0.1));
        }
        assert!((agent.take_step_reward() + 0.3).abs() < 1e-6);
        assert!((agent.episode_reward() + 0.3).abs() < 1e-6);
    }

    #[test]
    fn goal_rewards_moves_goal_and_resets_goal_timer() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        for _ in 0..250 {
            agent.act(Vec2::ZERO, 0.02).unwrap();
        }
        let old_goal = agent.goal();
        let reward = agent.on_goal_reached(&world).unwrap().unwrap();
        assert!((reward - 70.0).abs() < 1e-2, "reward {reward}");
        assert_ne!(agent.goal(), old_goal);
        assert!(agent.goal().distance(agent.position()) >= 5.0);
        assert_eq!(agent.state().time_since_goal, 0.0);
        assert!(agent.state().time_since_reset > 4.9);
        assert_eq!(agent.phase(), EpisodePhase::Running);
    }

    #[test]
    fn failed_goal_placement_commits_nothing() {
        let mut world = ScriptedWorld::new(Vec2::ZERO);
        let cfg = ArenaConfig {
            spawn_max_attempts: 16,
            ..config()
        };
        let mut agent = AgentController::new(AgentId(0), &cfg);
        agent.reset(&world, world.pursuer).unwrap();
        agent.act(Vec2::ZERO, 0.02).unwrap();
        let goal = agent.goal();
        let before = *agent.state();

        world.blocked_below_x = Some(f32::INFINITY);
        match agent.on_goal_reached(&world) {
            Err(AgentError::Spawn { source, .. }) => {
                assert_eq!(source, pursuit_core::SampleError::Exhausted { attempts: 16 });
            }
            other => panic!("expected Spawn, got {other:?}"),
        }
        assert_eq!(agent.goal(), goal);
        assert_eq!(*agent.state(), before);
        assert_eq!(agent.episode_reward(), 0.0);
        assert_eq!(agent.take_step_reward(), 0.0);
        assert!(agent.drain_signals().is_empty());

        world.blocked_below_x = None;
        assert!(agent.on_goal_reached(&world).unwrap().is_some());
        assert_eq!(agent.state().goals_reached, 1);
    }

    #[test]
    fn capture_signal_is_shared_only_after_registration() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        assert!(!agent.end_signal().is_shared());
        agent.on_captured_by_pursuer();
        assert!(agent.end_signal().is_pending());

        let mut coord = crate::EpisodeCoordinator::new();
        let mut registered = AgentController::new(AgentId(1), &config());
        coord.register(&mut registered).unwrap();
        assert!(registered.end_signal().is_shared());
    }

    #[test]
    fn win_fires_once_per_crossing() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        agent.on_goal_reached(&world).unwrap();
        assert!(agent.drain_signals().is_empty());
        agent.on_goal_reached(&world).unwrap();
        assert_eq!(agent.drain_signals(), vec![PresentationSignal::Won]);
        agent.on_goal_reached(&world).unwrap();
        assert!(agent.drain_signals().is_empty());
        assert_eq!(agent.state().goals_reached, 3);

        // A fresh episode re-arms the signal.
        agent.end_episode();
        agent.reset(&world, world.pursuer).unwrap();
        agent.on_goal_reached(&world).unwrap();
        agent.on_goal_reached(&world).unwrap();
        assert_eq!(agent.drain_signals(), vec![PresentationSignal::Won]);
    }

    #[test]
    fn contact_dispatch_matches_class_and_phase() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        let ignored = [
            Contact::new(ColliderClass::Wall, ContactPhase::Enter),
            Contact::new(ColliderClass::Goal, ContactPhase::Stay),
            Contact::new(ColliderClass::Pursuer, ContactPhase::Stay),
            Contact::new(ColliderClass::Other, ContactPhase::Enter),
        ];
        for contact in ignored {
            assert_eq!(agent.on_contact(contact, &world), Ok(None), "{contact:?}");
        }
        let wall = Contact::new(ColliderClass::Wall, ContactPhase::Stay);
        assert_eq!(agent.on_contact(wall, &world), Ok(Some(-0.1)));
        let goal = Contact::new(ColliderClass::Goal, ContactPhase::Enter);
        assert!(agent.on_contact(goal, &world).unwrap().unwrap() > 50.0);
        let pursuer = Contact::new(ColliderClass::Pursuer, ContactPhase::Enter);
        assert!(agent.on_contact(pursuer, &world).unwrap().unwrap() < -100.0);
        assert_eq!(agent.phase(), EpisodePhase::PendingReset);
    }

    #[test]
    fn reset_clears_episode_totals_but_not_step_reward() {
        let world = ScriptedWorld::new(Vec2::ZERO);
        let mut agent = running_agent(&world);
        let reward = agent.on_captured_by_pursuer().unwrap();
        agent.reset(&world, world.pursuer).unwrap();
        assert_eq!(agent.episode_reward(), 0.0);
        assert_eq!(agent.state().goals_reached, 0);
        assert_eq!(agent.state().time_since_reset, 0.0);
        assert_eq!(agent.take_step_reward(), reward);
        assert_eq!(agent.episode(), Some(EpisodeId(1)));
    }

    #[test]
    fn box_world_rays_feed_observation() {
        let bounds = Bounds::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0)).unwrap();
        let world = BoxWorld::walled(&bounds, 1.0);
        let cfg = ArenaConfig {
            bounds,
            ..config()
        };
        let mut agent = AgentController::new(AgentId(0), &cfg);
        agent.reset(&world, world.pursuer_position(AgentId(0))).unwrap();
        let obs = agent.observe(&world, Vec2::ZERO).unwrap();
        // First ray points up; the top wall starts at y = 10.
        let expected_up = 10.0 - agent.position().y;
        assert!((obs[6] - expected_up).abs() < 1e-4, "{} vs {expected_up}", obs[6]);
    }
}
