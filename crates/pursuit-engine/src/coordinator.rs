//! Episode-boundary coordination across agents.
//!
//! Any agent may request an episode end at any point in a tick; the
//! [`EpisodeCoordinator`] batches those requests behind one pending flag
//! and applies them in a single [`flush`](EpisodeCoordinator::flush) at
//! the end of the tick. Every registered agent is then ended and reset
//! together, in registration order, exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use pursuit_core::{AgentError, AgentId, ArenaWorld, EpisodeError};

/// Shared "episode must end" flag.
///
/// Cloned into every registered agent. Setting it from any clone is
/// visible to the coordinator at the next flush.
#[derive(Clone, Debug, Default)]
pub struct EndSignal(Arc<AtomicBool>);

impl EndSignal {
    fn armed() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Request that the current episode end at the next flush. Idempotent.
    pub fn request_end(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// True if an end has been requested and not yet flushed.
    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// True if another handle (normally the coordinator's) observes this
    /// signal.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.0) > 1
    }

    fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Something the coordinator can end and restart.
///
/// Implemented by [`AgentController`](crate::AgentController); tests
/// substitute counting fakes.
pub trait EpisodeParticipant {
    /// Stable id used for registration.
    fn agent_id(&self) -> AgentId;

    /// Receive the coordinator's end signal on registration.
    fn attach_end_signal(&mut self, signal: EndSignal);

    /// Force-end the current episode.
    fn end_episode(&mut self);

    /// Start a fresh episode in `world`.
    fn begin_episode<W: ArenaWorld + ?Sized>(&mut self, world: &W) -> Result<(), AgentError>;
}

/// Batches episode-end requests and resets all agents together.
///
/// Holds agent ids only. The agents themselves are handed to
/// [`flush`](Self::flush) by whoever owns them.
///
/// A fresh coordinator starts with the pending flag set, so its first
/// flush seeds every registered agent.
#[derive(Debug)]
pub struct EpisodeCoordinator {
    registry: IndexSet<AgentId>,
    signal: EndSignal,
    flushes: u64,
}

impl Default for EpisodeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeCoordinator {
    /// Create an empty coordinator with the pending flag set.
    pub fn new() -> Self {
        Self {
            registry: IndexSet::new(),
            signal: EndSignal::armed(),
            flushes: 0,
        }
    }

    /// Register `agent` and hand it the shared end signal.
    ///
    /// # Errors
    ///
    /// [`EpisodeError::DuplicateAgent`] if the id is already registered.
    pub fn register<P: EpisodeParticipant + ?Sized>(
        &mut self,
        agent: &mut P,
    ) -> Result<(), EpisodeError> {
        let id = agent.agent_id();
        if !self.registry.insert(id) {
            return Err(EpisodeError::DuplicateAgent(id));
        }
        agent.attach_end_signal(self.signal.clone());
        Ok(())
    }

    /// Request an episode end at the next flush. Idempotent.
    pub fn request_end(&self) {
        self.signal.request_end();
    }

    /// True if an end has been requested and not yet flushed.
    pub fn is_pending(&self) -> bool {
        self.signal.is_pending()
    }

    /// A clone of the shared end signal.
    pub fn end_signal(&self) -> EndSignal {
        self.signal.clone()
    }

    /// Registered ids in registration order.
    pub fn registered(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.registry.iter().copied()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True if no agent is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of flushes that ended an episode.
    pub fn episodes_flushed(&self) -> u64 {
        self.flushes
    }

    /// Apply a pending end: `end_episode()` then `begin_episode()` on
    /// every registered agent, in registration order.
    ///
    /// Returns `true` if an episode boundary happened, `false` if nothing
    /// was pending. The flag is cleared before any agent is touched, so
    /// an end requested during a reset waits for the next flush.
    ///
    /// # Errors
    ///
    /// [`EpisodeError::UnknownAgent`] if a registered id is missing from
    /// `roster` (checked before any agent is reset), and
    /// [`EpisodeError::Agent`] if a reset fails. Agents after the failing
    /// one stay pending reset and the flag is set again, so the next
    /// flush restarts the whole cohort.
    pub fn flush<P, W>(
        &mut self,
        roster: &mut IndexMap<AgentId, P>,
        world: &W,
    ) -> Result<bool, EpisodeError>
    where
        P: EpisodeParticipant,
        W: ArenaWorld + ?Sized,
    {
        if !self.signal.is_pending() {
            return Ok(false);
        }
        if let Some(missing) = self.registry.iter().find(|id| !roster.contains_key(*id)) {
            return Err(EpisodeError::UnknownAgent(*missing));
        }
        self.signal.take();
        for id in &self.registry {
            if let Some(agent) = roster.get_mut(id) {
                agent.end_episode();
            }
        }
        for id in &self.registry {
            if let Some(agent) = roster.get_mut(id) {
                if let Err(e) = agent.begin_episode(world) {
                    self.signal.request_end();
                    tracing::warn!(
                        agent = %id,
                        error = %e,
                        "episode reset failed; flush re-armed"
                    );
                    return Err(e.into());
                }
            }
        }
        self.flushes += 1;
        tracing::info!(
            episode = self.flushes,
            agents = self.registry.len(),
            "episode boundary flushed"
        );
        Ok(true)
    }
}
