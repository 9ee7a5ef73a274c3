//! Per-tick counters for the lockstep arena.
//!
//! [`StepMetrics`] captures timing and event counts for a single tick,
//! enabling telemetry and training-loop diagnostics.

/// Timing and event counts collected during a single tick.
///
/// Durations are in microseconds. Counts cover contacts dispatched this
/// tick, including those ignored because the agent was already pending
/// reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent in the end-of-tick episode flush, in microseconds.
    pub flush_us: u64,
    /// Captures that ended an agent's episode.
    pub captures: u32,
    /// Goals collected.
    pub goals: u32,
    /// Wall-contact penalties applied.
    pub wall_contacts: u32,
    /// Contacts that produced no reward.
    pub ignored_contacts: u32,
    /// Agents reset by the flush (zero when no episode ended).
    pub resets: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.flush_us, 0);
        assert_eq!(m.captures, 0);
        assert_eq!(m.goals, 0);
        assert_eq!(m.wall_contacts, 0);
        assert_eq!(m.ignored_contacts, 0);
        assert_eq!(m.resets, 0);
    }
}
