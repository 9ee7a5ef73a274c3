//! Collider classification and contact events delivered by the physics
//! collaborator.

use smallvec::SmallVec;

/// Category of the body an agent touched.
///
/// Resolved once by the world collaborator; the agent dispatches on the
/// variant instead of comparing tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColliderClass {
    /// The pursuing agent.
    Pursuer,
    /// A static wall obstacle.
    Wall,
    /// The goal trigger region.
    Goal,
    /// Anything else. Ignored by the runner.
    Other,
}

/// Whether a contact just started or is persisting from a previous tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    /// First tick of overlap (collision or trigger enter).
    Enter,
    /// Overlap persisting from an earlier tick.
    Stay,
}

/// A single contact event for one agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Contact {
    /// What was touched.
    pub class: ColliderClass,
    /// Enter or stay.
    pub phase: ContactPhase,
}

impl Contact {
    /// Create a contact event.
    pub const fn new(class: ColliderClass, phase: ContactPhase) -> Self {
        Self { class, phase }
    }
}

/// Per-tick contact buffer.
///
/// Inline capacity covers the usual pursuer + wall + goal case without
/// heap allocation.
pub type ContactBuf = SmallVec<[Contact; 4]>;
