//! The world collaborator consumed by the simulation core.

use crate::contact::ContactBuf;
use crate::geometry::Vec2;
use crate::id::AgentId;

/// Physics/world queries the runner core depends on.
///
/// The core never detects geometry itself. It asks the world whether a
/// spawn point is clear of walls, how far a sensing ray travels, where
/// the pursuer is, and which contacts an agent has this tick.
pub trait ArenaWorld {
    /// True if any wall obstacle overlaps the circle at `center` with
    /// the given `radius`.
    fn overlaps_wall(&self, center: Vec2, radius: f32) -> bool;

    /// Distance from `origin` along unit `direction` to the nearest
    /// sensed obstacle, or `None` if nothing lies within `max_range`.
    fn cast_ray(&self, origin: Vec2, direction: Vec2, max_range: f32) -> Option<f32>;

    /// Current position of the pursuer chasing `agent`.
    fn pursuer_position(&self, agent: AgentId) -> Vec2;

    /// Contacts for `agent` located at `position` whose goal token sits
    /// at `goal`, appended to `out` in delivery order.
    fn contacts(&self, agent: AgentId, position: Vec2, goal: Vec2, out: &mut ContactBuf);
}

impl<W: ArenaWorld + ?Sized> ArenaWorld for &W {
    fn overlaps_wall(&self, center: Vec2, radius: f32) -> bool {
        (**self).overlaps_wall(center, radius)
    }

    fn cast_ray(&self, origin: Vec2, direction: Vec2, max_range: f32) -> Option<f32> {
        (**self).cast_ray(origin, direction, max_range)
    }

    fn pursuer_position(&self, agent: AgentId) -> Vec2 {
        (**self).pursuer_position(agent)
    }

    fn contacts(&self, agent: AgentId, position: Vec2, goal: Vec2, out: &mut ContactBuf) {
        (**self).contacts(agent, position, goal, out)
    }
}
