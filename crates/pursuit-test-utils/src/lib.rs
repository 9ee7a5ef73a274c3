//! Test utilities and mock worlds for Pursuit development.
//!
//! Provides two [`ArenaWorld`] implementations:
//!
//! - [`BoxWorld`]: axis-aligned rectangular walls with real overlap and
//!   ray geometry, circular pursuer and goal colliders.
//! - [`ScriptedWorld`]: no geometry; contacts are queued by the test and
//!   delivered on the next query.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::collections::HashMap;

use pursuit_core::{
    AgentId, ArenaWorld, Bounds, ColliderClass, Contact, ContactBuf, ContactPhase, Vec2,
};

/// Axis-aligned box obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// True if the circle at `center` with `radius` touches the box.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let nearest = Vec2::new(
            center.x.clamp(self.min.x, self.max.x),
            center.y.clamp(self.min.y, self.max.y),
        );
        nearest.distance(center) <= radius
    }

    /// Slab-method ray intersection. Returns the entry distance along
    /// unit `dir`, `Some(0.0)` when `origin` is inside the box.
    pub fn ray_hit(&self, origin: Vec2, dir: Vec2) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;
        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
        ] {
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
            } else {
                let inv = 1.0 / d;
                let (t0, t1) = {
                    let a = (lo - o) * inv;
                    let b = (hi - o) * inv;
                    if a <= b {
                        (a, b)
                    } else {
                        (b, a)
                    }
                };
                t_min = t_min.max(t0);
                t_max = t_max.min(t1);
                if t_min > t_max {
                    return None;
                }
            }
        }
        Some(t_min)
    }
}

/// A world of rectangular walls with circular pursuer and goal colliders.
///
/// Contacts carry fixed phases: pursuer touches are reported as
/// [`ContactPhase::Enter`], wall overlaps as [`ContactPhase::Stay`] on
/// every tick they persist, and goal overlaps as `Enter` (the runner
/// relocates its goal immediately).
#[derive(Clone, Debug)]
pub struct BoxWorld {
    pub walls: Vec<Aabb>,
    pub agent_radius: f32,
    pub pursuer_radius: f32,
    pub goal_radius: f32,
    default_pursuer: Vec2,
    pursuers: HashMap<AgentId, Vec2>,
}

impl BoxWorld {
    /// An empty world with the pursuer parked at `default_pursuer`.
    pub fn new(default_pursuer: Vec2) -> Self {
        Self {
            walls: Vec::new(),
            agent_radius: 0.5,
            pursuer_radius: 0.5,
            goal_radius: 0.5,
            default_pursuer,
            pursuers: HashMap::new(),
        }
    }

    /// Four walls of the given `thickness` enclosing `bounds`, pursuer
    /// parked at the centre.
    pub fn walled(bounds: &Bounds, thickness: f32) -> Self {
        let lo = bounds.bottom_left();
        let hi = bounds.top_right();
        let t = thickness;
        let mut world = Self::new(bounds.center());
        world.walls.extend([
            // bottom, top, left, right
            Aabb::new(Vec2::new(lo.x - t, lo.y - t), Vec2::new(hi.x + t, lo.y)),
            Aabb::new(Vec2::new(lo.x - t, hi.y), Vec2::new(hi.x + t, hi.y + t)),
            Aabb::new(Vec2::new(lo.x - t, lo.y), Vec2::new(lo.x, hi.y)),
            Aabb::new(Vec2::new(hi.x, lo.y), Vec2::new(hi.x + t, hi.y)),
        ]);
        world
    }

    pub fn with_wall(mut self, wall: Aabb) -> Self {
        self.walls.push(wall);
        self
    }

    /// Place the pursuer chasing `agent`.
    pub fn set_pursuer(&mut self, agent: AgentId, position: Vec2) {
        self.pursuers.insert(agent, position);
    }
}

impl ArenaWorld for BoxWorld {
    fn overlaps_wall(&self, center: Vec2, radius: f32) -> bool {
        self.walls.iter().any(|w| w.overlaps_circle(center, radius))
    }

    fn cast_ray(&self, origin: Vec2, direction: Vec2, max_range: f32) -> Option<f32> {
        self.walls
            .iter()
            .filter_map(|w| w.ray_hit(origin, direction))
            .filter(|&t| t <= max_range)
            .min_by(f32::total_cmp)
    }

    fn pursuer_position(&self, agent: AgentId) -> Vec2 {
        self.pursuers
            .get(&agent)
            .copied()
            .unwrap_or(self.default_pursuer)
    }

    fn contacts(&self, agent: AgentId, position: Vec2, goal: Vec2, out: &mut ContactBuf) {
        let capture_radius = self.agent_radius + self.pursuer_radius;
        if position.distance(self.pursuer_position(agent)) <= capture_radius {
            out.push(Contact::new(ColliderClass::Pursuer, ContactPhase::Enter));
        }
        if self.overlaps_wall(position, self.agent_radius) {
            out.push(Contact::new(ColliderClass::Wall, ContactPhase::Stay));
        }
        if position.distance(goal) <= self.agent_radius + self.goal_radius {
            out.push(Contact::new(ColliderClass::Goal, ContactPhase::Enter));
        }
    }
}

/// A geometry-free world driven entirely by the test.
///
/// Every ray reports `ray_hit`, nothing blocks spawning unless
/// `blocked_below_x` is set, and contacts queued with
/// [`push_contact`](ScriptedWorld::push_contact) are delivered (and
/// drained) on the next [`ArenaWorld::contacts`] call for that agent.
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    pub pursuer: Vec2,
    pub ray_hit: Option<f32>,
    /// Treat every point with `x` below this value as inside a wall.
    pub blocked_below_x: Option<f32>,
    pending: RefCell<HashMap<AgentId, Vec<Contact>>>,
}

impl ScriptedWorld {
    pub fn new(pursuer: Vec2) -> Self {
        Self {
            pursuer,
            ..Self::default()
        }
    }

    /// Queue a contact for `agent`'s next contact query.
    pub fn push_contact(&self, agent: AgentId, class: ColliderClass, phase: ContactPhase) {
        self.pending
            .borrow_mut()
            .entry(agent)
            .or_default()
            .push(Contact::new(class, phase));
    }

    /// Number of contacts still queued for `agent`.
    pub fn pending_for(&self, agent: AgentId) -> usize {
        self.pending.borrow().get(&agent).map_or(0, Vec::len)
    }
}

impl ArenaWorld for ScriptedWorld {
    fn overlaps_wall(&self, center: Vec2, radius: f32) -> bool {
        self.blocked_below_x.is_some_and(|limit| center.x - radius < limit)
    }

    fn cast_ray(&self, _origin: Vec2, _direction: Vec2, _max_range: f32) -> Option<f32> {
        self.ray_hit
    }

    fn pursuer_position(&self, _agent: AgentId) -> Vec2 {
        self.pursuer
    }

    fn contacts(&self, agent: AgentId, _position: Vec2, _goal: Vec2, out: &mut ContactBuf) {
        if let Some(queued) = self.pending.borrow_mut().get_mut(&agent) {
            out.extend(queued.drain(..));
        }
    }
}
