//! Benchmark profiles and utilities for the Pursuit arena.
//!
//! Provides pre-built configurations and worlds for benchmarks and
//! examples:
//!
//! - [`reference_profile`]: 20×20 arena, 8 rays, default rewards
//! - [`stress_profile`]: 100×100 arena, 64 rays
//! - [`reference_world`]: walled box with four pillars
//! - [`chase`]: move every pursuer one step toward its runner
//! - [`scripted_actions`]: deterministic per-tick actions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pursuit_core::{AgentId, ArenaWorld, Bounds, Vec2};
use pursuit_engine::{ArenaConfig, LockstepArena};
use pursuit_space::RadialSensor;
use pursuit_test_utils::{Aabb, BoxWorld};

fn square(half_extent: f32) -> Bounds {
    Bounds::new(
        Vec2::new(-half_extent, -half_extent),
        Vec2::new(half_extent, half_extent),
    )
    .expect("static bounds are valid")
}

/// Build the reference profile: 20×20 arena with the default sensor.
pub fn reference_profile(seed: u64) -> ArenaConfig {
    ArenaConfig {
        bounds: square(10.0),
        seed,
        ..ArenaConfig::default()
    }
}

/// Build the stress profile: 100×100 arena with a 64-ray sensor.
///
/// Same rewards and timing as [`reference_profile`].
pub fn stress_profile(seed: u64) -> ArenaConfig {
    ArenaConfig {
        bounds: square(50.0),
        sensor: RadialSensor {
            ray_count: 64,
            max_range: 40.0,
            ..RadialSensor::default()
        },
        seed,
        ..ArenaConfig::default()
    }
}

/// A walled box around `config.bounds` with one pillar in each quadrant.
pub fn reference_world(config: &ArenaConfig) -> BoxWorld {
    let bounds = &config.bounds;
    let c = bounds.center();
    let q = Vec2::new(bounds.width() * 0.25, bounds.height() * 0.25);
    let half = Vec2::new(bounds.width() * 0.03, bounds.height() * 0.03);
    let mut world = BoxWorld::walled(bounds, 1.0);
    for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        let centre = c + Vec2::new(q.x * sx, q.y * sy);
        world.walls.push(Aabb::new(centre - half, centre + half));
    }
    world
}

/// Move each runner's pursuer up to `step` units toward it.
pub fn chase(arena: &mut LockstepArena<BoxWorld>, step: f32) {
    let targets: Vec<(AgentId, Vec2)> = arena
        .runners()
        .map(|r| (r.id(), r.position()))
        .collect();
    let world = arena.world_mut();
    for (id, target) in targets {
        let from = world.pursuer_position(id);
        let delta = target - from;
        let next = match delta.normalized() {
            Some(dir) if delta.length() > step => from + dir * step,
            _ => target,
        };
        world.set_pursuer(id, next);
    }
}

/// Deterministic actions for `runners` agents at `tick`.
///
/// Each runner sweeps a slowly rotating heading, phase-shifted by its
/// index, so runs are reproducible without an RNG.
pub fn scripted_actions(tick: u64, runners: usize) -> Vec<(f32, f32)> {
    (0..runners)
        .map(|i| {
            let angle = tick as f32 * 0.05 + i as f32 * 1.7;
            (angle.cos(), angle.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(1).validate().is_ok());
        assert!(stress_profile(1).validate().is_ok());
    }

    #[test]
    fn reference_world_has_perimeter_and_pillars() {
        let cfg = reference_profile(0);
        let world = reference_world(&cfg);
        assert_eq!(world.walls.len(), 8);
        assert!(world.overlaps_wall(Vec2::new(5.0, 5.0), 0.1));
        assert!(!world.overlaps_wall(Vec2::ZERO, 0.5));
    }

    #[test]
    fn chase_closes_distance() {
        let cfg = reference_profile(3);
        let world = reference_world(&cfg);
        let mut arena = LockstepArena::new(cfg, world, 1).unwrap();
        let id = AgentId(0);
        let before = arena
            .world()
            .pursuer_position(id)
            .distance(arena.runner(id).unwrap().position());
        chase(&mut arena, 0.5);
        let after = arena
            .world()
            .pursuer_position(id)
            .distance(arena.runner(id).unwrap().position());
        assert!((before - after - 0.5).abs() < 1e-4);
    }

    #[test]
    fn scripted_actions_are_unit_length() {
        for (x, y) in scripted_actions(17, 4) {
            assert!(((x * x + y * y).sqrt() - 1.0).abs() < 1e-5);
        }
    }
}
