//! End-to-end lockstep chase example.
//!
//! Demonstrates: build config → LockstepArena → move pursuers → step with
//! scripted actions → read rewards and episode boundaries → reset → repeat.

use pursuit_bench::{chase, reference_profile, reference_world, scripted_actions};
use pursuit_engine::{LockstepArena, PresentationSignal};

const RUNNERS: usize = 3;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Pursuit Lockstep Chase Example ===\n");

    let config = reference_profile(42);
    let world = reference_world(&config);
    let mut arena = LockstepArena::new(config, world, RUNNERS as u32).unwrap();

    // --- Phase 1: pursuers chase scripted runners ---
    println!("Phase 1: 2000 ticks, pursuers at 3 units/s");
    let mut episodes = 0;
    let mut wins = 0;
    for tick in 0..2000u64 {
        chase(&mut arena, 0.06);
        let result = arena.step(&scripted_actions(tick, RUNNERS)).unwrap();

        wins += result
            .signals
            .iter()
            .filter(|(_, s)| *s == PresentationSignal::Won)
            .count();

        if result.episode_ended {
            episodes += 1;
            let returns: Vec<String> = result
                .episode_returns
                .iter()
                .map(|(id, r)| format!("{id}:{r:>9.2}"))
                .collect();
            println!(
                "  tick {:>4}: episode {:>2} ended ({}) returns [{}] time={:>5}μs",
                result.tick.0,
                episodes,
                if result.truncated { "truncated" } else { "capture" },
                returns.join(", "),
                result.metrics.total_us,
            );
        }
    }
    println!("  {episodes} episodes, {wins} wins");

    // --- Reset and Phase 2 ---
    println!("\nResetting arena...");
    let obs = arena.reset().unwrap();
    for (id, o) in &obs {
        println!(
            "  runner {id}: pos=({:>6.2}, {:>6.2}) goal=({:>6.2}, {:>6.2}) rays={:?}",
            o[0],
            o[1],
            o[4],
            o[5],
            &o[6..]
        );
    }

    println!("\nPhase 2: 200 ticks standing still (no chase)");
    let idle = vec![(0.0, 0.0); RUNNERS];
    let mut total = 0.0f32;
    for _ in 0..200 {
        let result = arena.step(&idle).unwrap();
        total += result.rewards.iter().map(|(_, r)| r).sum::<f32>();
    }
    println!("  total reward while idle: {total:.3}");
    println!("  last tick: {:?}", arena.last_metrics());

    println!("\nDone.");
}
