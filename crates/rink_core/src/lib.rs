//! # rink_core - Deterministic 5-a-side Hockey Gameplay Core
//!
//! This library is the real-time multi-agent gameplay core of a team
//! hockey simulation: per-tick behavior selection for the ten on-ice
//! skaters, timed skill checks for shots / saucer passes / body checks,
//! formation targeting, and single-authority arbitration over the puck.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + same intents = same match)
//! - Fixed 50ms tick, no I/O, no background work
//! - Anti-swarm agent arbitration: one pursuer per contested target
//! - Collaborator boundaries as data: intents in, events/snapshots out
//!
//! Rendering, input devices, audio, match bookkeeping and asset data are
//! external collaborators; they interact through [`engine::SkaterIntent`],
//! [`engine::SimEvent`] and [`engine::TickSnapshot`] only.

pub mod engine;
pub mod error;

pub use engine::{
    Behavior, ChargeOutcome, ChargeTimer, ChargeTiming, ChargeZone, Command, Control,
    DefensiveScheme, DifficultyTier, EngineConfig, MatchPhase, RinkEngine, Role, SimEvent,
    SkaterIntent, SkaterProfile, TeamSide, TickSnapshot,
};
pub use error::{ConfigError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rink;

    #[test]
    fn test_full_match_segment_runs_clean() {
        let mut engine = RinkEngine::new(EngineConfig::default(), 42).expect("engine init");
        engine.reset_positions(rink::CENTER);

        // A minute of unattended play: both benches on CPU
        let mut possession_changes = 0;
        for _ in 0..1200 {
            engine.tick(&[]);
            for event in engine.take_events() {
                if matches!(event, SimEvent::PossessionGained { .. }) {
                    possession_changes += 1;
                }
                if matches!(event, SimEvent::GoalScored { .. }) {
                    // Match-flow collaborator restarts play
                    engine.reset_positions(rink::CENTER);
                }
            }

            let snap = engine.snapshot();
            // Everyone stays on the ice surface
            for skater in &snap.skaters {
                assert!(skater.position.0 >= 0.0 && skater.position.0 <= rink::LENGTH_M);
                assert!(skater.position.1 >= 0.0 && skater.position.1 <= rink::WIDTH_M);
            }
            // At most one attachment, every tick
            assert!(snap.skaters.iter().filter(|s| s.has_puck).count() <= 1);
        }
        assert!(possession_changes > 0, "the puck should change hands in a minute of play");
    }

    #[test]
    fn test_determinism_across_identical_runs() {
        let run = |seed: u64| {
            let mut engine = RinkEngine::new(EngineConfig::default(), seed).expect("engine init");
            engine.reset_positions(rink::CENTER);
            let mut events = Vec::new();
            for _ in 0..800 {
                engine.tick(&[]);
                events.extend(engine.take_events());
            }
            (serde_json::to_string(&engine.snapshot()).unwrap(), events.len())
        };

        assert_eq!(run(7), run(7), "same seed should produce identical matches");
    }

    #[test]
    fn test_difficulty_changes_pace_not_rules() {
        let run = |tier: DifficultyTier| {
            let mut engine = RinkEngine::new(EngineConfig::default(), 5).expect("engine init");
            engine.set_difficulty(TeamSide::Home, tier);
            engine.set_difficulty(TeamSide::Away, tier);
            engine.reset_positions(rink::CENTER);
            for _ in 0..100 {
                engine.tick(&[]);
            }
            engine.snapshot()
        };

        // Tiers change scalars, never the priority rules: both tiers still
        // produce a legal simulation with at most one attachment.
        for snap in [run(DifficultyTier::Rookie), run(DifficultyTier::AllStar)] {
            assert!(snap.skaters.iter().filter(|s| s.has_puck).count() <= 1);
        }
    }
}
