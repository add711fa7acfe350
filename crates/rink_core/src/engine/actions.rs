//! Action resolvers: shot, saucer pass, body check
//!
//! Thin glue over the charge timer and engagement evaluator: each resolver
//! turns a finished charge session into a force or outcome. The closed
//! [`ActionKind`] set is the whole action surface; kind-specific behavior
//! lives here, never in the timer.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::charge::ChargeOutcome;
use super::types::{vec2, Skater};
use crate::error::ConfigError;

/// The timed actions a skater can wind up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Shot,
    SaucerPass,
    BodyCheck,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionTuning {
    pub shot_speed_mps: f32,
    pub pass_speed_mps: f32,
    /// Saucer passes fly faster but wobble more
    pub saucer_speed_factor: f32,
    pub saucer_accuracy_penalty: f32,
    /// Base aim noise (radians, one sigma-ish half-spread) at accuracy 1.0
    pub shot_noise_rad: f32,
    pub pass_noise_rad: f32,
    /// Receiver lead time when aiming a pass
    pub pass_lead_s: f32,
    /// Body check only connects inside this range
    pub check_range_m: f32,
    /// Charge held longer than this forces a whiffed check
    pub max_check_hold_s: f32,
    /// Impulse given to the puck when a check knocks it loose
    pub knock_loose_speed_mps: f32,
    /// How long a checked skater is staggered
    pub stun_s: f32,
}

impl Default for ActionTuning {
    fn default() -> Self {
        Self {
            shot_speed_mps: 18.0,
            pass_speed_mps: 12.0,
            saucer_speed_factor: 1.25,
            saucer_accuracy_penalty: 1.5,
            shot_noise_rad: 0.12,
            pass_noise_rad: 0.08,
            pass_lead_s: 0.4,
            check_range_m: 1.8,
            max_check_hold_s: 1.4,
            knock_loose_speed_mps: 8.0,
            stun_s: 0.8,
        }
    }
}

impl ActionTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shot_speed_mps <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "actions.shot_speed_mps",
                value: self.shot_speed_mps,
            });
        }
        if self.pass_speed_mps <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "actions.pass_speed_mps",
                value: self.pass_speed_mps,
            });
        }
        if self.check_range_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "actions.check_range_m",
                value: self.check_range_m,
            });
        }
        Ok(())
    }
}

/// Velocity to fire the puck with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuckImpulse {
    pub velocity: (f32, f32),
}

/// Result of a body check attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckOutcome {
    pub landed: bool,
    /// Ticks the victim is staggered for
    pub stun_ticks: u64,
    /// Impulse to the knocked-loose puck
    pub knock_velocity: (f32, f32),
}

impl CheckOutcome {
    fn miss() -> Self {
        Self { landed: false, stun_ticks: 0, knock_velocity: (0.0, 0.0) }
    }
}

/// Aim noise half-spread: the base noise shrinks with the shooter's
/// accuracy scalars and grows with any action-specific penalty.
fn aim_noise_rad(base_rad: f32, accuracy: f32, penalty: f32) -> f32 {
    base_rad * penalty / accuracy.max(0.1)
}

/// Resolve a wound-up shot into a puck impulse toward the goal mouth.
/// Power scales with the charge zone multiplier and the shooter's power
/// scalar; aim noise scales inversely with accuracy.
pub fn resolve_shot<R: Rng>(
    shooter: &Skater,
    charge: &ChargeOutcome,
    goal_mouth: (f32, f32),
    accuracy_multiplier: f32,
    tuning: &ActionTuning,
    rng: &mut R,
) -> PuckImpulse {
    let speed = tuning.shot_speed_mps * charge.power_multiplier * shooter.profile.power;
    let aim = vec2::normalize(vec2::sub(goal_mouth, shooter.position));
    let noise = aim_noise_rad(
        tuning.shot_noise_rad,
        shooter.profile.accuracy * accuracy_multiplier,
        1.0,
    );
    let angle = rng.gen_range(-noise..=noise);
    PuckImpulse { velocity: vec2::scale(vec2::rotate(aim, angle), speed) }
}

/// Resolve a pass toward a teammate's lead point. The saucer variant
/// trades accuracy for speed.
pub fn resolve_pass<R: Rng>(
    passer: &Skater,
    receiver_pos: (f32, f32),
    receiver_vel: (f32, f32),
    saucer: bool,
    charge: &ChargeOutcome,
    accuracy_multiplier: f32,
    tuning: &ActionTuning,
    rng: &mut R,
) -> PuckImpulse {
    let lead = vec2::add(receiver_pos, vec2::scale(receiver_vel, tuning.pass_lead_s));
    let mut speed = tuning.pass_speed_mps * charge.power_multiplier * passer.profile.power;
    let mut penalty = 1.0;
    if saucer {
        speed *= tuning.saucer_speed_factor;
        penalty = tuning.saucer_accuracy_penalty;
    }
    let aim = vec2::normalize(vec2::sub(lead, passer.position));
    let noise = aim_noise_rad(
        tuning.pass_noise_rad,
        passer.profile.accuracy * accuracy_multiplier,
        penalty,
    );
    let angle = rng.gen_range(-noise..=noise);
    PuckImpulse { velocity: vec2::scale(vec2::rotate(aim, angle), speed) }
}

/// Resolve a body check against the carrier. Out of range or held past the
/// valid window is a whiff; a landed check knocks the puck loose along the
/// checker's line and staggers the victim. The aggression scalar from the
/// engagement evaluator commits extra force into the knock.
pub fn resolve_check(
    checker: &Skater,
    target: &Skater,
    charge: &ChargeOutcome,
    aggression_scalar: f32,
    tuning: &ActionTuning,
) -> CheckOutcome {
    if charge.held_s > tuning.max_check_hold_s {
        // Wound up too long: forced miss regardless of distance
        return CheckOutcome::miss();
    }
    if vec2::distance(checker.position, target.position) > tuning.check_range_m {
        return CheckOutcome::miss();
    }

    let line = vec2::normalize(vec2::sub(target.position, checker.position));
    let force = tuning.knock_loose_speed_mps
        * charge.power_multiplier
        * checker.profile.power
        * aggression_scalar.max(0.1);
    let stun_s = tuning.stun_s * charge.power_multiplier.min(1.5);
    CheckOutcome {
        landed: true,
        stun_ticks: super::timestep::ticks_for(stun_s),
        knock_velocity: vec2::scale(line, force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::charge::{ChargeTimer, ChargeTiming, ChargeZone};
    use crate::engine::types::{Role, TeamSide};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn charged(zone_time_s: f32) -> ChargeOutcome {
        let timing = ChargeTiming::default();
        let mut timer = ChargeTimer::new();
        timer.start();
        timer.advance(zone_time_s);
        timer.stop(&timing).unwrap()
    }

    fn skater_at(pos: (f32, f32)) -> Skater {
        let mut s = Skater::new(TeamSide::Home, Role::Center);
        s.position = pos;
        s
    }

    #[test]
    fn test_perfect_shot_is_strongest() {
        let shooter = skater_at((40.0, 15.0));
        let tuning = ActionTuning::default();
        let goal = (56.0, 15.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let weak = resolve_shot(&shooter, &charged(0.3), goal, 1.0, &tuning, &mut rng);
        let perfect = resolve_shot(&shooter, &charged(0.85), goal, 1.0, &tuning, &mut rng);
        let over = resolve_shot(&shooter, &charged(1.5), goal, 1.0, &tuning, &mut rng);

        let speed = |i: &PuckImpulse| vec2::length(i.velocity);
        assert!(speed(&perfect) > speed(&weak));
        assert!(speed(&perfect) > speed(&over));
        // Shot heads toward the goal end
        assert!(perfect.velocity.0 > 0.0);
    }

    #[test]
    fn test_shot_noise_shrinks_with_accuracy() {
        let mut shooter = skater_at((40.0, 15.0));
        let tuning = ActionTuning::default();
        let goal = (56.0, 15.0);

        // Deterministic spread comparison over many seeds
        let mut spread = |accuracy: f32| {
            shooter.profile.accuracy = accuracy;
            let mut worst: f32 = 0.0;
            for seed in 0..64 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let shot = resolve_shot(&shooter, &charged(0.85), goal, 1.0, &tuning, &mut rng);
                let off_axis = (shot.velocity.1 / vec2::length(shot.velocity)).abs();
                worst = worst.max(off_axis);
            }
            worst
        };

        assert!(spread(2.0) < spread(0.5));
    }

    #[test]
    fn test_pass_leads_the_receiver() {
        let passer = skater_at((20.0, 15.0));
        let tuning = ActionTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        // Receiver skating +Y: the pass aims ahead of it
        let pass = resolve_pass(
            &passer,
            (30.0, 15.0),
            (0.0, 5.0),
            false,
            &charged(0.85),
            1.0,
            &tuning,
            &mut rng,
        );
        assert!(pass.velocity.1 > 0.0);
        assert!(pass.velocity.0 > 0.0);
    }

    #[test]
    fn test_saucer_pass_is_faster() {
        let passer = skater_at((20.0, 15.0));
        let tuning = ActionTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = charged(0.85);

        let flat = resolve_pass(
            &passer, (30.0, 15.0), (0.0, 0.0), false, &outcome, 1.0, &tuning, &mut rng,
        );
        let saucer = resolve_pass(
            &passer, (30.0, 15.0), (0.0, 0.0), true, &outcome, 1.0, &tuning, &mut rng,
        );
        assert!(vec2::length(saucer.velocity) > vec2::length(flat.velocity));
    }

    #[test]
    fn test_check_lands_in_range() {
        let checker = skater_at((30.0, 15.0));
        let target = skater_at((31.0, 15.0));
        let tuning = ActionTuning::default();

        let outcome = resolve_check(&checker, &target, &charged(0.85), 1.0, &tuning);
        assert!(outcome.landed);
        assert!(outcome.stun_ticks > 0);
        // Knock-loose impulse carries real pace and points along the
        // checking line
        assert!(vec2::length(outcome.knock_velocity) > 6.0);
        assert!(outcome.knock_velocity.0 > 0.0);
    }

    #[test]
    fn test_check_misses_out_of_range() {
        let checker = skater_at((30.0, 15.0));
        let target = skater_at((35.0, 15.0));
        let tuning = ActionTuning::default();

        let outcome = resolve_check(&checker, &target, &charged(0.85), 1.0, &tuning);
        assert!(!outcome.landed);
    }

    #[test]
    fn test_check_forced_miss_past_hold_window() {
        let checker = skater_at((30.0, 15.0));
        let target = skater_at((31.0, 15.0));
        let tuning = ActionTuning::default();

        // Held 2.0s > max_check_hold_s 1.4s: whiff even at point-blank
        let outcome = resolve_check(&checker, &target, &charged(2.0), 1.0, &tuning);
        assert!(!outcome.landed);
        // Confirm the long hold really was Overcharged, not Weak
        assert_eq!(charged(2.0).zone, ChargeZone::Overcharged);
    }

    #[test]
    fn test_passive_check_is_softer() {
        let checker = skater_at((30.0, 15.0));
        let target = skater_at((31.0, 15.0));
        let tuning = ActionTuning::default();
        let outcome = charged(0.85);

        let soft = resolve_check(&checker, &target, &outcome, 0.45, &tuning);
        let hard = resolve_check(&checker, &target, &outcome, 1.0, &tuning);
        assert!(vec2::length(soft.knock_velocity) < vec2::length(hard.knock_velocity));
    }
}
