//! Engagement evaluator
//!
//! Pure, stateless classification of how hard a defender should pursue the
//! puck carrier. Ordered checks, first match wins:
//!
//! 1. Carrier lacks clean control of the puck -> Aggressive
//! 2. Carrier is facing away from the defender -> Aggressive
//! 3. Carrier is effectively stationary -> Aggressive
//! 4. Otherwise -> Passive (hold shape, mirror, close only a large gap)
//!
//! Facing is approximated by velocity heading; a near-stationary carrier has
//! no defined facing, so rule 2 never fires before rule 3 can.

use serde::{Deserialize, Serialize};

use super::types::vec2;
use crate::error::ConfigError;

/// Pursuit commitment classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engagement {
    Aggressive,
    Passive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngagementTuning {
    /// Clean control: puck within this radius of the carrier...
    pub control_radius_m: f32,
    /// ...and puck speed below this
    pub control_speed_mps: f32,
    /// Facing-away margin: carrier-heading . carrier->defender below this
    /// (negative) dot threshold means the pressure is on the blind side
    pub facing_dot_threshold: f32,
    /// Below this speed the carrier is treated as stationary
    pub stationary_speed_mps: f32,
    /// Aggression scalar applied to pursuit speed per classification
    pub passive_scalar: f32,
    pub aggressive_scalar: f32,
    /// Passive defenders close distance only if the gap exceeds this cap
    pub passive_gap_cap_m: f32,
}

impl Default for EngagementTuning {
    fn default() -> Self {
        Self {
            control_radius_m: 1.2,
            control_speed_mps: 2.0,
            facing_dot_threshold: -0.25,
            stationary_speed_mps: 0.8,
            passive_scalar: 0.45,
            aggressive_scalar: 1.0,
            passive_gap_cap_m: 6.0,
        }
    }
}

impl EngagementTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_radius_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "engagement.control_radius_m",
                value: self.control_radius_m,
            });
        }
        if !(-1.0..=0.0).contains(&self.facing_dot_threshold) {
            return Err(ConfigError::OutOfRange {
                name: "engagement.facing_dot_threshold",
                value: self.facing_dot_threshold,
                min: -1.0,
                max: 0.0,
            });
        }
        Ok(())
    }

    pub fn aggression_scalar(&self, engagement: Engagement) -> f32 {
        match engagement {
            Engagement::Aggressive => self.aggressive_scalar,
            Engagement::Passive => self.passive_scalar,
        }
    }
}

/// Classify a defender's pursuit mode against the current carrier.
pub fn evaluate(
    carrier_pos: (f32, f32),
    carrier_vel: (f32, f32),
    puck_pos: (f32, f32),
    puck_vel: (f32, f32),
    defender_pos: (f32, f32),
    tuning: &EngagementTuning,
) -> Engagement {
    // 1. A loose or bouncing puck is always worth contesting. Control speed
    // is measured relative to the carrier: a puck riding the stick shares
    // the carrier's velocity.
    let relative_speed = vec2::length(vec2::sub(puck_vel, carrier_vel));
    let controlled = vec2::distance(puck_pos, carrier_pos) <= tuning.control_radius_m
        && relative_speed < tuning.control_speed_mps;
    if !controlled {
        return Engagement::Aggressive;
    }

    // 2. Pressure from the blind side: carrier cannot see it coming
    let carrier_speed = vec2::length(carrier_vel);
    if carrier_speed >= tuning.stationary_speed_mps {
        let heading = vec2::normalize(carrier_vel);
        let to_defender = vec2::normalize(vec2::sub(defender_pos, carrier_pos));
        if vec2::dot(heading, to_defender) < tuning.facing_dot_threshold {
            return Engagement::Aggressive;
        }
    }

    // 3. A stationary carrier is easy to dispossess
    if carrier_speed < tuning.stationary_speed_mps {
        return Engagement::Aggressive;
    }

    Engagement::Passive
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNING: EngagementTuning = EngagementTuning {
        control_radius_m: 1.2,
        control_speed_mps: 2.0,
        facing_dot_threshold: -0.25,
        stationary_speed_mps: 0.8,
        passive_scalar: 0.45,
        aggressive_scalar: 1.0,
        passive_gap_cap_m: 6.0,
    };

    #[test]
    fn test_loose_puck_is_aggressive() {
        // Puck 3m from the carrier: not under clean control
        let e = evaluate((10.0, 10.0), (3.0, 0.0), (13.0, 10.0), (0.0, 0.0), (20.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Aggressive);
    }

    #[test]
    fn test_bouncing_puck_is_aggressive() {
        // Puck adjacent but moving fast relative to the carrier
        let e =
            evaluate((10.0, 10.0), (3.0, 0.0), (10.5, 10.0), (-3.0, 0.0), (20.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Aggressive);
    }

    #[test]
    fn test_fast_carrier_with_puck_on_stick_keeps_control() {
        // Puck shares the carrier's velocity: relative speed ~0, still
        // clean control despite the absolute puck speed.
        let e = evaluate((10.0, 10.0), (6.0, 0.0), (10.6, 10.0), (6.0, 0.0), (20.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Passive);
    }

    #[test]
    fn test_blind_side_pressure_is_aggressive() {
        // Carrier skating +X, defender directly behind
        let e = evaluate((10.0, 10.0), (4.0, 0.0), (10.5, 10.0), (4.0, 0.0), (4.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Aggressive);
    }

    #[test]
    fn test_stationary_carrier_is_aggressive() {
        let e = evaluate((10.0, 10.0), (0.1, 0.0), (10.5, 10.0), (0.1, 0.0), (20.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Aggressive);
    }

    #[test]
    fn test_controlled_moving_facing_carrier_is_passive() {
        // Carrier skating +X with the puck on the stick, defender ahead
        let e = evaluate((10.0, 10.0), (4.0, 0.0), (10.6, 10.0), (4.0, 0.0), (20.0, 10.0), &TUNING);
        assert_eq!(e, Engagement::Passive);
    }

    #[test]
    fn test_scalars_map_to_classification() {
        assert!(
            TUNING.aggression_scalar(Engagement::Aggressive)
                > TUNING.aggression_scalar(Engagement::Passive)
        );
    }

    #[test]
    fn test_evaluate_is_pure() {
        // Same inputs, same answer: no hidden state
        let args = ((10.0, 10.0), (4.0, 0.0), (10.6, 10.0), (0.2, 0.0), (20.0, 10.0));
        let a = evaluate(args.0, args.1, args.2, args.3, args.4, &TUNING);
        let b = evaluate(args.0, args.1, args.2, args.3, args.4, &TUNING);
        assert_eq!(a, b);
    }
}
