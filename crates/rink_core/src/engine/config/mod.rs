//! Engine configuration
//!
//! Every tuning constant lives in one of the per-component tuning structs,
//! aggregated here with named presets. Authoring mistakes (inverted zone
//! thresholds, non-positive radii) are rejected by `validate()` at load
//! time; nothing downstream re-checks them.
//!
//! ```rust
//! use rink_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! config.validate().unwrap();
//! let arcade = EngineConfig::arcade();
//! ```

use serde::{Deserialize, Serialize};

use super::actions::ActionTuning;
use super::charge::ChargeTiming;
use super::decision::DecisionTuning;
use super::engagement::EngagementTuning;
use super::formation::FormationTuning;
use super::possession::PossessionTuning;
use crate::error::ConfigError;

/// Skating motion constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionTuning {
    pub max_speed_mps: f32,
    /// Velocity blend rate toward the steering output
    pub accel_per_s: f32,
    /// Idle deceleration rate
    pub idle_damping_per_s: f32,
    /// Arrive-mode slowing radius
    pub arrive_slowing_m: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self { max_speed_mps: 8.0, accel_per_s: 6.0, idle_damping_per_s: 4.0, arrive_slowing_m: 2.5 }
    }
}

impl MotionTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_speed_mps <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "motion.max_speed_mps",
                value: self.max_speed_mps,
            });
        }
        if self.accel_per_s <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "motion.accel_per_s",
                value: self.accel_per_s,
            });
        }
        Ok(())
    }
}

/// Goal mouth geometry, supplied by the match-flow collaborator. The goal
/// itself is external; the core only needs the boundary segment to fire
/// the goal-scored event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GoalGeometry {
    pub mouth_half_width_m: f32,
}

impl Default for GoalGeometry {
    fn default() -> Self {
        Self { mouth_half_width_m: 0.915 }
    }
}

impl GoalGeometry {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mouth_half_width_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "goal.mouth_half_width_m",
                value: self.mouth_half_width_m,
            });
        }
        Ok(())
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    pub charge: ChargeTiming,
    pub possession: PossessionTuning,
    pub engagement: EngagementTuning,
    pub formation: FormationTuning,
    pub decision: DecisionTuning,
    pub motion: MotionTuning,
    pub actions: ActionTuning,
    pub goal: GoalGeometry,
}

impl EngineConfig {
    /// Arcade preset: wider perfect window, harder shots, pushier defense.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.charge.zone_low = 0.6;
        cfg.charge.perfect_multiplier = 2.4;
        cfg.actions.shot_speed_mps = 22.0;
        cfg.actions.stun_s = 1.1;
        cfg.decision.engage_range_m = 12.0;
        cfg.engagement.passive_scalar = 0.6;
        cfg
    }

    /// Simulation preset: tighter timing, gentler contact, patient defense.
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.charge.zone_low = 0.8;
        cfg.charge.zone_high = 0.92;
        cfg.actions.shot_speed_mps = 16.0;
        cfg.actions.stun_s = 0.5;
        cfg.decision.engage_range_m = 7.0;
        cfg.engagement.passive_scalar = 0.35;
        cfg
    }

    /// Validate every tuning block. Call once at configuration load; the
    /// simulation assumes a validated config from then on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.charge.validate()?;
        self.possession.validate()?;
        self.engagement.validate()?;
        self.formation.validate()?;
        self.decision.validate()?;
        self.motion.validate()?;
        self.actions.validate()?;
        self.goal.validate()?;
        Ok(())
    }
}
