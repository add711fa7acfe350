//! Charge timer - timed skill-check primitive
//!
//! One charge session tracks a wind-up between "start" and "stop/cancel"
//! and classifies the release timing into Weak / Perfect / Overcharged.
//! The timer is action-agnostic: shots, saucer passes and body checks all
//! reuse it and differ only in how the resolver consumes the outcome.
//!
//! Accumulation is monotonic and unbounded; callers that need a hard cap on
//! action availability enforce their own maximum hold window and treat
//! charge beyond it as a forced miss (the check resolver does this).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Release-timing classification of a finished charge session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeZone {
    Weak,
    Perfect,
    Overcharged,
}

/// Zone boundaries and power multipliers for one action kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChargeTiming {
    /// Wind-up length that maps accumulated charge to the normalized [0, 1+) scale
    pub full_duration_s: f32,
    /// Normalized boundary below which the release is Weak
    pub zone_low: f32,
    /// Normalized boundary above which the release is Overcharged
    pub zone_high: f32,
    pub weak_multiplier: f32,
    pub perfect_multiplier: f32,
    pub overcharged_multiplier: f32,
}

impl Default for ChargeTiming {
    fn default() -> Self {
        Self {
            full_duration_s: 1.0,
            zone_low: 0.75,
            zone_high: 0.95,
            weak_multiplier: 0.8,
            perfect_multiplier: 2.0,
            overcharged_multiplier: 0.6,
        }
    }
}

impl ChargeTiming {
    /// Reject authoring mistakes at configuration load.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.full_duration_s <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "charge.full_duration_s",
                value: self.full_duration_s,
            });
        }
        let ordered = 0.0 <= self.zone_low && self.zone_low < self.zone_high && self.zone_high <= 1.0;
        if !ordered {
            return Err(ConfigError::ChargeZoneOrder { low: self.zone_low, high: self.zone_high });
        }
        if self.perfect_multiplier <= self.weak_multiplier
            || self.perfect_multiplier <= self.overcharged_multiplier
        {
            return Err(ConfigError::ChargeMultiplierOrder {
                weak: self.weak_multiplier,
                perfect: self.perfect_multiplier,
                overcharged: self.overcharged_multiplier,
            });
        }
        Ok(())
    }

    /// Classify a normalized charge value. Total over [0, +inf): every value
    /// lands in exactly one zone.
    pub fn classify(&self, normalized: f32) -> ChargeZone {
        if normalized < self.zone_low {
            ChargeZone::Weak
        } else if normalized <= self.zone_high {
            ChargeZone::Perfect
        } else {
            ChargeZone::Overcharged
        }
    }

    pub fn multiplier(&self, zone: ChargeZone) -> f32 {
        match zone {
            ChargeZone::Weak => self.weak_multiplier,
            ChargeZone::Perfect => self.perfect_multiplier,
            ChargeZone::Overcharged => self.overcharged_multiplier,
        }
    }
}

/// Result of stopping a charge session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargeOutcome {
    pub zone: ChargeZone,
    /// accumulated / full_duration, unclamped
    pub normalized: f32,
    /// Seconds the session was held
    pub held_s: f32,
    pub power_multiplier: f32,
}

/// The timer itself. Stateless between sessions: `start` resets everything,
/// `stop`/`cancel` leave no residue.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChargeTimer {
    accumulated_s: Option<f32>,
}

impl ChargeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session, discarding any previous one.
    pub fn start(&mut self) {
        self.accumulated_s = Some(0.0);
    }

    /// Accumulate elapsed time while a session is active; no-op otherwise.
    pub fn advance(&mut self, dt: f32) {
        if let Some(acc) = self.accumulated_s.as_mut() {
            *acc += dt.max(0.0);
        }
    }

    pub fn is_charging(&self) -> bool {
        self.accumulated_s.is_some()
    }

    /// Seconds held so far, if a session is active.
    pub fn held_s(&self) -> Option<f32> {
        self.accumulated_s
    }

    /// Normalized progress for the continuous charge-progress observation.
    pub fn progress(&self, timing: &ChargeTiming) -> Option<f32> {
        self.accumulated_s.map(|acc| acc / timing.full_duration_s)
    }

    /// End the session and classify it. Without an active session this is a
    /// no-op returning `None`.
    pub fn stop(&mut self, timing: &ChargeTiming) -> Option<ChargeOutcome> {
        let held_s = self.accumulated_s.take()?;
        let normalized = held_s / timing.full_duration_s;
        let zone = timing.classify(normalized);
        Some(ChargeOutcome {
            zone,
            normalized,
            held_s,
            power_multiplier: timing.multiplier(zone),
        })
    }

    /// Abort without classification.
    pub fn cancel(&mut self) {
        self.accumulated_s = None;
    }
}
