//! Puck state and possession arbitration
//!
//! All attachment mutations flow through [`PossessionArbiter`]: one writer,
//! checked preconditions, so at most one skater is attached at any instant
//! and conflicting same-tick pickups are structurally impossible.
//!
//! Release suppression: the moment the puck is fired loose, pickup contact
//! is suppressed against every skater uniformly, and re-enabled at a fixed
//! expiry OR as soon as the puck has cleared every skater by a minimum
//! distance, whichever comes first. A timer alone can re-enable contact
//! while the puck still overlaps the shooter; a distance check alone can
//! stall if the puck barely moves.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rink;
use super::types::{vec2, Skater};
use crate::error::ConfigError;

/// The single shared mobile object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    /// Attached skater index, `None` while loose
    pub carrier: Option<usize>,
}

impl Default for Puck {
    fn default() -> Self {
        Self { position: rink::CENTER, velocity: (0.0, 0.0), carrier: None }
    }
}

impl Puck {
    pub fn speed(&self) -> f32 {
        vec2::length(self.velocity)
    }

    pub fn is_loose(&self) -> bool {
        self.carrier.is_none()
    }

    /// Re-seat at a face-off point, at rest and loose.
    pub fn place_at(&mut self, point: (f32, f32)) {
        self.position = rink::clamp_to_rink(point);
        self.velocity = (0.0, 0.0);
        self.carrier = None;
    }

    /// Advance a loose puck: ice friction, board rebounds.
    pub fn integrate(&mut self, dt: f32, tuning: &PossessionTuning) {
        if self.carrier.is_some() {
            return;
        }
        self.position = vec2::add(self.position, vec2::scale(self.velocity, dt));

        // Board rebound with damping
        if self.position.0 < 0.0 || self.position.0 > rink::LENGTH_M {
            self.velocity.0 = -self.velocity.0 * tuning.board_restitution;
        }
        if self.position.1 < 0.0 || self.position.1 > rink::WIDTH_M {
            self.velocity.1 = -self.velocity.1 * tuning.board_restitution;
        }
        self.position = rink::clamp_to_rink(self.position);

        let decay = (1.0 - tuning.friction_per_s * dt).max(0.0);
        self.velocity = vec2::scale(self.velocity, decay);
        if self.speed() < tuning.rest_speed_mps {
            self.velocity = (0.0, 0.0);
        }
    }

    /// Keep a carried puck on the carrier's stick: slightly ahead of the
    /// skater along its heading, sharing its velocity.
    pub fn follow_carrier(&mut self, carrier_pos: (f32, f32), carrier_vel: (f32, f32), lead_m: f32) {
        let heading = vec2::normalize(carrier_vel);
        self.position =
            rink::clamp_to_rink(vec2::add(carrier_pos, vec2::scale(heading, lead_m)));
        self.velocity = carrier_vel;
    }
}

/// Possession tuning constants (spec defaults; overridable gameplay knobs,
/// not contracts).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PossessionTuning {
    pub possession_radius_m: f32,
    /// Fraction of the possession radius inside which a closer opponent
    /// contests (and blocks) an attach
    pub contested_radius_factor: f32,
    /// Above this speed the puck cannot be held and any attachment breaks
    pub release_speed_mps: f32,
    /// Fixed pickup-suppression window after a release
    pub suppress_window_s: f32,
    /// Early suppression exit: puck farther than this from every skater
    pub clearance_m: f32,
    /// Stick lead distance for a carried puck
    pub carry_lead_m: f32,
    pub friction_per_s: f32,
    pub rest_speed_mps: f32,
    pub board_restitution: f32,
}

impl Default for PossessionTuning {
    fn default() -> Self {
        Self {
            possession_radius_m: 1.5,
            contested_radius_factor: 0.75,
            // Above the fastest skating speed: carrying never self-releases
            release_speed_mps: 9.0,
            suppress_window_s: 0.4,
            clearance_m: 2.0,
            carry_lead_m: 0.6,
            friction_per_s: 0.8,
            rest_speed_mps: 0.15,
            board_restitution: 0.6,
        }
    }
}

impl PossessionTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.possession_radius_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "possession.possession_radius_m",
                value: self.possession_radius_m,
            });
        }
        if self.release_speed_mps <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "possession.release_speed_mps",
                value: self.release_speed_mps,
            });
        }
        if !(0.0 < self.contested_radius_factor && self.contested_radius_factor <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "possession.contested_radius_factor",
                value: self.contested_radius_factor,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    pub fn contested_radius_m(&self) -> f32 {
        self.possession_radius_m * self.contested_radius_factor
    }
}

/// Why an attach attempt was refused. Diagnostics only; rejection is a
/// silent no-op at the gameplay level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttachRejection {
    AlreadyAttached,
    OutOfRadius,
    PuckTooFast,
    ContestedByOpponent,
    ContactSuppressed,
}

/// Single arbitration point for the puck's attachment state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PossessionArbiter {
    pub tuning: PossessionTuning,
    /// Pickup suppression expiry tick, `None` when contact is enabled
    suppress_until_tick: Option<u64>,
}

impl PossessionArbiter {
    pub fn new(tuning: PossessionTuning) -> Self {
        Self { tuning, suppress_until_tick: None }
    }

    pub fn is_attached(&self, puck: &Puck, idx: usize) -> bool {
        puck.carrier == Some(idx)
    }

    pub fn contact_suppressed(&self) -> bool {
        self.suppress_until_tick.is_some()
    }

    /// Attempt to attach the puck to `idx`. Succeeds only if the puck is
    /// loose, slow enough, within reach, contact is not suppressed, and no
    /// opposing skater is both strictly closer and inside the contested
    /// radius. Teammates never block each other, keeping pass reception
    /// frictionless.
    pub fn try_attach(&mut self, puck: &mut Puck, idx: usize, skaters: &[Skater]) -> bool {
        match self.check_attach(puck, idx, skaters) {
            Ok(()) => {
                puck.carrier = Some(idx);
                puck.velocity = skaters[idx].velocity;
                debug!(skater = idx, "puck attached");
                true
            }
            Err(reason) => {
                debug!(skater = idx, ?reason, "attach rejected");
                false
            }
        }
    }

    fn check_attach(
        &self,
        puck: &Puck,
        idx: usize,
        skaters: &[Skater],
    ) -> Result<(), AttachRejection> {
        if puck.carrier.is_some() {
            return Err(AttachRejection::AlreadyAttached);
        }
        if self.contact_suppressed() {
            return Err(AttachRejection::ContactSuppressed);
        }
        let requester = &skaters[idx];
        let radius = self.tuning.possession_radius_m * requester.profile.reach;
        let dist = vec2::distance(requester.position, puck.position);
        if dist > radius {
            return Err(AttachRejection::OutOfRadius);
        }
        if puck.speed() >= self.tuning.release_speed_mps {
            return Err(AttachRejection::PuckTooFast);
        }
        let contested_radius = self.tuning.contested_radius_m();
        for (other_idx, other) in skaters.iter().enumerate() {
            if other_idx == idx || other.team == requester.team {
                continue;
            }
            let other_dist = vec2::distance(other.position, puck.position);
            if other_dist < dist && other_dist <= contested_radius {
                return Err(AttachRejection::ContestedByOpponent);
            }
        }
        Ok(())
    }

    /// Detach the puck and open the pickup-suppression window.
    pub fn release(&mut self, puck: &mut Puck, now_tick: u64) {
        if puck.carrier.take().is_some() {
            let window = super::timestep::ticks_for(self.tuning.suppress_window_s);
            self.suppress_until_tick = Some(now_tick + window);
            debug!(until = now_tick + window, "puck released, contact suppressed");
        }
    }

    /// Unconditional attachment override for match-reset / face-off logic.
    /// Bypasses every rule above.
    pub fn force_attach(&mut self, puck: &mut Puck, idx: usize) {
        puck.carrier = Some(idx);
        self.suppress_until_tick = None;
    }

    /// Per-tick bookkeeping: break attachment the instant the puck exceeds
    /// the release speed, and lift suppression at expiry or once the puck
    /// has cleared every skater (earlier of the two).
    pub fn update(&mut self, puck: &mut Puck, skaters: &[Skater], now_tick: u64) {
        if puck.carrier.is_some() && puck.speed() > self.tuning.release_speed_mps {
            self.release(puck, now_tick);
        }

        if let Some(until) = self.suppress_until_tick {
            let cleared = skaters
                .iter()
                .all(|s| vec2::distance(s.position, puck.position) > self.tuning.clearance_m);
            if now_tick >= until || cleared {
                self.suppress_until_tick = None;
                debug!(cleared, "puck contact re-enabled");
            }
        }
    }

    /// Face-off reset: clear suppression alongside the puck placement.
    pub fn reset(&mut self) {
        self.suppress_until_tick = None;
    }
}
