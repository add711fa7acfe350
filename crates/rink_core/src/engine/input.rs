//! Input intents
//!
//! The input collaborator hands the core explicit command objects; the core
//! never reads device state, and commands are consumed synchronously by the
//! owning resolver each tick. A tap is an instant start+stop wind-up, so it
//! shares the charged path (and lands in the Weak zone by construction).

use serde::{Deserialize, Serialize};

use super::actions::ActionKind;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    StartCharge(ActionKind),
    ReleaseCharge(ActionKind),
    Tap(ActionKind),
}

/// One skater's intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkaterIntent {
    pub skater: usize,
    /// Desired movement direction, unit-ish; `None` leaves the skater to
    /// its own decision state machine
    pub movement: Option<(f32, f32)>,
    pub command: Option<Command>,
}

impl SkaterIntent {
    pub fn movement(skater: usize, direction: (f32, f32)) -> Self {
        Self { skater, movement: Some(direction), command: None }
    }

    pub fn command(skater: usize, command: Command) -> Self {
        Self { skater, movement: None, command: Some(command) }
    }
}
