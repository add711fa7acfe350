//! Read-only per-tick snapshot for the presentation collaborator
//!
//! Display data only: the core accepts no feedback from anything that
//! consumes these.

use serde::{Deserialize, Serialize};

use super::actions::ActionKind;
use super::decision::Behavior;
use super::types::{Role, TeamSide};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkaterSnap {
    pub team: TeamSide,
    pub role: Role,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub behavior: Behavior,
    pub has_puck: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PuckSnap {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub carrier: Option<usize>,
}

/// An in-flight charge session's display state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChargeSnap {
    pub skater: usize,
    pub kind: ActionKind,
    pub normalized: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub skaters: Vec<SkaterSnap>,
    pub puck: Option<PuckSnap>,
    pub charges: Vec<ChargeSnap>,
}
