//! Per-tick observation stream
//!
//! Events accumulate during a tick and are drained by collaborators
//! (presentation, match flow). The core never reads them back; signaling is
//! one-way and synchronous.

use serde::{Deserialize, Serialize};

use super::actions::ActionKind;
use super::charge::ChargeZone;
use super::types::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Continuous wind-up feedback while a charge session is active
    ChargeProgress { skater: usize, kind: ActionKind, normalized: f32 },
    /// One classification observation when a session stops
    ChargeResolved {
        skater: usize,
        kind: ActionKind,
        zone: ChargeZone,
        normalized: f32,
        power_multiplier: f32,
    },
    PossessionGained { skater: usize },
    /// The puck was fired loose (shot, pass, or knocked off the stick)
    PuckReleased { skater: usize },
    CheckLanded { checker: usize, target: usize },
    /// The puck crossed a goal mouth; `conceded_by` is the defending side
    GoalScored { conceded_by: TeamSide },
}

/// Tick-scoped event buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Hand the accumulated events to a collaborator, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = EventQueue::default();
        queue.push(SimEvent::PossessionGained { skater: 3 });
        queue.push(SimEvent::PuckReleased { skater: 3 });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
