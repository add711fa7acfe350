//! Formation engine
//!
//! Computes each role's target position from the match phase, the team's
//! attack direction and the selected defensive scheme. Canonical offsets
//! are authored once, for a team attacking +X; the attack-axis component is
//! mirrored algebraically for the opposite direction. Lane/zone clamps are
//! the final step, so no phase/scheme combination can place a role
//! off-structure.
//!
//! One engine instance per team, owned by the simulation: no globals.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::rink::{self, lanes};
use super::types::{vec2, Role, TeamSide};
use crate::error::ConfigError;

/// Possession-derived team phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchPhase {
    Attacking,
    Defending,
    #[default]
    Neutral,
}

/// Defensive shape modifier, selectable per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DefensiveScheme {
    /// Everyone collapses in front of the defended goal; minimal risk
    Compact,
    /// Far-side wing sags toward the slot, near-side wing holds a seam
    #[default]
    BalancedSag,
    /// Near-side wing pushes out to pressure; defense nudges up
    AggressivePress,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FormationTuning {
    /// Defensive roles may not be farther than this from their own goal
    /// along the attack axis
    pub defense_max_push_m: f32,
    /// A loose puck closer than this to the goal keeps the team Defending
    pub defend_enter_m: f32,
    /// Extra distance required to leave Defending (flap guard)
    pub defend_exit_margin_m: f32,
}

impl Default for FormationTuning {
    fn default() -> Self {
        Self { defense_max_push_m: 30.0, defend_enter_m: 16.0, defend_exit_margin_m: 4.0 }
    }
}

impl FormationTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defense_max_push_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "formation.defense_max_push_m",
                value: self.defense_max_push_m,
            });
        }
        if self.defend_exit_margin_m < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "formation.defend_exit_margin_m",
                value: self.defend_exit_margin_m,
                min: 0.0,
                max: f32::MAX,
            });
        }
        Ok(())
    }
}

/// Canonical offsets per role, authored for attack direction +X.
/// Attacking offsets are relative to the carrier (or loose puck), defending
/// offsets relative to the own goal (pushing out along +X), neutral offsets
/// relative to the puck.
#[derive(Debug, Clone, Copy)]
struct RoleOffsets {
    attacking: (f32, f32),
    defending: (f32, f32),
    neutral: (f32, f32),
}

static CANONICAL_OFFSETS: Lazy<HashMap<Role, RoleOffsets>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert(
        Role::Center,
        RoleOffsets { attacking: (6.0, 0.0), defending: (9.0, 0.0), neutral: (-2.0, 0.0) },
    );
    map.insert(
        Role::LeftWing,
        RoleOffsets { attacking: (3.0, -8.0), defending: (13.0, -6.0), neutral: (-4.0, -7.0) },
    );
    map.insert(
        Role::RightWing,
        RoleOffsets { attacking: (3.0, 8.0), defending: (13.0, 6.0), neutral: (-4.0, 7.0) },
    );
    map.insert(
        Role::LeftDefense,
        RoleOffsets { attacking: (-8.0, -5.0), defending: (5.0, -3.0), neutral: (-10.0, -4.0) },
    );
    map.insert(
        Role::RightDefense,
        RoleOffsets { attacking: (-8.0, 5.0), defending: (5.0, 3.0), neutral: (-10.0, 4.0) },
    );
    map
});

/// World state the formation math needs each tick.
#[derive(Debug, Clone, Copy)]
pub struct FormationContext {
    pub puck_position: (f32, f32),
    /// Carrier position when some skater holds the puck
    pub carrier_position: Option<(f32, f32)>,
}

/// Per-team formation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationEngine {
    pub team: TeamSide,
    /// +1 attacks the high-X goal, -1 the low-X goal
    pub attack_dir: f32,
    pub scheme: DefensiveScheme,
    pub tuning: FormationTuning,
}

impl FormationEngine {
    pub fn new(team: TeamSide, attack_dir: f32) -> Self {
        Self {
            team,
            attack_dir: attack_dir.signum(),
            scheme: DefensiveScheme::default(),
            tuning: FormationTuning::default(),
        }
    }

    pub fn with_scheme(mut self, scheme: DefensiveScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn own_goal(&self) -> (f32, f32) {
        rink::own_goal_center(self.attack_dir)
    }

    /// Target position for `role` in `phase`. Reference point selection,
    /// canonical offset, scheme modulation, mirroring, then clamps.
    pub fn target_position(
        &self,
        role: Role,
        phase: MatchPhase,
        ctx: &FormationContext,
    ) -> (f32, f32) {
        let offsets = &CANONICAL_OFFSETS[&role];
        let (reference, mut offset) = match phase {
            MatchPhase::Attacking => {
                (ctx.carrier_position.unwrap_or(ctx.puck_position), offsets.attacking)
            }
            MatchPhase::Defending => (self.own_goal(), offsets.defending),
            MatchPhase::Neutral => (ctx.puck_position, offsets.neutral),
        };

        if phase == MatchPhase::Defending {
            offset = self.apply_scheme(role, offset, ctx.puck_position);
        }

        // Mirror the attack-axis component only; lateral is absolute
        let world = (reference.0 + offset.0 * self.attack_dir, reference.1 + offset.1);
        self.clamp_to_lane(role, world)
    }

    /// Defending-phase shape modulation, in canonical (+X attack) offset
    /// space. "Near side" is the puck's lateral half.
    fn apply_scheme(&self, role: Role, offset: (f32, f32), puck_pos: (f32, f32)) -> (f32, f32) {
        let near_sign = if puck_pos.1 < rink::CENTER_Y { -1.0 } else { 1.0 };
        let on_near_side = role.lateral_sign() == near_sign;

        match self.scheme {
            DefensiveScheme::Compact => match role {
                // Wings and defense collapse in front of the net; the
                // center stays a seam higher as the relief outlet.
                Role::LeftWing | Role::RightWing => (6.0, offset.1 * 0.5),
                Role::LeftDefense | Role::RightDefense => (4.0, offset.1 * 0.8),
                Role::Center => (offset.0, offset.1),
            },
            DefensiveScheme::BalancedSag => match role {
                Role::LeftWing | Role::RightWing if !on_near_side => {
                    // Far-side wing drops toward the scoring area
                    (offset.0 - 5.0, offset.1 * 0.6)
                }
                Role::LeftDefense | Role::RightDefense => (offset.0, offset.1 * 0.8),
                _ => offset,
            },
            DefensiveScheme::AggressivePress => match role {
                Role::LeftWing | Role::RightWing if on_near_side => {
                    // Push out to the attacking-zone boundary to pressure
                    let boundary =
                        rink::CENTER_X - rink::GOAL_LINE_INSET_M + rink::BLUE_LINE_OFFSET_M;
                    (boundary, offset.1)
                }
                Role::LeftDefense | Role::RightDefense => (offset.0 + 2.0, offset.1),
                _ => offset,
            },
        }
    }

    /// Lane/zone legality, applied identically regardless of phase or
    /// scheme: the safety net under all the math above.
    fn clamp_to_lane(&self, role: Role, pos: (f32, f32)) -> (f32, f32) {
        let mut p = pos;
        match role {
            Role::Center => {
                p.1 = p.1.clamp(lanes::CENTER_MIN_Y, lanes::CENTER_MAX_Y);
            }
            Role::LeftWing => {
                p.1 = p.1.clamp(lanes::LEFT_WING_MIN_Y, lanes::LEFT_WING_MAX_Y);
            }
            Role::RightWing => {
                p.1 = p.1.clamp(lanes::RIGHT_WING_MIN_Y, lanes::RIGHT_WING_MAX_Y);
            }
            Role::LeftDefense | Role::RightDefense => {
                if role == Role::LeftDefense {
                    p.1 = p.1.clamp(0.0, lanes::LEFT_HALF_MAX_Y);
                } else {
                    p.1 = p.1.clamp(lanes::RIGHT_HALF_MIN_Y, rink::WIDTH_M);
                }
                // Max push distance from the own goal along the attack axis
                let goal = self.own_goal();
                let push = (p.0 - goal.0) * self.attack_dir;
                let clamped_push = push.clamp(-1.0, self.tuning.defense_max_push_m);
                p.0 = goal.0 + clamped_push * self.attack_dir;
            }
        }
        rink::clamp_to_rink(p)
    }
}

/// Phase selection with hysteresis, evaluated once per tick from possession
/// state. A loose puck near the defended goal keeps the team Defending; the
/// exit threshold sits a margin farther out so the phase cannot flap at the
/// boundary.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PhaseTracker {
    phase: MatchPhase,
}

impl PhaseTracker {
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn update(
        &mut self,
        my_team: TeamSide,
        carrier_team: Option<TeamSide>,
        puck_position: (f32, f32),
        own_goal: (f32, f32),
        tuning: &FormationTuning,
    ) -> MatchPhase {
        self.phase = match carrier_team {
            Some(team) if team == my_team => MatchPhase::Attacking,
            Some(_) => MatchPhase::Defending,
            None => {
                let dist = vec2::distance(puck_position, own_goal);
                let threshold = if self.phase == MatchPhase::Defending {
                    tuning.defend_enter_m + tuning.defend_exit_margin_m
                } else {
                    tuning.defend_enter_m
                };
                if dist < threshold {
                    MatchPhase::Defending
                } else {
                    MatchPhase::Neutral
                }
            }
        };
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = MatchPhase::Neutral;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_ctx(puck: (f32, f32)) -> FormationContext {
        FormationContext { puck_position: puck, carrier_position: None }
    }

    #[test]
    fn test_mirroring_flips_attack_axis_only() {
        // Same engine math for both directions: the offset from each
        // team's own goal differs only in the sign of the X component.
        let plus = FormationEngine::new(TeamSide::Home, 1.0);
        let minus = FormationEngine::new(TeamSide::Away, -1.0);
        let ctx = neutral_ctx(rink::CENTER);

        for role in Role::ALL {
            let p = plus.target_position(role, MatchPhase::Defending, &ctx);
            let m = minus.target_position(role, MatchPhase::Defending, &ctx);
            let p_off = (p.0 - plus.own_goal().0, p.1 - plus.own_goal().1);
            let m_off = (m.0 - minus.own_goal().0, m.1 - minus.own_goal().1);
            assert!((p_off.0 + m_off.0).abs() < 1e-4, "{role:?} x not mirrored");
            assert!((p_off.1 - m_off.1).abs() < 1e-4, "{role:?} y changed");
        }
    }

    #[test]
    fn test_attacking_reference_is_carrier() {
        let engine = FormationEngine::new(TeamSide::Home, 1.0);
        let carrier = (40.0, 12.0);
        let ctx = FormationContext { puck_position: (41.0, 12.0), carrier_position: Some(carrier) };
        let center = engine.target_position(Role::Center, MatchPhase::Attacking, &ctx);
        // Center leads the carrier toward the attacked goal
        assert!(center.0 > carrier.0);

        // With the puck loose, the puck is the reference
        let loose = neutral_ctx((20.0, 12.0));
        let center_loose = engine.target_position(Role::Center, MatchPhase::Attacking, &loose);
        assert!(center_loose.0 > 20.0);
    }

    #[test]
    fn test_defending_reference_is_own_goal() {
        let engine = FormationEngine::new(TeamSide::Home, 1.0);
        let ctx = neutral_ctx((50.0, 15.0));
        for role in Role::ALL {
            let pos = engine.target_position(role, MatchPhase::Defending, &ctx);
            // Everyone sets up in front of the defended (low-X) goal
            assert!(pos.0 < rink::CENTER_X, "{role:?} not goal-side");
        }
    }

    #[test]
    fn test_compact_collapses_wings() {
        let balanced = FormationEngine::new(TeamSide::Home, 1.0);
        let compact =
            FormationEngine::new(TeamSide::Home, 1.0).with_scheme(DefensiveScheme::Compact);
        let ctx = neutral_ctx((20.0, 15.0));

        let goal = balanced.own_goal();
        for role in [Role::LeftWing, Role::RightWing] {
            let b = balanced.target_position(role, MatchPhase::Defending, &ctx);
            let c = compact.target_position(role, MatchPhase::Defending, &ctx);
            assert!(
                vec2::distance(c, goal) < vec2::distance(b, goal),
                "{role:?} should sit tighter in compact"
            );
        }
    }

    #[test]
    fn test_balanced_sag_drops_far_side_wing() {
        let engine =
            FormationEngine::new(TeamSide::Home, 1.0).with_scheme(DefensiveScheme::BalancedSag);
        // Puck on the right half: the left wing is the far side
        let ctx = neutral_ctx((20.0, 25.0));
        let far = engine.target_position(Role::LeftWing, MatchPhase::Defending, &ctx);
        let near = engine.target_position(Role::RightWing, MatchPhase::Defending, &ctx);
        // Far-side wing sags deeper than the near-side seam
        assert!(far.0 < near.0);
    }

    #[test]
    fn test_aggressive_press_pushes_near_side_wing() {
        let sag =
            FormationEngine::new(TeamSide::Home, 1.0).with_scheme(DefensiveScheme::BalancedSag);
        let press = FormationEngine::new(TeamSide::Home, 1.0)
            .with_scheme(DefensiveScheme::AggressivePress);
        let ctx = neutral_ctx((20.0, 25.0));

        let held = sag.target_position(Role::RightWing, MatchPhase::Defending, &ctx);
        let pushed = press.target_position(Role::RightWing, MatchPhase::Defending, &ctx);
        assert!(pushed.0 > held.0);
    }

    #[test]
    fn test_lane_clamps_hold_for_all_phases_and_schemes() {
        let schemes = [
            DefensiveScheme::Compact,
            DefensiveScheme::BalancedSag,
            DefensiveScheme::AggressivePress,
        ];
        let phases = [MatchPhase::Attacking, MatchPhase::Defending, MatchPhase::Neutral];
        // Reference points at extreme corners stress the clamps
        let refs = [(1.0, 1.0), (59.0, 29.0), (1.0, 29.0), (59.0, 1.0)];

        for scheme in schemes {
            for phase in phases {
                for reference in refs {
                    let engine =
                        FormationEngine::new(TeamSide::Home, 1.0).with_scheme(scheme);
                    let ctx = FormationContext {
                        puck_position: reference,
                        carrier_position: Some(reference),
                    };
                    let center = engine.target_position(Role::Center, phase, &ctx);
                    assert!(center.1 >= lanes::CENTER_MIN_Y && center.1 <= lanes::CENTER_MAX_Y);

                    let lw = engine.target_position(Role::LeftWing, phase, &ctx);
                    assert!(lw.1 <= lanes::LEFT_WING_MAX_Y);

                    let ld = engine.target_position(Role::LeftDefense, phase, &ctx);
                    assert!(ld.1 <= lanes::LEFT_HALF_MAX_Y);
                    let push = (ld.0 - engine.own_goal().0) * engine.attack_dir;
                    assert!(push <= engine.tuning.defense_max_push_m + 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_phase_tracker_basic_transitions() {
        let tuning = FormationTuning::default();
        let mut tracker = PhaseTracker::default();
        let own_goal = rink::own_goal_center(1.0);

        // Own carrier: attacking
        let p = tracker.update(TeamSide::Home, Some(TeamSide::Home), rink::CENTER, own_goal, &tuning);
        assert_eq!(p, MatchPhase::Attacking);

        // Opponent carrier: defending
        let p = tracker.update(TeamSide::Home, Some(TeamSide::Away), rink::CENTER, own_goal, &tuning);
        assert_eq!(p, MatchPhase::Defending);

        // Loose at center ice: neutral
        let p = tracker.update(TeamSide::Home, None, rink::CENTER, own_goal, &tuning);
        assert_eq!(p, MatchPhase::Neutral);
    }

    #[test]
    fn test_phase_tracker_hysteresis_margin() {
        let tuning = FormationTuning::default();
        let mut tracker = PhaseTracker::default();
        let own_goal = rink::own_goal_center(1.0);

        // Loose puck just inside the enter threshold: defending
        let near = (own_goal.0 + tuning.defend_enter_m - 1.0, own_goal.1);
        assert_eq!(
            tracker.update(TeamSide::Home, None, near, own_goal, &tuning),
            MatchPhase::Defending
        );

        // Drifts just past the enter threshold: still defending (margin)
        let boundary = (own_goal.0 + tuning.defend_enter_m + 1.0, own_goal.1);
        assert_eq!(
            tracker.update(TeamSide::Home, None, boundary, own_goal, &tuning),
            MatchPhase::Defending
        );

        // Beyond enter + margin: finally neutral
        let far = (own_goal.0 + tuning.defend_enter_m + tuning.defend_exit_margin_m + 1.0, own_goal.1);
        assert_eq!(
            tracker.update(TeamSide::Home, None, far, own_goal, &tuning),
            MatchPhase::Neutral
        );

        // Coming back in at the boundary point from Neutral: not defending
        // until it crosses the tighter enter threshold again
        assert_eq!(
            tracker.update(TeamSide::Home, None, boundary, own_goal, &tuning),
            MatchPhase::Neutral
        );
    }
}
