//! Per-skater behavior state machine
//!
//! Each tick, one behavior is selected from top-down priority rules; the
//! first satisfied rule wins. Two guards keep the result stable:
//!
//! - **Hysteresis**: a transition is applied only from Idle or after a
//!   minimum dwell time in the current behavior, so two close-priority
//!   rules cannot flip-flop on noisy world state.
//! - **Nearest-only arbitration**: the engage/pursue rules fire for the one
//!   teammate nearest to the contested target; everyone else falls through
//!   to a lower rule. This is the anti-swarm mechanism.
//!
//! Difficulty tiers delay when a newly-selected behavior's effects apply;
//! they never alter the rules themselves.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::possession::Puck;
use super::rink;
use super::steering;
use super::types::{vec2, Skater};
use crate::error::ConfigError;

/// The behaviors a skater can be executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Behavior {
    #[default]
    Idle,
    PursuePuck,
    AdvanceToGoal,
    DefendGoal,
    SupportPass,
    EngageCarrier,
    ReturnToFormation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecisionTuning {
    /// Minimum time in a behavior before another transition is allowed
    /// (does not gate leaving Idle)
    pub min_dwell_s: f32,
    /// An opposing carrier closer than this can be engaged
    pub engage_range_m: f32,
    /// A loose puck closer than this can be pursued
    pub detect_range_m: f32,
    /// Puck closer than this to the own goal triggers DefendGoal
    pub own_goal_threat_m: f32,
    /// Within this distance of the formation target a skater idles
    pub formation_tolerance_m: f32,
    /// Carrier inside this range of the attacked goal looks for the shot
    pub scoring_range_m: f32,
    /// Lateral nudge applied to the support target, away from coverage
    pub support_lane_bias_m: f32,
    /// Carrier speed factor while advancing with the puck
    pub advance_speed_factor: f32,
    /// DefendGoal interception point bias from the goal toward the puck
    pub defend_intercept_bias: f32,
    pub pursuit_lookahead_s: f32,
}

impl Default for DecisionTuning {
    fn default() -> Self {
        Self {
            min_dwell_s: 0.5,
            engage_range_m: 9.0,
            detect_range_m: 25.0,
            own_goal_threat_m: 15.0,
            formation_tolerance_m: 1.5,
            scoring_range_m: 12.0,
            support_lane_bias_m: 3.0,
            advance_speed_factor: 0.8,
            defend_intercept_bias: 0.35,
            pursuit_lookahead_s: 0.6,
        }
    }
}

impl DecisionTuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dwell_s < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "decision.min_dwell_s",
                value: self.min_dwell_s,
                min: 0.0,
                max: f32::MAX,
            });
        }
        if self.engage_range_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "decision.engage_range_m",
                value: self.engage_range_m,
            });
        }
        if self.detect_range_m <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "decision.detect_range_m",
                value: self.detect_range_m,
            });
        }
        Ok(())
    }
}

/// Persistent per-skater decision state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BehaviorState {
    pub behavior: Behavior,
    pub last_transition_tick: u64,
    /// Behavior selected but not yet effective (difficulty reaction delay)
    pending: Option<(Behavior, u64)>,
}

impl BehaviorState {
    pub fn reset(&mut self, now_tick: u64) {
        self.behavior = Behavior::Idle;
        self.last_transition_tick = now_tick;
        self.pending = None;
    }
}

/// Everything the priority rules read for one skater's decision. The puck
/// is `None` until the first face-off resolves it; evaluation is a no-op
/// for that tick.
pub struct DecisionContext<'a> {
    pub skaters: &'a [Skater],
    pub puck: Option<&'a Puck>,
    /// Attack direction of the deciding skater's team
    pub attack_dir: f32,
    pub formation_target: Option<(f32, f32)>,
    pub now_tick: u64,
}

/// Where a behavior wants the skater to go this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveDirective {
    /// `None` decelerates in place
    pub target: Option<(f32, f32)>,
    /// Fraction of the skater's max speed
    pub speed_scale: f32,
    /// Decelerate on approach instead of overshooting
    pub arrive: bool,
}

impl MoveDirective {
    fn halt() -> Self {
        Self { target: None, speed_scale: 0.0, arrive: false }
    }
}

/// Stateless rule evaluator; per-skater state lives in [`BehaviorState`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BehaviorController {
    pub tuning: DecisionTuning,
}

impl BehaviorController {
    pub fn new(tuning: DecisionTuning) -> Self {
        Self { tuning }
    }

    /// Evaluate the priority rules and return the behavior they select.
    /// Pure with respect to `ctx`; hysteresis is applied in [`Self::step`].
    pub fn select(&self, idx: usize, ctx: &DecisionContext) -> Behavior {
        let puck = match ctx.puck {
            Some(p) => p,
            None => return Behavior::Idle,
        };
        let me = &ctx.skaters[idx];

        // 1. Carrying: take it to the net (shoot decision happens downstream)
        if puck.carrier == Some(idx) {
            return Behavior::AdvanceToGoal;
        }

        if let Some(carrier_idx) = puck.carrier {
            let carrier = &ctx.skaters[carrier_idx];
            if carrier.team != me.team {
                // 2. Opposing carrier in range: engage, nearest teammate only
                let in_range =
                    vec2::distance(me.position, carrier.position) <= self.tuning.engage_range_m;
                if in_range && is_nearest_teammate(idx, carrier.position, ctx.skaters) {
                    return Behavior::EngageCarrier;
                }
            }
        } else {
            // 3. Loose puck in detection range: pursue, nearest teammate only
            let dist = vec2::distance(me.position, puck.position);
            if dist <= self.tuning.detect_range_m
                && is_nearest_teammate(idx, puck.position, ctx.skaters)
            {
                return Behavior::PursuePuck;
            }
        }

        // 4. Puck threatening the own goal
        let own_goal = rink::own_goal_center(ctx.attack_dir);
        if vec2::distance(puck.position, own_goal) <= self.tuning.own_goal_threat_m {
            return Behavior::DefendGoal;
        }

        // A teammate has it: offer an outlet
        if let Some(carrier_idx) = puck.carrier {
            if ctx.skaters[carrier_idx].team == me.team {
                return Behavior::SupportPass;
            }
        }

        // 5. Recover shape, or rest once in position
        match ctx.formation_target {
            Some(target)
                if vec2::distance(me.position, target) > self.tuning.formation_tolerance_m =>
            {
                Behavior::ReturnToFormation
            }
            _ => Behavior::Idle,
        }
    }

    /// Run one decision tick: rule evaluation gated by dwell-time
    /// hysteresis, with the difficulty reaction delay deferring when a new
    /// behavior takes effect. Returns the behavior in effect this tick.
    pub fn step(
        &self,
        idx: usize,
        state: &mut BehaviorState,
        ctx: &DecisionContext,
        reaction_delay_ticks: u64,
    ) -> Behavior {
        if ctx.puck.is_none() {
            // Transient unavailability: skip evaluation, retry next tick
            return state.behavior;
        }

        let desired = self.select(idx, ctx);
        if desired == state.behavior {
            state.pending = None;
            return state.behavior;
        }

        let dwell_ticks = super::timestep::ticks_for(self.tuning.min_dwell_s);
        let gate_open = state.behavior == Behavior::Idle
            || ctx.now_tick.saturating_sub(state.last_transition_tick) >= dwell_ticks;
        if !gate_open {
            state.pending = None;
            return state.behavior;
        }

        match state.pending {
            Some((pending, effective_tick)) if pending == desired => {
                if ctx.now_tick >= effective_tick {
                    trace!(skater = idx, from = ?state.behavior, to = ?desired, "behavior transition");
                    state.behavior = desired;
                    state.last_transition_tick = ctx.now_tick;
                    state.pending = None;
                }
            }
            _ => {
                if reaction_delay_ticks == 0 {
                    trace!(skater = idx, from = ?state.behavior, to = ?desired, "behavior transition");
                    state.behavior = desired;
                    state.last_transition_tick = ctx.now_tick;
                    state.pending = None;
                } else {
                    state.pending = Some((desired, ctx.now_tick + reaction_delay_ticks));
                }
            }
        }
        state.behavior
    }

    /// Per-behavior movement directive. `aggression_scalar` comes from the
    /// engagement evaluator and only scales EngageCarrier.
    pub fn movement(
        &self,
        idx: usize,
        behavior: Behavior,
        ctx: &DecisionContext,
        aggression_scalar: f32,
    ) -> MoveDirective {
        let puck = match ctx.puck {
            Some(p) => p,
            None => return MoveDirective::halt(),
        };
        let me = &ctx.skaters[idx];

        match behavior {
            Behavior::Idle => MoveDirective::halt(),

            Behavior::PursuePuck => MoveDirective {
                target: Some(lead_target(me.position, puck.position, puck.velocity, self.tuning.pursuit_lookahead_s)),
                speed_scale: 1.0,
                arrive: false,
            },

            Behavior::EngageCarrier => {
                let target = puck
                    .carrier
                    .map(|c| {
                        let carrier = &ctx.skaters[c];
                        lead_target(
                            me.position,
                            carrier.position,
                            carrier.velocity,
                            self.tuning.pursuit_lookahead_s,
                        )
                    })
                    .unwrap_or(puck.position);
                MoveDirective { target: Some(target), speed_scale: aggression_scalar, arrive: false }
            }

            Behavior::AdvanceToGoal => MoveDirective {
                target: Some(rink::goal_center(ctx.attack_dir)),
                speed_scale: self.tuning.advance_speed_factor,
                arrive: false,
            },

            Behavior::DefendGoal => {
                // Formation target wins when present: it already encodes the
                // scheme-aware defensive shape.
                let target = ctx.formation_target.unwrap_or_else(|| {
                    steering::intercept_point(
                        puck.position,
                        rink::own_goal_center(ctx.attack_dir),
                        self.tuning.defend_intercept_bias,
                    )
                });
                MoveDirective { target: Some(target), speed_scale: 1.0, arrive: true }
            }

            Behavior::SupportPass => {
                let base = ctx.formation_target.unwrap_or(me.position);
                MoveDirective {
                    target: Some(self.support_target(idx, base, ctx)),
                    speed_scale: 1.0,
                    arrive: true,
                }
            }

            Behavior::ReturnToFormation => MoveDirective {
                target: ctx.formation_target.or(Some(me.position)),
                speed_scale: 1.0,
                arrive: true,
            },
        }
    }

    /// Should the carrier look for the shot rather than keep skating?
    /// Same AdvanceToGoal state; this picks the downstream action.
    pub fn in_scoring_range(&self, idx: usize, ctx: &DecisionContext) -> bool {
        let me = &ctx.skaters[idx];
        vec2::distance(me.position, rink::goal_center(ctx.attack_dir)) <= self.tuning.scoring_range_m
    }

    /// Bias the support position laterally away from the closest opposing
    /// coverage, opening a passing lane for the carrier.
    fn support_target(&self, idx: usize, base: (f32, f32), ctx: &DecisionContext) -> (f32, f32) {
        let me = &ctx.skaters[idx];
        let nearest_opponent = ctx
            .skaters
            .iter()
            .filter(|s| s.team != me.team)
            .map(|s| s.position)
            .min_by(|a, b| {
                vec2::distance(*a, base)
                    .partial_cmp(&vec2::distance(*b, base))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        match nearest_opponent {
            Some(opp) => {
                let away = vec2::normalize(vec2::sub(base, opp));
                let biased = vec2::add(base, vec2::scale(away, self.tuning.support_lane_bias_m));
                rink::clamp_to_rink(biased)
            }
            None => base,
        }
    }
}

/// Strict-less-than nearest scan among teammates. On an exact tie the
/// lower-indexed skater (evaluated first) wins, so at most one teammate
/// passes the gate for a given target in any tick.
fn is_nearest_teammate(idx: usize, target: (f32, f32), skaters: &[Skater]) -> bool {
    let me = &skaters[idx];
    let my_dist = vec2::distance(me.position, target);
    for (other_idx, other) in skaters.iter().enumerate() {
        if other_idx == idx || other.team != me.team {
            continue;
        }
        let dist = vec2::distance(other.position, target);
        if dist < my_dist || (dist == my_dist && other_idx < idx) {
            return false;
        }
    }
    true
}

/// Chase point leading a moving target.
fn lead_target(
    from: (f32, f32),
    target_pos: (f32, f32),
    target_vel: (f32, f32),
    max_lookahead_s: f32,
) -> (f32, f32) {
    let lookahead = (vec2::distance(from, target_pos) / 8.0).min(max_lookahead_s);
    vec2::add(target_pos, vec2::scale(target_vel, lookahead))
}
