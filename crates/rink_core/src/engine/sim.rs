//! Match engine: per-tick orchestration
//!
//! Fixed order every tick: input intents -> phase trackers -> formation
//! targets -> per-skater decision + movement -> puck integration +
//! possession arbitration -> action resolution -> goal-line check -> event
//! publication. Single-threaded, no I/O; the puck's attachment state is
//! mutated only through the possession arbiter.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::actions::{self, ActionKind};
use super::charge::ChargeTimer;
use super::config::EngineConfig;
use super::decision::{Behavior, BehaviorController, BehaviorState, DecisionContext, MoveDirective};
use super::engagement::{self, Engagement};
use super::events::{EventQueue, SimEvent};
use super::formation::{DefensiveScheme, FormationContext, FormationEngine, MatchPhase, PhaseTracker};
use super::input::{Command, SkaterIntent};
use super::possession::{PossessionArbiter, Puck};
use super::rink;
use super::snapshot::{ChargeSnap, PuckSnap, SkaterSnap, TickSnapshot};
use super::steering;
use super::timestep::TICK_DT;
use super::types::{vec2, Control, DifficultyTier, Role, Skater, SkaterProfile, TeamSide};
use crate::error::ConfigError;

pub const SKATERS_PER_SIDE: usize = 5;
pub const TOTAL_SKATERS: usize = 2 * SKATERS_PER_SIDE;

/// An active charge session, owned by exactly one skater.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ChargeSession {
    kind: ActionKind,
    timer: ChargeTimer,
}

/// The gameplay core. Owns every service explicitly; collaborators talk to
/// it through the methods below, never through globals.
#[derive(Debug, Clone)]
pub struct RinkEngine {
    config: EngineConfig,
    skaters: Vec<Skater>,
    behavior: Vec<BehaviorState>,
    controller: BehaviorController,
    puck: Puck,
    /// False until the first face-off resolves the puck transform; decision
    /// and possession logic no-op while unset
    puck_ready: bool,
    arbiter: PossessionArbiter,
    formations: HashMap<TeamSide, FormationEngine>,
    phases: HashMap<TeamSide, PhaseTracker>,
    difficulty: HashMap<TeamSide, DifficultyTier>,
    charges: Vec<Option<ChargeSession>>,
    /// Stun expiry table: skater -> tick the stagger wears off
    stunned_until: Vec<u64>,
    /// Human movement override for this tick, drained from intents
    movement_override: Vec<Option<(f32, f32)>>,
    events: EventQueue,
    rng: ChaCha8Rng,
    now_tick: u64,
}

impl RinkEngine {
    /// Build an engine with default rosters (five skaters per side, roster
    /// order Center/LW/RW/LD/RD; home attacks +X). Rejects an invalid
    /// configuration before any state exists.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut skaters = Vec::with_capacity(TOTAL_SKATERS);
        for role in Role::ALL {
            skaters.push(Skater::new(TeamSide::Home, role));
        }
        for role in Role::ALL {
            skaters.push(Skater::new(TeamSide::Away, role));
        }

        let mut formations = HashMap::new();
        formations.insert(TeamSide::Home, {
            let mut f = FormationEngine::new(TeamSide::Home, 1.0);
            f.tuning = config.formation;
            f
        });
        formations.insert(TeamSide::Away, {
            let mut f = FormationEngine::new(TeamSide::Away, -1.0);
            f.tuning = config.formation;
            f
        });

        let mut phases = HashMap::new();
        phases.insert(TeamSide::Home, PhaseTracker::default());
        phases.insert(TeamSide::Away, PhaseTracker::default());

        let mut difficulty = HashMap::new();
        difficulty.insert(TeamSide::Home, DifficultyTier::default());
        difficulty.insert(TeamSide::Away, DifficultyTier::default());

        Ok(Self {
            controller: BehaviorController::new(config.decision),
            arbiter: PossessionArbiter::new(config.possession),
            config,
            skaters,
            behavior: vec![BehaviorState::default(); TOTAL_SKATERS],
            puck: Puck::default(),
            puck_ready: false,
            formations,
            phases,
            difficulty,
            charges: vec![None; TOTAL_SKATERS],
            stunned_until: vec![0; TOTAL_SKATERS],
            movement_override: vec![None; TOTAL_SKATERS],
            events: EventQueue::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            now_tick: 0,
        })
    }

    // =========================================================
    // Data/config collaborator: applied at initialization
    // =========================================================

    pub fn set_profile(&mut self, idx: usize, profile: SkaterProfile) {
        if let Some(s) = self.skaters.get_mut(idx) {
            s.profile = profile;
        }
    }

    pub fn set_control(&mut self, idx: usize, control: Control) {
        if let Some(s) = self.skaters.get_mut(idx) {
            s.control = control;
        }
    }

    pub fn set_difficulty(&mut self, team: TeamSide, tier: DifficultyTier) {
        self.difficulty.insert(team, tier);
    }

    pub fn set_scheme(&mut self, team: TeamSide, scheme: DefensiveScheme) {
        if let Some(f) = self.formations.get_mut(&team) {
            f.scheme = scheme;
        }
    }

    // =========================================================
    // Match-flow collaborator
    // =========================================================

    /// Face-off: seat the puck, spread both teams into neutral shape
    /// around it, clear every transient window. Resolves the puck
    /// transform, enabling simulation.
    pub fn reset_positions(&mut self, face_off_point: (f32, f32)) {
        self.puck.place_at(face_off_point);
        self.arbiter.reset();
        self.puck_ready = true;

        let ctx = FormationContext { puck_position: self.puck.position, carrier_position: None };
        for idx in 0..self.skaters.len() {
            let team = self.skaters[idx].team;
            let role = self.skaters[idx].role;
            let target = self.formations[&team].target_position(role, MatchPhase::Neutral, &ctx);
            self.skaters[idx].position = target;
            self.skaters[idx].velocity = (0.0, 0.0);
            self.behavior[idx].reset(self.now_tick);
            self.charges[idx] = None;
            self.stunned_until[idx] = 0;
        }
        for tracker in self.phases.values_mut() {
            tracker.reset();
        }
        debug!(?face_off_point, "positions reset for face-off");
    }

    /// Unconditional attachment override (face-off wins, penalty awards).
    pub fn force_attach(&mut self, idx: usize) {
        if idx < self.skaters.len() {
            self.arbiter.force_attach(&mut self.puck, idx);
        }
    }

    // =========================================================
    // Presentation collaborator
    // =========================================================

    pub fn snapshot(&self) -> TickSnapshot {
        let charges = self
            .charges
            .iter()
            .enumerate()
            .filter_map(|(idx, session)| {
                session.as_ref().and_then(|s| {
                    s.timer.progress(&self.config.charge).map(|normalized| ChargeSnap {
                        skater: idx,
                        kind: s.kind,
                        normalized,
                    })
                })
            })
            .collect();

        TickSnapshot {
            tick: self.now_tick,
            skaters: self
                .skaters
                .iter()
                .enumerate()
                .map(|(idx, s)| SkaterSnap {
                    team: s.team,
                    role: s.role,
                    position: s.position,
                    velocity: s.velocity,
                    behavior: self.behavior[idx].behavior,
                    has_puck: self.puck.carrier == Some(idx),
                })
                .collect(),
            puck: self.puck_ready.then(|| PuckSnap {
                position: self.puck.position,
                velocity: self.puck.velocity,
                carrier: self.puck.carrier,
            }),
            charges,
        }
    }

    /// Drain this tick's observations.
    pub fn take_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    pub fn skaters(&self) -> &[Skater] {
        &self.skaters
    }

    pub fn puck(&self) -> &Puck {
        &self.puck
    }

    pub fn behavior_of(&self, idx: usize) -> Behavior {
        self.behavior[idx].behavior
    }

    pub fn phase_of(&self, team: TeamSide) -> MatchPhase {
        self.phases[&team].phase()
    }

    pub fn current_tick(&self) -> u64 {
        self.now_tick
    }

    fn attack_dir(&self, team: TeamSide) -> f32 {
        self.formations[&team].attack_dir
    }

    fn carrier_team(&self) -> Option<TeamSide> {
        self.puck.carrier.map(|idx| self.skaters[idx].team)
    }

    fn is_stunned(&self, idx: usize) -> bool {
        self.now_tick < self.stunned_until[idx]
    }

    // =========================================================
    // The tick
    // =========================================================

    /// Advance the simulation one fixed step. `intents` come from the input
    /// collaborator; CPU skaters generate their own.
    pub fn tick(&mut self, intents: &[SkaterIntent]) {
        if !self.puck_ready {
            // Transient unavailability: retry next tick
            self.now_tick += 1;
            return;
        }

        let mut commands = self.drain_intents(intents);

        // 1. Possession-derived phase per team
        let carrier_team = self.carrier_team();
        for (team, tracker) in self.phases.iter_mut() {
            let own_goal = rink::own_goal_center(self.formations[team].attack_dir);
            tracker.update(*team, carrier_team, self.puck.position, own_goal, &self.config.formation);
        }

        // 2. Formation targets
        let formation_targets = self.compute_formation_targets();

        // 3. Decisions and movement
        self.step_decisions(&formation_targets);
        self.step_movement(&formation_targets);

        // 4. CPU action policy, then resolve all commands
        self.cpu_commands(&mut commands);
        self.step_charges(&mut commands);

        // 5. Puck integration + possession arbitration
        self.step_possession();

        self.now_tick += 1;
    }

    /// Pull this tick's intents into per-skater slots. Movement overrides
    /// apply to human-controlled skaters only.
    fn drain_intents(&mut self, intents: &[SkaterIntent]) -> Vec<(usize, Command)> {
        for slot in self.movement_override.iter_mut() {
            *slot = None;
        }
        let mut commands = Vec::new();
        for intent in intents {
            let idx = intent.skater;
            if idx >= self.skaters.len() {
                continue;
            }
            if self.skaters[idx].control == Control::Human {
                if let Some(movement) = intent.movement {
                    self.movement_override[idx] = Some(movement);
                }
                if let Some(command) = intent.command {
                    commands.push((idx, command));
                }
            }
        }
        commands
    }

    fn compute_formation_targets(&self) -> Vec<(f32, f32)> {
        let carrier_position = self.puck.carrier.map(|idx| self.skaters[idx].position);
        let ctx = FormationContext { puck_position: self.puck.position, carrier_position };
        self.skaters
            .iter()
            .map(|s| {
                let phase = self.phases[&s.team].phase();
                self.formations[&s.team].target_position(s.role, phase, &ctx)
            })
            .collect()
    }

    fn step_decisions(&mut self, formation_targets: &[(f32, f32)]) {
        for idx in 0..self.skaters.len() {
            let team = self.skaters[idx].team;
            let ctx = DecisionContext {
                skaters: &self.skaters,
                puck: Some(&self.puck),
                attack_dir: self.formations[&team].attack_dir,
                formation_target: Some(formation_targets[idx]),
                now_tick: self.now_tick,
            };
            let delay = self.difficulty[&team].reaction_delay_ticks();
            self.controller.step(idx, &mut self.behavior[idx], &ctx, delay);
        }
    }

    fn step_movement(&mut self, formation_targets: &[(f32, f32)]) {
        let motion = self.config.motion;
        let mut desired: Vec<(f32, f32)> = Vec::with_capacity(self.skaters.len());

        for idx in 0..self.skaters.len() {
            let skater = &self.skaters[idx];
            let team = skater.team;
            let tier = self.difficulty[&team];
            let max_speed = motion.max_speed_mps * skater.profile.speed * tier.speed_multiplier();

            if self.is_stunned(idx) {
                desired.push((0.0, 0.0));
                continue;
            }

            // Human override takes the wheel for that skater
            if let Some(direction) = self.movement_override[idx] {
                desired.push(vec2::scale(vec2::normalize(direction), max_speed));
                continue;
            }

            let ctx = DecisionContext {
                skaters: &self.skaters,
                puck: Some(&self.puck),
                attack_dir: self.formations[&team].attack_dir,
                formation_target: Some(formation_targets[idx]),
                now_tick: self.now_tick,
            };
            let aggression = self.aggression_for(idx);
            let mut directive =
                self.controller.movement(idx, self.behavior[idx].behavior, &ctx, aggression);

            // Passive engagement holds shape: shadow the carrier laterally
            // and close distance only once the gap exceeds the cap
            if self.behavior[idx].behavior == Behavior::EngageCarrier {
                if let Some(carrier_idx) = self.puck.carrier {
                    let tuning = &self.config.engagement;
                    let gap =
                        vec2::distance(skater.position, self.skaters[carrier_idx].position);
                    if aggression <= tuning.passive_scalar && gap <= tuning.passive_gap_cap_m {
                        directive = MoveDirective {
                            target: Some((
                                skater.position.0,
                                self.skaters[carrier_idx].position.1,
                            )),
                            speed_scale: tuning.passive_scalar,
                            arrive: true,
                        };
                    }
                }
            }

            let v = match directive.target {
                None => (0.0, 0.0),
                Some(target) => {
                    let speed = max_speed * directive.speed_scale;
                    if directive.arrive {
                        steering::arrive(skater.position, target, speed, motion.arrive_slowing_m)
                    } else {
                        steering::seek(skater.position, target, speed)
                    }
                }
            };
            desired.push(v);
        }

        // Blend toward the desired velocity (skates have inertia), then step
        for idx in 0..self.skaters.len() {
            let rate = if desired[idx] == (0.0, 0.0) {
                motion.idle_damping_per_s
            } else {
                motion.accel_per_s
            };
            let blend = (rate * TICK_DT).clamp(0.0, 1.0);
            let s = &mut self.skaters[idx];
            s.velocity = vec2::add(s.velocity, vec2::scale(vec2::sub(desired[idx], s.velocity), blend));
            s.position = rink::clamp_to_rink(vec2::add(s.position, vec2::scale(s.velocity, TICK_DT)));
        }
    }

    /// Engagement evaluator output for a defender closing on the carrier.
    fn aggression_for(&self, idx: usize) -> f32 {
        let tuning = &self.config.engagement;
        match self.puck.carrier {
            Some(carrier_idx) if self.skaters[carrier_idx].team != self.skaters[idx].team => {
                let carrier = &self.skaters[carrier_idx];
                let call = engagement::evaluate(
                    carrier.position,
                    carrier.velocity,
                    self.puck.position,
                    self.puck.velocity,
                    self.skaters[idx].position,
                    tuning,
                );
                tuning.aggression_scalar(call)
            }
            _ => tuning.aggression_scalar(Engagement::Aggressive),
        }
    }

    /// Minimal CPU action policy: carriers wind up a shot inside scoring
    /// range and release in the perfect window; engaged defenders in check
    /// range throw a quick check. Difficulty shapes accuracy downstream,
    /// never these rules.
    fn cpu_commands(&self, commands: &mut Vec<(usize, Command)>) {
        let charge = &self.config.charge;
        for idx in 0..self.skaters.len() {
            if self.skaters[idx].control == Control::Human || self.is_stunned(idx) {
                continue;
            }
            let team = self.skaters[idx].team;
            let ctx = DecisionContext {
                skaters: &self.skaters,
                puck: Some(&self.puck),
                attack_dir: self.formations[&team].attack_dir,
                formation_target: None,
                now_tick: self.now_tick,
            };

            match self.behavior[idx].behavior {
                Behavior::AdvanceToGoal if self.puck.carrier == Some(idx) => {
                    match self.charges[idx] {
                        None if self.controller.in_scoring_range(idx, &ctx) => {
                            commands.push((idx, Command::StartCharge(ActionKind::Shot)));
                        }
                        Some(session) if session.kind == ActionKind::Shot => {
                            // Release at the middle of the perfect window
                            let release_at = (charge.zone_low + charge.zone_high) * 0.5;
                            if session
                                .timer
                                .progress(charge)
                                .is_some_and(|p| p >= release_at)
                            {
                                commands.push((idx, Command::ReleaseCharge(ActionKind::Shot)));
                            }
                        }
                        _ => {}
                    }
                }
                Behavior::EngageCarrier => {
                    if let Some(carrier_idx) = self.puck.carrier {
                        let dist = vec2::distance(
                            self.skaters[idx].position,
                            self.skaters[carrier_idx].position,
                        );
                        if dist <= self.config.actions.check_range_m && self.charges[idx].is_none()
                        {
                            commands.push((idx, Command::Tap(ActionKind::BodyCheck)));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Advance active charge sessions, consume commands, resolve released
    /// actions. Losing possession cancels a possession-bound session.
    fn step_charges(&mut self, commands: &mut Vec<(usize, Command)>) {
        // Sessions whose precondition evaporated are cancelled, not resolved
        for idx in 0..self.charges.len() {
            let cancel = match self.charges[idx] {
                Some(session) => {
                    let needs_puck =
                        matches!(session.kind, ActionKind::Shot | ActionKind::SaucerPass);
                    (needs_puck && self.puck.carrier != Some(idx)) || self.is_stunned(idx)
                }
                None => false,
            };
            if cancel {
                if let Some(session) = self.charges[idx].as_mut() {
                    session.timer.cancel();
                }
                self.charges[idx] = None;
            }
        }

        for (idx, command) in commands.drain(..) {
            match command {
                Command::StartCharge(kind) => self.start_charge(idx, kind),
                Command::ReleaseCharge(kind) => self.release_charge(idx, kind),
                Command::Tap(kind) => {
                    self.start_charge(idx, kind);
                    self.release_charge(idx, kind);
                }
            }
        }

        // Accumulate elapsed time and emit the continuous progress signal
        for idx in 0..self.charges.len() {
            if let Some(session) = self.charges[idx].as_mut() {
                session.timer.advance(TICK_DT);
                if let Some(normalized) = session.timer.progress(&self.config.charge) {
                    self.events.push(SimEvent::ChargeProgress {
                        skater: idx,
                        kind: session.kind,
                        normalized,
                    });
                }
            }
        }
    }

    fn start_charge(&mut self, idx: usize, kind: ActionKind) {
        let needs_puck = matches!(kind, ActionKind::Shot | ActionKind::SaucerPass);
        if needs_puck && self.puck.carrier != Some(idx) {
            debug!(skater = idx, ?kind, "charge start ignored: not carrying");
            return;
        }
        if self.is_stunned(idx) {
            return;
        }
        let mut timer = ChargeTimer::new();
        timer.start();
        self.charges[idx] = Some(ChargeSession { kind, timer });
    }

    fn release_charge(&mut self, idx: usize, kind: ActionKind) {
        let Some(session) = self.charges[idx] else {
            // Stop without a session: no-op by contract
            return;
        };
        if session.kind != kind {
            return;
        }
        let mut timer = session.timer;
        self.charges[idx] = None;
        let Some(outcome) = timer.stop(&self.config.charge) else {
            return;
        };

        self.events.push(SimEvent::ChargeResolved {
            skater: idx,
            kind,
            zone: outcome.zone,
            normalized: outcome.normalized,
            power_multiplier: outcome.power_multiplier,
        });

        match kind {
            ActionKind::Shot => self.resolve_shot(idx, &outcome),
            ActionKind::SaucerPass => self.resolve_pass(idx, &outcome),
            ActionKind::BodyCheck => self.resolve_check(idx, &outcome),
        }
    }

    fn accuracy_multiplier(&self, idx: usize) -> f32 {
        self.difficulty[&self.skaters[idx].team].accuracy_multiplier()
    }

    fn resolve_shot(&mut self, idx: usize, outcome: &super::charge::ChargeOutcome) {
        if self.puck.carrier != Some(idx) {
            return;
        }
        let team = self.skaters[idx].team;
        let goal = rink::goal_center(self.attack_dir(team));
        let impulse = actions::resolve_shot(
            &self.skaters[idx],
            outcome,
            goal,
            self.accuracy_multiplier(idx),
            &self.config.actions,
            &mut self.rng,
        );
        self.fire_puck(idx, impulse.velocity);
    }

    fn resolve_pass(&mut self, idx: usize, outcome: &super::charge::ChargeOutcome) {
        if self.puck.carrier != Some(idx) {
            return;
        }
        let passer = &self.skaters[idx];
        let receiver = self
            .skaters
            .iter()
            .enumerate()
            .filter(|(i, s)| *i != idx && s.team == passer.team)
            .min_by(|(_, a), (_, b)| {
                vec2::distance(a.position, passer.position)
                    .partial_cmp(&vec2::distance(b.position, passer.position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        let Some((_, receiver)) = receiver else {
            return;
        };
        let impulse = actions::resolve_pass(
            passer,
            receiver.position,
            receiver.velocity,
            true,
            outcome,
            self.accuracy_multiplier(idx),
            &self.config.actions,
            &mut self.rng,
        );
        self.fire_puck(idx, impulse.velocity);
    }

    fn resolve_check(&mut self, idx: usize, outcome: &super::charge::ChargeOutcome) {
        let Some(carrier_idx) = self.puck.carrier else {
            return;
        };
        if self.skaters[carrier_idx].team == self.skaters[idx].team {
            return;
        }
        let aggression = self.aggression_for(idx);
        let result = actions::resolve_check(
            &self.skaters[idx],
            &self.skaters[carrier_idx],
            outcome,
            aggression,
            &self.config.actions,
        );
        if !result.landed {
            return;
        }
        self.stunned_until[carrier_idx] = self.now_tick + result.stun_ticks;
        self.events.push(SimEvent::CheckLanded { checker: idx, target: carrier_idx });
        self.fire_puck(carrier_idx, result.knock_velocity);
    }

    /// Fire the puck loose from `from_idx` with the given velocity:
    /// release (opening the suppression window), then apply the impulse.
    fn fire_puck(&mut self, from_idx: usize, velocity: (f32, f32)) {
        self.arbiter.release(&mut self.puck, self.now_tick);
        self.puck.velocity = velocity;
        self.events.push(SimEvent::PuckReleased { skater: from_idx });
    }

    /// Puck integration, carry-follow, automatic release, suppression
    /// bookkeeping, pickup attempts, goal-line check.
    fn step_possession(&mut self) {
        let prev_position = self.puck.position;

        if let Some(carrier_idx) = self.puck.carrier {
            let carrier = &self.skaters[carrier_idx];
            self.puck.follow_carrier(
                carrier.position,
                carrier.velocity,
                self.config.possession.carry_lead_m,
            );
        } else {
            self.puck.integrate(TICK_DT, &self.config.possession);
        }

        self.arbiter.update(&mut self.puck, &self.skaters, self.now_tick);

        // Pickup attempts, nearest first; the arbiter enforces the rest
        if self.puck.is_loose() {
            let mut candidates: Vec<(usize, f32)> = self
                .skaters
                .iter()
                .enumerate()
                .filter(|(idx, _)| !self.is_stunned(*idx))
                .map(|(idx, s)| (idx, vec2::distance(s.position, self.puck.position)))
                .filter(|(idx, dist)| {
                    *dist
                        <= self.config.possession.possession_radius_m
                            * self.skaters[*idx].profile.reach
                })
                .collect();
            candidates
                .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            for (idx, _) in candidates {
                if self.arbiter.try_attach(&mut self.puck, idx, &self.skaters) {
                    self.events.push(SimEvent::PossessionGained { skater: idx });
                    break;
                }
            }
        }

        self.check_goal_line(prev_position);
    }

    /// Fire the goal-scored event when the loose puck crosses a goal mouth.
    /// The match-flow collaborator owns what happens next; the core pauses
    /// until the next face-off.
    fn check_goal_line(&mut self, prev_position: (f32, f32)) {
        if self.puck.carrier.is_some() {
            return;
        }
        let new_position = self.puck.position;
        for team in [TeamSide::Home, TeamSide::Away] {
            let goal = self.formations[&team].own_goal();
            let before = prev_position.0 - goal.0;
            let after = new_position.0 - goal.0;
            // Crossing from in-play side toward the end boards
            let defended_dir = -self.attack_dir(team);
            let crossed = before * defended_dir <= 0.0 && after * defended_dir > 0.0;
            if !crossed {
                continue;
            }
            let span = new_position.0 - prev_position.0;
            let t = if span.abs() < 1e-6 { 0.0 } else { (goal.0 - prev_position.0) / span };
            let y_at = prev_position.1 + (new_position.1 - prev_position.1) * t;
            if (y_at - goal.1).abs() <= self.config.goal.mouth_half_width_m {
                debug!(conceded_by = ?team, "goal scored");
                self.events.push(SimEvent::GoalScored { conceded_by: team });
                self.puck_ready = false;
                return;
            }
        }
    }
}

/// Center-ice face-off helper shared by tests and collaborators.
pub fn center_face_off(engine: &mut RinkEngine) {
    engine.reset_positions(rink::CENTER);
}
