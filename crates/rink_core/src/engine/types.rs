//! Core data model: teams, roles, skaters
//!
//! Positions and velocities are `(f32, f32)` meter tuples; the small vector
//! helpers in [`vec2`] are the only math this core needs.

use serde::{Deserialize, Serialize};

/// Tuple vector helpers shared across the engine.
pub mod vec2 {
    pub fn add(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
        (a.0 + b.0, a.1 + b.1)
    }

    pub fn sub(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
        (a.0 - b.0, a.1 - b.1)
    }

    pub fn scale(v: (f32, f32), s: f32) -> (f32, f32) {
        (v.0 * s, v.1 * s)
    }

    pub fn dot(a: (f32, f32), b: (f32, f32)) -> f32 {
        a.0 * b.0 + a.1 * b.1
    }

    pub fn length(v: (f32, f32)) -> f32 {
        (v.0 * v.0 + v.1 * v.1).sqrt()
    }

    pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
        length(sub(a, b))
    }

    /// Zero vector for near-zero input, unit vector otherwise.
    pub fn normalize(v: (f32, f32)) -> (f32, f32) {
        let len = length(v);
        if len < 1e-4 {
            (0.0, 0.0)
        } else {
            (v.0 / len, v.1 / len)
        }
    }

    /// Clamp a vector's length to `max_len`.
    pub fn clamp_length(v: (f32, f32), max_len: f32) -> (f32, f32) {
        let len = length(v);
        if len > max_len && len > 1e-4 {
            scale(v, max_len / len)
        } else {
            v
        }
    }

    /// Rotate a vector by `angle` radians.
    pub fn rotate(v: (f32, f32), angle: f32) -> (f32, f32) {
        let (sin, cos) = angle.sin_cos();
        (v.0 * cos - v.1 * sin, v.0 * sin + v.1 * cos)
    }
}

/// One of the two benches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// The five on-ice positional roles. The goaltender is external geometry,
/// like the goal mouth itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Center,
    LeftWing,
    RightWing,
    LeftDefense,
    RightDefense,
}

impl Role {
    /// Roles in roster order (also the per-team skater index order).
    pub const ALL: [Role; 5] = [
        Role::Center,
        Role::LeftWing,
        Role::RightWing,
        Role::LeftDefense,
        Role::RightDefense,
    ];

    pub fn is_forward(&self) -> bool {
        matches!(self, Role::Center | Role::LeftWing | Role::RightWing)
    }

    pub fn is_defense(&self) -> bool {
        matches!(self, Role::LeftDefense | Role::RightDefense)
    }

    pub fn is_wing(&self) -> bool {
        matches!(self, Role::LeftWing | Role::RightWing)
    }

    /// Which lateral half (low-Y = left) the role belongs to, if it is
    /// bound to one.
    pub fn lateral_sign(&self) -> f32 {
        match self {
            Role::LeftWing | Role::LeftDefense => -1.0,
            Role::RightWing | Role::RightDefense => 1.0,
            Role::Center => 0.0,
        }
    }
}

/// Who is driving this skater each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Control {
    #[default]
    Cpu,
    Human,
}

/// Opaque multiplicative scalars supplied by the data collaborator at
/// initialization. The core never interprets them beyond multiplying its
/// own base constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SkaterProfile {
    /// Skating speed multiplier
    pub speed: f32,
    /// Shot/pass/check power multiplier
    pub power: f32,
    /// Action accuracy multiplier (reduces aim noise)
    pub accuracy: f32,
    /// Possession radius multiplier
    pub reach: f32,
}

impl Default for SkaterProfile {
    fn default() -> Self {
        Self { speed: 1.0, power: 1.0, accuracy: 1.0, reach: 1.0 }
    }
}

/// Difficulty tier for a CPU-controlled bench. Modulates exactly three
/// scalars; the decision priority rules are identical across tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DifficultyTier {
    Rookie,
    #[default]
    Pro,
    AllStar,
}

impl DifficultyTier {
    /// Ticks between selecting a new behavior and its effects applying.
    pub fn reaction_delay_ticks(&self) -> u64 {
        match self {
            DifficultyTier::Rookie => 6,
            DifficultyTier::Pro => 3,
            DifficultyTier::AllStar => 1,
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        match self {
            DifficultyTier::Rookie => 0.9,
            DifficultyTier::Pro => 1.0,
            DifficultyTier::AllStar => 1.05,
        }
    }

    pub fn accuracy_multiplier(&self) -> f32 {
        match self {
            DifficultyTier::Rookie => 0.85,
            DifficultyTier::Pro => 1.0,
            DifficultyTier::AllStar => 1.1,
        }
    }
}

/// One on-ice participant. Created at match setup, repositioned every tick,
/// never destroyed mid-match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skater {
    pub team: TeamSide,
    pub role: Role,
    pub control: Control,
    pub profile: SkaterProfile,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
}

impl Skater {
    pub fn new(team: TeamSide, role: Role) -> Self {
        Self {
            team,
            role,
            control: Control::Cpu,
            profile: SkaterProfile::default(),
            position: super::rink::CENTER,
            velocity: (0.0, 0.0),
        }
    }

    pub fn with_profile(mut self, profile: SkaterProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_control(mut self, control: Control) -> Self {
        self.control = control;
        self
    }

    pub fn speed(&self) -> f32 {
        vec2::length(self.velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_normalize() {
        let n = vec2::normalize((3.0, 4.0));
        assert!((vec2::length(n) - 1.0).abs() < 1e-5);
        assert_eq!(vec2::normalize((0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn test_vec2_clamp_length() {
        let v = vec2::clamp_length((6.0, 8.0), 5.0);
        assert!((vec2::length(v) - 5.0).abs() < 1e-4);
        // Shorter vectors pass through untouched
        assert_eq!(vec2::clamp_length((1.0, 0.0), 5.0), (1.0, 0.0));
    }

    #[test]
    fn test_vec2_rotate_quarter_turn() {
        let v = vec2::rotate((1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!(v.0.abs() < 1e-6);
        assert!((v.1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(TeamSide::Home.opponent(), TeamSide::Away);
        assert_eq!(TeamSide::Away.opponent(), TeamSide::Home);
    }

    #[test]
    fn test_role_classification() {
        assert!(Role::Center.is_forward());
        assert!(Role::LeftWing.is_wing());
        assert!(Role::RightDefense.is_defense());
        assert_eq!(Role::LeftDefense.lateral_sign(), -1.0);
        assert_eq!(Role::Center.lateral_sign(), 0.0);
        assert_eq!(Role::ALL.len(), 5);
    }

    #[test]
    fn test_difficulty_modulates_three_scalars_only() {
        // Harder tiers react faster, skate faster, aim better
        assert!(
            DifficultyTier::Rookie.reaction_delay_ticks()
                > DifficultyTier::AllStar.reaction_delay_ticks()
        );
        assert!(
            DifficultyTier::Rookie.speed_multiplier() < DifficultyTier::AllStar.speed_multiplier()
        );
        assert!(
            DifficultyTier::Rookie.accuracy_multiplier()
                < DifficultyTier::AllStar.accuracy_multiplier()
        );
    }
}
