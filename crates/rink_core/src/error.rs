use thiserror::Error;

/// Configuration-load rejection. Authoring mistakes are caught here, before
/// any simulation starts; the per-tick runtime path never raises — invalid
/// calls are no-ops per the engine contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("charge zone order invalid: zone_low {low} must be < zone_high {high}, both in [0, 1]")]
    ChargeZoneOrder { low: f32, high: f32 },

    #[error("perfect multiplier {perfect} must exceed weak {weak} and overcharged {overcharged}")]
    ChargeMultiplierOrder { weak: f32, perfect: f32, overcharged: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange { name: &'static str, value: f32, min: f32, max: f32 },

    #[error("roster must field exactly {expected} skaters per side, got {found}")]
    InvalidRosterSize { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
