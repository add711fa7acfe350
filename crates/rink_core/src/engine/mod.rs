pub mod actions;
pub mod charge;
pub mod config;
pub mod decision;
pub mod engagement;
pub mod events;
pub mod formation;
pub mod input;
pub mod possession;
pub mod rink;
pub mod sim;
pub mod snapshot;
pub mod steering;
pub mod timestep;
pub mod types;

pub use actions::{ActionKind, ActionTuning, CheckOutcome, PuckImpulse};
pub use charge::{ChargeOutcome, ChargeTimer, ChargeTiming, ChargeZone};
pub use config::{EngineConfig, GoalGeometry, MotionTuning};
pub use decision::{Behavior, BehaviorController, BehaviorState, DecisionTuning, MoveDirective};
pub use engagement::{evaluate as evaluate_engagement, Engagement, EngagementTuning};
pub use events::{EventQueue, SimEvent};
pub use formation::{
    DefensiveScheme, FormationContext, FormationEngine, FormationTuning, MatchPhase, PhaseTracker,
};
pub use input::{Command, SkaterIntent};
pub use possession::{PossessionArbiter, PossessionTuning, Puck};
pub use sim::{center_face_off, RinkEngine, SKATERS_PER_SIDE, TOTAL_SKATERS};
pub use snapshot::{ChargeSnap, PuckSnap, SkaterSnap, TickSnapshot};
pub use types::{Control, DifficultyTier, Role, Skater, SkaterProfile, TeamSide};
