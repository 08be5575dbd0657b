mod display;
mod engine;
mod plan;

pub use display::{format_clock, format_phase_secs, format_rep, format_step, Phase};
pub use engine::{CountdownEngine, EngineState, TICK};
pub use plan::{CycleKind, WorkoutParams, WorkoutPlan};
