//! # Burpee Core Library
//!
//! Core logic for the Burpee interval timer: it turns a workout duration
//! and a burpee count into a per-repetition timing schedule and drives a
//! tick-based countdown with audio-cue and image-crossfade events. All
//! operations are available via the standalone CLI binary; any richer
//! front end is a thin presentation layer over this library.
//!
//! ## Architecture
//!
//! - **Planner**: pure validation and arithmetic producing an immutable
//!   [`WorkoutPlan`]
//! - **Countdown Engine**: a state machine that requires the caller to
//!   invoke `tick()` every 10 ms for progress; it emits [`Event`] values
//!   and holds no rendering, audio, or clock handles
//! - **Crossfade**: a two-layer image blend on its own wall-clock, fed by
//!   the engine's step events
//! - **Storage**: TOML-based configuration for presentation defaults
//!
//! ## Key Components
//!
//! - [`WorkoutPlan`]: validated per-repetition schedule
//! - [`CountdownEngine`]: core countdown state machine
//! - [`Crossfade`]: image transition state
//! - [`Config`]: application configuration management

pub mod animation;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use animation::{Crossfade, FadeFrame, ImageLayer, ImageLoad};
pub use error::{ConfigError, CoreError, PlanError, Result};
pub use events::{Event, ToneKind};
pub use storage::Config;
pub use timer::{
    CountdownEngine, CycleKind, EngineState, Phase, WorkoutParams, WorkoutPlan, TICK,
};
