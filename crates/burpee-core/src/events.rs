use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{EngineState, Phase};

/// Audio cue emitted on a step boundary.
///
/// The engine only names the cue; frequency and length are hints for audio
/// collaborators, which are free to ignore them (or the whole event) when
/// sound is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneKind {
    /// Short neutral click marking an ordinary step.
    Step,
    /// Longer, higher tone marking the last step of a burpee.
    Final,
}

impl ToneKind {
    pub fn frequency_hz(self) -> f64 {
        match self {
            ToneKind::Step => 880.0,
            ToneKind::Final => 1320.0,
        }
    }

    pub fn duration_ms(self) -> u64 {
        match self {
            ToneKind::Step => 50,
            ToneKind::Final => 300,
        }
    }
}

/// Every state change in the engine produces an Event.
/// Presentation layers consume events; the engine holds no rendering handles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WorkoutStarted {
        total_reps: u32,
        steps_per_rep: u32,
        prep_secs: f64,
        at: DateTime<Utc>,
    },
    /// A movement step began. Carries both the tone cue and the target
    /// illustration index so audio and image collaborators stay in sync
    /// with the step counter.
    StepAdvanced {
        rep: u32,
        step: u32,
        tone: ToneKind,
        image_index: u32,
        at: DateTime<Utc>,
    },
    /// A full burpee cycle (steps + rest) finished.
    RepCompleted {
        rep: u32,
        at: DateTime<Utc>,
    },
    WorkoutPaused {
        at: DateTime<Utc>,
    },
    WorkoutResumed {
        at: DateTime<Utc>,
    },
    WorkoutRestarted {
        at: DateTime<Utc>,
    },
    WorkoutReset {
        at: DateTime<Utc>,
    },
    /// Terminal event; emitted exactly once per workout.
    WorkoutCompleted {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: EngineState,
        rep: u32,
        total_reps: u32,
        step: u32,
        steps_per_rep: u32,
        phase: Phase,
        phase_remaining_secs: f64,
        total_remaining_secs: f64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
