//! Display derivation helpers.
//!
//! Pure formatting over engine state. The engine owns no rendering handles;
//! presentation layers pull a snapshot and format it with these.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Phase of the current cycle, derived from the engine counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Count-in before the first burpee.
    Prep,
    /// Movement steps of a burpee.
    Active,
    /// Rest tail of a cycle.
    Rest,
}

impl Phase {
    /// Label shown next to the per-phase countdown.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Prep => "Prep time",
            Phase::Active => "Burpee time",
            Phase::Rest => "Rest time",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One-decimal countdown, zero-padded so the text width never jumps.
pub fn format_phase_secs(secs: f64) -> String {
    format!("{:04.1} s", secs.max(0.0))
}

/// `m:ss` clock for the whole-workout countdown.
pub fn format_clock(secs: f64) -> String {
    let whole = secs.max(0.0) as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Step counter padded to two digits, e.g. `03/6`.
pub fn format_step(step: u32, steps_per_rep: u32) -> String {
    format!("{step:02}/{steps_per_rep}")
}

/// Rep counter padded to the width of the total, e.g. `007/100`.
pub fn format_rep(rep: u32, total_reps: u32) -> String {
    let width = total_reps.to_string().len();
    format!("{rep:0width$}/{total_reps}")
}
