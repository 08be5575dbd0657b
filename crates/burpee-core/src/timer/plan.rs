use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

/// Burpee variant. Determines the step count per repetition, the floor for
/// a custom per-burpee time, and how step numbers map onto the shared
/// illustration sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CycleKind {
    /// 6-step military burpee.
    Military,
    /// 10-step navy-seal burpee.
    NavySeal,
}

/// The 6-step movement reuses the first four and last three frames of the
/// 10-frame navy-seal illustration sequence.
const MILITARY_IMAGE_MAP: [u32; 7] = [0, 1, 2, 3, 8, 9, 10];

impl CycleKind {
    pub fn steps_per_rep(self) -> u32 {
        match self {
            CycleKind::Military => 6,
            CycleKind::NavySeal => 10,
        }
    }

    /// Smallest custom active time that leaves each movement step usable.
    pub fn min_custom_secs(self) -> f64 {
        match self {
            CycleKind::Military => 3.0,
            CycleKind::NavySeal => 5.0,
        }
    }

    /// Illustration index for a step counter value (0 = resting pose).
    pub fn image_index(self, step: u32) -> u32 {
        match self {
            CycleKind::Military => MILITARY_IMAGE_MAP
                .get(step as usize)
                .copied()
                .unwrap_or(0),
            CycleKind::NavySeal => step.min(10),
        }
    }
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleKind::Military => write!(f, "military"),
            CycleKind::NavySeal => write!(f, "navy-seal"),
        }
    }
}

/// Raw workout parameters as entered by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutParams {
    /// Total workout duration in whole minutes.
    pub duration_min: u32,
    /// Number of burpees to fit into the duration.
    pub total_reps: u32,
    pub cycle: CycleKind,
    /// Fixed active time per burpee in seconds. `None` (or a non-positive
    /// value) splits each burpee's time budget evenly instead.
    pub custom_rep_secs: Option<f64>,
    /// Count-in before the first burpee, in seconds. Spent once, never
    /// repeated.
    pub prep_secs: u32,
}

/// Immutable timing schedule computed once per workout start.
///
/// Invariants (holding to float tolerance):
/// `active_secs + rest_secs == time_per_rep_secs` and
/// `time_per_rep_secs * total_reps == total_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub total_secs: f64,
    pub total_reps: u32,
    pub cycle: CycleKind,
    pub steps_per_rep: u32,
    pub time_per_rep_secs: f64,
    pub active_secs: f64,
    pub rest_secs: f64,
    pub step_interval_secs: f64,
    pub prep_secs: f64,
}

impl WorkoutPlan {
    /// Validate parameters and derive the per-burpee timing split.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidInput`] for a non-positive duration or
    /// rep count, [`PlanError::BelowMinimum`] when a custom time is under
    /// the variant floor, and [`PlanError::InsufficientTime`] when the
    /// custom time does not fit the per-burpee share of the duration.
    pub fn new(params: &WorkoutParams) -> Result<Self, PlanError> {
        if params.duration_min == 0 || params.total_reps == 0 {
            return Err(PlanError::InvalidInput);
        }

        let cycle = params.cycle;
        let steps = cycle.steps_per_rep();
        let total_secs = f64::from(params.duration_min) * 60.0;
        let time_per_rep_secs = total_secs / f64::from(params.total_reps);

        let custom = params
            .custom_rep_secs
            .filter(|secs| secs.is_finite() && *secs > 0.0);

        let (active_secs, step_interval_secs) = match custom {
            Some(active) => {
                let floor_secs = cycle.min_custom_secs();
                if active < floor_secs {
                    return Err(PlanError::BelowMinimum { cycle, floor_secs });
                }
                if active > time_per_rep_secs {
                    return Err(PlanError::InsufficientTime {
                        shortfall_secs: active - time_per_rep_secs,
                    });
                }
                (active, active / f64::from(steps - 1))
            }
            None => {
                // The per-burpee budget splits into steps + 1 equal
                // intervals; the last step and the trailing interval merge
                // into the rest phase.
                let interval = time_per_rep_secs / f64::from(steps + 1);
                (interval * f64::from(steps - 1), interval)
            }
        };

        Ok(Self {
            total_secs,
            total_reps: params.total_reps,
            cycle,
            steps_per_rep: steps,
            time_per_rep_secs,
            active_secs,
            rest_secs: time_per_rep_secs - active_secs,
            step_interval_secs,
            prep_secs: f64::from(params.prep_secs),
        })
    }

    /// Human-readable active/rest split, shown before a workout starts.
    pub fn summary(&self) -> String {
        format!(
            "Burpee: {:.1}s | Rest: {:.1}s",
            self.active_secs, self.rest_secs
        )
    }
}
