//! Flags shared by the `run` and `plan` commands.

use burpee_core::storage::WorkoutDefaults;
use burpee_core::{CycleKind, WorkoutParams};
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CycleArg {
    /// 6-step military burpee
    Military,
    /// 10-step navy-seal burpee
    NavySeal,
}

impl From<CycleArg> for CycleKind {
    fn from(arg: CycleArg) -> Self {
        match arg {
            CycleArg::Military => CycleKind::Military,
            CycleArg::NavySeal => CycleKind::NavySeal,
        }
    }
}

#[derive(Debug, Args)]
pub struct WorkoutArgs {
    /// Total workout duration in minutes
    #[arg(long)]
    pub duration: Option<u32>,
    /// Number of burpees to fit into the duration
    #[arg(long)]
    pub reps: Option<u32>,
    /// Burpee variant
    #[arg(long, value_enum)]
    pub cycle: Option<CycleArg>,
    /// Fixed active seconds per burpee (evenly split when omitted)
    #[arg(long)]
    pub time_per_rep: Option<f64>,
    /// Count-in seconds before the first burpee
    #[arg(long)]
    pub prep: Option<u32>,
}

impl WorkoutArgs {
    /// Fill unset flags from the configured defaults.
    pub fn into_params(self, defaults: &WorkoutDefaults) -> WorkoutParams {
        WorkoutParams {
            duration_min: self.duration.unwrap_or(defaults.duration_min),
            total_reps: self.reps.unwrap_or(defaults.total_reps),
            cycle: self.cycle.map(Into::into).unwrap_or(defaults.cycle),
            custom_rep_secs: self.time_per_rep.or(defaults.custom_rep_secs),
            prep_secs: self.prep.unwrap_or(defaults.prep_secs),
        }
    }
}
