use clap::Args;

use burpee_core::{Config, WorkoutPlan};

use crate::common::WorkoutArgs;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let params = args.workout.into_params(&config.workout);
    let plan = WorkoutPlan::new(&params)?;
    eprintln!("{}", plan.summary());
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
