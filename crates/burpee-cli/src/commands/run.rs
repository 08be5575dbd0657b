//! Live workout loop.
//!
//! The binary owns the clock: a 10 ms interval drives `engine.tick()`, a
//! wall-clock `Instant` drives the crossfade, and stdin lines carry the
//! control signals. The engine itself never blocks on audio or images --
//! both are fire-and-forget writes from the event loop.

use std::io::Write;
use std::time::Instant;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use burpee_core::timer::{format_clock, format_phase_secs, format_rep, format_step};
use burpee_core::{Config, CountdownEngine, Crossfade, EngineState, Event, WorkoutPlan, TICK};

use crate::common::WorkoutArgs;

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub workout: WorkoutArgs,
    /// Ring the terminal bell on step boundaries
    #[arg(long)]
    pub sound: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let params = args.workout.into_params(&config.workout);
    let plan = WorkoutPlan::new(&params)?;
    let sound = args.sound || config.sound.enabled;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(plan, sound))
}

async fn drive(plan: WorkoutPlan, sound: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = CountdownEngine::new(plan.clone());
    let mut fade = Crossfade::new(plan.step_interval_secs);
    let clock = Instant::now();
    let mut asset = image_asset(plan.cycle.image_index(0));

    println!("{}", plan.summary());
    println!("controls: p = pause/resume, r = restart, q = quit");
    engine.start();

    let mut interval = tokio::time::interval(TICK);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let now_ms = clock.elapsed().as_millis() as u64;
                let mut rep_boundary = false;
                let mut done = false;
                for event in engine.tick() {
                    match event {
                        Event::StepAdvanced { step, image_index, .. } => {
                            if sound {
                                print!("\x07");
                            }
                            if rep_boundary {
                                // New rep: cut straight to its first pose.
                                fade.reset_to(step, image_index);
                                asset = image_asset(image_index);
                            } else if let Some(load) = fade.trigger(image_index, now_ms) {
                                asset = image_asset(load.image_index);
                            }
                        }
                        Event::RepCompleted { .. } => rep_boundary = true,
                        Event::WorkoutCompleted { .. } => done = true,
                        _ => {}
                    }
                }
                let frame = fade.update(engine.current_step(), now_ms);
                render(&mut stdout, &engine, frame.displayed_step, &asset)?;
                if done {
                    break;
                }
            }
            line = lines.next_line() => {
                match line?.as_deref() {
                    Some("p") => {
                        if engine.pause().is_none() {
                            engine.resume();
                        }
                    }
                    Some("r") => {
                        engine.restart();
                        fade.reset_to(0, plan.cycle.image_index(0));
                        asset = image_asset(plan.cycle.image_index(0));
                    }
                    Some("q") | None => {
                        engine.reset();
                        break;
                    }
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                engine.reset();
                break;
            }
        }
    }

    if engine.state() == EngineState::Completed {
        println!("\nWorkout complete! Great job!");
    } else {
        println!();
    }
    Ok(())
}

/// All variants draw from the navy-seal illustration sequence.
fn image_asset(image_index: u32) -> String {
    format!("navy-seal-burpee-{image_index:02}.jpg")
}

fn render(
    out: &mut impl Write,
    engine: &CountdownEngine,
    displayed_step: u32,
    asset: &str,
) -> std::io::Result<()> {
    let plan = engine.plan();
    let filled = ((engine.progress_pct() / 100.0) * 10.0).round() as usize;
    let filled = filled.min(10);
    let paused = if engine.state() == EngineState::Paused {
        " [paused]"
    } else {
        ""
    };
    write!(
        out,
        "\r[{}{}] rep {}  step {}  {} {}  total {}  {}{}  ",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        format_rep(engine.current_rep(), plan.total_reps),
        format_step(displayed_step, plan.steps_per_rep),
        engine.phase().label(),
        format_phase_secs(engine.phase_remaining_secs()),
        format_clock(engine.total_remaining_secs()),
        asset,
        paused,
    )?;
    out.flush()
}
