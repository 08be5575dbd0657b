//! Countdown engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or own a clock - the caller invokes `tick()` on a fixed 10 ms
//! cadence and consumes the events each tick produces.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Completed
//! ```
//!
//! The count-in before the first burpee is not a separate state: rep 1
//! seeds at step 0 with the count-in folded into the first cycle's budget,
//! and the prep/active/rest phase is derived from the counters.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::display::Phase;
use super::plan::WorkoutPlan;
use crate::events::{Event, ToneKind};

/// Cadence the caller must drive [`CountdownEngine::tick`] at.
pub const TICK: Duration = Duration::from_millis(10);

/// Seconds drained from the current cycle per tick.
const TICK_SECS: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core countdown engine.
///
/// Single-writer: mutated only by `tick()` and the explicit control calls,
/// all from one logical thread. Audio and image side effects happen in the
/// consumers of the returned events, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownEngine {
    plan: WorkoutPlan,
    state: EngineState,
    /// 1-indexed while a workout is live, 0 when idle.
    current_rep: u32,
    /// 0 is the prep/rest sentinel; movement steps run 1..=steps_per_rep.
    current_step: u32,
    /// Seconds left in the current cycle. May dip a fraction of a tick
    /// below a boundary before the boundary handling corrects it.
    time_remaining: f64,
    /// `time_remaining` level at which the next step fires.
    next_step_trigger: f64,
}

impl CountdownEngine {
    /// Create an idle engine for an already-validated plan.
    pub fn new(plan: WorkoutPlan) -> Self {
        Self {
            plan,
            state: EngineState::Idle,
            current_rep: 0,
            current_step: 0,
            time_remaining: 0.0,
            next_step_trigger: 0.0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn current_rep(&self) -> u32 {
        self.current_rep
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    /// Derived prep/active/rest phase. There is no stored phase field;
    /// countdown text and rest highlighting must agree, so both read this.
    pub fn phase(&self) -> Phase {
        if self.current_step >= self.plan.steps_per_rep
            && self.time_remaining <= self.plan.rest_secs
        {
            Phase::Rest
        } else if self.current_rep == 1 && self.current_step == 0 {
            Phase::Prep
        } else {
            Phase::Active
        }
    }

    /// Seconds left in the current phase, for the per-phase countdown.
    pub fn phase_remaining_secs(&self) -> f64 {
        let remaining = match self.phase() {
            Phase::Rest => self.time_remaining,
            Phase::Prep => self.time_remaining - self.plan.time_per_rep_secs,
            Phase::Active => self.time_remaining - self.plan.rest_secs,
        };
        remaining.max(0.0)
    }

    /// Seconds left across the whole workout, including the live cycle.
    pub fn total_remaining_secs(&self) -> f64 {
        let reps_left = self.plan.total_reps.saturating_sub(self.current_rep);
        (self.time_remaining + f64::from(reps_left) * self.plan.time_per_rep_secs).max(0.0)
    }

    /// 0.0 .. 100.0 progress across the entire workout, count-in included.
    pub fn progress_pct(&self) -> f64 {
        match self.state {
            EngineState::Idle => 0.0,
            EngineState::Completed => 100.0,
            _ => {
                let planned = self.plan.total_secs + self.plan.prep_secs;
                if planned <= 0.0 {
                    return 0.0;
                }
                ((planned - self.total_remaining_secs()) / planned * 100.0).clamp(0.0, 100.0)
            }
        }
    }

    /// Build a full state snapshot event for pollers.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            rep: self.current_rep,
            total_reps: self.plan.total_reps,
            step: self.current_step,
            steps_per_rep: self.plan.steps_per_rep,
            phase: self.phase(),
            phase_remaining_secs: self.phase_remaining_secs(),
            total_remaining_secs: self.total_remaining_secs(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state != EngineState::Idle {
            return None; // Already live.
        }
        self.seed_first_cycle();
        self.state = EngineState::Running;
        tracing::debug!(
            reps = self.plan.total_reps,
            prep_secs = self.plan.prep_secs,
            "workout started"
        );
        Some(Event::WorkoutStarted {
            total_reps: self.plan.total_reps,
            steps_per_rep: self.plan.steps_per_rep,
            prep_secs: self.plan.prep_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != EngineState::Running {
            return None;
        }
        self.state = EngineState::Paused;
        tracing::debug!(rep = self.current_rep, "workout paused");
        Some(Event::WorkoutPaused { at: Utc::now() })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != EngineState::Paused {
            return None;
        }
        self.state = EngineState::Running;
        tracing::debug!(rep = self.current_rep, "workout resumed");
        Some(Event::WorkoutResumed { at: Utc::now() })
    }

    /// Discard progress and re-enter the first cycle of the same plan.
    pub fn restart(&mut self) -> Option<Event> {
        if self.state == EngineState::Idle {
            return None;
        }
        self.seed_first_cycle();
        self.state = EngineState::Running;
        tracing::debug!("workout restarted");
        Some(Event::WorkoutRestarted { at: Utc::now() })
    }

    /// Discard all progress and return to `Idle`. Safe to call repeatedly.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = EngineState::Idle;
        self.current_rep = 0;
        self.current_step = 0;
        self.time_remaining = 0.0;
        self.next_step_trigger = 0.0;
        Some(Event::WorkoutReset { at: Utc::now() })
    }

    /// Advance the engine by one 10 ms tick.
    ///
    /// No-op unless running. A single tick can cross several boundaries:
    /// a step advance, a rep rollover with the next rep's first step, or
    /// terminal completion.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.state != EngineState::Running {
            return events;
        }

        self.time_remaining -= TICK_SECS;

        if self.current_step < self.plan.steps_per_rep
            && self.time_remaining <= self.next_step_trigger
        {
            self.current_step += 1;
            let last = self.current_step == self.plan.steps_per_rep;
            events.push(self.step_event(if last { ToneKind::Final } else { ToneKind::Step }));
            if last {
                // The last step and the trailing interval collapse into one
                // rest phase; never decrement through them.
                self.time_remaining = self.plan.rest_secs;
            } else {
                self.next_step_trigger -= self.plan.step_interval_secs;
            }
        }

        if self.time_remaining <= 0.0 {
            self.advance_rep(&mut events);
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Rep 1 carries the count-in: it seeds at the step-0 sentinel with the
    /// prep budget on top of the cycle budget, and step 1 fires once the
    /// remaining time drains down to one full cycle.
    fn seed_first_cycle(&mut self) {
        self.current_rep = 1;
        self.current_step = 0;
        self.time_remaining = self.plan.prep_secs + self.plan.time_per_rep_secs;
        self.next_step_trigger = self.plan.time_per_rep_secs;
    }

    fn advance_rep(&mut self, events: &mut Vec<Event>) {
        events.push(Event::RepCompleted {
            rep: self.current_rep,
            at: Utc::now(),
        });
        if self.current_rep >= self.plan.total_reps {
            self.state = EngineState::Completed;
            tracing::info!(reps = self.plan.total_reps, "workout completed");
            events.push(Event::WorkoutCompleted { at: Utc::now() });
            return;
        }

        self.current_rep += 1;
        self.time_remaining = self.plan.time_per_rep_secs;
        // Later reps have no prep sentinel: step 1 starts immediately.
        self.current_step = 1;
        self.next_step_trigger = self.plan.time_per_rep_secs - self.plan.step_interval_secs;
        tracing::debug!(rep = self.current_rep, "rep started");
        events.push(self.step_event(ToneKind::Step));
    }

    fn step_event(&self, tone: ToneKind) -> Event {
        Event::StepAdvanced {
            rep: self.current_rep,
            step: self.current_step,
            tone,
            image_index: self.plan.cycle.image_index(self.current_step),
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::plan::{CycleKind, WorkoutParams};
    use approx::assert_relative_eq;

    fn plan(duration_min: u32, total_reps: u32, prep_secs: u32) -> WorkoutPlan {
        WorkoutPlan::new(&WorkoutParams {
            duration_min,
            total_reps,
            cycle: CycleKind::Military,
            custom_rep_secs: None,
            prep_secs,
        })
        .unwrap()
    }

    fn drain(engine: &mut CountdownEngine) -> (Vec<Event>, u64) {
        let mut events = Vec::new();
        let mut ticks = 0u64;
        while engine.state() == EngineState::Running {
            events.extend(engine.tick());
            ticks += 1;
            assert!(ticks < 10_000_000, "engine never completed");
        }
        (events, ticks)
    }

    fn count<F: Fn(&Event) -> bool>(events: &[Event], pred: F) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn start_seeds_first_cycle_with_prep() {
        let mut engine = CountdownEngine::new(plan(1, 6, 5));
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.start().is_some());
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.current_rep(), 1);
        assert_eq!(engine.current_step(), 0);
        assert_relative_eq!(engine.time_remaining(), 15.0);
        assert_eq!(engine.phase(), Phase::Prep);
        assert_relative_eq!(engine.phase_remaining_secs(), 5.0);
    }

    #[test]
    fn start_is_a_noop_while_live() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        assert!(engine.start().is_some());
        assert!(engine.start().is_none());
    }

    #[test]
    fn full_workout_event_counts() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        let (events, _) = drain(&mut engine);

        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(
            count(&events, |e| matches!(e, Event::WorkoutCompleted { .. })),
            1
        );
        assert_eq!(
            count(&events, |e| matches!(e, Event::RepCompleted { .. })),
            6
        );
        // Six movement steps in each of six reps.
        assert_eq!(
            count(&events, |e| matches!(e, Event::StepAdvanced { .. })),
            36
        );
        assert_eq!(
            count(
                &events,
                |e| matches!(e, Event::StepAdvanced { tone: ToneKind::Final, .. })
            ),
            6
        );
    }

    #[test]
    fn ticked_time_matches_planned_duration() {
        let prep = 3u32;
        let mut engine = CountdownEngine::new(plan(1, 6, prep));
        engine.start();
        let (_, ticks) = drain(&mut engine);

        let planned = 60.0 + f64::from(prep);
        let ticked = ticks as f64 * 0.01;
        // Each rep boundary may truncate up to one tick of overshoot.
        assert!(
            (ticked - planned).abs() <= 6.0 * 0.01 + 1e-6,
            "ticked {ticked}s vs planned {planned}s"
        );
    }

    #[test]
    fn last_step_jumps_directly_to_rest() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        let rest = engine.plan().rest_secs;
        loop {
            let events = engine.tick();
            if events
                .iter()
                .any(|e| matches!(e, Event::StepAdvanced { step: 6, .. }))
            {
                break;
            }
        }
        // Assigned, never decremented through.
        assert_eq!(engine.time_remaining(), rest);
        assert_eq!(engine.phase(), Phase::Rest);
    }

    #[test]
    fn pause_freezes_the_clock() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        for _ in 0..50 {
            engine.tick();
        }
        let frozen = engine.time_remaining();
        assert!(engine.pause().is_some());
        for _ in 0..500 {
            assert!(engine.tick().is_empty());
        }
        assert_eq!(engine.time_remaining(), frozen);
        assert!(engine.resume().is_some());
        engine.tick();
        assert!(engine.time_remaining() < frozen);
    }

    #[test]
    fn pause_only_from_running() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        assert!(engine.pause().is_none());
        engine.start();
        engine.pause();
        assert!(engine.pause().is_none());
        assert!(engine.resume().is_some());
        assert!(engine.resume().is_none());
    }

    #[test]
    fn reset_is_idempotent() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        for _ in 0..100 {
            engine.tick();
        }
        engine.reset();
        let once = engine.clone();
        engine.reset();
        assert_eq!(engine, once);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn restart_reenters_first_cycle() {
        let mut engine = CountdownEngine::new(plan(1, 6, 2));
        engine.start();
        for _ in 0..300 {
            engine.tick();
        }
        assert!(engine.current_step() > 0);
        assert!(engine.restart().is_some());
        assert_eq!(engine.current_rep(), 1);
        assert_eq!(engine.current_step(), 0);
        assert_relative_eq!(engine.time_remaining(), 12.0);
    }

    #[test]
    fn completion_happens_exactly_once() {
        let mut engine = CountdownEngine::new(plan(1, 1, 0));
        engine.start();
        let (events, _) = drain(&mut engine);
        assert_eq!(
            count(&events, |e| matches!(e, Event::WorkoutCompleted { .. })),
            1
        );
        assert_eq!(engine.state(), EngineState::Completed);
        for _ in 0..100 {
            assert!(engine.tick().is_empty());
        }
        assert_eq!(engine.state(), EngineState::Completed);
    }

    #[test]
    fn later_reps_start_at_step_one() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        loop {
            let events = engine.tick();
            if let Some(Event::StepAdvanced { rep, step, .. }) = events
                .iter()
                .find(|e| matches!(e, Event::StepAdvanced { rep: 2, .. }))
            {
                assert_eq!((*rep, *step), (2, 1));
                break;
            }
        }
        assert_eq!(engine.current_step(), 1);
        assert_relative_eq!(engine.time_remaining(), engine.plan().time_per_rep_secs);
    }

    #[test]
    fn phase_transitions_across_first_cycle() {
        let mut engine = CountdownEngine::new(plan(1, 6, 1));
        engine.start();
        assert_eq!(engine.phase(), Phase::Prep);
        // Drain the 1 s count-in, plus a little slack past the boundary.
        for _ in 0..105 {
            engine.tick();
        }
        assert_eq!(engine.phase(), Phase::Active);
        assert!(engine.current_step() >= 1);
    }

    #[test]
    fn total_remaining_is_continuous_across_prep_boundary() {
        let prep = 2u32;
        let mut engine = CountdownEngine::new(plan(1, 6, prep));
        engine.start();
        assert_relative_eq!(engine.total_remaining_secs(), 62.0);
        let mut previous = engine.total_remaining_secs();
        for _ in 0..(u64::from(prep) * 100 + 50) {
            engine.tick();
            let now = engine.total_remaining_secs();
            assert!(
                previous - now < 0.5,
                "total display jumped from {previous} to {now}"
            );
            previous = now;
        }
        assert_eq!(engine.phase(), Phase::Active);
    }

    #[test]
    fn progress_runs_zero_to_hundred() {
        let mut engine = CountdownEngine::new(plan(1, 2, 0));
        assert_eq!(engine.progress_pct(), 0.0);
        engine.start();
        for _ in 0..3000 {
            engine.tick();
        }
        let mid = engine.progress_pct();
        assert!(mid > 0.0 && mid < 100.0);
        drain(&mut engine);
        assert_eq!(engine.progress_pct(), 100.0);
    }

    #[test]
    fn snapshot_reflects_engine_state() {
        let mut engine = CountdownEngine::new(plan(1, 6, 0));
        engine.start();
        match engine.snapshot() {
            Event::StateSnapshot {
                state,
                rep,
                total_reps,
                steps_per_rep,
                ..
            } => {
                assert_eq!(state, EngineState::Running);
                assert_eq!(rep, 1);
                assert_eq!(total_reps, 6);
                assert_eq!(steps_per_rep, 6);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
