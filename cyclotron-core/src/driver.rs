//! Driving the engine from a periodic tick.
//!
//! [`Ticker`] is a repeating timer fed with explicit instants so it can be
//! used from a UI frame loop and from tests alike. [`advance`] runs one batch
//! on a due tick and stops the engine when the particle has left.

use crate::engine::TrajectoryEngine;
use crate::params::SimulationParameters;
use glam::DVec2;
use std::time::{Duration, Instant};

/// Delay between two batches while animating
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the timer; the first tick is due immediately
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// True if a tick is due at `now`. The next tick is scheduled one interval
    /// after `now`, so late polls never produce a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_INTERVAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine was not running; nothing was integrated
    Idle,
    /// A batch ran and the particle is still inside
    Continue,
    /// A batch ran, the particle left and the engine was stopped
    Finished,
}

/// Run one batch if the engine is running, stopping it on exit
pub fn advance(engine: &mut TrajectoryEngine, params: &SimulationParameters) -> TickOutcome {
    if !engine.is_running() {
        return TickOutcome::Idle;
    }
    let should_continue = engine.step(params).should_continue;
    if should_continue {
        TickOutcome::Continue
    } else {
        engine.stop();
        TickOutcome::Finished
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub batches: usize,
    pub steps: usize,
    /// Whether the particle reached the exit radius within the batch limit
    pub finished: bool,
    pub final_position: DVec2,
    pub final_speed: f64,
    pub kinetic_energy_mev: f64,
    pub gap_crossings: usize,
}

/// Begin (or resume) a run and step it without delays until the particle
/// leaves or `max_batches` batches have run. The engine is stopped on return.
pub fn run_to_completion(
    engine: &mut TrajectoryEngine,
    params: &SimulationParameters,
    max_batches: usize,
) -> RunSummary {
    engine.begin(params);

    let mut batches = 0;
    let mut finished = false;
    while batches < max_batches {
        batches += 1;
        if advance(engine, params) == TickOutcome::Finished {
            finished = true;
            break;
        }
    }
    engine.stop();

    if !finished {
        log::warn!(
            "particle still inside at r = {:.4} m after {} batches",
            engine.radius(),
            batches
        );
    }

    RunSummary {
        batches,
        steps: engine.history_len(),
        finished,
        final_position: engine.state().pos,
        final_speed: engine.speed(),
        kinetic_energy_mev: engine.kinetic_energy_mev(params.species),
        gap_crossings: engine.history().gap_crossings(),
    }
}
