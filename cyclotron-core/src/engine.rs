use crate::catalog::ParticleSpecies;
use crate::error::EngineError;
use crate::history::{History, StepRecord};
use crate::integrator::{self, DT};
use crate::params::SimulationParameters;
use glam::DVec2;

/// Width of the accelerating gap between the two dees, in m
pub const GAP_WIDTH: f64 = 0.06;
/// Radius of each dee, in m
pub const DEE_RADIUS: f64 = 0.5;
/// Orbit radius at which the particle has left the pole faces
pub const EXIT_RADIUS: f64 = 0.51;
/// Injection speed for an initial speed factor of 1, in m/s
pub const BASE_INJECTION_SPEED: f64 = 1.5e5;

const JOULES_PER_MEV: f64 = 1.602_176_634e-13;

/// Orientation of the electric field across the gap for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GapDirection {
    /// Field points along -x
    Negative,
    /// Particle is outside the gap
    Off,
    /// Field points along +x
    Positive,
}

impl GapDirection {
    /// +1 only for strictly positive x velocity; zero velocity maps to -1
    pub fn from_velocity_x(vx: f64) -> Self {
        if vx > 0.0 {
            GapDirection::Positive
        } else {
            GapDirection::Negative
        }
    }

    pub fn signum(self) -> i8 {
        match self {
            GapDirection::Negative => -1,
            GapDirection::Off => 0,
            GapDirection::Positive => 1,
        }
    }
}

/// Position and velocity of the particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    /// Position in m
    pub pos: DVec2,
    /// Velocity in m/s
    pub vel: DVec2,
}

/// Result of one batch of sub-steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome<'a> {
    /// The last step of the batch
    pub record: StepRecord<'a>,
    /// False once the particle is outside [`EXIT_RADIUS`]; the caller should stop
    pub should_continue: bool,
}

/// Single-owner simulation of one particle in the cyclotron.
///
/// The engine never schedules itself: something outside calls [`step`]
/// while [`is_running`] is true and stops when asked to.
///
/// [`step`]: TrajectoryEngine::step
/// [`is_running`]: TrajectoryEngine::is_running
#[derive(Debug, Default)]
pub struct TrajectoryEngine {
    state: KinematicState,
    history: History,
    running: bool,
}

impl TrajectoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the history and put the particle back at rest at the origin
    pub fn reset(&mut self) {
        log::debug!("reset after {} steps", self.history.len());
        self.state = KinematicState::default();
        self.history.clear();
        self.running = false;
    }

    /// Start or resume a run.
    ///
    /// The injection velocity is applied only when nothing has been
    /// integrated yet; resuming keeps the current velocity.
    pub fn begin(&mut self, params: &SimulationParameters) {
        if self.history.is_empty() {
            let v0 = params.initial_speed_factor * BASE_INJECTION_SPEED;
            self.state.vel = DVec2::new(v0, 0.0);
            log::debug!(
                "injecting {} at {:.3e} m/s (B = {} T, V = {} V)",
                params.species.name,
                v0,
                params.magnetic_field,
                params.accelerating_voltage
            );
        } else if !self.running {
            log::debug!("resuming at step {}", self.history.len());
        }
        self.running = true;
    }

    /// Integrate `params.steps_per_tick` sub-steps and report whether the
    /// particle is still inside the accelerator.
    pub fn step(&mut self, params: &SimulationParameters) -> StepOutcome<'_> {
        assert!(params.steps_per_tick > 0, "a batch needs at least one sub-step");

        for _ in 0..params.steps_per_tick {
            let direction = integrator::step(&mut self.state, params, DT);
            self.history.push(self.state.pos, direction);
        }

        let radius = self.state.pos.length();
        let should_continue = radius < EXIT_RADIUS;
        log::trace!("batch ended at step {} with r = {:.4} m", self.history.len(), radius);
        if !should_continue {
            log::info!(
                "{} left the accelerator after {} steps at {:.3} MeV",
                params.species.name,
                self.history.len(),
                self.kinetic_energy_mev(params.species)
            );
        }

        let Some(record) = self.history.last() else {
            unreachable!("a batch always appends at least one step");
        };
        StepOutcome {
            record,
            should_continue,
        }
    }

    /// Mark the run as paused. History and state are kept.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("stopped at step {}", self.history.len());
        }
        self.running = false;
    }

    /// Look up a previously integrated step without touching the state
    pub fn replay(&self, index: isize) -> Result<StepRecord<'_>, EngineError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.history.get(i))
            .ok_or(EngineError::IndexOutOfRange {
                index,
                len: self.history.len(),
            })
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Current speed in m/s
    pub fn speed(&self) -> f64 {
        self.state.vel.length()
    }

    /// Current distance from the centre in m
    pub fn radius(&self) -> f64 {
        self.state.pos.length()
    }

    /// Non-relativistic kinetic energy in J
    pub fn kinetic_energy(&self, species: &ParticleSpecies) -> f64 {
        0.5 * species.mass * self.state.vel.length_squared()
    }

    pub fn kinetic_energy_mev(&self, species: &ParticleSpecies) -> f64 {
        self.kinetic_energy(species) / JOULES_PER_MEV
    }
}
