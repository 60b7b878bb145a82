use crate::engine::{GapDirection, KinematicState, GAP_WIDTH};
use crate::params::SimulationParameters;

/// Fixed integration time step in seconds
pub const DT: f64 = 6e-10;

/// Whether `x` lies inside the accelerating gap between the dees
pub fn in_gap(x: f64) -> bool {
    x.abs() < GAP_WIDTH / 2.0
}

/// Advance the particle by one sub-step of `dt` using semi-implicit Euler
/// integration (v += a*dt, then x += v*dt).
///
/// The magnetic field points out of the plane, so the Lorentz force bends the
/// particle clockwise. Inside the gap the electric field is always oriented
/// along the particle's x velocity. Returns the gap classification made at the
/// start of the sub-step.
pub fn step(state: &mut KinematicState, params: &SimulationParameters, dt: f64) -> GapDirection {
    let species = params.species;
    let (q, m) = (species.charge, species.mass);

    let omega = params.angular_frequency();
    let mut accel = glam::DVec2::new(omega * state.vel.y, -omega * state.vel.x);

    let direction = if in_gap(state.pos.x) {
        let direction = GapDirection::from_velocity_x(state.vel.x);
        accel.x += (q * params.accelerating_voltage / (m * GAP_WIDTH)) * direction.signum() as f64;
        direction
    } else {
        GapDirection::Off
    };

    state.vel += accel * dt;
    state.pos += state.vel * dt;

    assert!(
        state.pos.is_finite() && state.vel.is_finite(),
        "integration produced a non-finite state: {:?}",
        state
    );

    direction
}
