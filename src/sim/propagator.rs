use nalgebra::{Matrix3, Vector3, Vector4};
use thiserror::Error;

use crate::rotation;
use crate::sim::state::{AttitudeState, HistorySample};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PropagatorConfig {
    pub dt: f64, // integration timestep, s
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0, // one step per frame at a 60 fps tick
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("timestep must be positive and finite, got {0}")]
    InvalidTimestep(f64),
}

// ---------------------------------------------------------------------------
// Propagator
// ---------------------------------------------------------------------------

/// Open-loop attitude propagator.
///
/// Owns the attitude state and the append-only history log. The state is
/// mutated only through [`step`](Propagator::step),
/// [`set_body_rates`](Propagator::set_body_rates) and
/// [`reset`](Propagator::reset); everything else is a read-only snapshot.
/// Not reentrant — the caller serializes access and drives `step()` at a
/// fixed cadence.
#[derive(Debug, Clone)]
pub struct Propagator {
    state: AttitudeState,
    history: Vec<HistorySample>,
}

impl Propagator {
    /// Build a propagator at the canonical initial condition: zero attitude,
    /// 90°/s yaw rate. Fails fast on a malformed timestep.
    pub fn new(config: PropagatorConfig) -> Result<Self, ConfigError> {
        if !config.dt.is_finite() || config.dt <= 0.0 {
            return Err(ConfigError::InvalidTimestep(config.dt));
        }
        Ok(Self {
            state: Self::initial_state(config.dt),
            history: Vec::new(),
        })
    }

    fn initial_state(dt: f64) -> AttitudeState {
        let euler = Vector3::zeros();
        let quat = rotation::quat_from_euler(&euler);
        AttitudeState {
            time: 0.0,
            dt,
            dcm: rotation::quat_to_dcm(&quat),
            quat,
            euler,
            omega_body: Vector3::new(0.0, 0.0, 90.0_f64.to_radians()),
        }
    }

    /// One discrete update of both trajectories.
    ///
    /// Substep order matters: the history records the Euler angles as of
    /// this step's end but the timestamp as of its start, and the DCM used
    /// for the world-rate contraction is the previous step's.
    pub fn step(&mut self) {
        let s = &mut self.state;

        // Body rate as a ROW vector times the DCM (omega' * C), not C * omega.
        let world_rates = s.dcm.tr_mul(&s.omega_body);
        let qdot = rotation::quat_rates(&s.quat, &world_rates);
        s.quat = rotation::normalize(&rotation::integrate(&s.quat, &qdot, s.dt));
        let quat_euler = rotation::euler_from_quat(&s.quat);

        // The second trajectory: same body rate through the Euler kinematic
        // transform, integrated on its own.
        let euler_dot = rotation::euler_rates(&s.euler, &s.omega_body);
        s.euler = rotation::integrate(&s.euler, &euler_dot, s.dt);

        self.history.push(HistorySample {
            time: s.time,
            quat_deg: quat_euler.map(f64::to_degrees),
            euler_deg: s.euler.map(f64::to_degrees),
        });

        s.dcm = rotation::quat_to_dcm(&s.quat);
        s.time += s.dt;
    }

    /// Command a new body rate, deg/s, held until the next call.
    ///
    /// Pitch and yaw are negated going in: the rate-control surface and the
    /// renderer disagree on axis handedness, and this is where the bridge
    /// lives.
    pub fn set_body_rates(&mut self, roll_deg_s: f64, pitch_deg_s: f64, yaw_deg_s: f64) {
        self.state.omega_body = Vector3::new(
            roll_deg_s.to_radians(),
            (-pitch_deg_s).to_radians(),
            (-yaw_deg_s).to_radians(),
        );
    }

    /// Latest quaternion-derived `(yaw, pitch, roll)` in degrees, each axis
    /// sign-flipped to the renderer's convention. `None` until the first
    /// step has produced a sample.
    pub fn latest_ypr(&self) -> Option<(f64, f64, f64)> {
        self.history
            .last()
            .map(|s| (-s.quat_deg.z, -s.quat_deg.y, -s.quat_deg.x))
    }

    /// Current direction-cosine matrix (copy; internal state stays private).
    pub fn dcm(&self) -> Matrix3<f64> {
        self.state.dcm
    }

    /// Current quaternion `(q0, q1, q2, q3)` snapshot for numeric display.
    pub fn quaternion(&self) -> Vector4<f64> {
        self.state.quat
    }

    pub fn state(&self) -> &AttitudeState {
        &self.state
    }

    pub fn history(&self) -> &[HistorySample] {
        &self.history
    }

    /// Restore the initial condition exactly and discard the history.
    pub fn reset(&mut self) {
        self.state = Self::initial_state(self.state.dt);
        self.history.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
