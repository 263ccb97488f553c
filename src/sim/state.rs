use nalgebra::{Matrix3, Vector3, Vector4};

// ---------------------------------------------------------------------------
// Attitude state: two independently integrated trajectories + derived DCM
// ---------------------------------------------------------------------------

/// Full attitude state at a single point in time.
///
/// The quaternion and the Euler angles are NOT two views of one trajectory:
/// each is integrated from its own kinematic rate equation, and their drift
/// apart is an observable of interest. The DCM is always derived from the
/// quaternion side.
#[derive(Debug, Clone, PartialEq)]
pub struct AttitudeState {
    pub time: f64,                  // s
    pub dt: f64,                    // s, fixed integration timestep
    pub quat: Vector4<f64>,         // scalar-first (q0, q1, q2, q3), unit norm
    pub euler: Vector3<f64>,        // rad, (phi, theta, psi) = (roll, pitch, yaw)
    pub dcm: Matrix3<f64>,          // derived from quat after every step
    pub omega_body: Vector3<f64>,   // rad/s, body frame, zero-order hold
}

// ---------------------------------------------------------------------------
// History log
// ---------------------------------------------------------------------------

/// One history record per propagation step, both trajectories in degrees.
///
/// The log grows without bound for the lifetime of the propagator — that is
/// the intended behavior for an interactive session, not an oversight. A
/// long-running service should drain or bound it externally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub time: f64,
    /// (phi, theta, psi) recovered from the quaternion trajectory, deg.
    pub quat_deg: Vector3<f64>,
    /// (phi, theta, psi) from direct Euler-angle integration, deg.
    pub euler_deg: Vector3<f64>,
}

impl HistorySample {
    /// Per-axis gap between the two trajectories, deg.
    pub fn divergence(&self) -> Vector3<f64> {
        self.quat_deg - self.euler_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divergence_is_per_axis_gap() {
        let s = HistorySample {
            time: 1.0,
            quat_deg: Vector3::new(10.0, 20.0, 30.0),
            euler_deg: Vector3::new(9.0, 21.0, 30.0),
        };
        assert_eq!(s.divergence(), Vector3::new(1.0, -1.0, 0.0));
    }
}
