use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, Dim, Matrix3, Matrix4x3, OVector, Vector3, Vector4};

// ---------------------------------------------------------------------------
// Elementary axis rotations
// ---------------------------------------------------------------------------
//
// Sign convention: the off-diagonal sine terms below are what every consumer
// of these matrices (DCM composition, the world-rate contraction) assumes.
// Ry in particular is transposed relative to the usual passive-rotation
// form; keep it that way.

pub fn rotation_x(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, c, s, //
        0.0, -s, c,
    )
}

pub fn rotation_y(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        c, 0.0, -s, //
        0.0, 1.0, 0.0, //
        s, 0.0, c,
    )
}

pub fn rotation_z(theta: f64) -> Matrix3<f64> {
    let (s, c) = theta.sin_cos();
    Matrix3::new(
        c, s, 0.0, //
        -s, c, 0.0, //
        0.0, 0.0, 1.0,
    )
}

// ---------------------------------------------------------------------------
// Euler (XYZ body-fixed) <-> quaternion <-> DCM conversions
// ---------------------------------------------------------------------------

/// DCM for an X-then-Y-then-Z body-fixed rotation sequence:
/// `Rx(phi) * Ry(theta) * Rz(psi)`.
pub fn dcm_from_euler(euler: &Vector3<f64>) -> Matrix3<f64> {
    rotation_x(euler.x) * rotation_y(euler.y) * rotation_z(euler.z)
}

/// Scalar-first quaternion `(q0, q1, q2, q3)` for the same XYZ sequence,
/// via the half-angle closed form.
pub fn quat_from_euler(euler: &Vector3<f64>) -> Vector4<f64> {
    let (s1, c1) = (0.5 * euler.x).sin_cos();
    let (s2, c2) = (0.5 * euler.y).sin_cos();
    let (s3, c3) = (0.5 * euler.z).sin_cos();

    Vector4::new(
        c1 * c2 * c3 + s1 * s2 * s3,
        s1 * c2 * c3 - c1 * s2 * s3,
        c1 * s2 * c3 + s1 * c2 * s3,
        c1 * c2 * s3 - s1 * s2 * c3,
    )
}

/// Euler angles `(phi, theta, psi)` recovered from a quaternion by first
/// forming the five needed DCM elements.
///
/// This is the conversion the propagation step and the yaw/pitch/roll
/// readout consume. A second, independently derived formula exists as
/// [`euler_from_quat_direct`]; see the note there before touching either.
pub fn euler_from_quat(q: &Vector4<f64>) -> Vector3<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);

    let r11 = q0 * q0 + q1 * q1 - q2 * q2 - q3 * q3;
    let r12 = 2.0 * (q1 * q2 + q0 * q3);
    let r13 = 2.0 * (q1 * q3 - q0 * q2);
    let r23 = 2.0 * (q2 * q3 + q0 * q1);
    let r33 = q0 * q0 - q1 * q1 - q2 * q2 + q3 * q3;

    Vector3::new(r23.atan2(r33), -r13.asin(), r12.atan2(r11))
}

/// Alternative quaternion-to-Euler conversion working directly on the
/// quaternion components, returning `(roll, pitch, yaw)`.
///
/// For unit quaternions away from the pitch singularity this agrees with
/// [`euler_from_quat`]. The two are NOT interchangeable: this one assumes
/// unit norm (the `1.0 - 2.0 * ...` terms), so it drifts for unnormalized
/// input where the other stays norm-invariant in roll and yaw, and it
/// clamps the asin argument where the other lets it go NaN. Both are kept
/// as distinct operations on purpose; do not fold one into the other.
pub fn euler_from_quat_direct(q: &Vector4<f64>) -> Vector3<f64> {
    let (w, x, y, z) = (q[0], q[1], q[2], q[3]);

    let t0 = 2.0 * (w * x + y * z);
    let t1 = 1.0 - 2.0 * (x * x + y * y);
    let roll = t0.atan2(t1);

    let t2 = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0);
    let pitch = t2.asin();

    let t3 = 2.0 * (w * z + x * y);
    let t4 = 1.0 - 2.0 * (y * y + z * z);
    let yaw = t3.atan2(t4);

    Vector3::new(roll, pitch, yaw)
}

/// Standard bilinear quaternion-to-DCM expansion.
pub fn quat_to_dcm(q: &Vector4<f64>) -> Matrix3<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);

    let (q0_2, q1_2, q2_2, q3_2) = (q0 * q0, q1 * q1, q2 * q2, q3 * q3);
    let (q1q2, q0q3) = (q1 * q2, q0 * q3);
    let (q1q3, q0q2) = (q1 * q3, q0 * q2);
    let (q2q3, q0q1) = (q2 * q3, q0 * q1);

    Matrix3::new(
        q0_2 + q1_2 - q2_2 - q3_2,
        2.0 * (q1q2 + q0q3),
        2.0 * (q1q3 - q0q2),
        2.0 * (q1q2 - q0q3),
        q0_2 - q1_2 + q2_2 - q3_2,
        2.0 * (q2q3 + q0q1),
        2.0 * (q1q3 + q0q2),
        2.0 * (q2q3 - q0q1),
        q0_2 - q1_2 - q2_2 + q3_2,
    )
}

// ---------------------------------------------------------------------------
// Kinematic rate equations
// ---------------------------------------------------------------------------

/// Quaternion kinematics: `qdot = 0.5 * Xi(q) * omega`.
pub fn quat_rates(q: &Vector4<f64>, omega: &Vector3<f64>) -> Vector4<f64> {
    let (q0, q1, q2, q3) = (q[0], q[1], q[2], q[3]);
    let xi = Matrix4x3::new(
        -q1, -q2, -q3, //
        q0, q3, -q2, //
        -q3, q0, q1, //
        q2, -q1, q0,
    );
    0.5 * xi * omega
}

/// Euler-angle kinematics for the XYZ sequence: `E(phi, theta) * omega_body`.
///
/// Singular at `theta = ±90°`: the `1/cos(theta)` terms blow up (to ±inf
/// when the cosine is exactly zero) and nothing here clamps them. The
/// Euler-integrated trajectory visibly corrupts at gimbal lock while the
/// quaternion trajectory sails through.
pub fn euler_rates(euler: &Vector3<f64>, omega_body: &Vector3<f64>) -> Vector3<f64> {
    let (phi, theta) = (euler.x, euler.y);
    let (sp, cp) = phi.sin_cos();
    let (tt, ct) = (theta.tan(), theta.cos());

    let e = Matrix3::new(
        1.0, tt * sp, tt * cp, //
        0.0, cp, -sp, //
        0.0, sp / ct, cp / ct,
    );
    e * omega_body
}

// ---------------------------------------------------------------------------
// Normalization and integration
// ---------------------------------------------------------------------------

/// `q / ||q||` over the four components.
pub fn normalize(q: &Vector4<f64>) -> Vector4<f64> {
    q / q.norm()
}

/// Forward-Euler step `x + xdot * dt`, shared by the quaternion and the
/// Euler-angle trajectories.
pub fn integrate<D: Dim>(x: &OVector<f64, D>, xdot: &OVector<f64, D>, dt: f64) -> OVector<f64, D>
where
    DefaultAllocator: Allocator<D>,
{
    x.zip_map(xdot, |xi, di| xi + di * dt)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity_q() -> Vector4<f64> {
        Vector4::new(1.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn elementary_rotations_are_orthonormal() {
        for r in [rotation_x(0.7), rotation_y(-1.2), rotation_z(2.9)] {
            assert_relative_eq!(r * r.transpose(), Matrix3::identity(), epsilon = 1e-12);
            assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_attitude_maps_to_identity() {
        let zero = Vector3::zeros();
        assert_relative_eq!(dcm_from_euler(&zero), Matrix3::identity(), epsilon = 1e-15);
        assert_relative_eq!(quat_from_euler(&zero), identity_q(), epsilon = 1e-15);
        assert_relative_eq!(quat_to_dcm(&identity_q()), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn euler_quat_round_trip() {
        // Pitch kept well inside (-90°, 90°)
        for e in [
            Vector3::new(0.3, -0.5, 1.1),
            Vector3::new(-1.2, 1.0, -2.5),
            Vector3::new(0.01, 0.0, 3.0),
        ] {
            let q = quat_from_euler(&e);
            assert_relative_eq!(euler_from_quat(&q), e, epsilon = 1e-12);
        }
    }

    #[test]
    fn dcm_derivations_agree() {
        // Same instantaneous attitude through both paths must give the
        // same matrix.
        let e = Vector3::new(0.4, -0.7, 2.1);
        let from_euler = dcm_from_euler(&e);
        let from_quat = quat_to_dcm(&quat_from_euler(&e));
        assert_relative_eq!(from_euler, from_quat, epsilon = 1e-12);
    }

    #[test]
    fn conversions_agree_on_unit_quaternions() {
        let e = Vector3::new(0.2, 0.4, -0.6);
        let q = quat_from_euler(&e);
        // (phi, theta, psi) and (roll, pitch, yaw) are the same triple here.
        assert_relative_eq!(euler_from_quat(&q), euler_from_quat_direct(&q), epsilon = 1e-12);
    }

    #[test]
    fn conversions_disagree_off_the_unit_sphere() {
        let q = 1.2 * quat_from_euler(&Vector3::new(0.2, 0.4, -0.6));
        let a = euler_from_quat(&q);
        let b = euler_from_quat_direct(&q);
        // atan2 of homogeneous ratios ignores the scale; the direct form's
        // "1 - 2(..)" terms do not.
        assert!((a.x - b.x).abs() > 1e-3, "roll should differ: {} vs {}", a.x, b.x);
        assert!((a.z - b.z).abs() > 1e-3, "yaw should differ: {} vs {}", a.z, b.z);
    }

    #[test]
    fn direct_conversion_clamps_where_canonical_goes_nan() {
        // Inflated norm pushes the asin argument past 1 near 90° pitch.
        let q = 1.05 * quat_from_euler(&Vector3::new(0.0, 89.9_f64.to_radians(), 0.0));
        assert!(euler_from_quat(&q).y.is_nan());
        assert!(euler_from_quat_direct(&q).y.is_finite());
    }

    #[test]
    fn quat_rates_zero_omega() {
        let q = quat_from_euler(&Vector3::new(0.1, 0.2, 0.3));
        assert_relative_eq!(quat_rates(&q, &Vector3::zeros()), Vector4::zeros(), epsilon = 1e-15);
    }

    #[test]
    fn quat_rates_preserve_norm_to_first_order() {
        // d/dt ||q||^2 = 2 q . qdot must vanish for unit q.
        let q = quat_from_euler(&Vector3::new(-0.4, 0.9, 1.7));
        let qdot = quat_rates(&q, &Vector3::new(0.3, -1.0, 2.0));
        assert_relative_eq!(q.dot(&qdot), 0.0, epsilon = 1e-14);
    }

    #[test]
    fn euler_rates_identity_at_zero_attitude() {
        let omega = Vector3::new(0.1, -0.2, 0.3);
        assert_relative_eq!(euler_rates(&Vector3::zeros(), &omega), omega, epsilon = 1e-15);
    }

    #[test]
    fn euler_rates_blow_up_at_gimbal_lock() {
        // FRAC_PI_2 is not exactly the singular point in f64, so the 1/cos
        // terms come out astronomically large rather than infinite. Either
        // way the trajectory is lost; nothing clamps it.
        let locked = Vector3::new(0.2, std::f64::consts::FRAC_PI_2, 0.0);
        let rates = euler_rates(&locked, &Vector3::new(0.0, 0.0, 1.0));
        assert!(rates.norm() > 1e12, "expected blown-up rates, got {rates}");
    }

    #[test]
    fn normalize_restores_unit_norm() {
        let q = Vector4::new(2.0, -1.0, 0.5, 3.0);
        assert_relative_eq!(normalize(&q).norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn integrate_is_forward_euler() {
        let x = Vector3::new(1.0, 2.0, 3.0);
        let xdot = Vector3::new(0.5, -1.0, 0.0);
        assert_relative_eq!(
            integrate(&x, &xdot, 0.1),
            Vector3::new(1.05, 1.9, 3.0),
            epsilon = 1e-15
        );
    }
}
