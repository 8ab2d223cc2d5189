use super::base::Float;
use super::quaternion::Quaternion;

// Spherical interpolation functions on unit quaternions.

/// Slerp along the manifold from `q0` to `q1` without choosing a hemisphere:
/// `q0 * (q0^-1 * q1)^t`.
pub fn slerp_manifold(t: Float, q0: &Quaternion, q1: &Quaternion) -> Quaternion {
    let ratio = q0.conjugate() * *q1;
    *q0 * ratio.pow(t)
}

/// Exact constant angular velocity slerp along the shorter arc.
pub fn slerp(t: Float, q0: &Quaternion, q1: &Quaternion) -> Quaternion {
    if q0.dot(q1) < 0.0 {
        slerp_manifold(t, q0, &-*q1)
    } else {
        slerp_manifold(t, q0, q1)
    }
}

/// Squad control point at `q_cur`, giving a continuous first derivative
/// between the segments before and after it.
pub fn squad_a(q_prev: &Quaternion, q_cur: &Quaternion, q_next: &Quaternion) -> Quaternion {
    let inverse = q_cur.conjugate();
    let log_prev = (inverse * *q_prev).log();
    let log_next = (inverse * *q_next).log();
    *q_cur * ((log_prev + log_next) * -0.25).exp()
}

/// Spherical quadrangle interpolation between `q1` and `q2` with control
/// points `a1` and `a2`.
pub fn squad(t: Float, q1: &Quaternion, a1: &Quaternion, a2: &Quaternion, q2: &Quaternion) -> Quaternion {
    let c = slerp_manifold(t, q1, q2);
    let d = slerp_manifold(t, a1, a2);
    slerp_manifold(2.0 * t * (1.0 - t), &c, &d)
}

/// Sign correct a chain of four samples so consecutive dot products are
/// non-negative, then return `(q1, a1, a2, q2)` ready for `squad`.
pub fn squad_segment(
    q0: &Quaternion,
    q1: &Quaternion,
    q2: &Quaternion,
    q3: &Quaternion
) -> (Quaternion, Quaternion, Quaternion, Quaternion) {
    let q0 = if q0.dot(q1) < 0.0 { -*q0 } else { *q0 };
    let q2 = if q1.dot(q2) < 0.0 { -*q2 } else { *q2 };
    let q3 = if q2.dot(q3) < 0.0 { -*q3 } else { *q3 };
    let a1 = squad_a(&q0, q1, &q2);
    let a2 = squad_a(q1, &q2, &q3);
    (*q1, a1, a2, q2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::radians;
    use crate::core::geometry::Vector3f;

    fn about(axis: Vector3f, degrees: Float) -> Quaternion {
        Quaternion::from_angle_axis(radians(degrees), &axis)
    }

    fn y() -> Vector3f {
        Vector3f::new(0.0, 1.0, 0.0)
    }

    #[test]
    fn exact_slerp() {
        let q0 = Quaternion::identity();
        let q1 = about(y(), 90.0);
        let half = slerp(0.5, &q0, &q1);
        let expected = about(y(), 45.0);
        assert_approx_eq!(half.v.y, expected.v.y, 1e-6);
        assert_approx_eq!(half.w, expected.w, 1e-6);
        assert_eq!(slerp(0.0, &q0, &q1), q0);
        assert!(slerp(1.0, &q0, &q1).same_rotation(&q1, 1e-6));
    }

    #[test]
    fn exact_slerp_takes_short_arc() {
        let q0 = about(y(), 10.0);
        let q1 = -about(y(), 50.0);
        let mid = slerp(0.5, &q0, &q1);
        assert!(mid.same_rotation(&about(y(), 30.0), 1e-6));
        // Without hemisphere selection the long way round is taken
        let long = slerp_manifold(0.5, &q0, &q1);
        assert!(!long.same_rotation(&about(y(), 30.0), 1e-3));
    }

    #[test]
    fn squad_control_points_on_great_circle() {
        // Evenly spaced samples about one axis need no correction
        let q0 = about(y(), 0.0);
        let q1 = about(y(), 30.0);
        let q2 = about(y(), 60.0);
        let a = squad_a(&q0, &q1, &q2);
        assert!(a.same_rotation(&q1, 1e-6));
    }

    #[test]
    fn squad_endpoints() {
        let x = Vector3f::new(1.0, 0.0, 0.0);
        let (q1, a1, a2, q2) = squad_segment(&about(x, 0.0), &about(y(), 40.0), &about(x, 70.0), &about(y(), -20.0));
        let start = squad(0.0, &q1, &a1, &a2, &q2);
        let end = squad(1.0, &q1, &a1, &a2, &q2);
        assert_eq!(start, q1);
        assert!(end.same_rotation(&q2, 1e-5));
        let mid = squad(0.5, &q1, &a1, &a2, &q2);
        assert_approx_eq!(mid.norm(), 1.0, 1e-4);
    }

    #[test]
    fn squad_segment_corrects_signs() {
        let q = about(y(), 25.0);
        let (q1, a1, a2, q2) = squad_segment(&-q, &q, &-q, &q);
        assert_eq!(q2, q);
        for i in 0..=10 {
            let t = i as Float / 10.0;
            assert!(squad(t, &q1, &a1, &a2, &q2).same_rotation(&q, 1e-6));
        }
    }
}
