use super::base::{Float, consts, lerp};
use super::geometry::Vector3f;
use std::ops::{Add, AddAssign, Sub, SubAssign, Div, DivAssign, Mul, MulAssign, Neg};

/// A quaternion `w + xi + yj + zk`, stored as vector part `v` and scalar `w`.
/// Rotations are represented by unit quaternions, where `q` and `-q` encode
/// the same rotation.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Quaternion {
    pub v: Vector3f,
    pub w: Float
}

impl Quaternion {
    pub fn new(x: Float, y: Float, z: Float, w: Float) -> Quaternion {
        Quaternion{
            v: Vector3f{x, y, z},
            w
        }
    }

    /// The identity rotation.
    pub fn identity() -> Quaternion {
        Quaternion::default()
    }

    /// Rotation of `angle` radians about `axis`. The axis need not be
    /// normalized but must be non-zero.
    pub fn from_angle_axis(angle: Float, axis: &Vector3f) -> Quaternion {
        let half = 0.5 * angle;
        Quaternion{
            v: axis.normalize() * half.sin(),
            w: half.cos()
        }
    }

    /// Calculate the dot product between this Quaternion and another.
    pub fn dot(&self, q2: &Quaternion) -> Float {
        self.v.dot(&q2.v) + self.w * q2.w
    }

    /// The length of this Quaternion.
    pub fn norm(&self) -> Float {
        self.dot(self).sqrt()
    }

    /// Normalize this Quaternion.
    pub fn normalize(&self) -> Quaternion {
        *self / self.dot(&self).sqrt()
    }

    /// Returns true if the norm is within `tolerance` of 1.
    pub fn is_unit(&self, tolerance: Float) -> bool {
        (self.norm() - 1.0).abs() <= tolerance
    }

    pub fn has_nans(&self) -> bool {
        self.v.has_nans() || self.w.is_nan()
    }

    /// The conjugate, which is also the inverse of a unit quaternion.
    pub fn conjugate(&self) -> Quaternion {
        Quaternion{
            v: -self.v,
            w: self.w
        }
    }

    /// Natural logarithm. For a unit quaternion this is the pure quaternion
    /// `axis * angle / 2`.
    ///
    /// When the vector part is near zero the axis is undefined; a positive
    /// scalar part then takes the limit `v / w`, a negative one yields a
    /// zero vector part.
    pub fn log(&self) -> Quaternion {
        let norm = self.norm();
        let v_length = self.v.length();
        let scale = if v_length > consts::SMALL_ANGLE {
            v_length.atan2(self.w) / v_length
        } else if self.w > 0.0 {
            1.0 / self.w
        } else {
            0.0
        };
        Quaternion{
            v: self.v * scale,
            w: norm.ln()
        }
    }

    /// Exponential map, the inverse of `log`.
    pub fn exp(&self) -> Quaternion {
        let v_length = self.v.length();
        let ew = self.w.exp();
        // sin(x) / x, using the series near zero
        let sinc = if v_length > consts::SMALL_ANGLE {
            v_length.sin() / v_length
        } else {
            1.0 - v_length * v_length / 6.0
        };
        Quaternion{
            v: self.v * (ew * sinc),
            w: ew * v_length.cos()
        }
    }

    /// Raise this Quaternion to a real power, `exp(t * log(q))`.
    pub fn pow(&self, t: Float) -> Quaternion {
        (self.log() * t).exp()
    }

    /// Normalized linear interpolation towards `q2`, taking the shorter arc.
    pub fn nlerp(&self, q2: &Quaternion, t: Float) -> Quaternion {
        let q2 = if self.dot(q2) < 0.0 { -*q2 } else { *q2 };
        lerp(t, *self, q2).normalize()
    }

    /// Interpolate between two Quaternions using an approximate spherical
    /// interpolation that takes the shorter arc. Nearly parallel inputs are
    /// blended linearly.
    pub fn slerp(&self, q2: &Quaternion, t: Float) -> Quaternion {
        let mut q2 = *q2;
        let mut cos_theta = self.dot(&q2);
        if cos_theta < 0.0 {
            q2 = -q2;
            cos_theta = -cos_theta;
        }
        if cos_theta > 0.9995 {
            (*self * (1.0 - t) + q2 * t).normalize()
        }
        else {
            let theta: Float = num::clamp(cos_theta, -1.0, 1.0).acos();
            let thetap = theta * t;
            let qperp = (q2 - *self * cos_theta).normalize();
            *self * thetap.cos() + qperp * thetap.sin()
        }
    }

    /// Rotate a vector by this unit Quaternion.
    pub fn rotate(&self, v: &Vector3f) -> Vector3f {
        let p = Quaternion{ v: *v, w: 0.0 };
        (*self * p * self.conjugate()).v
    }

    /// Returns true if both quaternions describe the same rotation within
    /// `tolerance`, regardless of sign.
    pub fn same_rotation(&self, q2: &Quaternion, tolerance: Float) -> bool {
        1.0 - self.dot(q2).abs() <= tolerance
    }
}

impl Default for Quaternion {
    fn default() -> Quaternion {
        Quaternion{
            v: Vector3f::default(),
            w: 1.0
        }
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;
    fn neg(self) -> Quaternion {
        Quaternion{
            v: -self.v,
            w: -self.w
        }
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion{
            v: self.v + rhs.v,
            w: self.w + rhs.w
        }
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Quaternion) {
        self.v += rhs.v;
        self.w += rhs.w;
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;
    fn sub(self, rhs: Quaternion) -> Quaternion {
        Quaternion{
            v: self.v - rhs.v,
            w: self.w - rhs.w
        }
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Quaternion) {
        self.v -= rhs.v;
        self.w -= rhs.w;
    }
}

/// Hamilton product, `self * rhs` applies `rhs` first.
impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion{
            v: rhs.v * self.w + self.v * rhs.w + self.v.cross(&rhs.v),
            w: self.w * rhs.w - self.v.dot(&rhs.v)
        }
    }
}

impl Mul<Float> for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Float) -> Quaternion {
        Quaternion{
            v: self.v * rhs,
            w: self.w * rhs
        }
    }
}

impl MulAssign<Float> for Quaternion {
    fn mul_assign(&mut self, rhs: Float) {
        self.v *= rhs;
        self.w *= rhs;
    }
}

impl Div<Float> for Quaternion {
    type Output = Quaternion;
    fn div(self, rhs: Float) -> Quaternion {
        Quaternion{
            v: self.v / rhs,
            w: self.w / rhs
        }
    }
}

impl DivAssign<Float> for Quaternion {
    fn div_assign(&mut self, rhs: Float) {
        self.v /= rhs;
        self.w /= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::radians;

    fn about_y(degrees: Float) -> Quaternion {
        Quaternion::from_angle_axis(radians(degrees), &Vector3f::new(0.0, 1.0, 0.0))
    }

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        println!("{:?} {:?}", a, b);
        assert_approx_eq!(a.v.x, b.v.x, 1e-5);
        assert_approx_eq!(a.v.y, b.v.y, 1e-5);
        assert_approx_eq!(a.v.z, b.v.z, 1e-5);
        assert_approx_eq!(a.w, b.w, 1e-5);
    }

    #[test]
    fn hamilton_product() {
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(i * i, Quaternion::new(0.0, 0.0, 0.0, -1.0));
        assert_quat_eq(about_y(30.0) * about_y(60.0), about_y(90.0));
    }

    #[test]
    fn conjugate_is_inverse() {
        let q = Quaternion::from_angle_axis(1.2, &Vector3f::new(1.0, 2.0, -0.5));
        assert_quat_eq(q * q.conjugate(), Quaternion::identity());
        assert_quat_eq(q.conjugate() * q, Quaternion::identity());
    }

    #[test]
    fn log_exp() {
        let q = about_y(90.0);
        let l = q.log();
        assert_approx_eq!(l.w, 0.0, 1e-6);
        assert_approx_eq!(l.v.y, consts::FRAC_PI_4, 1e-6);
        assert_quat_eq(l.exp(), q);

        let identity = Quaternion::identity();
        assert_eq!(identity.log(), Quaternion::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).exp(), identity);

        // Tiny rotations go through the small angle branches
        let tiny = Quaternion::new(1e-8, 0.0, 0.0, 1.0);
        assert!(!tiny.log().has_nans());
        assert_quat_eq(tiny.log().exp(), tiny);
    }

    #[test]
    fn pow() {
        assert_quat_eq(about_y(90.0).pow(0.5), about_y(45.0));
        assert_quat_eq(about_y(90.0).pow(0.0), Quaternion::identity());
        assert_quat_eq(about_y(40.0).pow(2.0), about_y(80.0));
    }

    #[test]
    fn rotate_vector() {
        let v = about_y(90.0).rotate(&Vector3f::new(1.0, 0.0, 0.0));
        assert_approx_eq!(v.x, 0.0, 1e-6);
        assert_approx_eq!(v.z, -1.0, 1e-6);
    }

    #[test]
    fn quick_slerp_and_nlerp() {
        let q0 = about_y(0.0);
        let q1 = about_y(90.0);
        assert_quat_eq(q0.slerp(&q1, 0.5), about_y(45.0));
        assert_quat_eq(q0.slerp(&q1, 0.0), q0);
        assert_quat_eq(q0.nlerp(&q1, 0.5), about_y(45.0));
        // Antipodal inputs blend along the short arc
        assert_quat_eq(q1.slerp(&-q1, 0.3), q1);
        assert_quat_eq(q1.nlerp(&-q1, 0.7), q1);
        assert!(q1.same_rotation(&-q1, 1e-6));
        assert!(!q1.same_rotation(&q0, 1e-3));
    }
}
