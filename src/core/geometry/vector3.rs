use std::ops::*;
use num;
use super::super::base::Float;

pub type Vector3f = Vector3<Float>;

/// Representation of a 3D Vector, used for the vector part of a quaternion
/// and for rotation axes.
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
#[repr(C)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

impl<T> Vector3<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Vector3<T> {
        Vector3::<T>{x, y, z}
    }

    #[inline]
    pub fn has_nans(&self) -> bool
    where
    T: num::Float
    {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Calculate the length of the Vector3.
    #[inline]
    pub fn length(&self) -> Float
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T> + Into<Float> {
        Float::sqrt((self.x * self.x + self.y * self.y + self.z * self.z).into())
    }

    /// Calculate the dot product of two Vector3.
    pub fn dot(&self, o: &Vector3<T>) -> T
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T>
    {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    /// Calculate the cross product of two Vector3
    pub fn cross(&self, o: &Vector3<T>) -> Vector3<Float>
    where
    T: Copy + Into<f64>
    {
        let v1x: f64 = self.x.into();
        let v1y: f64 = self.y.into();
        let v1z: f64 = self.z.into();
        let v2x: f64 = o.x.into();
        let v2y: f64 = o.y.into();
        let v2z: f64 = o.z.into();
        Vector3::<Float>{
            x: ((v1y * v2z) - (v1z * v2y)) as Float,
            y: ((v1z * v2x) - (v1x * v2z)) as Float,
            z: ((v1x * v2y) - (v1y * v2x)) as Float
        }
    }

    /// Returns the Vector3 normalized to unit length.
    pub fn normalize(&self) -> Vector3<Float>
    where
    T: Copy + Add<T, Output = T> + Mul<T, Output = T> + Into<Float>
    {
        let length: Float = 1.0 as Float / self.length();
        Vector3::<Float>{
            x: self.x.into() * length,
            y: self.y.into() * length,
            z: self.z.into() * length,
        }
    }
}

impl<T> Neg for Vector3<T>
where
T: Neg<Output = T>
{
    type Output = Self;

    fn neg(self) -> Vector3<T> {
        Vector3::<T>{
            x: -self.x,
            y: -self.y,
            z: -self.z
        }
    }
}

impl Div<Float> for Vector3<Float>
{
    type Output = Self;
    #[inline]
    fn div(self, rhs: Float) -> Self {
        let inv = 1.0 / rhs;
        Vector3::<Float>{
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv
        }
    }
}

impl DivAssign<Float> for Vector3<Float>
{
    #[inline]
    fn div_assign(&mut self, rhs: Float) {
        let inv = 1.0 / rhs;
        self.x *= inv;
        self.y *= inv;
        self.z *= inv;
    }
}

impl<T> Mul<T> for Vector3<T>
where
T: Copy + Mul<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn mul(self, rhs: T) -> Self {
        Vector3::<T>{
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs
        }
    }
}

impl<T> MulAssign<T> for Vector3<T>
where
T: Copy + MulAssign
{
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}

impl<T> Add<Vector3<T>> for Vector3<T>
where
T: Add<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z
        }
    }
}

impl<T> AddAssign<Vector3<T>> for Vector3<T>
where
T: AddAssign
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl<T> Sub<Vector3<T>> for Vector3<T>
where
T: Sub<T, Output = T>
{
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Vector3::<T>{
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z
        }
    }
}

impl<T> SubAssign<Vector3<T>> for Vector3<T>
where
T: SubAssign
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
        self.z -= rhs.z;
    }
}
