pub mod base;
pub mod error;
pub mod geometry;
pub mod interpolation;
pub mod options;
pub mod quaternion;
pub mod rotation_curve;
pub mod smoothing;
pub mod technique;
