#[macro_use]
extern crate log;

#[macro_use]
extern crate lazy_static;

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

pub mod core;

pub use crate::core::base::Float;
pub use crate::core::geometry::Vector3f;
pub use crate::core::error::{TweenError, TweenResult};
pub use crate::core::options::TweenOptions;
pub use crate::core::quaternion::Quaternion;
pub use crate::core::rotation_curve::{RotationCurve, RotationCurveBuilder};
pub use crate::core::smoothing::Smoothing;
pub use crate::core::technique::Technique;
