use super::base::{Float, consts};
use super::error::{TweenError, TweenResult};
use super::quaternion::Quaternion;
use parking_lot::RwLock;

lazy_static! {
    static ref INSTANCE: RwLock<TweenOptions> = RwLock::new(TweenOptions::default());
}

/// Process wide settings for input validation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TweenOptions {
    /// Largest accepted deviation of an input rotation's norm from 1.
    pub unit_tolerance: Float,
    /// Fail on non-unit input rotations. When false they are renormalized
    /// and a warning is logged instead.
    pub strict: bool
}

impl Default for TweenOptions {
    fn default() -> TweenOptions {
        TweenOptions {
            unit_tolerance: consts::UNIT_TOLERANCE,
            strict: true
        }
    }
}

impl TweenOptions {
    /// A snapshot of the current global options.
    pub fn instance() -> TweenOptions {
        *INSTANCE.read()
    }

    /// Replace the global options.
    pub fn set(options: TweenOptions) {
        debug!("Tween options set to {:?}", options);
        *INSTANCE.write() = options;
    }

    /// Check that `q` is a unit quaternion within `unit_tolerance`.
    /// Returns the quaternion to use in its place.
    pub fn check_unit(&self, q: Quaternion, name: &str) -> TweenResult<Quaternion> {
        let norm = q.norm();
        if (norm - 1.0).abs() <= self.unit_tolerance {
            return Ok(q);
        }
        if self.strict || norm == 0.0 || !norm.is_finite() {
            return Err(TweenError::precondition(format!(
                "{} must be a unit quaternion, norm is {}",
                name, norm
            )));
        }
        warn!("Renormalizing {} with norm {}", name, norm);
        Ok(q / norm)
    }
}
