//! Keyframe smoothing: replace each rotation sample with a weighted average
//! of the samples near it in time.

use std::fmt;
use std::str::FromStr;

use super::base::{Float, modulo};
use super::error::{TweenError, TweenResult};
use super::quaternion::Quaternion;
use super::rotation_curve::validate_keyframes;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Smoothing {
    /// Average with time differences measured around the cycle.
    LoopNlerp,
    /// Average with plain time differences.
    Nlerp
}

impl Smoothing {
    pub const ALL: [Smoothing; 2] = [Smoothing::LoopNlerp, Smoothing::Nlerp];

    pub fn name(&self) -> &'static str {
        match self {
            Smoothing::LoopNlerp => "LoopNlerp",
            Smoothing::Nlerp => "Nlerp",
        }
    }

    /// Smooth the samples of a track with a triangular window `width` wide.
    /// Samples are aligned to the hemisphere of the sample being replaced
    /// before they are averaged.
    pub fn smooth(
        &self,
        times: &[Float],
        cycle_time: Float,
        samples: &[Quaternion],
        width: Float
    ) -> TweenResult<Vec<Quaternion>> {
        validate_keyframes(times, cycle_time, samples)?;
        if !(width >= 0.0 && width <= cycle_time) {
            return Err(TweenError::invalid_argument(
                "width",
                format!("{} is outside [0, {}]", width, cycle_time)
            ));
        }
        if width == 0.0 {
            return Ok(samples.to_vec());
        }

        let last_index = times.len() - 1;
        let half_width = width / 2.0;
        match self {
            Smoothing::Nlerp => Ok(smooth_with(times, samples, last_index, half_width, |dt| dt.abs())),
            Smoothing::LoopNlerp => {
                let cyclic_dt = |dt: Float| {
                    let dt = modulo(dt, cycle_time);
                    if dt > cycle_time / 2.0 { (dt - cycle_time).abs() } else { dt }
                };
                if times[last_index] == cycle_time {
                    if last_index > 1 {
                        // the seam sample is excluded and mirrors sample 0
                        let mut result = smooth_with(times, samples, last_index - 1, half_width, cyclic_dt);
                        result.push(result[0]);
                        Ok(result)
                    } else {
                        debug!("{} falling back to acyclic smoothing of {} samples", self, times.len());
                        Ok(smooth_with(times, samples, last_index, half_width, |dt| dt.abs()))
                    }
                } else {
                    Ok(smooth_with(times, samples, last_index, half_width, cyclic_dt))
                }
            }
        }
    }
}

/// Weighted average of samples `0..=last_index` around each of them. The
/// sample itself always carries weight 1, so the sum never vanishes.
fn smooth_with<F>(
    times: &[Float],
    samples: &[Quaternion],
    last_index: usize,
    half_width: Float,
    distance: F
) -> Vec<Quaternion>
where
F: Fn(Float) -> Float
{
    (0..=last_index).map(|i| {
        let reference = samples[i];
        let mut sum = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        for j in 0..=last_index {
            let dt = distance(times[i] - times[j]);
            if dt < half_width {
                let weight = 1.0 - dt / half_width;
                let sample = if reference.dot(&samples[j]) < 0.0 { -samples[j] } else { samples[j] };
                sum += sample * weight;
            }
        }
        sum.normalize()
    }).collect()
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Smoothing {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Smoothing, TweenError> {
        Smoothing::ALL.iter()
            .find(|smoothing| smoothing.name() == s)
            .copied()
            .ok_or_else(|| TweenError::invalid_argument("smoothing", format!("unknown smoothing '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::base::radians;
    use crate::core::geometry::Vector3f;

    fn about_y(degrees: Float) -> Quaternion {
        Quaternion::from_angle_axis(radians(degrees), &Vector3f::new(0.0, 1.0, 0.0))
    }

    #[test]
    fn zero_width_is_identity() {
        let times = [0.0, 1.0, 2.0];
        let samples = [about_y(0.0), about_y(50.0), about_y(20.0)];
        for smoothing in Smoothing::ALL.iter() {
            assert_eq!(smoothing.smooth(&times, 2.0, &samples, 0.0), Ok(samples.to_vec()));
        }
    }

    #[test]
    fn narrow_window_keeps_samples() {
        // Neighbours one second away fall outside a one second window
        let times = [0.0, 1.0, 2.0];
        let samples = [about_y(0.0), about_y(50.0), about_y(20.0)];
        let smoothed = Smoothing::Nlerp.smooth(&times, 3.0, &samples, 1.0).unwrap();
        for (a, b) in smoothed.iter().zip(samples.iter()) {
            assert!(a.same_rotation(b, 1e-6));
        }
    }

    #[test]
    fn acyclic_average() {
        let times = [0.0, 1.0, 2.0];
        let samples = [about_y(0.0), about_y(60.0), about_y(0.0)];
        let smoothed = Smoothing::Nlerp.smooth(&times, 2.0, &samples, 2.0).unwrap();
        // Window half width 1: only the sample itself has weight
        assert!(smoothed[1].same_rotation(&samples[1], 1e-6));
        let smoothed = Smoothing::Nlerp.smooth(&times, 4.0, &samples, 4.0).unwrap();
        // Half width 2: both neighbours weigh 0.5, pulling the middle sample
        // halfway to 0 degrees
        assert!(smoothed[1].same_rotation(&about_y(30.0), 1e-6));
        assert!(smoothed[0].v.y > 0.0);
        assert_approx_eq!(smoothed[0].norm(), 1.0, 1e-5);
    }

    #[test]
    fn cyclic_window_wraps() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let samples = [about_y(0.0), about_y(40.0), about_y(40.0), -about_y(-40.0)];
        let acyclic = Smoothing::Nlerp.smooth(&times, 4.0, &samples, 3.0).unwrap();
        let cyclic = Smoothing::LoopNlerp.smooth(&times, 4.0, &samples, 3.0).unwrap();
        // Sample 0 sees sample 3 only through the wrap, which cancels sample 1
        assert!(acyclic[0].v.y > 0.01);
        assert!(cyclic[0].same_rotation(&samples[0], 1e-6));
    }

    #[test]
    fn seam_sample_mirrors_first() {
        let times = [0.0, 1.0, 2.0, 3.0];
        let samples = [about_y(0.0), about_y(40.0), about_y(-30.0), about_y(0.0)];
        let smoothed = Smoothing::LoopNlerp.smooth(&times, 3.0, &samples, 2.5).unwrap();
        assert_eq!(smoothed.len(), 4);
        assert_eq!(smoothed[3], smoothed[0]);
    }

    #[test]
    fn rejects_bad_width() {
        let times = [0.0, 1.0];
        let samples = [about_y(0.0), about_y(40.0)];
        for smoothing in Smoothing::ALL.iter() {
            assert!(smoothing.smooth(&times, 2.0, &samples, 2.5).is_err());
            assert!(smoothing.smooth(&times, 2.0, &samples, -1.0).is_err());
        }
        assert_eq!("LoopNlerp".parse::<Smoothing>(), Ok(Smoothing::LoopNlerp));
        assert!("Spline".parse::<Smoothing>().is_err());
    }
}
