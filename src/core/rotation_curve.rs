//! Keyframe storage with an optional per-segment spline cache.

use super::base::{Float, is_strictly_ascending};
use super::error::{TweenError, TweenResult};
use super::quaternion::Quaternion;

/// Cached Squad parameters for the segment starting at one keyframe.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplineSegment {
    pub end_value: Quaternion,
    pub control_point1: Quaternion,
    pub control_point2: Quaternion,
    pub interval_duration: Float
}

/// A rotation track: keyframe times, their rotations, the cycle time used
/// for looping and, for spline techniques, precomputed segment parameters.
///
/// Curves are immutable once built. Use `RotationCurveBuilder` to attach a
/// spline cache.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationCurve {
    times: Vec<Float>,
    cycle_time: Float,
    quaternions: Vec<Quaternion>,
    last_index: usize,
    cyclic: bool,
    segments: Vec<SplineSegment>
}

impl RotationCurve {
    /// Create a curve without a spline cache.
    pub fn new(times: &[Float], cycle_time: Float, quaternions: &[Quaternion]) -> TweenResult<RotationCurve> {
        validate_keyframes(times, cycle_time, quaternions)?;
        Ok(RotationCurve {
            times: times.to_vec(),
            cycle_time,
            quaternions: quaternions.to_vec(),
            last_index: times.len() - 1,
            cyclic: false,
            segments: Vec::new()
        })
    }

    pub fn times(&self) -> &[Float] {
        &self.times
    }

    /// End time for looping.
    pub fn cycle_time(&self) -> Float {
        self.cycle_time
    }

    pub fn quaternions(&self) -> &[Quaternion] {
        &self.quaternions
    }

    /// Index of the final keyframe used by the technique the curve was
    /// precomputed for.
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// True if the final cached segment wraps back to keyframe 0.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// True if spline parameters were precomputed for every segment.
    pub fn has_spline_cache(&self) -> bool {
        !self.segments.is_empty()
    }

    /// The rotation at the start of segment `index`.
    pub fn start_value(&self, index: usize) -> TweenResult<Quaternion> {
        self.check_index(index)?;
        Ok(self.quaternions[index])
    }

    /// The sign corrected rotation at the end of segment `index`.
    pub fn end_value(&self, index: usize) -> TweenResult<Quaternion> {
        Ok(self.segment(index)?.end_value)
    }

    pub fn control_point1(&self, index: usize) -> TweenResult<Quaternion> {
        Ok(self.segment(index)?.control_point1)
    }

    pub fn control_point2(&self, index: usize) -> TweenResult<Quaternion> {
        Ok(self.segment(index)?.control_point2)
    }

    pub fn interval_duration(&self, index: usize) -> TweenResult<Float> {
        Ok(self.segment(index)?.interval_duration)
    }

    /// All cached parameters of segment `index`.
    pub fn segment(&self, index: usize) -> TweenResult<&SplineSegment> {
        self.segments.get(index).ok_or(TweenError::IndexOutOfRange {
            index,
            last: self.segments.len().checked_sub(1)
        })
    }

    fn check_index(&self, index: usize) -> TweenResult<()> {
        if index > self.last_index {
            return Err(TweenError::IndexOutOfRange { index, last: Some(self.last_index) });
        }
        Ok(())
    }
}

/// Populates the spline cache of a curve. The cache only becomes readable
/// through `build`, which refuses a partially populated cache.
#[derive(Debug, Clone)]
pub struct RotationCurveBuilder {
    curve: RotationCurve,
    segments: Vec<Option<SplineSegment>>
}

impl RotationCurveBuilder {
    pub fn new(times: &[Float], cycle_time: Float, quaternions: &[Quaternion]) -> TweenResult<RotationCurveBuilder> {
        let curve = RotationCurve::new(times, cycle_time, quaternions)?;
        let segments = vec![None; curve.last_index + 1];
        Ok(RotationCurveBuilder { curve, segments })
    }

    /// Mark the cache as wrapping from the final segment to keyframe 0.
    pub fn set_cyclic(&mut self, cyclic: bool) {
        self.curve.cyclic = cyclic;
    }

    /// Set the index of the final keyframe to use, discarding any segment
    /// parameters set so far.
    pub fn set_last_index(&mut self, last_index: usize) -> TweenResult<()> {
        if last_index >= self.curve.times.len() {
            return Err(TweenError::invalid_argument(
                "last_index",
                format!("{} exceeds the final keyframe index {}", last_index, self.curve.times.len() - 1)
            ));
        }
        self.curve.last_index = last_index;
        self.segments = vec![None; last_index + 1];
        Ok(())
    }

    /// Set both control points of segment `index`. Must follow
    /// `set_parameters` for the same segment.
    pub fn set_control_points(&mut self, index: usize, control_point1: Quaternion, control_point2: Quaternion) -> TweenResult<()> {
        let last = self.curve.last_index;
        let segment = self.segments.get_mut(index)
            .ok_or(TweenError::IndexOutOfRange { index, last: Some(last) })?
            .as_mut()
            .ok_or_else(|| TweenError::precondition(format!(
                "parameters of segment {} must be set before its control points", index
            )))?;
        segment.control_point1 = control_point1;
        segment.control_point2 = control_point2;
        Ok(())
    }

    /// Set the end value and duration of segment `index`. Control points
    /// default to the segment's end points until set.
    pub fn set_parameters(&mut self, index: usize, end_value: Quaternion, interval_duration: Float) -> TweenResult<()> {
        if !(interval_duration > 0.0) {
            return Err(TweenError::invalid_argument(
                "interval_duration",
                format!("must be positive, got {}", interval_duration)
            ));
        }
        let last = self.curve.last_index;
        let start_value = self.curve.quaternions[index.min(last)];
        let slot = self.segments.get_mut(index)
            .ok_or(TweenError::IndexOutOfRange { index, last: Some(last) })?;
        *slot = Some(SplineSegment {
            end_value,
            control_point1: start_value,
            control_point2: end_value,
            interval_duration
        });
        Ok(())
    }

    /// Finish the curve. Every segment in `[0, last_index]` must have been
    /// populated.
    pub fn build(self) -> TweenResult<RotationCurve> {
        let RotationCurveBuilder { mut curve, segments } = self;
        let mut cache = Vec::with_capacity(segments.len());
        for (index, segment) in segments.into_iter().enumerate() {
            match segment {
                Some(segment) => cache.push(segment),
                None => {
                    return Err(TweenError::invalid_argument(
                        "segments",
                        format!("segment {} of {} was never populated", index, curve.last_index + 1)
                    ));
                }
            }
        }
        curve.segments = cache;
        Ok(curve)
    }
}

/// Check keyframe arrays against the curve invariants.
pub fn validate_keyframes(times: &[Float], cycle_time: Float, quaternions: &[Quaternion]) -> TweenResult<()> {
    if times.is_empty() {
        return Err(TweenError::invalid_argument("times", "at least one keyframe is required"));
    }
    if times.len() != quaternions.len() {
        return Err(TweenError::invalid_argument(
            "quaternions",
            format!("{} rotations given for {} times", quaternions.len(), times.len())
        ));
    }
    let last_time = times[times.len() - 1];
    if !(cycle_time >= last_time) {
        return Err(TweenError::invalid_argument(
            "cycle_time",
            format!("{} is less than the final keyframe time {}", cycle_time, last_time)
        ));
    }
    debug_assert!(times[0] >= 0.0, "keyframe times must be non-negative");
    debug_assert!(is_strictly_ascending(times), "keyframe times must be ascending");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyframes() -> (Vec<Float>, Vec<Quaternion>) {
        let q = Quaternion::new(0.0, 0.6, 0.0, 0.8);
        (vec![0.0, 1.0, 3.0], vec![Quaternion::identity(), q, -q])
    }

    #[test]
    fn construct_rejects_malformed_input() {
        let (times, quaternions) = keyframes();
        assert!(RotationCurve::new(&times, 3.0, &quaternions).is_ok());
        match RotationCurve::new(&times, 2.5, &quaternions) {
            Err(TweenError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "cycle_time"),
            other => panic!("unexpected {:?}", other),
        }
        match RotationCurve::new(&times[..2], 3.0, &quaternions) {
            Err(TweenError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "quaternions"),
            other => panic!("unexpected {:?}", other),
        }
        match RotationCurve::new(&[], 1.0, &[]) {
            Err(TweenError::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "times"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn accessors() {
        let (times, quaternions) = keyframes();
        let curve = RotationCurve::new(&times, 4.0, &quaternions).unwrap();
        assert_eq!(curve.times(), &times[..]);
        assert_eq!(curve.cycle_time(), 4.0);
        assert_eq!(curve.quaternions(), &quaternions[..]);
        assert_eq!(curve.last_index(), 2);
        assert!(!curve.has_spline_cache());
        assert!(!curve.is_cyclic());
        assert_eq!(curve.start_value(1), Ok(quaternions[1]));
        assert_eq!(curve.start_value(3), Err(TweenError::IndexOutOfRange { index: 3, last: Some(2) }));
        assert_eq!(curve.end_value(0), Err(TweenError::IndexOutOfRange { index: 0, last: None }));
    }

    #[test]
    fn builder_populates_cache() {
        let (times, quaternions) = keyframes();
        let mut builder = RotationCurveBuilder::new(&times, 3.0, &quaternions).unwrap();
        builder.set_last_index(1).unwrap();
        builder.set_cyclic(true);
        let a = Quaternion::new(0.0, 0.1, 0.0, 0.99498743);
        let b = Quaternion::new(0.0, 0.5, 0.0, 0.8660254);
        builder.set_parameters(0, quaternions[1], 1.0).unwrap();
        builder.set_control_points(0, a, b).unwrap();
        builder.set_parameters(1, quaternions[0], 2.0).unwrap();
        let curve = builder.build().unwrap();

        assert!(curve.has_spline_cache());
        assert!(curve.is_cyclic());
        assert_eq!(curve.last_index(), 1);
        assert_eq!(curve.end_value(0), Ok(quaternions[1]));
        assert_eq!(curve.control_point1(0), Ok(a));
        assert_eq!(curve.control_point2(0), Ok(b));
        assert_eq!(curve.interval_duration(1), Ok(2.0));
        assert_eq!(curve.control_point1(1), Ok(quaternions[1]));
        assert_eq!(curve.start_value(2), Err(TweenError::IndexOutOfRange { index: 2, last: Some(1) }));
        assert_eq!(curve.interval_duration(2), Err(TweenError::IndexOutOfRange { index: 2, last: Some(1) }));
    }

    #[test]
    fn builder_refuses_partial_cache() {
        let (times, quaternions) = keyframes();
        let mut builder = RotationCurveBuilder::new(&times, 3.0, &quaternions).unwrap();
        builder.set_parameters(0, quaternions[1], 1.0).unwrap();
        assert!(builder.set_parameters(1, quaternions[2], 0.0).is_err());
        assert!(builder.set_control_points(1, quaternions[1], quaternions[2]).is_err());
        assert!(builder.set_parameters(5, quaternions[2], 1.0).is_err());
        assert!(builder.set_last_index(3).is_err());
        assert!(builder.build().is_err());
    }
}
