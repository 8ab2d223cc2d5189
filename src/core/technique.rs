//! Techniques for interpolating a time sequence of rotations.
//!
//! Every technique takes keyframe times (ascending), a cycle time and one
//! unit quaternion per keyframe, and evaluates the track at a query time.
//! The `Loop` techniques treat the track as cyclic: after the final keyframe
//! the curve returns to the first keyframe at the cycle time.
//!
//! When the final keyframe sits exactly at the cycle time it is the loop
//! seam and is ignored by the cyclic techniques. If that leaves a single
//! segment the technique falls back to its acyclic counterpart.

use std::fmt;
use std::str::FromStr;

use super::base::{Float, find_previous_index};
use super::error::{TweenError, TweenResult};
use super::interpolation::{self, squad, squad_segment};
use super::options::TweenOptions;
use super::quaternion::Quaternion;
use super::rotation_curve::{RotationCurve, RotationCurveBuilder, validate_keyframes};

/// Blend between the two samples bounding a segment.
type BlendFn = fn(Float, &Quaternion, &Quaternion) -> Quaternion;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Technique {
    /// Cyclic normalized linear interpolation.
    LoopNlerp,
    /// Cyclic approximate spherical interpolation.
    LoopQuickSlerp,
    /// Cyclic exact spherical interpolation.
    LoopSlerp,
    /// Cyclic Squad spline, C1 continuous across the seam.
    LoopSpline,
    /// Normalized linear interpolation.
    Nlerp,
    /// Approximate spherical interpolation.
    QuickSlerp,
    /// Exact spherical interpolation along the shorter arc.
    Slerp,
    /// Squad spline with duplicated end samples.
    Spline
}

/// A segment of the track and the query's position along it.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Segment {
    index1: usize,
    index2: usize,
    duration: Float,
    t: Float
}

impl Technique {
    pub const ALL: [Technique; 8] = [
        Technique::LoopNlerp,
        Technique::LoopQuickSlerp,
        Technique::LoopSlerp,
        Technique::LoopSpline,
        Technique::Nlerp,
        Technique::QuickSlerp,
        Technique::Slerp,
        Technique::Spline,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Technique::LoopNlerp => "LoopNlerp",
            Technique::LoopQuickSlerp => "LoopQuickSlerp",
            Technique::LoopSlerp => "LoopSlerp",
            Technique::LoopSpline => "LoopSpline",
            Technique::Nlerp => "Nlerp",
            Technique::QuickSlerp => "QuickSlerp",
            Technique::Slerp => "Slerp",
            Technique::Spline => "Spline",
        }
    }

    pub fn is_cyclic(&self) -> bool {
        match self {
            Technique::LoopNlerp | Technique::LoopQuickSlerp | Technique::LoopSlerp | Technique::LoopSpline => true,
            _ => false,
        }
    }

    /// The two-sample blend of the linear techniques, `None` for splines.
    fn linear_blend(&self) -> Option<BlendFn> {
        match self {
            Technique::LoopNlerp | Technique::Nlerp => Some(nlerp_blend as BlendFn),
            Technique::LoopQuickSlerp | Technique::QuickSlerp => Some(quick_slerp_blend as BlendFn),
            Technique::LoopSlerp | Technique::Slerp => Some(interpolation::slerp as BlendFn),
            Technique::LoopSpline | Technique::Spline => None,
        }
    }

    /// Index of the final keyframe a cyclic evaluation wraps from, or `None`
    /// if the track is evaluated acyclically.
    fn loop_last_index(&self, times: &[Float], cycle_time: Float) -> Option<usize> {
        if !self.is_cyclic() {
            return None;
        }
        let last_index = times.len() - 1;
        if times[last_index] == cycle_time {
            if last_index > 1 {
                // ignore the final keyframe, it duplicates the seam
                Some(last_index - 1)
            } else {
                debug!("{} falling back to acyclic evaluation of {} keyframes", self, times.len());
                None
            }
        } else {
            Some(last_index)
        }
    }

    /// Evaluate the track at `time` using the global options.
    pub fn interpolate(
        &self,
        time: Float,
        times: &[Float],
        cycle_time: Float,
        quaternions: &[Quaternion]
    ) -> TweenResult<Quaternion> {
        self.interpolate_with(&TweenOptions::instance(), time, times, cycle_time, quaternions)
    }

    /// Evaluate the track at `time`.
    pub fn interpolate_with(
        &self,
        options: &TweenOptions,
        time: Float,
        times: &[Float],
        cycle_time: Float,
        quaternions: &[Quaternion]
    ) -> TweenResult<Quaternion> {
        validate_keyframes(times, cycle_time, quaternions)?;
        check_time(time)?;
        if times.len() == 1 || time < times[0] {
            return keyframe(options, quaternions, 0);
        }

        let loop_last_index = self.loop_last_index(times, cycle_time);
        match (self.linear_blend(), loop_last_index) {
            (Some(blend), Some(last_index)) => {
                loop_lerp(options, blend, time, last_index, times, cycle_time, quaternions)
            }
            (Some(blend), None) => lerp(options, blend, time, times, quaternions),
            (None, Some(last_index)) => {
                loop_spline(options, time, last_index, times, cycle_time, quaternions)
            }
            (None, None) => spline(options, time, times, quaternions),
        }
    }

    /// Evaluate a curve built by `precompute` for this technique, using the
    /// global options.
    pub fn interpolate_curve(&self, time: Float, curve: &RotationCurve) -> TweenResult<Quaternion> {
        self.interpolate_curve_with(&TweenOptions::instance(), time, curve)
    }

    /// Evaluate a curve built by `precompute` for this technique. Splines
    /// read the cached control points. A curve without a cache, or whose
    /// cache was built for the other looping mode, is evaluated from its
    /// keyframes.
    pub fn interpolate_curve_with(
        &self,
        options: &TweenOptions,
        time: Float,
        curve: &RotationCurve
    ) -> TweenResult<Quaternion> {
        check_time(time)?;
        let times = curve.times();
        let cycle_time = curve.cycle_time();
        let quaternions = curve.quaternions();
        if self.linear_blend().is_some() || !curve.has_spline_cache() {
            return self.interpolate_with(options, time, times, cycle_time, quaternions);
        }
        let loop_last_index = self.loop_last_index(times, cycle_time);
        if curve.is_cyclic() != loop_last_index.is_some() {
            debug!(
                "{} ignoring the {} spline cache of the curve",
                self, if curve.is_cyclic() { "cyclic" } else { "acyclic" }
            );
            return self.interpolate_with(options, time, times, cycle_time, quaternions);
        }
        if times.len() == 1 || time < times[0] {
            return keyframe(options, quaternions, 0);
        }

        match loop_last_index {
            Some(_) => {
                check_cycle_time(time, cycle_time)?;
                if time == cycle_time {
                    return keyframe(options, quaternions, 0);
                }
                let index1 = previous_index(time, times).min(curve.last_index());
                cached_squad(options, time, index1, curve)
            }
            None => {
                let index1 = previous_index(time, times);
                if index1 >= curve.last_index() {
                    return keyframe(options, quaternions, curve.last_index());
                }
                cached_squad(options, time, index1, curve)
            }
        }
    }

    /// Build a curve for repeated evaluation with this technique using the
    /// global options.
    pub fn precompute(
        &self,
        times: &[Float],
        cycle_time: Float,
        quaternions: &[Quaternion]
    ) -> TweenResult<RotationCurve> {
        self.precompute_with(&TweenOptions::instance(), times, cycle_time, quaternions)
    }

    /// Build a curve for repeated evaluation with this technique. Spline
    /// techniques cache the Squad control points and duration of every
    /// segment, the linear techniques store the keyframes only.
    pub fn precompute_with(
        &self,
        options: &TweenOptions,
        times: &[Float],
        cycle_time: Float,
        quaternions: &[Quaternion]
    ) -> TweenResult<RotationCurve> {
        if self.linear_blend().is_some() {
            return RotationCurve::new(times, cycle_time, quaternions);
        }
        let mut builder = RotationCurveBuilder::new(times, cycle_time, quaternions)?;
        match self.loop_last_index(times, cycle_time) {
            Some(last_index) => {
                builder.set_cyclic(true);
                precompute_loop_spline(options, &mut builder, last_index, times, cycle_time, quaternions)?
            }
            None => precompute_spline(options, &mut builder, times, quaternions)?,
        }
        let curve = builder.build()?;
        debug!("{} precomputed {} segments", self, curve.last_index() + 1);
        Ok(curve)
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Technique {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Technique, TweenError> {
        Technique::ALL.iter()
            .find(|technique| technique.name() == s)
            .copied()
            .ok_or_else(|| TweenError::invalid_argument("technique", format!("unknown technique '{}'", s)))
    }
}

fn nlerp_blend(t: Float, q0: &Quaternion, q1: &Quaternion) -> Quaternion {
    q0.nlerp(q1, t)
}

fn quick_slerp_blend(t: Float, q0: &Quaternion, q1: &Quaternion) -> Quaternion {
    q0.slerp(q1, t)
}

/// Greatest keyframe index whose time is at or before `time`.
fn previous_index(time: Float, times: &[Float]) -> usize {
    find_previous_index(times.len(), |i| times[i] <= time).unwrap_or(0)
}

fn check_time(time: Float) -> TweenResult<()> {
    if time.is_nan() {
        return Err(TweenError::precondition("time must be a number"));
    }
    Ok(())
}

fn check_cycle_time(time: Float, cycle_time: Float) -> TweenResult<()> {
    if !(time >= 0.0 && time <= cycle_time) {
        return Err(TweenError::time_out_of_cycle(time, cycle_time));
    }
    Ok(())
}

/// Locate `time` on a cyclic track whose final keyframe is `last_index`.
/// The segment after `last_index` wraps to keyframe 0.
fn cyclic_segment(time: Float, last_index: usize, times: &[Float], cycle_time: Float) -> Segment {
    let index1 = previous_index(time, times).min(last_index);
    let (index2, duration) = if index1 < last_index {
        (index1 + 1, times[index1 + 1] - times[index1])
    } else {
        (0, cycle_time - times[last_index])
    };
    debug_assert!(duration > 0.0, "segment duration must be positive");
    let t = (time - times[index1]) / duration;
    trace!("time {} in segment {} -> {}, t = {}", time, index1, index2, t);
    Segment { index1, index2, duration, t }
}

/// Locate `time` on an acyclic track, `None` at or after the final keyframe.
fn acyclic_segment(time: Float, times: &[Float]) -> Option<Segment> {
    let index1 = previous_index(time, times);
    if index1 >= times.len() - 1 {
        return None;
    }
    let index2 = index1 + 1;
    let duration = times[index2] - times[index1];
    debug_assert!(duration > 0.0, "segment duration must be positive");
    let t = (time - times[index1]) / duration;
    trace!("time {} in segment {} -> {}, t = {}", time, index1, index2, t);
    Some(Segment { index1, index2, duration, t })
}

/// The keyframe at `index`, for queries that land on it without blending.
fn keyframe(options: &TweenOptions, quaternions: &[Quaternion], index: usize) -> TweenResult<Quaternion> {
    options.check_unit(quaternions[index], "keyframe")
}

fn blend_pair(
    options: &TweenOptions,
    blend: BlendFn,
    t: Float,
    q0: &Quaternion,
    q1: &Quaternion
) -> TweenResult<Quaternion> {
    let q0 = options.check_unit(*q0, "q0")?;
    let q1 = options.check_unit(*q1, "q1")?;
    if q0 == q1 {
        return Ok(q0);
    }
    Ok(blend(t, &q0, &q1))
}

fn lerp(
    options: &TweenOptions,
    blend: BlendFn,
    time: Float,
    times: &[Float],
    quaternions: &[Quaternion]
) -> TweenResult<Quaternion> {
    match acyclic_segment(time, times) {
        Some(segment) => blend_pair(
            options,
            blend,
            segment.t,
            &quaternions[segment.index1],
            &quaternions[segment.index2]
        ),
        None => keyframe(options, quaternions, times.len() - 1),
    }
}

fn loop_lerp(
    options: &TweenOptions,
    blend: BlendFn,
    time: Float,
    last_index: usize,
    times: &[Float],
    cycle_time: Float,
    quaternions: &[Quaternion]
) -> TweenResult<Quaternion> {
    check_cycle_time(time, cycle_time)?;
    if time == cycle_time {
        return keyframe(options, quaternions, 0);
    }
    let segment = cyclic_segment(time, last_index, times, cycle_time);
    blend_pair(
        options,
        blend,
        segment.t,
        &quaternions[segment.index1],
        &quaternions[segment.index2]
    )
}

fn flip_spline(
    options: &TweenOptions,
    t: Float,
    q0: &Quaternion,
    q1: &Quaternion,
    q2: &Quaternion,
    q3: &Quaternion
) -> TweenResult<Quaternion> {
    let q0 = options.check_unit(*q0, "q0")?;
    let q1 = options.check_unit(*q1, "q1")?;
    let q2 = options.check_unit(*q2, "q2")?;
    let q3 = options.check_unit(*q3, "q3")?;
    let (q1, a1, a2, q2) = squad_segment(&q0, &q1, &q2, &q3);
    Ok(squad(t, &q1, &a1, &a2, &q2))
}

fn spline(
    options: &TweenOptions,
    time: Float,
    times: &[Float],
    quaternions: &[Quaternion]
) -> TweenResult<Quaternion> {
    let last_index = times.len() - 1;
    let segment = match acyclic_segment(time, times) {
        Some(segment) => segment,
        None => return keyframe(options, quaternions, last_index),
    };
    // the end samples stand in for their missing neighbours
    let index0 = segment.index1.saturating_sub(1);
    let index3 = (segment.index2 + 1).min(last_index);
    flip_spline(
        options,
        segment.t,
        &quaternions[index0],
        &quaternions[segment.index1],
        &quaternions[segment.index2],
        &quaternions[index3]
    )
}

fn loop_spline(
    options: &TweenOptions,
    time: Float,
    last_index: usize,
    times: &[Float],
    cycle_time: Float,
    quaternions: &[Quaternion]
) -> TweenResult<Quaternion> {
    check_cycle_time(time, cycle_time)?;
    if time == cycle_time {
        return keyframe(options, quaternions, 0);
    }
    let segment = cyclic_segment(time, last_index, times, cycle_time);
    let index0 = if segment.index1 == 0 { last_index } else { segment.index1 - 1 };
    let index3 = if segment.index2 == last_index { 0 } else { segment.index2 + 1 };
    flip_spline(
        options,
        segment.t,
        &quaternions[index0],
        &quaternions[segment.index1],
        &quaternions[segment.index2],
        &quaternions[index3]
    )
}

fn cached_squad(
    options: &TweenOptions,
    time: Float,
    index1: usize,
    curve: &RotationCurve
) -> TweenResult<Quaternion> {
    let q1 = options.check_unit(curve.start_value(index1)?, "q1")?;
    let segment = curve.segment(index1)?;
    let t = (time - curve.times()[index1]) / segment.interval_duration;
    Ok(squad(t, &q1, &segment.control_point1, &segment.control_point2, &segment.end_value))
}

fn precompute_flip_spline(
    options: &TweenOptions,
    builder: &mut RotationCurveBuilder,
    index1: usize,
    duration: Float,
    q0: &Quaternion,
    q1: &Quaternion,
    q2: &Quaternion,
    q3: &Quaternion
) -> TweenResult<()> {
    let q0 = options.check_unit(*q0, "q0")?;
    let q1 = options.check_unit(*q1, "q1")?;
    let q2 = options.check_unit(*q2, "q2")?;
    let q3 = options.check_unit(*q3, "q3")?;
    let (_, a1, a2, q2) = squad_segment(&q0, &q1, &q2, &q3);
    builder.set_parameters(index1, q2, duration)?;
    builder.set_control_points(index1, a1, a2)
}

fn precompute_spline(
    options: &TweenOptions,
    builder: &mut RotationCurveBuilder,
    times: &[Float],
    quaternions: &[Quaternion]
) -> TweenResult<()> {
    let last_index = times.len() - 1;
    builder.set_last_index(last_index)?;
    for index1 in 0..=last_index {
        let index0 = index1.saturating_sub(1);
        // the final entry is stationary and never evaluated
        let (index2, duration) = match acyclic_segment(times[index1], times) {
            Some(segment) => (segment.index2, segment.duration),
            None => (last_index, 1.0),
        };
        let index3 = (index2 + 1).min(last_index);
        precompute_flip_spline(
            options,
            builder,
            index1,
            duration,
            &quaternions[index0],
            &quaternions[index1],
            &quaternions[index2],
            &quaternions[index3]
        )?;
    }
    Ok(())
}

fn precompute_loop_spline(
    options: &TweenOptions,
    builder: &mut RotationCurveBuilder,
    last_index: usize,
    times: &[Float],
    cycle_time: Float,
    quaternions: &[Quaternion]
) -> TweenResult<()> {
    builder.set_last_index(last_index)?;
    for index1 in 0..=last_index {
        let segment = cyclic_segment(times[index1], last_index, times, cycle_time);
        let index0 = if index1 == 0 { last_index } else { index1 - 1 };
        let index3 = if segment.index2 == last_index { 0 } else { segment.index2 + 1 };
        precompute_flip_spline(
            options,
            builder,
            index1,
            segment.duration,
            &quaternions[index0],
            &quaternions[index1],
            &quaternions[segment.index2],
            &quaternions[index3]
        )?;
    }
    Ok(())
}
