use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolationMode {
    Linear,
    Step,
}

/// A value type that can be blended between two keyframes.
pub trait Interpolatable: Clone {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a.lerp(*b, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a.slerp(*b, t)
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(a: &Self, b: &Self, t: f32) -> Self {
        a + (b - a) * t
    }
}

/// One animation channel: keyframe times and values of a single component.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f64>,
    pub values: Vec<T>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    /// # Panics
    ///
    /// Panics if the track is empty or times/values lengths disagree.
    #[must_use]
    pub fn new(times: Vec<f64>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        assert!(!times.is_empty(), "keyframe track has no keyframes");
        assert_eq!(
            times.len(),
            values.len(),
            "keyframe track times/values length mismatch"
        );
        Self {
            times,
            values,
            interpolation,
        }
    }

    /// Last keyframe time of this channel.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Samples the channel at `time`, clamping outside the keyframe range.
    ///
    /// Looping and infinity behaviors are the clip's business; by the time a
    /// track is sampled the time value is already inside (or clamped to) the
    /// authored range.
    #[must_use]
    pub fn sample(&self, time: f64) -> T {
        // partition_point finds the first index where t > time, i.e. the
        // next keyframe.
        let next_idx = self.times.partition_point(|&t| t <= time);
        let index = next_idx.saturating_sub(1);

        let len = self.times.len();
        if index >= len - 1 {
            return self.values[len - 1].clone();
        }

        let t0 = self.times[index];
        let t1 = self.times[index + 1];
        let dt = t1 - t0;

        // Guard against zero-length segments.
        let t = if dt > 1e-9 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0) as f32;

        match self.interpolation {
            InterpolationMode::Step => self.values[index].clone(),
            InterpolationMode::Linear => {
                T::interpolate_linear(&self.values[index], &self.values[index + 1], t)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_track_interpolates_between_keys() {
        let track = KeyframeTrack::new(
            vec![0.0, 2.0],
            vec![0.0_f32, 10.0],
            InterpolationMode::Linear,
        );
        assert!((track.sample(1.0) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn step_track_holds_previous_key() {
        let track = KeyframeTrack::new(
            vec![0.0, 1.0, 2.0],
            vec![1.0_f32, 2.0, 3.0],
            InterpolationMode::Step,
        );
        assert!((track.sample(1.5) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn sample_clamps_outside_key_range() {
        let track = KeyframeTrack::new(
            vec![1.0, 2.0],
            vec![4.0_f32, 8.0],
            InterpolationMode::Linear,
        );
        assert!((track.sample(0.0) - 4.0).abs() < 1e-6);
        assert!((track.sample(5.0) - 8.0).abs() < 1e-6);
    }
}
