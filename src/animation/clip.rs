use glam::{Mat4, Quat, Vec3};

use crate::animation::tracks::KeyframeTrack;
use crate::scene::graph::NodeId;
use crate::scene::transform::Trs;

/// Sampling policy outside a clip's authored time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Hold the boundary keyframe.
    Constant,
    /// Repeat the clip cyclically.
    Cycle,
    /// Ping-pong between forward and reverse playback.
    Oscillate,
}

/// A keyframed animation clip driving exactly one scene graph node.
///
/// A clip carries up to three channels (translation, rotation, scaling); a
/// missing channel holds that component at its rest value. Sampling composes
/// the channel values into a local matrix in `T · R · S` order.
#[derive(Debug, Clone)]
pub struct Animation {
    name: String,
    node: NodeId,
    duration: f64,
    pre_infinity: Behavior,
    post_infinity: Behavior,
    translation: Option<KeyframeTrack<Vec3>>,
    rotation: Option<KeyframeTrack<Quat>>,
    scaling: Option<KeyframeTrack<Vec3>>,
}

impl Animation {
    /// # Panics
    ///
    /// Panics if `duration` is negative.
    #[must_use]
    pub fn new(name: impl Into<String>, node: NodeId, duration: f64) -> Self {
        assert!(duration >= 0.0, "animation duration must be non-negative");
        Self {
            name: name.into(),
            node,
            duration,
            pre_infinity: Behavior::Constant,
            post_infinity: Behavior::Constant,
            translation: None,
            rotation: None,
            scaling: None,
        }
    }

    #[must_use]
    pub fn with_translation(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.translation = Some(track);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, track: KeyframeTrack<Quat>) -> Self {
        self.rotation = Some(track);
        self
    }

    #[must_use]
    pub fn with_scaling(mut self, track: KeyframeTrack<Vec3>) -> Self {
        self.scaling = Some(track);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scene graph node this clip drives.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Authored duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[must_use]
    pub fn pre_infinity_behavior(&self) -> Behavior {
        self.pre_infinity
    }

    #[must_use]
    pub fn post_infinity_behavior(&self) -> Behavior {
        self.post_infinity
    }

    pub fn set_pre_infinity_behavior(&mut self, behavior: Behavior) {
        self.pre_infinity = behavior;
    }

    pub fn set_post_infinity_behavior(&mut self, behavior: Behavior) {
        self.post_infinity = behavior;
    }

    /// Samples the clip and composes the node's local matrix.
    #[must_use]
    pub fn sample(&self, time: f64) -> Mat4 {
        let t = self.wrap_time(time);
        let trs = Trs {
            translation: self
                .translation
                .as_ref()
                .map_or(Vec3::ZERO, |track| track.sample(t)),
            rotation: self
                .rotation
                .as_ref()
                .map_or(Quat::IDENTITY, |track| track.sample(t)),
            scaling: self
                .scaling
                .as_ref()
                .map_or(Vec3::ONE, |track| track.sample(t)),
        };
        trs.to_matrix()
    }

    /// Maps an arbitrary time value into the authored range according to the
    /// pre/post-infinity behaviors.
    fn wrap_time(&self, time: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        if time < 0.0 {
            match self.pre_infinity {
                Behavior::Constant => 0.0,
                Behavior::Cycle => time.rem_euclid(self.duration),
                Behavior::Oscillate => ping_pong(time, self.duration),
            }
        } else if time > self.duration {
            match self.post_infinity {
                Behavior::Constant => self.duration,
                Behavior::Cycle => time.rem_euclid(self.duration),
                Behavior::Oscillate => ping_pong(time, self.duration),
            }
        } else {
            time
        }
    }
}

/// Folds `time` into `[0, duration]`, reversing direction every cycle.
fn ping_pong(time: f64, duration: f64) -> f64 {
    let cycle = duration * 2.0;
    let t = time.rem_euclid(cycle);
    if t > duration { cycle - t } else { t }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::tracks::InterpolationMode;

    fn translation_clip(behavior: Behavior) -> Animation {
        let track = KeyframeTrack::new(
            vec![0.0, 2.0],
            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
            InterpolationMode::Linear,
        );
        let mut clip = Animation::new("slide", NodeId::new(0), 2.0).with_translation(track);
        clip.set_pre_infinity_behavior(behavior);
        clip.set_post_infinity_behavior(behavior);
        clip
    }

    #[test]
    fn constant_behavior_clamps_to_range() {
        let clip = translation_clip(Behavior::Constant);
        let at_end = clip.sample(5.0);
        assert_eq!(at_end, clip.sample(2.0));
    }

    #[test]
    fn cycle_behavior_repeats() {
        let clip = translation_clip(Behavior::Cycle);
        let wrapped = clip.sample(2.5);
        assert_eq!(wrapped, clip.sample(0.5));
    }

    #[test]
    fn oscillate_behavior_reverses() {
        let clip = translation_clip(Behavior::Oscillate);
        // 3.0 is one second into the reverse leg → same pose as 1.0.
        assert_eq!(clip.sample(3.0), clip.sample(1.0));
    }
}
