//! Animation clip and track tests
//!
//! Tests for:
//! - Keyframe track sampling (linear, step, range clamping)
//! - TRS composition order of sampled clips
//! - Pre/post-infinity behaviors (constant, cycle, oscillate)
//! - Clip metadata (duration, target node, name)

use glam::{Mat4, Quat, Vec3};
use rig::animation::{InterpolationMode, KeyframeTrack};
use rig::{Animation, Behavior, NodeId, Trs};
use std::f32::consts::FRAC_PI_2;

// ============================================================================
// Helpers
// ============================================================================

const EPSILON: f32 = 1e-5;

fn mat4_approx(a: Mat4, b: Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() < EPSILON)
}

fn slide_clip(duration: f64) -> Animation {
    let track = KeyframeTrack::new(
        vec![0.0, duration],
        vec![Vec3::ZERO, Vec3::new(duration as f32, 0.0, 0.0)],
        InterpolationMode::Linear,
    );
    Animation::new("slide", NodeId::new(0), duration).with_translation(track)
}

// ============================================================================
// Track sampling
// ============================================================================

#[test]
fn linear_translation_track_interpolates() {
    let clip = slide_clip(2.0);
    let halfway = clip.sample(1.0);
    assert!(mat4_approx(
        halfway,
        Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
    ));
}

#[test]
fn step_track_holds_until_next_key() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::ONE],
        InterpolationMode::Step,
    );
    let clip = Animation::new("steps", NodeId::new(0), 1.0).with_translation(track);

    assert!(mat4_approx(clip.sample(0.999), Mat4::IDENTITY));
    assert!(mat4_approx(clip.sample(1.0), Mat4::from_translation(Vec3::ONE)));
}

#[test]
fn missing_channels_hold_rest_values() {
    let rotation = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Quat::IDENTITY, Quat::from_rotation_y(FRAC_PI_2)],
        InterpolationMode::Linear,
    );
    let clip = Animation::new("turn", NodeId::new(0), 1.0).with_rotation(rotation);

    // No translation/scaling channels: translation stays zero, scale one.
    let sampled = clip.sample(0.0);
    assert!(mat4_approx(sampled, Mat4::IDENTITY));
}

#[test]
fn sampled_channels_compose_trs_order() {
    let translation = KeyframeTrack::new(
        vec![0.0],
        vec![Vec3::new(1.0, 2.0, 3.0)],
        InterpolationMode::Linear,
    );
    let rotation = KeyframeTrack::new(
        vec![0.0],
        vec![Quat::from_rotation_z(FRAC_PI_2)],
        InterpolationMode::Linear,
    );
    let scaling = KeyframeTrack::new(vec![0.0], vec![Vec3::splat(2.0)], InterpolationMode::Linear);

    let clip = Animation::new("pose", NodeId::new(0), 1.0)
        .with_translation(translation)
        .with_rotation(rotation)
        .with_scaling(scaling);

    let expected = Trs::new(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_rotation_z(FRAC_PI_2),
        Vec3::splat(2.0),
    )
    .to_matrix();
    assert!(mat4_approx(clip.sample(0.5), expected));
}

#[test]
fn trs_composes_translation_after_rotation_and_scale() {
    // T · R · S applied to the origin-offset point (1, 0, 0):
    // scale by 2 → (2, 0, 0), rotate 90° about Z → (0, 2, 0), translate.
    let trs = Trs::new(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_z(FRAC_PI_2),
        Vec3::splat(2.0),
    );
    let p = trs.to_matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!((p - Vec3::new(10.0, 2.0, 0.0)).length() < EPSILON);
}

// ============================================================================
// Infinity behaviors
// ============================================================================

#[test]
fn constant_behavior_holds_boundary_pose() {
    let clip = slide_clip(2.0);
    assert!(mat4_approx(clip.sample(10.0), clip.sample(2.0)));
    assert!(mat4_approx(clip.sample(-5.0), clip.sample(0.0)));
}

#[test]
fn cycle_behavior_wraps_forward_and_backward() {
    let mut clip = slide_clip(2.0);
    clip.set_pre_infinity_behavior(Behavior::Cycle);
    clip.set_post_infinity_behavior(Behavior::Cycle);

    assert!(mat4_approx(clip.sample(2.5), clip.sample(0.5)));
    // -0.5 cycles back to 1.5 seconds into the clip.
    assert!(mat4_approx(clip.sample(-0.5), clip.sample(1.5)));
}

#[test]
fn oscillate_behavior_plays_reverse_leg() {
    let mut clip = slide_clip(2.0);
    clip.set_post_infinity_behavior(Behavior::Oscillate);

    assert!(mat4_approx(clip.sample(3.0), clip.sample(1.0)));
    assert!(mat4_approx(clip.sample(4.0), clip.sample(0.0)));
}

// ============================================================================
// Metadata
// ============================================================================

#[test]
fn clip_reports_identity() {
    let clip = slide_clip(2.0);
    assert_eq!(clip.name(), "slide");
    assert_eq!(clip.node(), NodeId::new(0));
    assert!((clip.duration() - 2.0).abs() < f64::EPSILON);
    assert_eq!(clip.pre_infinity_behavior(), Behavior::Constant);
}

#[test]
#[should_panic(expected = "non-negative")]
fn negative_duration_is_rejected() {
    let _ = Animation::new("bad", NodeId::new(0), -1.0);
}
