//! Structured buffer and temporal pair tests
//!
//! Tests for:
//! - Mirror writes and recorded upload ranges
//! - Temporal pair role swapping and scheduled device copies
//! - Run-coalesced partial upload coverage through the controller

use glam::{Mat4, Vec3};
use rig::animation::{InterpolationMode, KeyframeTrack};
use rig::{Animation, AnimationController, NodeId, SceneGraph, SceneNode, StructuredBuffer, TemporalPair};

const MAT4_SIZE: usize = std::mem::size_of::<Mat4>();

// ============================================================================
// Helpers
// ============================================================================

fn flat_graph(node_count: usize) -> SceneGraph {
    let nodes = (0..node_count)
        .map(|_| SceneNode::new(None, Mat4::IDENTITY))
        .collect();
    SceneGraph::new(nodes)
}

fn slide_clip(node: u32) -> Animation {
    let track = KeyframeTrack::new(
        vec![0.0, 2.0],
        vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
        InterpolationMode::Linear,
    );
    Animation::new("slide", NodeId::new(node), 2.0).with_translation(track)
}

// ============================================================================
// StructuredBuffer
// ============================================================================

#[test]
fn set_blob_writes_mirror_and_records_range() {
    let mut buffer = StructuredBuffer::new("buffer", MAT4_SIZE, 4);
    let matrices = [Mat4::from_translation(Vec3::X); 2];
    buffer.set_blob(bytemuck::cast_slice(&matrices), MAT4_SIZE);

    assert_eq!(buffer.pending_uploads(), &[MAT4_SIZE..3 * MAT4_SIZE]);
    assert_eq!(buffer.as_slice::<Mat4>()[1], matrices[0]);
    assert_eq!(buffer.as_slice::<Mat4>()[0], Mat4::ZERO);
}

#[test]
#[should_panic(expected = "exceeds buffer")]
fn set_blob_rejects_out_of_range_writes() {
    let mut buffer = StructuredBuffer::new("buffer", 4, 1);
    buffer.set_blob(&[0u8; 8], 0);
}

#[test]
fn take_pending_uploads_drains() {
    let mut buffer = StructuredBuffer::new("buffer", 4, 4);
    buffer.set_blob(&[1u8; 4], 0);
    buffer.set_blob(&[2u8; 4], 8);

    assert_eq!(buffer.take_pending_uploads(), vec![0..4, 8..12]);
    assert!(buffer.pending_uploads().is_empty());
}

// ============================================================================
// TemporalPair
// ============================================================================

#[test]
fn swap_toggles_roles_only() {
    let mut pair = TemporalPair::new("pair", 4, 2);
    pair.current_mut().write_all(&[1u32, 1]);
    pair.swap();
    pair.current_mut().write_all(&[2u32, 2]);

    assert_eq!(pair.current().as_slice::<u32>(), &[2, 2]);
    assert_eq!(pair.previous().as_slice::<u32>(), &[1, 1]);

    pair.swap();
    assert_eq!(pair.current().as_slice::<u32>(), &[1, 1]);
}

#[test]
fn scheduled_copy_equalizes_contents() {
    let mut pair = TemporalPair::new("pair", 4, 2);
    pair.current_mut().write_all(&[9u32, 9]);
    pair.copy_current_to_previous();

    assert_eq!(pair.current().as_bytes(), pair.previous().as_bytes());
    assert!(pair.has_pending_copy());
}

// ============================================================================
// Partial upload coverage (run coalescing)
// ============================================================================

#[test]
fn partial_upload_ranges_cover_exactly_the_changed_runs() {
    // Five independent root nodes, clips on 1, 2 and 4. A steady frame must
    // upload one range per contiguous changed run: [1, 3) and [4, 5).
    let mut graph = flat_graph(5);
    let clips = vec![slide_clip(1), slide_clip(2), slide_clip(4)];
    let mut controller = AnimationController::new(&graph, &[], &[], 0, clips);

    // First update runs the full-refresh path.
    assert!(controller.update(&mut graph, 0.0));
    assert_eq!(
        controller
            .world_matrix_buffers_mut()
            .unwrap()
            .current_mut()
            .take_pending_uploads(),
        vec![0..5 * MAT4_SIZE]
    );

    // Steady frame: the pair swaps, then only the changed runs upload.
    assert!(controller.update(&mut graph, 0.5));
    assert_eq!(
        controller.matrices_changed(),
        &[false, true, true, false, true]
    );

    let expected = vec![MAT4_SIZE..3 * MAT4_SIZE, 4 * MAT4_SIZE..5 * MAT4_SIZE];
    let world = controller.world_matrix_buffers_mut().unwrap();
    assert_eq!(world.current_mut().take_pending_uploads(), expected);

    let inv_transpose = controller.inv_transpose_world_matrix_buffers_mut().unwrap();
    assert_eq!(inv_transpose.current_mut().take_pending_uploads(), expected);
}

#[test]
fn full_refresh_uploads_one_whole_range() {
    let mut graph = flat_graph(3);
    let mut controller = AnimationController::new(&graph, &[], &[], 0, vec![slide_clip(0)]);

    controller.update(&mut graph, 0.0);
    let world = controller.world_matrix_buffers_mut().unwrap();
    assert_eq!(
        world.current_mut().take_pending_uploads(),
        vec![0..3 * MAT4_SIZE]
    );
}
