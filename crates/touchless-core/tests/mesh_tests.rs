// Host-side tests for the procedural meshes, snapshots and shared constants.

use glam::{Quat, Vec3};
use touchless_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(PINCH_THRESHOLD > 0.0 && PINCH_THRESHOLD < THUMB_EXTENDED_DISTANCE);
    assert!(HAND_SMOOTHING > 0.0 && HAND_SMOOTHING <= 1.0);
    assert!(ZOOM_SPREAD_THRESHOLD > 0.0 && ZOOM_SPREAD_THRESHOLD < 1.0);
    assert!(POUR_RATE > 0.0 && POUR_RATE < 0.1);
    assert!(COLOR_BLEND_RATE > 0.0 && COLOR_BLEND_RATE < 1.0);
    assert!(VESSEL_TILT_MAX > POUR_TILT_THRESHOLD / VESSEL_TILT_GAIN);
    assert!(POLAR_MIN < POLAR_MAX);
    assert!(ZOOM_SCALE_MIN < 1.0 && ZOOM_SCALE_MAX > 1.0);
    assert!(HEART_SCALE_MIN < 1.0 && HEART_SCALE_MAX > 1.0);
    // neighbouring tubes never compete for the same pinch
    assert!(TUBE_CAPTURE_RADIUS * 2.0 < SLOT_XS[1] - SLOT_XS[0]);
    let beat: f32 = HEARTBEAT_HARMONICS.iter().map(|h| h.1).sum();
    assert!(beat < 0.2);
}

#[test]
fn slots_are_sorted_and_symmetric() {
    assert!(SLOT_XS.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(SLOT_XS[0], -SLOT_XS[SLOT_XS.len() - 1]);
}

#[test]
fn meshes_have_valid_indices_and_unit_normals() {
    for kind in MeshKind::ALL {
        let mesh = kind.build();
        assert!(!mesh.vertices.is_empty(), "{kind:?}");
        assert_eq!(mesh.indices.len() % 3, 0, "{kind:?}");
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
        for v in &mesh.vertices {
            let n = Vec3::from(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-4, "{kind:?} normal {n:?}");
        }
    }
}

#[test]
fn unit_mesh_extents() {
    let extent = |kind: MeshKind| {
        kind.build()
            .vertices
            .iter()
            .map(|v| Vec3::from(v.position))
            .fold(Vec3::ZERO, |acc, p| acc.max(p.abs()))
    };
    assert!((extent(MeshKind::Sphere) - Vec3::ONE).length() < 1e-4);
    assert!((extent(MeshKind::Cylinder) - Vec3::new(1.0, 0.5, 1.0)).length() < 1e-4);
    assert!((extent(MeshKind::Cube) - Vec3::splat(0.5)).length() < 1e-4);
}

#[test]
fn snapshot_batches_by_mesh_in_order() {
    let mut snap = SceneSnapshot::new(Camera::default(), [0.0; 4]);
    snap.push(MeshKind::Sphere, Vec3::ONE, Quat::IDENTITY, Vec3::X, [1.0; 4]);
    snap.push(MeshKind::Cube, Vec3::ONE, Quat::IDENTITY, Vec3::Y, [1.0; 4]);
    snap.push(MeshKind::Sphere, Vec3::ONE, Quat::IDENTITY, Vec3::Z, [1.0; 4]);
    let spheres = snap.batch(MeshKind::Sphere);
    assert_eq!(spheres.len(), 2);
    assert_eq!(spheres[0].translation(), Vec3::X);
    assert_eq!(spheres[1].translation(), Vec3::Z);
    assert_eq!(snap.count(MeshKind::Cylinder), 0);
}

#[test]
fn camera_projects_target_to_center() {
    let cam = Camera::looking_at(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 2.0, 0.0));
    let clip = cam.view_projection(16.0 / 9.0) * Vec3::new(0.0, 2.0, 0.0).extend(1.0);
    assert!((clip.x / clip.w).abs() < 1e-5);
    assert!((clip.y / clip.w).abs() < 1e-5);
    assert!(clip.z / clip.w > 0.0 && clip.z / clip.w < 1.0);
}

#[test]
fn instance_layout_matches_vertex_attributes() {
    assert_eq!(std::mem::size_of::<InstanceRaw>(), 80);
    assert_eq!(std::mem::size_of::<Vertex>(), 24);
}

#[test]
fn scene_kinds_mount_their_controller() {
    for kind in SceneKind::ALL {
        let scene = kind.create();
        assert_eq!(scene.kind(), kind);
        assert!(!scene.snapshot().instances.is_empty());
    }
    assert_eq!(SceneKind::Chemistry.to_string(), "chemistry");
}

#[test]
fn shader_declares_both_entry_points() {
    assert!(SCENE_WGSL.contains("fn vs_main"));
    assert!(SCENE_WGSL.contains("fn fs_main"));
}
