// Host-side tests for the solar system: focus selection by finger count,
// camera convergence, joystick orbiting and zoom.

mod common;

use common::*;
use glam::Vec3;
use std::f32::consts::FRAC_PI_2;
use touchless_core::scenes::solar::{target_for_gesture, OrbitCamera};
use touchless_core::*;

fn open_hand(fingers: u8) -> TrackingState {
    right_only(hand(Handedness::Right, Vec3::new(0.5, 0.5, 0.0), false, 0.0, fingers))
}

const FRAME_DT: f32 = 1.0 / 60.0;

fn settle(solar: &mut SolarSystem, state: &TrackingState, frames: usize) {
    for _ in 0..frames {
        solar.update(state, 0.0);
    }
}

fn run(solar: &mut SolarSystem, state: &TrackingState, frames: usize) {
    for _ in 0..frames {
        solar.update(state, FRAME_DT);
    }
}

fn mars_view_radius() -> f32 {
    0.6 * PLANET_VIEW_SIZE_FACTOR + PLANET_VIEW_OFFSET
}

#[test]
fn starts_framing_the_whole_system() {
    let solar = SolarSystem::new();
    assert_eq!(solar.target_index(), 0);
    assert_eq!(solar.camera(), &OrbitCamera::default());
    assert_eq!(solar.camera().radius, SYSTEM_VIEW_RADIUS);
    assert_eq!(solar.planets().len(), 5);
    assert_eq!(solar.focus_name(), "Solar System");
}

#[test]
fn gesture_to_target_table() {
    assert_eq!(target_for_gesture(Gesture::None), None);
    assert_eq!(target_for_gesture(Gesture::Fist), Some(0));
    assert_eq!(target_for_gesture(Gesture::OneFinger), Some(1));
    assert_eq!(target_for_gesture(Gesture::FourFingers), Some(4));
    assert_eq!(target_for_gesture(Gesture::OpenPalm), Some(5));
}

#[test]
fn four_fingers_focuses_mars() {
    let mut solar = SolarSystem::new();
    let state = open_hand(4);
    assert_eq!(state.right.as_ref().unwrap().gesture, Gesture::FourFingers);
    // planets keep orbiting while the camera converges
    run(&mut solar, &state, 2000);

    assert_eq!(solar.target_index(), 4);
    let mars = solar.planet_at(4).unwrap();
    assert_eq!(mars.name, "Mars");
    assert!((solar.camera().radius - mars_view_radius()).abs() < 1e-2);
    assert!(solar.camera().look_at.distance(mars.position()) < 1e-2);
}

#[test]
fn look_at_tracks_the_moving_focus() {
    let mut solar = SolarSystem::new();
    run(&mut solar, &open_hand(4), 400);
    // once converged the camera stays on the planet frame after frame
    for _ in 0..120 {
        solar.update(&TrackingState::default(), FRAME_DT);
        let mars = solar.planet_at(4).unwrap().position();
        assert!(solar.camera().look_at.distance(mars) < 1e-3);
    }
}

#[test]
fn new_focus_drops_previous_zoom() {
    let mut solar = SolarSystem::new();
    settle(&mut solar, &zoom_state(0.8), 300);
    assert!((solar.zoom_scale() - 0.5).abs() < 1e-3);

    run(&mut solar, &open_hand(4), 400);
    assert_eq!(solar.zoom_scale(), 1.0);
    assert!((solar.camera().radius - mars_view_radius()).abs() < 1e-2);
}

#[test]
fn fist_returns_to_system_view() {
    let mut solar = SolarSystem::new();
    settle(&mut solar, &open_hand(1), 10);
    assert_eq!(solar.target_index(), 1);
    settle(&mut solar, &open_hand(0), 400);
    assert_eq!(solar.target_index(), 0);
    assert!((solar.camera().radius - SYSTEM_VIEW_RADIUS).abs() < 1e-2);
    assert!(solar.camera().look_at.length() < 1e-2);
}

#[test]
fn pinch_does_not_change_focus() {
    let mut solar = SolarSystem::new();
    settle(&mut solar, &open_hand(3), 1);
    assert_eq!(solar.target_index(), 3);
    // a pinch is labelled fist but must not select the system view
    let pinch = right_only(hand(Handedness::Right, Vec3::new(0.5, 0.5, 0.0), true, 0.0, 5));
    assert_eq!(pinch.gesture, CombinedGesture::PinchDrag);
    settle(&mut solar, &pinch, 5);
    assert_eq!(solar.target_index(), 3);
}

#[test]
fn pinch_off_center_orbits_the_camera() {
    let mut solar = SolarSystem::new();
    let drag = right_only(hand(Handedness::Right, Vec3::new(0.9, 0.5, 0.0), true, 0.0, 5));
    solar.update(&drag, 0.1);
    let expected = FRAC_PI_2 - (0.4 - JOYSTICK_DEAD_ZONE) * JOYSTICK_RATE * 0.1;
    assert!((solar.camera().azimuth - expected).abs() < 1e-5);
    assert!((solar.camera().polar - 1.1).abs() < 1e-6);
}

#[test]
fn joystick_dead_zone_and_polar_clamp() {
    let mut solar = SolarSystem::new();
    let centered = right_only(hand(Handedness::Right, Vec3::new(0.52, 0.48, 0.0), true, 0.0, 5));
    solar.update(&centered, 0.1);
    assert_eq!(solar.camera().azimuth, FRAC_PI_2);

    let down = right_only(hand(Handedness::Right, Vec3::new(0.5, 1.0, 0.0), true, 0.0, 5));
    for _ in 0..200 {
        solar.update(&down, 0.1);
    }
    assert!((solar.camera().polar - POLAR_MAX).abs() < 1e-5);
}

#[test]
fn spreading_hands_zooms_in() {
    let mut solar = SolarSystem::new();
    settle(&mut solar, &zoom_state(0.8), 300);
    assert!((solar.zoom_scale() - 0.5).abs() < 1e-3);
    assert!((solar.camera().radius - SYSTEM_VIEW_RADIUS * 0.5).abs() < 0.1);

    let mut solar = SolarSystem::new();
    settle(&mut solar, &zoom_state(0.1 + ZOOM_SPREAD_THRESHOLD), 300);
    // 0.4 / 0.3 is inside the allowed range
    assert!((solar.zoom_scale() - 0.4 / 0.3).abs() < 1e-3);
}

#[test]
fn planets_orbit_over_time() {
    let mut solar = SolarSystem::new();
    let before = solar.planet_at(1).unwrap().position();
    solar.update(&TrackingState::default(), 0.5);
    let after = solar.planet_at(1).unwrap().position();
    assert!(before.distance(after) > 0.1);
    assert!((after.length() - 8.0).abs() < 1e-4);
}

#[test]
fn reset_restores_focus_and_camera() {
    let mut solar = SolarSystem::new();
    settle(&mut solar, &open_hand(5), 50);
    solar.reset();
    assert_eq!(solar.target_index(), 0);
    assert_eq!(solar.camera(), &OrbitCamera::default());
}

#[test]
fn snapshot_has_sun_and_planets() {
    let solar = SolarSystem::new();
    let snap = solar.snapshot();
    assert_eq!(snap.count(MeshKind::Sphere), 6);
    assert_eq!(snap.clear_color, CLEAR_COLOR_SPACE);
    assert!(snap.status.starts_with("Solar System"));
}
