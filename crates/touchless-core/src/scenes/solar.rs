//! Solar system with a gesture-selected orbit camera.
//!
//! One open hand picks the focus by the number of extended fingers (fist for
//! the whole system, one to five fingers for the five planets). A pinch acts as
//! a joystick around the focus; two open hands zoom.

use super::{rgba, SceneController, SceneKind};
use crate::arena::{Arena, EntityId};
use crate::constants::*;
use crate::gesture::{CombinedGesture, Gesture};
use crate::mesh::MeshKind;
use crate::snapshot::{Camera, SceneSnapshot};
use crate::tracking::TrackingState;
use glam::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Clone, Debug)]
pub struct Planet {
    pub name: &'static str,
    pub size: f32,
    pub orbit_radius: f32,
    /// Radians per second.
    pub orbit_speed: f32,
    pub orbit_angle: f32,
    pub color: Vec3,
}

impl Planet {
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.orbit_angle.cos() * self.orbit_radius,
            0.0,
            self.orbit_angle.sin() * self.orbit_radius,
        )
    }

    /// Camera distance that frames this planet.
    pub fn view_radius(&self) -> f32 {
        self.size * PLANET_VIEW_SIZE_FACTOR + PLANET_VIEW_OFFSET
    }
}

// name, size, orbit radius, orbit speed, color
const PLANETS: [(&str, f32, f32, f32, [f32; 3]); 5] = [
    ("Mercury", 0.4, 8.0, 0.8, [0.7, 0.65, 0.6]),
    ("Venus", 0.9, 12.0, 0.6, [0.95, 0.8, 0.5]),
    ("Earth", 1.0, 16.0, 0.5, [0.25, 0.5, 0.95]),
    ("Mars", 0.6, 20.0, 0.4, [0.9, 0.35, 0.2]),
    ("Jupiter", 2.2, 28.0, 0.2, [0.85, 0.7, 0.55]),
];

/// Focus index for a discrete gesture: 0 is the whole system, 1..=5 a planet.
pub fn target_for_gesture(gesture: Gesture) -> Option<usize> {
    match gesture {
        Gesture::None => None,
        Gesture::Fist => Some(0),
        Gesture::OneFinger => Some(1),
        Gesture::TwoFingers => Some(2),
        Gesture::ThreeFingers => Some(3),
        Gesture::FourFingers => Some(4),
        Gesture::OpenPalm => Some(5),
    }
}

#[inline]
fn dead_zone(v: f32, zone: f32) -> f32 {
    v.signum() * (v.abs() - zone).max(0.0)
}

/// Spherical camera rig around a look-at point.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub radius: f32,
    /// Angle from the +Y axis.
    pub polar: f32,
    pub azimuth: f32,
    pub look_at: Vec3,
}

impl OrbitCamera {
    pub fn eye(&self) -> Vec3 {
        self.look_at
            + self.radius
                * Vec3::new(
                    self.polar.sin() * self.azimuth.cos(),
                    self.polar.cos(),
                    self.polar.sin() * self.azimuth.sin(),
                )
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            radius: SYSTEM_VIEW_RADIUS,
            polar: 1.1,
            azimuth: FRAC_PI_2,
            look_at: Vec3::ZERO,
        }
    }
}

pub struct SolarSystem {
    planets: Arena<Planet>,
    order: Vec<EntityId>,
    target_index: usize,
    camera: OrbitCamera,
    /// Look-at minus the focus position; eases to zero so the camera ends
    /// up locked onto a moving planet.
    focus_offset: Vec3,
    zoom_scale: f32,
    gesture: CombinedGesture,
}

impl SolarSystem {
    pub fn new() -> Self {
        let mut planets = Arena::new();
        let order = PLANETS
            .iter()
            .enumerate()
            .map(|(i, &(name, size, orbit_radius, orbit_speed, color))| {
                planets.insert(
                    name,
                    Planet {
                        name,
                        size,
                        orbit_radius,
                        orbit_speed,
                        orbit_angle: i as f32 * 1.3,
                        color: Vec3::from(color),
                    },
                )
            })
            .collect();
        Self {
            planets,
            order,
            target_index: 0,
            camera: OrbitCamera::default(),
            focus_offset: Vec3::ZERO,
            zoom_scale: 1.0,
            gesture: CombinedGesture::None,
        }
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn zoom_scale(&self) -> f32 {
        self.zoom_scale
    }

    pub fn planets(&self) -> &Arena<Planet> {
        &self.planets
    }

    /// Planet for a focus index (1..=5).
    pub fn planet_at(&self, index: usize) -> Option<&Planet> {
        let id = *self.order.get(index.checked_sub(1)?)?;
        self.planets.get(id)
    }

    pub fn focus_name(&self) -> &'static str {
        self.planet_at(self.target_index)
            .map_or("Solar System", |p| p.name)
    }

    /// Radius and look-at the camera converges to for the current focus.
    pub fn ideal_view(&self) -> (f32, Vec3) {
        match self.planet_at(self.target_index) {
            Some(p) => (p.view_radius(), p.position()),
            None => (SYSTEM_VIEW_RADIUS, Vec3::ZERO),
        }
    }

    fn focus_position(&self) -> Vec3 {
        self.ideal_view().1
    }

    fn select_target(&mut self, tracking: &TrackingState) {
        if tracking.gesture != CombinedGesture::Rotate {
            return;
        }
        let Some(hand) = tracking.primary() else { return };
        if hand.is_pinching {
            return;
        }
        if let Some(index) = target_for_gesture(hand.gesture) {
            if index != self.target_index {
                self.target_index = index;
                self.focus_offset = self.camera.look_at - self.focus_position();
                self.zoom_scale = 1.0;
                log::info!("[scene] solar focus -> {}", self.focus_name());
            }
        }
    }

    fn steer(&mut self, tracking: &TrackingState, dt: f32) {
        match tracking.gesture {
            CombinedGesture::PinchDrag => {
                let Some(hand) = tracking.primary() else { return };
                let dx = dead_zone(hand.pinch_position.x - 0.5, JOYSTICK_DEAD_ZONE);
                let dy = dead_zone(hand.pinch_position.y - 0.5, JOYSTICK_DEAD_ZONE);
                // mirrored camera image: moving the hand right moves it left in x
                self.camera.azimuth = (self.camera.azimuth - dx * JOYSTICK_RATE * dt) % TAU;
                self.camera.polar =
                    (self.camera.polar + dy * JOYSTICK_RATE * dt).clamp(POLAR_MIN, POLAR_MAX);
            }
            CombinedGesture::Zoom if tracking.strength > 0.0 => {
                let target = (ZOOM_REFERENCE_SPREAD / tracking.strength)
                    .clamp(ZOOM_SCALE_MIN, ZOOM_SCALE_MAX);
                self.zoom_scale += (target - self.zoom_scale) * ZOOM_LERP;
            }
            _ => {}
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController for SolarSystem {
    fn kind(&self) -> SceneKind {
        SceneKind::Solar
    }

    fn update(&mut self, tracking: &TrackingState, dt: f32) {
        self.gesture = tracking.gesture;
        for p in self.planets.values_mut() {
            p.orbit_angle = (p.orbit_angle + p.orbit_speed * dt) % TAU;
        }
        self.select_target(tracking);
        self.steer(tracking, dt);

        let (radius, focus) = self.ideal_view();
        let radius = radius * self.zoom_scale;
        self.camera.radius += (radius - self.camera.radius) * ORBIT_CAMERA_LERP;
        self.focus_offset *= 1.0 - ORBIT_CAMERA_LERP;
        self.camera.look_at = focus + self.focus_offset;
    }

    fn snapshot(&self) -> SceneSnapshot {
        let mut snap = SceneSnapshot::new(
            Camera::looking_at(self.camera.eye(), self.camera.look_at),
            CLEAR_COLOR_SPACE,
        );
        snap.push(
            MeshKind::Sphere,
            Vec3::splat(SUN_SIZE),
            Quat::IDENTITY,
            Vec3::ZERO,
            [1.0, 0.85, 0.3, 1.0],
        );
        for (i, id) in self.order.iter().enumerate() {
            let Some(p) = self.planets.get(*id) else { continue };
            let focused = self.target_index == i + 1;
            let color = if focused { (p.color * 1.3).min(Vec3::ONE) } else { p.color };
            snap.push(
                MeshKind::Sphere,
                Vec3::splat(p.size),
                Quat::from_rotation_y(p.orbit_angle * 4.0),
                p.position(),
                rgba(color, 1.0),
            );
            // orbit path as a ring of small markers
            for k in 0..48 {
                let a = TAU * k as f32 / 48.0;
                let pos = Vec3::new(a.cos(), 0.0, a.sin()) * p.orbit_radius;
                snap.push(
                    MeshKind::Cube,
                    Vec3::splat(0.08),
                    Quat::IDENTITY,
                    pos,
                    [0.5, 0.5, 0.6, 0.35],
                );
            }
        }
        snap.status = format!("{} | {}", self.focus_name(), self.gesture);
        snap
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}
