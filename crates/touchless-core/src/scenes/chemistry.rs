//! Chemistry lab: test tubes and beakers that can be picked up, tilted and
//! poured into each other.

use super::{push_hand_markers, rgba, SceneController, SceneKind};
use crate::arena::{Arena, EntityId};
use crate::constants::*;
use crate::gesture::CombinedGesture;
use crate::grab::{update_holds, Grabbable, HandMapping, HandPose, HoldEvent};
use crate::hand::lerp_angle;
use crate::landmarks::Handedness;
use crate::mesh::MeshKind;
use crate::snapshot::{Camera, SceneSnapshot};
use crate::tracking::TrackingState;
use glam::{Quat, Vec3};
use rand::prelude::*;
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VesselKind {
    TestTube,
    Beaker,
}

impl VesselKind {
    pub fn capture_radius(self) -> f32 {
        match self {
            VesselKind::TestTube => TUBE_CAPTURE_RADIUS,
            VesselKind::Beaker => BEAKER_CAPTURE_RADIUS,
        }
    }

    pub fn radius(self) -> f32 {
        match self {
            VesselKind::TestTube => 0.35,
            VesselKind::Beaker => 0.8,
        }
    }

    pub fn height(self) -> f32 {
        match self {
            VesselKind::TestTube => 2.0,
            VesselKind::Beaker => 1.6,
        }
    }

    /// Center height of a vessel standing on the table.
    pub fn rest_y(self) -> f32 {
        TABLE_Y + self.height() * 0.5
    }
}

#[derive(Clone, Debug)]
pub struct Vessel {
    pub label: &'static str,
    pub kind: VesselKind,
    /// Center of the vessel.
    pub position: Vec3,
    /// Rotation about the view axis; 0 is upright.
    pub tilt: f32,
    pub liquid_level: f32,
    pub color: Vec3,
    pub held_by: Option<Handedness>,
}

impl Vessel {
    fn new(
        label: &'static str,
        kind: VesselKind,
        slot: usize,
        level: f32,
        color: [f32; 3],
    ) -> Self {
        Self {
            label,
            kind,
            position: Vec3::new(SLOT_XS[slot], kind.rest_y(), SLOT_Z),
            tilt: 0.0,
            liquid_level: level,
            color: Vec3::from(color),
            held_by: None,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.tilt)
    }

    /// Center of the opening, where poured liquid leaves the vessel.
    pub fn mouth(&self) -> Vec3 {
        self.position + self.rotation() * Vec3::new(0.0, self.kind.height() * 0.5, 0.0)
    }

    pub fn is_pouring(&self) -> bool {
        self.held_by.is_some()
            && self.liquid_level > POUR_MIN_LEVEL
            && self.tilt.abs() > POUR_TILT_THRESHOLD
    }
}

impl Grabbable for Vessel {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn capture_radius(&self) -> f32 {
        self.kind.capture_radius()
    }
    fn held_by(&self) -> Option<Handedness> {
        self.held_by
    }
    fn set_held_by(&mut self, side: Option<Handedness>) {
        self.held_by = side;
    }
}

pub fn initial_vessels() -> Arena<Vessel> {
    let mut vessels = Arena::new();
    let tube = VesselKind::TestTube;
    let beaker = VesselKind::Beaker;
    let glass = [0.85, 0.9, 0.95];
    vessels.insert("tube1", Vessel::new("acid", tube, 0, 0.7, [0.95, 0.25, 0.2]));
    vessels.insert("tube2", Vessel::new("base", tube, 1, 0.6, [0.2, 0.45, 0.95]));
    vessels.insert("tube3", Vessel::new("indicator", tube, 2, 0.5, [0.3, 0.9, 0.35]));
    vessels.insert("beaker1", Vessel::new("beaker", beaker, 3, 0.0, glass));
    vessels.insert("beaker2", Vessel::new("beaker", beaker, 4, 0.0, glass));
    vessels
}

pub fn nearest_slot(x: f32) -> usize {
    SLOT_XS
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - x).abs().total_cmp(&(b.1 - x).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Slot closest to `x` that is not in `taken`. Falls back to the nearest
/// slot when every slot is taken.
pub fn free_slot_near(x: f32, taken: &[usize]) -> usize {
    SLOT_XS
        .iter()
        .enumerate()
        .filter(|(i, _)| !taken.contains(i))
        .min_by(|a, b| (a.1 - x).abs().total_cmp(&(b.1 - x).abs()))
        .map_or_else(|| nearest_slot(x), |(i, _)| i)
}

/// Put a released vessel back on the table at the nearest slot no other
/// standing vessel occupies.
pub fn snap_to_table(vessels: &mut Arena<Vessel>, id: EntityId) {
    let taken: SmallVec<[usize; 5]> = vessels
        .iter()
        .filter(|(other, v)| *other != id && v.held_by.is_none())
        .map(|(_, v)| nearest_slot(v.position.x))
        .collect();
    let Some(vessel) = vessels.get_mut(id) else {
        return;
    };
    let slot = free_slot_near(vessel.position.x, &taken);
    vessel.position = Vec3::new(SLOT_XS[slot], vessel.kind.rest_y(), SLOT_Z);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transfer {
    pub from: EntityId,
    pub to: EntityId,
    pub amount: f32,
}

/// (source, target) pairs whose geometry allows pouring this frame.
pub fn pour_pairs(vessels: &Arena<Vessel>) -> SmallVec<[(EntityId, EntityId); 4]> {
    let mut pairs = SmallVec::new();
    for (src_id, src) in vessels.iter().filter(|(_, v)| v.is_pouring()) {
        for (dst_id, dst) in vessels.iter() {
            if dst_id == src_id {
                continue;
            }
            let above = src.position.y - dst.position.y > POUR_MIN_HEIGHT_DIFF;
            let near = src.position.distance(dst.position) < POUR_MAX_DISTANCE;
            if above && near {
                pairs.push((src_id, dst_id));
            }
        }
    }
    pairs
}

/// Move liquid for one frame.
///
/// Each pair moves `min(POUR_RATE, source level, target headroom)`. The first
/// transfer into an empty vessel takes the source color outright; later ones
/// blend toward it.
pub fn transfer_liquids(vessels: &mut Arena<Vessel>) -> SmallVec<[Transfer; 4]> {
    let mut done = SmallVec::new();
    for (from, to) in pour_pairs(vessels) {
        let (src_level, src_color) = match vessels.get(from) {
            Some(v) => (v.liquid_level, v.color),
            None => continue,
        };
        let Some(dst) = vessels.get_mut(to) else {
            continue;
        };
        let amount = POUR_RATE.min(src_level).min(1.0 - dst.liquid_level);
        if amount <= 0.0 {
            continue;
        }
        if dst.liquid_level <= f32::EPSILON {
            dst.color = src_color;
        } else {
            dst.color = dst.color.lerp(src_color, COLOR_BLEND_RATE);
        }
        dst.liquid_level = (dst.liquid_level + amount).clamp(0.0, 1.0);
        if let Some(src) = vessels.get_mut(from) {
            src.liquid_level = (src.liquid_level - amount).clamp(0.0, 1.0);
        }
        done.push(Transfer { from, to, amount });
    }
    done
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub color: Vec3,
}

pub struct ChemistryLab {
    vessels: Arena<Vessel>,
    particles: VecDeque<Particle>,
    mapping: HandMapping,
    poses: SmallVec<[HandPose; 2]>,
    gesture: CombinedGesture,
    pouring: usize,
    rng: StdRng,
    time: f32,
}

impl ChemistryLab {
    pub fn new() -> Self {
        Self::with_seed(7)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            vessels: initial_vessels(),
            particles: VecDeque::with_capacity(MAX_PARTICLES),
            mapping: HandMapping {
                width: 16.0,
                height: 12.0,
                depth: 0.0,
                offset: Vec3::new(0.0, 3.0, 0.0),
            },
            poses: SmallVec::new(),
            gesture: CombinedGesture::None,
            pouring: 0,
            rng: StdRng::seed_from_u64(seed),
            time: 0.0,
        }
    }

    pub fn mapping(&self) -> &HandMapping {
        &self.mapping
    }

    pub fn vessels(&self) -> &Arena<Vessel> {
        &self.vessels
    }

    pub fn vessels_mut(&mut self) -> &mut Arena<Vessel> {
        &mut self.vessels
    }

    pub fn vessel(&self, name: &str) -> Option<&Vessel> {
        self.vessels.by_name(name)
    }

    pub fn particles(&self) -> &VecDeque<Particle> {
        &self.particles
    }

    fn handle_hold_events(&mut self, events: &[HoldEvent]) {
        for ev in events {
            match *ev {
                HoldEvent::Grabbed { id, side } => {
                    if let Some(v) = self.vessels.get(id) {
                        log::debug!("[scene] {side} hand picked up {}", v.label);
                    }
                }
                HoldEvent::Released { id, side } => {
                    snap_to_table(&mut self.vessels, id);
                    if let Some(v) = self.vessels.get_mut(id) {
                        v.tilt = 0.0;
                        log::debug!("[scene] {side} hand put down {}", v.label);
                    }
                }
            }
        }
    }

    fn follow_hands(&mut self) {
        let wobble = VESSEL_WOBBLE_AMPLITUDE * (self.time * TAU * VESSEL_WOBBLE_HZ).sin();
        for v in self.vessels.values_mut() {
            let Some(side) = v.held_by else { continue };
            let Some(pose) = self.poses.iter().find(|p| p.side == side) else {
                continue;
            };
            v.position = v.position.lerp(pose.pinch, HOLD_FOLLOW_LERP);
            let target = (pose.roll * VESSEL_TILT_GAIN).clamp(-VESSEL_TILT_MAX, VESSEL_TILT_MAX);
            v.tilt = lerp_angle(v.tilt, target + wobble, HOLD_ROLL_LERP);
        }
    }

    fn spawn_particles(&mut self, transfers: &[Transfer]) {
        for t in transfers {
            if !self.rng.gen_bool(PARTICLE_SPAWN_CHANCE) {
                continue;
            }
            let Some(src) = self.vessels.get(t.from) else { continue };
            let jitter = Vec3::new(
                self.rng.gen_range(-0.08..0.08),
                0.0,
                self.rng.gen_range(-0.08..0.08),
            );
            self.particles.push_back(Particle {
                position: src.mouth() + jitter,
                velocity: Vec3::new(jitter.x * 2.0, -0.5, jitter.z * 2.0),
                life: PARTICLE_LIFETIME_SEC,
                color: src.color,
            });
            while self.particles.len() > MAX_PARTICLES {
                self.particles.pop_front();
            }
        }
    }

    fn step_particles(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.velocity.y -= PARTICLE_GRAVITY * dt;
            p.position += p.velocity * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0 && p.position.y > TABLE_Y);
    }
}

impl Default for ChemistryLab {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneController for ChemistryLab {
    fn kind(&self) -> SceneKind {
        SceneKind::Chemistry
    }

    fn update(&mut self, tracking: &TrackingState, dt: f32) {
        self.time += dt;
        self.gesture = tracking.gesture;
        self.poses = HandPose::collect(tracking, &self.mapping);
        let events = update_holds(&mut self.vessels, &self.poses);
        self.handle_hold_events(&events);
        self.follow_hands();
        let transfers = transfer_liquids(&mut self.vessels);
        self.pouring = transfers.len();
        self.spawn_particles(&transfers);
        self.step_particles(dt);
    }

    fn snapshot(&self) -> SceneSnapshot {
        let mut snap = SceneSnapshot::new(
            Camera::looking_at(LAB_CAMERA_EYE, LAB_CAMERA_TARGET),
            CLEAR_COLOR_LAB,
        );
        snap.push(
            MeshKind::Cube,
            Vec3::new(18.0, 0.3, 5.0),
            Quat::IDENTITY,
            Vec3::new(0.0, TABLE_Y - 0.15, SLOT_Z),
            [0.35, 0.25, 0.18, 1.0],
        );
        for v in self.vessels.values() {
            let rot = v.rotation();
            let (r, h) = (v.kind.radius(), v.kind.height());
            if v.liquid_level > 0.0 {
                let liquid_h = h * v.liquid_level;
                let local = Vec3::new(0.0, -h * 0.5 + liquid_h * 0.5, 0.0);
                snap.push(
                    MeshKind::Cylinder,
                    Vec3::new(r * 0.9, liquid_h, r * 0.9),
                    rot,
                    v.position + rot * local,
                    rgba(v.color, 0.9),
                );
            }
            let glass_alpha = if v.held_by.is_some() { 0.35 } else { 0.22 };
            snap.push(
                MeshKind::Cylinder,
                Vec3::new(r, h, r),
                rot,
                v.position,
                [0.85, 0.92, 1.0, glass_alpha],
            );
        }
        for p in &self.particles {
            let fade = (p.life / PARTICLE_LIFETIME_SEC).clamp(0.0, 1.0);
            snap.push(
                MeshKind::Sphere,
                Vec3::splat(0.06),
                Quat::IDENTITY,
                p.position,
                rgba(p.color, fade),
            );
        }
        push_hand_markers(&mut snap, &self.poses);

        let held: SmallVec<[&str; 2]> = self
            .vessels
            .values()
            .filter(|v| v.held_by.is_some())
            .map(|v| v.label)
            .collect();
        snap.status = if held.is_empty() {
            format!("{} | pinch a tube to pick it up", self.gesture)
        } else if self.pouring > 0 {
            format!("{} | pouring {}", self.gesture, held.join(", "))
        } else {
            format!("{} | holding {}", self.gesture, held.join(", "))
        };
        snap
    }

    fn reset(&mut self) {
        self.vessels = initial_vessels();
        self.particles.clear();
        self.pouring = 0;
        self.time = 0.0;
    }
}
