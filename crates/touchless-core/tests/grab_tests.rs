// Host-side tests for the grab/release state machine and hand mapping.

use glam::Vec3;
use touchless_core::*;

#[derive(Debug)]
struct Ball {
    at: Vec3,
    held: Option<Handedness>,
}

impl Grabbable for Ball {
    fn position(&self) -> Vec3 {
        self.at
    }
    fn capture_radius(&self) -> f32 {
        1.0
    }
    fn held_by(&self) -> Option<Handedness> {
        self.held
    }
    fn set_held_by(&mut self, side: Option<Handedness>) {
        self.held = side;
    }
}

fn pose(side: Handedness, pinch: Vec3, pinching: bool) -> HandPose {
    HandPose { side, pinch, palm: pinch, pinching, roll: 0.0 }
}

/// A single hand at `x` on the world x axis.
fn at_x(side: Handedness, x: f32, pinching: bool) -> [HandPose; 1] {
    [pose(side, Vec3::new(x, 0.0, 0.0), pinching)]
}

fn two_balls() -> (Arena<Ball>, EntityId, EntityId) {
    let mut arena = Arena::new();
    let a = arena.insert("a", Ball { at: Vec3::new(-2.0, 0.0, 0.0), held: None });
    let b = arena.insert("b", Ball { at: Vec3::new(2.0, 0.0, 0.0), held: None });
    (arena, a, b)
}

#[test]
fn pinch_inside_radius_grabs() {
    let (mut arena, a, _) = two_balls();
    let events = update_holds(&mut arena, &at_x(Handedness::Right, -1.5, true));
    let expected = HoldEvent::Grabbed { id: a, side: Handedness::Right };
    assert_eq!(events.as_slice(), &[expected]);
    assert_eq!(arena[a].held, Some(Handedness::Right));
}

#[test]
fn open_hand_or_far_pinch_grabs_nothing() {
    let (mut arena, _, _) = two_balls();
    assert!(update_holds(&mut arena, &at_x(Handedness::Right, -2.0, false)).is_empty());
    assert!(update_holds(&mut arena, &at_x(Handedness::Right, 0.0, true)).is_empty());
    assert!(arena.values().all(|b| b.held.is_none()));
}

#[test]
fn hold_survives_moving_out_of_radius() {
    let (mut arena, a, _) = two_balls();
    update_holds(&mut arena, &at_x(Handedness::Left, -2.0, true));
    let events = update_holds(&mut arena, &at_x(Handedness::Left, 10.0, true));
    assert!(events.is_empty());
    assert_eq!(arena[a].held, Some(Handedness::Left));
}

#[test]
fn release_on_unpinch_or_lost_hand() {
    let (mut arena, a, _) = two_balls();
    update_holds(&mut arena, &at_x(Handedness::Left, -2.0, true));
    let events = update_holds(&mut arena, &at_x(Handedness::Left, -2.0, false));
    let expected = HoldEvent::Released { id: a, side: Handedness::Left };
    assert_eq!(events.as_slice(), &[expected]);

    update_holds(&mut arena, &at_x(Handedness::Left, -2.0, true));
    let events = update_holds(&mut arena, &[]);
    let expected = HoldEvent::Released { id: a, side: Handedness::Left };
    assert_eq!(events.as_slice(), &[expected]);
    assert!(arena[a].held.is_none());
}

#[test]
fn each_hand_holds_one_object_and_nearest_wins() {
    let mut arena = Arena::new();
    let near = arena.insert("near", Ball { at: Vec3::new(0.2, 0.0, 0.0), held: None });
    let far = arena.insert("far", Ball { at: Vec3::new(-0.6, 0.0, 0.0), held: None });
    update_holds(&mut arena, &[pose(Handedness::Right, Vec3::ZERO, true)]);
    assert_eq!(arena[near].held, Some(Handedness::Right));
    assert!(arena[far].held.is_none());

    // the other hand can still take the remaining object
    update_holds(
        &mut arena,
        &[
            pose(Handedness::Right, Vec3::ZERO, true),
            pose(Handedness::Left, Vec3::new(-0.5, 0.0, 0.0), true),
        ],
    );
    assert_eq!(arena[far].held, Some(Handedness::Left));
    assert_eq!(arena[near].held, Some(Handedness::Right));
}

#[test]
fn held_object_cannot_be_stolen() {
    let (mut arena, a, _) = two_balls();
    update_holds(&mut arena, &at_x(Handedness::Right, -2.0, true));
    let events = update_holds(
        &mut arena,
        &[
            pose(Handedness::Right, Vec3::new(-2.0, 0.0, 0.0), true),
            pose(Handedness::Left, Vec3::new(-2.0, 0.0, 0.0), true),
        ],
    );
    assert!(events.is_empty());
    assert_eq!(arena[a].held, Some(Handedness::Right));
}

#[test]
fn mapping_is_mirrored_and_invertible() {
    let m = HandMapping::default();
    assert_eq!(m.to_world(Vec3::new(0.5, 0.5, 0.0)), Vec3::ZERO);
    // right side of the image is the user's left: negative x
    assert!(m.to_world(Vec3::new(0.9, 0.5, 0.0)).x < 0.0);
    assert!(m.to_world(Vec3::new(0.5, 0.1, 0.0)).y > 0.0);

    let world = Vec3::new(3.0, -2.0, 0.0);
    let back = m.to_world(m.to_normalized(world));
    assert!(back.distance(world) < 1e-5);
}

#[test]
fn arena_looks_up_by_name() {
    let (arena, a, b) = two_balls();
    assert_eq!(arena.id_of("b"), Some(b));
    assert_eq!(arena.by_name("a").map(|x| x.at.x), Some(-2.0));
    assert!(arena.by_name("c").is_none());
    assert_eq!(arena.ids().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(arena.len(), 2);
}
