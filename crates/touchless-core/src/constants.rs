use glam::Vec3;

// Shared tracking and scene tuning constants used by the core and the web frontend.

// Hand landmark model
pub const LANDMARK_COUNT: usize = 21;
pub const MAX_HANDS: usize = 2;
pub const VIDEO_WIDTH: u32 = 640;
pub const VIDEO_HEIGHT: u32 = 480;
pub const HAND_MODEL_ASSET: &str = "models/hand_landmarker.task";

// Landmark indices (wrist, thumb, then four fingers MCP -> PIP -> DIP -> TIP)
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// (tip, middle joint) pairs for the four non-thumb fingers.
pub const FINGER_TIP_PIP: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

// Hand signal processing (normalized camera units)
pub const PINCH_THRESHOLD: f32 = 0.05; // thumb tip to index tip
pub const THUMB_EXTENDED_DISTANCE: f32 = 0.1; // thumb tip to index MCP
pub const HAND_SMOOTHING: f32 = 0.5; // blend toward the new frame, 1.0 = no smoothing

// Two-hand aggregation
pub const ZOOM_SPREAD_THRESHOLD: f32 = 0.2; // palm-to-palm distance

// Grab/follow shared by every scene
pub const HOLD_FOLLOW_LERP: f32 = 0.3;
pub const HOLD_ROLL_LERP: f32 = 0.2;

// ---------------- Chemistry ----------------
pub const TABLE_Y: f32 = 0.0;
pub const SLOT_XS: [f32; 5] = [-6.0, -3.0, 0.0, 3.0, 6.0];
pub const SLOT_Z: f32 = 0.0;
pub const TUBE_CAPTURE_RADIUS: f32 = 1.2;
pub const BEAKER_CAPTURE_RADIUS: f32 = 1.8;
pub const VESSEL_TILT_GAIN: f32 = 1.5; // hand roll -> vessel tilt
pub const VESSEL_TILT_MAX: f32 = 2.2;
pub const VESSEL_WOBBLE_AMPLITUDE: f32 = 0.02;
pub const VESSEL_WOBBLE_HZ: f32 = 1.4;
pub const POUR_TILT_THRESHOLD: f32 = 1.0; // radians
pub const POUR_MAX_DISTANCE: f32 = 2.5;
pub const POUR_MIN_HEIGHT_DIFF: f32 = 1.0;
pub const POUR_MIN_LEVEL: f32 = 0.01;
pub const POUR_RATE: f32 = 0.015; // liquid level per frame
pub const COLOR_BLEND_RATE: f32 = 0.05;
pub const MAX_PARTICLES: usize = 120;
pub const PARTICLE_SPAWN_CHANCE: f64 = 0.6;
pub const PARTICLE_LIFETIME_SEC: f32 = 0.8;
pub const PARTICLE_GRAVITY: f32 = 9.8;
pub const LAB_CAMERA_EYE: Vec3 = Vec3::new(0.0, 4.0, 14.0);
pub const LAB_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.5, 0.0);

// ---------------- Solar system ----------------
pub const SUN_SIZE: f32 = 3.0;
pub const SYSTEM_VIEW_RADIUS: f32 = 60.0;
pub const PLANET_VIEW_SIZE_FACTOR: f32 = 5.0; // ideal radius = size * factor + offset
pub const PLANET_VIEW_OFFSET: f32 = 5.0;
pub const ORBIT_CAMERA_LERP: f32 = 0.05;
pub const JOYSTICK_DEAD_ZONE: f32 = 0.05; // normalized offset from screen center
pub const JOYSTICK_RATE: f32 = 2.5; // radians per second at full deflection
pub const POLAR_MIN: f32 = 0.15;
pub const POLAR_MAX: f32 = std::f32::consts::PI - 0.15;
pub const ZOOM_REFERENCE_SPREAD: f32 = 0.4; // hands this far apart = 1x zoom
pub const ZOOM_SCALE_MIN: f32 = 0.4;
pub const ZOOM_SCALE_MAX: f32 = 2.5;
pub const ZOOM_LERP: f32 = 0.1;

// ---------------- Anatomy ----------------
pub const HEART_RADIUS: f32 = 2.0;
pub const HEART_CAPTURE_RADIUS: f32 = 2.5;
pub const NEEDLE_CAPTURE_RADIUS: f32 = 1.2;
pub const NEEDLE_LENGTH: f32 = 2.4;
pub const NEEDLE_REST: Vec3 = Vec3::new(4.5, -1.5, 0.0);
pub const HEART_FOLLOW_LERP: f32 = 0.1;
pub const HEART_ROTATE_RATE: f32 = 3.0; // radians per second at full deflection
pub const HEART_AMBIENT_SPIN: f32 = 0.2; // radians per second when idle
pub const HEART_ZOOM_PER_SPREAD: f32 = 3.0;
pub const HEART_SCALE_MIN: f32 = 0.5;
pub const HEART_SCALE_MAX: f32 = 2.5;
pub const HEART_HELD_DAMPING: f32 = 0.5; // roll is damped harder for the heavy organ
pub const NEEDLE_TREMOR_AMPLITUDE: f32 = 0.012;
/// Heartbeat as (frequency Hz, amplitude, phase) sinusoids summed onto scale.
pub const HEARTBEAT_HARMONICS: [(f32, f32, f32); 3] =
    [(1.2, 0.06, 0.0), (2.4, 0.03, 0.5), (4.8, 0.01, 1.1)];
pub const ANATOMY_CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, 12.0);

// Render palette
pub const CLEAR_COLOR_SPACE: [f32; 4] = [0.01, 0.01, 0.03, 1.0];
pub const CLEAR_COLOR_LAB: [f32; 4] = [0.08, 0.09, 0.11, 1.0];
pub const CLEAR_COLOR_ANATOMY: [f32; 4] = [0.05, 0.02, 0.03, 1.0];
pub const HAND_MARKER_COLOR: [f32; 4] = [0.95, 0.95, 1.0, 0.6];
pub const HAND_MARKER_PINCH_COLOR: [f32; 4] = [1.0, 0.8, 0.2, 0.9];
