// Shared scene tuning constants used by the web frontend and the tests.

// Scroll tracking
pub const SCROLL_EPSILON: f64 = 1e-6; // smallest scrollable range treated as non-empty

// Camera path (target = f(progress))
pub const CAMERA_START_Z: f32 = 10.0; // z at progress 0
pub const CAMERA_TRAVEL_Z: f32 = 20.0; // z distance covered over the full page
pub const CAMERA_RISE_Y: f32 = 5.0; // y at progress 1
pub const CAMERA_SWAY_X: f32 = 3.0; // peak x excursion at mid-page
pub const CAMERA_LOOK_RISE_Y: f32 = 3.0; // look-at y at progress 1
pub const CAMERA_SMOOTHING: f32 = 0.05; // fraction of remaining distance per frame
pub const CAMERA_REFERENCE_FPS: f32 = 60.0; // frame rate the per-frame factor was tuned at
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const POINTER_PARALLAX: f32 = 0.6; // look-at shift at pointer = (±1, ±1)

// Particle field
pub const PARTICLE_COUNT: usize = 1500;
pub const PARTICLE_EXTENT: f32 = 50.0; // edge length of the spawn cube
pub const PARTICLE_SIZE: f32 = 0.05;
pub const PARTICLE_OPACITY: f32 = 0.6;
pub const PARTICLE_SEED: u64 = 0x5EED_F011;

// Shooting star
pub const TRAIL_SAMPLES: usize = 20;
pub const TRAIL_SPACING_SEC: f32 = 0.1;
pub const TRAIL_SIZE: f32 = 0.02;
pub const TRAIL_OPACITY: f32 = 0.8;
pub const SHOOTING_STAR_VELOCITY: [f32; 3] = [2.0, 0.5, 1.5]; // units per second, subtracted
pub const SHOOTING_STAR_PERIOD_SEC: f32 = 14.0; // flight restarts from spawn after this long

// Sparkles
pub const SPARKLE_COUNT: usize = 50;
pub const SPARKLE_SIZE: f32 = 0.05;
pub const SPARKLE_OPACITY: f32 = 0.8;

// Helix
pub const HELIX_BEADS: usize = 30;
pub const HELIX_TURNS: f32 = 2.0;
pub const HELIX_RADIUS: f32 = 0.5;
pub const HELIX_HEIGHT: f32 = 3.0;

// Float wobble
pub const FLOAT_PHASE_STEP: f32 = 1.37; // seconds of phase between consecutive objects

// Palette (sRGB hex)
pub const TEAL: u32 = 0x64ffda;
pub const ORANGE: u32 = 0xff6b35;
pub const GOLD: u32 = 0xffd166;
pub const WHITE: u32 = 0xffffff;
pub const ICE: u32 = 0xe6f1ff;
pub const SLATE: u32 = 0xa8b2d1;
pub const NAVY: u32 = 0x1a2139;
pub const ROCK: u32 = 0x6b7595;
