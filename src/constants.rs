// Renderer and page-integration tuning constants.
// Pure data, shared by the wasm front-end and the host-side tests.

// Background canvas
pub const CANVAS_ID: &str = "scene-canvas";
pub const CANVAS_STYLE: &str =
    "position:fixed;inset:0;width:100vw;height:100vh;z-index:-1;pointer-events:none;display:block";

// Page background (sRGB hex)
pub const BACKGROUND: u32 = 0x0b132b;

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.4;
pub const KEY_LIGHT_DIR: [f32; 3] = [5.0, 5.0, 5.0];
pub const KEY_LIGHT_INTENSITY: f32 = 1.2;

// Bloom
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;

// Per-frame instance buffers start at this capacity and grow on demand
pub const INITIAL_MESH_INSTANCES: usize = 128;
pub const INITIAL_POINT_INSTANCES: usize = 2048;

// Frame delta clamp (seconds); a backgrounded tab resumes without a jump
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
