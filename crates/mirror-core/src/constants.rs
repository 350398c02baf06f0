use glam::Vec3;

// Shared configurator/scene tuning constants used by the core and the web frontend.

// Dimension range (millimeters)
pub const MIN_MM: u32 = 400;
pub const MAX_MM: u32 = 2800;
pub const DEFAULT_WIDTH_MM: u32 = 900;
pub const DEFAULT_HEIGHT_MM: u32 = 1600;

// Scene units are meters
pub const MM_TO_M: f32 = 0.001;

// Shelf width sub-parameter (percent of mirror width)
pub const SHELF_PERCENT_MIN: u32 = 10;
pub const SHELF_PERCENT_MAX: u32 = 100;
pub const SHELF_PERCENT_DEFAULT: u32 = 80;

// Mirror assembly
pub const FRAME_THICKNESS: f32 = 0.035;
pub const MIRROR_DEPTH: f32 = 0.01;
pub const MOUNT_DEPTH: f32 = 0.06;
pub const MOUNT_Z: f32 = MOUNT_DEPTH * 2.84; // mount block sits proud of the wall
pub const MIRROR_Z: f32 = MOUNT_DEPTH + 0.146; // reflective plane
pub const FRAME_Z: f32 = MOUNT_DEPTH + MIRROR_DEPTH + 0.13;

// Decorative dashed border around the mount block
pub const DASH_LENGTH: f32 = 0.02;
pub const DASH_GAP: f32 = 0.02;
pub const DASH_THICKNESS: f32 = 0.02;
pub const DASH_HEIGHT: f32 = 0.006;
pub const DASH_Z: f32 = MOUNT_DEPTH + DASH_HEIGHT * 19.0;

// Illumination halo: (size factor of glow, emissive intensity, opacity), inner to outer
pub const HALO_GLOW_FACTOR: f32 = 0.4; // glow size relative to max(width, height)
pub const HALO_LAYERS: [(f32, f32, f32); 3] = [(0.5, 7.0, 1.0), (1.2, 4.0, 0.8), (2.2, 2.5, 0.55)];
pub const HALO_Z: f32 = -MOUNT_DEPTH + 0.207;
pub const HALO_LAYER_STEP_Z: f32 = 0.001; // each outer layer sits slightly further back

// Wall
pub const WALL_SIZE: f32 = 6.0;
pub const WALL_THICKNESS: f32 = 0.2;
pub const WALL_LIFT: f32 = 1.0;

// Attachments
pub const EDGE_MARGIN: f32 = 0.1; // distance kept from the mirror edge
pub const CLOCK_SIZE: f32 = 0.1;
pub const CLOCK_MODEL_SCALE: f32 = CLOCK_SIZE * 15.0;
pub const CLOCK_Z: f32 = MOUNT_DEPTH + 0.129 + 0.02;
pub const SOCKET_SIZE: f32 = 0.08;
pub const SOCKET_DEPTH: f32 = 0.012;
pub const HYGIENE_MIRROR_RADIUS: f32 = 0.1;
pub const SHELF_DEPTH: f32 = 0.12;
pub const SHELF_THICKNESS: f32 = 0.008;
pub const SHELF_GAP: f32 = 0.05; // below the mirror's bottom edge

// Position selector markers
pub const SELECTOR_RADIUS_FACTOR: f32 = 0.25; // ring radius relative to min(width, height)
pub const SELECTOR_Z: f32 = MOUNT_DEPTH + 0.129 + 0.025;
pub const MARKER_RADIUS: f32 = 0.05;
pub const MARKER_SEGMENTS: u32 = 32;
pub const MARKER_RENDER_ORDER: i32 = 1000;
pub const ARROW_HEAD_SIZE: f32 = 0.025;
pub const ARROW_TAIL_LENGTH: f32 = 0.035;
pub const ARROW_TAIL_WIDTH: f32 = 0.006;

// Scene root: a quarter turn about Y, lifted to mirror-center height
pub const SCENE_ROOT_Y: f32 = 0.9;
pub const SCENE_ROOT_YAW: f32 = std::f32::consts::FRAC_PI_2;

// Camera
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.1, 0.0];
pub const CAMERA_DISTANCE: f32 = 6.75;
pub const CAMERA_FOV_DEG: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 100.0;

// Palette (linear-ish RGB)
pub const FRAME_COLOR: [f32; 3] = [0.976, 0.980, 0.984]; // #f9fafb
pub const MOUNT_COLOR: [f32; 3] = [0.161, 0.149, 0.149]; // #292626
pub const WALL_COLOR: [f32; 3] = [0.078, 0.071, 0.071];
pub const MARKER_COLOR: [f32; 3] = [0.212, 0.608, 0.667]; // #369baa
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[inline]
pub fn camera_target_vec3() -> Vec3 {
    Vec3::from(CAMERA_TARGET)
}
