use bevy::prelude::*;

/// Loaded models are rescaled so their largest bounding extent equals this.
pub const MODEL_TARGET_SIZE: f32 = 3.0;

/// Deadline for the model request before a timeout failure is synthesised.
pub const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// How long the transient load-error banner stays visible.
pub const ERROR_BANNER_DURATION_MS: u64 = 3_000;

/// Placeholder cube edge length.
pub const FALLBACK_CUBE_SIZE: f32 = 2.0;

/// Placeholder spin rate, radians per second on both X and Y.
pub const FALLBACK_SPIN_SPEED: f32 = 0.6;

/// Ground plane side length and height below the origin.
pub const GROUND_PLANE_SIZE: f32 = 20.0;
pub const GROUND_PLANE_Y: f32 = -2.0;

/// Click-to-inspect effect: sphere radius, growth factor, and lifetime.
pub const CLICK_EFFECT_RADIUS: f32 = 0.1;
pub const CLICK_EFFECT_GROWTH: f32 = 2.0;
pub const CLICK_EFFECT_LIFETIME_MS: u64 = 1_000;

/// Orbit camera limits and feel.
pub const CAMERA_MIN_DISTANCE: f32 = 2.0;
pub const CAMERA_MAX_DISTANCE: f32 = 20.0;
pub const CAMERA_DAMPING: f32 = 0.05;
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.5;
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);

/// One colour per face of the placeholder cube, +X −X +Y −Y +Z −Z.
pub fn fallback_face_colours() -> [Color; 6] {
    [
        Color::srgb_u8(0x1f, 0xb8, 0xcd),
        Color::srgb_u8(0xff, 0xc1, 0x85),
        Color::srgb_u8(0xb4, 0x41, 0x3c),
        Color::srgb_u8(0xec, 0xeb, 0xd5),
        Color::srgb_u8(0x5d, 0x87, 0x8f),
        Color::srgb_u8(0xdb, 0x45, 0x45),
    ]
}

/// Accent colour shared by the fill light, point light, and click effect.
pub fn accent_colour() -> Color {
    Color::srgb_u8(0x32, 0xb8, 0xc6)
}

/// Scene background colour.
pub fn background_colour() -> Color {
    Color::srgb_u8(0x1a, 0x1a, 0x2e)
}
