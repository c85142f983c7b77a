use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use constants::viewer_settings::{
    CAMERA_AUTO_ROTATE_SPEED, CAMERA_DAMPING, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE,
    CAMERA_START_POSITION,
};

/// Orbit camera around a fixed target: drag to rotate, wheel to zoom,
/// optional auto-rotate. Smoothing follows the drag targets with a lerp so
/// motion eases out instead of stopping dead.
#[derive(Resource)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub auto_rotate: bool,
    smoothed_yaw: f32,
    smoothed_pitch: f32,
    smoothed_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let offset = CAMERA_START_POSITION;
        let distance = offset.length();
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).asin();
        Self {
            target: Vec3::ZERO,
            yaw,
            pitch,
            distance,
            auto_rotate: false,
            smoothed_yaw: yaw,
            smoothed_pitch: pitch,
            smoothed_distance: distance,
        }
    }
}

impl OrbitCamera {
    /// Back to the initial pose, keeping the auto-rotate setting.
    pub fn reset_pose(&mut self) {
        let auto_rotate = self.auto_rotate;
        *self = Self {
            auto_rotate,
            ..Self::default()
        };
    }

    /// Camera position for the current smoothed orbit parameters.
    pub fn eye_position(&self) -> Vec3 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.smoothed_yaw, -self.smoothed_pitch, 0.0);
        self.target + rotation * (Vec3::Z * self.smoothed_distance)
    }
}

pub fn camera_controller(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut orbit: ResMut<OrbitCamera>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    if buttons.pressed(MouseButton::Left) {
        for event in motion.read() {
            orbit.yaw -= event.delta.x * 0.005;
            orbit.pitch = (orbit.pitch + event.delta.y * 0.005).clamp(-1.54, 1.54);
        }
    } else {
        motion.clear();
    }

    for event in wheel.read() {
        orbit.distance = (orbit.distance * (1.0 - event.y * 0.1))
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    if orbit.auto_rotate {
        orbit.yaw += CAMERA_AUTO_ROTATE_SPEED * time.delta_secs();
    }

    // Critically-damped-ish follow; the factor scales with frame time so the
    // feel does not change with refresh rate.
    let follow = (time.delta_secs() / CAMERA_DAMPING).clamp(0.0, 1.0) * 0.5;
    orbit.smoothed_yaw += (orbit.yaw - orbit.smoothed_yaw) * follow;
    orbit.smoothed_pitch += (orbit.pitch - orbit.smoothed_pitch) * follow;
    orbit.smoothed_distance += (orbit.distance - orbit.smoothed_distance) * follow;

    let target = orbit.target;
    let eye = orbit.eye_position();
    for mut transform in &mut cameras {
        *transform = Transform::from_translation(eye).looking_at(target, Vec3::Y);
    }
}
