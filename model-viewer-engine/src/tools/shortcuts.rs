use bevy::prelude::*;

use crate::engine::camera::orbit_camera::OrbitCamera;
use crate::engine::loading::retry::RetryLoadEvent;

/// Keyboard controls: `R` resets the camera pose, `A` or `Space` toggles
/// auto-rotate, `L` retries the model load.
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut orbit: ResMut<OrbitCamera>,
    mut retry_events: EventWriter<RetryLoadEvent>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        orbit.reset_pose();
        info!("camera pose reset");
    }
    if keyboard.just_pressed(KeyCode::KeyA) || keyboard.just_pressed(KeyCode::Space) {
        orbit.auto_rotate = !orbit.auto_rotate;
        info!("auto-rotate: {}", orbit.auto_rotate);
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        retry_events.write(RetryLoadEvent);
    }
}
