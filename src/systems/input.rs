//! Input systems.
//!
//! - [`update_pointer_state`] reads the mouse from raylib each frame and
//!   writes the results into [`crate::resources::input::PointerState`].
//! - [`apply_pointer_sample`] does the raylib-independent part so the pointer
//!   state can also be driven from tests or other input sources.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::drag::ViewportProjection;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::camera2d::{Camera2DRes, CameraViewport};
use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;

/// Record one pointer sample: screen position, grab button state and the
/// position projected into world space.
pub fn apply_pointer_sample<V: ViewportProjection + ?Sized>(
    pointer: &mut PointerState,
    screen: Vector2,
    grab_down: bool,
    viewport: &V,
) {
    pointer.screen = screen;
    pointer.world = viewport.screen_to_world(screen);
    pointer.grab.update(grab_down);
}

/// Poll raylib for mouse input and update the `PointerState` resource.
pub fn update_pointer_state(
    mut pointer: ResMut<PointerState>,
    rl: NonSend<raylib::RaylibHandle>,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    mut commands: Commands,
) {
    let viewport = CameraViewport::new(&camera, &screen);
    let mouse = rl.get_mouse_position();
    let down = rl.is_mouse_button_down(pointer.grab.button_binding);
    apply_pointer_sample(&mut pointer, mouse, down, &viewport);

    if rl.is_key_pressed(pointer.debug_toggle) {
        commands.trigger(SwitchDebugEvent {});
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_projects_through_camera_and_tracks_edges() {
        let screen = ScreenSize { w: 200, h: 100 };
        let viewport = CameraViewport::new(&Camera2DRes::centered(screen, 2.0), &screen);
        let mut pointer = PointerState::default();

        apply_pointer_sample(&mut pointer, Vector2 { x: 150.0, y: 50.0 }, true, &viewport);
        assert_eq!(pointer.screen, Vector2 { x: 150.0, y: 50.0 });
        assert!((pointer.world.x - 25.0).abs() < 1e-5);
        assert!(pointer.world.y.abs() < 1e-5);
        assert!(pointer.grab.just_pressed);

        apply_pointer_sample(&mut pointer, Vector2 { x: 150.0, y: 50.0 }, false, &viewport);
        assert!(pointer.grab.just_released);
    }
}
