//! Per-frame pointer input resource.
//!
//! Captures the mouse state the drag systems care about and exposes it via
//! the [`PointerState`] resource. The grab button defaults to the left mouse
//! button; F11 toggles debug overlays.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Button state with an associated mouse binding.
pub struct ButtonState {
    /// Whether the button is currently held this frame.
    pub active: bool,
    /// Whether the button was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the button was just released this frame.
    pub just_released: bool,

    /// The mouse button bound to this action.
    pub button_binding: MouseButton,
}

impl ButtonState {
    pub fn new(button_binding: MouseButton) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            button_binding,
        }
    }

    /// Advance to a new sample of "is the button down".
    ///
    /// Edges are derived from the previous sample so the state can be fed
    /// from any source, not only raylib.
    pub fn update(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Resource capturing the per-frame pointer state.
#[derive(Resource, Debug, Clone)]
pub struct PointerState {
    /// Pointer position in screen pixels.
    pub screen: Vector2,
    /// Pointer position projected into world space through the active camera.
    pub world: Vector2,
    /// Button that grabs and releases draggables.
    pub grab: ButtonState,
    /// Key that toggles debug overlays.
    pub debug_toggle: KeyboardKey,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            screen: Vector2 { x: 0.0, y: 0.0 },
            world: Vector2 { x: 0.0, y: 0.0 },
            grab: ButtonState::new(MouseButton::MOUSE_BUTTON_LEFT),
            debug_toggle: KeyboardKey::KEY_F11,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointerstate_default() {
        let p = PointerState::default();
        assert!(!p.grab.active);
        assert!(!p.grab.just_pressed);
        assert!(!p.grab.just_released);
        assert_eq!(p.grab.button_binding, MouseButton::MOUSE_BUTTON_LEFT);
        assert_eq!(p.debug_toggle, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_button_edges() {
        let mut b = ButtonState::new(MouseButton::MOUSE_BUTTON_LEFT);
        b.update(true);
        assert!(b.active && b.just_pressed && !b.just_released);
        b.update(true);
        assert!(b.active && !b.just_pressed && !b.just_released);
        b.update(false);
        assert!(!b.active && !b.just_pressed && b.just_released);
        b.update(false);
        assert!(!b.active && !b.just_pressed && !b.just_released);
    }
}
