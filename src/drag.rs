//! Drag-and-clamp controller.
//!
//! [`DragController`] is a two-state machine (`Idle` / `Dragging`) that lets
//! the pointer grab an entity, keeps the grab offset constant while the
//! pointer moves, and optionally clamps the entity so its visible edge never
//! leaves the viewport.
//!
//! The controller knows nothing about the ECS world or raylib. Its
//! collaborators are passed into every call:
//! - [`DragScene`] – hit-testing and reading/writing entity state
//! - [`ViewportProjection`] – camera geometry used to derive [`ViewportBounds`]
//!
//! The ECS adapter lives in [`crate::systems::drag`].

use raylib::prelude::Vector2;

/// Camera geometry needed by the controller.
pub trait ViewportProjection {
    /// Project a screen-space point (pixels) into world space.
    fn screen_to_world(&self, screen: Vector2) -> Vector2;

    /// World-space position of the viewport's top-right corner, i.e. the
    /// corner with the largest coordinates on both world axes.
    fn viewport_top_right(&self) -> Vector2;
}

/// Scene access needed by the controller.
///
/// `Handle` identifies an entity; for the ECS adapter it is
/// [`bevy_ecs::entity::Entity`].
pub trait DragScene {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Topmost entity under `world`, if any.
    fn hit_test(&self, world: Vector2) -> Option<Self::Handle>;

    /// Current position of the entity.
    fn position(&self, handle: Self::Handle) -> Option<Vector2>;

    /// Overwrite the entity's position.
    fn set_position(&mut self, handle: Self::Handle, position: Vector2);

    /// Sprite bounding-box size in local units.
    fn sprite_size(&self, handle: Self::Handle) -> Option<Vector2>;

    /// Scale factor applied to the sprite.
    fn scale(&self, handle: Self::Handle) -> Vector2;
}

/// Symmetric clamp limits around the world origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBounds {
    pub x_bound: f32,
    pub y_bound: f32,
}

impl ViewportBounds {
    /// Clamp `candidate` to `[-x_bound, x_bound] x [-y_bound, y_bound]`.
    pub fn clamp(&self, candidate: Vector2) -> Vector2 {
        Vector2 {
            x: clamp_axis(candidate.x, self.x_bound),
            y: clamp_axis(candidate.y, self.y_bound),
        }
    }
}

// f32::clamp panics on an inverted range; bounds coming from user code may be negative.
fn clamp_axis(value: f32, bound: f32) -> f32 {
    value.max(-bound).min(bound)
}

/// Derive clamp bounds from the sprite's scaled half-extents and the
/// viewport's top-right corner.
///
/// Assumes the camera is centered on the world origin.
pub fn obtain_bounds(sprite_size: Vector2, scale: Vector2, top_right: Vector2) -> ViewportBounds {
    let extents = Vector2 {
        x: sprite_size.x * 0.5 * scale.x,
        y: sprite_size.y * 0.5 * scale.y,
    };
    ViewportBounds {
        x_bound: (top_right.x - extents.x).abs(),
        y_bound: (top_right.y - extents.y).abs(),
    }
}

/// Collider size covering a sprite of `sprite_size` drawn at `scale`.
pub fn adjust_collider(sprite_size: Vector2, scale: Vector2) -> Vector2 {
    Vector2 {
        x: sprite_size.x * scale.x,
        y: sprite_size.y * scale.y,
    }
}

/// State of one grab, alive from a successful hit-test until release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession<H> {
    pub target: H,
    /// `entity_position - pointer_world` at grab time.
    pub offset: Vector2,
    pub bounds: ViewportBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState<H> {
    Idle,
    Dragging(DragSession<H>),
}

impl<H> Default for DragState<H> {
    fn default() -> Self {
        DragState::Idle
    }
}

/// Pointer-driven drag state machine.
#[derive(Debug, Clone)]
pub struct DragController<H> {
    pub restrict_to_screen: bool,
    state: DragState<H>,
}

impl<H: Copy + PartialEq + std::fmt::Debug> DragController<H> {
    pub fn new(restrict_to_screen: bool) -> Self {
        Self {
            restrict_to_screen,
            state: DragState::Idle,
        }
    }

    pub fn state(&self) -> &DragState<H> {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Active session, if any.
    pub fn session(&self) -> Option<&DragSession<H>> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Hit-test at `pointer_world` and start a session on a hit.
    ///
    /// Returns the grabbed entity. A miss leaves the controller untouched.
    pub fn on_pointer_down<S, V>(
        &mut self,
        pointer_world: Vector2,
        scene: &S,
        viewport: &V,
    ) -> Option<H>
    where
        S: DragScene<Handle = H>,
        V: ViewportProjection + ?Sized,
    {
        let target = scene.hit_test(pointer_world)?;
        let Some(position) = scene.position(target) else {
            log::warn!("Hit entity {:?} has no position, ignoring grab", target);
            return None;
        };
        let sprite_size = scene.sprite_size(target).unwrap_or_else(|| {
            log::warn!("Hit entity {:?} has no sprite, using zero extents", target);
            Vector2::zero()
        });

        let bounds = obtain_bounds(sprite_size, scene.scale(target), viewport.viewport_top_right());
        let offset = Vector2 {
            x: position.x - pointer_world.x,
            y: position.y - pointer_world.y,
        };

        log::debug!(
            "Grabbed {:?} at ({:.1}, {:.1}), offset ({:.1}, {:.1}), bounds ±{:.1} x ±{:.1}",
            target,
            pointer_world.x,
            pointer_world.y,
            offset.x,
            offset.y,
            bounds.x_bound,
            bounds.y_bound
        );

        self.state = DragState::Dragging(DragSession {
            target,
            offset,
            bounds,
        });
        Some(target)
    }

    /// End the current session. Returns the released entity, `None` when idle.
    pub fn on_pointer_up(&mut self) -> Option<H> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => {
                log::debug!("Released {:?}", session.target);
                Some(session.target)
            }
            DragState::Idle => None,
        }
    }

    /// Move the grabbed entity to follow `pointer_world`.
    ///
    /// Returns the position written, `None` when idle.
    pub fn on_frame_update<S>(&self, pointer_world: Vector2, scene: &mut S) -> Option<Vector2>
    where
        S: DragScene<Handle = H>,
    {
        let session = self.session()?;
        let mut candidate = Vector2 {
            x: pointer_world.x + session.offset.x,
            y: pointer_world.y + session.offset.y,
        };
        if self.restrict_to_screen {
            candidate = session.bounds.clamp(candidate);
        }
        scene.set_position(session.target, candidate);
        Some(candidate)
    }
}

impl<H> Default for DragController<H> {
    fn default() -> Self {
        Self {
            restrict_to_screen: true,
            state: DragState::Idle,
        }
    }
}
