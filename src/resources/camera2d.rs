//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that systems can agree on
//! a single world/screen transform. [`CameraViewport`] pairs the camera with
//! the screen size and exposes the projection the drag controller needs,
//! computed without a raylib handle so it also works in tests.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

use crate::drag::ViewportProjection;
use crate::resources::screensize::ScreenSize;

/// ECS resource that holds the active 2D camera parameters.
///
/// Inserted during setup, read by the pointer, drag and render systems.
#[derive(Resource, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera looking at the world origin, with the origin drawn at the
    /// center of a `screen`-sized framebuffer.
    pub fn centered(screen: ScreenSize, zoom: f32) -> Self {
        Self(Camera2D {
            offset: Vector2 {
                x: screen.w as f32 * 0.5,
                y: screen.h as f32 * 0.5,
            },
            target: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            zoom,
        })
    }
}

/// Camera plus framebuffer size: everything needed to map screen to world.
#[derive(Clone, Copy)]
pub struct CameraViewport {
    pub camera: Camera2D,
    pub screen: ScreenSize,
}

impl CameraViewport {
    pub fn new(camera: &Camera2DRes, screen: &ScreenSize) -> Self {
        Self {
            camera: camera.0,
            screen: *screen,
        }
    }

    /// Axis-aligned world rectangle visible through the camera, as (min, max).
    pub fn visible_world_rect(&self) -> (Vector2, Vector2) {
        let w = self.screen.w as f32;
        let h = self.screen.h as f32;
        let corners = [
            self.screen_to_world(Vector2 { x: 0.0, y: 0.0 }),
            self.screen_to_world(Vector2 { x: w, y: 0.0 }),
            self.screen_to_world(Vector2 { x: 0.0, y: h }),
            self.screen_to_world(Vector2 { x: w, y: h }),
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        (min, max)
    }
}

/// Rotate a 2D vector by `angle_degrees`.
fn rotate(v: Vector2, angle_degrees: f32) -> Vector2 {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vector2 {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

impl ViewportProjection for CameraViewport {
    /// Inverse of raylib's camera matrix: undo offset, zoom, rotation, target.
    fn screen_to_world(&self, screen: Vector2) -> Vector2 {
        let cam = &self.camera;
        let zoom = if cam.zoom == 0.0 { 1.0 } else { cam.zoom };
        let local = Vector2 {
            x: (screen.x - cam.offset.x) / zoom,
            y: (screen.y - cam.offset.y) / zoom,
        };
        let unrotated = rotate(local, -cam.rotation);
        Vector2 {
            x: unrotated.x + cam.target.x,
            y: unrotated.y + cam.target.y,
        }
    }

    // raylib world space is y-down, so the corner with the largest coordinates
    // on both axes is the bottom-right of the window.
    fn viewport_top_right(&self) -> Vector2 {
        self.visible_world_rect().1
    }
}
