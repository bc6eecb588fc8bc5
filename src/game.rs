//! World setup and the per-frame schedule.
//!
//! [`init_world`] inserts the resources and observers every run needs,
//! [`load_scene`] spawns and validates the draggable maps, and
//! [`build_update_schedule`] wires the raylib-independent systems in frame
//! order. The binary adds the raylib input and render systems around them.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use raylib::{RaylibHandle, RaylibThread};

use crate::events::drag::{drag_ended_observer, drag_started_observer};
use crate::events::switchdebug::switch_debug_observer;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::dragcontroller::DragControllerRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::scene::{SceneData, spawn_scene};
use crate::systems::collider::fit_colliders_system;
use crate::systems::drag::{drag_follow_system, drag_pointer_system};
use crate::systems::validation::{DragSetupError, enforce_root_scale_system, validate_draggables};

/// Fresh world with resources derived from `config` and the drag/debug observers.
pub fn init_world(config: &GameConfig) -> World {
    let mut world = World::new();
    let screen = ScreenSize {
        w: config.window_width as i32,
        h: config.window_height as i32,
    };
    world.insert_resource(screen);
    world.insert_resource(Camera2DRes::centered(screen, config.camera_zoom));
    world.insert_resource(PointerState::default());
    world.insert_resource(DragControllerRes::new(config.restrict_to_screen));
    world.insert_resource(config.clone());

    world.spawn(Observer::new(drag_started_observer));
    world.spawn(Observer::new(drag_ended_observer));
    world.spawn(Observer::new(switch_debug_observer));
    // Ensure the observers are registered before any system triggers events.
    world.flush();
    world
}

/// Spawn `scene`, validate it and fit the colliders so the maps can be
/// grabbed on the very first frame.
pub fn load_scene(world: &mut World, scene: &SceneData) -> Result<Vec<Entity>, DragSetupError> {
    let roots = spawn_scene(world, scene);
    validate_draggables(world)?;

    let mut fit = Schedule::default();
    fit.add_systems(fit_colliders_system);
    fit.run(world);

    log::info!("Spawned {} map(s)", roots.len());
    Ok(roots)
}

/// Track a window resize: update [`ScreenSize`] and keep the camera
/// centered on the world origin. No-op when the size did not change.
pub fn resize_screen(world: &mut World, w: i32, h: i32) {
    let screen = ScreenSize { w, h };
    if *world.resource::<ScreenSize>() == screen {
        return;
    }
    let zoom = world.resource::<Camera2DRes>().0.zoom;
    world.insert_resource(screen);
    world.insert_resource(Camera2DRes::centered(screen, zoom));
    log::debug!("Screen resized to {}x{}", w, h);
}

/// Per-frame systems that only depend on ECS state.
///
/// Order: release/grab, root scale rule, collider fit, follow.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            drag_pointer_system,
            enforce_root_scale_system,
            fit_colliders_system,
            drag_follow_system,
        )
            .chain(),
    );
    update
}

/// Load every texture the scene references. Missing files are logged and
/// the affected maps fall back to flat rectangles.
pub fn load_scene_textures(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    scene: &SceneData,
) -> TextureStore {
    let mut store = TextureStore::new();
    for map in &scene.maps {
        let Some(path) = &map.texture else {
            continue;
        };
        match rl.load_texture(thread, path) {
            Ok(texture) => {
                log::info!("Loaded texture {} for map '{}'", path, map.name);
                store.insert(map.texture_key(), texture);
            }
            Err(e) => log::error!("Failed to load texture {} for map '{}': {:?}", path, map.name, e),
        }
    }
    store
}
