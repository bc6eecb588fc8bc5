//! Drag systems: the ECS adapter around [`DragController`](crate::drag::DragController).
//!
//! - [`Visuals`] finds the sprite that represents a draggable (its own or a
//!   direct child's) and the effective scale it is drawn at.
//! - [`EcsDragScene`] implements [`DragScene`] on top of ECS queries.
//! - [`drag_pointer_system`] turns button edges into grab/release calls.
//! - [`drag_follow_system`] moves the grabbed entity every frame.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::draggable::Draggable;
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::drag::DragScene;
use crate::events::drag::{DragEndedEvent, DragStartedEvent};
use crate::resources::camera2d::{Camera2DRes, CameraViewport};
use crate::resources::dragcontroller::DragControllerRes;
use crate::resources::input::PointerState;
use crate::resources::screensize::ScreenSize;

const UNIT: Vector2 = Vector2 { x: 1.0, y: 1.0 };

/// Sprite representing an entity, resolved through the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct Visual<'a> {
    /// Entity carrying the sprite (the root itself or one of its children).
    pub entity: Entity,
    pub sprite: &'a Sprite,
    /// Root scale times the visual child's scale.
    pub scale: Vector2,
}

#[derive(SystemParam)]
pub struct Visuals<'w, 's> {
    pub sprites: Query<'w, 's, (&'static Sprite, Option<&'static Scale>)>,
    pub scales: Query<'w, 's, &'static Scale>,
    pub children: Query<'w, 's, &'static Children>,
}

impl Visuals<'_, '_> {
    /// Sprite on `entity` itself, else the first direct child carrying one.
    pub fn find(&self, entity: Entity) -> Option<Visual<'_>> {
        let root_scale = self.scales.get(entity).map(|s| s.scale).unwrap_or(UNIT);
        if let Ok((sprite, _)) = self.sprites.get(entity) {
            return Some(Visual {
                entity,
                sprite,
                scale: root_scale,
            });
        }
        let children = self.children.get(entity).ok()?;
        children.iter().find_map(|child| {
            let (sprite, child_scale) = self.sprites.get(child).ok()?;
            let child_scale = child_scale.map(|s| s.scale).unwrap_or(UNIT);
            Some(Visual {
                entity: child,
                sprite,
                scale: Vector2 {
                    x: root_scale.x * child_scale.x,
                    y: root_scale.y * child_scale.y,
                },
            })
        })
    }
}

/// [`DragScene`] backed by the draggable entities of the ECS world.
#[derive(SystemParam)]
pub struct EcsDragScene<'w, 's> {
    draggables: Query<
        'w,
        's,
        (
            Entity,
            &'static mut MapPosition,
            Option<&'static BoxCollider>,
            Option<&'static ZIndex>,
        ),
        With<Draggable>,
    >,
    visuals: Visuals<'w, 's>,
}

impl DragScene for EcsDragScene<'_, '_> {
    type Handle = Entity;

    /// Draggable whose collider contains `world`, highest [`ZIndex`] first.
    fn hit_test(&self, world: Vector2) -> Option<Entity> {
        self.draggables
            .iter()
            .filter_map(|(entity, position, collider, z)| {
                let collider = collider?;
                collider
                    .contains_point(position.pos, world)
                    .then(|| (entity, z.copied().unwrap_or_default()))
            })
            .fold(None, |best: Option<(Entity, ZIndex)>, (entity, z)| match best {
                Some((_, best_z)) if best_z >= z => best,
                _ => Some((entity, z)),
            })
            .map(|(entity, _)| entity)
    }

    fn position(&self, handle: Entity) -> Option<Vector2> {
        self.draggables.get(handle).ok().map(|(_, p, _, _)| p.pos)
    }

    fn set_position(&mut self, handle: Entity, position: Vector2) {
        if let Ok((_, mut p, _, _)) = self.draggables.get_mut(handle) {
            p.pos = position;
        }
    }

    fn sprite_size(&self, handle: Entity) -> Option<Vector2> {
        self.visuals.find(handle).map(|v| v.sprite.size())
    }

    fn scale(&self, handle: Entity) -> Vector2 {
        self.visuals.find(handle).map(|v| v.scale).unwrap_or(UNIT)
    }
}

/// Grab on grab-button press, release on grab-button release.
///
/// Should run after [`update_pointer_state`](crate::systems::input::update_pointer_state).
pub fn drag_pointer_system(
    pointer: Res<PointerState>,
    mut controller: ResMut<DragControllerRes>,
    scene: EcsDragScene,
    camera: Res<Camera2DRes>,
    screen: Res<ScreenSize>,
    mut commands: Commands,
) {
    if pointer.grab.just_released
        && let Some(entity) = controller.0.on_pointer_up()
    {
        commands.trigger(DragEndedEvent { entity });
    }

    if pointer.grab.just_pressed {
        let viewport = CameraViewport::new(&camera, &screen);
        if controller
            .0
            .on_pointer_down(pointer.world, &scene, &viewport)
            .is_some()
            && let Some(session) = controller.0.session()
        {
            commands.trigger(DragStartedEvent {
                entity: session.target,
                offset: session.offset,
                bounds: session.bounds,
            });
        }
    }
}

/// Move the grabbed entity to the latest pointer sample.
///
/// A grabbed entity that disappeared from the world ends the drag.
pub fn drag_follow_system(
    pointer: Res<PointerState>,
    mut controller: ResMut<DragControllerRes>,
    mut scene: EcsDragScene,
    mut commands: Commands,
) {
    let Some(target) = controller.0.session().map(|s| s.target) else {
        return;
    };
    if scene.position(target).is_none() {
        log::warn!("Dragged entity {:?} is gone, ending drag", target);
        if let Some(entity) = controller.0.on_pointer_up() {
            commands.trigger(DragEndedEvent { entity });
        }
        return;
    }
    controller.0.on_frame_update(pointer.world, &mut scene);
}
