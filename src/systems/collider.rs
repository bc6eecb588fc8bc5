//! Collider fitting.
//!
//! Keeps every draggable's [`BoxCollider`] equal to its visual sprite's
//! bounds at the visual's effective scale. A draggable is refitted when its
//! collider is missing or when the sprite, scale or children of the root or
//! of a visual child were added or changed. The fit is a pure function of
//! sprite and scale, so running it repeatedly changes nothing.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::draggable::Draggable;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::systems::drag::Visuals;

/// Entities whose visual inputs changed since the system last ran.
type VisualChanged = Or<(Changed<Sprite>, Changed<Scale>, Changed<Children>)>;

/// Collider that fits the visual of `entity`, `None` if it has no sprite.
pub fn fit_collider(entity: Entity, visuals: &Visuals) -> Option<BoxCollider> {
    let visual = visuals.find(entity)?;
    Some(BoxCollider::fitted(
        visual.sprite,
        &Scale {
            scale: visual.scale,
        },
    ))
}

/// Fit (or insert) the collider of every draggable whose visual changed.
pub fn fit_colliders_system(
    mut draggables: Query<(Entity, Option<&mut BoxCollider>), With<Draggable>>,
    changed: Query<(), VisualChanged>,
    children: Query<&Children>,
    visuals: Visuals,
    mut commands: Commands,
) {
    for (entity, collider) in draggables.iter_mut() {
        let visual_changed = changed.contains(entity)
            || children
                .get(entity)
                .is_ok_and(|c| c.iter().any(|child| changed.contains(child)));
        if collider.is_some() && !visual_changed {
            continue;
        }
        let Some(fitted) = fit_collider(entity, &visuals) else {
            continue;
        };
        match collider {
            Some(mut collider) => {
                if *collider != fitted {
                    log::debug!(
                        "Refitting collider of {:?}: {:?} -> {:?}",
                        entity,
                        collider.size,
                        fitted.size
                    );
                    *collider = fitted;
                }
            }
            None => {
                commands.entity(entity).insert(fitted);
            }
        }
    }
}
