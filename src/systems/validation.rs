//! Draggable setup validation.
//!
//! Two rules apply to every [`Draggable`]:
//! 1. It must be represented by a [`Sprite`], on itself or on a direct child.
//!    A draggable without one is a fatal configuration error.
//! 2. Its own [`Scale`] must be the identity. Sizing belongs on the visual
//!    child; a non-identity root scale is reset with a warning.
//!
//! [`validate_draggables`] checks both at setup time.
//! [`enforce_root_scale_system`] re-applies rule 2 whenever a root scale
//! changes while the game runs.

use bevy_ecs::hierarchy::Children;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use std::fmt;

use crate::components::draggable::{Draggable, MapName};
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;

/// Configuration errors detected while setting up draggables.
#[derive(Debug, Clone, PartialEq)]
pub enum DragSetupError {
    /// The draggable has no sprite on itself nor on any direct child.
    MissingSprite {
        entity: Entity,
        name: Option<String>,
    },
    /// The scene description could not be loaded.
    Scene { path: String, reason: String },
}

impl fmt::Display for DragSetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DragSetupError::MissingSprite { entity, name } => match name {
                Some(name) => write!(
                    f,
                    "draggable '{}' ({:?}) has no visual sprite on itself or a child",
                    name, entity
                ),
                None => write!(
                    f,
                    "draggable {:?} has no visual sprite on itself or a child",
                    entity
                ),
            },
            DragSetupError::Scene { path, reason } => {
                write!(f, "failed to load scene '{}': {}", path, reason)
            }
        }
    }
}

impl std::error::Error for DragSetupError {}

fn reset_root_scale(entity: Entity, name: Option<&MapName>, scale: &mut Scale) {
    log::warn!(
        "Draggable {} has non-identity scale ({}, {}); resetting to (1, 1). Scale the visual child instead.",
        name.map(|n| format!("'{}'", n.0))
            .unwrap_or_else(|| format!("{:?}", entity)),
        scale.scale.x,
        scale.scale.y
    );
    *scale = Scale::default();
}

/// Check every draggable in `world`. Returns how many were validated.
///
/// Stops at the first draggable without a sprite.
pub fn validate_draggables(world: &mut World) -> Result<usize, DragSetupError> {
    let mut state: SystemState<(
        Query<(Entity, Option<&MapName>, Option<&mut Scale>), With<Draggable>>,
        Query<&Sprite>,
        Query<&Children>,
    )> = SystemState::new(world);
    let (mut roots, sprites, children) = state.get_mut(world);

    let mut checked = 0;
    for (entity, name, scale) in roots.iter_mut() {
        let has_visual = sprites.contains(entity)
            || children
                .get(entity)
                .is_ok_and(|c| c.iter().any(|child| sprites.contains(child)));
        if !has_visual {
            return Err(DragSetupError::MissingSprite {
                entity,
                name: name.map(|n| n.0.clone()),
            });
        }
        if let Some(mut scale) = scale
            && !scale.is_identity()
        {
            reset_root_scale(entity, name, &mut scale);
        }
        checked += 1;
    }
    log::info!("Validated {} draggable(s)", checked);
    Ok(checked)
}

/// Reset draggable root scales that were changed to a non-identity value.
pub fn enforce_root_scale_system(
    mut roots: Query<(Entity, Option<&MapName>, &mut Scale), (With<Draggable>, Changed<Scale>)>,
) {
    for (entity, name, mut scale) in roots.iter_mut() {
        if !scale.is_identity() {
            reset_root_scale(entity, name, &mut scale);
        }
    }
}
