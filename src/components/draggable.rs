//! Draggable marker component.
//!
//! Entities tagged with [`Draggable`] take part in pointer hit-tests and can
//! be grabbed by the [`DragController`](crate::drag::DragController). A
//! draggable must have a [`MapPosition`](super::mapposition::MapPosition) and
//! a [`Sprite`](super::sprite::Sprite), either on itself or on a direct
//! child (its "visual"); the
//! [`validate_draggables`](crate::systems::validation::validate_draggables)
//! setup pass checks this.

use bevy_ecs::prelude::Component;

/// Tag component for entities the pointer may grab.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Draggable;

/// Human readable name, used by scene files and logs.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct MapName(pub String);
