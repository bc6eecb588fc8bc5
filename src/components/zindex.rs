//! Z-index component for render ordering.
//!
//! The [`ZIndex`] component controls the drawing order of entities and, for
//! draggables, which one the pointer grabs when several overlap. Entities
//! with higher z-index values are drawn on top of those with lower values.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top) and win hit-tests.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
