//! Drag controller resource.
//!
//! Holds the single [`DragController`] driven by the drag systems. Entity
//! handles are ECS [`Entity`] ids.

use bevy_ecs::prelude::*;

use crate::drag::DragController;

#[derive(Resource, Debug, Clone)]
pub struct DragControllerRes(pub DragController<Entity>);

impl DragControllerRes {
    pub fn new(restrict_to_screen: bool) -> Self {
        Self(DragController::new(restrict_to_screen))
    }
}

impl Default for DragControllerRes {
    fn default() -> Self {
        Self(DragController::default())
    }
}
