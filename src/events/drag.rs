//! Drag lifecycle events and observers.
//!
//! The drag systems trigger [`DragStartedEvent`] when a pointer press grabs a
//! draggable and [`DragEndedEvent`] when the grab is released. Observers can
//! react to them; the default ones only log.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::draggable::MapName;
use crate::drag::ViewportBounds;

/// A draggable entity was grabbed.
#[derive(Event, Debug, Clone, Copy)]
pub struct DragStartedEvent {
    pub entity: Entity,
    /// Entity position minus pointer position at grab time.
    pub offset: Vector2,
    pub bounds: ViewportBounds,
}

/// The grabbed entity was released.
#[derive(Event, Debug, Clone, Copy)]
pub struct DragEndedEvent {
    pub entity: Entity,
}

fn display_name(entity: Entity, names: &Query<&MapName>) -> String {
    names
        .get(entity)
        .map(|n| n.0.clone())
        .unwrap_or_else(|_| format!("{:?}", entity))
}

pub fn drag_started_observer(trigger: On<DragStartedEvent>, names: Query<&MapName>) {
    let event = trigger.event();
    log::info!(
        "Drag started on '{}' (bounds ±{:.1} x ±{:.1})",
        display_name(event.entity, &names),
        event.bounds.x_bound,
        event.bounds.y_bound
    );
}

pub fn drag_ended_observer(trigger: On<DragEndedEvent>, names: Query<&MapName>) {
    let event = trigger.event();
    log::info!("Drag ended on '{}'", display_name(event.entity, &names));
}
