//! mapdrag library.
//!
//! Drag-and-clamp controller for 2D map sprites plus the ECS components,
//! resources, systems and events that drive it, exposed for the binary and
//! for integration tests.

pub mod components;
pub mod drag;
pub mod events;
pub mod fitcolliders;
pub mod game;
pub mod resources;
pub mod scene;
pub mod systems;
