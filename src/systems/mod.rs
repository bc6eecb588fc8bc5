//! Engine systems.
//!
//! Submodules overview
//! - [`collider`] – fit draggable colliders to their sprite bounds
//! - [`drag`] – ECS adapter for the drag controller (grab, release, follow)
//! - [`input`] – read the mouse and update [`crate::resources::input::PointerState`]
//! - [`render`] – draw world and debug overlays using Raylib
//! - [`validation`] – setup checks for draggables and the root scale rule

pub mod collider;
pub mod drag;
pub mod input;
pub mod render;
pub mod validation;
