//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world. Components define data such as position, rendering, collision
//! and drag participation.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider used for hit-tests
//! - [`draggable`] – marker for entities the pointer may grab, and their name
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`scale`] – 2D scale factor for sprites
//! - [`sprite`] – 2D sprite rendering component
//! - [`zindex`] – rendering and hit-test order hint

pub mod boxcollider;
pub mod draggable;
pub mod mapposition;
pub mod scale;
pub mod sprite;
pub mod zindex;
