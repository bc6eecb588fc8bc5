//! ECS resources made available to systems.
//!
//! Overview
//! - `camera2d` – shared 2D camera and its screen/world projection
//! - `debugmode` – presence toggles debug overlays
//! - `dragcontroller` – the drag state machine driven by the drag systems
//! - `gameconfig` – window, camera and drag settings loaded from INI
//! - `input` – per-frame pointer state (position and grab button)
//! - `screensize` – current framebuffer dimensions in pixels
//! - `texturestore` – loaded textures keyed by string IDs
pub mod camera2d;
pub mod debugmode;
pub mod dragcontroller;
pub mod gameconfig;
pub mod input;
pub mod screensize;
pub mod texturestore;
