//! Event types and observers.
//!
//! Submodules:
//! - [`drag`] – drag started/ended notifications emitted by the drag systems
//! - [`switchdebug`] – toggle debug rendering on/off
pub mod drag;
pub mod switchdebug;
