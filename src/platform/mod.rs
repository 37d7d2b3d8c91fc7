//! Platform abstraction layer
//!
//! The simulation only sees `step`, `trigger_jump`, and snapshots. On the web
//! those are exported to JavaScript, which owns the canvas, the
//! `requestAnimationFrame` loop, and pointer/keyboard listeners.

#[cfg(target_arch = "wasm32")]
pub mod web;
