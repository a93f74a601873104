//! Grid point-field effect - animated dot lattice behind page content
//!
//! Points near the pointer light up in a slowly cycling neon accent while
//! the rest of the lattice stays faint.
//!
//! - `core`: lattice, activation, color cycle, engine, lifecycle (no WASM deps)
//! - `web`: canvas attachment and the JavaScript API (feature `wasm`, wasm32 only)

pub mod core;
pub mod theme;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::{mount_default, GridHost};
