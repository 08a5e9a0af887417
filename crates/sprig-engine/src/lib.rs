//! Sprig engine crate.
//!
//! Instanced 2D sprite rendering on wgpu, plus the window/GPU runtime that
//! hosts it.
//!
//! - [`render::sprite`] holds the pipeline: shader, instance format, batching
//!   and the [`SpriteRenderer`](render::sprite::SpriteRenderer).
//! - [`coords`] and [`paint`] hold the plain value types it consumes.
//! - [`window`], [`device`], [`core`] and [`time`] run a winit event loop with
//!   one GPU surface per window.

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
