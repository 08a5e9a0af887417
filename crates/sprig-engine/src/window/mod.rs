//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and its windows, and gives each window its own
//! GPU surface and frame clock.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
