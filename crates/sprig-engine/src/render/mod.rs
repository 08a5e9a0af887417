//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, bind groups) and
//! record into a caller-provided encoder via [`RenderTarget`].
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Renderers scale to physical pixels with `RenderCtx::scale_factor`.

mod ctx;
pub mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
