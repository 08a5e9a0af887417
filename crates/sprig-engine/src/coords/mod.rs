//! Coordinate and geometry types shared by the host layer and the sprite pipeline.
//!
//! Canonical CPU space:
//! - Pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! The sprite vertex shader converts to clip space using the frame uniform.

mod rect;
mod transform;
mod uv_rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use transform::Transform2D;
pub use uv_rect::UvRect;
pub use vec2::Vec2;
pub use viewport::Viewport;
