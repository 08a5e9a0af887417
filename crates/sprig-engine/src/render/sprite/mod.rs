//! Instanced sprite rendering.
//!
//! Every sprite is a unit quad `[0,1]²` placed by a per-instance 2×3 affine
//! transform, textured through a UV sub-rectangle and multiplied by a tint.
//! The vertex stage derives the quad corner from `vertex_index` (no per-vertex
//! buffer), applies the instance transform and the frame's view transform,
//! snaps to whole pixels and converts to clip space.
//!
//! `expand` and `composite` run the same math on the CPU.

mod batch;
mod buffer;
mod camera;
pub mod composite;
pub mod expand;
mod instance;
mod pipeline;
mod renderer;
mod texture;
mod uniforms;

pub use batch::{BatchBuilder, DrawCall, DrawSource, SpriteBatch};
pub use buffer::InstanceBuffer;
pub use camera::Camera2D;
pub use instance::SpriteInstance;
pub use pipeline::{SpritePipeline, FRAME_GROUP, SHADER_SOURCE, TEXTURE_GROUP};
pub use renderer::{DrawStats, SpriteRenderer};
pub use texture::{SamplerSettings, SpriteTexture, TextureConfig, TextureId};
pub use uniforms::FrameUniforms;
