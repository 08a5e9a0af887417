//! Color model for sprite tints and clear colors.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
