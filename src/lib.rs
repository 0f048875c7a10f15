//! hero-particles - GPU position integration for a particle hero visual
//!
//! A particle system whose state lives in textures: every texel of the
//! `positions` texture is one particle's (x, y, z, w) state, and a matching
//! `velocity` texture holds its per-frame delta. This crate provides the
//! single GPU pass that advances that state - a full-screen draw writing
//! `positions + velocity` into the render target bound by the caller -
//! plus a CPU reference of the same texel function for tests and host-side
//! tooling.
//!
//! The caller owns everything around the pass: texture allocation, the
//! render/animation loop, the ping-pong swap between frames, and whatever
//! scene consumes the advanced positions.

pub mod reference;
pub mod shaders;

mod integrate;

pub use integrate::PositionIntegrationPipeline;
pub use reference::{ReferenceError, Texel, TexelGrid};
