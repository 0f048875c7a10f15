//! Shader module - WGSL shaders for GPU rendering
//!
//! Shaders are stored as external .wgsl files and included at compile time.
//! This enables better IDE support (syntax highlighting, validation) while
//! keeping the binary self-contained.

/// Built-in shaders included at compile time
pub mod builtin {
    /// Position integration shader - adds the velocity texture to the
    /// position texture, one particle per texel
    pub const POSITION_INTEGRATE: &str = include_str!("position_integrate.wgsl");
}
