//! CPU reference for the position integration pass
//!
//! Mirrors the GPU pass texel for texel without requiring a GPU context,
//! in the same role a mock renderer plays for draw calls: tests assert
//! against this model, and hosts can use it to build or inspect particle
//! state on the CPU before uploading it.

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Errors from the CPU reference
///
/// The GPU pass itself has no error surface; these exist so the reference
/// can document, rather than mask, inputs the pass would silently accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// Raw texel data does not fill the requested grid
    #[error("texel count {0} does not fill a {1}x{2} grid")]
    TexelCount(usize, u32, u32),

    /// The two input grids have different dimensions
    #[error("input dimensions differ: positions are {0}x{1}, velocity is {2}x{3}")]
    DimensionMismatch(u32, u32, u32, u32),
}

/// One particle's state, stored in a texture's RGBA channels
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Texel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Texel {
    /// All-zero texel
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Componentwise sum of a position texel and a velocity texel
///
/// This is the whole fragment function: plain floating-point addition,
/// no clamping or saturation.
pub fn integrate_texel(pos: Texel, vel: Texel) -> Texel {
    Texel::new(
        pos.x + vel.x,
        pos.y + vel.y,
        pos.z + vel.z,
        pos.w + vel.w,
    )
}

/// A width x height grid of RGBA float texels
///
/// CPU analogue of the position and velocity textures. Texels are stored
/// row-major, row 0 at v = 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TexelGrid {
    width: u32,
    height: u32,
    texels: Vec<Texel>,
}

impl TexelGrid {
    /// Create a zero-filled grid
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![Texel::ZERO; (width * height) as usize],
        }
    }

    /// Create a grid from row-major texel data
    pub fn from_raw(width: u32, height: u32, texels: Vec<Texel>) -> Result<Self, ReferenceError> {
        if texels.len() != (width * height) as usize {
            return Err(ReferenceError::TexelCount(texels.len(), width, height));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major texel slice
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Raw bytes for texture upload (`queue.write_texture` payload)
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    pub fn get(&self, x: u32, y: u32) -> Texel {
        self.texels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, texel: Texel) {
        self.texels[(y * self.width + x) as usize] = texel;
    }

    /// Sample at normalized UV with nearest/clamp-to-edge semantics
    ///
    /// Matches the GPU sampler: texel index is floor(uv * size), clamped
    /// to the grid edge.
    pub fn sample(&self, u: f32, v: f32) -> Texel {
        let x = nearest_index(u, self.width);
        let y = nearest_index(v, self.height);
        self.texels[(y * self.width + x) as usize]
    }
}

fn nearest_index(coord: f32, size: u32) -> u32 {
    let max = size.saturating_sub(1) as f32;
    (coord * size as f32).floor().clamp(0.0, max) as u32
}

/// Whole-pass reference: `positions + velocity`, texel by texel
///
/// Refuses mismatched dimensions. The GPU pass would instead sample both
/// textures at the same normalized UV and produce a well-defined but
/// meaningless sum; the typed error here makes that input visible in
/// tests and host-side tooling.
pub fn integrate(positions: &TexelGrid, velocity: &TexelGrid) -> Result<TexelGrid, ReferenceError> {
    if positions.width != velocity.width || positions.height != velocity.height {
        return Err(ReferenceError::DimensionMismatch(
            positions.width,
            positions.height,
            velocity.width,
            velocity.height,
        ));
    }

    let texels = positions
        .texels
        .iter()
        .zip(&velocity.texels)
        .map(|(pos, vel)| integrate_texel(*pos, *vel))
        .collect();

    Ok(TexelGrid {
        width: positions.width,
        height: positions.height,
        texels,
    })
}
