//! Position integration pass - advances particle positions on the GPU
//!
//! Particle state lives in textures: each texel of the `positions` texture
//! holds one particle's (x, y, z, w) state, and the `velocity` texture is
//! laid out identically. One full-screen draw adds the two, texel by texel,
//! into the render target bound by the caller.
//!
//! The caller owns the textures and the frame loop. The usual arrangement
//! is two position textures in a ping-pong: the target written this frame
//! becomes the `positions` input of the next.

use crate::shaders;

/// GPU pass computing `positions + velocity` per texel
///
/// Constructed once per device/format pair and reused across frames; only
/// the bind group changes as the caller swaps its double-buffered textures.
///
/// Both input textures must have the dimensions of the render target.
/// Nothing here checks that: with mismatched inputs each texture is still
/// sampled at the fragment's normalized UV, so the pass reads the nearest
/// texel of each and produces a well-defined but meaningless sum. No error
/// surfaces at any level.
///
/// # Usage
/// ```ignore
/// let pass = PositionIntegrationPipeline::new(&device, wgpu::TextureFormat::Rgba32Float);
///
/// // One bind group per ping-pong orientation:
/// let a_to_b = pass.create_bind_group(&device, &positions_a_view, &velocity_view);
/// let b_to_a = pass.create_bind_group(&device, &positions_b_view, &velocity_view);
///
/// // Each frame, inside a render pass targeting the write texture:
/// pass.render(&mut render_pass, &a_to_b);
/// ```
pub struct PositionIntegrationPipeline {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
}

impl PositionIntegrationPipeline {
    /// Create the pipeline for the given position-texture format
    ///
    /// `format` is both the format of the two input textures and of the
    /// render target the caller attaches; `Rgba32Float` keeps full
    /// precision across frames. Malformed texture setups surface through
    /// wgpu's own validation, not here.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Position Integration Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::builtin::POSITION_INTEGRATE.into()),
        });

        // Float32 data textures are not filterable on a baseline device;
        // sampling must stay non-filtering, exact texel fetch.
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Position Integration Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Position Integration Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Position Integration Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Float32 targets do not support blending; the pass
                    // overwrites every covered texel.
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Position Integration Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("Position integration pipeline created ({:?})", format);

        Self {
            pipeline,
            bind_group_layout,
            sampler,
        }
    }

    /// Bind a positions view and a velocity view for one draw
    ///
    /// Both views are caller-owned and may point at any textures of the
    /// pipeline's format; the caller typically keeps one bind group per
    /// ping-pong orientation and swaps between them each frame.
    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        positions_view: &wgpu::TextureView,
        velocity_view: &wgpu::TextureView,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Position Integration Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(velocity_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(positions_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    /// Draw the full-screen quad into the pass's current color attachment
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_group, &[]);
        render_pass.draw(0..4, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use crate::shaders;

    #[test]
    fn test_shader_entry_points_present() {
        assert!(shaders::builtin::POSITION_INTEGRATE.contains("vs_main"));
        assert!(shaders::builtin::POSITION_INTEGRATE.contains("fs_main"));
    }

    #[test]
    fn test_velocity_declared_before_positions() {
        // The bind-group entries above assume velocity = 0, positions = 1.
        let src = shaders::builtin::POSITION_INTEGRATE;
        let vel = src.find("var velocity").expect("velocity binding declared");
        let pos = src.find("var positions").expect("positions binding declared");
        assert!(vel < pos);
    }

    #[test]
    fn test_shader_has_no_uniform_buffers() {
        // The pass is parameterized entirely by its two textures.
        assert!(!shaders::builtin::POSITION_INTEGRATE.contains("var<uniform>"));
    }
}
