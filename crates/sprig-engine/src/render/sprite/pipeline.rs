use super::{FrameUniforms, SpriteInstance, TextureConfig};

/// WGSL source for both sprite stages (`vs_main`, `fs_main`).
pub const SHADER_SOURCE: &str = include_str!("shader.wgsl");

/// Bind group index of the frame uniform.
pub const FRAME_GROUP: u32 = 0;
/// Bind group index of the sprite texture + sampler.
pub const TEXTURE_GROUP: u32 = 1;

/// Creates the group 0 layout: one vertex-visible uniform buffer, addressed
/// with a dynamic offset so each `render` call reads its own slot.
pub(super) fn frame_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("sprig sprite frame bgl"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: true,
                min_binding_size: Some(FrameUniforms::min_binding_size()),
            },
            count: None,
        }],
    })
}

/// Render pipeline for one color target format.
pub struct SpritePipeline {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
}

impl SpritePipeline {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
        texture_config: &TextureConfig,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprig sprite shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprig sprite pipeline layout"),
            bind_group_layouts: &[frame_layout, texture_config.bind_group_layout()],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sprig sprite pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                // The only buffer is per-instance; corners come from the vertex index.
                buffers: &[SpriteInstance::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: primitive_state(),

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("built sprite pipeline for {format:?}");

        Self { format, pipeline }
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    #[inline]
    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.pipeline
    }
}

/// Four strip vertices per instance fill the quad as triangles (0,1,2) and (2,1,3).
///
/// Culling stays off: a negative-determinant transform or camera mirrors the
/// winding, and mirrored sprites must still be drawn.
fn primitive_state() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleStrip,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: None,
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_topology_without_culling() {
        let p = primitive_state();
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleStrip);
        assert_eq!(p.cull_mode, None);
        assert_eq!(p.strip_index_format, None);
    }

    // ── shader validation (naga) ──────────────────────────────────────────

    fn parse() -> naga::Module {
        naga::front::wgsl::parse_str(SHADER_SOURCE).expect("sprite shader parses")
    }

    #[test]
    fn shader_validates() {
        let module = parse();
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::empty(),
        )
        .validate(&module)
        .expect("sprite shader validates");
    }

    #[test]
    fn shader_exposes_both_entry_points() {
        let module = parse();
        let mut names: Vec<(&str, naga::ShaderStage)> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        names.sort_by_key(|(name, _)| *name);
        assert_eq!(
            names,
            vec![("fs_main", naga::ShaderStage::Fragment), ("vs_main", naga::ShaderStage::Vertex)]
        );
    }

    #[test]
    fn frame_uniform_layout_matches_rust_struct() {
        let module = parse();
        let (_, var) = module
            .global_variables
            .iter()
            .find(|(_, v)| {
                v.binding
                    .as_ref()
                    .is_some_and(|b| b.group == FRAME_GROUP && b.binding == 0)
            })
            .expect("frame uniform is bound at group 0 binding 0");

        let naga::TypeInner::Struct { members, span } = &module.types[var.ty].inner else {
            panic!("frame uniform is not a struct");
        };
        assert_eq!(*span as usize, std::mem::size_of::<FrameUniforms>());

        let offsets: Vec<(Option<&str>, u32)> = members
            .iter()
            .map(|m| (m.name.as_deref(), m.offset))
            .collect();
        assert_eq!(offsets, vec![(Some("view_matrix"), 0), (Some("screen_resolution"), 24)]);
    }

    #[test]
    fn instance_inputs_match_vertex_layout() {
        let module = parse();
        let vs = module
            .entry_points
            .iter()
            .find(|ep| ep.name == "vs_main")
            .expect("vs_main exists");

        // The instance struct is the one argument without a builtin binding.
        let arg = vs
            .function
            .arguments
            .iter()
            .find(|a| a.binding.is_none())
            .expect("vs_main takes an instance struct");
        let naga::TypeInner::Struct { members, .. } = &module.types[arg.ty].inner else {
            panic!("instance argument is not a struct");
        };

        let shader: Vec<(u32, u32)> = members
            .iter()
            .map(|m| {
                let Some(naga::Binding::Location { location, .. }) = m.binding else {
                    panic!("instance member {:?} has no location", m.name);
                };
                let naga::TypeInner::Vector { size, scalar } = module.types[m.ty].inner else {
                    panic!("instance member {:?} is not a vector", m.name);
                };
                assert_eq!(scalar, naga::Scalar::F32);
                (location, size as u32)
            })
            .collect();

        let rust: Vec<(u32, u32)> = SpriteInstance::layout()
            .attributes
            .iter()
            .map(|a| {
                let components = match a.format {
                    wgpu::VertexFormat::Float32x3 => 3,
                    wgpu::VertexFormat::Float32x4 => 4,
                    other => panic!("unexpected instance format {other:?}"),
                };
                (a.shader_location, components)
            })
            .collect();

        assert_eq!(shader, rust);
        assert_eq!(shader, vec![(0, 3), (1, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn texture_bindings_live_in_group_one() {
        let module = parse();
        let bindings: Vec<u32> = module
            .global_variables
            .iter()
            .filter_map(|(_, v)| v.binding.as_ref())
            .filter(|b| b.group == TEXTURE_GROUP)
            .map(|b| b.binding)
            .collect();
        assert_eq!(bindings, vec![0, 1]);
    }
}
