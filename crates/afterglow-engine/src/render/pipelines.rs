use std::collections::HashMap;

use crate::fx::{descriptor, BlendMode, EffectKind, FxConstants, PassShape};

/// Pipeline cache key: effect, geometry stage, blend, destination format.
type PipelineKey = (EffectKind, PassShape, BlendMode, wgpu::TextureFormat);

/// Copies of the per-frame constants are written into successive slots of a
/// fixed arena and bound with a dynamic offset, giving every draw its own
/// immutable snapshot. `Queue::write_buffer` ordering is not interleaved
/// with encoder commands, so re-writing one buffer per draw would make the
/// last write win for the whole frame.
pub const UNIFORM_STRIDE: u64 = 512;
pub const UNIFORM_SLOTS: u64 = 1024;

/// Shader catalog + lazily-built render pipelines.
///
/// One shader module holds every effect entry point; pipelines are created
/// on first use per (effect, shape, blend, format), the same way the shape
/// renderers build their pipelines on demand.
pub struct FxPipelines {
    module: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    pub point_sampler: wgpu::Sampler,
    pub linear_sampler: wgpu::Sampler,
    uniform_arena: wgpu::Buffer,
}

impl FxPipelines {
    pub fn new(device: &wgpu::Device) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("afterglow postfx shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/postfx.wgsl").into()),
        });

        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("afterglow postfx bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: Some(
                            std::num::NonZeroU64::new(std::mem::size_of::<FxConstants>() as u64)
                                .expect("FxConstants has non-zero size by construction"),
                        ),
                    },
                    count: None,
                },
                texture_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                texture_entry(4),
                texture_entry(5),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("afterglow postfx pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        // Point sampling for the source image; most effects must not blend
        // neighbouring texels. The linear sampler serves the pattern
        // textures (noise, burn, distortion).
        let point_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("afterglow point sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("afterglow linear sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let uniform_arena = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("afterglow constants arena"),
            size: UNIFORM_STRIDE * UNIFORM_SLOTS,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            module,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            point_sampler,
            linear_sampler,
            uniform_arena,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn uniform_arena(&self) -> &wgpu::Buffer {
        &self.uniform_arena
    }

    /// Builds the pipeline for `key` if it does not exist yet.
    pub fn ensure(&mut self, device: &wgpu::Device, key: PipelineKey) {
        if self.pipelines.contains_key(&key) {
            return;
        }
        let pipeline = self.build(device, key);
        self.pipelines.insert(key, pipeline);
    }

    pub fn get(&self, key: &PipelineKey) -> Option<&wgpu::RenderPipeline> {
        self.pipelines.get(key)
    }

    fn build(&self, device: &wgpu::Device, key: PipelineKey) -> wgpu::RenderPipeline {
        let (kind, shape, blend, format) = key;
        let desc = descriptor(kind);

        let vs_entry = match shape {
            PassShape::Quad => "vs_quad",
            PassShape::Polygon => "vs_polygon",
        };

        let blend_state = match blend {
            BlendMode::Opaque => None,
            BlendMode::Additive => Some(wgpu::BlendState {
                color: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
                alpha: wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                },
            }),
            BlendMode::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
        };

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("afterglow {} pipeline", desc.shader)),
            layout: Some(&self.pipeline_layout),

            vertex: wgpu::VertexState {
                module: &self.module,
                entry_point: Some(vs_entry),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &self.module,
                entry_point: Some(desc.shader),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: blend_state,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        })
    }
}
