use crate::fx::{
    descriptor, AuxInput, FxBackend, FxConstants, FxPass, ImageRef, ScenePhase,
};

use super::pipelines::{FxPipelines, UNIFORM_SLOTS, UNIFORM_STRIDE};
use super::targets::FxTargets;
use super::textures::PatternTextures;

/// Scene-drawing collaborator: paints opaque geometry into the pre-chain
/// passes. Geometry, meshes and materials are entirely its concern; the
/// compositor only provides a cleared render pass per phase.
pub trait ScenePainter {
    fn paint(&mut self, phase: ScenePhase, rpass: &mut wgpu::RenderPass<'_>, focused_object: usize) {
        let _ = (phase, rpass, focused_object);
    }
}

/// A painter that leaves every pass at its clear colour.
pub struct EmptyScene;

impl ScenePainter for EmptyScene {}

/// wgpu implementation of the scheduler's draw interface, alive for one
/// frame (it borrows the frame's encoder and surface view).
pub struct WgpuFxBackend<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    encoder: &'a mut wgpu::CommandEncoder,
    surface_view: &'a wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
    targets: &'a FxTargets,
    pipelines: &'a mut FxPipelines,
    patterns: &'a PatternTextures,
    scene: &'a mut dyn ScenePainter,

    /// Next free slot in the constants arena.
    slot: u64,
    warned_out_of_slots: bool,
}

impl<'a> WgpuFxBackend<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        encoder: &'a mut wgpu::CommandEncoder,
        surface_view: &'a wgpu::TextureView,
        surface_format: wgpu::TextureFormat,
        targets: &'a FxTargets,
        pipelines: &'a mut FxPipelines,
        patterns: &'a PatternTextures,
        scene: &'a mut dyn ScenePainter,
    ) -> Self {
        Self {
            device,
            queue,
            encoder,
            surface_view,
            surface_format,
            targets,
            pipelines,
            patterns,
            scene,
            slot: 0,
            warned_out_of_slots: false,
        }
    }

    // Returned views carry the frame lifetime `'a`, not the `&self` borrow,
    // so they stay usable across later mutations of the backend.
    fn resolve(&self, image: ImageRef) -> Option<(&'a wgpu::TextureView, wgpu::TextureFormat)> {
        let targets: &'a FxTargets = self.targets;
        match image {
            ImageRef::Surface => Some((self.surface_view, self.surface_format)),
            ImageRef::Target(pair, side) => {
                targets.view(pair, side).map(|v| (v, FxTargets::FORMAT))
            }
        }
    }

    /// View for one auxiliary input of the current pass.
    fn aux_view(&self, pass: &FxPass, input: AuxInput) -> Option<&'a wgpu::TextureView> {
        let patterns: &'a PatternTextures = self.patterns;
        match input {
            AuxInput::NormalDepth => self.resolve(pass.normal_depth).map(|(v, _)| v),
            AuxInput::FocusMask => self.resolve(pass.focus_mask).map(|(v, _)| v),
            AuxInput::BloomMask => self.resolve(pass.bloom_mask).map(|(v, _)| v),
            AuxInput::Noise => Some(&patterns.noise.view),
            AuxInput::Burn => Some(&patterns.burn.view),
            AuxInput::Distort => Some(&patterns.distort.view),
            AuxInput::FineNoise => Some(&patterns.fine_noise.view),
        }
    }
}

impl FxBackend for WgpuFxBackend<'_> {
    fn render_scene(&mut self, phase: ScenePhase, dst: ImageRef, focused_object: usize) {
        let Some((view, _)) = self.resolve(dst) else {
            log::warn!("scene pass {phase:?} targets a destroyed pair");
            return;
        };

        let clear = match phase {
            ScenePhase::Colour => wgpu::Color {
                r: 0.3,
                g: 0.3,
                b: 0.4,
                a: 1.0,
            },
            ScenePhase::NormalDepth => wgpu::Color {
                r: 0.3,
                g: 0.3,
                b: 0.4,
                a: 0.0,
            },
            ScenePhase::ObjectMask => wgpu::Color::TRANSPARENT,
        };

        let mut rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("afterglow scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        self.scene.paint(phase, &mut rpass, focused_object);
    }

    fn apply(&mut self, pass: &FxPass, constants: &FxConstants) {
        if self.slot >= UNIFORM_SLOTS {
            if !self.warned_out_of_slots {
                log::warn!("constants arena exhausted; dropping remaining passes this frame");
                self.warned_out_of_slots = true;
            }
            return;
        }

        let Some((src_view, _)) = self.resolve(pass.src) else {
            log::warn!("pass {:?} reads a destroyed pair", pass.kind);
            return;
        };
        let Some((dst_view, dst_format)) = self.resolve(pass.dst) else {
            log::warn!("pass {:?} writes a destroyed pair", pass.kind);
            return;
        };

        // Per-draw constants snapshot into the arena slot.
        let offset = self.slot * UNIFORM_STRIDE;
        self.slot += 1;
        self.queue.write_buffer(
            self.pipelines.uniform_arena(),
            offset,
            bytemuck::bytes_of(constants),
        );

        // Auxiliary bindings per the registry; unused slots fall back to
        // the white texture so one bind group layout serves every effect.
        let desc = descriptor(pass.kind);
        let aux_a = desc
            .aux
            .first()
            .and_then(|input| self.aux_view(pass, *input))
            .unwrap_or(&self.patterns.white.view);
        let aux_b = desc
            .aux
            .get(1)
            .and_then(|input| self.aux_view(pass, *input))
            .unwrap_or(&self.patterns.white.view);

        let key = (pass.kind, pass.shape, pass.blend, dst_format);
        self.pipelines.ensure(self.device, key);
        let Some(pipeline) = self.pipelines.get(&key) else {
            return;
        };

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("afterglow postfx bind group"),
            layout: self.pipelines.bind_group_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: self.pipelines.uniform_arena(),
                        offset: 0,
                        size: Some(
                            std::num::NonZeroU64::new(std::mem::size_of::<FxConstants>() as u64)
                                .expect("FxConstants has non-zero size by construction"),
                        ),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(src_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.pipelines.point_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&self.pipelines.linear_sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::TextureView(aux_a),
                },
                wgpu::BindGroupEntry {
                    binding: 5,
                    resource: wgpu::BindingResource::TextureView(aux_b),
                },
            ],
        });

        let mut rpass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("afterglow effect pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: dst_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    // Sub-region scopes rely on the rest of the destination
                    // surviving the pass.
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[offset as u32]);
        rpass.draw(0..4, 0..1);
    }
}
