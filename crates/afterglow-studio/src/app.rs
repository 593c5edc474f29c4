use afterglow_engine::camera::PerspectiveCamera;
use afterglow_engine::coords::Viewport;
use afterglow_engine::core::{App, AppControl, FrameCtx};
use afterglow_engine::fx::{Compositor, FrameInputs};
use afterglow_engine::input::Key;
use afterglow_engine::render::{FxPipelines, FxTargets, PatternTextures, WgpuFxBackend};
use glam::Vec3;

use crate::controls::{apply_list_edits, collect_controls};
use crate::scene::DemoScene;

/// GPU-side state that needs a device to build; created on the first frame
/// and resized with the window.
struct GpuResources {
    targets: FxTargets,
    pipelines: FxPipelines,
    patterns: PatternTextures,
}

pub struct StudioApp {
    compositor: Compositor,
    camera: PerspectiveCamera,
    scene: DemoScene,
    resources: Option<GpuResources>,

    lock_fps: bool,

    // Window-title frame statistics.
    stat_time: f32,
    stat_frames: u32,
}

impl StudioApp {
    pub fn new() -> Self {
        let scene = DemoScene::new();
        let mut compositor = Compositor::new(Viewport::new(1280.0, 720.0));
        scene.seed_effects(&mut compositor);

        let camera = PerspectiveCamera::new(
            Vec3::new(85.0, 40.0, -25.0),
            Vec3::new(20f32.to_radians(), -50f32.to_radians(), 0.0),
        );

        Self {
            compositor,
            camera,
            scene,
            resources: None,
            lock_fps: true,
            stat_time: 0.0,
            stat_frames: 0,
        }
    }

    fn update_title(&mut self, ctx: &FrameCtx<'_, '_>) {
        self.stat_time += ctx.time.dt;
        self.stat_frames += 1;
        if self.stat_time < 0.5 {
            return;
        }

        let avg = self.stat_time / self.stat_frames as f32;
        let fps = (1.0 / avg + 0.5) as u32;
        ctx.window.set_title(&format!(
            "Afterglow Studio - {:.2}ms, {} fps, {} effects",
            avg * 1000.0,
            fps,
            self.compositor.effects().persistent_len() + self.compositor.effects().transient_len(),
        ));
        self.stat_time = 0.0;
        self.stat_frames = 0;
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        let size = ctx.gpu.size();

        // First frame: build GPU resources. Later frames: follow resizes
        // (resize is a no-op while the size is unchanged).
        if self.resources.is_none() {
            let device = ctx.gpu.device();
            self.resources = Some(GpuResources {
                targets: FxTargets::new(device, size),
                pipelines: FxPipelines::new(device),
                patterns: PatternTextures::procedural(device, ctx.gpu.queue()),
            });
        }
        let Some(resources) = self.resources.as_mut() else {
            return AppControl::Continue;
        };
        resources.targets.resize(ctx.gpu.device(), size);

        let viewport = Viewport::new(size.width.max(1) as f32, size.height.max(1) as f32);
        self.compositor.set_viewport(viewport);
        self.camera.aspect = viewport.aspect();

        // Input: list edits, focus cycling, parameter nudges, fps lock.
        apply_list_edits(&mut self.compositor, ctx.input_frame, self.scene.object_count());
        if ctx.input_frame.pressed(Key::F8) {
            self.lock_fps = !self.lock_fps;
            let mode = if self.lock_fps {
                wgpu::PresentMode::Fifo
            } else {
                wgpu::PresentMode::Immediate
            };
            ctx.gpu.set_present_mode(mode);
        }

        let inputs = FrameInputs {
            dt: ctx.time.dt,
            controls: collect_controls(ctx.input, ctx.input_frame),
            focused_object_position: self
                .scene
                .object_position(self.compositor.focused_object()),
        };

        let compositor = &mut self.compositor;
        let camera = &self.camera;
        let scene = &mut self.scene;

        let control = ctx.render_frame(|device, queue, encoder, surface_view, surface_format| {
            let mut backend = WgpuFxBackend::new(
                device,
                queue,
                encoder,
                surface_view,
                surface_format,
                &resources.targets,
                &mut resources.pipelines,
                &resources.patterns,
                scene,
            );
            compositor.apply_frame(&inputs, camera, &mut backend);
        });

        if control == AppControl::Exit {
            return control;
        }

        self.update_title(ctx);
        AppControl::Continue
    }
}
