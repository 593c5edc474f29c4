//! Pipeline scheduler: the per-frame state machine.
//!
//! `MainRender → NormalDepthPass → FocusedObjectPass → EffectChain →
//! FinalComposite → Present`. The scheduler owns the effect lists, the
//! target ring and the parameter state, walks the chain once per frame, and
//! keeps the auxiliary pairs spatially aligned with the colour buffer across
//! distorting effects.

use glam::Vec3;

use crate::camera::Camera;
use crate::coords::Viewport;

use super::apply::{AuxReads, EffectApplicator};
use super::backend::{FxBackend, ScenePhase};
use super::constants::FxConstants;
use super::list::EffectLists;
use super::params::{FxControls, ParamEnv, ParamState};
use super::registry::descriptor;
use super::ring::{pairs, ImageRef, PairId, Side, TargetRing};
use super::scope::area_bounds;
use super::types::{BlendMode, Effect, EffectKind, EffectScope};

/// Everything the compositor consumes for one frame besides the camera.
#[derive(Debug, Copy, Clone)]
pub struct FrameInputs {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Input queries for this frame.
    pub controls: FxControls,
    /// World position of the focused object, when the scene has one. Ignored
    /// while no object is focused.
    pub focused_object_position: Option<Vec3>,
}

/// The post-processing compositor.
///
/// Owns all chain state; draws are issued through the [`FxBackend`] handed
/// to [`apply_frame`]. List mutations requested between frames take effect
/// at the next `apply_frame` — nothing re-enters a frame in flight.
pub struct Compositor {
    lists: EffectLists,
    ring: TargetRing,
    params: ParamState,
    constants: FxConstants,
    viewport: Viewport,
    focused_object: usize,
}

impl Compositor {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            lists: EffectLists::new(),
            ring: TargetRing::new(pairs::COUNT),
            params: ParamState::new(),
            constants: FxConstants::default(),
            viewport,
            focused_object: 0,
        }
    }

    /// Updates the pixel basis after a resize. The backend recreates its
    /// targets separately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Appends an effect to the transient list.
    pub fn push_effect(&mut self, effect: Effect) {
        self.lists.push(effect);
    }

    /// Appends an effect to the persistent list (scene setup).
    pub fn push_persistent_effect(&mut self, effect: Effect) {
        self.lists.push_persistent(effect);
    }

    /// Removes the most recently pushed transient effect. No-op when the
    /// transient list is empty.
    pub fn pop_last_effect(&mut self) {
        self.lists.pop_last();
    }

    /// Clears the transient list.
    pub fn clear_effects(&mut self) {
        self.lists.clear();
    }

    pub fn effects(&self) -> &EffectLists {
        &self.lists
    }

    /// Selects the focused object; 0 means none. Takes effect within the
    /// same frame it is set.
    pub fn set_focused_object(&mut self, index: usize) {
        self.focused_object = index;
    }

    pub fn focused_object(&self) -> usize {
        self.focused_object
    }

    pub fn params(&self) -> &ParamState {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamState {
        &mut self.params
    }

    /// Runs one full frame: advances parameters, renders the scene passes,
    /// walks the effect chain and composites to the presentation target.
    ///
    /// No per-frame condition aborts the frame; precondition failures skip
    /// the specific effect and are logged at debug level only.
    pub fn apply_frame(
        &mut self,
        inputs: &FrameInputs,
        camera: &dyn Camera,
        backend: &mut dyn FxBackend,
    ) {
        // Nudging the focal plane manually releases the focused object.
        if inputs.controls.focal_back || inputs.controls.focal_forward {
            self.focused_object = 0;
        }
        let focused = self.focused_object > 0;

        let focused_depth = if focused {
            inputs.focused_object_position.map(|p| {
                let clip = camera.view_projection() * p.extend(1.0);
                clip.z / camera.far_clip()
            })
        } else {
            None
        };

        let env = ParamEnv {
            viewport: self.viewport,
            camera_height: camera.position().y,
            focused_depth,
        };
        self.params
            .advance(inputs.dt, &inputs.controls, &env, &mut self.constants);

        // ── scene passes ─────────────────────────────────────────────────
        self.ring.reset();

        backend.render_scene(ScenePhase::Colour, self.ring.write(pairs::SCENE), self.focused_object);
        self.ring.swap(pairs::SCENE);

        backend.render_scene(
            ScenePhase::NormalDepth,
            self.ring.write(pairs::NORMAL_DEPTH),
            self.focused_object,
        );
        self.ring.swap(pairs::NORMAL_DEPTH);

        if focused {
            backend.render_scene(
                ScenePhase::ObjectMask,
                self.ring.write(pairs::FOCUS_MASK),
                self.focused_object,
            );
            self.ring.swap(pairs::FOCUS_MASK);
        }

        let mut ap = EffectApplicator {
            constants: &mut self.constants,
            viewport: self.viewport,
            backend,
        };

        // ── priming copies ───────────────────────────────────────────────
        // Populate the second buffer of each pair so sub-region scopes
        // compose over valid data instead of stale frames.
        ap.constants.copy_alpha = 1.0;
        let aux = aux_reads(&self.ring);
        copy_within(&mut ap, &self.ring, pairs::SCENE, aux);
        copy_within(&mut ap, &self.ring, pairs::NORMAL_DEPTH, aux);
        if focused {
            copy_within(&mut ap, &self.ring, pairs::FOCUS_MASK, aux);
        }

        // ── effect chain ─────────────────────────────────────────────────
        for effect in self.lists.iter_ordered() {
            let desc = descriptor(effect.kind);

            if desc.requires_focus && self.focused_object == 0 {
                log::debug!("skipping {:?}: no focused object", effect.kind);
                continue;
            }

            // An area anchor behind the near clip plane skips the whole
            // application, including the bloom sub-pipeline.
            if let EffectScope::Area { anchor, size } = &effect.scope {
                if area_bounds(camera, self.viewport, *anchor, *size).is_none() {
                    log::debug!("skipping {:?}: area anchor behind camera", effect.kind);
                    continue;
                }
            }

            if effect.kind == EffectKind::Bloom {
                render_bloom_mask(&mut ap, &self.ring, &self.params);
            }

            // Apply to the colour pair and swap so the output feeds the
            // next effect.
            let aux = aux_reads(&self.ring);
            let (src, dst) = self.ring.acquire(pairs::SCENE);
            if !apply_scoped(&mut ap, effect, src, dst, aux, camera) {
                log::debug!("skipping {:?}: empty scope", effect.kind);
                continue;
            }
            self.ring.swap(pairs::SCENE);

            let sub_region = matches!(
                effect.scope,
                EffectScope::Area { .. } | EffectScope::Polygon(_)
            );
            if sub_region {
                // Sub-region scopes leave the rest of the destination
                // stale; an identity copy fills it from the fresh source.
                copy_within(&mut ap, &self.ring, pairs::SCENE, aux);
            }

            // Distorting effects displace pixel positions, so the same
            // displacement must hit the auxiliary buffers or any later
            // effect sampling them reads misaligned data.
            if desc.distorts {
                let aux = aux_reads(&self.ring);
                let (src, dst) = self.ring.acquire(pairs::NORMAL_DEPTH);
                apply_scoped(&mut ap, effect, src, dst, aux, camera);
                self.ring.swap(pairs::NORMAL_DEPTH);

                if focused {
                    let (src, dst) = self.ring.acquire(pairs::FOCUS_MASK);
                    apply_scoped(&mut ap, effect, src, dst, aux, camera);
                    self.ring.swap(pairs::FOCUS_MASK);
                }

                if sub_region {
                    copy_within(&mut ap, &self.ring, pairs::NORMAL_DEPTH, aux);
                    if focused {
                        copy_within(&mut ap, &self.ring, pairs::FOCUS_MASK, aux);
                    }
                }
            }
        }

        // ── final composite ──────────────────────────────────────────────
        // Alpha-blending against the previous presentation content gives
        // the motion-blur accumulation when the fade alpha is below 1.
        ap.constants.copy_alpha = self.params.copy_alpha;
        let blend = if self.params.copy_alpha < 1.0 {
            BlendMode::Alpha
        } else {
            BlendMode::Opaque
        };
        let aux = aux_reads(&self.ring);
        ap.fullscreen(
            EffectKind::Copy,
            self.ring.read(pairs::SCENE),
            ImageRef::Surface,
            aux,
            blend,
        );
    }
}

/// Current auxiliary read views. The bloom mask always lives on side B of
/// the scratch pair (the sub-pipeline's final destination).
fn aux_reads(ring: &TargetRing) -> AuxReads {
    AuxReads {
        normal_depth: ring.read(pairs::NORMAL_DEPTH),
        focus_mask: ring.read(pairs::FOCUS_MASK),
        bloom_mask: ring.read(pairs::SCRATCH),
    }
}

/// Fullscreen identity copy read → write within a pair, without swapping.
fn copy_within(ap: &mut EffectApplicator<'_>, ring: &TargetRing, pair: PairId, aux: AuxReads) {
    let (src, dst) = ring.acquire(pair);
    ap.fullscreen(EffectKind::Copy, src, dst, aux, BlendMode::Opaque);
}

/// Applies `effect` with its own scope. Returns false when nothing was
/// drawn (area anchor behind the camera).
fn apply_scoped(
    ap: &mut EffectApplicator<'_>,
    effect: &Effect,
    src: ImageRef,
    dst: ImageRef,
    aux: AuxReads,
    camera: &dyn Camera,
) -> bool {
    match &effect.scope {
        EffectScope::Fullscreen => {
            ap.fullscreen(effect.kind, src, dst, aux, BlendMode::Opaque);
            true
        }
        EffectScope::Area { anchor, size } => ap.area(
            effect.kind,
            src,
            dst,
            aux,
            BlendMode::Alpha,
            camera,
            *anchor,
            *size,
        ),
        EffectScope::Polygon(data) => {
            ap.polygon(effect.kind, src, dst, aux, BlendMode::Opaque, camera, data);
            true
        }
    }
}

/// Bloom sub-pipeline: brightness threshold, vertical blur, horizontal
/// blur, then N additive directional blurs fanned over half a turn. The
/// resulting mask (scratch side B) is consumed by the Bloom draw that
/// follows this call only.
///
/// The dance addresses both scratch sides directly: the directional passes
/// re-read the vertically-blurred image while accumulating onto the fully
/// blurred base, which plain ping-pong swaps cannot express.
fn render_bloom_mask(ap: &mut EffectApplicator<'_>, ring: &TargetRing, params: &ParamState) {
    let a = ImageRef::Target(pairs::SCRATCH, Side::A);
    let b = ImageRef::Target(pairs::SCRATCH, Side::B);
    let src = ring.read(pairs::SCENE);
    let aux = aux_reads(ring);

    ap.fullscreen(EffectKind::Brightness, src, b, aux, BlendMode::Opaque);
    ap.fullscreen(EffectKind::BlurY, b, a, aux, BlendMode::Opaque);
    ap.fullscreen(EffectKind::BlurX, a, b, aux, BlendMode::Opaque);

    let n = params.diagonal_blurs;
    for j in 0..n {
        let offset = j as f32 * (std::f32::consts::PI / n as f32);
        let (x, y) = params.directional_blur_direction(offset);
        ap.constants.directional_blur_x = x;
        ap.constants.directional_blur_y = y;
        ap.fullscreen(EffectKind::DirectionalBlur, a, b, aux, BlendMode::Additive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PerspectiveCamera;
    use crate::fx::backend::{FxPass, PassShape};
    use crate::fx::types::PolygonData;
    use glam::{Mat4, Vec2};

    // ── recording backend ─────────────────────────────────────────────────

    #[derive(Debug, Clone)]
    enum Event {
        Scene {
            phase: ScenePhase,
            dst: ImageRef,
        },
        Pass {
            kind: EffectKind,
            shape: PassShape,
            blend: BlendMode,
            src: ImageRef,
            dst: ImageRef,
            constants: FxConstants,
        },
    }

    #[derive(Default)]
    struct RecordingBackend {
        events: Vec<Event>,
    }

    impl FxBackend for RecordingBackend {
        fn render_scene(&mut self, phase: ScenePhase, dst: ImageRef, _focused_object: usize) {
            self.events.push(Event::Scene { phase, dst });
        }

        fn apply(&mut self, pass: &FxPass, constants: &FxConstants) {
            assert_ne!(pass.src, pass.dst, "pass reads its own destination");
            self.events.push(Event::Pass {
                kind: pass.kind,
                shape: pass.shape,
                blend: pass.blend,
                src: pass.src,
                dst: pass.dst,
                constants: *constants,
            });
        }
    }

    impl RecordingBackend {
        /// Effect draws on the scene pair plus the final composite, minus
        /// the identity copies — i.e. the externally observable chain.
        fn chain_kinds(&self) -> Vec<EffectKind> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Pass { kind, dst, .. }
                        if *kind != EffectKind::Copy
                            && dst.pair() == Some(pairs::SCENE) =>
                    {
                        Some(*kind)
                    }
                    _ => None,
                })
                .collect()
        }

        fn passes_on(&self, pair: PairId) -> Vec<EffectKind> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Pass { kind, dst, .. } if dst.pair() == Some(pair) => Some(*kind),
                    _ => None,
                })
                .collect()
        }

        fn final_composite(&self) -> (EffectKind, BlendMode, ImageRef, FxConstants) {
            match self.events.last() {
                Some(Event::Pass {
                    kind,
                    blend,
                    src,
                    dst,
                    constants,
                    ..
                }) => {
                    assert_eq!(*dst, ImageRef::Surface);
                    (*kind, *blend, *src, *constants)
                }
                other => panic!("expected a final composite pass, got {other:?}"),
            }
        }
    }

    // ── fixtures ──────────────────────────────────────────────────────────

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y: std::f32::consts::FRAC_PI_2,
            aspect: VIEWPORT.width / VIEWPORT.height,
            near: 1.0,
            far: 100.0,
        }
    }

    fn inputs() -> FrameInputs {
        FrameInputs {
            dt: 0.016,
            controls: FxControls::default(),
            focused_object_position: None,
        }
    }

    fn run_frame(compositor: &mut Compositor) -> RecordingBackend {
        let mut backend = RecordingBackend::default();
        compositor.apply_frame(&inputs(), &camera(), &mut backend);
        backend
    }

    fn quad() -> PolygonData {
        PolygonData::new(
            [
                Vec3::new(-5.0, 5.0, 10.0),
                Vec3::new(-5.0, -5.0, 10.0),
                Vec3::new(5.0, 5.0, 10.0),
                Vec3::new(5.0, -5.0, 10.0),
            ],
            Mat4::IDENTITY,
        )
    }

    // ── properties ────────────────────────────────────────────────────────

    #[test]
    fn empty_chain_is_an_identity_copy_to_the_surface() {
        let mut compositor = Compositor::new(VIEWPORT);
        let backend = run_frame(&mut compositor);

        assert!(backend.chain_kinds().is_empty());

        let (kind, blend, src, constants) = backend.final_composite();
        assert_eq!(kind, EffectKind::Copy);
        assert_eq!(blend, BlendMode::Opaque);
        assert_eq!(src, ImageRef::Target(pairs::SCENE, Side::A));
        assert_eq!(constants.area_top_left, [0.0, 0.0]);
        assert_eq!(constants.area_size, [1.0, 1.0]);
    }

    #[test]
    fn unfocused_frame_renders_no_mask_pass() {
        let mut compositor = Compositor::new(VIEWPORT);
        let backend = run_frame(&mut compositor);

        let scene_phases: Vec<ScenePhase> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Scene { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(scene_phases, vec![ScenePhase::Colour, ScenePhase::NormalDepth]);
    }

    #[test]
    fn effects_apply_in_insertion_order() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::Tint));
        compositor.push_effect(Effect::fullscreen(EffectKind::BlurX));
        compositor.push_effect(Effect::fullscreen(EffectKind::Gradient));

        let backend = run_frame(&mut compositor);
        assert_eq!(
            backend.chain_kinds(),
            vec![EffectKind::Tint, EffectKind::BlurX, EffectKind::Gradient]
        );
    }

    #[test]
    fn persistent_effects_apply_before_transient_ones() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::Gradient));
        compositor.push_persistent_effect(Effect::polygon(EffectKind::HueShift, quad()));

        let backend = run_frame(&mut compositor);
        assert_eq!(
            backend.chain_kinds(),
            vec![EffectKind::HueShift, EffectKind::Gradient]
        );
    }

    #[test]
    fn chain_ping_pongs_between_the_scene_buffers() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::Tint));
        compositor.push_effect(Effect::fullscreen(EffectKind::Gradient));

        let backend = run_frame(&mut compositor);
        let chain: Vec<(ImageRef, ImageRef)> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Pass {
                    kind, src, dst, ..
                } if *kind != EffectKind::Copy => Some((*src, *dst)),
                _ => None,
            })
            .collect();

        assert_eq!(
            chain,
            vec![
                (
                    ImageRef::Target(pairs::SCENE, Side::A),
                    ImageRef::Target(pairs::SCENE, Side::B)
                ),
                (
                    ImageRef::Target(pairs::SCENE, Side::B),
                    ImageRef::Target(pairs::SCENE, Side::A)
                ),
            ]
        );

        // Two effects: the composite reads the side the last one wrote.
        let (_, _, src, _) = backend.final_composite();
        assert_eq!(src, ImageRef::Target(pairs::SCENE, Side::A));
    }

    #[test]
    fn distorting_effect_is_mirrored_onto_the_normal_depth_pair() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::BlurX));
        compositor.push_effect(Effect::fullscreen(EffectKind::BlurY));

        let backend = run_frame(&mut compositor);

        let nd = backend.passes_on(pairs::NORMAL_DEPTH);
        // Priming copy, then the two mirrored blur passes.
        assert_eq!(
            nd,
            vec![EffectKind::Copy, EffectKind::BlurX, EffectKind::BlurY]
        );
    }

    #[test]
    fn non_distorting_effect_leaves_auxiliary_pairs_untouched() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::Gradient));

        let backend = run_frame(&mut compositor);
        // Only the priming copy targets the normal/depth pair.
        assert_eq!(backend.passes_on(pairs::NORMAL_DEPTH), vec![EffectKind::Copy]);
        assert!(backend.passes_on(pairs::FOCUS_MASK).is_empty());
    }

    #[test]
    fn auxiliary_swaps_track_the_colour_swaps() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::BlurX));
        compositor.push_effect(Effect::fullscreen(EffectKind::BlurY));

        let backend = run_frame(&mut compositor);
        let nd_targets: Vec<ImageRef> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Pass { kind, dst, .. }
                    if *kind != EffectKind::Copy && dst.pair() == Some(pairs::NORMAL_DEPTH) =>
                {
                    Some(*dst)
                }
                _ => None,
            })
            .collect();

        assert_eq!(
            nd_targets,
            vec![
                ImageRef::Target(pairs::NORMAL_DEPTH, Side::B),
                ImageRef::Target(pairs::NORMAL_DEPTH, Side::A),
            ]
        );
    }

    #[test]
    fn behind_camera_area_effect_draws_nothing_and_keeps_the_chain_stable() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::area(
            EffectKind::HueShift,
            Vec3::new(0.0, 0.0, -10.0),
            Vec2::splat(10.0),
        ));
        compositor.push_effect(Effect::fullscreen(EffectKind::Tint));

        let backend = run_frame(&mut compositor);

        // The skipped effect never reaches the backend, and no swap happened
        // for it: the Tint still reads side A.
        assert_eq!(backend.chain_kinds(), vec![EffectKind::Tint]);
        let tint = backend
            .events
            .iter()
            .find_map(|e| match e {
                Event::Pass { kind, src, .. } if *kind == EffectKind::Tint => Some(*src),
                _ => None,
            })
            .unwrap();
        assert_eq!(tint, ImageRef::Target(pairs::SCENE, Side::A));
    }

    #[test]
    fn area_effect_in_front_is_followed_by_a_fixup_copy() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::area(
            EffectKind::HueShift,
            Vec3::new(0.0, 0.0, 20.0),
            Vec2::splat(10.0),
        ));

        let backend = run_frame(&mut compositor);
        let scene = backend.passes_on(pairs::SCENE);
        // Priming copy, the area effect, then the fix-up copy.
        assert_eq!(
            scene,
            vec![EffectKind::Copy, EffectKind::HueShift, EffectKind::Copy]
        );

        // The area draw carries a sub-region scope and alpha blending.
        let (blend, constants) = backend
            .events
            .iter()
            .find_map(|e| match e {
                Event::Pass {
                    kind,
                    blend,
                    constants,
                    ..
                } if *kind == EffectKind::HueShift => Some((*blend, *constants)),
                _ => None,
            })
            .unwrap();
        assert_eq!(blend, BlendMode::Alpha);
        assert!(constants.area_size[0] < 1.0);
        assert!(constants.area_size[1] < 1.0);
    }

    #[test]
    fn polygon_distorting_effect_fixes_up_auxiliary_pairs_too() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_persistent_effect(Effect::polygon(EffectKind::FrostedGlass, quad()));

        let backend = run_frame(&mut compositor);
        assert_eq!(
            backend.passes_on(pairs::NORMAL_DEPTH),
            vec![
                EffectKind::Copy,         // priming
                EffectKind::FrostedGlass, // mirrored distortion
                EffectKind::Copy,         // fix-up after the sub-region draw
            ]
        );
    }

    #[test]
    fn bloom_runs_its_sub_pipeline_before_the_bloom_draw() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.params_mut().diagonal_blurs = 2;
        compositor.push_effect(Effect::fullscreen(EffectKind::Bloom));

        let backend = run_frame(&mut compositor);

        assert_eq!(
            backend.passes_on(pairs::SCRATCH),
            vec![
                EffectKind::Brightness,
                EffectKind::BlurY,
                EffectKind::BlurX,
                EffectKind::DirectionalBlur,
                EffectKind::DirectionalBlur,
            ]
        );

        // The additive passes fan their direction across half a turn.
        let dirs: Vec<[f32; 2]> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Pass {
                    kind, constants, ..
                } if *kind == EffectKind::DirectionalBlur => {
                    Some([constants.directional_blur_x, constants.directional_blur_y])
                }
                _ => None,
            })
            .collect();
        assert_eq!(dirs.len(), 2);
        assert_ne!(dirs[0], dirs[1]);

        // All additive, onto the mask side.
        let blends: Vec<BlendMode> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Pass { kind, blend, .. } if *kind == EffectKind::DirectionalBlur => {
                    Some(*blend)
                }
                _ => None,
            })
            .collect();
        assert_eq!(blends, vec![BlendMode::Additive, BlendMode::Additive]);
    }

    #[test]
    fn bloom_with_zero_directional_passes_is_just_the_three_base_passes() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.params_mut().diagonal_blurs = 0;
        compositor.push_effect(Effect::fullscreen(EffectKind::Bloom));

        let backend = run_frame(&mut compositor);
        assert_eq!(
            backend.passes_on(pairs::SCRATCH),
            vec![EffectKind::Brightness, EffectKind::BlurY, EffectKind::BlurX]
        );
    }

    #[test]
    fn selection_is_skipped_without_a_focused_object() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.push_effect(Effect::fullscreen(EffectKind::Selection));

        let backend = run_frame(&mut compositor);
        assert!(backend.chain_kinds().is_empty());
    }

    #[test]
    fn focused_object_enables_mask_pass_and_selection() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.set_focused_object(3);
        compositor.push_effect(Effect::fullscreen(EffectKind::Selection));

        let mut backend = RecordingBackend::default();
        let inputs = FrameInputs {
            focused_object_position: Some(Vec3::new(0.0, 0.0, 25.0)),
            ..inputs()
        };
        compositor.apply_frame(&inputs, &camera(), &mut backend);

        let phases: Vec<ScenePhase> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Scene { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert!(phases.contains(&ScenePhase::ObjectMask));
        assert_eq!(backend.chain_kinds(), vec![EffectKind::Selection]);
    }

    #[test]
    fn clearing_focus_disables_gated_effects_in_the_same_frame() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.set_focused_object(2);
        compositor.push_effect(Effect::fullscreen(EffectKind::Selection));
        compositor.set_focused_object(0);

        let backend = run_frame(&mut compositor);
        assert!(backend.chain_kinds().is_empty());
        let phases: Vec<ScenePhase> = backend
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Scene { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert!(!phases.contains(&ScenePhase::ObjectMask));
    }

    #[test]
    fn motion_blur_alpha_blends_the_final_composite() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.params_mut().copy_alpha = 0.5;

        let backend = run_frame(&mut compositor);
        let (kind, blend, _, constants) = backend.final_composite();
        assert_eq!(kind, EffectKind::Copy);
        assert_eq!(blend, BlendMode::Alpha);
        assert!((constants.copy_alpha - 0.5).abs() < 1e-6);
    }

    #[test]
    fn chain_copies_run_opaque_at_full_alpha() {
        let mut compositor = Compositor::new(VIEWPORT);
        compositor.params_mut().copy_alpha = 0.5;
        compositor.push_effect(Effect::area(
            EffectKind::HueShift,
            Vec3::new(0.0, 0.0, 20.0),
            Vec2::splat(10.0),
        ));

        let backend = run_frame(&mut compositor);
        // Every in-chain copy stays opaque with alpha pinned to 1; only the
        // composite carries the motion-blur alpha.
        for (i, e) in backend.events.iter().enumerate() {
            if let Event::Pass {
                kind: EffectKind::Copy,
                dst,
                blend,
                constants,
                ..
            } = e
            {
                if *dst != ImageRef::Surface {
                    assert_eq!(*blend, BlendMode::Opaque, "event {i}");
                    assert_eq!(constants.copy_alpha, 1.0, "event {i}");
                }
            }
        }
    }
}
