//! The narrow draw interface between the scheduler and the GPU.
//!
//! The scheduler emits fully-resolved pass records; the backend binds views
//! and issues the fixed 4-vertex draw. A recording implementation of the
//! trait is the observable used by the scheduler tests.

use super::constants::FxConstants;
use super::ring::ImageRef;
use super::types::{BlendMode, EffectKind};

/// Geometry stage of a pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PassShape {
    /// Screen-space quad generated from the area scope fields.
    Quad,
    /// Quad generated from the four clip-space polygon points.
    Polygon,
}

/// Which pre-chain scene pass to render.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScenePhase {
    /// Lit colour render of the scene.
    Colour,
    /// Per-pixel normals + linear depth.
    NormalDepth,
    /// Mask render of the focused object only.
    ObjectMask,
}

/// One effect application, fully resolved by the scheduler.
///
/// `src` and `dst` never alias (ring invariant); the auxiliary reads carry
/// the *current* read sides so effects that sample normal/depth, the focus
/// mask or the bloom mask stay consistent with the chain's swaps.
#[derive(Debug, Copy, Clone)]
pub struct FxPass {
    pub kind: EffectKind,
    pub shape: PassShape,
    pub blend: BlendMode,
    pub src: ImageRef,
    pub dst: ImageRef,
    pub normal_depth: ImageRef,
    pub focus_mask: ImageRef,
    pub bloom_mask: ImageRef,
}

/// Draw sink the scheduler renders through.
///
/// Per-frame calls never fail; any backend-level problem is the backend's to
/// log and swallow, since nothing in the chain may abort a frame.
pub trait FxBackend {
    /// Renders one of the pre-chain scene passes into `dst`.
    fn render_scene(&mut self, phase: ScenePhase, dst: ImageRef, focused_object: usize);

    /// Applies one effect pass. `constants` is the shared record as it
    /// stands for this draw; the backend must treat it as an immutable
    /// per-draw snapshot.
    fn apply(&mut self, pass: &FxPass, constants: &FxConstants);
}
