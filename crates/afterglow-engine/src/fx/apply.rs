//! Effect application primitive: one entry point per scope.
//!
//! Each call mutates the shared constants record's scope fields immediately
//! before handing the pass to the backend — callers must not interleave
//! unrelated draws between the two steps, which the applicator enforces by
//! doing both inside one method.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::coords::Viewport;

use super::backend::{FxBackend, FxPass, PassShape};
use super::constants::FxConstants;
use super::ring::ImageRef;
use super::scope::{area_bounds, polygon_clip_points};
use super::types::{BlendMode, EffectKind, PolygonData};

/// Current read views for effects that sample auxiliary images.
#[derive(Debug, Copy, Clone)]
pub struct AuxReads {
    pub normal_depth: ImageRef,
    pub focus_mask: ImageRef,
    pub bloom_mask: ImageRef,
}

/// Borrowed per-frame bundle implementing the three scope entry points.
pub struct EffectApplicator<'a> {
    pub constants: &'a mut FxConstants,
    pub viewport: Viewport,
    pub backend: &'a mut dyn FxBackend,
}

impl EffectApplicator<'_> {
    /// Writes the entire destination from the entire source.
    pub fn fullscreen(
        &mut self,
        kind: EffectKind,
        src: ImageRef,
        dst: ImageRef,
        aux: AuxReads,
        blend: BlendMode,
    ) {
        self.constants.set_fullscreen_scope();
        self.draw(kind, PassShape::Quad, blend, src, dst, aux);
    }

    /// Projects the world anchor to a screen rectangle and draws within it.
    ///
    /// Returns `false` (drawing nothing) when the anchor is behind the near
    /// clip plane.
    pub fn area(
        &mut self,
        kind: EffectKind,
        src: ImageRef,
        dst: ImageRef,
        aux: AuxReads,
        blend: BlendMode,
        camera: &dyn Camera,
        anchor: Vec3,
        world_size: Vec2,
    ) -> bool {
        let Some(bounds) = area_bounds(camera, self.viewport, anchor, world_size) else {
            return false;
        };

        self.constants.area_top_left = [bounds.rect.origin.x, bounds.rect.origin.y];
        self.constants.area_size = [bounds.rect.size.x, bounds.rect.size.y];
        self.constants.area_depth = bounds.depth;
        self.draw(kind, PassShape::Quad, blend, src, dst, aux);
        true
    }

    /// Transforms the four polygon points to clip space and draws the quad.
    pub fn polygon(
        &mut self,
        kind: EffectKind,
        src: ImageRef,
        dst: ImageRef,
        aux: AuxReads,
        blend: BlendMode,
        camera: &dyn Camera,
        data: &PolygonData,
    ) {
        self.constants.polygon_points = polygon_clip_points(camera.view_projection(), data);
        self.draw(kind, PassShape::Polygon, blend, src, dst, aux);
    }

    fn draw(
        &mut self,
        kind: EffectKind,
        shape: PassShape,
        blend: BlendMode,
        src: ImageRef,
        dst: ImageRef,
        aux: AuxReads,
    ) {
        debug_assert_ne!(src, dst, "a pass may not sample its own destination");

        let pass = FxPass {
            kind,
            shape,
            blend,
            src,
            dst,
            normal_depth: aux.normal_depth,
            focus_mask: aux.focus_mask,
            bloom_mask: aux.bloom_mask,
        };
        self.backend.apply(&pass, self.constants);
    }
}
