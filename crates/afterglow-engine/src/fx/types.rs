use glam::{Mat4, Vec2, Vec3};

/// The fixed catalog of post-processing effects.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EffectKind {
    Copy,
    Tint,
    GreyNoise,
    Burn,
    Distort,
    Spiral,
    HeatHaze,
    Gradient,
    BlurX,
    BlurY,
    Underwater,
    DepthOfField,
    Retro,
    Bloom,
    Brightness,
    DirectionalBlur,
    HueShift,
    ChromaticAberration,
    Outline,
    Dilation,
    FrostedGlass,
    Selection,
}

pub const EFFECT_COUNT: usize = 22;

impl EffectKind {
    /// All catalog entries, in descriptor-table order.
    pub const ALL: [EffectKind; EFFECT_COUNT] = [
        EffectKind::Copy,
        EffectKind::Tint,
        EffectKind::GreyNoise,
        EffectKind::Burn,
        EffectKind::Distort,
        EffectKind::Spiral,
        EffectKind::HeatHaze,
        EffectKind::Gradient,
        EffectKind::BlurX,
        EffectKind::BlurY,
        EffectKind::Underwater,
        EffectKind::DepthOfField,
        EffectKind::Retro,
        EffectKind::Bloom,
        EffectKind::Brightness,
        EffectKind::DirectionalBlur,
        EffectKind::HueShift,
        EffectKind::ChromaticAberration,
        EffectKind::Outline,
        EffectKind::Dilation,
        EffectKind::FrostedGlass,
        EffectKind::Selection,
    ];

    /// Index into the descriptor table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Blend mode for one effect application, caller-specified per draw.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BlendMode {
    Opaque,
    Additive,
    Alpha,
}

/// Scope data for a polygon-scope effect: exactly four world-space points
/// plus the transform placing them in the scene.
///
/// Owned by the `Effect` that carries it and dropped with it.
#[derive(Debug, Clone)]
pub struct PolygonData {
    pub points: [Vec3; 4],
    pub transform: Mat4,
}

impl PolygonData {
    pub fn new(points: [Vec3; 4], transform: Mat4) -> Self {
        Self { points, transform }
    }
}

/// Spatial scope of an effect: the destination region it is allowed to write.
#[derive(Debug, Clone)]
pub enum EffectScope {
    /// Whole destination buffer.
    Fullscreen,
    /// World-anchored rectangle: projected through the active camera each
    /// frame; a no-op while the anchor sits behind the near clip plane.
    Area { anchor: Vec3, size: Vec2 },
    /// Arbitrary screen quad from four world-space points.
    Polygon(PolygonData),
}

/// One entry of the effect chain. Immutable once created; owned exclusively
/// by the list holding it and destroyed on removal or teardown.
#[derive(Debug, Clone)]
pub struct Effect {
    pub kind: EffectKind,
    pub scope: EffectScope,
}

impl Effect {
    pub fn fullscreen(kind: EffectKind) -> Self {
        Self {
            kind,
            scope: EffectScope::Fullscreen,
        }
    }

    pub fn area(kind: EffectKind, anchor: Vec3, size: Vec2) -> Self {
        Self {
            kind,
            scope: EffectScope::Area { anchor, size },
        }
    }

    pub fn polygon(kind: EffectKind, data: PolygonData) -> Self {
        Self {
            kind,
            scope: EffectScope::Polygon(data),
        }
    }
}
