use super::types::{EffectKind, EFFECT_COUNT};

/// Auxiliary texture inputs an effect samples besides the main source image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AuxInput {
    /// Current read side of the normal/depth pair.
    NormalDepth,
    /// Current read side of the focused-object mask pair.
    FocusMask,
    /// The bloom-mask image produced by the bloom sub-pipeline this call.
    BloomMask,
    /// Static noise pattern texture.
    Noise,
    /// Static burn height-map texture.
    Burn,
    /// Static UV-distortion vector texture.
    Distort,
    /// Static fine noise texture (frosted glass).
    FineNoise,
}

/// Static description of one catalog effect: the fragment entry point that
/// implements it, the auxiliary textures it reads, and its pipeline-relevant
/// properties.
#[derive(Debug)]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    /// Fragment shader entry point in the post-processing WGSL module.
    pub shader: &'static str,
    pub aux: &'static [AuxInput],
    /// True for effects that displace pixel positions; the scheduler mirrors
    /// these onto the auxiliary pairs to keep them spatially aligned.
    pub distorts: bool,
    /// True for effects that are skipped while no object is focused.
    pub requires_focus: bool,
}

/// Descriptor table, indexed by `EffectKind::index()`.
static CATALOG: [EffectDescriptor; EFFECT_COUNT] = [
    EffectDescriptor {
        kind: EffectKind::Copy,
        shader: "fs_copy",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Tint,
        shader: "fs_tint",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::GreyNoise,
        shader: "fs_grey_noise",
        aux: &[AuxInput::Noise],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Burn,
        shader: "fs_burn",
        aux: &[AuxInput::Burn],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Distort,
        shader: "fs_distort",
        aux: &[AuxInput::Distort],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Spiral,
        shader: "fs_spiral",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::HeatHaze,
        shader: "fs_heat_haze",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Gradient,
        shader: "fs_gradient",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::BlurX,
        shader: "fs_blur_x",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::BlurY,
        shader: "fs_blur_y",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Underwater,
        shader: "fs_underwater",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::DepthOfField,
        shader: "fs_depth_of_field",
        aux: &[AuxInput::NormalDepth],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Retro,
        shader: "fs_retro",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Bloom,
        shader: "fs_bloom",
        aux: &[AuxInput::BloomMask],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Brightness,
        shader: "fs_brightness",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::DirectionalBlur,
        shader: "fs_directional_blur",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::HueShift,
        shader: "fs_hue_shift",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::ChromaticAberration,
        shader: "fs_chromatic_aberration",
        aux: &[],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Outline,
        shader: "fs_outline",
        aux: &[AuxInput::NormalDepth],
        distorts: false,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Dilation,
        shader: "fs_dilation",
        aux: &[],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::FrostedGlass,
        shader: "fs_frosted_glass",
        aux: &[AuxInput::FineNoise],
        distorts: true,
        requires_focus: false,
    },
    EffectDescriptor {
        kind: EffectKind::Selection,
        shader: "fs_selection",
        aux: &[AuxInput::NormalDepth, AuxInput::FocusMask],
        distorts: false,
        requires_focus: true,
    },
];

/// O(1) descriptor lookup for an effect kind.
#[inline]
pub fn descriptor(kind: EffectKind) -> &'static EffectDescriptor {
    &CATALOG[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_enum_indices() {
        for kind in EffectKind::ALL {
            assert_eq!(descriptor(kind).kind, kind, "catalog row out of order");
        }
    }

    #[test]
    fn distorting_set_is_exactly_the_fixed_seven() {
        let distorting: Vec<EffectKind> = EffectKind::ALL
            .into_iter()
            .filter(|k| descriptor(*k).distorts)
            .collect();
        assert_eq!(
            distorting,
            vec![
                EffectKind::Spiral,
                EffectKind::BlurX,
                EffectKind::BlurY,
                EffectKind::Underwater,
                EffectKind::Retro,
                EffectKind::Dilation,
                EffectKind::FrostedGlass,
            ]
        );
    }

    #[test]
    fn only_selection_requires_focus() {
        for kind in EffectKind::ALL {
            let gated = descriptor(kind).requires_focus;
            assert_eq!(gated, kind == EffectKind::Selection);
        }
    }

    #[test]
    fn aux_bindings_follow_the_catalog() {
        assert_eq!(descriptor(EffectKind::Bloom).aux, &[AuxInput::BloomMask]);
        assert_eq!(
            descriptor(EffectKind::Selection).aux,
            &[AuxInput::NormalDepth, AuxInput::FocusMask]
        );
        assert_eq!(descriptor(EffectKind::Outline).aux, &[AuxInput::NormalDepth]);
        assert!(descriptor(EffectKind::Copy).aux.is_empty());
    }
}
