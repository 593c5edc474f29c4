use bytemuck::{Pod, Zeroable};

/// The flat per-frame constants record shared by every effect shader.
///
/// One copy exists per compositor; the scope fields at the top are
/// overwritten by the effect applicator immediately before each draw
/// (last-writer-wins), the rest is refreshed once per frame by the parameter
/// feed whether or not the corresponding effect is active.
///
/// Field order mirrors the WGSL `FxUniforms` struct in
/// `render/shaders/postfx.wgsl`; every `[f32; 2]` sits on an 8-byte boundary
/// and every `[f32; 4]` on a 16-byte boundary so the two layouts agree.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct FxConstants {
    // Scope of the current draw.
    pub area_top_left: [f32; 2],
    pub area_size: [f32; 2],
    pub area_depth: f32,

    pub copy_alpha: f32,
    pub hue_shift: f32,
    pub distort_level: f32,

    /// Clip-space points for polygon-scope draws.
    pub polygon_points: [[f32; 4]; 4],

    /// Tint colour in rgb (w unused).
    pub tint_colour: [f32; 4],
    /// Chromatic aberration per-channel UV offsets in rgb (w unused).
    pub colour_offset: [f32; 4],

    pub gradient_hue: [f32; 2],
    pub blur_size: [f32; 2],
    pub std_dev_sq: f32,

    pub underwater_hue: f32,
    pub underwater_brightness: [f32; 2],
    pub wobble_strength: f32,
    pub wobble_timer: f32,

    pub pixel_number: [f32; 2],
    pub pixel_brightness_hue_shift: f32,
    pub pixel_brightness_levels: f32,
    pub pixel_saturation_min: f32,
    pub pixel_saturation_levels: f32,
    pub pixel_hue_range: [f32; 2],
    pub pixel_hue_levels: f32,

    pub bloom_threshold: f32,
    pub bloom_intensity: f32,
    pub directional_blur_x: f32,
    pub directional_blur_y: f32,
    pub directional_blur_size: f32,
    pub directional_blur_intensity: f32,

    pub outline_threshold: f32,
    pub outline_thickness: f32,

    pub dilation_type: f32,
    pub dilation_size: [f32; 2],
    pub dilation_threshold: [f32; 2],

    pub dof_near: f32,
    pub dof_focal: f32,
    pub dof_far: f32,

    pub frosted_glass_frequency: f32,
    pub frosted_glass_offset: [f32; 2],

    pub noise_scale: [f32; 2],
    pub noise_offset: [f32; 2],

    pub burn_height: f32,
    pub spiral_level: f32,
    pub heat_haze_timer: f32,

    pub _pad: [f32; 3],
}

impl FxConstants {
    /// Sets the scope fields to the full destination buffer at the nearest
    /// depth.
    pub fn set_fullscreen_scope(&mut self) {
        self.area_top_left = [0.0, 0.0];
        self.area_size = [1.0, 1.0];
        self.area_depth = 0.0;
    }
}

impl Default for FxConstants {
    fn default() -> Self {
        let mut c: FxConstants = Zeroable::zeroed();
        c.set_fullscreen_scope();
        c.copy_alpha = 1.0;
        c
    }
}

// The uniform buffer layout depends on this exact size; a drift between the
// Rust and WGSL structs shows up here instead of as garbage on screen.
const _: () = assert!(std::mem::size_of::<FxConstants>() == 320);
const _: () = assert!(std::mem::size_of::<FxConstants>() % 16 == 0);

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::offset_of;

    #[test]
    fn vec2_fields_are_8_byte_aligned() {
        assert_eq!(offset_of!(FxConstants, area_top_left) % 8, 0);
        assert_eq!(offset_of!(FxConstants, area_size) % 8, 0);
        assert_eq!(offset_of!(FxConstants, gradient_hue) % 8, 0);
        assert_eq!(offset_of!(FxConstants, blur_size) % 8, 0);
        assert_eq!(offset_of!(FxConstants, underwater_brightness) % 8, 0);
        assert_eq!(offset_of!(FxConstants, pixel_number) % 8, 0);
        assert_eq!(offset_of!(FxConstants, pixel_hue_range) % 8, 0);
        assert_eq!(offset_of!(FxConstants, dilation_size) % 8, 0);
        assert_eq!(offset_of!(FxConstants, dilation_threshold) % 8, 0);
        assert_eq!(offset_of!(FxConstants, frosted_glass_offset) % 8, 0);
        assert_eq!(offset_of!(FxConstants, noise_scale) % 8, 0);
        assert_eq!(offset_of!(FxConstants, noise_offset) % 8, 0);
    }

    #[test]
    fn vec4_fields_are_16_byte_aligned() {
        assert_eq!(offset_of!(FxConstants, polygon_points) % 16, 0);
        assert_eq!(offset_of!(FxConstants, tint_colour) % 16, 0);
        assert_eq!(offset_of!(FxConstants, colour_offset) % 16, 0);
    }

    #[test]
    fn default_scope_is_fullscreen_opaque() {
        let c = FxConstants::default();
        assert_eq!(c.area_top_left, [0.0, 0.0]);
        assert_eq!(c.area_size, [1.0, 1.0]);
        assert_eq!(c.area_depth, 0.0);
        assert_eq!(c.copy_alpha, 1.0);
    }
}
