//! Per-frame parameter feed.
//!
//! Pure function of (persisted oscillator state, elapsed time, input
//! queries) → refreshed constants record + updated state. Every parameter
//! family is recomputed each frame whether or not its effect is active; the
//! cost is negligible next to the draw calls.

use crate::coords::Viewport;

use super::constants::FxConstants;

const WATER_HEIGHT: f32 = 60.0;
const GAUSSIAN_STD_DEV: f32 = 5.2;
const NOISE_GRAIN_SIZE: f32 = 140.0;

/// Boolean input queries for one frame, one per logical control.
///
/// "Held" controls nudge a parameter every frame while true; "step"
/// controls act once per frame they are true (the caller derives them from
/// key-press transitions).
#[derive(Debug, Default, Copy, Clone)]
pub struct FxControls {
    // Held.
    pub blur_shrink: bool,
    pub blur_grow: bool,
    pub pixel_shrink: bool,
    pub pixel_grow: bool,
    pub bloom_threshold_up: bool,
    pub bloom_threshold_down: bool,
    pub outline_up: bool,
    pub outline_down: bool,
    pub dilation_shrink: bool,
    pub dilation_grow: bool,
    pub focal_back: bool,
    pub focal_forward: bool,
    pub range_shrink: bool,
    pub range_grow: bool,
    pub fade_up: bool,
    pub fade_down: bool,

    // Step.
    pub diagonal_blurs_sub: bool,
    pub diagonal_blurs_add: bool,
    pub dilation_cycle: bool,
}

/// Environment queried by the feed each frame.
#[derive(Debug, Copy, Clone)]
pub struct ParamEnv {
    pub viewport: Viewport,
    /// World-space height of the active camera (drives the underwater tone).
    pub camera_height: f32,
    /// Projected depth of the focused object, when one is selected. While
    /// present it overrides the manual focal plane entirely.
    pub focused_depth: Option<f32>,
}

/// Persisted oscillator/toggle state surviving across frames.
///
/// Every field here was a hidden static local in a previous life; modelling
/// them explicitly keeps the feed a pure state transition.
#[derive(Debug, Clone)]
pub struct ParamState {
    hue: f32,
    hue2: f32,
    hue_dir: f32,
    hue2_dir: f32,
    hue_shift: f32,

    blur_size: f32,
    wobble_timer: f32,

    pixel_size: f32,

    bloom_threshold: f32,
    bloom_timer: f32,
    bloom_timer_dir: f32,
    /// Number of additive directional blur passes in the bloom sub-pipeline.
    pub diagonal_blurs: u32,

    aberration_timer: f32,

    outline_threshold: f32,

    dilation_size: f32,
    dilation_type: f32,

    focal_plane: f32,
    plane_dist: f32,

    burn_height: f32,
    spiral_wiggle: f32,
    heat_haze_timer: f32,

    /// Motion-blur accumulation alpha for the final composite.
    pub copy_alpha: f32,
}

impl Default for ParamState {
    fn default() -> Self {
        Self {
            hue: 0.5,
            hue2: 0.0,
            hue_dir: 1.0,
            hue2_dir: 1.0,
            hue_shift: 0.0,
            blur_size: 0.03,
            wobble_timer: 0.0,
            pixel_size: 8.0,
            bloom_threshold: 0.9,
            bloom_timer: 0.0,
            bloom_timer_dir: 1.0,
            diagonal_blurs: 3,
            aberration_timer: 0.0,
            outline_threshold: 0.12,
            dilation_size: 0.01,
            dilation_type: 1.0,
            focal_plane: 0.2,
            plane_dist: 0.15,
            burn_height: 0.0,
            spiral_wiggle: 0.0,
            heat_haze_timer: 0.0,
            copy_alpha: 1.0,
        }
    }
}

impl ParamState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction of the j-th bloom directional-blur pass; the scheduler
    /// writes this into the constants before each additive pass.
    pub fn directional_blur_direction(&self, offset: f32) -> (f32, f32) {
        ((self.bloom_timer + offset).cos(), (self.bloom_timer + offset).sin())
    }

    /// Advances every parameter family by `dt` seconds and writes the
    /// refreshed values into `out`.
    pub fn advance(&mut self, dt: f32, controls: &FxControls, env: &ParamEnv, out: &mut FxConstants) {
        // Motion blur accumulation alpha.
        let fade_speed = 0.25;
        if controls.fade_up {
            self.copy_alpha += fade_speed * dt;
        } else if controls.fade_down {
            self.copy_alpha -= fade_speed * dt;
        }
        self.copy_alpha = self.copy_alpha.clamp(0.05, 1.0);

        // Tint.
        out.tint_colour = [1.0, 0.0, 0.0, 0.0];

        // Gradient hues: ping-pong oscillation in [0, 1].
        out.gradient_hue = [self.hue, self.hue2];
        let hue_speed = 0.2;
        self.hue += hue_speed * self.hue_dir * dt;
        self.hue2 += hue_speed * self.hue2_dir * dt;
        if !(0.0..=1.0).contains(&self.hue) {
            self.hue_dir = -self.hue_dir;
            self.hue = self.hue.clamp(0.0, 1.0);
        }
        if !(0.0..=1.0).contains(&self.hue2) {
            self.hue2_dir = -self.hue2_dir;
            self.hue2 = self.hue2.clamp(0.0, 1.0);
        }

        // Hue shift accumulates; the shader wraps it.
        self.hue_shift += 0.2 * dt;
        out.hue_shift = self.hue_shift;

        // Separable Gaussian blur.
        let blur_speed = 0.1;
        if controls.blur_shrink {
            self.blur_size = (self.blur_size - blur_speed * dt).max(0.0);
        } else if controls.blur_grow {
            self.blur_size += blur_speed * dt;
        }
        out.blur_size = [self.blur_size, self.blur_size];
        out.std_dev_sq = GAUSSIAN_STD_DEV * GAUSSIAN_STD_DEV;

        // Underwater tone follows the camera height towards the surface.
        let t = env.camera_height / WATER_HEIGHT;
        out.underwater_hue = lerp(0.65, 0.5, t);
        out.underwater_brightness = [lerp(0.9, 1.3, t), lerp(0.5, 1.0, t)];
        out.wobble_strength = 0.005;
        self.wobble_timer += dt;
        out.wobble_timer = self.wobble_timer;

        // Retro quantization.
        let pixel_speed = 10.0;
        if controls.pixel_shrink {
            self.pixel_size = (self.pixel_size - pixel_speed * dt).max(1.0);
        } else if controls.pixel_grow {
            self.pixel_size += pixel_speed * dt;
        }
        out.pixel_number = [
            env.viewport.width / self.pixel_size.floor(),
            env.viewport.height / self.pixel_size.floor(),
        ];
        out.pixel_brightness_hue_shift = 0.3;
        out.pixel_brightness_levels = 12.0;
        out.pixel_saturation_min = 0.8;
        out.pixel_saturation_levels = 2.0;
        out.pixel_hue_range = [160.0 / 360.0, 305.0 / 360.0];
        out.pixel_hue_levels = 7.0;

        // Bloom.
        let threshold_speed = 0.3;
        if controls.bloom_threshold_up {
            self.bloom_threshold = (self.bloom_threshold + threshold_speed * dt).clamp(0.0, 1.0);
        } else if controls.bloom_threshold_down {
            self.bloom_threshold = (self.bloom_threshold - threshold_speed * dt).clamp(0.0, 1.0);
        }
        out.bloom_threshold = self.bloom_threshold;
        out.bloom_intensity = 1.2;

        out.directional_blur_size = 0.15 + (1.0 - self.bloom_timer.cos()) * 0.4;
        out.directional_blur_intensity = 0.6;
        let (dbx, dby) = self.directional_blur_direction(0.0);
        out.directional_blur_x = dbx;
        out.directional_blur_y = dby;

        // Bloom timer ping-pongs in [0, 1].
        self.bloom_timer += self.bloom_timer_dir * dt;
        if self.bloom_timer > 1.0 {
            self.bloom_timer = 1.0;
            self.bloom_timer_dir = -1.0;
        } else if self.bloom_timer < 0.0 {
            self.bloom_timer = 0.0;
            self.bloom_timer_dir = 1.0;
        }

        if controls.diagonal_blurs_sub {
            self.diagonal_blurs = self.diagonal_blurs.saturating_sub(1);
        }
        if controls.diagonal_blurs_add {
            self.diagonal_blurs = (self.diagonal_blurs + 1).min(20);
        }

        // Chromatic aberration oscillates around zero.
        let offset = self.aberration_timer.cos() * 0.011;
        out.colour_offset = [offset, 0.0, -offset, 0.0];
        self.aberration_timer += dt;

        // Outline.
        let outline_speed = 0.5;
        if controls.outline_up {
            self.outline_threshold = (self.outline_threshold + outline_speed * dt).clamp(0.001, 10.0);
        }
        if controls.outline_down {
            self.outline_threshold = (self.outline_threshold - outline_speed * dt).clamp(0.001, 10.0);
        }
        out.outline_threshold = self.outline_threshold;
        out.outline_thickness = 0.0012;

        // Dilation.
        let dilation_speed = 0.01;
        if controls.dilation_shrink {
            self.dilation_size = (self.dilation_size - dilation_speed * dt).clamp(0.0, 0.05);
        }
        if controls.dilation_grow {
            self.dilation_size = (self.dilation_size + dilation_speed * dt).clamp(0.0, 0.05);
        }
        if controls.dilation_cycle {
            self.dilation_type += 1.0;
            if self.dilation_type > 2.0 {
                self.dilation_type = 0.0;
            }
        }
        out.dilation_type = self.dilation_type;
        out.dilation_size = [self.dilation_size * env.viewport.aspect(), self.dilation_size];
        out.dilation_threshold = [0.05, 0.5];

        // Depth of field. A selected focused object pins the focal plane to
        // its projected depth; manual nudges only apply while unfocused.
        let plane_speed = 0.1;
        let dist_speed = 0.2;
        if env.focused_depth.is_none() {
            if controls.focal_back {
                self.focal_plane = (self.focal_plane - plane_speed * dt).clamp(-1.0, 1.0);
            } else if controls.focal_forward {
                self.focal_plane = (self.focal_plane + plane_speed * dt).clamp(-1.0, 1.0);
            }
        }
        if controls.range_shrink {
            self.plane_dist = (self.plane_dist - dist_speed * dt).clamp(0.02, 0.5);
        } else if controls.range_grow {
            self.plane_dist = (self.plane_dist + dist_speed * dt).clamp(0.02, 0.5);
        }

        let focal = env.focused_depth.unwrap_or(self.focal_plane);
        if env.focused_depth.is_some() {
            self.focal_plane = focal;
        }
        out.dof_near = (focal - self.plane_dist).clamp(0.0, 1.0);
        out.dof_focal = focal;
        out.dof_far = (focal + self.plane_dist).clamp(0.0, 1.0);

        // Frosted glass.
        out.frosted_glass_frequency = 0.1;
        out.frosted_glass_offset = [0.01, 0.01];

        // Grey noise: grain scale plus a randomized offset for the
        // tv-static flicker.
        out.noise_scale = [
            env.viewport.width / NOISE_GRAIN_SIZE,
            env.viewport.height / NOISE_GRAIN_SIZE,
        ];
        out.noise_offset = [rand::random::<f32>(), rand::random::<f32>()];

        // Burn level cycles back to 0 when it reaches 1.
        self.burn_height = (self.burn_height + 0.2 * dt) % 1.0;
        out.burn_height = self.burn_height;

        out.distort_level = 0.03;

        // Spiral strength animated on a tweaked cosine wave.
        out.spiral_level = (1.0 - self.spiral_wiggle.cos()) * 4.0;
        self.spiral_wiggle += dt;

        self.heat_haze_timer += dt;
        out.heat_haze_timer = self.heat_haze_timer;
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.016;

    fn env() -> ParamEnv {
        ParamEnv {
            viewport: Viewport::new(1280.0, 720.0),
            camera_height: 40.0,
            focused_depth: None,
        }
    }

    fn advance_n(state: &mut ParamState, n: usize, controls: &FxControls, env: &ParamEnv) -> FxConstants {
        let mut out = FxConstants::default();
        for _ in 0..n {
            state.advance(DT, controls, env, &mut out);
        }
        out
    }

    #[test]
    fn gradient_hues_ping_pong_within_unit_range() {
        let mut state = ParamState::new();
        let controls = FxControls::default();
        let env = env();

        // Long enough for both hues to hit a bound several times.
        let mut out = FxConstants::default();
        for _ in 0..2000 {
            state.advance(DT, &controls, &env, &mut out);
            assert!((0.0..=1.0).contains(&out.gradient_hue[0]));
            assert!((0.0..=1.0).contains(&out.gradient_hue[1]));
        }
        // Direction must have reversed at least once: after 2000 frames at
        // 0.2/s the accumulated travel is ~6.4 units.
        assert!(state.hue_dir == 1.0 || state.hue_dir == -1.0);
    }

    #[test]
    fn bloom_timer_reverses_at_bounds() {
        let mut state = ParamState::new();
        let controls = FxControls::default();
        let env = env();
        let mut out = FxConstants::default();

        let mut saw_down = false;
        for _ in 0..200 {
            state.advance(DT, &controls, &env, &mut out);
            if state.bloom_timer_dir < 0.0 {
                saw_down = true;
            }
            assert!((0.0..=1.0).contains(&state.bloom_timer));
        }
        assert!(saw_down, "timer never reached its upper bound");
    }

    #[test]
    fn blur_size_never_goes_negative() {
        let mut state = ParamState::new();
        let controls = FxControls {
            blur_shrink: true,
            ..Default::default()
        };
        let out = advance_n(&mut state, 500, &controls, &env());
        assert_eq!(out.blur_size[0], 0.0);
    }

    #[test]
    fn bloom_threshold_clamps_to_unit_range() {
        let mut state = ParamState::new();
        let up = FxControls {
            bloom_threshold_up: true,
            ..Default::default()
        };
        let out = advance_n(&mut state, 500, &up, &env());
        assert_eq!(out.bloom_threshold, 1.0);

        let down = FxControls {
            bloom_threshold_down: true,
            ..Default::default()
        };
        let out = advance_n(&mut state, 1000, &down, &env());
        assert_eq!(out.bloom_threshold, 0.0);
    }

    #[test]
    fn diagonal_blur_count_clamps_to_0_20() {
        let mut state = ParamState::new();
        let sub = FxControls {
            diagonal_blurs_sub: true,
            ..Default::default()
        };
        advance_n(&mut state, 30, &sub, &env());
        assert_eq!(state.diagonal_blurs, 0);

        let add = FxControls {
            diagonal_blurs_add: true,
            ..Default::default()
        };
        advance_n(&mut state, 30, &add, &env());
        assert_eq!(state.diagonal_blurs, 20);
    }

    #[test]
    fn dilation_type_cycles_through_three_modes() {
        let mut state = ParamState::new();
        let cycle = FxControls {
            dilation_cycle: true,
            ..Default::default()
        };
        let env = env();
        let mut seen = Vec::new();
        let mut out = FxConstants::default();
        for _ in 0..4 {
            state.advance(DT, &cycle, &env, &mut out);
            seen.push(out.dilation_type);
        }
        assert_eq!(seen, vec![2.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn focused_depth_overrides_manual_focal_plane() {
        let mut state = ParamState::new();
        let controls = FxControls {
            focal_forward: true,
            ..Default::default()
        };
        let focused = ParamEnv {
            focused_depth: Some(0.42),
            ..env()
        };
        let out = advance_n(&mut state, 10, &controls, &focused);
        assert_eq!(out.dof_focal, 0.42);

        // Releasing focus resumes from the pinned plane.
        let out = advance_n(&mut state, 1, &FxControls::default(), &env());
        assert!((out.dof_focal - 0.42).abs() < 1e-6);
    }

    #[test]
    fn burn_height_wraps_at_one() {
        let mut state = ParamState::new();
        let controls = FxControls::default();
        let env = env();
        let mut out = FxConstants::default();
        for _ in 0..400 {
            state.advance(DT, &controls, &env, &mut out);
            assert!((0.0..1.0).contains(&out.burn_height));
        }
    }

    #[test]
    fn copy_alpha_clamps_to_floor() {
        let mut state = ParamState::new();
        let controls = FxControls {
            fade_down: true,
            ..Default::default()
        };
        advance_n(&mut state, 2000, &controls, &env());
        assert!((state.copy_alpha - 0.05).abs() < 1e-6);
    }
}
