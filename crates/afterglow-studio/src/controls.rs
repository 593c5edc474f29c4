use afterglow_engine::fx::{Compositor, Effect, EffectKind, FxControls};
use afterglow_engine::input::{InputFrame, InputState, Key};

/// Parameter-nudge controls from the current key state.
pub fn collect_controls(input: &InputState, frame: &InputFrame) -> FxControls {
    FxControls {
        blur_shrink: input.key_down(Key::Comma),
        blur_grow: input.key_down(Key::Period),
        pixel_shrink: input.key_down(Key::N),
        pixel_grow: input.key_down(Key::M),
        bloom_threshold_up: input.key_down(Key::V),
        bloom_threshold_down: input.key_down(Key::B),
        outline_up: input.key_down(Key::K),
        outline_down: input.key_down(Key::L),
        dilation_shrink: input.key_down(Key::O),
        dilation_grow: input.key_down(Key::P),
        focal_back: input.key_down(Key::T),
        focal_forward: input.key_down(Key::Y),
        range_shrink: input.key_down(Key::U),
        range_grow: input.key_down(Key::I),
        fade_up: input.key_down(Key::F3),
        fade_down: input.key_down(Key::F4),

        diagonal_blurs_sub: frame.pressed(Key::X),
        diagonal_blurs_add: frame.pressed(Key::C),
        dilation_cycle: frame.pressed(Key::Q),
    }
}

/// Effect-list edits and focus cycling from this frame's key presses.
pub fn apply_list_edits(compositor: &mut Compositor, frame: &InputFrame, object_count: usize) {
    let pushes: &[(Key, &[EffectKind])] = &[
        (Key::Digit1, &[EffectKind::Gradient]),
        (Key::Digit2, &[EffectKind::BlurX, EffectKind::BlurY]),
        (Key::Digit3, &[EffectKind::Underwater]),
        (Key::Digit4, &[EffectKind::DepthOfField]),
        (Key::Digit5, &[EffectKind::Retro]),
        (Key::Digit6, &[EffectKind::Bloom]),
        (Key::Digit7, &[EffectKind::Dilation]),
        (Key::Digit8, &[EffectKind::ChromaticAberration]),
        (Key::Digit9, &[EffectKind::Outline]),
        (Key::F1, &[EffectKind::HueShift]),
        (Key::F2, &[EffectKind::FrostedGlass]),
        (Key::F7, &[EffectKind::Selection]),
    ];

    for (key, kinds) in pushes {
        if frame.pressed(*key) {
            for kind in *kinds {
                compositor.push_effect(Effect::fullscreen(*kind));
            }
        }
    }

    if frame.pressed(Key::Digit0) {
        compositor.clear_effects();
    }
    if frame.pressed(Key::Z) {
        compositor.pop_last_effect();
    }

    // Focus cycling with wrap; index 0 is "none" and is skipped when
    // cycling backwards from the first object.
    if object_count > 1 {
        if frame.pressed(Key::F6) {
            let next = compositor.focused_object() + 1;
            compositor.set_focused_object(if next >= object_count { 0 } else { next });
        }
        if frame.pressed(Key::F5) {
            let current = compositor.focused_object();
            compositor.set_focused_object(if current <= 1 {
                object_count - 1
            } else {
                current - 1
            });
        }
    }
}
