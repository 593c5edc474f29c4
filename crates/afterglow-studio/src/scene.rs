use afterglow_engine::fx::{Compositor, Effect, EffectKind, PolygonData};
use afterglow_engine::render::ScenePainter;
use glam::{Mat4, Vec2, Vec3};

/// Minimal scene collaborator: a list of focusable object positions and the
/// pre-chain passes, which here stay at their clear colours — opaque
/// geometry is outside the compositor demo's concern.
pub struct DemoScene {
    objects: Vec<Vec3>,
    light: Vec3,
}

impl DemoScene {
    pub fn new() -> Self {
        Self {
            // Index 0 stands for "no focus"; the rest mirror a small test
            // scene layout (ground, cube, crate, walls, teapot, troll).
            objects: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(42.0, 5.0, -10.0),
                Vec3::new(-10.0, 0.0, 90.0),
                Vec3::new(15.0, 0.0, -5.0),
                Vec3::new(15.0, 15.0, -5.0),
                Vec3::new(35.0, 0.0, 65.0),
                Vec3::new(-20.0, 5.0, 55.0),
            ],
            light: Vec3::new(30.0, 10.0, 0.0),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn object_position(&self, index: usize) -> Option<Vec3> {
        if index == 0 {
            return None;
        }
        self.objects.get(index).copied()
    }

    /// Seeds the persistent chain: a row of polygon-scope effects hung above
    /// the wall, plus one world-anchored area effect at the light.
    pub fn seed_effects(&self, compositor: &mut Compositor) {
        let wall = self.objects[3];
        let transform = Mat4::from_translation(wall) * Mat4::from_rotation_y(3.0);

        let tapered = [
            Vec3::new(-5.0, 13.0, 0.0),
            Vec3::new(-5.0, 3.0, 0.0),
            Vec3::new(5.0, 13.0, 0.0),
            Vec3::new(5.0, 3.0, 0.0),
        ];
        compositor.push_persistent_effect(Effect::polygon(
            EffectKind::Underwater,
            PolygonData::new(tapered, transform),
        ));

        let banner = |x0: f32, x1: f32| {
            [
                Vec3::new(x0, 28.0, 0.0),
                Vec3::new(x0, 18.0, 0.0),
                Vec3::new(x1, 28.0, 0.0),
                Vec3::new(x1, 18.0, 0.0),
            ]
        };

        for kind in [EffectKind::HueShift, EffectKind::Retro] {
            compositor.push_persistent_effect(Effect::polygon(
                kind,
                PolygonData::new(banner(20.0, 10.0), transform),
            ));
        }
        for kind in [EffectKind::Gradient, EffectKind::FrostedGlass] {
            compositor.push_persistent_effect(Effect::polygon(
                kind,
                PolygonData::new(banner(10.0, 0.0), transform),
            ));
        }
        compositor.push_persistent_effect(Effect::polygon(
            EffectKind::ChromaticAberration,
            PolygonData::new(banner(0.0, -10.0), transform),
        ));
        for kind in [
            EffectKind::HueShift,
            EffectKind::Retro,
            EffectKind::Spiral,
            EffectKind::Distort,
            EffectKind::ChromaticAberration,
        ] {
            compositor.push_persistent_effect(Effect::polygon(
                kind,
                PolygonData::new(banner(-10.0, -20.0), transform),
            ));
        }

        compositor.push_persistent_effect(Effect::area(
            EffectKind::HeatHaze,
            self.light,
            Vec2::new(10.0, 10.0),
        ));
    }
}

impl ScenePainter for DemoScene {}
