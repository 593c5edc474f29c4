use winit::dpi::PhysicalSize;

use crate::fx::{pairs, PairId, Side};

/// One double-buffered render target: two same-size textures, each usable
/// as both render attachment and shader input.
struct TargetPair {
    // Kept alive for the views below; never read directly.
    #[allow(dead_code)]
    textures: [wgpu::Texture; 2],
    views: [wgpu::TextureView; 2],
}

/// GPU allocation for the render-target ring.
///
/// The swap/aliasing logic lives in `fx::TargetRing`; this type only owns
/// the textures and hands out views. Slots stay addressable after
/// `destroy`, they just resolve to `None`.
pub struct FxTargets {
    pairs: Vec<Option<TargetPair>>,
    width: u32,
    height: u32,
}

impl FxTargets {
    /// Format of every off-screen target pair.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates the four standard pairs (scene, normal/depth, focus mask,
    /// scratch) at the given physical size.
    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        let width = size.width.max(1);
        let height = size.height.max(1);
        let mut targets = Self {
            pairs: Vec::with_capacity(pairs::COUNT),
            width,
            height,
        };
        for _ in 0..pairs::COUNT {
            targets.create(device, width, height);
        }
        targets
    }

    /// Allocates one more pair and returns its id.
    pub fn create(&mut self, device: &wgpu::Device, width: u32, height: u32) -> PairId {
        let id = PairId(self.pairs.len());
        self.pairs.push(Some(make_pair(device, id, width, height)));
        id
    }

    /// Releases the pair's textures. Further view lookups resolve to `None`.
    pub fn destroy(&mut self, pair: PairId) {
        if let Some(slot) = self.pairs.get_mut(pair.index()) {
            *slot = None;
        }
    }

    /// Recreates every live pair at the new size. Call on window resize,
    /// before the next frame's scene passes.
    pub fn resize(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) {
        let width = size.width.max(1);
        let height = size.height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        for (index, slot) in self.pairs.iter_mut().enumerate() {
            if slot.is_some() {
                *slot = Some(make_pair(device, PairId(index), width, height));
            }
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// View for one side of a pair, or `None` if the pair was destroyed.
    pub fn view(&self, pair: PairId, side: Side) -> Option<&wgpu::TextureView> {
        let entry = self.pairs.get(pair.index())?.as_ref()?;
        let index = match side {
            Side::A => 0,
            Side::B => 1,
        };
        Some(&entry.views[index])
    }
}

fn make_pair(device: &wgpu::Device, id: PairId, width: u32, height: u32) -> TargetPair {
    let make = |side: &str| {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some(&format!("afterglow target pair {} {side}", id.index())),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FxTargets::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        })
    };

    let textures = [make("a"), make("b")];
    let views = [
        textures[0].create_view(&wgpu::TextureViewDescriptor::default()),
        textures[1].create_view(&wgpu::TextureViewDescriptor::default()),
    ];
    TargetPair { textures, views }
}
