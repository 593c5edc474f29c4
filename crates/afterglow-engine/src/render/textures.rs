use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;

/// A static effect-input texture and its shader view.
pub struct PatternTexture {
    // Kept alive for the view; never read directly.
    #[allow(dead_code)]
    texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

/// Loads an image file and uploads it as an Rgba8 texture.
///
/// Failures here are setup-time failures: the caller reports them upward
/// and the subsystem does not start.
pub fn load_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Result<PatternTexture> {
    let image = image::open(path)
        .with_context(|| format!("failed to load texture {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();

    Ok(upload_rgba8(
        device,
        queue,
        &format!("afterglow texture {}", path.display()),
        width,
        height,
        image.as_raw(),
    ))
}

/// The static pattern textures the effect catalog binds: noise for grey
/// noise, a height map for burn, a vector map for distortion, fine noise
/// for frosted glass, plus a 1x1 white fallback bound to unused aux slots.
pub struct PatternTextures {
    pub noise: PatternTexture,
    pub burn: PatternTexture,
    pub distort: PatternTexture,
    pub fine_noise: PatternTexture,
    pub white: PatternTexture,
}

impl PatternTextures {
    /// Generates all patterns procedurally. The demo uses this instead of
    /// shipping image assets; `load_texture` covers the file-based path.
    pub fn procedural(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let mut rng = rand::thread_rng();

        Self {
            noise: make_noise(device, queue, &mut rng, "afterglow noise", 256),
            burn: make_burn(device, queue, &mut rng, 256),
            distort: make_distort(device, queue, 256),
            fine_noise: make_noise(device, queue, &mut rng, "afterglow fine noise", 128),
            white: upload_rgba8(device, queue, "afterglow white", 1, 1, &[255; 4]),
        }
    }
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> PatternTexture {
    debug_assert_eq!(pixels.len(), (width * height * 4) as usize);

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    PatternTexture { texture, view }
}

fn make_noise(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    rng: &mut impl Rng,
    label: &str,
    size: u32,
) -> PatternTexture {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for _ in 0..size * size {
        let v = rng.gen_range(0..=255u8);
        let w = rng.gen_range(0..=255u8);
        pixels.extend_from_slice(&[v, w, rng.gen_range(0..=255u8), 255]);
    }
    upload_rgba8(device, queue, label, size, size, &pixels)
}

/// Height map that the burn front ascends: a vertical ramp perturbed with
/// noise so the edge eats through unevenly.
fn make_burn(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    rng: &mut impl Rng,
    size: u32,
) -> PatternTexture {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for _ in 0..size {
            let ramp = y as f32 / size as f32;
            let jitter: f32 = rng.gen_range(-0.08..0.08);
            let v = ((ramp + jitter).clamp(0.0, 1.0) * 255.0) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    upload_rgba8(device, queue, "afterglow burn", size, size, &pixels)
}

/// 2D offset vectors in R/G (0.5 = no shift), swirled around the centre for
/// a cut-glass impression.
fn make_distort(device: &wgpu::Device, queue: &wgpu::Queue, size: u32) -> PatternTexture {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 / size as f32 - 0.5;
            let fy = y as f32 / size as f32 - 0.5;
            let angle = (fy.atan2(fx) * 6.0).sin();
            let r = ((0.5 + fx * angle).clamp(0.0, 1.0) * 255.0) as u8;
            let g = ((0.5 - fy * angle).clamp(0.0, 1.0) * 255.0) as u8;
            pixels.extend_from_slice(&[r, g, 128, 255]);
        }
    }
    upload_rgba8(device, queue, "afterglow distort", size, size, &pixels)
}
