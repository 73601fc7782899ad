//! GPU texture upload: format selection by channel count, CPU-generated
//! mip chain, repeat wrapping with trilinear/bilinear filtering.

use asset::cache::TextureImage;
use asset::texture::PixelLayout;
use wgpu::{
    Device, Extent3d, Queue, Sampler, SamplerDescriptor, TextureDescriptor, TextureDimension,
    TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
};

/// An uploaded 2D texture. Created once at model upload time and never
/// rewritten afterwards.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: TextureView,
}

/// Upload one decoded image with a full mip chain.
///
/// `color_data` selects the sampled color space: diffuse content gets an
/// sRGB view, normal/roughness/height data stays linear so shader decodes
/// like `n * 2 - 1` see the stored bytes.
///
/// An image without pixel data (failed decode) still yields a texture
/// object, a 1x1 placeholder that is never written; rendering continues
/// with its zeroed contents.
pub fn upload(
    device: &Device,
    queue: &Queue,
    image: &TextureImage,
    color_data: bool,
) -> GpuTexture {
    let Some(pixels) = &image.pixels else {
        log::debug!("uploading placeholder for {}", image.source);
        return empty_texture(device, &image.source);
    };

    // wgpu has no 3-channel 8-bit format; RGB is expanded on upload while
    // the CPU side keeps its 3-channel classification.
    let (format, channels, data) = match pixels.layout {
        PixelLayout::R8 => (TextureFormat::R8Unorm, 1u32, pixels.data.clone()),
        PixelLayout::Rgb8 => (
            rgba_format(color_data),
            4,
            expand_rgb_to_rgba(&pixels.data),
        ),
        PixelLayout::Rgba8 => (rgba_format(color_data), 4, pixels.data.clone()),
    };

    let (width, height) = (pixels.width, pixels.height);
    let mip_count = mip_level_count(width, height);
    let texture = device.create_texture(&TextureDescriptor {
        label: Some(image.source.as_str()),
        size: Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: mip_count,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let mut level_data = data;
    let (mut w, mut h) = (width, height);
    for level in 0..mip_count {
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &level_data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(w * channels),
                rows_per_image: Some(h),
            },
            Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );
        if level + 1 < mip_count {
            let (next, nw, nh) = downsample(&level_data, w, h, channels);
            level_data = next;
            w = nw;
            h = nh;
        }
    }

    let view = texture.create_view(&TextureViewDescriptor::default());
    GpuTexture { texture, view }
}

/// Repeat wrapping, trilinear minification, bilinear magnification.
pub fn default_sampler(device: &Device) -> Sampler {
    device.create_sampler(&SamplerDescriptor {
        label: Some("MaterialSampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}

/// Create a small solid-color texture (used for material slot fallbacks).
pub fn solid_color(device: &Device, queue: &Queue, label: &str, rgba: [u8; 4]) -> GpuTexture {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some(label),
        size: Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8Unorm,
        usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::ImageCopyTexture {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &rgba,
        wgpu::ImageDataLayout {
            offset: 0,
            bytes_per_row: Some(4),
            rows_per_image: Some(1),
        },
        Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    let view = texture.create_view(&TextureViewDescriptor::default());
    GpuTexture { texture, view }
}

fn empty_texture(device: &Device, label: &str) -> GpuTexture {
    let texture = device.create_texture(&TextureDescriptor {
        label: Some(label),
        size: Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: TextureFormat::Rgba8UnormSrgb,
        usage: TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let view = texture.create_view(&TextureViewDescriptor::default());
    GpuTexture { texture, view }
}

fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

fn rgba_format(color_data: bool) -> TextureFormat {
    if color_data {
        TextureFormat::Rgba8UnormSrgb
    } else {
        TextureFormat::Rgba8Unorm
    }
}

fn expand_rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        out.extend_from_slice(px);
        out.push(255);
    }
    out
}

/// 2x2 box filter with edge clamping for odd dimensions.
fn downsample(data: &[u8], width: u32, height: u32, channels: u32) -> (Vec<u8>, u32, u32) {
    let nw = (width / 2).max(1);
    let nh = (height / 2).max(1);
    let ch = channels as usize;
    let mut out = vec![0u8; nw as usize * nh as usize * ch];

    for y in 0..nh {
        let y0 = (y * 2).min(height - 1) as usize;
        let y1 = (y * 2 + 1).min(height - 1) as usize;
        for x in 0..nw {
            let x0 = (x * 2).min(width - 1) as usize;
            let x1 = (x * 2 + 1).min(width - 1) as usize;
            for c in 0..ch {
                let sum = data[(y0 * width as usize + x0) * ch + c] as u32
                    + data[(y0 * width as usize + x1) * ch + c] as u32
                    + data[(y1 * width as usize + x0) * ch + c] as u32
                    + data[(y1 * width as usize + x1) * ch + c] as u32;
                out[(y as usize * nw as usize + x as usize) * ch + c] = (sum / 4) as u8;
            }
        }
    }
    (out, nw, nh)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_chain_lengths() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(256, 32), 9);
        assert_eq!(mip_level_count(5, 3), 3);
    }

    #[test]
    fn color_space_follows_content_kind() {
        assert_eq!(rgba_format(true), TextureFormat::Rgba8UnormSrgb);
        assert_eq!(rgba_format(false), TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn rgb_expansion_appends_opaque_alpha() {
        let rgba = expand_rgb_to_rgba(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(rgba, vec![1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn downsample_averages_blocks() {
        // 2x2 single channel -> 1x1 average.
        let (out, w, h) = downsample(&[0, 100, 100, 200], 2, 2, 1);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out, vec![100]);
    }

    #[test]
    fn downsample_clamps_odd_edges() {
        // 3x1 RGBA stays finite and halves the width.
        let data = vec![10u8; 3 * 4];
        let (out, w, h) = downsample(&data, 3, 1, 4);
        assert_eq!((w, h), (1, 1));
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|&b| b == 10));
    }
}
