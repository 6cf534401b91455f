//! Cube textures.
//!
//! Three textures are available to spawned cubes, indexed in this order:
//! 0. a procedural checkerboard,
//! 1. an image read from disk (a red-tinted checkerboard if it cannot be loaded),
//! 2. a procedural vertical gradient.

use std::path::Path;

/// Edge length of the procedural textures in pixels.
pub const PROCEDURAL_SIZE: u32 = 128;

/// Edge length of one checkerboard cell in pixels.
pub const CHECKER_CELL: u32 = 16;

const CHECKER_LIGHT: [u8; 4] = [0xf0, 0xdc, 0xb4, 0xff];
const CHECKER_DARK: [u8; 4] = [0x14, 0x14, 0x14, 0xff];
const GRADIENT_TOP: [u8; 4] = [0x22, 0x8b, 0xcc, 0xff];
const GRADIENT_BOTTOM: [u8; 4] = [0xa7, 0x00, 0xee, 0xff];

pub fn checkerboard(size: u32, cell: u32) -> image::RgbaImage {
    let cell = cell.max(1);
    image::RgbaImage::from_fn(size, size, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            image::Rgba(CHECKER_LIGHT)
        } else {
            image::Rgba(CHECKER_DARK)
        }
    })
}

/// Top-to-bottom linear blend between two colours.
pub fn vertical_gradient(size: u32, top: [u8; 4], bottom: [u8; 4]) -> image::RgbaImage {
    let span = size.saturating_sub(1).max(1) as f32;
    image::RgbaImage::from_fn(size, size, |_, y| {
        let t = y as f32 / span;
        let mut pixel = [0u8; 4];
        for (channel, (a, b)) in pixel.iter_mut().zip(top.iter().zip(bottom.iter())) {
            *channel = (*a as f32 + (*b as f32 - *a as f32) * t).round() as u8;
        }
        image::Rgba(pixel)
    })
}

/// Checkerboard with the light cells tinted red, used when an image fails to load.
pub fn fallback_texture() -> image::RgbaImage {
    let mut img = checkerboard(PROCEDURAL_SIZE, CHECKER_CELL);
    for pixel in img.pixels_mut() {
        if pixel.0 == CHECKER_LIGHT {
            *pixel = image::Rgba([0xff, 0x30, 0x30, 0xff]);
        }
    }
    img
}

/// Loads an image as RGBA8, falling back to [`fallback_texture`] with a warning.
pub fn load_image_or_fallback(path: &Path) -> image::RgbaImage {
    match image::open(path) {
        Ok(img) => {
            log::info!("Loaded texture {:?}", path);
            img.to_rgba8()
        }
        Err(e) => {
            log::warn!("Failed to load texture {:?}: {}, using fallback", path, e);
            fallback_texture()
        }
    }
}

/// CPU-side images for every texture slot, in index order.
pub fn cube_texture_images(image_path: &Path) -> Vec<image::RgbaImage> {
    vec![
        checkerboard(PROCEDURAL_SIZE, CHECKER_CELL),
        load_image_or_fallback(image_path),
        vertical_gradient(PROCEDURAL_SIZE, GRADIENT_TOP, GRADIENT_BOTTOM),
    ]
}

/// Uploads an RGBA8 image into a new sampled texture.
pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &image::RgbaImage,
    label: &str,
) -> wgpu::Texture {
    let dimensions = img.dimensions();
    let texture_size = wgpu::Extent3d {
        width: dimensions.0,
        height: dimensions.1,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * dimensions.0),
            rows_per_image: Some(dimensions.1),
        },
        texture_size,
    );

    texture
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_every_cell() {
        let img = checkerboard(PROCEDURAL_SIZE, CHECKER_CELL);
        assert_eq!(img.dimensions(), (128, 128));
        assert_eq!(img.get_pixel(0, 0).0, CHECKER_LIGHT);
        assert_eq!(img.get_pixel(15, 15).0, CHECKER_LIGHT);
        assert_eq!(img.get_pixel(16, 0).0, CHECKER_DARK);
        assert_eq!(img.get_pixel(0, 16).0, CHECKER_DARK);
        assert_eq!(img.get_pixel(16, 16).0, CHECKER_LIGHT);
        assert_eq!(img.get_pixel(127, 127).0, CHECKER_LIGHT);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let img = vertical_gradient(PROCEDURAL_SIZE, GRADIENT_TOP, GRADIENT_BOTTOM);
        assert_eq!(img.get_pixel(0, 0).0, GRADIENT_TOP);
        assert_eq!(img.get_pixel(127, 0).0, GRADIENT_TOP);
        assert_eq!(img.get_pixel(64, 127).0, GRADIENT_BOTTOM);
        // green falls monotonically from 0x8b to 0
        let greens: Vec<u8> = (0..128).map(|y| img.get_pixel(0, y).0[1]).collect();
        assert!(greens.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn missing_image_falls_back() {
        let img = load_image_or_fallback(Path::new("no/such/texture.jpg"));
        assert_eq!(img, fallback_texture());
        assert_eq!(img.get_pixel(0, 0).0, [0xff, 0x30, 0x30, 0xff]);
        assert_eq!(img.get_pixel(16, 0).0, CHECKER_DARK);
    }

    #[test]
    fn three_texture_slots() {
        let images = cube_texture_images(Path::new("no/such/texture.jpg"));
        assert_eq!(images.len(), 3);
        assert!(images.iter().all(|img| img.width() > 0 && img.height() > 0));
    }
}
