//! CPU-side image decoding.

use std::path::Path;

/// Channel layout of decoded pixel data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    R8,
    Rgb8,
    Rgba8,
}

impl PixelLayout {
    #[inline]
    pub fn channels(self) -> u32 {
        match self {
            PixelLayout::R8 => 1,
            PixelLayout::Rgb8 => 3,
            PixelLayout::Rgba8 => 4,
        }
    }
}

/// Decoded image data before GPU upload.
#[derive(Clone, Debug)]
pub struct ImagePixels {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl ImagePixels {
    /// Check that the byte length matches dimensions and layout.
    pub fn is_valid(&self) -> bool {
        let expected = self.width as usize * self.height as usize * self.layout.channels() as usize;
        self.width > 0 && self.height > 0 && self.data.len() == expected
    }
}

/// Decode an image file, classifying it by channel count.
///
/// Grayscale, RGB and RGBA stay in their native layout; anything else
/// (gray+alpha, 16-bit, float) is converted to RGBA8.
pub fn decode(path: &Path) -> Result<ImagePixels, image::ImageError> {
    let img = image::open(path)?;
    let pixels = match img {
        image::DynamicImage::ImageLuma8(buf) => {
            let (width, height) = buf.dimensions();
            ImagePixels {
                width,
                height,
                layout: PixelLayout::R8,
                data: buf.into_raw(),
            }
        }
        image::DynamicImage::ImageRgb8(buf) => {
            let (width, height) = buf.dimensions();
            ImagePixels {
                width,
                height,
                layout: PixelLayout::Rgb8,
                data: buf.into_raw(),
            }
        }
        image::DynamicImage::ImageRgba8(buf) => {
            let (width, height) = buf.dimensions();
            ImagePixels {
                width,
                height,
                layout: PixelLayout::Rgba8,
                data: buf.into_raw(),
            }
        }
        other => {
            log::debug!(
                "converting {:?} image {} to RGBA8",
                other.color(),
                path.display()
            );
            let buf = other.to_rgba8();
            let (width, height) = buf.dimensions();
            ImagePixels {
                width,
                height,
                layout: PixelLayout::Rgba8,
                data: buf.into_raw(),
            }
        }
    };
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_channel_counts() {
        assert_eq!(PixelLayout::R8.channels(), 1);
        assert_eq!(PixelLayout::Rgb8.channels(), 3);
        assert_eq!(PixelLayout::Rgba8.channels(), 4);
    }

    #[test]
    fn validity_checks_byte_length() {
        let ok = ImagePixels {
            width: 2,
            height: 2,
            layout: PixelLayout::Rgb8,
            data: vec![0; 12],
        };
        assert!(ok.is_valid());
        let short = ImagePixels {
            width: 2,
            height: 2,
            layout: PixelLayout::Rgba8,
            data: vec![0; 12],
        };
        assert!(!short.is_valid());
    }
}
