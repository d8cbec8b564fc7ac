use image::RgbaImage;

/// Opacity mask of the displayed image, one byte of coverage per pixel.
///
/// The sweep gradient is composited only where the image is visible, so the
/// highlight follows the image's silhouette instead of the rectangular view
/// bounds. Compositors upload this as a single-channel texture (or sample it
/// on the CPU).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    /// Extracts the alpha channel of `image`.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let data = image.pixels().map(|p| p.0[3]).collect();
        Self {
            width: image.width(),
            height: image.height(),
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw coverage bytes, row-major, `width × height` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at a pixel; out-of-bounds reads as fully transparent.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y * self.width + x) as usize]
    }

    /// True where the image has any opacity at all. The sweep shows on
    /// every non-transparent pixel, however faint.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.alpha_at(x, y) > 0
    }
}
