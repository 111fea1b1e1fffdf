use crate::layout::{LineCap, Sparkle, Stroke};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, DynamicImage, ImageBuffer, ImageEncoder, Rgba, RgbaImage,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Square raster buffer the icon is drawn into
///
/// An opaque canvas starts filled with its background color and is written
/// out as RGB; a transparent canvas starts fully clear and keeps its alpha
/// channel on output.
pub struct Canvas {
    image: RgbaImage,
    opaque: bool,
}

impl Canvas {
    pub fn opaque(size: u32, background: Rgba<u8>) -> Self {
        let background = Rgba([background[0], background[1], background[2], 255]);
        Self {
            image: ImageBuffer::from_fn(size, size, |_, _| background),
            opaque: true,
        }
    }

    pub fn transparent(size: u32) -> Self {
        Self {
            image: ImageBuffer::from_fn(size, size, |_, _| Rgba([0, 0, 0, 0])),
            opaque: false,
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Paint every pixel whose center lies within `width / 2` of the segment.
    /// Round caps extend half a pen width past each end point; flat caps stop
    /// square at the end points.
    pub fn draw_stroke(&mut self, stroke: &Stroke) {
        let half_width = stroke.width as f32 / 2.0;
        let (ax, ay) = (stroke.from.x as f32, stroke.from.y as f32);
        let (bx, by) = (stroke.to.x as f32, stroke.to.y as f32);
        let (dx, dy) = (bx - ax, by - ay);
        let length_sq = dx * dx + dy * dy;

        let reach = half_width.ceil() as i64;
        let min_x = stroke.from.x.min(stroke.to.x) as i64 - reach;
        let max_x = stroke.from.x.max(stroke.to.x) as i64 + reach;
        let min_y = stroke.from.y.min(stroke.to.y) as i64 - reach;
        let max_y = stroke.from.y.max(stroke.to.y) as i64 + reach;

        self.paint_region(min_x, max_x, min_y, max_y, stroke.color, |x, y| {
            let (px, py) = (x as f32, y as f32);

            // Project onto the segment; a zero-length segment is a dot
            let t = if length_sq == 0.0 {
                0.0
            } else {
                ((px - ax) * dx + (py - ay) * dy) / length_sq
            };

            let t = match stroke.cap {
                LineCap::Flat if !(0.0..=1.0).contains(&t) => return false,
                LineCap::Flat => t,
                LineCap::Round => t.clamp(0.0, 1.0),
            };

            let (cx, cy) = (ax + t * dx, ay + t * dy);
            let distance = ((px - cx) * (px - cx) + (py - cy) * (py - cy)).sqrt();
            distance <= half_width
        });
    }

    pub fn fill_circle(&mut self, sparkle: &Sparkle) {
        let radius = sparkle.radius as i64;
        let (cx, cy) = (sparkle.center.x as i64, sparkle.center.y as i64);

        self.paint_region(
            cx - radius,
            cx + radius,
            cy - radius,
            cy + radius,
            sparkle.color,
            |x, y| (x - cx) * (x - cx) + (y - cy) * (y - cy) <= radius * radius,
        );
    }

    /// Paint the covered pixels of a bounding box, clipped to the canvas
    fn paint_region<F>(
        &mut self,
        min_x: i64,
        max_x: i64,
        min_y: i64,
        max_y: i64,
        color: Rgba<u8>,
        covers: F,
    ) where
        F: Fn(i64, i64) -> bool,
    {
        let last = self.size() as i64 - 1;
        if last < 0 || max_x < 0 || max_y < 0 || min_x > last || min_y > last {
            return;
        }

        for y in min_y.max(0)..=max_y.min(last) {
            for x in min_x.max(0)..=max_x.min(last) {
                if covers(x, y) {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Convert into the image that gets written to disk
    pub fn into_image(self) -> DynamicImage {
        let image = DynamicImage::ImageRgba8(self.image);
        if self.opaque {
            DynamicImage::ImageRgb8(image.to_rgb8())
        } else {
            image
        }
    }

    pub fn save_png(self, path: &Path) -> Result<()> {
        let size = self.size();
        let image = self.into_image();

        let file = File::create(path)
            .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
        let mut out_file = BufWriter::new(file);

        match &image {
            DynamicImage::ImageRgb8(rgb) => {
                write_png(rgb.as_raw(), &mut out_file, size, ColorType::Rgb8)?
            }
            other => write_png(other.to_rgba8().as_raw(), &mut out_file, size, ColorType::Rgba8)?,
        }

        out_file
            .flush()
            .with_context(|| format!("Failed to write PNG {}", path.display()))?;
        Ok(())
    }
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, size: u32, color: ColorType) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(image_data, size, size, color)
        .context("Failed to encode PNG")?;
    Ok(())
}
