use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::info;

use crate::error::Result;
use crate::font::{self, ADVANCE, GLYPH_WIDTH};
use crate::surface::{Color, FontWeight, Point, Rect, Size, Surface};

pub const DEFAULT_FONT_SCALE: usize = 3;

/// Software framebuffer of `0x00RRGGBB` pixels, row-major.
///
/// The pixel layout is what `minifb::Window::update_with_buffer` takes, so the
/// same buffer can be shown in a window or written out as a PNG.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    font_scale: usize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            width,
            height,
            font_scale: DEFAULT_FONT_SCALE,
            pixels: vec![0; width * height],
        }
    }

    pub fn with_font_scale(mut self, scale: usize) -> Self {
        self.font_scale = scale.max(1);
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color(self.pixels[y * self.width + x]))
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color.0;
    }

    fn fill_block(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        for py in y..y + h {
            for px in x..x + w {
                self.put(px, py, color);
            }
        }
    }

    fn draw_glyph(&mut self, x: i64, y: i64, ch: char, color: Color) {
        let s = self.font_scale as i64;
        for (dy, row) in font::glyph(ch).iter().enumerate() {
            for dx in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - dx)) != 0 {
                    self.fill_block(x + dx as i64 * s, y + dy as i64 * s, s, s, color);
                }
            }
        }
    }

    fn draw_string(&mut self, x: i64, y: i64, text: &str, color: Color) {
        let step = (ADVANCE * self.font_scale) as i64;
        for (i, ch) in text.chars().enumerate() {
            self.draw_glyph(x + i as i64 * step, y, ch, color);
        }
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            Rgb(Color(self.pixels[y as usize * self.width + x as usize]).channels())
        })
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_rgb_image().save_with_format(path, ImageFormat::Png)?;
        info!(path = %path.display(), "wrote png");
        Ok(())
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn clear(&mut self, background: Color) {
        self.pixels.fill(background.0);
    }

    // Bresenham, stamping a square brush of the requested width
    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        let brush = width.round().max(1.0) as i64;
        let offset = brush / 2;

        let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
        let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.fill_block(x0 - offset, y0 - offset, brush, brush, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) {
        let r = radius.max(0.0).min(rect.width / 2.0).min(rect.height / 2.0);
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.x + rect.width, rect.y + rect.height);

        let x_start = left.floor().max(0.0) as usize;
        let y_start = top.floor().max(0.0) as usize;
        let x_end = (right.ceil().max(0.0) as usize).min(self.width);
        let y_end = (bottom.ceil().max(0.0) as usize).min(self.height);

        for py in y_start..y_end {
            for px in x_start..x_end {
                let cx = px as f64 + 0.5;
                let cy = py as f64 + 0.5;
                if cx < left || cx > right || cy < top || cy > bottom {
                    continue;
                }
                // distance to the nearest point of the inner (corner-center) rectangle
                let nx = cx.clamp(left + r, right - r);
                let ny = cy.clamp(top + r, bottom - r);
                let (ddx, ddy) = (cx - nx, cy - ny);
                if ddx * ddx + ddy * ddy <= r * r {
                    self.pixels[py * self.width + px] = fill.0;
                }
            }
        }
    }

    fn text(&mut self, center: Point, text: &str, color: Color, weight: FontWeight) {
        let extent = self.measure_text(text, weight);
        let x = (center.x - extent.width / 2.0).round() as i64;
        let y = (center.y - extent.height / 2.0).round() as i64;

        self.draw_string(x, y, text, color);
        if weight == FontWeight::Bold {
            // double strike, one pixel to the right
            self.draw_string(x + 1, y, text, color);
        }
    }

    fn measure_text(&self, text: &str, weight: FontWeight) -> Size {
        let (w, h) = font::text_extent(text, self.font_scale);
        let bold = if weight == FontWeight::Bold && w > 0 { 1 } else { 0 };
        Size::new((w + bold) as f64, h as f64)
    }
}
