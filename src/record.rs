// Headless surface that keeps a log of drawing calls instead of pixels.

use crate::surface::{Color, FontWeight, Point, Rect, Size, Surface};

/// Nominal glyph box used for text measurement
const CHAR_WIDTH: f64 = 8.0;
const LINE_HEIGHT: f64 = 14.0;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Color),
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f64,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        fill: Color,
    },
    Text {
        center: Point,
        text: String,
        color: Color,
        weight: FontWeight,
    },
}

/// Records every call. `clear` drops the log, so `ops()` always describes
/// what is currently on the surface.
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of node boxes currently drawn
    pub fn node_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::RoundedRect { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn clear(&mut self, background: Color) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear(background));
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.ops.push(DrawOp::Line { from, to, color, width });
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) {
        self.ops.push(DrawOp::RoundedRect { rect, radius, fill });
    }

    fn text(&mut self, center: Point, text: &str, color: Color, weight: FontWeight) {
        self.ops.push(DrawOp::Text {
            center,
            text: text.to_string(),
            color,
            weight,
        });
    }

    fn measure_text(&self, text: &str, weight: FontWeight) -> Size {
        let extra = if weight == FontWeight::Bold { 1.0 } else { 0.0 };
        Size::new(text.chars().count() as f64 * CHAR_WIDTH + extra, LINE_HEIGHT)
    }
}
