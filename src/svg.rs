use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::surface::{Color, FontWeight, Point, Rect, Size, Surface};

pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Average glyph advance as a fraction of the font size (sans-serif estimate)
const AVG_CHAR_WIDTH: f64 = 0.6;
const BOLD_CHAR_WIDTH: f64 = 0.65;

/// Builds a standalone SVG document from drawing calls.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    font_size: f64,
    elements: Vec<String>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface {
            width,
            height,
            font_size: DEFAULT_FONT_SIZE,
            elements: Vec::new(),
        }
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size.max(1.0);
        self
    }

    pub fn finish(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = self.width,
            h = self.height,
        );
        for el in &self.elements {
            out.push_str("  ");
            out.push_str(el);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.finish())?;
        info!(path = %path.display(), "wrote svg");
        Ok(())
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Surface for SvgSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn clear(&mut self, background: Color) {
        self.elements.clear();
        self.elements.push(format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            background
        ));
    }

    fn line(&mut self, from: Point, to: Point, color: Color, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{}"/>"#,
            from.x, from.y, to.x, to.y, color, width
        ));
    }

    fn rounded_rect(&mut self, rect: Rect, radius: f64, fill: Color) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{}" fill="{}"/>"#,
            rect.x, rect.y, rect.width, rect.height, radius, fill
        ));
    }

    fn text(&mut self, center: Point, text: &str, color: Color, weight: FontWeight) {
        let weight = match weight {
            FontWeight::Bold => "bold",
            FontWeight::Normal => "normal",
        };
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" fill="{}" font-family="sans-serif" font-size="{}" font-weight="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            center.x,
            center.y,
            color,
            self.font_size,
            weight,
            escape_xml(text)
        ));
    }

    fn measure_text(&self, text: &str, weight: FontWeight) -> Size {
        let per_char = match weight {
            FontWeight::Bold => BOLD_CHAR_WIDTH,
            FontWeight::Normal => AVG_CHAR_WIDTH,
        };
        Size::new(
            text.chars().count() as f64 * self.font_size * per_char,
            self.font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let mut svg = SvgSurface::new(200, 100);
        svg.clear(Color::WHITE);
        svg.line(Point::new(0.0, 0.0), Point::new(10.0, 20.0), Color::BLACK, 2.0);
        svg.rounded_rect(
            Rect { x: 5.0, y: 5.0, width: 50.0, height: 20.0 },
            8.0,
            Color(0x4F46E5),
        );
        svg.text(Point::new(30.0, 15.0), "Heat", Color::WHITE, FontWeight::Bold);

        let doc = svg.finish();
        assert!(doc.starts_with("<svg "));
        assert!(doc.contains(r#"viewBox="0 0 200 100""#));
        assert!(doc.contains(r##"fill="#FFFFFF""##));
        assert!(doc.contains(r#"<line x1="0.0" y1="0.0" x2="10.0" y2="20.0""#));
        assert!(doc.contains(r#"rx="8""#));
        assert!(doc.contains(r#"font-weight="bold""#));
        assert!(doc.contains(">Heat</text>"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_clear_drops_previous_elements() {
        let mut svg = SvgSurface::new(100, 100);
        svg.clear(Color::WHITE);
        svg.text(Point::new(1.0, 1.0), "First", Color::BLACK, FontWeight::Normal);
        svg.clear(Color::WHITE);
        svg.text(Point::new(1.0, 1.0), "Second", Color::BLACK, FontWeight::Normal);

        let doc = svg.finish();
        assert!(!doc.contains("First"));
        assert!(doc.contains("Second"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgSurface::new(100, 100);
        svg.text(Point::new(1.0, 1.0), "Salt & <Pepper>", Color::BLACK, FontWeight::Normal);
        assert!(svg.finish().contains("Salt &amp; &lt;Pepper&gt;"));
    }

    #[test]
    fn test_measure_scales_with_font() {
        let small = SvgSurface::new(10, 10).with_font_size(10.0);
        let large = SvgSurface::new(10, 10).with_font_size(20.0);
        let a = small.measure_text("Tree", FontWeight::Normal);
        let b = large.measure_text("Tree", FontWeight::Normal);
        assert!((a.width - 24.0).abs() < 1e-9);
        assert!((b.width - 2.0 * a.width).abs() < 1e-9);
        assert_eq!(b.height, 20.0);
    }
}
