// Writing rendered maps to disk: PNG through the pixel buffer, SVG as text,
// and the tree itself as JSON.

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::raster::PixelBuffer;
use crate::render::render_mind_map;
use crate::svg::SvgSurface;
use crate::tree::MindMapNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<OutputFormat> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "svg" => Ok(OutputFormat::Svg),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

pub fn render_png(tree: &MindMapNode, settings: &Settings) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(settings.canvas.width, settings.canvas.height)
        .with_font_scale(settings.font_scale);
    render_mind_map(Some(&mut buffer), tree, &settings.style);
    buffer
}

pub fn render_svg(tree: &MindMapNode, settings: &Settings) -> SvgSurface {
    let mut svg = SvgSurface::new(settings.canvas.width as u32, settings.canvas.height as u32)
        .with_font_size(settings.font_size);
    render_mind_map(Some(&mut svg), tree, &settings.style);
    svg
}

/// Render `tree` and write it to `path` in the given format
pub fn export_map(
    tree: &MindMapNode,
    settings: &Settings,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Png => render_png(tree, settings).save_png(path),
        OutputFormat::Svg => render_svg(tree, settings).save(path),
    }
}

pub fn write_tree_json(tree: &MindMapNode, path: &Path) -> Result<()> {
    fs::write(path, tree.to_json()?)?;
    info!(path = %path.display(), "wrote tree json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_mind_map;

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a/map.PNG")).unwrap(), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("map.svg")).unwrap(), OutputFormat::Svg);
        assert!(matches!(
            OutputFormat::from_path(Path::new("map.gif")),
            Err(Error::UnsupportedFormat(_))
        ));
        assert!(OutputFormat::from_path(Path::new("map")).is_err());
    }

    #[test]
    fn test_export_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::default();
        let tree = build_mind_map("Magnetism", Some("poles attract, poles repel"));

        let png = dir.path().join("map.png");
        export_map(&tree, &settings, &png, OutputFormat::Png).unwrap();
        let img = image::open(&png).unwrap();
        assert_eq!(
            (img.width() as usize, img.height() as usize),
            (settings.canvas.width, settings.canvas.height)
        );

        let svg = dir.path().join("map.svg");
        export_map(&tree, &settings, &svg, OutputFormat::Svg).unwrap();
        let doc = fs::read_to_string(&svg).unwrap();
        assert!(doc.contains(">Magnetism</text>"));
        assert!(doc.contains(">Poles</text>"));
    }

    #[test]
    fn test_tree_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let tree = build_mind_map("Magnetism", Some("poles attract"));
        write_tree_json(&tree, &path).unwrap();

        let back: MindMapNode = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, tree);
    }
}
