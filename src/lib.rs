pub mod keywords;
pub mod tree;
pub mod layout;
pub mod surface;
pub mod render;
pub mod engine;
pub mod font;
pub mod raster;
pub mod svg;
pub mod record;
pub mod config;
pub mod error;
pub mod export;
pub mod batch;
pub mod viewer;

pub use keywords::{extract_keywords, compose_text, MAX_KEYWORDS, STOP_WORDS};
pub use tree::{MindMapNode, build_tree};
pub use layout::RadialLayout;
pub use surface::{Color, FontWeight, Point, Rect, Size, Surface};
pub use render::{RenderStyle, render_mind_map};
pub use engine::{build_mind_map, generate_mind_map};
pub use raster::PixelBuffer;
pub use svg::SvgSurface;
pub use record::{DrawOp, RecordingSurface};
pub use config::Settings;
pub use error::{Error, Result};
pub use export::{OutputFormat, export_map, write_tree_json};
pub use batch::{BatchReport, render_directory};
pub use viewer::{ViewerState, spawn_viewer};
