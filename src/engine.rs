use tracing::debug;

use crate::keywords::{compose_text, extract_keywords};
use crate::render::{RenderStyle, render_mind_map};
use crate::surface::Surface;
use crate::tree::{MindMapNode, build_tree};

/// Extract keywords from the topic and description and wrap them in a tree
pub fn build_mind_map(topic: &str, description: Option<&str>) -> MindMapNode {
    let text = compose_text(topic, description);
    let keywords = extract_keywords(&text);
    debug!(topic, keywords = ?keywords, "extracted keywords");
    build_tree(topic, &keywords)
}

/// Build a mind map for `topic` and draw it on `surface`.
///
/// Works fully offline. Without a surface nothing is drawn and nothing fails.
pub fn generate_mind_map<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    topic: &str,
    description: Option<&str>,
    style: &RenderStyle,
) {
    let tree = build_mind_map(topic, description);
    render_mind_map(surface, &tree, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordingSurface;

    #[test]
    fn test_description_feeds_keywords() {
        let tree = build_mind_map(
            "Volcano",
            Some("Magma rises, magma cools; lava flows from the volcano"),
        );
        let labels: Vec<&str> = tree.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(tree.label, "Volcano");
        assert_eq!(labels, vec!["Volcano", "Magma", "Rises", "Cools", "Lava", "Flows"]);
    }

    #[test]
    fn test_generate_draws_root_and_branches() {
        let mut surface = RecordingSurface::new(800, 500);
        generate_mind_map(
            Some(&mut surface),
            "Fractions",
            Some("numerator denominator"),
            &RenderStyle::default(),
        );
        assert_eq!(surface.node_count(), 4);
        assert_eq!(surface.line_count(), 3);
    }

    #[test]
    fn test_generate_without_surface() {
        generate_mind_map::<RecordingSurface>(None, "Fractions", None, &RenderStyle::default());
    }
}
