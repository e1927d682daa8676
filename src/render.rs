use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::RadialLayout;
use crate::surface::{Color, FontWeight, Point, Rect, Size, Surface};
use crate::tree::MindMapNode;

/// Colors and spacing used when drawing a map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub background: Color,
    pub root_fill: Color,
    pub child_fill: Color,
    pub line_color: Color,
    pub text_color: Color,
    pub line_width: f64,
    /// Horizontal space between label and box edge
    pub padding_x: f64,
    pub padding_y: f64,
    pub corner_radius: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        RenderStyle {
            background: Color::WHITE,
            root_fill: Color(0x4F46E5),
            child_fill: Color(0x0EA5E9),
            line_color: Color(0x94A3B8),
            text_color: Color::WHITE,
            line_width: 2.0,
            padding_x: 12.0,
            padding_y: 8.0,
            corner_radius: 8.0,
        }
    }
}

/// Draw `tree` as a radial mind map.
///
/// A missing or zero-sized surface is not an error: nothing is drawn. Each
/// call clears the surface first, so redrawing with a new tree replaces
/// the previous map completely. Only the root's direct children are drawn.
pub fn render_mind_map<S: Surface + ?Sized>(
    surface: Option<&mut S>,
    tree: &MindMapNode,
    style: &RenderStyle,
) {
    let Some(surface) = surface else {
        debug!("no render target, skipping mind map");
        return;
    };

    let size = surface.size();
    if size.is_empty() {
        debug!(width = size.width, height = size.height, "empty render target, skipping mind map");
        return;
    }

    surface.clear(style.background);

    let branches = tree.branches();
    let layout = RadialLayout::compute(size, branches.len());

    // Connectors first so node boxes sit on top of them
    for pos in &layout.children {
        surface.line(layout.center, *pos, style.line_color, style.line_width);
    }

    for (child, pos) in branches.iter().zip(layout.children.iter()) {
        draw_node(surface, *pos, &child.label, style.child_fill, style);
    }

    draw_node(surface, layout.center, &tree.label, style.root_fill, style);

    debug!(topic = %tree.label, branches = branches.len(), "rendered mind map");
}

fn draw_node<S: Surface + ?Sized>(
    surface: &mut S,
    center: Point,
    label: &str,
    fill: Color,
    style: &RenderStyle,
) {
    let text = surface.measure_text(label, FontWeight::Bold);
    let box_size = Size::new(
        text.width + 2.0 * style.padding_x,
        text.height + 2.0 * style.padding_y,
    );

    surface.rounded_rect(Rect::centered(center, box_size), style.corner_radius, fill);
    surface.text(center, label, style.text_color, FontWeight::Bold);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DrawOp, RecordingSurface};
    use crate::tree::build_tree;

    fn labels(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_missing_surface_is_noop() {
        let tree = build_tree("Gravity", &labels(&["Mass"]));
        render_mind_map::<RecordingSurface>(None, &tree, &RenderStyle::default());
    }

    #[test]
    fn test_zero_sized_surface_draws_nothing() {
        let mut surface = RecordingSurface::new(0, 500);
        let tree = build_tree("Gravity", &labels(&["Mass"]));
        render_mind_map(Some(&mut surface), &tree, &RenderStyle::default());
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_root_only() {
        let mut surface = RecordingSurface::new(800, 500);
        let tree = build_tree("Gravity", &[]);
        render_mind_map(Some(&mut surface), &tree, &RenderStyle::default());

        assert_eq!(surface.node_count(), 1);
        assert_eq!(surface.line_count(), 0);
        assert_eq!(surface.texts(), vec!["Gravity"]);
    }

    #[test]
    fn test_lines_only_from_root() {
        let mut surface = RecordingSurface::new(800, 500);
        let tree = build_tree("Gravity", &labels(&["Mass", "Orbit", "Weight"]));
        let style = RenderStyle::default();
        render_mind_map(Some(&mut surface), &tree, &style);

        let layout = RadialLayout::compute(Size::new(800.0, 500.0), 3);
        let lines: Vec<(Point, Point)> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect();

        assert_eq!(lines.len(), 3);
        for ((from, to), want) in lines.iter().zip(layout.children.iter()) {
            assert_eq!(*from, layout.center);
            assert_eq!(to, want);
        }
        assert_eq!(surface.node_count(), 4);
    }

    #[test]
    fn test_root_drawn_last_with_root_fill() {
        let mut surface = RecordingSurface::new(800, 500);
        let style = RenderStyle::default();
        let tree = build_tree("Gravity", &labels(&["Mass"]));
        render_mind_map(Some(&mut surface), &tree, &style);

        let fills: Vec<Color> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::RoundedRect { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![style.child_fill, style.root_fill]);
        assert_eq!(surface.texts(), vec!["Mass", "Gravity"]);
    }

    #[test]
    fn test_box_fits_label() {
        let mut surface = RecordingSurface::new(800, 500);
        let style = RenderStyle::default();
        let tree = build_tree("Gravity", &[]);
        render_mind_map(Some(&mut surface), &tree, &style);

        let measured = surface.measure_text("Gravity", FontWeight::Bold);
        let rect = surface
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::RoundedRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .unwrap();
        assert_eq!(rect.width, measured.width + 2.0 * style.padding_x);
        assert_eq!(rect.height, measured.height + 2.0 * style.padding_y);
    }

    #[test]
    fn test_grandchildren_ignored() {
        let mut tree = build_tree("Gravity", &labels(&["Mass"]));
        tree.children[0]
            .children
            .push(crate::tree::MindMapNode::leaf("Kilogram", "node-0-0".to_string()));

        let mut surface = RecordingSurface::new(800, 500);
        render_mind_map(Some(&mut surface), &tree, &RenderStyle::default());
        assert_eq!(surface.node_count(), 2);
        assert!(!surface.texts().contains(&"Kilogram".to_string()));
    }
}
