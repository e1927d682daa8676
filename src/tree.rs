use serde::{Deserialize, Serialize};

/// A node of a mind map: the root topic or one of its branches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub label: String,
    /// Stable id for branch nodes (`node-0`, `node-1`, ...); the root has none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    pub fn root(label: &str) -> Self {
        MindMapNode {
            label: label.to_string(),
            id: None,
            children: Vec::new(),
        }
    }

    pub fn leaf(label: &str, id: String) -> Self {
        MindMapNode {
            label: label.to_string(),
            id: Some(id),
            children: Vec::new(),
        }
    }

    /// Direct children only. Anything nested below them is not part of a
    /// radial map and is ignored by the renderer.
    pub fn branches(&self) -> &[MindMapNode] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrap ranked keywords into a one-level tree under `topic`.
///
/// The root label is the topic exactly as given; branches keep keyword order.
pub fn build_tree(topic: &str, keywords: &[String]) -> MindMapNode {
    let mut root = MindMapNode::root(topic);
    root.children = keywords
        .iter()
        .enumerate()
        .map(|(i, word)| MindMapNode::leaf(word, format!("node-{}", i)))
        .collect();
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_build_tree_ids_and_order() {
        let tree = build_tree("Rivers", &words(&["Delta", "Erosion", "Basin"]));

        assert_eq!(tree.label, "Rivers");
        assert_eq!(tree.id, None);
        assert_eq!(tree.depth(), 1);

        let labels: Vec<&str> = tree.children.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Delta", "Erosion", "Basin"]);

        let ids: Vec<&str> = tree.children.iter().filter_map(|c| c.id.as_deref()).collect();
        assert_eq!(ids, vec!["node-0", "node-1", "node-2"]);
        assert!(tree.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_root_label_is_verbatim() {
        let tree = build_tree("  the Water CYCLE!  ", &[]);
        assert_eq!(tree.label, "  the Water CYCLE!  ");
        assert_eq!(tree.depth(), 0);
        assert!(tree.branches().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let tree = build_tree("Atoms", &words(&["Proton"]));
        let json = tree.to_json().unwrap();
        let back: MindMapNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
        // root carries no id field
        assert!(!json.contains("\"id\": null"));
        assert!(json.contains("\"id\": \"node-0\""));
    }
}
