//! Read-only queries over a design node tree.

use std::collections::BTreeSet;

use tracing::warn;

use super::api_types::{DesignNode, NodeKind, PaintType};

/// Figma URLs encode node ids with `-`; the API uses `:`.
pub fn normalize_node_id(id: &str) -> String {
    id.trim().replace('-', ":")
}

/// All TEXT `characters` in depth-first pre-order.
pub fn extract_text_content(node: &DesignNode) -> Vec<String> {
    let mut texts = Vec::new();
    walk(node, &mut |n| {
        if n.kind == NodeKind::Text {
            if let Some(chars) = n.characters.as_ref().filter(|c| !c.is_empty()) {
                texts.push(chars.clone());
            }
        }
    });
    texts
}

pub fn find_nodes_by_type<'a>(node: &'a DesignNode, kind: &NodeKind) -> Vec<&'a DesignNode> {
    let mut found = Vec::new();
    collect_by_type(node, kind, &mut found);
    found
}

fn collect_by_type<'a>(node: &'a DesignNode, kind: &NodeKind, acc: &mut Vec<&'a DesignNode>) {
    if &node.kind == kind {
        acc.push(node);
    }
    for child in &node.children {
        collect_by_type(child, kind, acc);
    }
}

pub fn find_node_by_id<'a>(node: &'a DesignNode, id: &str) -> Option<&'a DesignNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter()
        .find_map(|child| find_node_by_id(child, id))
}

/// Figma image refs are hex hashes; anything else never reaches a path or a URL.
pub fn is_valid_image_ref(image_ref: &str) -> bool {
    !image_ref.is_empty() && image_ref.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Image refs of every visible IMAGE fill among visible nodes.
pub fn collect_image_refs(node: &DesignNode) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    walk(node, &mut |n| {
        for paint in n.fills.iter().filter(|p| p.visible) {
            if paint.paint_type == PaintType::Image {
                if let Some(image_ref) = &paint.image_ref {
                    if is_valid_image_ref(image_ref) {
                        refs.insert(image_ref.clone());
                    } else {
                        warn!(node = %n.id, image_ref = %image_ref, "skipping malformed image ref");
                    }
                }
            }
        }
    });
    refs
}

pub fn count_nodes(node: &DesignNode) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}

/// Pre-order walk that skips hidden subtrees.
fn walk<'a>(node: &'a DesignNode, visit: &mut dyn FnMut(&'a DesignNode)) {
    if !node.visible {
        return;
    }
    visit(node);
    for child in &node.children {
        walk(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::api_types::Paint;

    fn text(id: &str, chars: &str) -> DesignNode {
        DesignNode {
            id: id.into(),
            name: format!("Text {id}"),
            kind: NodeKind::Text,
            characters: Some(chars.into()),
            ..DesignNode::default()
        }
    }

    fn frame(id: &str, children: Vec<DesignNode>) -> DesignNode {
        DesignNode {
            id: id.into(),
            name: format!("Frame {id}"),
            kind: NodeKind::Frame,
            children,
            ..DesignNode::default()
        }
    }

    #[test]
    fn extract_text_content_is_preorder_and_skips_hidden() {
        let mut hidden = text("4", "secret");
        hidden.visible = false;
        let tree = frame(
            "1",
            vec![
                text("2", "Title"),
                frame("3", vec![text("5", "Body"), hidden]),
                text("6", "Footer"),
            ],
        );

        assert_eq!(extract_text_content(&tree), vec!["Title", "Body", "Footer"]);
    }

    #[test]
    fn find_nodes_by_type_includes_root() {
        let tree = frame("1", vec![frame("2", vec![]), text("3", "x")]);
        let frames = find_nodes_by_type(&tree, &NodeKind::Frame);
        let ids: Vec<&str> = frames.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn find_node_by_id_searches_nested_children() {
        let tree = frame("1:1", vec![frame("1:2", vec![text("1:3", "deep")])]);
        let found = find_node_by_id(&tree, "1:3").expect("node");
        assert_eq!(found.characters.as_deref(), Some("deep"));
        assert!(find_node_by_id(&tree, "9:9").is_none());
    }

    #[test]
    fn collect_image_refs_dedupes_and_ignores_hidden_paints() {
        let image = |r: &str, visible: bool| Paint {
            paint_type: PaintType::Image,
            image_ref: Some(r.into()),
            visible,
            ..Paint::default()
        };
        let mut a = frame("2", vec![]);
        a.fills = vec![image("abc", true), image("hidden", false)];
        let mut b = frame("3", vec![]);
        b.fills = vec![image("abc", true), image("def", true)];
        let tree = frame("1", vec![a, b]);

        let refs: Vec<String> = collect_image_refs(&tree).into_iter().collect();
        assert_eq!(refs, vec!["abc", "def"]);
    }

    #[test]
    fn collect_image_refs_skips_malformed_refs() {
        let mut node = frame("1", vec![]);
        node.fills = ["x/../../etc/evil", "a');background:url('x", "", "9f8e7d"]
            .into_iter()
            .map(|r| Paint {
                paint_type: PaintType::Image,
                image_ref: Some(r.into()),
                ..Paint::default()
            })
            .collect();

        let refs: Vec<String> = collect_image_refs(&node).into_iter().collect();
        assert_eq!(refs, vec!["9f8e7d"]);
        assert!(is_valid_image_ref("ABC123"));
        assert!(!is_valid_image_ref("a.b"));
    }

    #[test]
    fn normalize_node_id_replaces_dashes() {
        assert_eq!(normalize_node_id(" 1-903 "), "1:903");
        assert_eq!(normalize_node_id("12:34"), "12:34");
    }

    #[test]
    fn count_nodes_counts_every_descendant() {
        let tree = frame("1", vec![frame("2", vec![text("3", "a")]), text("4", "b")]);
        assert_eq!(count_nodes(&tree), 4);
    }
}
