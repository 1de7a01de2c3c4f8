//! Guesses about a node's role that its kind alone does not tell us.

use regex::Regex;
use std::sync::OnceLock;

use crate::figma::api_types::{DesignNode, NodeKind};

pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

fn heading_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bh([1-6])\b").expect("valid heading pattern"))
}

fn name_tokens(name: &str) -> impl Iterator<Item = String> + '_ {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

pub fn is_button(node: &DesignNode) -> bool {
    if !matches!(
        node.kind,
        NodeKind::Rectangle | NodeKind::Frame | NodeKind::Instance | NodeKind::Component
    ) {
        return false;
    }
    let name = node.name.to_lowercase();
    name.contains("button")
        || name.contains("clickable")
        || name_tokens(&node.name).any(|t| t == "btn")
        || !node.reactions.is_empty()
}

/// Heading level for a TEXT node, or `None` for body text.
pub fn heading_level(node: &DesignNode) -> Option<u8> {
    if node.kind != NodeKind::Text {
        return None;
    }
    let size = node.style.as_ref().and_then(|s| s.font_size);
    let weight = node.style.as_ref().and_then(|s| s.font_weight);

    let heading = node.name.to_lowercase().contains("heading")
        || size.is_some_and(|s| s >= 24.0)
        || weight.is_some_and(|w| w >= 600.0);
    if !heading {
        return None;
    }

    if let Some(level) = heading_token()
        .captures(&node.name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
    {
        return Some(level);
    }

    let level = match size {
        Some(s) if s < 20.0 => 4,
        Some(s) if s < 24.0 => 3,
        Some(s) if s < 30.0 => 2,
        _ => 1,
    };
    Some(level)
}

/// Sectioning element suggested by a frame's name.
pub fn landmark_for(node: &DesignNode) -> Option<&'static str> {
    if node.kind != NodeKind::Frame {
        return None;
    }
    name_tokens(&node.name).find_map(|token| match token.as_str() {
        "header" => Some("header"),
        "footer" => Some("footer"),
        "nav" | "navbar" | "navigation" => Some("nav"),
        _ => None,
    })
}

/// Index of the largest visible FRAME among top-level siblings.
pub fn main_frame_index(siblings: &[DesignNode]) -> Option<usize> {
    siblings
        .iter()
        .enumerate()
        .filter(|(_, n)| n.visible && n.kind == NodeKind::Frame)
        .fold(None, |best: Option<(usize, f32)>, (i, n)| match best {
            Some((_, area)) if area >= n.area() => best,
            _ => Some((i, n.area())),
        })
        .map(|(i, _)| i)
}
