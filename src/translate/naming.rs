//! Class-name and component-name derivation.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::figma::api_types::DesignNode;

pub const DEFAULT_COMPONENT_NAME: &str = "FigmaComponent";

/// Identifiers the generated modules bind or use as globals. PascalCased
/// names never collide with lowercase JS keywords.
const RESERVED_COMPONENT_NAMES: &[&str] = &[
    "React", "ReactDOM", "Infinity", "NaN", "Object", "Function", "Array", "String", "Number",
    "Boolean", "Symbol", "Error", "Promise", "Map", "Set", "Date", "Math", "JSON",
];

fn non_alnum() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"))
}

/// `"Hero Section / Main"` -> `"hero-section-main"`.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    non_alnum()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// PascalCase JS identifier for a component. Digit-leading and reserved names
/// get a `Figma` prefix.
pub fn component_name_for(name: &str) -> String {
    let mut out = String::new();
    for word in name.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }

    if out.is_empty() {
        return DEFAULT_COMPONENT_NAME.to_string();
    }
    let reserved = RESERVED_COMPONENT_NAMES.contains(&out.as_str());
    if reserved || out.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("Figma{out}");
    }
    out
}

/// Hands out unique class names in document order.
#[derive(Debug, Default)]
pub struct ClassNames {
    used: HashSet<String>,
}

impl ClassNames {
    pub fn for_node(&mut self, node: &DesignNode) -> String {
        let kind = node.kind.slug();
        let name = slugify(&node.name);
        let base = if name.is_empty() {
            kind
        } else if name == kind || name.starts_with(&format!("{kind}-")) {
            name
        } else {
            format!("{kind}-{name}")
        };
        self.allocate(&base)
    }

    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
