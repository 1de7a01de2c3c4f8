//! Stylesheet model: one class rule per rendered node.

use std::fmt::Write as _;

/// Ordered CSS declarations; setting a property twice replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations {
    entries: Vec<(&'static str, String)>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Set only when the property is not already present.
    pub fn set_default(&mut self, property: &'static str, value: impl Into<String>) {
        if !self.contains(property) {
            self.entries.push((property, value.into()));
        }
    }

    pub fn extend(&mut self, other: Declarations) {
        for (property, value) in other.entries {
            self.set(property, value);
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries.iter().map(|(p, v)| (*p, v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Declarations,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn push_class(&mut self, class: &str, declarations: Declarations) {
        if declarations.is_empty() {
            return;
        }
        self.rules.push(CssRule {
            selector: format!(".{class}"),
            declarations,
        });
    }

    /// Like [`push_class`](Self::push_class) but at a given position.
    pub fn insert_class(&mut self, index: usize, class: &str, declarations: Declarations) {
        if declarations.is_empty() {
            return;
        }
        let index = index.min(self.rules.len());
        self.rules.insert(
            index,
            CssRule {
                selector: format!(".{class}"),
                declarations,
            },
        );
    }

    pub fn rule(&self, selector: &str) -> Option<&CssRule> {
        self.rules.iter().find(|r| r.selector == selector)
    }

    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{} {{", rule.selector);
            for (property, value) in rule.declarations.iter() {
                let _ = writeln!(out, "  {property}: {value};");
            }
            out.push_str("}\n");
        }
        out
    }
}
