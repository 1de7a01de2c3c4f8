//! Element tree emitted by the translator and its textual rendering.

use serde::{Deserialize, Serialize};

/// Markup flavour: JSX for React components, plain HTML otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Jsx,
    Html,
}

impl Dialect {
    fn attr_name(self, attr: Attr) -> &'static str {
        match (self, attr) {
            (Dialect::Jsx, Attr::Class) => "className",
            (Dialect::Html, Attr::Class) => "class",
            (Dialect::Jsx, Attr::For) => "htmlFor",
            (Dialect::Html, Attr::For) => "for",
            (_, Attr::Named(name)) => name,
        }
    }
}

/// Attribute keys whose spelling differs between dialects get their own variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Class,
    For,
    Named(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Markup {
    Element(Element),
    Text(String),
    /// Whitespace-significant text (code blocks).
    Preformatted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(Attr, String)>,
    pub children: Vec<Markup>,
}

const VOID_TAGS: &[&str] = &["input", "br", "img", "hr"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.attrs.push((Attr::Class, class.into()));
        self
    }

    pub fn attr(mut self, attr: Attr, value: impl Into<String>) -> Self {
        self.attrs.push((attr, value.into()));
        self
    }

    pub fn child(mut self, child: Markup) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Markup>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(a, _)| *a == Attr::Class)
            .map(|(_, v)| v.as_str())
    }

    pub fn render(&self, dialect: Dialect, indent: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, dialect, indent);
        out
    }

    fn write(&self, out: &mut String, dialect: Dialect, depth: usize) {
        let pad = "  ".repeat(depth);
        out.push_str(&pad);
        self.write_open(out, dialect);

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        if self.children.iter().all(is_inline) {
            for child in &self.children {
                write_inline(out, child, dialect);
            }
        } else {
            out.push('\n');
            for child in &self.children {
                match child {
                    Markup::Element(el) => el.write(out, dialect, depth + 1),
                    other => {
                        out.push_str(&"  ".repeat(depth + 1));
                        write_inline(out, other, dialect);
                    }
                }
                out.push('\n');
            }
            out.push_str(&pad);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }

    fn write_open(&self, out: &mut String, dialect: Dialect) {
        out.push('<');
        out.push_str(self.tag);
        for (attr, value) in &self.attrs {
            out.push(' ');
            out.push_str(dialect.attr_name(*attr));
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        if VOID_TAGS.contains(&self.tag) {
            out.push_str(match dialect {
                Dialect::Jsx => " />",
                Dialect::Html => ">",
            });
        } else {
            out.push('>');
        }
    }
}

fn is_inline(markup: &Markup) -> bool {
    match markup {
        Markup::Text(_) | Markup::Preformatted(_) => true,
        Markup::Element(el) => el.tag == "br" || (el.tag == "code" && el.children.iter().all(is_inline)),
    }
}

fn write_inline(out: &mut String, markup: &Markup, dialect: Dialect) {
    match markup {
        Markup::Text(text) => out.push_str(&escape_text(text, dialect)),
        Markup::Preformatted(text) => match dialect {
            Dialect::Html => out.push_str(&escape_text(text, dialect)),
            Dialect::Jsx => {
                out.push('{');
                out.push_str(&serde_json::Value::String(text.clone()).to_string());
                out.push('}');
            }
        },
        Markup::Element(el) => {
            el.write_open(out, dialect);
            if !VOID_TAGS.contains(&el.tag) {
                for child in &el.children {
                    write_inline(out, child, dialect);
                }
                out.push_str("</");
                out.push_str(el.tag);
                out.push('>');
            }
        }
    }
}

/// Split on newlines, joining the lines with `<br>` elements.
pub fn text_with_breaks(text: &str) -> Vec<Markup> {
    let mut out = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push(Markup::Element(Element::new("br")));
        }
        if !line.is_empty() {
            out.push(Markup::Text(line.to_string()));
        }
    }
    out
}

pub fn escape_text(text: &str, dialect: Dialect) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' if dialect == Dialect::Jsx => out.push_str("&#123;"),
            '}' if dialect == Dialect::Jsx => out.push_str("&#125;"),
            c => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
