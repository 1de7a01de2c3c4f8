//! Design node tree to markup and stylesheet.
//!
//! The translator is a single recursive pass over the node tree. Each
//! visible node yields one element and one class rule; the element tag is
//! picked from the node kind, refined by the heuristics in [`heuristics`].

pub mod css;
pub mod element;
pub mod heuristics;
pub mod naming;
pub mod style;


use std::collections::BTreeSet;

use tracing::debug;

use crate::figma::api_types::{DesignNode, NodeKind};
use crate::figma::query::extract_text_content;
use crate::{FigcoError, Result};

pub use css::{Declarations, Stylesheet};
pub use element::{Attr, Dialect, Element, Markup};
pub use naming::{component_name_for, slugify, DEFAULT_COMPONENT_NAME};

use heuristics::{heading_level, is_button, landmark_for, main_frame_index, HEADING_TAGS};
use naming::ClassNames;
use style::Placement;

#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub dialect: Dialect,
    /// URL prefix for image fills, e.g. `/images`.
    pub image_base: String,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Jsx,
            image_base: "/images".to_string(),
        }
    }
}

/// Output of a translation: one element tree plus its stylesheet.
#[derive(Debug, Clone)]
pub struct RenderedComponent {
    pub markup: Element,
    pub stylesheet: Stylesheet,
    pub root_class: String,
    pub dialect: Dialect,
    /// Node kinds that fell back to a generic container.
    pub warnings: Vec<String>,
}

impl RenderedComponent {
    pub fn render_markup(&self, indent: usize) -> String {
        self.markup.render(self.dialect, indent)
    }

    pub fn css(&self) -> String {
        self.stylesheet.to_css()
    }
}

pub fn translate(root: &DesignNode, opts: &TranslateOptions) -> Result<RenderedComponent> {
    if !root.visible {
        return Err(FigcoError::translate(format!(
            "Node {} ({}) is hidden; nothing to render",
            root.name, root.id
        )));
    }

    let mut translator = Translator {
        opts,
        classes: ClassNames::default(),
        stylesheet: Stylesheet::default(),
        unknown_kinds: BTreeSet::new(),
        main_taken: false,
    };
    let is_main = root.kind == NodeKind::Frame;
    let markup = translator
        .node(root, Placement::Flow, is_main)
        .ok_or_else(|| FigcoError::translate("Root node produced no markup"))?;
    let root_class = markup.class().unwrap_or_default().to_string();

    let warnings = translator
        .unknown_kinds
        .into_iter()
        .map(|kind| format!("Unsupported node type {kind} rendered as a generic container"))
        .collect();

    Ok(RenderedComponent {
        markup,
        stylesheet: translator.stylesheet,
        root_class,
        dialect: opts.dialect,
        warnings,
    })
}

struct Translator<'o> {
    opts: &'o TranslateOptions,
    classes: ClassNames,
    stylesheet: Stylesheet,
    unknown_kinds: BTreeSet<String>,
    /// Set once a `<main>` is emitted; later pages keep plain containers.
    main_taken: bool,
}

impl Translator<'_> {
    fn node(&mut self, node: &DesignNode, placement: Placement, is_main: bool) -> Option<Element> {
        if !node.visible {
            return None;
        }
        let class = self.classes.for_node(node);
        // Reserve the slot so parent rules precede their children's.
        let rule_index = self.stylesheet.rules.len();
        let mut decls = style::box_declarations(node, placement);

        let element = match &node.kind {
            NodeKind::Text => {
                let level = heading_level(node);
                decls.extend(style::text_declarations(node, level.is_some()));
                let tag = match level {
                    Some(n) => HEADING_TAGS[usize::from(n.clamp(1, 6)) - 1],
                    None => "p",
                };
                let text = node.characters.as_deref().unwrap_or_default();
                Element::new(tag).children(element::text_with_breaks(text))
            }
            NodeKind::Rectangle => {
                self.paint(node, &mut decls);
                if is_button(node) {
                    style::apply_button_defaults(&mut decls);
                    let label = Some(node.name.as_str())
                        .filter(|n| !n.is_empty())
                        .unwrap_or("Button");
                    Element::new("button").child(Markup::Text(label.to_string()))
                } else {
                    Element::new("div")
                }
            }
            NodeKind::Vector
            | NodeKind::Star
            | NodeKind::Ellipse
            | NodeKind::RegularPolygon
            | NodeKind::Line
            | NodeKind::Connector
            | NodeKind::Slice => {
                self.paint(node, &mut decls);
                Element::new("div")
            }
            NodeKind::CodeBlock => {
                self.paint(node, &mut decls);
                let code = node.characters.clone().unwrap_or_default();
                Element::new("pre").child(Markup::Element(
                    Element::new("code").child(Markup::Preformatted(code)),
                ))
            }
            NodeKind::Embed => {
                self.paint(node, &mut decls);
                Element::new("div").child(Markup::Text(format!("Embedded content: {}", node.name)))
            }
            NodeKind::Widget => {
                self.paint(node, &mut decls);
                Element::new("div").child(Markup::Text(format!("Widget: {}", node.name)))
            }
            NodeKind::Link => {
                self.paint(node, &mut decls);
                let href = node.url.clone().unwrap_or_else(|| "#".to_string());
                let children = self.children(node, &mut decls);
                let link = Element::new("a").attr(Attr::Named("href"), href);
                if children.is_empty() {
                    link.child(Markup::Text(node.name.clone()))
                } else {
                    link.children(children)
                }
            }
            NodeKind::Input => {
                self.paint(node, &mut decls);
                style::apply_field_defaults(node, &mut decls, false);
                Element::new("input")
                    .attr(Attr::Named("type"), "text")
                    .attr(
                        Attr::Named("placeholder"),
                        node.characters.clone().unwrap_or_default(),
                    )
            }
            NodeKind::Combobox => {
                self.paint(node, &mut decls);
                style::apply_field_defaults(node, &mut decls, true);
                let mut options: Vec<String> = node
                    .children
                    .iter()
                    .filter(|c| c.visible)
                    .map(|c| extract_text_content(c).join(" "))
                    .filter(|t| !t.is_empty())
                    .collect();
                if options.is_empty() {
                    options = vec!["Option 1".to_string(), "Option 2".to_string()];
                }
                Element::new("select").children(options.into_iter().map(|option| {
                    Markup::Element(
                        Element::new("option")
                            .attr(Attr::Named("value"), option.clone())
                            .child(Markup::Text(option)),
                    )
                }))
            }
            NodeKind::Radio => {
                self.paint(node, &mut decls);
                style::apply_radio_defaults(&mut decls);
                let id_slug = slugify(&node.id);
                let radio_id = if id_slug.is_empty() {
                    format!("radio-{class}")
                } else {
                    format!("radio-{id_slug}")
                };
                let group = Some(node.name.as_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or("radio-group");
                let label = node.characters.as_deref().unwrap_or("Radio Option");
                Element::new("div")
                    .child(Markup::Element(
                        Element::new("input")
                            .attr(Attr::Named("type"), "radio")
                            .attr(Attr::Named("id"), radio_id.clone())
                            .attr(Attr::Named("name"), group)
                            .with_class(format!("{class}-input")),
                    ))
                    .child(Markup::Element(
                        Element::new("label")
                            .attr(Attr::For, radio_id)
                            .with_class(format!("{class}-label"))
                            .child(Markup::Text(label.to_string())),
                    ))
            }
            NodeKind::Section => {
                self.paint(node, &mut decls);
                let children = self.children(node, &mut decls);
                Element::new("section").children(children)
            }
            NodeKind::Document | NodeKind::Canvas => {
                self.paint(node, &mut decls);
                let children = self.children(node, &mut decls);
                Element::new("div").children(children)
            }
            NodeKind::Frame
            | NodeKind::Group
            | NodeKind::Component
            | NodeKind::ComponentSet
            | NodeKind::Instance
            | NodeKind::BooleanOperation
            | NodeKind::Sticky
            | NodeKind::ShapeWithText
            | NodeKind::Stamp
            | NodeKind::Table
            | NodeKind::TableCell
            | NodeKind::Shape
            | NodeKind::Other(_) => {
                if let NodeKind::Other(raw) = &node.kind {
                    debug!(id = %node.id, kind = %raw, "unsupported node type");
                    self.unknown_kinds.insert(raw.clone());
                }
                self.paint(node, &mut decls);
                let tag = if is_button(node) {
                    style::apply_button_defaults(&mut decls);
                    "button"
                } else if let Some(landmark) = landmark_for(node) {
                    landmark
                } else if is_main && !self.main_taken {
                    self.main_taken = true;
                    "main"
                } else {
                    "div"
                };
                let children = self.children(node, &mut decls);
                Element::new(tag).children(children)
            }
        };

        self.stylesheet.insert_class(rule_index, &class, decls);
        let mut element = element;
        element.attrs.insert(0, (Attr::Class, class));
        Some(element)
    }

    /// Background and border of the node itself.
    fn paint(&self, node: &DesignNode, decls: &mut Declarations) {
        decls.extend(style::fill_declarations(node, &self.opts.image_base));
        decls.extend(style::stroke_declarations(node));
    }

    /// Translate visible children. Parents without auto-layout become the
    /// containing block of their absolutely positioned children.
    fn children(&mut self, node: &DesignNode, decls: &mut Declarations) -> Vec<Markup> {
        let placement = match (&node.kind, &node.absolute_bounding_box) {
            (NodeKind::Document | NodeKind::Canvas, _) | (_, None) => Placement::Flow,
            _ if node.has_auto_layout() => Placement::Flow,
            (_, Some(bb)) => Placement::Absolute(*bb),
        };
        if matches!(placement, Placement::Absolute(_)) && node.children.iter().any(|c| c.visible) {
            decls.set_default("position", "relative");
        }

        let main = match node.kind {
            NodeKind::Canvas => main_frame_index(&node.children),
            _ => None,
        };

        node.children
            .iter()
            .enumerate()
            .filter_map(|(i, child)| self.node(child, placement, main == Some(i)))
            .map(Markup::Element)
            .collect()
    }
}
