//! Per-node CSS declarations.

use crate::figma::api_types::{
    DesignNode, EffectType, FigmaBoundingBox, LayoutMode, NodeKind, Paint, PaintType,
};
use crate::figma::query::is_valid_image_ref;

use super::css::Declarations;

/// Where a node sits relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Flow,
    /// Absolutely positioned against the parent's bounding box.
    Absolute(FigmaBoundingBox),
}

/// At most two decimals, trailing zeros trimmed, no negative zero.
pub fn format_number(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn px(value: f32) -> String {
    match format_number(value).as_str() {
        "0" => "0".to_string(),
        n => format!("{n}px"),
    }
}

/// Geometry, layout, opacity, radius and effects shared by every element.
pub fn box_declarations(node: &DesignNode, placement: Placement) -> Declarations {
    let mut decls = Declarations::new();

    if !matches!(node.kind, NodeKind::Document | NodeKind::Canvas) {
        if let Some(bb) = &node.absolute_bounding_box {
            decls.set("width", px(bb.width));
            decls.set("height", px(bb.height));
        }
    }

    if let (Placement::Absolute(origin), Some(bb)) = (placement, &node.absolute_bounding_box) {
        decls.set("position", "absolute");
        decls.set("left", px(bb.x - origin.x));
        decls.set("top", px(bb.y - origin.y));
    }

    if node.has_auto_layout() {
        decls.set("display", "flex");
        decls.set(
            "flex-direction",
            if node.layout_mode == LayoutMode::Vertical {
                "column"
            } else {
                "row"
            },
        );
        if let Some(gap) = node.item_spacing.filter(|g| *g > 0.0) {
            decls.set("gap", px(gap));
        }
        if let Some(value) = node
            .primary_axis_align_items
            .as_deref()
            .and_then(justify_content)
        {
            decls.set("justify-content", value);
        }
        if let Some(value) = node
            .counter_axis_align_items
            .as_deref()
            .and_then(align_items)
        {
            decls.set("align-items", value);
        }
    }

    let padding = [
        node.padding_top,
        node.padding_right,
        node.padding_bottom,
        node.padding_left,
    ]
    .map(|p| p.unwrap_or(0.0));
    if padding.iter().any(|p| *p > 0.0) {
        decls.set(
            "padding",
            padding.iter().map(|p| px(*p)).collect::<Vec<_>>().join(" "),
        );
    }

    if let Some(opacity) = node.opacity.filter(|o| *o < 1.0) {
        decls.set("opacity", format_number(opacity));
    }

    if node.kind == NodeKind::Ellipse {
        decls.set("border-radius", "50%");
    } else if let Some(radius) = node.corner_radius.filter(|r| *r > 0.0) {
        decls.set("border-radius", px(radius));
    }

    effect_declarations(node, &mut decls);
    decls
}

fn justify_content(figma: &str) -> Option<&'static str> {
    match figma {
        "MIN" => Some("flex-start"),
        "CENTER" => Some("center"),
        "MAX" => Some("flex-end"),
        "SPACE_BETWEEN" => Some("space-between"),
        _ => None,
    }
}

fn align_items(figma: &str) -> Option<&'static str> {
    match figma {
        "MIN" => Some("flex-start"),
        "CENTER" => Some("center"),
        "MAX" => Some("flex-end"),
        "BASELINE" => Some("baseline"),
        _ => None,
    }
}

fn effect_declarations(node: &DesignNode, decls: &mut Declarations) {
    let mut shadows = Vec::new();
    for effect in node.effects.iter().filter(|e| e.visible) {
        match effect.effect_type {
            EffectType::DropShadow | EffectType::InnerShadow => {
                let offset = effect.offset.unwrap_or_default();
                let color = effect.color.unwrap_or_default().to_css();
                let inset = if effect.effect_type == EffectType::InnerShadow {
                    "inset "
                } else {
                    ""
                };
                let spread = match effect.spread.filter(|s| *s != 0.0) {
                    Some(s) => format!(" {}", px(s)),
                    None => String::new(),
                };
                shadows.push(format!(
                    "{inset}{} {} {}{spread} {color}",
                    px(offset.x),
                    px(offset.y),
                    px(effect.radius)
                ));
            }
            EffectType::LayerBlur => decls.set("filter", format!("blur({})", px(effect.radius))),
            EffectType::BackgroundBlur => {
                decls.set("backdrop-filter", format!("blur({})", px(effect.radius)))
            }
            EffectType::Other => {}
        }
    }
    if !shadows.is_empty() {
        decls.set("box-shadow", shadows.join(", "));
    }
}

/// Background from the first visible fill, falling back to the legacy
/// frame `backgroundColor` when it is not fully transparent.
pub fn fill_declarations(node: &DesignNode, image_base: &str) -> Declarations {
    let mut decls = Declarations::new();
    match node.primary_fill() {
        Some(paint) => paint_background(paint, image_base, &mut decls),
        None => {
            if let Some(color) = node.background_color.filter(|c| c.a > 0.0) {
                decls.set("background-color", color.to_css());
            }
        }
    }
    decls
}

fn paint_background(paint: &Paint, image_base: &str, decls: &mut Declarations) {
    match paint.paint_type {
        PaintType::Solid => {
            if let Some(css) = paint.solid_css() {
                decls.set("background-color", css);
            }
        }
        PaintType::Image => {
            let image_ref = paint.image_ref.as_deref().filter(|r| is_valid_image_ref(r));
            if let Some(image_ref) = image_ref {
                let base = image_base.trim_end_matches('/');
                decls.set(
                    "background-image",
                    format!("url('{base}/Image_{image_ref}.png')"),
                );
                decls.set("background-size", "cover");
                decls.set("background-position", "center");
            }
        }
        PaintType::GradientLinear => {
            decls.set(
                "background",
                format!(
                    "linear-gradient({}deg, {})",
                    format_number(linear_angle(paint)),
                    gradient_stops(paint)
                ),
            );
        }
        PaintType::GradientRadial | PaintType::GradientDiamond => {
            decls.set(
                "background",
                format!("radial-gradient(circle, {})", gradient_stops(paint)),
            );
        }
        PaintType::GradientAngular => {
            decls.set(
                "background",
                format!("conic-gradient({})", gradient_stops(paint)),
            );
        }
        PaintType::Other => {}
    }
}

/// CSS angle of a linear gradient from its first two handles; 0deg points up.
fn linear_angle(paint: &Paint) -> f32 {
    match paint.gradient_handle_positions.as_slice() {
        [start, end, ..] => {
            let degrees = (end.x - start.x).atan2(-(end.y - start.y)).to_degrees();
            (degrees + 360.0) % 360.0
        }
        _ => 180.0,
    }
}

fn gradient_stops(paint: &Paint) -> String {
    let opacity = paint.opacity.unwrap_or(1.0);
    paint
        .gradient_stops
        .iter()
        .map(|stop| {
            format!(
                "{} {}%",
                stop.color.to_css_with_opacity(opacity),
                format_number(stop.position * 100.0)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// First visible solid stroke as a border. Lines draw only their top edge.
pub fn stroke_declarations(node: &DesignNode) -> Declarations {
    let mut decls = Declarations::new();
    let stroke = node
        .strokes
        .iter()
        .filter(|p| p.visible)
        .find_map(|p| p.solid_css());
    if let Some(color) = stroke {
        let weight = px(node.stroke_weight.unwrap_or(1.0));
        let property = if node.kind == NodeKind::Line {
            "border-top"
        } else {
            "border"
        };
        decls.set(property, format!("{weight} solid {color}"));
    }
    decls
}

/// Escape a value for use inside a double-quoted CSS string.
fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Typography of a TEXT node.
pub fn text_declarations(node: &DesignNode, heading: bool) -> Declarations {
    let mut decls = Declarations::new();

    if let Some(color) = node.primary_fill().and_then(Paint::solid_css) {
        decls.set("color", color);
    }

    if let Some(style) = &node.style {
        if let Some(family) = style.font_family.as_deref().filter(|f| !f.is_empty()) {
            decls.set("font-family", format!("\"{}\", sans-serif", css_string(family)));
        }
        if let Some(size) = style.font_size {
            decls.set("font-size", px(size));
        }
        if let Some(weight) = style.font_weight {
            decls.set("font-weight", format_number(weight));
        }
        if style.italic == Some(true) {
            decls.set("font-style", "italic");
        }
        if let Some(spacing) = style.letter_spacing.filter(|s| *s != 0.0) {
            decls.set("letter-spacing", px(spacing));
        }
        if let Some(line_height) = style.line_height_px {
            decls.set("line-height", px(line_height));
        }
        let align = match style.text_align_horizontal.as_deref() {
            Some("CENTER") => Some("center"),
            Some("RIGHT") => Some("right"),
            Some("JUSTIFIED") => Some("justify"),
            _ => None,
        };
        if let Some(align) = align {
            decls.set("text-align", align);
        }
        let decoration = match style.text_decoration.as_deref() {
            Some("UNDERLINE") => Some("underline"),
            Some("STRIKETHROUGH") => Some("line-through"),
            _ => None,
        };
        if let Some(decoration) = decoration {
            decls.set("text-decoration", decoration);
        }
        let transform = match style.text_case.as_deref() {
            Some("UPPER") => Some("uppercase"),
            Some("LOWER") => Some("lowercase"),
            Some("TITLE") => Some("capitalize"),
            _ => None,
        };
        if let Some(transform) = transform {
            decls.set("text-transform", transform);
        }
    }

    if heading {
        decls.set_default("font-weight", "600");
        decls.set("margin", "0 0 0.5em 0");
    } else {
        decls.set("margin", "0");
    }
    decls
}

pub fn apply_button_defaults(decls: &mut Declarations) {
    decls.set("cursor", "pointer");
    decls.set("display", "inline-flex");
    decls.set_default("align-items", "center");
    decls.set_default("justify-content", "center");
    decls.set_default("padding", "8px 16px");
    decls.set_default("border", "none");
    decls.set("outline", "none");
    if !decls.contains("background") && !decls.contains("background-image") {
        decls.set_default("background-color", "#007bff");
    }
    decls.set("color", "#ffffff");
    decls.set_default("border-radius", "4px");
    decls.set("transition", "background-color 0.2s ease");
}

/// Shared look of text inputs and selects.
pub fn apply_field_defaults(node: &DesignNode, decls: &mut Declarations, select: bool) {
    decls.set("padding", "8px 12px");
    decls.set_default("border", "1px solid #ddd");
    decls.set_default("border-radius", "4px");
    let size = node
        .style
        .as_ref()
        .and_then(|s| s.font_size)
        .map(px)
        .unwrap_or_else(|| "16px".to_string());
    decls.set("font-size", size);
    if select {
        decls.set_default("background-color", "white");
    }
}

pub fn apply_radio_defaults(decls: &mut Declarations) {
    decls.set("display", "flex");
    decls.set("align-items", "center");
    decls.set("gap", "8px");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::api_types::{ColorStop, Effect, FigmaColor, FigmaTypeStyle, Vector};

    fn bbox(x: f32, y: f32, width: f32, height: f32) -> FigmaBoundingBox {
        FigmaBoundingBox {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn format_number_trims_and_rounds() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.23456), "1.23");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(px(0.0), "0");
        assert_eq!(px(-4.0), "-4px");
    }

    #[test]
    fn absolute_placement_is_relative_to_parent_box() {
        let node = DesignNode {
            kind: NodeKind::Rectangle,
            absolute_bounding_box: Some(bbox(110.0, 60.5, 40.0, 20.0)),
            ..DesignNode::default()
        };
        let decls = box_declarations(&node, Placement::Absolute(bbox(100.0, 50.0, 400.0, 300.0)));
        assert_eq!(decls.get("position"), Some("absolute"));
        assert_eq!(decls.get("left"), Some("10px"));
        assert_eq!(decls.get("top"), Some("10.5px"));
        assert_eq!(decls.get("width"), Some("40px"));
    }

    #[test]
    fn auto_layout_maps_to_flexbox() {
        let node = DesignNode {
            kind: NodeKind::Frame,
            layout_mode: LayoutMode::Vertical,
            item_spacing: Some(12.0),
            padding_top: Some(8.0),
            padding_left: Some(16.0),
            primary_axis_align_items: Some("SPACE_BETWEEN".into()),
            counter_axis_align_items: Some("CENTER".into()),
            ..DesignNode::default()
        };
        let decls = box_declarations(&node, Placement::Flow);
        assert_eq!(decls.get("display"), Some("flex"));
        assert_eq!(decls.get("flex-direction"), Some("column"));
        assert_eq!(decls.get("gap"), Some("12px"));
        assert_eq!(decls.get("padding"), Some("8px 0 0 16px"));
        assert_eq!(decls.get("justify-content"), Some("space-between"));
        assert_eq!(decls.get("align-items"), Some("center"));
        assert!(decls.get("position").is_none());
    }

    #[test]
    fn shadows_combine_and_blurs_map_to_filters() {
        let node = DesignNode {
            effects: vec![
                Effect {
                    effect_type: EffectType::DropShadow,
                    radius: 4.0,
                    offset: Some(Vector { x: 0.0, y: 2.0 }),
                    color: Some(FigmaColor {
                        r: 0.0,
                        g: 0.0,
                        b: 0.0,
                        a: 0.25,
                    }),
                    ..Effect::default()
                },
                Effect {
                    effect_type: EffectType::InnerShadow,
                    radius: 1.0,
                    spread: Some(2.0),
                    offset: Some(Vector { x: 1.0, y: 1.0 }),
                    color: Some(FigmaColor::rgb(1.0, 1.0, 1.0)),
                    ..Effect::default()
                },
                Effect {
                    effect_type: EffectType::BackgroundBlur,
                    radius: 10.0,
                    ..Effect::default()
                },
                Effect {
                    effect_type: EffectType::LayerBlur,
                    radius: 3.0,
                    visible: false,
                    ..Effect::default()
                },
            ],
            ..DesignNode::default()
        };
        let decls = box_declarations(&node, Placement::Flow);
        assert_eq!(
            decls.get("box-shadow"),
            Some("0 2px 4px rgba(0, 0, 0, 0.25), inset 1px 1px 1px 2px #ffffff")
        );
        assert_eq!(decls.get("backdrop-filter"), Some("blur(10px)"));
        assert!(decls.get("filter").is_none());
    }

    #[test]
    fn image_fill_points_at_image_base() {
        let node = DesignNode {
            fills: vec![Paint {
                paint_type: PaintType::Image,
                image_ref: Some("abc123".into()),
                ..Paint::default()
            }],
            ..DesignNode::default()
        };
        let decls = fill_declarations(&node, "/images/");
        assert_eq!(
            decls.get("background-image"),
            Some("url('/images/Image_abc123.png')")
        );
        assert_eq!(decls.get("background-size"), Some("cover"));
    }

    #[test]
    fn malformed_image_ref_emits_no_background_image() {
        let node = DesignNode {
            fills: vec![Paint {
                paint_type: PaintType::Image,
                image_ref: Some("a');background:url('x".into()),
                ..Paint::default()
            }],
            ..DesignNode::default()
        };
        let decls = fill_declarations(&node, "/images");
        assert!(decls.get("background-image").is_none());
        assert!(decls.get("background-size").is_none());
    }

    #[test]
    fn font_family_quotes_are_escaped() {
        let node = DesignNode {
            kind: NodeKind::Text,
            style: Some(FigmaTypeStyle {
                font_family: Some(r#"My "Font" \ Co"#.into()),
                ..FigmaTypeStyle::default()
            }),
            ..DesignNode::default()
        };
        let decls = text_declarations(&node, false);
        assert_eq!(
            decls.get("font-family"),
            Some(r#""My \"Font\" \\ Co", sans-serif"#)
        );
    }

    #[test]
    fn linear_gradient_angle_follows_handles() {
        let paint = Paint {
            paint_type: PaintType::GradientLinear,
            gradient_handle_positions: vec![
                Vector { x: 0.0, y: 0.5 },
                Vector { x: 1.0, y: 0.5 },
                Vector { x: 0.0, y: 1.0 },
            ],
            gradient_stops: vec![
                ColorStop {
                    position: 0.0,
                    color: FigmaColor::rgb(1.0, 0.0, 0.0),
                },
                ColorStop {
                    position: 1.0,
                    color: FigmaColor::rgb(0.0, 0.0, 1.0),
                },
            ],
            ..Paint::default()
        };
        let node = DesignNode {
            fills: vec![paint],
            ..DesignNode::default()
        };
        assert_eq!(
            fill_declarations(&node, "/images").get("background"),
            Some("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
        );
    }

    #[test]
    fn legacy_background_color_used_without_fills() {
        let node = DesignNode {
            background_color: Some(FigmaColor::rgb(1.0, 1.0, 1.0)),
            ..DesignNode::default()
        };
        assert_eq!(
            fill_declarations(&node, "/images").get("background-color"),
            Some("#ffffff")
        );

        let transparent = DesignNode {
            background_color: Some(FigmaColor {
                a: 0.0,
                ..FigmaColor::default()
            }),
            ..DesignNode::default()
        };
        assert!(fill_declarations(&transparent, "/images").is_empty());
    }

    #[test]
    fn line_strokes_use_top_border() {
        let node = DesignNode {
            kind: NodeKind::Line,
            strokes: vec![Paint::solid(FigmaColor::rgb(0.0, 0.0, 0.0))],
            stroke_weight: Some(2.0),
            ..DesignNode::default()
        };
        assert_eq!(
            stroke_declarations(&node).get("border-top"),
            Some("2px solid #000000")
        );
    }

    #[test]
    fn button_defaults_keep_existing_fill_and_radius() {
        let mut decls = Declarations::new();
        decls.set("background-color", "#ff0000");
        decls.set("border-radius", "12px");
        apply_button_defaults(&mut decls);
        assert_eq!(decls.get("background-color"), Some("#ff0000"));
        assert_eq!(decls.get("border-radius"), Some("12px"));
        assert_eq!(decls.get("cursor"), Some("pointer"));

        let mut bare = Declarations::new();
        apply_button_defaults(&mut bare);
        assert_eq!(bare.get("background-color"), Some("#007bff"));
        assert_eq!(bare.get("border-radius"), Some("4px"));
    }
}
