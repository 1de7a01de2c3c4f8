//! Figma API response types and the design node model.
//!
//! Every field is defaulted: Figma payloads are partial depending on the
//! endpoint and node kind, and the translator tolerates missing data.

use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Supported image export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
        }
    }

    /// Raster formats can be decoded locally to report dimensions.
    pub fn is_raster(&self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::Jpg)
    }
}

/// Node type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Vector,
    BooleanOperation,
    Star,
    Line,
    Ellipse,
    RegularPolygon,
    Slice,
    Sticky,
    ShapeWithText,
    Stamp,
    Connector,
    Table,
    TableCell,
    CodeBlock,
    Embed,
    Link,
    Widget,
    Shape,
    Input,
    Combobox,
    Radio,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Document => "DOCUMENT",
            NodeKind::Canvas => "CANVAS",
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Section => "SECTION",
            NodeKind::Component => "COMPONENT",
            NodeKind::ComponentSet => "COMPONENT_SET",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Text => "TEXT",
            NodeKind::Rectangle => "RECTANGLE",
            NodeKind::Vector => "VECTOR",
            NodeKind::BooleanOperation => "BOOLEAN_OPERATION",
            NodeKind::Star => "STAR",
            NodeKind::Line => "LINE",
            NodeKind::Ellipse => "ELLIPSE",
            NodeKind::RegularPolygon => "REGULAR_POLYGON",
            NodeKind::Slice => "SLICE",
            NodeKind::Sticky => "STICKY",
            NodeKind::ShapeWithText => "SHAPE_WITH_TEXT",
            NodeKind::Stamp => "STAMP",
            NodeKind::Connector => "CONNECTOR",
            NodeKind::Table => "TABLE",
            NodeKind::TableCell => "TABLE_CELL",
            NodeKind::CodeBlock => "CODE_BLOCK",
            NodeKind::Embed => "EMBED",
            NodeKind::Link => "LINK",
            NodeKind::Widget => "WIDGET",
            NodeKind::Shape => "SHAPE",
            NodeKind::Input => "INPUT",
            NodeKind::Combobox => "COMBOBOX",
            NodeKind::Radio => "RADIO",
            NodeKind::Other(raw) => raw,
        }
    }

    /// Lower-case, dash separated form used in class names (`COMPONENT_SET` -> `component-set`).
    pub fn slug(&self) -> String {
        match self {
            NodeKind::Other(_) => "unknown-type".to_string(),
            kind => kind.as_str().to_ascii_lowercase().replace('_', "-"),
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        NodeKind::Other(String::new())
    }
}

impl From<String> for NodeKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DOCUMENT" => NodeKind::Document,
            "CANVAS" => NodeKind::Canvas,
            "FRAME" => NodeKind::Frame,
            "GROUP" => NodeKind::Group,
            "SECTION" => NodeKind::Section,
            "COMPONENT" => NodeKind::Component,
            "COMPONENT_SET" => NodeKind::ComponentSet,
            "INSTANCE" => NodeKind::Instance,
            "TEXT" => NodeKind::Text,
            "RECTANGLE" => NodeKind::Rectangle,
            "VECTOR" => NodeKind::Vector,
            "BOOLEAN_OPERATION" => NodeKind::BooleanOperation,
            "STAR" => NodeKind::Star,
            "LINE" => NodeKind::Line,
            "ELLIPSE" => NodeKind::Ellipse,
            "REGULAR_POLYGON" => NodeKind::RegularPolygon,
            "SLICE" => NodeKind::Slice,
            "STICKY" => NodeKind::Sticky,
            "SHAPE_WITH_TEXT" => NodeKind::ShapeWithText,
            "STAMP" => NodeKind::Stamp,
            "CONNECTOR" => NodeKind::Connector,
            "TABLE" => NodeKind::Table,
            "TABLE_CELL" => NodeKind::TableCell,
            "CODE_BLOCK" => NodeKind::CodeBlock,
            "EMBED" => NodeKind::Embed,
            "LINK" | "LINK_UNFURL" => NodeKind::Link,
            "WIDGET" => NodeKind::Widget,
            "SHAPE" => NodeKind::Shape,
            "INPUT" => NodeKind::Input,
            "COMBOBOX" => NodeKind::Combobox,
            "RADIO" => NodeKind::Radio,
            _ => NodeKind::Other(raw),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Auto-layout direction of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    #[default]
    #[serde(rename = "NONE")]
    NoLayout,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

/// A single design node as returned by the Figma REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub visible: bool,
    pub children: Vec<DesignNode>,
    pub absolute_bounding_box: Option<FigmaBoundingBox>,
    pub fills: Vec<Paint>,
    pub strokes: Vec<Paint>,
    pub stroke_weight: Option<f32>,
    pub effects: Vec<Effect>,
    pub corner_radius: Option<f32>,
    pub opacity: Option<f32>,
    pub background_color: Option<FigmaColor>,
    pub layout_mode: LayoutMode,
    pub item_spacing: Option<f32>,
    pub padding_top: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub padding_left: Option<f32>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub characters: Option<String>,
    pub style: Option<FigmaTypeStyle>,
    pub reactions: Vec<serde_json::Value>,
    pub url: Option<String>,
}

impl Default for DesignNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: NodeKind::default(),
            visible: true,
            children: Vec::new(),
            absolute_bounding_box: None,
            fills: Vec::new(),
            strokes: Vec::new(),
            stroke_weight: None,
            effects: Vec::new(),
            corner_radius: None,
            opacity: None,
            background_color: None,
            layout_mode: LayoutMode::NoLayout,
            item_spacing: None,
            padding_top: None,
            padding_right: None,
            padding_bottom: None,
            padding_left: None,
            primary_axis_align_items: None,
            counter_axis_align_items: None,
            characters: None,
            style: None,
            reactions: Vec::new(),
            url: None,
        }
    }
}

impl DesignNode {
    pub fn has_auto_layout(&self) -> bool {
        matches!(
            self.layout_mode,
            LayoutMode::Horizontal | LayoutMode::Vertical
        )
    }

    /// First visible paint of `fills`.
    pub fn primary_fill(&self) -> Option<&Paint> {
        self.fills.iter().find(|p| p.visible)
    }

    pub fn area(&self) -> f32 {
        self.absolute_bounding_box
            .as_ref()
            .map(|bb| bb.width * bb.height)
            .unwrap_or(0.0)
    }
}

/// Bounding box coordinates from Figma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigmaBoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Typography style from Figma.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigmaTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<f32>,
    pub italic: Option<bool>,
    pub letter_spacing: Option<f32>,
    pub line_height_px: Option<f32>,
    pub text_align_horizontal: Option<String>,
    pub text_decoration: Option<String>,
    pub text_case: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    #[default]
    Solid,
    Image,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    #[serde(other)]
    Other,
}

/// Paint/fill data from Figma.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paint {
    #[serde(rename = "type")]
    pub paint_type: PaintType,
    pub visible: bool,
    pub opacity: Option<f32>,
    pub color: Option<FigmaColor>,
    pub image_ref: Option<String>,
    pub gradient_stops: Vec<ColorStop>,
    pub gradient_handle_positions: Vec<Vector>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            paint_type: PaintType::Solid,
            visible: true,
            opacity: None,
            color: None,
            image_ref: None,
            gradient_stops: Vec::new(),
            gradient_handle_positions: Vec::new(),
        }
    }
}

impl Paint {
    pub fn solid(color: FigmaColor) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// CSS colour of a solid paint, folding paint opacity into alpha.
    pub fn solid_css(&self) -> Option<String> {
        if self.paint_type != PaintType::Solid {
            return None;
        }
        self.color
            .as_ref()
            .map(|c| c.to_css_with_opacity(self.opacity.unwrap_or(1.0)))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorStop {
    pub position: f32,
    pub color: FigmaColor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[default]
    #[serde(other)]
    Other,
}

/// Shadow or blur effect.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effect {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub visible: bool,
    pub radius: f32,
    pub spread: Option<f32>,
    pub color: Option<FigmaColor>,
    pub offset: Option<Vector>,
}

impl Default for Effect {
    fn default() -> Self {
        Self {
            effect_type: EffectType::Other,
            visible: true,
            radius: 0.0,
            spread: None,
            color: None,
            offset: None,
        }
    }
}

/// RGBA color from Figma (0.0-1.0 range).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigmaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for FigmaColor {
    fn default() -> Self {
        Self {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }
    }
}

impl FigmaColor {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    fn to_rgb8(self) -> Srgb<u8> {
        Srgb::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
        .into_format::<u8>()
    }

    /// Convert to hex color string (e.g., "#ff8000").
    pub fn to_hex(&self) -> String {
        let rgb = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// Hex when opaque, `rgba()` otherwise.
    pub fn to_css(&self) -> String {
        self.to_css_with_opacity(1.0)
    }

    pub fn to_css_with_opacity(&self, opacity: f32) -> String {
        let alpha = (self.a * opacity).clamp(0.0, 1.0);
        if alpha >= 0.999 {
            return self.to_hex();
        }
        let rgb = self.to_rgb8();
        format!(
            "rgba({}, {}, {}, {})",
            rgb.red,
            rgb.green,
            rgb.blue,
            format_alpha(alpha)
        )
    }
}

fn format_alpha(alpha: f32) -> String {
    let rounded = (alpha * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// A Figma file response from the files endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    pub document: DesignNode,
}

/// Response from the nodes endpoint. Unknown ids map to `null`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaNodesResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub nodes: HashMap<String, Option<FigmaNodeWrapper>>,
}

/// Wrapper containing the document for a node.
#[derive(Debug, Deserialize)]
pub struct FigmaNodeWrapper {
    pub document: DesignNode,
}

/// Response from the images export endpoint.
#[derive(Debug, Deserialize)]
pub struct FigmaImageExport {
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Response from the image fills endpoint (`/v1/files/:key/images`).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FigmaImageFills {
    pub error: bool,
    pub status: Option<u16>,
    pub meta: FigmaImageFillsMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FigmaImageFillsMeta {
    pub images: HashMap<String, String>,
}
