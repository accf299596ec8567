//! Element types for the label template model.
//!
//! All types derive `Serialize + Deserialize` so the same structs work for
//! both Rust API construction and JSON deserialization. Wire names are
//! camelCase to match the template schema produced by the design tooling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_font_family() -> String {
    "Noto Sans TC".to_string()
}

fn default_font_weight() -> u32 {
    400
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_line_height() -> f64 {
    1.2
}

fn default_opacity() -> f64 {
    1.0
}

fn default_stroke_width() -> f64 {
    1.0
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font settings for a text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    /// Font family name (default: "Noto Sans TC").
    #[serde(default = "default_font_family")]
    pub family: String,
    /// Font size in points.
    pub size_pt: f64,
    /// Weight: 400, 500, 600, 700, etc. (default: 400).
    #[serde(default = "default_font_weight")]
    pub weight: u32,
    #[serde(default)]
    pub align: TextAlign,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: default_font_family(),
            size_pt: 10.0,
            weight: default_font_weight(),
            align: TextAlign::Left,
        }
    }
}

/// Text element: literal string content at a millimeter position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    pub id: String,
    /// mm from the label's left edge (pre-bleed origin).
    pub x: f64,
    /// mm from the label's top edge.
    pub y: f64,
    /// Optional bounding width in mm, used as the alignment anchor span.
    #[serde(default)]
    pub w: Option<f64>,
    /// Optional bounding height in mm.
    #[serde(default)]
    pub h: Option<f64>,
    pub text: String,
    #[serde(default)]
    pub font: Font,
    /// Fill color, hex (default: #000000).
    #[serde(default = "default_color")]
    pub color: String,
    /// Line-height multiplier (default: 1.2).
    #[serde(default = "default_line_height")]
    pub line_height: f64,
}

/// Image element: embedded raster/vector source at a fixed mm box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Data URL or public path.
    pub src: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

/// QR code element. A square of `size` mm per side.
///
/// Rendering emits a placeholder; the export finalizer replaces it with
/// real module geometry (see [`crate::export`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Side length in mm.
    pub size: f64,
    /// Payload (URL, text, etc.). Supports `{{variable}}` tokens.
    pub data: String,
    #[serde(default)]
    pub error_correction: ErrorCorrection,
}

/// 1D barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarcodeType {
    Code128,
    Ean13,
    Ean8,
}

impl BarcodeType {
    /// Symbology label shown in the placeholder box.
    pub fn label(&self) -> &'static str {
        match self {
            BarcodeType::Code128 => "CODE128",
            BarcodeType::Ean13 => "EAN13",
            BarcodeType::Ean8 => "EAN8",
        }
    }
}

/// 1D barcode element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barcode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(rename = "type")]
    pub barcode_type: BarcodeType,
    /// Payload. Supports `{{variable}}` tokens.
    pub data: String,
    /// Render the payload as human-readable text below the bars.
    #[serde(default)]
    pub display_value: bool,
}

/// Shape kind for [`Shape`] elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Line,
    Circle,
}

/// Vector shape element: rect, line, or circle.
///
/// Geometry fields are kind-specific: `w`/`h` for rect, `x2`/`y2` for
/// line, `r` for circle. A shape missing the fields its kind requires
/// renders as an empty group rather than failing the whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: String,
    pub shape: ShapeKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub w: Option<f64>,
    #[serde(default)]
    pub h: Option<f64>,
    /// Circle radius in mm.
    #[serde(default)]
    pub r: Option<f64>,
    /// Line end point in mm.
    #[serde(default)]
    pub x2: Option<f64>,
    #[serde(default)]
    pub y2: Option<f64>,
    #[serde(default)]
    pub stroke: Option<String>,
    #[serde(default)]
    pub fill: Option<String>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

/// The closed element union. `kind` is the serde tag, so the JSON form is
/// `{"kind": "text", "id": "t1", ...}`. Paint order = array order in the
/// template (first = bottom).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LabelElement {
    Text(Text),
    Image(Image),
    Qr(QrCode),
    Barcode(Barcode),
    Shape(Shape),
}

impl LabelElement {
    /// Element id, unique within a template. Binds placeholder groups to
    /// injected QR/barcode content during export.
    pub fn id(&self) -> &str {
        match self {
            LabelElement::Text(e) => &e.id,
            LabelElement::Image(e) => &e.id,
            LabelElement::Qr(e) => &e.id,
            LabelElement::Barcode(e) => &e.id,
            LabelElement::Shape(e) => &e.id,
        }
    }

    /// Position in mm relative to the label's top-left, pre-bleed.
    pub fn position(&self) -> (f64, f64) {
        match self {
            LabelElement::Text(e) => (e.x, e.y),
            LabelElement::Image(e) => (e.x, e.y),
            LabelElement::Qr(e) => (e.x, e.y),
            LabelElement::Barcode(e) => (e.x, e.y),
            LabelElement::Shape(e) => (e.x, e.y),
        }
    }

    /// Interpolate template variables in this element's data-bearing fields.
    pub fn interpolate(&mut self, vars: &HashMap<String, String>) {
        match self {
            LabelElement::Text(e) => e.interpolate(vars),
            LabelElement::Image(e) => e.interpolate(vars),
            LabelElement::Qr(e) => e.interpolate(vars),
            LabelElement::Barcode(e) => e.interpolate(vars),
            LabelElement::Shape(e) => e.interpolate(vars),
        }
    }
}

// ============================================================================
// VARIABLE INTERPOLATION
// ============================================================================

/// Fields that support template variable interpolation.
pub trait Interpolatable {
    /// Replace `{{key}}` placeholders with values from the variables map.
    fn interpolate(&mut self, vars: &HashMap<String, String>);
}

pub(crate) fn interpolate_string(s: &mut String, vars: &HashMap<String, String>) {
    for (key, value) in vars {
        let placeholder = format!("{{{{{}}}}}", key);
        if s.contains(&placeholder) {
            *s = s.replace(&placeholder, value);
        }
    }
}

impl Interpolatable for Text {
    fn interpolate(&mut self, vars: &HashMap<String, String>) {
        interpolate_string(&mut self.text, vars);
    }
}

impl Interpolatable for QrCode {
    fn interpolate(&mut self, vars: &HashMap<String, String>) {
        interpolate_string(&mut self.data, vars);
    }
}

impl Interpolatable for Barcode {
    fn interpolate(&mut self, vars: &HashMap<String, String>) {
        interpolate_string(&mut self.data, vars);
    }
}

// Types without data-bearing text are no-ops
impl Interpolatable for Image {
    fn interpolate(&mut self, _vars: &HashMap<String, String>) {}
}
impl Interpolatable for Shape {
    fn interpolate(&mut self, _vars: &HashMap<String, String>) {}
}
