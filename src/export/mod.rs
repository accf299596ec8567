//! # Export Finalizer
//!
//! Turns a template into production artwork: variables applied, guides
//! off, QR and barcode placeholders replaced by real scannable geometry,
//! serialized as SVG or converted to a PDF page sized exactly to the
//! label.
//!
//! ```
//! use etiqueta::export::{ExportOptions, export_svg};
//! use etiqueta::label::LabelTemplate;
//!
//! let template: LabelTemplate = serde_json::from_str(r#"{
//!     "size": {"widthMm": 140, "heightMm": 60},
//!     "elements": [{"kind": "qr", "id": "q", "x": 100, "y": 30, "size": 15,
//!                   "data": "https://example.com/lot/123"}]
//! }"#).unwrap();
//!
//! let svg = export_svg(&template, &ExportOptions::default());
//! assert!(!svg.contains(">QR</text>")); // real modules, not the placeholder
//! ```
//!
//! Code injection is failure-tolerant: a payload that cannot be encoded
//! keeps its placeholder and the export still succeeds. Only PDF
//! conversion can fail a call, with the distinct
//! [`EtiquetaError::PdfConversion`] variant.
//!
//! The SVG composition step and the PDF conversion step are split by
//! [`ExportArtifact`]: callers that convert elsewhere (another process, a
//! browser) take the artifact and run the conversion entrypoint in that
//! context.

pub mod barcode;
pub mod pdf;
pub mod qr;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EtiquetaError;
use crate::label::{LabelElement, LabelTemplate, apply_variables};
use crate::render::element::escape_xml;
use crate::render::geometry::DEFAULT_DPI;
use crate::render::{Geometry, RenderOptions, render_svg};

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Pdf,
}

/// Options for an export pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Variable overrides, merged on top of the template's own variables.
    pub variables: Option<HashMap<String, String>>,
    /// Render resolution (default: 96).
    pub dpi: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            variables: None,
            dpi: DEFAULT_DPI,
        }
    }
}

/// The finalized vector document plus the dimensions needed to size a
/// page from it. This is the seam between composition and conversion:
/// produce it here, convert it wherever the conversion capability lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportArtifact {
    /// Finalized SVG markup (real QR/barcode geometry, no guides).
    pub svg: String,
    pub width_px: f64,
    pub height_px: f64,
    /// The DPI the pixel dimensions were rendered at.
    pub dpi: f64,
}

impl ExportArtifact {
    /// Physical page width implied by the artifact.
    pub fn width_mm(&self) -> f64 {
        self.width_px / self.dpi * 25.4
    }

    /// Physical page height implied by the artifact.
    pub fn height_mm(&self) -> f64 {
        self.height_px / self.dpi * 25.4
    }

    /// Convert to a PDF page matching the label exactly. Fatal on
    /// conversion failure; see [`EtiquetaError::PdfConversion`].
    pub fn to_pdf(&self) -> Result<Vec<u8>, EtiquetaError> {
        pdf::svg_to_pdf(&self.svg, self.dpi)
    }
}

/// Compose the finalized export document.
///
/// Applies merged variables, renders without guides, then splices real QR
/// and barcode geometry into the placeholder groups, matched by element
/// id. Each element's generation is independent; a failure keeps that
/// element's placeholder and is logged.
pub fn prepare_artifact(template: &LabelTemplate, options: &ExportOptions) -> ExportArtifact {
    let vars = template.merged_variables(options.variables.as_ref());
    let final_template = if vars.is_empty() {
        template.clone()
    } else {
        apply_variables(template, &vars)
    };

    let render_options = RenderOptions {
        show_bleed: false,
        show_safe: false,
        dpi: options.dpi,
    };
    let geo = Geometry::new(&final_template.size, options.dpi, false);
    let mut svg = render_svg(&final_template, &render_options);

    for element in &final_template.elements {
        match element {
            LabelElement::Qr(el) => {
                match qr::qr_fragment(el, geo.x(el.x), geo.y(el.y), geo.scale) {
                    Ok(group) => {
                        svg = replace_group(&svg, &format!("qr-{}", escape_xml(&el.id)), &group);
                    }
                    Err(e) => {
                        tracing::warn!(id = %el.id, error = %e, "QR generation failed, keeping placeholder");
                    }
                }
            }
            LabelElement::Barcode(el) => {
                match barcode::barcode_fragment(el, geo.x(el.x), geo.y(el.y), geo.scale) {
                    Some(group) => {
                        svg =
                            replace_group(&svg, &format!("barcode-{}", escape_xml(&el.id)), &group);
                    }
                    None => {
                        tracing::warn!(id = %el.id, barcode_type = el.barcode_type.label(), "barcode encoding failed, keeping placeholder");
                    }
                }
            }
            _ => {}
        }
    }

    ExportArtifact {
        svg,
        width_px: geo.total_width,
        height_px: geo.total_height,
        dpi: options.dpi,
    }
}

/// Export as finalized SVG markup.
pub fn export_svg(template: &LabelTemplate, options: &ExportOptions) -> String {
    prepare_artifact(template, options).svg
}

/// Export as a PDF document sized exactly to the label.
pub fn export_pdf(
    template: &LabelTemplate,
    options: &ExportOptions,
) -> Result<Vec<u8>, EtiquetaError> {
    prepare_artifact(template, options).to_pdf()
}

/// Replace the group element with the given id (opening tag through its
/// closing `</g>`) with new markup. Placeholder groups never nest, so the
/// first closing tag after the opening is the right one. Returns the
/// document unchanged when no such group exists.
fn replace_group(svg: &str, group_id: &str, replacement: &str) -> String {
    let needle = format!("<g id=\"{}\"", group_id);
    let Some(start) = svg.find(&needle) else {
        return svg.to_string();
    };
    let Some(close_rel) = svg[start..].find("</g>") else {
        return svg.to_string();
    };
    let end = start + close_rel + "</g>".len();

    let mut out = String::with_capacity(svg.len() + replacement.len());
    out.push_str(&svg[..start]);
    out.push_str(replacement);
    out.push_str(&svg[end..]);
    out
}
