//! # Etiqueta - Label Rendering & Export Library
//!
//! Etiqueta turns JSON label templates into print-ready artwork for
//! capsule-supplement packaging. It provides:
//!
//! - **Template model**: a closed element union (text, image, QR, barcode,
//!   shape) with `{{variable}}` interpolation
//! - **SVG rendering**: deterministic millimeter-accurate composition with
//!   bleed/safe-zone guides
//! - **Export**: real QR and barcode geometry injection, PDF pages sized
//!   exactly to the label
//! - **Compliance**: HK supplement labeling checklist
//!
//! ## Quick Start
//!
//! ```
//! use etiqueta::export::{ExportOptions, export_svg};
//! use etiqueta::label::LabelTemplate;
//! use etiqueta::render::{RenderOptions, render_svg};
//!
//! let template: LabelTemplate = serde_json::from_str(r#"{
//!     "name": "Sleep Well Plus",
//!     "size": {"widthMm": 140, "heightMm": 60},
//!     "elements": [
//!         {"kind": "text", "id": "title", "x": 10, "y": 10,
//!          "text": "{{productName}}",
//!          "font": {"sizePt": 14, "weight": 700, "align": "center"}},
//!         {"kind": "qr", "id": "lot-qr", "x": 115, "y": 35, "size": 18,
//!          "data": "https://example.com/lot/{{lot}}"}
//!     ]
//! }"#)?;
//!
//! // Design preview with guides
//! let preview = render_svg(&template, &RenderOptions {
//!     show_bleed: true,
//!     show_safe: true,
//!     ..Default::default()
//! });
//!
//! // Production artwork with real QR modules
//! let artwork = export_svg(&template, &ExportOptions::default());
//! # Ok::<(), serde_json::Error>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`label`] | Template model and variable substitution |
//! | [`render`] | Geometry and SVG composition |
//! | [`export`] | QR/barcode injection and PDF conversion |
//! | [`compliance`] | HK labeling checklist |
//! | [`server`] | HTTP JSON API |
//! | [`error`] | Error types |

pub mod compliance;
pub mod error;
pub mod export;
pub mod label;
pub mod render;
pub mod server;

// Re-exports for convenience
pub use error::EtiquetaError;
pub use label::{LabelTemplate, apply_variables};
