//! # Label Template Model
//!
//! A single type hierarchy that is both the Rust API and the JSON API.
//! [`LabelTemplate`] is constructible in Rust and deserializable from JSON.
//!
//! ```
//! use etiqueta::label::LabelTemplate;
//!
//! let json = r#"{
//!     "name": "Sleep Well Plus",
//!     "size": {"widthMm": 140, "heightMm": 60},
//!     "elements": [
//!         {"kind": "text", "id": "title", "x": 10, "y": 10,
//!          "text": "{{productName}}", "font": {"sizePt": 14, "align": "center"}}
//!     ]
//! }"#;
//! let template: LabelTemplate = serde_json::from_str(json).unwrap();
//! assert_eq!(template.elements.len(), 1);
//! ```
//!
//! Templates are plain values. Rendering and export never mutate them;
//! [`apply_variables`] returns an independent clone.

pub mod element;

pub use element::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EtiquetaError;

fn default_bleed_mm() -> f64 {
    2.0
}

fn default_safe_mm() -> f64 {
    3.0
}

/// Physical label dimensions in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSize {
    pub width_mm: f64,
    pub height_mm: f64,
    /// Bleed margin beyond the trim edge (default: 2mm).
    #[serde(default = "default_bleed_mm")]
    pub bleed_mm: f64,
    /// Safe zone inset from the trim edge (default: 3mm).
    #[serde(default = "default_safe_mm")]
    pub safe_mm: f64,
}

/// Free-form descriptive fields. Never geometry-relevant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelMetadata {
    #[serde(default)]
    pub generated_by: Option<String>,
    #[serde(default)]
    pub compliance_score: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A complete label design: physical size, ordered elements, variables.
///
/// Element array order is paint order (first = bottom). `variables` holds
/// template-level defaults for `{{token}}` substitution; variables supplied
/// at export time override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelTemplate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub size: LabelSize,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default)]
    pub elements: Vec<LabelElement>,
    #[serde(default)]
    pub metadata: Option<LabelMetadata>,
}

impl LabelTemplate {
    /// Parse a template from JSON, rejecting non-positive label dimensions.
    pub fn from_json(json: &str) -> Result<Self, EtiquetaError> {
        let template: LabelTemplate =
            serde_json::from_str(json).map_err(|e| EtiquetaError::Template(e.to_string()))?;
        if template.size.width_mm <= 0.0 || template.size.height_mm <= 0.0 {
            return Err(EtiquetaError::Template(format!(
                "label size must be positive, got {}x{}mm",
                template.size.width_mm, template.size.height_mm
            )));
        }
        if template.size.bleed_mm < 0.0 || template.size.safe_mm < 0.0 {
            return Err(EtiquetaError::Template(
                "bleed and safe margins must be non-negative".to_string(),
            ));
        }
        Ok(template)
    }

    /// Build the variable map for an export: template-level variables with
    /// caller-supplied overrides on top.
    pub fn merged_variables(
        &self,
        overrides: Option<&HashMap<String, String>>,
    ) -> HashMap<String, String> {
        let mut vars = self.variables.clone();
        if let Some(overrides) = overrides {
            vars.extend(overrides.clone());
        }
        vars
    }
}

/// Return a deep copy of the template with every `{{key}}` token in text
/// content and QR/barcode payloads replaced from `vars`. Tokens whose key
/// is absent from the map are left literally in place. The input template
/// is not touched.
pub fn apply_variables(
    template: &LabelTemplate,
    vars: &HashMap<String, String>,
) -> LabelTemplate {
    let mut cloned = template.clone();
    for element in &mut cloned.elements {
        element.interpolate(vars);
    }
    cloned
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_template() -> LabelTemplate {
        serde_json::from_str(
            r#"{
                "id": "lbl-1",
                "name": "Sleep Well Plus",
                "size": {"widthMm": 140, "heightMm": 60},
                "variables": {"lot": "A42"},
                "elements": [
                    {"kind": "text", "id": "t1", "x": 10, "y": 10,
                     "text": "{{productName}} 60 capsules",
                     "font": {"sizePt": 5, "align": "center"}},
                    {"kind": "qr", "id": "q1", "x": 100, "y": 30, "size": 15,
                     "data": "https://example.com/lot/{{lot}}"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_size_defaults() {
        let t = sample_template();
        assert_eq!(t.size.bleed_mm, 2.0);
        assert_eq!(t.size.safe_mm, 3.0);
    }

    #[test]
    fn test_from_json_rejects_zero_size() {
        let json = r#"{"size": {"widthMm": 0, "heightMm": 60}}"#;
        let err = LabelTemplate::from_json(json).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn test_apply_variables_replaces_text_and_payloads() {
        let t = sample_template();
        let vars = HashMap::from([
            ("productName".to_string(), "Sleep Well Plus".to_string()),
            ("lot".to_string(), "B7".to_string()),
        ]);
        let applied = apply_variables(&t, &vars);

        let LabelElement::Text(text) = &applied.elements[0] else {
            panic!("expected text")
        };
        assert_eq!(text.text, "Sleep Well Plus 60 capsules");

        let LabelElement::Qr(qr) = &applied.elements[1] else {
            panic!("expected qr")
        };
        assert_eq!(qr.data, "https://example.com/lot/B7");
    }

    #[test]
    fn test_apply_variables_does_not_mutate_input() {
        let t = sample_template();
        let before = t.clone();
        let vars = HashMap::from([("productName".to_string(), "X".to_string())]);
        let _ = apply_variables(&t, &vars);
        assert_eq!(t, before);
    }

    #[test]
    fn test_apply_variables_leaves_unknown_tokens() {
        let t = sample_template();
        let applied = apply_variables(&t, &HashMap::new());
        let LabelElement::Text(text) = &applied.elements[0] else {
            panic!("expected text")
        };
        assert_eq!(text.text, "{{productName}} 60 capsules");
    }

    #[test]
    fn test_merged_variables_overrides_template() {
        let t = sample_template();
        let overrides = HashMap::from([("lot".to_string(), "Z9".to_string())]);
        let merged = t.merged_variables(Some(&overrides));
        assert_eq!(merged["lot"], "Z9");

        let merged = t.merged_variables(None);
        assert_eq!(merged["lot"], "A42");
    }
}
