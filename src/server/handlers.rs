//! JSON API handlers for label preview, export, and compliance.

use axum::{
    Json,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::compliance;
use crate::error::EtiquetaError;
use crate::export::{self, ExportOptions};
use crate::label::LabelTemplate;
use crate::render::{RenderOptions, render_svg};

/// Body for POST /api/labels/preview.
#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    template: LabelTemplate,
    #[serde(default)]
    options: RenderOptions,
}

/// Body for POST /api/labels/export/{svg,pdf}.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportRequest {
    template: LabelTemplate,
    #[serde(default)]
    variables: Option<HashMap<String, String>>,
    #[serde(default)]
    dpi: Option<f64>,
}

impl ExportRequest {
    fn options(&self) -> ExportOptions {
        let mut options = ExportOptions {
            variables: self.variables.clone(),
            ..Default::default()
        };
        if let Some(dpi) = self.dpi {
            options.dpi = dpi;
        }
        options
    }
}

/// Body for POST /api/labels/compliance.
#[derive(Debug, Deserialize)]
pub(crate) struct ComplianceRequest {
    template: LabelTemplate,
}

fn check_size(template: &LabelTemplate) -> Result<(), (StatusCode, String)> {
    if template.size.width_mm <= 0.0 || template.size.height_mm <= 0.0 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "label size must be positive, got {}x{}mm",
                template.size.width_mm, template.size.height_mm
            ),
        ));
    }
    Ok(())
}

/// Handle POST /api/labels/preview - design preview SVG, guides allowed.
pub(crate) async fn preview(
    Json(req): Json<PreviewRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    check_size(&req.template)?;
    let svg = render_svg(&req.template, &req.options);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Handle POST /api/labels/export/svg - finalized production SVG.
pub(crate) async fn export_svg(
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    check_size(&req.template)?;
    let svg = export::export_svg(&req.template, &req.options());
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Handle POST /api/labels/export/pdf - finalized PDF.
///
/// Conversion failures map to 500 with the conversion error message, kept
/// distinct from template errors (422) so clients can tell them apart.
pub(crate) async fn export_pdf(
    Json(req): Json<ExportRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    check_size(&req.template)?;
    let pdf = export::export_pdf(&req.template, &req.options()).map_err(|e| match e {
        EtiquetaError::PdfConversion(msg) => {
            (StatusCode::INTERNAL_SERVER_ERROR, format!("PDF conversion failed: {msg}"))
        }
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;
    Ok(([(header::CONTENT_TYPE, "application/pdf")], pdf))
}

/// Handle POST /api/labels/compliance - HK checklist report.
pub(crate) async fn compliance(
    Json(req): Json<ComplianceRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let report = compliance::validate_hk(&req.template);
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_request_default_options() {
        let req: ExportRequest = serde_json::from_str(
            r#"{"template": {"size": {"widthMm": 100, "heightMm": 50}}}"#,
        )
        .unwrap();
        let options = req.options();
        assert_eq!(options.dpi, 96.0);
        assert!(options.variables.is_none());
    }

    #[test]
    fn test_export_request_custom_dpi_and_variables() {
        let req: ExportRequest = serde_json::from_str(
            r#"{"template": {"size": {"widthMm": 100, "heightMm": 50}},
                "variables": {"lot": "A42"}, "dpi": 300}"#,
        )
        .unwrap();
        let options = req.options();
        assert_eq!(options.dpi, 300.0);
        assert_eq!(options.variables.unwrap()["lot"], "A42");
    }

    #[test]
    fn test_preview_request_options_default() {
        let req: PreviewRequest = serde_json::from_str(
            r#"{"template": {"size": {"widthMm": 100, "heightMm": 50}}}"#,
        )
        .unwrap();
        assert!(!req.options.show_bleed);
        assert_eq!(req.options.dpi, 96.0);
    }
}
