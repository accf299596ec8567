//! QR code generation for export.
//!
//! Builds real module geometry with the qrcode crate and emits it as
//! vector rects sized to the element's millimeter footprint at the render
//! DPI. Zero quiet-zone margin: the label design owns the whitespace.

use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};

use crate::label::element::{self, ErrorCorrection};
use crate::render::element::escape_xml;

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

/// Generate a replacement group for a QR element's placeholder.
///
/// `x`/`y` are the element's document pixel coordinates. Dark modules in
/// each row are merged into single rects to keep the output compact.
pub(crate) fn qr_fragment(
    el: &element::QrCode,
    x: f64,
    y: f64,
    scale: f64,
) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(el.data.as_bytes(), ec_level(el.error_correction))?;
    let modules = code.width();
    let size_px = el.size * scale;
    let module_px = size_px / modules as f64;

    let mut group = format!("<g id=\"qr-{}\" data-layer=\"qr\">", escape_xml(&el.id));

    // White backing so the code scans on any underlying artwork
    group.push_str(&format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{size_px}\" height=\"{size_px}\" fill=\"white\"/>"
    ));

    for qy in 0..modules {
        let mut qx = 0;
        while qx < modules {
            if code[(qx, qy)] != qrcode::Color::Dark {
                qx += 1;
                continue;
            }
            let run_start = qx;
            while qx < modules && code[(qx, qy)] == qrcode::Color::Dark {
                qx += 1;
            }
            group.push_str(&format!(
                "<rect x=\"{rx}\" y=\"{ry}\" width=\"{rw}\" height=\"{rh}\" fill=\"black\"/>",
                rx = x + run_start as f64 * module_px,
                ry = y + qy as f64 * module_px,
                rw = (qx - run_start) as f64 * module_px,
                rh = module_px,
            ));
        }
    }

    group.push_str("</g>");
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::element::QrCode as QrElement;

    fn qr(data: &str) -> QrElement {
        QrElement {
            id: "q1".into(),
            x: 0.0,
            y: 0.0,
            size: 15.0,
            data: data.into(),
            error_correction: ErrorCorrection::M,
        }
    }

    #[test]
    fn test_fragment_contains_modules() {
        let out = qr_fragment(&qr("https://example.com/lot/123"), 10.0, 10.0, 96.0 / 25.4).unwrap();
        assert!(out.starts_with("<g id=\"qr-q1\" data-layer=\"qr\">"));
        assert!(out.ends_with("</g>"));
        assert!(out.contains("fill=\"black\""));
        // no placeholder label survives
        assert!(!out.contains(">QR<"));
    }

    #[test]
    fn test_fragment_is_deterministic() {
        let el = qr("stable");
        let a = qr_fragment(&el, 0.0, 0.0, 96.0 / 25.4).unwrap();
        let b = qr_fragment(&el, 0.0, 0.0, 96.0 / 25.4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_oversized_payload_errors() {
        // QR capacity tops out below 3000 bytes at level M
        let big = "x".repeat(3000);
        assert!(qr_fragment(&qr(&big), 0.0, 0.0, 96.0 / 25.4).is_err());
    }
}
