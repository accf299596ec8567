//! 1D barcode generation for export.
//!
//! Encodes with the barcoders crate and emits the bar pattern as vector
//! rect runs. Invalid payloads (wrong digit count, characters outside the
//! symbology) return `None` and the caller keeps the placeholder.

use barcoders::sym::code128::Code128;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::ean13::EAN13;

use crate::label::element::{Barcode, BarcodeType};
use crate::render::element::escape_xml;

/// Vertical pixels reserved for the human-readable payload line.
const TEXT_ZONE_PX: f64 = 12.0;

/// Encode the payload into modules (1 = bar, 0 = space).
fn encode(barcode_type: BarcodeType, data: &str) -> Option<Vec<u8>> {
    match barcode_type {
        BarcodeType::Code128 => {
            // Character Set B: widest printable-character coverage.
            // The encoder requires a charset prefix on the payload.
            let prefixed = format!("\u{0181}{}", data);
            Code128::new(&prefixed).ok().map(|b| b.encode())
        }
        BarcodeType::Ean13 => EAN13::new(data).ok().map(|b| b.encode()),
        BarcodeType::Ean8 => EAN8::new(data).ok().map(|b| b.encode()),
    }
}

/// Generate a replacement group for a barcode element's placeholder.
///
/// Bars fill the element's box; with `display_value` set, the payload is
/// printed beneath them inside the same box. Returns `None` when the
/// payload cannot be encoded for the chosen symbology.
pub(crate) fn barcode_fragment(el: &Barcode, x: f64, y: f64, scale: f64) -> Option<String> {
    let modules = encode(el.barcode_type, &el.data)?;
    if modules.is_empty() {
        return None;
    }

    let w_px = el.w * scale;
    let h_px = el.h * scale;
    let module_px = w_px / modules.len() as f64;
    let bar_height = if el.display_value {
        (h_px - TEXT_ZONE_PX).max(0.0)
    } else {
        h_px
    };

    let mut group = format!("<g id=\"barcode-{}\" data-layer=\"barcode\">", escape_xml(&el.id));
    group.push_str(&format!(
        "<rect x=\"{x}\" y=\"{y}\" width=\"{w_px}\" height=\"{h_px}\" fill=\"white\"/>"
    ));

    let mut i = 0;
    while i < modules.len() {
        if modules[i] != 1 {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < modules.len() && modules[i] == 1 {
            i += 1;
        }
        group.push_str(&format!(
            "<rect x=\"{rx}\" y=\"{y}\" width=\"{rw}\" height=\"{bar_height}\" fill=\"black\"/>",
            rx = x + run_start as f64 * module_px,
            rw = (i - run_start) as f64 * module_px,
        ));
    }

    if el.display_value {
        group.push_str(&format!(
            "<text x=\"{cx}\" y=\"{ty}\" text-anchor=\"middle\" font-family=\"monospace\" font-size=\"8\" fill=\"#000\">{payload}</text>",
            cx = x + w_px / 2.0,
            ty = y + h_px - 2.0,
            payload = escape_xml(&el.data),
        ));
    }

    group.push_str("</g>");
    Some(group)
}
