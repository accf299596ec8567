//! # SVG Rendering
//!
//! Deterministic label-template-to-SVG composition.
//!
//! ```
//! use etiqueta::label::LabelTemplate;
//! use etiqueta::render::{RenderOptions, render_svg};
//!
//! let template: LabelTemplate = serde_json::from_str(r#"{
//!     "size": {"widthMm": 140, "heightMm": 60},
//!     "elements": [{"kind": "text", "id": "t", "x": 10, "y": 10,
//!                   "text": "EASY HEALTH", "font": {"sizePt": 5}}]
//! }"#).unwrap();
//!
//! let svg = render_svg(&template, &RenderOptions { show_bleed: true, ..Default::default() });
//! assert!(svg.starts_with("<?xml"));
//! ```
//!
//! The same `(template, options)` pair always yields byte-identical output:
//! no generated ids, no timestamps. Elements paint in array order inside a
//! single content group, so z-order is document order.

pub mod element;
pub mod geometry;

pub use geometry::{DEFAULT_DPI, Geometry};

use serde::{Deserialize, Serialize};

use crate::label::{LabelElement, LabelTemplate};

/// Options for a render pass.
///
/// `show_bleed` and `show_safe` toggle the dashed guide overlays
/// independently; both are design-preview aids and stay off for export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Include the bleed area in the document and draw its boundary guide.
    pub show_bleed: bool,
    /// Draw the safe-zone guide inset by the safe margin.
    pub show_safe: bool,
    /// Render resolution (default: 96).
    pub dpi: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_bleed: false,
            show_safe: false,
            dpi: DEFAULT_DPI,
        }
    }
}

/// Compose a complete, self-contained SVG document for the template.
pub fn render_svg(template: &LabelTemplate, options: &RenderOptions) -> String {
    let geo = Geometry::new(&template.size, options.dpi, options.show_bleed);

    let mut svg = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg width=\"{tw}\" height=\"{th}\" viewBox=\"0 0 {tw} {th}\" xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">\n  <defs>\n    <style>\n      @import url('https://fonts.googleapis.com/css2?family=Noto+Sans+TC:wght@400;500;600;700&amp;display=swap');\n    </style>\n  </defs>\n",
        tw = geo.total_width,
        th = geo.total_height,
    );

    // Background: white, sized to the trimmed label, at the bleed offset
    svg.push_str(&format!(
        "  <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n",
        x = geo.offset_x,
        y = geo.offset_y,
        w = geo.label_width,
        h = geo.label_height,
    ));

    // Guides (design preview only)
    if options.show_bleed {
        svg.push_str(&format!(
            "  <g id=\"guides-bleed\" opacity=\"0.5\">\n    <rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"none\" stroke=\"red\" stroke-width=\"0.5\" stroke-dasharray=\"2,2\"/>\n  </g>\n",
            w = geo.total_width,
            h = geo.total_height,
        ));
    }
    if options.show_safe {
        let inset = geo.px(template.size.safe_mm);
        svg.push_str(&format!(
            "  <g id=\"guides-safe\" opacity=\"0.5\">\n    <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"none\" stroke=\"green\" stroke-width=\"0.5\" stroke-dasharray=\"2,2\"/>\n  </g>\n",
            x = geo.offset_x + inset,
            y = geo.offset_y + inset,
            w = geo.label_width - inset * 2.0,
            h = geo.label_height - inset * 2.0,
        ));
    }

    // Content: elements in layer order (array order = z-order)
    svg.push_str("  <g id=\"content\">\n");
    for (idx, el) in template.elements.iter().enumerate() {
        svg.push_str(&render_element(el, &geo, idx));
    }
    svg.push_str("  </g>\n");

    svg.push_str("</svg>");
    svg
}

/// Dispatch a single element to its renderer. Exhaustive over the element
/// union; the compiler flags any new kind added to [`LabelElement`].
fn render_element(el: &LabelElement, geo: &Geometry, idx: usize) -> String {
    let (x_mm, y_mm) = el.position();
    let x = geo.x(x_mm);
    let y = geo.y(y_mm);

    match el {
        LabelElement::Text(e) => element::render_text(e, x, y, geo.scale, idx),
        LabelElement::Image(e) => element::render_image(e, x, y, geo.scale, idx),
        LabelElement::Qr(e) => element::render_qr_placeholder(e, x, y, geo.scale, idx),
        LabelElement::Barcode(e) => element::render_barcode_placeholder(e, x, y, geo.scale, idx),
        LabelElement::Shape(e) => element::render_shape(e, x, y, geo, idx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template(json: &str) -> LabelTemplate {
        serde_json::from_str(json).unwrap()
    }

    fn basic() -> LabelTemplate {
        template(
            r##"{
                "size": {"widthMm": 140, "heightMm": 60, "bleedMm": 2, "safeMm": 3},
                "elements": [
                    {"kind": "text", "id": "a", "x": 10, "y": 10, "text": "A",
                     "font": {"sizePt": 5}},
                    {"kind": "shape", "id": "b", "shape": "rect", "x": 0, "y": 0,
                     "w": 10, "h": 10, "fill": "#EEE"},
                    {"kind": "qr", "id": "c", "x": 100, "y": 30, "size": 15,
                     "data": "https://example.com"}
                ]
            }"##,
        )
    }

    #[test]
    fn test_render_is_idempotent() {
        let t = basic();
        let opts = RenderOptions {
            show_bleed: true,
            show_safe: true,
            dpi: 96.0,
        };
        assert_eq!(render_svg(&t, &opts), render_svg(&t, &opts));
    }

    #[test]
    fn test_document_dimensions_without_bleed() {
        let svg = render_svg(&basic(), &RenderOptions::default());
        let w = 140.0 * 96.0 / 25.4;
        let h = 60.0 * 96.0 / 25.4;
        assert!(svg.contains(&format!("<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\"")));
    }

    #[test]
    fn test_document_dimensions_with_bleed() {
        let svg = render_svg(
            &basic(),
            &RenderOptions {
                show_bleed: true,
                ..Default::default()
            },
        );
        let w = (140.0 + 4.0) * 96.0 / 25.4;
        assert!(svg.contains(&format!("width=\"{w}\"")));
    }

    #[test]
    fn test_guides_toggle_independently() {
        let t = basic();
        let bleed_only = render_svg(
            &t,
            &RenderOptions {
                show_bleed: true,
                show_safe: false,
                dpi: 96.0,
            },
        );
        assert!(bleed_only.contains("guides-bleed"));
        assert!(!bleed_only.contains("guides-safe"));

        let safe_only = render_svg(
            &t,
            &RenderOptions {
                show_bleed: false,
                show_safe: true,
                dpi: 96.0,
            },
        );
        assert!(!safe_only.contains("guides-bleed"));
        assert!(safe_only.contains("guides-safe"));
    }

    #[test]
    fn test_z_order_preserved() {
        let svg = render_svg(&basic(), &RenderOptions::default());
        let a = svg.find("id=\"text-a\"").unwrap();
        let b = svg.find("id=\"shape-b\"").unwrap();
        let c = svg.find("id=\"qr-c\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_content_group_wraps_elements() {
        let svg = render_svg(&basic(), &RenderOptions::default());
        let content = svg.find("<g id=\"content\">").unwrap();
        assert!(svg.find("id=\"text-a\"").unwrap() > content);
    }

    #[test]
    fn test_empty_template_still_valid_document() {
        let t = template(r#"{"size": {"widthMm": 50, "heightMm": 30}}"#);
        let svg = render_svg(&t, &RenderOptions::default());
        assert!(svg.starts_with("<?xml version=\"1.0\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("<g id=\"content\">"));
    }
}
