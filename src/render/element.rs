//! Per-element SVG fragment renderers.
//!
//! One pure function per element kind: `(element, x_px, y_px, ...) -> String`.
//! Coordinates arrive already mapped into document pixel space; each
//! renderer only scales its own lengths. Renderers never fail — malformed
//! geometry degrades to an empty group so one bad element cannot abort the
//! rest of the document.

use crate::label::element::{Barcode, Image, QrCode, Shape, ShapeKind, Text, TextAlign};
use crate::render::geometry::Geometry;

/// Escape the five XML special characters for text content and attributes.
pub(crate) fn escape_xml(unsafe_text: &str) -> String {
    let mut out = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a text element.
///
/// The horizontal anchor derives from the alignment: center/right anchors
/// shift by half/full declared width when a bounding width is present.
/// The baseline is the `y + sizePt * 0.8` heuristic, not true ascent
/// metrics — a known approximation kept for output stability.
pub(crate) fn render_text(el: &Text, x: f64, y: f64, scale: f64, idx: usize) -> String {
    let font_size = el.font.size_pt;
    let (text_anchor, adjusted_x) = match (el.font.align, el.w) {
        (TextAlign::Center, Some(w)) => ("middle", x + (w * scale) / 2.0),
        (TextAlign::Center, None) => ("middle", x),
        (TextAlign::Right, Some(w)) => ("end", x + w * scale),
        (TextAlign::Right, None) => ("end", x),
        (TextAlign::Left, _) => ("start", x),
    };

    format!(
        "    <g id=\"text-{id}\" data-layer=\"text-{idx}\">\n      <text x=\"{x}\" y=\"{y}\" font-family=\"{family}\" font-size=\"{size}\" font-weight=\"{weight}\" fill=\"{color}\" text-anchor=\"{anchor}\" xml:space=\"preserve\">{content}</text>\n    </g>\n",
        id = escape_xml(&el.id),
        idx = idx,
        x = adjusted_x,
        y = y + font_size * 0.8,
        family = escape_xml(&el.font.family),
        size = font_size,
        weight = el.font.weight,
        color = escape_xml(&el.color),
        anchor = text_anchor,
        content = escape_xml(&el.text),
    )
}

/// Render an image element: rectangle-clipped, aspect-fill cropped.
pub(crate) fn render_image(el: &Image, x: f64, y: f64, scale: f64, idx: usize) -> String {
    let w = el.w * scale;
    let h = el.h * scale;

    format!(
        "    <g id=\"image-{id}\" data-layer=\"image-{idx}\" opacity=\"{opacity}\">\n      <image x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" xlink:href=\"{src}\" preserveAspectRatio=\"xMidYMid slice\"/>\n    </g>\n",
        id = escape_xml(&el.id),
        idx = idx,
        opacity = el.opacity,
        x = x,
        y = y,
        w = w,
        h = h,
        src = escape_xml(&el.src),
    )
}

/// Render a QR placeholder: bordered square with a centered "QR" label,
/// tagged with payload and nominal size so the export finalizer can splice
/// in real module geometry.
pub(crate) fn render_qr_placeholder(el: &QrCode, x: f64, y: f64, scale: f64, idx: usize) -> String {
    let size = el.size * scale;

    format!(
        "    <g id=\"qr-{id}\" data-layer=\"qr-{idx}\" data-qr-data=\"{data}\" data-qr-size=\"{size_mm}\">\n      <rect x=\"{x}\" y=\"{y}\" width=\"{size}\" height=\"{size}\" fill=\"none\" stroke=\"#000\" stroke-width=\"1\"/>\n      <text x=\"{cx}\" y=\"{cy}\" text-anchor=\"middle\" font-size=\"8\" fill=\"#666\">QR</text>\n    </g>\n",
        id = escape_xml(&el.id),
        idx = idx,
        data = escape_xml(&el.data),
        size_mm = el.size,
        x = x,
        y = y,
        size = size,
        cx = x + size / 2.0,
        cy = y + size / 2.0,
    )
}

/// Render a barcode placeholder: bordered rectangle with the symbology
/// label, tagged with payload and type for the export finalizer.
pub(crate) fn render_barcode_placeholder(
    el: &Barcode,
    x: f64,
    y: f64,
    scale: f64,
    idx: usize,
) -> String {
    let w = el.w * scale;
    let h = el.h * scale;

    format!(
        "    <g id=\"barcode-{id}\" data-layer=\"barcode-{idx}\" data-barcode-type=\"{bt}\" data-barcode-data=\"{data}\">\n      <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"none\" stroke=\"#000\" stroke-width=\"1\"/>\n      <text x=\"{cx}\" y=\"{cy}\" text-anchor=\"middle\" font-size=\"8\" fill=\"#666\">{bt}</text>\n    </g>\n",
        id = escape_xml(&el.id),
        idx = idx,
        bt = el.barcode_type.label(),
        data = escape_xml(&el.data),
        x = x,
        y = y,
        w = w,
        h = h,
        cx = x + w / 2.0,
        cy = y + h / 2.0,
    )
}

/// Render a shape element, dispatching on kind.
///
/// A shape missing the geometry its kind requires emits an empty group
/// body instead of failing.
pub(crate) fn render_shape(el: &Shape, x: f64, y: f64, geo: &Geometry, idx: usize) -> String {
    let scale = geo.scale;
    let stroke_attr = match &el.stroke {
        Some(stroke) => format!("stroke=\"{}\"", escape_xml(stroke)),
        None => "stroke=\"none\"".to_string(),
    };
    let fill_attr = match &el.fill {
        Some(fill) => format!("fill=\"{}\"", escape_xml(fill)),
        None => "fill=\"none\"".to_string(),
    };

    let shape_body = match (el.shape, el.w, el.h, el.r, el.x2, el.y2) {
        (ShapeKind::Rect, Some(w), Some(h), _, _, _) => format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" {stroke} {fill} stroke-width=\"{sw}\"/>",
            x = x,
            y = y,
            w = w * scale,
            h = h * scale,
            stroke = stroke_attr,
            fill = fill_attr,
            sw = el.stroke_width,
        ),
        (ShapeKind::Line, _, _, _, Some(x2), Some(y2)) => format!(
            "<line x1=\"{x}\" y1=\"{y}\" x2=\"{ex}\" y2=\"{ey}\" {stroke} stroke-width=\"{sw}\"/>",
            x = x,
            y = y,
            ex = geo.x(x2),
            ey = geo.y(y2),
            stroke = stroke_attr,
            sw = el.stroke_width,
        ),
        (ShapeKind::Circle, _, _, Some(r), _, _) => format!(
            "<circle cx=\"{x}\" cy=\"{y}\" r=\"{r}\" {stroke} {fill} stroke-width=\"{sw}\"/>",
            x = x,
            y = y,
            r = r * scale,
            stroke = stroke_attr,
            fill = fill_attr,
            sw = el.stroke_width,
        ),
        // Required geometry absent for this kind: defensive no-op
        _ => String::new(),
    };

    format!(
        "    <g id=\"shape-{id}\" data-layer=\"shape-{idx}\" opacity=\"{opacity}\">\n      {body}\n    </g>\n",
        id = escape_xml(&el.id),
        idx = idx,
        opacity = el.opacity,
        body = shape_body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelSize;
    use crate::label::element::Font;

    fn geo() -> Geometry {
        Geometry::new(
            &LabelSize {
                width_mm: 100.0,
                height_mm: 50.0,
                bleed_mm: 2.0,
                safe_mm: 3.0,
            },
            96.0,
            false,
        )
    }

    fn text_el(align: TextAlign, w: Option<f64>) -> Text {
        Text {
            id: "t1".into(),
            x: 10.0,
            y: 10.0,
            w,
            h: None,
            text: "EASY HEALTH".into(),
            font: Font {
                family: "Noto Sans TC".into(),
                size_pt: 5.0,
                weight: 700,
                align,
            },
            color: "#1F2937".into(),
            line_height: 1.2,
        }
    }

    #[test]
    fn test_escape_xml_all_five() {
        assert_eq!(
            escape_xml(r#"<a & "b" '>"#),
            "&lt;a &amp; &quot;b&quot; &apos;&gt;"
        );
    }

    #[test]
    fn test_text_left_anchor_no_shift() {
        let out = render_text(&text_el(TextAlign::Left, Some(20.0)), 50.0, 40.0, geo().scale, 0);
        assert!(out.contains("text-anchor=\"start\""));
        assert!(out.contains("x=\"50\""));
    }

    #[test]
    fn test_text_center_shifts_half_width() {
        let scale = geo().scale;
        let out = render_text(&text_el(TextAlign::Center, Some(20.0)), 50.0, 40.0, scale, 0);
        assert!(out.contains("text-anchor=\"middle\""));
        assert!(out.contains(&format!("x=\"{}\"", 50.0 + (20.0 * scale) / 2.0)));
    }

    #[test]
    fn test_text_right_shifts_full_width() {
        let scale = geo().scale;
        let out = render_text(&text_el(TextAlign::Right, Some(20.0)), 50.0, 40.0, scale, 0);
        assert!(out.contains("text-anchor=\"end\""));
        assert!(out.contains(&format!("x=\"{}\"", 50.0 + 20.0 * scale)));
    }

    #[test]
    fn test_text_baseline_heuristic() {
        let out = render_text(&text_el(TextAlign::Left, None), 50.0, 40.0, geo().scale, 0);
        assert!(out.contains(&format!("y=\"{}\"", 40.0 + 5.0 * 0.8)));
    }

    #[test]
    fn test_text_content_escaped() {
        let mut el = text_el(TextAlign::Left, None);
        el.text = "A&B <C>".into();
        let out = render_text(&el, 0.0, 0.0, geo().scale, 0);
        assert!(out.contains(">A&amp;B &lt;C&gt;</text>"));
    }

    #[test]
    fn test_qr_placeholder_carries_metadata() {
        let el = QrCode {
            id: "q1".into(),
            x: 0.0,
            y: 0.0,
            size: 15.0,
            data: "https://example.com".into(),
            error_correction: Default::default(),
        };
        let out = render_qr_placeholder(&el, 0.0, 0.0, geo().scale, 3);
        assert!(out.contains("data-qr-data=\"https://example.com\""));
        assert!(out.contains("data-qr-size=\"15\""));
        assert!(out.contains(">QR</text>"));
    }

    #[test]
    fn test_shape_rect_missing_dims_is_empty_group() {
        let el = Shape {
            id: "s1".into(),
            shape: ShapeKind::Rect,
            x: 1.0,
            y: 1.0,
            w: None,
            h: Some(5.0),
            r: None,
            x2: None,
            y2: None,
            stroke: Some("#000".into()),
            fill: None,
            stroke_width: 1.0,
            opacity: 1.0,
        };
        let g = geo();
        let out = render_shape(&el, g.x(1.0), g.y(1.0), &g, 0);
        assert!(out.contains("<g id=\"shape-s1\""));
        assert!(!out.contains("<rect"));
    }

    #[test]
    fn test_shape_line_transforms_endpoint() {
        let g = Geometry::new(
            &LabelSize {
                width_mm: 100.0,
                height_mm: 50.0,
                bleed_mm: 2.0,
                safe_mm: 3.0,
            },
            96.0,
            true,
        );
        let el = Shape {
            id: "s2".into(),
            shape: ShapeKind::Line,
            x: 0.0,
            y: 0.0,
            w: None,
            h: None,
            r: None,
            x2: Some(10.0),
            y2: Some(20.0),
            stroke: Some("#333".into()),
            fill: None,
            stroke_width: 0.5,
            opacity: 1.0,
        };
        let out = render_shape(&el, g.x(0.0), g.y(0.0), &g, 0);
        // endpoint goes through the same scale/offset as the start point
        assert!(out.contains(&format!("x2=\"{}\"", g.x(10.0))));
        assert!(out.contains(&format!("y2=\"{}\"", g.y(20.0))));
    }
}
