//! SVG to PDF conversion.
//!
//! The page is sized from the SVG's declared dimensions: svg2pdf maps
//! document pixels back to physical units using the render DPI, so a
//! 140x60mm label becomes exactly a 140x60mm page with no added margin,
//! and orientation follows whichever dimension is larger.

use crate::error::EtiquetaError;

pub(crate) fn svg_to_pdf(svg: &str, dpi: f64) -> Result<Vec<u8>, EtiquetaError> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = svg2pdf::usvg::Tree::from_str(svg, &options).map_err(|e| {
        EtiquetaError::PdfConversion(format!("failed to parse SVG for conversion: {e}"))
    })?;

    let mut page_options = svg2pdf::PageOptions::default();
    page_options.dpi = dpi as f32;

    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page_options)
        .map_err(|e| EtiquetaError::PdfConversion(format!("failed to convert SVG to PDF: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_svg_converts() {
        let svg = "<svg width=\"100\" height=\"50\" viewBox=\"0 0 100 50\" xmlns=\"http://www.w3.org/2000/svg\"><rect width=\"100\" height=\"50\" fill=\"white\"/></svg>";
        let pdf = svg_to_pdf(svg, 96.0).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invalid_markup_is_conversion_error() {
        let err = svg_to_pdf("this is not svg", 96.0).unwrap_err();
        assert!(matches!(err, EtiquetaError::PdfConversion(_)));
    }
}
