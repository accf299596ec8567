//! Millimeter-to-pixel geometry.
//!
//! Labels are authored in millimeters; SVG output is in device pixels at a
//! configurable DPI. The whole transform is `scale = dpi / 25.4` plus a
//! constant offset when the bleed area is part of the document.

use crate::label::LabelSize;

/// Default render resolution (CSS pixel standard).
pub const DEFAULT_DPI: f64 = 96.0;

const MM_PER_INCH: f64 = 25.4;

/// The coordinate transform for one render pass.
///
/// Established once per document from the label size, DPI, and whether the
/// bleed area is included. Every element coordinate maps through
/// [`Geometry::x`]/[`Geometry::y`]; lengths map through [`Geometry::px`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Pixels per millimeter.
    pub scale: f64,
    /// Content offset: bleed width in pixels when bleed is shown, else 0.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Full document size in pixels (label plus bleed when shown).
    pub total_width: f64,
    pub total_height: f64,
    /// Trimmed label size in pixels (bleed excluded).
    pub label_width: f64,
    pub label_height: f64,
}

impl Geometry {
    pub fn new(size: &LabelSize, dpi: f64, show_bleed: bool) -> Self {
        let scale = dpi / MM_PER_INCH;
        let bleed_px = if show_bleed {
            size.bleed_mm * scale
        } else {
            0.0
        };

        Self {
            scale,
            offset_x: bleed_px,
            offset_y: bleed_px,
            total_width: size.width_mm * scale + bleed_px * 2.0,
            total_height: size.height_mm * scale + bleed_px * 2.0,
            label_width: size.width_mm * scale,
            label_height: size.height_mm * scale,
        }
    }

    /// Convert a millimeter length to pixels.
    pub fn px(&self, mm: f64) -> f64 {
        mm * self.scale
    }

    /// Map a millimeter x-coordinate into document pixel space.
    pub fn x(&self, mm: f64) -> f64 {
        mm * self.scale + self.offset_x
    }

    /// Map a millimeter y-coordinate into document pixel space.
    pub fn y(&self, mm: f64) -> f64 {
        mm * self.scale + self.offset_y
    }
}
