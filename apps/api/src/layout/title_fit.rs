//! Title fitting and rotated-title placement for the accent strip.
//!
//! The title is drawn rotated 90° counter-clockwise, so its measured *width* becomes its
//! vertical extent on the card. The fit loop shrinks the font until that extent fits the
//! card height minus padding, stopping at a floor size.
//!
//! After rotation the baseline is a vertical line and the glyph bodies extend to its left.
//! Centering the baseline on the strip would leave the ink left of center, so the baseline
//! is nudged right by a fraction of the cap height.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontMetricTable;
use crate::layout::sheet::TitleStyle;
use crate::layout::units::{Point, Rect};

/// A title with its chosen font size and the measured width at that size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTitle {
    pub text: String,
    pub size_pt: f32,
    pub width_pt: f32,
    /// True when the loop stopped at the floor size rather than because the text fit.
    pub at_floor: bool,
}

/// Trims the requested title, substituting `fallback` when nothing is left.
pub fn resolve_title(requested: &str, fallback: &str) -> String {
    let trimmed = requested.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Picks the largest size on the `base - k·step` ladder whose width fits `max_span_pt`,
/// never going below `style.min_size_pt`.
pub fn fit_title(
    text: &str,
    metrics: &FontMetricTable,
    max_span_pt: f32,
    style: &TitleStyle,
) -> FittedTitle {
    let mut size = style.base_size_pt;
    let mut width = metrics.width_at_size(text, size);

    while width > max_span_pt && size > style.min_size_pt {
        size = (size - style.shrink_step_pt).max(style.min_size_pt);
        width = metrics.width_at_size(text, size);
    }

    FittedTitle {
        text: text.to_string(),
        size_pt: size,
        width_pt: width,
        at_floor: width > max_span_pt,
    }
}

/// Origin of the rotated title run: x is the (vertical) baseline, y is where the text starts.
pub fn place_rotated_title(
    card: &Rect,
    strip_width: f32,
    title: &FittedTitle,
    style: &TitleStyle,
) -> Point {
    let strip_center_x = card.x + strip_width / 2.0;
    let cap_height = title.size_pt * style.cap_height_ratio;
    Point {
        x: strip_center_x + cap_height / style.optical_divisor,
        y: card.y + card.height / 2.0 - title.width_pt / 2.0,
    }
}
