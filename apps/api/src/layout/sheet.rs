//! Sheet configuration and card-grid geometry.
//!
//! All configuration is stated in millimetres (the unit the card design is drawn in) and
//! converted to points once, in `SheetGeometry::from_config`. Grid math is done top-down
//! (row 0 is the top row) and converted to the bottom-up PDF coordinate system at the
//! very end of `card_bounds`.

use serde::{Deserialize, Serialize};

use crate::layout::units::{mm_to_pt, Rect, Rgb};

/// Title used when the requested one is empty after trimming.
pub const DEFAULT_FALLBACK_TITLE: &str = "wiskunde";

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Typography of the rotated title in the accent strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleStyle {
    pub base_size_pt: f32,
    pub min_size_pt: f32,
    pub shrink_step_pt: f32,
    /// Card height minus this padding is the span the title may occupy.
    pub vertical_padding_mm: f32,
    /// Cap height as a fraction of the font size.
    pub cap_height_ratio: f32,
    /// Half the cap height is divided by this before nudging the baseline off-center.
    pub optical_divisor: f32,
    pub color: Rgb,
}

/// Typography and rules of the concept rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptStyle {
    pub size_pt: f32,
    pub color: Rgb,
    /// Gap between the accent strip and the concept text.
    pub left_padding_mm: f32,
    /// Distance from the card top to the first baseline.
    pub first_baseline_mm: f32,
    pub line_pitch_mm: f32,
    pub divider_offset_mm: f32,
    /// Dividers stop this far from the card's right edge.
    pub divider_right_inset_mm: f32,
    pub divider_thickness_pt: f32,
    pub divider_color: Rgb,
}

/// Card surface colours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPalette {
    pub background: Rgb,
    pub border: Rgb,
    pub border_width_pt: f32,
    pub accent: Rgb,
}

/// Complete description of a printed sheet of cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub card_width_mm: f32,
    pub card_height_mm: f32,
    pub column_gap_mm: f32,
    pub row_gap_mm: f32,
    pub columns: usize,
    pub rows: usize,
    pub strip_width_mm: f32,
    pub concepts_per_card: usize,
    pub fallback_title: String,
    pub title: TitleStyle,
    pub concepts: ConceptStyle,
    pub palette: CardPalette,
}

/// Returns the A4 card sheet: 90×50mm cards, 2 columns × 4 rows, centered.
pub fn default_sheet_config() -> SheetConfig {
    SheetConfig {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        card_width_mm: 90.0,
        card_height_mm: 50.0,
        column_gap_mm: 10.0,
        row_gap_mm: 15.0,
        columns: 2,
        rows: 4,
        strip_width_mm: 10.0,
        concepts_per_card: 5,
        fallback_title: DEFAULT_FALLBACK_TITLE.to_string(),
        title: TitleStyle {
            base_size_pt: 12.0,
            min_size_pt: 4.0,
            shrink_step_pt: 0.5,
            vertical_padding_mm: 8.0,
            cap_height_ratio: 0.7,
            optical_divisor: 2.2,
            color: Rgb::grey(0.0),
        },
        concepts: ConceptStyle {
            size_pt: 11.0,
            color: Rgb::grey(0.1),
            left_padding_mm: 5.0,
            first_baseline_mm: 10.0,
            line_pitch_mm: 8.0,
            divider_offset_mm: 3.0,
            divider_right_inset_mm: 5.0,
            divider_thickness_pt: 0.5,
            divider_color: Rgb::grey(0.9),
        },
        palette: CardPalette {
            background: Rgb::grey(1.0),
            border: Rgb::grey(0.8),
            border_width_pt: 1.0,
            accent: Rgb::new(0.98, 0.8, 0.08),
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

/// Grid geometry in points, derived from a `SheetConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SheetGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub column_gap: f32,
    pub row_gap: f32,
    pub columns: usize,
    pub rows: usize,
    /// Left/right margin that centers the content block horizontally.
    pub margin_x: f32,
    /// Top/bottom margin that centers the content block vertically.
    pub margin_y: f32,
}

impl SheetGeometry {
    pub fn from_config(config: &SheetConfig) -> Self {
        let page_width = mm_to_pt(config.page_width_mm);
        let page_height = mm_to_pt(config.page_height_mm);
        let card_width = mm_to_pt(config.card_width_mm);
        let card_height = mm_to_pt(config.card_height_mm);
        let column_gap = mm_to_pt(config.column_gap_mm);
        let row_gap = mm_to_pt(config.row_gap_mm);

        let content_width = content_extent(card_width, column_gap, config.columns);
        let content_height = content_extent(card_height, row_gap, config.rows);

        Self {
            page_width,
            page_height,
            card_width,
            card_height,
            column_gap,
            row_gap,
            columns: config.columns,
            rows: config.rows,
            margin_x: (page_width - content_width) / 2.0,
            margin_y: (page_height - content_height) / 2.0,
        }
    }

    pub fn cards_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// `(column, row)` of a slot on the page. Slots fill left-to-right, then top-to-bottom.
    pub fn grid_position(&self, slot: usize) -> (usize, usize) {
        let slot = slot % self.cards_per_page();
        (slot % self.columns, slot / self.columns)
    }

    /// Bounds of the card in `slot`, in bottom-up output coordinates.
    pub fn card_bounds(&self, slot: usize) -> Rect {
        let (col, row) = self.grid_position(slot);
        let x = self.margin_x + col as f32 * (self.card_width + self.column_gap);
        let top_offset = self.margin_y + row as f32 * (self.card_height + self.row_gap);
        Rect {
            x,
            y: self.page_height - top_offset - self.card_height,
            width: self.card_width,
            height: self.card_height,
        }
    }
}

fn content_extent(card: f32, gap: f32, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    card * count as f32 + gap * (count - 1) as f32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
