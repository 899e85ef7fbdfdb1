//! Drawing instructions produced by the layout engine and consumed by the PDF renderer.

use serde::{Deserialize, Serialize};

use crate::layout::sheet::SheetGeometry;
use crate::layout::units::{Point, Rect, Rgb};

/// Stroke drawn around a filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: Rgb,
    pub width_pt: f32,
}

/// A single drawing primitive in output coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Rect {
        rect: Rect,
        fill: Rgb,
        border: Option<Border>,
    },
    /// Text run starting at `origin` (left end of the baseline), rotated counter-clockwise.
    Text {
        text: String,
        origin: Point,
        size_pt: f32,
        color: Rgb,
        rotation_deg: f32,
    },
    Line {
        from: Point,
        to: Point,
        thickness_pt: f32,
        color: Rgb,
    },
}

/// Where a card landed on its page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardPlacement {
    pub card_id: String,
    /// Position of the card in the deck.
    pub deck_index: usize,
    /// Position on the page, 0..cards_per_page.
    pub slot: usize,
    pub column: usize,
    pub row: usize,
    pub bounds: Rect,
    pub title_size_pt: f32,
}

/// Everything needed to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagePlan {
    /// 1-based page number.
    pub page_number: usize,
    pub width_pt: f32,
    pub height_pt: f32,
    pub cards: Vec<CardPlacement>,
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    pub fn blank(page_number: usize, geometry: &SheetGeometry) -> Self {
        Self {
            page_number,
            width_pt: geometry.page_width,
            height_pt: geometry.page_height,
            cards: Vec::new(),
            ops: Vec::new(),
        }
    }
}
