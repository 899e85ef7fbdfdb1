//! Page Layout Engine: turns an ordered list of cards into per-page drawing instructions.
//!
//! Walks the deck once. Every `cards_per_page`-th card opens a new page; the others are
//! appended to the current one. Each card contributes, in order: background, accent
//! strip, rotated title, concept lines and the dividers between them.
//!
//! The engine is pure: the same `(cards, title, config)` always yields the same plans.

use crate::deck::models::Card;
use crate::layout::font_metrics::get_metrics;
use crate::layout::instructions::{Border, CardPlacement, DrawOp, PagePlan};
use crate::layout::sheet::{SheetConfig, SheetGeometry};
use crate::layout::title_fit::{fit_title, place_rotated_title, resolve_title, FittedTitle};
use crate::layout::units::{mm_to_pt, Point, Rect};

/// Title rotation: reads bottom-to-top.
const TITLE_ROTATION_DEG: f32 = 90.0;

/// Lays out `cards` onto pages. An empty slice yields no pages.
pub fn layout(cards: &[Card], title: &str, config: &SheetConfig) -> Vec<PagePlan> {
    let geometry = SheetGeometry::from_config(config);
    let per_page = geometry.cards_per_page();
    if per_page == 0 {
        return Vec::new();
    }

    let title_text = resolve_title(title, &config.fallback_title);
    let max_span = geometry.card_height - mm_to_pt(config.title.vertical_padding_mm);
    let fitted = fit_title(&title_text, get_metrics(), max_span, &config.title);

    let mut pages: Vec<PagePlan> = Vec::with_capacity(cards.len().div_ceil(per_page));

    for (index, card) in cards.iter().enumerate() {
        let slot = index % per_page;
        if slot == 0 {
            pages.push(PagePlan::blank(pages.len() + 1, &geometry));
        }
        if let Some(page) = pages.last_mut() {
            let (column, row) = geometry.grid_position(slot);
            let bounds = geometry.card_bounds(slot);
            draw_card(&mut page.ops, card, &bounds, &fitted, config);
            page.cards.push(CardPlacement {
                card_id: card.id.clone(),
                deck_index: index,
                slot,
                column,
                row,
                bounds,
                title_size_pt: fitted.size_pt,
            });
        }
    }

    pages
}

// ────────────────────────────────────────────────────────────────────────────
// Per-card drawing
// ────────────────────────────────────────────────────────────────────────────

fn draw_card(
    ops: &mut Vec<DrawOp>,
    card: &Card,
    bounds: &Rect,
    title: &FittedTitle,
    config: &SheetConfig,
) {
    let palette = &config.palette;
    let strip_width = mm_to_pt(config.strip_width_mm);

    ops.push(DrawOp::Rect {
        rect: *bounds,
        fill: palette.background,
        border: Some(Border {
            color: palette.border,
            width_pt: palette.border_width_pt,
        }),
    });

    ops.push(DrawOp::Rect {
        rect: Rect {
            width: strip_width,
            ..*bounds
        },
        fill: palette.accent,
        border: None,
    });

    ops.push(DrawOp::Text {
        text: title.text.clone(),
        origin: place_rotated_title(bounds, strip_width, title, &config.title),
        size_pt: title.size_pt,
        color: config.title.color,
        rotation_deg: TITLE_ROTATION_DEG,
    });

    draw_concepts(ops, card, bounds, strip_width, config);
}

fn draw_concepts(
    ops: &mut Vec<DrawOp>,
    card: &Card,
    bounds: &Rect,
    strip_width: f32,
    config: &SheetConfig,
) {
    let style = &config.concepts;
    let text_x = bounds.x + strip_width + mm_to_pt(style.left_padding_mm);
    let first_baseline = bounds.top() - mm_to_pt(style.first_baseline_mm);
    let pitch = mm_to_pt(style.line_pitch_mm);
    let divider_end_x = bounds.right() - mm_to_pt(style.divider_right_inset_mm);

    for (idx, concept) in card.concepts.iter().take(config.concepts_per_card).enumerate() {
        let baseline = first_baseline - idx as f32 * pitch;

        ops.push(DrawOp::Text {
            text: concept.clone(),
            origin: Point {
                x: text_x,
                y: baseline,
            },
            size_pt: style.size_pt,
            color: style.color,
            rotation_deg: 0.0,
        });

        if idx + 1 < config.concepts_per_card {
            let rule_y = baseline - mm_to_pt(style.divider_offset_mm);
            ops.push(DrawOp::Line {
                from: Point {
                    x: text_x,
                    y: rule_y,
                },
                to: Point {
                    x: divider_end_x,
                    y: rule_y,
                },
                thickness_pt: style.divider_thickness_pt,
                color: style.divider_color,
            });
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
