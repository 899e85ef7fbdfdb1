//! PDF writer for laid-out card pages.
//!
//! Each `PagePlan` becomes one page with a single content stream. All pages share one font
//! resource (`/F1`, Helvetica-Bold, WinAnsi), so nothing is embedded and the output stays
//! small. Every primitive is wrapped in `q`/`Q` so colour and line-width state never leaks
//! between instructions.

use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::layout::font_metrics::get_metrics;
use crate::layout::instructions::{DrawOp, PagePlan};
use crate::layout::units::{Point, Rect, Rgb};
use crate::layout::winansi;

const FONT_RESOURCE: &str = "F1";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF serialization failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Document-level metadata written to the info dictionary.
#[derive(Debug, Clone)]
pub struct DocumentMeta {
    pub title: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

/// Serializes the page plans into a complete PDF byte stream.
///
/// An empty slice produces a valid document with zero pages.
pub fn render_to_document(pages: &[PagePlan], meta: &DocumentMeta) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.4");
    let id_pages = doc.new_object_id();

    let id_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => get_metrics().base_font,
        "Encoding" => "WinAnsiEncoding",
    });
    let id_resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => id_font,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let id_content = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let id_page = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => id_pages,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                page.width_pt.into(),
                page.height_pt.into(),
            ],
            "Contents" => id_content,
            "Resources" => id_resources,
        });
        kids.push(id_page.into());
    }

    doc.set_object(
        id_pages,
        dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
        },
    );

    let id_catalog = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => id_pages,
    });
    doc.trailer.set("Root", id_catalog);

    let date = pdf_date(&meta.created_at);
    let id_info = doc.add_object(dictionary! {
        "Title" => text_string(&meta.title),
        "Creator" => text_string(&meta.creator),
        "CreationDate" => Object::string_literal(date.clone()),
        "ModDate" => Object::string_literal(date),
    });
    doc.trailer.set("Info", id_info);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Content-stream operations for one page, in drawing order.
pub fn page_operations(page: &PagePlan) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Rect { rect, fill, border } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(fill_color(fill));
                if let Some(border) = border {
                    ops.push(stroke_color(&border.color));
                    ops.push(Operation::new("w", vec![border.width_pt.into()]));
                }
                ops.push(rectangle(rect));
                let paint = if border.is_some() { "B" } else { "f" };
                ops.push(Operation::new(paint, vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Text {
                text,
                origin,
                size_pt,
                color,
                rotation_deg,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(fill_color(color));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), (*size_pt).into()],
                ));
                ops.push(text_matrix(origin, *rotation_deg));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(winansi::encode(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                thickness_pt,
                color,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(stroke_color(color));
                ops.push(Operation::new("w", vec![(*thickness_pt).into()]));
                ops.push(Operation::new("m", vec![from.x.into(), from.y.into()]));
                ops.push(Operation::new("l", vec![to.x.into(), to.y.into()]));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

// ────────────────────────────────────────────────────────────────────────────
// Operator helpers
// ────────────────────────────────────────────────────────────────────────────

fn fill_color(c: &Rgb) -> Operation {
    Operation::new("rg", vec![c.r.into(), c.g.into(), c.b.into()])
}

fn stroke_color(c: &Rgb) -> Operation {
    Operation::new("RG", vec![c.r.into(), c.g.into(), c.b.into()])
}

fn rectangle(r: &Rect) -> Operation {
    Operation::new(
        "re",
        vec![r.x.into(), r.y.into(), r.width.into(), r.height.into()],
    )
}

/// `Tm` placing the text origin at `origin`, rotated counter-clockwise by `degrees`.
fn text_matrix(origin: &Point, degrees: f32) -> Operation {
    let radians = degrees.to_radians();
    let cos = snap(radians.cos());
    let sin = snap(radians.sin());
    Operation::new(
        "Tm",
        vec![
            cos.into(),
            sin.into(),
            (-sin).into(),
            cos.into(),
            origin.x.into(),
            origin.y.into(),
        ],
    )
}

/// Removes floating-point residue so right angles produce exact 0/±1 matrix entries.
fn snap(v: f32) -> f32 {
    if v.abs() < 1e-6 {
        0.0
    } else if (v.abs() - 1.0).abs() < 1e-6 {
        v.signum()
    } else {
        v
    }
}

fn text_string(s: &str) -> Object {
    Object::String(winansi::encode(s), StringFormat::Literal)
}

fn pdf_date(at: &DateTime<Utc>) -> String {
    at.format("D:%Y%m%d%H%M%SZ").to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::models::Card;
    use crate::layout::engine::layout;
    use crate::layout::instructions::Border;
    use crate::layout::sheet::default_sheet_config;

    fn meta() -> DocumentMeta {
        DocumentMeta {
            title: "wiskunde".to_string(),
            creator: "cardsheet-api test".to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_cards(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| Card::new(format!("card-{i}"), vec!["één".to_string(); 5]))
            .collect()
    }

    fn operators(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|o| o.operator.as_str()).collect()
    }

    fn single_op_page(op: DrawOp) -> PagePlan {
        PagePlan {
            page_number: 1,
            width_pt: 595.0,
            height_pt: 842.0,
            cards: vec![],
            ops: vec![op],
        }
    }

    #[test]
    fn test_bordered_rect_fills_and_strokes() {
        let page = single_op_page(DrawOp::Rect {
            rect: Rect { x: 1.0, y: 2.0, width: 3.0, height: 4.0 },
            fill: Rgb::grey(1.0),
            border: Some(Border { color: Rgb::grey(0.8), width_pt: 1.0 }),
        });
        let ops = page_operations(&page);
        assert_eq!(operators(&ops), vec!["q", "rg", "RG", "w", "re", "B", "Q"]);
    }

    #[test]
    fn test_plain_rect_only_fills() {
        let page = single_op_page(DrawOp::Rect {
            rect: Rect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            fill: Rgb::new(0.98, 0.8, 0.08),
            border: None,
        });
        assert_eq!(operators(&page_operations(&page)), vec!["q", "rg", "re", "f", "Q"]);
    }

    #[test]
    fn test_rotated_text_uses_quarter_turn_matrix() {
        let page = single_op_page(DrawOp::Text {
            text: "wiskunde".to_string(),
            origin: Point { x: 10.0, y: 20.0 },
            size_pt: 12.0,
            color: Rgb::grey(0.0),
            rotation_deg: 90.0,
        });
        let ops = page_operations(&page);
        assert_eq!(operators(&ops), vec!["BT", "rg", "Tf", "Tm", "Tj", "ET"]);
        let matrix: Vec<f32> = ops[3]
            .operands
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(matrix, vec![0.0, 1.0, -1.0, 0.0, 10.0, 20.0]);
    }

    #[test]
    fn test_line_strokes_between_points() {
        let page = single_op_page(DrawOp::Line {
            from: Point { x: 0.0, y: 5.0 },
            to: Point { x: 100.0, y: 5.0 },
            thickness_pt: 0.5,
            color: Rgb::grey(0.9),
        });
        assert_eq!(
            operators(&page_operations(&page)),
            vec!["q", "RG", "w", "m", "l", "S", "Q"]
        );
    }

    #[test]
    fn test_rendered_document_has_one_a4_page_per_plan() {
        let pages = layout(&make_cards(17), "wiskunde", &default_sheet_config());
        let bytes = render_to_document(&pages, &meta()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let doc = Document::load_mem(&bytes).unwrap();
        let page_ids = doc.get_pages();
        assert_eq!(page_ids.len(), 3);

        for &page_id in page_ids.values() {
            let page = doc.get_dictionary(page_id).unwrap();
            let media_box: Vec<f32> = page
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .iter()
                .map(|v| v.as_float().unwrap())
                .collect();
            assert_eq!(&media_box[..2], &[0.0_f32, 0.0]);
            assert!((media_box[2] - 595.28).abs() < 0.01, "width {}", media_box[2]);
            assert!((media_box[3] - 841.89).abs() < 0.01, "height {}", media_box[3]);
        }
    }

    #[test]
    fn test_pages_share_helvetica_bold_winansi_font() {
        let pages = layout(&make_cards(9), "wiskunde", &default_sheet_config());
        let bytes = render_to_document(&pages, &meta()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();

        for &page_id in doc.get_pages().values() {
            let page = doc.get_dictionary(page_id).unwrap();
            let resources_id = page.get(b"Resources").unwrap().as_reference().unwrap();
            let fonts = doc
                .get_dictionary(resources_id)
                .unwrap()
                .get(b"Font")
                .unwrap()
                .as_dict()
                .unwrap();
            let font_id = fonts.get(b"F1").unwrap().as_reference().unwrap();
            let font = doc.get_dictionary(font_id).unwrap();
            assert_eq!(font.get(b"BaseFont").unwrap().as_name().unwrap(), b"Helvetica-Bold");
            assert_eq!(font.get(b"Encoding").unwrap().as_name().unwrap(), b"WinAnsiEncoding");
        }
    }

    #[test]
    fn test_page_content_draws_rotated_title_at_fitted_size() {
        let pages = layout(&make_cards(1), "wiskunde", &default_sheet_config());
        let (origin, size) = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text {
                    origin,
                    size_pt,
                    rotation_deg,
                    ..
                } if *rotation_deg == 90.0 => Some((*origin, *size_pt)),
                _ => None,
            })
            .unwrap();

        let bytes = render_to_document(&pages, &meta()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = doc.get_pages()[&1];
        let content = doc.get_and_decode_page_content(page_id).unwrap();

        let tf = content.operations.iter().find(|o| o.operator == "Tf").unwrap();
        assert_eq!(tf.operands[0].as_name().unwrap(), b"F1");
        assert!((tf.operands[1].as_float().unwrap() - size).abs() < 1e-3);

        let tm: Vec<f32> = content
            .operations
            .iter()
            .find(|o| o.operator == "Tm")
            .unwrap()
            .operands
            .iter()
            .map(|o| o.as_float().unwrap())
            .collect();
        assert_eq!(&tm[..4], &[0.0_f32, 1.0, -1.0, 0.0]);
        assert!((tm[4] - origin.x).abs() < 1e-2);
        assert!((tm[5] - origin.y).abs() < 1e-2);
    }

    #[test]
    fn test_empty_layout_renders_zero_pages() {
        let bytes = render_to_document(&[], &meta()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 0);
    }

    #[test]
    fn test_pdf_date_format() {
        let at = DateTime::parse_from_rfc3339("2026-03-04T05:06:07Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(pdf_date(&at), "D:20260304050607Z");
    }
}
