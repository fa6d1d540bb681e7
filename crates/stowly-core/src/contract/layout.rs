// ── Contract layout engine ──
//
// Walks the block list top-down, advancing a vertical cursor and breaking
// to a new page when a block does not fit. Blocks never carry coordinates;
// all measurement happens here.

use std::io::BufWriter;

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Polygon, Px, Rgb as PdfRgb,
    path::{PaintMode, WindingOrder},
};

use crate::contract::blocks::Block;
use crate::error::CoreError;

// A4 dimensions in mm.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

// Font sizes in points.
const LETTERHEAD_FONT_SIZE: f32 = 20.0;
const TITLE_FONT_SIZE: f32 = 13.0;
const HEADER_FONT_SIZE: f32 = 11.0;
const BODY_FONT_SIZE: f32 = 10.0;
const SMALL_FONT_SIZE: f32 = 8.0;

// Body line metrics.
const LINE_HEIGHT_MM: f32 = 4.4;
const WRAP_CHARS: usize = 95;

// Signature boxes.
const SIGNATURE_BOX_HEIGHT_MM: f32 = 40.0;
const SIGNATURE_GAP_MM: f32 = 6.0;

/// Render the block list to a finished PDF byte buffer.
pub fn render(blocks: &[Block]) -> Result<Vec<u8>, CoreError> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Contrat de location",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| CoreError::Composition { reason: e.to_string() })?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| CoreError::Composition { reason: e.to_string() })?;

    let mut cursor = Cursor {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    for block in blocks {
        cursor.ensure_space(block_height(block));
        draw_block(&mut cursor, block, &font_regular, &font_bold);
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| CoreError::Composition { reason: e.to_string() })?;
    writer
        .into_inner()
        .map_err(|e| CoreError::Composition { reason: e.to_string() })
}

// ── Cursor ──────────────────────────────────────────────────────────

struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    /// Break to a fresh page when the next block does not fit.
    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y - needed_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }
}

// ── Measurement ─────────────────────────────────────────────────────

fn block_height(block: &Block) -> f32 {
    match block {
        Block::Letterhead { .. } => 16.0,
        Block::AddressBlock { lines } => lines.len() as f32 * 4.2 + 3.0,
        Block::Title(_) => 12.0,
        Block::SectionHeader(_) => 9.5,
        Block::Paragraph(text) => wrap_text(text, WRAP_CHARS).len() as f32 * LINE_HEIGHT_MM + 2.5,
        Block::KeyValue { .. } => 6.0,
        Block::Spacer { height_mm } => *height_mm,
        Block::SignatureRow { .. } => SIGNATURE_BOX_HEIGHT_MM + 10.0,
    }
}

/// Greedy word wrap sized for the body font; printpdf's builtin fonts
/// expose no metrics, so a character budget stands in for text width.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ── Drawing ─────────────────────────────────────────────────────────

fn draw_block(
    cursor: &mut Cursor<'_>,
    block: &Block,
    font_regular: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    match block {
        Block::Letterhead { company, tagline } => {
            set_fill_black(&cursor.layer);
            cursor.layer.use_text(
                company,
                LETTERHEAD_FONT_SIZE,
                Mm(MARGIN_MM),
                Mm(cursor.y - 7.0),
                font_bold,
            );
            cursor.layer.use_text(
                tagline,
                SMALL_FONT_SIZE,
                Mm(MARGIN_MM),
                Mm(cursor.y - 11.5),
                font_regular,
            );
            set_outline_black(&cursor.layer);
            draw_line(
                &cursor.layer,
                MARGIN_MM,
                cursor.y - 14.0,
                MARGIN_MM + CONTENT_WIDTH_MM,
                cursor.y - 14.0,
            );
            cursor.y -= 16.0;
        }

        Block::AddressBlock { lines } => {
            set_fill_black(&cursor.layer);
            for line in lines {
                cursor.layer.use_text(
                    line,
                    SMALL_FONT_SIZE,
                    Mm(MARGIN_MM),
                    Mm(cursor.y - 3.5),
                    font_regular,
                );
                cursor.y -= 4.2;
            }
            cursor.y -= 3.0;
        }

        Block::Title(text) => {
            set_fill_black(&cursor.layer);
            let x = centered_x(text, TITLE_FONT_SIZE);
            cursor
                .layer
                .use_text(text, TITLE_FONT_SIZE, Mm(x), Mm(cursor.y - 7.0), font_bold);
            cursor.y -= 12.0;
        }

        Block::SectionHeader(title) => {
            // Banded row: light grey fill behind the header text.
            let band_height = 7.0;
            let top = cursor.y - 1.0;
            cursor
                .layer
                .set_fill_color(Color::Rgb(PdfRgb::new(0.88, 0.88, 0.90, None)));
            cursor.layer.add_polygon(band(
                MARGIN_MM,
                top - band_height,
                MARGIN_MM + CONTENT_WIDTH_MM,
                top,
            ));
            set_fill_black(&cursor.layer);
            cursor.layer.use_text(
                title,
                HEADER_FONT_SIZE,
                Mm(MARGIN_MM + 2.0),
                Mm(top - band_height + 2.0),
                font_bold,
            );
            cursor.y -= 9.5;
        }

        Block::Paragraph(text) => {
            set_fill_black(&cursor.layer);
            for line in wrap_text(text, WRAP_CHARS) {
                cursor.layer.use_text(
                    &line,
                    BODY_FONT_SIZE,
                    Mm(MARGIN_MM),
                    Mm(cursor.y - LINE_HEIGHT_MM),
                    font_regular,
                );
                cursor.y -= LINE_HEIGHT_MM;
            }
            cursor.y -= 2.5;
        }

        Block::KeyValue { label, value } => {
            set_fill_black(&cursor.layer);
            let text_y = cursor.y - 4.5;
            cursor.layer.use_text(
                label,
                BODY_FONT_SIZE,
                Mm(MARGIN_MM + 2.0),
                Mm(text_y),
                font_bold,
            );
            cursor.layer.use_text(
                value,
                BODY_FONT_SIZE,
                Mm(MARGIN_MM + 72.0),
                Mm(text_y),
                font_regular,
            );
            cursor.y -= 6.0;
        }

        Block::Spacer { height_mm } => cursor.y -= height_mm,

        Block::SignatureRow { stamp, signature } => {
            draw_signature_row(cursor, stamp.as_ref(), signature.as_ref(), font_regular);
        }
    }
}

fn draw_signature_row(
    cursor: &mut Cursor<'_>,
    stamp: Option<&RgbaImage>,
    signature: Option<&RgbaImage>,
    font_regular: &IndirectFontRef,
) {
    let box_width = (CONTENT_WIDTH_MM - SIGNATURE_GAP_MM) / 2.0;
    let left_x = MARGIN_MM;
    let right_x = MARGIN_MM + box_width + SIGNATURE_GAP_MM;
    let label_y = cursor.y - 4.0;
    let box_top = cursor.y - 6.0;
    let box_bottom = box_top - SIGNATURE_BOX_HEIGHT_MM;

    set_fill_black(&cursor.layer);
    cursor.layer.use_text(
        "La Société",
        BODY_FONT_SIZE,
        Mm(left_x),
        Mm(label_y),
        font_regular,
    );
    cursor.layer.use_text(
        "Le Client",
        BODY_FONT_SIZE,
        Mm(right_x),
        Mm(label_y),
        font_regular,
    );

    set_outline_black(&cursor.layer);
    draw_box(&cursor.layer, left_x, box_bottom, box_width, SIGNATURE_BOX_HEIGHT_MM);
    draw_box(&cursor.layer, right_x, box_bottom, box_width, SIGNATURE_BOX_HEIGHT_MM);

    if let Some(stamp) = stamp {
        embed_image(
            &cursor.layer,
            stamp,
            left_x + 3.0,
            box_bottom + 3.0,
            box_width - 6.0,
            SIGNATURE_BOX_HEIGHT_MM - 6.0,
        );
    }
    if let Some(signature) = signature {
        embed_image(
            &cursor.layer,
            signature,
            right_x + 3.0,
            box_bottom + 3.0,
            box_width - 6.0,
            SIGNATURE_BOX_HEIGHT_MM - 6.0,
        );
    }

    cursor.y = box_bottom - 4.0;
}

// ── Primitives ──────────────────────────────────────────────────────

fn set_fill_black(layer: &PdfLayerReference) {
    layer.set_fill_color(Color::Rgb(PdfRgb::new(0.0, 0.0, 0.0, None)));
}

fn set_outline_black(layer: &PdfLayerReference) {
    layer.set_outline_color(Color::Rgb(PdfRgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
}

/// Approximate centering for builtin fonts (no metrics available).
fn centered_x(text: &str, font_size: f32) -> f32 {
    let char_width_mm = font_size * 0.5 * 0.3528;
    let text_width = text.chars().count() as f32 * char_width_mm;
    ((PAGE_WIDTH_MM - text_width) / 2.0).max(MARGIN_MM)
}

fn draw_line(layer: &PdfLayerReference, x1: f32, y1: f32, x2: f32, y2: f32) {
    let points = vec![
        (Point::new(Mm(x1), Mm(y1)), false),
        (Point::new(Mm(x2), Mm(y2)), false),
    ];
    layer.add_line(Line {
        points,
        is_closed: false,
    });
}

fn draw_box(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    draw_line(layer, x, y, x + width, y);
    draw_line(layer, x + width, y, x + width, y + height);
    draw_line(layer, x + width, y + height, x, y + height);
    draw_line(layer, x, y + height, x, y);
}

fn band(x1: f32, y1: f32, x2: f32, y2: f32) -> Polygon {
    Polygon {
        rings: vec![vec![
            (Point::new(Mm(x1), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y1)), false),
            (Point::new(Mm(x2), Mm(y2)), false),
            (Point::new(Mm(x1), Mm(y2)), false),
        ]],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

/// Composite an RGBA raster onto white (PDF image XObjects carry no
/// alpha here) and embed it, scaled to fit the target box while
/// preserving aspect ratio.
fn embed_image(
    layer: &PdfLayerReference,
    source: &RgbaImage,
    x_mm: f32,
    y_mm: f32,
    max_width_mm: f32,
    max_height_mm: f32,
) {
    let (width_px, height_px) = source.dimensions();
    if width_px == 0 || height_px == 0 {
        return;
    }

    let mut rgb_image = RgbImage::new(width_px, height_px);
    for (x, y, pixel) in source.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = f32::from(a) / 255.0;
        let blend = |c: u8| -> u8 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let out = (f32::from(c) * alpha + 255.0 * (1.0 - alpha)) as u8;
            out
        };
        rgb_image.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }

    let aspect_ratio = width_px as f32 / height_px as f32;
    let final_width_mm = if max_width_mm / max_height_mm > aspect_ratio {
        max_height_mm * aspect_ratio
    } else {
        max_width_mm
    };

    let image = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb_image.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    // DPI chosen so the pixel raster lands at the desired physical size.
    let dpi = width_px as f32 / (final_width_mm / 25.4);

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x_mm)),
            translate_y: Some(Mm(y_mm)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}
