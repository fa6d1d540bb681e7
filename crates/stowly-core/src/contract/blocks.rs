// ── Contract content blocks ──
//
// The document is a sequence of typed blocks; the layout engine computes
// positions and page breaks. Blocks carry content only, never
// coordinates.

use image::RgbaImage;

/// One typed content block of the contract document.
#[derive(Debug, Clone)]
pub enum Block {
    /// Company name + tagline at the top of the document, with a rule.
    Letterhead { company: String, tagline: String },
    /// Correspondence address lines.
    AddressBlock { lines: Vec<String> },
    /// Centered document title.
    Title(String),
    /// Visually distinct banded section header row.
    SectionHeader(String),
    /// Flowing body text, wrapped by the layout engine.
    Paragraph(String),
    /// A contract-terms row: bold label, value.
    KeyValue { label: String, value: String },
    /// Vertical gap.
    Spacer { height_mm: f32 },
    /// Side-by-side signature boxes: company stamp left, customer
    /// signature right (rendered only when present).
    SignatureRow {
        stamp: Option<RgbaImage>,
        signature: Option<RgbaImage>,
    },
}
