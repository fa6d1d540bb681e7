// ── Signature capture surface ──
//
// A freehand drawing surface bound to pointer events. The surface's own
// pixel buffer is the source of truth (no stroke list is recorded), so
// undo/replay are not supported; `capture()` serializes the live pixels
// into a portable PNG + data URL for downstream use.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::CoreError;

/// Default surface dimensions, matched to the signing view's displayed
/// size at creation time.
pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_HEIGHT: u32 = 160;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const INK: Rgba<u8> = Rgba([20, 20, 30, 255]);
/// Half-width of the square brush stamped along each stroke segment.
const BRUSH_RADIUS: i64 = 1;

/// A pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A serialized signature raster, ready for PDF embedding and server
/// submission.
#[derive(Debug, Clone)]
pub struct CapturedSignature {
    pub image: RgbaImage,
    pub png: Vec<u8>,
    /// `data:image/png;base64,...` -- the wire format the backend expects.
    pub data_url: String,
}

/// The drawing surface.
pub struct SignaturePad {
    surface: RgbaImage,
    drawing: bool,
    last_point: Option<Point>,
    has_stroke: bool,
    captured: Option<CapturedSignature>,
}

impl SignaturePad {
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            surface: blank_surface(width, height),
            drawing: false,
            last_point: None,
            has_stroke: false,
            captured: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Rebind the pixel buffer to the displayed size.
    ///
    /// Must happen before the first stroke and on every viewport resize:
    /// pointer coordinates are expressed in display space, and a stale
    /// buffer size would misalign strokes with the drawn output.
    /// Reallocating discards any existing content, so this also resets
    /// the captured state.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width() && height == self.height() {
            return;
        }
        debug!(width, height, "rebinding signature surface");
        self.surface = blank_surface(width, height);
        self.drawing = false;
        self.last_point = None;
        self.has_stroke = false;
        self.captured = None;
    }

    // ── Stroke input ─────────────────────────────────────────────────

    /// Start a new path at `point`.
    pub fn begin(&mut self, point: Point) {
        self.drawing = true;
        self.last_point = Some(point);
    }

    /// Extend the current path with a line segment to `point`.
    /// Ignored when no path is active.
    pub fn extend(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if let Some(last) = self.last_point {
            draw_segment(&mut self.surface, last, point);
            self.has_stroke = true;
            // New ink invalidates any earlier capture.
            self.captured = None;
        }
        self.last_point = Some(point);
    }

    /// Finish the current path.
    pub fn end(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    /// Wipe the surface to blank and mark "no signature captured".
    pub fn clear(&mut self) {
        self.surface = blank_surface(self.width(), self.height());
        self.drawing = false;
        self.last_point = None;
        self.has_stroke = false;
        self.captured = None;
    }

    // ── Capture ──────────────────────────────────────────────────────

    /// Whether at least one stroke exists since the last clear.
    /// Callers disable the capture action while this is false.
    pub fn can_capture(&self) -> bool {
        self.has_stroke
    }

    /// The last captured signature, if any.
    pub fn captured(&self) -> Option<&CapturedSignature> {
        self.captured.as_ref()
    }

    /// Serialize the current surface to a portable raster.
    ///
    /// Capturing a blank surface is a caller error -- the action is meant
    /// to be disabled until a stroke exists, and this guard is the
    /// backstop.
    pub fn capture(&mut self) -> Result<&CapturedSignature, CoreError> {
        if !self.has_stroke {
            return Err(CoreError::ValidationFailed {
                field: "signature".into(),
                reason: "draw a signature before capturing".into(),
            });
        }

        let mut png = Vec::new();
        self.surface
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| CoreError::Internal(format!("signature PNG encoding failed: {e}")))?;

        let data_url = format!("data:image/png;base64,{}", BASE64.encode(&png));
        debug!(bytes = png.len(), "signature captured");

        Ok(self.captured.insert(CapturedSignature {
            image: self.surface.clone(),
            png,
            data_url,
        }))
    }
}

impl Default for SignaturePad {
    fn default() -> Self {
        Self::new()
    }
}

fn blank_surface(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND)
}

/// Rasterize a line segment with an integer Bresenham walk, stamping a
/// small square brush at each step.
fn draw_segment(surface: &mut RgbaImage, from: Point, to: Point) {
    let (mut x0, mut y0) = (from.x.round() as i64, from.y.round() as i64);
    let (x1, y1) = (to.x.round() as i64, to.y.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        stamp(surface, x0, y0);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn stamp(surface: &mut RgbaImage, cx: i64, cy: i64) {
    let (w, h) = (i64::from(surface.width()), i64::from(surface.height()));
    for y in (cy - BRUSH_RADIUS)..=(cy + BRUSH_RADIUS) {
        for x in (cx - BRUSH_RADIUS)..=(cx + BRUSH_RADIUS) {
            if x >= 0 && y >= 0 && x < w && y < h {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                surface.put_pixel(x as u32, y as u32, INK);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ink_count(pad: &SignaturePad) -> usize {
        pad.surface.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn capture_is_gated_until_a_stroke_exists() {
        let mut pad = SignaturePad::new();
        assert!(!pad.can_capture());
        assert!(pad.capture().is_err());

        // begin() alone is not a stroke -- the pen must move.
        pad.begin(Point::new(10.0, 10.0));
        pad.end();
        assert!(!pad.can_capture());

        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(60.0, 40.0));
        pad.end();
        assert!(pad.can_capture());
        assert!(pad.capture().is_ok());
    }

    #[test]
    fn clear_resets_the_gating() {
        let mut pad = SignaturePad::new();
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(60.0, 40.0));
        pad.end();
        pad.clear();

        assert!(!pad.can_capture());
        assert!(pad.capture().is_err());
        assert_eq!(ink_count(&pad), 0);
    }

    #[test]
    fn extend_without_begin_draws_nothing() {
        let mut pad = SignaturePad::new();
        pad.extend(Point::new(30.0, 30.0));
        assert_eq!(ink_count(&pad), 0);
        assert!(!pad.can_capture());
    }

    #[test]
    fn strokes_land_on_the_surface() {
        let mut pad = SignaturePad::with_size(100, 50);
        pad.begin(Point::new(5.0, 25.0));
        pad.extend(Point::new(95.0, 25.0));
        pad.end();

        // A horizontal stroke across a 100px surface inks at least the
        // walked pixels.
        assert!(ink_count(&pad) >= 90);
        assert_eq!(*pad.surface.get_pixel(50, 25), INK);
    }

    #[test]
    fn segments_clip_to_the_surface_bounds() {
        let mut pad = SignaturePad::with_size(50, 50);
        pad.begin(Point::new(-20.0, 25.0));
        pad.extend(Point::new(80.0, 25.0));
        pad.end();
        // No panic; the in-bounds span is inked.
        assert!(ink_count(&pad) > 0);
    }

    #[test]
    fn capture_produces_png_data_url() {
        let mut pad = SignaturePad::new();
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(60.0, 40.0));
        pad.end();

        let captured = pad.capture().expect("capture");
        assert!(captured.data_url.starts_with("data:image/png;base64,"));
        // PNG magic bytes.
        assert_eq!(&captured.png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn new_ink_invalidates_a_previous_capture() {
        let mut pad = SignaturePad::new();
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(60.0, 40.0));
        pad.end();
        pad.capture().expect("capture");
        assert!(pad.captured().is_some());

        pad.begin(Point::new(20.0, 20.0));
        pad.extend(Point::new(30.0, 30.0));
        assert!(pad.captured().is_none());
    }

    #[test]
    fn resize_rebinds_and_discards_content() {
        let mut pad = SignaturePad::new();
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(60.0, 40.0));
        pad.end();

        pad.resize(600, 200);
        assert_eq!((pad.width(), pad.height()), (600, 200));
        assert_eq!(ink_count(&pad), 0);
        assert!(!pad.can_capture());

        // Same dimensions -- nothing happens.
        pad.begin(Point::new(10.0, 10.0));
        pad.extend(Point::new(20.0, 20.0));
        pad.resize(600, 200);
        assert!(pad.can_capture());
    }
}
