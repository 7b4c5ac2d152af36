//! Pixel-space rectangles and the YOLO-style normalized record codec.
//!
//! A [`PixelBox`] is a corner-pair rectangle in image pixel coordinates. It
//! is allowed to be "inverted" (x1 < x0 or y1 < y0) because that is what a
//! rectangle looks like mid-drag; [`to_normalized`] canonicalizes before
//! converting, so the drag direction never leaks into the stored record.

use crate::error::MarkboxError;

/// An axis-aligned rectangle given by two opposite corners, in pixel space.
///
/// No ordering between the corners is enforced: interactive drawing produces
/// boxes with either orientation and both must normalize identically.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PixelBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PixelBox {
    /// Creates a box from two corners, in the order they were given.
    #[inline]
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Returns the min/max-ordered form of this box.
    #[inline]
    pub fn canonical(&self) -> Self {
        Self {
            x0: self.x0.min(self.x1),
            y0: self.y0.min(self.y1),
            x1: self.x0.max(self.x1),
            y1: self.y0.max(self.y1),
        }
    }

    /// Returns true if the corners are already min/max ordered.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.x0 <= self.x1 && self.y0 <= self.y1
    }

    /// Width of the canonical form (always non-negative).
    #[inline]
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    /// Height of the canonical form (always non-negative).
    #[inline]
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }
}

/// One persisted label line: class index plus a center-based box expressed
/// as fractions of the image dimensions.
///
/// Values are not clamped to [0, 1]; a box drawn partially outside the image
/// round-trips through the file with out-of-range fractions, exactly as the
/// downstream detector format tolerates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedRecord {
    pub class_id: usize,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

fn check_dimensions(image_w: f64, image_h: f64) -> Result<(), MarkboxError> {
    if image_w <= 0.0 || image_h <= 0.0 || !image_w.is_finite() || !image_h.is_finite() {
        return Err(MarkboxError::InvalidImageDimensions {
            width: image_w,
            height: image_h,
        });
    }
    Ok(())
}

/// Converts a pixel box into a normalized record against the given image
/// dimensions.
///
/// The box is canonicalized first, so an inverted drag yields the same
/// record as its ordered twin. Fails with
/// [`MarkboxError::InvalidImageDimensions`] when either dimension is zero,
/// negative, or non-finite.
pub fn to_normalized(
    bbox: PixelBox,
    class_id: usize,
    image_w: f64,
    image_h: f64,
) -> Result<NormalizedRecord, MarkboxError> {
    check_dimensions(image_w, image_h)?;

    let c = bbox.canonical();
    Ok(NormalizedRecord {
        class_id,
        cx: (c.x0 + c.x1) / 2.0 / image_w,
        cy: (c.y0 + c.y1) / 2.0 / image_h,
        w: (c.x1 - c.x0) / image_w,
        h: (c.y1 - c.y0) / image_h,
    })
}

/// Converts a normalized record back into a canonical pixel box.
///
/// Exact inverse of [`to_normalized`] for canonical input, up to
/// floating-point tolerance.
pub fn from_normalized(
    record: &NormalizedRecord,
    image_w: f64,
    image_h: f64,
) -> Result<PixelBox, MarkboxError> {
    check_dimensions(image_w, image_h)?;

    Ok(PixelBox {
        x0: (record.cx - record.w / 2.0) * image_w,
        y0: (record.cy - record.h / 2.0) * image_h,
        x1: (record.cx + record.w / 2.0) * image_w,
        y1: (record.cy + record.h / 2.0) * image_h,
    })
}
