//! The live label set: rectangles on the currently displayed image.
//!
//! Identity is a small opaque handle allocated here, deliberately decoupled
//! from any rendering backend; a UI keeps its own handle-to-visual mapping.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::MarkboxError;
use crate::geom::PixelBox;

/// Display palette indexed by class id. Classes beyond the palette fall back
/// to [`FALLBACK_COLOR`]; that is tolerated for display but flags stale or
/// out-of-range class ids in the data.
pub const CLASS_COLORS: [&str; 8] = [
    "red", "blue", "green", "yellow", "orange", "cyan", "magenta", "white",
];

/// Color used for class ids without a palette entry.
pub const FALLBACK_COLOR: &str = "gray";

/// Returns the display color for a class id, index-or-fallback.
///
/// The rule lives here rather than in the UI so that a reload renders the
/// same colors the original drawing did.
pub fn color_for_class(class_id: usize) -> &'static str {
    CLASS_COLORS.get(class_id).copied().unwrap_or(FALLBACK_COLOR)
}

/// An opaque handle identifying one rectangle within one [`LabelSet`].
///
/// Handles are unique for the lifetime of the set and are never persisted;
/// reloading a label file allocates fresh ones.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RectId(u64);

impl RectId {
    /// Returns the underlying u64 value.
    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RectId({})", self.0)
    }
}

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One annotated object instance on the current image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub id: RectId,
    pub class_id: usize,
    pub bbox: PixelBox,
}

/// In-memory rectangle collection for exactly one image at a time.
///
/// Backed by a `BTreeMap` keyed by monotonically increasing ids, so map
/// order equals insertion order; iteration is deterministic and saves are
/// reproducible.
#[derive(Debug, Default)]
pub struct LabelSet {
    rects: BTreeMap<RectId, Rectangle>,
    next_id: u64,
}

impl LabelSet {
    /// Creates an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new rectangle and returns its handle.
    pub fn create(&mut self, bbox: PixelBox, class_id: usize) -> RectId {
        let id = RectId(self.next_id);
        self.next_id += 1;
        self.rects.insert(id, Rectangle { id, class_id, bbox });
        id
    }

    /// Replaces the stored box for an existing rectangle.
    pub fn reposition(&mut self, id: RectId, bbox: PixelBox) -> Result<(), MarkboxError> {
        match self.rects.get_mut(&id) {
            Some(rect) => {
                rect.bbox = bbox;
                Ok(())
            }
            None => Err(MarkboxError::UnknownRectangle(id)),
        }
    }

    /// Removes a rectangle.
    pub fn remove(&mut self, id: RectId) -> Result<(), MarkboxError> {
        match self.rects.remove(&id) {
            Some(_) => Ok(()),
            None => Err(MarkboxError::UnknownRectangle(id)),
        }
    }

    /// Removes all rectangles. Idempotent; handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Looks up a rectangle by handle.
    pub fn get(&self, id: RectId) -> Option<&Rectangle> {
        self.rects.get(&id)
    }

    /// Iterates rectangles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rectangle> {
        self.rects.values()
    }

    /// Number of rectangles in the set.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns true if the set holds no rectangles.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
