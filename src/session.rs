//! The annotation session: dataset cursor, live label set, and the
//! save-before-navigate protocol.
//!
//! The session replaces the ambient mutable canvas state of a GUI with an
//! explicit object that can be driven deterministically from tests. A UI
//! layer edits the live [`LabelSet`] directly for in-canvas operations and
//! calls [`Session::next`]/[`Session::previous`] on navigation commands.

use std::path::Path;

use crate::dataset::Dataset;
use crate::error::MarkboxError;
use crate::geom::PixelBox;
use crate::label_file;
use crate::labels::{LabelSet, RectId};

/// Whether the current image's pixel data could be read.
///
/// `Missing` is degraded mode: the canvas stays blank but label editing
/// continues. The session then treats the image as 1x1, which makes pixel
/// space coincide with normalized space, so labels loaded for an unreadable
/// image save back unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageStatus {
    Loaded { width: u32, height: u32 },
    Missing,
}

/// Outcome of one navigation call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// False when the target was out of range and the cursor stayed put.
    pub moved: bool,
    /// Status of the image under the cursor after the call.
    pub image: ImageStatus,
}

/// One user's editing session over one dataset directory.
pub struct Session {
    dataset: Dataset,
    labels: LabelSet,
    image: ImageStatus,
    selected_class: Option<usize>,
}

impl Session {
    /// Wraps a scanned dataset; no image is loaded until the first `goto`.
    pub fn open(dataset: Dataset) -> Self {
        Self {
            dataset,
            labels: LabelSet::new(),
            image: ImageStatus::Missing,
            selected_class: None,
        }
    }

    /// The dataset under this session.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The live label set, for rendering and read-only inspection.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// The live label set, for in-canvas edits (move, delete).
    pub fn labels_mut(&mut self) -> &mut LabelSet {
        &mut self.labels
    }

    /// Image status for the current cursor position.
    pub fn image_status(&self) -> ImageStatus {
        self.image
    }

    /// Sets the class used for newly drawn rectangles.
    pub fn select_class(&mut self, class_id: usize) {
        self.selected_class = Some(class_id);
    }

    /// The class newly drawn rectangles will get, if one is selected.
    pub fn selected_class(&self) -> Option<usize> {
        self.selected_class
    }

    /// Creates a rectangle with the currently selected class.
    pub fn draw(&mut self, bbox: PixelBox) -> Result<RectId, MarkboxError> {
        let class_id = self.selected_class.ok_or(MarkboxError::NoClassSelected)?;
        Ok(self.labels.create(bbox, class_id))
    }

    /// The sole state-transition primitive: save, then maybe move, then load.
    ///
    /// The save of the current image's labels happens unconditionally, even
    /// when `target` is out of range; in-progress edits are never silently
    /// discarded. Out-of-range targets then leave the cursor unchanged (a
    /// no-op, not an error). A readable target image reports its dimensions
    /// in the returned [`Step`]; an unreadable one degrades to
    /// [`ImageStatus::Missing`] but its labels are still loaded so editing
    /// can continue. A corrupt label file aborts the load and surfaces to
    /// the caller.
    pub fn goto(&mut self, target: isize) -> Result<Step, MarkboxError> {
        if let Some(entry) = self.dataset.current_entry() {
            let (w, h) = canvas_dimensions(self.image);
            label_file::save(&entry.label_path, self.labels.iter(), w, h)?;
        }

        if target < 0 || target as usize >= self.dataset.len() {
            return Ok(Step {
                moved: false,
                image: self.image,
            });
        }

        let index = target as usize;
        let Some(entry) = self.dataset.entry(index).cloned() else {
            return Ok(Step {
                moved: false,
                image: self.image,
            });
        };

        self.dataset.set_current(index);
        self.labels.clear();

        self.image = match probe_image(&entry.image_path) {
            Ok((width, height)) => ImageStatus::Loaded { width, height },
            Err(_) => ImageStatus::Missing,
        };
        self.load_current_labels(&entry.label_path)?;

        Ok(Step {
            moved: true,
            image: self.image,
        })
    }

    /// Navigates to the previous image; a no-op at index 0 beyond the save.
    pub fn previous(&mut self) -> Result<Step, MarkboxError> {
        match self.dataset.current_index() {
            Some(index) => self.goto(index as isize - 1),
            None => self.goto(0),
        }
    }

    /// Navigates to the next image; a no-op at the last index beyond the save.
    pub fn next(&mut self) -> Result<Step, MarkboxError> {
        match self.dataset.current_index() {
            Some(index) => self.goto(index as isize + 1),
            None => self.goto(0),
        }
    }

    /// Reloads the current image's labels from disk without saving first.
    ///
    /// Used after a prediction import replaced the label file under the
    /// cursor; the freshly imported content wins over the in-memory state.
    pub fn refresh(&mut self) -> Result<(), MarkboxError> {
        let Some(entry) = self.dataset.current_entry().cloned() else {
            return Ok(());
        };

        self.labels.clear();
        self.load_current_labels(&entry.label_path)
    }

    fn load_current_labels(&mut self, label_path: &Path) -> Result<(), MarkboxError> {
        let (w, h) = canvas_dimensions(self.image);
        for loaded in label_file::load(label_path, w, h)? {
            self.labels.create(loaded.bbox, loaded.class_id);
        }
        Ok(())
    }
}

fn canvas_dimensions(image: ImageStatus) -> (f64, f64) {
    match image {
        ImageStatus::Loaded { width, height } => (f64::from(width), f64::from(height)),
        ImageStatus::Missing => (1.0, 1.0),
    }
}

/// Reads the pixel dimensions of an image file.
///
/// This is the whole image-decoding collaborator as far as the engine is
/// concerned; only the dimensions matter. [`Session::goto`] degrades to
/// [`ImageStatus::Missing`] on failure, but the typed error is available to
/// callers that want to report it.
pub fn probe_image(path: &Path) -> Result<(u32, u32), MarkboxError> {
    let size = imagesize::size(path).map_err(|source| MarkboxError::MissingImageData {
        path: path.to_path_buf(),
        source,
    })?;

    match (u32::try_from(size.width), u32::try_from(size.height)) {
        (Ok(width), Ok(height)) => Ok((width, height)),
        _ => Err(MarkboxError::InvalidImageDimensions {
            width: size.width as f64,
            height: size.height as f64,
        }),
    }
}
