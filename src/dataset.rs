//! Dataset enumeration: the ordered image/label path pairs and the cursor.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::MarkboxError;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "png", "jpeg", "bmp", "webp"];
const LABEL_EXTENSION: &str = "txt";

/// One dataset item: where its image lives and where its labels go.
///
/// The pairing is fixed at scan time: the label path is the labels folder
/// plus the image basename with a `txt` extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

/// The ordered image sequence plus the navigation cursor.
///
/// Built once from a folder scan; images are not added or removed at
/// runtime. The cursor is `None` until the first navigation lands.
#[derive(Debug)]
pub struct Dataset {
    entries: Vec<ImageEntry>,
    current: Option<usize>,
}

impl Dataset {
    /// Scans `images_folder` for image files and pairs each with its label
    /// path under `labels_folder`.
    ///
    /// The scan is non-recursive and sorted by file name so the order is
    /// stable for the process lifetime. An empty folder yields an empty
    /// dataset, which is valid; navigation is then a no-op.
    pub fn scan(images_folder: &Path, labels_folder: &Path) -> Result<Self, MarkboxError> {
        let mut image_files = Vec::new();

        for entry in WalkDir::new(images_folder).max_depth(1).follow_links(true) {
            let entry = entry.map_err(|source| {
                MarkboxError::Io(source.into_io_error().unwrap_or_else(|| {
                    std::io::Error::other(format!(
                        "failed while scanning {}",
                        images_folder.display()
                    ))
                }))
            })?;

            if entry.file_type().is_file() && has_image_extension(entry.path()) {
                image_files.push(entry.path().to_path_buf());
            }
        }

        image_files.sort();

        let entries = image_files
            .into_iter()
            .map(|image_path| {
                let file_stem = image_path
                    .file_stem()
                    .map(|stem| stem.to_os_string())
                    .unwrap_or_default();
                let mut label_name = PathBuf::from(file_stem);
                label_name.set_extension(LABEL_EXTENSION);

                ImageEntry {
                    label_path: labels_folder.join(label_name),
                    image_path,
                }
            })
            .collect();

        Ok(Self {
            entries,
            current: None,
        })
    }

    /// Builds a dataset from pre-paired entries. Mostly useful in tests.
    pub fn from_entries(entries: Vec<ImageEntry>) -> Self {
        Self {
            entries,
            current: None,
        }
    }

    /// Number of images in the dataset.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the scan found no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a given index, if in range.
    pub fn entry(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    /// The cursor position; `None` before the first navigation.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Entry under the cursor.
    pub fn current_entry(&self) -> Option<&ImageEntry> {
        self.current.and_then(|index| self.entries.get(index))
    }

    /// Moves the cursor. Callers must have range-checked `index`; the
    /// clamp-reject policy for out-of-range targets lives in the session.
    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.entries.len());
        self.current = Some(index);
    }
}

fn has_image_extension(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
}
