//! Merging externally predicted label files into the labels folder.
//!
//! This is a pure filesystem step, kept apart from the live label set so it
//! can be tested without a session. Predictions replace prior manual labels
//! for the same image, last writer wins; after an import that touched the
//! current image, the caller refreshes the session.

use std::fs;
use std::path::Path;

use crate::error::MarkboxError;

/// Moves every regular file from `predicted_dir` into `labels_dir` under
/// the same file name, overwriting existing label files.
///
/// Returns the number of files moved. Fails with
/// [`MarkboxError::PredictionsMissing`] when the source folder does not
/// exist, leaving the labels folder untouched.
pub fn import_predictions(predicted_dir: &Path, labels_dir: &Path) -> Result<usize, MarkboxError> {
    if !predicted_dir.is_dir() {
        return Err(MarkboxError::PredictionsMissing {
            path: predicted_dir.to_path_buf(),
        });
    }

    fs::create_dir_all(labels_dir).map_err(MarkboxError::Io)?;

    let mut moved = 0;
    let mut names = Vec::new();

    for entry in fs::read_dir(predicted_dir).map_err(MarkboxError::Io)? {
        let entry = entry.map_err(MarkboxError::Io)?;
        if entry.file_type().map_err(MarkboxError::Io)?.is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort();

    for name in names {
        let source = predicted_dir.join(&name);
        let target = labels_dir.join(&name);
        move_file(&source, &target)?;
        moved += 1;
    }

    Ok(moved)
}

/// Rename with a copy+delete fallback for cross-device moves.
fn move_file(source: &Path, target: &Path) -> Result<(), MarkboxError> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    fs::copy(source, target).map_err(MarkboxError::Io)?;
    fs::remove_file(source).map_err(MarkboxError::Io)
}
