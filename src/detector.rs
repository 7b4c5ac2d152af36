//! Invocation of the external detector that pre-populates labels.
//!
//! The detector is an opaque collaborator: a YOLO-style script that, given
//! an images folder and a weights file, writes one prediction file per image
//! under `<output>/labels/` in the same format the label files use. Markbox
//! only runs it and imports its output; failures abort before any label
//! file is modified.

use std::fs;
use std::process::Command;

use crate::config::Options;
use crate::error::MarkboxError;
use crate::importer;

/// Runs the configured detector over the images folder.
///
/// A stale prediction output directory is removed first so leftovers from a
/// previous run cannot be imported as fresh predictions. A spawn failure or
/// non-zero exit maps to [`MarkboxError::DetectorFailed`].
pub fn run_detector(options: &Options) -> Result<(), MarkboxError> {
    if options.predictions_path.exists() {
        fs::remove_dir_all(&options.predictions_path).map_err(MarkboxError::Io)?;
    }

    let status = Command::new("python")
        .arg(&options.detector_script)
        .arg("--save-txt")
        .arg("--nosave")
        .arg("--weights")
        .arg(&options.detector_weights)
        .arg("--img")
        .arg("640")
        .arg("--conf")
        .arg("0.25")
        .arg("--name")
        .arg(&options.predictions_path)
        .arg("--source")
        .arg(&options.images_path)
        .status()
        .map_err(|source| MarkboxError::DetectorFailed {
            message: format!(
                "could not spawn detector {}: {}",
                options.detector_script.display(),
                source
            ),
        })?;

    if !status.success() {
        return Err(MarkboxError::DetectorFailed {
            message: format!("detector exited with status {status}"),
        });
    }

    Ok(())
}

/// Runs the detector, then moves its predictions into the labels folder.
///
/// All-or-nothing with respect to the label files: if the detector fails,
/// or produced no `labels/` output directory, nothing is imported and the
/// prior label set on disk is unchanged. Returns the number of prediction
/// files imported.
pub fn predict_and_import(options: &Options) -> Result<usize, MarkboxError> {
    run_detector(options)?;
    importer::import_predictions(&prediction_labels_dir(options), &options.labels_path)
}

/// Where the detector drops its per-image prediction files.
pub fn prediction_labels_dir(options: &Options) -> std::path::PathBuf {
    options.predictions_path.join("labels")
}
