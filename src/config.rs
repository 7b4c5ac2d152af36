//! Startup options, read once from a JSON options file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MarkboxError;

/// The recognized configuration options.
///
/// Aliases accept the key names used by the original tkinter tool's
/// `options.json`, so existing options files keep working unmodified.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Options {
    /// Root directory scanned for image files.
    pub images_path: PathBuf,

    /// Root directory where label files are read and written.
    pub labels_path: PathBuf,

    /// Path to the external detector entry point.
    #[serde(alias = "yolo_directory")]
    pub detector_script: PathBuf,

    /// Weights file handed through to the detector, not interpreted here.
    #[serde(alias = "yolo_weightfile")]
    pub detector_weights: PathBuf,

    /// Directory where the detector writes predictions before import.
    #[serde(alias = "yolo_output")]
    pub predictions_path: PathBuf,

    /// Ordered class names; the index of a name is its class id.
    pub class_names: Vec<String>,
}

impl Options {
    /// Reads and parses an options file.
    pub fn load(path: &Path) -> Result<Self, MarkboxError> {
        let data = fs::read_to_string(path).map_err(|source| MarkboxError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&data).map_err(|source| MarkboxError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Number of configured classes; class ids at or beyond this are a
    /// data-quality concern (displayed with the fallback color).
    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_parses_current_key_names() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("options.json");
        fs::write(
            &path,
            r#"{
                "images_path": "data/images",
                "labels_path": "data/labels",
                "detector_script": "yolov5/detect.py",
                "detector_weights": "weights/best.pt",
                "predictions_path": "runs/predict",
                "class_names": ["person", "bicycle"]
            }"#,
        )
        .expect("write options");

        let options = Options::load(&path).expect("load options");
        assert_eq!(options.images_path, PathBuf::from("data/images"));
        assert_eq!(options.class_names, vec!["person", "bicycle"]);
        assert_eq!(options.class_count(), 2);
    }

    #[test]
    fn load_accepts_legacy_key_names() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("options.json");
        fs::write(
            &path,
            r#"{
                "images_path": "imgs",
                "labels_path": "lbls",
                "yolo_directory": "yolov5/detect.py",
                "yolo_weightfile": "best.pt",
                "yolo_output": "out",
                "class_names": []
            }"#,
        )
        .expect("write options");

        let options = Options::load(&path).expect("load options");
        assert_eq!(options.detector_script, PathBuf::from("yolov5/detect.py"));
        assert_eq!(options.predictions_path, PathBuf::from("out"));
    }

    #[test]
    fn load_reports_parse_errors_with_the_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("options.json");
        fs::write(&path, "{ not json").expect("write broken options");

        let err = Options::load(&path).unwrap_err();
        assert!(matches!(err, MarkboxError::ConfigParse { .. }));
    }

    #[test]
    fn load_reports_missing_file_as_config_read() {
        let err = Options::load(Path::new("/nonexistent/options.json")).unwrap_err();
        assert!(matches!(err, MarkboxError::ConfigRead { .. }));
    }
}
