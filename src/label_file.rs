//! Reading and writing one image's label file.
//!
//! Format: one line per rectangle, `<class_id> <cx> <cy> <w> <h>`, floats
//! normalized to the image dimensions. An absent file means "no labels yet"
//! and loads as an empty set; an existing empty file means the image was
//! saved with zero rectangles.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::MarkboxError;
use crate::geom::{self, NormalizedRecord, PixelBox};
use crate::labels::Rectangle;

/// A label file entry after denormalization, ready to insert into a live set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadedLabel {
    pub class_id: usize,
    pub bbox: PixelBox,
}

/// Overwrites `path` with the given rectangles, one line each.
///
/// The write is a direct overwrite, not atomic; acceptable for a single
/// synchronous user, so a crash mid-write can truncate the file. An empty
/// iterator still produces the file, so "saved with no labels" stays
/// distinguishable from "never saved".
pub fn save<'a>(
    path: &Path,
    rectangles: impl Iterator<Item = &'a Rectangle>,
    image_w: f64,
    image_h: f64,
) -> Result<(), MarkboxError> {
    let mut file = fs::File::create(path).map_err(MarkboxError::Io)?;

    for rect in rectangles {
        let record = geom::to_normalized(rect.bbox, rect.class_id, image_w, image_h)?;
        // Shortest Display form keeps round values terse, e.g. "0.2" not "0.200000".
        writeln!(
            file,
            "{} {} {} {} {}",
            record.class_id, record.cx, record.cy, record.w, record.h
        )
        .map_err(MarkboxError::Io)?;
    }

    Ok(())
}

/// Loads `path` and denormalizes every line against the image dimensions.
///
/// A missing file is the normal "no labels yet" state and yields an empty
/// vec. Any malformed line fails the whole load with
/// [`MarkboxError::CorruptLabelFile`] naming the offending line; recovery
/// policy (abort, treat as empty, warn) is the caller's decision.
pub fn load(path: &Path, image_w: f64, image_h: f64) -> Result<Vec<LoadedLabel>, MarkboxError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(MarkboxError::Io)?;
    let mut labels = Vec::new();

    for (line_idx, line) in content.lines().enumerate() {
        let line_num = line_idx + 1;
        let Some(record) = parse_label_line(line, path, line_num)? else {
            continue;
        };

        let bbox = geom::from_normalized(&record, image_w, image_h)?;
        labels.push(LoadedLabel {
            class_id: record.class_id,
            bbox,
        });
    }

    Ok(labels)
}

/// Parses one label line into a normalized record; blank lines yield `None`.
fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<Option<NormalizedRecord>, MarkboxError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(6).collect();

    if tokens.len() != 5 {
        return Err(MarkboxError::CorruptLabelFile {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("expected 5 tokens, found {}", tokens.len()),
        });
    }

    let class_id = tokens[0]
        .parse::<usize>()
        .map_err(|_| MarkboxError::CorruptLabelFile {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!(
                "invalid class id '{}'; expected non-negative integer",
                tokens[0]
            ),
        })?;

    let cx = parse_f64_token(tokens[1], "x center", file_path, line_num)?;
    let cy = parse_f64_token(tokens[2], "y center", file_path, line_num)?;
    let w = parse_f64_token(tokens[3], "width", file_path, line_num)?;
    let h = parse_f64_token(tokens[4], "height", file_path, line_num)?;

    Ok(Some(NormalizedRecord {
        class_id,
        cx,
        cy,
        w,
        h,
    }))
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, MarkboxError> {
    raw.parse::<f64>()
        .map_err(|_| MarkboxError::CorruptLabelFile {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelSet;

    #[test]
    fn parse_label_line_accepts_valid_rows() {
        let record = parse_label_line("2 0.5 0.25 0.3 0.1", Path::new("a.txt"), 1)
            .expect("parse should succeed")
            .expect("line should produce a record");

        assert_eq!(
            record,
            NormalizedRecord {
                class_id: 2,
                cx: 0.5,
                cy: 0.25,
                w: 0.3,
                h: 0.1,
            }
        );
    }

    #[test]
    fn parse_label_line_skips_blank_rows() {
        let record =
            parse_label_line("   ", Path::new("a.txt"), 2).expect("parse should succeed");
        assert!(record.is_none());
    }

    #[test]
    fn parse_label_line_rejects_wrong_token_counts() {
        let err = parse_label_line("0 0.1 0.2", Path::new("a.txt"), 3).unwrap_err();
        assert!(matches!(err, MarkboxError::CorruptLabelFile { line: 3, .. }));

        let err = parse_label_line("0 0.1 0.2 0.3 0.4 0.5", Path::new("a.txt"), 4).unwrap_err();
        assert!(matches!(err, MarkboxError::CorruptLabelFile { line: 4, .. }));
    }

    #[test]
    fn parse_label_line_rejects_non_numeric_fields() {
        let err = parse_label_line("cat 0.1 0.2 0.3 0.4", Path::new("a.txt"), 1).unwrap_err();
        assert!(matches!(err, MarkboxError::CorruptLabelFile { .. }));

        let err = parse_label_line("0 0.1 oops 0.3 0.4", Path::new("a.txt"), 1).unwrap_err();
        assert!(matches!(err, MarkboxError::CorruptLabelFile { .. }));
    }

    #[test]
    fn load_of_missing_file_is_empty_not_an_error() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let labels = load(&temp.path().join("never_saved.txt"), 100.0, 100.0).expect("load");
        assert!(labels.is_empty());
    }

    #[test]
    fn save_of_empty_set_creates_an_empty_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("empty.txt");

        let set = LabelSet::new();
        save(&path, set.iter(), 100.0, 100.0).expect("save");

        assert!(path.is_file());
        assert!(fs::read_to_string(&path).expect("read back").is_empty());
    }

    #[test]
    fn save_writes_terse_float_form() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("a.txt");

        let mut set = LabelSet::new();
        set.create(PixelBox::new(10.0, 10.0, 30.0, 50.0), 2);
        save(&path, set.iter(), 100.0, 100.0).expect("save");

        let content = fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "2 0.2 0.3 0.2 0.4\n");
    }

    #[test]
    fn save_then_load_restores_equivalent_rectangles() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("roundtrip.txt");

        let mut set = LabelSet::new();
        set.create(PixelBox::new(10.0, 10.0, 30.0, 50.0), 2);
        set.create(PixelBox::new(60.0, 5.0, 90.0, 45.0), 0);
        // Inverted drag; must come back canonical with the same extent.
        set.create(PixelBox::new(80.0, 95.0, 40.0, 55.0), 1);

        save(&path, set.iter(), 100.0, 100.0).expect("save");
        let restored = load(&path, 100.0, 100.0).expect("load");

        assert_eq!(restored.len(), 3);
        let expected: Vec<(usize, PixelBox)> = set
            .iter()
            .map(|r| (r.class_id, r.bbox.canonical()))
            .collect();

        for (loaded, (class_id, bbox)) in restored.iter().zip(expected) {
            assert_eq!(loaded.class_id, class_id);
            assert!((loaded.bbox.x0 - bbox.x0).abs() < 1e-6);
            assert!((loaded.bbox.y0 - bbox.y0).abs() < 1e-6);
            assert!((loaded.bbox.x1 - bbox.x1).abs() < 1e-6);
            assert!((loaded.bbox.y1 - bbox.y1).abs() < 1e-6);
        }
    }

    #[test]
    fn load_fails_fast_on_a_corrupt_line() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("corrupt.txt");
        fs::write(&path, "0 0.5 0.5 0.2 0.2\n1 0.5 0.5\n").expect("write file");

        let err = load(&path, 100.0, 100.0).unwrap_err();
        match err {
            MarkboxError::CorruptLabelFile { line, .. } => assert_eq!(line, 2),
            other => panic!("expected CorruptLabelFile, got {other:?}"),
        }
    }
}
