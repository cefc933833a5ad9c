//! Cross-checks image identifiers against the thumbnail and full-size directories.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::asset_paths::{Identifier, LabelPattern, full_size_file_name, thumbnail_file_name};
use crate::models::{MissingAsset, VerificationReport};

const REPORT_TITLE: &str = "Missing Image Files Report";
const REPORT_RULE_WIDTH: usize = 50;

/// Check that both image variants exist for every identifier.
///
/// Paths that cannot be inspected (missing directory, permission error) count as missing.
pub fn verify_assets(
  ids: &[Identifier],
  thumbs_dir: &Path,
  full_dir: &Path,
) -> VerificationReport {
  let missing = ids
    .iter()
    .filter_map(|id| {
      let thumbnail_present = thumbs_dir.join(thumbnail_file_name(id)).exists();
      let full_size_present = full_dir.join(full_size_file_name(id)).exists();
      debug!(
        "{}: thumbnail={} full-size={}",
        LabelPattern::label_for(id),
        thumbnail_present,
        full_size_present
      );

      (!thumbnail_present || !full_size_present).then(|| MissingAsset {
        id: id.clone(),
        thumbnail_present,
        full_size_present,
      })
    })
    .collect();

  VerificationReport {
    checked: ids.len(),
    missing,
  }
}

impl MissingAsset {
  /// Console description such as `IMG_9999: thumbnail missing, full-size missing`.
  pub fn describe(&self) -> String {
    let mut status = Vec::new();
    if !self.thumbnail_present {
      status.push("thumbnail missing");
    }
    if !self.full_size_present {
      status.push("full-size missing");
    }
    format!("{}: {}", LabelPattern::label_for(&self.id), status.join(", "))
  }
}

impl VerificationReport {
  /// True when every identifier has both files.
  pub fn is_complete(&self) -> bool {
    self.missing.is_empty()
  }

  /// Console listing of identifiers with missing files.
  pub fn describe_missing(&self) -> Vec<String> {
    self.missing.iter().map(MissingAsset::describe).collect()
  }
}

/// Render the plain-text missing-files report.
///
/// `thumbs_dir` and `full_dir` are the directory names shown in front of each file name,
/// normally the site-relative `pics/thumbs` and `pics/full`.
pub fn render_report(report: &VerificationReport, thumbs_dir: &str, full_dir: &str) -> String {
  let thumbs_dir = thumbs_dir.trim_end_matches('/');
  let full_dir = full_dir.trim_end_matches('/');

  let mut text = format!("{REPORT_TITLE}\n{}\n\n", "=".repeat(REPORT_RULE_WIDTH));
  for item in &report.missing {
    text.push_str(&format!("{}:\n", LabelPattern::label_for(&item.id)));
    if !item.thumbnail_present {
      text.push_str(&format!(
        "  - Thumbnail: {thumbs_dir}/{} (MISSING)\n",
        thumbnail_file_name(&item.id)
      ));
    }
    if !item.full_size_present {
      text.push_str(&format!(
        "  - Full-size: {full_dir}/{} (MISSING)\n",
        full_size_file_name(&item.id)
      ));
    }
    text.push('\n');
  }
  text
}

/// Write the report to `path` when anything is missing.
///
/// Returns whether a file was written; a complete verification leaves `path` untouched.
pub fn write_report(
  report: &VerificationReport,
  path: &Path,
  thumbs_dir: &str,
  full_dir: &str,
) -> Result<bool> {
  if report.is_complete() {
    return Ok(false);
  }

  fs::write(path, render_report(report, thumbs_dir, full_dir))
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(true)
}
