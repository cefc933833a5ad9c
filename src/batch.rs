//! Batch processing of gallery pages with per-page failure isolation.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info, warn};

use crate::asset_paths::Identifier;
use crate::config::PageEntry;
use crate::models::{BatchSummary, PageOutcome, PageReport};
use crate::rewrite::DocumentRewriter;

const SUMMARY_RULE_WIDTH: usize = 70;

/// Rewrite a single page in place.
///
/// The page is only written back when its content changed, so re-running over an already
/// converted page leaves its modification time alone. No backup is kept.
pub fn process_page(
  rewriter: &DocumentRewriter,
  base_dir: &Path,
  entry: &PageEntry,
) -> Result<PageReport> {
  let path = base_dir.join(&entry.path);
  let text = fs::read_to_string(&path)
    .with_context(|| format!("failed to read {}", path.display()))?;

  let result = rewriter.rewrite_document(&text, entry.mode);
  let written = result.text != text;
  if written {
    fs::write(&path, &result.text)
      .with_context(|| format!("failed to write {}", path.display()))?;
  }

  Ok(PageReport {
    page: entry.path.clone(),
    mode: entry.mode,
    identifiers: result.identifiers,
    replacements: result.replacements,
    written,
  })
}

/// Rewrite every page in order, recording failures instead of stopping.
pub fn process_pages(
  rewriter: &DocumentRewriter,
  base_dir: &Path,
  pages: &[PageEntry],
) -> BatchSummary {
  let mut summary = BatchSummary::default();

  for entry in pages {
    let outcome = if !base_dir.join(&entry.path).exists() {
      PageOutcome::NotFound {
        page: entry.path.clone(),
      }
    } else {
      match process_page(rewriter, base_dir, entry) {
        Ok(report) => PageOutcome::Processed(report),
        Err(err) => PageOutcome::Failed {
          page: entry.path.clone(),
          message: format!("{err:#}"),
        },
      }
    };

    match &outcome {
      PageOutcome::Processed(_) => info!("{}", outcome.status_line()),
      PageOutcome::NotFound { .. } => warn!("{}", outcome.status_line()),
      PageOutcome::Failed { .. } => error!("{}", outcome.status_line()),
    }
    summary.outcomes.push(outcome);
  }

  summary
}

impl PageOutcome {
  /// One-line console status for this page.
  pub fn status_line(&self) -> String {
    match self {
      Self::Processed(report) => format!(
        "✓ {}: {} replacements, {} unique images",
        report.page.display(),
        report.replacements,
        report.identifiers.len()
      ),
      Self::NotFound { page } => format!("⚠ {}: NOT FOUND", page.display()),
      Self::Failed { page, message } => format!("✗ {}: ERROR - {}", page.display(), message),
    }
  }
}

impl BatchSummary {
  /// Reports for pages that were read successfully.
  pub fn processed(&self) -> impl Iterator<Item = &PageReport> {
    self.outcomes.iter().filter_map(|outcome| match outcome {
      PageOutcome::Processed(report) => Some(report),
      _ => None,
    })
  }

  /// Number of pages read and rewritten without error.
  pub fn files_processed(&self) -> usize {
    self.processed().count()
  }

  /// Rewritten blocks across all pages.
  pub fn total_replacements(&self) -> usize {
    self.processed().map(|report| report.replacements).sum()
  }

  /// Identifiers rewritten on any page, in numeric order.
  pub fn unique_identifiers(&self) -> BTreeSet<Identifier> {
    self.processed()
      .flat_map(|report| report.identifiers.iter().cloned())
      .collect()
  }

  /// Whether any page was missing or failed.
  pub fn has_problems(&self) -> bool {
    self.files_processed() != self.outcomes.len()
  }

  /// Final console block summarising the batch.
  pub fn render_summary(&self) -> String {
    let rule = "=".repeat(SUMMARY_RULE_WIDTH);
    let identifiers = self.unique_identifiers();

    let mut lines = vec![
      rule.clone(),
      "Summary:".to_string(),
      format!("  Total files processed: {}", self.files_processed()),
      format!("  Total replacements made: {}", self.total_replacements()),
      format!("  Unique IMG numbers processed: {}", identifiers.len()),
    ];
    if !identifiers.is_empty() {
      let listed: Vec<&str> = identifiers.iter().map(Identifier::as_str).collect();
      lines.push(format!("  IMG numbers: {}", listed.join(", ")));
    }
    lines.push(rule);

    lines.join("\n")
  }
}
