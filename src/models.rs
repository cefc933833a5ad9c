//! Records produced while rewriting pages and verifying image files.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::asset_paths::{Identifier, PageMode};

/// Result of rewriting a single page that could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
  /// Page path as listed in the batch, relative to the base directory.
  pub page: PathBuf,
  /// Mode the page was processed in.
  pub mode: PageMode,
  /// Identifiers whose blocks were rewritten.
  pub identifiers: BTreeSet<Identifier>,
  /// Number of rewritten blocks.
  pub replacements: usize,
  /// Whether the page was written back to disk.
  pub written: bool,
}

/// What happened to one page of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
  /// The page was read and rewritten (possibly with no changes).
  Processed(PageReport),
  /// The page does not exist.
  NotFound {
    /// Page path as listed in the batch.
    page: PathBuf,
  },
  /// Reading, rewriting or writing the page failed.
  Failed {
    /// Page path as listed in the batch.
    page: PathBuf,
    /// Error message including its context chain.
    message: String,
  },
}

/// Outcomes for every page of a batch, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
  /// Per-page outcomes.
  pub outcomes: Vec<PageOutcome>,
}

/// Identifier with at least one expected image file absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingAsset {
  /// Image identifier.
  pub id: Identifier,
  /// Whether `img_<id>_320.jpg` exists in the thumbnail directory.
  pub thumbnail_present: bool,
  /// Whether `img_<id>_1600.jpg` exists in the full-size directory.
  pub full_size_present: bool,
}

/// Findings of a verification run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
  /// Number of identifiers checked.
  pub checked: usize,
  /// Identifiers with missing files, in input order.
  pub missing: Vec<MissingAsset>,
}
