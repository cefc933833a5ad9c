use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use gallery_localizer::{
  DocumentRewriter, ProjectConfig, process_pages, verify_assets, write_report,
};

#[derive(Parser)]
#[command(
  name = "gallery-localizer",
  about = "Point gallery pages at local image copies and check those copies exist"
)]
struct Cli {
  /// Site root the page and image paths are resolved against
  #[arg(long, default_value = ".")]
  root: PathBuf,

  /// Configuration file (defaults to gallery.config.json in the site root)
  #[arg(long)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Replace photo-host URLs in the gallery pages with local paths
  Rewrite,
  /// Check that thumbnail and full-size files exist for every identifier
  Verify,
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cli = Cli::parse();
  let config = match &cli.config {
    Some(path) => ProjectConfig::load_from_path(path),
    None => ProjectConfig::discover(&cli.root),
  }
  .context("failed to load configuration")?;

  match cli.command {
    Commands::Rewrite => run_rewrite(&cli.root, &config),
    Commands::Verify => run_verify(&cli.root, &config),
  }
}

fn run_rewrite(root: &Path, config: &ProjectConfig) -> Result<()> {
  let rewriter = DocumentRewriter::new()?;
  info!("Processing HTML files to replace remote image URLs with local paths");

  let summary = process_pages(&rewriter, root, &config.pages);
  println!("\n{}\n", summary.render_summary());
  if summary.has_problems() {
    warn!(
      "{} of {} pages were missing or failed",
      summary.outcomes.len() - summary.files_processed(),
      summary.outcomes.len()
    );
  }
  Ok(())
}

fn run_verify(root: &Path, config: &ProjectConfig) -> Result<()> {
  let report = verify_assets(
    &config.identifiers,
    &config.thumbs_dir_path(root),
    &config.full_dir_path(root),
  );

  if report.is_complete() {
    println!(
      "✓ All {} referenced image files exist in both thumbs and full folders!",
      report.checked
    );
    println!("  - {} thumbnail files verified", report.checked);
    println!("  - {} full-size files verified", report.checked);
    return Ok(());
  }

  println!("Found {} images with missing files:", report.missing.len());
  for line in report.describe_missing() {
    println!("  {line}");
  }

  let report_path = config.report_path(root);
  write_report(&report, &report_path, &config.thumbs_dir, &config.full_dir)?;
  println!("\nMissing images log created: {}", config.report_file);
  Ok(())
}
