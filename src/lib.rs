#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod batch;
pub mod config;
pub mod models;
pub mod rewrite;
pub mod verify;

pub use asset_paths::{Identifier, PageMode};
pub use batch::{process_page, process_pages};
pub use config::{ConfigError, PageEntry, ProjectConfig};
pub use rewrite::{DocumentRewriter, RewritePass, RewriteResult};
pub use verify::{render_report, verify_assets, write_report};
