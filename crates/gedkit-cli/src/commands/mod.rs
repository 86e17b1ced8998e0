//! CLI command implementations

pub mod check;
pub mod completions;
pub mod dump;
pub mod format;
pub mod relate;

use std::path::Path;

use anyhow::Context;
use gedkit_core::Document;

/// Parse the GEDCOM file at `path`
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    tracing::info!("Parsing {}", path.display());
    Document::parse_path(path).with_context(|| format!("Failed to parse {}", path.display()))
}
