//! Output formatting utilities

use clap::ValueEnum;
use gedkit_core::{Document, ElementId, Individual};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty JSON for any serializable report
pub fn to_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Accept `I1` as shorthand for `@I1@`
pub fn normalize_xref(xref: &str) -> String {
    if xref.starts_with('@') && xref.ends_with('@') && xref.len() > 1 {
        xref.to_string()
    } else {
        format!("@{}@", xref.trim_matches('@'))
    }
}

/// Human label for an individual: its name, or a placeholder
pub fn display_name(person: &Individual<'_>) -> String {
    match person.name() {
        Ok(name) if name.first.is_some() || name.last.is_some() => name.to_string(),
        Ok(_) => "(unnamed)".to_string(),
        Err(_) => "(malformed name)".to_string(),
    }
}

/// Cross-reference id of an element, or its arena index when it has none
pub fn xref_of(doc: &Document, id: ElementId) -> String {
    doc.get(id)
        .xref()
        .map(str::to_string)
        .unwrap_or_else(|| id.to_string())
}
