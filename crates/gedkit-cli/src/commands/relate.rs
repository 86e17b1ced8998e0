//! Relate command: relationship path between two individuals

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;
use serde::Serialize;

use super::load_document;
use crate::config::Config;
use crate::output::{display_name, normalize_xref, to_json, xref_of, OutputFormat};
use crate::Cli;
use gedkit_core::{ancestor, Document, ElementId, RelationshipEngine, RelationshipQuery, SearchStats};

#[derive(Args)]
pub struct RelateArgs {
    /// GEDCOM file to read
    pub file: PathBuf,

    /// Starting individual, e.g. @I1@ or I1
    pub from: String,

    /// Target individual
    pub to: String,

    /// Maximum search depth (default from config)
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,
}

/// One individual on a path
#[derive(Debug, Serialize)]
pub struct PathStep {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct AncestorReport {
    pub id: String,
    pub name: String,
    pub distance: u32,
    pub direction: f64,
}

#[derive(Debug, Serialize)]
pub struct RelateReport {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathStep>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor: Option<AncestorReport>,
    pub stats: SearchStats,
}

fn find_individual(doc: &Document, xref: &str) -> anyhow::Result<ElementId> {
    let element = doc
        .get_by_id(xref)
        .ok_or_else(|| anyhow!("No record with id {}", xref))?;
    if element.as_individual().is_none() {
        bail!("{} is a {} record, not an individual", xref, element.tag());
    }
    Ok(element.id())
}

fn step(doc: &Document, id: ElementId) -> PathStep {
    let name = doc
        .get(id)
        .as_individual()
        .map(|person| display_name(&person))
        .unwrap_or_default();
    PathStep {
        id: xref_of(doc, id),
        name,
    }
}

pub fn run(args: &RelateArgs, cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let query = RelationshipQuery::new().with_depth(args.max_depth.unwrap_or(config.search.max_depth));
    query.validate()?;

    let doc = load_document(&args.file)?;
    let from = normalize_xref(&args.from);
    let to = normalize_xref(&args.to);
    let start = find_individual(&doc, &from)?;
    let target = find_individual(&doc, &to)?;

    tracing::info!("Finding relationship from {} to {} (max_depth: {})", from, to, query.max_depth);
    let result = RelationshipEngine::search(&doc, start, target, &query);

    let ancestor_report = result
        .path
        .as_deref()
        .and_then(|path| ancestor(&doc, path))
        .map(|fold| {
            let reached = step(&doc, fold.individual);
            AncestorReport {
                id: reached.id,
                name: reached.name,
                distance: fold.distance,
                direction: fold.direction,
            }
        });

    let report = RelateReport {
        from,
        to,
        path: result
            .path
            .as_ref()
            .map(|path| path.iter().map(|&id| step(&doc, id)).collect()),
        ancestor: ancestor_report,
        stats: result.stats,
    };

    match cli.format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn print_text(report: &RelateReport) {
    match &report.path {
        None => {
            println!("No path found from {} to {}", report.from, report.to);
            println!("  (searched {} steps)", report.stats.calls);
            if report.stats.depth_limit_hit {
                println!("  search depth limit reached; try a larger --max-depth");
            }
        }
        Some(path) => {
            println!(
                "Path from {} to {} ({} individuals):",
                report.from,
                report.to,
                path.len()
            );
            let route: Vec<String> = path
                .iter()
                .map(|s| format!("{} {}", s.id, s.name).trim_end().to_string())
                .collect();
            println!("  Route: {}", route.join(" -> "));

            if let Some(fold) = &report.ancestor {
                println!(
                    "  Ancestor: {} {} ({} generations up, direction {:+.3})",
                    fold.id, fold.name, fold.distance, fold.direction
                );
            }
        }
    }
}
