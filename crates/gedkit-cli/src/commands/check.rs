//! Check command: parse a file and summarize it

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::load_document;
use crate::output::{to_json, OutputFormat};
use crate::Cli;
use gedkit_core::{Document, ElementRef};

#[derive(Args)]
pub struct CheckArgs {
    /// GEDCOM file to check
    pub file: PathBuf,
}

/// What a parsed file contains
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: PathBuf,
    pub records: usize,
    pub individuals: usize,
    pub families: usize,
    pub elements: usize,
    pub has_header: bool,
    pub has_trailer: bool,
    /// HUSB/WIFE/CHIL/FAMS/FAMC values that name no record
    pub dangling_pointers: Vec<String>,
}

fn dangling_pointers(doc: &Document) -> Vec<String> {
    let mut dangling = Vec::new();
    let mut stack: Vec<ElementRef<'_>> = doc.roots().collect();
    while let Some(element) = stack.pop() {
        if element.kind().is_pointer() && element.resolve().is_none() {
            let owner = element
                .parent()
                .and_then(|p| p.xref())
                .unwrap_or("?");
            dangling.push(format!(
                "{} {} {}",
                owner,
                element.tag(),
                element.value().unwrap_or_default()
            ));
        }
        stack.extend(element.children());
    }
    dangling.sort();
    dangling
}

pub fn run(args: &CheckArgs, cli: &Cli) -> anyhow::Result<()> {
    let doc = load_document(&args.file)?;
    let roots: Vec<_> = doc.roots().collect();

    let report = CheckReport {
        file: args.file.clone(),
        records: roots.len(),
        individuals: doc.individuals().count(),
        families: doc.families().count(),
        elements: doc.element_count(),
        has_header: roots.first().is_some_and(|r| r.tag() == "HEAD"),
        has_trailer: roots.last().is_some_and(|r| r.tag() == "TRLR"),
        dangling_pointers: dangling_pointers(&doc),
    };

    match cli.format {
        OutputFormat::Json => println!("{}", to_json(&report)?),
        OutputFormat::Text => {
            if cli.quiet {
                return Ok(());
            }
            println!("{}: OK", report.file.display());
            println!(
                "  {} records: {} individuals, {} families",
                report.records, report.individuals, report.families
            );
            println!("  {} elements", report.elements);
            if !report.has_header {
                println!("  missing HEAD record (added on format)");
            }
            if !report.has_trailer {
                println!("  missing TRLR record (added on format)");
            }
            for pointer in &report.dangling_pointers {
                println!("  dangling pointer: {}", pointer);
            }
        }
    }
    Ok(())
}
