//! Dump command: print the parsed element tree

use std::path::PathBuf;

use clap::Args;

use super::load_document;
use crate::output::OutputFormat;
use crate::Cli;

#[derive(Args)]
pub struct DumpArgs {
    /// GEDCOM file to read
    pub file: PathBuf,

    /// Shorthand for `--format json`
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &DumpArgs, cli: &Cli) -> anyhow::Result<()> {
    let doc = load_document(&args.file)?;

    if args.json || cli.format == OutputFormat::Json {
        println!("{}", doc.to_json()?);
    } else {
        for root in doc.roots() {
            println!("{:#?}", root);
        }
    }
    Ok(())
}
