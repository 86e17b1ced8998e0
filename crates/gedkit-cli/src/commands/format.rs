//! Format command: parse and write back normalized GEDCOM

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::load_document;
use crate::config::Config;

#[derive(Args)]
pub struct FormatArgs {
    /// GEDCOM file to read
    pub file: PathBuf,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace the output file if it exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &FormatArgs, config: &Config) -> anyhow::Result<()> {
    let mut doc = load_document(&args.file)?;

    match &args.output {
        Some(path) => {
            let overwrite = args.force || config.output.overwrite;
            doc.save_to_path(path, overwrite)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => doc.save(io::stdout().lock())?,
    }
    Ok(())
}
