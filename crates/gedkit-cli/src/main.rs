//! Gedkit CLI - Command line interface for GEDCOM files

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, dump, format, relate};
use config::Config;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "gedkit")]
#[command(author, version, about = "Parse, rewrite and explore GEDCOM genealogy files")]
pub struct Cli {
    /// Config file (default: <config dir>/gedkit/config.toml)
    #[arg(short, long, global = true, env = "GEDKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a file and report what it contains
    Check(check::CheckArgs),
    /// Rewrite a file with normalized levels, header and trailer
    Format(format::FormatArgs),
    /// Find how two individuals are related
    Relate(relate::RelateArgs),
    /// Print the parsed element tree
    Dump(dump::DumpArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting gedkit CLI");

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Commands::Check(args) => check::run(args, &cli)?,
        Commands::Format(args) => format::run(args, &config)?,
        Commands::Relate(args) => relate::run(args, &cli, &config)?,
        Commands::Dump(args) => dump::run(args, &cli)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
