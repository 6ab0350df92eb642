use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tsync",
    about = "Keep a remote reference table in step with a table scraped from a web page",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file; `tsync.toml` in the working directory if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scrape the source and bring the remote table up to date (default)
    Run(RunArgs),
    /// Compare the source with the remote table without writing
    Diff(DiffArgs),
    /// Print the remote table
    Show,
}

#[derive(Args, Default)]
pub struct RunArgs {
    /// Plan the write but do not issue it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Compare rows by code instead of by position
    #[arg(long)]
    pub keyed: bool,
}
