use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "memfs",
    about = "memFS: an in-memory file store with an interactive shell",
    version,
)]
pub struct Cli {
    /// Defaults to `shell` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Colorize shell and report output
    #[arg(long, global = true)]
    pub color: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive shell
    Shell(ShellArgs),
    /// Run the concurrent benchmark
    Bench(BenchArgs),
}

#[derive(Args)]
pub struct ShellArgs {
    #[arg(long, default_value = "memFS> ")]
    pub prompt: String,
}

#[derive(Args)]
pub struct BenchArgs {
    /// TOML file with thread_counts, operation_counts and content_size
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Comma-separated thread counts, overriding the config
    #[arg(long, value_delimiter = ',')]
    pub threads: Vec<usize>,
    /// Comma-separated operation counts, overriding the config
    #[arg(long = "ops", value_delimiter = ',')]
    pub operations: Vec<usize>,
    #[arg(long)]
    pub content_size: Option<usize>,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}
