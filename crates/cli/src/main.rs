use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod archive_cmd;
mod map_cmd;
mod output;

#[derive(Parser)]
#[command(name = "promptmap")]
#[command(about = "Bundle text files into archives and map LLM prompts over them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for the
    /// archive/result stream)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle files into an archive or extract files from one
    Archive(ArchiveArgs),

    /// Apply an LLM prompt to every item in an archive
    Map(MapArgs),
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// Files to bundle (create) or the archive to read (extract; stdin when omitted)
    pub files: Vec<PathBuf>,

    /// Create an archive from files (the default when neither flag is given)
    #[arg(long)]
    pub create: bool,

    /// Extract files from an archive
    #[arg(long, conflicts_with = "create")]
    pub extract: bool,

    /// Strip directories: bundle/write only bare filenames
    #[arg(long)]
    pub basename: bool,

    /// For create: required path prefix, stripped from entries (files without
    /// it are skipped with a warning). For extract: directory the extracted
    /// paths are written under
    #[arg(long)]
    pub basedir: Option<String>,

    /// Archive format: jsonl|json|jsonarr|xml|xmlish
    #[arg(long, default_value = "jsonl")]
    pub format: String,
}

#[derive(Args)]
pub struct MapArgs {
    /// Input archive ('-' reads stdin)
    pub input: String,

    /// Prompt template; the first '{item}' is replaced with each item's content
    #[arg(default_value = "")]
    pub prompt: String,

    /// Model to use
    #[arg(short, long, default_value = promptmap_mapper::DEFAULT_MODEL)]
    pub model: String,

    /// Temperature for generation
    #[arg(short, long, default_value_t = 0.0)]
    pub temperature: f64,

    /// Max tokens per response
    #[arg(long, default_value_t = 15_000)]
    pub tokens: u32,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = 16)]
    pub concurrency: usize,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Map each item this many times, prefixing paths with "{i}_"
    #[arg(long)]
    pub branches: Option<usize>,

    /// Include the original input content in each result object
    #[arg(long)]
    pub content: bool,

    /// Set both input and output format: jsonl|json|jsonarr
    #[arg(long)]
    pub format: Option<String>,

    /// Input format
    #[arg(long, default_value = "jsonl")]
    pub iformat: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    pub oformat: String,

    /// Per-item timeout in seconds
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Archive(args) => archive_cmd::run(args),
        Commands::Map(args) => map_cmd::run(args).await,
    }
}
