use anyhow::Result;
use clap::{CommandFactory, Parser};
use rare_segments::commands;
use rare_segments::commands::scan::RunOptions;
use rare_segments::output::OutputFormat;
use rare_segments::rarity::config::{
    RepresentativePolicy, ScanConfig, DEFAULT_MAX_ENTROPY, DEFAULT_POSITION,
    DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS,
};
use rare_segments::rarity::ranker::limit_from_flag;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rare-segments")]
#[command(
    about = "Reads URLs and outputs the ones where the word at the given path position has low entropy and occurs least often"
)]
#[command(version)]
struct Cli {
    /// URL list file(s); reads stdin when none are given or for "-"
    files: Vec<String>,

    /// Position in the URL path to extract the word from
    #[arg(short, long, default_value_t = DEFAULT_POSITION)]
    position: usize,

    /// Number of URLs to return, rarest words first (-1 for all). Best combined
    /// with -v to tune the entropy level
    #[arg(short = 'x', long, default_value_t = -1, allow_negative_numbers = true)]
    max_results: i64,

    /// Maximum entropy for the word at the given position; higher-entropy words
    /// are ignored
    #[arg(short, long, default_value_t = DEFAULT_MAX_ENTROPY)]
    entropy: f64,

    /// Show total unique words, entropy level and per-result annotations
    #[arg(short, long)]
    verbose: bool,

    /// Number of aggregation worker threads
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Capacity of the job queue between the reader and the workers
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// Which URL to show when a word occurs in several
    #[arg(long, value_enum, default_value_t = RepresentativePolicy::Last)]
    representative: RepresentativePolicy,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Show a progress spinner on stderr while reading
    #[arg(long)]
    progress: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "rare-segments", &mut std::io::stdout());
        return Ok(());
    }

    let config = ScanConfig::default()
        .position(cli.position)
        .limit(limit_from_flag(cli.max_results))
        .max_entropy(cli.entropy)
        .workers(cli.workers)
        .queue_capacity(cli.queue_capacity)
        .representative(cli.representative);

    let options = RunOptions {
        verbose: cli.verbose,
        color: !cli.no_color
            && cli.format == OutputFormat::Text
            && std::io::stdout().is_terminal(),
        progress: cli.progress,
        format: cli.format,
    };

    commands::scan::run(&cli.files, &config, options)
}
