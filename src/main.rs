use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use trindex::index::corpus::{load_corpus, Corpus, LoadOptions};
use trindex::output::{self, DocMatch, QueryReport};
use trindex::utils::{extract_trigrams, load_config};
use trindex::QueryEvaluator;

#[derive(Parser)]
#[command(name = "trindex")]
#[command(about = "In-memory trigram index for substring candidate search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/trindex/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct CorpusArgs {
    /// Files or directories to index
    #[arg(short, long = "path", default_value = ".")]
    paths: Vec<PathBuf>,

    /// Only index files matching this glob
    #[arg(short, long)]
    glob: Option<String>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Index files and list candidate documents for each pattern
    Query {
        /// Substrings to look up (at least 3 bytes each)
        #[arg(required = true)]
        patterns: Vec<String>,

        #[command(flatten)]
        corpus: CorpusArgs,

        /// Colorize output
        #[arg(long)]
        color: bool,
    },
    /// Index files and show index statistics
    Stats {
        #[command(flatten)]
        corpus: CorpusArgs,
    },
    /// Show the trigrams extracted from a string
    Trigrams {
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Query {
            patterns,
            corpus,
            color,
        } => {
            let loaded = open_corpus(&corpus, cli.config.as_ref())?;
            run_queries(&loaded, &patterns, corpus.json, color)?;
        }
        Commands::Stats { corpus } => {
            let loaded = open_corpus(&corpus, cli.config.as_ref())?;
            let stats = loaded.index.stats();
            let mut stdout = std::io::stdout().lock();
            if corpus.json {
                output::print_json(&mut stdout, &stats)?;
            } else {
                output::print_stats(&mut stdout, &stats)?;
            }
        }
        Commands::Trigrams { text } => {
            let trigrams = extract_trigrams(text.as_bytes());
            let mut stdout = std::io::stdout().lock();
            output::print_trigrams(&mut stdout, &trigrams)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "trindex=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_corpus(args: &CorpusArgs, config_path: Option<&PathBuf>) -> Result<Corpus> {
    let config = load_config(config_path.map(PathBuf::as_path)).context("Failed to load config")?;
    let options = LoadOptions {
        glob: args.glob.clone(),
        silent: args.json,
    };
    load_corpus(&args.paths, config, &options)
}

fn run_queries(corpus: &Corpus, patterns: &[String], json: bool, color: bool) -> Result<()> {
    let evaluator = QueryEvaluator::new(&corpus.index);
    let results = evaluator.query_batch(patterns);

    let mut failed = 0;
    let reports: Vec<QueryReport> = patterns
        .iter()
        .zip(results)
        .map(|(pattern, result)| match result {
            Ok(ids) => QueryReport {
                pattern: pattern.clone(),
                matches: ids
                    .into_iter()
                    .map(|doc_id| DocMatch {
                        doc_id,
                        path: corpus.path(doc_id).map(|p| p.to_path_buf()),
                    })
                    .collect(),
                error: None,
            },
            Err(e) => {
                failed += 1;
                QueryReport {
                    pattern: pattern.clone(),
                    matches: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    if json {
        output::print_json(&mut std::io::stdout().lock(), &reports)?;
    } else {
        let mut stdout = output::stdout(color);
        output::print_reports(&mut stdout, &reports)?;
    }

    if failed > 0 {
        anyhow::bail!("{} of {} patterns could not be evaluated", failed, patterns.len());
    }
    Ok(())
}
