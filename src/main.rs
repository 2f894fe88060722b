use anyhow::Context;
use attrx::{
    hydrate, AttributeNormalizer, CandidateIndex, FuzzyMatcher, InMemoryEmbeddings,
    JsonFileSource, MatchConfig, RankParams, RawAttributes, SimilarityRanker,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Attribute resolution and similarity ranking
#[derive(Parser, Debug)]
#[command(name = "attrx")]
#[command(about = "Resolve noisy product attributes and rank similar items", long_about = None)]
struct Args {
    /// Path to a JSON matching configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize one attribute record
    Normalize {
        /// JSON array of brand candidates
        #[arg(long)]
        brands: PathBuf,

        /// JSON object with the raw attributes
        #[arg(long)]
        input: PathBuf,
    },

    /// Match a single query against a candidate list
    Match {
        /// JSON array of candidates
        #[arg(long)]
        candidates: PathBuf,

        query: String,
    },

    /// Rank items most similar to a given one
    Rank {
        /// JSON array of `{"id", "vector", "payload"}` items
        #[arg(long)]
        embeddings: PathBuf,

        /// Id of the item to find neighbours for
        #[arg(long)]
        query: String,

        #[arg(long, default_value_t = 0.0)]
        min_score: f32,

        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(args.config.as_deref())?;
    debug!("Config: {:?}", config);

    match args.command {
        Command::Normalize { brands, input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let raw: RawAttributes = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", input.display()))?;

            let source = Arc::new(JsonFileSource::new(&brands));
            let index = Arc::new(CandidateIndex::new("brands", source, &config));
            let normalizer = AttributeNormalizer::new(&config, index);

            let product = normalizer.normalize(&raw)?;
            let unverified = product.unverified_fields();
            if !unverified.is_empty() {
                info!("Fields needing review: {}", unverified.join(", "));
            }
            print_json(&product)
        }

        Command::Match { candidates, query } => {
            let source = Arc::new(JsonFileSource::new(&candidates));
            let index = CandidateIndex::new("candidates", source, &config);
            let snapshot = index.get()?;
            info!("Loaded {} candidates from {}", snapshot.len(), candidates.display());

            let result = FuzzyMatcher::new(&config).match_query(&query, &snapshot);
            print_json(&result)
        }

        Command::Rank {
            embeddings,
            query,
            min_score,
            limit,
        } => {
            let store = InMemoryEmbeddings::from_json_file(&embeddings)?;
            info!("Loaded {} embeddings from {}", store.len(), embeddings.display());

            let ranker = SimilarityRanker::new(&config);
            let results = ranker.recommend(&store, &query, RankParams { min_score, limit })?;
            print_json(&hydrate(&results, &store))
        }
    }
}
