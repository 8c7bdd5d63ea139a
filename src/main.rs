//! Partisan CLI entrypoint.
//!
//! Usage:
//!   partisan resolve [--input tagged.json]
//!   partisan lookup <NAME> [--kind person]
//!   partisan score <AFFILIATION>
//!   partisan cache <list|get|remove>

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mimalloc::MiMalloc;

use partisan::{
    AffiliationCache, AffiliationScorer, Config, Entity, EntityKind, EntityLinker, LoadOutcome,
    TaggedSentence, WikiClient,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(
    name = "partisan",
    version,
    about = "Link named entities to political affiliations"
)]
struct Cli {
    /// Affiliation snapshot (overrides PARTISAN_CACHE_PATH)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Answer from the cache only; never query the knowledge source
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve entities in pre-tagged sentences (JSON array of chunk arrays)
    Resolve {
        /// Input file; reads stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Resolve a single entity by name
    Lookup {
        name: String,
        #[arg(long, value_enum, default_value_t = KindArg::Person)]
        kind: KindArg,
    },
    /// Print the lean value of an affiliation label
    Score { affiliation: String },
    /// Inspect or edit the affiliation snapshot
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print every record
    List,
    /// Print the record for one name
    Get { name: String },
    /// Delete the record for one name
    Remove { name: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Person,
    Organization,
    Gpe,
    Other,
}

impl From<KindArg> for EntityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Person => EntityKind::Person,
            KindArg::Organization => EntityKind::Organization,
            KindArg::Gpe => EntityKind::Gpe,
            KindArg::Other => EntityKind::Other,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.cache {
        config.cache_path = path;
    }
    config.offline |= cli.offline;
    config.validate()?;

    match cli.command {
        Commands::Score { affiliation } => {
            println!("{}", AffiliationScorer::new().score(Some(&affiliation)));
        }
        Commands::Cache { action } => run_cache(&config, action)?,
        Commands::Resolve { input } => {
            let raw = read_input(input.as_ref())?;
            let sentences: Vec<TaggedSentence> =
                serde_json::from_str(&raw).context("input is not a JSON array of sentences")?;

            let linker = build_linker(&config)?;
            let outcomes = linker.resolve_sentences(&sentences).await;
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        Commands::Lookup { name, kind } => {
            let linker = build_linker(&config)?;
            let outcome = linker
                .resolve_entity(&Entity::new(name, EntityKind::from(kind)))
                .await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn build_linker(config: &Config) -> anyhow::Result<EntityLinker> {
    let client = WikiClient::from_config(config)?;
    let (linker, outcome) = EntityLinker::from_config(config, Arc::new(client))?;
    log_load_outcome(&outcome);

    tracing::info!(
        cache = %config.cache_path.display(),
        entries = linker.cache().len(),
        candidate_limit = config.candidate_limit,
        filter = %config.candidate_filter,
        offline = config.offline,
        "Linker ready"
    );

    Ok(linker)
}

fn run_cache(config: &Config, action: CacheAction) -> anyhow::Result<()> {
    let (cache, outcome) = AffiliationCache::open(&config.cache_path)?;
    log_load_outcome(&outcome);

    match action {
        CacheAction::List => {
            let entries: serde_json::Map<String, serde_json::Value> = cache
                .entries()
                .into_iter()
                .map(|(key, record)| Ok((key, serde_json::to_value(record)?)))
                .collect::<Result<_, serde_json::Error>>()?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        CacheAction::Get { name } => match cache.record(&name) {
            Some(record) => println!("{}", serde_json::to_string(&record)?),
            None => anyhow::bail!("no record for '{name}'"),
        },
        CacheAction::Remove { name } => match cache.remove(&name)? {
            Some(_) => println!("Removed '{name}'"),
            None => anyhow::bail!("no record for '{name}'"),
        },
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn log_load_outcome(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded { entries, skipped } => {
            tracing::debug!(entries, skipped, "Affiliation snapshot loaded");
        }
        LoadOutcome::Created => tracing::info!("Created empty affiliation snapshot"),
        LoadOutcome::Recovered { backup } => tracing::warn!(
            backup = %backup.display(),
            "Affiliation snapshot was corrupt; moved aside and started empty"
        ),
    }
}
