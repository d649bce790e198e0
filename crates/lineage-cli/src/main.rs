//! Lineage CLI - cross-collection record search

use clap::{Parser, Subcommand};
use lineage_core::api::{self, AppState};
use lineage_core::config::Config;
use lineage_core::domain::correlation::{
    MatchSettings, RelatedRecordCandidate, SearchTerms, SettingsStore, SqliteSettingsStore,
};
use lineage_core::domain::registry::CollectionRegistry;
use lineage_core::domain::search::{SearchRequest, SearchResponse};
use lineage_core::storage::{Database, DatabaseConfig};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "lineage")]
#[command(author, version, about = "Cross-collection search for historical records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Search every collection
    Search {
        /// Text to look for
        query: String,
        /// Maximum results
        #[arg(short, long)]
        limit: Option<u32>,
        /// Also collect autocomplete suggestions
        #[arg(short, long)]
        suggest: bool,
    },

    /// Show records related to one record
    Related {
        /// Collection id or slug
        collection: String,
        /// Record id
        id: String,
        #[arg(short, long)]
        limit: Option<u32>,
        /// Match on this name instead of the record's own
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        enslaver: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },

    /// List registered collections
    Collections,

    /// Related-records matching settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,
    /// Change one setting
    Set { key: String, value: String },
    /// Drop stored settings and fall back to defaults
    Reset,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lineage=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        if let Some(hint) = err
            .downcast_ref::<lineage_core::Error>()
            .and_then(|e| e.suggestion())
        {
            eprintln!("hint: try `{}`", hint);
        }
        return Err(err);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve { bind } => cmd_serve(bind).await,

        Commands::Search {
            query,
            limit,
            suggest,
        } => cmd_search(query, limit, suggest, cli.format, cli.quiet).await,

        Commands::Related {
            collection,
            id,
            limit,
            name,
            location,
            enslaver,
            date,
        } => {
            let terms = SearchTerms {
                name,
                location,
                enslaver,
                date,
            };
            cmd_related(&collection, &id, limit, &terms, cli.format, cli.quiet).await
        }

        Commands::Collections => cmd_collections(cli.format, cli.quiet),

        Commands::Settings { action } => cmd_settings(action, cli.format, cli.quiet).await,

        Commands::Config { action } => cmd_config(action, cli.quiet),

        Commands::Doctor => cmd_doctor(cli.quiet).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn open_database(config: &Config) -> anyhow::Result<Database> {
    Database::new(DatabaseConfig::from_config(config)).await
}

async fn cmd_serve(bind: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    config.validate()?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Shutting down");
        on_signal.cancel();
    });

    api::serve(&config, shutdown).await
}

async fn cmd_search(
    query: String,
    limit: Option<u32>,
    suggest: bool,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let state = AppState::from_config(&config).await?;

    let request = SearchRequest {
        query,
        limit,
        suggest,
    };
    let response = state
        .search
        .search(&request, &CancellationToken::new())
        .await?;

    match format {
        OutputFormat::Json => print_json(&response),
        OutputFormat::Text => {
            print_search(&response, quiet);
            Ok(())
        }
    }
}

fn print_search(response: &SearchResponse, quiet: bool) {
    if let Some(message) = &response.message {
        if !quiet {
            println!("{}", message);
        }
        return;
    }

    if response.results.is_empty() && !quiet {
        println!("No records match '{}'.", response.query);
    }
    for result in &response.results {
        if quiet {
            println!("{}\t{}", result.collection.slug, result.identifier);
        } else {
            println!(
                "{:<30} {:<34} {}",
                result.identifier, result.collection.display_name, result.snippet
            );
        }
    }

    if quiet {
        return;
    }
    if !response.suggestions.is_empty() {
        println!("\nSuggestions: {}", response.suggestions.join(", "));
    }
    for error in &response.errors {
        println!("[!!] {}: {}", error.collection, error.message);
    }
    println!("\n{} result(s)", response.total);
}

async fn cmd_related(
    collection: &str,
    id: &str,
    limit: Option<u32>,
    terms: &SearchTerms,
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let state = AppState::from_config(&config).await?;
    let limit = config.search.effective_limit(limit);

    let correlation = state
        .correlation
        .correlate(id, collection, terms, limit, &CancellationToken::new())
        .await?;

    if format == OutputFormat::Json {
        return print_json(&correlation);
    }

    if correlation.related.is_empty() {
        if !quiet {
            println!("No related records for '{}'.", id);
        }
        return Ok(());
    }
    for candidate in &correlation.related {
        print_candidate(candidate, quiet);
    }
    if !quiet && !correlation.settings_explicit {
        println!("\n(using default matching settings)");
    }
    Ok(())
}

fn print_candidate(candidate: &RelatedRecordCandidate, quiet: bool) {
    if quiet {
        println!("{}\t{}", candidate.target_collection, candidate.id);
        return;
    }

    let marker = match (candidate.featured, candidate.is_admin_curated()) {
        (true, _) => "*",
        (false, true) => "+",
        (false, false) => " ",
    };
    let score = candidate
        .score
        .map(|s| format!("[{}]", s))
        .unwrap_or_default();
    println!(
        "{} {:<30} {:<20} {:>6} {}",
        marker, candidate.name, candidate.target_collection, score, candidate.detail
    );
    if let Some(badge) = &candidate.custom_badge {
        println!("    badge: {}", badge);
    }
}

fn cmd_collections(format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let registry = CollectionRegistry::load_or_builtin(config.registry.path.as_deref())?;

    if format == OutputFormat::Json {
        let summaries: Vec<_> = registry
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "slug": c.slug,
                    "display_name": c.display_name,
                    "table": c.table,
                })
            })
            .collect();
        return print_json(&summaries);
    }

    for collection in registry.iter() {
        if quiet {
            println!("{}", collection.slug);
        } else {
            println!("{:<32} {}", collection.slug, collection.display_name);
        }
    }
    if !quiet {
        println!("\n{} collection(s)", registry.len());
    }
    Ok(())
}

async fn cmd_settings(action: SettingsAction, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let db = open_database(&config).await?;
    let store = SqliteSettingsStore::new(db.pool().clone());

    match action {
        SettingsAction::Show => {
            let (settings, explicit) = store.load().await?;
            match format {
                OutputFormat::Json => print_json(&settings)?,
                OutputFormat::Text => {
                    for (key, value) in settings.list() {
                        println!("{} = {}", key, value);
                    }
                    if !quiet && !explicit {
                        println!("\n(defaults; nothing stored yet)");
                    }
                }
            }
        }
        SettingsAction::Set { key, value } => {
            let (mut settings, _) = store.load().await?;
            settings.set(&key, &value)?;
            store.save(&settings).await?;
            if !quiet {
                println!("Set {} = {}", key, settings.get(&key)?);
            }
        }
        SettingsAction::Reset => {
            let existed = store.reset().await?;
            if !quiet {
                if existed {
                    println!("Matching settings reset to defaults.");
                } else {
                    println!("No stored settings; defaults already apply.");
                }
                for (key, value) in MatchSettings::defaults().list() {
                    println!("  {} = {}", key, value);
                }
            }
        }
    }

    db.close().await;
    Ok(())
}

fn cmd_config(action: ConfigAction, quiet: bool) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            if !quiet {
                println!("Set {} = {}", key, value);
            }
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            for (key, value) in items {
                println!("{} = {}", key, value);
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            if !quiet {
                println!("Configuration reset to defaults.");
            }
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(quiet: bool) -> anyhow::Result<()> {
    if !quiet {
        println!("Lineage Health Check");
        println!("====================");
        println!();
    }

    let mut all_ok = true;

    let config = match Config::load() {
        Ok(config) => {
            if !quiet {
                println!("[OK] Configuration: Valid");
            }
            config
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Configuration: Error - {:#}", e);
            }
            Config::default()
        }
    };

    if !quiet {
        match Config::config_path() {
            Ok(path) if path.exists() => println!("[OK] Config file: {}", path.display()),
            Ok(path) => println!("[--] Config file: {} (using defaults)", path.display()),
            Err(e) => println!("[!!] Config file: Error - {}", e),
        }
    }

    let registry = match CollectionRegistry::load_or_builtin(config.registry.path.as_deref()) {
        Ok(registry) => {
            if !quiet {
                println!(
                    "[OK] Collections: {} registered, {} cross-referenced",
                    registry.len(),
                    registry.cross_referenced().count()
                );
            }
            Some(registry)
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Collections: {}", e);
            }
            None
        }
    };

    // Diagnose without migrating; `serve` applies pending migrations
    match Database::new(DatabaseConfig::from_config(&config).no_migrate()).await {
        Ok(db) => {
            match db.health_check().await {
                Ok(()) => {
                    if !quiet {
                        println!("[OK] Database: Connected");
                        println!("     Path: {}", db.path().display());
                    }
                    match db.migration_status().await {
                        Ok(status) if status.needs_migration => {
                            if !quiet {
                                println!(
                                    "[--] Database: Migrations pending (v{} -> v{}), applied on next start",
                                    status.current_version, status.target_version
                                );
                            }
                        }
                        Ok(status) => {
                            if !quiet {
                                println!("[OK] Database: Schema v{}", status.current_version);
                            }
                        }
                        Err(e) => {
                            all_ok = false;
                            if !quiet {
                                println!("[!!] Database: Migration check failed - {:#}", e);
                            }
                        }
                    }
                    if let Some(registry) = &registry {
                        let tables = registry.iter().map(|c| c.table.as_str());
                        match db.missing_tables(tables).await {
                            Ok(missing) if missing.is_empty() => {
                                if !quiet {
                                    println!("[OK] Archive tables: all {} present", registry.len());
                                }
                            }
                            Ok(missing) => {
                                if !quiet {
                                    println!(
                                        "[--] Archive tables: {} of {} not loaded ({})",
                                        missing.len(),
                                        registry.len(),
                                        missing.join(", ")
                                    );
                                }
                            }
                            Err(e) => {
                                all_ok = false;
                                if !quiet {
                                    println!("[!!] Archive tables: {:#}", e);
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    all_ok = false;
                    if !quiet {
                        println!("[!!] Database: Health check failed - {:#}", e);
                    }
                }
            }
            db.close().await;
        }
        Err(e) => {
            all_ok = false;
            if !quiet {
                println!("[!!] Database: Failed to open - {:#}", e);
            }
        }
    }

    if !quiet {
        println!();
        if all_ok {
            println!("All checks passed!");
        } else {
            println!("Some checks failed. See above for details.");
        }
    }

    Ok(())
}
