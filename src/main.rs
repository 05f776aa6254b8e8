//! Graph-Crawler main entry point
//!
//! This is the command-line interface for the Graph-Crawler directory
//! discovery crawler.

use anyhow::Context;
use clap::Parser;
use graph_crawler::config::{load_config_with_hash, validate, Config};
use graph_crawler::crawler::run_crawl;
use graph_crawler::endpoint::TemplateTable;
use graph_crawler::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Graph-Crawler: breadth-first discovery of a REST directory graph
///
/// Graph-Crawler fetches a fixed set of root endpoints, pulls resource
/// identifiers out of every response and follows them into child endpoints,
/// round by round, until nothing new is discovered. Every response is saved
/// as a JSON document under the output directory.
#[derive(Parser, Debug)]
#[command(name = "graph-crawler")]
#[command(version)]
#[command(about = "Breadth-first discovery crawler for directory APIs", long_about = None)]
struct Cli {
    /// Bearer token sent with every request
    #[arg(value_name = "TOKEN")]
    token: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Root directory for saved responses (overrides the config file)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Base URL of the API (overrides the config file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without making requests
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            (Config::default(), None)
        }
    };

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }
    validate(&config).context("Invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(&config, &cli.token, config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("graph_crawler=info,warn"),
            1 => EnvFilter::new("graph_crawler=debug,info"),
            2 => EnvFilter::new("graph_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective catalog and output location
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let table = TemplateTable::from_catalog(config.catalog.as_ref())
        .context("Invalid endpoint catalog")?;

    println!("=== Graph-Crawler Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  User agent: {}", config.api.user_agent);

    println!("\nCrawler Configuration:");
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  Connect timeout: {}s", config.crawler.connect_timeout_secs);
    match config.crawler.max_concurrent_requests {
        Some(limit) => println!("  Max concurrent requests: {}", limit),
        None => println!("  Max concurrent requests: unbounded"),
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Summary: {}", config.output.summary_file);

    println!("\nRoot Endpoints ({}):", table.roots().len());
    for root in table.roots() {
        let marker = if root.is_concrete() { "" } else { " (unresolved, skipped)" };
        println!("  - {}{}", root, marker);
    }

    let types: Vec<_> = table.resource_types().collect();
    println!("\nChild Templates ({} resource types):", types.len());
    for resource_type in types {
        let templates = table.templates(resource_type);
        println!("  - {} ({} templates)", resource_type, templates.len());
        for template in templates {
            println!("    * {}", template);
        }
    }

    println!("\nBindings ({}):", table.bindings().len());
    for (name, value) in table.bindings() {
        println!("  - {{{}}} = {}", name, value);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} root endpoints",
        table.roots().iter().filter(|r| r.is_concrete()).count()
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    token: &str,
    config_hash: Option<String>,
) -> anyhow::Result<()> {
    match run_crawl(config, token, config_hash).await {
        Ok(stats) => {
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
