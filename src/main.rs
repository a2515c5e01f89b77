use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use resultsync::{
    config::{ConfigLoader, RunSettings, defaults},
    driver::Driver,
    publish::{GitHubStore, Publisher},
    scrapers::registry::ScraperRegistry,
};

#[derive(Parser)]
#[command(name = "resultsync")]
#[command(about = "Scrape the latest result line of each configured source and commit it to GitHub", long_about = None)]
struct Cli {
    /// Path to the YAML source list
    #[arg(value_name = "CONFIG", default_value = defaults::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Repository receiving the result files (owner/name)
    #[arg(long, env = defaults::REPOSITORY_ENV, default_value = defaults::DEFAULT_REPOSITORY)]
    repo: String,

    /// Branch to commit to (repository default when omitted)
    #[arg(long)]
    branch: Option<String>,

    /// GitHub API base URL
    #[arg(long, default_value = defaults::DEFAULT_GITHUB_API)]
    api_base: String,

    /// Validate config and exit (don't scrape)
    #[arg(long)]
    validate: bool,

    /// Scrape and log result lines without publishing
    #[arg(long)]
    dry_run: bool,

    /// Don't commit when a result file already holds the scraped line
    #[arg(long)]
    skip_unchanged: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "resultsync=debug,info" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Local runs may keep GH_PAT in .env; scheduled runs set it directly
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = RunSettings::default()
        .with_config_path(cli.config)
        .with_repository(cli.repo)
        .with_branch(cli.branch)
        .with_api_base(cli.api_base)
        .with_token(std::env::var(defaults::TOKEN_ENV).ok())
        .with_dry_run(cli.dry_run)
        .with_skip_unchanged(cli.skip_unchanged);

    tracing::info!(path = ?settings.config_path, "loading config");
    let sources = match ConfigLoader::load_from_file(&settings.config_path) {
        Ok(sources) => sources,
        Err(e) => {
            tracing::error!("failed to load config: {}", e);
            for cause in e.chain().skip(1) {
                tracing::error!("  caused by: {}", cause);
            }
            std::process::exit(1);
        }
    };
    tracing::info!(sources = sources.len(), "config is valid");

    let registry = ScraperRegistry::with_defaults();

    if cli.validate {
        println!("Scrapers: {}", registry.list_scrapers().join(", "));
        println!("Sources:");
        for source in &sources {
            let note = match registry.get(source.kind.name()) {
                Some(_) => "",
                None => "  [unknown kind, will be skipped]",
            };
            println!(
                "  - {} ({}) -> {}{}",
                source.name,
                source.kind.name(),
                source.target_file,
                note
            );
        }
        println!("\n✓ Configuration is valid!");
        return Ok(());
    }

    let publisher = if settings.dry_run {
        None
    } else {
        match GitHubStore::from_settings(&settings) {
            Ok(store) => Some(
                Publisher::new(Box::new(store)).with_skip_unchanged(settings.skip_unchanged),
            ),
            Err(e) => {
                tracing::error!(
                    env = defaults::TOKEN_ENV,
                    error = %e,
                    "GitHub token not set, results will not be published"
                );
                None
            }
        }
    };

    let driver = Driver::new(registry, publisher)
        .with_dry_run(settings.dry_run);
    let report = driver.run(&sources).await;

    // Per-source failures are reported in the log only; the run itself succeeded
    if report.failed > 0 {
        tracing::warn!(failed = report.failed, total = report.total(), "some sources failed");
    }

    Ok(())
}
