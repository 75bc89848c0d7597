use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use finder_common::observability::{LogConfig, init_logging};
use finder_config::{FinderConfig, FinderConfigLoader, LoggingConfig};
use finder_scrape::registry::ScraperRegistry;
use std::path::{Path, PathBuf};

mod cli;
mod writer;

const DEFAULT_CONFIG_FILE: &str = "finder.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file)
    let cfg = load_config(cli.config.as_deref())?;

    // 2) Logging from the config's logging block
    let log_path = init_logging(log_config(&cfg.logging)?)?;
    tracing::debug!(target: "importer", file = %log_path.display(), "importer.logging.ready");

    match run(&cli, &cfg).await {
        Ok(written) => {
            tracing::info!(
                target: "importer",
                scraper = %cli.scraper,
                page = %cli.page,
                records = written.len(),
                "importer.done"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(
                target: "importer",
                scraper = %cli.scraper,
                page = %cli.page,
                error = format!("{err:#}"),
                "importer.error"
            );
            Err(err)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<FinderConfig> {
    let loader = match explicit {
        Some(path) => FinderConfigLoader::new().with_file(path),
        None => FinderConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().context("loading configuration")
}

fn log_config(logging: &LoggingConfig) -> Result<LogConfig> {
    Ok(LogConfig {
        app_name: "finder-importer",
        log_dir: logging.dir.clone(),
        emit_stderr: logging.emit_stderr,
        format: logging.format.parse()?,
        default_filter: logging.level.clone(),
    })
}

/// Select the scraper, run it for the page, write the records.
async fn run(cli: &Cli, cfg: &FinderConfig) -> Result<Vec<PathBuf>> {
    let info_dir = cli
        .info
        .clone()
        .or_else(|| cfg.info_dir.clone())
        .context("no output directory: pass --info or set info_dir in the config")?;

    let registry = ScraperRegistry::from_config(cfg);
    let scraper = registry.build(&cli.scraper)?;

    tracing::info!(
        target: "importer",
        scraper = %cli.scraper,
        page = %cli.page,
        info_dir = %info_dir.display(),
        "importer.scrape.start"
    );
    let contents = scraper
        .scrape(&cli.page)
        .await
        .with_context(|| format!("scraping {:?} with {}", cli.page, cli.scraper))?;

    writer::write_contents(&info_dir, &contents)
}
