use anyhow::Context;
use clap::Parser;
use ir35_core::RoleProfile;
use tracing::{debug, info};

use ir35_cli::app::{self, Settings};
use ir35_cli::cli::Cli;
use ir35_cli::config::AppConfig;
use ir35_cli::logging::init_logging;
use ir35_cli::report;

// ─── config ──────────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let log_level = cli.log_level.as_deref().or(config.logging.level.as_deref());
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    init_logging(log_level, log_file)?;
    debug!(?cli, "parsed arguments");

    if cli.list_roles {
        print!("{}", report::render_roles(&RoleProfile::all()));
        return Ok(());
    }

    let settings = Settings::resolve(&cli, &config)?;
    info!(tax_year = %settings.rates.tax_year, "calculating take-home pay");

    print!("{}", app::run(&settings)?);

    Ok(())
}
