use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use folio_tui::pipeline::{self, detect_terminal_size};
use folio_tui::{App, AppConfig, PortfolioContent, Result};

/// Terminal portfolio viewer.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// TOML file replacing the built-in portfolio content
    #[arg(long, value_name = "FILE")]
    content: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Theme preset (portfolio, terminal)
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective content as TOML and exit
    #[arg(long)]
    dump: bool,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if cli.content.is_some() {
        config.content = cli.content.clone();
    }
    if cli.theme.is_some() {
        config.theme = cli.theme.clone();
    }
    if cli.log_file.is_some() {
        config.logging.file = cli.log_file.clone();
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(path) = &config.logging.file {
        folio_tui::logging::init_file_logger(path, cli.verbose, config.logging.filter.as_deref())?;
    }
    debug!(?config, "configuration loaded");

    let content = match &config.content {
        Some(path) => PortfolioContent::load_from_file(path)?,
        None => PortfolioContent::default(),
    };

    if cli.dump {
        print!("{}", content.to_toml()?);
        return Ok(());
    }

    let (width, height) = detect_terminal_size();
    let title = content.hero.name.clone();
    let mut app = App::new(content, config, width, height)?;
    info!(width, height, "starting");

    let mut handle = pipeline::mount(&title)?;
    let result = pipeline::run(&mut handle, &mut app);
    handle.unmount()?;
    result?;

    info!("bye");
    Ok(())
}
