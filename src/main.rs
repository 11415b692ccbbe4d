use std::{fs, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use folio_tui::{
    config::{Overrides, Settings},
    content::{self, Portfolio},
    error::Result,
    state::{Outbox, ThemeMode},
    tui::{self, app::AppOptions},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Terminal portfolio with theme-driven autoplay carousels")]
struct Cli {
    /// Settings file (defaults to <config dir>/folio/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Content document (defaults to the built-in one)
    #[arg(long, global = true)]
    content: Option<PathBuf>,
    /// Starting theme: theatrical or tech
    #[arg(long, global = true)]
    theme: Option<ThemeMode>,
    /// Go straight to the page
    #[arg(long, global = true)]
    skip_intro: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Show the portfolio (default)
    View,
    /// Load the content and print what it contains
    Validate,
}

fn init_tracing(settings: &Settings) -> Result<()> {
    let path = settings.log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = fs::File::create(&path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio_tui=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn print_summary(portfolio: &Portfolio) {
    println!("{}: {}", portfolio.profile.name, portfolio.profile.tagline);
    for section in portfolio.summary() {
        println!("  {:<13}{:>3}", section.section, section.total);
        for (category, count) in &section.categories {
            println!("    {category:<15}{count:>3}");
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?.merge(Overrides {
        content: cli.content,
        theme: cli.theme,
        skip_intro: cli.skip_intro,
    });
    let portfolio = content::load(settings.content.as_deref())?;

    match cli.command.unwrap_or(Commands::View) {
        Commands::Validate => {
            print_summary(&portfolio);
            Ok(())
        }
        Commands::View => {
            init_tracing(&settings)?;
            let outbox = Outbox::new(settings.outbox_path(), portfolio.profile.email.clone());
            info!(outbox = %outbox.path().display(), "Contact messages spool to outbox");
            let options = AppOptions {
                theme: settings.theme.unwrap_or_default(),
                skip_intro: settings.skip_intro,
            };
            tui::run(portfolio, options, Arc::new(outbox)).await
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
