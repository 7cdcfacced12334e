use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fullpage_core::{AppConfig, EasingType, PageOverrides};

mod commands;

#[derive(Parser)]
#[command(name = "fullpage")]
#[command(author, version, about = "Present a deck of full-screen sections in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Page options that override the config file for one run
#[derive(Args, Debug, Clone, Default)]
struct PageArgs {
    /// Container to present (`fp`, `.fp` and `#fp` are equivalent)
    #[arg(short = 'c', long)]
    container: Option<String>,
    /// Transition duration in seconds
    #[arg(short = 'd', long)]
    duration: Option<f64>,
    /// Section to show first (0-based)
    #[arg(short = 's', long)]
    start: Option<usize>,
    /// Hide the navigation dots
    #[arg(long)]
    no_nav: bool,
    /// Slide easing: none, linear, cubic, quintic, ease-out
    #[arg(short = 'e', long)]
    easing: Option<EasingType>,
}

impl PageArgs {
    fn overrides(&self) -> PageOverrides {
        PageOverrides {
            container: self.container.clone(),
            animation_duration_secs: self.duration,
            show_navigation: self.no_nav.then_some(false),
            start_index: self.start,
            easing: self.easing,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Present a deck in the terminal
    Run {
        /// Deck file (sections separated by `---` lines)
        deck: PathBuf,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Parse a deck and list its sections
    Check {
        deck: PathBuf,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Drive the transition engine headlessly and print JSON snapshots
    Simulate {
        deck: PathBuf,
        #[command(flatten)]
        page: PageArgs,
        /// Steps: fwd|+, back|-, wait:SECS, at:SECS, jump:N, resize:WxH
        #[arg(long)]
        script: String,
        /// Viewport width in cells
        #[arg(long, default_value_t = 80)]
        width: u16,
        /// Viewport height in cells
        #[arg(long, default_value_t = 24)]
        height: u16,
        /// Pretty-print each snapshot
        #[arg(long)]
        pretty: bool,
    },
    /// Write the default config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Install the tracing subscriber; the TUI logs to a file so output does not
/// tear the alternate screen
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    init_logging(&config, matches!(cli.command, Commands::Run { .. }))?;

    match cli.command {
        Commands::Run { deck, page } => {
            let page = page.overrides().apply(&config.page);
            commands::run::run(config, deck, page).await
        }
        Commands::Check { deck, page } => {
            let page = page.overrides().apply(&config.page);
            commands::check::run(&config, &deck, &page).await
        }
        Commands::Simulate {
            deck,
            page,
            script,
            width,
            height,
            pretty,
        } => {
            let page = page.overrides().apply(&config.page);
            let options = commands::simulate::Options {
                script,
                width,
                height,
                pretty,
            };
            commands::simulate::run(&config, &deck, &page, options).await
        }
        Commands::InitConfig { force } => commands::init_config::run(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "fullpage", "run", "deck.md", "--duration", "0.5", "--start", "2", "--no-nav", "-e",
            "linear",
        ])
        .unwrap();
        let Commands::Run { deck, page } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(deck, PathBuf::from("deck.md"));

        let merged = page.overrides().apply(&fullpage_core::PageConfig::default());
        assert_eq!(merged.animation_duration_secs, 0.5);
        assert_eq!(merged.start_index, 2);
        assert!(!merged.show_navigation);
        assert_eq!(merged.easing, EasingType::Linear);
        assert_eq!(merged.container, "fp");
    }

    #[test]
    fn test_without_no_nav_config_value_is_kept() {
        let overrides = PageArgs::default().overrides();
        assert_eq!(overrides.show_navigation, None);
    }

    #[test]
    fn test_cli_rejects_unknown_easing() {
        assert!(Cli::try_parse_from(["fullpage", "run", "deck.md", "-e", "bounce"]).is_err());
    }
}
