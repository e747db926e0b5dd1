//! scrollfx command line
//!
//! Runs the landing page headlessly against a simulated scroll and reports
//! what the effects did:
//! - `simulate` scrolls down the page at a fixed speed and prints a snapshot
//! - `bindings` lists every registered binding and its resolved range
//! - `config` prints the default configuration

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrollfx_page::{demo, PageConfig, PageRuntime};

#[derive(Parser)]
#[command(name = "scrollfx")]
#[command(author, version, about = "Scroll-driven landing page effects, headless")]
struct Cli {
    /// Configuration file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through the landing page and print the resulting state
    Simulate {
        /// Number of frames to run
        #[arg(long, default_value = "600")]
        frames: u32,

        /// Scroll speed in pixels per second
        #[arg(long, default_value = "1200")]
        scroll_speed: f32,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// List registered bindings with their scroll ranges
    Bindings {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the default configuration as TOML
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            frames,
            scroll_speed,
            fps,
            format,
        } => {
            anyhow::ensure!(fps > 0, "fps must be positive");
            let mut page = load_page(cli.config.as_deref())?;
            let run = report::simulate(&mut page, frames, scroll_speed, fps);
            match format {
                Format::Text => print!("{run}"),
                Format::Json => println!("{}", serde_json::to_string_pretty(&run)?),
            }
        }
        Commands::Bindings { format } => {
            let page = load_page(cli.config.as_deref())?;
            let bindings = report::bindings(&page);
            match format {
                Format::Text => {
                    for binding in &bindings {
                        println!("{binding}");
                    }
                }
                Format::Json => println!("{}", serde_json::to_string_pretty(&bindings)?),
            }
        }
        Commands::Config => {
            let config = match cli.config.as_deref() {
                Some(path) => load_config(path)?,
                None => PageConfig::default(),
            };
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<PageConfig> {
    PageConfig::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Build and initialize the landing page
fn load_page(config: Option<&Path>) -> Result<PageRuntime> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => PageConfig::default(),
    };
    let doc = demo::landing_document(config.viewport.viewport());
    let mut page = PageRuntime::new(doc, config);
    page.init();
    Ok(page)
}
