use std::path::{Path, PathBuf};

mod config;
mod export;
mod import;
mod terminal;

use clap::ArgAction;
use essay_format::{Config, EssayFormat};

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run(self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the converted output
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Convert a text file of essay questions into question records
    ///
    /// Each line holds one question: the text before the first period is
    /// the name, the rest is the question. Lines without a period are
    /// ignored.
    Import(import::Command),

    /// Write question records out as lines of text
    ///
    /// Only essay questions are written.
    Export(export::Command),

    /// Manage the configuration file
    Config(config::Command),
}

impl Command {
    fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self {
            Self::Import(command) => command.run(&load_format(config)?)?,
            Self::Export(command) => command.run(&load_format(config)?)?,
            Self::Config(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Build the essay format from the configuration file, if one was given.
fn load_format(path: Option<&Path>) -> anyhow::Result<EssayFormat> {
    let config = path.map_or_else(
        || Ok(Config::default()),
        |path| Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
    )?;
    tracing::debug!(?config, "loaded configuration");
    Ok(EssayFormat::new(config))
}
