use std::path::{Path, PathBuf};

use essay_format::Config;
use tracing::instrument;

use super::terminal::Colorize;

const DEFAULT_PATH: &str = "essay.toml";

#[derive(Debug, clap::Parser)]
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Write a configuration file with default values
    Init {
        /// Where to write the file (defaults to --config, then essay.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the configuration in effect
    Show,
}

impl Command {
    #[instrument]
    pub fn run(self, config: Option<&Path>) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Init { path, force } => {
                let path = path
                    .or_else(|| config.map(Path::to_path_buf))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PATH));
                Self::init(&path, force)
            }
            ConfigCommand::Show => Self::show(config),
        }
    }

    fn init(path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }

        Config::default()
            .save(path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        println!("Created {}", path.display());
        Ok(())
    }

    fn show(path: Option<&Path>) -> anyhow::Result<()> {
        let config = path.map_or_else(
            || Ok(Config::default()),
            |path| Config::load(path).map_err(|e| anyhow::anyhow!("{e}")),
        )?;

        println!("Configuration:");
        println!("  fallback_name: {}", config.fallback_name());
        println!(
            "  name_length: {} {}",
            config.name_length(),
            "(characters)".dim()
        );
        if path.is_none() {
            println!("{}", "(defaults, no configuration file given)".dim());
        }
        Ok(())
    }
}
