use std::{io::Write, path::PathBuf};

use anyhow::Context;
use essay_format::{EssayFormat, QuestionFormat, export_questions, read_records};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// JSON file of question records
    file: PathBuf,

    /// Write the exported text here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    out: Option<PathBuf>,
}

impl Command {
    #[instrument(level = "debug", skip(format))]
    pub fn run(self, format: &EssayFormat) -> anyhow::Result<()> {
        anyhow::ensure!(format.provides_export(), "this format cannot export questions");

        let questions = read_records(&self.file)
            .with_context(|| format!("failed to load {}", self.file.display()))?;
        let exported = export_questions(format, &questions);

        match &self.out {
            Some(path) => std::fs::write(path, &exported.text)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => std::io::stdout().lock().write_all(exported.text.as_bytes())?,
        }

        // Keep stdout clean for the exported text.
        eprintln!(
            "{}",
            format!("Exported {} question(s)", exported.written).success()
        );
        if exported.skipped > 0 {
            eprintln!(
                "{}",
                format!("Skipped {} non-essay question(s)", exported.skipped).warning()
            );
        }
        Ok(())
    }
}
