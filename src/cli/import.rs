use std::{io, path::PathBuf};

use anyhow::Context;
use essay_format::{EssayFormat, QuestionFormat, QuestionRecord, import_text, storage};
use tracing::instrument;

use super::terminal::{Colorize, is_narrow};

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Text file to read, one question per line
    file: PathBuf,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Save the records to a JSON file instead of printing them
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Command {
    #[instrument(level = "debug", skip(format))]
    pub fn run(self, format: &EssayFormat) -> anyhow::Result<()> {
        anyhow::ensure!(format.provides_import(), "this format cannot import questions");

        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;
        let questions = import_text(format, &text);

        if let Some(path) = &self.save {
            essay_format::write_records(path, &questions)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Imported {} question(s) to {}",
                questions.len(),
                path.display()
            );
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => storage::write(&mut io::stdout().lock(), &questions)?,
            OutputFormat::Table => self.output_table(&questions),
        }
        Ok(())
    }

    fn output_table(&self, questions: &[QuestionRecord]) {
        if questions.is_empty() {
            println!(
                "{}",
                format!("No questions found in {}.", self.file.display()).warning()
            );
            return;
        }

        let narrow = is_narrow();
        let width = questions
            .iter()
            .map(|question| question.name().chars().count())
            .max()
            .unwrap_or(0);

        for question in questions {
            let name = question.name();
            if narrow {
                println!("{}", name.success());
            } else {
                let padding = " ".repeat(width - name.chars().count());
                println!(
                    "{}{padding}  {}",
                    name.success(),
                    question.question_text()
                );
            }
        }

        println!();
        println!("{}", format!("{} question(s)", questions.len()).dim());
    }
}
