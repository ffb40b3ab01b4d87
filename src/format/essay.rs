use tracing::instrument;

use crate::{
    domain::{Config, QuestionRecord},
    format::{ExportSettings, QuestionFormat},
    text::{
        PlainTextOptions, QuoteMode, default_question_name, html_escape, plain_text, trim_blanks,
    },
};

/// The essay line format.
///
/// Each line holds one essay question. The text before the first period is
/// the question name and the rest of the line is the question:
///
/// ```text
/// One. Explain how a curtain rod works.
/// Two. In 100 words or less explain the purpose of a door
/// ```
///
/// Lines without a period are ignored.
#[derive(Debug, Clone, Default)]
pub struct EssayFormat {
    config: Config,
}

impl EssayFormat {
    /// Create the format with the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The format's configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Read one line, if it holds a question.
    fn read_line(&self, line: &str) -> Option<QuestionRecord> {
        let (name, prompt) = line.split_once('.')?;

        let name = default_question_name(
            name,
            self.config.fallback_name(),
            self.config.name_length(),
        );
        let question_text = html_escape(trim_blanks(prompt), QuoteMode::NoQuotes);

        Some(QuestionRecord::essay(name, question_text))
    }
}

impl QuestionFormat for EssayFormat {
    fn provides_import(&self) -> bool {
        true
    }

    fn provides_export(&self) -> bool {
        true
    }

    #[instrument(level = "debug", skip_all, fields(lines = lines.len()))]
    fn import_lines(&self, lines: &[&str]) -> Vec<QuestionRecord> {
        lines
            .iter()
            .filter_map(|line| self.read_line(line))
            .collect()
    }

    fn export_question(&self, question: &QuestionRecord) -> Option<String> {
        if !question.is_essay() {
            return None;
        }

        let text = plain_text(
            question.question_text(),
            question.question_text_format(),
            PlainTextOptions::INLINE,
        )
        .replace('\n', "");

        Some(format!("{}. {text}\n", question.name()))
    }

    /// Categories cannot be written in this format.
    fn export_preprocess(&self) -> ExportSettings {
        ExportSettings { categories: false }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{
        domain::{QuestionName, QuestionType, ResponseFormat, TextField, TextFormat},
        format::export_questions,
    };

    fn name(s: &str) -> QuestionName {
        QuestionName::try_from(s).unwrap()
    }

    fn import(lines: &[&str]) -> Vec<QuestionRecord> {
        EssayFormat::default().import_lines(lines)
    }

    #[test]
    fn imports_the_documented_example() {
        let questions = import(&[
            "One. Explain how a curtain rod works.",
            "Two. In 100 words or less explain the purpose of a door",
        ]);

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].name().as_str(), "One");
        assert_eq!(
            questions[0].question_text(),
            "Explain how a curtain rod works."
        );
        assert_eq!(questions[1].name().as_str(), "Two");
        assert_eq!(
            questions[1].question_text(),
            "In 100 words or less explain the purpose of a door"
        );
    }

    #[test]
    fn imported_questions_are_essays_with_fixed_settings() {
        let questions = import(&["Q. Why?"]);
        let question = &questions[0];

        assert_eq!(question.qtype(), &QuestionType::Essay);
        assert_eq!(question.question_text_format(), TextFormat::Html);
        assert_eq!(question.response_format(), ResponseFormat::Editor);
        assert!(question.response_required());
        assert_eq!(question.response_field_lines(), 15);
        assert_eq!(question.attachments(), 0);
        assert_eq!(question.attachments_required(), 0);
        assert_eq!(question.grader_info(), &TextField::empty());
        assert_eq!(question.response_template(), &TextField::empty());
        assert_eq!(question.general_feedback(), &TextField::empty());
        assert!(question.answer().is_empty());
        assert!(question.fraction().is_empty());
        assert!(question.feedback().is_empty());
        assert_eq!(question.category(), None);
    }

    #[test_case("Two. body", "Two", "body"; "simple")]
    #[test_case("a.b.c", "a", "b.c"; "split at first period only")]
    #[test_case("  Name  .   padded   ", "Name", "padded"; "trimmed")]
    #[test_case("x. 5 < 10 & true", "x", "5 &lt; 10 &amp; true"; "escaped")]
    #[test_case(r#"x. "quoted" isn't"#, "x", r#""quoted" isn't"#; "quotes left alone")]
    #[test_case("x.", "x", ""; "empty body")]
    #[test_case("x.\u{a0}kept\u{a0}", "x", "\u{a0}kept\u{a0}"; "no-break spaces kept")]
    #[test_case("x. body\0\x0B", "x", "body"; "nul and vertical tab trimmed")]
    #[test_case(". no name", "Question name", "no name"; "empty name falls back")]
    #[test_case("   . blank name", "Question name", "blank name"; "blank name falls back")]
    fn line_parsing(line: &str, expected_name: &str, expected_text: &str) {
        let questions = import(&[line]);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].name().as_str(), expected_name);
        assert_eq!(questions[0].question_text(), expected_text);
    }

    #[test]
    fn lines_without_a_period_are_skipped() {
        let lines = [
            "",
            "no separator here",
            "First. kept",
            "   ",
            "Second. also kept",
            "still nothing",
        ];

        let questions = import(&lines);

        let with_period = lines.iter().filter(|line| line.contains('.')).count();
        assert_eq!(questions.len(), with_period);
        let names: Vec<_> = questions.iter().map(|q| q.name().as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn fallback_name_comes_from_config() {
        let mut config = Config::default();
        config.set_fallback_name(name("Essay"));
        let format = EssayFormat::new(config);

        let questions = format.import_lines(&[". body"]);

        assert_eq!(questions[0].name().as_str(), "Essay");
    }

    #[test]
    fn long_names_are_shortened() {
        let mut config = Config::default();
        config.set_name_length(10);
        let format = EssayFormat::new(config);

        let questions = format.import_lines(&["A rather long name. body"]);

        assert_eq!(questions[0].name().as_str(), "A...");
    }

    #[test]
    fn exports_one_line() {
        let question = QuestionRecord::essay(
            name("Two"),
            "In 100 words or less explain the purpose of a door".to_string(),
        );

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("Two. In 100 words or less explain the purpose of a door\n")
        );
    }

    #[test]
    fn export_deletes_newlines() {
        let question = QuestionRecord::essay(name("N"), "line1\nline2".to_string());

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("N. line1line2\n")
        );
    }

    #[test]
    fn export_flattens_html() {
        let question = QuestionRecord::essay(
            name("H"),
            "<p>5 &lt; 10 &amp; <b>true</b></p>".to_string(),
        );

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("H. 5 < 10 & true\n")
        );
    }

    #[test]
    fn export_decodes_named_entities() {
        let question =
            QuestionRecord::essay(name("N"), "caf&eacute; &ndash; it&rsquo;s".to_string());

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("N. café – it’s\n")
        );
    }

    #[test]
    fn export_drops_markup_attributes_and_comments() {
        let question = QuestionRecord::essay(
            name("N"),
            "<!-- x > y --><p>Hi<style>p{color:red}</style></p><p>there</p>".to_string(),
        );

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("N. Hi there\n")
        );
    }

    #[test]
    fn export_keeps_plain_text_verbatim() {
        let question = QuestionRecord::new(
            QuestionType::Essay,
            name("P"),
            "a <b> & c\r\nd".to_string(),
            TextFormat::Plain,
        );

        assert_eq!(
            EssayFormat::default().export_question(&question).as_deref(),
            Some("P. a <b> & c\rd\n")
        );
    }

    #[test]
    fn other_question_types_are_not_exported() {
        let question = QuestionRecord::new(
            QuestionType::Other("multichoice".to_string()),
            name("M"),
            "Pick one".to_string(),
            TextFormat::Html,
        );

        assert_eq!(EssayFormat::default().export_question(&question), None);
    }

    #[test]
    fn categories_are_disabled() {
        let format = EssayFormat::default();

        assert!(!format.export_preprocess().categories);
        assert!(format.provides_import());
        assert!(format.provides_export());
    }

    #[test]
    fn category_markers_are_never_written() {
        let questions = [
            QuestionRecord::essay(name("A"), "first".to_string()).with_category("Doors"),
            QuestionRecord::essay(name("B"), "second".to_string()).with_category("Rods"),
        ];

        let exported = export_questions(&EssayFormat::default(), &questions);

        assert_eq!(exported.text, "A. first\nB. second\n");
    }

    #[test]
    fn import_then_export() {
        let format = EssayFormat::default();
        let questions = format.import_lines(&["Two. 5 < 10 & \"true\""]);

        let exported = export_questions(&format, &questions);

        assert_eq!(exported.text, "Two. 5 < 10 & \"true\"\n");
    }
}
