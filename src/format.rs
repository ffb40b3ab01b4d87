//! Question formats and the drivers that run them over whole files.
//!
//! A format converts between the lines of a text file and
//! [`QuestionRecord`]s. Reading files, storing questions and writing the
//! exported document belong to the caller.

use tracing::{debug, instrument};

use crate::domain::QuestionRecord;

/// The essay line format.
pub mod essay;
pub use essay::EssayFormat;

/// How a format wants an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSettings {
    /// Whether the exported file is segmented by question category.
    pub categories: bool,
}

/// A question format that can import and/or export questions.
pub trait QuestionFormat {
    /// Whether the format can read questions.
    fn provides_import(&self) -> bool {
        false
    }

    /// Whether the format can write questions.
    fn provides_export(&self) -> bool {
        false
    }

    /// Convert lines of text into questions, in input order.
    ///
    /// Lines the format cannot read are dropped.
    fn import_lines(&self, lines: &[&str]) -> Vec<QuestionRecord>;

    /// Render one question.
    ///
    /// Returns `None` if the format does not apply to this question.
    fn export_question(&self, question: &QuestionRecord) -> Option<String>;

    /// Prepare for an export run.
    fn export_preprocess(&self) -> ExportSettings {
        ExportSettings { categories: true }
    }

    /// Render the marker that starts a new category.
    ///
    /// Only called when [`Self::export_preprocess`] enables categories.
    fn export_category(&self, _category: &str) -> Option<String> {
        None
    }
}

/// Split text into lines.
///
/// A leading byte order mark is dropped. Lines may end with `\n`, `\r\n` or
/// `\r`. A trailing line ending does not produce an empty last line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find(['\r', '\n']) {
        lines.push(&rest[..index]);
        let ending = if rest[index..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[index + ending..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Import every question in a text document.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn import_text<F>(format: &F, text: &str) -> Vec<QuestionRecord>
where
    F: QuestionFormat + ?Sized,
{
    let lines = split_lines(text);
    let questions = format.import_lines(&lines);
    debug!(
        lines = lines.len(),
        questions = questions.len(),
        "imported questions"
    );
    questions
}

/// The output of [`export_questions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exported {
    /// The exported document.
    pub text: String,
    /// Number of questions written.
    pub written: usize,
    /// Number of questions the format did not apply to.
    pub skipped: usize,
}

/// Export questions into one document, in input order.
///
/// Questions the format does not apply to are left out.
#[must_use]
#[instrument(level = "debug", skip_all)]
pub fn export_questions<F>(format: &F, questions: &[QuestionRecord]) -> Exported
where
    F: QuestionFormat + ?Sized,
{
    let settings = format.export_preprocess();
    debug!(categories = settings.categories, "starting export");

    let mut exported = Exported::default();
    let mut current_category: Option<&str> = None;

    for question in questions {
        if settings.categories {
            if let Some(category) = question.category() {
                if current_category != Some(category) {
                    current_category = Some(category);
                    if let Some(marker) = format.export_category(category) {
                        exported.text.push_str(&marker);
                    }
                }
            }
        }

        match format.export_question(question) {
            Some(line) => {
                exported.text.push_str(&line);
                exported.written += 1;
            }
            None => exported.skipped += 1,
        }
    }

    debug!(
        written = exported.written,
        skipped = exported.skipped,
        "exported questions"
    );
    exported
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{QuestionName, QuestionType, TextFormat};

    #[test_case("", &[]; "empty")]
    #[test_case("one", &["one"]; "no line ending")]
    #[test_case("one\ntwo\n", &["one", "two"]; "unix")]
    #[test_case("one\r\ntwo\r\n", &["one", "two"]; "windows")]
    #[test_case("one\rtwo", &["one", "two"]; "old mac")]
    #[test_case("one\n\ntwo", &["one", "", "two"]; "blank line kept")]
    #[test_case("\u{feff}one\n", &["one"]; "byte order mark")]
    fn splitting(text: &str, expected: &[&str]) {
        assert_eq!(split_lines(text), expected);
    }

    /// Writes `name` per line and a `[category]` marker per category.
    struct Listing;

    impl QuestionFormat for Listing {
        fn import_lines(&self, lines: &[&str]) -> Vec<QuestionRecord> {
            lines
                .iter()
                .filter_map(|line| QuestionName::new((*line).to_string()).ok())
                .map(|name| QuestionRecord::essay(name, String::new()))
                .collect()
        }

        fn export_question(&self, question: &QuestionRecord) -> Option<String> {
            question
                .is_essay()
                .then(|| format!("{}\n", question.name()))
        }

        fn export_category(&self, category: &str) -> Option<String> {
            Some(format!("[{category}]\n"))
        }
    }

    fn essay(name: &str) -> QuestionRecord {
        QuestionRecord::essay(QuestionName::try_from(name).unwrap(), String::new())
    }

    #[test]
    fn import_text_splits_lines() {
        let questions = import_text(&Listing, "a\n\nb\r\n");

        let names: Vec<_> = questions.iter().map(|q| q.name().as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn categories_are_written_when_they_change() {
        let questions = [
            essay("a").with_category("one"),
            essay("b").with_category("one"),
            essay("c"),
            essay("d").with_category("two"),
        ];

        let exported = export_questions(&Listing, &questions);

        assert_eq!(exported.text, "[one]\na\nb\nc\n[two]\nd\n");
        assert_eq!(exported.written, 4);
        assert_eq!(exported.skipped, 0);
    }

    #[test]
    fn inapplicable_questions_are_skipped() {
        let other = QuestionRecord::new(
            QuestionType::Other("truefalse".to_string()),
            QuestionName::try_from("t").unwrap(),
            String::new(),
            TextFormat::Html,
        );
        let questions = [essay("a"), other, essay("b")];

        let exported = export_questions(&Listing, &questions);

        assert_eq!(exported.text, "a\nb\n");
        assert_eq!(exported.written, 2);
        assert_eq!(exported.skipped, 1);
    }

    #[test]
    fn default_capabilities() {
        assert!(!Listing.provides_import());
        assert!(!Listing.provides_export());
        assert!(Listing.export_preprocess().categories);
    }
}
