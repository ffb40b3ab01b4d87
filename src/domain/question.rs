use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// The name of a question.
///
/// Names are never empty. Name resolution falls back to a configured label
/// when the candidate text is blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionName(NonEmptyString);

impl QuestionName {
    /// Creates a new `QuestionName` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidNameError` if the string is empty or whitespace only.
    pub fn new(s: String) -> Result<Self, InvalidNameError> {
        if s.trim().is_empty() {
            return Err(InvalidNameError(s));
        }
        NonEmptyString::new(s).map(Self).map_err(InvalidNameError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for QuestionName {
    type Error = InvalidNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for QuestionName {
    type Error = InvalidNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for QuestionName {
    type Err = InvalidNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl From<QuestionName> for String {
    fn from(name: QuestionName) -> Self {
        name.0.into_inner()
    }
}

impl Deref for QuestionName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for QuestionName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a question name is blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid question name '{0}': must contain at least one non-whitespace character")]
pub struct InvalidNameError(String);

/// The markup a stored text is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    /// HTML markup.
    #[default]
    Html,
    /// Unformatted text.
    Plain,
    /// Markdown source.
    Markdown,
}

/// How a student enters an essay response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Rich-text editor.
    #[default]
    Editor,
    /// Plain text area.
    Plain,
    /// Plain text area in a monospaced font.
    Monospaced,
    /// Attachments only, no inline text.
    NoInline,
}

/// The type of a question.
///
/// Only essay questions are produced by import. Other types come in from
/// storage and are passed over on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    /// Free-text response question with no automatic grading.
    Essay,
    /// Any other question type, by its storage name.
    Other(String),
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        if value == "essay" {
            Self::Essay
        } else {
            Self::Other(value)
        }
    }
}

impl From<QuestionType> for String {
    fn from(qtype: QuestionType) -> Self {
        match qtype {
            QuestionType::Essay => "essay".to_string(),
            QuestionType::Other(name) => name,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Essay => f.write_str("essay"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A block of rich text with its format and embedded files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextField {
    /// The text itself.
    pub text: String,
    /// The markup `text` is written in.
    #[serde(default)]
    pub format: TextFormat,
    /// Names of files embedded in the text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl TextField {
    /// An empty HTML text with no files.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            text: String::new(),
            format: TextFormat::Html,
            files: Vec::new(),
        }
    }
}

/// One importable/exportable question.
///
/// Records are built once and then only read. Import builds essay records
/// through [`QuestionRecord::essay`]; storage may hand back records of any
/// type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub(crate) qtype: QuestionType,
    pub(crate) name: QuestionName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) category: Option<String>,

    pub(crate) question_text: String,
    #[serde(default)]
    pub(crate) question_text_format: TextFormat,
    #[serde(default = "TextField::empty")]
    pub(crate) general_feedback: TextField,

    #[serde(default)]
    pub(crate) response_format: ResponseFormat,
    #[serde(default = "default_response_required")]
    pub(crate) response_required: bool,
    #[serde(default = "default_response_field_lines")]
    pub(crate) response_field_lines: u32,
    #[serde(default)]
    pub(crate) attachments: u32,
    #[serde(default)]
    pub(crate) attachments_required: u32,
    #[serde(default = "TextField::empty")]
    pub(crate) grader_info: TextField,
    #[serde(default = "TextField::empty")]
    pub(crate) response_template: TextField,

    #[serde(default = "TextField::empty")]
    pub(crate) correct_feedback: TextField,
    #[serde(default = "TextField::empty")]
    pub(crate) partially_correct_feedback: TextField,
    #[serde(default = "TextField::empty")]
    pub(crate) incorrect_feedback: TextField,

    // Unused by essays, kept so every question type shares one shape.
    #[serde(default)]
    pub(crate) answer: Vec<String>,
    #[serde(default)]
    pub(crate) fraction: Vec<f64>,
    #[serde(default)]
    pub(crate) feedback: Vec<TextField>,
}

const fn default_response_required() -> bool {
    true
}

const fn default_response_field_lines() -> u32 {
    15
}

impl QuestionRecord {
    /// Construct a question of the given type with the essay defaults.
    #[must_use]
    pub fn new(
        qtype: QuestionType,
        name: QuestionName,
        question_text: String,
        question_text_format: TextFormat,
    ) -> Self {
        Self {
            qtype,
            name,
            category: None,
            question_text,
            question_text_format,
            general_feedback: TextField::empty(),
            response_format: ResponseFormat::Editor,
            response_required: default_response_required(),
            response_field_lines: default_response_field_lines(),
            attachments: 0,
            attachments_required: 0,
            grader_info: TextField::empty(),
            response_template: TextField::empty(),
            correct_feedback: TextField::empty(),
            partially_correct_feedback: TextField::empty(),
            incorrect_feedback: TextField::empty(),
            answer: Vec::new(),
            fraction: Vec::new(),
            feedback: Vec::new(),
        }
    }

    /// Construct an essay question with HTML question text.
    #[must_use]
    pub fn essay(name: QuestionName, question_text: String) -> Self {
        Self::new(QuestionType::Essay, name, question_text, TextFormat::Html)
    }

    /// Place the question in a category.
    #[must_use]
    pub fn with_category(self, category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..self
        }
    }

    /// The question type.
    #[must_use]
    pub const fn qtype(&self) -> &QuestionType {
        &self.qtype
    }

    /// Whether this is an essay question.
    #[must_use]
    pub const fn is_essay(&self) -> bool {
        matches!(self.qtype, QuestionType::Essay)
    }

    /// The question name.
    #[must_use]
    pub const fn name(&self) -> &QuestionName {
        &self.name
    }

    /// The category the question belongs to, if known.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// The question body, in [`Self::question_text_format`].
    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// The markup of the question body.
    #[must_use]
    pub const fn question_text_format(&self) -> TextFormat {
        self.question_text_format
    }

    /// Feedback shown to every student after answering.
    #[must_use]
    pub const fn general_feedback(&self) -> &TextField {
        &self.general_feedback
    }

    /// How the response is entered.
    #[must_use]
    pub const fn response_format(&self) -> ResponseFormat {
        self.response_format
    }

    /// Whether an inline response is required.
    #[must_use]
    pub const fn response_required(&self) -> bool {
        self.response_required
    }

    /// Height of the response box, in lines.
    #[must_use]
    pub const fn response_field_lines(&self) -> u32 {
        self.response_field_lines
    }

    /// Number of attachments allowed.
    #[must_use]
    pub const fn attachments(&self) -> u32 {
        self.attachments
    }

    /// Number of attachments required.
    #[must_use]
    pub const fn attachments_required(&self) -> u32 {
        self.attachments_required
    }

    /// Information for graders.
    #[must_use]
    pub const fn grader_info(&self) -> &TextField {
        &self.grader_info
    }

    /// Text pre-filled into the response box.
    #[must_use]
    pub const fn response_template(&self) -> &TextField {
        &self.response_template
    }

    /// Feedback for a correct response.
    #[must_use]
    pub const fn correct_feedback(&self) -> &TextField {
        &self.correct_feedback
    }

    /// Feedback for a partially correct response.
    #[must_use]
    pub const fn partially_correct_feedback(&self) -> &TextField {
        &self.partially_correct_feedback
    }

    /// Feedback for an incorrect response.
    #[must_use]
    pub const fn incorrect_feedback(&self) -> &TextField {
        &self.incorrect_feedback
    }

    /// Answers (empty for essays).
    #[must_use]
    pub fn answer(&self) -> &[String] {
        &self.answer
    }

    /// Answer grades (empty for essays).
    #[must_use]
    pub fn fraction(&self) -> &[f64] {
        &self.fraction
    }

    /// Answer feedback (empty for essays).
    #[must_use]
    pub fn feedback(&self) -> &[TextField] {
        &self.feedback
    }
}
