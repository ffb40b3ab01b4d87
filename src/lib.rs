//! Plain-text Essay Questions
//!
//! Essay questions are written one per line: the text before the first
//! period is the question name and the rest of the line is the question.

pub mod domain;
pub use domain::{Config, QuestionName, QuestionRecord, QuestionType, TextField, TextFormat};

/// Question formats and import/export drivers.
pub mod format;
pub use format::{
    EssayFormat, ExportSettings, Exported, QuestionFormat, export_questions, import_text,
};

pub mod storage;
pub use storage::{LoadError, read_records, write_records};

pub mod text;
