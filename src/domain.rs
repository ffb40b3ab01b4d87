//! Domain models for question import and export.
//!
//! This module contains the question record shared by every format, its
//! rich-text fields, and the converter configuration.

/// Question records and their fixed essay configuration.
pub mod question;
pub use question::{
    InvalidNameError, QuestionName, QuestionRecord, QuestionType, ResponseFormat, TextField,
    TextFormat,
};

mod config;
pub use config::Config;
