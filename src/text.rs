//! Text helpers shared by question formats.
//!
//! These cover escaping imported text, flattening stored rich text for
//! line-oriented export, and resolving question names.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::domain::{QuestionName, TextFormat};

/// Which quote characters [`html_escape`] escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMode {
    /// Escape `&`, `<` and `>` only.
    NoQuotes,
    /// Also escape `"` and `'`.
    Quotes,
}

/// Options for [`plain_text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainTextOptions {
    /// Separate block elements with a blank line.
    pub paragraphs: bool,
    /// Render `<br>` as a newline.
    pub newlines: bool,
}

impl PlainTextOptions {
    /// Flatten everything onto one logical line.
    pub const INLINE: Self = Self {
        paragraphs: false,
        newlines: false,
    };
}

/// Characters removed by [`trim_blanks`].
const BLANKS: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Stands in for line feeds of the source while HTML is rendered, so that
/// they survive whitespace collapsing.
const SOURCE_LINE_FEED: char = '\u{e000}';

/// Wide enough that rendered question text is never wrapped.
const RENDER_WIDTH: usize = 1 << 20;

static BLOCK_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("valid regex"));

/// Escape text for inclusion in HTML.
#[must_use]
pub fn html_escape(text: &str, quotes: QuoteMode) -> String {
    match quotes {
        QuoteMode::NoQuotes => html_escape::encode_text(text).into_owned(),
        QuoteMode::Quotes => html_escape::encode_quoted_attribute(text).into_owned(),
    }
}

/// Trim spaces, tabs, line endings, NUL and vertical tab from both ends.
///
/// Other whitespace, such as no-break spaces, is kept.
#[must_use]
pub fn trim_blanks(text: &str) -> &str {
    text.trim_matches(BLANKS)
}

/// Render stored text as plain text.
///
/// Plain and markdown text are returned unchanged. HTML is parsed and
/// rendered without decoration: markup, comments, scripts and styles are
/// dropped and entities are decoded. Line breaks and block ends become
/// whitespace according to `options`. Line feeds written in the HTML
/// source are kept as line feeds.
#[must_use]
pub fn plain_text(text: &str, format: TextFormat, options: PlainTextOptions) -> String {
    match format {
        TextFormat::Plain | TextFormat::Markdown => text.to_string(),
        TextFormat::Html => html_to_text(text, options),
    }
}

fn html_to_text(html: &str, options: PlainTextOptions) -> String {
    let source = html.replace('\n', SOURCE_LINE_FEED.encode_utf8(&mut [0; 4]));

    let result =
        html2text::config::plain_no_decorate().string_from_read(source.as_bytes(), RENDER_WIDTH);
    let rendered = match result {
        Ok(rendered) => rendered,
        Err(error) => {
            warn!(%error, "failed to render HTML, using the source text");
            source
        }
    };

    let line_break = if options.newlines { "\n" } else { " " };
    let block_break = if options.paragraphs { "\n\n" } else { " " };

    BLOCK_BREAK
        .split(rendered.trim())
        .map(|block| {
            block
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join(line_break)
        })
        .collect::<Vec<_>>()
        .join(block_break)
        .replace(SOURCE_LINE_FEED, "\n")
}

/// Resolve a question name from candidate text.
///
/// The candidate is read as HTML, then trimmed and shortened to at most
/// `max_chars` characters. If nothing is left, `fallback` is used.
#[must_use]
pub fn default_question_name(
    candidate: &str,
    fallback: &QuestionName,
    max_chars: usize,
) -> QuestionName {
    let stripped = plain_text(candidate, TextFormat::Html, PlainTextOptions::INLINE);
    let shortened = shorten(stripped.trim(), max_chars);
    QuestionName::new(shortened.trim().to_string()).unwrap_or_else(|_| fallback.clone())
}

const ELLIPSIS: &str = "...";

/// Shorten text to at most `max_chars` characters, including the ellipsis.
///
/// The cut is made at the last whitespace that fits, if there is one.
fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }

    let budget = max_chars - ELLIPSIS.len();
    let end = text
        .char_indices()
        .nth(budget)
        .map_or(text.len(), |(index, _)| index);
    let head = &text[..end];

    // Prefer a word boundary, unless the cut lands exactly on one.
    let head = if text[end..].starts_with(char::is_whitespace) {
        head
    } else {
        head.rfind(char::is_whitespace)
            .filter(|&index| index > 0)
            .map_or(head, |index| &head[..index])
    };

    format!("{}{ELLIPSIS}", head.trim_end())
}
