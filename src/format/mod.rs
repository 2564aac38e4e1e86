//! Output line templating.
//!
//! A template is parsed once before traversal starts: backslash escape
//! sequences are decoded and the `{date}` / `{path}` tokens are located.
//! Malformed escapes are a fatal configuration error at parse time, so a
//! running traversal can never abort over formatting. Rendering is total.

use chrono::NaiveDate;
use std::path::Path;

use crate::error::ConfigError;

/// The token substituted with the extracted date, rendered as `YYYY-MM-DD`.
const DATE_TOKEN: &str = "{date}";

/// The token substituted with the file path.
const PATH_TOKEN: &str = "{path}";

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text, escapes already decoded
    Literal(String),
    /// The `{date}` token
    Date,
    /// The `{path}` token
    Path,
}

/// A pre-parsed output template.
///
/// Escapes are decoded before token substitution, so file paths that happen
/// to contain backslashes are never re-interpreted as escape sequences.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a raw template string.
    ///
    /// Recognized escape sequences are `\n`, `\t`, `\r` and `\\`. Text that
    /// is not a token or an escape is kept verbatim; an unmatched `{` is
    /// ordinary text unless it spells a known token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Template`] for an unknown escape sequence or a
    /// trailing backslash, with the byte position of the offending backslash.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let decoded = decode_escapes(raw)?;

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = decoded.as_str();

        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix(DATE_TOKEN) {
                flush_literal(&mut segments, &mut literal);
                segments.push(Segment::Date);
                rest = tail;
            } else if let Some(tail) = rest.strip_prefix(PATH_TOKEN) {
                flush_literal(&mut segments, &mut literal);
                segments.push(Segment::Path);
                rest = tail;
            } else {
                let mut chars = rest.chars();
                if let Some(ch) = chars.next() {
                    literal.push(ch);
                }
                rest = chars.as_str();
            }
        }
        flush_literal(&mut segments, &mut literal);

        Ok(Template { segments })
    }

    /// Renders one output line for the given path and date.
    pub fn render(&self, path: &Path, date: NaiveDate) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Date => out.push_str(&date.format("%Y-%m-%d").to_string()),
                Segment::Path => out.push_str(&path.display().to_string()),
            }
        }
        out
    }
}

fn flush_literal(segments: &mut Vec<Segment>, literal: &mut String) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Decodes backslash escape sequences in a template string.
fn decode_escapes(raw: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((position, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, 'n')) => out.push('\n'),
            Some((_, 't')) => out.push('\t'),
            Some((_, 'r')) => out.push('\r'),
            Some((_, '\\')) => out.push('\\'),
            Some((_, other)) => {
                return Err(ConfigError::Template {
                    reason: format!("unknown escape sequence '\\{}'", other),
                    position,
                });
            }
            None => {
                return Err(ConfigError::Template {
                    reason: "trailing backslash".to_string(),
                    position,
                });
            }
        }
    }

    Ok(out)
}
