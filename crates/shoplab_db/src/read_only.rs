//! Read-only statement check for plan inspection.
//!
//! The plan inspector accepts a single SELECT/WITH statement and nothing else.

use crate::error::{DbError, Result};

const ALLOWED_LEADING: &[&str] = &["SELECT", "WITH"];
const WRITE_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "REPLACE", "DROP", "CREATE", "ALTER", "ATTACH", "DETACH",
    "PRAGMA", "VACUUM", "REINDEX",
];

/// Reject anything but a single read-only SELECT/WITH statement.
pub(crate) fn ensure_read_only(sql: &str) -> Result<()> {
    let words = code_words(sql);

    let leading = words
        .first()
        .ok_or_else(|| DbError::invalid_query("Query is empty"))?;
    if !ALLOWED_LEADING.contains(&leading.as_str()) {
        return Err(DbError::invalid_query(format!(
            "Query must start with SELECT or WITH, found {}",
            leading
        )));
    }

    if let Some(word) = words.iter().find(|w| WRITE_KEYWORDS.contains(&w.as_str())) {
        return Err(DbError::invalid_query(format!(
            "Query contains write keyword {}",
            word
        )));
    }

    let body = strip_literals_and_comments(sql);
    let trimmed = body.trim_end();
    let trimmed = trimmed.strip_suffix(';').unwrap_or(trimmed);
    if trimmed.contains(';') {
        return Err(DbError::invalid_query("Multiple statements are not allowed"));
    }

    Ok(())
}

/// Uppercased identifier-like words outside literals and comments.
fn code_words(sql: &str) -> Vec<String> {
    strip_literals_and_comments(sql)
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_uppercase())
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    SingleQuoted,
    DoubleQuoted,
    LineComment,
    BlockComment,
}

/// Blank out string literals, quoted identifiers and comments.
fn strip_literals_and_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut state = Scan::Code;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        state = match (state, ch) {
            (Scan::Code, '\'') => Scan::SingleQuoted,
            (Scan::Code, '"') => Scan::DoubleQuoted,
            (Scan::Code, '-') if chars.peek() == Some(&'-') => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Code, _) => {
                out.push(ch);
                continue;
            }
            // '' is an escaped quote inside a literal
            (Scan::SingleQuoted, '\'') if chars.peek() == Some(&'\'') => {
                chars.next();
                Scan::SingleQuoted
            }
            (Scan::SingleQuoted, '\'') | (Scan::DoubleQuoted, '"') => Scan::Code,
            (Scan::LineComment, '\n') => Scan::Code,
            (Scan::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            (other, _) => other,
        };
        out.push(' ');
    }

    out
}
