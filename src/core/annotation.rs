//! ACMG criteria parsing and rendering
//!
//! The `acmg_criteria` column holds comma-separated tokens of the form
//! `KEY: VALUE (RATIONALE)`, e.g.
//! `PVS_score: Strong (De novo variant), PM_score: Moderate (In silico prediction)`.
//!
//! Parsing is lenient by default: malformed tokens are dropped. [`parse_strict`]
//! reports the first malformed token instead.

use crate::domain::errors::{AnnotationError, MalformedReason};
use std::fmt;

/// Text shown when no annotation entry could be parsed
pub const NO_INTERPRETATION: &str = "No ACMG interpretation available.";

const TOKEN_SEPARATOR: &str = ", ";
const KEY_SEPARATOR: &str = ": ";
const RATIONALE_OPEN: &str = " (";

/// One parsed `KEY: VALUE (RATIONALE)` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationEntry {
    /// Criterion code, e.g. `PVS_score`
    pub key: String,
    /// Strength tier, e.g. `Strong`
    pub value: String,
    /// Free-text rationale without the enclosing parentheses
    pub rationale: String,
}

impl fmt::Display for AnnotationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.key, self.value, self.rationale)
    }
}

/// How malformed tokens are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Drop malformed tokens
    #[default]
    Lenient,
    /// Fail on the first malformed token
    Strict,
}

/// Parses raw ACMG criteria, dropping malformed tokens
pub fn parse(raw: &str) -> Vec<AnnotationEntry> {
    tokens(raw)
        .filter_map(|token| parse_token(token).ok())
        .collect()
}

/// Parses raw ACMG criteria, failing on the first malformed token
pub fn parse_strict(raw: &str) -> Result<Vec<AnnotationEntry>, AnnotationError> {
    tokens(raw)
        .map(|token| {
            parse_token(token).map_err(|reason| AnnotationError::MalformedToken {
                token: token.to_string(),
                reason,
            })
        })
        .collect()
}

/// Parses with the given mode
pub fn parse_with_mode(
    raw: &str,
    mode: ParseMode,
) -> Result<Vec<AnnotationEntry>, AnnotationError> {
    match mode {
        ParseMode::Lenient => Ok(parse(raw)),
        ParseMode::Strict => parse_strict(raw),
    }
}

/// Renders entries one per line, or the fallback text when there are none
pub fn render(entries: &[AnnotationEntry]) -> String {
    if entries.is_empty() {
        return NO_INTERPRETATION.to_string();
    }

    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    // "".split(..) yields one empty token, which is not an annotation
    raw.split(TOKEN_SEPARATOR).filter(|token| !token.is_empty())
}

fn parse_token(token: &str) -> Result<AnnotationEntry, MalformedReason> {
    if !(token.contains(':') && token.contains('(') && token.contains(')')) {
        return Err(MalformedReason::MissingDelimiter);
    }

    let (key, remainder) = token
        .split_once(KEY_SEPARATOR)
        .ok_or(MalformedReason::MissingKeySeparator)?;
    let (value, rationale) = remainder
        .split_once(RATIONALE_OPEN)
        .ok_or(MalformedReason::MissingRationale)?;
    let rationale = rationale
        .strip_suffix(')')
        .ok_or(MalformedReason::UnterminatedRationale)?;

    Ok(AnnotationEntry {
        key: key.to_string(),
        value: value.to_string(),
        rationale: rationale.to_string(),
    })
}
