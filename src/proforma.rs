//! Direct ProForma parsing with graceful fallback.
//!
//! The fast path hands the annotated string straight to the engine, which
//! natively understands ProForma mass deltas and ontology names. When the
//! engine refuses (legacy terminal-dot notation, names it does not know),
//! the bracket parser takes over and produces the canonical form itself.

use std::sync::LazyLock;

use regex::Regex;

use crate::engine;
use crate::notation::{self, NotationError};

static BRACKET_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Parse an annotated sequence, preferring the engine's own ProForma
/// support. Returns `(clean, canonical, direct)` where `direct` tells
/// whether the engine accepted the string as-is. A single leading `.`
/// (N terminal marker) is stripped before the attempt.
///
/// # Errors
/// Only when direct parsing fails *and* the bracket parser also rejects
/// the notation.
pub fn parse_proforma_sequence(raw: &str) -> Result<(String, String, bool), NotationError> {
    let stripped = raw.strip_prefix('.').unwrap_or(raw);
    if !stripped.is_empty() && engine::parse_sequence(stripped).is_ok() {
        return Ok((strip_annotations(stripped), stripped.to_string(), true));
    }
    let (clean, canonical) = notation::parse_bracket_modifications(stripped)?;
    Ok((clean, canonical, false))
}

/// The clean sequence of a directly parsed string: bracket groups removed,
/// markers (dots, dashes, charge slashes) dropped.
fn strip_annotations(annotated: &str) -> String {
    BRACKET_GROUP
        .replace_all(annotated, "")
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect()
}
