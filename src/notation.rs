//! Bracket modification notation parsing.
//!
//! Turns free-form annotated peptide strings (`M[Oxidation]PEPTIDE`,
//! `.[Acetyl]PEPTIDE`, `EM[+15.9949]EVEES[-79.9663]PEK`,
//! `C[UNIMOD:4]PEPTIDE`) into a clean amino acid sequence plus a canonical
//! ProForma annotation for the engine. Unknown modification names and
//! malformed bracket content are hard errors, tokens are never silently
//! dropped.

use thiserror::Error;

use crate::catalog;
use crate::charge;
use crate::engine;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("unknown modification name `{0}`")]
    UnknownModification(String),
    #[error("invalid mass delta `{0}`")]
    InvalidMassDelta(String),
    #[error("invalid UNIMOD accession `{0}`")]
    InvalidUnimodAccession(String),
    #[error("empty modification bracket")]
    EmptyBracket,
    #[error("unclosed modification bracket in `{0}`")]
    UnclosedBracket(String),
}

/// Where a bracket token attaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPosition {
    NTerm,
    CTerm,
    /// Index into the clean sequence of the carrier residue.
    Residue(usize),
}

/// The recognised kinds of bracket content.
#[derive(Debug, Clone, PartialEq)]
pub enum BracketToken {
    /// A resolved modification name, properly cased.
    Named(String),
    /// A signed mass shift, kept verbatim for the canonical form.
    MassDelta { text: String, value: f64 },
    /// A UNIMOD accession number, passed through to the engine.
    Unimod(u32),
}

impl BracketToken {
    fn canonical_text(&self, residue: Option<char>) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::MassDelta { text, .. } => {
                // Engine convention: a mass on the unknown-mass residue X is
                // written unsigned, a negative sign is kept
                if residue == Some('X') {
                    text.strip_prefix('+').unwrap_or(text).to_string()
                } else {
                    text.clone()
                }
            }
            Self::Unimod(id) => format!("UNIMOD:{id}"),
        }
    }
}

/// The result of a bracket parse: the clean sequence, the canonical
/// ProForma annotation, and the extracted tokens in scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNotation {
    pub clean: String,
    pub canonical: String,
    tokens: Vec<(TokenPosition, BracketToken)>,
}

impl ParsedNotation {
    pub fn tokens(&self) -> impl Iterator<Item = &BracketToken> {
        self.tokens.iter().map(|(_, token)| token)
    }

    pub fn placed_tokens(&self) -> &[(TokenPosition, BracketToken)] {
        &self.tokens
    }
}

/// Parse bracket modifications into `(clean, canonical)`.
///
/// # Errors
/// On any unresolvable or malformed bracket content.
pub fn parse_bracket_modifications(annotated: &str) -> Result<(String, String), NotationError> {
    parse_bracket_tokens(annotated).map(|parsed| (parsed.clean, parsed.canonical))
}

/// Full bracket parse, also yielding the extracted tokens.
///
/// Input without brackets or terminal dot markers is passed through
/// unchanged. A leading `.` marks the N terminus, a `.` after the last
/// residue marks the C terminus; neither reaches the clean sequence. A
/// bracket before any residue is N terminal, a bracket after the final
/// residue (or after a C terminal dot) is C terminal, anything else
/// attaches to the residue directly before it.
///
/// # Errors
/// On any unresolvable or malformed bracket content.
pub fn parse_bracket_tokens(annotated: &str) -> Result<ParsedNotation, NotationError> {
    let trimmed = annotated.trim();
    if !trimmed.contains('[') && !trimmed.contains('.') {
        return Ok(ParsedNotation {
            clean: trimmed.to_string(),
            canonical: trimmed.to_string(),
            tokens: Vec::new(),
        });
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut residues: Vec<(char, Vec<BracketToken>)> = Vec::new();
    let mut n_term: Vec<BracketToken> = Vec::new();
    let mut c_term: Vec<BracketToken> = Vec::new();
    let mut tokens: Vec<(TokenPosition, BracketToken)> = Vec::new();
    let mut seen_c_term_dot = false;

    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '[' => {
                let close = find_closing(&chars, i)
                    .ok_or_else(|| NotationError::UnclosedBracket(trimmed.to_string()))?;
                let content: String = chars[i + 1..close].iter().collect();
                let token = classify(&content)?;
                let at_end = close + 1 == chars.len();
                let last_index = residues.len();
                match residues.last_mut() {
                    None => {
                        tokens.push((TokenPosition::NTerm, token.clone()));
                        n_term.push(token);
                    }
                    Some(_) if seen_c_term_dot || at_end => {
                        tokens.push((TokenPosition::CTerm, token.clone()));
                        c_term.push(token);
                    }
                    Some((_, mods)) => {
                        tokens.push((TokenPosition::Residue(last_index - 1), token.clone()));
                        mods.push(token);
                    }
                }
                i = close + 1;
            }
            '.' => {
                // Terminal marker: leading for N term, trailing for C term
                if !residues.is_empty() {
                    seen_c_term_dot = true;
                }
                i += 1;
            }
            c => {
                residues.push((c, Vec::new()));
                i += 1;
            }
        }
    }

    let clean: String = residues.iter().map(|(residue, _)| *residue).collect();

    let mut canonical = String::new();
    for token in &n_term {
        canonical.push('[');
        canonical.push_str(&token.canonical_text(None));
        canonical.push(']');
    }
    if !n_term.is_empty() {
        canonical.push('-');
    }
    for (residue, mods) in &residues {
        canonical.push(*residue);
        for token in mods {
            canonical.push('[');
            canonical.push_str(&token.canonical_text(Some(*residue)));
            canonical.push(']');
        }
    }
    if !c_term.is_empty() {
        canonical.push('-');
        for token in &c_term {
            canonical.push('[');
            canonical.push_str(&token.canonical_text(None));
            canonical.push(']');
        }
    }

    Ok(ParsedNotation {
        clean,
        canonical,
        tokens,
    })
}

/// The combined parsing pipeline: charge notation first, then bracket
/// modifications. Returns `(clean, canonical, charge)`.
///
/// # Errors
/// On any unresolvable or malformed bracket content.
pub fn parse_sequence_with_mods_and_charge(
    raw: &str,
) -> Result<(String, String, u32), NotationError> {
    let (remainder, charge) = charge::parse_charge_notation(raw);
    let (clean, canonical) = parse_bracket_modifications(&remainder)?;
    Ok((clean, canonical, charge))
}

fn find_closing(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in chars[open..].iter().enumerate() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => (),
        }
    }
    None
}

fn classify(content: &str) -> Result<BracketToken, NotationError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(NotationError::EmptyBracket);
    }

    let first = content.chars().next().unwrap_or_default();
    if first == '+' || first == '-' || first.is_ascii_digit() {
        let value = content
            .parse::<f64>()
            .map_err(|_| NotationError::InvalidMassDelta(content.to_string()))?;
        return Ok(BracketToken::MassDelta {
            text: content.to_string(),
            value,
        });
    }

    if let Some(prefix) = content.get(..7) {
        if prefix.eq_ignore_ascii_case("UNIMOD:") {
            let id = content[7..]
                .trim()
                .parse::<u32>()
                .map_err(|_| NotationError::InvalidUnimodAccession(content.to_string()))?;
            return Ok(BracketToken::Unimod(id));
        }
    }

    if let Some(entry) = catalog::find_by_engine_name(content) {
        return Ok(BracketToken::Named(entry.engine_name.to_string()));
    }
    if let Some(name) = engine::find_modification_name(content) {
        return Ok(BracketToken::Named(name));
    }
    Err(NotationError::UnknownModification(content.to_string()))
}
