//! The analysis and calculation entry points.
//!
//! `analyze_peptide_sequence` is the forgiving advisory path: it never
//! fails, it reports what the notation contains and whether it is usable.
//! `calculate_peptide_mz` is the strict path: typed errors for every
//! rejected input, a full [`CalculationResult`] otherwise.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::catalog;
use crate::charge;
use crate::engine;
use crate::notation::{self, NotationError};
use crate::proforma;
use crate::validate;

/// The charge assumed when neither the sequence nor the caller provides one.
pub const DEFAULT_CHARGE: u32 = 2;

/// Fixed user-facing messages for the analysis path.
mod messages {
    pub const EMPTY_SEQUENCE: &str = "Peptide sequence cannot be empty";
    pub const INVALID_AMINO_ACID: &str = "Sequence contains invalid amino acid codes";
    pub const INVALID_SEQUENCE_LENGTH: &str =
        "Peptide sequence is empty after removing modifications";
    pub const UNEXPECTED: &str = "An unexpected error occurred while analysing the sequence";
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Peptide sequence cannot be empty")]
    EmptySequence,
    #[error("Charge state must be a positive integer")]
    InvalidCharge,
    #[error("Invalid amino acid(s) in sequence: {0}")]
    InvalidAminoAcid(String),
    #[error("Invalid character(s) in sequence: {0}")]
    InvalidCharacter(String),
    #[error("Peptide sequence is empty after removing modifications")]
    InvalidSequenceLength,
    #[error("Invalid modification notation: {0}")]
    Notation(#[from] NotationError),
    #[error("Failed to parse modified sequence: {0}")]
    EngineParse(String),
}

/// Where the charge state of a calculation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeSource {
    InputParameter,
    SequenceNotation,
}

impl fmt::Display for ChargeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InputParameter => "From input parameter",
            Self::SequenceNotation => "From sequence notation",
        })
    }
}

/// The advisory analysis of a raw sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceAnalysis {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub clean_sequence: String,
    pub modification: String,
    pub modification_detected: bool,
    pub charge: u32,
    pub charge_detected: bool,
}

impl Default for SequenceAnalysis {
    fn default() -> Self {
        Self {
            is_valid: true,
            error_message: None,
            clean_sequence: String::new(),
            modification: catalog::NO_MODIFICATION.to_string(),
            modification_detected: false,
            charge: DEFAULT_CHARGE,
            charge_detected: false,
        }
    }
}

/// A completed m/z calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationResult {
    pub mz_ratio: f64,
    pub monoisotopic_mass: f64,
    pub molecular_formula: String,
    pub original_sequence: String,
    pub modified_sequence: String,
    pub charge_state: u32,
    pub charge_source: ChargeSource,
    pub modification: String,
    pub sequence_length: usize,
    pub aa_composition: BTreeMap<char, usize>,
    pub success: bool,
}

/// Analyse a raw sequence without failing: notation validity, detected
/// modification, detected charge. Unexpected internal faults degrade to an
/// invalid result with a generic message, they never propagate.
pub fn analyze_peptide_sequence(raw: &str) -> SequenceAnalysis {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SequenceAnalysis {
            is_valid: false,
            error_message: Some(messages::EMPTY_SEQUENCE.to_string()),
            ..SequenceAnalysis::default()
        };
    }
    analyze_inner(trimmed).unwrap_or_else(|_| SequenceAnalysis {
        is_valid: false,
        error_message: Some(messages::UNEXPECTED.to_string()),
        ..SequenceAnalysis::default()
    })
}

fn analyze_inner(trimmed: &str) -> Result<SequenceAnalysis, NotationError> {
    let (remainder, parsed_charge) = charge::parse_charge_notation(trimmed);
    let (clean, _canonical) = notation::parse_bracket_modifications(&remainder)?;

    // A parse-time charge of 1 means no marker was present
    let charge_detected = parsed_charge != 1;
    let modification = catalog::detect_modification_from_sequence(&remainder);
    let modification_detected = modification != catalog::NO_MODIFICATION;

    let mut analysis = SequenceAnalysis {
        clean_sequence: clean.clone(),
        modification,
        modification_detected,
        charge: if charge_detected {
            parsed_charge
        } else {
            DEFAULT_CHARGE
        },
        charge_detected,
        ..SequenceAnalysis::default()
    };

    if clean.is_empty() {
        analysis.is_valid = false;
        analysis.error_message = Some(messages::INVALID_SEQUENCE_LENGTH.to_string());
        return Ok(analysis);
    }

    let (valid, _) = validate::validate_peptide_sequence(&remainder);
    if !valid {
        analysis.is_valid = false;
        analysis.error_message = Some(messages::INVALID_AMINO_ACID.to_string());
    }
    Ok(analysis)
}

/// The ordered fallback chain that decides which annotated sequence is
/// handed to the engine. Stages are tried in [`ModificationStrategy::ORDER`]
/// and the first one that produces an outcome wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ModificationStrategy {
    /// The engine parses the bracket notation natively.
    DirectProForma,
    /// The bracket parser's canonical conversion.
    NotationConversion,
    /// The modification picked by the caller, applied to the clean sequence.
    Dropdown,
    /// No modification at all.
    Passthrough,
}

struct StrategyOutcome {
    sequence: String,
    label: String,
}

impl ModificationStrategy {
    const ORDER: [Self; 4] = [
        Self::DirectProForma,
        Self::NotationConversion,
        Self::Dropdown,
        Self::Passthrough,
    ];

    fn apply(
        self,
        remainder: &str,
        clean: &str,
        canonical: &str,
        dropdown: &str,
    ) -> Option<StrategyOutcome> {
        match self {
            Self::DirectProForma => {
                if !remainder.contains('[') {
                    return None;
                }
                let (_, converted, direct) = proforma::parse_proforma_sequence(remainder).ok()?;
                direct.then_some(StrategyOutcome {
                    sequence: converted,
                    label: "ProForma arbitrary mass deltas (direct parsing)".to_string(),
                })
            }
            Self::NotationConversion => remainder.contains('[').then(|| StrategyOutcome {
                sequence: canonical.to_string(),
                label: "From sequence notation (converted)".to_string(),
            }),
            Self::Dropdown => {
                (!dropdown.is_empty() && dropdown != catalog::NO_MODIFICATION).then(|| {
                    StrategyOutcome {
                        sequence: catalog::apply_modification(clean, dropdown),
                        label: dropdown.to_string(),
                    }
                })
            }
            Self::Passthrough => Some(StrategyOutcome {
                sequence: clean.to_string(),
                label: catalog::NO_MODIFICATION.to_string(),
            }),
        }
    }
}

/// Calculate m/z and related properties for a raw sequence.
///
/// An explicit charge marker in the sequence overrides `input_charge`. The
/// `dropdown_modification` (a display name from
/// [`catalog::get_supported_modifications`]) is only applied when the
/// sequence itself carries no modification notation.
///
/// # Errors
/// Typed [`CalculationError`]s for every rejected input: empty sequence,
/// zero charge, invalid residues or characters (named in the message),
/// malformed notation, or an engine rejection of the final annotated form.
pub fn calculate_peptide_mz(
    raw: &str,
    input_charge: u32,
    dropdown_modification: &str,
) -> Result<CalculationResult, CalculationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalculationError::EmptySequence);
    }
    if input_charge == 0 {
        return Err(CalculationError::InvalidCharge);
    }

    let (remainder, parsed_charge) = charge::parse_charge_notation(trimmed);
    let (charge_state, charge_source) = if parsed_charge != 1 {
        (parsed_charge, ChargeSource::SequenceNotation)
    } else {
        (input_charge, ChargeSource::InputParameter)
    };

    let (clean, canonical) = notation::parse_bracket_modifications(&remainder)?;
    if clean.is_empty() {
        return Err(CalculationError::InvalidSequenceLength);
    }
    check_residues(&clean)?;

    let outcome = ModificationStrategy::ORDER
        .iter()
        .find_map(|strategy| strategy.apply(&remainder, &clean, &canonical, dropdown_modification))
        .unwrap_or(StrategyOutcome {
            sequence: clean.clone(),
            label: catalog::NO_MODIFICATION.to_string(),
        });

    let parsed = engine::parse_sequence(&outcome.sequence)
        .map_err(|error| CalculationError::EngineParse(error.to_string()))?;

    let mut aa_composition = BTreeMap::new();
    for residue in clean.chars() {
        *aa_composition.entry(residue).or_insert(0) += 1;
    }

    Ok(CalculationResult {
        mz_ratio: parsed.mz(charge_state),
        monoisotopic_mass: parsed.monoisotopic_mass(),
        molecular_formula: parsed.molecular_formula(),
        original_sequence: clean.clone(),
        modified_sequence: outcome.sequence,
        charge_state,
        charge_source,
        modification: outcome.label,
        sequence_length: clean.chars().count(),
        aa_composition,
        success: true,
    })
}

fn check_residues(clean: &str) -> Result<(), CalculationError> {
    let bad_characters: String = clean
        .chars()
        .filter(|c| !c.is_ascii_alphabetic())
        .unique()
        .join(", ");
    if !bad_characters.is_empty() {
        return Err(CalculationError::InvalidCharacter(bad_characters));
    }
    let bad_residues: String = clean
        .chars()
        .filter(|c| !validate::is_valid_residue(*c))
        .unique()
        .join(", ");
    if !bad_residues.is_empty() {
        return Err(CalculationError::InvalidAminoAcid(bad_residues));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_defaults() {
        let analysis = SequenceAnalysis::default();
        assert!(analysis.is_valid);
        assert_eq!(analysis.error_message, None);
        assert_eq!(analysis.clean_sequence, "");
        assert_eq!(analysis.modification, "None");
        assert!(!analysis.modification_detected);
        assert_eq!(analysis.charge, 2);
        assert!(!analysis.charge_detected);
    }

    #[test]
    fn analyze_empty_sequence() {
        for input in ["", "   "] {
            let analysis = analyze_peptide_sequence(input);
            assert!(!analysis.is_valid);
            assert_eq!(
                analysis.error_message.as_deref(),
                Some(messages::EMPTY_SEQUENCE)
            );
            assert_eq!(analysis.modification, "None");
            assert_eq!(analysis.charge, 2);
            assert_eq!(analysis.clean_sequence, "");
        }
    }

    #[test]
    fn analyze_basic_sequence() {
        let analysis = analyze_peptide_sequence("PEPTIDE");
        assert!(analysis.is_valid);
        assert_eq!(analysis.error_message, None);
        assert_eq!(analysis.clean_sequence, "PEPTIDE");
        assert_eq!(analysis.modification, "None");
        assert!(!analysis.modification_detected);
        assert_eq!(analysis.charge, 2);
        assert!(!analysis.charge_detected);
    }

    #[test]
    fn analyze_detects_charge() {
        let analysis = analyze_peptide_sequence("PEPTIDE/3");
        assert!(analysis.is_valid);
        assert_eq!(analysis.charge, 3);
        assert!(analysis.charge_detected);
    }

    #[test]
    fn analyze_detects_modification() {
        let analysis = analyze_peptide_sequence("M[Oxidation]PEPTIDE");
        assert!(analysis.is_valid);
        assert_eq!(analysis.modification, "Oxidation (M)");
        assert!(analysis.modification_detected);

        let analysis = analyze_peptide_sequence("M[Oxidation]PEPTIDE/2");
        assert!(analysis.is_valid);
        assert_eq!(analysis.modification, "Oxidation (M)");
        assert_eq!(analysis.charge, 2);
        assert!(analysis.charge_detected);
    }

    #[test]
    fn analyze_invalid_residue() {
        let analysis = analyze_peptide_sequence("PEPTIDEZ");
        assert!(!analysis.is_valid);
        assert_eq!(
            analysis.error_message.as_deref(),
            Some(messages::INVALID_AMINO_ACID)
        );
    }

    #[test]
    fn analyze_empty_after_stripping() {
        let analysis = analyze_peptide_sequence("[Acetyl]");
        assert!(!analysis.is_valid);
        assert_eq!(
            analysis.error_message.as_deref(),
            Some(messages::INVALID_SEQUENCE_LENGTH)
        );
    }

    #[test]
    fn analyze_never_fails() {
        let analysis = analyze_peptide_sequence("PEPTIDE[NoSuchModification]");
        assert!(!analysis.is_valid);
        assert_eq!(
            analysis.error_message.as_deref(),
            Some(messages::UNEXPECTED)
        );
    }

    #[test]
    fn analyze_ambiguous_residues_and_dots() {
        let analysis = analyze_peptide_sequence("PEPTIDEXU");
        assert!(analysis.is_valid);
        assert_eq!(analysis.clean_sequence, "PEPTIDEXU");

        let analysis = analyze_peptide_sequence(".PEPTIDE");
        assert!(analysis.is_valid);
        assert_eq!(analysis.clean_sequence, "PEPTIDE");
    }

    #[test]
    fn calculate_rejects_bad_input_before_parsing() {
        assert_eq!(
            calculate_peptide_mz("", 2, "None"),
            Err(CalculationError::EmptySequence)
        );
        assert_eq!(
            calculate_peptide_mz("   ", 2, "None"),
            Err(CalculationError::EmptySequence)
        );
        assert_eq!(
            calculate_peptide_mz("PEPTIDE", 0, "None"),
            Err(CalculationError::InvalidCharge)
        );
    }

    #[test]
    fn calculate_names_offending_residues() {
        match calculate_peptide_mz("PEPTIDEZ", 2, "None") {
            Err(CalculationError::InvalidAminoAcid(found)) => assert!(found.contains('Z')),
            other => panic!("expected an invalid amino acid error, got {other:?}"),
        }
        match calculate_peptide_mz("PEPTIDE123", 2, "None") {
            Err(CalculationError::InvalidCharacter(found)) => assert!(found.contains('1')),
            other => panic!("expected an invalid character error, got {other:?}"),
        }
    }

    #[test]
    fn calculate_rejects_empty_after_stripping() {
        assert_eq!(
            calculate_peptide_mz("[Acetyl]", 2, "None"),
            Err(CalculationError::InvalidSequenceLength)
        );
    }
}
