//! Parsing and m/z calculation for (modified) peptide sequences.
//!
//! The input side understands the notations that show up in practice:
//! ProForma style bracket modifications (`M[Oxidation]`, `[Acetyl]-`,
//! `M[+15.9949]`, `C[UNIMOD:4]`), legacy terminal-dot markers
//! (`.[Acetyl]PEPTIDE`, `PEPTIDE.[Amidated]`) and trailing charge
//! notation (`PEPTIDE/2`, `PEPTIDE2`). The output side is the mzcore
//! chemistry engine, which does all mass and formula arithmetic.
//!
//! [`analyze_peptide_sequence`] gives a never-failing advisory analysis of
//! a raw sequence, [`calculate_peptide_mz`] the full calculation with
//! typed errors.

pub mod analysis;
pub mod catalog;
pub mod charge;
pub mod engine;
pub mod notation;
pub mod proforma;
pub mod validate;

pub use analysis::{
    analyze_peptide_sequence, calculate_peptide_mz, CalculationError, CalculationResult,
    ChargeSource, SequenceAnalysis, DEFAULT_CHARGE,
};
pub use catalog::{
    get_modification_info, get_square_bracket_examples, get_supported_modifications,
};
pub use charge::parse_charge_notation;
pub use notation::{parse_bracket_modifications, parse_sequence_with_mods_and_charge};
pub use proforma::parse_proforma_sequence;
pub use validate::{validate_peptide_sequence, validate_peptide_sequence_with_mods};
