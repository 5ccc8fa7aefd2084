//! The boundary to the chemistry engine.
//!
//! Everything the rest of the crate needs from [`mzcore`] goes through this
//! module: parsing a canonical ProForma string into something with a mass,
//! and looking up modifications in the Unimod database by name, accession
//! or monoisotopic mass. Keeping the surface this small makes the engine
//! swappable and keeps ProForma/ontology types out of the other modules.

use itertools::Itertools;
use mzcore::{
    ontology::{Ontology, STATIC_ONTOLOGIES},
    prelude::{Chemical, MolecularFormula, Peptidoform},
};
use thiserror::Error;

/// Monoisotopic mass of a proton in Dalton, for converting neutral masses
/// into m/z values.
pub const MASS_PROTON: f64 = 1.007276466621;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine rejected the annotated sequence.
    #[error("{0}")]
    Parse(String),
    /// The sequence parsed but no molecular formula could be derived.
    #[error("the sequence has no defined molecular formula")]
    NoFormula,
}

/// A successfully parsed annotated sequence, reduced to its molecular
/// formula. All mass properties derive from here.
#[derive(Debug, Clone)]
pub struct ParsedSequence {
    formula: MolecularFormula,
}

impl ParsedSequence {
    pub fn monoisotopic_mass(&self) -> f64 {
        self.formula.monoisotopic_mass().value
    }

    /// m/z of the [M + nH]n+ ion.
    pub fn mz(&self, charge: u32) -> f64 {
        let charge = f64::from(charge);
        (self.monoisotopic_mass() + charge * MASS_PROTON) / charge
    }

    /// The molecular formula in Hill notation.
    pub fn molecular_formula(&self) -> String {
        self.formula.hill_notation()
    }
}

/// Hand a canonical ProForma string to the engine.
///
/// # Errors
/// If the engine rejects the string, with the engine's own message, or if
/// the parsed sequence has no single defined formula.
pub fn parse_sequence(annotated: &str) -> Result<ParsedSequence, EngineError> {
    let (peptidoform, _warnings) = Peptidoform::pro_forma(annotated, &STATIC_ONTOLOGIES)
        .map_err(|errors| EngineError::Parse(errors.iter().join("; ")))?;
    let peptidoform = peptidoform
        .into_linear()
        .ok_or_else(|| EngineError::Parse("cross-linked peptidoforms are not supported".to_string()))?;
    let formula = peptidoform
        .formulas()
        .first()
        .cloned()
        .ok_or(EngineError::NoFormula)?;
    Ok(ParsedSequence { formula })
}

/// Advisory check whether the engine accepts this annotated sequence.
/// The empty string is accepted, emptiness is reported at a higher level.
pub fn is_parseable(annotated: &str) -> bool {
    annotated.is_empty() || parse_sequence(annotated).is_ok()
}

/// Resolve a modification name against Unimod, returning the properly
/// cased database name.
pub fn find_modification_name(name: &str) -> Option<String> {
    STATIC_ONTOLOGIES
        .get_by_name(&[Ontology::Unimod], name)
        .and_then(|modification| modification.description().map(|id| id.name.to_string()))
}

/// Look up a Unimod accession number, returning the database name and
/// monoisotopic mass shift.
pub fn find_modification_by_id(id: u32) -> Option<(String, f64)> {
    STATIC_ONTOLOGIES
        .unimod()
        .get_by_index(&id)
        .and_then(|modification| {
            modification
                .description()
                .map(|d| (d.name.to_string(), modification.formula().monoisotopic_mass().value))
        })
}

/// Scan Unimod for the modification whose mass shift is closest to
/// `delta` within `tolerance` Dalton.
pub fn nearest_modification_by_mass(delta: f64, tolerance: f64) -> Option<String> {
    STATIC_ONTOLOGIES
        .unimod()
        .data()
        .iter()
        .filter_map(|modification| {
            modification
                .description()
                .map(|d| (d.name.to_string(), modification.formula().monoisotopic_mass().value))
        })
        .filter(|(_, mass)| (mass - delta).abs() <= tolerance)
        .min_by(|a, b| (a.1 - delta).abs().total_cmp(&(b.1 - delta).abs()))
        .map(|(name, _)| name)
}
