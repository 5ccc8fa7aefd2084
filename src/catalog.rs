//! The static modification catalog and the resolution logic on top of it.
//!
//! The catalog is the read-only table behind the calculator dropdown: the
//! handful of modifications a user can pick by name, with their Unimod
//! engine names, monoisotopic mass shifts and placement rules. Anything
//! not in this table is resolved against the engine's Unimod database.

use crate::engine;
use crate::notation::{self, BracketToken};

/// Where a modification may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminality {
    Anywhere,
    NTerm,
    CTerm,
}

/// One catalog entry: a user-facing modification with its engine binding.
#[derive(Debug, Clone, Copy)]
pub struct ModificationDescriptor {
    /// The name shown to the user, e.g. `Oxidation (M)`.
    pub display_name: &'static str,
    /// The Unimod name used in the canonical ProForma annotation.
    pub engine_name: &'static str,
    /// Monoisotopic mass shift in Dalton.
    pub mass_delta: f64,
    /// Residues this modification may attach to, in application order.
    pub origins: &'static [char],
    pub terminality: Terminality,
    pub description: &'static str,
}

/// Default window for matching a mass delta to a catalog entry, in Dalton.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// The label used when no modification applies.
pub const NO_MODIFICATION: &str = "None";

// Declaration order is load bearing: mass matching returns the first entry
// within tolerance, and the supported list mirrors this order.
static CATALOG: [ModificationDescriptor; 6] = [
    ModificationDescriptor {
        display_name: "Oxidation (M)",
        engine_name: "Oxidation",
        mass_delta: 15.994915,
        origins: &['M'],
        terminality: Terminality::Anywhere,
        description: "Addition of one oxygen to methionine (+15.994915 Da)",
    },
    ModificationDescriptor {
        display_name: "Carbamidomethyl (C)",
        engine_name: "Carbamidomethyl",
        mass_delta: 57.021464,
        origins: &['C'],
        terminality: Terminality::Anywhere,
        description: "Iodoacetamide derivative of cysteine (+57.021464 Da)",
    },
    ModificationDescriptor {
        display_name: "Phosphorylation (S/T/Y)",
        engine_name: "Phospho",
        mass_delta: 79.966331,
        origins: &['S', 'T', 'Y'],
        terminality: Terminality::Anywhere,
        description: "Phosphorylation of serine, threonine or tyrosine (+79.966331 Da)",
    },
    ModificationDescriptor {
        display_name: "Acetylation (N-term)",
        engine_name: "Acetyl",
        mass_delta: 42.010565,
        origins: &[],
        terminality: Terminality::NTerm,
        description: "Acetylation of the peptide N terminus (+42.010565 Da)",
    },
    ModificationDescriptor {
        display_name: "Methylation (K/R)",
        engine_name: "Methyl",
        mass_delta: 14.015650,
        origins: &['K', 'R'],
        terminality: Terminality::Anywhere,
        description: "Methylation of lysine or arginine (+14.015650 Da)",
    },
    ModificationDescriptor {
        display_name: "Deamidation (N/Q)",
        engine_name: "Deamidated",
        mass_delta: 0.984016,
        origins: &['N', 'Q'],
        terminality: Terminality::Anywhere,
        description: "Deamidation of asparagine or glutamine (+0.984016 Da)",
    },
];

static EXAMPLES: [(&str, &str); 8] = [
    ("M[Oxidation]PEPTIDE", "Methionine oxidation by modification name"),
    ("C[Carbamidomethyl]PEPTIDE", "Cysteine carbamidomethylation by modification name"),
    (".[Acetyl]PEPTIDE", "N-terminal acetylation (leading dot marks the N terminus)"),
    ("PEPTIDE.[Amidated]", "C-terminal amidation (trailing dot marks the C terminus)"),
    ("EM[+15.9949]EVEES[-79.9663]PEK", "Mass delta notation with positive and negative shifts"),
    ("ALSSC[UNIMOD:4]VVDEEQDVER/2", "UNIMOD accession with charge state notation"),
    ("VAEINPSNGGTT/2", "Charge state 2 given in the sequence itself"),
    (".[Acetyl]M[+15.9949]PEPTIDE/3", "Combined terminal, mass delta and charge notation"),
];

/// The read-only modification catalog, in declaration order.
pub fn catalog() -> &'static [ModificationDescriptor] {
    &CATALOG
}

/// Find a catalog entry by its user-facing display name.
pub fn find_by_display_name(display_name: &str) -> Option<&'static ModificationDescriptor> {
    CATALOG.iter().find(|entry| entry.display_name == display_name)
}

/// Find a catalog entry by its engine (Unimod) name, case insensitively.
pub fn find_by_engine_name(engine_name: &str) -> Option<&'static ModificationDescriptor> {
    CATALOG
        .iter()
        .find(|entry| entry.engine_name.eq_ignore_ascii_case(engine_name))
}

/// All modification choices shown to the user, `None` first.
pub fn get_supported_modifications() -> Vec<&'static str> {
    std::iter::once(NO_MODIFICATION)
        .chain(CATALOG.iter().map(|entry| entry.display_name))
        .collect()
}

/// Display name to description, for the reference listing.
pub fn get_modification_info() -> Vec<(&'static str, &'static str)> {
    std::iter::once((NO_MODIFICATION, "No modification applied"))
        .chain(CATALOG.iter().map(|entry| (entry.display_name, entry.description)))
        .collect()
}

/// Example sequences for every supported notation, with descriptions.
pub fn get_square_bracket_examples() -> &'static [(&'static str, &'static str)] {
    &EXAMPLES
}

/// Map a mass delta to a modification display name.
///
/// Catalog entries are compared in declaration order and the first one
/// within `tolerance` wins, the engine's Unimod database is the fallback,
/// and `"None"` is returned when nothing matches.
pub fn match_mass_delta_to_modification(delta: f64, tolerance: f64) -> String {
    for entry in &CATALOG {
        if (entry.mass_delta - delta).abs() <= tolerance {
            return entry.display_name.to_string();
        }
    }
    engine::nearest_modification_by_mass(delta, tolerance)
        .unwrap_or_else(|| NO_MODIFICATION.to_string())
}

/// Best-effort detection of the modification carried by an annotated
/// sequence. Never fails: anything unparseable or unknown is `"None"`.
pub fn detect_modification_from_sequence(annotated: &str) -> String {
    let Ok(parsed) = notation::parse_bracket_tokens(annotated) else {
        return NO_MODIFICATION.to_string();
    };
    let mut detected: Vec<String> = Vec::new();
    for token in parsed.tokens() {
        if let Some(name) = detect_token(token) {
            if !detected.contains(&name) {
                detected.push(name);
            }
        }
    }
    if detected.is_empty() {
        NO_MODIFICATION.to_string()
    } else {
        detected.join(" + ")
    }
}

fn detect_token(token: &BracketToken) -> Option<String> {
    match token {
        BracketToken::Named(name) => {
            find_by_engine_name(name).map(|entry| entry.display_name.to_string())
        }
        BracketToken::MassDelta { value, .. } => {
            let name = match_mass_delta_to_modification(*value, DEFAULT_TOLERANCE);
            (name != NO_MODIFICATION).then_some(name)
        }
        BracketToken::Unimod(id) => engine::find_modification_by_id(*id).and_then(|(name, mass)| {
            find_by_engine_name(&name)
                .map(|entry| entry.display_name.to_string())
                .or_else(|| {
                    let by_mass = match_mass_delta_to_modification(mass, DEFAULT_TOLERANCE);
                    (by_mass != NO_MODIFICATION).then_some(by_mass)
                })
        }),
    }
}

/// Apply a dropdown modification to a clean sequence, producing the
/// canonical annotated form. The annotation lands on the first eligible
/// origin residue (or the matching terminus). Unknown names, `"None"`,
/// an empty sequence or a sequence without an eligible residue all return
/// the input unchanged.
pub fn apply_modification(sequence: &str, modification: &str) -> String {
    if sequence.is_empty() || modification == NO_MODIFICATION {
        return sequence.to_string();
    }
    let Some(entry) = find_by_display_name(modification) else {
        return sequence.to_string();
    };
    match entry.terminality {
        Terminality::NTerm => format!("[{}]-{}", entry.engine_name, sequence),
        Terminality::CTerm => format!("{}-[{}]", sequence, entry.engine_name),
        Terminality::Anywhere => {
            for origin in entry.origins {
                if let Some(position) = sequence.find(*origin) {
                    let (head, tail) = sequence.split_at(position + 1);
                    return format!("{head}[{}]{tail}", entry.engine_name);
                }
            }
            sequence.to_string()
        }
    }
}
