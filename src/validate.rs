//! Clean-sequence validation.

use crate::notation;

/// The residues a clean sequence may contain: the twenty standard amino
/// acids plus the ambiguous codes X and U, uppercase only.
pub fn is_valid_residue(c: char) -> bool {
    matches!(
        c,
        'A' | 'C'
            | 'D'
            | 'E'
            | 'F'
            | 'G'
            | 'H'
            | 'I'
            | 'K'
            | 'L'
            | 'M'
            | 'N'
            | 'P'
            | 'Q'
            | 'R'
            | 'S'
            | 'T'
            | 'V'
            | 'W'
            | 'Y'
            | 'X'
            | 'U'
    )
}

/// Validate a raw sequence: strip bracket modifications (falling back to
/// the literal string when the notation is malformed) and check every
/// remaining character against the permitted residue set. Empty input is
/// vacuously valid here, emptiness is reported by the orchestrator.
pub fn validate_peptide_sequence(raw: &str) -> (bool, String) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return (true, String::new());
    }
    let clean = match notation::parse_bracket_modifications(trimmed) {
        Ok((clean, _)) => clean,
        Err(_) => trimmed.to_string(),
    };
    let valid = clean.chars().all(is_valid_residue);
    (valid, clean)
}

/// Validate a raw sequence including its charge notation. Returns
/// `(is_valid, clean, canonical, charge)`; any parse failure yields
/// `(false, "", "", 1)`.
pub fn validate_peptide_sequence_with_mods(raw: &str) -> (bool, String, String, u32) {
    match notation::parse_sequence_with_mods_and_charge(raw) {
        Ok((clean, canonical, charge)) => {
            let valid = clean.chars().all(is_valid_residue);
            (valid, clean, canonical, charge)
        }
        Err(_) => (false, String::new(), String::new(), 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sequences() {
        assert_eq!(validate_peptide_sequence("PEPTIDE"), (true, "PEPTIDE".to_string()));
        assert_eq!(
            validate_peptide_sequence("ACDEFGHIKLMNPQRSTVWY"),
            (true, "ACDEFGHIKLMNPQRSTVWY".to_string())
        );
    }

    #[test]
    fn ambiguous_codes_are_allowed() {
        assert_eq!(validate_peptide_sequence("PEPTIDEX"), (true, "PEPTIDEX".to_string()));
        assert_eq!(validate_peptide_sequence("PEPTIDEU"), (true, "PEPTIDEU".to_string()));
        assert_eq!(
            validate_peptide_sequence("ACDEFGHIKLMNPQRSTVWYXU"),
            (true, "ACDEFGHIKLMNPQRSTVWYXU".to_string())
        );
    }

    #[test]
    fn empty_input_is_vacuously_valid() {
        assert_eq!(validate_peptide_sequence(""), (true, String::new()));
        assert_eq!(validate_peptide_sequence("   "), (true, String::new()));
    }

    #[test]
    fn invalid_residues() {
        for sequence in ["PEPTIDEZ", "PEPTIDEJ", "PEPTIDEO", "PEPTIDEB"] {
            let (valid, clean) = validate_peptide_sequence(sequence);
            assert!(!valid, "{sequence} should be invalid");
            assert_eq!(clean, sequence);
        }
    }

    #[test]
    fn case_digits_and_punctuation_are_invalid() {
        assert!(!validate_peptide_sequence("peptide").0);
        assert!(!validate_peptide_sequence("PePtIdE").0);
        assert!(!validate_peptide_sequence("PEPTIDE123").0);
        assert!(!validate_peptide_sequence("PEPTIDE@#$").0);
        assert!(!validate_peptide_sequence("PEPTIDE™").0);
    }

    #[test]
    fn modifications_are_stripped_before_validation() {
        assert_eq!(
            validate_peptide_sequence("M[Oxidation]PEPTIDE"),
            (true, "MPEPTIDE".to_string())
        );
        assert_eq!(
            validate_peptide_sequence("[Acetyl]PEPTIDE"),
            (true, "PEPTIDE".to_string())
        );
        assert_eq!(
            validate_peptide_sequence(".[Acetyl]PEPTIDE"),
            (true, "PEPTIDE".to_string())
        );
        assert_eq!(
            validate_peptide_sequence("PEPTIDE.[Amidated]"),
            (true, "PEPTIDE".to_string())
        );
    }

    #[test]
    fn malformed_notation_falls_back_to_the_literal_string() {
        // The raw string is checked as-is, brackets make it invalid
        let (valid, clean) = validate_peptide_sequence("PEPTIDE[NoSuchModification]");
        assert!(!valid);
        assert_eq!(clean, "PEPTIDE[NoSuchModification]");
    }

    #[test]
    fn very_long_sequence() {
        let long = "A".repeat(1000);
        assert_eq!(validate_peptide_sequence(&long), (true, long.clone()));
    }

    #[test]
    fn with_mods_and_charge() {
        assert_eq!(
            validate_peptide_sequence_with_mods("PEPTIDE/2"),
            (true, "PEPTIDE".to_string(), "PEPTIDE".to_string(), 2)
        );
        assert_eq!(
            validate_peptide_sequence_with_mods("PEPTIDE2"),
            (true, "PEPTIDE".to_string(), "PEPTIDE".to_string(), 2)
        );
        assert_eq!(
            validate_peptide_sequence_with_mods("M[Oxidation]PEPTIDE/3"),
            (
                true,
                "MPEPTIDE".to_string(),
                "M[Oxidation]PEPTIDE".to_string(),
                3
            )
        );
    }

    #[test]
    fn with_mods_invalid_residues() {
        let (valid, clean, _, _) = validate_peptide_sequence_with_mods("PEPTIDEZ[Oxidation]");
        assert!(!valid);
        assert_eq!(clean, "PEPTIDEZ");

        let (valid, _, _, charge) = validate_peptide_sequence_with_mods("PEPTIDEJ/2");
        assert!(!valid);
        assert_eq!(charge, 2);
    }

    #[test]
    fn with_mods_parse_failure() {
        assert_eq!(
            validate_peptide_sequence_with_mods("PEPTIDE[NoSuchModification]"),
            (false, String::new(), String::new(), 1)
        );
    }
}
