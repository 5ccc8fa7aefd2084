use std::sync::LazyLock;

use regex::Regex;

/// Highest charge state that is still interpreted as charge notation.
pub const MAX_CHARGE: u32 = 20;

static SLASH_CHARGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)/(\d+)$").unwrap());
static TRAILING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)(\d+)$").unwrap());

/// Split trailing charge notation (`SEQ/2` or `SEQ2`) off a raw sequence.
///
/// Returns the remaining sequence and the charge, defaulting to 1 when no
/// charge notation is present. A suffix outside 1..=[`MAX_CHARGE`] is not
/// treated as charge notation and stays part of the returned sequence, so
/// that the validator can report it instead of silently mangling the input.
/// A leading `.` (N terminal marker) is left in the remainder untouched.
pub fn parse_charge_notation(input: &str) -> (String, u32) {
    let trimmed = input.trim();

    if let Some(captures) = SLASH_CHARGE.captures(trimmed) {
        if let Ok(charge) = captures[2].parse::<u32>() {
            if (1..=MAX_CHARGE).contains(&charge) {
                return (captures[1].to_string(), charge);
            }
        }
        // A slash suffix outside the charge window is left verbatim
        return (trimmed.to_string(), 1);
    }

    if let Some(captures) = TRAILING_DIGITS.captures(trimmed) {
        if let Ok(charge) = captures[2].parse::<u32>() {
            if (1..=MAX_CHARGE).contains(&charge) {
                return (captures[1].to_string(), charge);
            }
        }
    }

    (trimmed.to_string(), 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_notation() {
        assert_eq!(parse_charge_notation("PEPTIDE/2"), ("PEPTIDE".to_string(), 2));
        assert_eq!(parse_charge_notation("PEPTIDE/3"), ("PEPTIDE".to_string(), 3));
        assert_eq!(parse_charge_notation("SEQUENCE/5"), ("SEQUENCE".to_string(), 5));
        assert_eq!(parse_charge_notation("PEPTIDE/20"), ("PEPTIDE".to_string(), 20));
    }

    #[test]
    fn trailing_digit_notation() {
        assert_eq!(parse_charge_notation("PEPTIDE2"), ("PEPTIDE".to_string(), 2));
        assert_eq!(parse_charge_notation("SEQUENCE3"), ("SEQUENCE".to_string(), 3));
        assert_eq!(parse_charge_notation("PROTEIN4"), ("PROTEIN".to_string(), 4));
    }

    #[test]
    fn no_notation() {
        assert_eq!(parse_charge_notation("PEPTIDE"), ("PEPTIDE".to_string(), 1));
        assert_eq!(
            parse_charge_notation("SIMPLESEQUENCE"),
            ("SIMPLESEQUENCE".to_string(), 1)
        );
    }

    #[test]
    fn leading_dot_is_preserved() {
        assert_eq!(parse_charge_notation(".PEPTIDE/2"), (".PEPTIDE".to_string(), 2));
        assert_eq!(parse_charge_notation(".SEQUENCE3"), (".SEQUENCE".to_string(), 3));
    }

    #[test]
    fn out_of_window_suffix_is_kept() {
        assert_eq!(parse_charge_notation("PEPTIDE/25"), ("PEPTIDE/25".to_string(), 1));
        assert_eq!(parse_charge_notation("PEPTIDE/0"), ("PEPTIDE/0".to_string(), 1));
        assert_eq!(parse_charge_notation("PEPTIDE30"), ("PEPTIDE30".to_string(), 1));
    }

    #[test]
    fn edge_cases() {
        assert_eq!(parse_charge_notation(""), (String::new(), 1));
        assert_eq!(parse_charge_notation("/2"), (String::new(), 2));
        assert_eq!(parse_charge_notation("  PEPTIDE/2  "), ("PEPTIDE".to_string(), 2));
    }

    #[test]
    fn full_charge_window() {
        for charge in 1..=MAX_CHARGE {
            let input = format!("SEQ/{charge}");
            assert_eq!(parse_charge_notation(&input), ("SEQ".to_string(), charge));
        }
        assert_eq!(parse_charge_notation("SEQ/21"), ("SEQ/21".to_string(), 1));
    }
}
