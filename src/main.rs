use clap::Parser;
use colored::Colorize;
use mz_calc::{
    analyze_peptide_sequence, calculate_peptide_mz, get_modification_info,
    get_square_bracket_examples, get_supported_modifications, DEFAULT_CHARGE,
};
use std::process::exit;

#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(long_about = "Calculate the m/z of a (modified) peptide sequence.

The sequence may carry its own annotations: bracket modifications
(`M[Oxidation]PEPTIDE`, `M[+15.9949]PEPTIDE`, `C[UNIMOD:4]PEPTIDE`),
terminal markers (`.[Acetyl]PEPTIDE`, `PEPTIDE.[Amidated]`) and charge
notation (`PEPTIDE/2`). A charge in the sequence overrides --charge, a
modification in the sequence overrides --modification.")]
struct Args {
    /// The peptide sequence, with optional modification and charge notation
    #[arg()]
    sequence: Option<String>,

    /// The charge state to use when the sequence has no charge notation
    #[arg(short, long, default_value_t = DEFAULT_CHARGE)]
    charge: u32,

    /// A modification to apply when the sequence itself is unmodified, by
    /// its display name (see --modifications)
    #[arg(short, long, default_value = "None")]
    modification: String,

    /// Only analyse the notation, do not calculate
    #[arg(short, long)]
    analyze: bool,

    /// List the supported dropdown modifications
    #[arg(long)]
    modifications: bool,

    /// Show example sequences for all supported notations
    #[arg(long)]
    examples: bool,
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert()
}

fn main() {
    let args = Args::parse();

    if args.modifications {
        println!("Supported modifications:");
        for (name, description) in get_modification_info() {
            println!("  {} {}", format!("{name:24}").green(), description.dimmed());
        }
        return;
    }
    if args.examples {
        println!("Example sequences:");
        for (sequence, description) in get_square_bracket_examples() {
            println!("  {} {}", format!("{sequence:36}").blue(), description.dimmed());
        }
        return;
    }

    let Some(sequence) = args.sequence else {
        eprintln!("No sequence given, see --help for usage");
        exit(1);
    };

    if args.analyze {
        show_analysis(&sequence);
    } else {
        show_calculation(&sequence, args.charge, &args.modification);
    }
}

fn show_analysis(sequence: &str) {
    let analysis = analyze_peptide_sequence(sequence);
    if !analysis.is_valid {
        eprintln!(
            "{} {}",
            "Invalid sequence:".red(),
            analysis.error_message.unwrap_or_default()
        );
        exit(1);
    }
    println!(
        "Clean sequence: {} {}",
        analysis.clean_sequence.green(),
        format!("({} residues)", analysis.clean_sequence.len()).dimmed()
    );
    println!(
        "Modification: {}{}",
        analysis.modification.yellow(),
        if analysis.modification_detected {
            " (from sequence notation)".dimmed()
        } else {
            "".dimmed()
        }
    );
    println!(
        "Charge: {} {}",
        format!("{}+", analysis.charge).yellow(),
        if analysis.charge_detected {
            "(from sequence notation)".dimmed()
        } else {
            "(default)".dimmed()
        }
    );
}

fn show_calculation(sequence: &str, charge: u32, modification: &str) {
    if !get_supported_modifications().contains(&modification) {
        eprintln!(
            "{} unknown modification `{modification}`, see --modifications for the supported list",
            "Error:".red()
        );
        exit(1);
    }
    match calculate_peptide_mz(sequence, charge, modification) {
        Ok(result) => {
            println!(
                "m/z: {} {}",
                format!("{:.6}", result.mz_ratio).yellow(),
                format!("({}+, {})", result.charge_state, result.charge_source).dimmed()
            );
            println!(
                "Monoisotopic mass: {} Da",
                format!("{:.6}", result.monoisotopic_mass).yellow()
            );
            println!("Molecular formula: {}", result.molecular_formula.green());
            println!(
                "Sequence: {} {}",
                result.original_sequence.green(),
                format!("({} residues)", result.sequence_length).dimmed()
            );
            if result.modified_sequence != result.original_sequence {
                println!("Modified sequence: {}", result.modified_sequence.green());
            }
            println!("Modification: {}", result.modification.yellow());
            let composition = result
                .aa_composition
                .iter()
                .map(|(residue, count)| format!("{residue}: {count}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!("Composition: {}", composition.dimmed());
        }
        Err(error) => {
            eprintln!("{} {error}", "Error:".red());
            exit(1);
        }
    }
}
