//! Dicetray CLI
//!
//! A command-line polyhedral dice roller driving the same numeric roll
//! path that serves network-synchronized rolls. The d100 entry is the
//! percentile tens die (0, 10, .. 90); pair it with a d10 for a full
//! 1-100 percentile roll, e.g. `--dice d100+d10`.

use std::collections::BTreeMap;

use clap::Parser;
use colored::Colorize;

use dicetray::room::{resolve_roll, LocalRandom, Notation, RollOutcome};
use dicetray::DieKind;

/// Dicetray - roll polyhedral dice from the command line
#[derive(Parser)]
#[command(name = "dicetray")]
#[command(author, version, about = "Roll polyhedral dice from the command line")]
struct Cli {
    /// Dice to roll (e.g. "2d6", "d20", "d100+d10"). Can specify multiple.
    #[arg(short, long, value_parser = parse_notation_arg, required = true)]
    dice: Vec<Notation>,

    /// Flat modifier added to the total
    #[arg(short, long, default_value = "0")]
    modifier: i32,

    /// Seed for reproducible rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Number of times to repeat the roll
    #[arg(short, long, default_value = "1")]
    rolls: u32,
}

fn parse_notation_arg(s: &str) -> Result<Notation, String> {
    Notation::parse(s)
}

fn main() {
    let cli = Cli::parse();

    let mut notation = Notation::default();
    for part in &cli.dice {
        notation.dice.extend(part.dice.iter().copied());
        notation.constant += part.constant;
    }
    notation.constant += cli.modifier;

    let mut source = match cli.seed {
        Some(seed) => LocalRandom::seeded(seed),
        None => LocalRandom::new(),
    };

    for roll in 1..=cli.rolls {
        if cli.rolls > 1 {
            println!("{}", format!("--- Roll {roll} ---").bold());
        }
        let outcome = resolve_roll(&notation, &mut source);
        print_outcome(&notation, &outcome);
    }
}

fn print_outcome(notation: &Notation, outcome: &RollOutcome) {
    // Group results by die kind, keyed by max value for stable ordering
    // (d4 before d6 before d20, however the user ordered the arguments).
    let mut grouped: BTreeMap<u32, (DieKind, Vec<u32>)> = BTreeMap::new();
    for (kind, value) in notation.dice.iter().zip(&outcome.values) {
        grouped
            .entry(kind.max_value())
            .or_insert_with(|| (*kind, Vec::new()))
            .1
            .push(*value);
    }

    for (kind, values) in grouped.values() {
        let sum: u32 = values.iter().sum();
        if values.len() == 1 {
            println!("{}: {}", kind.name().cyan(), values[0].to_string().bold());
        } else {
            let list: Vec<String> = values.iter().map(u32::to_string).collect();
            println!(
                "{}x{}: {} = {}",
                values.len(),
                kind.name().cyan(),
                list.join(" + "),
                sum.to_string().bold()
            );
        }
    }

    if notation.constant != 0 {
        let sign = if notation.constant >= 0 { "+" } else { "" };
        println!("Modifier: {sign}{}", notation.constant);
    }
    println!(
        "{} {}",
        "TOTAL:".green().bold(),
        outcome.total.to_string().green().bold()
    );
}
