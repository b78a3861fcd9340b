//! Room wire shapes and the numeric roll path.
//!
//! Rolls broadcast to a shared room are resolved numerically: one random
//! fraction per die, mapped through the die's inclusive numeric range. This
//! path is independent of (and much simpler than) physical settle
//! detection; it only serves network-synchronized rolls. Transport
//! semantics live elsewhere; this module defines only the message shapes
//! exchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dice::DieKind;

/// An ordered list of die-type tags plus a flat constant, e.g. `2d6+d20+3`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notation {
    pub dice: Vec<DieKind>,
    pub constant: i32,
}

impl Notation {
    /// Parse terms joined by `+`: either `[count]dX` or an integer
    /// constant. Counts expand in place, so `2d6` contributes two entries.
    pub fn parse(s: &str) -> Result<Notation, String> {
        let mut notation = Notation::default();
        for term in s.split('+') {
            let term = term.trim().to_lowercase();
            if term.is_empty() {
                return Err(format!("empty term in notation: {s}"));
            }
            if let Ok(constant) = term.parse::<i32>() {
                notation.constant += constant;
                continue;
            }
            let (count_str, die_str) = match term.find('d') {
                Some(0) => ("1", term.as_str()),
                Some(pos) => (&term[..pos], &term[pos..]),
                None => {
                    return Err(format!(
                        "invalid term: {term}. Use formats like '2d6', 'd20' or '3'"
                    ))
                }
            };
            let count: usize = count_str
                .parse()
                .map_err(|_| format!("invalid count: {count_str}"))?;
            let kind = DieKind::parse(die_str).ok_or_else(|| {
                format!("unknown die type: {die_str}. Valid: d4, d6, d8, d10, d12, d20, d100")
            })?;
            notation.dice.extend(std::iter::repeat(kind).take(count));
        }
        Ok(notation)
    }
}

/// Messages exchanged with the room channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomMessage {
    Join {
        name: String,
        color: String,
        room: String,
    },
    Leave {
        name: String,
    },
    RollRequest {
        roller: String,
        notation: Notation,
    },
    RollResult {
        roller: String,
        notation: Notation,
        values: Vec<u32>,
        total: i64,
    },
}

/// Supplies random fractions in `[0, 1)`, one per die. A short result is
/// legal (the resolver fills the shortfall locally), so a flaky network
/// service never fails a roll.
pub trait RandomSource {
    fn fractions(&mut self, count: usize) -> Vec<f64>;
}

/// Pseudo-random local source; also the fallback generator.
pub struct LocalRandom(StdRng);

impl LocalRandom {
    pub fn new() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for LocalRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for LocalRandom {
    fn fractions(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.0.gen::<f64>()).collect()
    }
}

/// A resolved numeric roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    pub values: Vec<u32>,
    pub total: i64,
}

/// Numeric face value for one die. The d10 family rolls on `[0, 9]`: a raw
/// value of 10 wraps to 0, and the percentile tens die scales by ten.
pub fn network_value(kind: DieKind, fraction: f64) -> u32 {
    match kind {
        DieKind::D10 => wrap_d10(fraction),
        DieKind::D100 => wrap_d10(fraction) * 10,
        _ => (fraction * kind.max_value() as f64) as u32 + 1,
    }
}

fn wrap_d10(fraction: f64) -> u32 {
    let raw = (fraction * 10.0) as u32 + 1;
    if raw == 10 {
        0
    } else {
        raw
    }
}

/// Resolve a roll request: one fraction per die from `source`, local
/// fill-in for any shortfall, values mapped per kind, constant added to
/// the total.
pub fn resolve_roll(notation: &Notation, source: &mut dyn RandomSource) -> RollOutcome {
    let need = notation.dice.len();
    let mut fractions = source.fractions(need);
    if fractions.len() < need {
        warn!(
            got = fractions.len(),
            need, "randomness source came up short; filling locally"
        );
        let mut local = LocalRandom::new();
        fractions.extend(local.fractions(need - fractions.len()));
    }
    fractions.truncate(need);

    let values: Vec<u32> = notation
        .dice
        .iter()
        .zip(&fractions)
        .map(|(&kind, &fraction)| network_value(kind, fraction))
        .collect();
    let total = values.iter().map(|&v| i64::from(v)).sum::<i64>() + i64::from(notation.constant);
    RollOutcome { values, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(Vec<f64>);

    impl RandomSource for FixedSource {
        fn fractions(&mut self, count: usize) -> Vec<f64> {
            self.0.iter().copied().take(count).collect()
        }
    }

    #[test]
    fn notation_parses_counts_dice_and_constants() {
        let notation = Notation::parse("2d6+d20+3").unwrap();
        assert_eq!(
            notation.dice,
            vec![DieKind::D6, DieKind::D6, DieKind::D20]
        );
        assert_eq!(notation.constant, 3);
    }

    #[test]
    fn notation_rejects_garbage() {
        assert!(Notation::parse("2x6").is_err());
        assert!(Notation::parse("d7").is_err());
        assert!(Notation::parse("").is_err());
    }

    #[test]
    fn network_values_cover_the_inclusive_range() {
        assert_eq!(network_value(DieKind::D6, 0.0), 1);
        assert_eq!(network_value(DieKind::D6, 0.999), 6);
        assert_eq!(network_value(DieKind::D20, 0.5), 11);
        // d10 family: raw 10 wraps to 0.
        assert_eq!(network_value(DieKind::D10, 0.95), 0);
        assert_eq!(network_value(DieKind::D10, 0.0), 1);
        assert_eq!(network_value(DieKind::D100, 0.95), 0);
        assert_eq!(network_value(DieKind::D100, 0.35), 40);
    }

    #[test]
    fn short_source_is_filled_locally() {
        let notation = Notation::parse("3d6").unwrap();
        let mut source = FixedSource(vec![0.0]);
        let outcome = resolve_roll(&notation, &mut source);
        assert_eq!(outcome.values.len(), 3);
        assert_eq!(outcome.values[0], 1);
        for &value in &outcome.values {
            assert!((1..=6).contains(&value));
        }
    }

    #[test]
    fn totals_include_the_constant() {
        let notation = Notation::parse("d6+4").unwrap();
        let mut source = FixedSource(vec![0.999]);
        let outcome = resolve_roll(&notation, &mut source);
        assert_eq!(outcome.total, 10);
    }

    #[test]
    fn messages_round_trip_as_json() {
        let message = RoomMessage::RollRequest {
            roller: "ada".into(),
            notation: Notation::parse("d100+d10").unwrap(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"roll_request\""));
        let back: RoomMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, message);
    }
}
