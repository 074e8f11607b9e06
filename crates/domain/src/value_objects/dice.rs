//! Dice expressions and rolling
//!
//! Supports formulas like "2d6+3", "1d8+1d4-1", "d100" or "3D6 - 2".
//! A formula is a sum of signed terms; each term is either a group of dice
//! (`NdS`, `dS` meaning one die) or a flat number. At least one dice term is
//! required. Randomness is injected by the caller as `roll_die(min, max)`,
//! which must return a value in the closed range `[min, max]`.
//!
//! Formulas are capped at [`MAX_TERMS`] terms and [`MAX_DICE`] dice in total.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Most terms a formula may have
pub const MAX_TERMS: usize = 20;
/// Most dice a formula may roll, across all terms
pub const MAX_DICE: u32 = 100;

/// Error when parsing a dice formula
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceParseError {
    /// The formula string is empty
    #[error("Empty dice formula")]
    Empty,
    /// Invalid format - expected terms like XdY or Z joined by + or -
    #[error("Invalid dice format: {0}")]
    InvalidFormat(String),
    /// Dice count must be at least 1
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,
    /// Die size must be at least 2
    #[error("Die size must be at least 2")]
    InvalidDieSize,
    /// Modifier overflow
    #[error("Modifier value overflow")]
    ModifierOverflow,
    /// More terms or dice than a single roll may use
    #[error("Dice formula too large: at most {MAX_TERMS} terms and {MAX_DICE} dice")]
    TooLarge,
}

/// One term of a dice formula, before its sign is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceTerm {
    /// Roll `count` dice with `sides` faces each
    Dice { count: u8, sides: u16 },
    /// Add a fixed amount
    Flat(i32),
}

/// A term together with the sign it contributes with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedTerm {
    pub negative: bool,
    pub term: DiceTerm,
}

impl SignedTerm {
    fn sign(&self) -> i32 {
        if self.negative {
            -1
        } else {
            1
        }
    }
}

/// A parsed dice formula like "2d6+3"
///
/// Serialized as its canonical string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceFormula {
    terms: Vec<SignedTerm>,
}

impl DiceFormula {
    /// Parse a dice formula string
    ///
    /// Whitespace is ignored and the `d` separator is case-insensitive.
    pub fn parse(input: &str) -> Result<Self, DiceParseError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if compact.is_empty() {
            return Err(DiceParseError::Empty);
        }

        let mut terms = Vec::new();
        let mut rest = compact.as_str();
        let mut negative = false;
        if let Some(stripped) = rest.strip_prefix('-') {
            negative = true;
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('+') {
            rest = stripped;
        }

        loop {
            let end = rest.find(['+', '-']).unwrap_or(rest.len());
            let chunk = &rest[..end];
            if chunk.is_empty() {
                return Err(DiceParseError::InvalidFormat(format!(
                    "Missing term in '{}'",
                    compact
                )));
            }
            if terms.len() == MAX_TERMS {
                return Err(DiceParseError::TooLarge);
            }
            terms.push(SignedTerm {
                negative,
                term: parse_term(chunk)?,
            });

            if end == rest.len() {
                break;
            }
            negative = rest.as_bytes()[end] == b'-';
            rest = &rest[end + 1..];
        }

        let dice_count: u32 = terms
            .iter()
            .map(|t| match t.term {
                DiceTerm::Dice { count, .. } => u32::from(count),
                DiceTerm::Flat(_) => 0,
            })
            .sum();
        if dice_count > MAX_DICE {
            return Err(DiceParseError::TooLarge);
        }
        if dice_count == 0 {
            return Err(DiceParseError::InvalidFormat(format!(
                "Missing 'd' separator in '{}'",
                compact
            )));
        }

        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[SignedTerm] {
        &self.terms
    }

    /// Sum of all flat terms
    pub fn modifier(&self) -> i32 {
        self.terms
            .iter()
            .filter_map(|t| match t.term {
                DiceTerm::Flat(value) => Some(t.sign().saturating_mul(value)),
                DiceTerm::Dice { .. } => None,
            })
            .fold(0i32, i32::saturating_add)
    }

    /// Roll every dice term and add the flat terms
    pub fn roll(&self, mut roll_die: impl FnMut(i32, i32) -> i32) -> DiceRollResult {
        let mut individual_rolls = Vec::new();
        let mut dice_total = 0i32;

        for signed in &self.terms {
            if let DiceTerm::Dice { count, sides } = signed.term {
                for _ in 0..count {
                    let roll = roll_die(1, i32::from(sides));
                    individual_rolls.push(roll);
                    dice_total = dice_total.saturating_add(signed.sign() * roll);
                }
            }
        }

        let modifier = self.modifier();
        DiceRollResult {
            formula: self.clone(),
            individual_rolls,
            dice_total,
            modifier_applied: modifier,
            total: dice_total.saturating_add(modifier),
        }
    }
}

fn validate_dice(count: u8, sides: u16) -> Result<(), DiceParseError> {
    if count == 0 {
        return Err(DiceParseError::InvalidDiceCount);
    }
    if sides < 2 {
        return Err(DiceParseError::InvalidDieSize);
    }
    Ok(())
}

fn parse_term(chunk: &str) -> Result<DiceTerm, DiceParseError> {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let Some(d_pos) = chunk.find('d') else {
        if !all_digits(chunk) {
            return Err(DiceParseError::InvalidFormat(format!(
                "Invalid term: '{}'",
                chunk
            )));
        }
        return chunk
            .parse::<i32>()
            .map(DiceTerm::Flat)
            .map_err(|_| DiceParseError::ModifierOverflow);
    };

    let count_str = &chunk[..d_pos];
    let sides_str = &chunk[d_pos + 1..];

    // "d20" means "1d20"
    let count: u8 = if count_str.is_empty() {
        1
    } else if all_digits(count_str) {
        count_str.parse().map_err(|_| {
            DiceParseError::InvalidFormat(format!("Invalid dice count: '{}'", count_str))
        })?
    } else {
        return Err(DiceParseError::InvalidFormat(format!(
            "Invalid dice count: '{}'",
            count_str
        )));
    };

    if !all_digits(sides_str) {
        return Err(DiceParseError::InvalidFormat(format!(
            "Invalid die size: '{}'",
            sides_str
        )));
    }
    let sides: u16 = sides_str.parse().map_err(|_| {
        DiceParseError::InvalidFormat(format!("Invalid die size: '{}'", sides_str))
    })?;

    validate_dice(count, sides)?;
    Ok(DiceTerm::Dice { count, sides })
}

impl FromStr for DiceFormula {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceFormula {
    type Error = DiceParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceFormula> for String {
    fn from(value: DiceFormula) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, signed) in self.terms.iter().enumerate() {
            if signed.negative {
                write!(f, "-")?;
            } else if i > 0 {
                write!(f, "+")?;
            }
            match signed.term {
                DiceTerm::Dice { count, sides } => write!(f, "{}d{}", count, sides)?,
                DiceTerm::Flat(value) => write!(f, "{}", value)?,
            }
        }
        Ok(())
    }
}

/// Result of rolling dice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceRollResult {
    /// The formula that was rolled
    pub formula: DiceFormula,
    /// Individual die faces, in term order
    pub individual_rolls: Vec<i32>,
    /// Signed sum of dice before flat terms
    pub dice_total: i32,
    /// Sum of flat terms that was applied
    pub modifier_applied: i32,
    /// Final total (dice_total + modifier)
    pub total: i32,
}

impl DiceRollResult {
    /// Format as a breakdown string (e.g., "1d20(14) + 5 = 19" or "2d6[4, 5] + 3 = 12")
    pub fn breakdown(&self) -> String {
        let mut faces = self.individual_rolls.iter();
        let mut out = String::new();

        for (i, signed) in self.formula.terms().iter().enumerate() {
            match (i, signed.negative) {
                (0, true) => out.push('-'),
                (0, false) => {}
                (_, true) => out.push_str(" - "),
                (_, false) => out.push_str(" + "),
            }
            match signed.term {
                DiceTerm::Dice { count, sides } => {
                    let rolled: Vec<String> = faces
                        .by_ref()
                        .take(usize::from(count))
                        .map(|r| r.to_string())
                        .collect();
                    if count == 1 {
                        out.push_str(&format!("{}d{}({})", count, sides, rolled.join("")));
                    } else {
                        out.push_str(&format!("{}d{}[{}]", count, sides, rolled.join(", ")));
                    }
                }
                DiceTerm::Flat(value) => out.push_str(&value.to_string()),
            }
        }

        format!("{} = {}", out, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: i32) -> impl FnMut(i32, i32) -> i32 {
        move |_, _| value
    }

    fn sequence(values: Vec<i32>) -> impl FnMut(i32, i32) -> i32 {
        let mut iter = values.into_iter();
        move |min, _| iter.next().unwrap_or(min)
    }

    #[test]
    fn test_parse_multiple_dice_with_modifier() {
        let formula = DiceFormula::parse("2d6+3").unwrap();
        assert_eq!(
            formula.terms(),
            &[
                SignedTerm {
                    negative: false,
                    term: DiceTerm::Dice { count: 2, sides: 6 }
                },
                SignedTerm {
                    negative: false,
                    term: DiceTerm::Flat(3)
                },
            ]
        );
        assert_eq!(formula.modifier(), 3);
    }

    #[test]
    fn test_parse_shorthand_d100() {
        let formula = DiceFormula::parse("d100").unwrap();
        assert_eq!(formula.to_string(), "1d100");
    }

    #[test]
    fn test_parse_negative_modifier() {
        let formula = DiceFormula::parse("1d20-3").unwrap();
        assert_eq!(formula.modifier(), -3);
        assert_eq!(formula.to_string(), "1d20-3");
    }

    #[test]
    fn test_parse_combined_dice_groups() {
        let formula = DiceFormula::parse("1d8 + 1D4 - 1").unwrap();
        assert_eq!(formula.terms().len(), 3);
        assert_eq!(formula.to_string(), "1d8+1d4-1");
    }

    #[test]
    fn test_parse_rejects_too_many_dice() {
        assert!(matches!(
            DiceFormula::parse("255d65535"),
            Err(DiceParseError::TooLarge)
        ));
        assert!(matches!(
            DiceFormula::parse("60d6+41d6"),
            Err(DiceParseError::TooLarge)
        ));
        assert!(DiceFormula::parse("50d6+50d6").is_ok());
    }

    #[test]
    fn test_parse_rejects_too_many_terms() {
        let long = vec!["1d4"; MAX_TERMS + 1].join("+");
        assert!(matches!(DiceFormula::parse(&long), Err(DiceParseError::TooLarge)));

        let huge = vec!["255d65535"; 20_000].join("+");
        assert!(matches!(DiceFormula::parse(&huge), Err(DiceParseError::TooLarge)));

        let limit = vec!["1d4"; MAX_TERMS].join("+");
        assert!(DiceFormula::parse(&limit).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(DiceFormula::parse("   "), Err(DiceParseError::Empty)));
    }

    #[test]
    fn test_parse_rejects_words() {
        assert!(matches!(
            DiceFormula::parse("banana"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_flat_only() {
        assert!(matches!(
            DiceFormula::parse("5+3"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_dangling_operator() {
        assert!(matches!(
            DiceFormula::parse("2d6+"),
            Err(DiceParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            DiceFormula::parse("2d6++3"),
            Err(DiceParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_invalid_zero_dice() {
        assert!(matches!(
            DiceFormula::parse("0d20"),
            Err(DiceParseError::InvalidDiceCount)
        ));
    }

    #[test]
    fn test_parse_invalid_die_size() {
        assert!(matches!(
            DiceFormula::parse("1d1"),
            Err(DiceParseError::InvalidDieSize)
        ));
    }

    #[test]
    fn test_parse_modifier_overflow() {
        assert!(matches!(
            DiceFormula::parse("1d6+99999999999"),
            Err(DiceParseError::ModifierOverflow)
        ));
    }

    #[test]
    fn test_roll_passes_die_bounds() {
        let formula = DiceFormula::parse("3d8").unwrap();
        let mut seen = Vec::new();
        formula.roll(|min, max| {
            seen.push((min, max));
            min
        });
        assert_eq!(seen, vec![(1, 8), (1, 8), (1, 8)]);
    }

    #[test]
    fn test_roll_sums_signed_terms() {
        let formula = DiceFormula::parse("2d6+3-1d4").unwrap();
        let result = formula.roll(sequence(vec![4, 5, 2]));
        assert_eq!(result.individual_rolls, vec![4, 5, 2]);
        assert_eq!(result.dice_total, 7);
        assert_eq!(result.modifier_applied, 3);
        assert_eq!(result.total, 10);
    }

    #[test]
    fn test_breakdown_single_die() {
        let formula = DiceFormula::parse("1d20+5").unwrap();
        assert_eq!(formula.roll(fixed(14)).breakdown(), "1d20(14) + 5 = 19");
    }

    #[test]
    fn test_breakdown_multiple_groups() {
        let formula = DiceFormula::parse("2d6-1d4-1").unwrap();
        let result = formula.roll(sequence(vec![4, 5, 3]));
        assert_eq!(result.breakdown(), "2d6[4, 5] - 1d4(3) - 1 = 5");
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let formula = DiceFormula::parse("2D6 + 3").unwrap();
        assert_eq!(serde_json::to_string(&formula).unwrap(), "\"2d6+3\"");
        let back: DiceFormula = serde_json::from_str("\"2d6+3\"").unwrap();
        assert_eq!(back, formula);
        assert!(serde_json::from_str::<DiceFormula>("\"banana\"").is_err());
    }
}
