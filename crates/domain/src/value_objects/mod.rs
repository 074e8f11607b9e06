//! Value objects - Immutable objects defined by their attributes

mod dice;
mod skill_category;
mod skill_check;

pub use dice::{DiceFormula, DiceParseError, DiceRollResult, DiceTerm, SignedTerm};
pub use skill_category::SkillCategory;
pub use skill_check::{RollItem, SkillCheck, SkillCheckOutcome, PERCENTILE_DIE};
