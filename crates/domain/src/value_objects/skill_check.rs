//! Percentile skill checks.
//!
//! A check rolls 1d100 under the skill's total value, optionally shifted by
//! an item's roll modifier. Ties succeed. A successful check with an item that
//! deals damage also rolls the item's damage formula.

use serde::{Deserialize, Serialize};

use super::dice::{DiceFormula, DiceRollResult};

/// Faces on the percentile die.
pub const PERCENTILE_DIE: i32 = 100;

/// The item a check is made with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollItem {
    pub name: String,
    pub roll_modifier: i32,
    /// Raw damage expression as entered on the item sheet
    pub damage: Option<String>,
}

/// Input to a percentile skill check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheck {
    pub skill_name: String,
    /// The skill's derived total value
    pub skill_value: i32,
    pub item: Option<RollItem>,
}

/// Outcome of a percentile skill check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCheckOutcome {
    pub rolled_value: i32,
    pub effective_target: i32,
    pub is_success: bool,
    pub damage: Option<DiceRollResult>,
}

impl SkillCheckOutcome {
    pub fn damage_total(&self) -> Option<i32> {
        self.damage.as_ref().map(|d| d.total)
    }

    /// The damage formula that was rolled, in canonical form
    pub fn damage_formula(&self) -> Option<String> {
        self.damage.as_ref().map(|d| d.formula.to_string())
    }
}

impl SkillCheck {
    pub fn new(skill_name: impl Into<String>, skill_value: i32) -> Self {
        Self {
            skill_name: skill_name.into(),
            skill_value,
            item: None,
        }
    }

    pub fn with_item(mut self, item: RollItem) -> Self {
        self.item = Some(item);
        self
    }

    pub fn roll_modifier(&self) -> i32 {
        self.item.as_ref().map_or(0, |i| i.roll_modifier)
    }

    pub fn effective_target(&self) -> i32 {
        self.skill_value.saturating_add(self.roll_modifier())
    }

    /// Resolve the check.
    ///
    /// `roll_die(min, max)` must return a value in `[min, max]`. It is called
    /// once for the percentile die, then once per damage die on success.
    /// A malformed damage expression never fails the check: it is logged and
    /// the outcome carries no damage.
    pub fn resolve(&self, mut roll_die: impl FnMut(i32, i32) -> i32) -> SkillCheckOutcome {
        let effective_target = self.effective_target();
        let rolled_value = roll_die(1, PERCENTILE_DIE);
        let is_success = rolled_value <= effective_target;

        let damage = match self.item.as_ref().and_then(|i| i.damage.as_deref()) {
            Some(expression) if is_success && !expression.trim().is_empty() => {
                match DiceFormula::parse(expression) {
                    Ok(formula) => Some(formula.roll(&mut roll_die)),
                    Err(e) => {
                        tracing::warn!(
                            skill = %self.skill_name,
                            damage = %expression,
                            error = %e,
                            "Failed to parse damage roll string"
                        );
                        None
                    }
                }
            }
            _ => None,
        };

        SkillCheckOutcome {
            rolled_value,
            effective_target,
            is_success,
            damage,
        }
    }
}
