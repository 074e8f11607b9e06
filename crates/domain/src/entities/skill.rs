//! Skill items and the starter set for new heroes.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::SkillCategory;

use super::item::Item;

/// System data of a skill item.
///
/// `category_modifier` and `total_value` are derived: whatever a client
/// sends for them is overwritten by the next recompute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillData {
    #[serde(default)]
    pub category: SkillCategory,
    /// Points invested by the player
    #[serde(default)]
    pub base_value: u32,
    #[serde(default)]
    pub category_modifier: i32,
    #[serde(default)]
    pub total_value: i32,
    #[serde(default)]
    pub description: String,
}

impl SkillData {
    pub fn new(category: SkillCategory, base_value: u32) -> Self {
        Self {
            category,
            base_value,
            ..Self::default()
        }
    }
}

/// Skills a freshly created hero starts with, all at zero points.
pub fn default_hero_skills() -> Result<Vec<Item>, DomainError> {
    [
        ("Schießen", SkillCategory::Handeln),
        ("Ausweichen", SkillCategory::Handeln),
        ("Geschichte", SkillCategory::Wissen),
        ("Überzeugen", SkillCategory::Soziales),
        ("Fantasie", SkillCategory::Soziales),
    ]
    .into_iter()
    .map(|(name, category)| Item::skill(name, category, 0))
    .collect()
}
