//! Derived stats - category buckets, skill modifiers, and remaining points.
//!
//! These are NOT authoritative data: everything here is a pure function of
//! the actor's kind, its skill-point budget, and its skills in item order,
//! and is rebuilt from scratch on every recompute.

use serde::{Deserialize, Serialize};

use crate::entities::{ActorKind, Item};
use crate::ids::ItemId;
use crate::value_objects::SkillCategory;

/// Skills sharing a category, and the points invested across them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub total_base: u32,
    /// Skill item ids, in actor item order
    pub skills: Vec<ItemId>,
}

impl CategoryBucket {
    /// `floor(total_base / 10)`
    pub fn modifier(&self) -> i32 {
        i32::try_from(self.total_base / 10).unwrap_or(i32::MAX)
    }
}

/// One bucket per category of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkillCategories {
    #[serde(rename = "Handeln")]
    pub handeln: CategoryBucket,
    #[serde(rename = "Wissen")]
    pub wissen: CategoryBucket,
    #[serde(rename = "Soziales")]
    pub soziales: CategoryBucket,
    #[serde(rename = "Other")]
    pub other: CategoryBucket,
}

impl SkillCategories {
    pub fn get(&self, category: SkillCategory) -> &CategoryBucket {
        match category {
            SkillCategory::Handeln => &self.handeln,
            SkillCategory::Wissen => &self.wissen,
            SkillCategory::Soziales => &self.soziales,
            SkillCategory::Other => &self.other,
        }
    }

    fn get_mut(&mut self, category: SkillCategory) -> &mut CategoryBucket {
        match category {
            SkillCategory::Handeln => &mut self.handeln,
            SkillCategory::Wissen => &mut self.wissen,
            SkillCategory::Soziales => &mut self.soziales,
            SkillCategory::Other => &mut self.other,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkillCategory, &CategoryBucket)> {
        SkillCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// Derived values for a single skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSkill {
    pub id: ItemId,
    pub category_modifier: i32,
    pub total_value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStats {
    pub skill_categories: SkillCategories,
    /// One entry per skill, in item order
    pub skills: Vec<DerivedSkill>,
    /// Only heroes track skill points
    pub skill_points_remaining: Option<i32>,
}

/// Compute every derived field for an actor.
///
/// Non-skill items are ignored. Remaining points may go negative; the
/// deriver does not police overspending.
pub fn derive_actor_stats(
    kind: ActorKind,
    skill_points_total: i32,
    items: &[Item],
) -> DerivedStats {
    let skills = || {
        items
            .iter()
            .filter_map(|item| item.as_skill().map(|skill| (item.id, skill)))
    };

    let mut skill_categories = SkillCategories::default();
    for (id, skill) in skills() {
        let bucket = skill_categories.get_mut(skill.category);
        bucket.total_base = bucket.total_base.saturating_add(skill.base_value);
        bucket.skills.push(id);
    }

    let derived = skills()
        .map(|(id, skill)| {
            let category_modifier = skill_categories.get(skill.category).modifier();
            let base = i32::try_from(skill.base_value).unwrap_or(i32::MAX);
            DerivedSkill {
                id,
                category_modifier,
                total_value: base.saturating_add(category_modifier),
            }
        })
        .collect();

    let skill_points_remaining = match kind {
        ActorKind::Hero => {
            let spent = skills().fold(0u32, |acc, (_, s)| acc.saturating_add(s.base_value));
            let spent = i32::try_from(spent).unwrap_or(i32::MAX);
            Some(skill_points_total.saturating_sub(spent))
        }
        ActorKind::Npc | ActorKind::Threat => None,
    };

    DerivedStats {
        skill_categories,
        skills: derived,
        skill_points_remaining,
    }
}
