//! Actor entity - a character sheet and the items it owns.

use serde::{Deserialize, Serialize};

use crate::derivation::{derive_actor_stats, SkillCategories};
use crate::error::DomainError;
use crate::ids::{ActorId, ItemId};
use crate::value_objects::SkillCheck;

use super::item::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// Player character; spends skill points
    Hero,
    Npc,
    Threat,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Npc => "npc",
            Self::Threat => "threat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPoints {
    /// Configured budget
    #[serde(default)]
    pub total: i32,
    /// Derived: `total` minus points invested in skills. Heroes only.
    #[serde(default)]
    pub remaining: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    #[serde(default)]
    pub skill_points: SkillPoints,
    #[serde(default)]
    pub items: Vec<Item>,
    /// Derived, rebuilt on every recompute
    #[serde(default)]
    pub skill_categories: SkillCategories,
}

impl Actor {
    pub fn new(
        name: impl Into<String>,
        kind: ActorKind,
        skill_points_total: i32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Actor name cannot be empty"));
        }
        let mut actor = Self {
            id: ActorId::new(),
            name,
            kind,
            skill_points: SkillPoints {
                total: skill_points_total,
                remaining: None,
            },
            items: Vec::new(),
            skill_categories: SkillCategories::default(),
        };
        actor.recompute();
        Ok(actor)
    }

    /// Rebuild every derived field from the current items.
    ///
    /// Must be called after any change to skills or the skill-point budget.
    /// Idempotent.
    pub fn recompute(&mut self) {
        let stats = derive_actor_stats(self.kind, self.skill_points.total, &self.items);

        for derived in &stats.skills {
            if let Some(skill) = self
                .items
                .iter_mut()
                .find(|item| item.id == derived.id)
                .and_then(Item::as_skill_mut)
            {
                skill.category_modifier = derived.category_modifier;
                skill.total_value = derived.total_value;
            }
        }

        self.skill_categories = stats.skill_categories;
        self.skill_points.remaining = stats.skill_points_remaining;
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Actor name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_skill_points_total(&mut self, total: i32) {
        self.skill_points.total = total;
        self.recompute();
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn skill_count(&self) -> usize {
        self.items.iter().filter(|i| i.as_skill().is_some()).count()
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
        self.recompute();
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item>) {
        self.items.extend(items);
        self.recompute();
    }

    /// Replace an owned item in place, keeping its position and id.
    pub fn replace_item(&mut self, id: ItemId, mut item: Item) -> Result<(), DomainError> {
        let slot = self
            .items
            .iter_mut()
            .find(|existing| existing.id == id)
            .ok_or_else(|| DomainError::not_found("Item", id.to_string()))?;
        item.id = id;
        *slot = item;
        self.recompute();
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<Item, DomainError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| DomainError::not_found("Item", id.to_string()))?;
        let removed = self.items.remove(index);
        self.recompute();
        Ok(removed)
    }

    /// Build a check for one of this actor's skills, optionally with an
    /// owned item. Reads the skill's derived total value.
    pub fn skill_check(
        &self,
        skill_id: ItemId,
        item_id: Option<ItemId>,
    ) -> Result<SkillCheck, DomainError> {
        let skill_item = self
            .item(skill_id)
            .ok_or_else(|| DomainError::not_found("Item", skill_id.to_string()))?;
        let skill = skill_item.as_skill().ok_or_else(|| {
            DomainError::validation(format!("'{}' is not a skill", skill_item.name))
        })?;

        let mut check = SkillCheck::new(skill_item.name.clone(), skill.total_value);
        if let Some(item_id) = item_id {
            let item = self
                .item(item_id)
                .ok_or_else(|| DomainError::not_found("Item", item_id.to_string()))?;
            let roll_item = item.as_roll_item().ok_or_else(|| {
                DomainError::validation(format!("'{}' cannot modify a roll", item.name))
            })?;
            check = check.with_item(roll_item);
        }
        Ok(check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::default_hero_skills;
    use crate::value_objects::SkillCategory;

    fn hero_with(skills: &[(&str, SkillCategory, u32)]) -> Actor {
        let mut actor = Actor::new("Alex", ActorKind::Hero, 50).unwrap();
        actor.add_items(
            skills
                .iter()
                .map(|(name, category, base)| Item::skill(*name, *category, *base).unwrap()),
        );
        actor
    }

    #[test]
    fn recompute_writes_derived_fields_back() {
        let actor = hero_with(&[
            ("Schießen", SkillCategory::Handeln, 12),
            ("Ausweichen", SkillCategory::Handeln, 15),
            ("Klettern", SkillCategory::Handeln, 13),
        ]);

        for item in &actor.items {
            let skill = item.as_skill().unwrap();
            assert_eq!(skill.category_modifier, 4);
            assert_eq!(skill.total_value, skill.base_value as i32 + 4);
        }
        assert_eq!(actor.skill_categories.handeln.total_base, 40);
        assert_eq!(actor.skill_points.remaining, Some(10));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut actor = hero_with(&[
            ("Schießen", SkillCategory::Handeln, 12),
            ("Fantasie", SkillCategory::Soziales, 7),
        ]);
        let first = actor.clone();
        actor.recompute();
        assert_eq!(actor, first);
        actor.recompute();
        assert_eq!(actor, first);
    }

    #[test]
    fn stale_client_values_are_overwritten() {
        let mut actor = hero_with(&[("Schießen", SkillCategory::Handeln, 20)]);
        let id = actor.items[0].id;
        let mut tampered = actor.items[0].clone();
        if let Some(skill) = tampered.as_skill_mut() {
            skill.total_value = 99;
            skill.category_modifier = 9;
        }
        actor.replace_item(id, tampered).unwrap();

        let skill = actor.item(id).unwrap().as_skill().unwrap();
        assert_eq!(skill.category_modifier, 2);
        assert_eq!(skill.total_value, 22);
    }

    #[test]
    fn removing_a_skill_updates_its_bucket() {
        let mut actor = hero_with(&[
            ("Schießen", SkillCategory::Handeln, 20),
            ("Ausweichen", SkillCategory::Handeln, 10),
        ]);
        let removed = actor.items[0].id;
        actor.remove_item(removed).unwrap();

        assert_eq!(actor.skill_categories.handeln.total_base, 10);
        assert_eq!(actor.skill_categories.handeln.skills.len(), 1);
        assert_eq!(actor.items[0].as_skill().unwrap().total_value, 11);
        assert_eq!(actor.skill_points.remaining, Some(40));
    }

    #[test]
    fn budget_change_recomputes_remaining() {
        let mut actor = hero_with(&[("Schießen", SkillCategory::Handeln, 30)]);
        actor.set_skill_points_total(20);
        assert_eq!(actor.skill_points.remaining, Some(-10));
    }

    #[test]
    fn replacing_unknown_item_is_not_found() {
        let mut actor = hero_with(&[]);
        let stray = Item::skill("Kochen", SkillCategory::Other, 1).unwrap();
        let err = actor.replace_item(stray.id, stray.clone()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[test]
    fn rejects_blank_names() {
        assert!(Actor::new("  ", ActorKind::Hero, 0).is_err());
        let mut actor = hero_with(&[]);
        assert!(actor.rename("").is_err());
        assert_eq!(actor.name, "Alex");
    }

    #[test]
    fn skill_check_reads_total_value_and_item() {
        let mut actor = hero_with(&[("Schießen", SkillCategory::Handeln, 40)]);
        let pistol = Item::equipment("Pistole", 10, Some("2d6+3".to_string())).unwrap();
        let pistol_id = pistol.id;
        actor.add_item(pistol);
        let skill_id = actor.items[0].id;

        let check = actor.skill_check(skill_id, Some(pistol_id)).unwrap();
        assert_eq!(check.skill_name, "Schießen");
        assert_eq!(check.skill_value, 44);
        assert_eq!(check.effective_target(), 54);
    }

    #[test]
    fn skill_check_rejects_non_skill_and_non_equipment() {
        let mut actor = Actor::new("Alex", ActorKind::Hero, 50).unwrap();
        actor.add_items(default_hero_skills().unwrap());
        let pistol = Item::equipment("Pistole", 10, None).unwrap();
        let pistol_id = pistol.id;
        actor.add_item(pistol);
        let skill_id = actor.items[0].id;
        let other_skill_id = actor.items[1].id;

        assert!(matches!(
            actor.skill_check(pistol_id, None),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            actor.skill_check(skill_id, Some(other_skill_id)),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn deserialized_actor_defaults_missing_budget_to_zero() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "Alex",
            "kind": "hero"
        }"#;
        let mut actor: Actor = serde_json::from_str(json).unwrap();
        actor.recompute();
        assert_eq!(actor.skill_points.total, 0);
        assert_eq!(actor.skill_points.remaining, Some(0));
    }
}
