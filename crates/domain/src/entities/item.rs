//! Items owned by an actor.
//!
//! Every item has a kind-specific `system` payload. Skills carry the
//! derived fields the stat deriver writes; equipment carries the roll
//! modifier and damage formula used by skill checks; traits are free text.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::ItemId;
use crate::value_objects::{RollItem, SkillCategory};

use super::skill::SkillData;

/// Item kind discriminator, as used in API filters and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Skill,
    Equipment,
    Trait,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Equipment => "equipment",
            Self::Trait => "trait",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentData {
    #[serde(default)]
    pub description: String,
    /// Added to the skill value when rolling with this item
    #[serde(default)]
    pub roll_modifier: i32,
    /// Damage expression rolled on a successful check, e.g. "2d6+3"
    #[serde(default)]
    pub damage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitData {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: String,
}

/// Kind-specific item payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "lowercase")]
pub enum ItemData {
    Skill(SkillData),
    Equipment(EquipmentData),
    Trait(TraitData),
}

impl ItemData {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Skill(_) => ItemKind::Skill,
            Self::Equipment(_) => ItemKind::Equipment,
            Self::Trait(_) => ItemKind::Trait,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(flatten)]
    pub data: ItemData,
}

impl Item {
    pub fn new(name: impl Into<String>, data: ItemData) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Item name cannot be empty"));
        }
        Ok(Self {
            id: ItemId::new(),
            name,
            data,
        })
    }

    pub fn skill(
        name: impl Into<String>,
        category: SkillCategory,
        base_value: u32,
    ) -> Result<Self, DomainError> {
        Self::new(name, ItemData::Skill(SkillData::new(category, base_value)))
    }

    pub fn equipment(
        name: impl Into<String>,
        roll_modifier: i32,
        damage: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::new(
            name,
            ItemData::Equipment(EquipmentData {
                description: String::new(),
                roll_modifier,
                damage,
            }),
        )
    }

    pub fn kind(&self) -> ItemKind {
        self.data.kind()
    }

    pub fn as_skill(&self) -> Option<&SkillData> {
        match &self.data {
            ItemData::Skill(skill) => Some(skill),
            _ => None,
        }
    }

    pub fn as_skill_mut(&mut self) -> Option<&mut SkillData> {
        match &mut self.data {
            ItemData::Skill(skill) => Some(skill),
            _ => None,
        }
    }

    /// Roll-relevant view of this item. Only equipment modifies rolls.
    pub fn as_roll_item(&self) -> Option<RollItem> {
        match &self.data {
            ItemData::Equipment(equipment) => Some(RollItem {
                name: self.name.clone(),
                roll_modifier: equipment.roll_modifier,
                damage: equipment.damage.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names() {
        let err = Item::skill("   ", SkillCategory::Wissen, 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn equipment_becomes_roll_item() {
        let item = Item::equipment("Pistole", 5, Some("1d6+2".to_string())).unwrap();
        let roll_item = item.as_roll_item().unwrap();
        assert_eq!(roll_item.name, "Pistole");
        assert_eq!(roll_item.roll_modifier, 5);
        assert_eq!(roll_item.damage.as_deref(), Some("1d6+2"));
    }

    #[test]
    fn skills_and_traits_do_not_modify_rolls() {
        let skill = Item::skill("Geschichte", SkillCategory::Wissen, 10).unwrap();
        let tr = Item::new("Mutig", ItemData::Trait(TraitData::default())).unwrap();
        assert!(skill.as_roll_item().is_none());
        assert!(tr.as_roll_item().is_none());
    }

    #[test]
    fn deserializes_host_shaped_items() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "Schießen",
            "type": "skill",
            "system": { "baseValue": 12, "category": "Handeln" }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), ItemKind::Skill);
        let skill = item.as_skill().unwrap();
        assert_eq!(skill.base_value, 12);
        assert_eq!(skill.category, SkillCategory::Handeln);
    }

    #[test]
    fn negative_base_value_is_rejected_at_the_boundary() {
        let json = r#"{
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "Schießen",
            "type": "skill",
            "system": { "baseValue": -3 }
        }"#;
        assert!(serde_json::from_str::<Item>(json).is_err());
    }
}
