//! Item use cases.
//!
//! Items are owned by exactly one actor and stored with it, so every item
//! mutation is an actor mutation followed by a recompute.

use std::sync::Arc;

use herosheet_domain::{self as domain, ActorId, Item, ItemData, ItemId};

use super::actor::{load, ActorError};
use crate::entities::Actor;

/// Add, update and remove items on an actor.
pub struct ItemOps {
    actor: Arc<Actor>,
}

impl ItemOps {
    pub fn new(actor: Arc<Actor>) -> Self {
        Self { actor }
    }

    /// Returns the updated actor and the id assigned to the new item.
    pub async fn add(
        &self,
        actor_id: ActorId,
        name: String,
        data: ItemData,
    ) -> Result<(domain::Actor, ItemId), ActorError> {
        let item = Item::new(name, data)?;
        let item_id = item.id;
        let kind = item.kind();

        let _guard = self.actor.lock(actor_id).await;
        let mut actor = load(&self.actor, actor_id).await?;
        actor.add_item(item);
        self.actor.save(&actor).await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            kind = kind.as_str(),
            "Item added"
        );
        Ok((actor, item_id))
    }

    /// Replace an item's name and data. Derived skill fields sent by the
    /// caller are ignored.
    pub async fn update(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
        name: String,
        data: ItemData,
    ) -> Result<domain::Actor, ActorError> {
        let item = Item::new(name, data)?;
        let kind = item.kind();

        let _guard = self.actor.lock(actor_id).await;
        let mut actor = load(&self.actor, actor_id).await?;
        actor.replace_item(item_id, item)?;
        self.actor.save(&actor).await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            kind = kind.as_str(),
            "Item updated"
        );
        Ok(actor)
    }

    pub async fn remove(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
    ) -> Result<domain::Actor, ActorError> {
        let _guard = self.actor.lock(actor_id).await;
        let mut actor = load(&self.actor, actor_id).await?;
        let removed = actor.remove_item(item_id)?;
        self.actor.save(&actor).await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            kind = removed.kind().as_str(),
            name = %removed.name,
            "Item removed"
        );
        Ok(actor)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::infrastructure::memory::InMemoryActorRepo;
    use crate::infrastructure::ports::{ActorRepo, MockActorRepo};
    use domain::{ActorKind, DomainError, EquipmentData, SkillCategory, SkillData};

    struct Fixture {
        ops: ItemOps,
        saved: Arc<Mutex<Vec<domain::Actor>>>,
        actor_id: ActorId,
        skill_id: ItemId,
    }

    /// A hero with one Handeln skill at 20 points.
    fn fixture() -> Fixture {
        let mut hero = domain::Actor::new("Alex", ActorKind::Hero, 50).unwrap();
        hero.add_item(Item::skill("Schießen", SkillCategory::Handeln, 20).unwrap());
        let actor_id = hero.id;
        let skill_id = hero.items[0].id;

        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = saved.clone();
        let mut repo = MockActorRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(hero.clone())));
        repo.expect_save().returning(move |actor| {
            sink.lock().unwrap().push(actor.clone());
            Ok(())
        });

        Fixture {
            ops: ItemOps::new(Arc::new(Actor::new(Arc::new(repo)))),
            saved,
            actor_id,
            skill_id,
        }
    }

    #[tokio::test]
    async fn adding_a_skill_recomputes_the_bucket() {
        let f = fixture();
        let (actor, new_id) = f
            .ops
            .add(
                f.actor_id,
                "Ausweichen".to_string(),
                ItemData::Skill(SkillData::new(SkillCategory::Handeln, 15)),
            )
            .await
            .unwrap();

        assert_eq!(actor.skill_categories.handeln.total_base, 35);
        assert_eq!(actor.skill_categories.handeln.skills, vec![f.skill_id, new_id]);
        for item in &actor.items {
            assert_eq!(item.as_skill().unwrap().category_modifier, 3);
        }
        assert_eq!(actor.skill_points.remaining, Some(15));
        assert_eq!(f.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn adding_equipment_leaves_skills_untouched() {
        let f = fixture();
        let (actor, _) = f
            .ops
            .add(
                f.actor_id,
                "Pistole".to_string(),
                ItemData::Equipment(EquipmentData {
                    roll_modifier: 10,
                    damage: Some("2d6+3".to_string()),
                    ..EquipmentData::default()
                }),
            )
            .await
            .unwrap();

        assert_eq!(actor.items.len(), 2);
        assert_eq!(actor.skill_points.remaining, Some(30));
    }

    #[tokio::test]
    async fn update_ignores_client_derived_values() {
        let f = fixture();
        let mut data = SkillData::new(SkillCategory::Wissen, 40);
        data.total_value = 999;
        data.category_modifier = 99;

        let actor = f
            .ops
            .update(f.actor_id, f.skill_id, "Geschichte".to_string(), ItemData::Skill(data))
            .await
            .unwrap();

        let item = actor.item(f.skill_id).unwrap();
        let skill = item.as_skill().unwrap();
        assert_eq!(item.name, "Geschichte");
        assert_eq!(skill.category_modifier, 4);
        assert_eq!(skill.total_value, 44);
        assert!(actor.skill_categories.handeln.skills.is_empty());
        assert_eq!(actor.skill_points.remaining, Some(10));
    }

    #[tokio::test]
    async fn remove_drops_skill_points_spent() {
        let f = fixture();
        let actor = f.ops.remove(f.actor_id, f.skill_id).await.unwrap();

        assert!(actor.items.is_empty());
        assert_eq!(actor.skill_points.remaining, Some(50));
        assert_eq!(actor.skill_categories.handeln.total_base, 0);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found_and_not_saved() {
        let f = fixture();
        let err = f.ops.remove(f.actor_id, ItemId::new()).await.unwrap_err();

        assert!(matches!(err, ActorError::Domain(DomainError::NotFound { .. })));
        assert!(f.saved.lock().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_adds_keep_every_item() {
        let repo = Arc::new(InMemoryActorRepo::new());
        let hero = domain::Actor::new("Alex", ActorKind::Hero, 50).unwrap();
        let actor_id = hero.id;
        repo.save(&hero).await.unwrap();
        let ops = Arc::new(ItemOps::new(Arc::new(Actor::new(repo.clone()))));

        let writers: Vec<_> = (0..200)
            .map(|i| {
                let ops = ops.clone();
                tokio::spawn(async move {
                    ops.add(
                        actor_id,
                        format!("Skill {i}"),
                        ItemData::Skill(SkillData::new(SkillCategory::Wissen, 1)),
                    )
                    .await
                    .map(|(_, item_id)| item_id)
                })
            })
            .collect();

        let mut added = Vec::new();
        for writer in writers {
            added.push(writer.await.unwrap().unwrap());
        }

        let stored = repo.get(actor_id).await.unwrap().unwrap();
        assert_eq!(stored.items.len(), 200);
        assert!(added.iter().all(|id| stored.item(*id).is_some()));
        assert_eq!(stored.skill_points.remaining, Some(-150));
        assert_eq!(stored.skill_categories.wissen.total_base, 200);
    }

    #[tokio::test]
    async fn blank_item_name_is_rejected() {
        let f = fixture();
        let err = f
            .ops
            .add(
                f.actor_id,
                String::new(),
                ItemData::Skill(SkillData::default()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ActorError::Domain(DomainError::Validation(_))));
    }
}
