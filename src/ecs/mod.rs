//! Per-floor entity registry backed by a `specs` world.
//!
//! Holds monsters, the boss, potions and scrolls. The player and the stairs
//! position live in [`crate::game::GameContext`].

pub mod components;

use std::collections::HashMap;

use bracket_geometry::prelude::Point;
use specs::prelude::{Builder, Entity as SpecsEntity, Join, World as SpecsWorld, WorldExt};

use crate::{
    data::{
        items::{PotionStats, ScrollStats},
        monsters::MonsterStats,
    },
    error::{GameError, Result},
    spawner::{Entity, EntityBody},
};

use self::components::{Monster, Position, Potion, Renderable, Scroll};

/// Registry handle for one entity.
pub type EntityId = SpecsEntity;

pub struct EntityRegistry {
    specs_world: SpecsWorld,
}

/// Glyph lookup for one frame, split by render priority.
#[derive(Clone, Debug, Default)]
pub struct RegistrySnapshot {
    pub monsters: HashMap<Point, Renderable>,
    pub potions: HashMap<Point, Renderable>,
    pub scrolls: HashMap<Point, Renderable>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        let mut specs_world = SpecsWorld::new();
        Self::register_components(&mut specs_world);
        Self { specs_world }
    }

    fn register_components(world: &mut SpecsWorld) {
        world.register::<Position>();
        world.register::<Renderable>();
        world.register::<Monster>();
        world.register::<Potion>();
        world.register::<Scroll>();
    }

    /// Adds a floor entity. Player and stairs are not registry-owned and
    /// yield `None`.
    pub fn spawn(&mut self, entity: &Entity) -> Option<EntityId> {
        if matches!(entity.body, EntityBody::Stairs | EntityBody::Player) {
            return None;
        }
        let builder = self
            .specs_world
            .create_entity()
            .with(Position {
                point: entity.point,
            })
            .with(Renderable {
                glyph: entity.glyph(),
                color: entity.color(),
            });
        let built = match &entity.body {
            EntityBody::Potion(stats) => builder.with(Potion { stats: *stats }).build(),
            EntityBody::Scroll(stats) => builder.with(Scroll { stats: *stats }).build(),
            EntityBody::Monster(stats) | EntityBody::Boss(stats) => builder
                .with(Monster {
                    stats: stats.clone(),
                })
                .build(),
            EntityBody::Stairs | EntityBody::Player => return None,
        };
        Some(built)
    }

    /// Drops every entity; used when the floor is replaced.
    pub fn clear(&mut self) {
        self.specs_world.delete_all();
        self.specs_world.maintain();
    }

    pub fn remove(&mut self, id: EntityId) -> Result<()> {
        self.specs_world
            .delete_entity(id)
            .map_err(|_| GameError::StaleEntity)
    }

    pub fn monster_at(&self, point: Point) -> Option<(EntityId, MonsterStats)> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let monsters = self.specs_world.read_component::<Monster>();
        (&entities, &positions, &monsters)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, monster)| (entity, monster.stats.clone()))
    }

    pub fn potion_at(&self, point: Point) -> Option<(EntityId, PotionStats)> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let potions = self.specs_world.read_component::<Potion>();
        (&entities, &positions, &potions)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, potion)| (entity, potion.stats))
    }

    pub fn scroll_at(&self, point: Point) -> Option<(EntityId, ScrollStats)> {
        let entities = self.specs_world.entities();
        let positions = self.specs_world.read_component::<Position>();
        let scrolls = self.specs_world.read_component::<Scroll>();
        (&entities, &positions, &scrolls)
            .join()
            .find(|(_, pos, _)| pos.point == point)
            .map(|(entity, _, scroll)| (entity, scroll.stats))
    }

    pub fn set_monster_health(&mut self, id: EntityId, health: i32) -> Result<()> {
        let mut monsters = self.specs_world.write_component::<Monster>();
        let monster = monsters.get_mut(id).ok_or(GameError::StaleEntity)?;
        monster.stats.health = health;
        Ok(())
    }

    pub fn monster_count(&self) -> usize {
        self.specs_world
            .read_component::<Monster>()
            .join()
            .filter(|monster| !monster.stats.kind.is_boss())
            .count()
    }

    pub fn boss_count(&self) -> usize {
        self.specs_world
            .read_component::<Monster>()
            .join()
            .filter(|monster| monster.stats.kind.is_boss())
            .count()
    }

    pub fn potion_count(&self) -> usize {
        self.specs_world.read_component::<Potion>().join().count()
    }

    pub fn scroll_count(&self) -> usize {
        self.specs_world.read_component::<Scroll>().join().count()
    }

    /// All entity positions, for occupancy checks.
    pub fn occupied_points(&self) -> Vec<Point> {
        self.specs_world
            .read_component::<Position>()
            .join()
            .map(|pos| pos.point)
            .collect()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        let positions = self.specs_world.read_component::<Position>();
        let renderables = self.specs_world.read_component::<Renderable>();
        let monsters = self.specs_world.read_component::<Monster>();
        let potions = self.specs_world.read_component::<Potion>();
        let scrolls = self.specs_world.read_component::<Scroll>();

        let mut snapshot = RegistrySnapshot::default();
        for (pos, renderable, _) in (&positions, &renderables, &monsters).join() {
            snapshot.monsters.insert(pos.point, renderable.clone());
        }
        for (pos, renderable, _) in (&positions, &renderables, &potions).join() {
            snapshot.potions.insert(pos.point, renderable.clone());
        }
        for (pos, renderable, _) in (&positions, &renderables, &scrolls).join() {
            snapshot.scrolls.insert(pos.point, renderable.clone());
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        items::PotionStats,
        monsters::{MonsterKind, monster_stats},
    };

    fn monster(point: Point, kind: MonsterKind) -> Entity {
        Entity {
            point,
            body: EntityBody::Monster(monster_stats(kind, 1)),
        }
    }

    #[test]
    fn lookups_find_entities_by_point() {
        let mut registry = EntityRegistry::new();
        let slime = registry
            .spawn(&monster(Point::new(2, 3), MonsterKind::Slime))
            .unwrap();
        registry.spawn(&Entity {
            point: Point::new(4, 4),
            body: EntityBody::Potion(PotionStats { restore: 25 }),
        });

        let (found, stats) = registry.monster_at(Point::new(2, 3)).unwrap();
        assert_eq!(found, slime);
        assert_eq!(stats.kind, MonsterKind::Slime);
        assert!(registry.monster_at(Point::new(4, 4)).is_none());
        assert_eq!(registry.potion_at(Point::new(4, 4)).unwrap().1.restore, 25);
        assert!(registry.scroll_at(Point::new(4, 4)).is_none());
    }

    #[test]
    fn player_and_stairs_are_not_registered() {
        let mut registry = EntityRegistry::new();
        let stairs = Entity {
            point: Point::new(1, 1),
            body: EntityBody::Stairs,
        };
        assert!(registry.spawn(&stairs).is_none());
        assert!(registry.occupied_points().is_empty());
    }

    #[test]
    fn removal_and_health_updates() {
        let mut registry = EntityRegistry::new();
        let id = registry
            .spawn(&monster(Point::new(1, 1), MonsterKind::GridBug))
            .unwrap();
        registry.set_monster_health(id, 2).unwrap();
        assert_eq!(registry.monster_at(Point::new(1, 1)).unwrap().1.health, 2);

        registry.remove(id).unwrap();
        assert!(registry.monster_at(Point::new(1, 1)).is_none());
        assert_eq!(registry.remove(id), Err(GameError::StaleEntity));
        assert_eq!(registry.set_monster_health(id, 5), Err(GameError::StaleEntity));
    }

    #[test]
    fn clear_empties_every_list() {
        let mut registry = EntityRegistry::new();
        registry.spawn(&monster(Point::new(1, 1), MonsterKind::Troll));
        registry.spawn(&Entity {
            point: Point::new(2, 2),
            body: EntityBody::Potion(PotionStats { restore: 20 }),
        });
        assert_eq!(registry.monster_count(), 1);
        registry.clear();
        assert_eq!(registry.monster_count(), 0);
        assert_eq!(registry.potion_count(), 0);
        assert!(registry.snapshot().monsters.is_empty());
    }
}
