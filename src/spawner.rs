//! Entity factory: claims free cells and builds floor-scaled entities on them.

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::RGB;
use tracing::debug;

use crate::{
    data::{
        self, FloorQuota,
        items::{self, PotionStats, ScrollStats},
        monsters::{self, MonsterStats},
    },
    dice::Dice,
    error::{GameError, Result},
    map::FreeCells,
};

/// What the factory is asked to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityVariant {
    Monster,
    Boss,
    Potion,
    Scroll,
    Stairs,
    Player,
}

/// Variant-specific payload of a placed entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityBody {
    Monster(MonsterStats),
    Boss(MonsterStats),
    Potion(PotionStats),
    Scroll(ScrollStats),
    Stairs,
    Player,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub point: Point,
    pub body: EntityBody,
}

impl Entity {
    pub fn variant(&self) -> EntityVariant {
        match self.body {
            EntityBody::Monster(_) => EntityVariant::Monster,
            EntityBody::Boss(_) => EntityVariant::Boss,
            EntityBody::Potion(_) => EntityVariant::Potion,
            EntityBody::Scroll(_) => EntityVariant::Scroll,
            EntityBody::Stairs => EntityVariant::Stairs,
            EntityBody::Player => EntityVariant::Player,
        }
    }

    pub fn glyph(&self) -> char {
        match &self.body {
            EntityBody::Monster(stats) | EntityBody::Boss(stats) => stats.kind.template().glyph,
            EntityBody::Potion(_) => items::POTION_GLYPH,
            EntityBody::Scroll(_) => items::SCROLL_GLYPH,
            EntityBody::Stairs => items::STAIRS_GLYPH,
            EntityBody::Player => data::PLAYER_GLYPH,
        }
    }

    pub fn color(&self) -> RGB {
        match &self.body {
            EntityBody::Monster(stats) | EntityBody::Boss(stats) => stats.kind.template().color(),
            EntityBody::Potion(_) => items::potion_color(),
            EntityBody::Scroll(_) => items::scroll_color(),
            EntityBody::Stairs => items::stairs_color(),
            EntityBody::Player => data::player_color(),
        }
    }
}

/// Picks a free cell, removes it from the pool and builds `variant` there.
pub fn create_entity<D: Dice + ?Sized>(
    variant: EntityVariant,
    free_cells: &mut FreeCells,
    floor: u32,
    dice: &mut D,
) -> Result<Entity> {
    let point = free_cells
        .take(dice)
        .ok_or(GameError::FreeCellsExhausted { variant })?;
    let body = match variant {
        EntityVariant::Monster => {
            let kind = monsters::roll_monster_kind(dice);
            EntityBody::Monster(monsters::monster_stats(kind, floor))
        }
        EntityVariant::Boss => EntityBody::Boss(monsters::boss_stats(dice)),
        EntityVariant::Potion => EntityBody::Potion(items::potion_stats(dice)),
        EntityVariant::Scroll => EntityBody::Scroll(items::scroll_stats(floor, dice)),
        EntityVariant::Stairs => EntityBody::Stairs,
        EntityVariant::Player => EntityBody::Player,
    };
    Ok(Entity { point, body })
}

/// Everything placed on one floor.
#[derive(Clone, Debug)]
pub struct FloorPopulation {
    pub stairs: Option<Point>,
    /// Monsters, the boss, potions and scrolls, in placement order.
    pub entities: Vec<Entity>,
    pub player_spawn: Point,
}

/// Places stairs, monsters, scrolls, potions, the boss and finally the player.
pub fn populate_floor<D: Dice + ?Sized>(
    free_cells: &mut FreeCells,
    floor: u32,
    dice: &mut D,
) -> Result<FloorPopulation> {
    let FloorQuota {
        monsters,
        scrolls,
        potions,
        stairs,
        boss,
    } = data::floor_quota(floor, dice);

    let stairs = if stairs {
        Some(create_entity(EntityVariant::Stairs, free_cells, floor, dice)?.point)
    } else {
        None
    };

    let batches = [
        (EntityVariant::Monster, monsters),
        (EntityVariant::Scroll, scrolls),
        (EntityVariant::Potion, potions),
        (EntityVariant::Boss, usize::from(boss)),
    ];
    let mut entities = Vec::new();
    for (variant, count) in batches {
        for _ in 0..count {
            entities.push(create_entity(variant, free_cells, floor, dice)?);
        }
    }

    let player_spawn = create_entity(EntityVariant::Player, free_cells, floor, dice)?.point;

    debug!(
        floor,
        monsters,
        scrolls,
        potions,
        boss,
        remaining = free_cells.len(),
        "populated floor"
    );
    Ok(FloorPopulation {
        stairs,
        entities,
        player_spawn,
    })
}
