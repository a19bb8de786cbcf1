use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::RGB;
use specs::prelude::{Component, VecStorage};

use crate::data::{
    items::{PotionStats, ScrollStats},
    monsters::MonsterStats,
};

#[derive(Clone, Debug)]
pub struct Position {
    pub point: Point,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Renderable {
    pub glyph: char,
    pub color: RGB,
}

impl Component for Renderable {
    type Storage = VecStorage<Self>;
}

/// Regular monsters and the boss.
#[derive(Clone, Debug)]
pub struct Monster {
    pub stats: MonsterStats,
}

impl Component for Monster {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Potion {
    pub stats: PotionStats,
}

impl Component for Potion {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Scroll {
    pub stats: ScrollStats,
}

impl Component for Scroll {
    type Storage = VecStorage<Self>;
}
