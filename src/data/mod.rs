//! Static stat tables: pure mappings from (kind, floor) to stats.

pub mod items;
pub mod monsters;

use bracket_terminal::prelude::RGB;

use crate::dice::Dice;

pub const PLAYER_GLYPH: char = '@';
pub const WALL_GLYPH: char = '#';
pub const FLOOR_GLYPH: char = '.';

pub const FINAL_FLOOR: u32 = 5;
pub const MAX_HEALTH: i32 = 150;
pub const LEVEL_UP_EXP: i32 = 100;
pub const LEVEL_UP_ATTACK: i32 = 5;
pub const LEVEL_UP_HEALTH: i32 = 30;

pub const STARTING_HEALTH: i32 = 100;

pub fn player_color() -> RGB {
    RGB::from_u8(0xfc, 0xff, 0xf5)
}

/// Background behind the player glyph.
pub fn player_background() -> RGB {
    RGB::from_u8(0x3e, 0x60, 0x6f)
}

pub fn starting_attack<D: Dice + ?Sized>(dice: &mut D) -> i32 {
    dice.uniform(3, 7)
}

/// How many of each entity a floor receives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorQuota {
    pub monsters: usize,
    pub scrolls: usize,
    pub potions: usize,
    pub stairs: bool,
    pub boss: bool,
}

pub fn floor_quota<D: Dice + ?Sized>(floor: u32, dice: &mut D) -> FloorQuota {
    let monsters = 2 * floor as i32 + dice.uniform(1, 3);
    let scrolls = dice.uniform(0, 2);
    let potions = dice.uniform(2, 5);
    FloorQuota {
        monsters: monsters as usize,
        scrolls: scrolls as usize,
        potions: potions as usize,
        stairs: floor < FINAL_FLOOR,
        boss: floor == FINAL_FLOOR,
    }
}
