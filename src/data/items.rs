use bracket_terminal::prelude::RGB;
use serde::Serialize;

use crate::dice::Dice;

pub const POTION_GLYPH: char = '!';
pub const SCROLL_GLYPH: char = '?';
pub const STAIRS_GLYPH: char = '^';

pub fn potion_color() -> RGB {
    RGB::from_u8(0xce, 0x92, 0x52)
}

pub fn scroll_color() -> RGB {
    RGB::from_u8(0xdf, 0xe3, 0x75)
}

pub fn stairs_color() -> RGB {
    RGB::from_u8(0xbb, 0xc4, 0xa9)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PotionStats {
    pub restore: i32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScrollStats {
    pub attack_boost: i32,
}

pub fn potion_stats<D: Dice + ?Sized>(dice: &mut D) -> PotionStats {
    PotionStats {
        restore: 13 + dice.uniform(10, 18),
    }
}

pub fn scroll_stats<D: Dice + ?Sized>(floor: u32, dice: &mut D) -> ScrollStats {
    ScrollStats {
        attack_boost: floor as i32 * 4 + dice.uniform(1, 12),
    }
}

#[cfg(test)]
mod tests {
    use bracket_random::prelude::RandomNumberGenerator;

    use super::*;

    #[test]
    fn potion_restores_between_23_and_31() {
        let mut rng = RandomNumberGenerator::seeded(21);
        for _ in 0..200 {
            let potion = potion_stats(&mut rng);
            assert!((23..=31).contains(&potion.restore));
        }
    }

    #[test]
    fn scroll_boost_grows_with_floor() {
        let mut rng = RandomNumberGenerator::seeded(4);
        for _ in 0..200 {
            let low = scroll_stats(1, &mut rng).attack_boost;
            let high = scroll_stats(4, &mut rng).attack_boost;
            assert!((5..=16).contains(&low));
            assert!((17..=28).contains(&high));
        }
    }
}
