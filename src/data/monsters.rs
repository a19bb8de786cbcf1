use bracket_terminal::prelude::RGB;
use serde::Serialize;

use crate::dice::Dice;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MonsterKind {
    GridBug,
    Slime,
    Owlbear,
    Troll,
    /// The floor-five boss.
    Demogorgon,
}

/// Regular monsters in increasing rarity and power.
pub const SPAWNABLE: [MonsterKind; 4] = [
    MonsterKind::GridBug,
    MonsterKind::Slime,
    MonsterKind::Owlbear,
    MonsterKind::Troll,
];

#[derive(Clone, Debug)]
pub struct MonsterTemplate {
    pub name: &'static str,
    pub glyph: char,
    pub color: (u8, u8, u8),
    pub hp: i32,
    pub power: i32,
    pub exp: i32,
    /// Spawn weight is `base + uniform(0, jitter)`, rerolled per spawn.
    pub weight_base: i32,
    pub weight_jitter: i32,
}

impl MonsterTemplate {
    const fn new(
        name: &'static str,
        glyph: char,
        color: (u8, u8, u8),
        hp: i32,
        power: i32,
        exp: i32,
        (weight_base, weight_jitter): (i32, i32),
    ) -> Self {
        Self {
            name,
            glyph,
            color,
            hp,
            power,
            exp,
            weight_base,
            weight_jitter,
        }
    }

    pub fn color(&self) -> RGB {
        let (r, g, b) = self.color;
        RGB::from_u8(r, g, b)
    }
}

static GRID_BUG: MonsterTemplate =
    MonsterTemplate::new("grid bug", 'b', (0xce, 0x92, 0x52), 7, 10, 10, (8, 3));
static SLIME: MonsterTemplate =
    MonsterTemplate::new("slime", 's', (0x82, 0xc6, 0x89), 18, 10, 20, (5, 4));
static OWLBEAR: MonsterTemplate =
    MonsterTemplate::new("owlbear", 'O', (0xab, 0x8c, 0xb0), 32, 24, 50, (3, 3));
static TROLL: MonsterTemplate =
    MonsterTemplate::new("troll", 'T', (0x7c, 0xc4, 0xe8), 38, 27, 80, (1, 2));
static DEMOGORGON: MonsterTemplate =
    MonsterTemplate::new("Demogorgon", '&', (0xff, 0x4e, 0x4e), 250, 30, 0, (0, 0));

const BOSS_HP_JITTER: i32 = 25;
const BOSS_POWER_JITTER: i32 = 5;

const HP_PER_FLOOR: i32 = 5;
const POWER_PER_FLOOR: i32 = 3;
const EXP_PER_FLOOR: i32 = 2;

impl MonsterKind {
    pub fn template(self) -> &'static MonsterTemplate {
        match self {
            MonsterKind::GridBug => &GRID_BUG,
            MonsterKind::Slime => &SLIME,
            MonsterKind::Owlbear => &OWLBEAR,
            MonsterKind::Troll => &TROLL,
            MonsterKind::Demogorgon => &DEMOGORGON,
        }
    }

    pub fn is_boss(self) -> bool {
        self == MonsterKind::Demogorgon
    }

    pub fn name(self) -> &'static str {
        self.template().name
    }
}

/// Live stats of one monster or the boss.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonsterStats {
    pub kind: MonsterKind,
    pub health: i32,
    pub attack: i32,
    pub exp: i32,
}

/// Regular monster stats for a floor: base plus a linear per-floor bonus.
pub fn monster_stats(kind: MonsterKind, floor: u32) -> MonsterStats {
    let template = kind.template();
    let floor = floor as i32;
    MonsterStats {
        kind,
        health: template.hp + HP_PER_FLOOR * floor,
        attack: template.power + POWER_PER_FLOOR * floor,
        exp: template.exp + EXP_PER_FLOOR * floor,
    }
}

pub fn boss_stats<D: Dice + ?Sized>(dice: &mut D) -> MonsterStats {
    MonsterStats {
        kind: MonsterKind::Demogorgon,
        health: DEMOGORGON.hp + dice.uniform(0, BOSS_HP_JITTER),
        attack: DEMOGORGON.power + dice.uniform(0, BOSS_POWER_JITTER),
        exp: DEMOGORGON.exp,
    }
}

/// Weighted pick over [`SPAWNABLE`], with weights rerolled on every call.
pub fn roll_monster_kind<D: Dice + ?Sized>(dice: &mut D) -> MonsterKind {
    let weights: Vec<(MonsterKind, i32)> = SPAWNABLE
        .iter()
        .map(|&kind| {
            let template = kind.template();
            (
                kind,
                template.weight_base + dice.uniform(0, template.weight_jitter),
            )
        })
        .collect();
    let total: i32 = weights.iter().map(|(_, weight)| weight).sum();
    let mut roll = dice.uniform(0, total - 1);
    for (kind, weight) in &weights {
        if roll < *weight {
            return *kind;
        }
        roll -= weight;
    }
    MonsterKind::GridBug
}

#[cfg(test)]
mod tests {
    use bracket_random::prelude::RandomNumberGenerator;

    use super::*;
    use crate::dice::scripted::ScriptedDice;

    #[test]
    fn stats_scale_linearly_with_floor() {
        let first = monster_stats(MonsterKind::Slime, 1);
        let third = monster_stats(MonsterKind::Slime, 3);
        assert_eq!(first.health, 23);
        assert_eq!(first.attack, 13);
        assert_eq!(first.exp, 22);
        assert_eq!(third.health - first.health, 10);
        assert_eq!(third.attack - first.attack, 6);
        assert_eq!(third.exp - first.exp, 4);
    }

    #[test]
    fn boss_stats_stay_within_jitter() {
        let mut rng = RandomNumberGenerator::seeded(11);
        for _ in 0..100 {
            let boss = boss_stats(&mut rng);
            assert!(boss.kind.is_boss());
            assert!((250..=275).contains(&boss.health));
            assert!((30..=35).contains(&boss.attack));
        }
    }

    #[test]
    fn weighted_pick_walks_cumulative_weights() {
        // Weights become 8, 5, 3, 1 (total 17).
        let mut dice = ScriptedDice::new(&[0, 0, 0, 0, 7]);
        assert_eq!(roll_monster_kind(&mut dice), MonsterKind::GridBug);
        let mut dice = ScriptedDice::new(&[0, 0, 0, 0, 8]);
        assert_eq!(roll_monster_kind(&mut dice), MonsterKind::Slime);
        let mut dice = ScriptedDice::new(&[0, 0, 0, 0, 16]);
        assert_eq!(roll_monster_kind(&mut dice), MonsterKind::Troll);
    }

    #[test]
    fn jitter_tops_up_the_base_weight() {
        // Full jitter: weights 11, 9, 6, 3 (total 29).
        let full = [99, 99, 99, 99];
        let pick = |roll| {
            let mut rolls = full.to_vec();
            rolls.push(roll);
            roll_monster_kind(&mut ScriptedDice::new(&rolls))
        };
        assert_eq!(pick(10), MonsterKind::GridBug);
        assert_eq!(pick(11), MonsterKind::Slime);
        assert_eq!(pick(25), MonsterKind::Owlbear);
        assert_eq!(pick(28), MonsterKind::Troll);
        assert_eq!(MonsterKind::Demogorgon.template().weight_base, 0);
    }

    #[test]
    fn grid_bugs_outnumber_trolls() {
        let mut rng = RandomNumberGenerator::seeded(5);
        let mut bugs = 0;
        let mut trolls = 0;
        for _ in 0..2000 {
            match roll_monster_kind(&mut rng) {
                MonsterKind::GridBug => bugs += 1,
                MonsterKind::Troll => trolls += 1,
                _ => {}
            }
        }
        assert!(bugs > trolls * 3);
    }
}
