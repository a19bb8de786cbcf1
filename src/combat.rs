//! Movement, melee, pickups and leveling.
//!
//! Every state change goes through [`GameState::apply`]; registry changes go
//! through the [`EntityRegistry`] held by the context.

use bracket_geometry::prelude::Point;
use tracing::{debug, info};

use crate::{
    data::monsters::MonsterKind,
    dice::Dice,
    error::{GameError, Result},
    game::GameContext,
    input::Direction,
    state::{Terminal, Transition},
};

/// Monster attack misses when the percentage roll exceeds this.
const MONSTER_HIT_THRESHOLD: i32 = 80;
/// Player attack misses when the percentage roll exceeds this.
const PLAYER_HIT_THRESHOLD: i32 = 90;
const MONSTER_DAMAGE_DIE: i32 = 4;
const PLAYER_DAMAGE_DIE: i32 = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatReport {
    pub monster: MonsterKind,
    pub player_missed: bool,
    pub monster_missed: bool,
    /// Damage dealt to the monster, if the player hit.
    pub damage_dealt: Option<i32>,
    /// Damage taken by the player, if the monster hit.
    pub damage_taken: Option<i32>,
    pub slain: bool,
    pub leveled_up: bool,
    pub terminal: Option<Terminal>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pickup {
    Potion { healed_to: i32 },
    Scroll { boost: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Target was a wall; the player stays put.
    Blocked,
    /// A monster held the target; one combat round was fought in place.
    Fought(CombatReport),
    Moved {
        to: Point,
        pickups: Vec<Pickup>,
    },
    /// Stepped onto the stairs. `floor` is the one to build next; the state
    /// advances only once that floor exists.
    Descended { to: Point, floor: u32 },
}

/// Resolves one step of the player in `direction`.
pub fn resolve_move<D: Dice + ?Sized>(
    ctx: &mut GameContext,
    direction: Direction,
    dice: &mut D,
) -> Result<MoveOutcome> {
    let target = ctx.player + direction.delta();

    if ctx.map.is_wall(target) {
        debug!(x = target.x, y = target.y, "move blocked by wall");
        return Ok(MoveOutcome::Blocked);
    }

    if ctx.registry.monster_at(target).is_some() {
        return combat_round(ctx, target, dice).map(MoveOutcome::Fought);
    }

    let mut pickups = Vec::new();
    if let Some(healed_to) = pick_up_potion(ctx, target)? {
        pickups.push(Pickup::Potion { healed_to });
    }
    if let Some(boost) = pick_up_scroll(ctx, target)? {
        pickups.push(Pickup::Scroll { boost });
    }

    ctx.player = target;

    if ctx.stairs == Some(target) && !ctx.state.is_terminal() {
        let next = ctx.state.floor() + 1;
        info!(floor = next, "took the stairs");
        return Ok(MoveOutcome::Descended {
            to: target,
            floor: next,
        });
    }

    Ok(MoveOutcome::Moved {
        to: target,
        pickups,
    })
}

/// One exchange between the player and the monster at `target`.
///
/// Killing the boss wins immediately and skips retaliation and leveling.
pub fn combat_round<D: Dice + ?Sized>(
    ctx: &mut GameContext,
    target: Point,
    dice: &mut D,
) -> Result<CombatReport> {
    let Some((monster_id, monster)) = ctx.registry.monster_at(target) else {
        return Err(GameError::StaleEntity);
    };

    let monster_missed = dice.percentage() > MONSTER_HIT_THRESHOLD;
    let player_missed = dice.percentage() > PLAYER_HIT_THRESHOLD;
    let damage_to_player = monster.attack + dice.uniform(1, MONSTER_DAMAGE_DIE);
    let damage_to_monster = ctx.state.attack_power() + dice.uniform(1, PLAYER_DAMAGE_DIE);

    let mut report = CombatReport {
        monster: monster.kind,
        player_missed,
        monster_missed,
        damage_dealt: None,
        damage_taken: None,
        slain: false,
        leveled_up: false,
        terminal: None,
    };

    if !player_missed {
        let remaining = monster.health - damage_to_monster;
        report.damage_dealt = Some(damage_to_monster);
        if remaining <= 0 {
            ctx.registry.remove(monster_id)?;
            report.slain = true;
            if monster.kind.is_boss() {
                report.terminal = ctx.state.apply(Transition::Win);
                info!("the {} falls", monster.kind.name());
                return Ok(report);
            }
            ctx.state.apply(Transition::GainExperience(monster.exp));
        } else {
            ctx.registry.set_monster_health(monster_id, remaining)?;
        }
    }

    if !monster_missed {
        report.damage_taken = Some(damage_to_player);
        report.terminal = ctx.state.apply(Transition::Damage(damage_to_player));
    }

    if !ctx.state.is_terminal() && ctx.state.can_level_up() {
        ctx.state.apply(Transition::LevelUp);
        report.leveled_up = true;
        info!(level = ctx.state.level(), "level up");
    }

    debug!(?report, "combat round");
    Ok(report)
}

/// Drinks the potion at `target`, if any. Returns the new health.
pub fn pick_up_potion(ctx: &mut GameContext, target: Point) -> Result<Option<i32>> {
    let Some((potion_id, potion)) = ctx.registry.potion_at(target) else {
        return Ok(None);
    };
    ctx.state.apply(Transition::Heal(potion.restore));
    ctx.registry.remove(potion_id)?;
    Ok(Some(ctx.state.health()))
}

/// Reads the scroll at `target`, if any. Returns the attack boost.
pub fn pick_up_scroll(ctx: &mut GameContext, target: Point) -> Result<Option<i32>> {
    let Some((scroll_id, scroll)) = ctx.registry.scroll_at(target) else {
        return Ok(None);
    };
    ctx.state.apply(Transition::BoostAttack(scroll.attack_boost));
    ctx.registry.remove(scroll_id)?;
    Ok(Some(scroll.attack_boost))
}
