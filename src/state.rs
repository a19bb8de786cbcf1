//! Canonical record of player vitals, floor and terminal flags.
//!
//! Fields are private; the only way to change them is [`GameState::apply`],
//! which keeps health in range and makes `has_won`/`is_dead` terminal.

use serde::Serialize;
use tracing::warn;

use crate::data::{
    FINAL_FLOOR, LEVEL_UP_ATTACK, LEVEL_UP_EXP, LEVEL_UP_HEALTH, MAX_HEALTH, STARTING_HEALTH,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    level: u32,
    experience: i32,
    floor: u32,
    health: i32,
    attack_power: i32,
    has_won: bool,
    is_dead: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Potion heal, clamped to the health ceiling.
    Heal(i32),
    /// Combat damage; reaching zero kills the player.
    Damage(i32),
    BoostAttack(i32),
    GainExperience(i32),
    /// One level: +attack, +health, experience minus one threshold.
    ///
    /// The health bonus raises the pool without a cap in the source rules,
    /// but the pool is bounded to `[0, MAX_HEALTH]` everywhere else, so the
    /// bonus is clamped to `MAX_HEALTH` here as well.
    LevelUp,
    AdvanceFloor,
    Win,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Terminal {
    Won,
    Died,
}

impl GameState {
    pub fn new(attack_power: i32) -> Self {
        Self {
            level: 1,
            experience: 0,
            floor: 1,
            health: STARTING_HEALTH,
            attack_power,
            has_won: false,
            is_dead: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> i32 {
        self.experience
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn attack_power(&self) -> i32 {
        self.attack_power
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn terminal(&self) -> Option<Terminal> {
        if self.has_won {
            Some(Terminal::Won)
        } else if self.is_dead {
            Some(Terminal::Died)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal().is_some()
    }

    pub fn can_level_up(&self) -> bool {
        self.experience >= LEVEL_UP_EXP
    }

    /// Applies one transition. Returns the terminal state it entered, if any.
    /// Once terminal, every further transition is ignored.
    pub fn apply(&mut self, transition: Transition) -> Option<Terminal> {
        if let Some(terminal) = self.terminal() {
            warn!(?transition, ?terminal, "ignoring transition after game end");
            return None;
        }

        match transition {
            Transition::Heal(amount) => {
                self.health = (self.health + amount.max(0)).min(MAX_HEALTH);
            }
            Transition::Damage(amount) => {
                let remaining = self.health - amount.max(0);
                if remaining <= 0 {
                    self.health = 0;
                    self.is_dead = true;
                    return Some(Terminal::Died);
                }
                self.health = remaining;
            }
            Transition::BoostAttack(amount) => {
                self.attack_power += amount.max(0);
            }
            Transition::GainExperience(amount) => {
                self.experience += amount.max(0);
            }
            Transition::LevelUp => {
                self.level += 1;
                self.attack_power += LEVEL_UP_ATTACK;
                self.health = (self.health + LEVEL_UP_HEALTH).min(MAX_HEALTH);
                self.experience = (self.experience - LEVEL_UP_EXP).max(0);
            }
            Transition::AdvanceFloor => {
                self.floor = (self.floor + 1).min(FINAL_FLOOR);
            }
            Transition::Win => {
                self.has_won = true;
                return Some(Terminal::Won);
            }
        }
        None
    }

    #[cfg(test)]
    pub(crate) fn with_vitals(mut self, health: i32, attack_power: i32, experience: i32) -> Self {
        self.health = health;
        self.attack_power = attack_power;
        self.experience = experience;
        self
    }

    #[cfg(test)]
    pub(crate) fn on_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }
}
