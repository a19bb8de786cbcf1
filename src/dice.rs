use bracket_random::prelude::RandomNumberGenerator;

/// Source of every random roll the simulation makes.
pub trait Dice {
    /// Uniform integer in `min..=max`.
    fn uniform(&mut self, min: i32, max: i32) -> i32;

    /// Percentage roll in `1..=100`.
    fn percentage(&mut self) -> i32 {
        self.uniform(1, 100)
    }

    /// Uniform index into a non-empty collection of `len` items.
    fn index(&mut self, len: usize) -> usize {
        self.uniform(0, len as i32 - 1) as usize
    }
}

impl Dice for RandomNumberGenerator {
    fn uniform(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.range(min, max + 1)
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::Dice;

    /// Replays queued rolls; once empty, every roll returns its minimum.
    #[derive(Debug, Default)]
    pub struct ScriptedDice {
        rolls: VecDeque<i32>,
    }

    impl ScriptedDice {
        pub fn new(rolls: &[i32]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
            }
        }
    }

    impl Dice for ScriptedDice {
        fn uniform(&mut self, min: i32, max: i32) -> i32 {
            self.rolls
                .pop_front()
                .map(|roll| roll.clamp(min, max.max(min)))
                .unwrap_or(min)
        }
    }
}
