//! Round-robin turn scheduler with a single suspension point.
//!
//! The player's turn locks the scheduler until one input arrives. Any other
//! actor added later runs its whole turn before the next actor starts, so
//! the game state keeps a single writer.

use std::collections::VecDeque;

use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: ActorId = ActorId(0);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Waiting for the current actor's input.
    Locked,
    /// Resolving a turn.
    Unlocked,
    /// A terminal state was reached; no turn will ever start again.
    Halted,
}

#[derive(Clone, Debug)]
pub struct TurnScheduler {
    queue: VecDeque<ActorId>,
    current: Option<ActorId>,
    state: SchedulerState,
    turns_started: u64,
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            current: None,
            state: SchedulerState::Unlocked,
            turns_started: 0,
        }
    }

    pub fn add(&mut self, actor: ActorId) {
        if !self.queue.contains(&actor) {
            self.queue.push_back(actor);
        }
    }

    pub fn remove(&mut self, actor: ActorId) {
        self.queue.retain(|queued| *queued != actor);
        if self.current == Some(actor) {
            self.current = None;
        }
    }

    /// Number of queued actors.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        self.state == SchedulerState::Locked
    }

    pub fn is_halted(&self) -> bool {
        self.state == SchedulerState::Halted
    }

    pub fn current(&self) -> Option<ActorId> {
        self.current
    }

    pub fn turns_started(&self) -> u64 {
        self.turns_started
    }

    /// Rotates to the next actor and makes it current.
    pub fn next_actor(&mut self) -> Option<ActorId> {
        if self.is_halted() {
            return None;
        }
        let actor = self.queue.pop_front()?;
        self.queue.push_back(actor);
        self.current = Some(actor);
        self.turns_started += 1;
        debug!(actor = actor.0, turn = self.turns_started, "turn started");
        Some(actor)
    }

    pub fn lock(&mut self) {
        if !self.is_halted() {
            self.state = SchedulerState::Locked;
        }
    }

    pub fn unlock(&mut self) {
        if !self.is_halted() {
            self.state = SchedulerState::Unlocked;
        }
    }

    pub fn halt(&mut self) {
        self.state = SchedulerState::Halted;
        self.current = None;
    }
}
