//! Game controller: owns the current floor, the dice and the scheduler, and
//! turns one decoded input into one resolved player turn.

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use tracing::{debug, error, info, warn};

use crate::{
    combat::{self, MoveOutcome},
    config::GameConfig,
    data,
    dice::Dice,
    ecs::EntityRegistry,
    error::Result,
    input::{Command, Direction, InputEvent},
    map::{self, DungeonMap},
    render::{self, Presenter},
    scheduler::{ActorId, TurnScheduler},
    spawner,
    state::{GameState, Terminal, Transition},
};

/// Everything one turn may read or mutate.
pub struct GameContext {
    pub map: DungeonMap,
    pub registry: EntityRegistry,
    pub state: GameState,
    pub player: Point,
    /// Absent on the final floor.
    pub stairs: Option<Point>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Input did not decode to a command; the player's turn stays open.
    Ignored,
    /// The game already ended; nothing changed.
    Halted,
    Resolved(MoveOutcome),
}

pub struct Game<D: Dice = RandomNumberGenerator> {
    config: GameConfig,
    dice: D,
    ctx: GameContext,
    scheduler: TurnScheduler,
}

impl Game<RandomNumberGenerator> {
    /// New game on floor 1, seeded from `config.seed` when present.
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => RandomNumberGenerator::seeded(seed),
            None => RandomNumberGenerator::new(),
        };
        Self::with_dice(config, rng)
    }
}

impl<D: Dice> Game<D> {
    pub fn with_dice(config: GameConfig, mut dice: D) -> Result<Self> {
        let state = GameState::new(data::starting_attack(&mut dice));
        let ctx = GameContext {
            map: DungeonMap::filled(config.map_width.max(0), config.map_height.max(0)),
            registry: EntityRegistry::new(),
            state,
            player: Point::zero(),
            stairs: None,
        };
        let mut scheduler = TurnScheduler::new();
        scheduler.add(ActorId::PLAYER);

        let mut game = Self {
            config,
            dice,
            ctx,
            scheduler,
        };
        game.generate_map()?;
        info!(
            attack = game.ctx.state.attack_power(),
            seed = ?game.config.seed,
            "new game"
        );
        Ok(game)
    }

    /// Replaces the current floor with a freshly generated one for the
    /// state's floor number and moves the player onto it.
    ///
    /// The old floor is kept if generation fails.
    pub fn generate_map(&mut self) -> Result<()> {
        self.build_floor(self.ctx.state.floor())
    }

    /// Builds `floor` and only then records the descent in the state, so a
    /// failed build leaves floor number, map and registry in agreement.
    fn descend(&mut self, floor: u32) -> Result<()> {
        self.build_floor(floor)?;
        self.ctx.state.apply(Transition::AdvanceFloor);
        Ok(())
    }

    fn build_floor(&mut self, floor: u32) -> Result<()> {
        let (map, mut free_cells) =
            map::generate_map(self.config.map_width, self.config.map_height, &mut self.dice)?;
        let population = spawner::populate_floor(&mut free_cells, floor, &mut self.dice)?;

        self.ctx.registry.clear();
        for entity in &population.entities {
            self.ctx.registry.spawn(entity);
        }
        self.ctx.map = map;
        self.ctx.stairs = population.stairs;
        self.ctx.player = population.player_spawn;

        info!(
            floor,
            monsters = self.ctx.registry.monster_count(),
            boss = self.ctx.registry.boss_count(),
            "floor generated"
        );
        Ok(())
    }

    /// Draws the first frame and opens the player's first turn.
    pub fn start<P: Presenter + ?Sized>(&mut self, presenter: &mut P) {
        self.render(presenter);
        self.begin_turn();
    }

    /// Resolves one input. Undecodable input leaves the turn open; input
    /// after a win or death changes nothing.
    pub fn on_input<P: Presenter + ?Sized>(
        &mut self,
        event: InputEvent,
        presenter: &mut P,
    ) -> Result<TurnOutcome> {
        if self.scheduler.is_halted() {
            warn!(?event, "input after the game ended");
            return Ok(TurnOutcome::Halted);
        }
        let Some(Command::Move(direction)) = event.decode() else {
            debug!(?event, "ignored input");
            return Ok(TurnOutcome::Ignored);
        };

        self.scheduler.unlock();
        let outcome = match self.resolve_turn(direction) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(code = err.error_code(), %err, "turn aborted, halting");
                self.scheduler.halt();
                return Err(err);
            }
        };
        debug!(?outcome, "turn resolved");

        if let Some(terminal) = self.ctx.state.terminal() {
            self.scheduler.halt();
            match terminal {
                Terminal::Won => {
                    info!(level = self.ctx.state.level(), "game won");
                    presenter.on_win();
                }
                Terminal::Died => {
                    info!(floor = self.ctx.state.floor(), "player died");
                    presenter.on_death();
                }
            }
            return Ok(TurnOutcome::Resolved(outcome));
        }

        self.render(presenter);
        self.begin_turn();
        Ok(TurnOutcome::Resolved(outcome))
    }

    fn resolve_turn(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let outcome = combat::resolve_move(&mut self.ctx, direction, &mut self.dice)?;
        if let MoveOutcome::Descended { floor, .. } = outcome {
            debug!(floor, "descending");
            self.descend(floor)?;
        }
        Ok(outcome)
    }

    /// Rotates the scheduler to the player and locks until the next input.
    fn begin_turn(&mut self) {
        for _ in 0..self.scheduler.len() {
            match self.scheduler.next_actor() {
                Some(ActorId::PLAYER) => {
                    self.scheduler.lock();
                    return;
                }
                Some(_) => {}
                None => return,
            }
        }
    }

    pub fn render<P: Presenter + ?Sized>(&self, presenter: &mut P) -> usize {
        render::draw_scene(&self.ctx, self.config.view_radius, presenter)
    }

    /// Copy of the current player progression.
    pub fn get_state(&self) -> GameState {
        self.ctx.state
    }

    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn player(&self) -> Point {
        self.ctx.player
    }
}
