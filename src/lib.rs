//! Turn-based dungeon crawl core: floor generation, entity placement,
//! shadowcast visibility, a single-writer turn loop and melee progression.
//!
//! Drawing and input capture live behind [`render::Presenter`] and
//! [`input::InputEvent`]; the terminal front end in `main.rs` is one client.

pub mod combat;
pub mod config;
pub mod data;
pub mod dice;
pub mod ecs;
pub mod error;
pub mod fov;
pub mod game;
pub mod input;
pub mod map;
pub mod render;
pub mod scheduler;
pub mod scripted_input;
pub mod spawner;
pub mod state;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Game, GameContext, TurnOutcome};
pub use input::{Command, Direction, InputEvent};
pub use render::{FrameRecorder, Presenter};
pub use state::{GameState, Terminal};
