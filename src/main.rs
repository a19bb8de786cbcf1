use std::{io, path::Path};

use bracket_terminal::prelude::*;
use emberdelve::{
    FrameRecorder, Game, GameConfig, InputEvent, TurnOutcome, scripted_input::ScriptedInput,
};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const MAP_ORIGIN_Y: i32 = 2;
const HUD_ROW: i32 = 0;
const BANNER_ROW: i32 = 24;

struct DelveState {
    game: Game,
    frame: FrameRecorder,
}

impl GameState for DelveState {
    fn tick(&mut self, ctx: &mut BTerm) {
        if let Some(key) = ctx.key {
            if key == VirtualKeyCode::Escape {
                ctx.quit();
                return;
            }
            if let Err(err) = self.game.on_input(InputEvent::Key(key), &mut self.frame) {
                error!(code = err.error_code(), %err, "turn failed");
                ctx.quit();
                return;
            }
        }

        ctx.cls();
        for call in &self.frame.frame {
            ctx.set(
                call.point.x,
                call.point.y + MAP_ORIGIN_Y,
                call.fg,
                call.bg,
                to_cp437(call.glyph),
            );
        }
        self.draw_hud(ctx);
    }
}

impl DelveState {
    fn new(config: GameConfig) -> emberdelve::Result<Self> {
        let mut game = Game::new(config)?;
        let mut frame = FrameRecorder::new();
        game.start(&mut frame);
        Ok(Self { game, frame })
    }

    fn draw_hud(&self, ctx: &mut BTerm) {
        let state = self.game.get_state();
        let stats = format!(
            "Lvl {}  Exp {}  Atk {}  HP {}  Floor {}",
            state.level(),
            state.experience(),
            state.attack_power(),
            state.health(),
            state.floor()
        );
        let hp_color = if state.health() <= 30 {
            RGB::named(ORANGE)
        } else {
            RGB::named(LIGHT_CYAN)
        };
        ctx.print_color(1, HUD_ROW, hp_color, RGB::named(BLACK), &stats);

        if self.frame.wins > 0 {
            ctx.print_color_centered(
                BANNER_ROW,
                RGB::named(YELLOW),
                RGB::named(BLACK),
                "The Demogorgon is slain. You win!",
            );
        } else if self.frame.deaths > 0 {
            ctx.print_color_centered(
                BANNER_ROW,
                RGB::named(RED),
                RGB::named(BLACK),
                "You died. Press Esc to leave.",
            );
        }
    }
}

fn init_logging(config: &GameConfig) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, "emberdelve.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // Only the file: the terminal belongs to the game.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    info!("log file: {}", config.log_dir.join("emberdelve.log").display());
    Ok(guard)
}

/// Replays a key script without a terminal and prints the final state.
fn run_script(config: GameConfig, script: &Path) -> BError {
    let mut game = Game::new(config)?;
    let mut frame = FrameRecorder::new();
    game.start(&mut frame);

    let input = ScriptedInput::from_file(script)?;
    info!(keys = input.len(), script = %script.display(), "replaying script");
    for event in input {
        if game.on_input(event, &mut frame)? == TurnOutcome::Halted {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&game.get_state())?);
    Ok(())
}

fn main() -> BError {
    let config = GameConfig::from_env();
    let _guard = init_logging(&config)?;

    if let Some(script) = config.script.clone() {
        return run_script(config, &script);
    }

    let context = BTermBuilder::simple80x50()
        .with_title("Emberdelve")
        .build()?;
    let state = DelveState::new(config)?;
    main_loop(context, state)
}
