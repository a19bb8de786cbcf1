use std::collections::HashSet;

use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::VirtualKeyCode;
use emberdelve::{
    Direction, FrameRecorder, Game, GameConfig, InputEvent, TurnOutcome,
    combat::MoveOutcome, data::FINAL_FLOOR, scripted_input::ScriptedInput,
};

const KEYS: [VirtualKeyCode; 4] = [
    VirtualKeyCode::Up,
    VirtualKeyCode::Right,
    VirtualKeyCode::Down,
    VirtualKeyCode::Left,
];

const DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

fn seeded(seed: u64) -> Game {
    Game::new(GameConfig::default().with_seed(seed)).expect("floor generation")
}

fn key_for(direction: Direction) -> InputEvent {
    InputEvent::Key(match direction {
        Direction::North => VirtualKeyCode::Up,
        Direction::East => VirtualKeyCode::Right,
        Direction::South => VirtualKeyCode::Down,
        Direction::West => VirtualKeyCode::Left,
    })
}

#[test]
fn fresh_floor_is_connected_and_uncrowded() {
    for seed in 1..=5 {
        let game = seeded(seed);
        let ctx = game.context();
        let floor = ctx.map.floor_points();
        assert_eq!(ctx.map.reachable_from(game.player()), floor.len());

        let mut occupied: HashSet<_> = ctx.registry.occupied_points().into_iter().collect();
        assert_eq!(occupied.len(), ctx.registry.occupied_points().len());
        let stairs = ctx.stairs.expect("first floor has stairs");
        assert!(occupied.insert(stairs));
        assert!(occupied.insert(game.player()));
        assert!(occupied.iter().all(|p| !ctx.map.is_wall(*p)));
    }
}

#[test]
fn random_play_respects_progression_bounds() {
    for seed in [2, 17, 40] {
        let mut game = seeded(seed);
        let mut frame = FrameRecorder::new();
        let mut keys = RandomNumberGenerator::seeded(seed + 1000);
        game.start(&mut frame);

        for _ in 0..600 {
            let key = KEYS[keys.range(0, KEYS.len() as i32) as usize];
            let before = game.get_state();
            let outcome = game.on_input(InputEvent::Key(key), &mut frame).unwrap();
            let state = game.get_state();

            assert!((0..=150).contains(&state.health()));
            assert!((1..=FINAL_FLOOR).contains(&state.floor()));
            assert!(state.floor() >= before.floor());
            assert!(state.level() >= before.level());
            assert!(!game.context().map.is_wall(game.player()));

            if outcome == TurnOutcome::Halted {
                assert_eq!(state, before);
            }
            if state.is_terminal() {
                assert!(game.scheduler().is_halted());
            }
        }
        assert!(frame.wins + frame.deaths <= 1);
    }
}

#[test]
fn each_frame_draws_visible_tiles_then_the_player() {
    let mut game = seeded(8);
    let mut frame = FrameRecorder::new();
    game.start(&mut frame);
    let visible = game.render(&mut frame);

    assert_eq!(frame.frame.len(), visible + 1);
    let last = frame.frame.last().unwrap();
    assert_eq!(last.point, game.player());
    assert_eq!(last.glyph, '@');

    let distinct: HashSet<_> = frame.frame[..visible].iter().map(|c| c.point).collect();
    assert_eq!(distinct.len(), visible);
    assert!(distinct.contains(&game.player()));
}

#[test]
fn bumping_a_wall_consumes_the_turn_in_place() {
    let found = (0..50).find_map(|seed| {
        let game = seeded(seed);
        let direction = DIRECTIONS
            .into_iter()
            .find(|d| game.context().map.is_wall(game.player() + d.delta()))?;
        Some((game, direction))
    });
    let (mut game, direction) = found.expect("some spawn touches a wall");

    let mut frame = FrameRecorder::new();
    game.start(&mut frame);
    let start = game.player();
    let state = game.get_state();
    let turns = game.scheduler().turns_started();

    let outcome = game.on_input(key_for(direction), &mut frame).unwrap();
    assert_eq!(outcome, TurnOutcome::Resolved(MoveOutcome::Blocked));
    assert_eq!(game.player(), start);
    assert_eq!(game.get_state(), state);
    assert_eq!(game.scheduler().turns_started(), turns + 1);
    assert!(game.scheduler().is_locked());
}

#[test]
fn unknown_keys_do_not_spend_a_turn() {
    let mut game = seeded(21);
    let mut frame = FrameRecorder::new();
    game.start(&mut frame);
    let turns = game.scheduler().turns_started();

    for key in [VirtualKeyCode::Q, VirtualKeyCode::Space, VirtualKeyCode::Key1] {
        let outcome = game.on_input(InputEvent::Key(key), &mut frame).unwrap();
        assert_eq!(outcome, TurnOutcome::Ignored);
    }
    let slow_swipe = InputEvent::Swipe {
        angle: 0.0,
        velocity: 0.2,
    };
    assert_eq!(
        game.on_input(slow_swipe, &mut frame).unwrap(),
        TurnOutcome::Ignored
    );
    assert_eq!(game.scheduler().turns_started(), turns);
    assert_eq!(frame.frames_drawn, 1);
}

#[test]
fn replayed_script_ends_in_serializable_state() {
    let script = "# wander\nddddssssaaaawwww\nllllhhhhjjjjkkkk\n";
    let mut game = seeded(64);
    let mut frame = FrameRecorder::new();
    game.start(&mut frame);

    let input = ScriptedInput::from_reader(script.as_bytes()).unwrap();
    assert_eq!(input.len(), 32);
    for event in input {
        game.on_input(event, &mut frame).unwrap();
    }

    let json = serde_json::to_value(game.get_state()).unwrap();
    assert_eq!(json["health"], game.get_state().health());
    assert_eq!(json["floor"], game.get_state().floor());
    assert!(json["has_won"].is_boolean());
}

#[test]
fn same_seed_replays_identically() {
    let script: Vec<InputEvent> = (0..120).map(|i| InputEvent::Key(KEYS[i % 4])).collect();
    let run = |seed| {
        let mut game = seeded(seed);
        let mut frame = FrameRecorder::new();
        game.start(&mut frame);
        for event in &script {
            game.on_input(*event, &mut frame).unwrap();
        }
        (game.get_state(), game.player())
    };
    assert_eq!(run(123), run(123));
}
