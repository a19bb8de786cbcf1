//! Decoding of raw key and swipe events into simulation commands.

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::VirtualKeyCode;

const SWIPE_MIN_VELOCITY: f32 = 0.75;

/// One event as delivered by an input adapter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    Key(VirtualKeyCode),
    /// Touch swipe; `angle` in degrees, 0 pointing right and 90 down.
    Swipe { angle: f32, velocity: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub fn delta(self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
}

impl InputEvent {
    /// `None` for anything that is not a recognised action.
    pub fn decode(self) -> Option<Command> {
        match self {
            InputEvent::Key(key) => decode_key(key),
            InputEvent::Swipe { angle, velocity } => decode_swipe(angle, velocity),
        }
        .map(Command::Move)
    }
}

fn decode_key(key: VirtualKeyCode) -> Option<Direction> {
    match key {
        VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => Some(Direction::North),
        VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => Some(Direction::East),
        VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => Some(Direction::South),
        VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => Some(Direction::West),
        _ => None,
    }
}

fn decode_swipe(angle: f32, velocity: f32) -> Option<Direction> {
    if velocity.abs() <= SWIPE_MIN_VELOCITY {
        return None;
    }
    if angle > -100.0 && angle < -80.0 {
        Some(Direction::North)
    } else if angle > -10.0 && angle < 10.0 {
        Some(Direction::East)
    } else if angle > 80.0 && angle < 100.0 {
        Some(Direction::South)
    } else if angle.abs() > 170.0 {
        Some(Direction::West)
    } else {
        None
    }
}
