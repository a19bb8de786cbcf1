//! Rogue-style floor generation: one rectangular room per grid cell, joined by
//! L-shaped corridors along a random spanning tree of the cell grid.

use bracket_geometry::prelude::{Point, Rect};
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap, DijkstraMap, DistanceAlg};
use smallvec::SmallVec;
use tracing::debug;

use crate::{
    dice::Dice,
    error::{GameError, Result},
};

pub const DEFAULT_MAP_WIDTH: i32 = 80;
pub const DEFAULT_MAP_HEIGHT: i32 = 44;

const CELLS_X: i32 = 3;
const CELLS_Y: i32 = 3;
const MIN_ROOM_SIDE: i32 = 3;
const MAX_ROOM_W: i32 = 14;
const MAX_ROOM_H: i32 = 8;
const EXTRA_CONNECTION_CHANCE: i32 = 25;

const CARDINALS: [Point; 4] = [
    Point { x: 0, y: -1 },
    Point { x: 1, y: 0 },
    Point { x: 0, y: 1 },
    Point { x: -1, y: 0 },
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileKind {
    Wall,
    Floor,
}

/// Immutable wall/floor grid for one floor. Out-of-bounds reads as wall.
#[derive(Clone, Debug)]
pub struct DungeonMap {
    pub width: i32,
    pub height: i32,
    tiles: Vec<TileKind>,
}

impl DungeonMap {
    pub fn filled(width: i32, height: i32) -> Self {
        let size = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; size],
        }
    }

    /// Builds a map from ASCII rows where `#` is wall and anything else floor.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as i32;
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as i32;
        let mut map = Self::filled(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != '#' {
                    map.carve(Point::new(x as i32, y as i32));
                }
            }
        }
        map
    }

    fn idx(&self, point: Point) -> Option<usize> {
        if self.in_bounds(point) {
            Some((point.y * self.width + point.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height
    }

    pub fn tile(&self, point: Point) -> TileKind {
        self.idx(point)
            .map_or(TileKind::Wall, |idx| self.tiles[idx])
    }

    pub fn is_wall(&self, point: Point) -> bool {
        self.tile(point) == TileKind::Wall
    }

    /// Occlusion predicate for the visibility engine.
    pub fn light_passes(&self, point: Point) -> bool {
        !self.is_wall(point)
    }

    fn carve(&mut self, point: Point) {
        if let Some(idx) = self.idx(point) {
            self.tiles[idx] = TileKind::Floor;
        }
    }

    pub fn floor_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let point = Point::new(x, y);
                if !self.is_wall(point) {
                    points.push(point);
                }
            }
        }
        points
    }

    /// Number of floor tiles reachable from `start` by orthogonal steps.
    pub fn reachable_from(&self, start: Point) -> usize {
        let Some(start_idx) = self.idx(start) else {
            return 0;
        };
        if self.tiles[start_idx] == TileKind::Wall {
            return 0;
        }
        let max_depth = (self.width * self.height) as f32;
        let dijkstra = DijkstraMap::new(self.width, self.height, &[start_idx], self, max_depth);
        self.tiles
            .iter()
            .zip(dijkstra.map.iter())
            .filter(|(tile, depth)| **tile == TileKind::Floor && **depth < f32::MAX)
            .count()
    }
}

impl BaseMap for DungeonMap {
    fn is_opaque(&self, idx: usize) -> bool {
        self.tiles.get(idx).is_none_or(|tile| *tile == TileKind::Wall)
    }

    fn get_available_exits(&self, idx: usize) -> SmallVec<[(usize, f32); 10]> {
        let mut exits = SmallVec::new();
        let point = self.index_to_point2d(idx);
        for dir in CARDINALS {
            let dest = point + dir;
            if let Some(dest_idx) = self.idx(dest) {
                if self.tiles[dest_idx] == TileKind::Floor {
                    exits.push((dest_idx, 1.0));
                }
            }
        }
        exits
    }

    fn get_pathing_distance(&self, idx1: usize, idx2: usize) -> f32 {
        let p1 = self.index_to_point2d(idx1);
        let p2 = self.index_to_point2d(idx2);
        DistanceAlg::Pythagoras.distance2d(p1, p2)
    }
}

impl Algorithm2D for DungeonMap {
    fn dimensions(&self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// Walkable cells not yet claimed by an entity while a floor is populated.
#[derive(Clone, Debug, Default)]
pub struct FreeCells {
    cells: Vec<Point>,
}

impl FreeCells {
    pub fn new(cells: Vec<Point>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.cells.contains(&point)
    }

    /// Removes and returns a uniformly chosen cell.
    pub fn take<D: Dice + ?Sized>(&mut self, dice: &mut D) -> Option<Point> {
        if self.cells.is_empty() {
            return None;
        }
        let idx = dice.index(self.cells.len());
        Some(self.cells.swap_remove(idx))
    }
}

fn corridor_path(start: Point, end: Point, horizontal_first: bool) -> Vec<Point> {
    let mut path = vec![start];
    let mut cursor = start;

    let walk_x = |cursor: &mut Point, path: &mut Vec<Point>| {
        while cursor.x != end.x {
            cursor.x += if end.x > cursor.x { 1 } else { -1 };
            path.push(*cursor);
        }
    };
    let walk_y = |cursor: &mut Point, path: &mut Vec<Point>| {
        while cursor.y != end.y {
            cursor.y += if end.y > cursor.y { 1 } else { -1 };
            path.push(*cursor);
        }
    };

    if horizontal_first {
        walk_x(&mut cursor, &mut path);
        walk_y(&mut cursor, &mut path);
    } else {
        walk_y(&mut cursor, &mut path);
        walk_x(&mut cursor, &mut path);
    }

    path
}

fn layout_rooms<D: Dice + ?Sized>(width: i32, height: i32, dice: &mut D) -> Vec<Rect> {
    let cell_w = width / CELLS_X;
    let cell_h = height / CELLS_Y;
    let mut rooms = Vec::with_capacity((CELLS_X * CELLS_Y) as usize);

    for cy in 0..CELLS_Y {
        for cx in 0..CELLS_X {
            let origin_x = cx * cell_w;
            let origin_y = cy * cell_h;
            let room_w = dice.uniform(MIN_ROOM_SIDE, (cell_w - 2).min(MAX_ROOM_W));
            let room_h = dice.uniform(MIN_ROOM_SIDE, (cell_h - 2).min(MAX_ROOM_H));
            let room_x = dice.uniform(origin_x + 1, origin_x + cell_w - 1 - room_w);
            let room_y = dice.uniform(origin_y + 1, origin_y + cell_h - 1 - room_h);
            rooms.push(Rect::with_size(room_x, room_y, room_w, room_h));
        }
    }

    rooms
}

fn cell_neighbors(cell: usize) -> impl Iterator<Item = usize> {
    let cx = cell as i32 % CELLS_X;
    let cy = cell as i32 / CELLS_X;
    CARDINALS.into_iter().filter_map(move |dir| {
        let nx = cx + dir.x;
        let ny = cy + dir.y;
        if nx >= 0 && nx < CELLS_X && ny >= 0 && ny < CELLS_Y {
            Some((ny * CELLS_X + nx) as usize)
        } else {
            None
        }
    })
}

/// Random spanning tree over the cell grid plus a few loops.
fn connect_cells<D: Dice + ?Sized>(dice: &mut D) -> Vec<(usize, usize)> {
    let cell_count = (CELLS_X * CELLS_Y) as usize;
    let mut visited = vec![false; cell_count];
    let mut links: Vec<(usize, usize)> = Vec::new();

    let start = dice.index(cell_count);
    visited[start] = true;
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<usize> = cell_neighbors(current)
            .filter(|&next| !visited[next])
            .collect();
        if unvisited.is_empty() {
            stack.pop();
            continue;
        }
        let next = unvisited[dice.index(unvisited.len())];
        visited[next] = true;
        links.push((current, next));
        stack.push(next);
    }

    for cell in 0..cell_count {
        for other in cell_neighbors(cell).filter(|&other| other > cell) {
            let linked = links
                .iter()
                .any(|&(a, b)| (a, b) == (cell, other) || (b, a) == (cell, other));
            if !linked && dice.percentage() <= EXTRA_CONNECTION_CHANCE {
                links.push((cell, other));
            }
        }
    }

    links
}

/// Carves a fresh floor and returns it with every floor tile as a free cell.
///
/// Fails rather than returning a map with unreachable floor.
pub fn generate_map<D: Dice + ?Sized>(
    width: i32,
    height: i32,
    dice: &mut D,
) -> Result<(DungeonMap, FreeCells)> {
    let min_cell = MIN_ROOM_SIDE + 2;
    if width / CELLS_X < min_cell || height / CELLS_Y < min_cell {
        return Err(GameError::MapTooSmall {
            width,
            height,
            cells_x: CELLS_X,
            cells_y: CELLS_Y,
        });
    }

    let mut map = DungeonMap::filled(width, height);
    let rooms = layout_rooms(width, height, dice);
    for room in &rooms {
        room.for_each(|pt| map.carve(pt));
    }

    for (from, to) in connect_cells(dice) {
        let horizontal_first = dice.percentage() <= 50;
        for pt in corridor_path(rooms[from].center(), rooms[to].center(), horizontal_first) {
            map.carve(pt);
        }
    }

    let floor = map.floor_points();
    let reachable = floor.first().map_or(0, |&start| map.reachable_from(start));
    if reachable != floor.len() {
        return Err(GameError::Disconnected {
            reachable,
            total: floor.len(),
        });
    }

    debug!(
        width,
        height,
        rooms = rooms.len(),
        free = floor.len(),
        "generated map"
    );
    Ok((map, FreeCells::new(floor)))
}

#[cfg(test)]
mod tests {
    use bracket_random::prelude::RandomNumberGenerator;

    use super::*;

    #[test]
    fn generated_maps_are_connected_and_bordered() {
        for seed in 0..20 {
            let mut rng = RandomNumberGenerator::seeded(seed);
            let (map, free) = generate_map(DEFAULT_MAP_WIDTH, DEFAULT_MAP_HEIGHT, &mut rng)
                .expect("default map size generates");
            let floor = map.floor_points();
            assert_eq!(free.len(), floor.len());
            assert_eq!(map.reachable_from(floor[0]), floor.len());
            for x in 0..map.width {
                assert!(map.is_wall(Point::new(x, 0)));
            }
            for y in 0..map.height {
                assert!(map.is_wall(Point::new(0, y)));
            }
        }
    }

    #[test]
    fn free_cells_are_all_floor() {
        let mut rng = RandomNumberGenerator::seeded(99);
        let (map, mut free) = generate_map(60, 30, &mut rng).unwrap();
        while let Some(cell) = free.take(&mut rng) {
            assert!(!map.is_wall(cell));
            assert!(!free.contains(cell));
        }
        assert!(free.is_empty());
    }

    #[test]
    fn tiny_map_is_rejected() {
        let mut rng = RandomNumberGenerator::seeded(3);
        let err = generate_map(10, 10, &mut rng).unwrap_err();
        assert!(matches!(err, GameError::MapTooSmall { .. }));
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = DungeonMap::from_rows(&["...", "..."]);
        assert!(!map.is_wall(Point::new(2, 1)));
        assert!(map.is_wall(Point::new(3, 1)));
        assert!(map.is_wall(Point::new(-1, 0)));
        assert!(!map.light_passes(Point::new(0, 2)));
    }

    #[test]
    fn reachability_stops_at_walls() {
        let map = DungeonMap::from_rows(&["..#..", "..#.."]);
        assert_eq!(map.reachable_from(Point::new(0, 0)), 4);
        assert_eq!(map.reachable_from(Point::new(2, 0)), 0);
    }

    #[test]
    fn corridor_reaches_its_end() {
        let path = corridor_path(Point::new(1, 1), Point::new(4, 3), false);
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(4, 3)));
        assert_eq!(path[1], Point::new(1, 2));
        assert_eq!(path.len(), 6);
    }
}
