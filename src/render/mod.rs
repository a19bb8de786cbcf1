//! Field-of-view gated drawing through an external [`Presenter`].

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::RGB;

use crate::{
    data::{self, FINAL_FLOOR, items},
    ecs::RegistrySnapshot,
    fov::{VisibleTile, band_shade, compute_visible},
    game::GameContext,
};

/// Presentation collaborator the core draws into and notifies.
pub trait Presenter {
    fn clear(&mut self);

    fn draw(&mut self, point: Point, glyph: char, fg: RGB, bg: RGB);

    fn on_win(&mut self) {}

    fn on_death(&mut self) {}
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub point: Point,
    pub glyph: char,
    pub fg: RGB,
    pub bg: RGB,
}

/// Presenter that keeps the last frame in memory.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pub frame: Vec<DrawCall>,
    pub frames_drawn: usize,
    pub wins: usize,
    pub deaths: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last glyph drawn at `point` in the current frame.
    pub fn glyph_at(&self, point: Point) -> Option<char> {
        self.frame
            .iter()
            .rev()
            .find(|call| call.point == point)
            .map(|call| call.glyph)
    }
}

impl Presenter for FrameRecorder {
    fn clear(&mut self) {
        self.frame.clear();
        self.frames_drawn += 1;
    }

    fn draw(&mut self, point: Point, glyph: char, fg: RGB, bg: RGB) {
        self.frame.push(DrawCall {
            point,
            glyph,
            fg,
            bg,
        });
    }

    fn on_win(&mut self) {
        self.wins += 1;
    }

    fn on_death(&mut self) {
        self.deaths += 1;
    }
}

/// Picks what to show on one visible tile:
/// wall, stairs, monster, potion, scroll, then bare floor.
pub fn resolve_tile(
    ctx: &GameContext,
    snapshot: &RegistrySnapshot,
    tile: VisibleTile,
) -> (char, RGB, RGB) {
    let (band_fg, band_bg) = band_shade(tile.band);
    let point = tile.point;

    if ctx.map.is_wall(point) {
        return (data::WALL_GLYPH, band_fg, band_bg);
    }
    if ctx.state.floor() < FINAL_FLOOR && ctx.stairs == Some(point) {
        return (items::STAIRS_GLYPH, items::stairs_color(), band_bg);
    }
    let entity = snapshot
        .monsters
        .get(&point)
        .or_else(|| snapshot.potions.get(&point))
        .or_else(|| snapshot.scrolls.get(&point));
    match entity {
        Some(renderable) => (renderable.glyph, renderable.color, band_bg),
        None => (data::FLOOR_GLYPH, band_fg, band_bg),
    }
}

/// Clears and redraws the player's view: one draw per visible tile, then
/// the player on top. Returns the number of visible tiles.
pub fn draw_scene<P: Presenter + ?Sized>(
    ctx: &GameContext,
    view_radius: i32,
    presenter: &mut P,
) -> usize {
    let snapshot = ctx.registry.snapshot();
    presenter.clear();

    let mut drawn = 0;
    for tile in compute_visible(ctx.player, view_radius, |p| ctx.map.light_passes(p)) {
        let (glyph, fg, bg) = resolve_tile(ctx, &snapshot, tile);
        presenter.draw(tile.point, glyph, fg, bg);
        drawn += 1;
    }

    presenter.draw(
        ctx.player,
        data::PLAYER_GLYPH,
        data::player_color(),
        data::player_background(),
    );
    drawn
}
