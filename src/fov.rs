//! Visibility engine: shadowcast from an origin and band each visible tile by
//! its ring distance. Nothing is cached between calls.

use std::collections::HashSet;

use bracket_geometry::prelude::Point;
use bracket_pathfinding::prelude::{Algorithm2D, BaseMap, field_of_view};
use bracket_terminal::prelude::RGB;

pub const DEFAULT_VIEW_RADIUS: i32 = 10;

/// Foreground/background per distance band; bands pair up except the last.
const DISTANCE_PALETTE: [((u8, u8, u8), (u8, u8, u8)); 11] = [
    ((0xfc, 0xff, 0xf5), (0x3e, 0x60, 0x6f)),
    ((0xfc, 0xff, 0xf5), (0x3e, 0x60, 0x6f)),
    ((0xd7, 0xe0, 0xd9), (0x3a, 0x5c, 0x6b)),
    ((0xd7, 0xe0, 0xd9), (0x3a, 0x5c, 0x6b)),
    ((0xd7, 0xe0, 0xd9), (0x36, 0x58, 0x67)),
    ((0xd7, 0xe0, 0xd9), (0x36, 0x58, 0x67)),
    ((0x8f, 0xa3, 0xa3), (0x32, 0x54, 0x63)),
    ((0x8f, 0xa3, 0xa3), (0x32, 0x54, 0x63)),
    ((0x6b, 0x85, 0x88), (0x2e, 0x50, 0x5f)),
    ((0x6b, 0x85, 0x88), (0x2e, 0x50, 0x5f)),
    ((0x59, 0x76, 0x7b), (0x2d, 0x4e, 0x5e)),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibleTile {
    pub point: Point,
    pub band: usize,
}

/// Shading for a band; bands past the table reuse its last entry.
pub fn band_shade(band: usize) -> (RGB, RGB) {
    let ((fr, fg, fb), (br, bg, bb)) = DISTANCE_PALETTE[band.min(DISTANCE_PALETTE.len() - 1)];
    (RGB::from_u8(fr, fg, fb), RGB::from_u8(br, bg, bb))
}

fn ring(origin: Point, point: Point) -> i32 {
    (point.x - origin.x).abs().max((point.y - origin.y).abs())
}

/// Square window of side `2r + 1` centred on the origin, so the shadowcaster
/// never needs the real map's dimensions.
struct LightWindow<F> {
    origin: Point,
    radius: i32,
    light_passes: F,
}

impl<F> LightWindow<F> {
    fn to_world(&self, local: Point) -> Point {
        Point::new(
            self.origin.x - self.radius + local.x,
            self.origin.y - self.radius + local.y,
        )
    }
}

impl<F: Fn(Point) -> bool> BaseMap for LightWindow<F> {
    fn is_opaque(&self, idx: usize) -> bool {
        let local = self.index_to_point2d(idx);
        !(self.light_passes)(self.to_world(local))
    }
}

impl<F: Fn(Point) -> bool> Algorithm2D for LightWindow<F> {
    fn dimensions(&self) -> Point {
        let side = self.radius * 2 + 1;
        Point::new(side, side)
    }
}

/// Tiles visible from `origin` within `radius`. `light_passes` is false at
/// walls; walls themselves are reported, tiles behind them are not. The
/// origin is always yielded at band 0.
pub fn compute_visible<F>(
    origin: Point,
    radius: i32,
    light_passes: F,
) -> impl Iterator<Item = VisibleTile>
where
    F: Fn(Point) -> bool,
{
    let radius = radius.max(0);
    let window = LightWindow {
        origin,
        radius,
        light_passes,
    };
    let local_origin = Point::new(radius, radius);
    let mut locals: HashSet<Point> = field_of_view(local_origin, radius, &window)
        .into_iter()
        .collect();
    locals.insert(local_origin);

    locals.into_iter().filter_map(move |local| {
        let point = Point::new(origin.x - radius + local.x, origin.y - radius + local.y);
        let band = ring(origin, point);
        (band <= radius).then_some(VisibleTile {
            point,
            band: band as usize,
        })
    })
}
