//! Axis-separated collision resolution against the tile grid.
//!
//! The core algorithm is **horizontal-then-vertical move-and-slide**: the
//! horizontal move is committed (or cancelled) first, and the vertical pass
//! runs from the already-corrected x position. This ordering prevents
//! tunneling through tile corners during diagonal motion, and it makes the
//! grounded flag derivable strictly from the vertical outcome: a wall hit
//! never grounds a character.
//!
//! Every edge test samples **at least five** evenly spaced cells across the
//! box extent, center cell first (the common case), then the remaining
//! samples, then both exact edge cells. A single-point test would miss
//! tiles whenever a box edge does not line up with the sample cell; narrow
//! boxes simply get duplicate samples. Both sweeps scan every cell between
//! the current and destination edge in travel order and clamp at the first
//! solid one, so no speed reachable within a capped step can carry an
//! entity through a floor strip or a wall column.

use pke_core::geom::AxisBox;

use crate::grid::TileGrid;

/// Minimum number of edge samples per collision test.
pub const MIN_EDGE_SAMPLES: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSweep {
    pub new_x: f32,
    pub collided: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalSweep {
    pub new_y: f32,
    pub collided: bool,
}

/// Sample cells `lo..=hi` in the resolver's order: center, evenly spaced
/// interior points, exact edges. Returns true on the first solid hit.
fn span_hit(lo: i32, hi: i32, mut solid: impl FnMut(i32) -> bool) -> bool {
    let hi = hi.max(lo); // degenerate boxes collapse to a single cell
    let count = (hi - lo + 1).max(MIN_EDGE_SAMPLES);
    let center = lo + (hi - lo) / 2;
    if solid(center) {
        return true;
    }
    for i in 0..count {
        let cell = lo + i * (hi - lo) / (count - 1);
        if cell == center {
            continue;
        }
        if solid(cell) {
            return true;
        }
    }
    solid(lo) || solid(hi)
}

/// True when a solid tile lies directly beneath the box, within
/// `vertical_buffer` of its bottom edge.
///
/// Rows from the bottom edge through the buffer are all probed: a box
/// clamped flush onto a tile top rests exactly on a row boundary, and
/// probing only the row at `bottom + buffer` would look straight past a
/// one-row platform.
pub fn probe_ground(grid: &TileGrid, body: &AxisBox, vertical_buffer: f32) -> bool {
    let left = body.x.floor() as i32;
    let right = (body.x + body.width - 1.0).floor() as i32;
    let first_row = body.bottom().floor() as i32;
    let last_row = (body.bottom() + vertical_buffer).floor() as i32;
    for row in first_row..=last_row {
        if span_hit(left, right, |col| grid.solid_at(col, row)) {
            return true;
        }
    }
    false
}

/// Resolve a horizontal move. `vx == 0` moves nothing and tests nothing.
/// Columns between the current and destination leading edge are scanned in
/// travel order against the box's row span; on a hit the box clamps flush
/// against the wall cell: `wall - width` rightward, `wall + 1` leftward.
pub fn sweep_horizontal(grid: &TileGrid, body: &AxisBox, vx: f32, dt: f32) -> HorizontalSweep {
    if vx == 0.0 {
        return HorizontalSweep {
            new_x: body.x,
            collided: false,
        };
    }

    let new_x = body.x + vx * dt;
    let top = body.y.floor() as i32;
    let bottom = (body.y + body.height - 1.0).floor() as i32;

    if vx > 0.0 {
        let start = body.right().floor() as i32;
        let end = (new_x + body.width).floor() as i32;
        for wall in start..=end {
            if span_hit(top, bottom, |row| grid.solid_at(wall, row)) {
                return HorizontalSweep {
                    new_x: wall as f32 - body.width,
                    collided: true,
                };
            }
        }
    } else {
        let start = body.x.floor() as i32;
        let end = new_x.floor() as i32;
        let mut wall = start;
        while wall >= end {
            if span_hit(top, bottom, |row| grid.solid_at(wall, row)) {
                return HorizontalSweep {
                    new_x: wall as f32 + 1.0,
                    collided: true,
                };
            }
            wall -= 1;
        }
    }

    HorizontalSweep {
        new_x,
        collided: false,
    }
}

/// Resolve a vertical move. Rows between the current and destination edge
/// are scanned in travel order and motion clamps at the first solid row:
/// `row - height` when falling (the bottom edge lands exactly on the tile
/// top) or `row + 1` when rising.
pub fn sweep_vertical(grid: &TileGrid, body: &AxisBox, vy: f32, dt: f32) -> VerticalSweep {
    if vy == 0.0 {
        return VerticalSweep {
            new_y: body.y,
            collided: false,
        };
    }

    let new_y = body.y + vy * dt;
    let left = body.x.floor() as i32;
    let right = (body.x + body.width - 1.0).floor() as i32;

    if vy > 0.0 {
        let start = body.bottom().floor() as i32;
        let end = (new_y + body.height).floor() as i32;
        for row in start..=end {
            if span_hit(left, right, |col| grid.solid_at(col, row)) {
                return VerticalSweep {
                    new_y: row as f32 - body.height,
                    collided: true,
                };
            }
        }
    } else {
        let start = body.y.floor() as i32;
        let end = new_y.floor() as i32;
        let mut row = start;
        while row >= end {
            if span_hit(left, right, |col| grid.solid_at(col, row)) {
                return VerticalSweep {
                    new_y: row as f32 + 1.0,
                    collided: true,
                };
            }
            row -= 1;
        }
    }

    VerticalSweep {
        new_y,
        collided: false,
    }
}
