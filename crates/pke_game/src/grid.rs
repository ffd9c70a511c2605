//! Static tile map: a dense grid of solidity + display kind.
//!
//! The grid is gameplay truth; how tiles are drawn is a shell concern.
//! Out-of-range queries answer "not solid": map edges are open space, so
//! collision code never special-cases the border and entities can fall off
//! the map (that is a valid game state, routed through the session's
//! life-loss path, not an error).

use serde::{Deserialize, Serialize};

/// Display category of a tile. Solidity is carried separately on [`Tile`];
/// every non-empty built-in kind happens to be solid, but the grid does not
/// assume that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Empty,
    Ground,
    Grass,
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub solid: bool,
    pub kind: TileKind,
}

impl Tile {
    pub const EMPTY: Tile = Tile {
        solid: false,
        kind: TileKind::Empty,
    };

    pub fn solid(kind: TileKind) -> Tile {
        Tile { solid: true, kind }
    }
}

#[derive(Debug, Clone)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "tile grid needs positive extent");
        Self {
            width,
            height,
            tiles: vec![Tile::EMPTY; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || col >= self.width || row < 0 || row >= self.height {
            return None;
        }
        Some((row as usize) * (self.width as usize) + (col as usize))
    }

    /// In-bounds write; construction code owns bounds correctness.
    pub fn set(&mut self, col: i32, row: i32, tile: Tile) {
        let idx = self
            .index(col, row)
            .unwrap_or_else(|| panic!("tile write out of bounds at ({col}, {row})"));
        self.tiles[idx] = tile;
    }

    /// Fill `cols` (half-open) on one row with the same tile.
    pub fn fill_span(&mut self, row: i32, cols: std::ops::Range<i32>, tile: Tile) {
        for col in cols {
            self.set(col, row, tile);
        }
    }

    pub fn tile_at(&self, col: i32, row: i32) -> Option<&Tile> {
        self.index(col, row).map(|idx| &self.tiles[idx])
    }

    /// False for any out-of-range coordinate.
    pub fn solid_at(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row).map(|t| t.solid).unwrap_or(false)
    }

    /// [`TileKind::Empty`] for any out-of-range coordinate.
    pub fn kind_at(&self, col: i32, row: i32) -> TileKind {
        self.tile_at(col, row).map(|t| t.kind).unwrap_or(TileKind::Empty)
    }
}
