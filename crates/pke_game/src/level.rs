//! Level content: the static description a world is built from.
//!
//! A level is declarative strip-world data, not a cell dump: the bottom two
//! rows are always a ground/grass strip, `platforms` add solid spans,
//! `gaps` carve column ranges out of the strip. Collectible and enemy
//! placements ride along. Content is either loaded from JSON (validated on
//! load) or supplied by [`builtin_level`].

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::collectible::CollectibleKind;
use crate::enemy::EnemyKind;
use crate::grid::{Tile, TileGrid, TileKind};

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    pub width: i32,
    pub height: i32,
    pub spawn: SpawnPoint,
    #[serde(default)]
    pub platforms: Vec<PlatformSpan>,
    #[serde(default)]
    pub gaps: Vec<GapSpan>,
    #[serde(default)]
    pub collectibles: Vec<CollectiblePlacement>,
    #[serde(default)]
    pub enemies: Vec<EnemyPlacement>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlatformSpan {
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

/// Inclusive column range carved out of the ground strip.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct GapSpan {
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CollectiblePlacement {
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub left_bound: f32,
    pub right_bound: f32,
}

impl LevelFile {
    /// Populate the tile grid: ground strip, platforms, then gaps.
    pub fn build_grid(&self) -> TileGrid {
        let mut grid = TileGrid::new(self.width, self.height);

        grid.fill_span(self.height - 1, 0..self.width, Tile::solid(TileKind::Ground));
        grid.fill_span(self.height - 2, 0..self.width, Tile::solid(TileKind::Grass));

        for platform in &self.platforms {
            grid.fill_span(
                platform.y,
                platform.x..platform.x + platform.width,
                Tile::solid(TileKind::Platform),
            );
        }

        for gap in &self.gaps {
            grid.fill_span(self.height - 1, gap.from..gap.to + 1, Tile::EMPTY);
            grid.fill_span(self.height - 2, gap.from..gap.to + 1, Tile::EMPTY);
        }

        grid
    }
}

pub fn load_level_from_path(path: &Path) -> Result<LevelFile, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let level: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", path.display()))?;
    validate_level(&level)?;
    Ok(level)
}

pub fn validate_level(level: &LevelFile) -> Result<(), String> {
    if level.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            level.version
        ));
    }
    if level.level_id.is_empty() {
        return Err("Level validation failed: level_id is empty".to_string());
    }
    if level.width <= 0 || level.height <= 2 {
        return Err(
            "Level validation failed: width must be > 0 and height > 2 (ground strip)".to_string(),
        );
    }
    let width = level.width as f32;
    let height = level.height as f32;

    if level.spawn.x < 0.0 || level.spawn.x >= width || level.spawn.y < 0.0 || level.spawn.y >= height
    {
        return Err(format!(
            "Level validation failed: spawn ({}, {}) outside the map",
            level.spawn.x, level.spawn.y
        ));
    }

    for platform in &level.platforms {
        if platform.width <= 0 {
            return Err(format!(
                "Level validation failed: platform at ({}, {}) has non-positive width",
                platform.x, platform.y
            ));
        }
        if platform.x < 0
            || platform.x + platform.width > level.width
            || platform.y < 0
            || platform.y >= level.height
        {
            return Err(format!(
                "Level validation failed: platform at ({}, {}) spans outside the map",
                platform.x, platform.y
            ));
        }
    }

    for gap in &level.gaps {
        if gap.from > gap.to || gap.from < 0 || gap.to >= level.width {
            return Err(format!(
                "Level validation failed: gap {}..{} is not a valid column range",
                gap.from, gap.to
            ));
        }
    }

    for collectible in &level.collectibles {
        if collectible.x < 0.0 || collectible.x >= width || collectible.y < 0.0 || collectible.y >= height
        {
            return Err(format!(
                "Level validation failed: collectible at ({}, {}) outside the map",
                collectible.x, collectible.y
            ));
        }
    }

    for enemy in &level.enemies {
        if enemy.left_bound > enemy.right_bound {
            return Err(format!(
                "Level validation failed: enemy at ({}, {}) has inverted patrol bounds",
                enemy.x, enemy.y
            ));
        }
        if enemy.left_bound < 0.0 || enemy.right_bound >= width {
            return Err(format!(
                "Level validation failed: enemy patrol {}..{} outside the map",
                enemy.left_bound, enemy.right_bound
            ));
        }
        if enemy.x < enemy.left_bound || enemy.x > enemy.right_bound {
            return Err(format!(
                "Level validation failed: enemy at ({}, {}) starts outside its patrol bounds",
                enemy.x, enemy.y
            ));
        }
        if enemy.left_bound == enemy.right_bound {
            log::warn!(
                "Enemy at ({}, {}) has a zero-width patrol. This is allowed but leaves it stationary.",
                enemy.x,
                enemy.y
            );
        }
    }

    Ok(())
}

/// The shipped map: a 1000x240 strip world with four platforms, two gaps,
/// eleven coins, and one enemy of each kind.
pub fn builtin_level() -> LevelFile {
    LevelFile {
        version: "0.1".to_string(),
        level_id: "grasslands".to_string(),
        width: 1000,
        height: 240,
        spawn: SpawnPoint { x: 50.0, y: 200.0 },
        platforms: vec![
            PlatformSpan { x: 100, y: 180, width: 150 },
            PlatformSpan { x: 300, y: 150, width: 100 },
            PlatformSpan { x: 450, y: 120, width: 80 },
            PlatformSpan { x: 600, y: 150, width: 120 },
        ],
        gaps: vec![GapSpan { from: 300, to: 350 }, GapSpan { from: 500, to: 530 }],
        collectibles: vec![
            CollectiblePlacement { x: 150.0, y: 160.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 170.0, y: 160.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 190.0, y: 160.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 320.0, y: 130.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 340.0, y: 130.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 360.0, y: 130.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 470.0, y: 100.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 480.0, y: 100.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 490.0, y: 100.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 650.0, y: 130.0, kind: CollectibleKind::Coin },
            CollectiblePlacement { x: 670.0, y: 130.0, kind: CollectibleKind::Coin },
        ],
        enemies: vec![
            EnemyPlacement {
                kind: EnemyKind::Slime,
                x: 200.0,
                y: 222.0,
                left_bound: 150.0,
                right_bound: 250.0,
            },
            EnemyPlacement {
                kind: EnemyKind::Robot,
                x: 400.0,
                y: 222.0,
                left_bound: 380.0,
                right_bound: 480.0,
            },
            EnemyPlacement {
                kind: EnemyKind::Bat,
                x: 650.0,
                y: 132.0,
                left_bound: 600.0,
                right_bound: 700.0,
            },
        ],
    }
}
