//! Immutable per-pixel solidity masks for fine-grained collision.
//!
//! Bounding boxes for irregular sprites (bat wings, slime compression) are
//! visibly larger than the drawn silhouette, so box-only enemy contact
//! feels unfair. Each sprite therefore carries one boolean grid per
//! animation frame marking which pixels participate in collision. Masks
//! are built once at world construction and shared by reference; collision
//! code only reads them.
//!
//! The built-in silhouettes mirror the shipped pixel art: what the shell
//! draws is exactly what collides.

use crate::enemy::EnemyKind;

/// A `width` x `height` boolean grid. Out-of-range reads are non-solid,
/// so callers can index with unclamped local coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl PixelMask {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "mask needs positive extent");
        Self {
            width,
            height,
            bits: vec![false; (width as usize) * (height as usize)],
        }
    }

    /// Parse a mask from text rows: `#` solid, `.` transparent. Intended
    /// for tests and externally authored masks.
    pub fn from_rows(rows: &[&str]) -> Result<PixelMask, String> {
        if rows.is_empty() {
            return Err("Mask validation failed: no rows".to_string());
        }
        let width = rows[0].len();
        if width == 0 {
            return Err("Mask validation failed: empty first row".to_string());
        }
        let mut mask = PixelMask::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(format!(
                    "Mask validation failed: row {} has length {}, expected {}",
                    y,
                    row.len(),
                    width
                ));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    '#' => mask.bits[y * width + x] = true,
                    '.' => {}
                    other => {
                        return Err(format!(
                            "Mask validation failed: row {} has unexpected character '{}'",
                            y, other
                        ));
                    }
                }
            }
        }
        Ok(mask)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn solid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Mark the half-open rect `[x0, x1) x [y0, y1)` solid.
    fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        for y in y0..y1 {
            for x in x0..x1 {
                self.bits[(y as usize) * (self.width as usize) + (x as usize)] = true;
            }
        }
    }

    #[cfg(test)]
    fn solid_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// The character's three walk-cycle frames (16 x 24 each).
#[derive(Debug, Clone)]
pub struct CharacterSprite {
    frames: [PixelMask; 3],
}

impl CharacterSprite {
    pub fn frame(&self, index: u8) -> &PixelMask {
        &self.frames[usize::from(index) % self.frames.len()]
    }
}

/// Two 16 x 16 frames per enemy kind.
#[derive(Debug, Clone)]
pub struct EnemyMaskSet {
    slime: [PixelMask; 2],
    robot: [PixelMask; 2],
    bat: [PixelMask; 2],
}

impl EnemyMaskSet {
    pub fn mask(&self, kind: EnemyKind, frame: u8) -> &PixelMask {
        let frames = match kind {
            EnemyKind::Slime => &self.slime,
            EnemyKind::Robot => &self.robot,
            EnemyKind::Bat => &self.bat,
        };
        &frames[usize::from(frame) % frames.len()]
    }
}

/// The knight: helmet and torso are shared across frames, legs and boots
/// swing through stand / apart / crossed poses.
pub fn builtin_character_sprite() -> CharacterSprite {
    let mut base = PixelMask::new(16, 24);
    // Helmet.
    base.fill_rect(3, 1, 13, 2);
    base.fill_rect(2, 2, 14, 3);
    base.fill_rect(1, 3, 15, 7);
    // Torso with belt row.
    base.fill_rect(2, 7, 14, 16);

    let mut standing = base.clone();
    standing.fill_rect(3, 16, 7, 20);
    standing.fill_rect(9, 16, 13, 20);
    standing.fill_rect(2, 20, 7, 24);
    standing.fill_rect(9, 20, 14, 24);

    let mut apart = base.clone();
    apart.fill_rect(2, 16, 6, 20);
    apart.fill_rect(10, 16, 14, 20);
    apart.fill_rect(1, 20, 6, 24);
    apart.fill_rect(10, 20, 15, 24);

    let mut crossed = base;
    crossed.fill_rect(5, 16, 11, 20);
    crossed.fill_rect(4, 20, 12, 24);

    CharacterSprite {
        frames: [standing, apart, crossed],
    }
}

pub fn builtin_enemy_masks() -> EnemyMaskSet {
    // Slime: compressed blob / extended blob.
    let mut slime_compressed = PixelMask::new(16, 16);
    slime_compressed.fill_rect(2, 6, 14, 16);
    slime_compressed.fill_rect(1, 8, 15, 16);
    let mut slime_extended = PixelMask::new(16, 16);
    slime_extended.fill_rect(2, 4, 14, 16);
    slime_extended.fill_rect(1, 6, 15, 16);

    // Robot: boxy chassis, antenna, side arms; legs shuffle between frames.
    let mut robot_base = PixelMask::new(16, 16);
    robot_base.fill_rect(2, 2, 14, 14);
    robot_base.fill_rect(8, 0, 9, 2);
    robot_base.fill_rect(1, 6, 2, 10);
    robot_base.fill_rect(14, 6, 15, 10);
    let mut robot_step_a = robot_base.clone();
    robot_step_a.fill_rect(3, 14, 6, 16);
    robot_step_a.fill_rect(10, 14, 13, 16);
    let mut robot_step_b = robot_base;
    robot_step_b.fill_rect(4, 14, 7, 16);
    robot_step_b.fill_rect(9, 14, 12, 16);

    // Bat: narrow body with fangs; wings beat between raised and lowered.
    let mut bat_body = PixelMask::new(16, 16);
    bat_body.fill_rect(6, 6, 10, 12);
    bat_body.fill_rect(5, 7, 7, 9);
    bat_body.fill_rect(9, 7, 11, 9);
    bat_body.fill_rect(6, 12, 7, 14);
    bat_body.fill_rect(9, 12, 10, 14);
    let mut bat_wings_up = bat_body.clone();
    bat_wings_up.fill_rect(2, 2, 6, 8);
    bat_wings_up.fill_rect(10, 2, 14, 8);
    let mut bat_wings_down = bat_body;
    bat_wings_down.fill_rect(2, 6, 6, 12);
    bat_wings_down.fill_rect(10, 6, 14, 12);

    EnemyMaskSet {
        slime: [slime_compressed, slime_extended],
        robot: [robot_step_a, robot_step_b],
        bat: [bat_wings_up, bat_wings_down],
    }
}
