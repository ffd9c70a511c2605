//! Entity collision engine: collectible pickup and the two-tier
//! character/enemy contact test.
//!
//! Enemy contact has two outcomes, tested in priority order:
//! 1. **Stomp** -- the character is descending with its feet straddling the
//!    enemy's top edge and overlapping it horizontally after an inward
//!    margin. The margin keeps glancing side brushes from counting.
//! 2. **Side hit** -- everything else goes through a cheap bounding-box
//!    reject and then a per-pixel scan of the overlap region. Irregular
//!    silhouettes (bat wings, slime compression) leave their boxes mostly
//!    empty, and a box-only hit there reads as unfair.
//!
//! The character mask is mirrored horizontally when facing left, exactly as
//! it is drawn. Enemy masks are not mirrored; only their animation frame
//! changes shape.

use pke_core::geom::AxisBox;

use crate::sprite::PixelMask;

pub const COIN_SCORE: u32 = 10;
pub const STOMP_SCORE: u32 = 50;
/// Stomp bounce strength as a fraction of jump speed.
pub const STOMP_BOUNCE_FACTOR: f32 = 0.7;
/// Vertical reach of the stomp band below the enemy's top edge.
pub const STOMP_BAND: f32 = 6.0;
/// Inward shrink per side for the stomp's horizontal overlap test.
pub const STOMP_INSET: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    None,
    Stomp,
    Hit,
}

/// Classify the contact between the character and one enemy.
pub fn classify(
    character_body: &AxisBox,
    character_vy: f32,
    facing_right: bool,
    character_mask: &PixelMask,
    enemy_body: &AxisBox,
    enemy_mask: &PixelMask,
) -> EnemyContact {
    if is_stomp(character_body, character_vy, enemy_body) {
        return EnemyContact::Stomp;
    }
    if masks_overlap(
        character_mask,
        character_body,
        facing_right,
        enemy_mask,
        enemy_body,
    ) {
        return EnemyContact::Hit;
    }
    EnemyContact::None
}

/// Descending, feet straddling the enemy's top edge, horizontal overlap
/// after the inward margin.
pub fn is_stomp(character_body: &AxisBox, character_vy: f32, enemy_body: &AxisBox) -> bool {
    if character_vy <= 0.0 {
        return false;
    }
    let feet = character_body.bottom();
    if feet < enemy_body.y || feet > enemy_body.y + STOMP_BAND {
        return false;
    }
    let core = character_body.shrunk_x(STOMP_INSET);
    core.x < enemy_body.right() && core.right() > enemy_body.x
}

/// Per-pixel test over the boxes' overlap region. A bounding-box miss is a
/// free rejection; otherwise each character pixel inside the overlap is
/// mapped through the facing mirror and checked against the enemy mask at
/// the same world position. A pure read: no state is touched.
pub fn masks_overlap(
    character_mask: &PixelMask,
    character_body: &AxisBox,
    facing_right: bool,
    enemy_mask: &PixelMask,
    enemy_body: &AxisBox,
) -> bool {
    let Some(overlap) = character_body.intersection(enemy_body) else {
        return false;
    };

    let lx0 = ((overlap.x - character_body.x).floor() as i32).max(0);
    let ly0 = ((overlap.y - character_body.y).floor() as i32).max(0);
    let lx1 = ((overlap.right() - character_body.x).ceil() as i32).min(character_mask.width());
    let ly1 = ((overlap.bottom() - character_body.y).ceil() as i32).min(character_mask.height());

    for ly in ly0..ly1 {
        let world_y = character_body.y + ly as f32 + 0.5;
        let ey = (world_y - enemy_body.y).floor() as i32;
        for lx in lx0..lx1 {
            let sx = if facing_right {
                lx
            } else {
                character_mask.width() - 1 - lx
            };
            if !character_mask.solid(sx, ly) {
                continue;
            }
            let world_x = character_body.x + lx as f32 + 0.5;
            let ex = (world_x - enemy_body.x).floor() as i32;
            if enemy_mask.solid(ex, ey) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemy::EnemyKind;
    use crate::sprite::{builtin_character_sprite, builtin_enemy_masks};

    fn full_mask(width: i32, height: i32) -> PixelMask {
        let row = "#".repeat(width as usize);
        let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
        PixelMask::from_rows(&rows).expect("uniform mask")
    }

    #[test]
    fn stomp_requires_descent() {
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        let character = AxisBox::new(100.0, 178.0, 16.0, 24.0); // feet at 202
        assert!(is_stomp(&character, 120.0, &enemy));
        assert!(!is_stomp(&character, 0.0, &enemy));
        assert!(!is_stomp(&character, -120.0, &enemy));
    }

    #[test]
    fn stomp_band_straddles_the_top_edge() {
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        // Feet exactly on the edge.
        assert!(is_stomp(&AxisBox::new(100.0, 176.0, 16.0, 24.0), 50.0, &enemy));
        // Feet just inside the band.
        assert!(is_stomp(&AxisBox::new(100.0, 181.0, 16.0, 24.0), 50.0, &enemy));
        // Feet above the edge: not straddling yet.
        assert!(!is_stomp(&AxisBox::new(100.0, 175.0, 16.0, 24.0), 50.0, &enemy));
        // Feet below the band: too deep, that is a side hit.
        assert!(!is_stomp(&AxisBox::new(100.0, 184.0, 16.0, 24.0), 50.0, &enemy));
    }

    #[test]
    fn stomp_margin_rejects_glancing_corner_contact() {
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        // Only the outermost 1px strip of the character overlaps; after the
        // 2px inward shrink there is no shared span.
        let grazing = AxisBox::new(115.0, 178.0, 16.0, 24.0);
        assert!(!is_stomp(&grazing, 50.0, &enemy));
        // 6px of overlap survives the shrink.
        let square = AxisBox::new(110.0, 178.0, 16.0, 24.0);
        assert!(is_stomp(&square, 50.0, &enemy));
    }

    #[test]
    fn stomp_outranks_side_hit_when_both_hold() {
        let sprite = builtin_character_sprite();
        let masks = builtin_enemy_masks();
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        // Fully overlapping the enemy horizontally, feet at its top edge,
        // descending: the pixel test would also report contact here.
        let character = AxisBox::new(100.0, 178.0, 16.0, 24.0);
        let outcome = classify(
            &character,
            150.0,
            true,
            sprite.frame(0),
            &enemy,
            masks.mask(EnemyKind::Slime, 0),
        );
        assert_eq!(outcome, EnemyContact::Stomp);
    }

    #[test]
    fn box_overlap_without_pixel_overlap_is_no_contact() {
        let masks = builtin_enemy_masks();
        let bat = masks.mask(EnemyKind::Bat, 0); // wings raised
        let solid = full_mask(16, 24);
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        // Character's upper-right corner pokes into the bat's lower-left
        // box corner, where the raised-wing frame has no pixels.
        let character = AxisBox::new(87.0, 208.0, 16.0, 24.0);
        assert!(character.overlaps(&enemy), "boxes do overlap");
        assert!(!masks_overlap(&solid, &character, true, bat, &enemy));

        // The lowered-wing frame fills that corner region.
        let bat_down = masks.mask(EnemyKind::Bat, 1);
        assert!(masks_overlap(&solid, &character, true, bat_down, &enemy));
    }

    #[test]
    fn character_mask_mirrors_with_facing() {
        // Character solid only on its left edge column (sprite space).
        let lopsided = PixelMask::from_rows(&["#...", "#...", "#...", "#..."]).expect("mask");
        let enemy_mask = full_mask(4, 4);

        // Enemy to the character's right, overlapping its right half.
        let character = AxisBox::new(0.0, 0.0, 4.0, 4.0);
        let enemy = AxisBox::new(3.0, 0.0, 4.0, 4.0);

        // Facing right: the solid column is on the far side, no contact.
        assert!(!masks_overlap(&lopsided, &character, true, &enemy_mask, &enemy));
        // Facing left mirrors the column into the overlap.
        assert!(masks_overlap(&lopsided, &character, false, &enemy_mask, &enemy));
    }

    #[test]
    fn enemy_mask_is_not_mirrored() {
        // Enemy solid only on its own left column; contact is identical
        // for either character facing.
        let enemy_mask = PixelMask::from_rows(&["#...", "#...", "#...", "#..."]).expect("mask");
        let character_mask = full_mask(4, 4);
        let character = AxisBox::new(2.5, 0.0, 4.0, 4.0);
        let enemy = AxisBox::new(3.0, 0.0, 4.0, 4.0);
        let facing_right = masks_overlap(&character_mask, &character, true, &enemy_mask, &enemy);
        let facing_left = masks_overlap(&character_mask, &character, false, &enemy_mask, &enemy);
        assert!(facing_right && facing_left);
    }

    #[test]
    fn disjoint_boxes_skip_the_pixel_scan() {
        let solid = full_mask(16, 24);
        let character = AxisBox::new(0.0, 0.0, 16.0, 24.0);
        let enemy = AxisBox::new(100.0, 100.0, 16.0, 16.0);
        assert!(!masks_overlap(&solid, &character, true, &solid, &enemy));
    }

    #[test]
    fn mask_test_is_idempotent() {
        let sprite = builtin_character_sprite();
        let masks = builtin_enemy_masks();
        let character = AxisBox::new(95.0, 195.0, 16.0, 24.0);
        let enemy = AxisBox::new(100.0, 200.0, 16.0, 16.0);
        let first = masks_overlap(
            sprite.frame(1),
            &character,
            false,
            masks.mask(EnemyKind::Robot, 1),
            &enemy,
        );
        let second = masks_overlap(
            sprite.frame(1),
            &character,
            false,
            masks.mask(EnemyKind::Robot, 1),
            &enemy,
        );
        assert_eq!(first, second);
    }
}
