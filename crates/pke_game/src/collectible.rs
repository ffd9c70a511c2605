//! Collectible items. Pickup is decided by the contact engine; this module
//! only owns the per-item state and its idle animation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use pke_core::animation::FrameLoop;
use pke_core::geom::AxisBox;

pub const COLLECTIBLE_SIZE: f32 = 8.0;

const ANIM_PERIOD: f32 = 0.2;
const ANIM_FRAMES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    Coin,
}

#[derive(Debug, Clone)]
pub struct Collectible {
    pub body: AxisBox,
    pub kind: CollectibleKind,
    pub collected: bool,
    pub anim: FrameLoop,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, pos: Vec2) -> Self {
        Self {
            body: AxisBox::new(pos.x, pos.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE),
            kind,
            collected: false,
            anim: FrameLoop::new(ANIM_PERIOD, ANIM_FRAMES),
        }
    }

    /// Spin animation runs only while the item is still in the world.
    pub fn step(&mut self, dt: f32) {
        if !self.collected {
            self.anim.advance(dt);
        }
    }

    pub fn animation_frame(&self) -> u8 {
        self.anim.frame()
    }

    pub fn reset(&mut self) {
        self.collected = false;
        self.anim.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_spins_until_collected() {
        let mut coin = Collectible::new(CollectibleKind::Coin, Vec2::new(150.0, 160.0));
        for _ in 0..3 {
            coin.step(0.21);
        }
        assert_eq!(coin.animation_frame(), 3);

        coin.collected = true;
        coin.step(0.21);
        assert_eq!(coin.animation_frame(), 3, "collected items stop animating");
    }

    #[test]
    fn reset_clears_collection() {
        let mut coin = Collectible::new(CollectibleKind::Coin, Vec2::new(150.0, 160.0));
        coin.collected = true;
        coin.step(0.21);
        coin.reset();
        assert!(!coin.collected);
        assert_eq!(coin.animation_frame(), 0);
    }
}
