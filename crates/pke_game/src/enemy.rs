//! Patrolling enemies: a per-enemy state machine independent of the tile
//! grid.
//!
//! An active enemy oscillates between its patrol bounds as a pure triangle
//! wave: position integrates, the bound clamps, the direction reflects with
//! unchanged speed. A defeated enemy sits out a respawn delay, then returns
//! to its original position with a randomly chosen patrol direction drawn
//! from the world's seeded RNG (kept deterministic for replays).

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use pke_core::animation::FrameLoop;
use pke_core::geom::AxisBox;

pub const PATROL_SPEED: f32 = 50.0;
pub const RESPAWN_DELAY: f32 = 5.0;
pub const ENEMY_SIZE: f32 = 16.0;

const ANIM_PERIOD: f32 = 0.2;
const ANIM_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Slime,
    Robot,
    Bat,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: AxisBox,
    pub kind: EnemyKind,
    /// Patrol velocity; the sign is the current direction.
    pub vel_x: f32,
    pub left_bound: f32,
    pub right_bound: f32,
    pub facing_right: bool,
    pub defeated: bool,
    pub respawn_timer: f32,
    pub anim: FrameLoop,
    origin: Vec2,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, left_bound: f32, right_bound: f32) -> Self {
        Self {
            body: AxisBox::new(pos.x, pos.y, ENEMY_SIZE, ENEMY_SIZE),
            kind,
            vel_x: PATROL_SPEED,
            left_bound,
            right_bound,
            facing_right: true,
            defeated: false,
            respawn_timer: 0.0,
            anim: FrameLoop::new(ANIM_PERIOD, ANIM_FRAMES),
            origin: pos,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn animation_frame(&self) -> u8 {
        self.anim.frame()
    }

    pub fn defeat(&mut self) {
        self.defeated = true;
        self.respawn_timer = 0.0;
    }

    /// Full-session reset: back to the original position, patrolling
    /// rightward again.
    pub fn reset(&mut self) {
        self.body.x = self.origin.x;
        self.body.y = self.origin.y;
        self.vel_x = self.vel_x.abs();
        self.facing_right = true;
        self.defeated = false;
        self.respawn_timer = 0.0;
        self.anim.reset();
    }

    pub fn step<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        if self.defeated {
            self.respawn_timer += dt;
            if self.respawn_timer >= RESPAWN_DELAY {
                self.body.x = self.origin.x;
                self.body.y = self.origin.y;
                self.defeated = false;
                self.respawn_timer = 0.0;
                let rightward = rng.random_bool(0.5);
                self.vel_x = if rightward {
                    self.vel_x.abs()
                } else {
                    -self.vel_x.abs()
                };
                self.facing_right = rightward;
            }
            return;
        }

        self.body.x += self.vel_x * dt;
        if self.body.x <= self.left_bound {
            self.body.x = self.left_bound;
            self.vel_x = self.vel_x.abs();
            self.facing_right = true;
        } else if self.body.x >= self.right_bound {
            self.body.x = self.right_bound;
            self.vel_x = -self.vel_x.abs();
            self.facing_right = false;
        }

        self.anim.advance(dt);
    }
}
