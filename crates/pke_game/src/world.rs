//! The world aggregate: every entity, the tile grid, the session, and the
//! respawn RNG behind one `step` entry point.
//!
//! The fixed per-step order is an explicit function composition, not an
//! emergent property of shared globals: character (input + resolver), then
//! enemies, then collectible animation, then entity contacts, then camera.
//! Each entity has exactly one writer per step. `step` re-applies the
//! global step cap, so the no-giant-step invariant holds for any driver.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use pke_core::geom::AxisBox;
use pke_core::input::Intents;
use pke_core::time::MAX_STEP_SECONDS;

use crate::camera::Camera;
use crate::character::{Character, CharacterConfig};
use crate::collectible::{Collectible, CollectibleKind};
use crate::contact::{self, EnemyContact};
use crate::enemy::{Enemy, EnemyKind};
use crate::grid::TileGrid;
use crate::level::LevelFile;
use crate::session::SessionState;
use crate::sprite::{builtin_character_sprite, builtin_enemy_masks, CharacterSprite, EnemyMaskSet};

pub struct World {
    pub grid: TileGrid,
    pub character: Character,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub camera: Camera,
    pub session: SessionState,
    character_sprite: CharacterSprite,
    enemy_masks: EnemyMaskSet,
    rng: Pcg32,
    spawn: Vec2,
}

impl World {
    /// Build a world from validated level content. Masks are constructed
    /// once here and shared by reference for the world's lifetime.
    pub fn from_level(level: &LevelFile, viewport_width: f32, seed: u64) -> Self {
        let grid = level.build_grid();
        let spawn = Vec2::new(level.spawn.x, level.spawn.y);
        let enemies = level
            .enemies
            .iter()
            .map(|p| Enemy::new(p.kind, Vec2::new(p.x, p.y), p.left_bound, p.right_bound))
            .collect();
        let collectibles = level
            .collectibles
            .iter()
            .map(|p| Collectible::new(p.kind, Vec2::new(p.x, p.y)))
            .collect();

        Self {
            grid,
            character: Character::new(spawn, CharacterConfig::default()),
            enemies,
            collectibles,
            camera: Camera::new(viewport_width),
            session: SessionState::new(),
            character_sprite: builtin_character_sprite(),
            enemy_masks: builtin_enemy_masks(),
            rng: Pcg32::seed_from_u64(seed),
            spawn,
        }
    }

    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
    }

    /// Advance one simulation step. A no-op once the session is over.
    pub fn step(&mut self, intents: Intents, dt: f32) {
        if !self.session.running {
            return;
        }
        let dt = dt.clamp(0.0, MAX_STEP_SECONDS);

        let fell_out = self.character.step(intents, dt, &self.grid);
        if fell_out {
            self.lose_life();
        }

        for enemy in &mut self.enemies {
            enemy.step(dt, &mut self.rng);
        }
        for collectible in &mut self.collectibles {
            collectible.step(dt);
        }

        self.resolve_contacts();

        self.camera
            .follow(self.character.body.x, self.grid.width() as f32);
    }

    fn resolve_contacts(&mut self) {
        for collectible in &mut self.collectibles {
            if !collectible.collected && self.character.body.overlaps(&collectible.body) {
                collectible.collected = true;
                self.session.add_score(contact::COIN_SCORE);
            }
        }

        let character_mask = self.character_sprite.frame(self.character.animation_frame());
        let mut hit = false;
        for enemy in &mut self.enemies {
            if enemy.defeated {
                continue;
            }
            let enemy_mask = self.enemy_masks.mask(enemy.kind, enemy.animation_frame());
            match contact::classify(
                &self.character.body,
                self.character.velocity.y,
                self.character.facing_right,
                character_mask,
                &enemy.body,
                enemy_mask,
            ) {
                EnemyContact::Stomp => {
                    self.character.velocity.y =
                        self.character.config.jump_speed * contact::STOMP_BOUNCE_FACTOR;
                    enemy.defeat();
                    self.session.add_score(contact::STOMP_SCORE);
                }
                EnemyContact::Hit => {
                    // The character is about to be respawned; contact tests
                    // against the remaining enemies would be stale.
                    hit = true;
                    break;
                }
                EnemyContact::None => {}
            }
        }
        if hit {
            self.lose_life();
        }
    }

    fn lose_life(&mut self) {
        if !self.session.running {
            return;
        }
        if self.session.lose_life() {
            self.character.respawn(self.spawn);
        }
    }

    /// Full-session reset: character to spawn, score/lives fresh, every
    /// collectible restored, every enemy back on its original patrol.
    pub fn reset(&mut self) {
        self.session.reset();
        self.character.reset(self.spawn);
        for collectible in &mut self.collectibles {
            collectible.reset();
        }
        for enemy in &mut self.enemies {
            enemy.reset();
        }
        self.camera
            .follow(self.character.body.x, self.grid.width() as f32);
    }

    /// The read-only per-frame view shells consume.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            character: CharacterView {
                body: self.character.body,
                facing_right: self.character.facing_right,
                animation_frame: self.character.animation_frame(),
                on_ground: self.character.on_ground(),
            },
            enemies: self
                .enemies
                .iter()
                .map(|enemy| EnemyView {
                    kind: enemy.kind,
                    body: enemy.body,
                    facing_right: enemy.facing_right,
                    animation_frame: enemy.animation_frame(),
                    defeated: enemy.defeated,
                    respawn_timer: enemy.respawn_timer,
                })
                .collect(),
            collectibles: self
                .collectibles
                .iter()
                .map(|collectible| CollectibleView {
                    kind: collectible.kind,
                    body: collectible.body,
                    animation_frame: collectible.animation_frame(),
                    collected: collectible.collected,
                })
                .collect(),
            camera_x: self.camera.x,
            score: self.session.score,
            lives: self.session.lives,
            running: self.session.running,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub character: CharacterView,
    pub enemies: Vec<EnemyView>,
    pub collectibles: Vec<CollectibleView>,
    pub camera_x: f32,
    pub score: u32,
    pub lives: i32,
    pub running: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterView {
    pub body: AxisBox,
    pub facing_right: bool,
    pub animation_frame: u8,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub body: AxisBox,
    pub facing_right: bool,
    pub animation_frame: u8,
    pub defeated: bool,
    pub respawn_timer: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub kind: CollectibleKind,
    pub body: AxisBox,
    pub animation_frame: u8,
    pub collected: bool,
}
