//! The player character: an explicit motion state machine over the
//! collision resolver.
//!
//! Grounding is driven by the resolver (buffered probe + vertical sweep),
//! never by position heuristics. Gravity is applied every step, including
//! while grounded; the vertical sweep immediately re-zeroes it against the
//! floor, keeping the resolver the single source of truth for contact.

use glam::Vec2;

use pke_core::animation::FrameLoop;
use pke_core::geom::AxisBox;
use pke_core::input::Intents;

use crate::collision;
use crate::grid::TileGrid;

const WALK_FRAME_PERIOD: f32 = 0.1;
const WALK_FRAME_COUNT: u8 = 3;

/// Jump eligibility collapsed into one state:
/// - `Grounded { can_jump }` -- standing on something; `can_jump` is set on
///   every landing and cleared by jumping.
/// - `Airborne { cooldown }` -- in the air; `cooldown` is the jump lockout
///   remaining from the most recent jump (zero when the character simply
///   walked off a ledge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    Grounded { can_jump: bool },
    Airborne { cooldown: f32 },
}

#[derive(Debug, Clone, Copy)]
pub struct CharacterConfig {
    pub run_speed: f32,
    /// Negative: up is -y.
    pub jump_speed: f32,
    pub gravity: f32,
    /// Ascent floor applied when the jump control is released early.
    pub min_ascent_speed: f32,
    /// Lockout after a jump before cooldown-based eligibility returns.
    pub jump_lockout: f32,
    /// Downward reach of the ground probe below the feet.
    pub ground_buffer: f32,
    pub size: Vec2,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            run_speed: 150.0,
            jump_speed: -350.0,
            gravity: 800.0,
            min_ascent_speed: -200.0,
            jump_lockout: 0.3,
            ground_buffer: 2.0,
            size: Vec2::new(16.0, 24.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Character {
    pub body: AxisBox,
    pub velocity: Vec2,
    pub facing_right: bool,
    pub motion: MotionState,
    pub anim: FrameLoop,
    pub config: CharacterConfig,
}

impl Character {
    pub fn new(spawn: Vec2, config: CharacterConfig) -> Self {
        Self {
            body: AxisBox::from_pos_size(spawn, config.size),
            velocity: Vec2::ZERO,
            facing_right: true,
            motion: MotionState::Airborne { cooldown: 0.0 },
            anim: FrameLoop::new(WALK_FRAME_PERIOD, WALK_FRAME_COUNT),
            config,
        }
    }

    pub fn on_ground(&self) -> bool {
        matches!(self.motion, MotionState::Grounded { .. })
    }

    pub fn can_jump(&self) -> bool {
        matches!(self.motion, MotionState::Grounded { can_jump: true })
    }

    pub fn animation_frame(&self) -> u8 {
        self.anim.frame()
    }

    /// Teleport back to the spawn point after a lost life. Motion state and
    /// facing are left alone; the next step's probe re-derives them.
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.x = spawn.x;
        self.body.y = spawn.y;
        self.velocity = Vec2::ZERO;
    }

    /// Full-session reset.
    pub fn reset(&mut self, spawn: Vec2) {
        self.respawn(spawn);
        self.facing_right = true;
        self.motion = MotionState::Airborne { cooldown: 0.0 };
        self.anim.reset();
    }

    /// Advance one capped step. Returns true when the character has fallen
    /// past the map's vertical extent (the caller routes that into the
    /// session's life-loss transition).
    pub fn step(&mut self, intents: Intents, dt: f32, grid: &TileGrid) -> bool {
        // Horizontal intent. Left is evaluated first, so pressing both
        // directions moves left.
        if intents.move_left {
            self.velocity.x = -self.config.run_speed;
            self.facing_right = false;
        } else if intents.move_right {
            self.velocity.x = self.config.run_speed;
            self.facing_right = true;
        } else {
            self.velocity.x = 0.0;
        }

        // Jump lockout decay.
        if let MotionState::Airborne { cooldown } = &mut self.motion {
            *cooldown = (*cooldown - dt).max(0.0);
        }

        // Buffered ground probe. Landing restores jump eligibility
        // unconditionally, even mid-lockout.
        let probed = collision::probe_ground(grid, &self.body, self.config.ground_buffer);
        self.motion = match (self.motion, probed) {
            (MotionState::Airborne { .. }, true) => MotionState::Grounded { can_jump: true },
            (MotionState::Grounded { .. }, false) => MotionState::Airborne { cooldown: 0.0 },
            (state, _) => state,
        };

        // Jump, only from an eligible grounded state. The 1px nudge
        // separates the box from the ground tile before the next probe.
        if intents.jump_requested && self.can_jump() {
            self.velocity.y = self.config.jump_speed;
            self.motion = MotionState::Airborne {
                cooldown: self.config.jump_lockout,
            };
            self.body.y -= 1.0;
        }

        // Variable jump height: releasing the control while ascending
        // clamps the ascent toward zero, never reverses it.
        if !intents.jump_held && self.velocity.y < 0.0 {
            self.velocity.y = self.velocity.y.max(self.config.min_ascent_speed);
        }

        self.velocity.y += self.config.gravity * dt;

        // Horizontal-then-vertical resolution.
        let horizontal = collision::sweep_horizontal(grid, &self.body, self.velocity.x, dt);
        self.body.x = horizontal.new_x;
        if horizontal.collided {
            self.velocity.x = 0.0;
        }

        let falling = self.velocity.y > 0.0;
        let vertical = collision::sweep_vertical(grid, &self.body, self.velocity.y, dt);
        self.body.y = vertical.new_y;
        if vertical.collided {
            if falling {
                self.motion = MotionState::Grounded { can_jump: true };
            }
            self.velocity.y = 0.0;
        }

        let fell_out = self.body.y > grid.height() as f32;

        self.anim.advance_if(dt, self.velocity.x != 0.0);

        fell_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Tile, TileKind};

    const DT: f32 = 1.0 / 60.0;

    /// 100x40 grid with a two-row floor strip at rows 38/39 and a wall
    /// column at x=60 above the floor.
    fn test_grid() -> TileGrid {
        let mut grid = TileGrid::new(100, 40);
        grid.fill_span(38, 0..100, Tile::solid(TileKind::Grass));
        grid.fill_span(39, 0..100, Tile::solid(TileKind::Ground));
        for row in 30..38 {
            grid.fill_span(row, 60..61, Tile::solid(TileKind::Platform));
        }
        grid
    }

    fn grounded_character(grid: &TileGrid) -> Character {
        let mut character = Character::new(Vec2::new(10.0, 10.0), CharacterConfig::default());
        for _ in 0..240 {
            character.step(Intents::default(), DT, grid);
            if character.on_ground() && character.velocity.y == 0.0 {
                break;
            }
        }
        assert!(character.on_ground(), "character should settle on the floor");
        assert_eq!(character.body.bottom(), 38.0, "flush on the grass row");
        character
    }

    #[test]
    fn settles_on_floor_with_zeroed_gravity() {
        let grid = test_grid();
        let character = grounded_character(&grid);
        assert!(character.can_jump());
        assert_eq!(character.velocity.y, 0.0);
    }

    #[test]
    fn jump_requires_grounded_eligibility() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);

        let jump = Intents {
            jump_held: true,
            jump_requested: true,
            ..Intents::default()
        };
        character.step(jump, DT, &grid);
        assert!(!character.on_ground());
        assert!(!character.can_jump());
        assert_eq!(
            character.velocity.y,
            character.config.jump_speed + character.config.gravity * DT
        );
    }

    #[test]
    fn repeated_jump_request_within_lockout_is_ignored() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);

        let jump = Intents {
            jump_held: true,
            jump_requested: true,
            ..Intents::default()
        };
        character.step(jump, DT, &grid);
        let vy_after_first = character.velocity.y;

        // Re-request 0.1s into the jump: airborne, so it must do nothing.
        let hold = Intents {
            jump_held: true,
            ..Intents::default()
        };
        for _ in 0..5 {
            character.step(hold, DT, &grid);
        }
        let vy_before_second = character.velocity.y;
        character.step(jump, DT, &grid);
        assert!(
            character.velocity.y > character.config.jump_speed + 1.0,
            "velocity must not snap back to full jump speed"
        );
        assert_eq!(
            character.velocity.y,
            vy_before_second + character.config.gravity * DT
        );
        assert!(vy_after_first < 0.0);
    }

    #[test]
    fn landing_restores_jump_before_lockout_expires() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);

        // The instant after a jump that is about to be cut short: airborne
        // with a fresh lockout, already dropping from 3px up.
        character.body.y -= 3.0;
        character.velocity.y = 60.0;
        character.motion = MotionState::Airborne { cooldown: 0.3 };

        // Landing within a handful of steps (~0.05s, far inside the 0.3s
        // lockout) must restore eligibility immediately.
        let mut steps = 0;
        while !character.on_ground() {
            character.step(Intents::default(), DT, &grid);
            steps += 1;
            assert!(steps <= 4, "landing should take a few steps at most");
        }
        assert!(character.can_jump());
    }

    #[test]
    fn left_wins_when_both_directions_held() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);
        character.step(
            Intents {
                move_left: true,
                move_right: true,
                ..Intents::default()
            },
            DT,
            &grid,
        );
        assert_eq!(character.velocity.x, -character.config.run_speed);
        assert!(!character.facing_right);
    }

    #[test]
    fn early_release_clamps_ascent() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);
        character.step(
            Intents {
                jump_held: true,
                jump_requested: true,
                ..Intents::default()
            },
            DT,
            &grid,
        );

        // Release the control while still rising fast.
        character.step(Intents::default(), DT, &grid);
        assert_eq!(
            character.velocity.y,
            character.config.min_ascent_speed + character.config.gravity * DT,
            "ascent clamps to the floor value before gravity integrates"
        );
        assert!(character.velocity.y < 0.0, "clamping never reverses the arc");
    }

    #[test]
    fn wall_hit_zeroes_horizontal_velocity_without_grounding() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);
        let run = Intents {
            move_right: true,
            ..Intents::default()
        };
        for _ in 0..300 {
            character.step(run, DT, &grid);
        }
        assert_eq!(character.body.right(), 60.0, "flush against the wall column");
        assert_eq!(character.velocity.x, 0.0);
        assert!(character.on_ground(), "wall contact never clears grounding");
    }

    #[test]
    fn falling_out_of_the_map_is_reported() {
        let grid = test_grid();
        let mut character = Character::new(Vec2::new(10.0, 10.0), CharacterConfig::default());
        character.body.y = grid.height() as f32 + 5.0;
        let fell = character.step(Intents::default(), DT, &grid);
        assert!(fell);
    }

    #[test]
    fn walk_animation_cycles_and_idles_at_rest_frame() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);
        let run = Intents {
            move_right: true,
            ..Intents::default()
        };
        // 0.1s per frame at 1/60 steps: after ~13 steps the cycle has
        // advanced at least twice.
        for _ in 0..13 {
            character.step(run, DT, &grid);
        }
        assert_ne!(character.animation_frame(), 0);

        for _ in 0..13 {
            character.step(Intents::default(), DT, &grid);
        }
        assert_eq!(character.animation_frame(), 0);
    }

    #[test]
    fn jump_applies_separation_nudge() {
        let grid = test_grid();
        let mut character = grounded_character(&grid);
        let y_before = character.body.y;
        character.step(
            Intents {
                jump_held: true,
                jump_requested: true,
                ..Intents::default()
            },
            DT,
            &grid,
        );
        // 1px nudge plus the first integrated step of ascent.
        let expected_rise = 1.0 - (character.config.jump_speed + character.config.gravity * DT) * DT;
        assert!((y_before - character.body.y - expected_rise).abs() < 1e-3);
    }
}
