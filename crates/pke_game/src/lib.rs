//! Pocket Knight Engine -- a headless 2D tile-platformer runtime.
//!
//! The runtime advances a player character and patrolling enemies through a
//! static tile map under gravity, resolves collisions against solid tiles
//! and between entities, and tracks score/lives. Rendering, input capture,
//! and HUD display are shell concerns: shells feed sampled
//! [`pke_core::input::Intents`] into [`world::World::step`] and read back
//! the per-frame [`world::WorldSnapshot`].
//!
//! Module map, leaf-first:
//! - [`grid`] -- static tile solidity/kind lookup
//! - [`level`] -- JSON level content, validation, and the built-in map
//! - [`sprite`] -- immutable per-pixel solidity masks for fine collision
//! - [`collision`] -- axis-separated sweeps and the buffered ground probe
//! - [`character`] / [`enemy`] / [`collectible`] -- entity state machines
//! - [`contact`] -- stomp/side-hit classification and collectible pickup
//! - [`camera`] / [`session`] -- derived view offset and score/lives
//! - [`world`] -- the aggregate stepped in a fixed component order
//! - [`replay`] -- recorded intent sequences for demos and determinism tests

pub mod camera;
pub mod character;
pub mod collectible;
pub mod collision;
pub mod contact;
pub mod enemy;
pub mod grid;
pub mod level;
pub mod replay;
pub mod session;
pub mod sprite;
pub mod world;
