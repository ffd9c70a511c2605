//! Engine-agnostic leaf types shared across the Pocket Knight runtime:
//! world-space geometry, the player-intent input abstraction, the capped
//! frame clock, and the frame-loop animation ticker.
//!
//! Nothing in this crate knows about tiles, entities, or rendering. It is
//! the dependency floor every other crate (and external shells) can share.

pub mod animation;
pub mod geom;
pub mod input;
pub mod time;
