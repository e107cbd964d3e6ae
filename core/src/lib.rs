//! Deterministic simulation core of a small arcade football title.
//!
//! The host (a lockstep/rollback engine) owns a [`Game`] value, feeds
//! one input batch per fixed 16 ms step into [`game_tick`], and may
//! snapshot or restore the whole state at any tick boundary through the
//! [`snapshot`] codec. Identical state plus identical inputs produce a
//! bit-identical next state; there is no randomness, no allocation in
//! the tick, and no I/O beyond advisory `log` messages.

pub mod arena;
pub mod ball;
pub mod constants;
pub mod geom;
pub mod init;
pub mod physics;
pub mod roster;
pub mod snapshot;
pub mod step;
pub mod types;

pub use constants::*;
pub use init::create_initial_game;
pub use snapshot::{decode_game, encode_game, encode_game_into, STATE_OCTET_SIZE};
pub use step::game_tick;
pub use types::*;
