//! Core engine types: card ids, positions, RNG, configuration.
//!
//! This module contains the fundamental building blocks shared by the
//! catalog, the board, and the day cycle.

pub mod config;
pub mod entity;
pub mod position;
pub mod rng;

pub use config::{DayConfig, EngineConfig};
pub use entity::CardId;
pub use position::Vec3;
pub use rng::GameRng;
