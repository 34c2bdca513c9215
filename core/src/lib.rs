//! Grid pursuit/evasion simulation: zombies chase humans across a board
//! with obstacles, steered by breadth-first distance fields.

pub mod command;
pub mod config;
pub mod distance;
pub mod engine;
pub mod entity;
pub mod error;
pub mod event;
pub mod grid;
pub mod movement;
pub mod rng;
pub mod snapshot;
pub mod types;
