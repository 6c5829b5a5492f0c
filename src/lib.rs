//! Sky Burger — catch falling ingredients, complete each level's missions.
//!
//! Everything in this crate is pure game logic.  Terminal I/O, input and
//! timing live in the binary (`main.rs` / `display.rs`).

pub mod catalog;
pub mod compute;
pub mod config;
pub mod entities;
pub mod evaluator;
pub mod ledger;
pub mod outcome;
pub mod progress;
pub mod spawner;
pub mod tween;
