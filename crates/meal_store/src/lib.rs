//! Meal storage for Mealtrack
//!
//! This crate provides a storage abstraction for users and meal records.
//! It ships a SQLite implementation backed by `sqlx` and an in-memory
//! implementation for tests.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
