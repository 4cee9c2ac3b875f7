//! Core entity definitions for Mealtrack.
//!
//! This crate defines the data types shared between the storage layer and
//! the HTTP server: users and the meals they log.

mod meal;
mod user;

pub use meal::*;
pub use user::*;
