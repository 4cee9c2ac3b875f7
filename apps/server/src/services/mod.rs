//! Domain services.

pub mod summary;
