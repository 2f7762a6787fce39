//! Request handlers.
//!
//! Handlers delegate to the record store in [`crate::state::AppState`] and
//! map failures via [`crate::error::AppError`].

pub mod employee;
