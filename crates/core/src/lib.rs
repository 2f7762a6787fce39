//! Domain logic for the employee roster.
//!
//! Nothing in this crate touches the database, the network or the file
//! system. The db, api and client crates all build on these types.

pub mod employee;
pub mod error;
pub mod listing;
pub mod types;
pub mod upload;
