//! Client side of the employee roster.
//!
//! [`api::HttpEmployeesApi`] talks to the HTTP API; [`state::TableState`]
//! holds the table parameters and rows; [`controller::EmployeeController`]
//! ties the two together so every visible change comes from a server reply.

pub mod api;
pub mod controller;
pub mod error;
pub mod models;
pub mod state;

pub use error::ClientError;
