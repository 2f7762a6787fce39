//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that take
//! a pool or a leased connection as the first argument.

pub mod employee_repo;

pub use employee_repo::EmployeeRepo;
