//! Row structs for the roster tables.

pub mod employee;
