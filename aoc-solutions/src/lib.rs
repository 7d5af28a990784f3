//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains actual puzzle solutions organized by year.
//! Each solution uses the `AutoRegisterSolver` derive macro for automatic
//! plugin registration with the solver framework, so linking the crate is
//! enough for a runner to discover them.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
