//! Domain types for the labor lines service.
//!
//! Pure logic only: the labor line record model, derived storage keys,
//! input validation, and the shared error type. No store or transport
//! dependencies live here.

pub mod error;
pub mod labor_line;
pub mod types;
pub mod validation;
