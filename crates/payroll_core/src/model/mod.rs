//! Dashboard domain model.
//!
//! # Responsibility
//! - Define the four persisted state slices: employee profile, current
//!   period, salary record and expense list.
//! - Own the JSON wire shape of each slice (camelCase keys).
//!
//! # Invariants
//! - Every slice has a well-typed default used on first load and after reset.
//! - Decoding a slice never rejects missing fields; they take defaults.
//! - Amounts are finite whenever they are persisted.

pub mod amount;
pub mod employee;
pub mod expense;
pub mod period;
pub mod salary;
