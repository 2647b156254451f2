//! Flutter-facing bridge crate for the payroll dashboard.

pub mod api;
