//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate slice persistence, derived totals and edit sessions into
//!   dashboard-level operations.
//! - Keep UI/FFI layers decoupled from the storage backend in use.

pub mod dashboard;
pub mod dashboard_service;
