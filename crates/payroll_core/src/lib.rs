//! Core domain logic for the payroll and expense dashboard.
//! This crate owns slice persistence, derived totals and edit sessions.

pub mod calc;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;
pub mod store;

pub use calc::{gross_pay, net_pay, total_deductions, total_expenses, DerivedTotals};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::amount::is_storable_amount;
pub use model::employee::EmployeeInfo;
pub use model::expense::{
    starter_expenses, validate_expense_ids, ExpenseId, ExpenseIdError, ExpenseItem,
    NEW_EXPENSE_NAME,
};
pub use model::period::Period;
pub use model::salary::{FieldCategory, SalaryField, SalaryRecord};
pub use service::dashboard::Dashboard;
pub use service::dashboard_service::{
    export_file_name, keys, DashboardService, DashboardState, ImportError,
};
pub use session::{
    EditMode, EditSession, ExpenseEditor, SalaryEditor, SessionError, SessionResult,
};
pub use store::{
    KeyValueStore, MemoryStore, SqliteStore, StoreAdapter, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
