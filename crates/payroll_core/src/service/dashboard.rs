//! In-memory dashboard driving the editable panels.
//!
//! # Responsibility
//! - Hold the live slices and the salary/expense edit sessions.
//! - Persist a slice right after it changes, one save per change.
//!
//! # Invariants
//! - Only committed values are persisted; working copies never are.
//! - Totals are derived from committed values on each call.
//! - A failed save keeps the in-memory change.

use crate::calc::DerivedTotals;
use crate::model::employee::EmployeeInfo;
use crate::model::expense::ExpenseItem;
use crate::model::period::Period;
use crate::model::salary::SalaryRecord;
use crate::service::dashboard_service::{DashboardService, DashboardState, ImportError};
use crate::session::{ExpenseEditor, SalaryEditor};
use crate::store::KeyValueStore;

pub struct Dashboard<S: KeyValueStore> {
    service: DashboardService<S>,
    employee_info: EmployeeInfo,
    current_period: Period,
    salary: SalaryEditor,
    expenses: ExpenseEditor,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Loads every slice from storage, defaulting what is missing.
    pub fn open(service: DashboardService<S>) -> Self {
        let state = service.load_state();
        Self {
            service,
            employee_info: state.employee_info,
            current_period: state.current_period,
            salary: SalaryEditor::new(state.salary_data),
            expenses: ExpenseEditor::new(state.expenses),
        }
    }

    pub fn service(&self) -> &DashboardService<S> {
        &self.service
    }

    pub fn employee_info(&self) -> &EmployeeInfo {
        &self.employee_info
    }

    pub fn current_period(&self) -> &Period {
        &self.current_period
    }

    pub fn salary(&self) -> &SalaryEditor {
        &self.salary
    }

    pub fn salary_mut(&mut self) -> &mut SalaryEditor {
        &mut self.salary
    }

    pub fn expenses(&self) -> &ExpenseEditor {
        &self.expenses
    }

    pub fn expenses_mut(&mut self) -> &mut ExpenseEditor {
        &mut self.expenses
    }

    /// Committed state of all four slices.
    pub fn state(&self) -> DashboardState {
        DashboardState {
            employee_info: self.employee_info.clone(),
            current_period: self.current_period.clone(),
            salary_data: self.salary.committed().clone(),
            expenses: self.expenses.committed().clone(),
        }
    }

    pub fn totals(&self) -> DerivedTotals {
        DerivedTotals::compute(self.salary.committed(), self.expenses.committed())
    }

    /// Returns whether the change was persisted.
    pub fn update_employee(&mut self, info: EmployeeInfo) -> bool {
        self.employee_info = info;
        self.service.save_employee(&self.employee_info)
    }

    pub fn update_period(&mut self, period: Period) -> bool {
        self.current_period = period;
        self.service.save_period(&self.current_period)
    }

    /// Save action of the salary panel.
    ///
    /// Returns `None` when the panel was not editing, otherwise whether the
    /// committed record was persisted.
    pub fn commit_salary(&mut self) -> Option<bool> {
        let committed: &SalaryRecord = self.salary.commit()?;
        Some(self.service.save_salary(committed))
    }

    pub fn cancel_salary(&mut self) {
        self.salary.cancel();
    }

    /// Save action of the expense panel; see `commit_salary`.
    pub fn commit_expenses(&mut self) -> Option<bool> {
        let committed: &Vec<ExpenseItem> = self.expenses.commit()?;
        Some(self.service.save_expenses(committed))
    }

    pub fn cancel_expenses(&mut self) {
        self.expenses.cancel();
    }

    /// Deletes all stored slices and returns to defaults.
    pub fn reset(&mut self) -> bool {
        let cleared = self.service.clear_all();
        self.reload();
        cleared
    }

    /// Replaces everything with an export document.
    pub fn import_json(&mut self, json: &str) -> Result<(), ImportError> {
        let outcome = self.service.import_json(json);
        self.reload();
        outcome.map(|_| ())
    }

    pub fn export_json(&self) -> serde_json::Result<String> {
        self.service.export_json()
    }

    fn reload(&mut self) {
        let state = self.service.load_state();
        self.employee_info = state.employee_info;
        self.current_period = state.current_period;
        self.salary.reset_committed(state.salary_data);
        self.expenses.reset_committed(state.expenses);
    }
}
