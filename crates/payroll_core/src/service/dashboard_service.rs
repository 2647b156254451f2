//! Persistence use-cases for the four dashboard slices.
//!
//! # Responsibility
//! - Map each slice to its storage key and typed default.
//! - Load, save, export, import and reset slices through `StoreAdapter`.
//!
//! # Invariants
//! - Every slice is saved whole; there are no partial writes.
//! - Loads decode into typed slices: missing fields take defaults, and a
//!   payload of the wrong shape falls back to the slice default.
//! - Export uses the same defaults as `load_state`.
//! - Salary and expense saves refuse non-finite amounts, and expense saves
//!   refuse empty or repeated row ids; nothing is written in either case.

use crate::calc::DerivedTotals;
use crate::model::employee::EmployeeInfo;
use crate::model::amount::is_storable_amount;
use crate::model::expense::{validate_expense_ids, ExpenseIdError, ExpenseItem};
use crate::model::period::Period;
use crate::model::salary::SalaryRecord;
use crate::store::{KeyValueStore, StoreAdapter};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage keys, one per slice.
pub mod keys {
    pub const EMPLOYEE_INFO: &str = "employeeInfo";
    pub const CURRENT_PERIOD: &str = "currentPeriod";
    pub const SALARY_DATA: &str = "salaryData";
    pub const EXPENSES: &str = "expenses";

    pub const ALL: [&str; 4] = [EMPLOYEE_INFO, CURRENT_PERIOD, SALARY_DATA, EXPENSES];
}

const EXPORT_FILE_PREFIX: &str = "payroll-data";

/// The four persisted slices, loaded together.
///
/// Also the exported document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub employee_info: EmployeeInfo,
    pub current_period: Period,
    pub salary_data: SalaryRecord,
    pub expenses: Vec<ExpenseItem>,
}

impl DashboardState {
    /// Fresh first-load state for `period`.
    pub fn empty(period: Period) -> Self {
        Self {
            employee_info: EmployeeInfo::default(),
            current_period: period,
            salary_data: SalaryRecord::default(),
            expenses: Vec::new(),
        }
    }

    pub fn totals(&self) -> DerivedTotals {
        DerivedTotals::compute(&self.salary_data, &self.expenses)
    }
}

#[derive(Debug)]
pub enum ImportError {
    /// Document is not a complete dashboard export.
    Decode(serde_json::Error),
    /// Expense rows cannot be addressed by id.
    InvalidExpenses(ExpenseIdError),
    /// Document decoded, but some slices could not be written.
    Storage { failed_keys: Vec<&'static str> },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid dashboard export: {err}"),
            Self::InvalidExpenses(err) => write!(f, "invalid expenses in export: {err}"),
            Self::Storage { failed_keys } => {
                write!(f, "failed to store imported keys: {}", failed_keys.join(", "))
            }
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::InvalidExpenses(err) => Some(err),
            Self::Storage { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl From<ExpenseIdError> for ImportError {
    fn from(value: ExpenseIdError) -> Self {
        Self::InvalidExpenses(value)
    }
}

/// Slice persistence over an injected storage backend.
pub struct DashboardService<S: KeyValueStore> {
    adapter: StoreAdapter<S>,
    default_period: Period,
}

impl<S: KeyValueStore> DashboardService<S> {
    /// Uses the current local month as the default period.
    pub fn new(store: S) -> Self {
        Self::with_default_period(store, Period::current())
    }

    pub fn with_default_period(store: S, default_period: Period) -> Self {
        Self {
            adapter: StoreAdapter::new(store),
            default_period,
        }
    }

    pub fn adapter(&self) -> &StoreAdapter<S> {
        &self.adapter
    }

    pub fn default_period(&self) -> &Period {
        &self.default_period
    }

    pub fn load_employee(&self) -> EmployeeInfo {
        self.adapter
            .load(keys::EMPLOYEE_INFO, EmployeeInfo::default())
    }

    pub fn load_period(&self) -> Period {
        self.adapter
            .load(keys::CURRENT_PERIOD, self.default_period.clone())
    }

    pub fn load_salary(&self) -> SalaryRecord {
        self.adapter.load(keys::SALARY_DATA, SalaryRecord::default())
    }

    pub fn load_expenses(&self) -> Vec<ExpenseItem> {
        self.adapter.load(keys::EXPENSES, Vec::new())
    }

    /// Loads all four slices, defaulting each one independently.
    pub fn load_state(&self) -> DashboardState {
        DashboardState {
            employee_info: self.load_employee(),
            current_period: self.load_period(),
            salary_data: self.load_salary(),
            expenses: self.load_expenses(),
        }
    }

    /// Totals recomputed from what is currently stored.
    pub fn totals(&self) -> DerivedTotals {
        DerivedTotals::compute(&self.load_salary(), &self.load_expenses())
    }

    pub fn save_employee(&self, info: &EmployeeInfo) -> bool {
        self.adapter.save(keys::EMPLOYEE_INFO, info)
    }

    pub fn save_period(&self, period: &Period) -> bool {
        if !period.is_well_formed() {
            warn!("event=period_save module=service status=warn reason=not_year_month");
        }
        self.adapter.save(keys::CURRENT_PERIOD, period)
    }

    /// Returns `false` without writing when any amount is NaN or infinite.
    pub fn save_salary(&self, record: &SalaryRecord) -> bool {
        if let Some(field) = record.non_finite_field() {
            warn!(
                "event=salary_save module=service status=rejected reason=non_finite_amount field={}",
                field.key()
            );
            return false;
        }
        self.adapter.save(keys::SALARY_DATA, record)
    }

    /// Returns `false` without writing when a row amount is NaN or infinite,
    /// or when row ids are empty or repeated.
    pub fn save_expenses(&self, items: &[ExpenseItem]) -> bool {
        if let Some(index) = items
            .iter()
            .position(|item| !is_storable_amount(item.amount))
        {
            warn!(
                "event=expenses_save module=service status=rejected reason=non_finite_amount index={index}"
            );
            return false;
        }
        if let Err(err) = validate_expense_ids(items) {
            warn!("event=expenses_save module=service status=rejected reason=invalid_id error={err}");
            return false;
        }
        self.adapter.save(keys::EXPENSES, items)
    }

    /// Writes every slice of `state`; returns the keys that failed.
    pub fn save_state(&self, state: &DashboardState) -> Vec<&'static str> {
        let outcomes = [
            (keys::EMPLOYEE_INFO, self.save_employee(&state.employee_info)),
            (keys::CURRENT_PERIOD, self.save_period(&state.current_period)),
            (keys::SALARY_DATA, self.save_salary(&state.salary_data)),
            (keys::EXPENSES, self.save_expenses(&state.expenses)),
        ];
        outcomes
            .into_iter()
            .filter_map(|(key, saved)| (!saved).then_some(key))
            .collect()
    }

    /// Export document for download. Read-only.
    pub fn export_state(&self) -> DashboardState {
        self.load_state()
    }

    /// Export document as 2-space indented JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        let json = serde_json::to_string_pretty(&self.export_state())?;
        info!(
            "event=dashboard_export module=service status=ok bytes={}",
            json.len()
        );
        Ok(json)
    }

    /// Stored slices as raw JSON, without typed normalization.
    ///
    /// A malformed slice is exported exactly as stored; only absent or
    /// unreadable keys take the typed default.
    pub fn export_raw(&self) -> serde_json::Result<Value> {
        let defaults = serde_json::to_value(DashboardState::empty(self.default_period.clone()))?;
        let tracked = keys::ALL
            .iter()
            .map(|key| (*key, defaults.get(*key).cloned().unwrap_or(Value::Null)))
            .collect::<Vec<_>>();
        Ok(self.adapter.export_snapshot(&tracked))
    }

    /// Restores an export document, replacing all four slices.
    ///
    /// The document is fully decoded and its expense ids checked before
    /// anything is written.
    pub fn import_json(&self, json: &str) -> Result<DashboardState, ImportError> {
        let state: DashboardState = serde_json::from_str(json)?;
        if let Err(err) = validate_expense_ids(&state.expenses) {
            warn!("event=dashboard_import module=service status=rejected reason=invalid_id error={err}");
            return Err(err.into());
        }
        let failed_keys = self.save_state(&state);
        if !failed_keys.is_empty() {
            warn!(
                "event=dashboard_import module=service status=error failed_keys={}",
                failed_keys.join(",")
            );
            return Err(ImportError::Storage { failed_keys });
        }
        info!(
            "event=dashboard_import module=service status=ok expenses={}",
            state.expenses.len()
        );
        Ok(state)
    }

    /// Deletes all four slices; the next load yields defaults.
    ///
    /// Returns whether every delete succeeded.
    pub fn clear_all(&self) -> bool {
        let cleared = self.adapter.clear(&keys::ALL);
        let complete = cleared == keys::ALL.len();
        info!(
            "event=dashboard_clear module=service status={} cleared={}",
            if complete { "ok" } else { "partial" },
            cleared
        );
        complete
    }
}

/// Download name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", date.format("%Y-%m-%d"))
}
