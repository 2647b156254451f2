//! Derived payslip totals.
//!
//! # Responsibility
//! - Compute gross pay, deductions, net pay and expense totals from source
//!   slices on every read.
//!
//! # Invariants
//! - Functions take shared references only and never persist anything.
//! - Summation order is the fixed `SalaryField` array order, so repeated
//!   calls on the same input are bit-identical.
//! - Negative results (e.g. deductions above earnings) are valid output.

use crate::model::expense::ExpenseItem;
use crate::model::salary::{SalaryField, SalaryRecord};

/// Sum of the ten earnings fields.
pub fn gross_pay(record: &SalaryRecord) -> f64 {
    sum_fields(record, &SalaryField::EARNINGS)
}

/// Sum of the ten deduction fields.
pub fn total_deductions(record: &SalaryRecord) -> f64 {
    sum_fields(record, &SalaryField::DEDUCTIONS)
}

pub fn net_pay(record: &SalaryRecord) -> f64 {
    gross_pay(record) - total_deductions(record)
}

/// Sum of every row amount; `0.0` for an empty list.
pub fn total_expenses(items: &[ExpenseItem]) -> f64 {
    items.iter().fold(0.0, |sum, item| sum + item.amount)
}

fn sum_fields(record: &SalaryRecord, fields: &[SalaryField]) -> f64 {
    fields
        .iter()
        .fold(0.0, |sum, field| sum + record.get(*field))
}

/// Read-only projection shown by the summary panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedTotals {
    pub gross_pay: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
    pub total_expenses: f64,
    /// Net pay left after the month's expenses.
    pub remaining_balance: f64,
}

impl DerivedTotals {
    pub fn compute(record: &SalaryRecord, expenses: &[ExpenseItem]) -> Self {
        let gross_pay = gross_pay(record);
        let total_deductions = total_deductions(record);
        let net_pay = gross_pay - total_deductions;
        let total_expenses = total_expenses(expenses);

        Self {
            gross_pay,
            total_deductions,
            net_pay,
            total_expenses,
            remaining_balance: net_pay - total_expenses,
        }
    }
}
