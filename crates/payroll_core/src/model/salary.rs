//! Salary slip slice.
//!
//! # Responsibility
//! - Hold the 21 named amounts of one payslip.
//! - Tag every amount with a compile-time `SalaryField` so totals iterate
//!   fixed arrays instead of matching key names.
//!
//! # Invariants
//! - `SalaryField::EARNINGS` and `SalaryField::DEDUCTIONS` are disjoint.
//! - `NassitEmployer` belongs to neither set.
//! - Amounts are not range-checked; negative values flow through totals.

use super::amount::{is_storable_amount, lenient_amount};
use serde::{Deserialize, Serialize};

/// Which total a salary field contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Earning,
    Deduction,
    /// Recorded on the slip but excluded from gross and deductions.
    Informational,
}

/// Identifier of one amount on the salary slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SalaryField {
    BasicSalary,
    GeneralAllowance,
    Medical,
    PhoneAllowance,
    Transport,
    Rent,
    ActingAllowance,
    Overtime,
    IncentivePay,
    Bonus,
    /// Employee social security contribution.
    NassitEmployee,
    /// Income tax withheld at source.
    Paye,
    SalaryAdvance,
    /// Repayment for a device bought through the employer.
    ProductPhoneRepayment,
    TransportDeduction,
    RentDeduction,
    /// Outstanding balance owed to the employer.
    HubBalance,
    StockDeduction,
    LoanRepayment,
    ExpensesAdvanceOthers,
    /// Employer social security contribution.
    NassitEmployer,
}

impl SalaryField {
    pub const EARNINGS: [SalaryField; 10] = [
        SalaryField::BasicSalary,
        SalaryField::GeneralAllowance,
        SalaryField::Medical,
        SalaryField::PhoneAllowance,
        SalaryField::Transport,
        SalaryField::Rent,
        SalaryField::ActingAllowance,
        SalaryField::Overtime,
        SalaryField::IncentivePay,
        SalaryField::Bonus,
    ];

    pub const DEDUCTIONS: [SalaryField; 10] = [
        SalaryField::NassitEmployee,
        SalaryField::Paye,
        SalaryField::SalaryAdvance,
        SalaryField::ProductPhoneRepayment,
        SalaryField::TransportDeduction,
        SalaryField::RentDeduction,
        SalaryField::HubBalance,
        SalaryField::StockDeduction,
        SalaryField::LoanRepayment,
        SalaryField::ExpensesAdvanceOthers,
    ];

    pub const ALL: [SalaryField; 21] = [
        SalaryField::BasicSalary,
        SalaryField::GeneralAllowance,
        SalaryField::Medical,
        SalaryField::PhoneAllowance,
        SalaryField::Transport,
        SalaryField::Rent,
        SalaryField::ActingAllowance,
        SalaryField::Overtime,
        SalaryField::IncentivePay,
        SalaryField::Bonus,
        SalaryField::NassitEmployee,
        SalaryField::Paye,
        SalaryField::SalaryAdvance,
        SalaryField::ProductPhoneRepayment,
        SalaryField::TransportDeduction,
        SalaryField::RentDeduction,
        SalaryField::HubBalance,
        SalaryField::StockDeduction,
        SalaryField::LoanRepayment,
        SalaryField::ExpensesAdvanceOthers,
        SalaryField::NassitEmployer,
    ];

    pub fn category(self) -> FieldCategory {
        if Self::EARNINGS.contains(&self) {
            FieldCategory::Earning
        } else if Self::DEDUCTIONS.contains(&self) {
            FieldCategory::Deduction
        } else {
            FieldCategory::Informational
        }
    }

    /// Key used for this field in the persisted `salaryData` object.
    pub fn key(self) -> &'static str {
        match self {
            Self::BasicSalary => "basicSalary",
            Self::GeneralAllowance => "generalAllowance",
            Self::Medical => "medical",
            Self::PhoneAllowance => "phoneAllowance",
            Self::Transport => "transport",
            Self::Rent => "rent",
            Self::ActingAllowance => "actingAllowance",
            Self::Overtime => "overtime",
            Self::IncentivePay => "incentivePay",
            Self::Bonus => "bonus",
            Self::NassitEmployee => "nassitEmployee",
            Self::Paye => "paye",
            Self::SalaryAdvance => "salaryAdvance",
            Self::ProductPhoneRepayment => "productPhoneRepayment",
            Self::TransportDeduction => "transportDeduction",
            Self::RentDeduction => "rentDeduction",
            Self::HubBalance => "hubBalance",
            Self::StockDeduction => "stockDeduction",
            Self::LoanRepayment => "loanRepayment",
            Self::ExpensesAdvanceOthers => "expensesAdvanceOthers",
            Self::NassitEmployer => "nassitEmployer",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::BasicSalary => "Basic Salary",
            Self::GeneralAllowance => "General Allowance",
            Self::Medical => "Medical",
            Self::PhoneAllowance => "Phone Allowance",
            Self::Transport => "Transport",
            Self::Rent => "Rent",
            Self::ActingAllowance => "Acting Allowance",
            Self::Overtime => "Overtime",
            Self::IncentivePay => "Incentive Pay",
            Self::Bonus => "Bonus",
            Self::NassitEmployee => "NASSIT (Employee)",
            Self::Paye => "PAYE",
            Self::SalaryAdvance => "Salary Advance",
            Self::ProductPhoneRepayment => "Product/Phone Repayment",
            Self::TransportDeduction => "Transport Deduction",
            Self::RentDeduction => "Rent Deduction",
            Self::HubBalance => "Hub Balance",
            Self::StockDeduction => "Stock Deduction",
            Self::LoanRepayment => "Loan Repayment",
            Self::ExpensesAdvanceOthers => "Expenses Advance/Others",
            Self::NassitEmployer => "NASSIT (Employer)",
        }
    }
}

/// All amounts on one salary slip.
///
/// Decoding fills any missing or `null` amount with `0.0` and ignores unknown
/// keys, so an older or partial `salaryData` payload still yields a complete
/// record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryRecord {
    #[serde(deserialize_with = "lenient_amount")]
    pub basic_salary: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub general_allowance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub medical: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub phone_allowance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub transport: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub rent: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub acting_allowance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub overtime: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub incentive_pay: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub bonus: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub nassit_employee: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub paye: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub salary_advance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub product_phone_repayment: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub transport_deduction: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub rent_deduction: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub hub_balance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub stock_deduction: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub loan_repayment: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub expenses_advance_others: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub nassit_employer: f64,
}

impl SalaryRecord {
    pub fn get(&self, field: SalaryField) -> f64 {
        *self.slot(field)
    }

    pub fn set(&mut self, field: SalaryField, amount: f64) {
        *self.slot_mut(field) = amount;
    }

    /// Builder-style setter, mostly for fixtures.
    pub fn with(mut self, field: SalaryField, amount: f64) -> Self {
        self.set(field, amount);
        self
    }

    /// First field holding NaN or an infinity, if any.
    pub fn non_finite_field(&self) -> Option<SalaryField> {
        SalaryField::ALL
            .into_iter()
            .find(|field| !is_storable_amount(self.get(*field)))
    }

    fn slot(&self, field: SalaryField) -> &f64 {
        match field {
            SalaryField::BasicSalary => &self.basic_salary,
            SalaryField::GeneralAllowance => &self.general_allowance,
            SalaryField::Medical => &self.medical,
            SalaryField::PhoneAllowance => &self.phone_allowance,
            SalaryField::Transport => &self.transport,
            SalaryField::Rent => &self.rent,
            SalaryField::ActingAllowance => &self.acting_allowance,
            SalaryField::Overtime => &self.overtime,
            SalaryField::IncentivePay => &self.incentive_pay,
            SalaryField::Bonus => &self.bonus,
            SalaryField::NassitEmployee => &self.nassit_employee,
            SalaryField::Paye => &self.paye,
            SalaryField::SalaryAdvance => &self.salary_advance,
            SalaryField::ProductPhoneRepayment => &self.product_phone_repayment,
            SalaryField::TransportDeduction => &self.transport_deduction,
            SalaryField::RentDeduction => &self.rent_deduction,
            SalaryField::HubBalance => &self.hub_balance,
            SalaryField::StockDeduction => &self.stock_deduction,
            SalaryField::LoanRepayment => &self.loan_repayment,
            SalaryField::ExpensesAdvanceOthers => &self.expenses_advance_others,
            SalaryField::NassitEmployer => &self.nassit_employer,
        }
    }

    fn slot_mut(&mut self, field: SalaryField) -> &mut f64 {
        match field {
            SalaryField::BasicSalary => &mut self.basic_salary,
            SalaryField::GeneralAllowance => &mut self.general_allowance,
            SalaryField::Medical => &mut self.medical,
            SalaryField::PhoneAllowance => &mut self.phone_allowance,
            SalaryField::Transport => &mut self.transport,
            SalaryField::Rent => &mut self.rent,
            SalaryField::ActingAllowance => &mut self.acting_allowance,
            SalaryField::Overtime => &mut self.overtime,
            SalaryField::IncentivePay => &mut self.incentive_pay,
            SalaryField::Bonus => &mut self.bonus,
            SalaryField::NassitEmployee => &mut self.nassit_employee,
            SalaryField::Paye => &mut self.paye,
            SalaryField::SalaryAdvance => &mut self.salary_advance,
            SalaryField::ProductPhoneRepayment => &mut self.product_phone_repayment,
            SalaryField::TransportDeduction => &mut self.transport_deduction,
            SalaryField::RentDeduction => &mut self.rent_deduction,
            SalaryField::HubBalance => &mut self.hub_balance,
            SalaryField::StockDeduction => &mut self.stock_deduction,
            SalaryField::LoanRepayment => &mut self.loan_repayment,
            SalaryField::ExpensesAdvanceOthers => &mut self.expenses_advance_others,
            SalaryField::NassitEmployer => &mut self.nassit_employer,
        }
    }
}
