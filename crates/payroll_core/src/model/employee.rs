//! Employee profile slice.

use serde::{Deserialize, Serialize};

/// Free-text profile shown on the payslip header.
///
/// No field is validated; empty strings are the default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeInfo {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub position: String,
}

impl EmployeeInfo {
    /// Returns whether every field is still blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.employee_id,
            &self.department,
            &self.position,
        ]
        .iter()
        .all(|value| value.trim().is_empty())
    }
}
