//! Recurring expense line items.

use super::amount::lenient_amount;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Name given to a freshly added row.
pub const NEW_EXPENSE_NAME: &str = "New Expense";

/// Stable row key. Stored as an opaque string so legacy numeric ids survive.
pub type ExpenseId = String;

/// One monthly expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    pub id: ExpenseId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
}

impl ExpenseItem {
    /// Creates a row with a generated unique id.
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, amount)
    }

    pub fn with_id(id: impl Into<ExpenseId>, name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }

    /// Row appended by the editor's "add" action.
    pub fn placeholder() -> Self {
        Self::new(NEW_EXPENSE_NAME, 0.0)
    }
}

/// Why a list of rows cannot be stored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseIdError {
    /// Row at this position has an empty or whitespace-only id.
    Empty { index: usize },
    /// Two rows share this id.
    Duplicate(ExpenseId),
}

impl Display for ExpenseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { index } => write!(f, "expense row {index} has an empty id"),
            Self::Duplicate(id) => write!(f, "duplicate expense id: {id}"),
        }
    }
}

impl Error for ExpenseIdError {}

/// Checks that every row has a non-empty id and no id repeats.
///
/// Row edits address items by id, so a list failing this check could not be
/// edited reliably once stored.
pub fn validate_expense_ids(items: &[ExpenseItem]) -> Result<(), ExpenseIdError> {
    let mut seen = HashSet::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(ExpenseIdError::Empty { index });
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ExpenseIdError::Duplicate(item.id.clone()));
        }
    }
    Ok(())
}

/// Stock list offered when the user has never saved any expenses.
pub fn starter_expenses() -> Vec<ExpenseItem> {
    [
        ("1", "Internet", 800.0),
        ("2", "Netflix", 260.0),
        ("3", "Apple Music", 250.0),
        ("4", "Little Sis", 350.0),
        ("5", "Mummy", 200.0),
        ("6", "John", 1000.0),
        ("7", "Saving", 1000.0),
    ]
    .into_iter()
    .map(|(id, name, amount)| ExpenseItem::with_id(id, name, amount))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        starter_expenses, validate_expense_ids, ExpenseIdError, ExpenseItem, NEW_EXPENSE_NAME,
    };
    use std::collections::HashSet;

    #[test]
    fn placeholder_rows_get_distinct_ids() {
        let first = ExpenseItem::placeholder();
        let second = ExpenseItem::placeholder();
        assert_ne!(first.id, second.id);
        assert_eq!(first.name, NEW_EXPENSE_NAME);
        assert_eq!(first.amount, 0.0);
    }

    #[test]
    fn starter_list_has_unique_ids() {
        let items = starter_expenses();
        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn integer_amounts_decode() {
        let item: ExpenseItem = serde_json::from_value(serde_json::json!({
            "id": "9",
            "name": "Gym",
            "amount": 150
        }))
        .unwrap();
        assert_eq!(item.amount, 150.0);
    }

    #[test]
    fn null_amount_decodes_as_zero() {
        let item: ExpenseItem = serde_json::from_value(serde_json::json!({
            "id": "3",
            "name": "Apple Music",
            "amount": null
        }))
        .unwrap();
        assert_eq!(item.name, "Apple Music");
        assert_eq!(item.amount, 0.0);
    }

    #[test]
    fn starter_list_passes_id_check() {
        assert_eq!(validate_expense_ids(&starter_expenses()), Ok(()));
    }

    #[test]
    fn id_check_rejects_repeats_and_blanks() {
        let repeated = vec![
            ExpenseItem::with_id("1", "Internet", 800.0),
            ExpenseItem::with_id("1", "Netflix", 260.0),
        ];
        assert_eq!(
            validate_expense_ids(&repeated),
            Err(ExpenseIdError::Duplicate("1".to_string()))
        );

        let blank = vec![
            ExpenseItem::with_id("1", "Internet", 800.0),
            ExpenseItem::with_id("  ", "Netflix", 260.0),
        ];
        assert_eq!(
            validate_expense_ids(&blank),
            Err(ExpenseIdError::Empty { index: 1 })
        );
    }
}
