//! Viewing/Editing state for the salary and expense panels.
//!
//! # Responsibility
//! - Keep the committed value and, while editing, a separate working copy.
//! - Gate row-level expense edits on the Editing state.
//!
//! # Invariants
//! - The committed value only changes through `commit`.
//! - `cancel` leaves the committed value exactly as it was before
//!   `begin_edit`, whatever happened to the working copy.
//! - Sessions never persist; callers save the value `commit` returns.
//! - Field and row amount setters refuse NaN and infinities.

use crate::model::amount::is_storable_amount;
use crate::model::expense::{starter_expenses, ExpenseId, ExpenseItem};
use crate::model::salary::{SalaryField, SalaryRecord};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Operation requires an open edit session.
    NotEditing,
    /// No row with this id in the working copy.
    UnknownItem(ExpenseId),
    /// NaN or an infinity; JSON cannot store it.
    NonFiniteAmount,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => write!(f, "panel is not in editing mode"),
            Self::UnknownItem(id) => write!(f, "expense item not found: {id}"),
            Self::NonFiniteAmount => write!(f, "amount must be a finite number"),
        }
    }
}

impl Error for SessionError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing,
}

/// One editable panel.
#[derive(Debug, Clone)]
pub struct EditSession<T: Clone> {
    committed: T,
    working: Option<T>,
}

impl<T: Clone> EditSession<T> {
    /// Starts in Viewing, seeded from the last committed value.
    pub fn new(committed: T) -> Self {
        Self {
            committed,
            working: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        if self.working.is_some() {
            EditMode::Editing
        } else {
            EditMode::Viewing
        }
    }

    pub fn is_editing(&self) -> bool {
        self.working.is_some()
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// Value the panel should render: the working copy while editing.
    pub fn current(&self) -> &T {
        self.working.as_ref().unwrap_or(&self.committed)
    }

    pub fn working(&self) -> Option<&T> {
        self.working.as_ref()
    }

    pub fn working_mut(&mut self) -> Option<&mut T> {
        self.working.as_mut()
    }

    /// Viewing → Editing with a fresh copy of the committed value.
    ///
    /// No-op while already editing.
    pub fn begin_edit(&mut self) {
        self.begin_edit_with(T::clone);
    }

    /// Viewing → Editing with a working copy derived from the committed value.
    pub fn begin_edit_with(&mut self, seed: impl FnOnce(&T) -> T) {
        if self.working.is_none() {
            self.working = Some(seed(&self.committed));
        }
    }

    /// Editing → Viewing, keeping the working copy.
    ///
    /// Returns the new committed value for the caller to persist, or `None`
    /// when no edit was open.
    pub fn commit(&mut self) -> Option<&T> {
        let working = self.working.take()?;
        self.committed = working;
        Some(&self.committed)
    }

    /// Editing → Viewing, dropping the working copy.
    pub fn cancel(&mut self) {
        self.working = None;
    }

    /// Replaces the committed value from outside (e.g. after a reload).
    ///
    /// Any open edit is discarded.
    pub fn reset_committed(&mut self, committed: T) {
        self.committed = committed;
        self.working = None;
    }

    fn working_or_err(&mut self) -> SessionResult<&mut T> {
        self.working.as_mut().ok_or(SessionError::NotEditing)
    }
}

/// Salary slip panel.
pub type SalaryEditor = EditSession<SalaryRecord>;

impl EditSession<SalaryRecord> {
    pub fn set_field(&mut self, field: SalaryField, amount: f64) -> SessionResult<()> {
        let working = self.working_or_err()?;
        check_amount(amount)?;
        working.set(field, amount);
        Ok(())
    }
}

/// Monthly expenses panel.
pub type ExpenseEditor = EditSession<Vec<ExpenseItem>>;

impl EditSession<Vec<ExpenseItem>> {
    /// Opens an edit; an empty committed list is replaced by the starter rows
    /// in the working copy only.
    pub fn begin_expense_edit(&mut self) {
        self.begin_edit_with(|committed| {
            if committed.is_empty() {
                starter_expenses()
            } else {
                committed.clone()
            }
        });
    }

    /// Appends a placeholder row and returns its id.
    pub fn add_item(&mut self) -> SessionResult<ExpenseId> {
        let item = ExpenseItem::placeholder();
        let id = item.id.clone();
        self.working_or_err()?.push(item);
        Ok(id)
    }

    pub fn remove_item(&mut self, id: &str) -> SessionResult<ExpenseItem> {
        let items = self.working_or_err()?;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;
        Ok(items.remove(index))
    }

    pub fn rename_item(&mut self, id: &str, name: impl Into<String>) -> SessionResult<()> {
        self.item_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_item_amount(&mut self, id: &str, amount: f64) -> SessionResult<()> {
        let item = self.item_mut(id)?;
        check_amount(amount)?;
        item.amount = amount;
        Ok(())
    }

    fn item_mut(&mut self, id: &str) -> SessionResult<&mut ExpenseItem> {
        self.working_or_err()?
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))
    }
}

fn check_amount(amount: f64) -> SessionResult<()> {
    if is_storable_amount(amount) {
        Ok(())
    } else {
        Err(SessionError::NonFiniteAmount)
    }
}
