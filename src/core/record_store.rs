use std::cmp::Reverse;

use uuid::Uuid;

use crate::core::time::Clock;
use crate::domain::{
    Expense, ExpenseDraft, HistoryEntry, Identifiable, Sale, SaleDraft, Timestamped,
};
use crate::errors::{LedgerError, Result};
use crate::storage::{load_records, save_records, Slot, SlotStorage};

/// Facade that owns the sales and expenses lists and keeps them in sync with storage.
///
/// Both lists are kept newest first. Every mutation persists the affected slot before
/// returning; a failed write leaves the in-memory list as it was before the call.
pub struct RecordStore {
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    storage: Box<dyn SlotStorage>,
    clock: Box<dyn Clock>,
}

impl RecordStore {
    pub fn open(storage: Box<dyn SlotStorage>, clock: Box<dyn Clock>) -> Self {
        let sales: Vec<Sale> = load_records(storage.as_ref(), Slot::Sales);
        let expenses: Vec<Expense> = load_records(storage.as_ref(), Slot::Expenses);
        tracing::info!(
            sales = sales.len(),
            expenses = expenses.len(),
            "record store opened"
        );
        Self {
            sales,
            expenses,
            storage,
            clock,
        }
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Current instant in milliseconds according to the store's clock.
    pub fn now(&self) -> i64 {
        self.clock.now_millis()
    }

    pub fn add_sale(&mut self, draft: SaleDraft) -> Result<&Sale> {
        draft.validate()?;
        if let Some(id) = draft.id {
            if self.sales.iter().any(|sale| sale.id == id) {
                return Err(LedgerError::Validation(format!("sale {id} already exists")));
            }
        }
        let sale = draft.into_sale(self.clock.now());
        self.sales.insert(0, sale);
        if let Err(err) = save_records(self.storage.as_ref(), Slot::Sales, &self.sales) {
            self.sales.remove(0);
            tracing::error!(error = %err, "failed to persist sale");
            return Err(err);
        }
        let sale = &self.sales[0];
        tracing::info!(id = %sale.id, total = %sale.total, "sale recorded");
        Ok(sale)
    }

    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<&Expense> {
        draft.validate()?;
        if let Some(id) = draft.id {
            if self.expenses.iter().any(|expense| expense.id == id) {
                return Err(LedgerError::Validation(format!(
                    "expense {id} already exists"
                )));
            }
        }
        let expense = draft.into_expense(self.clock.now());
        self.expenses.insert(0, expense);
        if let Err(err) = save_records(self.storage.as_ref(), Slot::Expenses, &self.expenses) {
            self.expenses.remove(0);
            tracing::error!(error = %err, "failed to persist expense");
            return Err(err);
        }
        let expense = &self.expenses[0];
        tracing::info!(id = %expense.id, amount = %expense.amount, "expense recorded");
        Ok(expense)
    }

    /// Removes the sale with `id`. Unknown ids are a no-op returning `None`.
    pub fn delete_sale(&mut self, id: Uuid) -> Result<Option<Sale>> {
        let Some(index) = self.sales.iter().position(|sale| sale.id == id) else {
            return Ok(None);
        };
        let removed = self.sales.remove(index);
        if let Err(err) = save_records(self.storage.as_ref(), Slot::Sales, &self.sales) {
            self.sales.insert(index, removed);
            return Err(err);
        }
        tracing::info!(%id, "sale deleted");
        Ok(Some(removed))
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<Option<Expense>> {
        let Some(index) = self.expenses.iter().position(|expense| expense.id == id) else {
            return Ok(None);
        };
        let removed = self.expenses.remove(index);
        if let Err(err) = save_records(self.storage.as_ref(), Slot::Expenses, &self.expenses) {
            self.expenses.insert(index, removed);
            return Err(err);
        }
        tracing::info!(%id, "expense deleted");
        Ok(Some(removed))
    }

    /// Sales and expenses merged, newest first. Ties keep sales ahead of expenses.
    pub fn history(&self) -> Vec<HistoryEntry<'_>> {
        let mut entries: Vec<HistoryEntry<'_>> = self
            .sales
            .iter()
            .map(HistoryEntry::Sale)
            .chain(self.expenses.iter().map(HistoryEntry::Expense))
            .collect();
        entries.sort_by_key(|entry| Reverse(entry.timestamp()));
        entries
    }

    /// Resolves a record by the leading hex digits of its id; hyphens are ignored.
    pub fn find_entry(&self, prefix: &str) -> Result<HistoryEntry<'_>> {
        let needle = prefix.trim().to_lowercase().replace('-', "");
        if needle.is_empty() {
            return Err(LedgerError::Validation("record id is required".into()));
        }
        let matches: Vec<HistoryEntry<'_>> = self
            .history()
            .into_iter()
            .filter(|entry| entry.id().simple().to_string().starts_with(&needle))
            .collect();
        match matches.as_slice() {
            [entry] => Ok(*entry),
            [] => Err(LedgerError::Validation(format!(
                "no record matches `{prefix}`"
            ))),
            _ => Err(LedgerError::Validation(format!(
                "`{prefix}` matches {} records; use more characters",
                matches.len()
            ))),
        }
    }
}
