use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, Timestamped};
use crate::domain::expense::Expense;
use crate::domain::money::Money;
use crate::domain::sale::Sale;

/// One row of the unified history: a borrowed sale or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEntry<'a> {
    Sale(&'a Sale),
    Expense(&'a Expense),
}

impl HistoryEntry<'_> {
    pub fn is_sale(&self) -> bool {
        matches!(self, HistoryEntry::Sale(_))
    }

    /// Sales count positive, expenses negative.
    pub fn signed_amount(&self) -> Money {
        match self {
            HistoryEntry::Sale(sale) => sale.total,
            HistoryEntry::Expense(expense) => -expense.amount,
        }
    }
}

impl Identifiable for HistoryEntry<'_> {
    fn id(&self) -> Uuid {
        match self {
            HistoryEntry::Sale(sale) => sale.id,
            HistoryEntry::Expense(expense) => expense.id,
        }
    }
}

impl Timestamped for HistoryEntry<'_> {
    fn timestamp(&self) -> i64 {
        match self {
            HistoryEntry::Sale(sale) => sale.timestamp,
            HistoryEntry::Expense(expense) => expense.timestamp,
        }
    }
}

impl Displayable for HistoryEntry<'_> {
    fn display_label(&self) -> String {
        match self {
            HistoryEntry::Sale(sale) => sale.display_label(),
            HistoryEntry::Expense(expense) => expense.display_label(),
        }
    }
}
