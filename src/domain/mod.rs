pub mod common;
pub mod expense;
pub mod history;
pub mod money;
pub mod sale;

pub use common::{Displayable, Identifiable, Timestamped};
pub use expense::{Expense, ExpenseDraft, ExpenseType};
pub use history::HistoryEntry;
pub use money::{Money, ParseMoneyError, MAX_CENTS};
pub use sale::{DrinkKind, Drinks, PaymentMethod, Sale, SaleDraft};
