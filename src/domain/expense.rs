use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{utc_from_millis, Displayable, Identifiable, Timestamped};
use crate::domain::money::{Money, MAX_CENTS};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    /// Money put into the business to start operating.
    #[serde(alias = "Capital Inicial")]
    InitialCapital,
    #[default]
    #[serde(alias = "Gasto Extra")]
    ExtraExpense,
}

impl ExpenseType {
    pub fn label(self) -> &'static str {
        match self {
            ExpenseType::InitialCapital => "Initial capital",
            ExpenseType::ExtraExpense => "Extra expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub timestamp: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Expense {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        self.description.clone()
    }
}

/// Expense entry as captured by the expenses form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub id: Option<Uuid>,
    pub timestamp: Option<i64>,
    pub description: String,
    pub amount: Money,
    pub kind: ExpenseType,
}

impl ExpenseDraft {
    pub fn new(description: impl Into<String>, amount: Money, kind: ExpenseType) -> Self {
        Self {
            description: description.into(),
            amount,
            kind,
            ..Self::default()
        }
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(LedgerError::Validation(
                "expense amount must be greater than zero".into(),
            ));
        }
        if !self.amount.is_within_limit() {
            return Err(LedgerError::Validation(format!(
                "expense amount exceeds the limit of {}",
                Money::from_cents(MAX_CENTS)
            )));
        }
        if self.description.trim().is_empty() {
            return Err(LedgerError::Validation(
                "expense description is required".into(),
            ));
        }
        Ok(())
    }

    pub fn into_expense(self, now: DateTime<Utc>) -> Expense {
        let timestamp = self.timestamp.unwrap_or_else(|| now.timestamp_millis());
        Expense {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            timestamp,
            date: utc_from_millis(timestamp, now),
            description: self.description,
            amount: self.amount,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_requires_amount_and_description() {
        let blank = ExpenseDraft::new("   ", Money::from_cents(800), ExpenseType::ExtraExpense);
        assert!(matches!(blank.validate(), Err(LedgerError::Validation(_))));

        let free = ExpenseDraft::new("Charcoal", Money::ZERO, ExpenseType::ExtraExpense);
        assert!(matches!(free.validate(), Err(LedgerError::Validation(_))));

        let ok = ExpenseDraft::new("Charcoal", Money::from_cents(800), ExpenseType::ExtraExpense);
        assert!(ok.validate().is_ok());

        let huge = ExpenseDraft::new(
            "Truck",
            Money::from_cents(MAX_CENTS + 1),
            ExpenseType::InitialCapital,
        );
        assert!(matches!(huge.validate(), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn type_field_uses_wire_name_and_accepts_legacy_values() {
        let json = r#"{
            "id": "5d1c2a4e-97a3-4f0e-8a0c-0e6d1f7f9b22",
            "timestamp": 1704875400000,
            "date": "2024-01-10T08:30:00.000Z",
            "description": "Gelo",
            "amount": 8,
            "type": "Capital Inicial"
        }"#;
        let expense: Expense = serde_json::from_str(json).expect("legacy expense");
        assert_eq!(expense.kind, ExpenseType::InitialCapital);
        assert_eq!(expense.amount, Money::from_cents(800));

        let written = serde_json::to_value(&expense).unwrap();
        assert_eq!(written["type"], "InitialCapital");
    }
}
