use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{utc_from_millis, Displayable, Identifiable, Timestamped};
use crate::domain::money::{Money, MAX_CENTS};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Pix,
    #[serde(alias = "Dinheiro")]
    Cash,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Cash => "Cash",
        }
    }
}

/// The closed set of drinks sold at the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkKind {
    Juice,
    CanSoda,
    Soda1L,
    Soda2L,
}

impl DrinkKind {
    pub const ALL: [DrinkKind; 4] = [
        DrinkKind::Juice,
        DrinkKind::CanSoda,
        DrinkKind::Soda1L,
        DrinkKind::Soda2L,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DrinkKind::Juice => "Juice",
            DrinkKind::CanSoda => "Can soda",
            DrinkKind::Soda1L => "Soda 1L",
            DrinkKind::Soda2L => "Soda 2L",
        }
    }
}

/// Drink quantities attached to a sale. Keys written by the legacy app are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drinks {
    #[serde(default, alias = "suco")]
    pub juice: u32,
    #[serde(default, rename = "canSoda", alias = "latinha")]
    pub can_soda: u32,
    #[serde(default, rename = "soda1L", alias = "refri1l")]
    pub soda_1l: u32,
    #[serde(default, rename = "soda2L", alias = "refri2l")]
    pub soda_2l: u32,
}

impl Drinks {
    pub fn get(&self, kind: DrinkKind) -> u32 {
        match kind {
            DrinkKind::Juice => self.juice,
            DrinkKind::CanSoda => self.can_soda,
            DrinkKind::Soda1L => self.soda_1l,
            DrinkKind::Soda2L => self.soda_2l,
        }
    }

    fn slot_mut(&mut self, kind: DrinkKind) -> &mut u32 {
        match kind {
            DrinkKind::Juice => &mut self.juice,
            DrinkKind::CanSoda => &mut self.can_soda,
            DrinkKind::Soda1L => &mut self.soda_1l,
            DrinkKind::Soda2L => &mut self.soda_2l,
        }
    }

    pub fn set(&mut self, kind: DrinkKind, quantity: u32) {
        *self.slot_mut(kind) = quantity;
    }

    /// Applies a signed change; quantities never drop below zero.
    pub fn adjust(&mut self, kind: DrinkKind, delta: i64) {
        let slot = self.slot_mut(kind);
        let next = (i64::from(*slot) + delta).clamp(0, i64::from(u32::MAX));
        *slot = next as u32;
    }

    pub fn total_items(&self) -> u32 {
        DrinkKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_items() == 0
    }

    /// Drinks with a positive quantity, in menu order.
    pub fn ordered(&self) -> impl Iterator<Item = (DrinkKind, u32)> + '_ {
        DrinkKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
            .filter(|(_, quantity)| *quantity > 0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub timestamp: i64,
    pub date: DateTime<Utc>,
    pub skewers: u32,
    pub is_complete: bool,
    #[serde(default)]
    pub drinks: Drinks,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl Sale {
    pub fn plate_label(&self) -> &'static str {
        if self.is_complete {
            "full plate"
        } else {
            "meat only"
        }
    }
}

impl Identifiable for Sale {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Sale {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Displayable for Sale {
    fn display_label(&self) -> String {
        let noun = if self.skewers == 1 { "skewer" } else { "skewers" };
        if self.is_complete {
            format!("{} {noun} (full plate)", self.skewers)
        } else {
            format!("{} {noun}", self.skewers)
        }
    }
}

/// Sale entry as captured by the sales form, before it becomes a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleDraft {
    pub id: Option<Uuid>,
    pub timestamp: Option<i64>,
    pub skewers: u32,
    pub is_complete: bool,
    pub drinks: Drinks,
    pub total: Money,
    pub payment_method: PaymentMethod,
}

impl SaleDraft {
    pub fn new(total: Money, payment_method: PaymentMethod) -> Self {
        Self {
            total,
            payment_method,
            ..Self::default()
        }
    }

    pub fn with_skewers(mut self, skewers: u32, is_complete: bool) -> Self {
        self.skewers = skewers;
        self.is_complete = is_complete;
        self
    }

    pub fn with_drinks(mut self, drinks: Drinks) -> Self {
        self.drinks = drinks;
        self
    }

    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn add_skewer(&mut self) {
        self.skewers = self.skewers.saturating_add(1);
    }

    pub fn remove_skewer(&mut self) {
        self.skewers = self.skewers.saturating_sub(1);
    }

    pub fn validate(&self) -> Result<()> {
        if !self.total.is_positive() {
            return Err(LedgerError::Validation(
                "sale total must be greater than zero".into(),
            ));
        }
        if !self.total.is_within_limit() {
            return Err(LedgerError::Validation(format!(
                "sale total exceeds the limit of {}",
                Money::from_cents(MAX_CENTS)
            )));
        }
        Ok(())
    }

    /// Builds the record, stamping id and creation time when the draft lacks them.
    pub fn into_sale(self, now: DateTime<Utc>) -> Sale {
        let timestamp = self.timestamp.unwrap_or_else(|| now.timestamp_millis());
        Sale {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            timestamp,
            date: utc_from_millis(timestamp, now),
            skewers: self.skewers,
            is_complete: self.is_complete,
            drinks: self.drinks,
            total: self.total,
            payment_method: self.payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn drink_adjustments_clamp_at_zero() {
        let mut drinks = Drinks::default();
        drinks.adjust(DrinkKind::CanSoda, 2);
        drinks.adjust(DrinkKind::CanSoda, -5);
        drinks.adjust(DrinkKind::Juice, -1);
        assert_eq!(drinks.can_soda, 0);
        assert_eq!(drinks.juice, 0);

        drinks.adjust(DrinkKind::Soda2L, 3);
        assert_eq!(drinks.total_items(), 3);
        assert_eq!(
            drinks.ordered().collect::<Vec<_>>(),
            vec![(DrinkKind::Soda2L, 3)]
        );
    }

    #[test]
    fn skewer_count_never_goes_negative() {
        let mut draft = SaleDraft::new(Money::from_cents(500), PaymentMethod::Cash);
        draft.remove_skewer();
        assert_eq!(draft.skewers, 0);
        draft.add_skewer();
        draft.add_skewer();
        draft.remove_skewer();
        assert_eq!(draft.skewers, 1);
    }

    #[test]
    fn validate_rejects_non_positive_totals() {
        assert!(SaleDraft::new(Money::ZERO, PaymentMethod::Pix)
            .validate()
            .is_err());
        assert!(SaleDraft::new(Money::from_cents(-100), PaymentMethod::Pix)
            .validate()
            .is_err());
        assert!(SaleDraft::new(Money::from_cents(1), PaymentMethod::Pix)
            .validate()
            .is_ok());
        assert!(SaleDraft::new(Money::from_cents(MAX_CENTS), PaymentMethod::Pix)
            .validate()
            .is_ok());
        assert!(SaleDraft::new(Money::from_cents(MAX_CENTS + 1), PaymentMethod::Pix)
            .validate()
            .is_err());
    }

    #[test]
    fn into_sale_keeps_preassigned_identity() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let id = Uuid::new_v4();
        let draft = SaleDraft {
            id: Some(id),
            ..SaleDraft::new(Money::from_cents(900), PaymentMethod::Pix).with_timestamp(42)
        };
        let sale = draft.into_sale(now);
        assert_eq!(sale.id, id);
        assert_eq!(sale.timestamp, 42);
        assert_eq!(sale.date.timestamp_millis(), 42);

        let fresh = SaleDraft::new(Money::from_cents(900), PaymentMethod::Pix).into_sale(now);
        assert_eq!(fresh.timestamp, now.timestamp_millis());
        assert_eq!(fresh.date, now);
    }

    #[test]
    fn reads_legacy_browser_records() {
        let json = r#"{
            "id": "0b7f0a64-5a1e-4c36-9d3e-4b8f3f4f2a11",
            "timestamp": 1704875400000,
            "date": "2024-01-10T08:30:00.000Z",
            "skewers": 3,
            "isComplete": true,
            "drinks": { "suco": 1, "latinha": 2, "refri1l": 0, "refri2l": 1 },
            "total": 35.5,
            "paymentMethod": "Dinheiro"
        }"#;
        let sale: Sale = serde_json::from_str(json).expect("legacy sale");
        assert_eq!(sale.payment_method, PaymentMethod::Cash);
        assert_eq!(sale.total, Money::from_cents(3550));
        assert_eq!(sale.drinks.can_soda, 2);
        assert_eq!(sale.drinks.soda_2l, 1);
        assert_eq!(sale.display_label(), "3 skewers (full plate)");
    }
}
