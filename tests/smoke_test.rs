mod common;

use cart_ledger::{
    core::services::SummaryService,
    domain::{Money, PaymentMethod, SaleDraft},
    init,
};
use common::{local, open_store, temp_base, tz};

#[test]
fn ledger_smoke() {
    init();

    let base = temp_base();
    let mut store = open_store(&base, local(2024, 1, 10, 20, 0));
    store
        .add_sale(
            SaleDraft::new(Money::from_cents(1000), PaymentMethod::Pix).with_skewers(2, false),
        )
        .unwrap();

    let summary = SummaryService::dashboard(store.sales(), store.expenses(), &tz(), store.now());
    assert_eq!(summary.balance(), Money::from_cents(1000));
    assert_eq!(summary.today_sales, Money::from_cents(1000));
}
