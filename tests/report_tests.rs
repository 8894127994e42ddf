mod common;

use cart_ledger::{
    core::{
        services::SummaryService,
        time::{business_day_start, weekly_range, DAY_MS},
        RecordStore,
    },
    domain::{ExpenseDraft, ExpenseType, Money, PaymentMethod, SaleDraft},
    storage::MemoryStorage,
};
use cart_ledger::core::time::FixedClock;
use common::{local, millis, tz};

fn store_at(y: i32, m: u32, d: u32, h: u32) -> RecordStore {
    RecordStore::open(
        Box::new(MemoryStorage::new()),
        Box::new(FixedClock(local(y, m, d, h, 0))),
    )
}

fn sell(store: &mut RecordStore, cents: i64, method: PaymentMethod, at: i64) {
    store
        .add_sale(SaleDraft::new(Money::from_cents(cents), method).with_timestamp(at))
        .unwrap();
}

fn spend(store: &mut RecordStore, cents: i64, kind: ExpenseType, at: i64) {
    store
        .add_expense(
            ExpenseDraft::new("Supplies", Money::from_cents(cents), kind).with_timestamp(at),
        )
        .unwrap();
}

#[test]
fn late_night_sales_count_for_the_evening_they_started() {
    let mut store = store_at(2024, 1, 11, 12);
    sell(&mut store, 1000, PaymentMethod::Pix, millis(2024, 1, 10, 19, 0));
    sell(&mut store, 2000, PaymentMethod::Cash, millis(2024, 1, 11, 2, 30));
    sell(&mut store, 500, PaymentMethod::Pix, millis(2024, 1, 11, 6, 0));
    spend(&mut store, 800, ExpenseType::ExtraExpense, millis(2024, 1, 10, 8, 0));

    let days = SummaryService::daily_breakdown(store.sales(), store.expenses(), &tz());
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].day_start, millis(2024, 1, 11, 6, 0));
    assert_eq!(days[0].sales, Money::from_cents(500));
    assert_eq!(days[1].day_start, millis(2024, 1, 10, 6, 0));
    assert_eq!(days[1].sales, Money::from_cents(3000));
    assert_eq!(days[1].cash, Money::from_cents(2000));
    assert_eq!(days[1].profit(), Money::from_cents(2200));
}

#[test]
fn weekend_report_covers_friday_through_sunday_night() {
    // Saturday afternoon.
    let mut store = store_at(2024, 1, 13, 15);
    let range = weekly_range(&tz(), store.now());
    assert_eq!(range.start, millis(2024, 1, 12, 6, 0));
    assert_eq!(range.end, millis(2024, 1, 15, 6, 0) - 1);

    sell(&mut store, 3000, PaymentMethod::Pix, millis(2024, 1, 12, 18, 0));
    sell(&mut store, 4000, PaymentMethod::Cash, millis(2024, 1, 15, 5, 59));
    sell(&mut store, 9900, PaymentMethod::Cash, millis(2024, 1, 15, 6, 0));
    sell(&mut store, 9900, PaymentMethod::Pix, millis(2024, 1, 12, 5, 0));
    spend(&mut store, 50_000, ExpenseType::InitialCapital, millis(2024, 1, 12, 9, 0));

    let week = SummaryService::weekly_report(store.sales(), store.expenses(), &tz(), store.now());
    assert_eq!(week.sales, Money::from_cents(7000));
    assert_eq!(week.sale_count, 2);
    assert_eq!(week.expenses, Money::from_cents(50_000));
    assert_eq!(week.profit(), Money::from_cents(-43_000));
}

#[test]
fn dashboard_chart_matches_daily_breakdown() {
    let mut store = store_at(2024, 1, 14, 23);
    for day in 5..=14u32 {
        sell(&mut store, i64::from(day) * 100, PaymentMethod::Pix, millis(2024, 1, day, 21, 0));
        sell(&mut store, 250, PaymentMethod::Cash, millis(2024, 1, day, 3, 0));
    }

    let summary = SummaryService::dashboard(store.sales(), store.expenses(), &tz(), store.now());
    let days = SummaryService::daily_breakdown(store.sales(), store.expenses(), &tz());

    assert_eq!(summary.chart.len(), 7);
    assert_eq!(
        summary.chart.last().unwrap().day_start,
        business_day_start(&tz(), store.now())
    );
    for point in &summary.chart {
        let day = days
            .iter()
            .find(|day| day.day_start == point.day_start)
            .expect("charted day has records");
        assert_eq!(day.sales, point.total);
    }
    assert!(summary
        .chart
        .windows(2)
        .all(|pair| pair[1].day_start - pair[0].day_start == DAY_MS));
    assert_eq!(summary.today_sales, Money::from_cents(1400));
    assert_eq!(summary.pix + summary.cash, summary.total_sales);
}
