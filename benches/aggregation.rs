use cart_ledger::core::services::SummaryService;
use cart_ledger::domain::{
    Expense, ExpenseDraft, ExpenseType, Money, PaymentMethod, Sale, SaleDraft,
};
use cart_ledger::storage::{load_records, save_records, JsonFileStorage, Slot};
use chrono::{FixedOffset, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

const MINUTE_MS: i64 = 60 * 1000;

fn build_sample(count: usize, start: i64) -> (Vec<Sale>, Vec<Expense>) {
    let now = Utc::now();
    let sales = (0..count)
        .map(|idx| {
            let method = if idx % 4 == 0 {
                PaymentMethod::Cash
            } else {
                PaymentMethod::Pix
            };
            SaleDraft::new(Money::from_cents(800 + (idx % 50) as i64 * 10), method)
                .with_skewers((idx % 5) as u32 + 1, idx % 2 == 0)
                .with_timestamp(start + idx as i64 * 7 * MINUTE_MS)
                .into_sale(now)
        })
        .collect();
    let expenses = (0..count / 20)
        .map(|idx| {
            ExpenseDraft::new("Charcoal", Money::from_cents(2500), ExpenseType::ExtraExpense)
                .with_timestamp(start + idx as i64 * 140 * MINUTE_MS)
                .into_expense(now)
        })
        .collect();
    (sales, expenses)
}

fn bench_aggregation(c: &mut Criterion) {
    let tz = FixedOffset::west_opt(3 * 3600).expect("offset");
    let start = tz
        .with_ymd_and_hms(2024, 1, 1, 18, 0, 0)
        .single()
        .expect("start")
        .timestamp_millis();
    let (sales, expenses) = build_sample(black_box(20_000), start);
    let now = sales.last().map(|sale| sale.timestamp).unwrap_or(start);

    c.bench_function("daily_breakdown_20k", |b| {
        b.iter(|| black_box(SummaryService::daily_breakdown(&sales, &expenses, &tz)))
    });

    c.bench_function("dashboard_20k", |b| {
        b.iter(|| black_box(SummaryService::dashboard(&sales, &expenses, &tz, now)))
    });
}

fn bench_slot_io(c: &mut Criterion) {
    let (sales, _) = build_sample(10_000, 0);
    let dir = tempdir().expect("tempdir");
    let storage = JsonFileStorage::new(dir.path()).expect("storage");

    c.bench_function("sales_save_10k", |b| {
        b.iter(|| save_records(&storage, Slot::Sales, &sales).expect("save sales"))
    });

    save_records(&storage, Slot::Sales, &sales).expect("seed");
    c.bench_function("sales_load_10k", |b| {
        b.iter(|| {
            let loaded: Vec<Sale> = load_records(&storage, Slot::Sales);
            black_box(loaded)
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_slot_io);
criterion_main!(benches);
