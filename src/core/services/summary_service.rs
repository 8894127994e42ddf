use std::collections::BTreeMap;

use chrono::{Datelike, TimeZone};

use crate::core::time::{
    business_date, business_day_start, trailing_business_days, weekly_range, TimeRange, DAY_MS,
};
use crate::domain::{Expense, Money, PaymentMethod, Sale};

/// Number of business days shown on the dashboard chart.
pub const CHART_DAYS: usize = 7;

/// Totals for one business day bucket, keyed by its 06:00 opening instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTotals {
    pub day_start: i64,
    pub sales: Money,
    pub pix: Money,
    pub cash: Money,
    pub expenses: Money,
}

impl DayTotals {
    pub fn new(day_start: i64) -> Self {
        Self {
            day_start,
            ..Self::default()
        }
    }

    pub fn profit(&self) -> Money {
        self.sales - self.expenses
    }

    fn record_sale(&mut self, sale: &Sale) {
        self.sales += sale.total;
        match sale.payment_method {
            PaymentMethod::Pix => self.pix += sale.total,
            PaymentMethod::Cash => self.cash += sale.total,
        }
    }

    fn record_expense(&mut self, expense: &Expense) {
        self.expenses += expense.amount;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub day_start: i64,
    /// Weekday abbreviation of the business day (`Mon`, `Tue`, ...).
    pub label: String,
    pub total: Money,
}

/// Totals over an inclusive time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTotals {
    pub range: TimeRange,
    pub sales: Money,
    pub pix: Money,
    pub cash: Money,
    pub expenses: Money,
    pub sale_count: usize,
    pub expense_count: usize,
}

impl PeriodTotals {
    pub fn profit(&self) -> Money {
        self.sales - self.expenses
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_sales: Money,
    pub total_expenses: Money,
    pub today_sales: Money,
    pub pix: Money,
    pub cash: Money,
    pub chart: Vec<ChartPoint>,
}

impl DashboardSummary {
    /// All-time sales minus all-time expenses.
    pub fn balance(&self) -> Money {
        self.total_sales - self.total_expenses
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Groups every record into its business day; newest day first.
    pub fn daily_breakdown<Tz: TimeZone>(
        sales: &[Sale],
        expenses: &[Expense],
        tz: &Tz,
    ) -> Vec<DayTotals> {
        let mut days: BTreeMap<i64, DayTotals> = BTreeMap::new();
        for sale in sales {
            let key = business_day_start(tz, sale.timestamp);
            days.entry(key)
                .or_insert_with(|| DayTotals::new(key))
                .record_sale(sale);
        }
        for expense in expenses {
            let key = business_day_start(tz, expense.timestamp);
            days.entry(key)
                .or_insert_with(|| DayTotals::new(key))
                .record_expense(expense);
        }
        days.into_values().rev().collect()
    }

    /// Totals of the bucket `[day_start, day_start + 24h)`.
    pub fn day_totals(sales: &[Sale], expenses: &[Expense], day_start: i64) -> DayTotals {
        let in_bucket = |timestamp: i64| timestamp >= day_start && timestamp < day_start + DAY_MS;
        let mut totals = DayTotals::new(day_start);
        sales
            .iter()
            .filter(|sale| in_bucket(sale.timestamp))
            .for_each(|sale| totals.record_sale(sale));
        expenses
            .iter()
            .filter(|expense| in_bucket(expense.timestamp))
            .for_each(|expense| totals.record_expense(expense));
        totals
    }

    /// Sale totals for today's business day and the six before it, oldest first.
    pub fn trailing_week<Tz: TimeZone>(sales: &[Sale], tz: &Tz, now: i64) -> Vec<ChartPoint> {
        trailing_business_days(tz, now, CHART_DAYS)
            .into_iter()
            .map(|day_start| ChartPoint {
                day_start,
                label: business_date(tz, day_start).weekday().to_string(),
                total: Self::day_totals(sales, &[], day_start).sales,
            })
            .collect()
    }

    pub fn range_totals(sales: &[Sale], expenses: &[Expense], range: TimeRange) -> PeriodTotals {
        let mut totals = PeriodTotals {
            range,
            sales: Money::ZERO,
            pix: Money::ZERO,
            cash: Money::ZERO,
            expenses: Money::ZERO,
            sale_count: 0,
            expense_count: 0,
        };
        for sale in sales.iter().filter(|sale| range.contains(sale.timestamp)) {
            totals.sales += sale.total;
            match sale.payment_method {
                PaymentMethod::Pix => totals.pix += sale.total,
                PaymentMethod::Cash => totals.cash += sale.total,
            }
            totals.sale_count += 1;
        }
        for expense in expenses
            .iter()
            .filter(|expense| range.contains(expense.timestamp))
        {
            totals.expenses += expense.amount;
            totals.expense_count += 1;
        }
        totals
    }

    /// Totals for the current Friday-to-Monday business week.
    pub fn weekly_report<Tz: TimeZone>(
        sales: &[Sale],
        expenses: &[Expense],
        tz: &Tz,
        now: i64,
    ) -> PeriodTotals {
        Self::range_totals(sales, expenses, weekly_range(tz, now))
    }

    pub fn dashboard<Tz: TimeZone>(
        sales: &[Sale],
        expenses: &[Expense],
        tz: &Tz,
        now: i64,
    ) -> DashboardSummary {
        let total_by = |method: PaymentMethod| -> Money {
            sales
                .iter()
                .filter(|sale| sale.payment_method == method)
                .map(|sale| sale.total)
                .sum()
        };
        DashboardSummary {
            total_sales: sales.iter().map(|sale| sale.total).sum(),
            total_expenses: expenses.iter().map(|expense| expense.amount).sum(),
            today_sales: Self::day_totals(sales, &[], business_day_start(tz, now)).sales,
            pix: total_by(PaymentMethod::Pix),
            cash: total_by(PaymentMethod::Cash),
            chart: Self::trailing_week(sales, tz, now),
        }
    }
}
