pub mod summary_service;

pub use summary_service::{
    ChartPoint, DashboardSummary, DayTotals, PeriodTotals, SummaryService, CHART_DAYS,
};
