//! Business-day time bucketing.
//!
//! The cart works into the early morning, so a business day runs from 06:00 local time
//! to 05:59:59.999 the next morning. All functions take the time zone and the reference
//! instant explicitly and operate on millisecond timestamps.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Timelike, Utc, Weekday,
};

/// Local hour at which a business day opens.
pub const BUSINESS_DAY_START_HOUR: u32 = 6;

/// Length of a day bucket in milliseconds.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

const WEEK_ANCHOR: Weekday = Weekday::Fri;
const WEEK_SPAN_DAYS: i64 = 3;
const GAP_PROBE_MINUTES: i64 = 15;
const GAP_PROBE_LIMIT: usize = 4 * 24;

/// Clock abstracts access to the current timestamp so services remain deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Inclusive millisecond range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn contains(&self, instant: i64) -> bool {
        instant >= self.start && instant <= self.end
    }
}

fn local_datetime<Tz: TimeZone>(tz: &Tz, instant: i64) -> DateTime<Tz> {
    tz.timestamp_millis_opt(instant)
        .single()
        .unwrap_or_else(|| tz.from_utc_datetime(&NaiveDateTime::default()))
}

fn opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(BUSINESS_DAY_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Resolves a local wall-clock time to an instant. Ambiguous times take the earlier
/// instant; times inside a DST gap move forward to the first valid local time.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> i64 {
    let mut probe = naive;
    for _ in 0..GAP_PROBE_LIMIT {
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt.timestamp_millis(),
            LocalResult::Ambiguous(earliest, _) => return earliest.timestamp_millis(),
            LocalResult::None => probe += Duration::minutes(GAP_PROBE_MINUTES),
        }
    }
    naive.and_utc().timestamp_millis()
}

/// Calendar date of the business day that owns `instant`.
pub fn business_date<Tz: TimeZone>(tz: &Tz, instant: i64) -> NaiveDate {
    let local = local_datetime(tz, instant);
    let date = local.date_naive();
    if local.hour() < BUSINESS_DAY_START_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Instant at which the business day on `date` opens.
pub fn business_day_opening<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    resolve_local(tz, date.and_time(opening_time()))
}

/// Start boundary (06:00 local) of the business day containing `instant`.
pub fn business_day_start<Tz: TimeZone>(tz: &Tz, instant: i64) -> i64 {
    business_day_opening(tz, business_date(tz, instant))
}

/// `dd/mm/yyyy` of the owning business day. For display only.
pub fn format_business_date<Tz: TimeZone>(tz: &Tz, instant: i64) -> String {
    business_date(tz, instant).format("%d/%m/%Y").to_string()
}

/// Local wall-clock `HH:MM` of `instant`.
pub fn format_time<Tz: TimeZone>(tz: &Tz, instant: i64) -> String
where
    Tz::Offset: std::fmt::Display,
{
    local_datetime(tz, instant).format("%H:%M").to_string()
}

/// The current business week: Friday 06:00 through Monday 05:59:59.999.
pub fn weekly_range<Tz: TimeZone>(tz: &Tz, now: i64) -> TimeRange {
    let today = business_date(tz, now);
    let since_anchor = (today.weekday().num_days_from_monday() + 7
        - WEEK_ANCHOR.num_days_from_monday())
        % 7;
    let friday = today - Duration::days(i64::from(since_anchor));
    let start = business_day_opening(tz, friday);
    TimeRange {
        start,
        end: start + WEEK_SPAN_DAYS * DAY_MS - 1,
    }
}

/// Opening instants of the last `count` business days, oldest first, ending with the
/// business day that contains `now`.
pub fn trailing_business_days<Tz: TimeZone>(tz: &Tz, now: i64, count: usize) -> Vec<i64> {
    let today = business_date(tz, now);
    (0..count as i64)
        .rev()
        .map(|back| business_day_opening(tz, today - Duration::days(back)))
        .collect()
}
