//! Date parsing and formatting helpers
//!
//! The backend exchanges timestamps as formatted strings rather than epoch
//! numbers, always in UTC. The settings screens use a second, US-style
//! format. All helpers here are pure functions over `DateTime<Utc>`.

use chrono::{DateTime, Days, Months, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// Wire format for timestamps in server requests and responses.
pub const SERVER_DATE_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Display format for the settings screens, with time of day.
pub const SETTINGS_DATE_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Display format for the settings screens, date only.
pub const SETTINGS_DAY_FORMAT: &str = "%m/%d/%Y";

/// Format a timestamp in the server wire format (`dd.MM.yyyy HH:mm:ss`, UTC).
pub fn to_server_string(t: DateTime<Utc>) -> String {
    t.format(SERVER_DATE_FORMAT).to_string()
}

/// Parse a timestamp from the server wire format.
///
/// Returns `None` when the string does not match [`SERVER_DATE_FORMAT`].
/// The value is interpreted as UTC.
pub fn from_server_string(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, SERVER_DATE_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Format a timestamp for the settings screens (`MM/dd/yyyy`, UTC),
/// optionally with the time of day.
pub fn to_settings_string(t: DateTime<Utc>, include_time: bool) -> String {
    let format = if include_time {
        SETTINGS_DATE_FORMAT
    } else {
        SETTINGS_DAY_FORMAT
    };
    t.format(format).to_string()
}

/// Signed calendar offset for [`shift_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateShift {
    pub days: i32,
    pub months: i32,
    pub years: i32,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Apply a signed calendar-aware offset to a UTC timestamp.
///
/// Year and month components are applied first (calendar arithmetic, so
/// month-end days clamp), then days, then the time-of-day components.
/// Returns `None` on overflow.
pub fn shift_date(t: DateTime<Utc>, shift: DateShift) -> Option<DateTime<Utc>> {
    let months = i64::from(shift.years)
        .checked_mul(12)?
        .checked_add(i64::from(shift.months))?;
    let t = if months >= 0 {
        t.checked_add_months(Months::new(u32::try_from(months).ok()?))?
    } else {
        t.checked_sub_months(Months::new(u32::try_from(-months).ok()?))?
    };

    let t = if shift.days >= 0 {
        t.checked_add_days(Days::new(shift.days as u64))?
    } else {
        t.checked_sub_days(Days::new(shift.days.unsigned_abs() as u64))?
    };

    let seconds = shift
        .hours
        .checked_mul(3600)?
        .checked_add(shift.minutes.checked_mul(60)?)?
        .checked_add(shift.seconds)?;
    t.checked_add_signed(TimeDelta::try_seconds(seconds)?)
}

/// Inclusive range check. An absent bound is unconstrained on that side.
pub fn is_date_valid(t: DateTime<Utc>, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    start.map_or(true, |s| t >= s) && end.map_or(true, |e| t <= e)
}

/// [`is_date_valid`] for the current moment.
pub fn is_now_valid(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> bool {
    is_date_valid(Utc::now(), start, end)
}
