use chrono::{NaiveDate, NaiveDateTime};

use crate::HolidayRecord;

const MILLIS_IN_DAY: i64 = 86_400_000;

/// Whole days from `now` until `target`, rounded up.
///
/// Any positive remainder counts as a full day, so a target later today is
/// one day away. Targets in the past yield zero or a negative count.
pub fn days_until(target: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let millis = target.signed_duration_since(now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_IN_DAY)
}

/// Anything that names a single calendar day.
pub trait CalendarDate {
    fn calendar_date(&self) -> NaiveDate;
}

impl CalendarDate for NaiveDate {
    #[inline]
    fn calendar_date(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDate for NaiveDateTime {
    #[inline]
    fn calendar_date(&self) -> NaiveDate {
        self.date()
    }
}

impl CalendarDate for chrono::DateTime<chrono::Utc> {
    #[inline]
    fn calendar_date(&self) -> NaiveDate {
        self.date_naive()
    }
}

impl CalendarDate for chrono::DateTime<chrono::Local> {
    #[inline]
    fn calendar_date(&self) -> NaiveDate {
        self.naive_local().date()
    }
}

impl CalendarDate for std::time::SystemTime {
    fn calendar_date(&self) -> NaiveDate {
        chrono::DateTime::<chrono::Utc>::from(*self).date_naive()
    }
}

#[cfg(feature = "time")]
impl CalendarDate for time::Date {
    fn calendar_date(&self) -> NaiveDate {
        let (year, ordinal) = self.to_ordinal_date();
        // Every time::Date is inside chrono's supported range.
        NaiveDate::from_yo_opt(year, ordinal as u32).unwrap_or(NaiveDate::MIN)
    }
}

pub trait DateExt: CalendarDate {
    /// The holiday falling on this date, if any.
    fn holiday_in<'a>(&self, holidays: &'a [HolidayRecord]) -> Option<&'a HolidayRecord> {
        let date = self.calendar_date();
        holidays.iter().find(|it| it.date == date)
    }

    fn is_holiday_in(&self, holidays: &[HolidayRecord]) -> bool {
        self.holiday_in(holidays).is_some()
    }
}

impl<T: CalendarDate + ?Sized> DateExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn rounds_partial_days_up() {
        let now = at("2025-03-10T08:00:00");
        assert_eq!(days_until(at("2025-03-12T00:00:00"), now), 2);
        assert_eq!(days_until(at("2025-03-10T20:00:00"), now), 1);
        assert_eq!(days_until(at("2025-03-11T08:00:00"), now), 1);
        assert_eq!(days_until(at("2025-03-11T08:00:01"), now), 2);
    }

    #[test]
    fn past_and_present() {
        let now = at("2025-03-10T08:00:00");
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(at("2025-03-10T00:00:00"), now), 0);
        assert_eq!(days_until(at("2025-03-09T00:00:00"), now), -1);
    }

    #[test]
    fn finds_holiday_for_various_date_types() {
        let holidays = vec![HolidayRecord::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "New Year's Day",
        )];

        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(date.is_holiday_in(&holidays));
        assert!(at("2025-01-01T23:59:59").is_holiday_in(&holidays));
        assert!(!date.succ_opt().unwrap().is_holiday_in(&holidays));

        let utc = date.and_hms_opt(12, 0, 0).unwrap().and_utc();
        assert_eq!(
            utc.holiday_in(&holidays).map(|it| it.local_name.as_str()),
            Some("New Year's Day")
        );
        assert!(std::time::SystemTime::from(utc).is_holiday_in(&holidays));
    }

    #[cfg(feature = "time")]
    #[test]
    fn converts_time_dates() {
        let date = time::Date::from_calendar_date(2025, time::Month::March, 12).unwrap();
        assert_eq!(
            date.calendar_date(),
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
        );
    }
}
