use std::fmt;

use chrono::{Datelike, Month, NaiveDateTime};
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::pipeline::HolidayPipeline;
use crate::provider::HolidayProvider;
use crate::query::{self, MonthFilter};
use crate::HolidayRecord;

/// Proof of a country selection, used to accept or drop a late delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Ticket {
    generation: u64,
}

/// Selection state of the holiday panel.
///
/// Selecting a country clears the list and resets the month filter. Lists
/// delivered for an older selection are discarded, so a slow response for
/// a country the user already switched away from never shows up.
#[derive(Debug, Clone)]
pub struct HolidayChecker {
    country: String,
    month: MonthFilter,
    holidays: Vec<HolidayRecord>,
    generation: u64,
}

impl HolidayChecker {
    pub fn new(country: impl Into<String>) -> Self {
        HolidayChecker {
            country: country.into(),
            month: MonthFilter::All,
            holidays: Vec::new(),
            generation: 0,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn month(&self) -> MonthFilter {
        self.month
    }

    pub fn holidays(&self) -> &[HolidayRecord] {
        &self.holidays
    }

    pub fn select_country(&mut self, country: impl Into<String>) -> Ticket {
        self.country = country.into();
        self.month = MonthFilter::All;
        self.holidays.clear();
        self.generation += 1;
        Ticket {
            generation: self.generation,
        }
    }

    /// Install `holidays` if `ticket` is from the latest selection.
    pub fn deliver(&mut self, ticket: Ticket, holidays: Vec<HolidayRecord>) -> bool {
        if ticket.generation != self.generation {
            warn!(
                country = %self.country,
                stale = ticket.generation,
                current = self.generation,
                "dropping holidays for a superseded selection"
            );
            return false;
        }
        debug!(country = %self.country, n = holidays.len(), "holidays delivered");
        self.holidays = holidays;
        true
    }

    /// Select `country` and load its holidays through `pipeline`.
    pub fn load<P, S>(
        &mut self,
        pipeline: &mut HolidayPipeline<P, S>,
        country: impl Into<String>,
    ) where
        P: HolidayProvider,
        S: CacheStore,
    {
        let ticket = self.select_country(country);
        let holidays = pipeline.get_holidays(&self.country);
        self.deliver(ticket, holidays);
    }

    pub fn set_month(&mut self, month: MonthFilter) {
        self.month = month;
    }

    pub fn filtered(&self) -> query::Iter<'_> {
        query::filter_by_month(&self.holidays, self.month)
    }

    /// Everything the panel shows at `now`.
    pub fn panel(&self, now: NaiveDateTime) -> Panel {
        Panel {
            country: self.country.clone(),
            now,
            today: query::today_holiday(&self.holidays, now).map(str::to_string),
            next: query::next_holiday(&self.holidays, now)
                .map(|it| (it.holiday.clone(), it.days_until)),
            month: self.month,
            listing: self.filtered().cloned().collect(),
        }
    }
}

/// Render-ready snapshot of the holiday panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub country: String,
    pub now: NaiveDateTime,
    pub today: Option<String>,
    pub next: Option<(HolidayRecord, i64)>,
    pub month: MonthFilter,
    pub listing: Vec<HolidayRecord>,
}

impl Panel {
    /// The status lines: clock, today's holiday and countdown.
    pub fn write_status(&self, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(f, "{}", self.now.format("%Y-%m-%d %H:%M:%S"))?;
        match &self.today {
            Some(name) => writeln!(f, "Today's Holiday: {name}")?,
            None => writeln!(f, "No Holiday Today!")?,
        }
        match &self.next {
            Some((holiday, days)) => writeln!(
                f,
                "Next Holiday in {days} {}: {} ({})",
                if *days == 1 { "day" } else { "days" },
                holiday.local_name,
                holiday.date
            ),
            None => writeln!(f, "No upcoming holidays!"),
        }
    }

    /// The holiday list under the current month filter.
    pub fn write_listing(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.listing.is_empty() {
            let month = self.month.month_name().unwrap_or("this month");
            return writeln!(f, "No holiday for {month}!");
        }
        for holiday in &self.listing {
            let month = u8::try_from(holiday.date.month())
                .ok()
                .and_then(|it| Month::try_from(it).ok())
                .map_or("", |it| it.name());
            writeln!(f, "{}  {:<40} {month}", holiday.date, holiday.local_name)?;
        }
        Ok(())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Holiday Tracker: {}", self.country)?;
        self.write_status(f)?;
        writeln!(f, "-- {} --", self.month)?;
        self.write_listing(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, name: &str) -> HolidayRecord {
        HolidayRecord::new(date.parse().unwrap(), name)
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn us() -> Vec<HolidayRecord> {
        vec![
            record("2025-01-01", "New Year's Day"),
            record("2025-07-04", "Independence Day"),
            record("2025-12-25", "Christmas Day"),
        ]
    }

    #[test]
    fn stale_delivery_is_dropped() {
        let mut checker = HolidayChecker::new("US");
        let first = checker.select_country("US");
        let second = checker.select_country("JP");

        assert!(!checker.deliver(first, us()));
        assert!(checker.holidays().is_empty());

        assert!(checker.deliver(second, vec![record("2025-01-01", "元日")]));
        assert_eq!(checker.country(), "JP");
        assert_eq!(checker.holidays()[0].local_name, "元日");
    }

    #[test]
    fn switching_country_resets_filter_and_list() {
        let mut checker = HolidayChecker::new("US");
        let ticket = checker.select_country("US");
        checker.deliver(ticket, us());
        checker.set_month(MonthFilter::Only(Month::July));
        assert_eq!(checker.filtered().count(), 1);

        let _ = checker.select_country("FR");
        assert_eq!(checker.month(), MonthFilter::All);
        assert!(checker.holidays().is_empty());
    }

    #[test]
    fn panel_snapshot() {
        let mut checker = HolidayChecker::new("US");
        let ticket = checker.select_country("US");
        checker.deliver(ticket, us());

        let panel = checker.panel(at("2025-07-04T09:30:00"));
        assert_eq!(panel.today.as_deref(), Some("Independence Day"));
        let (next, days) = panel.next.clone().unwrap();
        assert_eq!(next.local_name, "Christmas Day");
        assert_eq!(days, 174);
        assert_eq!(panel.listing.len(), 3);

        let text = panel.to_string();
        assert!(text.contains("Today's Holiday: Independence Day"));
        assert!(text.contains("Next Holiday in 174 days: Christmas Day (2025-12-25)"));
        assert!(text.contains("July"));
    }

    #[test]
    fn panel_empty_states() {
        let mut checker = HolidayChecker::new("US");
        let ticket = checker.select_country("US");
        checker.deliver(ticket, us());
        checker.set_month(MonthFilter::Only(Month::February));

        let text = checker.panel(at("2025-12-26T00:00:00")).to_string();
        assert!(text.contains("No Holiday Today!"));
        assert!(text.contains("No upcoming holidays!"));
        assert!(text.contains("No holiday for February!"));

        let empty = HolidayChecker::new("US").panel(at("2025-01-01T00:00:00"));
        assert!(empty.to_string().contains("No holiday for this month!"));
    }
}
