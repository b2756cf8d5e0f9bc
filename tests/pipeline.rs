//! End-to-end behavior of the cache-aside pipeline across sessions.

use std::cell::Cell;

use chrono::NaiveDateTime;
use holiday_checker::{
    query, CacheStore, Error, FileStore, HolidayChecker, HolidayPipeline, HolidayProvider,
    HolidayRecord, MemoryStore, MonthFilter,
};

/// Provider replaying a fixed JSON payload, counting calls.
struct Replay {
    payload: &'static str,
    calls: Cell<usize>,
}

impl Replay {
    fn new(payload: &'static str) -> Self {
        Replay {
            payload,
            calls: Cell::new(0),
        }
    }
}

impl HolidayProvider for Replay {
    fn fetch(&self, _year: i32, _country: &str) -> holiday_checker::Result<Vec<HolidayRecord>> {
        self.calls.set(self.calls.get() + 1);
        Ok(serde_json::from_str(self.payload)?)
    }
}

/// Provider that must never be reached.
struct Offline;

impl HolidayProvider for Offline {
    fn fetch(&self, _year: i32, country: &str) -> holiday_checker::Result<Vec<HolidayRecord>> {
        panic!("network access for {country} while the cache is warm");
    }
}

const PH_2025: &str = r#"[
    {"date": "2025-12-25", "localName": "Araw ng Pasko", "name": "Christmas Day", "countryCode": "PH", "types": ["Public"]},
    {"date": "2025-01-01", "localName": "Bagong Taon", "name": "New Year's Day", "countryCode": "PH", "types": ["Public"]},
    {"date": "2025-04-17", "localName": "Huwebes Santo", "name": "Maundy Thursday", "countryCode": "PH", "types": ["Public"]},
    {"date": "2025-04-18", "localName": "Biyernes Santo", "name": "Good Friday", "countryCode": "PH", "types": ["Public"]},
    {"date": "2025-12-25", "localName": "Pasko (duplicate)", "name": "Christmas Day", "countryCode": "PH", "types": ["Bank"]},
    {"date": "2025-04-17", "localName": "Duplicate", "name": "Maundy Thursday", "countryCode": "PH", "types": ["Bank"]}
]"#;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

#[test]
fn dedups_sorts_and_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = HolidayPipeline::new(Replay::new(PH_2025), FileStore::new(dir.path()));
    let fetched = first.get_holidays("PH");
    assert_eq!(first.provider().calls.get(), 1);

    let dates: Vec<_> = fetched.iter().map(|it| it.date.to_string()).collect();
    assert_eq!(dates, ["2025-01-01", "2025-04-17", "2025-04-18", "2025-12-25"]);
    assert_eq!(fetched[1].local_name, "Huwebes Santo");
    assert_eq!(fetched[3].local_name, "Araw ng Pasko");
    assert!(dir.path().join("holidays-PH.json").exists());

    let mut second = HolidayPipeline::new(Offline, FileStore::new(dir.path()));
    let cached = second.get_holidays("PH");
    assert_eq!(cached, fetched);
    assert_eq!(cached[0].extra["name"], "New Year's Day");
}

#[test]
fn cache_entry_is_a_json_array() {
    let mut pipeline = HolidayPipeline::new(Replay::new(PH_2025), MemoryStore::new());
    pipeline.get_holidays("PH");

    let bytes = pipeline.store().get("holidays-PH").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["date"], "2025-01-01");
    assert_eq!(entries[0]["localName"], "Bagong Taon");
}

#[test]
fn countries_are_cached_independently() {
    let mut pipeline = HolidayPipeline::new(Replay::new(PH_2025), MemoryStore::new());
    pipeline.get_holidays("PH");
    pipeline.get_holidays("US");
    pipeline.get_holidays("PH");
    pipeline.get_holidays("US");

    assert_eq!(pipeline.provider().calls.get(), 2);
    assert_eq!(pipeline.store().len(), 2);
}

#[test]
fn malformed_payload_leaves_cache_empty() {
    let mut pipeline = HolidayPipeline::new(Replay::new("<html>oops</html>"), MemoryStore::new());
    assert!(pipeline.get_holidays("CN").is_empty());
    assert!(matches!(pipeline.try_get_holidays("CN"), Err(Error::Json(_))));
    assert!(pipeline.store().is_empty());
}

#[test]
fn derivations_over_pipeline_output() {
    let mut pipeline = HolidayPipeline::new(Replay::new(PH_2025), MemoryStore::new());
    let holidays = pipeline.get_holidays("PH");

    let now = at("2025-04-17T18:00:00");
    assert_eq!(query::today_holiday(&holidays, now), Some("Huwebes Santo"));

    let next = query::next_holiday(&holidays, now).unwrap();
    assert_eq!(next.holiday.local_name, "Biyernes Santo");
    assert_eq!(next.days_until, 1);

    let april: Vec<_> = query::filter_by_month(&holidays, "april".parse::<MonthFilter>().unwrap())
        .map(|it| it.local_name.as_str())
        .collect();
    assert_eq!(april, ["Huwebes Santo", "Biyernes Santo"]);
}

#[test]
fn checker_loads_through_pipeline() {
    let mut pipeline = HolidayPipeline::new(Replay::new(PH_2025), MemoryStore::new());
    let mut checker = HolidayChecker::new("PH");
    checker.load(&mut pipeline, "PH");
    checker.set_month(MonthFilter::from_number(12).unwrap());

    let panel = checker.panel(at("2025-12-24T12:00:00"));
    assert_eq!(panel.today, None);
    assert_eq!(panel.next.as_ref().map(|(_, days)| *days), Some(1));
    assert_eq!(panel.listing.len(), 1);
    assert_eq!(panel.listing[0].local_name, "Araw ng Pasko");
}
