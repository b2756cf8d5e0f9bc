//! Subcommand implementations.

use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use holiday_checker::{
    query, Country, FileStore, HolidayChecker, HolidayPipeline, HolidayRecord,
    NagerDate, Ticker,
};
use tracing::info;

use crate::cli::{ClearCacheArgs, CountryArgs, ListArgs, WatchArgs};
use crate::config::CheckerConfig;

pub type Pipeline = HolidayPipeline<NagerDate, FileStore>;

/// Everything a subcommand needs, resolved from config and global flags.
pub struct App {
    pub config: CheckerConfig,
    pub pipeline: Pipeline,
}

impl App {
    pub fn new(config: CheckerConfig) -> Self {
        let provider = NagerDate::new(
            config.provider.base_url.as_str(),
            Duration::from_secs(config.provider.timeout_secs),
        );
        let store = FileStore::new(config.cache.dir.clone());
        let pipeline = HolidayPipeline::new(provider, store).with_year(config.year);
        App { config, pipeline }
    }

    fn country(&self, args: &CountryArgs) -> Result<Country> {
        match args.country {
            Some(it) => Ok(it),
            None => self
                .config
                .country
                .parse::<Country>()
                .with_context(|| {
                    format!("unsupported country in config: {}", self.config.country)
                }),
        }
    }

    fn holidays(&mut self, country: Country) -> Result<Vec<HolidayRecord>> {
        self.pipeline
            .try_get_holidays(country)
            .with_context(|| format!("failed to load holidays for {}", country.name()))
    }
}

pub fn countries() -> Result<()> {
    for country in Country::ALL {
        println!("{}  {}", country.code(), country.name());
    }
    Ok(())
}

pub fn list(ctx: &mut App, args: ListArgs) -> Result<()> {
    let country = ctx.country(&args.country)?;
    let mut checker = HolidayChecker::new(country.code());
    let ticket = checker.select_country(country.code());
    checker.deliver(ticket, ctx.holidays(country)?);
    checker.set_month(args.month);

    let panel = checker.panel(Local::now().naive_local());
    let mut out = String::new();
    panel.write_listing(&mut out)?;
    println!("{} holidays in {} ({})", country.name(), ctx.pipeline.year(), args.month);
    print!("{out}");
    Ok(())
}

pub fn today(ctx: &mut App, args: CountryArgs) -> Result<()> {
    let country = ctx.country(&args)?;
    let holidays = ctx.holidays(country)?;
    match query::today_holiday(&holidays, Local::now()) {
        Some(name) => println!("{name}"),
        None => println!("No Holiday Today!"),
    }
    Ok(())
}

pub fn next(ctx: &mut App, args: CountryArgs) -> Result<()> {
    let country = ctx.country(&args)?;
    let holidays = ctx.holidays(country)?;
    match query::next_holiday(&holidays, Local::now().naive_local()) {
        Some(next) => println!(
            "Next Holiday in {} days: {} ({})",
            next.days_until, next.holiday.local_name, next.holiday.date
        ),
        None => println!("No upcoming holidays!"),
    }
    Ok(())
}

pub fn watch(ctx: &mut App, args: WatchArgs) -> Result<()> {
    let country = ctx.country(&args.country)?;
    let mut checker = HolidayChecker::new(country.code());
    checker.load(&mut ctx.pipeline, country.code());
    checker.set_month(args.month);
    if checker.holidays().is_empty() {
        info!(country = %country, "no holidays loaded, showing empty panel");
    }

    print!("{}", checker.panel(Local::now().naive_local()));
    let limit = args.ticks;
    let ticker = Ticker::spawn(Duration::from_secs(1), move |tick| {
        let panel = checker.panel(Local::now().naive_local());
        let mut out = String::new();
        if panel.write_status(&mut out).is_ok() {
            print!("{out}");
        }
        if limit.is_some_and(|n| tick >= n) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .context("failed to start the clock")?;

    ticker.join();
    Ok(())
}

pub fn clear_cache(ctx: &mut App, args: ClearCacheArgs) -> Result<()> {
    let dir = ctx.config.cache.dir.display().to_string();
    match args.country {
        Some(country) => {
            let key = ctx.pipeline.cache_key(country.code());
            let removed = ctx
                .pipeline
                .store_mut()
                .remove(&key)
                .with_context(|| format!("failed to clear cache in {dir}"))?;
            info!(country = %country, removed, "cache entry cleared");
            println!("{}", if removed { "1 entry removed" } else { "nothing cached" });
        }
        None => {
            let removed = ctx
                .pipeline
                .store_mut()
                .clear()
                .with_context(|| format!("failed to clear cache in {dir}"))?;
            println!("{removed} entries removed");
        }
    }
    Ok(())
}
