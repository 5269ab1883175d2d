use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Datelike, Days, Local, NaiveTime, TimeDelta, TimeZone, Timelike, Weekday};

use crate::catalog::CatalogLoader;
use crate::config::RefreshConfig;
use crate::error::ExitError;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn hour(&self) -> u32 {
        self.now().hour()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A fixed weekday and wall-clock time, e.g. Monday 03:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySchedule {
    weekday: Weekday,
    time: NaiveTime,
}

impl WeeklySchedule {
    pub fn new(weekday: Weekday, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self { weekday, time })
    }

    pub fn from_config(config: &RefreshConfig) -> anyhow::Result<Self> {
        let weekday = config.parsed_weekday()?;
        Self::new(weekday, config.hour, config.minute).ok_or_else(|| {
            ExitError::Config(format!(
                "invalid refresh time {}:{:02}",
                config.hour, config.minute
            ))
            .into()
        })
    }

    /// The first occurrence strictly after `now`, in `now`'s time zone.
    ///
    /// A wall-clock time skipped by a DST jump fires an hour later instead.
    pub fn next_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        let tz = now.timezone();
        let local = now.naive_local();
        let days_ahead = (7 + self.weekday.num_days_from_monday()
            - local.weekday().num_days_from_monday())
            % 7;
        let mut date = local.date() + Days::new(u64::from(days_ahead));
        loop {
            let candidate = date.and_time(self.time);
            let resolved = tz
                .from_local_datetime(&candidate)
                .earliest()
                .or_else(|| {
                    tz.from_local_datetime(&(candidate + TimeDelta::hours(1)))
                        .earliest()
                });
            if let Some(at) = resolved {
                if at > *now {
                    return at;
                }
            }
            date = date + Days::new(7);
        }
    }
}

impl std::fmt::Display for WeeklySchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "every {} at {}", self.weekday, self.time.format("%H:%M"))
    }
}

/// Tracks the next due occurrence of a schedule.
#[derive(Debug, Clone)]
pub struct Trigger<Tz: TimeZone> {
    schedule: WeeklySchedule,
    next: DateTime<Tz>,
}

impl<Tz: TimeZone> Trigger<Tz> {
    pub fn new(schedule: WeeklySchedule, now: &DateTime<Tz>) -> Self {
        Self {
            schedule,
            next: schedule.next_after(now),
        }
    }

    pub fn next(&self) -> &DateTime<Tz> {
        &self.next
    }

    /// True once when `now` reaches the due time; the trigger then moves to
    /// the following occurrence. Missed occurrences collapse into one firing.
    pub fn poll(&mut self, now: &DateTime<Tz>) -> bool {
        if *now < self.next {
            return false;
        }
        self.next = self.schedule.next_after(now);
        true
    }
}

/// Run `loader.refresh_or_keep()` whenever the schedule comes due, until
/// `shutdown` is set. The clock is checked every `poll_interval`.
pub fn spawn_refresh_job(
    loader: Arc<CatalogLoader>,
    schedule: WeeklySchedule,
    clock: Arc<dyn Clock>,
    shutdown: Arc<AtomicBool>,
    poll_interval: Duration,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("catalog-refresh".into())
        .spawn(move || {
            let mut trigger = Trigger::new(schedule, &clock.now());
            tracing::info!(%schedule, next = %trigger.next(), "catalog refresh scheduled");
            while !shutdown.load(Ordering::Relaxed) {
                if trigger.poll(&clock.now()) {
                    loader.refresh_or_keep();
                    tracing::info!(next = %trigger.next(), "next catalog refresh");
                }
                thread::sleep(poll_interval);
            }
            tracing::debug!("catalog refresh job stopped");
        })
}
