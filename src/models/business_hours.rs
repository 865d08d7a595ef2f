use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_wall_clock;
use chrono::{NaiveTime, Weekday};
use serde::Serialize;

/// One weekly opening interval, in the store's local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    pub store_id: String,
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusinessHours {
    pub fn new(store_id: impl Into<String>, weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            store_id: store_id.into(),
            weekday,
            start,
            end,
        }
    }

    /// Build an entry from its raw stored form (`0 = Monday`, `HH:MM:SS`).
    pub fn parse(store_id: &str, day_of_week: i64, start: &str, end: &str) -> AppResult<Self> {
        Ok(Self {
            store_id: store_id.to_string(),
            weekday: weekday_from_index(day_of_week)?,
            start: parse_wall_clock(start)?,
            end: parse_wall_clock(end)?,
        })
    }

    /// Monday-based index, as stored.
    pub fn day_index(&self) -> u32 {
        self.weekday.num_days_from_monday()
    }
}

pub fn weekday_from_index(idx: i64) -> AppResult<Weekday> {
    let day = match idx {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        6 => Weekday::Sun,
        other => return Err(AppError::InvalidWeekday(other)),
    };
    Ok(day)
}

/// What the period generator expands for one store.
#[derive(Debug, Clone, Copy)]
pub enum OpeningHours<'a> {
    /// Open around the clock.
    FullDay,
    /// Weekly recurring intervals; days without an entry are closed.
    Weekly(&'a [BusinessHours]),
}

impl<'a> OpeningHours<'a> {
    /// A store without any schedule entry is open around the clock.
    pub fn from_entries(entries: &'a [BusinessHours]) -> Self {
        if entries.is_empty() {
            OpeningHours::FullDay
        } else {
            OpeningHours::Weekly(entries)
        }
    }
}
