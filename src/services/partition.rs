//! Splitting a set of shows into past and upcoming relative to a reference time.

use chrono::NaiveDateTime;
use serde::Serialize;

/// Canonical rendering of a show start time in every listing and detail view.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_start_time(start_time: NaiveDateTime) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// A show that starts exactly at `now` has already happened.
pub fn is_past(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time <= now
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowPartition<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> ShowPartition<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ShowPartition<U> {
        ShowPartition {
            past_shows: self.past_shows.into_iter().map(&mut f).collect(),
            upcoming_shows: self.upcoming_shows.into_iter().map(&mut f).collect(),
            past_shows_count: self.past_shows_count,
            upcoming_shows_count: self.upcoming_shows_count,
        }
    }
}

/// Partitions `shows` by start time, keeping the input order within each side.
pub fn partition_shows<T, F>(
    shows: impl IntoIterator<Item = T>,
    now: NaiveDateTime,
    start_time: F,
) -> ShowPartition<T>
where
    F: Fn(&T) -> NaiveDateTime,
{
    let (past_shows, upcoming_shows): (Vec<T>, Vec<T>) = shows
        .into_iter()
        .partition(|show| is_past(start_time(show), now));

    ShowPartition {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}
