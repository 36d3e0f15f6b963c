//! Entity access layer. Every function takes the connection it runs on;
//! mutations run in exactly one transaction and roll back on any error.

pub mod artists;
pub mod shows;
pub mod venues;

use crate::{models::Show, schedule};
use chrono::NaiveDateTime;

/// Rows on the home page.
pub const RECENT_LIMIT: i64 = 10;

/// A record removed together with the shows that referenced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Deleted<T> {
    pub record: T,
    pub shows_removed: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowCounts {
    pub total: usize,
    pub upcoming: usize,
}

impl ShowCounts {
    pub fn tally(shows: &[Show], now: NaiveDateTime) -> ShowCounts {
        ShowCounts {
            total: shows.len(),
            upcoming: shows
                .iter()
                .filter(|s| !schedule::is_past(s.start_time, now))
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn tally_counts_only_future_shows_as_upcoming() {
        let day = |d| {
            NaiveDate::from_ymd_opt(2035, 1, d)
                .and_then(|d| d.and_hms_opt(20, 0, 0))
                .unwrap()
        };
        let shows: Vec<Show> = [1, 10, 20]
            .into_iter()
            .enumerate()
            .map(|(i, d)| Show {
                id: i as i32 + 1,
                start_time: day(d),
                artist_id: 1,
                venue_id: 1,
            })
            .collect();

        assert_eq!(
            ShowCounts::tally(&shows, day(5)),
            ShowCounts {
                total: 3,
                upcoming: 2
            }
        );
    }
}
