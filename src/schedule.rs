//! Past/upcoming show classification shared by the venue and artist pages.

use crate::{error::BookingError, schema::*};
use chrono::{Local, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

/// Whose shows to load. The entries carry the other side of each show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Venue(i32),
    Artist(i32),
}

/// A show seen from one side, carrying the counterpart's name and image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowEntry {
    pub show_id: i32,
    pub counterpart_id: i32,
    pub counterpart_name: String,
    pub counterpart_image_link: String,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowSplit {
    pub past: Vec<ShowEntry>,
    pub upcoming: Vec<ShowEntry>,
}

/// Wall-clock time used as the reference for a single request.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn is_past(start_time: NaiveDateTime, now: NaiveDateTime) -> bool {
    start_time < now
}

pub fn partition(entries: Vec<ShowEntry>, now: NaiveDateTime) -> ShowSplit {
    let (past, upcoming): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| is_past(entry.start_time, now));
    ShowSplit { past, upcoming }
}

type EntryRow = (i32, i32, String, String, NaiveDateTime);

pub async fn shows_for(
    conn: &mut AsyncPgConnection,
    side: Side,
    now: NaiveDateTime,
) -> Result<ShowSplit, BookingError> {
    let rows: Vec<EntryRow> = match side {
        Side::Venue(venue_id) => {
            shows::table
                .inner_join(artists::table)
                .filter(shows::venue_id.eq(venue_id))
                .select((
                    shows::id,
                    artists::id,
                    artists::name,
                    artists::image_link,
                    shows::start_time,
                ))
                .order(shows::start_time)
                .load(conn)
                .await?
        }
        Side::Artist(artist_id) => {
            shows::table
                .inner_join(venues::table)
                .filter(shows::artist_id.eq(artist_id))
                .select((
                    shows::id,
                    venues::id,
                    venues::name,
                    venues::image_link,
                    shows::start_time,
                ))
                .order(shows::start_time)
                .load(conn)
                .await?
        }
    };

    let entries = rows
        .into_iter()
        .map(
            |(show_id, counterpart_id, counterpart_name, counterpart_image_link, start_time)| {
                ShowEntry {
                    show_id,
                    counterpart_id,
                    counterpart_name,
                    counterpart_image_link,
                    start_time,
                }
            },
        )
        .collect();

    Ok(partition(entries, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2035, 4, 1)
            .and_then(|d| d.and_hms_opt(hour, min, 0))
            .unwrap()
    }

    fn entry(show_id: i32, start_time: NaiveDateTime) -> ShowEntry {
        ShowEntry {
            show_id,
            counterpart_id: 1,
            counterpart_name: "Guns N Petals".into(),
            counterpart_image_link: "https://example.com/gnp.jpg".into(),
            start_time,
        }
    }

    #[test]
    fn splits_around_the_reference_time() {
        let split = partition(vec![entry(1, at(18, 0)), entry(2, at(22, 0))], at(20, 0));
        assert_eq!(split.past.iter().map(|e| e.show_id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(split.upcoming.iter().map(|e| e.show_id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn a_show_starting_now_is_upcoming() {
        let split = partition(vec![entry(1, at(20, 0))], at(20, 0));
        assert!(split.past.is_empty());
        assert_eq!(split.upcoming.len(), 1);
    }

    #[test]
    fn classification_flips_once_the_start_passes() {
        let show = at(20, 0);
        assert!(!is_past(show, at(19, 59)));
        assert!(!is_past(show, at(20, 0)));
        assert!(is_past(show, at(20, 1)));
    }
}
