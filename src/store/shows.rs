use super::{artists, venues, ShowCounts};
use crate::{
    error::BookingError,
    models::{Artist, NewShow, Show, Venue},
    schema,
};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};

/// A show with both its venue and its artist denormalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub id: i32,
    pub start_time: NaiveDateTime,
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
}

type ListingRow = (i32, NaiveDateTime, i32, String, String, i32, String, String);

pub async fn list(conn: &mut AsyncPgConnection) -> Result<Vec<ShowListing>, BookingError> {
    use schema::{artists, shows, venues};

    let rows: Vec<ListingRow> = shows::table
        .inner_join(venues::table)
        .inner_join(artists::table)
        .select((
            shows::id,
            shows::start_time,
            venues::id,
            venues::name,
            venues::image_link,
            artists::id,
            artists::name,
            artists::image_link,
        ))
        .order((shows::start_time, shows::id))
        .load(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                start_time,
                venue_id,
                venue_name,
                venue_image_link,
                artist_id,
                artist_name,
                artist_image_link,
            )| ShowListing {
                id,
                start_time,
                venue_id,
                venue_name,
                venue_image_link,
                artist_id,
                artist_name,
                artist_image_link,
            },
        )
        .collect())
}

/// Books an existing artist at an existing venue.
pub async fn create(conn: &mut AsyncPgConnection, new: NewShow) -> Result<Show, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            artists::find(conn, new.artist_id).await?;
            venues::find(conn, new.venue_id).await?;

            Ok(diesel::insert_into(schema::shows::table)
                .values(&new)
                .get_result::<Show>(conn)
                .await?)
        }
        .scope_boxed()
    })
    .await
}

pub async fn counts_for_venues(
    conn: &mut AsyncPgConnection,
    venues: &[Venue],
    now: NaiveDateTime,
) -> Result<Vec<ShowCounts>, BookingError> {
    let shows = Show::belonging_to(venues)
        .load::<Show>(conn)
        .await?
        .grouped_by(venues);

    Ok(shows.iter().map(|s| ShowCounts::tally(s, now)).collect())
}

pub async fn counts_for_artists(
    conn: &mut AsyncPgConnection,
    artists: &[Artist],
    now: NaiveDateTime,
) -> Result<Vec<ShowCounts>, BookingError> {
    let shows = Show::belonging_to(artists)
        .load::<Show>(conn)
        .await?
        .grouped_by(artists);

    Ok(shows.iter().map(|s| ShowCounts::tally(s, now)).collect())
}
