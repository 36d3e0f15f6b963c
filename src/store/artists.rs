use super::Deleted;
use crate::{
    error::BookingError,
    models::{Artist, Entity, NewArtist},
    schema::*,
    search::{contains_pattern, SearchQuery},
};
use diesel::{pg::Pg, prelude::*};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};

pub async fn find(conn: &mut AsyncPgConnection, id: i32) -> Result<Artist, BookingError> {
    artists::table
        .find(id)
        .first::<Artist>(conn)
        .await
        .optional()?
        .ok_or_else(|| BookingError::not_found(Entity::Artist, id))
}

pub async fn list(conn: &mut AsyncPgConnection) -> Result<Vec<Artist>, BookingError> {
    Ok(artists::table.order(artists::id).load(conn).await?)
}

pub async fn recent(conn: &mut AsyncPgConnection, limit: i64) -> Result<Vec<Artist>, BookingError> {
    Ok(artists::table
        .order(artists::id.desc())
        .limit(limit)
        .load(conn)
        .await?)
}

pub async fn search(
    conn: &mut AsyncPgConnection,
    query: &SearchQuery,
) -> Result<Vec<Artist>, BookingError> {
    let mut q: artists::BoxedQuery<'_, Pg> = artists::table.into_boxed();
    q = match query {
        SearchQuery::Name(name) => q.filter(artists::name.ilike(contains_pattern(name))),
        SearchQuery::CityState { city, state } => q
            .filter(artists::city.ilike(contains_pattern(city)))
            .filter(artists::state.ilike(contains_pattern(state))),
    };

    Ok(q.order(artists::id).load(conn).await?)
}

pub async fn create(conn: &mut AsyncPgConnection, new: NewArtist) -> Result<Artist, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            Ok(diesel::insert_into(artists::table)
                .values(&new)
                .get_result::<Artist>(conn)
                .await?)
        }
        .scope_boxed()
    })
    .await
}

pub async fn update(
    conn: &mut AsyncPgConnection,
    id: i32,
    changes: NewArtist,
) -> Result<Artist, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            diesel::update(artists::table.find(id))
                .set(&changes)
                .get_result::<Artist>(conn)
                .await
                .optional()?
                .ok_or_else(|| BookingError::not_found(Entity::Artist, id))
        }
        .scope_boxed()
    })
    .await
}

/// Deletes the artist together with every show they are booked for.
pub async fn delete(conn: &mut AsyncPgConnection, id: i32) -> Result<Deleted<Artist>, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            let artist = find(conn, id).await?;
            let shows_removed = diesel::delete(shows::table.filter(shows::artist_id.eq(id)))
                .execute(conn)
                .await?;
            diesel::delete(artists::table.find(id)).execute(conn).await?;

            Ok(Deleted {
                record: artist,
                shows_removed,
            })
        }
        .scope_boxed()
    })
    .await
}
