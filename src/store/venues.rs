use super::{Deleted, ShowCounts};
use crate::{
    error::BookingError,
    models::{Entity, NewVenue, Venue},
    schema::*,
    search::{contains_pattern, SearchQuery},
};
use diesel::{pg::Pg, prelude::*};
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl};
use itertools::Itertools;

pub async fn find(conn: &mut AsyncPgConnection, id: i32) -> Result<Venue, BookingError> {
    venues::table
        .find(id)
        .first::<Venue>(conn)
        .await
        .optional()?
        .ok_or_else(|| BookingError::not_found(Entity::Venue, id))
}

pub async fn list(conn: &mut AsyncPgConnection) -> Result<Vec<Venue>, BookingError> {
    Ok(venues::table.order(venues::id).load(conn).await?)
}

pub async fn recent(conn: &mut AsyncPgConnection, limit: i64) -> Result<Vec<Venue>, BookingError> {
    Ok(venues::table
        .order(venues::id.desc())
        .limit(limit)
        .load(conn)
        .await?)
}

pub async fn search(
    conn: &mut AsyncPgConnection,
    query: &SearchQuery,
) -> Result<Vec<Venue>, BookingError> {
    let mut q: venues::BoxedQuery<'_, Pg> = venues::table.into_boxed();
    q = match query {
        SearchQuery::Name(name) => q.filter(venues::name.ilike(contains_pattern(name))),
        SearchQuery::CityState { city, state } => q
            .filter(venues::city.ilike(contains_pattern(city)))
            .filter(venues::state.ilike(contains_pattern(state))),
    };

    Ok(q.order(venues::id).load(conn).await?)
}

pub async fn create(conn: &mut AsyncPgConnection, new: NewVenue) -> Result<Venue, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            Ok(diesel::insert_into(venues::table)
                .values(&new)
                .get_result::<Venue>(conn)
                .await?)
        }
        .scope_boxed()
    })
    .await
}

pub async fn update(
    conn: &mut AsyncPgConnection,
    id: i32,
    changes: NewVenue,
) -> Result<Venue, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            diesel::update(venues::table.find(id))
                .set(&changes)
                .get_result::<Venue>(conn)
                .await
                .optional()?
                .ok_or_else(|| BookingError::not_found(Entity::Venue, id))
        }
        .scope_boxed()
    })
    .await
}

/// Deletes the venue and every show booked there. Unknown ids fail before
/// anything is deleted.
pub async fn delete(conn: &mut AsyncPgConnection, id: i32) -> Result<Deleted<Venue>, BookingError> {
    conn.transaction::<_, BookingError, _>(|conn| {
        async move {
            let venue = find(conn, id).await?;
            let shows_removed = diesel::delete(shows::table.filter(shows::venue_id.eq(id)))
                .execute(conn)
                .await?;
            diesel::delete(venues::table.find(id)).execute(conn).await?;

            Ok(Deleted {
                record: venue,
                shows_removed,
            })
        }
        .scope_boxed()
    })
    .await
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_shows: usize,
    pub num_upcoming_shows: usize,
}

/// Venues sharing one city and state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups venues into areas ordered by state then city; venues keep id order.
pub fn group_by_area(venues: Vec<(Venue, ShowCounts)>) -> Vec<Area> {
    let groups = venues
        .into_iter()
        .sorted_by(|(a, _), (b, _)| (&a.state, &a.city, a.id).cmp(&(&b.state, &b.city, b.id)))
        .group_by(|(v, _)| (v.city.clone(), v.state.clone()));

    let areas = groups
        .into_iter()
        .map(|((city, state), members)| Area {
            city,
            state,
            venues: members
                .map(|(v, counts)| VenueSummary {
                    id: v.id,
                    name: v.name,
                    num_shows: counts.total,
                    num_upcoming_shows: counts.upcoming,
                })
                .collect(),
        })
        .collect();
    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue(id: i32, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.into(),
            city: city.into(),
            state: state.into(),
            address: "1015 Folsom Street".into(),
            phone: format!("123-123-{id:04}"),
            image_link: "https://example.com/venue.jpg".into(),
            facebook_link: None,
            seeking_talent: false,
            seeking_description: None,
            website_link: None,
            genres: vec!["Jazz".into()],
        }
    }

    #[test]
    fn areas_are_unique_city_state_pairs() {
        let counts = ShowCounts {
            total: 2,
            upcoming: 1,
        };
        let areas = group_by_area(vec![
            (venue(1, "The Musical Hop", "San Francisco", "CA"), counts),
            (venue(2, "The Dueling Pianos Bar", "New York", "NY"), ShowCounts::default()),
            (venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"), counts),
            (venue(4, "Pier 39", "San Francisco", "NM"), ShowCounts::default()),
        ]);

        let keys: Vec<_> = areas
            .iter()
            .map(|a| (a.city.as_str(), a.state.as_str(), a.venues.len()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("San Francisco", "CA", 2),
                ("San Francisco", "NM", 1),
                ("New York", "NY", 1),
            ]
        );
        assert_eq!(
            areas[0].venues[0],
            VenueSummary {
                id: 1,
                name: "The Musical Hop".into(),
                num_shows: 2,
                num_upcoming_shows: 1,
            }
        );
    }

    #[test]
    fn no_venues_no_areas() {
        assert!(group_by_area(Vec::new()).is_empty());
    }
}
