use super::{home, Notice};
use crate::{
    error::{AppResult, BookingError},
    forms::{FormFields, VenueForm},
    models::Entity,
    schedule::{self, Side},
    search::{SearchHit, SearchQuery, SearchRequest, SearchResults},
    store::{self, venues::group_by_area},
    views::{self, Flash},
    DbPool,
};
use axum::{
    extract::{Form, Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Extension, Router,
};
use tracing::{error, info, warn};
use validator::Validate;

const CREATE_TITLE: &str = "List a new venue";
const EDIT_TITLE: &str = "Edit venue";

async fn list(Extension(pool): Extension<DbPool>) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let venues = store::venues::list(conn).await?;
    let counts = store::shows::counts_for_venues(conn, &venues, schedule::now()).await?;

    Ok(views::venues::list(&group_by_area(
        venues.into_iter().zip(counts).collect(),
    )))
}

async fn search(
    Extension(pool): Extension<DbPool>,
    Form(req): Form<SearchRequest>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let query = SearchQuery::parse(&req.search_term);
    let venues = store::venues::search(conn, &query).await?;
    let counts = store::shows::counts_for_venues(conn, &venues, schedule::now()).await?;

    let hits = venues
        .into_iter()
        .zip(counts)
        .map(|(venue, counts)| SearchHit {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: counts.upcoming,
        })
        .collect();

    Ok(views::search_results(
        Entity::Venue,
        &SearchResults {
            term: req.search_term,
            query,
            hits,
        },
    ))
}

async fn detail(
    Extension(pool): Extension<DbPool>,
    Path(venue_id): Path<i32>,
    notice: Option<Query<Notice>>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let venue = store::venues::find(conn, venue_id).await?;
    let shows = schedule::shows_for(conn, Side::Venue(venue_id), schedule::now()).await?;
    let flash = notice
        .filter(|Query(notice)| notice.updated)
        .map(|_| Flash::Success(format!("Venue {} was successfully updated!", venue.name)));

    Ok(views::venues::detail(&venue, &shows, flash.as_ref()))
}

async fn create_form() -> Html<String> {
    views::venues::form(
        CREATE_TITLE,
        "/venues/create",
        &VenueForm::default(),
        None,
        None,
    )
}

async fn create(
    Extension(pool): Extension<DbPool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = VenueForm::from_fields(&FormFields::from(fields));
    if let Err(errors) = form.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            views::venues::form(CREATE_TITLE, "/venues/create", &form, Some(&errors), None),
        )
            .into_response());
    }

    let conn = &mut pool.get().await?;

    let (status, flash) = match store::venues::create(conn, form.to_new_venue()).await {
        Ok(venue) => {
            info!(venue_id = venue.id, "listed venue {}", venue.name);
            (
                StatusCode::OK,
                Flash::Success(format!("Venue {} was successfully listed!", venue.name)),
            )
        }
        Err(e) => {
            warn!("could not list venue {}: {e}", form.name);
            (
                e.status(),
                Flash::Error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    form.name
                )),
            )
        }
    };

    home::with_flash(conn, status, flash).await
}

async fn edit_form(
    Extension(pool): Extension<DbPool>,
    Path(venue_id): Path<i32>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let venue = store::venues::find(conn, venue_id).await?;

    Ok(views::venues::form(
        EDIT_TITLE,
        &format!("/venues/{venue_id}/edit"),
        &VenueForm::from_venue(&venue),
        None,
        None,
    ))
}

async fn edit(
    Extension(pool): Extension<DbPool>,
    Path(venue_id): Path<i32>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let action = format!("/venues/{venue_id}/edit");
    let form = VenueForm::from_fields(&FormFields::from(fields));
    if let Err(errors) = form.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            views::venues::form(EDIT_TITLE, &action, &form, Some(&errors), None),
        )
            .into_response());
    }

    let conn = &mut pool.get().await?;

    match store::venues::update(conn, venue_id, form.to_new_venue()).await {
        Ok(venue) => {
            info!(venue_id, "updated venue {}", venue.name);
            let url = Notice::updated_url(&format!("/venues/{venue_id}"));
            Ok(Redirect::to(&url).into_response())
        }
        Err(e @ BookingError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            warn!(venue_id, "could not update venue: {e}");
            let flash = Flash::Error(format!("Failed to update venue {}.", form.name));
            Ok((
                e.status(),
                views::venues::form(EDIT_TITLE, &action, &form, None, Some(&flash)),
            )
                .into_response())
        }
    }
}

async fn delete(
    Extension(pool): Extension<DbPool>,
    Path(venue_id): Path<i32>,
) -> AppResult<Response> {
    let conn = &mut pool.get().await?;

    match store::venues::delete(conn, venue_id).await {
        Ok(deleted) => {
            info!(
                venue_id,
                shows_removed = deleted.shows_removed,
                "deleted venue {}",
                deleted.record.name
            );
            let url = Notice::deleted_url(Entity::Venue, &deleted.record.name)?;
            Ok(Redirect::to(&url).into_response())
        }
        Err(e @ BookingError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!(venue_id, "could not delete venue: {e}");
            let flash = Flash::Error(format!(
                "An error occurred. Venue {venue_id} could not be deleted."
            ));
            home::with_flash(conn, e.status(), flash).await
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/search", post(search))
        .route("/create", get(create_form).post(create))
        .route("/:venue_id", get(detail).delete(delete))
        .route("/:venue_id/edit", get(edit_form).post(edit))
}
