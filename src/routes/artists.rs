use super::{home, Notice};
use crate::{
    error::{AppResult, BookingError},
    forms::{ArtistForm, FormFields},
    models::Entity,
    schedule::{self, Side},
    search::{SearchHit, SearchQuery, SearchRequest, SearchResults},
    store,
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

const CREATE_TITLE: &str = "List a new artist";
const EDIT_TITLE: &str = "Edit artist";

async fn list(Extension(pool): Extension<DbPool>) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    Ok(views::artists::list(&store::artists::list(conn).await?))
}

async fn search(
    Extension(pool): Extension<DbPool>,
    Form(req): Form<SearchRequest>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let query = SearchQuery::parse(&req.search_term);
    let artists = store::artists::search(conn, &query).await?;
    let counts = store::shows::counts_for_artists(conn, &artists, schedule::now()).await?;

    let hits = artists
        .into_iter()
        .zip(counts)
        .map(|(artist, counts)| SearchHit {
            id: artist.id,
            name: artist.name,
            num_upcoming_shows: counts.upcoming,
        })
        .collect();

    Ok(views::search_results(
        Entity::Artist,
        &SearchResults {
            term: req.search_term,
            query,
            hits,
        },
    ))
}

async fn detail(
    Extension(pool): Extension<DbPool>,
    Path(artist_id): Path<i32>,
    notice: Option<Query<Notice>>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let artist = store::artists::find(conn, artist_id).await?;
    let shows = schedule::shows_for(conn, Side::Artist(artist_id), schedule::now()).await?;
    let flash = notice
        .filter(|Query(notice)| notice.updated)
        .map(|_| Flash::Success(format!("Artist {} was successfully updated!", artist.name)));

    Ok(views::artists::detail(&artist, &shows, flash.as_ref()))
}

async fn create_form() -> Html<String> {
    views::artists::form(
        CREATE_TITLE,
        "/artists/create",
        &ArtistForm::default(),
        None,
        None,
    )
}

async fn create(
    Extension(pool): Extension<DbPool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ArtistForm::from_fields(&FormFields::from(fields));
    if let Err(errors) = form.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            views::artists::form(CREATE_TITLE, "/artists/create", &form, Some(&errors), None),
        )
            .into_response());
    }

    let conn = &mut pool.get().await?;

    let (status, flash) = match store::artists::create(conn, form.to_new_artist()).await {
        Ok(artist) => {
            info!(artist_id = artist.id, "listed artist {}", artist.name);
            (
                StatusCode::OK,
                Flash::Success(format!("Artist {} was successfully listed!", artist.name)),
            )
        }
        Err(e) => {
            warn!("could not list artist {}: {e}", form.name);
            (
                e.status(),
                Flash::Error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    form.name
                )),
            )
        }
    };

    home::with_flash(conn, status, flash).await
}

async fn edit_form(
    Extension(pool): Extension<DbPool>,
    Path(artist_id): Path<i32>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let artist = store::artists::find(conn, artist_id).await?;

    Ok(views::artists::form(
        EDIT_TITLE,
        &format!("/artists/{artist_id}/edit"),
        &ArtistForm::from_artist(&artist),
        None,
        None,
    ))
}

async fn edit(
    Extension(pool): Extension<DbPool>,
    Path(artist_id): Path<i32>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let action = format!("/artists/{artist_id}/edit");
    let form = ArtistForm::from_fields(&FormFields::from(fields));
    if let Err(errors) = form.validate() {
        return Ok((
            StatusCode::BAD_REQUEST,
            views::artists::form(EDIT_TITLE, &action, &form, Some(&errors), None),
        )
            .into_response());
    }

    let conn = &mut pool.get().await?;

    match store::artists::update(conn, artist_id, form.to_new_artist()).await {
        Ok(artist) => {
            info!(artist_id, "updated artist {}", artist.name);
            let url = Notice::updated_url(&format!("/artists/{artist_id}"));
            Ok(Redirect::to(&url).into_response())
        }
        Err(e @ BookingError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            warn!(artist_id, "could not update artist: {e}");
            let flash = Flash::Error(format!("Failed to update artist {}.", form.name));
            Ok((
                e.status(),
                views::artists::form(EDIT_TITLE, &action, &form, None, Some(&flash)),
            )
                .into_response())
        }
    }
}

async fn delete(
    Extension(pool): Extension<DbPool>,
    Path(artist_id): Path<i32>,
) -> AppResult<Response> {
    let conn = &mut pool.get().await?;

    match store::artists::delete(conn, artist_id).await {
        Ok(deleted) => {
            info!(
                artist_id,
                shows_removed = deleted.shows_removed,
                "deleted artist {}",
                deleted.record.name
            );
            let url = Notice::deleted_url(Entity::Artist, &deleted.record.name)?;
            Ok(Redirect::to(&url).into_response())
        }
        Err(e @ BookingError::NotFound { .. }) => Err(e.into()),
        Err(e) => {
            error!(artist_id, "could not delete artist: {e}");
            let flash = Flash::Error(format!(
                "An error occurred. Artist {artist_id} could not be deleted."
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
        .route("/:artist_id", get(detail).delete(delete))
        .route("/:artist_id/edit", get(edit_form).post(edit))
}
