use super::home;
use crate::{
    error::AppResult,
    forms::{FormFields, ShowForm},
    schedule, store,
    views::{self, Flash},
    DbPool,
};
use axum::{
    extract::Form,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use tracing::{info, warn};

async fn list(Extension(pool): Extension<DbPool>) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    Ok(views::shows::list(&store::shows::list(conn).await?))
}

async fn create_form() -> Html<String> {
    views::shows::form(&ShowForm::starting_at(schedule::now()), None, None)
}

async fn create(
    Extension(pool): Extension<DbPool>,
    Form(fields): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ShowForm::from_fields(&FormFields::from(fields));
    let new_show = match form.to_new_show() {
        Ok(new_show) => new_show,
        Err(errors) => {
            return Ok((
                StatusCode::BAD_REQUEST,
                views::shows::form(&form, Some(&errors), None),
            )
                .into_response())
        }
    };

    let conn = &mut pool.get().await?;

    let (status, flash) = match store::shows::create(conn, new_show).await {
        Ok(show) => {
            info!(
                show_id = show.id,
                artist_id = show.artist_id,
                venue_id = show.venue_id,
                "listed show"
            );
            (
                StatusCode::OK,
                Flash::Success("Show was successfully listed!".to_string()),
            )
        }
        Err(e) => {
            warn!("could not list show: {e}");
            (
                e.status(),
                Flash::Error("An error occurred. Show could not be listed.".to_string()),
            )
        }
    };

    home::with_flash(conn, status, flash).await
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/create", get(create_form).post(create))
}
