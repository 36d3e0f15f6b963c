use super::Notice;
use crate::{
    error::AppResult,
    store::{self, RECENT_LIMIT},
    views::{self, Flash},
    DbPool,
};
use axum::{
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Extension,
};
use diesel_async::AsyncPgConnection;

pub async fn index(
    Extension(pool): Extension<DbPool>,
    notice: Option<Query<Notice>>,
) -> AppResult<Html<String>> {
    let conn = &mut pool.get().await?;

    let artists = store::artists::recent(conn, RECENT_LIMIT).await?;
    let venues = store::venues::recent(conn, RECENT_LIMIT).await?;
    let flash = notice.and_then(|Query(notice)| notice.deletion_flash());

    Ok(views::home(&artists, &venues, flash.as_ref()))
}

/// The home page carrying the outcome of a submission.
pub async fn with_flash(
    conn: &mut AsyncPgConnection,
    status: StatusCode,
    flash: Flash,
) -> AppResult<Response> {
    let artists = store::artists::recent(conn, RECENT_LIMIT).await?;
    let venues = store::venues::recent(conn, RECENT_LIMIT).await?;

    Ok((status, views::home(&artists, &venues, Some(&flash))).into_response())
}
