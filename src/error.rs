use crate::{models::Entity, views};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::borrow::Cow;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures of the entity access layer and the form validators.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid submission: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("the {entity} {id} does not exist")]
    NotFound { entity: Entity, id: i32 },
    #[error("store failure: {0}")]
    Store(#[source] DieselError),
}

impl BookingError {
    pub fn not_found(entity: Entity, id: i32) -> BookingError {
        BookingError::NotFound { entity, id }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Constraint(_) => StatusCode::CONFLICT,
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DieselError> for BookingError {
    fn from(e: DieselError) -> BookingError {
        match e {
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                ref info,
            ) => BookingError::Constraint(info.message().to_string()),
            e => BookingError::Store(e),
        }
    }
}

pub enum AppError {
    InternalServerError(anyhow::Error),
    ResponseStatusError(StatusCode, Cow<'static, str>),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InternalServerError(err) => {
                if let Some(e) = err.downcast_ref::<BookingError>() {
                    let code = e.status();
                    if code != StatusCode::INTERNAL_SERVER_ERROR {
                        return AppError::from(code, e.to_string()).into_response();
                    }
                }
                tracing::error!("request failed: {err:#}");
                AppError::from(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
                    .into_response()
            }
            AppError::ResponseStatusError(code, s) => {
                (code, views::error_page(code, &s)).into_response()
            }
        }
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(e: E) -> AppError {
        AppError::InternalServerError(e.into())
    }
}

impl AppError {
    pub fn from(code: StatusCode, s: impl Into<Cow<'static, str>>) -> AppError {
        AppError::ResponseStatusError(code, s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let e = BookingError::not_found(Entity::Venue, 7);
        assert_eq!(e.status(), StatusCode::NOT_FOUND);
        assert_eq!(e.to_string(), "the venue 7 does not exist");
    }

    #[test]
    fn unexpected_store_errors_stay_internal() {
        let e = BookingError::from(DieselError::NotFound);
        assert!(matches!(e, BookingError::Store(_)));
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn booking_errors_keep_their_status_through_app_error() {
        let err: AppError = BookingError::not_found(Entity::Artist, 3).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err: AppError = BookingError::Constraint("duplicate phone".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);

        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
