use crate::{models::Entity, views::Flash};
use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};

pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

pub fn app() -> Router {
    Router::new()
        .route("/", get(home::index))
        .nest("/venues", venues::app())
        .nest("/artists", artists::app())
        .nest("/shows", shows::app())
}

/// Outcome of an edit or delete, carried in the query string of the page the
/// client is redirected to.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notice {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<Entity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Notice {
    pub fn updated_url(path: &str) -> String {
        format!("{path}?updated=true")
    }

    pub fn deleted_url(entity: Entity, name: &str) -> Result<String, serde_urlencoded::ser::Error> {
        let query = serde_urlencoded::to_string(Notice {
            updated: false,
            deleted: Some(entity),
            name: Some(name.to_string()),
        })?;
        Ok(format!("/?{query}"))
    }

    pub fn deletion_flash(&self) -> Option<Flash> {
        match (self.deleted, &self.name) {
            (Some(entity), Some(name)) => Some(Flash::Success(format!(
                "The {entity} {name} was successfully deleted."
            ))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleted_url_carries_the_record_name() {
        let url = Notice::deleted_url(Entity::Venue, "Park Square Live Music & Coffee").unwrap();
        assert_eq!(url, "/?deleted=venue&name=Park+Square+Live+Music+%26+Coffee");

        let notice: Notice = serde_urlencoded::from_str(&url[2..]).unwrap();
        assert_eq!(
            notice.deletion_flash(),
            Some(Flash::Success(
                "The venue Park Square Live Music & Coffee was successfully deleted.".into()
            ))
        );
    }

    #[test]
    fn a_bare_update_flag_is_not_a_deletion() {
        let notice: Notice = serde_urlencoded::from_str("updated=true").unwrap();
        assert!(notice.updated);
        assert_eq!(notice.deletion_flash(), None);
        assert_eq!(Notice::updated_url("/artists/4"), "/artists/4?updated=true");
    }
}
