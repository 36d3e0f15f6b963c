//! Submitted forms and the constraints checked before any store access.

use crate::models::{Artist, NewArtist, NewShow, NewVenue, Venue};
use chrono::NaiveDateTime;
use itertools::Itertools;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub const START_TIME_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Urlencoded name/value pairs as submitted, repeated keys included.
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormFields {
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed value, empty when the field is missing.
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(str::trim).unwrap_or_default().to_string()
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn optional(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|v| !v.is_empty())
    }

    /// Checkbox semantics: present and not an explicit false value.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| {
            !matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "" | "n" | "false" | "off" | "0"
            )
        })
    }

    /// Every non-blank value of a repeated key, duplicates dropped.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .unique()
            .map(str::to_string)
            .collect()
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Phones are required and may not contain letters.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.trim().is_empty() {
        return Err(invalid("phone", "Phone is required"));
    }
    if phone.chars().any(char::is_alphabetic) {
        return Err(invalid("phone", "Phone may not contain letters"));
    }
    Ok(())
}

pub fn validate_state(state: &str) -> Result<(), ValidationError> {
    if STATES.contains(&state) {
        Ok(())
    } else {
        Err(invalid("state", "Choose a state from the list"))
    }
}

pub fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.is_empty() {
        return Err(invalid("genres", "Choose at least one genre"));
    }
    if genres.iter().any(|g| !GENRES.contains(&g.as_str())) {
        return Err(invalid("genres", "Choose genres from the list"));
    }
    Ok(())
}

pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn validate_id(raw: &str) -> Result<(), ValidationError> {
    parse_id(raw)
        .map(|_| ())
        .ok_or_else(|| invalid("id", "Enter a valid id"))
}

fn validate_start_time(raw: &str) -> Result<(), ValidationError> {
    parse_start_time(raw)
        .map(|_| ())
        .ok_or_else(|| invalid("start_time", "Use the format YYYY-MM-DD HH:MM:SS"))
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    #[validate(custom = "validate_state")]
    pub state: String,
    #[validate(length(min = 1, max = 120, message = "Address is required"))]
    pub address: String,
    #[validate(custom = "validate_phone", length(max = 120))]
    pub phone: String,
    #[validate(url(message = "Image link must be a URL"), length(max = 500))]
    pub image_link: String,
    #[validate(url(message = "Facebook link must be a URL"), length(max = 120))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "Website link must be a URL"))]
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
    #[validate(custom = "validate_genres")]
    pub genres: Vec<String>,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> VenueForm {
        VenueForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.optional("seeking_description"),
            genres: fields.all("genres"),
        }
    }

    pub fn from_venue(venue: &Venue) -> VenueForm {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website_link: venue.website_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
            genres: venue.genres.clone(),
        }
    }

    pub fn to_new_venue(&self) -> NewVenue {
        NewVenue {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
            website_link: self.website_link.clone(),
            genres: self.genres.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ArtistForm {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "City is required"))]
    pub city: String,
    #[validate(custom = "validate_state")]
    pub state: String,
    #[validate(custom = "validate_phone", length(max = 120))]
    pub phone: String,
    #[validate(url(message = "Image link must be a URL"), length(max = 500))]
    pub image_link: String,
    #[validate(url(message = "Facebook link must be a URL"), length(max = 120))]
    pub facebook_link: Option<String>,
    #[validate(url(message = "Website link must be a URL"))]
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    #[validate(length(max = 500))]
    pub seeking_description: Option<String>,
    #[validate(custom = "validate_genres")]
    pub genres: Vec<String>,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> ArtistForm {
        ArtistForm {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.optional("facebook_link"),
            website_link: fields.optional("website_link"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.optional("seeking_description"),
            genres: fields.all("genres"),
        }
    }

    pub fn from_artist(artist: &Artist) -> ArtistForm {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website_link: artist.website_link.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
            genres: artist.genres.clone(),
        }
    }

    pub fn to_new_artist(&self) -> NewArtist {
        NewArtist {
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            genres: self.genres.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website_link: self.website_link.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ShowForm {
    #[validate(custom = "validate_id")]
    pub artist_id: String,
    #[validate(custom = "validate_id")]
    pub venue_id: String,
    #[validate(custom = "validate_start_time")]
    pub start_time: String,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> ShowForm {
        ShowForm {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    pub fn starting_at(start_time: NaiveDateTime) -> ShowForm {
        ShowForm {
            start_time: start_time.format(START_TIME_INPUT_FORMAT).to_string(),
            ..ShowForm::default()
        }
    }

    /// Validates and converts in one step.
    pub fn to_new_show(&self) -> Result<NewShow, ValidationErrors> {
        self.validate()?;
        match (
            parse_id(&self.artist_id),
            parse_id(&self.venue_id),
            parse_start_time(&self.start_time),
        ) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(NewShow {
                start_time,
                artist_id,
                venue_id,
            }),
            _ => {
                let mut errors = ValidationErrors::new();
                errors.add("start_time", invalid("show", "Show could not be read"));
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> FormFields {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into()
    }

    fn musical_hop() -> FormFields {
        pairs(&[
            ("name", "  The Musical Hop "),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("image_link", "https://images.example.com/hop.jpg"),
            ("facebook_link", ""),
            ("website_link", "https://www.themusicalhop.com"),
            ("seeking_talent", "y"),
            ("seeking_description", "We are on the lookout for a local artist."),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("genres", "Jazz"),
        ])
    }

    #[test]
    fn builds_trimmed_venue_values() {
        let form = VenueForm::from_fields(&musical_hop());
        assert_eq!(form.name, "The Musical Hop");
        assert_eq!(form.facebook_link, None);
        assert!(form.seeking_talent);
        assert_eq!(form.genres, vec!["Jazz", "Reggae"]);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn unchecked_boxes_are_false() {
        let fields = pairs(&[("seeking_venue", "false")]);
        assert!(!fields.flag("seeking_venue"));
        assert!(!fields.flag("seeking_talent"));
    }

    #[test]
    fn phones_need_digits_not_letters() {
        assert!(validate_phone("(415) 000-1234").is_ok());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("   ").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
    }

    #[test]
    fn alphabetic_phone_is_a_field_error() {
        let mut form = VenueForm::from_fields(&musical_hop());
        form.phone = "12a-555".into();
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn states_and_genres_come_from_fixed_lists() {
        let mut form = VenueForm::from_fields(&musical_hop());
        form.state = "Atlantis".into();
        form.genres = vec!["Polka".into()];
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("state"));
        assert!(fields.contains_key("genres"));

        assert!(validate_genres(&[]).is_err());
    }

    #[test]
    fn links_must_look_like_urls() {
        let mut form = ArtistForm::from_fields(&pairs(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("phone", "326-123-5000"),
            ("image_link", "not a url"),
            ("facebook_link", "https://www.facebook.com/GunsNPetals"),
            ("genres", "Rock n Roll"),
        ]));
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("image_link"));

        form.image_link = "https://images.example.com/gnp.jpg".into();
        assert!(form.validate().is_ok());
        assert_eq!(form.to_new_artist().website_link, None);
    }

    #[test]
    fn saved_records_round_trip_through_the_edit_form() {
        let form = VenueForm::from_fields(&musical_hop());
        let new = form.to_new_venue();
        let venue = Venue {
            id: 1,
            name: new.name,
            city: new.city,
            state: new.state,
            address: new.address,
            phone: new.phone,
            image_link: new.image_link,
            facebook_link: new.facebook_link,
            seeking_talent: new.seeking_talent,
            seeking_description: new.seeking_description,
            website_link: new.website_link,
            genres: new.genres,
        };
        assert_eq!(VenueForm::from_venue(&venue), form);
    }

    #[test]
    fn show_forms_parse_ids_and_times() {
        let form = ShowForm::from_fields(&pairs(&[
            ("artist_id", "4"),
            ("venue_id", " 1 "),
            ("start_time", "2035-04-01T20:00"),
        ]));
        let show = form.to_new_show().unwrap();
        assert_eq!((show.artist_id, show.venue_id), (4, 1));
        assert_eq!(
            show.start_time.format(START_TIME_INPUT_FORMAT).to_string(),
            "2035-04-01 20:00:00"
        );
    }

    #[test]
    fn bad_show_fields_are_reported() {
        let form = ShowForm::from_fields(&pairs(&[
            ("artist_id", "abc"),
            ("venue_id", "0"),
            ("start_time", "next tuesday"),
        ]));
        let errors = form.to_new_show().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("artist_id"));
        assert!(fields.contains_key("venue_id"));
        assert!(fields.contains_key("start_time"));
    }
}
