use super::{
    checkbox, delete_button, escape, form_page, genre_tags, layout, optional_link, select,
    show_sections, text_input, Flash,
};
use crate::{
    forms::{VenueForm, GENRES, STATES},
    models::{Entity, Venue},
    schedule::ShowSplit,
    store::venues::Area,
};
use axum::response::Html;
use std::fmt::Write;
use validator::ValidationErrors;

pub fn list(areas: &[Area]) -> Html<String> {
    let mut body = String::new();
    for area in areas {
        let _ = writeln!(
            body,
            "<h3>{}, {}</h3>\n<ul class=\"items\">",
            escape(&area.city),
            escape(&area.state)
        );
        for venue in &area.venues {
            let _ = writeln!(
                body,
                r#"<li><a href="/venues/{}"><h5>{}</h5></a><span class="shows">{} shows, {} upcoming</span></li>"#,
                venue.id,
                escape(&venue.name),
                venue.num_shows,
                venue.num_upcoming_shows,
            );
        }
        body.push_str("</ul>\n");
    }
    if areas.is_empty() {
        body.push_str("<p>No venues listed yet.</p>");
    }

    layout("Venues", None, &body)
}

pub fn detail(venue: &Venue, shows: &ShowSplit, flash: Option<&Flash>) -> Html<String> {
    let seeking = match (venue.seeking_talent, &venue.seeking_description) {
        (true, Some(description)) => format!(
            r#"<div class="seeking"><p class="lead">Currently seeking talent</p><p>{}</p></div>"#,
            escape(description)
        ),
        (true, None) => r#"<div class="seeking"><p class="lead">Currently seeking talent</p></div>"#.to_string(),
        (false, _) => r#"<p class="not-seeking">Not currently seeking talent</p>"#.to_string(),
    };

    let body = format!(
        r#"<div class="row">
<div class="col">
<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{address}</p>
<p>{city}, {state}</p>
<p>{phone}</p>
{website}{facebook}{seeking}
<a class="btn" href="/venues/{id}/edit">Edit</a>
{delete}
</div>
<div class="col"><img src="{image}" alt="Venue Image"></div>
</div>
{shows}"#,
        name = escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(&venue.phone),
        website = optional_link("Website", venue.website_link.as_deref()),
        facebook = optional_link("Facebook", venue.facebook_link.as_deref()),
        image = escape(&venue.image_link),
        delete = delete_button(&format!("/venues/{}", venue.id)),
        shows = show_sections(Entity::Artist, shows),
    );

    layout(&venue.name, flash, &body)
}

/// The create and edit forms share one body; `action` picks the target.
pub fn form(
    title: &str,
    action: &str,
    form: &VenueForm,
    errors: Option<&ValidationErrors>,
    flash: Option<&Flash>,
) -> Html<String> {
    let mut fields = String::new();
    fields.push_str(&text_input("name", "Name", &form.name, errors));
    fields.push_str(&text_input("city", "City", &form.city, errors));
    fields.push_str(&select(
        "state",
        "State",
        STATES,
        std::slice::from_ref(&form.state),
        false,
        errors,
    ));
    fields.push_str(&text_input("address", "Address", &form.address, errors));
    fields.push_str(&text_input("phone", "Phone", &form.phone, errors));
    fields.push_str(&select("genres", "Genres", GENRES, &form.genres, true, errors));
    fields.push_str(&text_input(
        "image_link",
        "Image Link",
        &form.image_link,
        errors,
    ));
    fields.push_str(&text_input(
        "facebook_link",
        "Facebook Link",
        form.facebook_link.as_deref().unwrap_or_default(),
        errors,
    ));
    fields.push_str(&text_input(
        "website_link",
        "Website Link",
        form.website_link.as_deref().unwrap_or_default(),
        errors,
    ));
    fields.push_str(&checkbox(
        "seeking_talent",
        "Looking for Talent",
        form.seeking_talent,
    ));
    fields.push_str(&text_input(
        "seeking_description",
        "Seeking Description",
        form.seeking_description.as_deref().unwrap_or_default(),
        errors,
    ));

    form_page(title, action, &fields, flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ShowEntry;
    use crate::store::venues::VenueSummary;
    use chrono::NaiveDate;

    fn hop() -> Venue {
        Venue {
            id: 1,
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: "123-123-1234".into(),
            image_link: "https://images.example.com/hop.jpg".into(),
            facebook_link: None,
            seeking_talent: true,
            seeking_description: Some("Local artists wanted".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            genres: vec!["Jazz".into(), "R&B".into()],
        }
    }

    #[test]
    fn detail_lists_shows_by_classification() {
        let when = NaiveDate::from_ymd_opt(2019, 5, 21)
            .and_then(|d| d.and_hms_opt(21, 30, 0))
            .unwrap();
        let split = ShowSplit {
            past: vec![ShowEntry {
                show_id: 1,
                counterpart_id: 4,
                counterpart_name: "Guns N Petals".into(),
                counterpart_image_link: "https://images.example.com/gnp.jpg".into(),
                start_time: when,
            }],
            upcoming: Vec::new(),
        };

        let Html(page) = detail(&hop(), &split, None);
        assert!(page.contains("<h1>The Musical Hop</h1>"));
        assert!(page.contains("R&amp;B"));
        assert!(page.contains("0 Upcoming Shows"));
        assert!(page.contains("1 Past Shows"));
        assert!(page.contains(r#"href="/artists/4""#));
        assert!(page.contains("Local artists wanted"));
        assert!(page.contains("No Facebook"));
        assert!(page.contains(r#"data-delete="/venues/1""#));
    }

    #[test]
    fn detail_shows_the_update_notice() {
        let flash = Flash::Success("Venue The Musical Hop was successfully updated!".into());
        let Html(page) = detail(&hop(), &ShowSplit::default(), Some(&flash));
        assert!(page.contains(r#"<div class="alert alert-success">Venue The Musical Hop was successfully updated!</div>"#));
    }

    #[test]
    fn list_groups_venues_under_their_area() {
        let Html(page) = list(&[Area {
            city: "San Francisco".into(),
            state: "CA".into(),
            venues: vec![VenueSummary {
                id: 1,
                name: "The Musical Hop".into(),
                num_shows: 3,
                num_upcoming_shows: 1,
            }],
        }]);
        assert!(page.contains("<h3>San Francisco, CA</h3>"));
        assert!(page.contains("3 shows, 1 upcoming"));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let Html(page) = form(
            "Edit venue",
            "/venues/1/edit",
            &VenueForm::from_venue(&hop()),
            None,
            None,
        );
        assert!(page.contains(r#"value="The Musical Hop""#));
        assert!(page.contains(r#"<option value="CA" selected>"#));
        assert!(page.contains(r#"<option value="Jazz" selected>"#));
        assert!(page.contains(r#"name="seeking_talent" value="y" checked"#));
        assert!(page.contains(r#"action="/venues/1/edit""#));
    }
}
