use super::{
    checkbox, delete_button, escape, form_page, genre_tags, layout, optional_link, select,
    show_sections, text_input, Flash,
};
use crate::{
    forms::{ArtistForm, GENRES, STATES},
    models::{Artist, Entity},
    schedule::ShowSplit,
};
use axum::response::Html;
use std::fmt::Write;
use validator::ValidationErrors;

pub fn list(artists: &[Artist]) -> Html<String> {
    let mut body = String::from("<ul class=\"items\">\n");
    for artist in artists {
        let _ = writeln!(
            body,
            r#"<li><a href="/artists/{}"><h5>{}</h5></a></li>"#,
            artist.id,
            escape(&artist.name)
        );
    }
    body.push_str("</ul>");

    layout("Artists", None, &body)
}

pub fn detail(artist: &Artist, shows: &ShowSplit, flash: Option<&Flash>) -> Html<String> {
    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><p class="lead">Currently seeking performance venues</p><p>{}</p></div>"#,
            escape(artist.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking performance venues</p>"#.to_string()
    };

    let body = format!(
        r#"<div class="row">
<div class="col">
<h1>{name}</h1>
<p class="subtitle">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{city}, {state}</p>
<p>{phone}</p>
{website}{facebook}{seeking}
<a class="btn" href="/artists/{id}/edit">Edit</a>
{delete}
</div>
<div class="col"><img src="{image}" alt="Artist Image"></div>
</div>
{shows}"#,
        name = escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(&artist.phone),
        website = optional_link("Website", artist.website_link.as_deref()),
        facebook = optional_link("Facebook", artist.facebook_link.as_deref()),
        image = escape(&artist.image_link),
        delete = delete_button(&format!("/artists/{}", artist.id)),
        shows = show_sections(Entity::Venue, shows),
    );

    layout(&artist.name, flash, &body)
}

pub fn form(
    title: &str,
    action: &str,
    form: &ArtistForm,
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
        "seeking_venue",
        "Looking for Venues",
        form.seeking_venue,
    ));
    fields.push_str(&text_input(
        "seeking_description",
        "Seeking Description",
        form.seeking_description.as_deref().unwrap_or_default(),
        errors,
    ));

    form_page(title, action, &fields, flash)
}
