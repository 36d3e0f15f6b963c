//! HTML rendering. Every view is a pure function of its arguments and
//! escapes whatever it interpolates.

pub mod artists;
pub mod shows;
pub mod venues;

use crate::{
    models::{Artist, Entity, Venue},
    schedule::{ShowEntry, ShowSplit},
    search::{SearchQuery, SearchResults},
};
use axum::{http::StatusCode, response::Html};
use chrono::NaiveDateTime;
use std::fmt::Write;
use validator::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, Copy)]
pub enum DateStyle {
    Full,
    Medium,
}

pub fn format_datetime(value: NaiveDateTime, style: DateStyle) -> String {
    match style {
        DateStyle::Full => value.format("%A %B, %-d, %Y at %-I:%M%p"),
        DateStyle::Medium => value.format("%a %m, %d, %Y %-I:%M%p"),
    }
    .to_string()
}

pub fn layout(title: &str, flash: Option<&Flash>, body: &str) -> Html<String> {
    let flash = match flash {
        Some(Flash::Success(msg)) => {
            format!(r#"<div class="alert alert-success">{}</div>"#, escape(msg))
        }
        Some(Flash::Error(msg)) => {
            format!(r#"<div class="alert alert-danger">{}</div>"#, escape(msg))
        }
        None => String::new(),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
    <nav class="navbar">
        <a class="brand" href="/">🔥 Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <form class="search" method="post" action="/venues/search">
            <input class="form-control" type="search" name="search_term" placeholder="Find a venue" aria-label="Search">
        </form>
        <form class="search" method="post" action="/artists/search">
            <input class="form-control" type="search" name="search_term" placeholder="Find an artist" aria-label="Search">
        </form>
    </nav>
    <main class="container">
        {flash}
        {body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

pub fn error_page(code: StatusCode, message: &str) -> Html<String> {
    let heading = code.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        None,
        &format!(
            r#"<h1>{} {}</h1>
<p class="lead">{}</p>
<a href="/">Back home</a>"#,
            code.as_u16(),
            escape(heading),
            escape(message)
        ),
    )
}

pub fn home(artists: &[Artist], venues: &[Venue], flash: Option<&Flash>) -> Html<String> {
    let mut body = String::from("<h1>Fyyur</h1>\n<section>\n<h2>Recently listed artists</h2>\n<ul>\n");
    for artist in artists {
        let _ = writeln!(
            body,
            r#"<li><a href="/artists/{}">{}</a></li>"#,
            artist.id,
            escape(&artist.name)
        );
    }
    body.push_str("</ul>\n</section>\n<section>\n<h2>Recently listed venues</h2>\n<ul>\n");
    for venue in venues {
        let _ = writeln!(
            body,
            r#"<li><a href="/venues/{}">{}</a></li>"#,
            venue.id,
            escape(&venue.name)
        );
    }
    body.push_str("</ul>\n</section>");

    layout("Home", flash, &body)
}

pub fn search_results(entity: Entity, results: &SearchResults) -> Html<String> {
    let mut body = format!(
        "<h3>Number of search results for &quot;{}&quot;: {}</h3>\n",
        escape(&results.term),
        results.count()
    );
    if let SearchQuery::CityState { city, state } = &results.query {
        let _ = writeln!(
            body,
            r#"<p class="search-area">City: {} &middot; State: {}</p>"#,
            escape(city),
            escape(state)
        );
    }
    body.push_str("<ul class=\"items\">\n");
    for hit in &results.hits {
        let _ = writeln!(
            body,
            r#"<li><a href="/{entity}s/{}"><h5>{}</h5><span class="upcoming">{} upcoming shows</span></a></li>"#,
            hit.id,
            escape(&hit.name),
            hit.num_upcoming_shows,
        );
    }
    body.push_str("</ul>");

    layout("Search", None, &body)
}

/// Past or upcoming shows seen from one side; `counterpart` names the other side.
fn show_entries(heading: &str, counterpart: Entity, entries: &[ShowEntry]) -> String {
    let mut html = format!("<section>\n<h2>{} {heading}</h2>\n<ul class=\"shows\">\n", entries.len());
    for entry in entries {
        let _ = writeln!(
            html,
            r#"<li class="show"><a href="/{counterpart}s/{}"><img src="{}" alt="{}"><h5>{}</h5></a><h6>{}</h6></li>"#,
            entry.counterpart_id,
            escape(&entry.counterpart_image_link),
            escape(&entry.counterpart_name),
            escape(&entry.counterpart_name),
            format_datetime(entry.start_time, DateStyle::Full),
        );
    }
    html.push_str("</ul>\n</section>\n");
    html
}

pub(crate) fn show_sections(counterpart: Entity, split: &ShowSplit) -> String {
    let mut html = show_entries("Upcoming Shows", counterpart, &split.upcoming);
    html.push_str(&show_entries("Past Shows", counterpart, &split.past));
    html
}

pub(crate) fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, escape(g)))
        .collect::<Vec<_>>()
        .join("")
}

pub(crate) fn optional_link(label: &str, link: Option<&str>) -> String {
    match link {
        Some(link) => format!(
            r#"<p><a href="{}" target="_blank">{}</a></p>"#,
            escape(link),
            escape(label)
        ),
        None => format!(r#"<p class="subtitle">No {}</p>"#, escape(label)),
    }
}

/// Browsers cannot submit a DELETE from a form, so the button issues it and
/// follows the redirect to pick up the deletion notice.
pub(crate) fn delete_button(path: &str) -> String {
    format!(
        r#"<button class="btn btn-danger" data-delete="{}">Delete</button>
<script>
document.querySelectorAll("[data-delete]").forEach(function (button) {{
    button.onclick = function () {{
        fetch(button.dataset.delete, {{ method: "DELETE" }}).then(function (response) {{
            window.location.href = response.redirected ? response.url : "/";
        }});
    }};
}});
</script>"#,
        escape(path)
    )
}

fn field_errors(errors: Option<&ValidationErrors>, field: &str) -> String {
    let Some(errors) = errors else {
        return String::new();
    };
    let fields = errors.field_errors();
    let Some(list) = fields.get(field) else {
        return String::new();
    };
    list.iter()
        .map(|e| {
            let message = e
                .message
                .as_deref()
                .map(str::to_string)
                .unwrap_or_else(|| format!("invalid {field}"));
            format!(r#"<span class="field-error">{}</span>"#, escape(&message))
        })
        .collect()
}

pub(crate) fn text_input(
    name: &str,
    label: &str,
    value: &str,
    errors: Option<&ValidationErrors>,
) -> String {
    format!(
        r#"<div class="form-group"><label for="{name}">{label}</label><input class="form-control" type="text" id="{name}" name="{name}" value="{}">{}</div>
"#,
        escape(value),
        field_errors(errors, name),
    )
}

pub(crate) fn select(
    name: &str,
    label: &str,
    options: &[&str],
    selected: &[String],
    multiple: bool,
    errors: Option<&ValidationErrors>,
) -> String {
    let mut html = format!(
        r#"<div class="form-group"><label for="{name}">{label}</label><select class="form-control" id="{name}" name="{name}"{}>"#,
        if multiple { " multiple" } else { "" }
    );
    for option in options {
        let _ = write!(
            html,
            r#"<option value="{0}"{1}>{0}</option>"#,
            escape(option),
            if selected.iter().any(|s| s == option) {
                " selected"
            } else {
                ""
            }
        );
    }
    let _ = writeln!(html, "</select>{}</div>", field_errors(errors, name));
    html
}

pub(crate) fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="form-check"><input type="checkbox" id="{name}" name="{name}" value="y"{}><label for="{name}">{label}</label></div>
"#,
        if checked { " checked" } else { "" }
    )
}

pub(crate) fn form_page(
    title: &str,
    action: &str,
    fields: &str,
    flash: Option<&Flash>,
) -> Html<String> {
    layout(
        title,
        flash,
        &format!(
            r#"<h3>{}</h3>
<form method="post" action="{}" class="form">
{fields}<input type="submit" value="{}" class="btn btn-primary">
</form>"#,
            escape(title),
            escape(action),
            escape(title),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchHit;
    use chrono::NaiveDate;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn formats_both_date_styles() {
        let when = NaiveDate::from_ymd_opt(2035, 5, 21)
            .and_then(|d| d.and_hms_opt(21, 30, 0))
            .unwrap();
        assert_eq!(
            format_datetime(when, DateStyle::Full),
            "Monday May, 21, 2035 at 9:30PM"
        );
        assert_eq!(format_datetime(when, DateStyle::Medium), "Mon 05, 21, 2035 9:30PM");
    }

    #[test]
    fn search_results_show_count_and_area() {
        let results = SearchResults {
            term: "San Francisco, CA".into(),
            query: SearchQuery::parse("San Francisco, CA"),
            hits: vec![SearchHit {
                id: 1,
                name: "The Musical Hop".into(),
                num_upcoming_shows: 2,
            }],
        };
        let Html(page) = search_results(Entity::Venue, &results);
        assert!(page.contains("&quot;San Francisco, CA&quot;: 1"));
        assert!(page.contains("City: San Francisco"));
        assert!(page.contains(r#"href="/venues/1""#));
        assert!(page.contains("2 upcoming shows"));
    }

    #[test]
    fn error_pages_name_the_status() {
        let Html(page) = error_page(StatusCode::NOT_FOUND, "the venue 9 does not exist");
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("the venue 9 does not exist"));
    }

    #[test]
    fn selects_mark_chosen_options() {
        let html = select(
            "genres",
            "Genres",
            &["Jazz", "Soul"],
            &["Soul".to_string()],
            true,
            None,
        );
        assert!(html.contains("multiple"));
        assert!(html.contains(r#"<option value="Soul" selected>"#));
        assert!(html.contains(r#"<option value="Jazz">"#));
    }
}
