use super::{escape, form_page, format_datetime, layout, text_input, DateStyle, Flash};
use crate::{forms::ShowForm, store::shows::ShowListing};
use axum::response::Html;
use std::fmt::Write;
use validator::ValidationErrors;

pub fn list(shows: &[ShowListing]) -> Html<String> {
    let mut body = String::from("<div class=\"shows\">\n");
    for show in shows {
        let _ = writeln!(
            body,
            r#"<div class="show">
<img src="{}" alt="{}">
<h4>{}</h4>
<h5><a href="/artists/{}">{}</a></h5>
<p>playing at</p>
<h5><a href="/venues/{}">{}</a></h5>
</div>"#,
            escape(&show.artist_image_link),
            escape(&show.artist_name),
            format_datetime(show.start_time, DateStyle::Medium),
            show.artist_id,
            escape(&show.artist_name),
            show.venue_id,
            escape(&show.venue_name),
        );
    }
    body.push_str("</div>");

    layout("Shows", None, &body)
}

pub fn form(
    form: &ShowForm,
    errors: Option<&ValidationErrors>,
    flash: Option<&Flash>,
) -> Html<String> {
    let mut fields = String::new();
    fields.push_str(&text_input("artist_id", "Artist ID", &form.artist_id, errors));
    fields.push_str(&text_input("venue_id", "Venue ID", &form.venue_id, errors));
    fields.push_str(&text_input(
        "start_time",
        "Start Time",
        &form.start_time,
        errors,
    ));

    form_page("List a new show", "/shows/create", &fields, flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn listing_names_both_sides() {
        let Html(page) = list(&[ShowListing {
            id: 1,
            start_time: NaiveDate::from_ymd_opt(2035, 5, 21)
                .and_then(|d| d.and_hms_opt(21, 30, 0))
                .unwrap(),
            venue_id: 1,
            venue_name: "The Musical Hop".into(),
            venue_image_link: "https://images.example.com/hop.jpg".into(),
            artist_id: 4,
            artist_name: "Guns N Petals".into(),
            artist_image_link: "https://images.example.com/gnp.jpg".into(),
        }]);
        assert!(page.contains(r#"<a href="/artists/4">Guns N Petals</a>"#));
        assert!(page.contains(r#"<a href="/venues/1">The Musical Hop</a>"#));
        assert!(page.contains("Mon 05, 21, 2035 9:30PM"));
    }
}
