use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

/// How a free-text search term filters venues or artists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Name(String),
    CityState { city: String, state: String },
}

impl SearchQuery {
    /// `"Boston, MA"` searches by city and state, anything else by name.
    ///
    /// Only the first comma splits the term, and both halves must be
    /// non-empty once trimmed.
    pub fn parse(raw: &str) -> SearchQuery {
        let term = raw.trim();
        if let Some((city, state)) = term.split_once(',') {
            let (city, state) = (city.trim(), state.trim());
            if !city.is_empty() && !state.is_empty() {
                return SearchQuery::CityState {
                    city: city.to_string(),
                    state: state.to_string(),
                };
            }
        }
        SearchQuery::Name(term.to_string())
    }
}

/// Wraps `term` for a substring `ILIKE`, escaping the pattern metacharacters.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone)]
pub struct SearchResults {
    pub term: String,
    pub query: SearchQuery,
    pub hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn count(&self) -> usize {
        self.hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_terms_search_by_name() {
        assert_eq!(SearchQuery::parse("  Hop "), SearchQuery::Name("Hop".into()));
        assert_eq!(SearchQuery::parse(""), SearchQuery::Name("".into()));
    }

    #[test]
    fn comma_terms_search_by_city_and_state() {
        assert_eq!(
            SearchQuery::parse("Boston, MA"),
            SearchQuery::CityState {
                city: "Boston".into(),
                state: "MA".into()
            }
        );
        assert_eq!(
            SearchQuery::parse("San Francisco ,CA "),
            SearchQuery::CityState {
                city: "San Francisco".into(),
                state: "CA".into()
            }
        );
    }

    #[test]
    fn only_the_first_comma_splits() {
        assert_eq!(
            SearchQuery::parse("Portland, OR, USA"),
            SearchQuery::CityState {
                city: "Portland".into(),
                state: "OR, USA".into()
            }
        );
    }

    #[test]
    fn a_blank_half_falls_back_to_name() {
        assert_eq!(SearchQuery::parse("Boston,"), SearchQuery::Name("Boston,".into()));
        assert_eq!(SearchQuery::parse(" , MA"), SearchQuery::Name(", MA".into()));
    }

    #[test]
    fn patterns_escape_like_metacharacters() {
        assert_eq!(contains_pattern("hop"), "%hop%");
        assert_eq!(contains_pattern("100%_a\\b"), "%100\\%\\_a\\\\b%");
    }
}
