use std::fmt;

use sea_orm::FromQueryResult;

/// A single user vote, always within `Rating::MIN..=Rating::MAX`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    pub fn parse(raw: &str) -> Option<Self> {
        let value: i32 = raw.trim().parse().ok()?;
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ranking {
    Best,
    Worst,
}

impl Ranking {
    /// Only the literal `best` selects the top of the table.
    pub fn from_param(q: Option<&str>) -> Self {
        match q {
            Some("best") => Ranking::Best,
            _ => Ranking::Worst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ranking::Best => "Best",
            Ranking::Worst => "Worst",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchQuery {
    /// No search text submitted; only the form is shown.
    Idle,
    /// The `all` keyword: match every title.
    Everything,
    Title(String),
}

impl SearchQuery {
    pub fn from_param(q: Option<&str>) -> Self {
        match q {
            None | Some("") => SearchQuery::Idle,
            Some("all") => SearchQuery::Everything,
            Some(text) => SearchQuery::Title(text.to_string()),
        }
    }

    /// Substring to match against titles, empty for `Everything`.
    pub fn needle(&self) -> Option<&str> {
        match self {
            SearchQuery::Idle => None,
            SearchQuery::Everything => Some(""),
            SearchQuery::Title(text) => Some(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct SearchHit {
    pub id: i32,
    pub title: String,
}

#[derive(Clone, Debug)]
pub struct SearchResults {
    /// The executed statement with its bound values inlined, for display.
    pub statement: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommentOutcome {
    Added,
    Duplicate,
}
