use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Genre vocabulary offered by the category dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    History,
    Horror,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Sports,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Every selectable genre, in display order
    pub const ALL: [Genre; 18] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::History,
        Genre::Horror,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Sports,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::History => "History",
            Genre::Horror => "Horror",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Sports => "Sports",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Range labels offered alongside single years
pub const YEAR_RANGE_LABELS: [&str; 2] = ["2000-2009", "1980-1999"];

/// A year filter: a single release year or one of the predefined range labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum YearTag {
    Year(u16),
    Range(&'static str),
}

// Deserialize cannot be derived with `try_from = "String"` here: serde's
// implicit borrow for the `&'static str` payload restricts the derived impl
// to `'de: 'static`. This impl is what that derive would otherwise expand to.
impl<'de> Deserialize<'de> for YearTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        YearTag::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl YearTag {
    /// Every selectable year tag, in display order
    pub const ALL: [YearTag; 18] = [
        YearTag::Year(2025),
        YearTag::Year(2024),
        YearTag::Year(2023),
        YearTag::Year(2022),
        YearTag::Year(2021),
        YearTag::Year(2020),
        YearTag::Year(2019),
        YearTag::Year(2018),
        YearTag::Year(2017),
        YearTag::Year(2016),
        YearTag::Year(2015),
        YearTag::Year(2014),
        YearTag::Year(2013),
        YearTag::Year(2012),
        YearTag::Year(2011),
        YearTag::Year(2010),
        YearTag::Range(YEAR_RANGE_LABELS[0]),
        YearTag::Range(YEAR_RANGE_LABELS[1]),
    ];
}

impl Display for YearTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YearTag::Year(year) => write!(f, "{}", year),
            YearTag::Range(label) => write!(f, "{}", label),
        }
    }
}

impl TryFrom<String> for YearTag {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if let Some(&label) = YEAR_RANGE_LABELS.iter().find(|&&label| label == trimmed) {
            return Ok(YearTag::Range(label));
        }
        if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            let year = trimmed.parse::<u16>().map_err(|e| e.to_string())?;
            return Ok(YearTag::Year(year));
        }
        Err(format!("unrecognized year tag: {}", value))
    }
}

impl From<YearTag> for String {
    fn from(tag: YearTag) -> Self {
        tag.to_string()
    }
}

/// The active genre and year selections, kept in click order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub genres: Vec<Genre>,
    pub years: Vec<YearTag>,
}

impl FilterSelection {
    /// Creates an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the genre if absent, removes it if already selected
    pub fn toggle_genre(&mut self, genre: Genre) {
        if let Some(pos) = self.genres.iter().position(|g| *g == genre) {
            self.genres.remove(pos);
        } else {
            self.genres.push(genre);
        }
    }

    /// Adds the year tag if absent, removes it if already selected
    pub fn toggle_year(&mut self, tag: YearTag) {
        if let Some(pos) = self.years.iter().position(|t| *t == tag) {
            self.years.remove(pos);
        } else {
            self.years.push(tag);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.years.is_empty()
    }

    pub fn clear(&mut self) {
        self.genres.clear();
        self.years.clear();
    }

    /// Derives the natural-language preference line from the current selections
    pub fn derive_preference(&self) -> String {
        let genres = self
            .genres
            .iter()
            .map(Genre::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let years = self
            .years
            .iter()
            .map(|tag| tag.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        match (self.genres.is_empty(), self.years.is_empty()) {
            (false, false) => format!("{} movies from {}", genres, years),
            (false, true) => format!("{} movies", genres),
            (true, false) => format!("Movies from {}", years),
            (true, true) => String::new(),
        }
    }
}

/// How the preference line was last produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceOrigin {
    /// Recomputed from the tag selection
    Derived,
    /// Typed or edited directly by the user
    Manual,
}

/// The preference line sent to the model, with its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceText {
    pub text: String,
    pub origin: PreferenceOrigin,
}

impl Default for PreferenceText {
    fn default() -> Self {
        Self::derived(String::new())
    }
}

impl PreferenceText {
    pub fn derived(text: String) -> Self {
        Self {
            text,
            origin: PreferenceOrigin::Derived,
        }
    }

    pub fn manual(text: String) -> Self {
        Self {
            text,
            origin: PreferenceOrigin::Manual,
        }
    }

    /// True when the text is empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
