//! Posts as the host site collection hands them to plugins.
//!
//! Front matter is kept opaque except for the two keys plugins depend on:
//! `date`, parsed at ingestion, and `pinned`, classified into a [`PinnedFlag`].

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

pub const PINNED_KEY: &str = "pinned";
pub const DATE_KEY: &str = "date";

const CALENDAR_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const JEKYLL_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// Classification of the front-matter `pinned` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinnedFlag {
    Pinned,
    Unpinned,
    #[default]
    Unspecified,
}

impl PinnedFlag {
    /// Only a literal boolean is meaningful. Strings such as `"yes"`, numbers
    /// and `null` are all treated as if the key were absent.
    pub fn from_front_matter(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Self::Pinned,
            Some(Value::Bool(false)) => Self::Unpinned,
            _ => Self::Unspecified,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Self::Pinned => 1,
            Self::Unpinned | Self::Unspecified => 0,
        }
    }

    pub fn is_pinned(self) -> bool {
        matches!(self, Self::Pinned)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPost")]
pub struct Post {
    #[serde(with = "time::serde::rfc3339")]
    date: OffsetDateTime,
    #[serde(skip)]
    pinned: PinnedFlag,
    #[serde(flatten)]
    front_matter: Map<String, Value>,
}

impl Post {
    pub fn new(date: OffsetDateTime) -> Self {
        Self {
            date,
            pinned: PinnedFlag::Unspecified,
            front_matter: Map::new(),
        }
    }

    /// Adds a front-matter field. Setting `pinned` reclassifies the post.
    ///
    /// `date` is never stored as front matter: a value [`parse_post_date`]
    /// accepts replaces the publish timestamp, anything else is dropped.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if key == DATE_KEY {
            if let Some(date) = value.as_str().and_then(|raw| parse_post_date(raw).ok()) {
                self.date = date;
            }
            return self;
        }
        if key == PINNED_KEY {
            self.pinned = PinnedFlag::from_front_matter(Some(&value));
        }
        self.front_matter.insert(key, value);
        self
    }

    pub fn date(&self) -> OffsetDateTime {
        self.date
    }

    pub fn pinned(&self) -> PinnedFlag {
        self.pinned
    }

    pub fn front_matter(&self) -> &Map<String, Value> {
        &self.front_matter
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.front_matter.get(key)
    }

    pub fn slug(&self) -> Option<&str> {
        self.field("slug").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title").and_then(Value::as_str)
    }
}

#[derive(Deserialize)]
struct RawPost {
    #[serde(deserialize_with = "deserialize_post_date")]
    date: OffsetDateTime,
    #[serde(flatten)]
    front_matter: Map<String, Value>,
}

impl From<RawPost> for Post {
    fn from(raw: RawPost) -> Self {
        let pinned = PinnedFlag::from_front_matter(raw.front_matter.get(PINNED_KEY));
        Self {
            date: raw.date,
            pinned,
            front_matter: raw.front_matter,
        }
    }
}

/// Accepts RFC 3339, Jekyll's `YYYY-MM-DD HH:MM:SS +ZZZZ`, or a bare calendar
/// date which is taken as midnight UTC.
pub fn parse_post_date(raw: &str) -> Result<OffsetDateTime, String> {
    let trimmed = raw.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(timestamp);
    }
    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, JEKYLL_DATE_FORMAT) {
        return Ok(timestamp);
    }

    Date::parse(trimmed, CALENDAR_DATE_FORMAT)
        .map(|date| date.midnight().assume_utc())
        .map_err(|err| format!("invalid post date `{trimmed}`: {err}"))
}

fn deserialize_post_date<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_post_date(&raw).map_err(de::Error::custom)
}
