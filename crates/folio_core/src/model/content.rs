//! Journal content records.
//!
//! # Responsibility
//! - Mirror the four authored collections (notes, books, games, channels).
//! - Join them into one tagged `ContentItem` for the merged journal grid.
//!
//! # Invariants
//! - `id` is unique inside its own collection only; `ContentItem::key()`
//!   is unique across collections.
//! - Notes sort by `iso_date`; every other kind sorts by `date`.

use crate::model::date::sort_timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Engineering note with long-form Markdown commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Display date, e.g. `Nov 2025`.
    pub date: String,
    /// Sortable date, e.g. `2025-11-29`.
    pub iso_date: String,
    pub read_time: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
    /// Markdown body shown in the detail view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub takes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingStatus {
    Reading,
    Read,
    #[serde(rename = "Want to Read")]
    WantToRead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayStatus {
    Playing,
    Completed,
    Backlog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub status: PlayStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub date: String,
}

/// Followed video channel. Unlike the other kinds the link is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub link: String,
    /// "Subscribed since" or latest video date.
    pub date: String,
}

/// Discriminant of `ContentItem`, also the collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Note,
    Book,
    Game,
    Channel,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [Self::Note, Self::Book, Self::Game, Self::Channel];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Book => "book",
            Self::Game => "game",
            Self::Channel => "channel",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim().to_ascii_lowercase())
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the merged journal grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentItem {
    Note(Note),
    Book(Book),
    Game(Game),
    Channel(Channel),
}

impl ContentItem {
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Note(_) => ContentKind::Note,
            Self::Book(_) => ContentKind::Book,
            Self::Game(_) => ContentKind::Game,
            Self::Channel(_) => ContentKind::Channel,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Note(note) => &note.id,
            Self::Book(book) => &book.id,
            Self::Game(game) => &game.id,
            Self::Channel(channel) => &channel.id,
        }
    }

    /// Cross-collection key, `"{kind}-{id}"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.kind(), self.id())
    }

    /// Card heading: title for notes/books/games, name for channels.
    pub fn title(&self) -> &str {
        match self {
            Self::Note(note) => &note.title,
            Self::Book(book) => &book.title,
            Self::Game(game) => &game.title,
            Self::Channel(channel) => &channel.name,
        }
    }

    /// Card subheading.
    pub fn subtitle(&self) -> &str {
        match self {
            Self::Note(note) => &note.read_time,
            Self::Book(book) => &book.author,
            Self::Game(game) => &game.platform,
            Self::Channel(channel) => &channel.topic,
        }
    }

    /// The raw date string used for ordering.
    pub fn sort_date(&self) -> &str {
        match self {
            Self::Note(note) => &note.iso_date,
            Self::Book(book) => &book.date,
            Self::Game(game) => &game.date,
            Self::Channel(channel) => &channel.date,
        }
    }

    /// Epoch milliseconds of `sort_date()`, `None` when unparseable.
    pub fn timestamp(&self) -> Option<i64> {
        sort_timestamp(self.sort_date())
    }

    /// Click-through link, if the record has one. A note's `external_link`
    /// is a citation shown in its detail view, not a click target.
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Note(note) => note.link.as_deref(),
            Self::Book(book) => book.link.as_deref(),
            Self::Game(game) => game.link.as_deref(),
            Self::Channel(channel) => Some(channel.link.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Channel, ContentItem, ContentKind, Note};

    fn note(id: &str, iso_date: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("note {id}"),
            date: "Nov 2025".to_string(),
            iso_date: iso_date.to_string(),
            read_time: "5 min read".to_string(),
            summary: String::new(),
            tags: Vec::new(),
            link: None,
            external_link: None,
            takes: None,
        }
    }

    #[test]
    fn note_sorts_by_iso_date_not_display_date() {
        let item = ContentItem::Note(note("1", "2025-11-29"));
        assert_eq!(item.sort_date(), "2025-11-29");
        assert!(item.timestamp().is_some());
    }

    #[test]
    fn keys_disambiguate_collections() {
        let from_notes = ContentItem::Note(note("1", "2025-11-29"));
        let from_channels = ContentItem::Channel(Channel {
            id: "1".to_string(),
            name: "Stuff Made Here".to_string(),
            topic: "Engineering & Fabrication".to_string(),
            avatar_url: None,
            link: "https://www.youtube.com/@StuffMadeHere".to_string(),
            date: "2025-09-15".to_string(),
        });
        assert_eq!(from_notes.id(), from_channels.id());
        assert_ne!(from_notes.key(), from_channels.key());
        assert_eq!(from_channels.key(), "channel-1");
    }

    #[test]
    fn items_serialize_with_kind_tag_and_camel_case_fields() {
        let json = serde_json::to_value(ContentItem::Note(note("7", "2025-09-10"))).unwrap();
        assert_eq!(json["kind"], "note");
        assert_eq!(json["isoDate"], "2025-09-10");
        assert_eq!(json["readTime"], "5 min read");
        assert!(json.get("abstract").is_some());
    }

    #[test]
    fn kind_parse_is_case_insensitive() {
        assert_eq!(ContentKind::parse("Book"), Some(ContentKind::Book));
        assert_eq!(ContentKind::parse("podcast"), None);
    }
}
