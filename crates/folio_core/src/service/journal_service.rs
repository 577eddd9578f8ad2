//! Journal filter/sort engine.
//!
//! # Responsibility
//! - Pick the collection(s) behind a category tab and order them by date.
//! - Decide what a click on a journal card does.
//! - Flatten Markdown takes into plain text for text-only shells.
//!
//! # Invariants
//! - Results are recomputed on every call and depend only on the inputs.
//! - Ordering is stable: equal dates keep catalog order.
//! - Items whose date does not parse come after all dated items, in catalog
//!   order, for both sort directions.

use crate::model::content::{ContentItem, ContentKind};
use crate::repo::catalog_repo::Catalog;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(?:#{1,6}|>)[ \t]*|[*`~]+").expect("valid symbol regex"));
static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n+").expect("valid blank line regex"));

/// Journal tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    All,
    Engineering,
    Library,
    Gaming,
    Media,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::All,
        Self::Engineering,
        Self::Library,
        Self::Gaming,
        Self::Media,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Engineering => "engineering",
            Self::Library => "library",
            Self::Gaming => "gaming",
            Self::Media => "media",
        }
    }

    /// The single collection behind this tab; `None` for `All`.
    pub fn collection(self) -> Option<ContentKind> {
        match self {
            Self::All => None,
            Self::Engineering => Some(ContentKind::Note),
            Self::Library => Some(ContentKind::Book),
            Self::Gaming => Some(ContentKind::Game),
            Self::Media => Some(ContentKind::Channel),
        }
    }
}

/// Date direction of the journal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }

    /// The sort button flips between the two directions.
    pub fn toggled(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::Newest,
        }
    }
}

/// Unrecognized category or sort name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParseError {
    pub expected: &'static str,
    pub found: String,
}

impl Display for FilterParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown value `{}`; expected {}", self.found, self.expected)
    }
}

impl Error for FilterParseError {}

impl FromStr for Category {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == wanted)
            .ok_or_else(|| FilterParseError {
                expected: "all|engineering|library|gaming|media",
                found: value.to_string(),
            })
    }
}

impl FromStr for SortOrder {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            _ => Err(FilterParseError {
                expected: "newest|oldest",
                found: value.to_string(),
            }),
        }
    }
}

/// What a click on a journal card should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// Open the in-page detail view (notes with takes only).
    OpenDetail,
    /// Open the item's link in a new tab.
    OpenLink(String),
    Nothing,
}

/// Items for `category`, ordered by date in `order`.
pub fn filter_and_sort(catalog: &Catalog, category: Category, order: SortOrder) -> Vec<ContentItem> {
    let mut keyed: Vec<(Option<i64>, ContentItem)> = select_items(catalog, category)
        .into_iter()
        .map(|item| {
            let timestamp = item.timestamp();
            if timestamp.is_none() {
                warn!(
                    "event=journal_sort module=journal status=unparsed_date key={} date={}",
                    item.key(),
                    item.sort_date()
                );
            }
            (timestamp, item)
        })
        .collect();

    keyed.sort_by(|(left, _), (right, _)| compare_timestamps(*left, *right, order));

    debug!(
        "event=journal_filter module=journal status=ok category={} order={} count={}",
        category.as_str(),
        order.as_str(),
        keyed.len()
    );
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Action for a click on `item`.
///
/// Only notes with takes have a detail view; everything else follows its
/// `link`, if any.
pub fn item_action(item: &ContentItem) -> ItemAction {
    match item {
        ContentItem::Note(note) if note.takes.is_some() => ItemAction::OpenDetail,
        _ => item
            .link()
            .filter(|link| !link.trim().is_empty())
            .map_or(ItemAction::Nothing, |link| ItemAction::OpenLink(link.to_string())),
    }
}

/// Plain-text rendition of Markdown takes for terminals and previews.
///
/// Heading, quote, emphasis and code markers are dropped, links keep their text,
/// and runs of blank lines collapse into one paragraph break.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let without_links = MARKDOWN_LINK_RE.replace_all(markdown, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, "");
    let paragraphs = BLANK_LINES_RE.replace_all(&without_symbols, "\n\n");
    paragraphs
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn select_items(catalog: &Catalog, category: Category) -> Vec<ContentItem> {
    let notes = || catalog.notes.iter().cloned().map(ContentItem::Note);
    let books = || catalog.books.iter().cloned().map(ContentItem::Book);
    let games = || catalog.games.iter().cloned().map(ContentItem::Game);
    let channels = || catalog.channels.iter().cloned().map(ContentItem::Channel);

    match category.collection() {
        None => notes().chain(books()).chain(games()).chain(channels()).collect(),
        Some(ContentKind::Note) => notes().collect(),
        Some(ContentKind::Book) => books().collect(),
        Some(ContentKind::Game) => games().collect(),
        Some(ContentKind::Channel) => channels().collect(),
    }
}

fn compare_timestamps(left: Option<i64>, right: Option<i64>, order: SortOrder) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => match order {
            SortOrder::Newest => right.cmp(&left),
            SortOrder::Oldest => left.cmp(&right),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
