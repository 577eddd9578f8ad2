//! Loader for the authored content catalog.
//!
//! # Responsibility
//! - Read the JSON catalog produced by the content-authoring process.
//! - Reject catalogs whose ids collide inside one collection. Experiences
//!   have no ids and are kept exactly as authored.
//!
//! # Invariants
//! - Missing collections load as empty.
//! - The catalog is read-only after loading.

use crate::model::content::{Book, Channel, ContentItem, ContentKind, Game, Note};
use crate::model::experience::Experience;
use crate::model::project::Project;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    /// Same id twice in one collection (`collection` is `note`, ..., `project`).
    DuplicateId {
        collection: &'static str,
        id: String,
    },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read catalog `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed catalog: {err}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "duplicate {collection} id `{id}` in catalog")
            }
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::DuplicateId { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Every authored collection, as written by the content process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub notes: Vec<Note>,
    pub books: Vec<Book>,
    pub games: Vec<Game>,
    pub channels: Vec<Channel>,
    pub projects: Vec<Project>,
    /// Timeline entries in display order.
    pub experiences: Vec<Experience>,
}

impl Catalog {
    /// Parses and validates a catalog document.
    pub fn from_json_str(source: &str) -> CatalogResult<Self> {
        let catalog: Catalog = serde_json::from_str(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> CatalogResult<()> {
        ensure_unique("note", self.notes.iter().map(|note| note.id.as_str()))?;
        ensure_unique("book", self.books.iter().map(|book| book.id.as_str()))?;
        ensure_unique("game", self.games.iter().map(|game| game.id.as_str()))?;
        ensure_unique(
            "channel",
            self.channels.iter().map(|channel| channel.id.as_str()),
        )?;
        ensure_unique(
            "project",
            self.projects.iter().map(|project| project.id.as_str()),
        )
    }

    /// Number of records in one journal collection.
    pub fn len_of(&self, kind: ContentKind) -> usize {
        match kind {
            ContentKind::Note => self.notes.len(),
            ContentKind::Book => self.books.len(),
            ContentKind::Game => self.games.len(),
            ContentKind::Channel => self.channels.len(),
        }
    }

    /// Looks up one journal item by collection and id.
    pub fn find_item(&self, kind: ContentKind, id: &str) -> Option<ContentItem> {
        match kind {
            ContentKind::Note => self
                .notes
                .iter()
                .find(|note| note.id == id)
                .cloned()
                .map(ContentItem::Note),
            ContentKind::Book => self
                .books
                .iter()
                .find(|book| book.id == id)
                .cloned()
                .map(ContentItem::Book),
            ContentKind::Game => self
                .games
                .iter()
                .find(|game| game.id == id)
                .cloned()
                .map(ContentItem::Game),
            ContentKind::Channel => self
                .channels
                .iter()
                .find(|channel| channel.id == id)
                .cloned()
                .map(ContentItem::Channel),
        }
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }
}

/// Reads and validates the catalog file at `path`.
pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json_str(&source)?;

    info!(
        "event=catalog_load module=repo status=ok notes={} books={} games={} channels={} projects={} experiences={}",
        catalog.notes.len(),
        catalog.books.len(),
        catalog.games.len(),
        catalog.channels.len(),
        catalog.projects.len(),
        catalog.experiences.len()
    );
    Ok(catalog)
}

fn ensure_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> CatalogResult<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
