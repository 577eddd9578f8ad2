//! View-state core of the Folio portfolio site.
//! This crate is the single source of truth for theme, journal and
//! selection invariants; UI shells only render what it returns.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ConfigOverrides, FolioConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::content::{
    Book, Channel, ContentItem, ContentKind, Game, Note, PlayStatus, ReadingStatus,
};
pub use model::experience::Experience;
pub use model::project::Project;
pub use model::theme::{Theme, ThemeIcon};
pub use repo::catalog_repo::{load_catalog, Catalog, CatalogError};
pub use repo::preference_repo::{
    InMemoryPreferenceRepository, PreferenceError, PreferenceRepository, PreferenceResult,
    SqlitePreferenceRepository,
};
pub use service::journal_service::{
    filter_and_sort, item_action, markdown_to_plain_text, Category, FilterParseError,
    ItemAction, SortOrder,
};
pub use service::selection::{
    BodyOverflow, Lightbox, LightboxKey, Overflow, ScrollLock, ScrollSurface, Selectable,
    Selection, SelectionState,
};
pub use service::theme_service::{RootClassList, StyleSurface, SubscriptionId, ThemeStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
