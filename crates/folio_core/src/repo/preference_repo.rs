//! Key/value preference storage.
//!
//! # Responsibility
//! - Persist small string preferences (`theme`, legacy keys) across runs.
//! - Offer an in-memory implementation with identical semantics.
//!
//! # Invariants
//! - Keys are non-empty.
//! - `set` overwrites; `remove` of a missing key is not an error.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[derive(Debug)]
pub enum PreferenceError {
    Db(DbError),
    InvalidKey(String),
}

impl Display for PreferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid preference key `{key}`"),
        }
    }
}

impl Error for PreferenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) => None,
        }
    }
}

impl From<DbError> for PreferenceError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PreferenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string preferences, the local-storage equivalent.
pub trait PreferenceRepository {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PreferenceResult<()>;
    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> PreferenceResult<bool>;
}

/// SQLite-backed preferences over a migrated connection.
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        check_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        check_key(key)?;
        self.conn.execute(
            "INSERT INTO preferences (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        debug!("event=preference_set module=repo status=ok key={key}");
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<bool> {
        check_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM preferences WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local preferences; nothing survives the value.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceRepository {
    values: RefCell<BTreeMap<String, String>>,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds entries, e.g. to emulate storage written by an older build.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            values: RefCell::new(values),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }
}

impl PreferenceRepository for InMemoryPreferenceRepository {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        check_key(key)?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        check_key(key)?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PreferenceResult<bool> {
        check_key(key)?;
        Ok(self.values.borrow_mut().remove(key).is_some())
    }
}

impl<R: PreferenceRepository + ?Sized> PreferenceRepository for &R {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> PreferenceResult<bool> {
        (**self).remove(key)
    }
}

fn check_key(key: &str) -> PreferenceResult<()> {
    if key.trim().is_empty() {
        return Err(PreferenceError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPreferenceRepository, PreferenceError, PreferenceRepository};

    #[test]
    fn in_memory_set_get_remove() {
        let repo = InMemoryPreferenceRepository::new();
        assert_eq!(repo.get("theme").unwrap(), None);

        repo.set("theme", "light").unwrap();
        repo.set("theme", "dark").unwrap();
        assert_eq!(repo.get("theme").unwrap().as_deref(), Some("dark"));

        assert!(repo.remove("theme").unwrap());
        assert!(!repo.remove("theme").unwrap());
    }

    #[test]
    fn blank_key_is_rejected() {
        let repo = InMemoryPreferenceRepository::new();
        let err = repo.set("  ", "dark").unwrap_err();
        assert!(matches!(err, PreferenceError::InvalidKey(_)));
    }
}
