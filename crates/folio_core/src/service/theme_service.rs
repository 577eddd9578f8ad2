//! Theme controller.
//!
//! # Responsibility
//! - Own the process-wide light/dark preference behind one store.
//! - Persist changes, restyle the page root, and notify subscribers.
//! - Fold the legacy two-key layout into the canonical `theme` key.
//!
//! # Invariants
//! - Exactly one theme is current; it is `Dark` when nothing valid is stored.
//! - Persistence happens before the surface or any subscriber sees a change.
//! - The toggle icon is derived from the theme and never stored.

use crate::model::theme::Theme;
use crate::repo::preference_repo::{PreferenceRepository, PreferenceResult};
use log::{info, warn};
use std::cell::RefCell;
use std::collections::BTreeSet;

/// Canonical preference key.
pub const THEME_KEY: &str = "theme";
/// Theme key written by the earliest site iteration.
pub const LEGACY_THEME_KEY: &str = "selected-theme";
/// Icon class key written next to `LEGACY_THEME_KEY`; derivable, so dropped.
pub const LEGACY_ICON_KEY: &str = "selected-icon";
/// Class toggled on the styling root for the dark palette.
pub const DARK_CLASS: &str = "dark";

/// The styling layer's root element.
pub trait StyleSurface {
    fn apply_theme(&self, theme: Theme);
}

/// Class list of the document root; carries `dark` while the dark theme is on.
#[derive(Debug, Default)]
pub struct RootClassList {
    classes: RefCell<BTreeSet<String>>,
}

impl RootClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }
}

impl StyleSurface for RootClassList {
    fn apply_theme(&self, theme: Theme) {
        let mut classes = self.classes.borrow_mut();
        if theme.is_dark() {
            classes.insert(DARK_CLASS.to_string());
        } else {
            classes.remove(DARK_CLASS);
        }
    }
}

impl<S: StyleSurface + ?Sized> StyleSurface for &S {
    fn apply_theme(&self, theme: Theme) {
        (**self).apply_theme(theme);
    }
}

/// Handle returned by `ThemeStore::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Theme)>;

/// Single owner of the display theme.
pub struct ThemeStore<R: PreferenceRepository, S: StyleSurface> {
    repo: R,
    surface: S,
    current: Theme,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<R: PreferenceRepository, S: StyleSurface> ThemeStore<R, S> {
    /// Reads the stored preference once and applies it to `surface`.
    ///
    /// Storage problems are logged and fall back to `Theme::Dark`.
    pub fn load(repo: R, surface: S) -> Self {
        migrate_legacy_keys(&repo);
        let current = read_persisted_theme(&repo);
        surface.apply_theme(current);
        info!("event=theme_load module=theme status=ok theme={current}");

        Self {
            repo,
            surface,
            current,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn get_theme(&self) -> Theme {
        self.current
    }

    /// Persists `theme`, restyles the surface and notifies subscribers.
    ///
    /// # Errors
    /// Storage failures; the current theme is left unchanged in that case.
    pub fn set_theme(&mut self, theme: Theme) -> PreferenceResult<()> {
        self.repo.set(THEME_KEY, theme.as_str())?;
        self.current = theme;
        self.surface.apply_theme(theme);
        for (_, listener) in &mut self.listeners {
            listener(theme);
        }
        info!("event=theme_set module=theme status=ok theme={theme}");
        Ok(())
    }

    /// Flips the theme and returns the new value.
    pub fn toggle_theme(&mut self) -> PreferenceResult<Theme> {
        let next = self.current.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Registers a listener called after every successful `set_theme`.
    pub fn subscribe(&mut self, listener: impl FnMut(Theme) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether `id` was still registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Reads the stored theme without touching the store.
///
/// Absent, unreadable or unrecognized values all yield `Theme::Dark`.
pub fn read_persisted_theme(repo: &impl PreferenceRepository) -> Theme {
    match repo.get(THEME_KEY) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
            warn!("event=theme_read module=theme status=invalid value={value}");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(err) => {
            warn!("event=theme_read module=theme status=error error={err}");
            Theme::default()
        }
    }
}

fn migrate_legacy_keys(repo: &impl PreferenceRepository) {
    if let Err(err) = try_migrate_legacy_keys(repo) {
        warn!("event=theme_migrate module=theme status=error error={err}");
    }
}

fn try_migrate_legacy_keys(repo: &impl PreferenceRepository) -> PreferenceResult<()> {
    let Some(legacy) = repo.get(LEGACY_THEME_KEY)? else {
        return Ok(());
    };

    if repo.get(THEME_KEY)?.is_none() {
        if let Some(theme) = Theme::parse(&legacy) {
            repo.set(THEME_KEY, theme.as_str())?;
            info!("event=theme_migrate module=theme status=ok theme={theme}");
        }
    }
    repo.remove(LEGACY_THEME_KEY)?;
    repo.remove(LEGACY_ICON_KEY)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{RootClassList, ThemeStore, DARK_CLASS, LEGACY_ICON_KEY, THEME_KEY};
    use crate::model::theme::Theme;
    use crate::repo::preference_repo::{
        InMemoryPreferenceRepository, PreferenceError, PreferenceRepository, PreferenceResult,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Storage that is always busy.
    struct BusyPreferences;

    fn busy() -> PreferenceError {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY), None)
            .into()
    }

    impl PreferenceRepository for BusyPreferences {
        fn get(&self, _key: &str) -> PreferenceResult<Option<String>> {
            Err(busy())
        }

        fn set(&self, _key: &str, _value: &str) -> PreferenceResult<()> {
            Err(busy())
        }

        fn remove(&self, _key: &str) -> PreferenceResult<bool> {
            Err(busy())
        }
    }

    /// In-memory storage that counts mutations.
    #[derive(Default)]
    struct CountingPreferences {
        inner: InMemoryPreferenceRepository,
        writes: Cell<u32>,
    }

    impl PreferenceRepository for CountingPreferences {
        fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
            self.writes.set(self.writes.get() + 1);
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> PreferenceResult<bool> {
            self.writes.set(self.writes.get() + 1);
            self.inner.remove(key)
        }
    }

    #[test]
    fn empty_storage_loads_dark_and_marks_root() {
        let repo = InMemoryPreferenceRepository::new();
        let store = ThemeStore::load(&repo, RootClassList::new());

        assert_eq!(store.get_theme(), Theme::Dark);
        assert!(store.surface().contains(DARK_CLASS));
        assert_eq!(repo.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn set_persists_and_restyles() {
        let repo = InMemoryPreferenceRepository::new();
        let mut store = ThemeStore::load(&repo, RootClassList::new());

        store.set_theme(Theme::Light).unwrap();
        assert_eq!(repo.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert!(!store.surface().contains(DARK_CLASS));
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let repo = InMemoryPreferenceRepository::new();
        let mut store = ThemeStore::load(&repo, RootClassList::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |theme| sink.borrow_mut().push(theme));
        store.toggle_theme().unwrap();
        assert!(store.unsubscribe(id));
        store.toggle_theme().unwrap();

        assert_eq!(*seen.borrow(), vec![Theme::Light]);
        assert!(!store.unsubscribe(id));
    }

    #[test]
    fn unreadable_storage_loads_dark() {
        let store = ThemeStore::load(BusyPreferences, RootClassList::new());

        assert_eq!(store.get_theme(), Theme::Dark);
        assert!(store.surface().contains(DARK_CLASS));
    }

    #[test]
    fn failed_write_leaves_theme_surface_and_listeners_alone() {
        let mut store = ThemeStore::load(BusyPreferences, RootClassList::new());
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(matches!(store.toggle_theme(), Err(PreferenceError::Db(_))));
        assert!(store.set_theme(Theme::Light).is_err());

        assert_eq!(store.get_theme(), Theme::Dark);
        assert!(store.surface().contains(DARK_CLASS));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn load_without_legacy_keys_writes_nothing() {
        let repo = CountingPreferences::default();
        repo.inner.set(THEME_KEY, "light").unwrap();

        let store = ThemeStore::load(&repo, RootClassList::new());

        assert_eq!(store.get_theme(), Theme::Light);
        assert_eq!(repo.writes.get(), 0);
    }

    #[test]
    fn lone_icon_key_is_left_in_place() {
        let repo = CountingPreferences::default();
        repo.inner.set(LEGACY_ICON_KEY, "uil-sun").unwrap();

        let store = ThemeStore::load(&repo, RootClassList::new());

        assert_eq!(store.get_theme(), Theme::Dark);
        assert_eq!(repo.writes.get(), 0);
        assert_eq!(repo.inner.get(LEGACY_ICON_KEY).unwrap().as_deref(), Some("uil-sun"));
    }
}
