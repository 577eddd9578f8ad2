use folio_core::db::{open_db, open_db_in_memory};
use folio_core::service::theme_service::{
    read_persisted_theme, DARK_CLASS, LEGACY_ICON_KEY, LEGACY_THEME_KEY, THEME_KEY,
};
use folio_core::{
    InMemoryPreferenceRepository, PreferenceRepository, RootClassList, SqlitePreferenceRepository,
    Theme, ThemeIcon, ThemeStore,
};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn missing_preference_reads_as_dark() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferenceRepository::new(&conn);

    assert_eq!(read_persisted_theme(&repo), Theme::Dark);
    let store = ThemeStore::load(repo, RootClassList::new());
    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(store.get_theme().icon(), ThemeIcon::Moon);
}

#[test]
fn toggling_twice_restores_the_original_theme() {
    let conn = open_db_in_memory().unwrap();
    let mut store = ThemeStore::load(SqlitePreferenceRepository::new(&conn), RootClassList::new());
    let original = store.get_theme();

    assert_eq!(store.toggle_theme().unwrap(), original.toggled());
    assert_eq!(store.toggle_theme().unwrap(), original);
    assert_eq!(store.get_theme(), original);
    assert!(store.surface().contains(DARK_CLASS));
}

#[test]
fn preference_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("folio.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut store =
            ThemeStore::load(SqlitePreferenceRepository::new(&conn), RootClassList::new());
        store.set_theme(Theme::Light).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let surface = RootClassList::new();
    let store = ThemeStore::load(SqlitePreferenceRepository::new(&conn), &surface);
    assert_eq!(store.get_theme(), Theme::Light);
    assert!(!surface.contains(DARK_CLASS));
}

#[test]
fn unrecognized_stored_value_falls_back_to_dark() {
    let repo = InMemoryPreferenceRepository::with_entries([(THEME_KEY, "solarized")]);
    let store = ThemeStore::load(&repo, RootClassList::new());
    assert_eq!(store.get_theme(), Theme::Dark);
}

#[test]
fn legacy_keys_collapse_into_the_canonical_key() {
    let repo = InMemoryPreferenceRepository::with_entries([
        (LEGACY_THEME_KEY, "light"),
        (LEGACY_ICON_KEY, "ri-sun-line"),
    ]);

    let store = ThemeStore::load(&repo, RootClassList::new());

    assert_eq!(store.get_theme(), Theme::Light);
    assert_eq!(repo.keys(), vec![THEME_KEY.to_string()]);
    assert_eq!(repo.get(THEME_KEY).unwrap().as_deref(), Some("light"));
}

#[test]
fn canonical_key_wins_over_legacy_keys() {
    let repo = InMemoryPreferenceRepository::with_entries([
        (THEME_KEY, "dark"),
        (LEGACY_THEME_KEY, "light"),
    ]);

    let store = ThemeStore::load(&repo, RootClassList::new());

    assert_eq!(store.get_theme(), Theme::Dark);
    assert_eq!(repo.keys(), vec![THEME_KEY.to_string()]);
}

#[test]
fn subscribers_see_every_change_in_order() {
    let repo = InMemoryPreferenceRepository::new();
    let mut store = ThemeStore::load(&repo, RootClassList::new());
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&first);
    store.subscribe(move |theme| sink.borrow_mut().push(theme));
    let sink = Rc::clone(&second);
    store.subscribe(move |theme| sink.borrow_mut().push(theme));

    store.set_theme(Theme::Light).unwrap();
    store.set_theme(Theme::Light).unwrap();
    store.toggle_theme().unwrap();

    let expected = vec![Theme::Light, Theme::Light, Theme::Dark];
    assert_eq!(*first.borrow(), expected);
    assert_eq!(*second.borrow(), expected);
}
