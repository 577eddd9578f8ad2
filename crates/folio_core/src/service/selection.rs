//! Modal/selection state.
//!
//! # Responsibility
//! - Track the one item whose detail view is open.
//! - Hold the page-scroll lock for exactly as long as a detail view is open.
//! - Drive the project gallery lightbox inside an open project view.
//!
//! # Invariants
//! - At most one item is open; selecting another replaces it.
//! - The scroll lock is released when the view closes or the state is
//!   dropped, including during unwinding.
//! - Replacing the open item keeps the same lock.

use crate::model::content::{ContentItem, ContentKind};
use crate::model::project::Project;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// Page that can suppress scrolling while an overlay is shown.
pub trait ScrollSurface {
    fn lock_scroll(&self);
    fn unlock_scroll(&self);
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for &S {
    fn lock_scroll(&self) {
        (**self).lock_scroll();
    }

    fn unlock_scroll(&self) {
        (**self).unlock_scroll();
    }
}

impl<S: ScrollSurface + ?Sized> ScrollSurface for Rc<S> {
    fn lock_scroll(&self) {
        (**self).lock_scroll();
    }

    fn unlock_scroll(&self) {
        (**self).unlock_scroll();
    }
}

/// CSS `overflow` of the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Unset,
    Hidden,
}

/// Document body whose `overflow` style is the scroll lock.
#[derive(Debug, Default)]
pub struct BodyOverflow {
    overflow: Cell<Overflow>,
    locks_taken: Cell<u32>,
}

impl BodyOverflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overflow(&self) -> Overflow {
        self.overflow.get()
    }

    pub fn is_locked(&self) -> bool {
        self.overflow.get() == Overflow::Hidden
    }

    /// How many times the lock has been taken so far.
    pub fn locks_taken(&self) -> u32 {
        self.locks_taken.get()
    }
}

impl ScrollSurface for BodyOverflow {
    fn lock_scroll(&self) {
        self.overflow.set(Overflow::Hidden);
        self.locks_taken.set(self.locks_taken.get() + 1);
    }

    fn unlock_scroll(&self) {
        self.overflow.set(Overflow::Unset);
    }
}

/// Held scroll lock; dropping it unlocks the surface.
#[must_use = "the page unlocks as soon as the guard is dropped"]
pub struct ScrollLock<S: ScrollSurface> {
    surface: S,
}

impl<S: ScrollSurface> ScrollLock<S> {
    pub fn acquire(surface: S) -> Self {
        surface.lock_scroll();
        debug!("event=scroll_lock module=selection status=acquired");
        Self { surface }
    }
}

impl<S: ScrollSurface> Drop for ScrollLock<S> {
    fn drop(&mut self) {
        self.surface.unlock_scroll();
        debug!("event=scroll_lock module=selection status=released");
    }
}

/// Borrowed view of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a, T> {
    Closed,
    Open(&'a T),
}

/// Single-slot detail view with its scroll lock.
pub struct SelectionState<T, S: ScrollSurface + Clone> {
    surface: S,
    open: Option<(T, ScrollLock<S>)>,
}

impl<T, S: ScrollSurface + Clone> SelectionState<T, S> {
    /// Starts closed; nothing is locked yet.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            open: None,
        }
    }

    /// Opens `item`, replacing whatever was open.
    ///
    /// Returns the replaced item, if any.
    pub fn select(&mut self, item: T) -> Option<T> {
        match self.open.take() {
            Some((previous, lock)) => {
                self.open = Some((item, lock));
                Some(previous)
            }
            None => {
                let lock = ScrollLock::acquire(self.surface.clone());
                self.open = Some((item, lock));
                None
            }
        }
    }

    /// Closes the detail view. Closing an already closed view is a no-op.
    pub fn close(&mut self) -> Option<T> {
        self.open.take().map(|(item, _lock)| item)
    }

    pub fn selected(&self) -> Option<&T> {
        self.open.as_ref().map(|(item, _)| item)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn state(&self) -> Selection<'_, T> {
        match &self.open {
            Some((item, _)) => Selection::Open(item),
            None => Selection::Closed,
        }
    }
}

/// Anything with a detail view: a journal item or a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selectable {
    Item(ContentItem),
    Project(Project),
}

impl Selectable {
    /// Stable key, `"{kind}-{id}"` or `"project-{id}"`.
    pub fn key(&self) -> String {
        match self {
            Self::Item(item) => item.key(),
            Self::Project(project) => format!("project-{}", project.id),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Item(item) => item.title(),
            Self::Project(project) => &project.title,
        }
    }

    pub fn content_kind(&self) -> Option<ContentKind> {
        match self {
            Self::Item(item) => Some(item.kind()),
            Self::Project(_) => None,
        }
    }
}

/// Keys the lightbox reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxKey {
    Escape,
    ArrowLeft,
    ArrowRight,
}

/// Full-screen viewer over a project's gallery.
///
/// Arrow keys wrap around; keys are ignored while the viewer is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    index: Option<usize>,
}

impl Lightbox {
    pub fn for_project(project: &Project) -> Self {
        Self::new(project.media.gallery.len())
    }

    pub fn new(len: usize) -> Self {
        Self { len, index: None }
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Opens at `index`; out-of-range indexes are ignored.
    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.index = Some(index);
        }
    }

    pub fn close(&mut self) {
        self.index = None;
    }

    pub fn handle_key(&mut self, key: LightboxKey) {
        let Some(current) = self.index else {
            return;
        };
        self.index = match key {
            LightboxKey::Escape => None,
            LightboxKey::ArrowRight if current + 1 < self.len => Some(current + 1),
            LightboxKey::ArrowRight => Some(0),
            LightboxKey::ArrowLeft if current > 0 => Some(current - 1),
            LightboxKey::ArrowLeft => Some(self.len - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{BodyOverflow, Lightbox, LightboxKey, Overflow, ScrollLock, SelectionState};

    #[test]
    fn guard_unlocks_on_drop() {
        let body = BodyOverflow::new();
        {
            let _lock = ScrollLock::acquire(&body);
            assert_eq!(body.overflow(), Overflow::Hidden);
        }
        assert_eq!(body.overflow(), Overflow::Unset);
    }

    #[test]
    fn replacing_selection_keeps_the_original_lock() {
        let body = BodyOverflow::new();
        let mut selection = SelectionState::new(&body);

        assert_eq!(selection.select("a"), None);
        assert_eq!(selection.select("b"), Some("a"));
        assert!(body.is_locked());
        assert_eq!(body.locks_taken(), 1);
    }

    #[test]
    fn lightbox_wraps_and_ignores_keys_when_closed() {
        let mut lightbox = Lightbox::new(3);
        lightbox.handle_key(LightboxKey::ArrowRight);
        assert_eq!(lightbox.index(), None);

        lightbox.open(2);
        lightbox.handle_key(LightboxKey::ArrowRight);
        assert_eq!(lightbox.index(), Some(0));
        lightbox.handle_key(LightboxKey::ArrowLeft);
        assert_eq!(lightbox.index(), Some(2));
        lightbox.handle_key(LightboxKey::Escape);
        assert_eq!(lightbox.index(), None);
    }

    #[test]
    fn lightbox_ignores_out_of_range_open() {
        let mut lightbox = Lightbox::new(0);
        lightbox.open(0);
        assert_eq!(lightbox.index(), None);
    }
}
