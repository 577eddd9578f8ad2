//! Domain model for the portfolio view state.
//!
//! # Responsibility
//! - Describe externally authored content (journal items, projects,
//!   work history).
//! - Describe the persisted display preference.
//!
//! # Invariants
//! - Content records are immutable once loaded; the core never edits them.
//! - Journal items are a closed sum type, matched exhaustively.

pub mod content;
pub mod date;
pub mod experience;
pub mod project;
pub mod theme;
