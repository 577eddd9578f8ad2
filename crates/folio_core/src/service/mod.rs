//! View-state services driven by the UI shell.
//!
//! # Responsibility
//! - Theme controller, journal filter/sort engine, and modal selection.
//! - Keep shells independent of storage and catalog details.

pub mod journal_service;
pub mod selection;
pub mod theme_service;
