//! Persistence and content-loading boundaries.
//!
//! # Responsibility
//! - Keep SQL behind the preference repository contract.
//! - Load the externally authored content catalog.
//!
//! # Invariants
//! - Services depend on the `PreferenceRepository` trait, not on SQLite.
//! - A loaded catalog has already passed id-uniqueness checks.

pub mod catalog_repo;
pub mod preference_repo;
