//! Core data model definitions shared across Phenix crates.
//!
//! The category and ordering helpers are always available so the browser
//! carousel can depend on this crate without pulling in `chrono`. Persisted
//! records live behind the `chrono` feature.

pub mod category;
pub mod error;
pub mod ordering;

#[cfg(feature = "chrono")]
pub mod contact;
#[cfg(feature = "chrono")]
pub mod gallery;

pub use category::Category;
pub use error::{ModelError, Result as ModelResult};
pub use ordering::{numeric_suffix, sort_by_numeric_suffix};

#[cfg(feature = "chrono")]
pub use contact::{ContactMessage, EmailRecipient, NewContactMessage};
#[cfg(feature = "chrono")]
pub use gallery::{
    GalleryEntry, GalleryEntryDraft, GalleryEntryInput, GalleryOrder,
};
