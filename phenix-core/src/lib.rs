//! Server-side services for the Phenix Ferronnerie site.
//!
//! - [`database`]: repository ports with PostgreSQL and in-memory adapters,
//!   plus the initial gallery seed.
//! - [`auth`]: admin password verification and session tokens.
//! - [`mail`]: contact notifications over an HTTP mail API.
//! - [`storage`]: public blob storage for uploaded images.

pub mod auth;
pub mod database;
pub mod error;
pub mod mail;
pub mod storage;

pub use error::{CoreError, Result};
