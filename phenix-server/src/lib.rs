//! HTTP server for the Phenix Ferronnerie website.
//!
//! Public galleries and the contact form are rendered server-side; the
//! admin panel talks to the JSON API under `/api/admin`.

pub mod handlers;
pub mod infra;
pub mod pages;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_app;
