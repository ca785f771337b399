pub mod auth;
pub mod gallery;
pub mod messages;
pub mod upload;
