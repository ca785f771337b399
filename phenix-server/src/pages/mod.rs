//! Server-rendered HTML pages.

pub mod admin;
pub mod contact;
pub mod gallery;
pub mod home;
pub mod layout;
