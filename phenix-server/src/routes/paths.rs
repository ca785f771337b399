//! Route paths shared by the router, the pages and the tests.

pub const HOME: &str = "/";
pub const CONTACT_PAGE: &str = "/contact";
pub const ADMIN_LOGIN_PAGE: &str = "/admin";
pub const ADMIN_DASHBOARD_PAGE: &str = "/admin/dashboard";
pub const WASM_PKG: &str = "/pkg";

pub mod api {
    pub const CONTACT: &str = "/api/contact";

    pub const ADMIN_LOGIN: &str = "/api/admin/login";
    pub const ADMIN_LOGOUT: &str = "/api/admin/logout";
    pub const ADMIN_SESSION: &str = "/api/admin/session";
    pub const ADMIN_MESSAGES: &str = "/api/admin/messages";
    pub const ADMIN_UPLOAD: &str = "/api/admin/upload";
}

/// `/art` or `/amenagement`.
pub fn gallery_page(category: phenix_model::Category) -> String {
    format!("/{}", category.as_str())
}

pub fn admin_collection(category: phenix_model::Category) -> String {
    format!("/api/admin/{}", category.as_str())
}

pub fn admin_item(category: phenix_model::Category, id: impl std::fmt::Display) -> String {
    format!("/api/admin/{}/{id}", category.as_str())
}
