pub mod paths;

use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use phenix_model::Category;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::handlers::{
    admin::{auth, gallery, messages, upload},
    contact,
};
use crate::infra::app_state::AppState;
use crate::pages;

/// Full application: pages, JSON API and static assets.
pub fn create_app(state: AppState) -> Router {
    let site = &state.config.site;
    let assets = ServeDir::new(&site.public_dir);
    let wasm = ServeDir::new(&site.wasm_dir);

    Router::new()
        .merge(page_routes(state.clone()))
        .merge(admin_api_routes(state.clone()))
        .route(paths::api::CONTACT, post(contact::submit_contact))
        .route(paths::api::ADMIN_LOGIN, post(auth::login))
        .route(paths::api::ADMIN_SESSION, get(auth::session_status))
        .nest_service(paths::WASM_PKG, wasm)
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn page_routes(state: AppState) -> Router<AppState> {
    let dashboard = Router::new()
        .route(paths::ADMIN_DASHBOARD_PAGE, get(pages::admin::dashboard_page))
        .route_layer(middleware::from_fn_with_state(
            state,
            auth::require_admin_page,
        ));

    let mut router = Router::new()
        .route(paths::HOME, get(pages::home::home_page))
        .route(paths::CONTACT_PAGE, get(pages::contact::contact_page))
        .route(paths::ADMIN_LOGIN_PAGE, get(pages::admin::login_page));
    for category in Category::ALL {
        router = router.route(
            &paths::gallery_page(category),
            get(pages::gallery::gallery_page).layer(Extension(category)),
        );
    }
    router.merge(dashboard)
}

fn admin_api_routes(state: AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route(paths::api::ADMIN_LOGOUT, post(auth::logout))
        .route(paths::api::ADMIN_MESSAGES, get(messages::list_messages))
        .route(
            paths::api::ADMIN_UPLOAD,
            post(upload::upload_images)
                .layer(DefaultBodyLimit::max(upload::BODY_LIMIT_BYTES)),
        );
    for category in Category::ALL {
        router = router
            .route(
                &paths::admin_collection(category),
                get(gallery::list_entries)
                    .post(gallery::create_entry)
                    .layer(Extension(category)),
            )
            .route(
                &paths::admin_item(category, "{id}"),
                get(gallery::get_entry)
                    .put(gallery::update_entry)
                    .delete(gallery::delete_entry)
                    .layer(Extension(category)),
            );
    }
    router.route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
