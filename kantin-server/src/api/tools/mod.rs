//! Catalog query tools
//!
//! POST endpoints used by the assistant and the web UI to browse canteens
//! and menus.

pub mod handler;
pub mod params;

use axum::Router;
use axum::routing::post;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tools/search-menu", post(handler::search_menu))
        .route(
            "/api/tools/list-menu-by-kantin",
            post(handler::list_menu_by_kantin),
        )
        .route("/api/tools/get-cheapest", post(handler::get_cheapest))
        .route("/api/tools/get-priciest", post(handler::get_priciest))
        .route("/api/tools/get-popular-menu", post(handler::get_popular_menu))
        .route("/api/tools/get-top-rated", post(handler::get_top_rated))
        .route("/api/tools/list-under-price", post(handler::list_under_price))
        .route("/api/tools/get-new-menu", post(handler::get_new_menu))
        .route("/api/tools/get-kantin-info", post(handler::get_kantin_info))
        .route("/api/tools/list-all-kantin", post(handler::list_all_kantin))
}
