//! `/api/tools/*` handlers
//!
//! Each handler turns its parameter struct into a [`MenuQuery`], runs it
//! against the store and wraps the rows. Canteen rows are decorated with
//! `is_open` computed at the current local time.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Kantin, MenuStat};

use super::params::{
    CatalogScope, KantinInfoParams, ListByKantinParams, ListKantinParams, NewMenuParams,
    RankingParams, SearchMenuParams, TopRatedParams, UnderPriceParams,
};
use crate::api::ApiResult;
use crate::api::extract::JsonBody;
use crate::catalog::window::days_since;
use crate::catalog::{CanteenFilter, MenuQuery, Period, SortKey, hours, resolve_limit};
use crate::state::AppState;

const SEARCH_LIMIT: i64 = 10;
const LIST_BY_KANTIN_LIMIT: i64 = 10;
const RANKING_LIMIT: i64 = 5;
const UNDER_PRICE_LIMIT: i64 = 10;
const NEW_MENU_LIMIT: i64 = 10;

pub const KANTIN_NOT_FOUND: &str = "Kantin tidak ditemukan";

// ========== Response bodies ==========

#[derive(Debug, Serialize)]
pub struct MenuList {
    pub items: Vec<MenuStat>,
    pub count: usize,
}

impl MenuList {
    fn new(items: Vec<MenuStat>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub list: MenuList,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KantinView {
    #[serde(flatten)]
    pub kantin: Kantin,
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu_count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct KantinMenuResponse {
    pub kantin: Option<KantinView>,
    #[serde(flatten)]
    pub list: MenuList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UnderPriceResponse {
    #[serde(flatten)]
    pub list: MenuList,
    pub max_price: f64,
}

#[derive(Debug, Serialize)]
pub struct NewMenuItem {
    #[serde(flatten)]
    pub menu: MenuStat,
    pub days_since_created: i64,
    pub is_new: bool,
}

#[derive(Debug, Serialize)]
pub struct NewMenuResponse {
    pub items: Vec<NewMenuItem>,
    pub count: usize,
    pub period: &'static str,
    pub period_label: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct KantinInfoResponse {
    pub kantin: Option<KantinView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct KantinListResponse {
    pub items: Vec<KantinView>,
    pub count: usize,
    pub open_count: usize,
}

// ========== Helpers ==========

fn kantin_view(state: &AppState, kantin: Kantin, menu_count: Option<i64>) -> KantinView {
    let is_open = hours::is_open_now(&kantin, state.local_now().time());
    KantinView {
        kantin,
        is_open,
        menu_count,
    }
}

/// Scope filters (canteen, category) plus limit
fn scoped_query(scope: &impl CatalogScope, limit: Option<i64>, default_limit: i64) -> MenuQuery {
    MenuQuery::new(resolve_limit(limit, default_limit))
        .canteen(scope.canteen())
        .category(scope.category())
}

async fn ranked(state: &AppState, query: MenuQuery) -> ApiResult<MenuList> {
    let items = state.store.query_menu(&query).await?;
    Ok(Json(MenuList::new(items)))
}

// ========== Handlers ==========

/// POST /api/tools/search-menu
pub async fn search_menu(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<SearchMenuParams>,
) -> ApiResult<SearchResponse> {
    let query = scoped_query(&params, params.limit, SEARCH_LIMIT)
        .text(params.query.as_deref())
        .max_price(params.max_price)
        .min_rating(params.min_rating)
        .only_available(params.only_available.unwrap_or(true))
        .order_by(SortKey::resolve(
            params.sort.as_deref(),
            &[SortKey::BestSellerDesc],
        ));

    let items = state.store.query_menu(&query).await?;
    tracing::debug!(query = ?params.query, count = items.len(), "search-menu");
    Ok(Json(SearchResponse {
        list: MenuList::new(items),
        query: params.query,
    }))
}

/// POST /api/tools/list-menu-by-kantin
pub async fn list_menu_by_kantin(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<ListByKantinParams>,
) -> ApiResult<KantinMenuResponse> {
    let kantin = match params.canteen() {
        Some(filter) => match state.store.find_kantin(&filter).await? {
            Some(kantin) => Some(kantin),
            None => {
                return Ok(Json(KantinMenuResponse {
                    kantin: None,
                    list: MenuList::new(Vec::new()),
                    message: Some(KANTIN_NOT_FOUND.to_string()),
                }));
            }
        },
        None => None,
    };

    let query = scoped_query(&params, params.limit, LIST_BY_KANTIN_LIMIT)
        .canteen(kantin.as_ref().map(|k| CanteenFilter::Id(k.id)))
        .only_available(params.only_available.unwrap_or(true))
        .order_by(SortKey::resolve(
            params.sort.as_deref(),
            &[SortKey::BestSellerDesc],
        ));
    let items = state.store.query_menu(&query).await?;

    Ok(Json(KantinMenuResponse {
        kantin: kantin.map(|k| kantin_view(&state, k, None)),
        list: MenuList::new(items),
        message: None,
    }))
}

/// POST /api/tools/get-cheapest
pub async fn get_cheapest(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<RankingParams>,
) -> ApiResult<MenuList> {
    let query = scoped_query(&params, params.limit, RANKING_LIMIT)
        .order_by(vec![SortKey::PriceAsc, SortKey::BestSellerDesc]);
    ranked(&state, query).await
}

/// POST /api/tools/get-priciest
pub async fn get_priciest(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<RankingParams>,
) -> ApiResult<MenuList> {
    let query = scoped_query(&params, params.limit, RANKING_LIMIT)
        .order_by(vec![SortKey::PriceDesc, SortKey::BestSellerDesc]);
    ranked(&state, query).await
}

/// POST /api/tools/get-popular-menu
pub async fn get_popular_menu(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<RankingParams>,
) -> ApiResult<MenuList> {
    let query = scoped_query(&params, params.limit, RANKING_LIMIT)
        .sold_only()
        .order_by(vec![SortKey::BestSellerDesc]);
    ranked(&state, query).await
}

/// POST /api/tools/get-top-rated
pub async fn get_top_rated(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<TopRatedParams>,
) -> ApiResult<MenuList> {
    let query = scoped_query(&params, params.limit, RANKING_LIMIT)
        .rated_only()
        .min_reviews(params.min_reviews.filter(|n| *n > 0))
        .order_by(vec![SortKey::RatingDesc, SortKey::ReviewsDesc]);
    ranked(&state, query).await
}

/// POST /api/tools/list-under-price
pub async fn list_under_price(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<UnderPriceParams>,
) -> ApiResult<UnderPriceResponse> {
    let max_price = params
        .max_price
        .filter(|p| *p > 0.0)
        .ok_or_else(|| AppError::new(ErrorCode::MenuPriceRequired))?;

    let query = scoped_query(&params, params.limit, UNDER_PRICE_LIMIT)
        .max_price(Some(max_price))
        .order_by(vec![SortKey::PriceAsc, SortKey::BestSellerDesc]);
    let items = state.store.query_menu(&query).await?;

    Ok(Json(UnderPriceResponse {
        list: MenuList::new(items),
        max_price,
    }))
}

/// POST /api/tools/get-new-menu
pub async fn get_new_menu(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<NewMenuParams>,
) -> ApiResult<NewMenuResponse> {
    let period = match params.period.as_deref().map(str::trim) {
        None | Some("") => Period::default(),
        Some(token) => Period::parse(token).ok_or_else(|| {
            AppError::new(ErrorCode::MenuPeriodInvalid).with_detail("period", token)
        })?,
    };

    let now = state.now();
    let since = period.window_start(now, state.timezone);
    let query = MenuQuery::new(resolve_limit(params.limit, NEW_MENU_LIMIT))
        .canteen(CanteenFilter::from_params(None, params.kantin_name.as_deref()))
        .active_canteens_only()
        .created_since(since)
        .order_by(vec![SortKey::NewestFirst]);

    let items: Vec<NewMenuItem> = state
        .store
        .query_menu(&query)
        .await?
        .into_iter()
        .map(|menu| NewMenuItem {
            days_since_created: days_since(menu.created_at, now),
            is_new: true,
            menu,
        })
        .collect();

    let message = if items.is_empty() {
        format!("Belum ada menu baru {}", period.phrase())
    } else {
        format!("Ada {} menu baru {}", items.len(), period.phrase())
    };

    Ok(Json(NewMenuResponse {
        count: items.len(),
        items,
        period: period.as_str(),
        period_label: period.label(),
        message,
    }))
}

/// POST /api/tools/get-kantin-info
pub async fn get_kantin_info(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<KantinInfoParams>,
) -> ApiResult<KantinInfoResponse> {
    let filter = CanteenFilter::from_params(params.kantin_id, params.kantin_name.as_deref())
        .ok_or_else(|| AppError::new(ErrorCode::KantinLookupRequired))?;

    let Some(kantin) = state.store.find_kantin(&filter).await? else {
        return Ok(Json(KantinInfoResponse {
            kantin: None,
            message: Some(KANTIN_NOT_FOUND.to_string()),
        }));
    };

    let menu_count = state.store.count_available_menu(kantin.id).await?;
    Ok(Json(KantinInfoResponse {
        kantin: Some(kantin_view(&state, kantin, Some(menu_count))),
        message: None,
    }))
}

/// POST /api/tools/list-all-kantin
pub async fn list_all_kantin(
    State(state): State<AppState>,
    JsonBody(params): JsonBody<ListKantinParams>,
) -> ApiResult<KantinListResponse> {
    let views: Vec<KantinView> = state
        .store
        .list_kantin()
        .await?
        .into_iter()
        .map(|k| kantin_view(&state, k, None))
        .collect();
    let open_count = views.iter().filter(|v| v.is_open).count();

    let items: Vec<KantinView> = if params.only_open.unwrap_or(false) {
        views.into_iter().filter(|v| v.is_open).collect()
    } else {
        views
    };

    Ok(Json(KantinListResponse {
        count: items.len(),
        items,
        open_count,
    }))
}
