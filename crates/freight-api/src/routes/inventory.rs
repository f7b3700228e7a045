use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
    Json, Router,
};
use freight_types::{
    ApiResponse, EffectivePrice, Item, ItemType, ItemUpdate, NewItem, NewPriceOverride, PriceOverride,
};
use serde::Deserialize;

use super::parse_filter;
use crate::error::ApiResult;
use crate::middleware::auth::{require_api_auth, AppState};

#[derive(Deserialize)]
struct ItemQuery {
    #[serde(rename = "type")]
    item_type: Option<String>,
    search: Option<String>,
}

#[derive(Deserialize)]
struct OverrideQuery {
    item_id: Option<u64>,
}

#[derive(Deserialize)]
struct EffectiveQuery {
    item_id: u64,
    party_id: u64,
    location: Option<String>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/items", get(list_items).post(create_item))
        .route("/api/v1/items/:id", get(get_item).patch(update_item))
        .route(
            "/api/v1/pricing/overrides",
            post(upsert_override).get(list_overrides),
        )
        .route("/api/v1/pricing/effective", get(effective_price))
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Item>>>> {
    let itemType = parse_filter::<ItemType>(query.item_type.as_deref())?;
    let items = state.store.list_items(itemType, query.search.as_deref()).await;
    Ok(Json(ApiResponse::ok("Items retrieved", items)))
}

async fn create_item(State(state): State<AppState>, Json(body): Json<NewItem>) -> ApiResult<Json<ApiResponse<Item>>> {
    let item = state.store.create_item(body).await?;
    Ok(Json(ApiResponse::ok("Item created", item)))
}

async fn get_item(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<Item>>> {
    let item = state.store.get_item(id).await?;
    Ok(Json(ApiResponse::ok("Item retrieved", item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<ItemUpdate>,
) -> ApiResult<Json<ApiResponse<Item>>> {
    let item = state.store.update_item(id, body).await?;
    Ok(Json(ApiResponse::ok("Item updated", item)))
}

async fn upsert_override(
    State(state): State<AppState>,
    Json(body): Json<NewPriceOverride>,
) -> ApiResult<Json<ApiResponse<PriceOverride>>> {
    let rule = state.store.upsert_price_override(body).await?;
    Ok(Json(ApiResponse::ok("Price override saved", rule)))
}

async fn list_overrides(
    State(state): State<AppState>,
    Query(query): Query<OverrideQuery>,
) -> Json<ApiResponse<Vec<PriceOverride>>> {
    let rules = state.store.list_price_overrides(query.item_id).await;
    Json(ApiResponse::ok("Price overrides retrieved", rules))
}

async fn effective_price(
    State(state): State<AppState>,
    Query(query): Query<EffectiveQuery>,
) -> ApiResult<Json<ApiResponse<EffectivePrice>>> {
    let price = state
        .store
        .effective_price(query.item_id, query.party_id, query.location.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok("Effective price resolved", price)))
}
