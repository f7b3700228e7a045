use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use freight_types::{ApiResponse, NewVoucher, Voucher, VoucherType, VoucherUpdate};
use serde::Deserialize;

use super::parse_filter;
use crate::error::ApiResult;
use crate::middleware::auth::{require_api_auth, AppState};

#[derive(Deserialize)]
struct VoucherQuery {
    #[serde(rename = "type")]
    voucher_type: Option<String>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/vouchers", get(list_vouchers).post(create_voucher))
        .route("/api/v1/vouchers/:id", get(get_voucher).patch(update_voucher))
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

async fn list_vouchers(
    State(state): State<AppState>,
    Query(query): Query<VoucherQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Voucher>>>> {
    let voucherType = parse_filter::<VoucherType>(query.voucher_type.as_deref())?;
    let vouchers = state.store.list_vouchers(voucherType).await;
    Ok(Json(ApiResponse::ok("Vouchers retrieved", vouchers)))
}

async fn create_voucher(
    State(state): State<AppState>,
    Json(body): Json<NewVoucher>,
) -> ApiResult<Json<ApiResponse<Voucher>>> {
    let voucher = state.store.create_voucher(body).await?;
    Ok(Json(ApiResponse::ok("Voucher created", voucher)))
}

async fn get_voucher(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<Voucher>>> {
    let voucher = state.store.get_voucher(id).await?;
    Ok(Json(ApiResponse::ok("Voucher retrieved", voucher)))
}

async fn update_voucher(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<VoucherUpdate>,
) -> ApiResult<Json<ApiResponse<Voucher>>> {
    let voucher = state.store.update_voucher(id, body).await?;
    Ok(Json(ApiResponse::ok("Voucher updated", voucher)))
}
