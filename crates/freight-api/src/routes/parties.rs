use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use freight_types::{ApiResponse, NewParty, Party, PartyType};
use serde::Deserialize;

use super::parse_filter;
use crate::error::ApiResult;
use crate::middleware::auth::{require_api_auth, AppState};

#[derive(Deserialize)]
struct PartyQuery {
    #[serde(rename = "type")]
    party_type: Option<String>,
}

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/parties", get(list_parties).post(create_party))
        .route("/api/v1/parties/:id", get(get_party))
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

async fn list_parties(
    State(state): State<AppState>,
    Query(query): Query<PartyQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Party>>>> {
    let partyType = parse_filter::<PartyType>(query.party_type.as_deref())?;
    let parties = state.store.list_parties(partyType).await;
    Ok(Json(ApiResponse::ok("Parties retrieved", parties)))
}

async fn create_party(
    State(state): State<AppState>,
    Json(body): Json<NewParty>,
) -> ApiResult<Json<ApiResponse<Party>>> {
    let party = state.store.create_party(body).await?;
    Ok(Json(ApiResponse::ok("Party created", party)))
}

async fn get_party(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<Party>>> {
    let party = state.store.get_party(id).await?;
    Ok(Json(ApiResponse::ok("Party retrieved", party)))
}
