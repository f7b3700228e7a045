use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use freight_types::{ApiResponse, Driver, NewDriver, NewVehicle, Vehicle};

use crate::error::ApiResult;
use crate::middleware::auth::{require_api_auth, AppState};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/fleet/drivers", get(list_drivers).post(create_driver))
        .route("/api/v1/fleet/drivers/:id", get(get_driver))
        .route("/api/v1/fleet/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/api/v1/fleet/vehicles/:id", get(get_vehicle))
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

async fn list_drivers(State(state): State<AppState>) -> Json<ApiResponse<Vec<Driver>>> {
    Json(ApiResponse::ok("Drivers retrieved", state.store.list_drivers().await))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(body): Json<NewDriver>,
) -> ApiResult<Json<ApiResponse<Driver>>> {
    let driver = state.store.create_driver(body).await?;
    Ok(Json(ApiResponse::ok("Driver registered", driver)))
}

async fn get_driver(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<Driver>>> {
    let driver = state.store.get_driver(id).await?;
    Ok(Json(ApiResponse::ok("Driver retrieved", driver)))
}

async fn list_vehicles(State(state): State<AppState>) -> Json<ApiResponse<Vec<Vehicle>>> {
    Json(ApiResponse::ok("Vehicles retrieved", state.store.list_vehicles().await))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(body): Json<NewVehicle>,
) -> ApiResult<Json<ApiResponse<Vehicle>>> {
    let vehicle = state.store.create_vehicle(body).await?;
    Ok(Json(ApiResponse::ok("Vehicle registered", vehicle)))
}

async fn get_vehicle(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<Vehicle>>> {
    let vehicle = state.store.get_vehicle(id).await?;
    Ok(Json(ApiResponse::ok("Vehicle retrieved", vehicle)))
}
