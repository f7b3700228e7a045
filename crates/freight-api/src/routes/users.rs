use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, patch},
    Extension, Json, Router,
};
use freight_types::{ApiResponse, NewUser, User};

use crate::error::ApiResult;
use crate::middleware::auth::{require_admin, require_api_auth, AppState, CurrentUser};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/users", get(list_users).post(create_user))
        .route("/api/v1/users/:id", get(get_user))
        .route("/api/v1/users/:id/activate", patch(activate_user))
        .route("/api/v1/users/:id/deactivate", patch(deactivate_user))
        .route_layer(middleware::from_fn_with_state(state, require_api_auth))
}

async fn list_users(State(state): State<AppState>) -> Json<ApiResponse<Vec<User>>> {
    let users = state.store.list_users().await;
    Json(ApiResponse::ok("Users retrieved", users))
}

async fn create_user(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Json(body): Json<NewUser>,
) -> ApiResult<Json<ApiResponse<User>>> {
    require_admin(&actor)?;
    let user = state.store.create_user(body).await?;
    Ok(Json(ApiResponse::ok("User registered", user)))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u64>) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.store.get_user(id).await?;
    Ok(Json(ApiResponse::ok("User retrieved", user)))
}

async fn activate_user(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ApiResponse<User>>> {
    require_admin(&actor)?;
    let user = state.store.set_user_active(&actor, id, true).await?;
    Ok(Json(ApiResponse::ok("User activated", user)))
}

async fn deactivate_user(
    State(state): State<AppState>,
    Extension(CurrentUser(actor)): Extension<CurrentUser>,
    Path(id): Path<u64>,
) -> ApiResult<Json<ApiResponse<User>>> {
    require_admin(&actor)?;
    let user = state.store.set_user_active(&actor, id, false).await?;
    Ok(Json(ApiResponse::ok("User deactivated", user)))
}
