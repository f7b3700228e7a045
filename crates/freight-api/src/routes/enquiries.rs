use axum::{extract::State, routing::post, Json, Router};
use freight_types::{ApiResponse, Enquiry, NewEnquiry};

use crate::error::ApiResult;
use crate::middleware::auth::AppState;

/// Public: the landing page contact form posts here without a session.
pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new().route("/api/v1/enquiries", post(submit_enquiry))
}

async fn submit_enquiry(
    State(state): State<AppState>,
    Json(body): Json<NewEnquiry>,
) -> ApiResult<Json<ApiResponse<Enquiry>>> {
    let enquiry = state.store.submit_enquiry(body).await?;
    Ok(Json(ApiResponse::ok("Thanks, we will be in touch shortly", enquiry)))
}
