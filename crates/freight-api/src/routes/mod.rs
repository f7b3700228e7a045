pub mod enquiries;
pub mod fleet;
pub mod inventory;
pub mod parties;
pub mod users;
pub mod vouchers;

use std::str::FromStr;

use axum::Router;

use crate::error::ApiError;
use crate::middleware::auth::AppState;

pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(users::routes(state.clone()))
        .merge(parties::routes(state.clone()))
        .merge(inventory::routes(state.clone()))
        .merge(vouchers::routes(state.clone()))
        .merge(fleet::routes(state.clone()))
        .merge(enquiries::routes(state))
}

/// Parses an optional `?type=` style filter; blank means no filter.
pub(crate) fn parse_filter<T>(raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|e| ApiError::unprocessable(e.to_string())),
    }
}
