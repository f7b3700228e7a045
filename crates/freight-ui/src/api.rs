//! Server functions backing the public site and the back office.
//!
//! Every back-office function resolves the caller from the session cookie
//! (or a Bearer header) before touching the store, so the pages can be
//! rendered for anyone but only return data to signed-in staff.

use freight_types::{
    AuthSession, Driver, Item, Party, PriceOverride, User, Vehicle, Voucher, VoucherForm,
};
use leptos::prelude::*;
use leptos::server_fn::codec::Json;
use serde::{Deserialize, Serialize};

/// What a sign-in attempt produced when the credentials were accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LoginOutcome {
    Session(AuthSession),
    PasswordChangeRequired { username: String },
}

/// Message text of a server function error without the transport prefix.
pub fn error_text(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(feature = "ssr")]
pub(crate) mod server {
    use freight_store::{Store, StoreError};
    use freight_types::{FieldErrors, User, UserRole};
    use leptos::prelude::*;

    pub fn store() -> Result<Store, ServerFnError> {
        use_context::<Store>().ok_or_else(|| ServerFnError::new("record store unavailable"))
    }

    pub fn to_error(error: StoreError) -> ServerFnError {
        match error {
            StoreError::Invalid(errors) => invalid(errors),
            other => ServerFnError::new(other.to_string()),
        }
    }

    /// First field message, which is what the forms show in a toast.
    pub fn invalid(errors: FieldErrors) -> ServerFnError {
        let message = errors
            .iter()
            .next()
            .map(|(_, message)| message.to_string())
            .unwrap_or_else(|| "Invalid input".to_string());
        ServerFnError::new(message)
    }

    pub async fn current_user() -> Result<(Store, User), ServerFnError> {
        let store = store()?;
        let headers: http::HeaderMap = leptos_axum::extract().await?;
        let Some(token) = freight_api::middleware::auth::token_from_headers(&headers) else {
            return Err(ServerFnError::new("Not authenticated"));
        };
        let user = store.authenticate(&token).await.map_err(to_error)?;
        Ok((store, user))
    }

    pub async fn current_admin() -> Result<(Store, User), ServerFnError> {
        let (store, user) = current_user().await?;
        if user.role != UserRole::Admin {
            tracing::warn!("{} attempted an administrator action", user.username);
            return Err(ServerFnError::new("Administrator access required"));
        }
        Ok((store, user))
    }

    pub fn set_cookie(value: &str) -> Result<(), ServerFnError> {
        use http::header::{HeaderValue, SET_COOKIE};
        use leptos_axum::ResponseOptions;

        let responseOptions = expect_context::<ResponseOptions>();
        responseOptions.insert_header(
            SET_COOKIE,
            HeaderValue::from_str(value)
                .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?,
        );
        Ok(())
    }

    pub fn optional_id(value: &str) -> Result<Option<u64>, ServerFnError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(|_| ServerFnError::new(format!("invalid id: {value}")))
    }

    pub fn filter<T: std::str::FromStr>(value: &str) -> Result<Option<T>, ServerFnError>
    where
        T::Err: std::fmt::Display,
    {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some).map_err(|e: T::Err| ServerFnError::new(e.to_string()))
    }
}

#[server]
pub async fn login(username: String, password: String) -> Result<LoginOutcome, ServerFnError> {
    use freight_store::StoreError;
    use freight_types::LoginRequest;

    let store = server::store()?;
    let request = LoginRequest {
        username: username.clone(),
        password,
    };
    match store.login(&request).await {
        Ok(session) => {
            let cookie = freight_api::middleware::auth::session_cookie(
                &session.token,
                store.settings().session_ttl_minutes,
            );
            server::set_cookie(&cookie)?;
            Ok(LoginOutcome::Session(session))
        }
        Err(StoreError::PasswordChangeRequired) => {
            Ok(LoginOutcome::PasswordChangeRequired { username })
        }
        Err(e) => Err(server::to_error(e)),
    }
}

#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    let store = server::store()?;
    let headers: http::HeaderMap = leptos_axum::extract().await?;
    if let Some(token) = freight_api::middleware::auth::token_from_headers(&headers) {
        store.logout(&token).await;
    }
    server::set_cookie(&freight_api::middleware::auth::expired_session_cookie())
}

#[server]
pub async fn change_password(
    username: String,
    old_password: String,
    new_password: String,
    confirm_password: String,
) -> Result<(), ServerFnError> {
    use freight_types::ChangePasswordRequest;

    if new_password != confirm_password {
        return Err(ServerFnError::new("Passwords do not match"));
    }
    let store = server::store()?;
    store
        .change_password(&ChangePasswordRequest {
            username,
            old_password,
            new_password,
        })
        .await
        .map_err(server::to_error)
}

#[server]
pub async fn list_vouchers(voucher_type: String) -> Result<Vec<Voucher>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    let voucherType = server::filter(&voucher_type)?;
    Ok(store.list_vouchers(voucherType).await)
}

#[server(input = Json)]
pub async fn create_voucher(form: VoucherForm) -> Result<Voucher, ServerFnError> {
    let (store, user) = server::current_user().await?;
    let request = form.parse().map_err(server::invalid)?;
    let voucher = store.create_voucher(request).await.map_err(server::to_error)?;
    tracing::info!("{} generated {}", user.username, voucher.display_number());
    Ok(voucher)
}

#[server]
pub async fn set_voucher_status(id: u64, status: String) -> Result<Voucher, ServerFnError> {
    use freight_types::VoucherUpdate;

    let (store, _) = server::current_user().await?;
    let update = VoucherUpdate {
        status: server::filter(&status)?,
        notes: None,
    };
    store.update_voucher(id, update).await.map_err(server::to_error)
}

#[server]
pub async fn list_parties(party_type: String) -> Result<Vec<Party>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    let partyType = server::filter(&party_type)?;
    Ok(store.list_parties(partyType).await)
}

#[server]
pub async fn list_items(item_type: String, search: String) -> Result<Vec<Item>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    let itemType = server::filter(&item_type)?;
    Ok(store.list_items(itemType, Some(search.as_str())).await)
}

#[server]
pub async fn list_price_overrides(item_id: String) -> Result<Vec<PriceOverride>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    Ok(store.list_price_overrides(server::optional_id(&item_id)?).await)
}

#[server]
pub async fn save_price_override(
    item_id: String,
    party_id: String,
    rate: String,
    location: String,
) -> Result<PriceOverride, ServerFnError> {
    use freight_types::PriceOverrideForm;

    let (store, user) = server::current_user().await?;
    let request = PriceOverrideForm {
        item_id,
        party_id,
        rate,
        location,
    }
    .parse()
    .map_err(server::invalid)?;
    let rule = store.upsert_price_override(request).await.map_err(server::to_error)?;
    tracing::info!("{} saved price override {}", user.username, rule.id);
    Ok(rule)
}

#[server]
pub async fn list_users() -> Result<Vec<User>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    Ok(store.list_users().await)
}

#[server]
pub async fn register_user(
    username: String,
    email: String,
    full_name: String,
    phone_number: String,
    role: String,
) -> Result<User, ServerFnError> {
    use freight_types::UserForm;

    let (store, _) = server::current_admin().await?;
    let request = UserForm {
        username,
        email,
        full_name,
        phone_number,
        role,
    }
    .parse()
    .map_err(server::invalid)?;
    store.create_user(request).await.map_err(server::to_error)
}

#[server]
pub async fn set_user_active(id: u64, active: bool) -> Result<User, ServerFnError> {
    let (store, admin) = server::current_admin().await?;
    store.set_user_active(&admin, id, active).await.map_err(server::to_error)
}

#[server]
pub async fn list_drivers() -> Result<Vec<Driver>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    Ok(store.list_drivers().await)
}

#[server]
pub async fn list_vehicles() -> Result<Vec<Vehicle>, ServerFnError> {
    let (store, _) = server::current_user().await?;
    Ok(store.list_vehicles().await)
}

#[server]
pub async fn submit_enquiry(
    name: String,
    email: String,
    company: String,
    message: String,
    channel: String,
) -> Result<(), ServerFnError> {
    use freight_types::ContactForm;

    let store = server::store()?;
    let enquiry = ContactForm {
        name,
        email,
        company,
        message,
        channel,
    }
    .parse()
    .map_err(server::invalid)?;
    store.submit_enquiry(enquiry).await.map_err(server::to_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_text_strips_transport_prefix() {
        let error = ServerFnError::new("Invalid username or password");
        assert_eq!(error_text(&error), "Invalid username or password");
    }
}
