//! Client-side record of who is signed in.
//!
//! The HttpOnly cookie is what the server trusts; this context mirrors the
//! token and user summary into localStorage so the back office can show the
//! operator's name and survive reloads without a round trip.

use freight_types::session::{clear_session, load_session, persist_session, KeyValueStorage};
use freight_types::{AuthSession, SessionUser};
use leptos::prelude::*;

pub const AFTER_LOGIN: &str = "/admin/vouchers";
pub const AFTER_LOGOUT: &str = "/login";

#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Option<AuthSession>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new(None),
        }
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    pub fn token(&self) -> Option<String> {
        self.session.with(|s| s.as_ref().map(|s| s.token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    /// Stores the session and moves to the back office.
    pub fn login(&self, session: AuthSession) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = crate::storage::BrowserStorage::local() {
                self.login_with(&storage, session);
                navigate_to(AFTER_LOGIN);
                return;
            }
        }
        self.session.set(Some(session));
        navigate_to(AFTER_LOGIN);
    }

    /// Forgets the session and returns to the sign-in page.
    pub fn logout(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = crate::storage::BrowserStorage::local() {
                self.logout_with(&storage);
                navigate_to(AFTER_LOGOUT);
                return;
            }
        }
        self.session.set(None);
        navigate_to(AFTER_LOGOUT);
    }

    pub fn login_with(&self, storage: &impl KeyValueStorage, session: AuthSession) {
        if let Err(e) = persist_session(storage, &session) {
            leptos::logging::warn!("could not persist session: {e}");
        }
        self.session.set(Some(session));
    }

    pub fn logout_with(&self, storage: &impl KeyValueStorage) {
        clear_session(storage);
        self.session.set(None);
    }

    pub fn restore_from(&self, storage: &impl KeyValueStorage) {
        self.session.set(load_session(storage));
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(unused_variables)]
fn navigate_to(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = window().location().set_href(path);
    }
}

/// Provides [`AuthContext`] to everything below it.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    {
        Effect::new(move |_| {
            if let Some(storage) = crate::storage::BrowserStorage::local() {
                auth.restore_from(&storage);
            }
        });
    }

    children()
}

/// Panics when called outside an [`AuthProvider`].
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
