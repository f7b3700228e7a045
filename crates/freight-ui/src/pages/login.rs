use freight_types::Branding;
use leptos::prelude::*;

use crate::api::{error_text, Login, LoginOutcome};
use crate::auth::use_auth;
use crate::components::logo::Logo;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let branding = Branding::from_build_env();
    let loginAction = ServerAction::<Login>::new();
    let loginValue = loginAction.value();
    let pending = loginAction.pending();

    Effect::new(move |_| {
        match loginValue.get() {
            Some(Ok(LoginOutcome::Session(session))) => auth.login(session),
            #[allow(unused_variables)]
            Some(Ok(LoginOutcome::PasswordChangeRequired { username })) => {
                #[cfg(feature = "hydrate")]
                {
                    let target = format!("/change-password?username={username}");
                    let _ = window().location().set_href(&target);
                }
            }
            _ => {}
        }
    });

    let errorMessage = move || {
        loginValue
            .get()
            .and_then(|result| result.err())
            .map(|e| error_text(&e))
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <Logo />
                    <h1>"Back Office"</h1>
                    <p>{format!("Sign in to manage {}", branding.brand_name)}</p>
                </div>

                {move || errorMessage().map(|message| view! { <div class="login-error">{message}</div> })}

                <ActionForm action=loginAction>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            type="text"
                            id="username"
                            name="username"
                            autocomplete="username"
                            placeholder="Enter your username"
                            required
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            placeholder="Enter your password"
                            required
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing In..." } else { "Sign In" }}
                    </button>
                </ActionForm>
                <a href="/" class="login-back">"\u{2190} Back to site"</a>
            </div>
        </div>
    }
}
