use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::api::{error_text, ChangePassword};
use crate::components::toast::use_toast;

#[component]
pub fn ChangePasswordPage() -> impl IntoView {
    let toast = use_toast();
    let query = use_query_map();
    let username = move || query.with(|q| q.get("username").unwrap_or_default());

    let changeAction = ServerAction::<ChangePassword>::new();
    let changeValue = changeAction.value();

    Effect::new(move |_| {
        if let Some(Ok(())) = changeValue.get() {
            toast.success("Password changed, please sign in again");
            #[cfg(feature = "hydrate")]
            {
                set_timeout(
                    || {
                        let _ = window().location().set_href(crate::auth::AFTER_LOGOUT);
                    },
                    std::time::Duration::from_millis(800),
                );
            }
        }
    });

    let errorMessage = move || {
        changeValue
            .get()
            .and_then(|result| result.err())
            .map(|e| error_text(&e))
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <h1>"Set a New Password"</h1>
                    <p>"Your account requires a password change before first use."</p>
                </div>

                {move || errorMessage().map(|message| view! { <div class="login-error">{message}</div> })}

                <ActionForm action=changeAction>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input type="text" id="username" name="username" prop:value=username required />
                    </div>
                    <div class="form-group">
                        <label for="old_password">"Current Password"</label>
                        <input type="password" id="old_password" name="old_password" required />
                    </div>
                    <div class="form-group">
                        <label for="new_password">"New Password"</label>
                        <input type="password" id="new_password" name="new_password" minlength="8" required />
                    </div>
                    <div class="form-group">
                        <label for="confirm_password">"Confirm Password"</label>
                        <input type="password" id="confirm_password" name="confirm_password" minlength="8" required />
                    </div>
                    <button type="submit" class="btn btn-primary">"Update Password"</button>
                </ActionForm>
            </div>
        </div>
    }
}
