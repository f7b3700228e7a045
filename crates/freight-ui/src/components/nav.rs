use freight_types::Branding;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::auth::use_auth;
use crate::components::toast::use_toast;

const LINKS: [(&str, &str, &str); 4] = [
    ("/admin/vouchers", "\u{1F9FE}", "Vouchers"),
    ("/admin/inventory", "\u{1F4E6}", "Inventory"),
    ("/admin/fleet", "\u{1F69A}", "Fleet"),
    ("/admin/users", "\u{1F465}", "Users"),
];

/// Back-office sidebar.
#[component]
pub fn Nav() -> impl IntoView {
    let branding = Branding::from_build_env();
    let location = use_location();
    let auth = use_auth();
    let toast = use_toast();

    let onLogout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            spawn_local(async move {
                if let Err(e) = crate::api::logout().await {
                    toast.error(crate::api::error_text(&e));
                }
                auth.logout();
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = toast;
            auth.logout();
        }
    };

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"\u{2605}"</div>
                <span class="brand-text">{branding.logo_primary()}</span>
            </div>
            <ul class="nav-links">
                {LINKS
                    .iter()
                    .map(|(href, icon, label)| {
                        let href = *href;
                        view! {
                            <li
                                class="nav-item"
                                class:active=move || location.pathname.get().starts_with(href)
                            >
                                <a href=href>
                                    <span class="nav-icon">{*icon}</span>
                                    <span>{*label}</span>
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-footer">
                {move || {
                    auth.user()
                        .map(|user| {
                            let initial = user
                                .display_name()
                                .chars()
                                .next()
                                .map(|c| c.to_uppercase().to_string())
                                .unwrap_or_default();
                            view! {
                                <div class="nav-user">
                                    <span class="avatar">{initial}</span>
                                    <div>
                                        <span class="nav-user-name">{user.display_name().to_string()}</span>
                                        <span class="nav-user-role">{user.role.as_str()}</span>
                                    </div>
                                </div>
                            }
                        })
                }}
                <button class="btn btn-ghost nav-logout" on:click=onLogout>
                    "Sign Out"
                </button>
            </div>
        </nav>
    }
}
