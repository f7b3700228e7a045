use freight_types::Branding;
use leptos::prelude::*;

#[component]
pub fn Logo(#[prop(optional)] large: bool) -> impl IntoView {
    let branding = Branding::from_build_env();

    view! {
        <a href="/" class="logo" class:logo-large=large aria-label=branding.brand_name.clone()>
            <span class="logo-mark">
                <svg viewBox="0 0 32 32" width="32" height="32" aria-hidden="true">
                    <path d="M16 2l3.9 8.6 9.1.9-6.8 6.2 2 9.1L16 22.2l-8.2 4.6 2-9.1L3 11.5l9.1-.9z" />
                </svg>
            </span>
            <span class="logo-text">
                <span class="logo-primary">{branding.logo_primary()}</span>
                <span class="logo-secondary">{branding.logo_secondary()}</span>
            </span>
        </a>
    }
}
