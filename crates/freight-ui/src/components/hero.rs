use freight_types::Branding;
use leptos::prelude::*;

use super::aurora::Aurora;
use super::split_text::SplitText;

#[component]
pub fn Hero() -> impl IntoView {
    let branding = Branding::from_build_env();

    view! {
        <header class="hero">
            <Aurora />
            <div class="hero-content">
                <p class="hero-eyebrow">{branding.brand_name.clone()}</p>
                <SplitText text="Dependable Transport & Trading for Your Region" class="hero-title" />
                <p class="hero-subtitle">
                    "Road transport, sourcing and warehousing handled by one accountable team, "
                    "from the first quote to the final delivery."
                </p>
                <div class="hero-actions">
                    <a href="#contact" class="btn btn-primary">"Get a Quote"</a>
                    <a href="#story" class="btn btn-ghost">"Our Business Commitment"</a>
                </div>
            </div>
            <div class="hero-truck" aria-hidden="true">
                <div class="truck-body"></div>
                <div class="truck-cab"></div>
                <div class="truck-wheel truck-wheel-front"></div>
                <div class="truck-wheel truck-wheel-back"></div>
            </div>
            <a href="#partners" class="hero-scroll">"Explore"</a>
        </header>
    }
}
