use leptos::prelude::*;

/// Slow-moving colour wash behind the hero.
#[component]
pub fn Aurora() -> impl IntoView {
    view! {
        <div class="aurora" aria-hidden="true">
            <div class="aurora-band aurora-band-1"></div>
            <div class="aurora-band aurora-band-2"></div>
            <div class="aurora-band aurora-band-3"></div>
        </div>
    }
}
