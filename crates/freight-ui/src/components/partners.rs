use leptos::prelude::*;

pub const PARTNERS: [&str; 8] = [
    "LOGI-CORP",
    "TRANS-ROUTE",
    "PORT-SYNC",
    "OCEAN-DRIVE",
    "SHIP-WISE",
    "FAST-FIX",
    "BLUE-LINE",
    "NET-CARGO",
];

/// Endless marquee of partner names; the list is rendered twice so the
/// animation can loop without a gap.
#[component]
pub fn Partners() -> impl IntoView {
    let names = || {
        PARTNERS
            .iter()
            .map(|name| view! { <span class="partner">{*name}</span> })
            .collect_view()
    };

    view! {
        <section id="partners" class="partners">
            <p class="partners-label">"Trusted along the supply chain"</p>
            <div class="marquee">
                <div class="marquee-track">{names()} {names()}</div>
            </div>
        </section>
    }
}
