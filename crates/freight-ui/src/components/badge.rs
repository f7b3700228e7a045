use freight_types::display::BadgeVariant;
use leptos::prelude::*;

#[component]
pub fn Badge(variant: BadgeVariant, #[prop(into)] label: String) -> impl IntoView {
    view! { <span class=variant.css_class()>{label}</span> }
}
