use leptos::prelude::*;

#[component]
pub fn ServiceCard(
    title: &'static str,
    description: &'static str,
    icon: &'static str,
) -> impl IntoView {
    view! {
        <article class="service-card">
            <div class="service-icon" aria-hidden="true">{icon}</div>
            <h3>{title}</h3>
            <p>{description}</p>
        </article>
    }
}
