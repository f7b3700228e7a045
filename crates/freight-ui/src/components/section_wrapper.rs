use leptos::html::Div;
use leptos::prelude::*;

use super::reveal::use_reveal;

/// Landing page section that fades up the first time it scrolls into view.
#[component]
pub fn SectionWrapper(
    #[prop(into)] id: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let revealed = use_reveal(node);

    view! {
        <section id=id class=format!("section {class}")>
            <div node_ref=node class="reveal" class:revealed=move || revealed.get()>
                {children()}
            </div>
        </section>
    }
}
