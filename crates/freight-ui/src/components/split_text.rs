use leptos::html::Div;
use leptos::prelude::*;

use super::reveal::use_reveal;

/// Heading whose words slide in one after another once visible.
#[component]
pub fn SplitText(
    #[prop(into)] text: String,
    #[prop(into, optional)] class: String,
    /// Delay between consecutive words, in milliseconds.
    #[prop(default = 60)]
    stagger_ms: u32,
) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let revealed = use_reveal(node);

    let words = text
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| {
            let delay = format!("transition-delay: {}ms", index as u32 * stagger_ms);
            view! { <span class="split-word" style=delay>{word.to_string()}" "</span> }
        })
        .collect_view();

    view! {
        <div node_ref=node class=format!("split-text {class}") class:revealed=move || revealed.get() aria-label=text.clone()>
            {words}
        </div>
    }
}
