use leptos::html::Div;
use leptos::prelude::*;

use super::reveal::use_reveal;

struct StoryStep {
    title: &'static str,
    body: &'static str,
}

const STEPS: [StoryStep; 4] = [
    StoryStep {
        title: "From Local Ports...",
        body: "Our journey begins at the regional maritime hubs, where we facilitate the flow of essential goods.",
    },
    StoryStep {
        title: "...To Distribution",
        body: "Efficient transfer and strategic sorting ensure your goods are handled with regional expertise.",
    },
    StoryStep {
        title: "Reliable Transport",
        body: "Our dedicated local network delivers with precision and speed to your specific destination.",
    },
    StoryStep {
        title: "Business Growth",
        body: "Supporting your business objectives with dependable and localized transport solutions.",
    },
];

#[component]
pub fn StoryScroll() -> impl IntoView {
    view! {
        <section id="story" class="section story">
            <div class="section-heading">
                <h2>"Our Commitment in Motion"</h2>
                <p>"Reliable transport and trading for the heart of the regional supply chain"</p>
            </div>
            <ol class="story-track">
                {STEPS
                    .iter()
                    .enumerate()
                    .map(|(index, step)| view! { <StoryCard index=index title=step.title body=step.body /> })
                    .collect_view()}
            </ol>
        </section>
    }
}

#[component]
fn StoryCard(index: usize, title: &'static str, body: &'static str) -> impl IntoView {
    let node = NodeRef::<Div>::new();
    let revealed = use_reveal(node);
    let side = if index % 2 == 0 { "story-step left" } else { "story-step right" };

    view! {
        <li class=side>
            <div node_ref=node class="story-card reveal" class:revealed=move || revealed.get()>
                <span class="story-index">{format!("{:02}", index + 1)}</span>
                <h3>{title}</h3>
                <p>{body}</p>
            </div>
        </li>
    }
}
