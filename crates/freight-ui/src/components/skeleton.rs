use leptos::prelude::*;

/// Shimmering placeholder block shown while data loads.
#[component]
pub fn Skeleton(#[prop(into, optional)] class: String) -> impl IntoView {
    view! { <div class=format!("skeleton {class}")></div> }
}

/// Placeholder rows for a table that has not loaded yet.
#[component]
pub fn SkeletonRows(#[prop(default = 5)] rows: usize) -> impl IntoView {
    view! {
        <div class="skeleton-table">
            {(0..rows)
                .map(|_| {
                    view! {
                        <div class="skeleton-row">
                            <Skeleton class="skeleton-cell wide" />
                            <Skeleton class="skeleton-cell" />
                            <Skeleton class="skeleton-cell" />
                            <Skeleton class="skeleton-cell narrow" />
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
