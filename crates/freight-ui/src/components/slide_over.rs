use leptos::prelude::*;

/// Right-hand panel over a dimmed backdrop. Clicking the backdrop or the
/// close button calls `on_close`.
#[component]
pub fn SlideOver<F>(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    on_close: F,
    children: ChildrenFn,
) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    let closeBackdrop = on_close.clone();
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get()>
            <div class="slide-over-backdrop" on:click={
                let close = closeBackdrop.clone();
                move |_| close()
            }></div>
            <aside class="slide-over" role="dialog" aria-modal="true">
                <header class="slide-over-header">
                    <h2>{move || title.get()}</h2>
                    <button class="btn-icon" aria-label="Close" on:click={
                        let close = on_close.clone();
                        move |_| close()
                    }>
                        "\u{00D7}"
                    </button>
                </header>
                <div class="slide-over-body">{children.with_value(|c| c())}</div>
            </aside>
        </Show>
    }
}
