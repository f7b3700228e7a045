use leptos::prelude::*;

#[component]
pub fn Tooltip(#[prop(into)] text: String, children: Children) -> impl IntoView {
    let (visible, setVisible) = signal(false);

    view! {
        <span
            class="tooltip-anchor"
            on:mouseenter=move |_| setVisible.set(true)
            on:mouseleave=move |_| setVisible.set(false)
            on:focusin=move |_| setVisible.set(true)
            on:focusout=move |_| setVisible.set(false)
        >
            {children()}
            <span class="tooltip" class:visible=move || visible.get() role="tooltip">
                {text}
            </span>
        </span>
    }
}
