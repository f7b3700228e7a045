use std::time::Duration;

use leptos::prelude::*;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Warning => "toast toast-warning",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "\u{2713}",
            ToastLevel::Error => "\u{2715}",
            ToastLevel::Warning => "!",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastContext {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, message: impl Into<String>, level: ToastLevel) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                message: message.into(),
                level,
            })
        });

        let ctx = *self;
        set_timeout(move || ctx.dismiss(id), TOAST_LIFETIME);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Warning);
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

pub fn use_toast() -> ToastContext {
    expect_context::<ToastContext>()
}

/// Provides toast context and renders the stack in the bottom corner.
/// Place this once near the root of the app.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext::new();
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container" role="status">
            <For each=move || ctx.toasts.get() key=|toast| toast.id let:toast>
                <div class=toast.level.class()>
                    <span class="toast-icon">{toast.level.icon()}</span>
                    <span class="toast-message">{toast.message.clone()}</span>
                    <button
                        class="toast-close"
                        aria-label="Dismiss"
                        on:click=move |_| ctx.dismiss(toast.id)
                    >
                        "\u{00D7}"
                    </button>
                </div>
            </For>
        </div>
    }
}
