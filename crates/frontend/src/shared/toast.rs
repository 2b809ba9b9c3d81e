//! Toast notifications shown in a corner of the page

use forms::{Notify, NotifyKind};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: NotifyKind,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, message: impl Into<String>, kind: NotifyKind) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                message: message.into(),
                kind,
            })
        });

        let toasts = self.toasts;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            let _ = toasts.try_update(|list| list.retain(|t| t.id != id));
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notify for ToastService {
    fn notify(&self, message: &str, kind: NotifyKind) {
        match kind {
            NotifyKind::Success => log::info!("toast: {}", message),
            NotifyKind::Error => log::warn!("toast: {}", message),
        }
        self.push(message, kind);
    }
}

pub fn use_toasts() -> ToastService {
    use_context::<ToastService>().expect("ToastService not found. Render ToastHost first.")
}

/// Provides [`ToastService`] and renders the active toasts
#[component]
pub fn ToastHost(children: Children) -> impl IntoView {
    let service = ToastService::new();
    provide_context(service);
    let toasts = service.toasts;

    view! {
        {children()}
        <div class="toast-stack">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.kind {
                        NotifyKind::Success => "toast toast--success",
                        NotifyKind::Error => "toast toast--error",
                    };
                    view! {
                        <div class=class on:click=move |_| service.dismiss(id)>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
