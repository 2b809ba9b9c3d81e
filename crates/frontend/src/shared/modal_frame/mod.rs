use crate::shared::i18n::use_i18n;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Overlay + surface with a title bar and a close button.
///
/// The surface follows the current locale direction.
#[component]
pub fn ModalFrame(
    /// Heading shown in the title bar
    #[prop(into)]
    title: Signal<String>,
    /// Called when the modal should close (overlay click, close button).
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let i18n = use_i18n();
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Close only when press and release both happened on the overlay itself.
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // Deferred: the overlay must not be removed during its own click dispatch.
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    view! {
        <div
            class="modal-overlay"
            on:mousedown=handle_overlay_mouse_down
            on:click=handle_overlay_click
        >
            <div
                class="modal"
                dir=move || i18n.locale.get().dir()
                on:click=|ev: ev::MouseEvent| ev.stop_propagation()
            >
                <div class="modal__header">
                    <h3 class="modal__title">{move || title.get()}</h3>
                    <button
                        class="modal__close"
                        type="button"
                        aria-label=move || i18n.t("form.cancel")
                        on:click=move |_| on_close.run(())
                    >
                        "×"
                    </button>
                </div>
                <div class="modal__body">{children()}</div>
            </div>
        </div>
    }
}
