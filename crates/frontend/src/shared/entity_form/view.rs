use super::fields::{DeviceFileField, ImageField, SelectField, TextField};
use super::view_model::EntityFormVm;
use crate::shared::i18n::use_i18n;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::toast::use_toasts;
use contracts::domain::common::EntityKind;
use contracts::shared::forms::{FieldDescriptor, FieldKind};
use leptos::prelude::*;

fn field_view(vm: EntityFormVm, field: FieldDescriptor) -> AnyView {
    match field.kind {
        FieldKind::Text => view! { <TextField vm=vm field=field input_type="text" /> }.into_any(),
        FieldKind::Email => view! { <TextField vm=vm field=field input_type="email" /> }.into_any(),
        FieldKind::Date => view! { <TextField vm=vm field=field input_type="date" /> }.into_any(),
        FieldKind::Select => view! { <SelectField vm=vm field=field /> }.into_any(),
        FieldKind::ImagePicker => view! { <ImageField vm=vm field=field /> }.into_any(),
        FieldKind::DeviceFile => view! { <DeviceFileField vm=vm field=field /> }.into_any(),
    }
}

/// Create/edit modal for any [`EntityKind`]
#[component]
pub fn EntityFormModal(
    kind: EntityKind,
    /// Record to edit; `None` opens an empty create form
    record_id: Option<String>,
    on_close: Callback<()>,
    #[prop(optional)]
    on_saved: Option<Callback<()>>,
) -> impl IntoView {
    let i18n = use_i18n();
    let toasts = use_toasts();

    let vm = match EntityFormVm::new(kind, record_id, i18n, toasts) {
        Ok(vm) => vm,
        Err(e) => {
            log::error!("invalid form schema for {}: {}", kind.as_str(), e);
            return view! {
                <ModalFrame title=Signal::derive(move || i18n.t(kind.title_key())) on_close=on_close>
                    <div class="warning-box">{e.to_string()}</div>
                </ModalFrame>
            }
            .into_any();
        }
    };

    let handle_saved = Callback::new(move |_| {
        if let Some(cb) = on_saved {
            cb.run(());
        }
        on_close.run(());
    });

    view! {
        <ModalFrame title=Signal::derive(move || vm.title()) on_close=on_close>
            <form
                class="form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    vm.save(handle_saved);
                }
            >
                {move || vm.loading.get().then(|| view! {
                    <div class="form__loading">{i18n.t("form.loading")}</div>
                })}
                {move || vm.error.get().map(|msg| view! {
                    <div class="warning-box">{msg}</div>
                })}
                {vm.fields.get_value().into_iter().map(|field| field_view(vm, field)).collect_view()}
                <div class="form__actions">
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || !vm.can_save()
                    >
                        {move || i18n.t("form.save")}
                    </button>
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| on_close.run(())
                    >
                        {move || i18n.t("form.cancel")}
                    </button>
                </div>
            </form>
        </ModalFrame>
    }
    .into_any()
}
