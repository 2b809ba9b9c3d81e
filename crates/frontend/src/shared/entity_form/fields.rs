//! Input widgets, one per field kind

use super::file_input::picked_file;
use super::view_model::EntityFormVm;
use crate::shared::i18n::use_i18n;
use contracts::shared::forms::FieldDescriptor;
use forms::SelectionState;
use leptos::prelude::*;

/// Label, required marker and error line around an input
#[component]
fn FieldShell(vm: EntityFormVm, field: FieldDescriptor, children: Children) -> impl IntoView {
    let i18n = use_i18n();
    let name = field.name.clone();
    let input_id = name.clone();
    let label_key = field.label.clone();
    let error = move || vm.field_error(&name);
    let group_class = format!("form__group form__group--{}", field.kind.as_str());

    view! {
        <div class=group_class>
            <label class="form__label" for=input_id>
                {move || i18n.t(&label_key)}
                {field.required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {children()}
            {move || error().map(|msg| view! { <div class="form__error">{msg}</div> })}
        </div>
    }
}

/// Text, email and date inputs
#[component]
pub fn TextField(
    vm: EntityFormVm,
    field: FieldDescriptor,
    /// HTML input type
    input_type: &'static str,
) -> impl IntoView {
    let name = field.name.clone();
    let input_id = name.clone();
    let value_name = name.clone();
    let locked_name = name.clone();

    view! {
        <FieldShell vm=vm field=field>
            <input
                id=input_id
                class="form__input"
                type=input_type
                prop:value=move || vm.value_text(&value_name)
                disabled=move || vm.is_locked(&locked_name)
                on:input=move |ev| vm.set_text(&name, event_target_value(&ev))
            />
        </FieldShell>
    }
}

/// Select fed by static or fetched options
#[component]
pub fn SelectField(vm: EntityFormVm, field: FieldDescriptor) -> impl IntoView {
    let i18n = use_i18n();
    // Static option labels are translation keys, fetched ones are names
    let translate_labels = field.static_options().is_some();
    let name = field.name.clone();
    let input_id = name.clone();
    let state_name = name.clone();
    let locked_name = name.clone();
    let options_name = name.clone();
    let selected_name = name.clone();
    let empty_name = name.clone();

    let placeholder = move || match vm.state(&state_name) {
        SelectionState::Loading => i18n.t("form.loading"),
        _ => i18n.t("form.choose"),
    };

    view! {
        <FieldShell vm=vm field=field>
            <select
                id=input_id
                class="form__select"
                disabled=move || vm.is_locked(&locked_name)
                on:change=move |ev| vm.set_text(&name, event_target_value(&ev))
            >
                <option value="" selected=move || vm.value_text(&empty_name).is_empty()>
                    {placeholder}
                </option>
                <For
                    each=move || vm.options(&options_name)
                    key=|option| option.value.clone()
                    children=move |option| {
                        let value = option.value.clone();
                        let selected_name = selected_name.clone();
                        let label = option.label.clone();
                        let label = move || {
                            if translate_labels { i18n.t(&label) } else { label.clone() }
                        };
                        view! {
                            <option
                                value=option.value
                                selected=move || vm.value_text(&selected_name) == value
                            >
                                {label}
                            </option>
                        }
                    }
                />
            </select>
        </FieldShell>
    }
}

/// Image uploaded as soon as it is picked, with a preview of the stored one
#[component]
pub fn ImageField(vm: EntityFormVm, field: FieldDescriptor) -> impl IntoView {
    let name = field.name.clone();
    let input_id = name.clone();
    let preview_name = name.clone();
    let locked_name = name.clone();
    let clear_name = name.clone();

    let preview = Signal::derive(move || {
        vm.file_value(&preview_name)
            .and_then(|f| f.resolved_url)
            .filter(|url| !url.is_empty())
    });

    view! {
        <FieldShell vm=vm field=field>
            {move || preview.get().map(|url| view! { <img class="form__preview" src=url alt="" /> })}
            <input
                id=input_id
                class="form__input"
                type="file"
                accept="image/*"
                disabled=move || vm.is_locked(&locked_name)
                on:change=move |ev| {
                    if let Some(file) = picked_file(&ev) {
                        vm.choose_file(&name, file);
                    }
                }
            />
            {move || {
                let clear_name = clear_name.clone();
                preview.get().map(|_| view! {
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| vm.clear_file(&clear_name)
                    >
                        "×"
                    </button>
                })
            }}
        </FieldShell>
    }
}

/// File kept on the device and sent along with the submission
#[component]
pub fn DeviceFileField(vm: EntityFormVm, field: FieldDescriptor) -> impl IntoView {
    let i18n = use_i18n();
    let name = field.name.clone();
    let input_id = name.clone();
    let current_name = name.clone();
    let locked_name = name.clone();

    let current = move || {
        vm.file_value(&current_name).and_then(|f| match (f.file, f.resolved_url) {
            (Some(file), _) => Some(view! { <span>{file.name}</span> }.into_any()),
            (None, Some(url)) if !url.is_empty() => Some(
                view! {
                    <a href=url target="_blank" rel="noopener">
                        {move || i18n.t("form.current_file")}
                    </a>
                }
                .into_any(),
            ),
            _ => None,
        })
    };

    view! {
        <FieldShell vm=vm field=field>
            <div class="form__file-current">{current}</div>
            <input
                id=input_id
                class="form__input"
                type="file"
                disabled=move || vm.is_locked(&locked_name)
                on:change=move |ev| {
                    if let Some(file) = picked_file(&ev) {
                        vm.choose_file(&name, file);
                    }
                }
            />
        </FieldShell>
    }
}
