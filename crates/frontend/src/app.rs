use crate::shared::entity_form::EntityFormModal;
use crate::shared::i18n::{use_i18n, I18nProvider};
use crate::shared::toast::ToastHost;
use crate::system::auth::storage;
use contracts::domain::common::EntityKind;
use leptos::prelude::*;

/// Form currently shown in the modal
#[derive(Clone, Debug, PartialEq, Eq)]
struct OpenForm {
    kind: EntityKind,
    record_id: Option<String>,
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <I18nProvider>
            <ToastHost>
                <AdminHome />
            </ToastHost>
        </I18nProvider>
    }
}

#[component]
fn AdminHome() -> impl IntoView {
    let i18n = use_i18n();
    let open_form = RwSignal::new(None::<OpenForm>);
    let edit_kind = RwSignal::new(EntityKind::Mosque);
    let edit_id = RwSignal::new(String::new());
    let token = RwSignal::new(storage::get_access_token().unwrap_or_default());

    let close = Callback::new(move |_| open_form.set(None));

    let open_edit = move |_| {
        let id = edit_id.get_untracked().trim().to_string();
        if !id.is_empty() {
            open_form.set(Some(OpenForm {
                kind: edit_kind.get_untracked(),
                record_id: Some(id),
            }));
        }
    };

    let save_token = move |_| {
        let value = token.get_untracked();
        if value.trim().is_empty() {
            storage::clear_access_token();
        } else {
            storage::save_access_token(value.trim());
        }
    };

    view! {
        <div class="page" dir=move || i18n.locale.get().dir()>
            <header class="page__header">
                <h1>{move || i18n.t("app.title")}</h1>
                <button class="button button--secondary" on:click=move |_| i18n.toggle()>
                    {move || i18n.t("app.language")}
                </button>
            </header>

            <section class="page__section">
                <input
                    class="form__input"
                    type="password"
                    placeholder="token"
                    prop:value=move || token.get()
                    on:input=move |ev| token.set(event_target_value(&ev))
                />
                <button class="button button--secondary" on:click=save_token>"OK"</button>
            </section>

            <section class="page__section">
                {EntityKind::all()
                    .into_iter()
                    .map(|kind| view! {
                        <button
                            class="button button--primary"
                            on:click=move |_| open_form.set(Some(OpenForm { kind, record_id: None }))
                        >
                            {move || format!("{} {}", i18n.t("form.create"), i18n.t(kind.title_key()))}
                        </button>
                    })
                    .collect_view()}
            </section>

            <section class="page__section">
                <select
                    class="form__select"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(kind) = EntityKind::all().into_iter().find(|k| k.as_str() == value) {
                            edit_kind.set(kind);
                        }
                    }
                >
                    {EntityKind::all()
                        .into_iter()
                        .map(|kind| view! {
                            <option value=kind.as_str()>{move || i18n.t(kind.title_key())}</option>
                        })
                        .collect_view()}
                </select>
                <input
                    class="form__input"
                    type="text"
                    placeholder=move || i18n.t("form.record_id")
                    prop:value=move || edit_id.get()
                    on:input=move |ev| edit_id.set(event_target_value(&ev))
                />
                <button class="button button--secondary" on:click=open_edit>
                    {move || i18n.t("form.edit")}
                </button>
            </section>

            {move || open_form.get().map(|form| view! {
                <EntityFormModal kind=form.kind record_id=form.record_id on_close=close />
            })}
        </div>
    }
}
