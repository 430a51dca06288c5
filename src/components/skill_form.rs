//! Skill Form Modal Component
//!
//! Modal wrapping the `SkillForm` controller: every input routes
//! through `handle_change`, submission goes through the
//! begin/finish pair so a second click while in flight is ignored.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::{use_app_context, ToastKind};
use crate::skill_form::{SkillForm, PRIORITY_OPTIONS, STATUS_OPTIONS};
use crate::store::{use_schedule_store, DEFAULT_CATEGORIES};

fn event_value(ev: &web_sys::Event) -> String {
    let Some(target) = ev.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        input.value()
    } else if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

#[component]
pub fn SkillFormModal(open: RwSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_schedule_store();

    let (form, set_form) = signal(SkillForm::default());
    let (categories, set_categories) = signal(Vec::<String>::new());

    // skill categories are fetched per domain, separately from the
    // schedule store's list
    Effect::new(move |_| {
        if !open.get() || !ctx.authenticated.get() {
            return;
        }
        spawn_local(async move {
            let api = store.get_untracked().api();
            let names = match api
                .list_categories(crate::api::CategoryKind::Skills)
                .await
            {
                Ok(payload) => payload.into_names(),
                Err(e) => {
                    log::warn!("falling back to default skill categories: {e}");
                    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
                }
            };
            set_categories.set(names);
        });
    });

    let field_change = move |field: &'static str| {
        move |ev: web_sys::Event| {
            let value = event_value(&ev);
            set_form.update(|f| f.handle_change(field, &value));
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut f = form.get_untracked();
        let draft = f.begin_submit();
        set_form.set(f);
        let Some(draft) = draft else { return };
        spawn_local(async move {
            let api = store.get_untracked().api();
            let result = api.create_skill(&draft).await;
            let mut f = form.get_untracked();
            let created = f.finish_submit(result).is_some();
            if created {
                f = SkillForm::default();
            }
            set_form.set(f);
            if created {
                ctx.push_toast(ToastKind::Success, "Skill created".to_string());
                open.set(false);
            }
        });
    };

    let save_category = move |_| {
        spawn_local(async move {
            let api = store.get_untracked().api();
            let mut f = form.get_untracked();
            if f.create_category(api.as_ref()).await {
                set_categories.update(|names| names.push(f.category.clone()));
                ctx.push_toast(ToastKind::Success, "Category created".to_string());
            }
            set_form.set(f);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop" on:click=move |_| open.set(false)>
                <div class="modal" on:click=move |ev| ev.stop_propagation()>
                    <h2>"New skill"</h2>
                    <form on:submit=submit>
                        <input
                            type="text"
                            placeholder="Skill name"
                            prop:value=move || form.get().name
                            on:input=field_change("name")
                        />

                        <Show when=move || !form.get().adding_category>
                            <div class="field-row">
                                <select
                                    prop:value=move || form.get().category
                                    on:change=field_change("category")
                                >
                                    <option value="">"Select a category..."</option>
                                    {move || {
                                        categories
                                            .get()
                                            .into_iter()
                                            .map(|name| {
                                                view! { <option value=name.clone()>{name.clone()}</option> }
                                            })
                                            .collect_view()
                                    }}
                                </select>
                                <button
                                    type="button"
                                    on:click=move |_| set_form.update(|f| f.adding_category = true)
                                >
                                    "+ New"
                                </button>
                            </div>
                        </Show>
                        <Show when=move || form.get().adding_category>
                            <div class="field-row">
                                <input
                                    type="text"
                                    placeholder="New category name"
                                    prop:value=move || form.get().new_category
                                    on:input=field_change("newCategory")
                                />
                                <button type="button" on:click=save_category>"Save"</button>
                                <button
                                    type="button"
                                    on:click=move |_| set_form.update(|f| f.adding_category = false)
                                >
                                    "Cancel"
                                </button>
                            </div>
                        </Show>

                        <select
                            prop:value=move || form.get().status
                            on:change=field_change("status")
                        >
                            {STATUS_OPTIONS
                                .iter()
                                .map(|status| view! { <option value=*status>{*status}</option> })
                                .collect_view()}
                        </select>

                        <label class="progress-label">
                            "Progress"
                            <input
                                type="number"
                                min="0"
                                max="100"
                                prop:value=move || form.get().progress.to_string()
                                on:input=field_change("progress")
                            />
                        </label>

                        <textarea
                            placeholder="Description"
                            prop:value=move || form.get().description
                            on:input=field_change("description")
                        ></textarea>

                        <select
                            prop:value=move || form.get().priority
                            on:change=field_change("priority")
                        >
                            {PRIORITY_OPTIONS
                                .iter()
                                .map(|priority| view! { <option value=*priority>{*priority}</option> })
                                .collect_view()}
                        </select>

                        {move || {
                            form.get()
                                .error
                                .map(|message| view! { <p class="form-error">{message}</p> })
                        }}

                        <div class="modal-actions">
                            <button type="button" on:click=move |_| open.set(false)>
                                "Cancel"
                            </button>
                            <button type="submit" disabled=move || form.get().submitting>
                                {move || if form.get().submitting { "Saving..." } else { "Create skill" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
