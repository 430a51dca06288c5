//! Planmate Frontend App
//!
//! Wires the context, the schedule store and the top-level layout.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{HttpApi, ScheduleApi, ScheduleQuery};
use crate::components::{NewScheduleForm, ScheduleBoard, SkillFormModal, StatsPanel, ToastTray};
use crate::context::AppContext;
use crate::store::{fetch_categories_on, fetch_schedules_on, ScheduleStore, StoreSignal};

/// Base path the backend is mounted under
const API_BASE: &str = "/api";

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let api: Rc<dyn ScheduleApi> = Rc::new(HttpApi::new(API_BASE));
    let store: StoreSignal = RwSignal::new_local(ScheduleStore::new(api, ctx.notifier()));
    provide_context(store);

    let show_skill_form = RwSignal::new(false);

    // session handling lives outside this crate; the gate defaults on
    ctx.authenticated.set(true);

    // load schedules and categories whenever the session gate flips;
    // the helpers claim `loading` and the category flag on the signal
    // before awaiting, so the board can render the in-flight state
    Effect::new(move |_| {
        let authenticated = ctx.authenticated.get();
        store.update(|s| s.set_authenticated(authenticated));
        spawn_local(async move {
            fetch_schedules_on(store, ScheduleQuery::default()).await;
            let _ = fetch_categories_on(store).await;
        });
    });

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Planmate"</h1>
                <button class="primary-btn" on:click=move |_| show_skill_form.set(true)>
                    "+ Add skill"
                </button>
            </header>

            <StatsPanel />

            <main class="main-content">
                <NewScheduleForm />
                <ScheduleBoard />
            </main>

            <SkillFormModal open=show_skill_form />
            <ToastTray />
        </div>
    }
}
