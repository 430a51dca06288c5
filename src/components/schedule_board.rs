//! Schedule Board Components
//!
//! Day cards with inline item controls, plus the form that creates a
//! new schedule day with its first item.

use chrono::{Duration, Local, NaiveTime};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::models::{
    day, ItemDraft, ItemPatch, Priority, Schedule, ScheduleDraft, ScheduleItem, SchedulePatch,
    ScheduleStatus,
};
use crate::store::use_schedule_store;

fn input_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|target| {
            target
                .dyn_ref::<web_sys::HtmlInputElement>()
                .map(|input| input.value())
        })
        .unwrap_or_default()
}

fn select_value(ev: &web_sys::Event) -> String {
    ev.target()
        .and_then(|target| {
            target
                .dyn_ref::<web_sys::HtmlSelectElement>()
                .map(|select| select.value())
        })
        .unwrap_or_default()
}

/// Form for creating a new schedule day with one initial item
#[component]
pub fn NewScheduleForm() -> impl IntoView {
    let store = use_schedule_store();

    let (date, set_date) = signal(String::new());
    let (title, set_title) = signal(String::new());
    let (category, set_category) = signal(String::from("Other"));
    let (priority, set_priority) = signal(Priority::Medium);
    let (start, set_start) = signal(String::new());
    let (end, set_end) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut items = Vec::new();
        if !title.get().trim().is_empty() {
            items.push(ItemDraft {
                title: title.get().trim().to_string(),
                category: category.get(),
                priority: priority.get(),
                start_time: NaiveTime::parse_from_str(&start.get(), "%H:%M").ok(),
                end_time: NaiveTime::parse_from_str(&end.get(), "%H:%M").ok(),
                completed: false,
            });
        }
        let draft = ScheduleDraft {
            date: day::parse(&date.get()),
            status: ScheduleStatus::Planned,
            items,
        };
        spawn_local(async move {
            let mut s = store.get_untracked();
            if s.create_schedule(draft).await.is_ok() {
                set_title.set(String::new());
                set_start.set(String::new());
                set_end.set(String::new());
            }
            store.set(s);
        });
    };

    view! {
        <form class="new-schedule-form" on:submit=submit>
            <div class="form-row">
                <input
                    type="date"
                    prop:value=move || date.get()
                    on:input=move |ev| set_date.set(input_value(&ev))
                />
                <input
                    type="text"
                    placeholder="First task..."
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(input_value(&ev))
                />
                <select
                    prop:value=move || category.get()
                    on:change=move |ev| set_category.set(select_value(&ev))
                >
                    {move || {
                        store
                            .get()
                            .categories
                            .into_iter()
                            .map(|name| view! { <option value=name.clone()>{name.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <input
                    type="time"
                    prop:value=move || start.get()
                    on:input=move |ev| set_start.set(input_value(&ev))
                />
                <input
                    type="time"
                    prop:value=move || end.get()
                    on:input=move |ev| set_end.set(input_value(&ev))
                />
                <button type="submit">"Add day"</button>
            </div>
            <div class="priority-row">
                {[Priority::Low, Priority::Medium, Priority::High]
                    .into_iter()
                    .map(|level| {
                        let is_selected = move || priority.get() == level;
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    if is_selected() { "priority-btn active" } else { "priority-btn" }
                                }
                                on:click=move |_| set_priority.set(level)
                            >
                                {level.as_str()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </form>
    }
}

/// All cached schedule days, newest last
#[component]
pub fn ScheduleBoard() -> impl IntoView {
    let store = use_schedule_store();

    view! {
        <div class="schedule-board">
            <Show when=move || store.get().loading>
                <p class="loading">"Loading schedules..."</p>
            </Show>
            {move || {
                store
                    .get()
                    .error
                    .map(|message| view! { <p class="error-banner">{message}</p> })
            }}
            <For
                each=move || store.get().schedules
                key=|schedule| schedule.id.clone()
                children=move |schedule: Schedule| view! { <ScheduleCard schedule=schedule /> }
            />
        </div>
    }
}

#[component]
fn ScheduleCard(schedule: Schedule) -> impl IntoView {
    let store = use_schedule_store();

    let items = schedule.items.clone();
    let card_id = schedule.id.clone();
    let date = schedule.date;
    let day_type = schedule.day_type;
    let status = schedule.status;

    let cycle_status = {
        let id = card_id.clone();
        move |_| {
            let id = id.clone();
            let next = match status {
                ScheduleStatus::Planned => ScheduleStatus::InProgress,
                ScheduleStatus::InProgress => ScheduleStatus::Completed,
                ScheduleStatus::Completed => ScheduleStatus::Planned,
            };
            spawn_local(async move {
                let mut s = store.get_untracked();
                let _ = s
                    .update_schedule(
                        &id,
                        SchedulePatch {
                            status: Some(next),
                            ..Default::default()
                        },
                    )
                    .await;
                store.set(s);
            });
        }
    };

    let copy_to_next_day = {
        let source = schedule.clone();
        move |_| {
            let source = source.clone();
            spawn_local(async move {
                let mut s = store.get_untracked();
                let _ = s.copy_schedule(&source, source.date + Duration::days(1)).await;
                store.set(s);
            });
        }
    };

    let delete = {
        let id = card_id.clone();
        move |_| {
            let id = id.clone();
            spawn_local(async move {
                let mut s = store.get_untracked();
                let _ = s.delete_schedule(&id).await;
                store.set(s);
            });
        }
    };

    view! {
        <section class="schedule-card">
            <header class="schedule-header">
                <h2>{date.format("%a %Y-%m-%d").to_string()}</h2>
                <span class="day-type">{day_type.as_str()}</span>
                <button class="status-btn" on:click=cycle_status>{status.as_str()}</button>
                <button class="copy-btn" on:click=copy_to_next_day>"Copy to next day"</button>
                <button class="delete-btn" on:click=delete>"×"</button>
            </header>
            <ul class="item-list">
                {items
                    .into_iter()
                    .map(|item| {
                        let schedule_id = card_id.clone();
                        view! { <ItemRow schedule_id=schedule_id item=item /> }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn ItemRow(schedule_id: String, item: ScheduleItem) -> impl IntoView {
    let store = use_schedule_store();

    let toggle = {
        let sid = schedule_id.clone();
        let iid = item.id.clone();
        let completed = item.completed;
        move |_| {
            let sid = sid.clone();
            let iid = iid.clone();
            spawn_local(async move {
                let mut s = store.get_untracked();
                let _ = s
                    .update_schedule_item(
                        &sid,
                        &iid,
                        ItemPatch {
                            completed: Some(!completed),
                            ..Default::default()
                        },
                    )
                    .await;
                store.set(s);
            });
        }
    };

    let copy_to_tomorrow = {
        let source = item.clone();
        move |_| {
            let source = source.clone();
            spawn_local(async move {
                let tomorrow = Local::now().date_naive() + Duration::days(1);
                let mut s = store.get_untracked();
                let _ = s.copy_schedule_item(&source, tomorrow).await;
                store.set(s);
            });
        }
    };

    let remove = {
        let sid = schedule_id.clone();
        let iid = item.id.clone();
        move |_| {
            let sid = sid.clone();
            let iid = iid.clone();
            spawn_local(async move {
                let mut s = store.get_untracked();
                let _ = s.delete_schedule_item(&sid, &iid).await;
                store.set(s);
            });
        }
    };

    let time_range = match (item.start_time, item.end_time) {
        (Some(start), Some(end)) => {
            format!("{}-{}", start.format("%H:%M"), end.format("%H:%M"))
        }
        _ => String::new(),
    };
    let priority_class = match item.priority {
        Priority::Low => "priority-chip low",
        Priority::Medium => "priority-chip medium",
        Priority::High => "priority-chip high",
    };
    let completed = item.completed;
    let title_class = if completed { "item-title done" } else { "item-title" };

    view! {
        <li class="item-row">
            <input type="checkbox" prop:checked=completed on:change=toggle />
            <span class=title_class>{item.title.clone()}</span>
            <span class="category-chip">{item.category.clone()}</span>
            <span class=priority_class>{item.priority.as_str()}</span>
            <span class="item-time">{time_range}</span>
            <button class="copy-btn" on:click=copy_to_tomorrow>"Copy to tomorrow"</button>
            <button class="delete-btn" on:click=remove>"×"</button>
        </li>
    }
}
