//! Stats Panel Component
//!
//! Read-only cards over the derived stats snapshot.

use leptos::prelude::*;

use crate::store::use_schedule_store;

#[component]
pub fn StatsPanel() -> impl IntoView {
    let store = use_schedule_store();
    let stats = move || store.get().stats;

    view! {
        <div class="stats-panel">
            <div class="stat-card">
                <span class="stat-value">{move || stats().items_today}</span>
                <span class="stat-label">"Due today"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || format!("{:.0}%", stats().completion_rate)}</span>
                <span class="stat-label">"Completed"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || format!("{:.1}h", stats().total_hours)}</span>
                <span class="stat-label">"Scheduled"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{move || stats().high_priority}</span>
                <span class="stat-label">"High priority"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">
                    {move || stats().top_category.unwrap_or_else(|| "-".to_string())}
                </span>
                <span class="stat-label">
                    {move || format!("Top category ({})", stats().top_category_count)}
                </span>
            </div>
        </div>
    }
}
