//! Schedule Store
//!
//! Single authoritative in-memory cache of schedule records plus the
//! derived stats snapshot. Every mutation round-trips to the backend
//! and reconciles the cache from the server's returned representation;
//! the cache is never the source of truth.
//!
//! The UI holds one `ScheduleStore` in a signal and writes the mutated
//! clone back when an operation completes, so patches apply in
//! completion order (last write wins when user actions interleave).

use std::future::Future;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use leptos::prelude::*;

use crate::api::{ApiError, ApiResult, CategoryKind, ScheduleApi, ScheduleQuery};
use crate::context::ToastKind;
use crate::models::{
    DayType, ItemDraft, ItemPatch, NewSchedule, Schedule, ScheduleDraft, ScheduleItem,
    SchedulePatch, ScheduleStatus,
};
use crate::stats::{self, Stats};

/// Categories used when the backend cannot provide any
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "DSA",
    "System Design",
    "Development",
    "Learning",
    "Problem Solving",
    "Other",
];

/// Client-side cache of schedules with derived statistics
#[derive(Clone)]
pub struct ScheduleStore {
    api: Rc<dyn ScheduleApi>,
    notify: Rc<dyn Fn(ToastKind, String)>,
    /// Session gate; fetches are no-ops while false
    pub authenticated: bool,
    /// Fetch/creation order, one schedule per calendar date by convention
    pub schedules: Vec<Schedule>,
    pub stats: Stats,
    pub loading: bool,
    /// Last failure message, if any
    pub error: Option<String>,
    pub categories: Vec<String>,
    /// In-flight flag preventing duplicate concurrent category fetches
    pub fetching_categories: bool,
}

impl ScheduleStore {
    pub fn new(api: Rc<dyn ScheduleApi>, notify: Rc<dyn Fn(ToastKind, String)>) -> Self {
        Self {
            api,
            notify,
            authenticated: false,
            schedules: Vec::new(),
            stats: Stats::default(),
            loading: false,
            error: None,
            categories: Vec::new(),
            fetching_categories: false,
        }
    }

    /// Shared API handle, for callers outside the schedule domain
    /// (skill creation goes through the same backend seam)
    pub fn api(&self) -> Rc<dyn ScheduleApi> {
        self.api.clone()
    }

    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.authenticated = authenticated;
    }

    /// The cached schedule for a calendar day, if one exists
    pub fn schedule_for(&self, date: NaiveDate) -> Option<&Schedule> {
        self.schedules.iter().find(|s| s.date == date)
    }

    fn recompute_stats(&mut self) {
        self.stats = stats::calculate(&self.schedules, Local::now().date_naive());
    }

    fn notify_success(&self, message: impl Into<String>) {
        (self.notify)(ToastKind::Success, message.into());
    }

    fn notify_error(&self, message: impl Into<String>) {
        (self.notify)(ToastKind::Error, message.into());
    }

    /// Swap the cache entry matching `updated` in place, preserving
    /// collection order; appends when the id is not present yet
    fn replace_schedule(&mut self, updated: Schedule) {
        match self.schedules.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => *slot = updated,
            None => self.schedules.push(updated),
        }
    }

    fn require_id(value: &str, what: &str) -> ApiResult<()> {
        if value.is_empty() {
            return Err(ApiError::Validation(format!("{what} id is required")));
        }
        Ok(())
    }

    /// Load schedules matching `query`, replacing the cache wholesale.
    ///
    /// On failure the cache and stats reset to empty and the error is
    /// recorded; `loading` clears on every exit path.
    pub async fn fetch_schedules(&mut self, query: ScheduleQuery) {
        if !self.authenticated {
            return;
        }
        self.loading = true;
        self.error = None;
        match self.api.list_schedules(&query).await {
            Ok(list) => {
                self.schedules = list;
                self.recompute_stats();
            }
            Err(e) => {
                let message = e.to_string();
                log::error!("failed to load schedules: {message}");
                self.error = Some(message.clone());
                self.schedules.clear();
                self.stats = Stats::default();
                self.notify_error(format!("Failed to load schedules: {message}"));
            }
        }
        self.loading = false;
    }

    /// Create a schedule from user input.
    ///
    /// Drafts without a date or without items are rejected locally,
    /// before any request goes out.
    pub async fn create_schedule(&mut self, draft: ScheduleDraft) -> ApiResult<Schedule> {
        let date = match draft.date {
            Some(date) => date,
            None => {
                let err = ApiError::Validation("schedule date is required".to_string());
                self.notify_error(err.to_string());
                return Err(err);
            }
        };
        if draft.items.is_empty() {
            let err = ApiError::Validation("a schedule needs at least one item".to_string());
            self.notify_error(err.to_string());
            return Err(err);
        }

        let body = NewSchedule {
            date,
            day_type: DayType::from_date(date),
            status: draft.status,
            items: draft.items,
        };
        match self.api.create_schedule(&body).await {
            Ok(created) => {
                self.schedules.push(created.clone());
                self.recompute_stats();
                self.notify_success("Schedule created");
                Ok(created)
            }
            Err(e) => {
                self.notify_error(format!("Failed to create schedule: {e}"));
                Err(e)
            }
        }
    }

    /// Apply a partial update, replacing the cached record in place
    pub async fn update_schedule(
        &mut self,
        id: &str,
        patch: SchedulePatch,
    ) -> ApiResult<Schedule> {
        Self::require_id(id, "schedule").inspect_err(|e| self.notify_error(e.to_string()))?;
        match self.api.update_schedule(id, &patch).await {
            Ok(updated) => {
                self.replace_schedule(updated.clone());
                self.recompute_stats();
                self.notify_success("Schedule updated");
                Ok(updated)
            }
            Err(e) => {
                self.notify_error(format!("Failed to update schedule: {e}"));
                Err(e)
            }
        }
    }

    pub async fn delete_schedule(&mut self, id: &str) -> ApiResult<()> {
        Self::require_id(id, "schedule").inspect_err(|e| self.notify_error(e.to_string()))?;
        match self.api.delete_schedule(id).await {
            Ok(()) => {
                self.schedules.retain(|s| s.id != id);
                self.recompute_stats();
                self.notify_success("Schedule deleted");
                Ok(())
            }
            Err(e) => {
                self.notify_error(format!("Failed to delete schedule: {e}"));
                Err(e)
            }
        }
    }

    /// Add an item to a schedule. The backend answers with the full
    /// updated parent, which replaces the cached record outright (no
    /// local merge logic).
    pub async fn add_schedule_item(
        &mut self,
        schedule_id: &str,
        item: ItemDraft,
    ) -> ApiResult<Schedule> {
        Self::require_id(schedule_id, "schedule").inspect_err(|e| self.notify_error(e.to_string()))?;
        match self.api.add_item(schedule_id, &item).await {
            Ok(updated) => {
                self.replace_schedule(updated.clone());
                self.recompute_stats();
                self.notify_success("Item added");
                Ok(updated)
            }
            Err(e) => {
                self.notify_error(format!("Failed to add item: {e}"));
                Err(e)
            }
        }
    }

    pub async fn update_schedule_item(
        &mut self,
        schedule_id: &str,
        item_id: &str,
        patch: ItemPatch,
    ) -> ApiResult<Schedule> {
        Self::require_id(schedule_id, "schedule").inspect_err(|e| self.notify_error(e.to_string()))?;
        Self::require_id(item_id, "item").inspect_err(|e| self.notify_error(e.to_string()))?;
        match self.api.update_item(schedule_id, item_id, &patch).await {
            Ok(updated) => {
                self.replace_schedule(updated.clone());
                self.recompute_stats();
                Ok(updated)
            }
            Err(e) => {
                self.notify_error(format!("Failed to update item: {e}"));
                Err(e)
            }
        }
    }

    pub async fn delete_schedule_item(
        &mut self,
        schedule_id: &str,
        item_id: &str,
    ) -> ApiResult<Schedule> {
        Self::require_id(schedule_id, "schedule").inspect_err(|e| self.notify_error(e.to_string()))?;
        Self::require_id(item_id, "item").inspect_err(|e| self.notify_error(e.to_string()))?;
        match self.api.delete_item(schedule_id, item_id).await {
            Ok(updated) => {
                self.replace_schedule(updated.clone());
                self.recompute_stats();
                self.notify_success("Item removed");
                Ok(updated)
            }
            Err(e) => {
                self.notify_error(format!("Failed to remove item: {e}"));
                Err(e)
            }
        }
    }

    /// Copy a single item onto `target_date`, creating an empty
    /// schedule for that day first when none exists. The copy is sent
    /// without an id so the backend assigns a fresh one.
    pub async fn copy_schedule_item(
        &mut self,
        item: &ScheduleItem,
        target_date: NaiveDate,
    ) -> ApiResult<Schedule> {
        let target_id = match self.schedule_for(target_date) {
            Some(existing) => existing.id.clone(),
            None => {
                let body = NewSchedule {
                    date: target_date,
                    day_type: DayType::from_date(target_date),
                    status: ScheduleStatus::Planned,
                    items: Vec::new(),
                };
                // direct API call: the store-level draft validation
                // requires items, a copy target starts empty
                match self.api.create_schedule(&body).await {
                    Ok(created) => {
                        let id = created.id.clone();
                        self.schedules.push(created);
                        id
                    }
                    Err(e) => {
                        self.notify_error(format!("Failed to copy item: {e}"));
                        return Err(e);
                    }
                }
            }
        };

        match self.api.add_item(&target_id, &ItemDraft::from_item(item)).await {
            Ok(updated) => {
                self.replace_schedule(updated.clone());
                self.recompute_stats();
                self.notify_success("Item copied");
                Ok(updated)
            }
            Err(e) => {
                self.notify_error(format!("Failed to copy item: {e}"));
                Err(e)
            }
        }
    }

    /// Copy a whole schedule onto `target_date`, overwriting any
    /// schedule already there. Every item is cloned with its id
    /// stripped and `completed` reset; the copy starts Planned.
    ///
    /// The new schedule is created before the old one is deleted, so a
    /// failed creation never loses existing data. A failed trailing
    /// delete leaves the extra day on the server and is surfaced.
    pub async fn copy_schedule(
        &mut self,
        source: &Schedule,
        target_date: NaiveDate,
    ) -> ApiResult<Schedule> {
        let previous_id = self.schedule_for(target_date).map(|s| s.id.clone());

        let items = source
            .items
            .iter()
            .map(|item| {
                let mut draft = ItemDraft::from_item(item);
                draft.completed = false;
                draft
            })
            .collect();
        let body = NewSchedule {
            date: target_date,
            day_type: DayType::from_date(target_date),
            status: ScheduleStatus::Planned,
            items,
        };
        let created = match self.api.create_schedule(&body).await {
            Ok(created) => created,
            Err(e) => {
                self.notify_error(format!("Failed to copy schedule: {e}"));
                return Err(e);
            }
        };

        if let Some(old_id) = previous_id {
            match self.api.delete_schedule(&old_id).await {
                Ok(()) => self.schedules.retain(|s| s.id != old_id),
                Err(e) => {
                    log::warn!("copied schedule but could not remove the old one: {e}");
                    self.notify_error(format!(
                        "Schedule copied, but the previous one could not be removed: {e}"
                    ));
                }
            }
        }

        self.schedules.push(created.clone());
        self.recompute_stats();
        self.notify_success("Schedule copied");
        Ok(created)
    }

    /// Claim the category fetch, marking the in-flight flag. Returns
    /// false when unauthenticated or a fetch is already running.
    pub fn begin_category_fetch(&mut self) -> bool {
        if !self.authenticated || self.fetching_categories {
            return false;
        }
        self.fetching_categories = true;
        true
    }

    /// Perform the category request after a successful claim, clearing
    /// the in-flight flag on exit
    async fn load_categories(&mut self) -> Vec<String> {
        self.categories = match self.api.list_categories(CategoryKind::Schedule).await {
            Ok(payload) => payload.into_names(),
            Err(e) => {
                log::warn!("falling back to default categories: {e}");
                DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
            }
        };
        self.fetching_categories = false;
        self.categories.clone()
    }

    /// Load schedule categories, normalizing whichever payload shape
    /// the backend answers with. Unauthenticated calls and calls made
    /// while a fetch is already in flight return the cached list; any
    /// failure substitutes the fixed default list.
    pub async fn fetch_categories(&mut self) -> Vec<String> {
        if !self.begin_category_fetch() {
            return self.categories.clone();
        }
        self.load_categories().await
    }
}

/// Type alias for the signal holding the store
///
/// Local storage: the store carries `Rc` handles and lives on the
/// browser's single thread.
pub type StoreSignal = RwSignal<ScheduleStore, LocalStorage>;

/// Get the schedule store signal from context
pub fn use_schedule_store() -> StoreSignal {
    expect_context::<StoreSignal>()
}

/// Fetch schedules through the signal.
///
/// `loading` is claimed on the signal before the returned future ever
/// runs, so readers observe the in-flight state while the request is
/// outstanding; the clone-and-write-back only happens on completion.
pub fn fetch_schedules_on(
    store: StoreSignal,
    query: ScheduleQuery,
) -> impl Future<Output = ()> {
    store.update(|s| {
        if s.authenticated {
            s.loading = true;
            s.error = None;
        }
    });
    async move {
        let mut s = store.get_untracked();
        s.fetch_schedules(query).await;
        store.set(s);
    }
}

/// Fetch categories through the signal.
///
/// The in-flight flag is claimed on the signal before the returned
/// future ever runs, so a caller that interleaves with an outstanding
/// fetch backs off with the cached list instead of issuing a duplicate
/// request.
pub fn fetch_categories_on(store: StoreSignal) -> impl Future<Output = Vec<String>> {
    let claimed = store
        .try_update(|s| s.begin_category_fetch())
        .unwrap_or(false);
    async move {
        if !claimed {
            return store.with_untracked(|s| s.categories.clone());
        }
        let mut s = store.get_untracked();
        let names = s.load_categories().await;
        store.set(s);
        names
    }
}
