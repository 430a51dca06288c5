//! Test Support
//!
//! In-memory `ScheduleApi` fake mirroring the backend's reconcile
//! contract (item mutations answer with the full parent schedule),
//! plus small fixture builders shared across test modules.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{
    ApiError, ApiResult, CategoryKind, CategoryPayload, ScheduleApi, ScheduleQuery,
};
use crate::context::ToastKind;
use crate::models::{
    Category, DayType, ItemDraft, ItemPatch, NewSchedule, Priority, Schedule, ScheduleItem,
    SchedulePatch, ScheduleStatus, Skill, SkillDraft,
};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn item(id: &str, category: &str, completed: bool) -> ScheduleItem {
    ScheduleItem {
        id: id.to_string(),
        title: format!("task {id}"),
        category: category.to_string(),
        priority: Priority::Medium,
        start_time: None,
        end_time: None,
        completed,
    }
}

pub fn schedule(id: &str, on: NaiveDate, items: Vec<ScheduleItem>) -> Schedule {
    Schedule {
        id: id.to_string(),
        date: on,
        day_type: DayType::from_date(on),
        status: ScheduleStatus::Planned,
        items,
    }
}

/// Notifier that records every toast for later assertions
pub fn recording_notifier() -> (
    Rc<dyn Fn(ToastKind, String)>,
    Rc<RefCell<Vec<(ToastKind, String)>>>,
) {
    let log: Rc<RefCell<Vec<(ToastKind, String)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    (
        Rc::new(move |kind, message| sink.borrow_mut().push((kind, message))),
        log,
    )
}

/// In-memory backend double
///
/// Holds the server-side schedule collection; mutations behave like
/// the real API (ids assigned on create, full parent returned from
/// item endpoints). Failure flags turn individual endpoint groups into
/// transport errors.
pub struct FakeApi {
    pub schedules: RefCell<Vec<Schedule>>,
    /// Raw category response body; `None` simulates an unreachable backend
    pub category_body: RefCell<Option<serde_json::Value>>,
    pub fail_list: Cell<bool>,
    pub fail_create: Cell<bool>,
    pub fail_mutation: Cell<bool>,
    pub calls: RefCell<Vec<String>>,
    next_id: Cell<u32>,
}

impl FakeApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            schedules: RefCell::new(Vec::new()),
            category_body: RefCell::new(None),
            fail_list: Cell::new(false),
            fail_create: Cell::new(false),
            fail_mutation: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        })
    }

    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    fn assign_id(&self, prefix: &str) -> String {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        format!("{prefix}-{n}")
    }

    fn refused() -> ApiError {
        ApiError::Http("connection refused".to_string())
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Status {
            code: 404,
            message: format!("{what} not found"),
        }
    }

    fn materialize(&self, draft: &ItemDraft) -> ScheduleItem {
        ScheduleItem {
            id: self.assign_id("item"),
            title: draft.title.clone(),
            category: draft.category.clone(),
            priority: draft.priority,
            start_time: draft.start_time,
            end_time: draft.end_time,
            completed: draft.completed,
        }
    }

    fn with_schedule<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Schedule) -> T,
    ) -> ApiResult<T> {
        let mut schedules = self.schedules.borrow_mut();
        let schedule = schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Self::not_found("schedule"))?;
        Ok(f(schedule))
    }
}

#[async_trait(?Send)]
impl ScheduleApi for FakeApi {
    async fn list_schedules(&self, _query: &ScheduleQuery) -> ApiResult<Vec<Schedule>> {
        self.record("list_schedules");
        if self.fail_list.get() {
            return Err(Self::refused());
        }
        Ok(self.schedules.borrow().clone())
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<Schedule> {
        self.record("create_schedule");
        if self.fail_create.get() {
            return Err(Self::refused());
        }
        let created = Schedule {
            id: self.assign_id("sched"),
            date: schedule.date,
            day_type: schedule.day_type,
            status: schedule.status,
            items: schedule.items.iter().map(|d| self.materialize(d)).collect(),
        };
        self.schedules.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_schedule(&self, id: &str, patch: &SchedulePatch) -> ApiResult<Schedule> {
        self.record("update_schedule");
        if self.fail_mutation.get() {
            return Err(Self::refused());
        }
        self.with_schedule(id, |schedule| {
            if let Some(date) = patch.date {
                schedule.date = date;
                schedule.day_type = DayType::from_date(date);
            }
            if let Some(day_type) = patch.day_type {
                schedule.day_type = day_type;
            }
            if let Some(status) = patch.status {
                schedule.status = status;
            }
            schedule.clone()
        })
    }

    async fn delete_schedule(&self, id: &str) -> ApiResult<()> {
        self.record("delete_schedule");
        if self.fail_mutation.get() {
            return Err(Self::refused());
        }
        self.schedules.borrow_mut().retain(|s| s.id != id);
        Ok(())
    }

    async fn add_item(&self, schedule_id: &str, item: &ItemDraft) -> ApiResult<Schedule> {
        self.record("add_item");
        if self.fail_mutation.get() {
            return Err(Self::refused());
        }
        let fresh = self.materialize(item);
        self.with_schedule(schedule_id, |schedule| {
            schedule.items.push(fresh);
            schedule.clone()
        })
    }

    async fn update_item(
        &self,
        schedule_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> ApiResult<Schedule> {
        self.record("update_item");
        if self.fail_mutation.get() {
            return Err(Self::refused());
        }
        self.with_schedule(schedule_id, |schedule| {
            if let Some(item) = schedule.items.iter_mut().find(|i| i.id == item_id) {
                if let Some(title) = &patch.title {
                    item.title = title.clone();
                }
                if let Some(category) = &patch.category {
                    item.category = category.clone();
                }
                if let Some(priority) = patch.priority {
                    item.priority = priority;
                }
                if patch.start_time.is_some() {
                    item.start_time = patch.start_time;
                }
                if patch.end_time.is_some() {
                    item.end_time = patch.end_time;
                }
                if let Some(completed) = patch.completed {
                    item.completed = completed;
                }
            }
            schedule.clone()
        })
    }

    async fn delete_item(&self, schedule_id: &str, item_id: &str) -> ApiResult<Schedule> {
        self.record("delete_item");
        if self.fail_mutation.get() {
            return Err(Self::refused());
        }
        self.with_schedule(schedule_id, |schedule| {
            schedule.items.retain(|i| i.id != item_id);
            schedule.clone()
        })
    }

    async fn list_categories(&self, _kind: CategoryKind) -> ApiResult<CategoryPayload> {
        self.record("list_categories");
        match self.category_body.borrow().clone() {
            Some(body) => serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string())),
            None => Err(Self::refused()),
        }
    }

    async fn create_category(&self, name: &str, _kind: CategoryKind) -> ApiResult<Category> {
        self.record("create_category");
        if self.fail_create.get() {
            return Err(Self::refused());
        }
        Ok(Category {
            name: name.to_string(),
        })
    }

    async fn create_skill(&self, draft: &SkillDraft) -> ApiResult<Skill> {
        self.record("create_skill");
        if self.fail_create.get() {
            return Err(Self::refused());
        }
        Ok(Skill {
            id: self.assign_id("skill"),
            name: draft.name.clone(),
            category: draft.category.clone(),
            status: draft.status.clone(),
            progress: draft.progress,
            description: draft.description.clone(),
            priority: draft.priority.clone(),
        })
    }
}
