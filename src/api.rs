//! Backend REST Client
//!
//! `ScheduleApi` is the seam between the stores and the network: one
//! trait method per backend endpoint, with a `reqwest`-backed
//! implementation for the browser and in-memory fakes for tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Category, ItemDraft, ItemPatch, NewSchedule, Schedule, SchedulePatch, ScheduleStatus, Skill,
    SkillDraft,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by backend calls
///
/// All variants carry human-readable text; the stores forward these to
/// the notification surface as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected locally, before any request was made
    #[error("{0}")]
    Validation(String),
    /// Transport-level failure (network unreachable, request aborted)
    #[error("request failed: {0}")]
    Http(String),
    /// Non-success response from the backend
    #[error("{message}")]
    Status { code: u16, message: String },
    /// Response body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err.to_string())
    }
}

/// Which domain a category request targets (`?type=` query parameter)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Schedule,
    Skills,
}

impl CategoryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryKind::Schedule => "schedule",
            CategoryKind::Skills => "skills",
        }
    }
}

/// Filters for the schedule list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ScheduleStatus>,
}

/// The category endpoint answers in one of three shapes depending on
/// backend version. Resolved here at the boundary so the stores only
/// ever see a flat list of names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CategoryPayload {
    /// Bare array of category records
    Bare(Vec<Category>),
    /// Records wrapped in a `data` envelope
    Wrapped { data: Vec<Category> },
    /// Plain names under a `categories` key
    Named { categories: Vec<String> },
}

impl CategoryPayload {
    pub fn into_names(self) -> Vec<String> {
        match self {
            CategoryPayload::Bare(records) => records.into_iter().map(|c| c.name).collect(),
            CategoryPayload::Wrapped { data } => data.into_iter().map(|c| c.name).collect(),
            CategoryPayload::Named { categories } => categories,
        }
    }
}

/// One method per backend endpoint
///
/// Futures are `?Send`: the client runs on the single-threaded browser
/// event loop.
#[async_trait(?Send)]
pub trait ScheduleApi {
    async fn list_schedules(&self, query: &ScheduleQuery) -> ApiResult<Vec<Schedule>>;
    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<Schedule>;
    async fn update_schedule(&self, id: &str, patch: &SchedulePatch) -> ApiResult<Schedule>;
    async fn delete_schedule(&self, id: &str) -> ApiResult<()>;

    /// Item mutations return the full updated parent schedule
    async fn add_item(&self, schedule_id: &str, item: &ItemDraft) -> ApiResult<Schedule>;
    async fn update_item(
        &self,
        schedule_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> ApiResult<Schedule>;
    async fn delete_item(&self, schedule_id: &str, item_id: &str) -> ApiResult<Schedule>;

    async fn list_categories(&self, kind: CategoryKind) -> ApiResult<CategoryPayload>;
    async fn create_category(&self, name: &str, kind: CategoryKind) -> ApiResult<Category>;

    async fn create_skill(&self, draft: &SkillDraft) -> ApiResult<Skill>;
}

/// `reqwest`-backed client for the real backend
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

/// Error envelope the backend uses for non-success responses
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Turn a non-success response into `ApiError::Status`, pulling the
    /// message out of the JSON error envelope when there is one
    async fn check(resp: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let code = status.as_u16();
        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| format!("request failed with status {code}"));
        Err(ApiError::Status { code, message })
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> ApiResult<T> {
        let resp = Self::check(resp).await?;
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::parse(resp).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let resp = self.client.put(self.url(path)).json(body).send().await?;
        Self::parse(resp).await
    }
}

#[async_trait(?Send)]
impl ScheduleApi for HttpApi {
    async fn list_schedules(&self, query: &ScheduleQuery) -> ApiResult<Vec<Schedule>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start) = query.start_date {
            params.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = query.end_date {
            params.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(status) = query.status {
            params.push(("status", status.as_str().to_string()));
        }
        let resp = self
            .client
            .get(self.url("/schedules"))
            .query(&params)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> ApiResult<Schedule> {
        self.post_json("/schedules", schedule).await
    }

    async fn update_schedule(&self, id: &str, patch: &SchedulePatch) -> ApiResult<Schedule> {
        self.put_json(&format!("/schedules/{id}"), patch).await
    }

    async fn delete_schedule(&self, id: &str) -> ApiResult<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/schedules/{id}")))
            .send()
            .await?;
        Self::check(resp).await.map(|_| ())
    }

    async fn add_item(&self, schedule_id: &str, item: &ItemDraft) -> ApiResult<Schedule> {
        self.post_json(&format!("/schedules/{schedule_id}/items"), item)
            .await
    }

    async fn update_item(
        &self,
        schedule_id: &str,
        item_id: &str,
        patch: &ItemPatch,
    ) -> ApiResult<Schedule> {
        self.put_json(&format!("/schedules/{schedule_id}/items/{item_id}"), patch)
            .await
    }

    async fn delete_item(&self, schedule_id: &str, item_id: &str) -> ApiResult<Schedule> {
        let resp = self
            .client
            .delete(self.url(&format!("/schedules/{schedule_id}/items/{item_id}")))
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn list_categories(&self, kind: CategoryKind) -> ApiResult<CategoryPayload> {
        let resp = self
            .client
            .get(self.url("/categories"))
            .query(&[("type", kind.as_str())])
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_category(&self, name: &str, kind: CategoryKind) -> ApiResult<Category> {
        let resp = self
            .client
            .post(self.url("/categories"))
            .query(&[("type", kind.as_str())])
            .json(&Category {
                name: name.to_string(),
            })
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_skill(&self, draft: &SkillDraft) -> ApiResult<Skill> {
        self.post_json("/skills", draft).await
    }
}
