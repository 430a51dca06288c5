//! Skill Form Controller
//!
//! Field state for the new-skill modal, kept separate from the view so
//! the change/validation rules are plain testable code. The component
//! in `components::skill_form` owns one of these in a signal and
//! funnels every input through `handle_change`.

use crate::api::{ApiResult, CategoryKind, ScheduleApi};
use crate::models::{Skill, SkillDraft};

/// Selectable skill statuses (`completed` carries the progress rule)
pub const STATUS_OPTIONS: &[&str] = &["not-started", "in-progress", "completed"];

/// Selectable skill priorities
pub const PRIORITY_OPTIONS: &[&str] = &["Low", "Medium", "High"];

/// Mutable state behind the new-skill form
#[derive(Debug, Clone, PartialEq)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub status: String,
    /// Always within [0, 100]
    pub progress: u8,
    pub description: String,
    pub priority: String,
    /// Re-entry guard: a second submit is ignored while this is set
    pub submitting: bool,
    pub error: Option<String>,
    /// Whether the inline new-category input is showing
    pub adding_category: bool,
    pub new_category: String,
}

impl Default for SkillForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: String::new(),
            status: "not-started".to_string(),
            progress: 0,
            description: String::new(),
            priority: "Medium".to_string(),
            submitting: false,
            error: None,
            adding_category: false,
            new_category: String::new(),
        }
    }
}

/// Parse a progress input, clamping into [0, 100]; non-numeric text
/// counts as 0
pub fn clamp_progress(value: &str) -> u8 {
    value
        .trim()
        .parse::<i64>()
        .map(|n| n.clamp(0, 100) as u8)
        .unwrap_or(0)
}

impl SkillForm {
    /// Apply a single field change.
    ///
    /// Setting status to `completed` forces progress to 100 as part of
    /// the same change.
    pub fn handle_change(&mut self, field: &str, value: &str) {
        match field {
            "name" => self.name = value.to_string(),
            "category" => self.category = value.to_string(),
            "status" => {
                self.status = value.to_string();
                if value == "completed" {
                    self.progress = 100;
                }
            }
            "progress" => self.progress = clamp_progress(value),
            "description" => self.description = value.to_string(),
            "priority" => self.priority = value.to_string(),
            "newCategory" => self.new_category = value.to_string(),
            _ => log::warn!("ignoring unknown skill form field: {field}"),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Skill name is required".to_string());
        }
        if self.category.trim().is_empty() {
            return Err("Category is required".to_string());
        }
        Ok(())
    }

    fn draft(&self) -> SkillDraft {
        SkillDraft {
            name: self.name.trim().to_string(),
            category: self.category.clone(),
            status: self.status.clone(),
            progress: self.progress,
            description: self.description.clone(),
            priority: self.priority.clone(),
        }
    }

    /// Validate and mark the form in flight, producing the payload to
    /// send. Returns `None` (with `error` set on validation failures)
    /// when nothing should be sent, including while a previous submit
    /// is still running.
    pub fn begin_submit(&mut self) -> Option<SkillDraft> {
        if self.submitting {
            return None;
        }
        if let Err(message) = self.validate() {
            self.error = Some(message);
            return None;
        }
        self.submitting = true;
        self.error = None;
        Some(self.draft())
    }

    /// Record the outcome of the request started by `begin_submit`
    pub fn finish_submit(&mut self, result: ApiResult<Skill>) -> Option<Skill> {
        self.submitting = false;
        match result {
            Ok(skill) => {
                self.error = None;
                Some(skill)
            }
            Err(e) => {
                let message = e.to_string();
                self.error = Some(if message.is_empty() {
                    "Failed to create skill".to_string()
                } else {
                    message
                });
                None
            }
        }
    }

    /// Create the pending inline category; on success it becomes the
    /// selected category and the inline input closes
    pub async fn create_category(&mut self, api: &dyn ScheduleApi) -> bool {
        let name = self.new_category.trim().to_string();
        if name.is_empty() {
            self.error = Some("Category name is required".to_string());
            return false;
        }
        match api.create_category(&name, CategoryKind::Skills).await {
            Ok(category) => {
                self.category = category.name;
                self.adding_category = false;
                self.new_category.clear();
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::testutil::FakeApi;

    #[test]
    fn test_completed_status_forces_full_progress() {
        let mut form = SkillForm::default();
        form.handle_change("progress", "40");
        assert_eq!(form.progress, 40);

        form.handle_change("status", "completed");
        assert_eq!(form.status, "completed");
        assert_eq!(form.progress, 100);
    }

    #[test]
    fn test_progress_clamps_and_defaults() {
        let mut form = SkillForm::default();
        form.handle_change("progress", "150");
        assert_eq!(form.progress, 100);

        form.handle_change("progress", "-5");
        assert_eq!(form.progress, 0);

        form.handle_change("progress", "abc");
        assert_eq!(form.progress, 0);

        form.handle_change("progress", "73");
        assert_eq!(form.progress, 73);
    }

    #[test]
    fn test_completed_rule_applies_only_at_the_change() {
        let mut form = SkillForm::default();
        form.handle_change("status", "completed");
        assert_eq!(form.progress, 100);

        // lowering progress afterwards is allowed; the rule fires only
        // when status itself changes
        form.handle_change("progress", "30");
        assert_eq!(form.progress, 30);
        assert_eq!(form.status, "completed");
    }

    #[test]
    fn test_begin_submit_requires_name_and_category() {
        let mut form = SkillForm::default();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error.as_deref(), Some("Skill name is required"));
        assert!(!form.submitting);

        form.handle_change("name", "Rust");
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error.as_deref(), Some("Category is required"));

        form.handle_change("category", "Development");
        let draft = form.begin_submit().expect("valid form should submit");
        assert_eq!(draft.name, "Rust");
        assert!(form.submitting);
    }

    #[test]
    fn test_begin_submit_guards_reentry() {
        let mut form = SkillForm::default();
        form.handle_change("name", "Rust");
        form.handle_change("category", "Development");

        assert!(form.begin_submit().is_some());
        // still in flight: a second submit is ignored
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_finish_submit_records_error_message() {
        let mut form = SkillForm::default();
        form.handle_change("name", "Rust");
        form.handle_change("category", "Development");
        let _ = form.begin_submit();

        let skill = form.finish_submit(Err(ApiError::Http("boom".to_string())));
        assert!(skill.is_none());
        assert!(!form.submitting);
        assert_eq!(form.error.as_deref(), Some("request failed: boom"));
    }

    #[test]
    fn test_finish_submit_falls_back_to_generic_message() {
        let mut form = SkillForm::default();
        let _ = form.begin_submit();
        let skill = form.finish_submit(Err(ApiError::Status {
            code: 500,
            message: String::new(),
        }));
        assert!(skill.is_none());
        assert_eq!(form.error.as_deref(), Some("Failed to create skill"));
    }

    #[tokio::test]
    async fn test_inline_category_creation_adopts_name() {
        let api = FakeApi::new();
        let mut form = SkillForm::default();
        form.adding_category = true;
        form.handle_change("newCategory", " Backend ");

        assert!(form.create_category(api.as_ref()).await);
        assert_eq!(form.category, "Backend");
        assert!(!form.adding_category);
        assert!(form.new_category.is_empty());
    }

    #[tokio::test]
    async fn test_inline_category_requires_a_name() {
        let api = FakeApi::new();
        let mut form = SkillForm::default();
        form.adding_category = true;

        assert!(!form.create_category(api.as_ref()).await);
        assert_eq!(form.error.as_deref(), Some("Category name is required"));
        assert!(api.calls.borrow().is_empty());
    }
}
