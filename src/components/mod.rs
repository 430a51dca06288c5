//! UI Components

mod schedule_board;
mod skill_form;
mod stats_panel;
mod toast;

pub use schedule_board::{NewScheduleForm, ScheduleBoard};
pub use skill_form::SkillFormModal;
pub use stats_panel::StatsPanel;
pub use toast::ToastTray;
