//! Derived Schedule Statistics
//!
//! Pure aggregation over the in-memory schedule collection. Never
//! persisted; the store recomputes this snapshot after every mutation.

use chrono::NaiveDate;

use crate::models::{Priority, Schedule};

/// Aggregate metrics derived from the full schedule collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    /// Item count across schedules dated today
    pub items_today: usize,
    /// Completed items as a percentage of all items (0 when empty)
    pub completion_rate: f64,
    /// Sum of (end - start) over items carrying both times, in hours;
    /// an item whose end precedes its start contributes zero
    pub total_hours: f64,
    /// Items with priority High
    pub high_priority: usize,
    pub total_items: usize,
    /// Most frequent item category; ties go to the label seen first
    pub top_category: Option<String>,
    pub top_category_count: usize,
    /// Number of distinct categories in use
    pub category_count: usize,
}

/// Compute the stats snapshot for `schedules`
///
/// `today` is injected by the caller so the function stays
/// deterministic; the store passes the wall-clock date.
pub fn calculate(schedules: &[Schedule], today: NaiveDate) -> Stats {
    if schedules.is_empty() {
        return Stats::default();
    }

    let mut stats = Stats::default();
    let mut completed = 0usize;
    // counts in encounter order, so equal-count ties resolve stably
    let mut categories: Vec<(String, usize)> = Vec::new();

    for schedule in schedules {
        if schedule.date == today {
            stats.items_today += schedule.items.len();
        }
        for item in &schedule.items {
            stats.total_items += 1;
            if item.completed {
                completed += 1;
            }
            if item.priority == Priority::High {
                stats.high_priority += 1;
            }
            if let (Some(start), Some(end)) = (item.start_time, item.end_time) {
                // inverted ranges count as zero, never negative
                stats.total_hours += (end - start).num_minutes().max(0) as f64 / 60.0;
            }
            match categories.iter_mut().find(|(name, _)| name == &item.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((item.category.clone(), 1)),
            }
        }
    }

    if stats.total_items > 0 {
        stats.completion_rate = completed as f64 * 100.0 / stats.total_items as f64;
    }
    stats.category_count = categories.len();
    for (name, count) in &categories {
        if *count > stats.top_category_count {
            stats.top_category = Some(name.clone());
            stats.top_category_count = *count;
        }
    }

    stats
}
