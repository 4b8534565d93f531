use chrono::NaiveDate;
use db::models::{budget_item::BudgetItem, project::Project};
use serde::Serialize;
use ts_rs::TS;

use crate::{
    budget::BudgetSummary,
    progress::{PhaseBreakdown, SongSnapshot, phase_breakdown},
    schedule::{is_overdue, remaining_days},
};

/// Everything the project dashboard shows in one response.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct ProjectOverview {
    pub project: Project,
    pub song_count: usize,
    pub remaining_days: Option<i64>,
    pub overdue: bool,
    pub budget: BudgetSummary,
    pub phases: PhaseBreakdown,
}

impl ProjectOverview {
    pub fn build(
        project: Project,
        songs: &[SongSnapshot],
        items: &[BudgetItem],
        today: NaiveDate,
    ) -> Self {
        let remaining_days = remaining_days(project.deadline, today);
        let budget = BudgetSummary::aggregate(project.budget, items);
        Self {
            song_count: songs.len(),
            overdue: is_overdue(project.deadline, today) && project.progress < 100.0,
            remaining_days,
            budget,
            phases: phase_breakdown(songs),
            project,
        }
    }
}
