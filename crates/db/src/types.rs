use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// The four production stages a song passes through, stored as "1".."4".
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    Display,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum SongPhase {
    #[default]
    #[sea_orm(string_value = "1")]
    #[serde(rename = "1")]
    #[strum(serialize = "1")]
    Preproduction,
    #[sea_orm(string_value = "2")]
    #[serde(rename = "2")]
    #[strum(serialize = "2")]
    Production,
    #[sea_orm(string_value = "3")]
    #[serde(rename = "3")]
    #[strum(serialize = "3")]
    Engineering,
    #[sea_orm(string_value = "4")]
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Publishing,
}

impl SongPhase {
    pub const ALL: [SongPhase; 4] = [
        SongPhase::Preproduction,
        SongPhase::Production,
        SongPhase::Engineering,
        SongPhase::Publishing,
    ];

    pub fn number(self) -> u8 {
        match self {
            SongPhase::Preproduction => 1,
            SongPhase::Production => 2,
            SongPhase::Engineering => 3,
            SongPhase::Publishing => 4,
        }
    }

    /// `((n mod 4) + 1)`: phase 4 wraps back to phase 1.
    pub fn wrapping_next(self) -> Self {
        match self {
            SongPhase::Preproduction => SongPhase::Production,
            SongPhase::Production => SongPhase::Engineering,
            SongPhase::Engineering => SongPhase::Publishing,
            SongPhase::Publishing => SongPhase::Preproduction,
        }
    }

    pub fn is_last(self) -> bool {
        self == SongPhase::Publishing
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    Display,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SongStatus {
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    Display,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
}

impl ProjectStatus {
    /// A project is completed exactly when every song is, i.e. progress is 100.
    pub fn from_progress(progress: f64) -> Self {
        if progress == 100.0 {
            ProjectStatus::Completed
        } else {
            ProjectStatus::Active
        }
    }
}

/// Kanban column of a task.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    TS,
    EnumString,
    Display,
    Default,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    #[sea_orm(string_value = "todo")]
    Todo,
    #[sea_orm(string_value = "inProgress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn song_phase_uses_numeric_strings_everywhere() {
        for phase in SongPhase::ALL {
            let expected = phase.number().to_string();
            assert_eq!(phase.to_string(), expected);
            assert_eq!(SongPhase::from_str(&expected).unwrap(), phase);
            assert_eq!(
                serde_json::to_value(phase).unwrap(),
                serde_json::Value::String(expected.clone())
            );
            assert_eq!(phase.to_value(), expected);
        }
        assert!(SongPhase::from_str("5").is_err());
        assert!(SongPhase::from_str("Production").is_err());
    }

    #[test]
    fn wrapping_next_cycles_through_all_phases() {
        assert_eq!(SongPhase::Preproduction.wrapping_next(), SongPhase::Production);
        assert_eq!(SongPhase::Engineering.wrapping_next(), SongPhase::Publishing);
        assert_eq!(SongPhase::Publishing.wrapping_next(), SongPhase::Preproduction);
        for phase in SongPhase::ALL {
            let expected = (phase.number() % 4) + 1;
            assert_eq!(phase.wrapping_next().number(), expected);
        }
    }

    #[test]
    fn project_status_is_completed_only_at_full_progress() {
        assert_eq!(ProjectStatus::from_progress(100.0), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::from_progress(99.9), ProjectStatus::Active);
        assert_eq!(ProjectStatus::from_progress(0.0), ProjectStatus::Active);
    }

    #[test]
    fn task_status_keeps_camel_case_in_progress() {
        assert_eq!(TaskStatus::InProgress.to_string(), "inProgress");
        assert_eq!(TaskStatus::from_str("inProgress").unwrap(), TaskStatus::InProgress);
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("inProgress")
        );
        assert!(TaskStatus::from_str("inreview").is_err());
    }
}
