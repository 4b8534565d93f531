use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EVENT_PROJECT_CREATED: &str = "project.created";
pub const EVENT_PROJECT_UPDATED: &str = "project.updated";
pub const EVENT_PROJECT_DELETED: &str = "project.deleted";
pub const EVENT_PROJECT_PROGRESS_CHANGED: &str = "project.progress_changed";

pub const EVENT_SONG_CREATED: &str = "song.created";
pub const EVENT_SONG_UPDATED: &str = "song.updated";
pub const EVENT_SONG_DELETED: &str = "song.deleted";

pub const EVENT_TASK_CREATED: &str = "task.created";
pub const EVENT_TASK_UPDATED: &str = "task.updated";
pub const EVENT_TASK_DELETED: &str = "task.deleted";

pub const EVENT_BUDGET_ITEM_CREATED: &str = "budget_item.created";
pub const EVENT_BUDGET_ITEM_UPDATED: &str = "budget_item.updated";
pub const EVENT_BUDGET_ITEM_DELETED: &str = "budget_item.deleted";

pub const EVENT_COMMENT_CREATED: &str = "comment.created";
pub const EVENT_COMMENT_DELETED: &str = "comment.deleted";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEventPayload {
    pub project_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProgressPayload {
    pub project_id: Uuid,
    pub progress: f64,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongEventPayload {
    pub song_id: Uuid,
    pub project_id: Uuid,
    pub phase: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEventPayload {
    pub task_id: Uuid,
    pub project_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetItemEventPayload {
    pub budget_item_id: Uuid,
    pub project_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEventPayload {
    pub comment_id: Uuid,
    pub task_id: Uuid,
}
