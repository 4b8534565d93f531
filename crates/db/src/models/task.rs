use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    entities::{song, task, task_comment},
    events::{EVENT_TASK_CREATED, EVENT_TASK_DELETED, EVENT_TASK_UPDATED, TaskEventPayload},
    models::{
        event_outbox::{EventOutbox, OutboxEvent},
        ids,
    },
    types::{SongPhase, TaskStatus},
};

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Task not found")]
    TaskNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Song not found in this project")]
    SongNotFound,
    #[error("Invalid task: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub song_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub phase: SongPhase,
    pub due_date: Option<NaiveDate>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateTask {
    pub project_id: Uuid,
    pub song_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub phase: Option<SongPhase>,
    pub due_date: Option<NaiveDate>,
}

impl CreateTask {
    pub fn from_title(project_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            project_id,
            song_id: None,
            title: title.into(),
            description: None,
            status: None,
            phase: None,
            due_date: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub phase: Option<SongPhase>,
    pub song_id: Option<Uuid>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    async fn from_model<C: ConnectionTrait>(db: &C, model: task::Model) -> Result<Self, DbErr> {
        let project_id = ids::require_project_uuid(db, model.project_id).await?;
        let song_id = match model.song_id {
            Some(id) => ids::song_uuid_by_id(db, id).await?,
            None => None,
        };
        Ok(Self::from_parts(model, project_id, song_id))
    }

    fn from_parts(model: task::Model, project_id: Uuid, song_id: Option<Uuid>) -> Self {
        Self {
            id: model.uuid,
            project_id,
            song_id,
            title: model.title,
            description: model.description,
            status: model.status,
            phase: model.phase,
            due_date: model.due_date,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    async fn find_model<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::Uuid.eq(id))
            .one(db)
            .await
    }

    async fn enqueue<C: ConnectionTrait>(
        db: &C,
        event_type: &str,
        task: &Task,
    ) -> Result<(), DbErr> {
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type,
                entity_type: "task",
                entity_uuid: task.id,
                project_uuid: Some(task.project_id),
                payload: &TaskEventPayload {
                    task_id: task.id,
                    project_id: task.project_id,
                    status: task.status.to_string(),
                },
            },
        )
        .await
    }

    /// Resolves a song UUID to its row id, requiring it to live in `project_row_id`.
    async fn song_row_in_project<C: ConnectionTrait>(
        db: &C,
        song_id: Uuid,
        project_row_id: i64,
    ) -> Result<i64, TaskError> {
        let row: Option<(i64, i64)> = song::Entity::find()
            .select_only()
            .column(song::Column::Id)
            .column(song::Column::ProjectId)
            .filter(song::Column::Uuid.eq(song_id))
            .into_tuple()
            .one(db)
            .await?;
        match row {
            Some((id, project_id)) if project_id == project_row_id => Ok(id),
            _ => Err(TaskError::SongNotFound),
        }
    }

    fn validate_title(title: &str) -> Result<String, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::ValidationError(
                "Task title must not be empty".to_string(),
            ));
        }
        Ok(title.to_string())
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let models = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?;
        let mut tasks = Vec::with_capacity(models.len());
        for model in models {
            tasks.push(Self::from_model(db, model).await?);
        }
        Ok(tasks)
    }

    pub async fn find_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let project_row_id = ids::require_project_id(db, project_id).await?;
        let song_uuids: HashMap<i64, Uuid> = song::Entity::find()
            .select_only()
            .column(song::Column::Id)
            .column(song::Column::Uuid)
            .filter(song::Column::ProjectId.eq(project_row_id))
            .into_tuple::<(i64, Uuid)>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let models = task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_row_id))
            .order_by_asc(task::Column::Id)
            .all(db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let song_id = model.song_id.and_then(|id| song_uuids.get(&id).copied());
                Self::from_parts(model, project_id, song_id)
            })
            .collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        match Self::find_model(db, id).await? {
            Some(model) => Ok(Some(Self::from_model(db, model).await?)),
            None => Ok(None),
        }
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateTask,
        task_id: Uuid,
    ) -> Result<Self, TaskError> {
        let title = Self::validate_title(&data.title)?;
        let project_row_id = ids::project_id_by_uuid(db, data.project_id)
            .await?
            .ok_or(TaskError::ProjectNotFound)?;
        let song_row_id = match data.song_id {
            Some(song_id) => Some(Self::song_row_in_project(db, song_id, project_row_id).await?),
            None => None,
        };

        let now = Utc::now();
        let active = task::ActiveModel {
            uuid: Set(task_id),
            project_id: Set(project_row_id),
            song_id: Set(song_row_id),
            title: Set(title),
            description: Set(data.description.clone()),
            status: Set(data.status.unwrap_or_default()),
            phase: Set(data.phase.unwrap_or_default()),
            due_date: Set(data.due_date),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        let task = Self::from_parts(model, data.project_id, data.song_id);
        Self::enqueue(db, EVENT_TASK_CREATED, &task).await?;
        Ok(task)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        payload: &UpdateTask,
    ) -> Result<Self, TaskError> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(TaskError::TaskNotFound)?;
        let project_row_id = record.project_id;

        let mut active: task::ActiveModel = record.into();
        if let Some(title) = payload.title.as_deref() {
            active.title = Set(Self::validate_title(title)?);
        }
        if let Some(description) = payload.description.clone() {
            active.description = Set(Some(description).filter(|d| !d.trim().is_empty()));
        }
        if let Some(phase) = payload.phase {
            active.phase = Set(phase);
        }
        if let Some(song_id) = payload.song_id {
            let song_row_id = Self::song_row_in_project(db, song_id, project_row_id).await?;
            active.song_id = Set(Some(song_row_id));
        }
        if let Some(due_date) = payload.due_date {
            active.due_date = Set(Some(due_date));
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(db).await?;
        let task = Self::from_model(db, updated).await?;
        Self::enqueue(db, EVENT_TASK_UPDATED, &task).await?;
        Ok(task)
    }

    /// Writes a new board column. Fails with `RecordNotFound` for an unknown task.
    pub async fn update_status<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<Self, DbErr> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;

        let mut active: task::ActiveModel = record.into();
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        let task = Self::from_model(db, updated).await?;
        Self::enqueue(db, EVENT_TASK_UPDATED, &task).await?;
        Ok(task)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let Some(record) = Self::find_model(db, id).await? else {
            return Ok(0);
        };
        let row_id = record.id;
        let task = Self::from_model(db, record).await?;

        task_comment::Entity::delete_many()
            .filter(task_comment::Column::TaskId.eq(row_id))
            .exec(db)
            .await?;
        let result = task::Entity::delete_many()
            .filter(task::Column::Id.eq(row_id))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            Self::enqueue(db, EVENT_TASK_DELETED, &task).await?;
        }
        Ok(result.rows_affected)
    }
}
