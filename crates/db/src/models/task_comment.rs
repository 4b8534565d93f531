use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    entities::task_comment,
    events::{CommentEventPayload, EVENT_COMMENT_CREATED, EVENT_COMMENT_DELETED},
    models::{
        event_outbox::{EventOutbox, OutboxEvent},
        ids,
    },
};

#[derive(Debug, Error)]
pub enum TaskCommentError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Task not found")]
    TaskNotFound,
    #[error("Invalid comment: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct TaskComment {
    pub id: Uuid,
    pub task_id: Uuid,
    pub author: String,
    pub body: String,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateTaskComment {
    pub author: Option<String>,
    pub body: String,
}

const ANONYMOUS_AUTHOR: &str = "anonymous";

impl TaskComment {
    fn from_parts(model: task_comment::Model, task_id: Uuid) -> Self {
        Self {
            id: model.uuid,
            task_id,
            author: model.author,
            body: model.body,
            created_at: model.created_at.into(),
        }
    }

    async fn enqueue<C: ConnectionTrait>(
        db: &C,
        event_type: &str,
        comment: &TaskComment,
        project_uuid: Option<Uuid>,
    ) -> Result<(), DbErr> {
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type,
                entity_type: "comment",
                entity_uuid: comment.id,
                project_uuid,
                payload: &CommentEventPayload {
                    comment_id: comment.id,
                    task_id: comment.task_id,
                },
            },
        )
        .await
    }

    pub async fn find_by_task_id<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
    ) -> Result<Vec<Self>, TaskCommentError> {
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(TaskCommentError::TaskNotFound)?;
        let models = task_comment::Entity::find()
            .filter(task_comment::Column::TaskId.eq(task_row_id))
            .order_by_asc(task_comment::Column::CreatedAt)
            .order_by_asc(task_comment::Column::Id)
            .all(db)
            .await?;
        Ok(models
            .into_iter()
            .map(|model| Self::from_parts(model, task_id))
            .collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let Some(model) = task_comment::Entity::find()
            .filter(task_comment::Column::Uuid.eq(id))
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        let task_id = ids::task_uuid_by_id(db, model.task_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Task not found".to_string()))?;
        Ok(Some(Self::from_parts(model, task_id)))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        task_id: Uuid,
        data: &CreateTaskComment,
        comment_id: Uuid,
    ) -> Result<Self, TaskCommentError> {
        let body = data.body.trim();
        if body.is_empty() {
            return Err(TaskCommentError::ValidationError(
                "Comment body must not be empty".to_string(),
            ));
        }
        let author = data
            .author
            .as_deref()
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .unwrap_or(ANONYMOUS_AUTHOR);

        let task = crate::models::task::Task::find_by_id(db, task_id)
            .await?
            .ok_or(TaskCommentError::TaskNotFound)?;
        let task_row_id = ids::task_id_by_uuid(db, task_id)
            .await?
            .ok_or(TaskCommentError::TaskNotFound)?;

        let active = task_comment::ActiveModel {
            uuid: Set(comment_id),
            task_id: Set(task_row_id),
            author: Set(author.to_string()),
            body: Set(body.to_string()),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        let model = active.insert(db).await?;
        let comment = Self::from_parts(model, task_id);
        Self::enqueue(db, EVENT_COMMENT_CREATED, &comment, Some(task.project_id)).await?;
        Ok(comment)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let Some(comment) = Self::find_by_id(db, id).await? else {
            return Ok(0);
        };
        let result = task_comment::Entity::delete_many()
            .filter(task_comment::Column::Uuid.eq(id))
            .exec(db)
            .await?;
        if result.rows_affected > 0 {
            let project_uuid = crate::models::task::Task::find_by_id(db, comment.task_id)
                .await?
                .map(|task| task.project_id);
            Self::enqueue(db, EVENT_COMMENT_DELETED, &comment, project_uuid).await?;
        }
        Ok(result.rows_affected)
    }
}
