use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    entities::{budget_item, project, song, task, task_comment},
    events::{
        EVENT_PROJECT_CREATED, EVENT_PROJECT_DELETED, EVENT_PROJECT_PROGRESS_CHANGED,
        EVENT_PROJECT_UPDATED, ProjectEventPayload, ProjectProgressPayload,
    },
    models::event_outbox::{EventOutbox, OutboxEvent},
    types::ProjectStatus,
};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Invalid project: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub progress: f64,
    pub status: ProjectStatus,
    pub budget: f64,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl CreateProject {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            budget: None,
            start_date: None,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

fn validate_fields(
    name: &str,
    budget: f64,
    start_date: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
) -> Result<(), ProjectError> {
    if name.trim().is_empty() {
        return Err(ProjectError::ValidationError(
            "Project name must not be empty".to_string(),
        ));
    }
    if !budget.is_finite() || budget < 0.0 {
        return Err(ProjectError::ValidationError(
            "Budget must be a non-negative amount".to_string(),
        ));
    }
    if let (Some(start), Some(end)) = (start_date, deadline)
        && end < start
    {
        return Err(ProjectError::ValidationError(
            "Deadline must not be before the start date".to_string(),
        ));
    }
    Ok(())
}

impl Project {
    pub(crate) fn from_model(model: project::Model) -> Self {
        Self {
            id: model.uuid,
            name: model.name,
            description: model.description,
            progress: model.progress,
            status: model.status,
            budget: model.budget,
            start_date: model.start_date,
            deadline: model.deadline,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    async fn find_model<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<project::Model>, DbErr> {
        project::Entity::find()
            .filter(project::Column::Uuid.eq(id))
            .one(db)
            .await
    }

    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<i64, DbErr> {
        let count = project::Entity::find().count(db).await?;
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let records = project::Entity::find()
            .order_by_desc(project::Column::CreatedAt)
            .order_by_desc(project::Column::Id)
            .all(db)
            .await?;
        Ok(records.into_iter().map(Self::from_model).collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        Ok(Self::find_model(db, id).await?.map(Self::from_model))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateProject,
        project_id: Uuid,
    ) -> Result<Self, ProjectError> {
        let budget = data.budget.unwrap_or(0.0);
        validate_fields(&data.name, budget, data.start_date, data.deadline)?;

        let now = Utc::now();
        let active = project::ActiveModel {
            uuid: Set(project_id),
            name: Set(data.name.trim().to_string()),
            description: Set(data.description.clone()),
            progress: Set(0.0),
            status: Set(ProjectStatus::Active),
            budget: Set(budget),
            start_date: Set(data.start_date),
            deadline: Set(data.deadline),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type: EVENT_PROJECT_CREATED,
                entity_type: "project",
                entity_uuid: project_id,
                project_uuid: Some(project_id),
                payload: &ProjectEventPayload { project_id },
            },
        )
        .await?;
        Ok(Self::from_model(model))
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        payload: &UpdateProject,
    ) -> Result<Self, ProjectError> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(ProjectError::ProjectNotFound)?;

        let name = payload.name.clone().unwrap_or_else(|| record.name.clone());
        let budget = payload.budget.unwrap_or(record.budget);
        let start_date = payload.start_date.or(record.start_date);
        let deadline = payload.deadline.or(record.deadline);
        validate_fields(&name, budget, start_date, deadline)?;

        let mut active: project::ActiveModel = record.into();
        active.name = Set(name.trim().to_string());
        if let Some(description) = payload.description.clone() {
            // Empty string clears the description.
            active.description = Set(Some(description).filter(|d| !d.trim().is_empty()));
        }
        active.budget = Set(budget);
        active.start_date = Set(start_date);
        active.deadline = Set(deadline);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(db).await?;
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type: EVENT_PROJECT_UPDATED,
                entity_type: "project",
                entity_uuid: id,
                project_uuid: Some(id),
                payload: &ProjectEventPayload { project_id: id },
            },
        )
        .await?;
        Ok(Self::from_model(updated))
    }

    /// Persists a recomputed progress value together with its derived status.
    pub async fn update_progress<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        progress: f64,
        status: ProjectStatus,
    ) -> Result<Self, DbErr> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;
        if record.progress == progress && record.status == status {
            return Ok(Self::from_model(record));
        }

        let mut active: project::ActiveModel = record.into();
        active.progress = Set(progress);
        active.status = Set(status);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type: EVENT_PROJECT_PROGRESS_CHANGED,
                entity_type: "project",
                entity_uuid: id,
                project_uuid: Some(id),
                payload: &ProjectProgressPayload {
                    project_id: id,
                    progress,
                    status: status.to_string(),
                },
            },
        )
        .await?;
        Ok(Self::from_model(updated))
    }

    /// Deletes the project and everything it owns. Returns the number of
    /// project rows removed (0 when it did not exist).
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let Some(project) = Self::find_model(db, id).await? else {
            return Ok(0);
        };

        let task_ids: Vec<i64> = task::Entity::find()
            .filter(task::Column::ProjectId.eq(project.id))
            .all(db)
            .await?
            .into_iter()
            .map(|task| task.id)
            .collect();
        if !task_ids.is_empty() {
            task_comment::Entity::delete_many()
                .filter(task_comment::Column::TaskId.is_in(task_ids))
                .exec(db)
                .await?;
        }
        task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(project.id))
            .exec(db)
            .await?;
        song::Entity::delete_many()
            .filter(song::Column::ProjectId.eq(project.id))
            .exec(db)
            .await?;
        budget_item::Entity::delete_many()
            .filter(budget_item::Column::ProjectId.eq(project.id))
            .exec(db)
            .await?;

        let result = project::Entity::delete_many()
            .filter(project::Column::Id.eq(project.id))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            EventOutbox::enqueue(
                db,
                OutboxEvent {
                    event_type: EVENT_PROJECT_DELETED,
                    entity_type: "project",
                    entity_uuid: id,
                    project_uuid: Some(id),
                    payload: &ProjectEventPayload { project_id: id },
                },
            )
            .await?;
        }

        Ok(result.rows_affected)
    }
}
