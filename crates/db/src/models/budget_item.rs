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
    entities::budget_item,
    events::{
        BudgetItemEventPayload, EVENT_BUDGET_ITEM_CREATED, EVENT_BUDGET_ITEM_DELETED,
        EVENT_BUDGET_ITEM_UPDATED,
    },
    models::{
        event_outbox::{EventOutbox, OutboxEvent},
        ids,
    },
};

#[derive(Debug, Error)]
pub enum BudgetItemError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Budget item not found")]
    NotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Invalid budget item: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct BudgetItem {
    pub id: Uuid,
    pub project_id: Uuid,
    pub label: String,
    pub category: String,
    pub planned_amount: f64,
    pub spent_amount: f64,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateBudgetItem {
    pub project_id: Uuid,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub planned_amount: f64,
    #[serde(default)]
    pub spent_amount: f64,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct UpdateBudgetItem {
    pub label: Option<String>,
    pub category: Option<String>,
    pub planned_amount: Option<f64>,
    pub spent_amount: Option<f64>,
}

fn validate_amount(name: &str, amount: f64) -> Result<f64, BudgetItemError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(BudgetItemError::ValidationError(format!(
            "{name} must be a non-negative amount"
        )));
    }
    Ok(amount)
}

fn validate_label(label: &str) -> Result<String, BudgetItemError> {
    let label = label.trim();
    if label.is_empty() {
        return Err(BudgetItemError::ValidationError(
            "Label must not be empty".to_string(),
        ));
    }
    Ok(label.to_string())
}

impl BudgetItem {
    fn from_parts(model: budget_item::Model, project_id: Uuid) -> Self {
        Self {
            id: model.uuid,
            project_id,
            label: model.label,
            category: model.category,
            planned_amount: model.planned_amount,
            spent_amount: model.spent_amount,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    async fn find_model<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<budget_item::Model>, DbErr> {
        budget_item::Entity::find()
            .filter(budget_item::Column::Uuid.eq(id))
            .one(db)
            .await
    }

    async fn enqueue<C: ConnectionTrait>(
        db: &C,
        event_type: &str,
        item: &BudgetItem,
    ) -> Result<(), DbErr> {
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type,
                entity_type: "budget_item",
                entity_uuid: item.id,
                project_uuid: Some(item.project_id),
                payload: &BudgetItemEventPayload {
                    budget_item_id: item.id,
                    project_id: item.project_id,
                },
            },
        )
        .await
    }

    pub async fn find_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let project_row_id = ids::require_project_id(db, project_id).await?;
        let models = budget_item::Entity::find()
            .filter(budget_item::Column::ProjectId.eq(project_row_id))
            .order_by_asc(budget_item::Column::Category)
            .order_by_asc(budget_item::Column::Id)
            .all(db)
            .await?;
        Ok(models
            .into_iter()
            .map(|model| Self::from_parts(model, project_id))
            .collect())
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<Self>, DbErr> {
        let Some(model) = Self::find_model(db, id).await? else {
            return Ok(None);
        };
        let project_id = ids::require_project_uuid(db, model.project_id).await?;
        Ok(Some(Self::from_parts(model, project_id)))
    }

    pub async fn create<C: ConnectionTrait>(
        db: &C,
        data: &CreateBudgetItem,
        item_id: Uuid,
    ) -> Result<Self, BudgetItemError> {
        let label = validate_label(&data.label)?;
        let planned = validate_amount("Planned amount", data.planned_amount)?;
        let spent = validate_amount("Spent amount", data.spent_amount)?;
        let project_row_id = ids::project_id_by_uuid(db, data.project_id)
            .await?
            .ok_or(BudgetItemError::ProjectNotFound)?;

        let now = Utc::now();
        let active = budget_item::ActiveModel {
            uuid: Set(item_id),
            project_id: Set(project_row_id),
            label: Set(label),
            category: Set(data.category.trim().to_string()),
            planned_amount: Set(planned),
            spent_amount: Set(spent),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        let item = Self::from_parts(model, data.project_id);
        Self::enqueue(db, EVENT_BUDGET_ITEM_CREATED, &item).await?;
        Ok(item)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        payload: &UpdateBudgetItem,
    ) -> Result<Self, BudgetItemError> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(BudgetItemError::NotFound)?;
        let project_id = ids::require_project_uuid(db, record.project_id).await?;

        let mut active: budget_item::ActiveModel = record.into();
        if let Some(label) = payload.label.as_deref() {
            active.label = Set(validate_label(label)?);
        }
        if let Some(category) = payload.category.as_deref() {
            active.category = Set(category.trim().to_string());
        }
        if let Some(planned) = payload.planned_amount {
            active.planned_amount = Set(validate_amount("Planned amount", planned)?);
        }
        if let Some(spent) = payload.spent_amount {
            active.spent_amount = Set(validate_amount("Spent amount", spent)?);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(db).await?;
        let item = Self::from_parts(updated, project_id);
        Self::enqueue(db, EVENT_BUDGET_ITEM_UPDATED, &item).await?;
        Ok(item)
    }

    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let Some(item) = Self::find_by_id(db, id).await? else {
            return Ok(0);
        };
        let result = budget_item::Entity::delete_many()
            .filter(budget_item::Column::Uuid.eq(id))
            .exec(db)
            .await?;
        if result.rows_affected > 0 {
            Self::enqueue(db, EVENT_BUDGET_ITEM_DELETED, &item).await?;
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        models::project::{CreateProject, Project},
        test_db::setup_db,
    };

    use super::*;

    fn item(project_id: Uuid, label: &str, category: &str, planned: f64) -> CreateBudgetItem {
        CreateBudgetItem {
            project_id,
            label: label.to_string(),
            category: category.to_string(),
            planned_amount: planned,
            spent_amount: 0.0,
        }
    }

    #[tokio::test]
    async fn items_are_listed_by_category() {
        let db = setup_db().await;
        let project_id = Uuid::new_v4();
        Project::create(&db, &CreateProject::named("Album"), project_id)
            .await
            .unwrap();

        BudgetItem::create(&db, &item(project_id, "Mastering", "studio", 400.0), Uuid::new_v4())
            .await
            .unwrap();
        BudgetItem::create(&db, &item(project_id, "Posters", "marketing", 150.0), Uuid::new_v4())
            .await
            .unwrap();

        let items = BudgetItem::find_by_project_id(&db, project_id).await.unwrap();
        let labels: Vec<_> = items.iter().map(|item| item.label.as_str()).collect();
        assert_eq!(labels, vec!["Posters", "Mastering"]);
    }

    #[tokio::test]
    async fn amounts_must_be_non_negative() {
        let db = setup_db().await;
        let project_id = Uuid::new_v4();
        Project::create(&db, &CreateProject::named("Album"), project_id)
            .await
            .unwrap();

        let result =
            BudgetItem::create(&db, &item(project_id, "Refund", "misc", -5.0), Uuid::new_v4())
                .await;
        assert!(matches!(result, Err(BudgetItemError::ValidationError(_))));

        let id = Uuid::new_v4();
        BudgetItem::create(&db, &item(project_id, "Session", "studio", 300.0), id)
            .await
            .unwrap();
        let updated = BudgetItem::update(
            &db,
            id,
            &UpdateBudgetItem {
                spent_amount: Some(320.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.spent_amount, 320.0);
        assert_eq!(updated.planned_amount, 300.0);

        let nan = BudgetItem::update(
            &db,
            id,
            &UpdateBudgetItem {
                planned_amount: Some(f64::NAN),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(nan, Err(BudgetItemError::ValidationError(_))));

        assert_eq!(BudgetItem::delete(&db, id).await.unwrap(), 1);
        assert_eq!(BudgetItem::delete(&db, id).await.unwrap(), 0);
    }
}
