use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Serialize;
use uuid::Uuid;

use crate::entities::event_outbox;

/// A domain event waiting in the outbox.
pub struct OutboxEvent<'a, P> {
    pub event_type: &'a str,
    pub entity_type: &'a str,
    pub entity_uuid: Uuid,
    pub project_uuid: Option<Uuid>,
    pub payload: &'a P,
}

pub struct EventOutbox;

impl EventOutbox {
    pub async fn enqueue<C, P>(db: &C, event: OutboxEvent<'_, P>) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
        P: Serialize,
    {
        let payload =
            serde_json::to_value(event.payload).map_err(|err| DbErr::Custom(err.to_string()))?;
        let active = event_outbox::ActiveModel {
            uuid: Set(Uuid::new_v4()),
            event_type: Set(event.event_type.to_string()),
            entity_type: Set(event.entity_type.to_string()),
            entity_uuid: Set(event.entity_uuid),
            project_uuid: Set(event.project_uuid),
            payload: Set(payload),
            created_at: Set(Utc::now().into()),
            published_at: Set(None),
            attempts: Set(0),
            last_error: Set(None),
            ..Default::default()
        };

        active.insert(db).await?;
        Ok(())
    }

    /// Oldest unpublished rows first; rows that already failed `max_attempts`
    /// times are left out.
    pub async fn fetch_unpublished<C: ConnectionTrait>(
        db: &C,
        limit: u64,
        max_attempts: i32,
    ) -> Result<Vec<event_outbox::Model>, DbErr> {
        event_outbox::Entity::find()
            .filter(event_outbox::Column::PublishedAt.is_null())
            .filter(event_outbox::Column::Attempts.lt(max_attempts))
            .order_by_asc(event_outbox::Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    pub async fn find_by_project<C: ConnectionTrait>(
        db: &C,
        project_uuid: Uuid,
    ) -> Result<Vec<event_outbox::Model>, DbErr> {
        event_outbox::Entity::find()
            .filter(event_outbox::Column::ProjectUuid.eq(project_uuid))
            .order_by_asc(event_outbox::Column::Id)
            .all(db)
            .await
    }

    pub async fn mark_published<C: ConnectionTrait>(db: &C, id: i64) -> Result<(), DbErr> {
        let record = event_outbox::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(
                "Event outbox record not found".to_string(),
            ))?;

        let mut active: event_outbox::ActiveModel = record.into();
        active.published_at = Set(Some(Utc::now().into()));
        active.update(db).await?;
        Ok(())
    }

    pub async fn mark_failed<C: ConnectionTrait>(
        db: &C,
        id: i64,
        error: &str,
    ) -> Result<(), DbErr> {
        let record = event_outbox::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(
                "Event outbox record not found".to_string(),
            ))?;

        let attempts = record.attempts + 1;
        let mut active: event_outbox::ActiveModel = record.into();
        active.attempts = Set(attempts);
        active.last_error = Set(Some(error.to_string()));
        active.update(db).await?;
        Ok(())
    }

    /// Deletes rows published before `cutoff`. Unpublished rows are kept.
    pub async fn prune_published_before<C: ConnectionTrait>(
        db: &C,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = event_outbox::Entity::delete_many()
            .filter(event_outbox::Column::PublishedAt.is_not_null())
            .filter(event_outbox::Column::PublishedAt.lt(cutoff))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_db::setup_db;

    use super::*;

    #[tokio::test]
    async fn outbox_enqueue_fetch_and_marking() {
        let db = setup_db().await;
        let project_uuid = Uuid::new_v4();

        let entity_uuid_one = Uuid::new_v4();
        EventOutbox::enqueue(
            &db,
            OutboxEvent {
                event_type: "test.event.one",
                entity_type: "test",
                entity_uuid: entity_uuid_one,
                project_uuid: Some(project_uuid),
                payload: &serde_json::json!({ "value": 1 }),
            },
        )
        .await
        .unwrap();

        let entity_uuid_two = Uuid::new_v4();
        EventOutbox::enqueue(
            &db,
            OutboxEvent {
                event_type: "test.event.two",
                entity_type: "test",
                entity_uuid: entity_uuid_two,
                project_uuid: None,
                payload: &serde_json::json!({ "value": 2 }),
            },
        )
        .await
        .unwrap();

        let entries = EventOutbox::fetch_unpublished(&db, 10, 3).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_uuid, entity_uuid_one);
        assert_eq!(entries[0].payload, serde_json::json!({ "value": 1 }));

        let scoped = EventOutbox::find_by_project(&db, project_uuid).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].event_type, "test.event.one");

        let entry_one_id = entries[0].id;
        let entry_two_id = entries[1].id;

        EventOutbox::mark_published(&db, entry_one_id).await.unwrap();
        let entries = EventOutbox::fetch_unpublished(&db, 10, 3).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_uuid, entity_uuid_two);

        EventOutbox::mark_failed(&db, entry_two_id, "boom").await.unwrap();
        let entries = EventOutbox::fetch_unpublished(&db, 10, 3).await.unwrap();
        assert_eq!(entries[0].attempts, 1);
        assert_eq!(entries[0].last_error.as_deref(), Some("boom"));

        EventOutbox::mark_published(&db, entry_two_id).await.unwrap();
        assert!(
            EventOutbox::fetch_unpublished(&db, 10, 3)
                .await
                .unwrap()
                .is_empty()
        );
    }

    async fn enqueue_test_event(db: &sea_orm::DatabaseConnection) {
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type: "test.event",
                entity_type: "test",
                entity_uuid: Uuid::new_v4(),
                project_uuid: None,
                payload: &serde_json::json!({}),
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn rows_past_max_attempts_are_not_fetched() {
        let db = setup_db().await;
        enqueue_test_event(&db).await;
        let id = EventOutbox::fetch_unpublished(&db, 10, 2).await.unwrap()[0].id;

        EventOutbox::mark_failed(&db, id, "first").await.unwrap();
        assert_eq!(EventOutbox::fetch_unpublished(&db, 10, 2).await.unwrap().len(), 1);
        EventOutbox::mark_failed(&db, id, "second").await.unwrap();
        assert!(
            EventOutbox::fetch_unpublished(&db, 10, 2)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn prune_removes_only_published_rows_before_cutoff() {
        let db = setup_db().await;
        enqueue_test_event(&db).await;
        enqueue_test_event(&db).await;
        let entries = EventOutbox::fetch_unpublished(&db, 10, 3).await.unwrap();
        EventOutbox::mark_published(&db, entries[0].id).await.unwrap();

        let past = Utc::now() - chrono::Duration::hours(1);
        assert_eq!(EventOutbox::prune_published_before(&db, past).await.unwrap(), 0);

        let future = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(EventOutbox::prune_published_before(&db, future).await.unwrap(), 1);
        let remaining = event_outbox::Entity::find().all(&db).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, entries[1].id);
        assert!(remaining[0].published_at.is_none());
    }

    #[tokio::test]
    async fn marking_unknown_record_is_not_found() {
        let db = setup_db().await;
        let err = EventOutbox::mark_published(&db, 999).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotFound(_)));
    }
}
