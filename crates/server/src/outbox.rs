//! Drains the event outbox into the structured log and prunes old rows.
//!
//! Each unpublished row is emitted as one `tracing` event on the
//! `trackflow::events` target, then marked published. Published rows are
//! deleted once they are older than the retention window.

use std::time::Duration;

use chrono::Utc;
use db::{
    DbErr, DbPool,
    entities::event_outbox,
    events::{
        BudgetItemEventPayload, CommentEventPayload, EVENT_BUDGET_ITEM_CREATED,
        EVENT_BUDGET_ITEM_DELETED, EVENT_BUDGET_ITEM_UPDATED, EVENT_COMMENT_CREATED,
        EVENT_COMMENT_DELETED, EVENT_PROJECT_CREATED, EVENT_PROJECT_DELETED,
        EVENT_PROJECT_PROGRESS_CHANGED, EVENT_PROJECT_UPDATED, EVENT_SONG_CREATED,
        EVENT_SONG_DELETED, EVENT_SONG_UPDATED, EVENT_TASK_CREATED, EVENT_TASK_DELETED,
        EVENT_TASK_UPDATED, ProjectEventPayload, ProjectProgressPayload, SongEventPayload,
        TaskEventPayload,
    },
    models::event_outbox::EventOutbox,
};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const OUTBOX_POLL_INTERVAL: Duration = Duration::from_secs(1);
const OUTBOX_BATCH_LIMIT: u64 = 100;
const OUTBOX_MAX_ATTEMPTS: i32 = 5;
const PUBLISHED_RETENTION_HOURS: i64 = 24;

#[derive(Debug, Error)]
enum DispatchError {
    #[error("unknown event type {0}")]
    UnknownEventType(String),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Counts from one relay pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelayPass {
    pub published: usize,
    pub failed: usize,
    pub pruned: u64,
}

#[derive(Clone)]
pub struct OutboxRelay {
    db: DbPool,
    retention: chrono::Duration,
}

impl OutboxRelay {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            retention: chrono::Duration::hours(PUBLISHED_RETENTION_HOURS),
        }
    }

    pub fn with_retention(mut self, retention: chrono::Duration) -> Self {
        self.retention = retention;
        self
    }

    pub async fn run(self) {
        tracing::info!(
            retention_hours = self.retention.num_hours(),
            "Starting event outbox relay"
        );
        loop {
            if let Err(err) = self.run_once().await {
                tracing::warn!(error = %err, "event outbox relay pass failed");
            }
            tokio::time::sleep(OUTBOX_POLL_INTERVAL).await;
        }
    }

    pub async fn run_once(&self) -> Result<RelayPass, DbErr> {
        let mut pass = RelayPass::default();
        let entries =
            EventOutbox::fetch_unpublished(&self.db, OUTBOX_BATCH_LIMIT, OUTBOX_MAX_ATTEMPTS)
                .await?;
        for entry in entries {
            match dispatch_entry(&entry) {
                Ok(()) => {
                    EventOutbox::mark_published(&self.db, entry.id).await?;
                    pass.published += 1;
                }
                Err(err) => {
                    let err_msg = err.to_string();
                    tracing::warn!(event_id = %entry.uuid, error = %err_msg, "event dispatch failed");
                    EventOutbox::mark_failed(&self.db, entry.id, &err_msg).await?;
                    pass.failed += 1;
                }
            }
        }

        pass.pruned = EventOutbox::prune_published_before(&self.db, Utc::now() - self.retention)
            .await?;
        if pass.pruned > 0 {
            tracing::debug!(pruned = pass.pruned, "Pruned published outbox rows");
        }
        Ok(pass)
    }
}

fn decode<P: DeserializeOwned>(entry: &event_outbox::Model) -> Result<P, DispatchError> {
    Ok(serde_json::from_value(entry.payload.clone())?)
}

fn dispatch_entry(entry: &event_outbox::Model) -> Result<(), DispatchError> {
    let event_type = entry.event_type.as_str();
    match event_type {
        EVENT_PROJECT_CREATED | EVENT_PROJECT_UPDATED | EVENT_PROJECT_DELETED => {
            let payload: ProjectEventPayload = decode(entry)?;
            tracing::info!(target: "trackflow::events", event_type, project_id = %payload.project_id);
        }
        EVENT_PROJECT_PROGRESS_CHANGED => {
            let payload: ProjectProgressPayload = decode(entry)?;
            tracing::info!(
                target: "trackflow::events",
                event_type,
                project_id = %payload.project_id,
                progress = payload.progress,
                status = %payload.status
            );
        }
        EVENT_SONG_CREATED | EVENT_SONG_UPDATED | EVENT_SONG_DELETED => {
            let payload: SongEventPayload = decode(entry)?;
            tracing::info!(
                target: "trackflow::events",
                event_type,
                song_id = %payload.song_id,
                project_id = %payload.project_id,
                phase = %payload.phase,
                status = %payload.status
            );
        }
        EVENT_TASK_CREATED | EVENT_TASK_UPDATED | EVENT_TASK_DELETED => {
            let payload: TaskEventPayload = decode(entry)?;
            tracing::info!(
                target: "trackflow::events",
                event_type,
                task_id = %payload.task_id,
                project_id = %payload.project_id,
                status = %payload.status
            );
        }
        EVENT_BUDGET_ITEM_CREATED | EVENT_BUDGET_ITEM_UPDATED | EVENT_BUDGET_ITEM_DELETED => {
            let payload: BudgetItemEventPayload = decode(entry)?;
            tracing::info!(
                target: "trackflow::events",
                event_type,
                budget_item_id = %payload.budget_item_id,
                project_id = %payload.project_id
            );
        }
        EVENT_COMMENT_CREATED | EVENT_COMMENT_DELETED => {
            let payload: CommentEventPayload = decode(entry)?;
            tracing::info!(
                target: "trackflow::events",
                event_type,
                comment_id = %payload.comment_id,
                task_id = %payload.task_id
            );
        }
        other => return Err(DispatchError::UnknownEventType(other.to_string())),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use db::{
        DBService,
        models::{
            event_outbox::OutboxEvent,
            project::{CreateProject, Project},
        },
        types::ProjectStatus,
    };
    use uuid::Uuid;

    use super::*;

    #[tokio::test]
    async fn recalculations_do_not_accumulate_outbox_rows() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let relay = OutboxRelay::new(db.pool.clone()).with_retention(chrono::Duration::zero());
        let id = Uuid::new_v4();
        Project::create(&db.pool, &CreateProject::named("EP"), id)
            .await
            .unwrap();

        for _ in 0..50 {
            Project::update_progress(&db.pool, id, 0.0, ProjectStatus::Active)
                .await
                .unwrap();
        }
        Project::update_progress(&db.pool, id, 50.0, ProjectStatus::Active)
            .await
            .unwrap();

        let pass = relay.run_once().await.unwrap();
        assert_eq!(pass.published, 2);
        assert_eq!(pass.failed, 0);

        relay.run_once().await.unwrap();
        assert!(EventOutbox::find_by_project(&db.pool, id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_events_are_marked_failed_and_retried_up_to_the_limit() {
        let db = DBService::new_with_url("sqlite::memory:").await.unwrap();
        let relay = OutboxRelay::new(db.pool.clone());
        let project_uuid = Uuid::new_v4();
        EventOutbox::enqueue(
            &db.pool,
            OutboxEvent {
                event_type: "mystery.event",
                entity_type: "mystery",
                entity_uuid: Uuid::new_v4(),
                project_uuid: Some(project_uuid),
                payload: &serde_json::json!({}),
            },
        )
        .await
        .unwrap();

        for _ in 0..OUTBOX_MAX_ATTEMPTS {
            let pass = relay.run_once().await.unwrap();
            assert_eq!(pass.failed, 1);
        }
        assert_eq!(relay.run_once().await.unwrap(), RelayPass::default());

        let rows = EventOutbox::find_by_project(&db.pool, project_uuid)
            .await
            .unwrap();
        assert_eq!(rows[0].attempts, OUTBOX_MAX_ATTEMPTS);
        assert!(rows[0].published_at.is_none());
    }
}
