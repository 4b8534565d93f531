use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;
use uuid::Uuid;

use crate::{
    entities::{song, task},
    events::{EVENT_SONG_CREATED, EVENT_SONG_DELETED, EVENT_SONG_UPDATED, SongEventPayload},
    models::{
        event_outbox::{EventOutbox, OutboxEvent},
        ids,
    },
    types::{SongPhase, SongStatus},
};

#[derive(Debug, Error)]
pub enum SongError {
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Song not found")]
    NotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error("Invalid song: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Song {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub phase: SongPhase,
    pub status: SongStatus,
    #[ts(type = "Date")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "Date")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, TS)]
pub struct CreateSong {
    pub project_id: Uuid,
    pub title: String,
    pub phase: Option<SongPhase>,
}

impl CreateSong {
    pub fn titled(project_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            phase: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
pub struct UpdateSong {
    pub title: Option<String>,
    pub phase: Option<SongPhase>,
}

/// Fields a workflow transition may change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SongStatePatch {
    pub phase: Option<SongPhase>,
    pub status: Option<SongStatus>,
}

impl Song {
    async fn from_model<C: ConnectionTrait>(db: &C, model: song::Model) -> Result<Self, DbErr> {
        let project_id = ids::require_project_uuid(db, model.project_id).await?;
        Ok(Self::from_model_with_project(model, project_id))
    }

    fn from_model_with_project(model: song::Model, project_id: Uuid) -> Self {
        Self {
            id: model.uuid,
            project_id,
            title: model.title,
            phase: model.phase,
            status: model.status,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SongStatus::Completed
    }

    async fn find_model<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
    ) -> Result<Option<song::Model>, DbErr> {
        song::Entity::find()
            .filter(song::Column::Uuid.eq(id))
            .one(db)
            .await
    }

    async fn enqueue<C: ConnectionTrait>(
        db: &C,
        event_type: &str,
        song: &Song,
    ) -> Result<(), DbErr> {
        EventOutbox::enqueue(
            db,
            OutboxEvent {
                event_type,
                entity_type: "song",
                entity_uuid: song.id,
                project_uuid: Some(song.project_id),
                payload: &SongEventPayload {
                    song_id: song.id,
                    project_id: song.project_id,
                    phase: song.phase.to_string(),
                    status: song.status.to_string(),
                },
            },
        )
        .await
    }

    pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Self>, DbErr> {
        let models = song::Entity::find()
            .order_by_asc(song::Column::Id)
            .all(db)
            .await?;

        let mut songs = Vec::with_capacity(models.len());
        for model in models {
            songs.push(Self::from_model(db, model).await?);
        }
        Ok(songs)
    }

    pub async fn find_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<Vec<Self>, DbErr> {
        let project_row_id = ids::require_project_id(db, project_id).await?;
        let models = song::Entity::find()
            .filter(song::Column::ProjectId.eq(project_row_id))
            .order_by_asc(song::Column::Id)
            .all(db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| Self::from_model_with_project(model, project_id))
            .collect())
    }

    /// Raw `(phase, status)` strings of every song in a project, read without
    /// enum decoding so unexpected stored values still reach the caller.
    pub async fn find_states_by_project_id<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> Result<Vec<(String, String)>, DbErr> {
        let project_row_id = ids::require_project_id(db, project_id).await?;
        song::Entity::find()
            .select_only()
            .column(song::Column::Phase)
            .column(song::Column::Status)
            .filter(song::Column::ProjectId.eq(project_row_id))
            .into_tuple()
            .all(db)
            .await
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
        data: &CreateSong,
        song_id: Uuid,
    ) -> Result<Self, SongError> {
        let title = data.title.trim();
        if title.is_empty() {
            return Err(SongError::ValidationError(
                "Song title must not be empty".to_string(),
            ));
        }
        let project_row_id = ids::project_id_by_uuid(db, data.project_id)
            .await?
            .ok_or(SongError::ProjectNotFound)?;

        let now = Utc::now();
        let active = song::ActiveModel {
            uuid: Set(song_id),
            project_id: Set(project_row_id),
            title: Set(title.to_string()),
            phase: Set(data.phase.unwrap_or_default()),
            status: Set(SongStatus::Pending),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        let song = Self::from_model_with_project(model, data.project_id);
        Self::enqueue(db, EVENT_SONG_CREATED, &song).await?;
        Ok(song)
    }

    pub async fn update_title<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        title: &str,
    ) -> Result<Self, SongError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SongError::ValidationError(
                "Song title must not be empty".to_string(),
            ));
        }
        let record = Self::find_model(db, id).await?.ok_or(SongError::NotFound)?;
        let mut active: song::ActiveModel = record.into();
        active.title = Set(title.to_string());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        let song = Self::from_model(db, updated).await?;
        Self::enqueue(db, EVENT_SONG_UPDATED, &song).await?;
        Ok(song)
    }

    /// Writes a new phase and/or status. Fails with `RecordNotFound` for an
    /// unknown song; transition rules are enforced by the caller.
    pub async fn update_state<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        patch: SongStatePatch,
    ) -> Result<Self, DbErr> {
        let record = Self::find_model(db, id)
            .await?
            .ok_or(DbErr::RecordNotFound("Song not found".to_string()))?;

        let mut active: song::ActiveModel = record.into();
        if let Some(phase) = patch.phase {
            active.phase = Set(phase);
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(db).await?;

        let song = Self::from_model(db, updated).await?;
        Self::enqueue(db, EVENT_SONG_UPDATED, &song).await?;
        Ok(song)
    }

    /// Deletes the song and detaches any tasks that referenced it.
    pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<u64, DbErr> {
        let Some(record) = Self::find_model(db, id).await? else {
            return Ok(0);
        };
        let row_id = record.id;
        let song = Self::from_model(db, record).await?;

        task::Entity::update_many()
            .col_expr(
                task::Column::SongId,
                sea_orm::sea_query::Expr::value(None::<i64>),
            )
            .filter(task::Column::SongId.eq(row_id))
            .exec(db)
            .await?;

        let result = song::Entity::delete_many()
            .filter(song::Column::Id.eq(row_id))
            .exec(db)
            .await?;

        if result.rows_affected > 0 {
            Self::enqueue(db, EVENT_SONG_DELETED, &song).await?;
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

    async fn project(db: &sea_orm::DatabaseConnection) -> Uuid {
        let id = Uuid::new_v4();
        Project::create(db, &CreateProject::named("Album"), id)
            .await
            .unwrap();
        id
    }

    #[tokio::test]
    async fn new_song_starts_pending_in_first_phase() {
        let db = setup_db().await;
        let project_id = project(&db).await;

        let song = Song::create(&db, &CreateSong::titled(project_id, "Track 1"), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(song.phase, SongPhase::Preproduction);
        assert_eq!(song.status, SongStatus::Pending);

        let mut later = CreateSong::titled(project_id, "Track 2");
        later.phase = Some(SongPhase::Engineering);
        let later = Song::create(&db, &later, Uuid::new_v4()).await.unwrap();
        assert_eq!(later.phase, SongPhase::Engineering);

        let songs = Song::find_by_project_id(&db, project_id).await.unwrap();
        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].title, "Track 1");
    }

    #[tokio::test]
    async fn create_requires_existing_project_and_title() {
        let db = setup_db().await;
        let missing =
            Song::create(&db, &CreateSong::titled(Uuid::new_v4(), "Orphan"), Uuid::new_v4()).await;
        assert!(matches!(missing, Err(SongError::ProjectNotFound)));

        let project_id = project(&db).await;
        let blank = Song::create(&db, &CreateSong::titled(project_id, " "), Uuid::new_v4()).await;
        assert!(matches!(blank, Err(SongError::ValidationError(_))));
    }

    #[tokio::test]
    async fn states_are_read_as_raw_strings() {
        let db = setup_db().await;
        let project_id = project(&db).await;
        let mut create = CreateSong::titled(project_id, "Track");
        create.phase = Some(SongPhase::Publishing);
        Song::create(&db, &create, Uuid::new_v4()).await.unwrap();

        let states = Song::find_states_by_project_id(&db, project_id)
            .await
            .unwrap();
        assert_eq!(states, vec![("4".to_string(), "pending".to_string())]);
    }

    #[tokio::test]
    async fn update_state_applies_only_given_fields() {
        let db = setup_db().await;
        let project_id = project(&db).await;
        let id = Uuid::new_v4();
        Song::create(&db, &CreateSong::titled(project_id, "Track"), id)
            .await
            .unwrap();

        let song = Song::update_state(
            &db,
            id,
            SongStatePatch {
                phase: Some(SongPhase::Production),
                status: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(song.phase, SongPhase::Production);
        assert_eq!(song.status, SongStatus::Pending);

        let song = Song::update_state(
            &db,
            id,
            SongStatePatch {
                phase: None,
                status: Some(SongStatus::Completed),
            },
        )
        .await
        .unwrap();
        assert_eq!(song.phase, SongPhase::Production);
        assert!(song.is_completed());

        let missing = Song::update_state(&db, Uuid::new_v4(), SongStatePatch::default()).await;
        assert!(matches!(missing, Err(DbErr::RecordNotFound(_))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let db = setup_db().await;
        let project_id = project(&db).await;
        let id = Uuid::new_v4();
        Song::create(&db, &CreateSong::titled(project_id, "Track"), id)
            .await
            .unwrap();

        assert_eq!(Song::delete(&db, id).await.unwrap(), 1);
        assert_eq!(Song::delete(&db, id).await.unwrap(), 0);
        assert!(Song::find_by_id(&db, id).await.unwrap().is_none());
    }
}
