//! Persistence port used by the command executor.

use async_trait::async_trait;
use db::{
    DbErr,
    models::{
        project::Project,
        song::{Song, SongStatePatch},
        task::Task,
    },
    types::{ProjectStatus, TaskStatus},
};
use sea_orm::ConnectionTrait;
use thiserror::Error;
use uuid::Uuid;

use crate::progress::SongSnapshot;

pub type SongPatch = SongStatePatch;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Raw phase/status of every song of the project. `NotFound` for an unknown project.
    async fn list_songs(&self, project_id: Uuid) -> Result<Vec<SongSnapshot>, StoreError>;

    async fn find_song(&self, song_id: Uuid) -> Result<Option<Song>, StoreError>;

    async fn update_song(&self, song_id: Uuid, patch: SongPatch) -> Result<Song, StoreError>;

    async fn update_project_progress(
        &self,
        project_id: Uuid,
        progress: f64,
        status: ProjectStatus,
    ) -> Result<Project, StoreError>;

    async fn find_task(&self, task_id: Uuid) -> Result<Option<Task>, StoreError>;

    async fn update_task_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, StoreError>;
}

/// [`WorkflowStore`] over a sea-orm connection or an open transaction.
pub struct SeaOrmStore<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmStore<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl<'a, C> WorkflowStore for SeaOrmStore<'a, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn list_songs(&self, project_id: Uuid) -> Result<Vec<SongSnapshot>, StoreError> {
        let states = Song::find_states_by_project_id(self.conn, project_id).await?;
        Ok(states.into_iter().map(SongSnapshot::from).collect())
    }

    async fn find_song(&self, song_id: Uuid) -> Result<Option<Song>, StoreError> {
        Ok(Song::find_by_id(self.conn, song_id).await?)
    }

    async fn update_song(&self, song_id: Uuid, patch: SongPatch) -> Result<Song, StoreError> {
        Ok(Song::update_state(self.conn, song_id, patch).await?)
    }

    async fn update_project_progress(
        &self,
        project_id: Uuid,
        progress: f64,
        status: ProjectStatus,
    ) -> Result<Project, StoreError> {
        Ok(Project::update_progress(self.conn, project_id, progress, status).await?)
    }

    async fn find_task(&self, task_id: Uuid) -> Result<Option<Task>, StoreError> {
        Ok(Task::find_by_id(self.conn, task_id).await?)
    }

    async fn update_task_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Task, StoreError> {
        Ok(Task::update_status(self.conn, task_id, status).await?)
    }
}
