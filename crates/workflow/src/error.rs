use db::{DbErr, models::song::SongError};
use thiserror::Error;

use crate::{phase::TransitionError, store::StoreError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Song not found")]
    SongNotFound,
    #[error("Task not found")]
    TaskNotFound,
    #[error("Project not found")]
    ProjectNotFound,
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DbErr> for WorkflowError {
    fn from(err: DbErr) -> Self {
        WorkflowError::Store(StoreError::from(err))
    }
}

impl From<SongError> for WorkflowError {
    fn from(err: SongError) -> Self {
        match err {
            SongError::NotFound => WorkflowError::SongNotFound,
            SongError::ProjectNotFound => WorkflowError::ProjectNotFound,
            SongError::ValidationError(message) => WorkflowError::Validation(message),
            SongError::Database(err) => err.into(),
        }
    }
}

pub(crate) trait StoreResultExt<T> {
    /// Replaces a store-level `NotFound` with the domain error for the missing record.
    fn or_missing(self, missing: WorkflowError) -> Result<T, WorkflowError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_missing(self, missing: WorkflowError) -> Result<T, WorkflowError> {
        match self {
            Ok(value) => Ok(value),
            Err(StoreError::NotFound) => Err(missing),
            Err(err) => Err(WorkflowError::Store(err)),
        }
    }
}

impl<T> StoreResultExt<T> for Result<T, DbErr> {
    fn or_missing(self, missing: WorkflowError) -> Result<T, WorkflowError> {
        self.map_err(StoreError::from).or_missing(missing)
    }
}
