use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::{
    DbErr,
    models::{
        budget_item::BudgetItemError, project::ProjectError, song::SongError, task::TaskError,
        task_comment::TaskCommentError,
    },
};
use thiserror::Error;
use utils::response::ApiResponse;
use workflow::{StoreError, WorkflowError};

#[derive(Debug, Error, ts_rs::TS)]
#[ts(type = "string")]
pub enum ApiError {
    #[error(transparent)]
    Project(#[from] ProjectError),
    #[error(transparent)]
    Song(#[from] SongError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    BudgetItem(#[from] BudgetItemError),
    #[error(transparent)]
    Comment(#[from] TaskCommentError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

fn workflow_status(err: &WorkflowError) -> StatusCode {
    match err {
        WorkflowError::SongNotFound
        | WorkflowError::TaskNotFound
        | WorkflowError::ProjectNotFound
        | WorkflowError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        WorkflowError::Transition(_) => StatusCode::CONFLICT,
        WorkflowError::Forbidden(_) => StatusCode::FORBIDDEN,
        WorkflowError::Validation(_) => StatusCode::BAD_REQUEST,
        WorkflowError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Project(err) => match err {
                ProjectError::ProjectNotFound => (StatusCode::NOT_FOUND, "ProjectError"),
                ProjectError::ValidationError(_) => (StatusCode::BAD_REQUEST, "ProjectError"),
                ProjectError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ProjectError"),
            },
            ApiError::Song(err) => match err {
                SongError::NotFound | SongError::ProjectNotFound => {
                    (StatusCode::NOT_FOUND, "SongError")
                }
                SongError::ValidationError(_) => (StatusCode::BAD_REQUEST, "SongError"),
                SongError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SongError"),
            },
            ApiError::Task(err) => match err {
                TaskError::TaskNotFound | TaskError::ProjectNotFound => {
                    (StatusCode::NOT_FOUND, "TaskError")
                }
                // The song exists elsewhere or not at all; either way the payload is wrong.
                TaskError::SongNotFound | TaskError::ValidationError(_) => {
                    (StatusCode::BAD_REQUEST, "TaskError")
                }
                TaskError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TaskError"),
            },
            ApiError::BudgetItem(err) => match err {
                BudgetItemError::NotFound | BudgetItemError::ProjectNotFound => {
                    (StatusCode::NOT_FOUND, "BudgetItemError")
                }
                BudgetItemError::ValidationError(_) => {
                    (StatusCode::BAD_REQUEST, "BudgetItemError")
                }
                BudgetItemError::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "BudgetItemError")
                }
            },
            ApiError::Comment(err) => match err {
                TaskCommentError::TaskNotFound => (StatusCode::NOT_FOUND, "CommentError"),
                TaskCommentError::ValidationError(_) => (StatusCode::BAD_REQUEST, "CommentError"),
                TaskCommentError::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CommentError")
                }
            },
            ApiError::Workflow(err) => (workflow_status(err), "WorkflowError"),
            ApiError::Database(db_err) => match db_err {
                DbErr::RecordNotFound(_) => (StatusCode::NOT_FOUND, "DatabaseError"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError"),
            },
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        let error_message = match &self {
            ApiError::Database(DbErr::RecordNotFound(msg)) => msg.clone(),
            ApiError::NotFound(msg) | ApiError::Internal(msg) => msg.clone(),
            _ if status_code.is_server_error() => format!("{}: {}", error_type, self),
            _ => self.to_string(),
        };

        if status_code.is_server_error() {
            tracing::error!(
                status = %status_code,
                error_type,
                error = %self,
                "API request failed"
            );
        }
        let response = ApiResponse::<()>::error(&error_message);
        (status_code, Json(response)).into_response()
    }
}
