use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::{
    models::{
        task::{CreateTask, Task, UpdateTask},
        task_comment::{CreateTaskComment, TaskComment},
    },
    types::TaskStatus,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;
use workflow::{Actor, WorkflowCommand, WorkflowOutcome};

use crate::{DeploymentImpl, error::ApiError, middleware::load_task_middleware};

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskQuery {
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, TS)]
pub struct MoveTaskRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Serialize, TS)]
pub struct MoveTaskResponse {
    pub task: Task,
    /// False when the task already sat in the requested column.
    pub moved: bool,
}

pub async fn get_tasks(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<TaskQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Task>>>, ApiError> {
    let pool = &deployment.db().pool;
    let tasks = match query.project_id {
        Some(project_id) => Task::find_by_project_id(pool, project_id).await?,
        None => Task::find_all(pool).await?,
    };

    Ok(ResponseJson(ApiResponse::success(tasks)))
}

pub async fn get_task(
    Extension(task): Extension<Task>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn create_task(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    tracing::debug!(
        "Creating task '{}' in project {}",
        payload.title,
        payload.project_id
    );
    let task = Task::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn update_task(
    Extension(existing_task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<UpdateTask>,
) -> Result<ResponseJson<ApiResponse<Task>>, ApiError> {
    let task = Task::update(&deployment.db().pool, existing_task.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(task)))
}

pub async fn delete_task(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = Task::delete(&deployment.db().pool, task.id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn move_task(
    Extension(task): Extension<Task>,
    Extension(actor): Extension<Actor>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<MoveTaskRequest>,
) -> Result<ResponseJson<ApiResponse<MoveTaskResponse>>, ApiError> {
    let outcome = deployment
        .workflow()
        .execute(
            actor,
            WorkflowCommand::MoveTask {
                task_id: task.id,
                status: payload.status,
            },
        )
        .await?;
    let response = match outcome {
        WorkflowOutcome::TaskMoved { task } => MoveTaskResponse { task, moved: true },
        WorkflowOutcome::TaskUnchanged { task } => MoveTaskResponse { task, moved: false },
        other => {
            return Err(ApiError::Internal(format!(
                "Unexpected outcome for task move: {other:?}"
            )));
        }
    };
    Ok(ResponseJson(ApiResponse::success(response)))
}

pub async fn get_task_comments(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<TaskComment>>>, ApiError> {
    let comments = TaskComment::find_by_task_id(&deployment.db().pool, task.id).await?;
    Ok(ResponseJson(ApiResponse::success(comments)))
}

pub async fn create_task_comment(
    Extension(task): Extension<Task>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateTaskComment>,
) -> Result<ResponseJson<ApiResponse<TaskComment>>, ApiError> {
    let comment =
        TaskComment::create(&deployment.db().pool, task.id, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(comment)))
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let task_id_router = Router::new()
        .route("/", get(get_task).put(update_task).delete(delete_task))
        .route("/status", put(move_task))
        .route(
            "/comments",
            get(get_task_comments).post(create_task_comment),
        )
        .layer(from_fn_with_state(
            deployment.clone(),
            load_task_middleware::<DeploymentImpl>,
        ));

    let tasks_router = Router::new()
        .route("/", get(get_tasks).post(create_task))
        .nest("/{task_id}", task_id_router);

    Router::new().nest("/tasks", tasks_router)
}
