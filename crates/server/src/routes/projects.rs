use axum::{
    Extension, Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, post},
};
use chrono::Utc;
use db::{
    TransactionTrait,
    models::project::{CreateProject, Project, UpdateProject},
};
use utils::response::ApiResponse;
use uuid::Uuid;
use workflow::{
    Actor, WorkflowCommand, WorkflowOutcome, board::BoardColumns, overview::ProjectOverview,
};

use crate::{DeploymentImpl, error::ApiError, middleware::load_project_middleware};

pub async fn get_projects(
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = Project::find_all(&deployment.db().pool).await?;
    Ok(ResponseJson(ApiResponse::success(projects)))
}

pub async fn get_project(
    Extension(project): Extension<Project>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn create_project(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    tracing::debug!("Creating project '{}'", payload.name);
    let project = Project::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    tracing::info!(project_id = %project.id, "project created");
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn update_project(
    Extension(existing_project): Extension<Project>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<UpdateProject>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = Project::update(&deployment.db().pool, existing_project.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn delete_project(
    Extension(project): Extension<Project>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let tx = deployment.db().pool.begin().await?;
    let rows_affected = Project::delete(&tx, project.id).await?;
    tx.commit().await?;

    if rows_affected == 0 {
        return Err(ApiError::NotFound("Project not found".to_string()));
    }
    tracing::info!(project_id = %project.id, "project deleted");

    Ok(ResponseJson(ApiResponse::success(())))
}

pub async fn get_project_overview(
    Extension(project): Extension<Project>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<ProjectOverview>>, ApiError> {
    let today = Utc::now().date_naive();
    let overview = deployment.workflow().overview(project.id, today).await?;
    Ok(ResponseJson(ApiResponse::success(overview)))
}

pub async fn get_project_board(
    Extension(project): Extension<Project>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<BoardColumns>>, ApiError> {
    let board = deployment.workflow().board(project.id).await?;
    Ok(ResponseJson(ApiResponse::success(board)))
}

pub async fn recalculate_project(
    Extension(project): Extension<Project>,
    Extension(actor): Extension<Actor>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let outcome = deployment
        .workflow()
        .execute(
            actor,
            WorkflowCommand::RecalculateProject {
                project_id: project.id,
            },
        )
        .await?;
    match outcome {
        WorkflowOutcome::ProjectRecalculated { project } => {
            Ok(ResponseJson(ApiResponse::success(project)))
        }
        other => Err(ApiError::Internal(format!(
            "Unexpected outcome for recalculation: {other:?}"
        ))),
    }
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let project_id_router = Router::new()
        .route(
            "/",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/overview", get(get_project_overview))
        .route("/board", get(get_project_board))
        .route("/recalculate", post(recalculate_project))
        .layer(from_fn_with_state(
            deployment.clone(),
            load_project_middleware::<DeploymentImpl>,
        ));

    let projects_router = Router::new()
        .route("/", get(get_projects).post(create_project))
        .nest("/{project_id}", project_id_router);

    Router::new().nest("/projects", projects_router)
}
