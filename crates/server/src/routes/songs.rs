use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::{
    project::Project,
    song::{CreateSong, Song, UpdateSong},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utils::response::ApiResponse;
use uuid::Uuid;
use workflow::{Actor, SongChange, WorkflowCommand, WorkflowOutcome};

use crate::{DeploymentImpl, error::ApiError, middleware::load_song_middleware};

#[derive(Debug, Serialize, Deserialize)]
pub struct SongQuery {
    pub project_id: Option<Uuid>,
}

/// Result of asking a song to move on. In the last phase nothing is written and
/// `completion_requested` tells the client to offer completion instead.
#[derive(Debug, Serialize, TS)]
pub struct SongAdvanceResponse {
    pub song: Song,
    pub project: Option<Project>,
    pub completion_requested: bool,
}

pub async fn get_songs(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<SongQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<Song>>>, ApiError> {
    let pool = &deployment.db().pool;
    let songs = match query.project_id {
        Some(project_id) => Song::find_by_project_id(pool, project_id).await?,
        None => Song::find_all(pool).await?,
    };
    Ok(ResponseJson(ApiResponse::success(songs)))
}

pub async fn get_song(
    Extension(song): Extension<Song>,
) -> Result<ResponseJson<ApiResponse<Song>>, ApiError> {
    Ok(ResponseJson(ApiResponse::success(song)))
}

pub async fn create_song(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateSong>,
) -> Result<ResponseJson<ApiResponse<SongChange>>, ApiError> {
    let change = deployment.workflow().add_song(&payload).await?;
    Ok(ResponseJson(ApiResponse::success(change)))
}

pub async fn update_song(
    Extension(song): Extension<Song>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<UpdateSong>,
) -> Result<ResponseJson<ApiResponse<SongChange>>, ApiError> {
    let change = deployment.workflow().update_song(song.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(change)))
}

pub async fn delete_song(
    Extension(song): Extension<Song>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<Project>>, ApiError> {
    let project = deployment.workflow().delete_song(song.id).await?;
    Ok(ResponseJson(ApiResponse::success(project)))
}

pub async fn advance_song(
    Extension(song): Extension<Song>,
    Extension(actor): Extension<Actor>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<SongAdvanceResponse>>, ApiError> {
    let outcome = deployment
        .workflow()
        .execute(actor, WorkflowCommand::AdvanceSongPhase { song_id: song.id })
        .await?;
    let response = match outcome {
        WorkflowOutcome::SongAdvanced { song, project } => SongAdvanceResponse {
            song,
            project: Some(project),
            completion_requested: false,
        },
        WorkflowOutcome::CompletionRequested { song } => SongAdvanceResponse {
            song,
            project: None,
            completion_requested: true,
        },
        other => {
            return Err(ApiError::Internal(format!(
                "Unexpected outcome for phase advance: {other:?}"
            )));
        }
    };
    Ok(ResponseJson(ApiResponse::success(response)))
}

pub async fn complete_song(
    Extension(song): Extension<Song>,
    Extension(actor): Extension<Actor>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<SongChange>>, ApiError> {
    let outcome = deployment
        .workflow()
        .execute(actor, WorkflowCommand::CompleteSong { song_id: song.id })
        .await?;
    match outcome {
        WorkflowOutcome::SongCompleted { song, project } => {
            Ok(ResponseJson(ApiResponse::success(SongChange { song, project })))
        }
        other => Err(ApiError::Internal(format!(
            "Unexpected outcome for completion: {other:?}"
        ))),
    }
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let song_id_router = Router::new()
        .route("/", get(get_song).put(update_song).delete(delete_song))
        .route("/advance", post(advance_song))
        .route("/complete", post(complete_song))
        .layer(from_fn_with_state(
            deployment.clone(),
            load_song_middleware::<DeploymentImpl>,
        ));

    let songs_router = Router::new()
        .route("/", get(get_songs).post(create_song))
        .nest("/{song_id}", song_id_router);

    Router::new().nest("/songs", songs_router)
}
