use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::delete,
};
use db::models::task_comment::TaskComment;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError};

pub async fn delete_comment(
    Path(comment_id): Path<Uuid>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = TaskComment::delete(&deployment.db().pool, comment_id).await?;
    if rows_affected == 0 {
        tracing::warn!("Comment {comment_id} not found");
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router() -> Router<DeploymentImpl> {
    Router::new().route("/comments/{comment_id}", delete(delete_comment))
}
