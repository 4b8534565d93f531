use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    middleware::from_fn_with_state,
    response::Json as ResponseJson,
    routing::{get, put},
};
use db::models::budget_item::{BudgetItem, CreateBudgetItem, UpdateBudgetItem};
use serde::Deserialize;
use utils::response::ApiResponse;
use uuid::Uuid;

use crate::{DeploymentImpl, error::ApiError, middleware::load_budget_item_middleware};

#[derive(Debug, Deserialize)]
pub struct BudgetItemQuery {
    pub project_id: Uuid,
}

pub async fn get_budget_items(
    State(deployment): State<DeploymentImpl>,
    Query(query): Query<BudgetItemQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<BudgetItem>>>, ApiError> {
    let items = BudgetItem::find_by_project_id(&deployment.db().pool, query.project_id).await?;
    Ok(ResponseJson(ApiResponse::success(items)))
}

pub async fn create_budget_item(
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<CreateBudgetItem>,
) -> Result<ResponseJson<ApiResponse<BudgetItem>>, ApiError> {
    let item = BudgetItem::create(&deployment.db().pool, &payload, Uuid::new_v4()).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

pub async fn update_budget_item(
    Extension(item): Extension<BudgetItem>,
    State(deployment): State<DeploymentImpl>,
    Json(payload): Json<UpdateBudgetItem>,
) -> Result<ResponseJson<ApiResponse<BudgetItem>>, ApiError> {
    let item = BudgetItem::update(&deployment.db().pool, item.id, &payload).await?;
    Ok(ResponseJson(ApiResponse::success(item)))
}

pub async fn delete_budget_item(
    Extension(item): Extension<BudgetItem>,
    State(deployment): State<DeploymentImpl>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    let rows_affected = BudgetItem::delete(&deployment.db().pool, item.id).await?;
    if rows_affected == 0 {
        return Err(ApiError::NotFound("Budget item not found".to_string()));
    }
    Ok(ResponseJson(ApiResponse::success(())))
}

pub fn router(deployment: &DeploymentImpl) -> Router<DeploymentImpl> {
    let item_id_router = Router::new()
        .route("/", put(update_budget_item).delete(delete_budget_item))
        .layer(from_fn_with_state(
            deployment.clone(),
            load_budget_item_middleware::<DeploymentImpl>,
        ));

    let items_router = Router::new()
        .route("/", get(get_budget_items).post(create_budget_item))
        .nest("/{item_id}", item_id_router);

    Router::new().nest("/budget-items", items_router)
}
