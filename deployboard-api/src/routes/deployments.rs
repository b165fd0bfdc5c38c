/// Deployment endpoints
///
/// # Endpoints
///
/// - `GET /v1/deployments?query=&page=` - One page of the deployments table
/// - `GET /v1/deployments/pages?query=` - Page count for a search
/// - `GET /v1/deployments/:id` - Deployment for the edit form
/// - `GET /v1/deployments/:id/edit` - Deployment plus customer choices
/// - `POST /v1/deployments` - Create deployment
/// - `PUT /v1/deployments/:id` - Update deployment
/// - `DELETE /v1/deployments/:id` - Delete deployment

use crate::{
    app::AppState,
    cache::Fresh,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use deployboard_shared::{
    data::{pagination::PageNumber, Operation},
    format::{format_currency, format_date_to_local},
    models::{
        customer::CustomerField,
        deployment::{
            CreateDeployment, Deployment, DeploymentForm, DeploymentStatus, DeploymentsTableRow,
            UpdateDeployment,
        },
    },
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Search parameters for the deployments table
///
/// Both are taken as raw strings: a missing or unparseable `page` means page 1.
#[derive(Debug, Default, Deserialize)]
pub struct DeploymentSearchParams {
    #[serde(default)]
    pub query: String,

    pub page: Option<String>,
}

/// Row of the deployments table
#[derive(Debug, Serialize)]
pub struct DeploymentTableItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,

    /// Amount in cents
    pub amount: i32,

    /// Amount as currency, e.g. "$157.95"
    pub amount_display: String,

    pub date: NaiveDate,

    /// Date as shown in the table, e.g. "Dec 6, 2022"
    pub date_display: String,

    pub status: DeploymentStatus,
}

impl From<DeploymentsTableRow> for DeploymentTableItem {
    fn from(row: DeploymentsTableRow) -> Self {
        Self {
            amount_display: format_currency(i64::from(row.amount)),
            date_display: format_date_to_local(row.date),
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            amount: row.amount,
            date: row.date,
            status: row.status,
        }
    }
}

/// One page of the deployments table
#[derive(Debug, Serialize)]
pub struct ListDeploymentsResponse {
    pub query: String,
    pub page: PageNumber,
    pub total_pages: i64,
    pub deployments: Vec<DeploymentTableItem>,
}

/// Page count response
#[derive(Debug, Serialize)]
pub struct DeploymentPagesResponse {
    pub query: String,
    pub total_pages: i64,
}

/// Edit form data
#[derive(Debug, Serialize)]
pub struct EditDeploymentResponse {
    pub deployment: DeploymentForm,
    pub customers: Vec<CustomerField>,
}

/// Lists one page of deployments matching `query`
///
/// The page and the page count are fetched concurrently.
///
/// # Response
///
/// ```json
/// {
///   "query": "lee",
///   "page": 1,
///   "total_pages": 2,
///   "deployments": [
///     {
///       "id": "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
///       "name": "Lee Robinson",
///       "email": "lee@robinson.com",
///       "image_url": "/customers/lee-robinson.png",
///       "amount": 15795,
///       "amount_display": "$157.95",
///       "date": "2022-12-06",
///       "date_display": "Dec 6, 2022",
///       "status": "pending"
///     }
///   ]
/// }
/// ```
pub async fn list_deployments(
    State(state): State<AppState>,
    Query(params): Query<DeploymentSearchParams>,
) -> ApiResult<Fresh<ListDeploymentsResponse>> {
    let page = PageNumber::from_param(params.page.as_deref());

    let (rows, total_pages) = tokio::try_join!(
        state.query.search_deployments(&params.query, page),
        state.query.count_search_pages(&params.query),
    )?;

    Ok(state.fresh(
        Operation::SearchDeployments,
        ListDeploymentsResponse {
            query: params.query,
            page,
            total_pages,
            deployments: rows.into_iter().map(DeploymentTableItem::from).collect(),
        },
    ))
}

/// Number of pages the deployments table has for `query`
pub async fn deployment_pages(
    State(state): State<AppState>,
    Query(params): Query<DeploymentSearchParams>,
) -> ApiResult<Fresh<DeploymentPagesResponse>> {
    let total_pages = state.query.count_search_pages(&params.query).await?;

    Ok(state.fresh(
        Operation::CountSearchPages,
        DeploymentPagesResponse {
            query: params.query,
            total_pages,
        },
    ))
}

/// Fetches a deployment with its amount in dollars
///
/// # Errors
///
/// - `404 Not Found`: No deployment has this id (malformed ids included)
pub async fn get_deployment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Fresh<DeploymentForm>> {
    let deployment = state
        .query
        .fetch_deployment_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deployment not found".to_string()))?;

    Ok(state.fresh(Operation::FetchDeploymentById, deployment))
}

/// Fetches a deployment together with every customer it could be moved to
pub async fn edit_deployment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Fresh<EditDeploymentResponse>> {
    let (deployment, customers) = tokio::try_join!(
        state.query.fetch_deployment_by_id(&id),
        state.query.fetch_customers(),
    )?;

    let deployment =
        deployment.ok_or_else(|| ApiError::NotFound("Deployment not found".to_string()))?;

    Ok(state.fresh(
        Operation::FetchDeploymentById,
        EditDeploymentResponse {
            deployment,
            customers,
        },
    ))
}

/// Creates a deployment dated today
///
/// # Request
///
/// ```json
/// {
///   "customer_id": "3958dc9e-712f-4377-85e9-fec4b6a6442a",
///   "amount": 157.95,
///   "status": "pending"
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Amount is not greater than zero
/// - `500 Internal Server Error`: "Failed to create deployment."
pub async fn create_deployment(
    State(state): State<AppState>,
    Json(req): Json<CreateDeployment>,
) -> ApiResult<(StatusCode, Json<DeploymentForm>)> {
    req.validate()?;

    let deployment = Deployment::create(&state.db, req).await?;

    tracing::info!(
        deployment_id = %deployment.id,
        customer_id = %deployment.customer_id,
        "Deployment created"
    );

    Ok((StatusCode::CREATED, Json(DeploymentForm::from(deployment))))
}

/// Replaces the customer, amount and status of a deployment
///
/// # Errors
///
/// - `404 Not Found`: No deployment has this id
/// - `422 Unprocessable Entity`: Amount is not greater than zero
pub async fn update_deployment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDeployment>,
) -> ApiResult<Json<DeploymentForm>> {
    req.validate()?;

    let deployment = Deployment::update(&state.db, id, req)
        .await?
        .ok_or_else(|| ApiError::NotFound("Deployment not found".to_string()))?;

    tracing::info!(deployment_id = %id, "Deployment updated");

    Ok(Json(DeploymentForm::from(deployment)))
}

/// Deletes a deployment
///
/// # Errors
///
/// - `404 Not Found`: No deployment has this id
pub async fn delete_deployment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if !Deployment::delete(&state.db, id).await? {
        return Err(ApiError::NotFound("Deployment not found".to_string()));
    }

    tracing::info!(deployment_id = %id, "Deployment deleted");

    Ok(StatusCode::NO_CONTENT)
}
