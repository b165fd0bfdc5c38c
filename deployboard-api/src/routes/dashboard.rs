/// Dashboard overview endpoints
///
/// # Endpoints
///
/// - `GET /v1/dashboard/cards` - Summary cards
/// - `GET /v1/dashboard/latest-deployments` - Five most recent deployments
/// - `GET /v1/dashboard/revenue` - Monthly revenue series

use crate::{app::AppState, cache::Fresh, error::ApiResult};
use axum::extract::State;
use deployboard_shared::{
    data::Operation,
    models::{deployment::LatestDeployment, revenue::Revenue},
};
use serde::Serialize;

/// Summary cards response
///
/// ```json
/// {
///   "number_of_deployments": 13,
///   "number_of_customers": 6,
///   "total_paid_deployments": "$1,254.40",
///   "total_pending_deployments": "$785.05"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CardsResponse {
    pub number_of_deployments: i64,
    pub number_of_customers: i64,
    pub total_paid_deployments: String,
    pub total_pending_deployments: String,
}

/// Summary cards
///
/// # Errors
///
/// - `500 Internal Server Error`: "Failed to fetch card data."
pub async fn cards(State(state): State<AppState>) -> ApiResult<Fresh<CardsResponse>> {
    let counts = state.query.fetch_summary_counts().await?;

    Ok(state.fresh(
        Operation::FetchSummaryCounts,
        CardsResponse {
            number_of_deployments: counts.number_of_deployments,
            number_of_customers: counts.number_of_customers,
            total_paid_deployments: counts.total_paid_display(),
            total_pending_deployments: counts.total_pending_display(),
        },
    ))
}

/// Five most recent deployments, amounts formatted
pub async fn latest_deployments(
    State(state): State<AppState>,
) -> ApiResult<Fresh<Vec<LatestDeployment>>> {
    let latest = state.query.fetch_recent_deployments().await?;
    Ok(state.fresh(Operation::FetchRecentDeployments, latest))
}

/// Monthly revenue; cacheable
pub async fn revenue(State(state): State<AppState>) -> ApiResult<Fresh<Vec<Revenue>>> {
    let revenue = state.query.fetch_revenue().await?;
    Ok(state.fresh(Operation::FetchRevenue, revenue))
}
