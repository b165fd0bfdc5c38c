/// Customer endpoints
///
/// # Endpoints
///
/// - `GET /v1/customers` - Customers for selection controls, ordered by name
/// - `GET /v1/customers/summaries?query=` - Customer table with deployment totals

use crate::{app::AppState, cache::Fresh, error::ApiResult};
use axum::extract::{Query, State};
use deployboard_shared::{
    data::Operation,
    models::customer::{CustomerField, CustomerSummary},
};
use serde::Deserialize;

/// Search parameters for the customer table
#[derive(Debug, Default, Deserialize)]
pub struct CustomerSearchParams {
    /// Substring of name or email; empty matches everyone
    #[serde(default)]
    pub query: String,
}

/// All customers, ordered by name
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<Fresh<Vec<CustomerField>>> {
    let customers = state.query.fetch_customers().await?;
    Ok(state.fresh(Operation::FetchCustomers, customers))
}

/// Customers matching `query`, with deployment count and pending/paid totals
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "3958dc9e-712f-4377-85e9-fec4b6a6442a",
///     "name": "Delba de Oliveira",
///     "email": "delba@oliveira.com",
///     "image_url": "/customers/delba-de-oliveira.png",
///     "total_deployments": 3,
///     "total_pending": "$203.48",
///     "total_paid": "$35.40"
///   }
/// ]
/// ```
pub async fn customer_summaries(
    State(state): State<AppState>,
    Query(params): Query<CustomerSearchParams>,
) -> ApiResult<Fresh<Vec<CustomerSummary>>> {
    let summaries = state.query.fetch_customer_summaries(&params.query).await?;
    Ok(state.fresh(Operation::FetchCustomerSummaries, summaries))
}
