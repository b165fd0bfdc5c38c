/// Query service for the dashboard
///
/// Every page of the dashboard reads through this module: summary cards, the
/// latest deployments, the searchable and paginated deployments table, the edit
/// form, the customer table and selection lists.
///
/// # Modules
///
/// - `error`: The single data-access failure type and per-operation settings
/// - `filter`: The shared search predicates
/// - `pagination`: Page size and page arithmetic
/// - `service`: `QueryService`, one method per operation
///
/// # Example
///
/// ```no_run
/// use deployboard_shared::data::{pagination::PageNumber, QueryService};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let service = QueryService::new(pool);
///
/// let rows = service.search_deployments("paid", PageNumber::FIRST).await?;
/// let pages = service.count_search_pages("paid").await?;
/// println!("{} rows on page 1 of {}", rows.len(), pages);
/// # Ok(())
/// # }
/// ```

pub mod error;
pub mod filter;
pub mod pagination;
pub mod service;

pub use error::{DataAccessError, DataResult, Operation, ReadOptions};
pub use service::{QueryService, SummaryCounts};
