/// Data-access failures
///
/// There is one failure kind. It names the operation that failed and carries a
/// fixed, human-readable message such as "Failed to fetch deployments.". The
/// underlying storage error is logged when the failure is created and is kept
/// out of `Display` and `source()`, so callers cannot leak it.
///
/// A record that does not exist is not a failure: lookups return `Ok(None)`.

use std::fmt;

/// Result alias for query service operations
pub type DataResult<T> = Result<T, DataAccessError>;

/// Every operation that touches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchRevenue,
    FetchSummaryCounts,
    FetchRecentDeployments,
    SearchDeployments,
    CountSearchPages,
    FetchDeploymentById,
    FetchCustomers,
    FetchCustomerSummaries,
    FindUserByEmail,
    CreateDeployment,
    UpdateDeployment,
    DeleteDeployment,
}

impl Operation {
    /// Stable snake_case name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchRevenue => "fetch_revenue",
            Operation::FetchSummaryCounts => "fetch_summary_counts",
            Operation::FetchRecentDeployments => "fetch_recent_deployments",
            Operation::SearchDeployments => "search_deployments",
            Operation::CountSearchPages => "count_search_pages",
            Operation::FetchDeploymentById => "fetch_deployment_by_id",
            Operation::FetchCustomers => "fetch_customers",
            Operation::FetchCustomerSummaries => "fetch_customer_summaries",
            Operation::FindUserByEmail => "find_user_by_email",
            Operation::CreateDeployment => "create_deployment",
            Operation::UpdateDeployment => "update_deployment",
            Operation::DeleteDeployment => "delete_deployment",
        }
    }

    /// Message reported to callers when the operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchRevenue => "Failed to fetch revenue data.",
            Operation::FetchSummaryCounts => "Failed to fetch card data.",
            Operation::FetchRecentDeployments => "Failed to fetch the latest deployments.",
            Operation::SearchDeployments => "Failed to fetch deployments.",
            Operation::CountSearchPages => "Failed to fetch total number of deployments.",
            Operation::FetchDeploymentById => "Failed to fetch deployment.",
            Operation::FetchCustomers => "Failed to fetch all customers.",
            Operation::FetchCustomerSummaries => "Failed to fetch customer table.",
            Operation::FindUserByEmail => "Failed to fetch user.",
            Operation::CreateDeployment => "Failed to create deployment.",
            Operation::UpdateDeployment => "Failed to update deployment.",
            Operation::DeleteDeployment => "Failed to delete deployment.",
        }
    }

    /// Freshness setting for the operation's result
    ///
    /// Aggregates and listings must reflect the latest writes and are never
    /// cacheable. Revenue is static reference data.
    pub fn read_options(&self) -> ReadOptions {
        match self {
            Operation::FetchRevenue => ReadOptions::CACHEABLE,
            _ => ReadOptions::NO_STORE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a read result may be served from a cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub cacheable: bool,
}

impl ReadOptions {
    /// Result must be fetched fresh on every request
    pub const NO_STORE: ReadOptions = ReadOptions { cacheable: false };

    /// Result may be reused by a cache
    pub const CACHEABLE: ReadOptions = ReadOptions { cacheable: true };
}

/// Failure of a data-access operation
#[derive(thiserror::Error)]
#[error("{}", .operation.failure_message())]
pub struct DataAccessError {
    operation: Operation,
    cause: sqlx::Error,
}

impl DataAccessError {
    /// Wraps a storage error, logging it with the operation name
    pub fn new(operation: Operation, cause: sqlx::Error) -> Self {
        tracing::error!(operation = operation.as_str(), error = %cause, "Database error");
        Self { operation, cause }
    }

    /// The operation that failed
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Whether the store could not be reached at all (pool timeout, I/O)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self.cause,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        )
    }
}

// Debug output omits the cause.
impl fmt::Debug for DataAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataAccessError")
            .field("operation", &self.operation)
            .finish_non_exhaustive()
    }
}
