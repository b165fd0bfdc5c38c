/// Query service
///
/// One method per dashboard read. Each method runs its query against the shared
/// pool, converts storage errors into `DataAccessError` for that operation and
/// returns plain records. Nothing is cached or retried here; freshness is a
/// per-operation setting (`Operation::read_options`) applied by the caller.

use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use super::error::{DataAccessError, DataResult, Operation};
use super::filter::{push_customer_search, push_deployment_search};
use super::pagination::{total_pages, PageNumber, ITEMS_PER_PAGE};
use crate::format::format_currency;
use crate::models::customer::{CustomerField, CustomerSummary, CustomerSummaryRow};
use crate::models::deployment::{
    Deployment, DeploymentForm, DeploymentsTableRow, LatestDeployment, LatestDeploymentRow,
};
use crate::models::revenue::Revenue;
use crate::models::user::User;

/// How many deployments the "latest" card shows
pub const RECENT_DEPLOYMENTS_LIMIT: i64 = 5;

const DEPLOYMENTS_WITH_CUSTOMERS: &str =
    " FROM deployments JOIN customers ON deployments.customer_id = customers.id";

/// Figures for the dashboard summary cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryCounts {
    pub number_of_deployments: i64,
    pub number_of_customers: i64,

    /// Sum of paid amounts in cents
    pub total_paid: i64,

    /// Sum of pending amounts in cents
    pub total_pending: i64,
}

impl SummaryCounts {
    pub fn total_paid_display(&self) -> String {
        format_currency(self.total_paid)
    }

    pub fn total_pending_display(&self) -> String {
        format_currency(self.total_pending)
    }
}

/// Read access to deployments, customers, users and revenue
#[derive(Debug, Clone)]
pub struct QueryService {
    pool: PgPool,
}

impl QueryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Monthly revenue series
    pub async fn fetch_revenue(&self) -> DataResult<Vec<Revenue>> {
        debug!(operation = %Operation::FetchRevenue, "Fetching revenue data");

        sqlx::query_as::<_, Revenue>("SELECT month, revenue FROM revenue")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::FetchRevenue, e))
    }

    /// Deployment count, customer count and paid/pending totals
    ///
    /// The three queries run concurrently; if any of them fails the whole
    /// call fails.
    pub async fn fetch_summary_counts(&self) -> DataResult<SummaryCounts> {
        debug!(operation = %Operation::FetchSummaryCounts, "Fetching card data");

        let deployment_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM deployments").fetch_one(&self.pool);
        let customer_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers").fetch_one(&self.pool);
        let status_totals = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0)::BIGINT AS paid,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0)::BIGINT AS pending
            FROM deployments
            "#,
        )
        .fetch_one(&self.pool);

        let (number_of_deployments, number_of_customers, (total_paid, total_pending)) =
            tokio::try_join!(deployment_count, customer_count, status_totals)
                .map_err(|e| DataAccessError::new(Operation::FetchSummaryCounts, e))?;

        Ok(SummaryCounts {
            number_of_deployments,
            number_of_customers,
            total_paid,
            total_pending,
        })
    }

    /// The five most recent deployments with their customers, newest first
    pub async fn fetch_recent_deployments(&self) -> DataResult<Vec<LatestDeployment>> {
        debug!(operation = %Operation::FetchRecentDeployments, "Fetching latest deployments");

        let rows = sqlx::query_as::<_, LatestDeploymentRow>(
            r#"
            SELECT deployments.id, deployments.amount, customers.name, customers.email, customers.image_url
            FROM deployments
            JOIN customers ON deployments.customer_id = customers.id
            ORDER BY deployments.date DESC, deployments.id
            LIMIT $1
            "#,
        )
        .bind(RECENT_DEPLOYMENTS_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DataAccessError::new(Operation::FetchRecentDeployments, e))?;

        Ok(rows.into_iter().map(LatestDeployment::from).collect())
    }

    /// One page of deployments matching `query`, newest first
    ///
    /// Returns at most `ITEMS_PER_PAGE` rows starting at `page.offset()` in the
    /// full sorted match set. An empty `query` matches every deployment.
    pub async fn search_deployments(
        &self,
        query: &str,
        page: PageNumber,
    ) -> DataResult<Vec<DeploymentsTableRow>> {
        debug!(operation = %Operation::SearchDeployments, query, page = page.get(), "Searching deployments");

        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT deployments.id, deployments.amount, deployments.date, deployments.status, \
             customers.name, customers.email, customers.image_url",
        );
        builder.push(DEPLOYMENTS_WITH_CUSTOMERS);
        push_deployment_search(&mut builder, query);
        builder
            .push(" ORDER BY deployments.date DESC, deployments.id LIMIT ")
            .push_bind(ITEMS_PER_PAGE)
            .push(" OFFSET ")
            .push_bind(page.offset());

        builder
            .build_query_as::<DeploymentsTableRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::SearchDeployments, e))
    }

    /// Number of pages `search_deployments` has for `query`
    pub async fn count_search_pages(&self, query: &str) -> DataResult<i64> {
        debug!(operation = %Operation::CountSearchPages, query, "Counting deployment pages");

        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        builder.push(DEPLOYMENTS_WITH_CUSTOMERS);
        push_deployment_search(&mut builder, query);

        let matching = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::CountSearchPages, e))?;

        Ok(total_pages(matching))
    }

    /// Deployment for the edit form, amount in dollars
    ///
    /// Returns `None` when no deployment has this id, including when `id` is
    /// not a UUID at all.
    pub async fn fetch_deployment_by_id(&self, id: &str) -> DataResult<Option<DeploymentForm>> {
        debug!(operation = %Operation::FetchDeploymentById, id, "Fetching deployment");

        let Ok(id) = Uuid::parse_str(id) else {
            debug!(id, "Deployment id is not a UUID");
            return Ok(None);
        };

        let deployment = sqlx::query_as::<_, Deployment>(
            r#"
            SELECT id, customer_id, amount, date, status
            FROM deployments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DataAccessError::new(Operation::FetchDeploymentById, e))?;

        Ok(deployment.map(DeploymentForm::from))
    }

    /// Every customer, ordered by name, for selection controls
    pub async fn fetch_customers(&self) -> DataResult<Vec<CustomerField>> {
        debug!(operation = %Operation::FetchCustomers, "Fetching customers");

        sqlx::query_as::<_, CustomerField>("SELECT id, name FROM customers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::FetchCustomers, e))
    }

    /// Customers matching `query` on name or email, with deployment totals
    ///
    /// Customers without deployments are included with a count of 0 and
    /// `$0.00` totals.
    pub async fn fetch_customer_summaries(&self, query: &str) -> DataResult<Vec<CustomerSummary>> {
        debug!(operation = %Operation::FetchCustomerSummaries, query, "Fetching customer table");

        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT
                customers.id,
                customers.name,
                customers.email,
                customers.image_url,
                COUNT(deployments.id) AS total_deployments,
                COALESCE(SUM(CASE WHEN deployments.status = 'pending' THEN deployments.amount ELSE 0 END), 0)::BIGINT AS total_pending,
                COALESCE(SUM(CASE WHEN deployments.status = 'paid' THEN deployments.amount ELSE 0 END), 0)::BIGINT AS total_paid
            FROM customers
            LEFT JOIN deployments ON customers.id = deployments.customer_id
            "#,
        );
        push_customer_search(&mut builder, query);
        builder.push(
            " GROUP BY customers.id, customers.name, customers.email, customers.image_url \
             ORDER BY customers.name ASC",
        );

        let rows = builder
            .build_query_as::<CustomerSummaryRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::FetchCustomerSummaries, e))?;

        Ok(rows.into_iter().map(CustomerSummary::from).collect())
    }

    /// User with exactly this email, for the external auth collaborator
    pub async fn find_user_by_email(&self, email: &str) -> DataResult<Option<User>> {
        debug!(operation = %Operation::FindUserByEmail, "Fetching user");

        sqlx::query_as::<_, User>("SELECT id, name, email, password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::FindUserByEmail, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_display() {
        let counts = SummaryCounts {
            number_of_deployments: 3,
            number_of_customers: 2,
            total_paid: 12500,
            total_pending: 5000,
        };

        assert_eq!(counts.total_paid_display(), "$125.00");
        assert_eq!(counts.total_pending_display(), "$50.00");
    }
}
