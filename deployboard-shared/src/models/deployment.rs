/// Deployment model and write operations
///
/// A deployment is a billing record owned by a customer. Amounts are stored as
/// integer cents; forms work in dollars and the conversion happens here on write
/// and in the query service on read.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE deployments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
///     amount INT NOT NULL,
///     status VARCHAR(255) NOT NULL CHECK (status IN ('pending', 'paid')),
///     date DATE NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use deployboard_shared::models::deployment::{CreateDeployment, Deployment, DeploymentStatus};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, customer_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let deployment = Deployment::create(&pool, CreateDeployment {
///     customer_id,
///     amount: 157.95,
///     status: DeploymentStatus::Pending,
/// }).await?;
/// assert_eq!(deployment.amount, 15795);
/// # Ok(())
/// # }
/// ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::data::error::{DataAccessError, Operation};
use crate::format::{cents_to_dollars, dollars_to_cents, format_currency};

/// Billing state of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    /// Issued, not yet settled
    Pending,

    /// Settled
    Paid,
}

impl DeploymentStatus {
    /// Value stored in the `status` column
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "pending",
            DeploymentStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a `status` column holds something other than pending/paid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown deployment status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for DeploymentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DeploymentStatus::Pending),
            "paid" => Ok(DeploymentStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for DeploymentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Deployment row as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deployment {
    pub id: Uuid,
    pub customer_id: Uuid,

    /// Amount in cents
    pub amount: i32,

    /// Issue date
    pub date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub status: DeploymentStatus,
}

/// Row of the paginated deployments table, joined with the owning customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeploymentsTableRow {
    pub id: Uuid,

    /// Amount in cents
    pub amount: i32,
    pub date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub status: DeploymentStatus,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Recent deployment as read from the database, amount in cents
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LatestDeploymentRow {
    pub id: Uuid,
    pub amount: i32,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Recent deployment with the amount formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestDeployment {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,

    /// Display amount, e.g. `$157.95`
    pub amount: String,
}

impl From<LatestDeploymentRow> for LatestDeployment {
    fn from(row: LatestDeploymentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            amount: format_currency(i64::from(row.amount)),
        }
    }
}

/// Deployment as shown in the edit form, amount in dollars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentForm {
    pub id: Uuid,
    pub customer_id: Uuid,

    /// Amount in dollars, e.g. `123.45` for 12345 cents
    pub amount: f64,
    pub status: DeploymentStatus,
}

impl From<Deployment> for DeploymentForm {
    fn from(deployment: Deployment) -> Self {
        Self {
            id: deployment.id,
            customer_id: deployment.customer_id,
            amount: cents_to_dollars(i64::from(deployment.amount)),
            status: deployment.status,
        }
    }
}

/// Input for creating a deployment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDeployment {
    /// Owning customer
    pub customer_id: Uuid,

    /// Amount in dollars
    #[validate(
        range(exclusive_min = 0.0, message = "Please enter an amount greater than $0."),
        custom(function = "amount_fits_column", message = "Please enter an amount up to $21,474,836.47.")
    )]
    pub amount: f64,

    pub status: DeploymentStatus,
}

/// Input for replacing the editable fields of a deployment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDeployment {
    pub customer_id: Uuid,

    /// Amount in dollars
    #[validate(
        range(exclusive_min = 0.0, message = "Please enter an amount greater than $0."),
        custom(function = "amount_fits_column", message = "Please enter an amount up to $21,474,836.47.")
    )]
    pub amount: f64,

    pub status: DeploymentStatus,
}

/// Rejects amounts whose cents do not fit the INT `amount` column
fn amount_fits_column(amount: f64) -> Result<(), ValidationError> {
    if dollars_to_cents(amount) > i64::from(i32::MAX) {
        return Err(ValidationError::new("amount_too_large"));
    }

    Ok(())
}

impl Deployment {
    /// Inserts a deployment dated today (UTC)
    ///
    /// # Errors
    ///
    /// Fails with "Failed to create deployment." if the insert fails, including
    /// when `customer_id` does not reference an existing customer or the amount
    /// does not fit the column (inputs that passed validation always fit).
    pub async fn create(pool: &PgPool, data: CreateDeployment) -> Result<Self, DataAccessError> {
        let date = Utc::now().date_naive();

        sqlx::query_as::<_, Deployment>(
            r#"
            INSERT INTO deployments (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, amount, date, status
            "#,
        )
        .bind(data.customer_id)
        .bind(dollars_to_cents(data.amount))
        .bind(data.status.as_str())
        .bind(date)
        .fetch_one(pool)
        .await
        .map_err(|e| DataAccessError::new(Operation::CreateDeployment, e))
    }

    /// Updates customer, amount and status of an existing deployment
    ///
    /// Returns `None` if no deployment has this id. The date is left unchanged.
    /// An amount too large for the column fails the update, as in `create`.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateDeployment,
    ) -> Result<Option<Self>, DataAccessError> {
        sqlx::query_as::<_, Deployment>(
            r#"
            UPDATE deployments
            SET customer_id = $2, amount = $3, status = $4
            WHERE id = $1
            RETURNING id, customer_id, amount, date, status
            "#,
        )
        .bind(id)
        .bind(data.customer_id)
        .bind(dollars_to_cents(data.amount))
        .bind(data.status.as_str())
        .fetch_optional(pool)
        .await
        .map_err(|e| DataAccessError::new(Operation::UpdateDeployment, e))
    }

    /// Deletes a deployment, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM deployments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| DataAccessError::new(Operation::DeleteDeployment, e))?;

        Ok(result.rows_affected() > 0)
    }
}
