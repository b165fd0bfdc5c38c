/// Customer rows
///
/// Customers are read-only from this crate; they are created by seeding or an
/// external admin tool.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE customers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL,
///     image_url VARCHAR(255) NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::format_currency;

/// Full customer record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,

    /// Avatar reference (path or URL)
    pub image_url: String,
}

/// Customer entry for selection controls on the deployment forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Aggregated customer row as read from the database, amounts in cents
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CustomerSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_deployments: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer table entry with deployment totals formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,

    /// Number of deployments owned by the customer (0 when none)
    pub total_deployments: i64,

    /// Sum of pending amounts, e.g. `$1,250.00`
    pub total_pending: String,

    /// Sum of paid amounts, e.g. `$0.00`
    pub total_paid: String,
}

impl From<CustomerSummaryRow> for CustomerSummary {
    fn from(row: CustomerSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_deployments: row.total_deployments,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}
