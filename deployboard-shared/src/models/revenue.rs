/// Monthly revenue reference data
///
/// Read-only; backs the revenue chart on the dashboard overview.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE revenue (
///     month VARCHAR(4) NOT NULL UNIQUE,
///     revenue INT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};

/// One point of the revenue series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Revenue {
    /// Month label, e.g. `Jan`
    pub month: String,

    /// Revenue for the month in whole dollars
    pub revenue: i32,
}
