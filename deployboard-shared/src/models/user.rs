/// User accounts
///
/// Users are consumed by the external authentication collaborator, which looks
/// them up by email and verifies the stored password hash itself. Nothing in
/// this workspace reads them otherwise.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email TEXT NOT NULL UNIQUE,
///     password TEXT NOT NULL
/// );
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,

    /// Unique, matched exactly on lookup
    pub email: String,

    /// Password hash; never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
}
