/// Search predicates shared by list and count queries
///
/// The deployments table and its page count must agree on which rows match,
/// so both push the same predicate through these helpers.
///
/// A deployment matches when the search term occurs, ignoring case, in ANY of:
/// customer name, customer email, amount (as text), date (as text), status.
/// A customer matches on name or email.
///
/// The term is matched as a literal substring: `%`, `_` and `\` are escaped
/// before being wrapped in `%...%`.

use sqlx::{Postgres, QueryBuilder};

/// Columns checked by the deployment search, in predicate order
pub const DEPLOYMENT_SEARCH_COLUMNS: [&str; 5] = [
    "customers.name",
    "customers.email",
    "deployments.amount::text",
    "deployments.date::text",
    "deployments.status",
];

/// Columns checked by the customer search
pub const CUSTOMER_SEARCH_COLUMNS: [&str; 2] = ["customers.name", "customers.email"];

/// Builds the ILIKE pattern for a literal substring match
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Appends ` WHERE col ILIKE $n OR ...` for the given columns
fn push_any_column_matches(builder: &mut QueryBuilder<'_, Postgres>, columns: &[&str], term: &str) {
    let pattern = contains_pattern(term);

    builder.push(" WHERE ");
    let mut separated = builder.separated(" OR ");
    for column in columns {
        separated
            .push(column)
            .push_unseparated(" ILIKE ")
            .push_bind_unseparated(pattern.clone());
    }
}

/// Appends the five-field deployment search predicate
///
/// The builder must already select from `deployments` joined with `customers`.
pub fn push_deployment_search(builder: &mut QueryBuilder<'_, Postgres>, term: &str) {
    push_any_column_matches(builder, &DEPLOYMENT_SEARCH_COLUMNS, term);
}

/// Appends the customer name/email search predicate
pub fn push_customer_search(builder: &mut QueryBuilder<'_, Postgres>, term: &str) {
    push_any_column_matches(builder, &CUSTOMER_SEARCH_COLUMNS, term);
}
