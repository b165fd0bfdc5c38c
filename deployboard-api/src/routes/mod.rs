/// API route handlers
///
/// Handlers are organized by dashboard area:
///
/// - `health`: Health check endpoint
/// - `dashboard`: Overview cards, latest deployments, revenue
/// - `deployments`: Deployment search, edit form data and writes
/// - `customers`: Customer selection list and customer table

pub mod customers;
pub mod dashboard;
pub mod deployments;
pub mod health;
