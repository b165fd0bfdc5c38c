/// Database models for Deployboard
///
/// Row types for every table the dashboard reads, plus the deployment write path.
///
/// # Models
///
/// - `customer`: Customer identity, selection-list and per-customer summary rows
/// - `deployment`: Billing records, their status, list/form views and writes
/// - `user`: Login accounts, read by the external auth collaborator
/// - `revenue`: Monthly revenue reference data

pub mod customer;
pub mod deployment;
pub mod revenue;
pub mod user;
