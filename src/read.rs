//! Read operations for retrieving entities from a table.
//!
//! This module provides:
//! - Paginated scans and queries with filter criteria
//! - Point reads by primary key
//! - Batched point reads fanned out over concurrent requests

/// Batched point reads.
pub mod batch_get_item;

/// Helpers shared by read operations.
pub(crate) mod common;

/// Paginated scan and query.
pub mod find;

/// Point read by primary key.
pub mod get_item;
