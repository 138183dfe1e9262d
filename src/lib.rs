#![deny(missing_docs)]

//! # DynamoDB Typed
//!
//! A typed repository layer over Amazon DynamoDB tables.
//!
//! ## Overview
//!
//! A [`Table`] binds one entity type to one table and exposes:
//! - Creation with automatic generation of unset key values
//! - Attribute updates and deletion by primary key
//! - Point reads, and batched reads fanned out over concurrent requests
//! - Paginated scans and queries filtered by composable criteria
//!
//! Placeholders, key maps and expression strings are built for you, and every request is
//! validated before it reaches the network.
//!
//! ## Quick Example
//!
//! ```no_run
//! use dynamodb_typed::{
//!     Table,
//!     common::{attribute::{Attribute, KeyType}, condition::{Criteria, Operator}},
//!     config::{TableConfig, TableKeySchema},
//!     entity::SerdeEntity,
//!     read::find::Request,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Deserialize, Serialize)]
//! struct Order {
//!     customer: String,
//!     id: Option<u64>,
//!     total: f64,
//! }
//!
//! impl SerdeEntity for Order {}
//!
//! # async fn example(client: aws_sdk_dynamodb::Client) -> dynamodb_typed::Result<()> {
//! let orders: Table<Order> = Table::new(
//!     client,
//!     TableConfig::new(
//!         "orders",
//!         TableKeySchema::new("customer", KeyType::String).with_sort_key("id", KeyType::Number),
//!     ),
//! );
//! // `id` is left unset: a value is generated and returned with the key
//! let key = orders
//!     .create(&Order { customer: "jane".to_string(), id: None, total: 12.5 })
//!     .await?;
//! orders.update(&key, &[Attribute::number("total", 15)]).await?;
//! let page = orders
//!     .find(Request {
//!         size: 50,
//!         partition_key: Some(Attribute::string("customer", "jane")),
//!         conditions: vec![Criteria::single("total", 10, Operator::GreaterThan)],
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Attributes, primary keys, key generation and filter criteria
//! - [`mod@read`] - Read operations (find, get_item, get_items)
//! - [`mod@write`] - Write operations (create, update, delete)
//!
//! ## Features
//!
//! - `tracing`: instrument every table operation with a span.

/// Transport seam between tables and DynamoDB.
pub mod client;

/// Attributes, primary keys, key generation and filter criteria.
pub mod common;

/// Table configuration.
pub mod config;

/// Conversion between entities and DynamoDB items.
pub mod entity;

/// Errors returned by table operations.
pub mod error;

/// Translation of table operations into native requests.
pub mod expression;

/// Read operations for retrieving entities from a table.
///
/// This module provides operations for:
/// - Scanning or querying a page of entities
/// - Getting one entity by key
/// - Batch retrieving entities by key
pub mod read;

/// Typed access to one table.
pub mod table;

/// Write operations for modifying entities of a table.
///
/// This module provides operations for:
/// - Creating entities
/// - Updating attributes of an entity
/// - Deleting entities by key
pub mod write;

pub use error::{Error, Result};
pub use table::Table;
