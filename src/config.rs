//! Table and index key declarations.
//!
//! The configuration mirrors the remote table schema and is supplied once, when a
//! [`Table`](crate::table::Table) is constructed. It is never discovered at runtime.

use crate::common::attribute::KeyType;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name and type of a key attribute.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeyMetadata {
    /// The attribute name.
    pub name: String,
    /// The declared type.
    pub key_type: KeyType,
}

impl KeyMetadata {
    /// Declare a key attribute.
    pub fn new(name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
        }
    }
}

/// Key declaration of a table or of one of its indexes.
///
/// ```rust
/// use dynamodb_typed::{common::attribute::KeyType, config};
///
/// let schema = config::TableKeySchema::new("group_id", KeyType::String)
///     .with_sort_key("id", KeyType::Number);
/// assert!(schema.sort_key.is_some());
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TableKeySchema {
    /// The partition key.
    pub partition_key: KeyMetadata,
    /// The sort key, for composite primary keys.
    #[serde(default)]
    pub sort_key: Option<KeyMetadata>,
}

impl TableKeySchema {
    /// Declare a schema with a partition key only.
    pub fn new(name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            partition_key: KeyMetadata::new(name, key_type),
            sort_key: None,
        }
    }

    /// Add a sort key to the schema.
    pub fn with_sort_key(mut self, name: impl Into<String>, key_type: KeyType) -> Self {
        self.sort_key = Some(KeyMetadata::new(name, key_type));
        self
    }
}

/// Configuration of one table.
///
/// ```rust
/// use dynamodb_typed::{common::attribute::KeyType, config};
///
/// let config = config::TableConfig::new(
///     "users",
///     config::TableKeySchema::new("id", KeyType::String),
/// )
/// .with_index("by_email", config::TableKeySchema::new("email", KeyType::String));
/// assert!(config.indexes.contains_key("by_email"));
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableConfig {
    /// The table name.
    pub table_name: String,
    /// The table's primary key schema.
    pub primary_key: TableKeySchema,
    /// Secondary index schemas, by index name.
    #[serde(default)]
    pub indexes: IndexMap<String, TableKeySchema>,
}

impl TableConfig {
    /// Configure a table without secondary indexes.
    pub fn new(table_name: impl Into<String>, primary_key: TableKeySchema) -> Self {
        Self {
            table_name: table_name.into(),
            primary_key,
            indexes: IndexMap::new(),
        }
    }

    /// Declare a secondary index.
    pub fn with_index(mut self, name: impl Into<String>, schema: TableKeySchema) -> Self {
        self.indexes.insert(name.into(), schema);
        self
    }

    /// The key schema of `index`, or of the table itself when no index is given.
    pub fn key_schema(&self, index: Option<&str>) -> Option<&TableKeySchema> {
        match index {
            Some(index) => self.indexes.get(index),
            None => Some(&self.primary_key),
        }
    }
}
