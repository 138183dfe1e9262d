//! Error types returned by every table operation.

use crate::common::{attribute::KeyType, key::PrimaryKey};

use aws_sdk_dynamodb::error::BuildError;

/// Boxed error used for opaque collaborator failures (transport and entity codec).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while building, issuing or decoding DynamoDB requests.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared key column is absent from the marshaled item.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A value cannot be represented in its declared key type.
    #[error("invalid key type: {name} cannot be encoded as {key_type}")]
    InvalidKeyType {
        /// The attribute name.
        name: String,
        /// The declared key type.
        key_type: KeyType,
    },

    /// The partition key is missing or empty.
    #[error("invalid partition key")]
    InvalidPartitionKey,

    /// The sort key is declared but empty.
    #[error("invalid sort key")]
    InvalidSortKey,

    /// An update was requested without any field to set.
    #[error("empty update request")]
    EmptyUpdate,

    /// A filter was built from a criteria tree with no clause.
    #[error("empty condition")]
    EmptyCondition,

    /// The requested item does not exist.
    #[error("not found")]
    NotFound,

    /// A key map returned by the store does not match the table schema.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The request names an index that the table configuration does not declare.
    #[error("unknown index: {0}")]
    UnknownIndex(String),

    /// The entity codec failed to produce an item.
    #[error("failed to marshal entity")]
    Marshal(#[source] BoxError),

    /// The entity codec failed to decode a returned item.
    #[error("failed to unmarshal item")]
    Unmarshal(#[source] BoxError),

    /// A native request failed the SDK's own validation.
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The transport client returned an error.
    #[error("transport error")]
    Transport(#[source] BoxError),

    /// A batched read failed; keys left unprocessed by the chunks that completed are kept.
    #[error("batch get failed: {source}")]
    BatchGet {
        /// The first error reported by a chunk.
        #[source]
        source: Box<Error>,
        /// Keys reported as unprocessed before the failure was observed.
        unprocessed_keys: Vec<PrimaryKey>,
    },
}

/// Convenience result type for table operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
