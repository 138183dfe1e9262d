//! Conversion between entities and DynamoDB items.

use crate::{common, error::BoxError};

use serde::{Serialize, de::DeserializeOwned};

/// An entity type stored in a table.
///
/// The engine treats both directions as opaque: it only reacts to their outcome. Types that
/// already derive serde traits get an implementation by implementing [`SerdeEntity`].
///
/// ```rust
/// use dynamodb_typed::{common::Item, entity::Entity, error::BoxError};
/// use aws_sdk_dynamodb::types::AttributeValue;
///
/// struct Tag(String);
///
/// impl Entity for Tag {
///     fn marshal(&self) -> Result<Item, BoxError> {
///         Ok(Item::from([("tag".to_string(), AttributeValue::S(self.0.clone()))]))
///     }
///
///     fn unmarshal(item: Item) -> Result<Self, BoxError> {
///         match item.get("tag") {
///             Some(AttributeValue::S(tag)) => Ok(Self(tag.clone())),
///             _ => Err("missing tag".into()),
///         }
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// Encode the entity as an item.
    fn marshal(&self) -> Result<common::Item, BoxError>;

    /// Decode an item returned by the store.
    fn unmarshal(item: common::Item) -> Result<Self, BoxError>;
}

/// Marker for entities encoded with [`serde_dynamo`].
///
/// ```rust
/// use dynamodb_typed::entity::SerdeEntity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize, Serialize)]
/// struct User {
///     id: Option<String>,
///     name: String,
/// }
///
/// impl SerdeEntity for User {}
/// ```
///
/// An `Option` key field left to `None` is marshaled as `NULL`, which lets the table generate
/// its value on creation.
pub trait SerdeEntity: Serialize + DeserializeOwned {}

impl<T: SerdeEntity> Entity for T {
    fn marshal(&self) -> Result<common::Item, BoxError> {
        let item = serde_dynamo::to_item(self)?;
        Ok(item)
    }

    fn unmarshal(item: common::Item) -> Result<Self, BoxError> {
        let entity = serde_dynamo::from_item(item)?;
        Ok(entity)
    }
}
