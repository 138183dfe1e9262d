use crate::{
    common::{
        self,
        attribute::{self, Attribute, KeyType, ScalarValue},
        key::PrimaryKey,
    },
    config,
    error::{Error, Result},
};

use aws_sdk_dynamodb::types;
use std::time;

/// Synthesize a fresh key value of `key_type`.
///
/// Strings get a v4 UUID, numbers the current UNIX time in nanoseconds and booleans a
/// uniformly random value.
pub fn generate(key_type: KeyType) -> ScalarValue {
    match key_type {
        KeyType::String => ScalarValue::String(uuid::Uuid::new_v4().to_string()),
        KeyType::Number => {
            let nanos = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos();
            ScalarValue::Number(nanos.to_string())
        }
        KeyType::Boolean => ScalarValue::Boolean(rand::random()),
    }
}

/// Resolve the key attribute declared by `metadata` from a marshaled item.
///
/// The column must exist in `item`, otherwise [`Error::KeyNotFound`] is returned. A set value is
/// returned unchanged. A `NULL` or zero-length value is replaced by a generated one, written back
/// into `item` so the stored item and the returned key agree. A value stored with another
/// representation than the declared one fails with [`Error::InvalidKeyType`].
pub fn resolve_key(item: &mut common::Item, metadata: &config::KeyMetadata) -> Result<Attribute> {
    let value = item
        .get(&metadata.name)
        .ok_or_else(|| Error::KeyNotFound(metadata.name.clone()))?;
    if let Some(attribute) = Attribute::decode(metadata, value) {
        return Ok(attribute);
    }
    if !is_unset(value, metadata.key_type) {
        return Err(Error::InvalidKeyType {
            name: metadata.name.clone(),
            key_type: metadata.key_type,
        });
    }
    let generated = generate(metadata.key_type);
    let encoded =
        attribute::encode(&generated, metadata.key_type).ok_or_else(|| Error::InvalidKeyType {
            name: metadata.name.clone(),
            key_type: metadata.key_type,
        })?;
    item.insert(metadata.name.clone(), encoded);
    Ok(Attribute {
        name: metadata.name.clone(),
        key_type: metadata.key_type,
        value: Some(generated),
    })
}

/// Resolve the full primary key of `item`, generating missing values.
///
/// The sort key is only resolved when `schema` declares one.
pub fn build_primary_key(
    item: &mut common::Item,
    schema: &config::TableKeySchema,
) -> Result<PrimaryKey> {
    let partition_key = resolve_key(item, &schema.partition_key)?;
    let sort_key = schema
        .sort_key
        .as_ref()
        .map(|sort_key| resolve_key(item, sort_key))
        .transpose()?;
    Ok(PrimaryKey {
        partition_key,
        sort_key,
    })
}

fn is_unset(value: &types::AttributeValue, key_type: KeyType) -> bool {
    match (key_type, value) {
        (_, types::AttributeValue::Null(_)) => true,
        (KeyType::String, types::AttributeValue::S(value))
        | (KeyType::Number, types::AttributeValue::N(value)) => value.is_empty(),
        _ => false,
    }
}
