use crate::{
    common::{
        self,
        attribute::{Attribute, EncodedAttribute},
    },
    config,
    error::{Error, Result},
};

/// Primary key (partition key and optional sort key) of one item.
///
/// ```rust
/// use dynamodb_typed::common::{attribute, key};
///
/// let key = key::PrimaryKey::new(attribute::Attribute::string("group_id", "g1"))
///     .with_sort_key(attribute::Attribute::number("id", 7));
/// assert!(key.sort_key.is_some());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PrimaryKey {
    /// The partition key (required).
    pub partition_key: Attribute,
    /// The sort key, only for tables with composite primary keys.
    pub sort_key: Option<Attribute>,
}

impl PrimaryKey {
    /// Create a primary key made of a partition key only.
    pub fn new(partition_key: Attribute) -> Self {
        Self {
            partition_key,
            sort_key: None,
        }
    }

    /// Add a sort key.
    pub fn with_sort_key(mut self, sort_key: Attribute) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    /// Encode both key attributes from the values held by this key.
    ///
    /// Nothing is generated here: an empty partition key fails with
    /// [`Error::InvalidPartitionKey`], an empty sort key with [`Error::InvalidSortKey`].
    pub fn encode(&self) -> Result<(EncodedAttribute, Option<EncodedAttribute>)> {
        if self.partition_key.is_empty() {
            return Err(Error::InvalidPartitionKey);
        }
        let partition_key = EncodedAttribute::try_from(&self.partition_key)?;
        let sort_key = match &self.sort_key {
            Some(sort_key) if sort_key.is_empty() => return Err(Error::InvalidSortKey),
            Some(sort_key) => Some(EncodedAttribute::try_from(sort_key)?),
            None => None,
        };
        Ok((partition_key, sort_key))
    }

    /// Check this key against the declared `schema`.
    ///
    /// The partition key must carry the declared name and type and be set, otherwise
    /// [`Error::InvalidPartitionKey`] is returned. The sort key must be present, named, typed and
    /// set exactly when `schema` declares one, otherwise [`Error::InvalidSortKey`] is returned.
    pub fn validate(&self, schema: &config::TableKeySchema) -> Result<()> {
        if self.partition_key.is_empty() || self.partition_key.metadata() != schema.partition_key {
            return Err(Error::InvalidPartitionKey);
        }
        match (&schema.sort_key, &self.sort_key) {
            (None, None) => Ok(()),
            (Some(metadata), Some(sort_key))
                if !sort_key.is_empty() && sort_key.metadata() == *metadata =>
            {
                Ok(())
            }
            _ => Err(Error::InvalidSortKey),
        }
    }

    /// Decode a key map returned by the store against `schema`.
    ///
    /// An empty map means there is no key and yields `None`. A map lacking one of the declared
    /// key attributes fails with [`Error::MalformedKey`].
    pub fn decode(item: &common::Item, schema: &config::TableKeySchema) -> Result<Option<Self>> {
        if item.is_empty() {
            return Ok(None);
        }
        let partition_key = decode_attribute(item, &schema.partition_key)?;
        let sort_key = schema
            .sort_key
            .as_ref()
            .map(|sort_key| decode_attribute(item, sort_key))
            .transpose()?;
        Ok(Some(Self {
            partition_key,
            sort_key,
        }))
    }
}

impl TryFrom<&PrimaryKey> for common::Item {
    type Error = Error;

    fn try_from(key: &PrimaryKey) -> Result<Self> {
        let (partition_key, sort_key) = key.encode()?;
        Ok(key_map(partition_key, sort_key))
    }
}

fn decode_attribute(item: &common::Item, metadata: &config::KeyMetadata) -> Result<Attribute> {
    item.get(&metadata.name)
        .and_then(|value| Attribute::decode(metadata, value))
        .ok_or_else(|| {
            Error::MalformedKey(format!(
                "missing {} key {}",
                metadata.key_type, metadata.name
            ))
        })
}

/// Decode every non-empty key map of `items` against `schema`.
pub(crate) fn decode_keys(
    items: &[common::Item],
    schema: &config::TableKeySchema,
) -> Result<Vec<PrimaryKey>> {
    let mut keys = Vec::with_capacity(items.len());
    for item in items {
        if let Some(key) = PrimaryKey::decode(item, schema)? {
            keys.push(key);
        }
    }
    Ok(keys)
}

/// Build the native key map from encoded key attributes.
pub(crate) fn key_map(
    partition_key: EncodedAttribute,
    sort_key: Option<EncodedAttribute>,
) -> common::Item {
    let mut keys = common::Item::from([(partition_key.name, partition_key.value)]);
    if let Some(sort_key) = sort_key {
        keys.insert(sort_key.name, sort_key.value);
    }
    keys
}
