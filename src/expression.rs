//! Translation of table operations into native DynamoDB requests.
//!
//! [`ExpressionBuilder`] is the only place building request inputs, and the only place
//! validating key completeness before a point read or a mutation is issued.

use crate::{
    common::{
        self,
        attribute::{Attribute, EncodedAttribute},
        condition::Criteria,
        key::{self, PrimaryKey},
    },
    error::{Error, Result},
};

use aws_sdk_dynamodb::{operation, types};
use std::collections;

/// Builds native request inputs for one table.
///
/// The builder is plain data: it can be reused to build several requests for the same key.
///
/// ```rust
/// use dynamodb_typed::{
///     common::{attribute, key},
///     expression::ExpressionBuilder,
/// };
///
/// # fn example() -> dynamodb_typed::Result<()> {
/// let key = key::PrimaryKey::new(attribute::Attribute::string("id", "1"));
/// let (partition_key, sort_key) = key.encode()?;
/// let input = ExpressionBuilder::new("users")
///     .with_partition_key(partition_key)
///     .with_sort_key(sort_key)
///     .with_update_field("name", attribute::Attribute::string("name", "jane").encode()?)
///     .build_update_request()?;
/// assert_eq!(input.update_expression.as_deref(), Some("SET #n0 = :v0"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionBuilder {
    table_name: String,
    partition_key: Option<EncodedAttribute>,
    sort_key: Option<EncodedAttribute>,
    update_fields: Vec<(String, types::AttributeValue)>,
}

impl ExpressionBuilder {
    /// Create a builder for `table_name`.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }

    /// Set the partition key used by point reads and mutations.
    pub fn with_partition_key(mut self, partition_key: EncodedAttribute) -> Self {
        self.partition_key = Some(partition_key);
        self
    }

    /// Set the sort key used by point reads and mutations.
    pub fn with_sort_key(mut self, sort_key: Option<EncodedAttribute>) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Add a field assignment to the update expression.
    ///
    /// Assignments accumulate: every call adds one `SET` clause.
    pub fn with_update_field(
        mut self,
        name: impl Into<String>,
        value: types::AttributeValue,
    ) -> Self {
        self.update_fields.push((name.into(), value));
        self
    }

    /// Build an unconditional put of the full item.
    ///
    /// Keys are not validated here, they are resolved before the item reaches the builder.
    pub fn build_create_request(
        &self,
        item: common::Item,
    ) -> Result<operation::put_item::PutItemInput> {
        let input = operation::put_item::PutItemInput::builder()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .build()?;
        Ok(input)
    }

    /// Build an update setting every accumulated field.
    pub fn build_update_request(&self) -> Result<operation::update_item::UpdateItemInput> {
        let keys = self.validate_keys()?;
        if self.update_fields.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        let mut attributes = common::ExpressionAttributes::default();
        let assignments: Vec<_> = self
            .update_fields
            .iter()
            .map(|(name, value)| {
                let name = attributes.name(name);
                let value = attributes.value(value.clone());
                format!("{name} = {value}")
            })
            .collect();
        let update_expression = format!("SET {}", assignments.join(", "));
        let (expression_attribute_names, expression_attribute_values) = attributes.into_parts();
        let input = operation::update_item::UpdateItemInput::builder()
            .table_name(&self.table_name)
            .set_key(Some(keys))
            .update_expression(update_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .build()?;
        Ok(input)
    }

    /// Build a delete of the keyed item.
    pub fn build_delete_request(&self) -> Result<operation::delete_item::DeleteItemInput> {
        let keys = self.validate_keys()?;
        let input = operation::delete_item::DeleteItemInput::builder()
            .table_name(&self.table_name)
            .set_key(Some(keys))
            .build()?;
        Ok(input)
    }

    /// Build a point read of the keyed item.
    pub fn build_get_request(&self) -> Result<operation::get_item::GetItemInput> {
        let keys = self.validate_keys()?;
        let input = operation::get_item::GetItemInput::builder()
            .table_name(&self.table_name)
            .set_key(Some(keys))
            .build()?;
        Ok(input)
    }

    /// Build a batched point read of `keys`.
    ///
    /// The keys are not chunked: callers stay within the store's per-call item limit.
    pub fn build_batch_get_request(
        &self,
        keys: &[PrimaryKey],
    ) -> Result<operation::batch_get_item::BatchGetItemInput> {
        let mut serialized_keys = Vec::with_capacity(keys.len());
        for key in keys {
            serialized_keys.push(common::Item::try_from(key)?);
        }
        let keys_and_attributes = types::KeysAndAttributes::builder()
            .set_keys(Some(serialized_keys))
            .build()?;
        let input = operation::batch_get_item::BatchGetItemInput::builder()
            .set_request_items(Some(collections::HashMap::from([(
                self.table_name.clone(),
                keys_and_attributes,
            )])))
            .build()?;
        Ok(input)
    }

    /// Build a scan of the table or of `index`.
    ///
    /// A `limit` of zero or less leaves the page size to the store.
    pub fn build_scan_request(
        &self,
        index: Option<&str>,
        filter: Option<&Criteria>,
        last_evaluated_key: Option<&PrimaryKey>,
        limit: i32,
    ) -> Result<operation::scan::ScanInput> {
        let exclusive_start_key = last_evaluated_key.map(common::Item::try_from).transpose()?;
        let mut attributes = common::ExpressionAttributes::default();
        let filter_expression = filter
            .map(|filter| filter.expression(&mut attributes))
            .transpose()?;
        let (expression_attribute_names, expression_attribute_values) = attributes.into_parts();
        let input = operation::scan::ScanInput::builder()
            .table_name(&self.table_name)
            .set_index_name(index.map(str::to_string))
            .set_limit((limit > 0).then_some(limit))
            .set_exclusive_start_key(exclusive_start_key)
            .set_filter_expression(filter_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .build()?;
        Ok(input)
    }

    /// Build a query of one partition of the table or of `index`.
    ///
    /// Same as [`build_scan_request`](Self::build_scan_request), with an equality key
    /// condition on `partition_key`.
    pub fn build_query_request(
        &self,
        index: Option<&str>,
        partition_key: &Attribute,
        filter: Option<&Criteria>,
        last_evaluated_key: Option<&PrimaryKey>,
        limit: i32,
    ) -> Result<operation::query::QueryInput> {
        if partition_key.is_empty() {
            return Err(Error::InvalidPartitionKey);
        }
        let exclusive_start_key = last_evaluated_key.map(common::Item::try_from).transpose()?;
        let mut attributes = common::ExpressionAttributes::default();
        let key_name = attributes.name(&partition_key.name);
        let key_value = attributes.value(partition_key.encode()?);
        let key_condition_expression = format!("{key_name} = {key_value}");
        let filter_expression = filter
            .map(|filter| filter.expression(&mut attributes))
            .transpose()?;
        let (expression_attribute_names, expression_attribute_values) = attributes.into_parts();
        let input = operation::query::QueryInput::builder()
            .table_name(&self.table_name)
            .set_index_name(index.map(str::to_string))
            .set_limit((limit > 0).then_some(limit))
            .set_exclusive_start_key(exclusive_start_key)
            .key_condition_expression(key_condition_expression)
            .set_filter_expression(filter_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values)
            .build()?;
        Ok(input)
    }

    fn validate_keys(&self) -> Result<common::Item> {
        let partition_key = match &self.partition_key {
            Some(partition_key) if !partition_key.is_empty() => partition_key.clone(),
            _ => return Err(Error::InvalidPartitionKey),
        };
        if let Some(sort_key) = &self.sort_key {
            if sort_key.is_empty() {
                return Err(Error::InvalidSortKey);
            }
        }
        Ok(key::key_map(partition_key, self.sort_key.clone()))
    }
}
