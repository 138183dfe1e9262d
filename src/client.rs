//! Transport seam between the table engine and DynamoDB.
//!
//! [`DynamoClient`] exposes the seven operations the engine issues. It is implemented for
//! [`aws_sdk_dynamodb::Client`], and can be implemented by any other transport (a local fake,
//! a client with custom middleware) without touching the engine.
//!
//! # Object safety
//!
//! The trait uses `#[async_trait]` so that it stays object-safe and its futures are `Send`.

#[cfg(test)]
pub(crate) mod mock;

use crate::error::BoxError;

use aws_sdk_dynamodb::{Client, operation};

/// The DynamoDB operations used by a [`Table`](crate::table::Table).
///
/// Every method receives a fully built native input and returns the native output, or the
/// transport's error untouched.
#[async_trait::async_trait]
pub trait DynamoClient: Send + Sync {
    /// Scan a table or an index.
    async fn scan(
        &self,
        input: operation::scan::ScanInput,
    ) -> Result<operation::scan::ScanOutput, BoxError>;

    /// Query one partition of a table or an index.
    async fn query(
        &self,
        input: operation::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, BoxError>;

    /// Read one item.
    async fn get_item(
        &self,
        input: operation::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, BoxError>;

    /// Read up to 25 items.
    async fn batch_get_item(
        &self,
        input: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput, BoxError>;

    /// Create or replace one item.
    async fn put_item(
        &self,
        input: operation::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, BoxError>;

    /// Update attributes of one item.
    async fn update_item(
        &self,
        input: operation::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, BoxError>;

    /// Delete one item.
    async fn delete_item(
        &self,
        input: operation::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, BoxError>;
}

#[async_trait::async_trait]
impl DynamoClient for Client {
    async fn scan(
        &self,
        input: operation::scan::ScanInput,
    ) -> Result<operation::scan::ScanOutput, BoxError> {
        let output = Client::scan(self)
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_limit(input.limit)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .send()
            .await?;
        Ok(output)
    }

    async fn query(
        &self,
        input: operation::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, BoxError> {
        let output = Client::query(self)
            .set_table_name(input.table_name)
            .set_index_name(input.index_name)
            .set_limit(input.limit)
            .set_exclusive_start_key(input.exclusive_start_key)
            .set_key_condition_expression(input.key_condition_expression)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .send()
            .await?;
        Ok(output)
    }

    async fn get_item(
        &self,
        input: operation::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, BoxError> {
        let output = Client::get_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .send()
            .await?;
        Ok(output)
    }

    async fn batch_get_item(
        &self,
        input: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput, BoxError> {
        let output = Client::batch_get_item(self)
            .set_request_items(input.request_items)
            .send()
            .await?;
        Ok(output)
    }

    async fn put_item(
        &self,
        input: operation::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, BoxError> {
        let output = Client::put_item(self)
            .set_table_name(input.table_name)
            .set_item(input.item)
            .send()
            .await?;
        Ok(output)
    }

    async fn update_item(
        &self,
        input: operation::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, BoxError> {
        let output = Client::update_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .set_update_expression(input.update_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .send()
            .await?;
        Ok(output)
    }

    async fn delete_item(
        &self,
        input: operation::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, BoxError> {
        let output = Client::delete_item(self)
            .set_table_name(input.table_name)
            .set_key(input.key)
            .send()
            .await?;
        Ok(output)
    }
}
