//! Handler-based [`DynamoClient`] used by the engine tests.

use crate::{
    client::DynamoClient,
    common::{self, attribute::KeyType},
    config,
    entity::SerdeEntity,
    error::BoxError,
};

use aws_sdk_dynamodb::{operation, types};
use serde::{Deserialize, Serialize};
use std::sync;

type Handler<I, O> = Box<dyn Fn(I) -> Result<O, BoxError> + Send + Sync>;

/// Answers each operation with its registered handler and records every call.
///
/// An operation without handler fails, so tests also assert which calls must not happen.
#[derive(Default)]
pub(crate) struct MockClient {
    scan: Option<Handler<operation::scan::ScanInput, operation::scan::ScanOutput>>,
    query: Option<Handler<operation::query::QueryInput, operation::query::QueryOutput>>,
    get_item:
        Option<Handler<operation::get_item::GetItemInput, operation::get_item::GetItemOutput>>,
    batch_get_item: Option<
        Handler<
            operation::batch_get_item::BatchGetItemInput,
            operation::batch_get_item::BatchGetItemOutput,
        >,
    >,
    put_item:
        Option<Handler<operation::put_item::PutItemInput, operation::put_item::PutItemOutput>>,
    update_item: Option<
        Handler<operation::update_item::UpdateItemInput, operation::update_item::UpdateItemOutput>,
    >,
    delete_item: Option<
        Handler<operation::delete_item::DeleteItemInput, operation::delete_item::DeleteItemOutput>,
    >,
    calls: sync::Mutex<Vec<&'static str>>,
}

macro_rules! handler_setter {
    ($setter:ident, $field:ident, $input:ty, $output:ty) => {
        pub(crate) fn $setter(
            mut self,
            handler: impl Fn($input) -> Result<$output, BoxError> + Send + Sync + 'static,
        ) -> Self {
            self.$field = Some(Box::new(handler));
            self
        }
    };
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    handler_setter!(
        on_scan,
        scan,
        operation::scan::ScanInput,
        operation::scan::ScanOutput
    );
    handler_setter!(
        on_query,
        query,
        operation::query::QueryInput,
        operation::query::QueryOutput
    );
    handler_setter!(
        on_get_item,
        get_item,
        operation::get_item::GetItemInput,
        operation::get_item::GetItemOutput
    );
    handler_setter!(
        on_batch_get_item,
        batch_get_item,
        operation::batch_get_item::BatchGetItemInput,
        operation::batch_get_item::BatchGetItemOutput
    );
    handler_setter!(
        on_put_item,
        put_item,
        operation::put_item::PutItemInput,
        operation::put_item::PutItemOutput
    );
    handler_setter!(
        on_update_item,
        update_item,
        operation::update_item::UpdateItemInput,
        operation::update_item::UpdateItemOutput
    );
    handler_setter!(
        on_delete_item,
        delete_item,
        operation::delete_item::DeleteItemInput,
        operation::delete_item::DeleteItemOutput
    );

    /// Number of calls recorded for `operation`.
    pub(crate) fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == operation)
            .count()
    }

    /// Total number of calls recorded.
    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call<I, O>(
        &self,
        operation: &'static str,
        handler: &Option<Handler<I, O>>,
        input: I,
    ) -> Result<O, BoxError> {
        self.calls.lock().unwrap().push(operation);
        match handler {
            Some(handler) => handler(input),
            None => Err(format!("unexpected {operation} call").into()),
        }
    }
}

#[async_trait::async_trait]
impl DynamoClient for MockClient {
    async fn scan(
        &self,
        input: operation::scan::ScanInput,
    ) -> Result<operation::scan::ScanOutput, BoxError> {
        self.call("scan", &self.scan, input)
    }

    async fn query(
        &self,
        input: operation::query::QueryInput,
    ) -> Result<operation::query::QueryOutput, BoxError> {
        self.call("query", &self.query, input)
    }

    async fn get_item(
        &self,
        input: operation::get_item::GetItemInput,
    ) -> Result<operation::get_item::GetItemOutput, BoxError> {
        self.call("get_item", &self.get_item, input)
    }

    async fn batch_get_item(
        &self,
        input: operation::batch_get_item::BatchGetItemInput,
    ) -> Result<operation::batch_get_item::BatchGetItemOutput, BoxError> {
        self.call("batch_get_item", &self.batch_get_item, input)
    }

    async fn put_item(
        &self,
        input: operation::put_item::PutItemInput,
    ) -> Result<operation::put_item::PutItemOutput, BoxError> {
        self.call("put_item", &self.put_item, input)
    }

    async fn update_item(
        &self,
        input: operation::update_item::UpdateItemInput,
    ) -> Result<operation::update_item::UpdateItemOutput, BoxError> {
        self.call("update_item", &self.update_item, input)
    }

    async fn delete_item(
        &self,
        input: operation::delete_item::DeleteItemInput,
    ) -> Result<operation::delete_item::DeleteItemOutput, BoxError> {
        self.call("delete_item", &self.delete_item, input)
    }
}

/// Test entity stored in a `(group_id: string, id: number)` table.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub(crate) struct User {
    pub(crate) group_id: Option<String>,
    pub(crate) id: Option<u64>,
    pub(crate) name: String,
}

impl SerdeEntity for User {}

pub(crate) fn users_config() -> config::TableConfig {
    config::TableConfig::new(
        "users",
        config::TableKeySchema::new("group_id", KeyType::String)
            .with_sort_key("id", KeyType::Number),
    )
    .with_index(
        "by_name",
        config::TableKeySchema::new("name", KeyType::String),
    )
}

/// Key map of the user `(group_id, id)`.
pub(crate) fn key_item(group_id: &str, id: u64) -> common::Item {
    common::Item::from([
        (
            "group_id".to_string(),
            types::AttributeValue::S(group_id.to_string()),
        ),
        ("id".to_string(), types::AttributeValue::N(id.to_string())),
    ])
}

/// Stored item of the user `(group_id, id)` named `name`.
pub(crate) fn user_item(group_id: &str, id: u64, name: &str) -> common::Item {
    let mut item = key_item(group_id, id);
    item.insert(
        "name".to_string(),
        types::AttributeValue::S(name.to_string()),
    );
    item
}
