//! Typed access to one DynamoDB table.

use crate::{
    common::{attribute::EncodedAttribute, key::PrimaryKey},
    config,
    error::Result,
    expression::ExpressionBuilder,
};

use std::{fmt, marker};

/// A table storing entities of type `T`, reached through the transport `C`.
///
/// The configuration is fixed at construction and read-only afterwards. Reads are implemented
/// in [`read`](crate::read), writes in [`write`](crate::write).
///
/// ```rust,no_run
/// use dynamodb_typed::{
///     Table,
///     common::{attribute::KeyType, condition::{Criteria, Operator}},
///     config::{TableConfig, TableKeySchema},
///     entity::SerdeEntity,
///     read::find::Request,
/// };
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Deserialize, Serialize)]
/// struct User {
///     id: Option<String>,
///     name: String,
///     age: u32,
/// }
///
/// impl SerdeEntity for User {}
///
/// # async fn example(client: aws_sdk_dynamodb::Client) -> dynamodb_typed::Result<()> {
/// let table: Table<User> = Table::new(
///     client,
///     TableConfig::new("users", TableKeySchema::new("id", KeyType::String)),
/// );
/// let key = table
///     .create(&User { id: None, name: "jane".to_string(), age: 32 })
///     .await?;
/// let page = table
///     .find(Request {
///         size: 10,
///         conditions: vec![Criteria::single("age", 18, Operator::GreaterOrEqual)],
///         ..Default::default()
///     })
///     .await?;
/// table.delete(&key).await?;
/// # Ok(())
/// # }
/// ```
pub struct Table<T, C = aws_sdk_dynamodb::Client> {
    pub(crate) client: C,
    pub(crate) config: config::TableConfig,
    entity: marker::PhantomData<fn() -> T>,
}

impl<T, C> Table<T, C> {
    /// Bind `client` to the table described by `config`.
    pub fn new(client: C, config: config::TableConfig) -> Self {
        Self {
            client,
            config,
            entity: marker::PhantomData,
        }
    }

    /// The table configuration.
    pub fn config(&self) -> &config::TableConfig {
        &self.config
    }

    /// The underlying transport.
    pub fn client(&self) -> &C {
        &self.client
    }

    pub(crate) fn expression_builder(&self) -> ExpressionBuilder {
        ExpressionBuilder::new(&self.config.table_name)
    }

    /// Encode a caller-supplied key after checking it against the table's primary key.
    pub(crate) fn encode_key(
        &self,
        key: &PrimaryKey,
    ) -> Result<(EncodedAttribute, Option<EncodedAttribute>)> {
        key.validate(&self.config.primary_key)?;
        key.encode()
    }
}

impl<T, C> fmt::Debug for Table<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
