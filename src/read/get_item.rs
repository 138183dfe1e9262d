use crate::{
    client::DynamoClient,
    common::key::PrimaryKey,
    entity::Entity,
    error::{Error, Result},
    table::Table,
};

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Read the entity stored under `key`.
    ///
    /// The key must match the table's primary key and be set: a wrong or empty partition key
    /// fails with [`Error::InvalidPartitionKey`] and a wrong, missing or empty sort key with
    /// [`Error::InvalidSortKey`], without any call. A missing item fails with [`Error::NotFound`].
    ///
    /// ```rust,no_run
    /// use dynamodb_typed::{
    ///     Table,
    ///     common::{attribute::Attribute, key::PrimaryKey},
    ///     entity::SerdeEntity,
    /// };
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Deserialize, Serialize)]
    /// # struct User { id: Option<String> }
    /// # impl SerdeEntity for User {}
    ///
    /// # async fn example(table: Table<User>) -> dynamodb_typed::Result<()> {
    /// let user = table
    ///     .get_item(&PrimaryKey::new(Attribute::string("id", "1")))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.get_item",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn get_item(&self, key: &PrimaryKey) -> Result<T> {
        let (partition_key, sort_key) = self.encode_key(key)?;
        let input = self
            .expression_builder()
            .with_partition_key(partition_key)
            .with_sort_key(sort_key)
            .build_get_request()?;
        let output = self
            .client
            .get_item(input)
            .await
            .map_err(Error::Transport)?;
        match output.item {
            Some(item) if !item.is_empty() => T::unmarshal(item).map_err(Error::Unmarshal),
            _ => Err(Error::NotFound),
        }
    }
}
