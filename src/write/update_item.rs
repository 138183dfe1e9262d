use crate::{
    client::DynamoClient,
    common::{attribute::Attribute, key::PrimaryKey},
    entity::Entity,
    error::{Error, Result},
    table::Table,
};

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Set `attributes` on the item stored under `key`.
    ///
    /// Keys are never generated here. An empty `attributes` slice fails with
    /// [`Error::EmptyUpdate`] whatever the key, and an incomplete key fails with
    /// [`Error::InvalidPartitionKey`] or [`Error::InvalidSortKey`], both without any call. An
    /// attribute without value is set to `NULL`.
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
    /// table
    ///     .update(
    ///         &PrimaryKey::new(Attribute::string("id", "1")),
    ///         &[Attribute::string("name", "jane"), Attribute::number("age", 33)],
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.update",
            skip_all,
            fields(table = %self.config.table_name, attributes = attributes.len()),
            err
        )
    )]
    pub async fn update(&self, key: &PrimaryKey, attributes: &[Attribute]) -> Result<()> {
        if attributes.is_empty() {
            return Err(Error::EmptyUpdate);
        }
        let (partition_key, sort_key) = self.encode_key(key)?;
        let mut builder = self
            .expression_builder()
            .with_partition_key(partition_key)
            .with_sort_key(sort_key);
        for attribute in attributes {
            builder = builder.with_update_field(&attribute.name, attribute.encode()?);
        }
        let input = builder.build_update_request()?;
        self.client
            .update_item(input)
            .await
            .map_err(Error::Transport)?;
        Ok(())
    }
}
