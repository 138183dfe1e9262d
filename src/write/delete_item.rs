use crate::{
    client::DynamoClient,
    common::key::PrimaryKey,
    entity::Entity,
    error::{Error, Result},
    table::Table,
};

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Delete the item stored under `key`.
    ///
    /// Deleting a missing item succeeds. An incomplete key fails before any call.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.delete",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn delete(&self, key: &PrimaryKey) -> Result<()> {
        let (partition_key, sort_key) = self.encode_key(key)?;
        let input = self
            .expression_builder()
            .with_partition_key(partition_key)
            .with_sort_key(sort_key)
            .build_delete_request()?;
        self.client
            .delete_item(input)
            .await
            .map_err(Error::Transport)?;
        Ok(())
    }
}
