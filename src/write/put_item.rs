use crate::{
    client::DynamoClient,
    common::{generator, key::PrimaryKey},
    entity::Entity,
    error::{Error, Result},
    table::Table,
};

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Store `entity`, generating the key values it leaves unset.
    ///
    /// The entity is marshaled first, then every declared key column is resolved: a `NULL` or
    /// zero-length value is replaced by a generated one, which is both written and returned.
    /// Key resolution failures ([`Error::KeyNotFound`], [`Error::InvalidKeyType`]) happen before
    /// any call.
    ///
    /// The write is unconditional: an existing item with the same key is replaced.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.create",
            skip_all,
            fields(table = %self.config.table_name),
            err
        )
    )]
    pub async fn create(&self, entity: &T) -> Result<PrimaryKey> {
        let mut item = entity.marshal().map_err(Error::Marshal)?;
        let key = generator::build_primary_key(&mut item, &self.config.primary_key)?;
        let input = self.expression_builder().build_create_request(item)?;
        self.client
            .put_item(input)
            .await
            .map_err(Error::Transport)?;
        Ok(key)
    }
}
