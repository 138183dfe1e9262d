use crate::{
    client::DynamoClient,
    common::key::{self, PrimaryKey},
    entity::Entity,
    error::{Error, Result},
    read,
    table::Table,
};

use futures::stream::{FuturesUnordered, StreamExt};

/// Maximum number of keys the store serves in one batched read.
pub const BATCH_GET_LIMIT: usize = 25;

/// Outcome of a batched read.
///
/// Both lists follow the order in which the chunks completed, not the order of the input keys.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchGet<T> {
    /// The entities found.
    pub items: Vec<T>,
    /// Keys the store did not serve, to be retried by the caller.
    pub unprocessed_keys: Vec<PrimaryKey>,
}

impl<T> Default for BatchGet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            unprocessed_keys: Vec::new(),
        }
    }
}

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Read the entities stored under `keys`.
    ///
    /// Keys are split in chunks of [`BATCH_GET_LIMIT`], and every chunk is requested
    /// concurrently. Missing items are silently absent from the result. Keys left unprocessed by
    /// the store are returned, never retried.
    ///
    /// The first chunk failure fails the whole read with [`Error::BatchGet`], carrying the
    /// unprocessed keys gathered so far. Chunks still in flight are awaited, and their results
    /// discarded.
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
    /// let keys: Vec<_> = (0..60)
    ///     .map(|id| PrimaryKey::new(Attribute::string("id", id.to_string())))
    ///     .collect();
    /// let batch = table.get_items(&keys).await?;
    /// // retry policy is up to the caller
    /// let retried = table.get_items(&batch.unprocessed_keys).await?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.get_items",
            skip_all,
            fields(table = %self.config.table_name, keys = keys.len()),
            err
        )
    )]
    pub async fn get_items(&self, keys: &[PrimaryKey]) -> Result<BatchGet<T>> {
        let mut loads: FuturesUnordered<_> = keys
            .chunks(BATCH_GET_LIMIT)
            .map(|chunk| self.load(chunk))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::debug!(chunks = loads.len(), "issuing batch get chunks");
        let mut batch = BatchGet::default();
        let mut failure = None;
        while let Some(result) = loads.next().await {
            match result {
                Ok(chunk) if failure.is_none() => {
                    batch.items.extend(chunk.items);
                    batch.unprocessed_keys.extend(chunk.unprocessed_keys);
                }
                Ok(_) => {}
                Err(error) if failure.is_none() => failure = Some(error),
                Err(_error) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(error = %_error, "discarding batch get chunk failure");
                }
            }
        }
        match failure {
            Some(error) => Err(Error::BatchGet {
                source: Box::new(error),
                unprocessed_keys: batch.unprocessed_keys,
            }),
            None => Ok(batch),
        }
    }

    async fn load(&self, keys: &[PrimaryKey]) -> Result<BatchGet<T>> {
        for key in keys {
            key.validate(&self.config.primary_key)?;
        }
        let input = self.expression_builder().build_batch_get_request(keys)?;
        let output = self
            .client
            .batch_get_item(input)
            .await
            .map_err(Error::Transport)?;
        let items = output
            .responses
            .and_then(|mut responses| responses.remove(&self.config.table_name))
            .unwrap_or_default();
        let items = read::common::unmarshal_items(items)?;
        let unprocessed_keys = match output
            .unprocessed_keys
            .and_then(|mut unprocessed| unprocessed.remove(&self.config.table_name))
        {
            Some(unprocessed) if !unprocessed.keys.is_empty() => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    unprocessed = unprocessed.keys.len(),
                    "batch get left keys unprocessed"
                );
                key::decode_keys(&unprocessed.keys, &self.config.primary_key)?
            }
            _ => Vec::new(),
        };
        Ok(BatchGet {
            items,
            unprocessed_keys,
        })
    }
}
