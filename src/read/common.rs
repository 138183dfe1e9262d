use crate::{
    common,
    entity::Entity,
    error::{Error, Result},
};

/// Decode every returned item, failing on the first one the codec rejects.
pub(crate) fn unmarshal_items<T: Entity>(items: Vec<common::Item>) -> Result<Vec<T>> {
    items
        .into_iter()
        .map(|item| T::unmarshal(item).map_err(Error::Unmarshal))
        .collect()
}
