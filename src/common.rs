//! Common building blocks for DynamoDB requests.
//!
//! This module provides the attribute model, primary keys and their generation, and the
//! criteria algebra used to filter reads.

/// Key types, scalar values and attributes.
pub mod attribute;

/// Filter criteria composition.
pub mod condition;

/// Primary key value generation for new items.
pub mod generator;

/// Primary keys identifying one item.
pub mod key;

use aws_sdk_dynamodb::types;
use std::collections;

/// A DynamoDB item: attribute names mapped to native values.
pub type Item = collections::HashMap<String, types::AttributeValue>;

/// Placeholders shared by every expression of a single request.
///
/// Names become `#n{index}` and values `:v{index}`, so any attribute name is accepted
/// whatever characters it holds. A name used twice keeps its first placeholder.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionAttributes {
    names: collections::HashMap<String, String>,
    values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionAttributes {
    pub(crate) fn name(&mut self, name: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, known)| *known == name) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), name.to_string());
        placeholder
    }

    pub(crate) fn value(&mut self, value: types::AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// Split into the request maps, `None` when nothing was registered.
    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<collections::HashMap<String, String>>,
        Option<collections::HashMap<String, types::AttributeValue>>,
    ) {
        let names = (!self.names.is_empty()).then_some(self.names);
        let values = (!self.values.is_empty()).then_some(self.values);
        (names, values)
    }
}
