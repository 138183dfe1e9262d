use crate::{
    config,
    error::{Error, Result},
};

use aws_sdk_dynamodb::types;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The scalar types a key attribute may be declared with.
///
/// ```rust
/// use dynamodb_typed::common::attribute;
///
/// assert_eq!(attribute::KeyType::Number.to_string(), "number");
/// ```
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyType {
    /// Stored as a DynamoDB string (`S`).
    String,
    /// Stored as a DynamoDB number (`N`).
    Number,
    /// Stored as a DynamoDB boolean (`BOOL`).
    Boolean,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A scalar value before it is encoded against a [`KeyType`].
///
/// Numbers are kept in their textual form, exactly as DynamoDB transports them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ScalarValue {
    /// A string value.
    String(String),
    /// A number in its decimal textual form.
    Number(String),
    /// A boolean value.
    Boolean(bool),
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

macro_rules! impl_from_number {
    ($($number:ty),*) => {
        $(
            impl From<$number> for ScalarValue {
                fn from(value: $number) -> Self {
                    Self::Number(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, f32, f64);

impl From<ScalarValue> for types::AttributeValue {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::String(value) => Self::S(value),
            ScalarValue::Number(value) => Self::N(value),
            ScalarValue::Boolean(value) => Self::Bool(value),
        }
    }
}

/// Encode `value` as the native representation of `key_type`.
///
/// Strings accept any scalar in its textual form, numbers accept numbers and numeric strings,
/// booleans only accept booleans. `None` means the value's shape does not fit the type.
pub fn encode(value: &ScalarValue, key_type: KeyType) -> Option<types::AttributeValue> {
    match (key_type, value) {
        (KeyType::String, ScalarValue::String(value) | ScalarValue::Number(value)) => {
            Some(types::AttributeValue::S(value.clone()))
        }
        (KeyType::String, ScalarValue::Boolean(value)) => {
            Some(types::AttributeValue::S(value.to_string()))
        }
        (KeyType::Number, ScalarValue::Number(value)) => {
            Some(types::AttributeValue::N(value.clone()))
        }
        (KeyType::Number, ScalarValue::String(value)) if value.parse::<f64>().is_ok() => {
            Some(types::AttributeValue::N(value.clone()))
        }
        (KeyType::Boolean, ScalarValue::Boolean(value)) => {
            Some(types::AttributeValue::Bool(*value))
        }
        _ => None,
    }
}

/// Decode a native value declared as `key_type`.
///
/// Returns `None` when the value is empty: a missing or zero-length string or number, or a
/// representation of another type. A `false` boolean is not empty.
pub fn decode(value: &types::AttributeValue, key_type: KeyType) -> Option<ScalarValue> {
    match (key_type, value) {
        (KeyType::String, types::AttributeValue::S(value)) if !value.is_empty() => {
            Some(ScalarValue::String(value.clone()))
        }
        (KeyType::Number, types::AttributeValue::N(value)) if !value.is_empty() => {
            Some(ScalarValue::Number(value.clone()))
        }
        (KeyType::Boolean, types::AttributeValue::Bool(value)) => {
            Some(ScalarValue::Boolean(*value))
        }
        _ => None,
    }
}

/// A named, typed scalar destined for (or read from) a DynamoDB item.
///
/// ```rust
/// use dynamodb_typed::common::attribute;
///
/// let id = attribute::Attribute::string("id", "user-1");
/// assert!(!id.is_empty());
///
/// let unset = attribute::Attribute::empty("id", attribute::KeyType::String);
/// assert!(unset.is_empty());
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Attribute {
    /// The attribute name.
    pub name: String,
    /// The declared type of the value.
    pub key_type: KeyType,
    /// The value, `None` when unset.
    pub value: Option<ScalarValue>,
}

impl Attribute {
    /// Create an attribute holding `value`.
    pub fn new(name: impl Into<String>, key_type: KeyType, value: impl Into<ScalarValue>) -> Self {
        Self {
            name: name.into(),
            key_type,
            value: Some(value.into()),
        }
    }

    /// Create an attribute without a value.
    pub fn empty(name: impl Into<String>, key_type: KeyType) -> Self {
        Self {
            name: name.into(),
            key_type,
            value: None,
        }
    }

    /// Create a string attribute.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, KeyType::String, ScalarValue::String(value.into()))
    }

    /// Create a number attribute.
    pub fn number(name: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        Self::new(name, KeyType::Number, value)
    }

    /// Create a boolean attribute.
    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, KeyType::Boolean, value)
    }

    /// Whether the attribute is unset.
    ///
    /// True when the name is blank, the value is absent, or a string/number value is zero-length.
    pub fn is_empty(&self) -> bool {
        if self.name.trim().is_empty() {
            return true;
        }
        match &self.value {
            None => true,
            Some(ScalarValue::String(value) | ScalarValue::Number(value)) => {
                self.key_type != KeyType::Boolean && value.is_empty()
            }
            Some(ScalarValue::Boolean(_)) => false,
        }
    }

    /// The name and type of this attribute, without its value.
    pub fn metadata(&self) -> config::KeyMetadata {
        config::KeyMetadata {
            name: self.name.clone(),
            key_type: self.key_type,
        }
    }

    /// Encode the value as its native representation.
    ///
    /// An unset value encodes as `NULL`.
    pub fn encode(&self) -> Result<types::AttributeValue> {
        match &self.value {
            None => Ok(types::AttributeValue::Null(true)),
            Some(value) => encode(value, self.key_type).ok_or_else(|| Error::InvalidKeyType {
                name: self.name.clone(),
                key_type: self.key_type,
            }),
        }
    }

    /// Decode a native value read under `metadata` back into an attribute.
    ///
    /// Returns `None` when the value is empty for the declared type.
    pub fn decode(metadata: &config::KeyMetadata, value: &types::AttributeValue) -> Option<Self> {
        decode(value, metadata.key_type).map(|value| Self {
            name: metadata.name.clone(),
            key_type: metadata.key_type,
            value: Some(value),
        })
    }
}

/// A key attribute already encoded into its native representation.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedAttribute {
    /// The attribute name.
    pub name: String,
    /// The declared type of the value.
    pub key_type: KeyType,
    /// The native value.
    pub value: types::AttributeValue,
}

impl EncodedAttribute {
    /// Whether the encoded value is unset for its declared type.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() || decode(&self.value, self.key_type).is_none()
    }
}

impl TryFrom<&Attribute> for EncodedAttribute {
    type Error = Error;

    fn try_from(attribute: &Attribute) -> Result<Self> {
        let value = attribute.encode()?;
        Ok(Self {
            name: attribute.name.clone(),
            key_type: attribute.key_type,
            value,
        })
    }
}
