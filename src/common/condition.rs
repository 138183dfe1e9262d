use crate::{
    common::{self, attribute::ScalarValue},
    error::{Error, Result},
};

use std::fmt;

/// Comparison operators available in criteria.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    /// The attribute equals the value.
    Equal,
    /// The attribute is less than the value.
    LessThan,
    /// The attribute is less than or equal to the value.
    LessOrEqual,
    /// The attribute is greater than the value.
    GreaterThan,
    /// The attribute is greater than or equal to the value.
    GreaterOrEqual,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Equal => "=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        };
        f.write_str(symbol)
    }
}

/// Filter tree over attribute comparisons.
///
/// Combining with an empty tree is the identity, so a tree can be grown clause by clause
/// starting from [`Criteria::new`].
///
/// ```rust
/// use dynamodb_typed::common::condition::{Criteria, Operator};
///
/// let adults = Criteria::new()
///     .and_where("age", 18, Operator::GreaterOrEqual)
///     .and_where("enabled", true, Operator::Equal);
///
/// let named = Criteria::single("name", "jane", Operator::Equal)
///     .or(Criteria::single("name", "john", Operator::Equal));
///
/// let merged = Criteria::merge(vec![adults, named]).unwrap();
/// assert!(matches!(merged, Criteria::And(_, _)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Criteria {
    /// No clause at all.
    #[default]
    Empty,
    /// A single comparison of an attribute against a value.
    Comparison {
        /// The attribute name.
        name: String,
        /// The comparison operator.
        operator: Operator,
        /// The value compared against.
        value: ScalarValue,
    },
    /// Both criteria must hold.
    And(Box<Criteria>, Box<Criteria>),
    /// At least one of the criteria must hold.
    Or(Box<Criteria>, Box<Criteria>),
}

impl Criteria {
    /// An empty tree.
    pub fn new() -> Self {
        Self::Empty
    }

    /// A single comparison.
    pub fn single(
        name: impl Into<String>,
        value: impl Into<ScalarValue>,
        operator: Operator,
    ) -> Self {
        Self::Comparison {
            name: name.into(),
            operator,
            value: value.into(),
        }
    }

    /// Combine with `other` using AND.
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, other) => other,
            (criteria, Self::Empty) => criteria,
            (left, right) => Self::And(Box::new(left), Box::new(right)),
        }
    }

    /// Combine with `other` using OR.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, other) => other,
            (criteria, Self::Empty) => criteria,
            (left, right) => Self::Or(Box::new(left), Box::new(right)),
        }
    }

    /// Add a comparison using AND.
    pub fn and_where(
        self,
        name: impl Into<String>,
        value: impl Into<ScalarValue>,
        operator: Operator,
    ) -> Self {
        self.and(Self::single(name, value, operator))
    }

    /// Add a comparison using OR.
    pub fn or_where(
        self,
        name: impl Into<String>,
        value: impl Into<ScalarValue>,
        operator: Operator,
    ) -> Self {
        self.or(Self::single(name, value, operator))
    }

    /// Whether no clause was ever added.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// AND-combine independently built criteria, in order.
    ///
    /// An empty list gives `None` and a single element is returned as is. Elements are
    /// combined as given: an empty element is kept and rejected when the filter is encoded.
    pub fn merge(criteria: impl IntoIterator<Item = Self>) -> Option<Self> {
        let mut criteria = criteria.into_iter();
        let first = criteria.next()?;
        Some(criteria.fold(first, |merged, next| {
            Self::And(Box::new(merged), Box::new(next))
        }))
    }

    /// Encode the tree as a condition expression, registering its placeholders.
    pub(crate) fn expression(
        &self,
        attributes: &mut common::ExpressionAttributes,
    ) -> Result<String> {
        match self {
            Self::Empty => Err(Error::EmptyCondition),
            Self::Comparison {
                name,
                operator,
                value,
            } => {
                let name = attributes.name(name);
                let value = attributes.value(value.clone().into());
                Ok(format!("{name} {operator} {value}"))
            }
            Self::And(left, right) => Ok(format!(
                "({}) AND ({})",
                left.expression(attributes)?,
                right.expression(attributes)?
            )),
            Self::Or(left, right) => Ok(format!(
                "({}) OR ({})",
                left.expression(attributes)?,
                right.expression(attributes)?
            )),
        }
    }
}
