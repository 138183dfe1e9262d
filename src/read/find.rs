use crate::{
    client::DynamoClient,
    common::{attribute::Attribute, condition::Criteria, key::PrimaryKey},
    entity::Entity,
    error::{Error, Result},
    read,
    table::Table,
};

/// Parameters of a paginated read.
///
/// Setting `partition_key` turns the read into a query of that partition, otherwise the whole
/// table (or index) is scanned. `conditions` are combined with AND.
///
/// ```rust
/// use dynamodb_typed::{
///     common::{attribute::Attribute, condition::{Criteria, Operator}},
///     read::find::Request,
/// };
///
/// let request = Request {
///     size: 20,
///     partition_key: Some(Attribute::string("group_id", "g1")),
///     conditions: vec![Criteria::single("age", 18, Operator::GreaterOrEqual)],
///     ..Default::default()
/// };
/// assert!(request.index.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
    /// Maximum number of items evaluated for the page.
    ///
    /// Zero returns an empty page without reading; a negative size leaves the page size to the
    /// store.
    pub size: i32,
    /// The secondary index to read, declared in the table configuration.
    ///
    /// Continuation keys are always decoded against the table's primary key, so the index key
    /// attributes of a page key are dropped. Paginating an index whose key differs from the
    /// table's may therefore be rejected by the store on the next page.
    pub index: Option<String>,
    /// The partition to query.
    pub partition_key: Option<Attribute>,
    /// The continuation key of the previous page, passed back unchanged.
    pub last_evaluated_key: Option<PrimaryKey>,
    /// Filter criteria, combined with AND.
    pub conditions: Vec<Criteria>,
}

/// One page of entities.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// The entities of this page, in the order returned by the store.
    pub items: Vec<T>,
    /// The key to pass as [`Request::last_evaluated_key`] for the next page, `None` on the
    /// last page.
    pub last_evaluated_key: Option<PrimaryKey>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            last_evaluated_key: None,
        }
    }
}

impl<T: Entity, C: DynamoClient> Table<T, C> {
    /// Read one page of entities.
    ///
    /// A decoding failure of any item fails the whole page, as does a continuation key that does
    /// not match the table's primary key.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "dynamodb_typed.find",
            skip_all,
            fields(table = %self.config.table_name, size = request.size),
            err
        )
    )]
    pub async fn find(&self, request: Request) -> Result<Page<T>> {
        if request.size == 0 {
            return Ok(Page::default());
        }
        if let Some(index) = &request.index {
            if !self.config.indexes.contains_key(index) {
                return Err(Error::UnknownIndex(index.clone()));
            }
        }
        if let Some(key) = &request.last_evaluated_key {
            key.validate(&self.config.primary_key)?;
        }
        let filter = Criteria::merge(request.conditions);
        let builder = self.expression_builder();
        let (items, last_evaluated_key) = match &request.partition_key {
            Some(partition_key) => {
                let input = builder.build_query_request(
                    request.index.as_deref(),
                    partition_key,
                    filter.as_ref(),
                    request.last_evaluated_key.as_ref(),
                    request.size,
                )?;
                let output = self.client.query(input).await.map_err(Error::Transport)?;
                (output.items, output.last_evaluated_key)
            }
            None => {
                let input = builder.build_scan_request(
                    request.index.as_deref(),
                    filter.as_ref(),
                    request.last_evaluated_key.as_ref(),
                    request.size,
                )?;
                let output = self.client.scan(input).await.map_err(Error::Transport)?;
                (output.items, output.last_evaluated_key)
            }
        };
        let items = read::common::unmarshal_items(items.unwrap_or_default())?;
        let last_evaluated_key = match last_evaluated_key {
            Some(key) => PrimaryKey::decode(&key, &self.config.primary_key)?,
            None => None,
        };
        Ok(Page {
            items,
            last_evaluated_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::mock::{self, MockClient, User},
        common::{self, condition::Operator},
    };

    use aws_sdk_dynamodb::{operation, types};

    fn table(client: MockClient) -> Table<User, MockClient> {
        Table::new(client, mock::users_config())
    }

    fn last_key() -> PrimaryKey {
        PrimaryKey::new(Attribute::string("group_id", "g1"))
            .with_sort_key(Attribute::number("id", 2))
    }

    fn scan_output(
        items: Vec<common::Item>,
        last_evaluated_key: Option<common::Item>,
    ) -> operation::scan::ScanOutput {
        operation::scan::ScanOutput::builder()
            .set_items(Some(items))
            .set_last_evaluated_key(last_evaluated_key)
            .build()
    }

    #[tokio::test]
    async fn test_find_with_zero_size() {
        let table = table(MockClient::new());
        let page = table.find(Request::default()).await.unwrap();
        assert_eq!(page, Page::default());
        assert_eq!(table.client().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_find_scans_without_partition_key() {
        let client = MockClient::new().on_scan(|input| {
            assert_eq!(input.table_name.as_deref(), Some("users"));
            assert_eq!(input.limit, Some(2));
            assert_eq!(input.filter_expression, None);
            assert_eq!(
                input.exclusive_start_key,
                Some(mock::key_item("g1", 2))
            );
            Ok(scan_output(
                vec![mock::user_item("g1", 3, "a"), mock::user_item("g1", 4, "b")],
                Some(mock::key_item("g1", 4)),
            ))
        });
        let table = table(client);
        let page = table
            .find(Request {
                size: 2,
                last_evaluated_key: Some(last_key()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = page.items.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(
            page.last_evaluated_key,
            Some(
                PrimaryKey::new(Attribute::string("group_id", "g1"))
                    .with_sort_key(Attribute::number("id", 4))
            )
        );
        assert_eq!(table.client().calls("scan"), 1);
    }

    #[tokio::test]
    async fn test_find_queries_with_partition_key() {
        let client = MockClient::new().on_query(|input| {
            assert_eq!(input.index_name.as_deref(), Some("by_name"));
            assert_eq!(input.key_condition_expression.as_deref(), Some("#n0 = :v0"));
            assert_eq!(
                input.filter_expression.as_deref(),
                Some("(#n1 > :v1) AND (#n2 = :v2)")
            );
            Ok(operation::query::QueryOutput::builder()
                .set_items(Some(vec![mock::user_item("g1", 1, "x")]))
                .build())
        });
        let table = table(client);
        let page = table
            .find(Request {
                size: 10,
                index: Some("by_name".to_string()),
                partition_key: Some(Attribute::string("name", "x")),
                conditions: vec![
                    Criteria::single("id", 0, Operator::GreaterThan),
                    Criteria::single("group_id", "g1", Operator::Equal),
                ],
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.last_evaluated_key, None);
        assert_eq!(table.client().calls("query"), 1);
        assert_eq!(table.client().calls("scan"), 0);
    }

    #[tokio::test]
    async fn test_find_with_single_condition_is_not_wrapped() {
        let client = MockClient::new().on_scan(|input| {
            assert_eq!(input.filter_expression.as_deref(), Some("#n0 = :v0"));
            Ok(scan_output(Vec::new(), None))
        });
        let table = table(client);
        let page = table
            .find(Request {
                size: 1,
                conditions: vec![Criteria::single("name", "x", Operator::Equal)],
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_find_with_empty_condition() {
        let table = table(MockClient::new());
        let result = table
            .find(Request {
                size: 1,
                conditions: vec![Criteria::new()],
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::EmptyCondition)));
        assert_eq!(table.client().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_find_with_unknown_index() {
        let table = table(MockClient::new());
        let result = table
            .find(Request {
                size: 1,
                index: Some("missing".to_string()),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::UnknownIndex(index)) if index == "missing"));
        assert_eq!(table.client().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_find_with_transport_error() {
        let client = MockClient::new().on_scan(|_| Err("throttled".into()));
        let table = table(client);
        let result = table
            .find(Request {
                size: 1,
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_find_with_undecodable_item() {
        let client = MockClient::new().on_scan(|_| {
            let mut broken = mock::user_item("g1", 2, "b");
            broken.insert("name".to_string(), types::AttributeValue::Bool(true));
            Ok(scan_output(vec![mock::user_item("g1", 1, "a"), broken], None))
        });
        let table = table(client);
        let result = table
            .find(Request {
                size: 5,
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::Unmarshal(_))));
    }

    #[tokio::test]
    async fn test_find_with_malformed_continuation_key() {
        let client = MockClient::new().on_scan(|_| {
            Ok(scan_output(
                vec![mock::user_item("g1", 1, "a")],
                Some(common::Item::from([(
                    "unknown".to_string(),
                    types::AttributeValue::S("x".to_string()),
                )])),
            ))
        });
        let table = table(client);
        let result = table
            .find(Request {
                size: 5,
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::MalformedKey(_))));
    }

    #[tokio::test]
    async fn test_find_with_empty_continuation_key() {
        let client = MockClient::new()
            .on_scan(|_| Ok(scan_output(Vec::new(), Some(common::Item::new()))));
        let table = table(client);
        let page = table
            .find(Request {
                size: -1,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_find_with_incomplete_continuation_key() {
        let table = table(MockClient::new());
        let result = table
            .find(Request {
                size: 5,
                last_evaluated_key: Some(PrimaryKey::new(Attribute::string("group_id", "g1"))),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(Error::InvalidSortKey)));
        assert_eq!(table.client().total_calls(), 0);
    }

    #[tokio::test]
    async fn test_find_on_index_keeps_table_key_of_continuation() {
        let client = MockClient::new().on_query(|_| {
            let mut last_evaluated_key = mock::key_item("g1", 5);
            last_evaluated_key.insert(
                "name".to_string(),
                types::AttributeValue::S("x".to_string()),
            );
            Ok(operation::query::QueryOutput::builder()
                .set_items(Some(vec![mock::user_item("g1", 5, "x")]))
                .set_last_evaluated_key(Some(last_evaluated_key))
                .build())
        });
        let page = table(client)
            .find(Request {
                size: 1,
                index: Some("by_name".to_string()),
                partition_key: Some(Attribute::string("name", "x")),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            page.last_evaluated_key,
            Some(
                PrimaryKey::new(Attribute::string("group_id", "g1"))
                    .with_sort_key(Attribute::number("id", 5))
            )
        );
    }
}
