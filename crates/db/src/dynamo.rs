//! DynamoDB-backed item store.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::DbError;
use crate::store::{Item, ItemKey, ItemStore, WriteCondition, PARTITION_KEY, SORT_KEY};

/// Key condition for a whole partition.
const PARTITION_CONDITION: &str = "PK = :pk";

/// Key condition for one task within a partition.
const PREFIX_CONDITION: &str = "PK = :pk AND begins_with(SK, :skPrefix)";

/// Item store over a single DynamoDB table keyed by `PK` / `SK`.
#[derive(Debug, Clone)]
pub struct DynamoItemStore {
    client: Client,
    table_name: String,
}

impl DynamoItemStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the default AWS credential/region chain.
    pub async fn connect(table_name: &str, endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        tracing::info!(table = table_name, endpoint = ?endpoint_url, "DynamoDB client created");
        Self::new(Client::new(&sdk_config), table_name)
    }
}

fn store_error<E>(err: E) -> DbError
where
    E: std::error::Error + 'static,
{
    DbError::Store(DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl ItemStore for DynamoItemStore {
    async fn put_item(&self, item: Item, condition: WriteCondition) -> Result<(), DbError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression(condition.expression())
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Err(DbError::ConditionFailed)
            }
            Err(err) => Err(store_error(err)),
        }
    }

    async fn get_item(&self, key: &ItemKey) -> Result<Option<Item>, DbError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(key.partition.clone()))
            .key(SORT_KEY, AttributeValue::S(key.sort.clone()))
            .send()
            .await
            .map_err(store_error)?;

        Ok(output.item().cloned())
    }

    async fn query(
        &self,
        partition: &str,
        sort_prefix: Option<&str>,
    ) -> Result<Vec<Item>, DbError> {
        let mut items = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0u32;

        loop {
            let mut request = self
                .client
                .query()
                .table_name(&self.table_name)
                .expression_attribute_values(":pk", AttributeValue::S(partition.to_string()));
            request = match sort_prefix {
                Some(prefix) => request
                    .key_condition_expression(PREFIX_CONDITION)
                    .expression_attribute_values(
                        ":skPrefix",
                        AttributeValue::S(prefix.to_string()),
                    ),
                None => request.key_condition_expression(PARTITION_CONDITION),
            };

            let output = request
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(store_error)?;
            pages += 1;
            items.extend(output.items().iter().cloned());

            match output.last_evaluated_key() {
                Some(last) if !last.is_empty() => start_key = Some(last.clone()),
                _ => break,
            }
        }

        tracing::debug!(partition, pages, count = items.len(), "Query complete");
        Ok(items)
    }

    async fn health_check(&self) -> Result<(), DbError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}
