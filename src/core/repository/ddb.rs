use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_item, to_item};

// DynamoDB backend, one table per collection with a plain `id` hash key.
// Records are stored as their JSON serialization; lists are unpaginated by
// design so scans walk every page.
#[derive(Debug)]
pub struct DDBRepository<E> {
    client: Client,
    table_name: String,
    // fields persisted as lists, filtered with contains() instead of equality
    set_fields: Vec<String>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> DDBRepository<E>
where
    E: Identifiable + Serialize + DeserializeOwned,
{
    pub fn new(client: Client, table_name: &str, set_fields: &[&str]) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            set_fields: set_fields.iter().map(|s| s.to_string()).collect(),
            _entity: PhantomData,
        }
    }

    async fn scan_all(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<E>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records: Vec<E> = vec![];
        let mut exclusive_start_key = None;
        loop {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key.clone());
            // aliased attribute names dodge DynamoDB reserved words like `status`
            let mut filter_expr = String::new();
            for (field, value) in predicate {
                if !filter_expr.is_empty() {
                    filter_expr.push_str(" AND ");
                }
                if self.set_fields.contains(field) {
                    filter_expr.push_str(format!("contains(#f_{}, :v_{})", field, field).as_str());
                } else {
                    filter_expr.push_str(format!("#f_{} = :v_{}", field, field).as_str());
                }
                request = request
                    .expression_attribute_names(format!("#f_{}", field), field)
                    .expression_attribute_values(format!(":v_{}", field), AttributeValue::S(value.to_string()));
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            let res = request.send().await.map_err(LibraryError::from)?;
            for item in res.items().unwrap_or_default() {
                records.push(serde_json::from_value(from_item(item))?);
            }
            exclusive_start_key = res.last_evaluated_key().cloned();
            if exclusive_start_key.is_none() {
                break;
            }
        }
        records.sort_by_key(|record| record.natural_key());
        Ok(records)
    }
}

#[async_trait]
impl<E> Repository<E> for DDBRepository<E>
where
    E: Identifiable + Serialize + DeserializeOwned,
{
    async fn find_by_id(&self, id: &str) -> LibraryResult<E> {
        let table_name: &str = self.table_name.as_ref();
        let res = self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from)?;
        match res.item() {
            Some(item) => Ok(serde_json::from_value(from_item(item))?),
            None => Err(LibraryError::not_found(
                format!("{} item not found for {}", table_name, id).as_str())),
        }
    }

    async fn find_all_sorted(&self) -> LibraryResult<Vec<E>> {
        self.scan_all(&HashMap::new()).await
    }

    async fn find_by_filter(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<E>> {
        self.scan_all(predicate).await
    }

    async fn save(&self, entity: &E) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(to_item(val)?))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }

    async fn delete_by_id(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .delete_item()
            .table_name(table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(LibraryError::from)
    }
}
