pub mod ddb;
pub mod memory;

use async_trait::async_trait;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// One repository per record type, injected into handlers through the
// application state. Reverse lookups (e.g. instances of a book) go through
// find_by_filter on the child collection.
#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // fetch one record, NotFound error when the id has no match
    async fn find_by_id(&self, id: &str) -> LibraryResult<Entity>;

    // fetch every record, ascending by the entity natural key
    async fn find_all_sorted(&self) -> LibraryResult<Vec<Entity>>;

    // fetch records whose fields equal the predicate values; a predicate
    // against a multi-valued field matches when the set contains the value
    async fn find_by_filter(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<Entity>>;

    // insert or overwrite by id
    async fn save(&self, entity: &Entity) -> LibraryResult<usize>;

    // remove by id; removing an absent id is not an error
    async fn delete_by_id(&self, id: &str) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    InMemory,
}
