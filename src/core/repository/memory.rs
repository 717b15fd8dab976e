use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// In-process document store backend, one collection of JSON documents keyed
// by record id. Used for local development and tests.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    collection: String,
    documents: Arc<RwLock<BTreeMap<String, Value>>>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> MemoryRepository<E> {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            documents: Arc::new(RwLock::new(BTreeMap::new())),
            _entity: PhantomData,
        }
    }

    fn read_all(&self) -> LibraryResult<Vec<Value>> {
        let guard = self.documents.read().map_err(|err| {
            LibraryError::runtime(format!("lock poisoned for {} {:?}", self.collection, err).as_str(), None)
        })?;
        Ok(guard.values().cloned().collect())
    }
}

// A predicate field matches a stored scalar by equality and a stored array
// by membership, mirroring document-database filter semantics.
fn matches(document: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(field, expected)| {
        match document.get(field) {
            Some(Value::String(actual)) => actual == expected,
            Some(Value::Array(values)) => values.iter().any(|v| v.as_str() == Some(expected.as_str())),
            Some(other) => other.to_string() == *expected,
            None => false,
        }
    })
}

#[async_trait]
impl<E> Repository<E> for MemoryRepository<E>
where
    E: Identifiable + Serialize + DeserializeOwned,
{
    async fn find_by_id(&self, id: &str) -> LibraryResult<E> {
        let guard = self.documents.read().map_err(|err| {
            LibraryError::runtime(format!("lock poisoned for {} {:?}", self.collection, err).as_str(), None)
        })?;
        match guard.get(id) {
            Some(document) => Ok(serde_json::from_value(document.clone())?),
            None => Err(LibraryError::not_found(
                format!("{} not found for {}", self.collection, id).as_str())),
        }
    }

    async fn find_all_sorted(&self) -> LibraryResult<Vec<E>> {
        let mut records = self.read_all()?
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<E>, _>>()?;
        records.sort_by_key(|record| record.natural_key());
        Ok(records)
    }

    async fn find_by_filter(&self, predicate: &HashMap<String, String>) -> LibraryResult<Vec<E>> {
        let mut records = self.read_all()?
            .into_iter()
            .filter(|document| matches(document, predicate))
            .map(serde_json::from_value)
            .collect::<Result<Vec<E>, _>>()?;
        records.sort_by_key(|record: &E| record.natural_key());
        Ok(records)
    }

    async fn save(&self, entity: &E) -> LibraryResult<usize> {
        let document = serde_json::to_value(entity)?;
        let mut guard = self.documents.write().map_err(|err| {
            LibraryError::runtime(format!("lock poisoned for {} {:?}", self.collection, err).as_str(), None)
        })?;
        guard.insert(entity.id(), document);
        Ok(1)
    }

    async fn delete_by_id(&self, id: &str) -> LibraryResult<usize> {
        let mut guard = self.documents.write().map_err(|err| {
            LibraryError::runtime(format!("lock poisoned for {} {:?}", self.collection, err).as_str(), None)
        })?;
        guard.remove(id);
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::books::domain::model::BookEntity;
    use crate::core::library::LibraryError;
    use crate::core::repository::memory::MemoryRepository;
    use crate::core::repository::Repository;

    #[tokio::test]
    async fn test_should_save_and_find_by_id() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        let book = BookEntity::new("The Hobbit", "There and back again", "isbn-1", "author-1", &["genre-1".to_string()]);
        let size = repo.save(&book).await.expect("should save book");
        assert_eq!(1, size);

        let loaded = repo.find_by_id(book.id.as_str()).await.expect("should load book");
        assert_eq!(book.id, loaded.id);
        assert_eq!("The Hobbit", loaded.title.as_str());
    }

    #[tokio::test]
    async fn test_should_fail_find_by_unknown_id() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        let res = repo.find_by_id("missing").await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_should_sort_by_natural_key() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        for title in ["Zenith", "Abyss", "Middle"] {
            let book = BookEntity::new(title, "summary", "isbn", "author-1", &[]);
            repo.save(&book).await.expect("should save book");
        }
        let all = repo.find_all_sorted().await.expect("should list books");
        let titles: Vec<&str> = all.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(vec!["Abyss", "Middle", "Zenith"], titles);
    }

    #[tokio::test]
    async fn test_should_filter_on_scalar_and_set_fields() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        let fantasy = BookEntity::new("A", "summary", "isbn", "author-1", &["genre-1".to_string(), "genre-2".to_string()]);
        let other = BookEntity::new("B", "summary", "isbn", "author-2", &["genre-3".to_string()]);
        repo.save(&fantasy).await.expect("should save book");
        repo.save(&other).await.expect("should save book");

        let by_author = repo.find_by_filter(
            &HashMap::from([("author".to_string(), "author-2".to_string())])).await.expect("should filter");
        assert_eq!(1, by_author.len());
        assert_eq!(other.id, by_author[0].id);

        let by_genre = repo.find_by_filter(
            &HashMap::from([("genre".to_string(), "genre-2".to_string())])).await.expect("should filter");
        assert_eq!(1, by_genre.len());
        assert_eq!(fantasy.id, by_genre[0].id);
    }

    #[tokio::test]
    async fn test_should_overwrite_on_save_with_same_id() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        let mut book = BookEntity::new("Old", "summary", "isbn", "author-1", &[]);
        repo.save(&book).await.expect("should save book");
        book.title = "New".to_string();
        repo.save(&book).await.expect("should overwrite book");

        let all = repo.find_all_sorted().await.expect("should list books");
        assert_eq!(1, all.len());
        assert_eq!("New", all[0].title.as_str());
    }

    #[tokio::test]
    async fn test_should_delete_by_id() {
        let repo = MemoryRepository::<BookEntity>::new("books");
        let book = BookEntity::new("A", "summary", "isbn", "author-1", &[]);
        repo.save(&book).await.expect("should save book");
        repo.delete_by_id(book.id.as_str()).await.expect("should delete book");
        let res = repo.find_by_id(book.id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotFound { .. })));

        // deleting an absent id is not an error
        repo.delete_by_id("missing").await.expect("should ignore absent id");
    }
}
