use crate::books::domain::model::BookEntity;
use crate::core::repository::ddb::DDBRepository;
use crate::core::repository::memory::MemoryRepository;
use crate::core::repository::{Repository, RepositoryStore};
use crate::utils::ddb::build_db_client;

pub async fn create_book_repository(store: RepositoryStore) -> Box<dyn Repository<BookEntity>> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBRepository::new(client, "books", &["genre"]))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryRepository::new("books"))
        }
    }
}
