use crate::authors::domain::model::AuthorEntity;
use crate::core::repository::ddb::DDBRepository;
use crate::core::repository::memory::MemoryRepository;
use crate::core::repository::{Repository, RepositoryStore};
use crate::utils::ddb::build_db_client;

pub async fn create_author_repository(store: RepositoryStore) -> Box<dyn Repository<AuthorEntity>> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBRepository::new(client, "authors", &[]))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryRepository::new("authors"))
        }
    }
}
