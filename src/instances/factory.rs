use crate::core::repository::ddb::DDBRepository;
use crate::core::repository::memory::MemoryRepository;
use crate::core::repository::{Repository, RepositoryStore};
use crate::instances::domain::model::BookInstanceEntity;
use crate::utils::ddb::build_db_client;

pub async fn create_instance_repository(store: RepositoryStore) -> Box<dyn Repository<BookInstanceEntity>> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBRepository::new(client, "book_instances", &[]))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryRepository::new("book_instances"))
        }
    }
}
