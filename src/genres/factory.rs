use crate::core::repository::ddb::DDBRepository;
use crate::core::repository::memory::MemoryRepository;
use crate::core::repository::{Repository, RepositoryStore};
use crate::genres::domain::model::GenreEntity;
use crate::utils::ddb::build_db_client;

pub async fn create_genre_repository(store: RepositoryStore) -> Box<dyn Repository<GenreEntity>> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client().await;
            Box::new(DDBRepository::new(client, "genres", &[]))
        }
        RepositoryStore::InMemory => {
            Box::new(MemoryRepository::new("genres"))
        }
    }
}
