use crate::authors::domain::model::AuthorEntity;
use crate::authors::factory::create_author_repository;
use crate::books::domain::model::BookEntity;
use crate::books::factory::create_book_repository;
use crate::core::repository::{Repository, RepositoryStore};
use crate::genres::domain::model::GenreEntity;
use crate::genres::factory::create_genre_repository;
use crate::instances::domain::model::BookInstanceEntity;
use crate::instances::factory::create_instance_repository;

// One repository per record type, built once and shared through AppState.
pub struct Repositories {
    pub books: Box<dyn Repository<BookEntity>>,
    pub authors: Box<dyn Repository<AuthorEntity>>,
    pub genres: Box<dyn Repository<GenreEntity>>,
    pub instances: Box<dyn Repository<BookInstanceEntity>>,
}

pub async fn create_repositories(store: RepositoryStore) -> Repositories {
    Repositories {
        books: create_book_repository(store).await,
        authors: create_author_repository(store).await,
        genres: create_genre_repository(store).await,
        instances: create_instance_repository(store).await,
    }
}
