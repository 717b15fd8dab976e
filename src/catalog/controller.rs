use std::collections::HashMap;

use axum::extract::State;
use axum::response::{Json, Redirect};
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::authors::controller::{author_create_get, author_create_post, author_delete_get, author_delete_post, author_detail, author_list, author_update_get, author_update_post};
use crate::books::controller::{book_create_get, book_create_post, book_delete_get, book_delete_post, book_detail, book_list, book_update_get, book_update_post};
use crate::core::controller::AppState;
use crate::genres::controller::{genre_create_get, genre_create_post, genre_delete_get, genre_delete_post, genre_detail, genre_list, genre_update_get, genre_update_post};
use crate::instances::controller::{bookinstance_create_get, bookinstance_create_post, bookinstance_delete_get, bookinstance_delete_post, bookinstance_detail, bookinstance_list, bookinstance_update_get, bookinstance_update_post};

#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct IndexCounts {
    pub book_count: usize,
    pub book_instance_count: usize,
    pub book_instance_available_count: usize,
    pub author_count: usize,
    pub genre_count: usize,
}

// The home page renders even when the counts fail; the error rides along in
// the view instead of aborting the response.
#[derive(Debug, Serialize)]
pub(crate) struct IndexView {
    pub title: String,
    pub error: Option<String>,
    pub data: Option<IndexCounts>,
}

pub(crate) async fn index(State(state): State<AppState>) -> Json<IndexView> {
    let everything = HashMap::new();
    let available = HashMap::from([("status".to_string(), "Available".to_string())]);
    let title = format!("{} Home", state.config.site_name);
    // five independent counts; the first failure cancels the rest
    let res = tokio::try_join!(
        state.repos.books.find_by_filter(&everything),
        state.repos.instances.find_by_filter(&everything),
        state.repos.instances.find_by_filter(&available),
        state.repos.authors.find_by_filter(&everything),
        state.repos.genres.find_by_filter(&everything),
    );
    match res {
        Ok((books, copies, available_copies, authors, genres)) => Json(IndexView {
            title,
            error: None,
            data: Some(IndexCounts {
                book_count: books.len(),
                book_instance_count: copies.len(),
                book_instance_available_count: available_copies.len(),
                author_count: authors.len(),
                genre_count: genres.len(),
            }),
        }),
        Err(err) => {
            tracing::error!(error = %err, "failed to load home page counts");
            Json(IndexView {
                title,
                error: Some(err.to_string()),
                data: None,
            })
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/catalog", get(index))
        .route("/catalog/books", get(book_list))
        .route("/catalog/book/create", get(book_create_get).post(book_create_post))
        .route("/catalog/book/:id", get(book_detail))
        .route("/catalog/book/:id/delete", get(book_delete_get).post(book_delete_post))
        .route("/catalog/book/:id/update", get(book_update_get).post(book_update_post))
        .route("/catalog/authors", get(author_list))
        .route("/catalog/author/create", get(author_create_get).post(author_create_post))
        .route("/catalog/author/:id", get(author_detail))
        .route("/catalog/author/:id/delete", get(author_delete_get).post(author_delete_post))
        .route("/catalog/author/:id/update", get(author_update_get).post(author_update_post))
        .route("/catalog/genres", get(genre_list))
        .route("/catalog/genre/create", get(genre_create_get).post(genre_create_post))
        .route("/catalog/genre/:id", get(genre_detail))
        .route("/catalog/genre/:id/delete", get(genre_delete_get).post(genre_delete_post))
        .route("/catalog/genre/:id/update", get(genre_update_get).post(genre_update_post))
        .route("/catalog/bookinstances", get(bookinstance_list))
        .route("/catalog/bookinstance/create", get(bookinstance_create_get).post(bookinstance_create_post))
        .route("/catalog/bookinstance/:id", get(bookinstance_detail))
        .route("/catalog/bookinstance/:id/delete", get(bookinstance_delete_get).post(bookinstance_delete_post))
        .route("/catalog/bookinstance/:id/update", get(bookinstance_update_get).post(bookinstance_update_post))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::extract::State;

    use crate::authors::domain::model::AuthorEntity;
    use crate::books::domain::model::BookEntity;
    use crate::catalog::controller::{create_router, index, IndexCounts};
    use crate::catalog::factory::{create_repositories, Repositories};
    use crate::core::controller::AppState;
    use crate::core::domain::Identifiable;
    use crate::core::library::{LibraryError, LibraryResult};
    use crate::core::repository::memory::MemoryRepository;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::genres::domain::model::GenreEntity;
    use crate::instances::domain::model::{BookInstanceEntity, CopyStatus};

    async fn test_state() -> AppState {
        AppState::new("Test Library", create_repositories(RepositoryStore::InMemory).await)
    }

    // every operation fails as if the store were unreachable
    struct FailingRepository;

    #[async_trait]
    impl<E: Identifiable> Repository<E> for FailingRepository {
        async fn find_by_id(&self, _id: &str) -> LibraryResult<E> {
            Err(LibraryError::database("store offline", None, true))
        }

        async fn find_all_sorted(&self) -> LibraryResult<Vec<E>> {
            Err(LibraryError::database("store offline", None, true))
        }

        async fn find_by_filter(&self, _predicate: &HashMap<String, String>) -> LibraryResult<Vec<E>> {
            Err(LibraryError::database("store offline", None, true))
        }

        async fn save(&self, _entity: &E) -> LibraryResult<usize> {
            Err(LibraryError::database("store offline", None, true))
        }

        async fn delete_by_id(&self, _id: &str) -> LibraryResult<usize> {
            Err(LibraryError::database("store offline", None, true))
        }
    }

    #[tokio::test]
    async fn test_should_count_each_record_type() {
        let state = test_state().await;
        let author = AuthorEntity::new("John", "Tolkien", None, None);
        state.repos.authors.save(&author).await.expect("should save author");
        state.repos.genres.save(&GenreEntity::new("Fantasy")).await.expect("should save genre");
        let book = BookEntity::new("The Hobbit", "s", "i", author.id.as_str(), &[]);
        state.repos.books.save(&book).await.expect("should save book");
        state.repos.instances.save(
            &BookInstanceEntity::new(book.id.as_str(), "First", CopyStatus::Available, None))
            .await.expect("should save copy");
        state.repos.instances.save(
            &BookInstanceEntity::new(book.id.as_str(), "Second", CopyStatus::Loaned, None))
            .await.expect("should save copy");

        let view = index(State(state)).await.0;
        assert_eq!("Test Library Home", view.title.as_str());
        assert_eq!(None, view.error);
        assert_eq!(Some(IndexCounts {
            book_count: 1,
            book_instance_count: 2,
            book_instance_available_count: 1,
            author_count: 1,
            genre_count: 1,
        }), view.data);
    }

    #[tokio::test]
    async fn test_should_render_home_with_error_when_counts_fail() {
        let repos = Repositories {
            books: Box::new(FailingRepository),
            authors: Box::new(MemoryRepository::new("authors")),
            genres: Box::new(MemoryRepository::new("genres")),
            instances: Box::new(MemoryRepository::new("book_instances")),
        };
        let state = AppState::new("Test Library", repos);

        let view = index(State(state)).await.0;
        assert_eq!("Test Library Home", view.title.as_str());
        assert!(view.error.is_some());
        assert_eq!(None, view.data);
    }

    #[tokio::test]
    async fn test_should_build_router() {
        let state = test_state().await;
        let _ = create_router(state);
    }
}
