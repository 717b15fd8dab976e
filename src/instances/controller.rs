use std::collections::HashMap;

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::books::domain::model::BookEntity;
use crate::core::controller::{AppState, ServerError};
use crate::core::forms::{FieldError, FormFields};
use crate::core::library::LibraryError;
use crate::instances::domain::model::BookInstanceEntity;
use crate::instances::forms::InstanceSubmission;

#[derive(Debug, Serialize)]
pub(crate) struct BookRef {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl BookRef {
    fn from_entity(book: &BookEntity) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.to_string(),
            url: book.url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceRow {
    pub id: String,
    pub url: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<chrono::NaiveDate>,
    pub book: Option<BookRef>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceListView {
    pub title: String,
    pub bookinstance_list: Vec<InstanceRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceDetailView {
    pub title: String,
    pub bookinstance: InstanceRow,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceFormView {
    pub title: String,
    pub book_list: Vec<BookRef>,
    pub selected_book: Option<String>,
    pub bookinstance: Option<InstanceSubmission>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InstanceDeleteView {
    pub title: String,
    pub instance: InstanceRow,
}

fn instance_row(copy: &BookInstanceEntity, book: Option<BookRef>) -> InstanceRow {
    InstanceRow {
        id: copy.id.to_string(),
        url: copy.url(),
        imprint: copy.imprint.to_string(),
        status: copy.status.to_string(),
        due_back: copy.due_back,
        book,
    }
}

pub(crate) async fn bookinstance_list(
    State(state): State<AppState>) -> Result<Json<InstanceListView>, ServerError> {
    let (copies, books) = tokio::try_join!(
        state.repos.instances.find_all_sorted(),
        state.repos.books.find_all_sorted(),
    )?;
    let titles: HashMap<String, BookRef> = books.iter()
        .map(|book| (book.id.to_string(), BookRef::from_entity(book)))
        .collect();
    let bookinstance_list = copies.iter()
        .map(|copy| {
            let book = titles.get(copy.book.as_str())
                .map(|b| BookRef { id: b.id.to_string(), title: b.title.to_string(), url: b.url.to_string() });
            instance_row(copy, book)
        })
        .collect();
    Ok(Json(InstanceListView {
        title: "Book Instance List".to_string(),
        bookinstance_list,
    }))
}

pub(crate) async fn bookinstance_detail(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<InstanceDetailView>, ServerError> {
    let copy = state.repos.instances.find_by_id(id.as_str()).await?;
    let book = match state.repos.books.find_by_id(copy.book.as_str()).await {
        Ok(book) => Some(BookRef::from_entity(&book)),
        Err(LibraryError::NotFound { .. }) => None,
        Err(err) => return Err(err.into()),
    };
    let title = match &book {
        Some(book) => format!("Copy: {}", book.title),
        None => "Copy".to_string(),
    };
    Ok(Json(InstanceDetailView {
        title,
        bookinstance: instance_row(&copy, book),
    }))
}

pub(crate) async fn bookinstance_create_get(
    State(state): State<AppState>) -> Result<Json<InstanceFormView>, ServerError> {
    let books = state.repos.books.find_all_sorted().await?;
    Ok(Json(InstanceFormView {
        title: "Create BookInstance".to_string(),
        book_list: books.iter().map(BookRef::from_entity).collect(),
        selected_book: None,
        bookinstance: None,
        errors: vec![],
    }))
}

async fn rerender_form(
    state: &AppState,
    submission: InstanceSubmission,
    errors: Vec<FieldError>) -> Result<Response, ServerError> {
    let books = state.repos.books.find_all_sorted().await?;
    let view = InstanceFormView {
        title: "Create BookInstance".to_string(),
        book_list: books.iter().map(BookRef::from_entity).collect(),
        selected_book: Some(submission.book.to_string()),
        bookinstance: Some(submission),
        errors,
    };
    Ok(Json(view).into_response())
}

pub(crate) async fn bookinstance_create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm) -> Result<Response, ServerError> {
    let fields = FormFields::parse(&body)?;
    let submission = InstanceSubmission::from_fields(&fields);
    match submission.validate() {
        Err(errors) => rerender_form(&state, submission, errors).await,
        Ok(valid) => {
            // the referenced book must exist before a copy can be filed
            match state.repos.books.find_by_id(valid.book_id()).await {
                Ok(_) => {
                    let copy = valid.into_new_entity();
                    state.repos.instances.save(&copy).await?;
                    tracing::info!(instance_id = copy.id.as_str(), "created book instance");
                    Ok(Redirect::to(copy.url().as_str()).into_response())
                }
                Err(LibraryError::NotFound { .. }) => {
                    let errors = vec![FieldError::new("book", "Book does not exist")];
                    rerender_form(&state, submission, errors).await
                }
                Err(err) => Err(err.into()),
            }
        }
    }
}

pub(crate) async fn bookinstance_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Response, ServerError> {
    match state.repos.instances.find_by_id(id.as_str()).await {
        Ok(copy) => Ok(Json(InstanceDeleteView {
            title: "Delete Instance".to_string(),
            instance: instance_row(&copy, None),
        }).into_response()),
        Err(LibraryError::NotFound { .. }) => Ok(Redirect::to("/catalog/bookinstances").into_response()),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn bookinstance_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Redirect, ServerError> {
    state.repos.instances.delete_by_id(id.as_str()).await?;
    Ok(Redirect::to("/catalog/bookinstances"))
}

pub(crate) async fn bookinstance_update_get() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: BookInstance update GET")
}

pub(crate) async fn bookinstance_update_post() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: BookInstance update POST")
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use axum::extract::{Path, RawForm, State};
    use axum::http::{header, StatusCode};

    use crate::books::domain::model::BookEntity;
    use crate::catalog::factory::create_repositories;
    use crate::core::controller::AppState;
    use crate::core::repository::RepositoryStore;
    use crate::instances::controller::{bookinstance_create_post, bookinstance_delete_get, bookinstance_detail, bookinstance_list};
    use crate::instances::domain::model::{BookInstanceEntity, CopyStatus};

    async fn test_state() -> AppState {
        AppState::new("Test Library", create_repositories(RepositoryStore::InMemory).await)
    }

    fn form(body: &'static str) -> RawForm {
        RawForm(Bytes::from_static(body.as_bytes()))
    }

    #[tokio::test]
    async fn test_should_list_instances_with_book_titles() {
        let state = test_state().await;
        let book = BookEntity::new("The Hobbit", "s", "i", "a1", &[]);
        state.repos.books.save(&book).await.expect("should save book");
        let copy = BookInstanceEntity::new(book.id.as_str(), "First edition", CopyStatus::Available, None);
        state.repos.instances.save(&copy).await.expect("should save copy");

        let view = bookinstance_list(State(state)).await.expect("should list copies").0;
        assert_eq!(1, view.bookinstance_list.len());
        let populated = view.bookinstance_list[0].book.as_ref().expect("book populated");
        assert_eq!("The Hobbit", populated.title.as_str());
    }

    #[tokio::test]
    async fn test_should_render_detail_with_dangling_book_as_absent() {
        let state = test_state().await;
        let copy = BookInstanceEntity::new("gone", "First edition", CopyStatus::Loaned, None);
        state.repos.instances.save(&copy).await.expect("should save copy");

        let view = bookinstance_detail(State(state), Path(copy.id.to_string()))
            .await.expect("should render detail").0;
        assert!(view.bookinstance.book.is_none());
        assert_eq!("Copy", view.title.as_str());
    }

    #[tokio::test]
    async fn test_should_return_404_for_unknown_instance() {
        let state = test_state().await;
        let err = bookinstance_detail(State(state), Path("missing".to_string()))
            .await.expect_err("should fail");
        assert_eq!(StatusCode::NOT_FOUND, err.0);
    }

    #[tokio::test]
    async fn test_should_create_instance_and_redirect() {
        let state = test_state().await;
        let book = BookEntity::new("The Hobbit", "s", "i", "a1", &[]);
        state.repos.books.save(&book).await.expect("should save book");

        let body = format!("book={}&imprint=First+edition&status=Available&due_back=2024-01-15", book.id);
        let res = bookinstance_create_post(
            State(state.clone()),
            RawForm(Bytes::from(body.into_bytes())))
            .await.expect("should create copy");
        assert_eq!(StatusCode::SEE_OTHER, res.status());
        assert!(res.headers().get(header::LOCATION).is_some());

        let copies = state.repos.instances.find_all_sorted().await.expect("should list copies");
        assert_eq!(1, copies.len());
        assert_eq!("First edition", copies[0].imprint.as_str());
        assert_eq!(CopyStatus::Available, copies[0].status);
    }

    #[tokio::test]
    async fn test_should_reject_instance_for_nonexistent_book() {
        let state = test_state().await;
        let res = bookinstance_create_post(
            State(state.clone()),
            form("book=no-such-book&imprint=First&status=Available"))
            .await.expect("should re-render form");
        assert_eq!(StatusCode::OK, res.status());
        assert!(state.repos.instances.find_all_sorted().await.expect("should list copies").is_empty());
    }

    #[tokio::test]
    async fn test_should_redirect_delete_get_for_unknown_instance() {
        let state = test_state().await;
        let res = bookinstance_delete_get(State(state), Path("missing".to_string()))
            .await.expect("should redirect");
        assert_eq!(StatusCode::SEE_OTHER, res.status());
        let location = res.headers().get(header::LOCATION).expect("should redirect")
            .to_str().expect("ascii location");
        assert_eq!("/catalog/bookinstances", location);
    }
}
