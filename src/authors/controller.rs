use std::collections::HashMap;

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::authors::domain::model::AuthorEntity;
use crate::authors::forms::AuthorSubmission;
use crate::core::controller::{AppState, ServerError};
use crate::core::forms::{FieldError, FormFields};
use crate::core::library::LibraryError;

#[derive(Debug, Serialize)]
pub(crate) struct AuthorRow {
    pub id: String,
    pub url: String,
    pub name: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub date_of_death: Option<chrono::NaiveDate>,
}

impl AuthorRow {
    fn from_entity(author: &AuthorEntity) -> Self {
        Self {
            id: author.id.to_string(),
            url: author.url(),
            name: author.name(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BookRow {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthorListView {
    pub title: String,
    pub author_list: Vec<AuthorRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthorDetailView {
    pub title: String,
    pub author: AuthorRow,
    pub author_books: Vec<BookRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthorFormView {
    pub title: String,
    pub author: Option<AuthorSubmission>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AuthorDeleteView {
    pub title: String,
    pub author: AuthorRow,
    pub author_books: Vec<BookRow>,
}

fn book_rows(books: &[crate::books::domain::model::BookEntity]) -> Vec<BookRow> {
    books.iter()
        .map(|book| BookRow {
            id: book.id.to_string(),
            url: book.url(),
            title: book.title.to_string(),
            summary: book.summary.to_string(),
        })
        .collect()
}

pub(crate) async fn author_list(
    State(state): State<AppState>) -> Result<Json<AuthorListView>, ServerError> {
    let authors = state.repos.authors.find_all_sorted().await?;
    Ok(Json(AuthorListView {
        title: "Author List".to_string(),
        author_list: authors.iter().map(AuthorRow::from_entity).collect(),
    }))
}

pub(crate) async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<AuthorDetailView>, ServerError> {
    let book_filter = HashMap::from([("author".to_string(), id.to_string())]);
    let (author, author_books) = tokio::try_join!(
        state.repos.authors.find_by_id(id.as_str()),
        state.repos.books.find_by_filter(&book_filter),
    )?;
    Ok(Json(AuthorDetailView {
        title: "Author Detail".to_string(),
        author: AuthorRow::from_entity(&author),
        author_books: book_rows(&author_books),
    }))
}

pub(crate) async fn author_create_get() -> Json<AuthorFormView> {
    Json(AuthorFormView {
        title: "Create Author".to_string(),
        author: None,
        errors: vec![],
    })
}

pub(crate) async fn author_create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm) -> Result<Response, ServerError> {
    let fields = FormFields::parse(&body)?;
    let submission = AuthorSubmission::from_fields(&fields);
    match submission.validate() {
        Err(errors) => {
            let view = AuthorFormView {
                title: "Create Author".to_string(),
                author: Some(submission),
                errors,
            };
            Ok(Json(view).into_response())
        }
        Ok(valid) => {
            let author = valid.into_new_entity();
            state.repos.authors.save(&author).await?;
            tracing::info!(author_id = author.id.as_str(), "created author");
            Ok(Redirect::to(author.url().as_str()).into_response())
        }
    }
}

pub(crate) async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Response, ServerError> {
    let book_filter = HashMap::from([("author".to_string(), id.to_string())]);
    let (author, author_books) = tokio::try_join!(
        async {
            match state.repos.authors.find_by_id(id.as_str()).await {
                Ok(author) => Ok(Some(author)),
                Err(LibraryError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            }
        },
        state.repos.books.find_by_filter(&book_filter),
    )?;
    match author {
        None => Ok(Redirect::to("/catalog/authors").into_response()),
        Some(author) => Ok(Json(AuthorDeleteView {
            title: "Delete Author".to_string(),
            author: AuthorRow::from_entity(&author),
            author_books: book_rows(&author_books),
        }).into_response()),
    }
}

pub(crate) async fn author_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Redirect, ServerError> {
    // books referencing the author keep their dangling reference
    state.repos.authors.delete_by_id(id.as_str()).await?;
    Ok(Redirect::to("/catalog/authors"))
}

pub(crate) async fn author_update_get() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: Author update GET")
}

pub(crate) async fn author_update_post() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: Author update POST")
}
