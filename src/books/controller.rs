use std::collections::HashMap;

use axum::extract::{Path, RawForm, State};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::authors::domain::model::AuthorEntity;
use crate::books::domain::model::BookEntity;
use crate::books::forms::BookSubmission;
use crate::core::controller::{AppState, ServerError};
use crate::core::forms::{FieldError, FormFields};
use crate::core::library::LibraryError;
use crate::core::view::{mark_selected, Checked};
use crate::genres::domain::model::GenreEntity;
use crate::instances::domain::model::BookInstanceEntity;

#[derive(Debug, Serialize)]
pub(crate) struct AuthorRef {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl AuthorRef {
    fn from_entity(author: &AuthorEntity) -> Self {
        Self {
            id: author.id.to_string(),
            name: author.name(),
            url: author.url(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenreRef {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CopyRow {
    pub id: String,
    pub url: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<chrono::NaiveDate>,
}

impl CopyRow {
    fn from_entity(copy: &BookInstanceEntity) -> Self {
        Self {
            id: copy.id.to_string(),
            url: copy.url(),
            imprint: copy.imprint.to_string(),
            status: copy.status.to_string(),
            due_back: copy.due_back,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BookListRow {
    pub id: String,
    pub url: String,
    pub title: String,
    pub author_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookListView {
    pub title: String,
    pub book_list: Vec<BookListRow>,
}

// Book with author and genre references resolved; dangling references render
// as absent rather than failing the page.
#[derive(Debug, Serialize)]
pub(crate) struct BookView {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Option<AuthorRef>,
    pub genres: Vec<GenreRef>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookDetailView {
    pub title: String,
    pub book: BookView,
    pub book_instances: Vec<CopyRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookFormView {
    pub title: String,
    pub authors: Vec<AuthorRef>,
    pub genres: Vec<Checked<GenreEntity>>,
    pub book: Option<BookSubmission>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BookDeleteView {
    pub title: String,
    pub book: BookView,
    pub book_instances: Vec<CopyRow>,
}

async fn populate_book(state: &AppState, book: &BookEntity) -> Result<BookView, ServerError> {
    let author = match state.repos.authors.find_by_id(book.author.as_str()).await {
        Ok(author) => Some(AuthorRef::from_entity(&author)),
        Err(LibraryError::NotFound { .. }) => None,
        Err(err) => return Err(err.into()),
    };
    let mut genres = vec![];
    for genre_id in &book.genre {
        match state.repos.genres.find_by_id(genre_id.as_str()).await {
            Ok(genre) => genres.push(GenreRef {
                id: genre.id.to_string(),
                name: genre.name.to_string(),
                url: genre.url(),
            }),
            Err(LibraryError::NotFound { .. }) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(BookView {
        id: book.id.to_string(),
        url: book.url(),
        title: book.title.to_string(),
        summary: book.summary.to_string(),
        isbn: book.isbn.to_string(),
        author,
        genres,
    })
}

pub(crate) async fn book_list(
    State(state): State<AppState>) -> Result<Json<BookListView>, ServerError> {
    let (books, authors) = tokio::try_join!(
        state.repos.books.find_all_sorted(),
        state.repos.authors.find_all_sorted(),
    )?;
    let author_names: HashMap<String, String> = authors.iter()
        .map(|author| (author.id.to_string(), author.name()))
        .collect();
    let book_list = books.iter()
        .map(|book| BookListRow {
            id: book.id.to_string(),
            url: book.url(),
            title: book.title.to_string(),
            author_name: author_names.get(book.author.as_str()).cloned(),
        })
        .collect();
    Ok(Json(BookListView { title: "Book List".to_string(), book_list }))
}

pub(crate) async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<BookDetailView>, ServerError> {
    let copy_filter = HashMap::from([("book".to_string(), id.to_string())]);
    let (book, copies) = tokio::try_join!(
        state.repos.books.find_by_id(id.as_str()),
        state.repos.instances.find_by_filter(&copy_filter),
    )?;
    let book = populate_book(&state, &book).await?;
    Ok(Json(BookDetailView {
        title: book.title.to_string(),
        book,
        book_instances: copies.iter().map(CopyRow::from_entity).collect(),
    }))
}

pub(crate) async fn book_create_get(
    State(state): State<AppState>) -> Result<Json<BookFormView>, ServerError> {
    let (authors, genres) = tokio::try_join!(
        state.repos.authors.find_all_sorted(),
        state.repos.genres.find_all_sorted(),
    )?;
    Ok(Json(BookFormView {
        title: "Create Book".to_string(),
        authors: authors.iter().map(AuthorRef::from_entity).collect(),
        genres: mark_selected(genres, &[]),
        book: None,
        errors: vec![],
    }))
}

pub(crate) async fn book_create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm) -> Result<Response, ServerError> {
    let fields = FormFields::parse(&body)?;
    let submission = BookSubmission::from_fields(&fields);
    match submission.validate() {
        Err(errors) => {
            let (authors, genres) = tokio::try_join!(
                state.repos.authors.find_all_sorted(),
                state.repos.genres.find_all_sorted(),
            )?;
            let view = BookFormView {
                title: "Create Book".to_string(),
                authors: authors.iter().map(AuthorRef::from_entity).collect(),
                genres: mark_selected(genres, &submission.genre),
                book: Some(submission),
                errors,
            };
            Ok(Json(view).into_response())
        }
        Ok(valid) => {
            let book = valid.into_new_entity();
            state.repos.books.save(&book).await?;
            tracing::info!(book_id = book.id.as_str(), "created book");
            Ok(Redirect::to(book.url().as_str()).into_response())
        }
    }
}

pub(crate) async fn book_update_get(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<BookFormView>, ServerError> {
    let (book, authors, genres) = tokio::try_join!(
        state.repos.books.find_by_id(id.as_str()),
        state.repos.authors.find_all_sorted(),
        state.repos.genres.find_all_sorted(),
    )?;
    Ok(Json(BookFormView {
        title: "Update Book".to_string(),
        authors: authors.iter().map(AuthorRef::from_entity).collect(),
        genres: mark_selected(genres, &book.genre),
        book: Some(BookSubmission::from_entity(&book)),
        errors: vec![],
    }))
}

pub(crate) async fn book_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RawForm(body): RawForm) -> Result<Response, ServerError> {
    let fields = FormFields::parse(&body)?;
    let submission = BookSubmission::from_fields(&fields);
    match submission.validate() {
        Err(errors) => {
            let (authors, genres) = tokio::try_join!(
                state.repos.authors.find_all_sorted(),
                state.repos.genres.find_all_sorted(),
            )?;
            let view = BookFormView {
                title: "Update Book".to_string(),
                authors: authors.iter().map(AuthorRef::from_entity).collect(),
                genres: mark_selected(genres, &submission.genre),
                book: Some(submission),
                errors,
            };
            Ok(Json(view).into_response())
        }
        Ok(valid) => {
            // the update must target the existing record, never allocate a new id
            let existing = state.repos.books.find_by_id(id.as_str()).await?;
            let book = valid.into_entity_with_id(existing.id.as_str());
            state.repos.books.save(&book).await?;
            tracing::info!(book_id = book.id.as_str(), "updated book");
            Ok(Redirect::to(book.url().as_str()).into_response())
        }
    }
}

pub(crate) async fn book_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Response, ServerError> {
    let copy_filter = HashMap::from([("book".to_string(), id.to_string())]);
    let (book, copies) = tokio::try_join!(
        async {
            match state.repos.books.find_by_id(id.as_str()).await {
                Ok(book) => Ok(Some(book)),
                Err(LibraryError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            }
        },
        state.repos.instances.find_by_filter(&copy_filter),
    )?;
    match book {
        None => Ok(Redirect::to("/catalog/books").into_response()),
        Some(book) => {
            let book = populate_book(&state, &book).await?;
            Ok(Json(BookDeleteView {
                title: "Delete Book".to_string(),
                book,
                book_instances: copies.iter().map(CopyRow::from_entity).collect(),
            }).into_response())
        }
    }
}

pub(crate) async fn book_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Redirect, ServerError> {
    // no cascade: copies referencing the book are left behind
    state.repos.books.delete_by_id(id.as_str()).await?;
    Ok(Redirect::to("/catalog/books"))
}
