use std::collections::HashMap;

use axum::extract::{Path, RawForm, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;

use crate::core::controller::{AppState, ServerError};
use crate::core::forms::{FieldError, FormFields};
use crate::core::library::LibraryError;
use crate::genres::domain::model::GenreEntity;
use crate::genres::forms::GenreSubmission;

#[derive(Debug, Serialize)]
pub(crate) struct BookRow {
    pub id: String,
    pub url: String,
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenreListView {
    pub title: String,
    pub genre_list: Vec<GenreEntity>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenreDetailView {
    pub title: String,
    pub genre: GenreEntity,
    pub genre_books: Vec<BookRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenreFormView {
    pub title: String,
    pub genre: Option<GenreSubmission>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenreDeleteView {
    pub title: String,
    pub genre: GenreEntity,
    pub genre_books: Vec<BookRow>,
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

pub(crate) async fn genre_list(
    State(state): State<AppState>) -> Result<Json<GenreListView>, ServerError> {
    let genre_list = state.repos.genres.find_all_sorted().await?;
    Ok(Json(GenreListView { title: "Genre List".to_string(), genre_list }))
}

pub(crate) async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<GenreDetailView>, ServerError> {
    let book_filter = HashMap::from([("genre".to_string(), id.to_string())]);
    let (genre, genre_books) = tokio::try_join!(
        state.repos.genres.find_by_id(id.as_str()),
        state.repos.books.find_by_filter(&book_filter),
    )?;
    Ok(Json(GenreDetailView {
        title: "Genre Detail".to_string(),
        genre,
        genre_books: book_rows(&genre_books),
    }))
}

pub(crate) async fn genre_create_get() -> Json<GenreFormView> {
    Json(GenreFormView {
        title: "Create Genre".to_string(),
        genre: None,
        errors: vec![],
    })
}

pub(crate) async fn genre_create_post(
    State(state): State<AppState>,
    RawForm(body): RawForm) -> Result<Response, ServerError> {
    let fields = FormFields::parse(&body)?;
    let submission = GenreSubmission::from_fields(&fields);
    match submission.validate() {
        Err(errors) => {
            let view = GenreFormView {
                title: "Create Genre".to_string(),
                genre: Some(submission),
                errors,
            };
            Ok(Json(view).into_response())
        }
        Ok(valid) => {
            // idempotent by name: a second submission lands on the first record
            let name_filter = HashMap::from([("name".to_string(), valid.name().to_string())]);
            let existing = state.repos.genres.find_by_filter(&name_filter).await?;
            if let Some(found) = existing.first() {
                return Ok(Redirect::to(found.url().as_str()).into_response());
            }
            let genre = valid.into_new_entity();
            state.repos.genres.save(&genre).await?;
            tracing::info!(genre_id = genre.id.as_str(), "created genre");
            Ok(Redirect::to(genre.url().as_str()).into_response())
        }
    }
}

pub(crate) async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Response, ServerError> {
    let book_filter = HashMap::from([("genre".to_string(), id.to_string())]);
    let (genre, genre_books) = tokio::try_join!(
        async {
            match state.repos.genres.find_by_id(id.as_str()).await {
                Ok(genre) => Ok(Some(genre)),
                Err(LibraryError::NotFound { .. }) => Ok(None),
                Err(err) => Err(err),
            }
        },
        state.repos.books.find_by_filter(&book_filter),
    )?;
    match genre {
        None => Ok(Redirect::to("/catalog/genres").into_response()),
        Some(genre) => Ok(Json(GenreDeleteView {
            title: "Delete Genre".to_string(),
            genre,
            genre_books: book_rows(&genre_books),
        }).into_response()),
    }
}

pub(crate) async fn genre_delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Redirect, ServerError> {
    state.repos.genres.delete_by_id(id.as_str()).await?;
    Ok(Redirect::to("/catalog/genres"))
}

pub(crate) async fn genre_update_get() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: Genre update GET")
}

pub(crate) async fn genre_update_post() -> impl IntoResponse {
    (StatusCode::NOT_IMPLEMENTED, "NOT IMPLEMENTED: Genre update POST")
}
