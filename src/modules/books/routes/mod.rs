//! HTTP handlers for the books module.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookshelf_http::error::AppError;
use serde::Deserialize;

use super::models::{Book, BookDraft, BookId};
use super::query::{BookQuery, SortKey, SortOrder, YearFilter};
use super::service::BookCatalog;
use super::MODULE_NAME;
use crate::utils::dates::{parse_date_time, DateParseError};

/// Raw list query string; every parameter is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListBooksParams {
    pub search_query: String,
    pub year_filter: String,
    pub sort_by: String,
    pub sort_order: String,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

impl ListBooksParams {
    /// Only malformed dates are rejected; other values fall back to defaults.
    pub fn into_query(self) -> Result<BookQuery, DateParseError> {
        Ok(BookQuery {
            min_date: parse_bound(self.min_date.as_deref())?,
            max_date: parse_bound(self.max_date.as_deref())?,
            year_filter: YearFilter::parse(&self.year_filter),
            sort_by: SortKey::parse(&self.sort_by),
            sort_order: SortOrder::parse(&self.sort_order),
            search_query: self.search_query,
        })
    }
}

fn book_id(path: Result<Path<BookId>, PathRejection>) -> Result<BookId, AppError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::bad_request(rejection.body_text()))
}

fn parse_bound(value: Option<&str>) -> Result<Option<chrono::NaiveDate>, DateParseError> {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(Some(parse_date_time(raw)?.date())),
        _ => Ok(None),
    }
}

/// Router for `/api/books`, bound to `catalog`.
pub fn router(catalog: BookCatalog) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(catalog)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(catalog): State<BookCatalog>,
    Query(params): Query<ListBooksParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let query = params
        .into_query()
        .map_err(|err| AppError::bad_request(err.to_string()))?;
    Ok(Json(catalog.list(&query).await))
}

async fn get_book(
    State(catalog): State<BookCatalog>,
    path: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let id = book_id(path)?;
    Ok(Json(catalog.get(id).await?))
}

async fn create_book(
    State(catalog): State<BookCatalog>,
    payload: Result<Json<BookDraft>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(draft) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    tracing::info!(
        title = %draft.title,
        image_len = draft.image_url.as_deref().map_or(0, str::len),
        "create book request"
    );

    let book = catalog.create(&draft).await?;
    let location = format!("/api/{}/{}", MODULE_NAME, book.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(book)))
}

async fn update_book(
    State(catalog): State<BookCatalog>,
    path: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<BookDraft>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = book_id(path)?;
    let Json(draft) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
    Ok(Json(catalog.update(id, &draft).await?))
}

async fn delete_book(
    State(catalog): State<BookCatalog>,
    path: Result<Path<BookId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = book_id(path)?;
    catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
