//! Request handlers.
//!
//! Store access is synchronous, so every handler hops onto the blocking pool
//! through [`with_journal`].

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use lectio_core::{Database, Entry, Journal, StatisticsRecord};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::SharedState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<String>,
}

impl ListParams {
    /// Requested page. Only the leading integer counts (`"3.7"` is 3,
    /// `"2abc"` is 2); a missing value is the first page.
    fn page(&self) -> i64 {
        self.page.as_deref().map(leading_integer).unwrap_or(1)
    }
}

/// Leading signed integer of `raw`, or 0 when there is none.
///
/// Saturates instead of overflowing; pagination clamps the result anyway.
fn leading_integer(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    entries: Vec<Entry>,
    page: usize,
    total_pages: usize,
    total_entries: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    total_entries: usize,
    total_chapters: i64,
    unique_books: usize,
    ot_entries: usize,
    nt_entries: usize,
    longest_streak: usize,
}

impl From<StatisticsRecord> for StatsResponse {
    fn from(stats: StatisticsRecord) -> Self {
        Self {
            total_entries: stats.total_entries,
            total_chapters: stats.total_chapters_read,
            unique_books: stats.unique_sections_touched,
            ot_entries: stats.first_division_count,
            nt_entries: stats.second_division_count,
            longest_streak: stats.longest_streak_days,
        }
    }
}

/// Run a journal operation on the blocking pool.
async fn with_journal<T, F>(state: &SharedState, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&Journal<Database>) -> lectio_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    Ok(tokio::task::spawn_blocking(move || op(&state.journal)).await??)
}

/// Path ids must be plain digits; anything else is treated as an unknown route.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound);
    }
    raw.parse().map_err(|_| ApiError::RouteNotFound)
}

/// Bodies that are not JSON behave like an empty payload and fail validation.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// `GET /api/entries?page=N`
pub async fn list_entries(
    State(state): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let requested = params.page();
    let page = with_journal(&state, move |journal| journal.list(requested)).await?;

    Ok(Json(ListResponse {
        entries: page.items,
        page: page.page,
        total_pages: page.total_pages,
        total_entries: page.total_entries,
    }))
}

/// `GET /api/entries/{id}`
pub async fn get_entry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&id)?;
    let entry = with_journal(&state, move |journal| journal.get(id)).await?;
    Ok(Json(entry))
}

/// `POST /api/entries`
pub async fn create_entry(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let payload = parse_body(&body);
    let entry = with_journal(&state, move |journal| journal.create(&payload)).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `PUT /api/entries/{id}`
pub async fn update_entry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Entry>, ApiError> {
    let id = parse_id(&id)?;
    let payload = parse_body(&body);
    let entry = with_journal(&state, move |journal| journal.update(id, &payload)).await?;
    Ok(Json(entry))
}

/// `DELETE /api/entries/{id}`
pub async fn delete_entry(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    with_journal(&state, move |journal| journal.delete(id)).await?;
    Ok(Json(json!({ "success": true })))
}

/// `GET /api/stats`
pub async fn statistics(
    State(state): State<SharedState>,
) -> Result<Json<StatsResponse>, ApiError> {
    let stats = with_journal(&state, |journal| journal.statistics()).await?;
    Ok(Json(stats.into()))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
