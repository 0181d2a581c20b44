//! Event endpoints

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use calendar_core::{Event, EventId, UserId, parse_date};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create_event", post(create_event))
        .route("/update_event", post(update_event))
        .route("/delete_event", post(delete_event))
        .route("/events_for_day", get(events_for_day))
        .route("/events_for_week", get(events_for_week))
        .route("/events_for_month", get(events_for_month))
}

/// Request body for creating an event
#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub user_id: UserId,
    pub date: String,
    pub title: String,
}

/// Request body for updating an event. Missing date or title fail validation.
#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub id: EventId,
    pub user_id: UserId,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Deserialize)]
pub struct DeleteEventRequest {
    pub id: EventId,
    pub user_id: UserId,
}

/// Query string for the range endpoints: `?user_id=1&date=2025-10-30`
#[derive(Deserialize)]
pub struct RangeQuery {
    pub user_id: UserId,
    pub date: String,
}

/// Wrapper for single-event responses
#[derive(Serialize)]
pub struct EventResult {
    pub result: Event,
}

/// Request dates carry no time of day; events land at midnight.
fn request_date(s: &str) -> Option<NaiveDateTime> {
    parse_date(s).ok().map(|d| d.and_time(NaiveTime::MIN))
}

fn range_params(
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<(UserId, NaiveDate), AppError> {
    let Query(query) = query?;
    let date = parse_date(&query.date)?;
    Ok((query.user_id, date))
}

/// POST /create_event
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Json<EventResult>, AppError> {
    let Json(req) = payload?;
    let event = state
        .calendar
        .create_event(req.user_id, request_date(&req.date), &req.title)?;

    Ok(Json(EventResult { result: event }))
}

/// POST /update_event
async fn update_event(
    State(state): State<AppState>,
    payload: Result<Json<UpdateEventRequest>, JsonRejection>,
) -> Result<Json<EventResult>, AppError> {
    let Json(req) = payload?;
    let event = state
        .calendar
        .update_event(req.id, req.user_id, request_date(&req.date), &req.title)?;

    Ok(Json(EventResult { result: event }))
}

/// POST /delete_event
async fn delete_event(
    State(state): State<AppState>,
    payload: Result<Json<DeleteEventRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(req) = payload?;
    if req.id <= 0 || req.user_id <= 0 {
        return Err(AppError::bad_request("invalid request"));
    }
    state.calendar.delete_event(req.id, req.user_id)?;

    Ok(Json(serde_json::json!({})))
}

/// GET /events_for_day
async fn events_for_day(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let (user_id, date) = range_params(query)?;
    Ok(Json(state.calendar.events_for_day(user_id, date)?))
}

/// GET /events_for_week - seven days starting at `date`
async fn events_for_week(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let (user_id, date) = range_params(query)?;
    Ok(Json(state.calendar.events_for_week(user_id, date)?))
}

/// GET /events_for_month - the calendar month containing `date`
async fn events_for_month(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, AppError> {
    let (user_id, date) = range_params(query)?;
    Ok(Json(state.calendar.events_for_month(user_id, date)?))
}
