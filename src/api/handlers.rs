//! HTTP request handlers

use super::types::{
    Ad, AgentQueryRequest, BuyRequest, CreateBookingRequest, CreateBookingResponse,
    ErrorResponse, SuccessResponse, VenueQuery,
};
use super::AppState;
use crate::assistant::{AssistantError, AssistantReply};
use crate::booking::{BookingError, NewBooking};
use crate::db::{Booking, Venue};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Venue registry
        .route("/api/venues", get(list_venues))
        .route("/api/venues/:id", get(get_venue))
        .route("/api/venues/:id/buy", post(buy_venue))
        // Bookings
        .route("/api/bookings", get(list_bookings).post(create_booking))
        .route("/api/bookings/:id", get(get_booking))
        .route("/api/bookings/:id/cancel", post(cancel_booking))
        // Sponsors
        .route("/api/ads", get(list_ads))
        // Assistant
        .route("/api/agent/query", post(agent_query))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Venues
// ============================================================

async fn list_venues(
    State(state): State<AppState>,
    Query(query): Query<VenueQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Venue>>, AppError> {
    let venues = state.bookings.list_venues(query.q.as_deref())?;
    let base = request_base(&headers);

    Ok(Json(
        venues
            .into_iter()
            .map(|v| with_absolute_image(v, base.as_deref()))
            .collect(),
    ))
}

async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Venue>, AppError> {
    let venue = state.bookings.get_venue(id)?;
    Ok(Json(with_absolute_image(venue, request_base(&headers).as_deref())))
}

async fn buy_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<BuyRequest>>,
) -> Result<Json<SuccessResponse>, AppError> {
    let buyer = body.and_then(|Json(req)| req.buyer_name);
    state.bookings.purchase_venue(id, buyer.as_deref())?;
    Ok(Json(SuccessResponse::ok()))
}

// ============================================================
// Bookings
// ============================================================

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Result<Json<CreateBookingResponse>, AppError> {
    let Json(req) = payload?;
    let booking = state.bookings.create_booking(NewBooking {
        venue_id: req.venue_id,
        name: req.name,
        date: req.date,
        days: req.days,
        expected_members: req.expected_members,
    })?;

    Ok(Json(CreateBookingResponse {
        success: true,
        booking_id: booking.id,
    }))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.bookings.list_bookings()?))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.bookings.get_booking(id)?))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.bookings.cancel_booking(id)?;
    Ok(Json(SuccessResponse::ok()))
}

// ============================================================
// Sponsors
// ============================================================

const ADS: &[(&str, &str)] = &[
    ("ad1", "BlueCaterers - 10% OFF"),
    ("ad2", "StageMax - Pro Sound"),
    ("ad3", "Spark Lighting - Deals"),
    ("ad4", "FloralArt - Wedding Flowers"),
    ("ad5", "SecureGuard - Event Security"),
];

async fn list_ads(headers: HeaderMap) -> Json<Vec<Ad>> {
    let base = request_base(&headers).unwrap_or_default();
    Json(
        ADS.iter()
            .map(|&(id, title)| Ad {
                id,
                title,
                image: format!("{base}/ads/{id}.jpg"),
                link: "#",
            })
            .collect(),
    )
}

// ============================================================
// Assistant
// ============================================================

async fn agent_query(
    State(state): State<AppState>,
    payload: Result<Json<AgentQueryRequest>, JsonRejection>,
) -> Result<Json<AssistantReply>, AppError> {
    let Json(req) = payload?;
    Ok(Json(state.assistant.query(&req.message).await?))
}

async fn get_version() -> &'static str {
    concat!("venue-desk ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Image URLs
// ============================================================

fn request_base(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(|host| format!("http://{host}"))
}

fn with_absolute_image(mut venue: Venue, base: Option<&str>) -> Venue {
    if let Some(base) = base {
        if !venue.image.is_empty() && !venue.image.starts_with("http") {
            venue.image = format!("{base}{}", venue.image);
        }
    }
    venue
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(msg) => AppError::BadRequest(msg),
            BookingError::NotFound(msg) => AppError::NotFound(msg),
            BookingError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::Validation(msg) => AppError::BadRequest(msg),
            AssistantError::Proxy(e) => AppError::BadGateway(format!("agent proxy failed: {e}")),
            AssistantError::Storage(e) => {
                tracing::error!(error = %e, "Storage failure");
                AppError::Internal(e.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
