//! API request and response types

use serde::{Deserialize, Serialize};

/// Query string for venue listing
#[derive(Debug, Deserialize)]
pub struct VenueQuery {
    pub q: Option<String>,
}

/// Request to book a venue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub venue_id: Option<i64>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub days: Option<i64>,
    pub expected_members: Option<i64>,
}

/// Request to buy a venue
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    pub buyer_name: Option<String>,
}

/// Request to ask the assistant
#[derive(Debug, Deserialize)]
pub struct AgentQueryRequest {
    #[serde(default)]
    pub message: String,
}

/// Response for booking creation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub success: bool,
    pub booking_id: i64,
}

/// Response for actions without a payload
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Sponsor advert shown next to the venue list
#[derive(Debug, Serialize)]
pub struct Ad {
    pub id: &'static str,
    pub title: &'static str,
    pub image: String,
    pub link: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
