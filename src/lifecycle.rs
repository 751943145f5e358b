//! Venue status state machine
//!
//! A venue's status is derived from what happened to it last: a booking
//! rents it, cancelling that booking frees it, a purchase sells it. The
//! transition function is pure; the database applies its result inside the
//! same transaction that records the triggering booking or purchase.

#[cfg(test)]
mod proptests;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Current availability of a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    #[default]
    Available,
    Rented,
    Sold,
}

impl VenueStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueStatus::Available => "available",
            VenueStatus::Rented => "rented",
            VenueStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for VenueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown venue status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for VenueStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(VenueStatus::Available),
            "rented" => Ok(VenueStatus::Rented),
            "sold" => Ok(VenueStatus::Sold),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Something that happened to a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueEvent {
    BookingCreated,
    BookingCancelled,
    Purchased,
}

/// Compute the status a venue moves to after `event`.
///
/// Bookings are accepted against any status, including `sold`, and a
/// purchase leaves any active booking in place. Both are current contract
/// and are kept deliberately permissive.
pub fn transition(_current: VenueStatus, event: VenueEvent) -> VenueStatus {
    match event {
        VenueEvent::BookingCreated => VenueStatus::Rented,
        VenueEvent::BookingCancelled => VenueStatus::Available,
        VenueEvent::Purchased => VenueStatus::Sold,
    }
}
