//! Database schema and types

pub use crate::lifecycle::VenueStatus;
use serde::Serialize;
use std::str::FromStr;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS venues (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    capacity INTEGER NOT NULL,
    price_sell REAL NOT NULL,
    price_rent_per_day REAL NOT NULL,
    location TEXT NOT NULL,
    description TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'available',
    image TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    venue_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    date TEXT NOT NULL,
    days INTEGER NOT NULL,
    expected_members INTEGER NOT NULL,
    created_at TEXT NOT NULL,

    FOREIGN KEY (venue_id) REFERENCES venues(id)
);

CREATE INDEX IF NOT EXISTS idx_bookings_venue ON bookings(venue_id);

CREATE TABLE IF NOT EXISTS purchases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    venue_id INTEGER NOT NULL,
    buyer_name TEXT NOT NULL,
    purchased_at TEXT NOT NULL,

    FOREIGN KEY (venue_id) REFERENCES venues(id)
);

CREATE TABLE IF NOT EXISTS token_usage (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    call_time TEXT NOT NULL,
    tokens INTEGER NOT NULL,
    simulated BOOLEAN NOT NULL
);
";

/// Indoor or outdoor space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VenueType {
    Indoor,
    Outdoor,
}

impl VenueType {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueType::Indoor => "Indoor",
            VenueType::Outdoor => "Outdoor",
        }
    }
}

impl FromStr for VenueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("indoor") {
            Ok(VenueType::Indoor)
        } else if s.eq_ignore_ascii_case("outdoor") {
            Ok(VenueType::Outdoor)
        } else {
            Err(format!("Unknown venue type: {s}"))
        }
    }
}

/// Venue record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: VenueType,
    pub capacity: i64,
    pub price_sell: f64,
    pub price_rent_per_day: f64,
    pub location: String,
    pub description: String,
    pub status: VenueStatus,
    pub image: String,
}

impl Venue {
    /// Case-insensitive substring match against name, location and description
    pub fn matches_filter(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        [&self.name, &self.location, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Lower-cased first whitespace-delimited token of the name
    pub fn name_token(&self) -> Option<String> {
        self.name
            .split_whitespace()
            .next()
            .map(str::to_lowercase)
    }
}

/// Booking record
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub venue_id: i64,
    pub name: String,
    pub date: String,
    pub days: i64,
    pub expected_members: i64,
    pub created_at: String,
}

/// Validated input for inserting a booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookingRecord {
    pub venue_id: i64,
    pub name: String,
    pub date: String,
    pub days: i64,
    pub expected_members: i64,
}
