//! Venue registry and booking manager
//!
//! Validates caller input, applies defaults and maps storage failures into
//! the caller-facing taxonomy. The database does the actual state work.

use crate::db::{Booking, Database, DbError, NewBookingRecord, Venue};
use thiserror::Error;

/// Buyer recorded when a purchase arrives without a name
const DEFAULT_BUYER: &str = "Buyer";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(DbError),
}

impl From<DbError> for BookingError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::VenueNotFound(id) => Self::NotFound(format!("Venue not found: {id}")),
            DbError::BookingNotFound(id) => Self::NotFound(format!("Booking not found: {id}")),
            other => Self::Storage(other),
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;

/// Booking request as received from a caller; every field may be absent
#[derive(Debug, Clone, Default)]
pub struct NewBooking {
    pub venue_id: Option<i64>,
    pub name: Option<String>,
    pub date: Option<String>,
    pub days: Option<i64>,
    pub expected_members: Option<i64>,
}

impl NewBooking {
    /// Check required fields and fill in defaults
    fn validate(self) -> BookingResult<NewBookingRecord> {
        let venue_id = self
            .venue_id
            .filter(|id| *id != 0)
            .ok_or_else(|| BookingError::Validation("venueId and name required".to_string()))?;

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| BookingError::Validation("venueId and name required".to_string()))?;

        let days = match self.days {
            None | Some(0) => 1,
            Some(d) if d < 0 => {
                return Err(BookingError::Validation(format!(
                    "days must be at least 1, got {d}"
                )))
            }
            Some(d) => d,
        };

        let expected_members = match self.expected_members {
            None => 0,
            Some(m) if m < 0 => {
                return Err(BookingError::Validation(format!(
                    "expectedMembers must not be negative, got {m}"
                )))
            }
            Some(m) => m,
        };

        Ok(NewBookingRecord {
            venue_id,
            name,
            date: self.date.unwrap_or_default(),
            days,
            expected_members,
        })
    }
}

/// Sole owner of venue and booking mutations
#[derive(Clone)]
pub struct BookingManager {
    db: Database,
}

impl BookingManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn list_venues(&self, filter: Option<&str>) -> BookingResult<Vec<Venue>> {
        let filter = filter.filter(|f| !f.is_empty());
        Ok(self.db.list_venues(filter)?)
    }

    pub fn get_venue(&self, id: i64) -> BookingResult<Venue> {
        Ok(self.db.get_venue(id)?)
    }

    /// Book a venue. Venues that are already rented or sold are booked
    /// anyway and end up `rented`.
    pub fn create_booking(&self, request: NewBooking) -> BookingResult<Booking> {
        let record = request.validate()?;
        let booking = self.db.create_booking(&record)?;

        tracing::info!(
            booking_id = booking.id,
            venue_id = booking.venue_id,
            date = %booking.date,
            days = booking.days,
            expected_members = booking.expected_members,
            "Booking created"
        );
        Ok(booking)
    }

    pub fn list_bookings(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.db.list_bookings()?)
    }

    pub fn get_booking(&self, id: i64) -> BookingResult<Booking> {
        Ok(self.db.get_booking(id)?)
    }

    pub fn cancel_booking(&self, id: i64) -> BookingResult<()> {
        let booking = self.db.cancel_booking(id)?;
        tracing::info!(
            booking_id = booking.id,
            venue_id = booking.venue_id,
            "Booking cancelled"
        );
        Ok(())
    }

    /// Mark a venue sold. Succeeds even when the venue does not exist.
    pub fn purchase_venue(&self, id: i64, buyer_name: Option<&str>) -> BookingResult<()> {
        let buyer = buyer_name
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BUYER);

        if self.db.purchase_venue(id, buyer)? {
            tracing::info!(venue_id = id, buyer = %buyer, "Venue sold");
        } else {
            tracing::warn!(venue_id = id, "Purchase for unknown venue had no effect");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::VenueStatus;

    fn manager() -> BookingManager {
        let db = Database::open_in_memory().unwrap();
        db.seed_if_empty().unwrap();
        BookingManager::new(db)
    }

    fn request(venue_id: i64) -> NewBooking {
        NewBooking {
            venue_id: Some(venue_id),
            name: Some("Ada".to_string()),
            date: Some("2025-09-14".to_string()),
            days: Some(3),
            expected_members: Some(80),
        }
    }

    #[test]
    fn test_booking_round_trip_keeps_fields() {
        let m = manager();
        let booking = m.create_booking(request(4)).unwrap();

        let fetched = m.get_booking(booking.id).unwrap();
        assert_eq!(fetched.date, "2025-09-14");
        assert_eq!(fetched.days, 3);
        assert_eq!(fetched.expected_members, 80);
        assert_eq!(fetched.venue_id, 4);
    }

    #[test]
    fn test_booking_defaults_applied() {
        let m = manager();
        let booking = m
            .create_booking(NewBooking {
                venue_id: Some(1),
                name: Some("Ada".to_string()),
                ..NewBooking::default()
            })
            .unwrap();

        let fetched = m.get_booking(booking.id).unwrap();
        assert_eq!(fetched.days, 1);
        assert_eq!(fetched.expected_members, 0);
        assert_eq!(fetched.date, "");
    }

    #[test]
    fn test_zero_days_defaults_to_one() {
        let m = manager();
        let mut req = request(1);
        req.days = Some(0);
        assert_eq!(m.create_booking(req).unwrap().days, 1);
    }

    #[test]
    fn test_missing_name_or_venue_is_validation_error() {
        let m = manager();

        let mut no_name = request(1);
        no_name.name = None;
        assert!(matches!(m.create_booking(no_name), Err(BookingError::Validation(_))));

        let mut blank_name = request(1);
        blank_name.name = Some("   ".to_string());
        assert!(matches!(m.create_booking(blank_name), Err(BookingError::Validation(_))));

        let mut no_venue = request(1);
        no_venue.venue_id = None;
        assert!(matches!(m.create_booking(no_venue), Err(BookingError::Validation(_))));

        let mut zero_venue = request(1);
        zero_venue.venue_id = Some(0);
        assert!(matches!(m.create_booking(zero_venue), Err(BookingError::Validation(_))));
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let m = manager();

        let mut negative_days = request(1);
        negative_days.days = Some(-2);
        assert!(matches!(m.create_booking(negative_days), Err(BookingError::Validation(_))));

        let mut negative_members = request(1);
        negative_members.expected_members = Some(-1);
        assert!(matches!(m.create_booking(negative_members), Err(BookingError::Validation(_))));
    }

    #[test]
    fn test_unknown_venue_is_not_found() {
        let m = manager();
        assert!(matches!(m.create_booking(request(404)), Err(BookingError::NotFound(_))));
    }

    #[test]
    fn test_booking_always_rents_regardless_of_prior_status() {
        let m = manager();

        m.create_booking(request(5)).unwrap();
        assert_eq!(m.get_venue(5).unwrap().status, VenueStatus::Rented);

        // Double booking is accepted under the permissive contract
        m.create_booking(request(5)).unwrap();
        assert_eq!(m.get_venue(5).unwrap().status, VenueStatus::Rented);
    }

    #[test]
    fn test_cancel_removes_booking_and_frees_venue() {
        let m = manager();
        let booking = m.create_booking(request(6)).unwrap();

        m.cancel_booking(booking.id).unwrap();
        assert!(m.list_bookings().unwrap().iter().all(|b| b.id != booking.id));
        assert_eq!(m.get_venue(6).unwrap().status, VenueStatus::Available);
        assert!(matches!(m.get_booking(booking.id), Err(BookingError::NotFound(_))));
    }

    #[test]
    fn test_cancel_unknown_booking_is_not_found() {
        let m = manager();
        assert!(matches!(m.cancel_booking(31), Err(BookingError::NotFound(_))));
    }

    #[test]
    fn test_purchase_then_book_forces_rented() {
        let m = manager();

        m.purchase_venue(7, Some("Grace")).unwrap();
        assert_eq!(m.get_venue(7).unwrap().status, VenueStatus::Sold);

        m.create_booking(request(7)).unwrap();
        assert_eq!(m.get_venue(7).unwrap().status, VenueStatus::Rented);
    }

    #[test]
    fn test_purchase_rented_venue_keeps_booking() {
        let m = manager();
        let booking = m.create_booking(request(8)).unwrap();

        m.purchase_venue(8, None).unwrap();
        assert_eq!(m.get_venue(8).unwrap().status, VenueStatus::Sold);
        assert_eq!(m.list_bookings().unwrap(), vec![booking]);
    }

    #[test]
    fn test_purchase_unknown_venue_succeeds() {
        let m = manager();
        assert!(m.purchase_venue(999, Some("Grace")).is_ok());
    }

    #[test]
    fn test_empty_filter_lists_everything() {
        let m = manager();
        assert_eq!(m.list_venues(Some("")).unwrap().len(), 10);
        assert_eq!(m.list_venues(Some("HARBOR")).unwrap().len(), 2);
    }
}
