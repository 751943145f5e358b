//! Database module for the venue desk
//!
//! Provides persistence for venues, bookings, purchases and assistant token
//! usage. This is the only code that writes `venues.status`; every write
//! goes through [`crate::lifecycle::transition`] inside the transaction that
//! records the booking or purchase causing it.

mod schema;
mod seed;

pub use schema::*;

use crate::lifecycle::{transition, VenueEvent};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Venue not found: {0}")]
    VenueNotFound(i64),
    #[error("Booking not found: {0}")]
    BookingNotFound(i64),
    #[error("Database lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

const VENUE_COLUMNS: &str =
    "id, name, type, capacity, price_sell, price_rent_per_day, location, description, status, image";

const BOOKING_COLUMNS: &str = "id, venue_id, name, date, days, expected_members, created_at";

/// Thread-safe database handle
///
/// All operations hold the connection lock for their full duration, so
/// writes to a venue and its bookings never interleave.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::LockPoisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Venue Operations ====================

    /// List venues ordered by id, optionally narrowed by a text filter
    pub fn list_venues(&self, filter: Option<&str>) -> DbResult<Vec<Venue>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues ORDER BY id ASC"
        ))?;

        let venues = stmt
            .query_map([], parse_venue_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match filter {
            Some(f) => venues.into_iter().filter(|v| v.matches_filter(f)).collect(),
            None => venues,
        })
    }

    /// Get venue by ID
    pub fn get_venue(&self, id: i64) -> DbResult<Venue> {
        let conn = self.lock()?;
        fetch_venue(&conn, id)?.ok_or(DbError::VenueNotFound(id))
    }

    /// Buy a venue outright.
    ///
    /// Returns `false` when no venue has this id; nothing is written then.
    /// Active bookings on the venue are left untouched.
    pub fn purchase_venue(&self, id: i64, buyer_name: &str) -> DbResult<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        if !apply_event(&tx, id, VenueEvent::Purchased)? {
            return Ok(false);
        }

        tx.execute(
            "INSERT INTO purchases (venue_id, buyer_name, purchased_at) VALUES (?1, ?2, ?3)",
            params![id, buyer_name, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(true)
    }

    // ==================== Booking Operations ====================

    /// Insert a booking and mark its venue rented, atomically
    pub fn create_booking(&self, record: &NewBookingRecord) -> DbResult<Booking> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let now = Utc::now().to_rfc3339();

        if fetch_venue(&tx, record.venue_id)?.is_none() {
            return Err(DbError::VenueNotFound(record.venue_id));
        }

        tx.execute(
            "INSERT INTO bookings (venue_id, name, date, days, expected_members, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.venue_id,
                record.name,
                record.date,
                record.days,
                record.expected_members,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();

        apply_event(&tx, record.venue_id, VenueEvent::BookingCreated)?;
        tx.commit()?;

        Ok(Booking {
            id,
            venue_id: record.venue_id,
            name: record.name.clone(),
            date: record.date.clone(),
            days: record.days,
            expected_members: record.expected_members,
            created_at: now,
        })
    }

    /// List all bookings ordered by id
    pub fn list_bookings(&self) -> DbResult<Vec<Booking>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY id ASC"
        ))?;

        let rows = stmt.query_map([], parse_booking_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Get booking by ID
    pub fn get_booking(&self, id: i64) -> DbResult<Booking> {
        let conn = self.lock()?;
        fetch_booking(&conn, id)?.ok_or(DbError::BookingNotFound(id))
    }

    /// Delete a booking and return its venue to `available`, atomically.
    ///
    /// Returns the removed booking.
    pub fn cancel_booking(&self, id: i64) -> DbResult<Booking> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let booking = fetch_booking(&tx, id)?.ok_or(DbError::BookingNotFound(id))?;

        tx.execute("DELETE FROM bookings WHERE id = ?1", params![id])?;
        if !apply_event(&tx, booking.venue_id, VenueEvent::BookingCancelled)? {
            tracing::warn!(
                booking_id = id,
                venue_id = booking.venue_id,
                "Cancelled booking referenced a missing venue"
            );
        }
        tx.commit()?;

        Ok(booking)
    }

    // ==================== Assistant Audit ====================

    /// Append one row to the token usage audit log
    pub fn record_token_usage(&self, tokens: u64, simulated: bool) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO token_usage (call_time, tokens, simulated) VALUES (?1, ?2, ?3)",
            params![
                Utc::now().to_rfc3339(),
                i64::try_from(tokens).unwrap_or(i64::MAX),
                simulated
            ],
        )?;
        Ok(())
    }

    /// Total number of audit rows (for tests)
    #[allow(dead_code)] // Used in tests
    pub fn token_usage_count(&self) -> DbResult<i64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM token_usage", [], |row| row.get(0))
            .map_err(DbError::from)
    }
}

/// Move a venue through the status machine. Returns `false` if it does not exist.
fn apply_event(tx: &Transaction<'_>, venue_id: i64, event: VenueEvent) -> DbResult<bool> {
    let Some(venue) = fetch_venue(tx, venue_id)? else {
        return Ok(false);
    };

    let next = transition(venue.status, event);
    tx.execute(
        "UPDATE venues SET status = ?1 WHERE id = ?2",
        params![next.as_str(), venue_id],
    )?;

    tracing::debug!(
        venue_id,
        from = %venue.status,
        to = %next,
        event = ?event,
        "Venue status transition"
    );
    Ok(true)
}

fn fetch_venue(conn: &Connection, id: i64) -> DbResult<Option<Venue>> {
    conn.query_row(
        &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1"),
        params![id],
        parse_venue_row,
    )
    .optional()
    .map_err(DbError::from)
}

fn fetch_booking(conn: &Connection, id: i64) -> DbResult<Option<Booking>> {
    conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        parse_booking_row,
    )
    .optional()
    .map_err(DbError::from)
}

/// Parse a venue row from the database
fn parse_venue_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Venue> {
    let venue_type = row
        .get::<_, String>(2)?
        .parse::<VenueType>()
        .map_err(|e| conversion_error(2, e.into()))?;
    let status = row
        .get::<_, String>(8)?
        .parse::<VenueStatus>()
        .map_err(|e| conversion_error(8, Box::new(e)))?;

    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        venue_type,
        capacity: row.get(3)?,
        price_sell: row.get(4)?,
        price_rent_per_day: row.get(5)?,
        location: row.get(6)?,
        description: row.get(7)?,
        status,
        image: row.get(9)?,
    })
}

fn parse_booking_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        venue_id: row.get(1)?,
        name: row.get(2)?,
        date: row.get(3)?,
        days: row.get(4)?,
        expected_members: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn conversion_error(
    column: usize,
    err: Box<dyn std::error::Error + Send + Sync>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.seed_if_empty().unwrap();
        db
    }

    fn record(venue_id: i64) -> NewBookingRecord {
        NewBookingRecord {
            venue_id,
            name: "Ada".to_string(),
            date: "2025-06-01".to_string(),
            days: 2,
            expected_members: 120,
        }
    }

    #[test]
    fn test_list_venues_is_ordered_by_id() {
        let db = seeded();
        let ids: Vec<i64> = db.list_venues(None).unwrap().iter().map(|v| v.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        assert_eq!(ids, db.list_venues(None).unwrap().iter().map(|v| v.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_list_venues_garden_filter() {
        let db = seeded();
        let names: Vec<String> = db
            .list_venues(Some("garden"))
            .unwrap()
            .into_iter()
            .map(|v| v.name)
            .collect();
        // Sunset Garden by name/description, Orchid Conservatory by location
        assert_eq!(names, vec!["Sunset Garden", "Orchid Conservatory"]);
    }

    #[test]
    fn test_get_venue_not_found() {
        let db = seeded();
        assert!(matches!(db.get_venue(999), Err(DbError::VenueNotFound(999))));
    }

    #[test]
    fn test_create_booking_rents_venue() {
        let db = seeded();
        let booking = db.create_booking(&record(1)).unwrap();

        assert_eq!(db.get_venue(1).unwrap().status, VenueStatus::Rented);
        let fetched = db.get_booking(booking.id).unwrap();
        assert_eq!(fetched, booking);
    }

    #[test]
    fn test_create_booking_unknown_venue_writes_nothing() {
        let db = seeded();
        assert!(matches!(
            db.create_booking(&record(42)),
            Err(DbError::VenueNotFound(42))
        ));
        assert!(db.list_bookings().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_booking_frees_venue() {
        let db = seeded();
        let booking = db.create_booking(&record(2)).unwrap();

        let removed = db.cancel_booking(booking.id).unwrap();
        assert_eq!(removed.id, booking.id);
        assert!(db.list_bookings().unwrap().is_empty());
        assert_eq!(db.get_venue(2).unwrap().status, VenueStatus::Available);
    }

    #[test]
    fn test_cancel_unknown_booking() {
        let db = seeded();
        assert!(matches!(
            db.cancel_booking(5),
            Err(DbError::BookingNotFound(5))
        ));
    }

    #[test]
    fn test_purchase_sells_and_keeps_booking() {
        let db = seeded();
        let booking = db.create_booking(&record(3)).unwrap();

        assert!(db.purchase_venue(3, "Grace").unwrap());
        assert_eq!(db.get_venue(3).unwrap().status, VenueStatus::Sold);
        assert_eq!(db.list_bookings().unwrap(), vec![booking]);
    }

    #[test]
    fn test_purchase_unknown_venue_is_noop() {
        let db = seeded();
        assert!(!db.purchase_venue(77, "Grace").unwrap());
    }

    #[test]
    fn test_token_usage_is_appended() {
        let db = seeded();
        db.record_token_usage(42, false).unwrap();
        db.record_token_usage(u64::MAX, false).unwrap();
        assert_eq!(db.token_usage_count().unwrap(), 2);
    }
}
