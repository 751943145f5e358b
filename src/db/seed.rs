//! Initial venue catalogue

use super::{Database, DbResult, VenueType};
#[cfg(test)]
use super::Venue;
use rusqlite::params;

struct SeedVenue {
    name: &'static str,
    venue_type: VenueType,
    capacity: i64,
    price_sell: f64,
    price_rent_per_day: f64,
    location: &'static str,
    description: &'static str,
    image: &'static str,
}

const SEED_VENUES: &[SeedVenue] = &[
    SeedVenue {
        name: "Grand Hall",
        venue_type: VenueType::Indoor,
        capacity: 300,
        price_sell: 500_000.0,
        price_rent_per_day: 2500.0,
        location: "Downtown",
        description: "Large hall for weddings & conferences",
        image: "/images/venue1.jpg",
    },
    SeedVenue {
        name: "Sunset Garden",
        venue_type: VenueType::Outdoor,
        capacity: 150,
        price_sell: 200_000.0,
        price_rent_per_day: 1200.0,
        location: "Riverside",
        description: "Open garden perfect for ceremonies",
        image: "/images/venue2.jpg",
    },
    SeedVenue {
        name: "Rooftop Terrace",
        venue_type: VenueType::Outdoor,
        capacity: 80,
        price_sell: 120_000.0,
        price_rent_per_day: 900.0,
        location: "City Center",
        description: "Stylish rooftop with skyline views",
        image: "/images/venue3.jpg",
    },
    SeedVenue {
        name: "The Glass Pavilion",
        venue_type: VenueType::Indoor,
        capacity: 220,
        price_sell: 420_000.0,
        price_rent_per_day: 2200.0,
        location: "Harbor",
        description: "Modern glass pavilion with sea view",
        image: "/images/venue4.jpg",
    },
    SeedVenue {
        name: "Meadow Park",
        venue_type: VenueType::Outdoor,
        capacity: 400,
        price_sell: 750_000.0,
        price_rent_per_day: 3200.0,
        location: "Uptown",
        description: "Expansive parkland ideal for festivals",
        image: "/images/venue5.jpg",
    },
    SeedVenue {
        name: "Studio Loft",
        venue_type: VenueType::Indoor,
        capacity: 60,
        price_sell: 90_000.0,
        price_rent_per_day: 650.0,
        location: "Arts District",
        description: "Cozy loft space for private events",
        image: "/images/venue6.jpg",
    },
    SeedVenue {
        name: "Crystal Ballroom",
        venue_type: VenueType::Indoor,
        capacity: 500,
        price_sell: 950_000.0,
        price_rent_per_day: 5000.0,
        location: "Grand Avenue",
        description: "Opulent ballroom with chandelier",
        image: "/images/venue7.jpg",
    },
    SeedVenue {
        name: "Harbor Deck",
        venue_type: VenueType::Outdoor,
        capacity: 120,
        price_sell: 150_000.0,
        price_rent_per_day: 1100.0,
        location: "Harborfront",
        description: "Open deck overlooking the harbor",
        image: "/images/venue8.jpg",
    },
    SeedVenue {
        name: "Maple Conference Center",
        venue_type: VenueType::Indoor,
        capacity: 180,
        price_sell: 300_000.0,
        price_rent_per_day: 1800.0,
        location: "Business Park",
        description: "Professional conference facilities",
        image: "/images/venue9.jpg",
    },
    SeedVenue {
        name: "Orchid Conservatory",
        venue_type: VenueType::Indoor,
        capacity: 90,
        price_sell: 175_000.0,
        price_rent_per_day: 1000.0,
        location: "Botanic Gardens",
        description: "Indoor conservatory with plants & light",
        image: "/images/venue10.jpg",
    },
];

impl Database {
    /// Insert the fixed venue catalogue if the venues table is empty.
    ///
    /// Returns the number of venues inserted (0 when already seeded).
    pub fn seed_if_empty(&self) -> DbResult<usize> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
        if existing > 0 {
            tracing::info!(existing, "Venues already present, skipping seed");
            return Ok(0);
        }

        {
            let mut stmt = tx.prepare(
                "INSERT INTO venues (name, type, capacity, price_sell, price_rent_per_day, location, description, image)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for v in SEED_VENUES {
                stmt.execute(params![
                    v.name,
                    v.venue_type.as_str(),
                    v.capacity,
                    v.price_sell,
                    v.price_rent_per_day,
                    v.location,
                    v.description,
                    v.image,
                ])?;
            }
        }
        tx.commit()?;

        tracing::info!(count = SEED_VENUES.len(), "Seeded venues");
        Ok(SEED_VENUES.len())
    }

    /// Insert a single venue fixture, returning its new id
    #[cfg(test)]
    pub fn insert_venue(&self, venue: &Venue) -> DbResult<i64> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO venues (name, type, capacity, price_sell, price_rent_per_day, location, description, status, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                venue.name,
                venue.venue_type.as_str(),
                venue.capacity,
                venue.price_sell,
                venue.price_rent_per_day,
                venue.location,
                venue.description,
                venue.status.as_str(),
                venue.image,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
