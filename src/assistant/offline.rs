//! Rule-based responder used when no external agent is configured

use super::intent::{capacity_intent, named_venue, venues_fitting};
use crate::db::Venue;

/// Most venues listed in a capacity answer
const MAX_LISTED: usize = 8;

const HELP_REPLY: &str =
    "I can help with venue info. Try 'Which venue fits 200 guests?' or 'Tell me about Grand Hall'.";

/// Answer a query from the venue snapshot alone.
///
/// A head count in the message takes priority over a venue name.
pub fn respond(message: &str, venues: &[Venue]) -> String {
    if let Some(guests) = capacity_intent(message) {
        return capacity_reply(venues, guests);
    }

    if let Some(venue) = named_venue(venues, message) {
        return detail_reply(venue);
    }

    HELP_REPLY.to_string()
}

fn capacity_reply(venues: &[Venue], guests: u64) -> String {
    let suitable = venues_fitting(venues, guests);
    if suitable.is_empty() {
        return format!("No venues found that can fit {guests} guests.");
    }

    let list = suitable
        .iter()
        .take(MAX_LISTED)
        .map(|v| {
            format!(
                "{} (capacity {}, rent/day ${})",
                v.name, v.capacity, v.price_rent_per_day
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "I found {} venues that fit {guests} guests:\n{list}",
        suitable.len()
    )
}

fn detail_reply(venue: &Venue) -> String {
    format!(
        "{}: {}\nCapacity {}, Rent/day ${}, Sell ${}, Location {}, Status {}",
        venue.name,
        venue.description,
        venue.capacity,
        venue.price_rent_per_day,
        venue.price_sell,
        venue.location,
        venue.status
    )
}
