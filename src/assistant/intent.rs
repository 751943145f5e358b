//! Intent detection over free-text assistant queries

use crate::db::Venue;
use regex::Regex;
use std::sync::LazyLock;

/// "<number> guests" and its synonyms
static CAPACITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"([0-9]+)\s*(guests|people|persons|members)"));

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        // Pattern is a literal covered by the tests below
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}

/// Extract a requested head count from the message.
///
/// Matching is case-insensitive. Counts too large for `u64` saturate, which
/// simply means no venue fits.
pub fn capacity_intent(message: &str) -> Option<u64> {
    let lowered = message.to_lowercase();
    let captures = CAPACITY_REGEX.captures(&lowered)?;
    let digits = captures.get(1)?.as_str();
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Venues with room for at least `guests` people, in registry order
pub fn venues_fitting(venues: &[Venue], guests: u64) -> Vec<&Venue> {
    venues
        .iter()
        .filter(|v| u64::try_from(v.capacity).is_ok_and(|c| c >= guests))
        .collect()
}

/// First venue, in registry order, whose leading name word appears in the message
pub fn named_venue<'a>(venues: &'a [Venue], message: &str) -> Option<&'a Venue> {
    let lowered = message.to_lowercase();
    venues.iter().find(|v| {
        v.name_token()
            .is_some_and(|token| lowered.contains(token.as_str()))
    })
}
