// Price quote calculation
// Pure and deterministic; safe to recompute on every confirm while the user
// edits the stay.

use crate::stay::ValidatedStay;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub nights: i64,
    pub total_guests: u32,
    pub total_price: f64,
}

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Prices a validated stay at the given nightly rate.
///
/// The night count is inclusive of both the arrival and the departure day:
/// equal dates price a single night, and every further full day adds one.
/// The absolute difference is taken, so a reversed date pair prices the same
/// as the ordered pair.
pub fn compute_quote(stay: &ValidatedStay, nightly_rate: f64) -> Quote {
    let delta_ms = stay
        .check_out
        .signed_duration_since(stay.check_in)
        .num_milliseconds()
        .abs() as f64;
    let nights = (delta_ms / MILLIS_PER_DAY).round() as i64 + 1;

    Quote {
        nights,
        total_guests: stay.adults + stay.children,
        total_price: nights as f64 * nightly_rate,
    }
}
