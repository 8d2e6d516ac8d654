// Stay selection and validation
// Raw user selections are held as the UI delivered them; guest counts stay as
// text until validation so a non-numeric entry fails cleanly instead of
// poisoning the state.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

use crate::api::BookingRequest;
use crate::feedback::messages;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("check-in and check-out dates are required")]
    MissingDates,

    #[error("guest counts must be whole numbers with at least one adult")]
    InvalidGuestCount,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingDates => messages::SELECT_DATES,
            ValidationError::InvalidGuestCount => messages::INVALID_GUESTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StayInput {
    pub check_in: Option<DateTime<FixedOffset>>,
    pub check_out: Option<DateTime<FixedOffset>>,
    pub adults: String,
    pub children: String,
}

impl Default for StayInput {
    fn default() -> Self {
        Self {
            check_in: None,
            check_out: None,
            adults: "1".to_string(),
            children: "0".to_string(),
        }
    }
}

impl StayInput {
    /// Checks dates first, then guest counts. A reversed date pair is allowed
    /// through; the night count is symmetric in the two dates.
    pub fn validate(&self) -> Result<ValidatedStay, ValidationError> {
        let (check_in, check_out) = match (self.check_in, self.check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => return Err(ValidationError::MissingDates),
        };

        let adults: u32 = self
            .adults
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidGuestCount)?;
        let children: u32 = self
            .children
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidGuestCount)?;
        if adults < 1 {
            return Err(ValidationError::InvalidGuestCount);
        }

        Ok(ValidatedStay {
            check_in,
            check_out,
            adults,
            children,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedStay {
    pub check_in: DateTime<FixedOffset>,
    pub check_out: DateTime<FixedOffset>,
    pub adults: u32,
    pub children: u32,
}

impl ValidatedStay {
    /// Builds the reservation payload, normalizing both instants to their
    /// local calendar dates.
    pub fn to_booking_request(&self) -> BookingRequest {
        BookingRequest {
            check_in_date: calendar_date(self.check_in).format("%Y-%m-%d").to_string(),
            check_out_date: calendar_date(self.check_out).format("%Y-%m-%d").to_string(),
            num_of_adults: self.adults,
            num_of_children: self.children,
        }
    }
}

/// Calendar date of an instant in its own timezone. The instant is shifted by
/// its UTC offset before taking the UTC date portion, so serialization never
/// moves the day across midnight.
pub fn calendar_date(instant: DateTime<FixedOffset>) -> NaiveDate {
    let offset_seconds = i64::from(instant.offset().local_minus_utc());
    (instant.with_timezone(&Utc) + Duration::seconds(offset_seconds)).date_naive()
}
