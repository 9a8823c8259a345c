//! Structural payload validation.
//!
//! Validation is pure and runs before any store access that could write, so
//! a rejected request never leaves partial state behind.

use rail_types::{TicketPayload, TrainPayload, TrainUpdatePayload, TravellerPayload};

use crate::error::{BookingError, BookingResult};

/// A payload that can check its own required fields.
pub trait Validate {
    fn validate(&self) -> BookingResult<()>;
}

/// Fails with `InvalidInput` if `value` is empty or whitespace-only.
pub fn require_text(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

fn require_stops(stops: &[String]) -> BookingResult<()> {
    if stops.is_empty() {
        return Err(BookingError::InvalidInput(
            "train must have at least one stop".into(),
        ));
    }
    for (i, stop) in stops.iter().enumerate() {
        if stop.trim().is_empty() {
            return Err(BookingError::InvalidInput(format!(
                "stop at index {i} is empty"
            )));
        }
    }
    Ok(())
}

impl Validate for TrainPayload {
    fn validate(&self) -> BookingResult<()> {
        if self.capacity == 0 {
            return Err(BookingError::InvalidInput(
                "capacity must be greater than zero".into(),
            ));
        }
        require_text("time", &self.time)?;
        require_text("starting_point", &self.starting_point)?;
        require_stops(&self.stops)
    }
}

impl Validate for TrainUpdatePayload {
    fn validate(&self) -> BookingResult<()> {
        require_text("time", &self.time)?;
        require_text("starting_point", &self.starting_point)?;
        require_stops(&self.stops)
    }
}

impl Validate for TravellerPayload {
    fn validate(&self) -> BookingResult<()> {
        require_text("name", &self.name)?;
        require_text("phone", &self.phone)
    }
}

impl Validate for TicketPayload {
    fn validate(&self) -> BookingResult<()> {
        require_text("boarding", &self.boarding)?;
        require_text("destination", &self.destination)
    }
}
