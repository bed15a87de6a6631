use std::collections::HashSet;

use marquee_shared::ReservationRequest;

use crate::error::ReservationError;

/// Checks a request against the shape of the show. Pure; never touches seat state.
///
/// A seat number outside `1..=total_seats` has no record, so it is reported as
/// `SeatNotFound` rather than a malformed request.
pub fn validate(request: &ReservationRequest, total_seats: usize) -> Result<(), ReservationError> {
    if request.customer_id.trim().is_empty() {
        return Err(ReservationError::InvalidRequest(
            "customerId must not be empty".to_string(),
        ));
    }

    if request.seat_numbers.is_empty() {
        return Err(ReservationError::InvalidRequest(
            "seatNumbers must contain at least one seat".to_string(),
        ));
    }

    if let Some(&n) = request
        .seat_numbers
        .iter()
        .find(|&&n| n < 1 || n as usize > total_seats)
    {
        return Err(ReservationError::SeatNotFound(n));
    }

    let mut seen = HashSet::with_capacity(request.seat_numbers.len());
    if let Some(&n) = request.seat_numbers.iter().find(|&&n| !seen.insert(n)) {
        return Err(ReservationError::InvalidRequest(format!(
            "seat {} is listed more than once",
            n
        )));
    }

    Ok(())
}
