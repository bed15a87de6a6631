use marquee_shared::{ReservationRequest, ReservationResult, Seat, ShowInfo};

use crate::error::Rejection;

/// What a transport needs from a reservation store.
///
/// Calls are synchronous: none of them waits on I/O and each is bounded by the
/// size of the seat table.
pub trait ReservationRepository: Send + Sync {
    /// Show summary with the current number of available seats and version.
    fn show_info(&self) -> ShowInfo;

    /// Copy of the seat table, ordered by seat number.
    fn seats(&self) -> Vec<Seat>;

    /// Place temporary holds on every requested seat, or on none of them.
    fn hold(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection>;

    /// Book every requested seat, or none of them.
    fn book(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection>;

    /// Best-effort release of the caller's own holds.
    fn release(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection>;
}
