use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use marquee_core::{
    validate, CoreResult, Operation, Rejection, ReservationError, ReservationRepository, Version,
};
use marquee_shared::{ReservationRequest, ReservationResult, Seat, SeatNumber, ShowInfo};
use tracing::{debug, info};

/// Initialization parameters of the single show.
#[derive(Debug, Clone)]
pub struct ShowSettings {
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub total_seats: usize,
}

/// Live seat table plus its revision token. Only ever touched under the lock.
struct SeatTable {
    /// `seats[i].number == i + 1`
    seats: Vec<Seat>,
    version: Version,
}

impl SeatTable {
    fn seat(&self, number: SeatNumber) -> Option<&Seat> {
        Self::index(number).and_then(|i| self.seats.get(i))
    }

    fn seat_mut(&mut self, number: SeatNumber) -> Option<&mut Seat> {
        Self::index(number).and_then(move |i| self.seats.get_mut(i))
    }

    fn index(number: SeatNumber) -> Option<usize> {
        usize::try_from(number).ok()?.checked_sub(1)
    }

    fn available(&self) -> usize {
        self.seats.iter().filter(|s| s.is_available()).count()
    }

    fn check_expected_version(&self, request: &ReservationRequest) -> CoreResult<()> {
        match request.expected_version() {
            Some(expected) if !self.version.matches(expected) => {
                Err(ReservationError::VersionConflict {
                    expected: expected.to_string(),
                    current: self.version.to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn bump(&mut self) {
        self.version = self.version.next();
    }

    fn accepted(&self, message: &str) -> ReservationResult {
        ReservationResult {
            success: true,
            message: message.to_string(),
            new_version: self.version.to_string(),
            seats_snapshot: self.seats.clone(),
        }
    }

    fn rejected(&self, error: ReservationError) -> Rejection {
        Rejection::new(error, &self.version, self.seats.clone())
    }
}

/// In-memory reservation store for one show.
///
/// All mutations run under the write half of a single lock: the version check,
/// the per-seat checks, the batch write and the version bump are one atomic
/// step. Readers take the read half, so they never see a batch without its
/// version bump.
pub struct ReservationStore {
    title: String,
    starts_at: DateTime<Utc>,
    total_seats: usize,
    table: RwLock<SeatTable>,
}

impl ReservationStore {
    pub fn new(settings: ShowSettings) -> CoreResult<Self> {
        if settings.total_seats == 0 {
            return Err(ReservationError::InvalidRequest(
                "a show needs at least one seat".to_string(),
            ));
        }
        let last = SeatNumber::try_from(settings.total_seats).map_err(|_| {
            ReservationError::InvalidRequest(format!(
                "{} seats exceed the seat number range",
                settings.total_seats
            ))
        })?;

        let seats = (1..=last).map(Seat::available).collect();
        let version = Version::generate();
        info!(
            title = %settings.title,
            total_seats = settings.total_seats,
            version = %version,
            "Seat table initialized"
        );

        Ok(Self {
            title: settings.title,
            starts_at: settings.starts_at,
            total_seats: settings.total_seats,
            table: RwLock::new(SeatTable { seats, version }),
        })
    }

    pub fn total_seats(&self) -> usize {
        self.total_seats
    }

    /// Show summary and seat table read together, so both carry the same version.
    pub fn snapshot(&self) -> (ShowInfo, Vec<Seat>) {
        let table = self.read();
        (self.info_from(&table), table.seats.clone())
    }

    // Every writer leaves the table consistent (checks precede writes), so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, SeatTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SeatTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn info_from(&self, table: &SeatTable) -> ShowInfo {
        ShowInfo {
            movie_title: self.title.clone(),
            starts_at: self.starts_at,
            total_seats: self.total_seats,
            available_seats: table.available(),
            version: table.version.to_string(),
        }
    }

    fn validated(&self, operation: Operation, request: &ReservationRequest) -> Result<(), Rejection> {
        validate(request, self.total_seats).map_err(|error| {
            // Release has no seat-level failures; an unknown seat is just a bad request.
            let error = match error {
                ReservationError::SeatNotFound(n) if operation == Operation::Release => {
                    ReservationError::InvalidRequest(format!("seat {} does not exist", n))
                }
                other => other,
            };
            info!(%operation, kind = ?error.kind(), customer = %request.customer_id, "Request rejected: {}", error);
            self.read().rejected(error)
        })
    }

    /// Shared all-or-nothing path of hold and book: every seat is checked with
    /// `admits` before any seat is changed with `apply`.
    fn claim(
        &self,
        operation: Operation,
        request: &ReservationRequest,
        admits: impl Fn(&Seat) -> bool,
        apply: impl Fn(&mut Seat),
        message: &str,
    ) -> Result<ReservationResult, Rejection> {
        self.validated(operation, request)?;

        let mut table = self.write();
        if let Err(error) = Self::check_claim(&table, operation, request, &admits) {
            info!(%operation, kind = ?error.kind(), customer = %request.customer_id, "Request rejected: {}", error);
            return Err(table.rejected(error));
        }

        for &number in &request.seat_numbers {
            if let Some(seat) = table.seat_mut(number) {
                apply(seat);
            }
        }
        table.bump();

        debug!(
            %operation,
            customer = %request.customer_id,
            seats = request.seat_numbers.len(),
            version = %table.version,
            "Seats updated"
        );
        Ok(table.accepted(message))
    }

    fn check_claim(
        table: &SeatTable,
        operation: Operation,
        request: &ReservationRequest,
        admits: impl Fn(&Seat) -> bool,
    ) -> CoreResult<()> {
        table.check_expected_version(request)?;

        for &number in &request.seat_numbers {
            let seat = table
                .seat(number)
                .ok_or(ReservationError::SeatNotFound(number))?;
            if !admits(seat) {
                return Err(ReservationError::SeatUnavailable {
                    seat: number,
                    operation,
                });
            }
        }
        Ok(())
    }
}

impl ReservationRepository for ReservationStore {
    fn show_info(&self) -> ShowInfo {
        self.snapshot().0
    }

    fn seats(&self) -> Vec<Seat> {
        self.read().seats.clone()
    }

    fn hold(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection> {
        let customer = request.customer_id.as_str();
        self.claim(
            Operation::Hold,
            request,
            Seat::is_available,
            |seat| seat.hold_for(customer),
            "Seats held.",
        )
    }

    fn book(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection> {
        let customer = request.customer_id.as_str();
        self.claim(
            Operation::Book,
            request,
            |seat| seat.is_available() || seat.is_held_by(customer),
            Seat::book,
            "Booking confirmed.",
        )
    }

    /// Ignores `expectedVersion`. Seats not held by the caller are skipped, and
    /// the version moves even when nothing was released.
    fn release(&self, request: &ReservationRequest) -> Result<ReservationResult, Rejection> {
        self.validated(Operation::Release, request)?;

        let mut table = self.write();
        let mut released = 0;
        for &number in &request.seat_numbers {
            if let Some(seat) = table.seat_mut(number) {
                if seat.is_held_by(&request.customer_id) {
                    seat.release();
                    released += 1;
                }
            }
        }
        table.bump();

        debug!(
            customer = %request.customer_id,
            requested = request.seat_numbers.len(),
            released,
            version = %table.version,
            "Holds released"
        );
        Ok(table.accepted("Holds released."))
    }
}
