use std::fmt;

use marquee_shared::{ReservationResult, Seat, SeatNumber};

use crate::version::Version;

/// The mutating operations a store exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Hold,
    Book,
    Release,
}

impl Operation {
    fn unavailable_suffix(self) -> &'static str {
        match self {
            Operation::Book => " for booking",
            Operation::Hold | Operation::Release => "",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Hold => "hold",
            Operation::Book => "book",
            Operation::Release => "release",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Seat {0} does not exist.")]
    SeatNotFound(SeatNumber),

    #[error("Seat {seat} not available{}.", .operation.unavailable_suffix())]
    SeatUnavailable {
        seat: SeatNumber,
        operation: Operation,
    },

    #[error("Version mismatch. Refresh seats.")]
    VersionConflict {
        expected: String,
        current: String,
    },
}

/// Coarse classification of a failure, used by transports to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    SeatNotFound,
    SeatUnavailable,
    VersionConflict,
}

impl ErrorKind {
    /// Conflicts are caused by competing callers; everything else is a bad request.
    pub fn is_conflict(self) -> bool {
        matches!(self, ErrorKind::SeatUnavailable | ErrorKind::VersionConflict)
    }
}

impl ReservationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReservationError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            ReservationError::SeatNotFound(_) => ErrorKind::SeatNotFound,
            ReservationError::SeatUnavailable { .. } => ErrorKind::SeatUnavailable,
            ReservationError::VersionConflict { .. } => ErrorKind::VersionConflict,
        }
    }
}

/// A failed mutation together with the state the caller should resync from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{error}")]
pub struct Rejection {
    pub error: ReservationError,
    pub result: ReservationResult,
}

impl Rejection {
    pub fn new(error: ReservationError, current_version: &Version, seats: Vec<Seat>) -> Self {
        let result = ReservationResult {
            success: false,
            message: error.to_string(),
            new_version: current_version.to_string(),
            seats_snapshot: seats,
        };
        Self { error, result }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}
