pub mod error;
pub mod repository;
pub mod validation;
pub mod version;

pub use error::{ErrorKind, Operation, Rejection, ReservationError};
pub use repository::ReservationRepository;
pub use validation::validate;
pub use version::Version;

pub type CoreResult<T> = Result<T, ReservationError>;
