pub mod models;

pub use models::reservation::{ReservationRequest, ReservationResult};
pub use models::seat::{Seat, SeatNumber, SeatStatus};
pub use models::show::ShowInfo;
