pub mod reservation;
pub mod seat;
pub mod show;
