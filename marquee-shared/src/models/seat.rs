use serde::{Deserialize, Serialize};

pub type SeatNumber = i32;

/// Lifecycle of a single seat. `Booked` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SeatStatus {
    Available,
    Held,
    Booked,
}

/// A seat as handed out to callers. Always a copy, never a view into the live table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub number: SeatNumber,
    pub status: SeatStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held_by: Option<String>,
}

impl Seat {
    pub fn available(number: SeatNumber) -> Self {
        Self {
            number,
            status: SeatStatus::Available,
            held_by: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }

    /// True when the seat is held by exactly this customer.
    pub fn is_held_by(&self, customer_id: &str) -> bool {
        self.status == SeatStatus::Held && self.held_by.as_deref() == Some(customer_id)
    }

    pub fn hold_for(&mut self, customer_id: &str) {
        self.status = SeatStatus::Held;
        self.held_by = Some(customer_id.to_string());
    }

    pub fn book(&mut self) {
        self.status = SeatStatus::Booked;
        self.held_by = None;
    }

    pub fn release(&mut self) {
        self.status = SeatStatus::Available;
        self.held_by = None;
    }
}
