use serde::{Deserialize, Deserializer, Serialize};

use super::seat::{Seat, SeatNumber};

/// Input to hold, book and release.
///
/// Missing or `null` fields decode to empty values so that validation, not the
/// JSON decoder, reports them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seat_numbers: Vec<SeatNumber>,
    /// Last version the client saw. Blank or missing disables the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_version: Option<String>,
}

impl ReservationRequest {
    pub fn new(customer_id: impl Into<String>, seat_numbers: Vec<SeatNumber>) -> Self {
        Self {
            customer_id: customer_id.into(),
            seat_numbers,
            expected_version: None,
        }
    }

    pub fn with_expected_version(mut self, version: impl Into<String>) -> Self {
        self.expected_version = Some(version.into());
        self
    }

    /// The expected version, if one was actually supplied.
    pub fn expected_version(&self) -> Option<&str> {
        self.expected_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Outcome of every mutating operation, success or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResult {
    pub success: bool,
    pub message: String,
    pub new_version: String,
    pub seats_snapshot: Vec<Seat>,
}
