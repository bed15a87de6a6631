use std::sync::Arc;

use marquee_core::ReservationRepository;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReservationRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReservationRepository>) -> Self {
        Self { store }
    }
}
