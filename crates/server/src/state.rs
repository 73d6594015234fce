use distcalc_compute::Dispatcher;

/// Shared state handed to every handler.
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
