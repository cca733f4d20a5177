//! Relay parameters: server-side use case control.

/// Parameters for [`RelayGiftUseCase`](crate::use_cases::relay_gift::RelayGiftUseCase).
#[derive(Debug, Clone)]
pub struct RelayParams {
    /// Include the "where to buy" clause in new sessions' system turn.
    pub where_to_buy: bool,
    /// Capacity of the per-request event channel.
    pub channel_capacity: usize,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            where_to_buy: true,
            channel_capacity: 64,
        }
    }
}

impl RelayParams {
    pub fn with_where_to_buy(mut self, enabled: bool) -> Self {
        self.where_to_buy = enabled;
        self
    }
}
