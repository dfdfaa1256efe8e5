use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SecurityStats {
    pub total_events: u64,
    pub total_pauses: u64,
}

impl SecurityStats {
    pub const LEN: usize = 8 + 8;

    pub fn record_pause(&mut self) {
        self.total_events = self.total_events.saturating_add(1);
        self.total_pauses = self.total_pauses.saturating_add(1);
    }

    pub fn record_unpause(&mut self) {
        self.total_events = self.total_events.saturating_add(1);
    }
}

/// Returned by `get_security_stats`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SecurityStatsView {
    pub total_events: u64,
    pub total_pauses: u64,
    pub system_paused: bool,
}
