use std::time::Duration;

use log::{info, warn};

use crate::clock::Clock;
use crate::ports::{NetworkLink, StatusDisplay};

/// Bounded reconnect budget: 20 polls at 500 ms, ~10 s per attempt.
pub const CONNECT_ATTEMPTS: u32 = 20;
pub const CONNECT_POLL_MS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// Supervises the wireless link and owns the only copy of [`LinkState`].
///
/// Each reconnect attempt is bounded; if the budget runs out the control
/// loop simply calls [`ConnectivitySupervisor::ensure_connected`] again on
/// the next tick, which makes reconnection self-healing without a
/// background task.
pub struct ConnectivitySupervisor {
    state: LinkState,
}

impl ConnectivitySupervisor {
    pub fn new() -> Self {
        Self {
            state: LinkState::Disconnected,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Downgrade the cached state if the driver reports the link dropped.
    pub fn refresh(&mut self, link: &impl NetworkLink) {
        if self.state == LinkState::Connected && !link.is_connected() {
            warn!("WiFi link dropped");
            self.state = LinkState::Disconnected;
        }
    }

    /// Block until the link is up or the retry budget runs out.
    ///
    /// Returns the resulting state and never an error: an unavailable
    /// network is an expected condition, recovered by retrying on the next
    /// tick. Progress and outcome are mirrored on the status display.
    pub fn ensure_connected(
        &mut self,
        link: &mut impl NetworkLink,
        display: &mut impl StatusDisplay,
        clock: &impl Clock,
    ) -> LinkState {
        if self.state == LinkState::Connected {
            return LinkState::Connected;
        }

        display.render(&["Connecting WiFi...".to_string()]);
        self.state = LinkState::Connecting;
        if let Err(e) = link.begin_connection() {
            warn!("WiFi connect initiation failed: {e:#}");
        }

        for attempt in 1..=CONNECT_ATTEMPTS {
            if link.is_connected() {
                let addr = link.local_address().unwrap_or_else(|| "?".to_string());
                info!("WiFi connected on poll {attempt} - IP: {addr}");
                display.render(&["WiFi OK".to_string(), addr]);
                self.state = LinkState::Connected;
                return self.state;
            }
            // Sleep between polls only; exhaustion is declared right after
            // the final failed poll.
            if attempt < CONNECT_ATTEMPTS {
                clock.sleep(Duration::from_millis(CONNECT_POLL_MS));
            }
        }

        warn!("WiFi still down after {CONNECT_ATTEMPTS} polls; will retry next tick");
        display.render(&["WiFi failed".to_string()]);
        self.state = LinkState::Disconnected;
        self.state
    }
}

impl Default for ConnectivitySupervisor {
    fn default() -> Self {
        Self::new()
    }
}
