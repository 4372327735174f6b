//! Capability traits for the four external collaborators.
//!
//! The control loop only ever talks to these seams; the esp-idf adapters
//! implement them on the device, the fakes implement them in tests.

use anyhow::Result;

use crate::sample::ColorSample;

/// Color sensor collaborator. Probed once at startup (absence is fatal
/// there); after that a read failure is treated as a recoverable miss of
/// one reporting cycle.
pub trait ColorSensor {
    fn read_sample(&mut self) -> Result<ColorSample>;
}

/// Small text status surface. Fire and forget: a wedged display must never
/// take down the control loop, so rendering has no error channel.
pub trait StatusDisplay {
    fn render(&mut self, lines: &[String]);
}

/// HTTP upload collaborator. Takes an already-serialized JSON body and
/// returns the response status code; transport-level trouble (including a
/// down link) comes back as an error.
pub trait Transport {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16>;
}

/// Wireless link driver. Connection initiation is non-blocking; progress
/// is observed by polling [`NetworkLink::is_connected`].
pub trait NetworkLink {
    fn begin_connection(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Local IP once the link is up, if the driver knows it yet.
    fn local_address(&self) -> Option<String>;
}
