//! Portable control-loop core for the chromapost firmware.
//!
//! The device periodically samples a TCS34725 color sensor, shows the
//! reading on a small OLED and uploads it as JSON to a measurement server.
//! Everything hardware-shaped sits behind the trait seams in [`ports`]; the
//! esp-idf adapters live next to `main.rs` and are compiled only for
//! `target_os = "espidf"`, which keeps this core buildable and testable on
//! any host.

pub mod app;
pub mod clock;
pub mod config;
pub mod link;
pub mod ports;
pub mod report;
pub mod sample;

#[cfg(test)]
pub(crate) mod fakes;
