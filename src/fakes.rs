//! Recording and scripted stand-ins for the port traits, plus a manual
//! clock. Test-only.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{anyhow, Result};

use crate::clock::Clock;
use crate::ports::{ColorSensor, NetworkLink, StatusDisplay, Transport};
use crate::sample::ColorSample;

pub fn sample(red: u16, green: u16, blue: u16, clear: u16) -> ColorSample {
    ColorSample {
        red,
        green,
        blue,
        clear,
    }
}

/// Manual clock; `sleep` advances time instead of blocking. Clones share
/// the same underlying time so a test can hold one while the app owns
/// another.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<Duration>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

/// Scripted link driver. Counts status polls; comes up once the configured
/// poll number is reached, unless forced down.
pub struct FakeLink {
    up_after: Option<u32>,
    down: Cell<bool>,
    polls: Cell<u32>,
    pub begin_calls: u32,
}

impl FakeLink {
    /// Link that reports connected from the `n`-th status poll on.
    pub fn up_after(n: u32) -> Self {
        Self {
            up_after: Some(n),
            down: Cell::new(false),
            polls: Cell::new(0),
            begin_calls: 0,
        }
    }

    pub fn never_up() -> Self {
        Self {
            up_after: None,
            down: Cell::new(false),
            polls: Cell::new(0),
            begin_calls: 0,
        }
    }

    /// Simulate the access point going away.
    pub fn go_down(&mut self) {
        self.down.set(true);
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl NetworkLink for FakeLink {
    fn begin_connection(&mut self) -> Result<()> {
        self.begin_calls += 1;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        if self.down.get() {
            return false;
        }
        self.up_after.is_some_and(|n| self.polls.get() >= n)
    }

    fn local_address(&self) -> Option<String> {
        Some("192.168.1.42".to_string())
    }
}

/// Keeps every rendered frame.
pub struct RecordingDisplay {
    pub frames: Vec<Vec<String>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }
}

impl StatusDisplay for RecordingDisplay {
    fn render(&mut self, lines: &[String]) {
        self.frames.push(lines.to_vec());
    }
}

/// Hands out queued samples in order.
pub struct FakeSensor {
    samples: VecDeque<ColorSample>,
    error: Option<String>,
}

impl FakeSensor {
    pub fn with_samples(samples: Vec<ColorSample>) -> Self {
        Self {
            samples: samples.into(),
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            samples: VecDeque::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl ColorSensor for FakeSensor {
    fn read_sample(&mut self) -> Result<ColorSample> {
        if let Some(reason) = &self.error {
            return Err(anyhow!("{reason}"));
        }
        self.samples
            .pop_front()
            .ok_or_else(|| anyhow!("no sample queued"))
    }
}

/// Records every request and replies with a fixed scripted result.
pub struct FakeTransport {
    result: Result<u16, String>,
    pub requests: Vec<(String, Vec<u8>)>,
}

impl FakeTransport {
    pub fn always(result: Result<u16, String>) -> Self {
        Self {
            result,
            requests: Vec::new(),
        }
    }
}

impl Transport for FakeTransport {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16> {
        self.requests.push((url.to_string(), body.to_vec()));
        match &self.result {
            Ok(status) => Ok(*status),
            Err(reason) => Err(anyhow!("{reason}")),
        }
    }
}
