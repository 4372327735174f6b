use log::info;

use crate::clock::Clock;
use crate::config::Config;
use crate::link::{ConnectivitySupervisor, LinkState};
use crate::ports::{ColorSensor, NetworkLink, StatusDisplay, Transport};
use crate::report::{ReportOutcome, SampleReporter};

/// What one tick of the control loop did; returned so tests can observe a
/// single iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub link: LinkState,
    pub report: ReportOutcome,
}

/// The supervisory control loop. Owns the collaborators and the two
/// stateful components; single-threaded, run-to-completion per tick.
pub struct App<S, D, T, L, C> {
    sensor: S,
    display: D,
    transport: T,
    link: L,
    clock: C,
    supervisor: ConnectivitySupervisor,
    reporter: SampleReporter,
}

impl<S, D, T, L, C> App<S, D, T, L, C>
where
    S: ColorSensor,
    D: StatusDisplay,
    T: Transport,
    L: NetworkLink,
    C: Clock,
{
    pub fn new(config: &Config, sensor: S, display: D, transport: T, link: L, clock: C) -> Self {
        Self {
            sensor,
            display,
            transport,
            link,
            clock,
            supervisor: ConnectivitySupervisor::new(),
            reporter: SampleReporter::new(config.server_url.clone()),
        }
    }

    /// One supervisory iteration: link check, then reporting check.
    pub fn tick(&mut self) -> TickReport {
        // A dropped link is only visible through the driver; refresh the
        // cached state before deciding whether to reconnect.
        self.supervisor.refresh(&self.link);
        if self.supervisor.state() != LinkState::Connected {
            self.supervisor
                .ensure_connected(&mut self.link, &mut self.display, &self.clock);
        }

        // The reporting check runs even when reconnection just failed;
        // with the link down the transport fails fast and the outcome is
        // SendFailed.
        let now = self.clock.now();
        let report =
            self.reporter
                .maybe_run_cycle(now, &mut self.sensor, &mut self.display, &mut self.transport);

        TickReport {
            link: self.supervisor.state(),
            report,
        }
    }

    /// Run forever. There is no terminal state and no idle sleep: tick
    /// latency is dominated by sensor and network I/O when a cycle fires.
    pub fn run(mut self) -> ! {
        info!("Entering main loop");
        loop {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{sample, FakeClock, FakeLink, FakeSensor, FakeTransport, RecordingDisplay};
    use crate::report::REPORT_INTERVAL;

    fn config() -> Config {
        Config {
            wifi_ssid: "testnet".to_string(),
            wifi_pass: "hunter2".to_string(),
            server_url: "http://example.test/api/measurements".to_string(),
        }
    }

    #[test]
    fn reconnect_then_report_in_the_same_tick() {
        let clock = FakeClock::new();
        clock.advance(REPORT_INTERVAL);

        let mut app = App::new(
            &config(),
            FakeSensor::with_samples(vec![sample(10, 200, 55, 999)]),
            RecordingDisplay::new(),
            FakeTransport::always(Ok(201)),
            FakeLink::up_after(3),
            clock,
        );

        let tick = app.tick();
        assert_eq!(tick.link, LinkState::Connected);
        assert_eq!(tick.report, ReportOutcome::Sent(201));

        // The report used the freshly acquired sample.
        let (_, body) = &app.transport.requests[0];
        assert_eq!(
            std::str::from_utf8(body).unwrap(),
            r#"{"red":10,"green":200,"blue":55}"#
        );
    }

    #[test]
    fn report_is_attempted_even_when_reconnect_exhausts() {
        let clock = FakeClock::new();
        clock.advance(REPORT_INTERVAL);

        let mut app = App::new(
            &config(),
            FakeSensor::with_samples(vec![sample(1, 2, 3, 4); 2]),
            RecordingDisplay::new(),
            FakeTransport::always(Err("no route to host".into())),
            FakeLink::never_up(),
            clock.clone(),
        );

        let tick = app.tick();
        assert_eq!(tick.link, LinkState::Disconnected);
        assert!(matches!(tick.report, ReportOutcome::SendFailed(_)));

        // The cadence advanced normally despite the failure.
        let first_fire = app.reporter.last_sent();
        assert_eq!(first_fire, clock.now());

        // The next tick burns another full reconnect budget (9.5 s), so
        // the interval has elapsed again and a fresh sample is attempted.
        let tick = app.tick();
        assert!(matches!(tick.report, ReportOutcome::SendFailed(_)));
        assert!(app.reporter.last_sent() > first_fire);
        assert_eq!(app.transport.requests.len(), 2);
    }

    #[test]
    fn link_drop_triggers_reconnect_on_the_next_tick() {
        let clock = FakeClock::new();

        let mut app = App::new(
            &config(),
            FakeSensor::with_samples(vec![sample(1, 2, 3, 4); 4]),
            RecordingDisplay::new(),
            FakeTransport::always(Ok(201)),
            FakeLink::up_after(1),
            clock,
        );

        app.tick();
        assert_eq!(app.supervisor.state(), LinkState::Connected);

        app.link.go_down();
        let begin_calls = app.link.begin_calls;
        app.tick();
        assert!(app.link.begin_calls > begin_calls);
    }

    #[test]
    fn connected_tick_before_the_interval_does_nothing() {
        let clock = FakeClock::new();

        let mut app = App::new(
            &config(),
            FakeSensor::with_samples(vec![sample(1, 2, 3, 4)]),
            RecordingDisplay::new(),
            FakeTransport::always(Ok(201)),
            FakeLink::up_after(1),
            clock,
        );

        let tick = app.tick();
        assert_eq!(tick.link, LinkState::Connected);
        assert_eq!(tick.report, ReportOutcome::Skipped);
        assert!(app.transport.requests.is_empty());
    }
}
