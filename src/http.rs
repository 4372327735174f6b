use anyhow::Result;
use embedded_svc::http::client::Client;
use embedded_svc::http::{Method, Status as _};
use embedded_svc::io::Write as _;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

use chromapost::ports::Transport;

const TIMEOUT_MS: u64 = 15_000;

/// One connection per upload, carrying no state across cycles. The bounded
/// request timeout keeps a hung server from stalling the control loop for
/// good.
pub struct EspTransport;

impl Transport for EspTransport {
    fn post_json(&mut self, url: &str, body: &[u8]) -> Result<u16> {
        let config = Configuration {
            timeout: Some(std::time::Duration::from_millis(TIMEOUT_MS)),
            ..Default::default()
        };
        let connection = EspHttpConnection::new(&config)?;
        let mut client = Client::wrap(connection);

        let len = body.len().to_string();
        let headers = [
            ("Content-Type", "application/json"),
            ("Content-Length", len.as_str()),
        ];

        let mut request = client.request(Method::Post, url, &headers)?;
        request.write_all(body)?;
        let response = request.submit()?;

        Ok(response.status())
    }
}
