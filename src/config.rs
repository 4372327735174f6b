//! Build-time injected configuration.
//!
//! `build.rs` promotes constants from an optional untracked
//! `secrets.local.rs` into rustc env vars; the defaults below keep the
//! firmware compiling without one. There is no runtime configuration
//! surface and nothing is persisted on the device.

const DEFAULT_WIFI_SSID: &str = "YOUR_WIFI_SSID";
const DEFAULT_WIFI_PASS: &str = "";
const DEFAULT_SERVER_URL: &str = "http://192.168.0.100:5000/api/measurements";

#[derive(Debug, Clone)]
pub struct Config {
    pub wifi_ssid: String,
    pub wifi_pass: String,
    pub server_url: String,
}

impl Config {
    /// Configuration as baked in at compile time.
    pub fn from_build_env() -> Config {
        Config {
            wifi_ssid: option_env!("LOCAL_WIFI_SSID")
                .unwrap_or(DEFAULT_WIFI_SSID)
                .to_string(),
            wifi_pass: option_env!("LOCAL_WIFI_PASS")
                .unwrap_or(DEFAULT_WIFI_PASS)
                .to_string(),
            server_url: option_env!("LOCAL_SERVER_URL")
                .unwrap_or(DEFAULT_SERVER_URL)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_env_config_is_never_empty() {
        let cfg = Config::from_build_env();
        assert!(!cfg.wifi_ssid.is_empty());
        assert!(!cfg.server_url.is_empty());
    }
}
