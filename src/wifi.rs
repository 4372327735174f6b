use anyhow::Result;
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::wifi::{AuthMethod, ClientConfiguration, Configuration, EspWifi};
use log::info;

use chromapost::ports::NetworkLink;

/// STA-mode WiFi driver behind the [`NetworkLink`] seam.
///
/// Construction configures and starts the radio but does not associate;
/// the connectivity supervisor initiates that and polls for the result.
pub struct EspLink {
    wifi: Box<EspWifi<'static>>,
}

impl EspLink {
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        ssid: &str,
        password: &str,
    ) -> Result<Self> {
        let mut wifi = EspWifi::new(modem, sysloop, None)?;

        let auth = if password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };

        let mut wifi_ssid = heapless::String::<32>::new();
        let mut wifi_pass = heapless::String::<64>::new();
        wifi_ssid.push_str(ssid).ok();
        wifi_pass.push_str(password).ok();

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: wifi_ssid,
            password: wifi_pass,
            auth_method: auth,
            ..Default::default()
        }))?;

        wifi.start()?;
        info!("WiFi started, STA config for '{}'", ssid);

        Ok(Self {
            wifi: Box::new(wifi),
        })
    }
}

impl NetworkLink for EspLink {
    fn begin_connection(&mut self) -> Result<()> {
        // connect() only queues the association attempt; completion is
        // observed through is_connected().
        self.wifi.connect()?;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    fn local_address(&self) -> Option<String> {
        self.wifi
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip.to_string())
    }
}
